// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! file-renaming: batch file renamer
//!
//! Renames batches of files using deterministic textual rules or names
//! proposed by a remote language model, with collision resolution and
//! per-file failure reporting.

pub mod ai;
pub mod config;
pub mod error;
pub mod rename;
pub mod walker;

pub use config::AiConfig;
pub use error::{FileRenamingError, Result};
pub use rename::{
    plan_and_apply_external_rename, plan_and_apply_generated_rename,
    plan_and_apply_pattern_rename, BatchResult, CaseMode, FileEntry, PatternRule, RenameRule,
};
