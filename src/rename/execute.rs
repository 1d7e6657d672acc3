// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Plan execution

use std::fs;
use tracing::{info, warn};

use super::plan::{PlanItem, RenamePlan};
use super::BatchResult;
use crate::FileRenamingError;

/// Apply `plan` in order. A failing file is recorded and the batch moves
/// on; nothing is rolled back.
pub fn execute(plan: &RenamePlan) -> BatchResult {
    let mut result = BatchResult::default();

    for item in plan.items() {
        match item {
            PlanItem::Rename(entry) => match fs::rename(&entry.source.full_path, &entry.target_path) {
                Ok(()) => {
                    info!("Renamed {:?} -> {:?}", entry.source.full_path, entry.target_path);
                    result.renamed.push(entry.clone());
                }
                Err(source) => {
                    let error = FileRenamingError::RenameFailed {
                        file: entry.source.name.clone(),
                        source,
                    };
                    warn!("{}", error);
                    result.errors.push(error.to_string());
                }
            },
            PlanItem::Unresolvable { error, .. } => {
                warn!("{}", error);
                result.errors.push(error.to_string());
            }
        }
    }

    result
}
