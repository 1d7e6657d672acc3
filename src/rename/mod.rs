// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Batch rename engine
//!
//! A batch goes through two stages: [`plan`] computes every target name up
//! front (filtering, transforming and resolving collisions with read-only
//! existence checks), then [`execute`] applies the plan file by file.
//!
//! Batches are not atomic. Filesystems offer no multi-file rename, so a
//! failure or crash part-way leaves the earlier files renamed and the later
//! ones untouched. Per-file failures are collected in the [`BatchResult`]
//! rather than aborting the batch.

pub mod collision;
pub mod execute;
pub mod plan;
pub mod transform;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

use crate::ai::NameGenerator;
use crate::{FileRenamingError, Result};

pub use collision::{CollisionResolver, MAX_COLLISION_ATTEMPTS};
pub use execute::execute;
pub use plan::{plan, PlanItem, RenamePlan, RenamePlanEntry};
pub use transform::{split_extension, transform};

/// One file on disk at plan time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// Directory containing the file
    #[serde(alias = "path")]
    pub directory: PathBuf,
    /// File name, extension included
    pub name: String,
    pub full_path: PathBuf,
}

impl FileEntry {
    /// Build an entry from a path. Returns `None` for paths without a
    /// UTF-8 file name.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_string();
        let directory = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Some(Self {
            directory,
            name,
            full_path: path.to_path_buf(),
        })
    }
}

/// Case folding applied by a [`PatternRule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    #[default]
    #[serde(alias = "")]
    None,
    Lower,
    Upper,
    /// First character upper, the rest lower. Not per word.
    Title,
}

impl CaseMode {
    pub fn apply(self, name: &str) -> String {
        match self {
            CaseMode::None => name.to_string(),
            CaseMode::Lower => name.to_lowercase(),
            CaseMode::Upper => name.to_uppercase(),
            CaseMode::Title => {
                let lower = name.to_lowercase();
                let mut chars = lower.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

impl FromStr for CaseMode {
    type Err = FileRenamingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "" | "none" => Ok(CaseMode::None),
            "lower" => Ok(CaseMode::Lower),
            "upper" => Ok(CaseMode::Upper),
            "title" => Ok(CaseMode::Title),
            other => Err(FileRenamingError::Validation(format!(
                "Unknown case mode '{}'",
                other
            ))),
        }
    }
}

/// Deterministic textual rename rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatternRule {
    /// Glob on the full file name; empty or `*` matches everything
    #[serde(rename = "pattern")]
    pub glob_pattern: String,
    pub replace_from: String,
    pub replace_to: String,
    #[serde(rename = "addPrefix")]
    pub prefix: String,
    #[serde(rename = "addSuffix")]
    pub suffix: String,
    #[serde(rename = "caseType")]
    pub case_mode: CaseMode,
    pub number_start: i64,
    /// A step of zero still advances the counter by one.
    // TODO: revisit whether step zero should hold the counter constant
    // once existing saved rules no longer depend on it.
    pub number_step: i64,
}

impl PatternRule {
    /// Numbering is on when either the start or the step is non-zero
    pub fn numbering_enabled(&self) -> bool {
        self.number_start != 0 || self.number_step != 0
    }

    /// Reject rules whose literal parts would move files out of their
    /// directory
    pub fn validate(&self) -> Result<()> {
        let literals = [
            ("prefix", &self.prefix),
            ("suffix", &self.suffix),
            ("replace-to", &self.replace_to),
        ];
        for (field, value) in literals {
            if contains_separator(value) {
                return Err(FileRenamingError::Validation(format!(
                    "{} must not contain a path separator: {:?}",
                    field, value
                )));
            }
        }
        Ok(())
    }
}

/// How the new names of a batch are obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameRule {
    Pattern(PatternRule),
    /// Pre-computed base names (no extension), positionally matching the
    /// input files
    External(Vec<String>),
}

/// Outcome of executing a plan
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchResult {
    /// One message per failing file, in input order
    pub errors: Vec<String>,
    /// Entries that were renamed
    pub renamed: Vec<plan::RenamePlanEntry>,
}

impl BatchResult {
    /// True when no file failed
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of files the executor tried to rename or reported on
    pub fn attempted(&self) -> usize {
        self.errors.len() + self.renamed.len()
    }

    /// Turn a partially failed batch into an error, for callers that only
    /// care about full success
    pub fn into_result(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FileRenamingError::PartialFailure {
                failed: self.errors.len(),
                total: self.attempted(),
            })
        }
    }
}

pub(crate) fn contains_separator(value: &str) -> bool {
    value.chars().any(|c| c == '/' || std::path::is_separator(c))
}

/// Plan and apply a rule-based rename
pub fn plan_and_apply_pattern_rename(files: &[FileEntry], rule: &PatternRule) -> Result<BatchResult> {
    let plan = plan::plan_pattern(files, rule)?;
    info!("Planned {} rename(s) for {} file(s)", plan.entries().count(), files.len());
    Ok(execute(&plan))
}

/// Plan and apply externally supplied base names
pub fn plan_and_apply_external_rename(files: &[FileEntry], names: &[String]) -> Result<BatchResult> {
    let plan = plan::plan_external(files, names)?;
    info!("Planned {} rename(s) for {} file(s)", plan.entries().count(), files.len());
    Ok(execute(&plan))
}

/// Ask `generator` for new names, then plan and apply them.
///
/// Any generator failure aborts the whole operation before the filesystem is
/// touched.
pub async fn plan_and_apply_generated_rename<G>(
    generator: &G,
    files: &[FileEntry],
    instruction: &str,
) -> Result<BatchResult>
where
    G: NameGenerator + ?Sized,
{
    let names = generator.generate_names(files, instruction).await?;
    plan_and_apply_external_rename(files, &names)
}
