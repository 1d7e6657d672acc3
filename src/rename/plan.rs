// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Rename planning
//!
//! Planning only stats the filesystem. Every target is decided before the
//! first rename happens.

use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

use super::collision::CollisionResolver;
use super::transform::{compile_filter, matches_filter, split_extension, transform_stem};
use super::{contains_separator, FileEntry, PatternRule, RenameRule};
use crate::{FileRenamingError, Result};

/// A resolved rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenamePlanEntry {
    pub source: FileEntry,
    /// Always inside `source.directory`
    pub target_path: PathBuf,
}

/// One file's place in the plan
#[derive(Debug)]
pub enum PlanItem {
    Rename(RenamePlanEntry),
    /// The file could not get a target; reported at execution time
    Unresolvable {
        source: FileEntry,
        error: FileRenamingError,
    },
}

/// Ordered plan for one batch, in input order
#[derive(Debug, Default)]
pub struct RenamePlan {
    items: Vec<PlanItem>,
    resolver: CollisionResolver,
}

impl RenamePlan {
    pub fn items(&self) -> &[PlanItem] {
        &self.items
    }

    /// Resolved renames only
    pub fn entries(&self) -> impl Iterator<Item = &RenamePlanEntry> {
        self.items.iter().filter_map(|item| match item {
            PlanItem::Rename(entry) => Some(entry),
            PlanItem::Unresolvable { .. } => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    fn push(&mut self, file: &FileEntry, stem: &str, ext: &str) {
        let desired = file.directory.join(format!("{}{}", stem, ext));
        if desired == file.full_path {
            debug!("Name unchanged, skipping {:?}", file.full_path);
            return;
        }

        match self.resolver.resolve(&file.directory, stem, ext) {
            Some(target_path) => {
                debug!("Planned {:?} -> {:?}", file.full_path, target_path);
                self.items.push(PlanItem::Rename(RenamePlanEntry {
                    source: file.clone(),
                    target_path,
                }));
            }
            None => self.items.push(PlanItem::Unresolvable {
                source: file.clone(),
                error: FileRenamingError::CollisionExhausted {
                    file: file.name.clone(),
                },
            }),
        }
    }
}

/// Plan a batch for either kind of rule
pub fn plan(files: &[FileEntry], rule: &RenameRule) -> Result<RenamePlan> {
    match rule {
        RenameRule::Pattern(rule) => plan_pattern(files, rule),
        RenameRule::External(names) => plan_external(files, names),
    }
}

/// Filter, transform and resolve. Files the glob skips do not consume a
/// sequence number.
pub fn plan_pattern(files: &[FileEntry], rule: &PatternRule) -> Result<RenamePlan> {
    rule.validate()?;
    let filter = compile_filter(rule)?;

    let mut plan = RenamePlan::default();
    let matched = files
        .iter()
        .filter(|file| matches_filter(filter.as_ref(), &file.name));

    for (ordinal, file) in matched.enumerate() {
        let (stem, ext) = split_extension(&file.name);
        let candidate = transform_stem(stem, rule, ordinal);
        plan.push(file, &candidate, ext);
    }

    Ok(plan)
}

/// Pair each file with its external name, keeping the file's extension.
/// Any invalid name fails the whole batch.
pub fn plan_external(files: &[FileEntry], names: &[String]) -> Result<RenamePlan> {
    if names.len() != files.len() {
        return Err(FileRenamingError::CountMismatch {
            files: files.len(),
            names: names.len(),
        });
    }

    let names: Vec<&str> = names.iter().map(|n| n.trim()).collect();
    for (file, name) in files.iter().zip(&names) {
        if name.is_empty() {
            return Err(FileRenamingError::Validation(format!(
                "Empty new name for {}",
                file.name
            )));
        }
        if contains_separator(name) {
            return Err(FileRenamingError::Validation(format!(
                "New name for {} must not contain a path separator: {:?}",
                file.name, name
            )));
        }
    }

    let mut plan = RenamePlan::default();
    for (file, name) in files.iter().zip(names) {
        let (_, ext) = split_extension(&file.name);
        plan.push(file, name, ext);
    }

    Ok(plan)
}
