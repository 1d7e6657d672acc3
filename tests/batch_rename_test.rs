// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

use async_trait::async_trait;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use file_renaming::ai::NameGenerator;
use file_renaming::rename::plan::plan_pattern;
use file_renaming::walker::collect_files;
use file_renaming::{
    plan_and_apply_external_rename, plan_and_apply_generated_rename,
    plan_and_apply_pattern_rename, CaseMode, FileEntry, FileRenamingError, PatternRule, Result,
};

fn create(dir: &Path, names: &[&str]) -> Vec<FileEntry> {
    for name in names {
        fs::write(dir.join(name), name.as_bytes()).unwrap();
    }
    let paths: Vec<_> = names.iter().map(|n| dir.join(n)).collect();
    collect_files(&paths, false)
}

fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn prefix_rename_with_existing_target() {
    let dir = TempDir::new().unwrap();
    let files = create(dir.path(), &["a.txt", "b.txt"]);
    fs::write(dir.path().join("new_a.txt"), b"occupied").unwrap();

    let rule = PatternRule {
        prefix: "new_".to_string(),
        ..Default::default()
    };
    let result = plan_and_apply_pattern_rename(&files, &rule).unwrap();

    assert!(result.is_success());
    assert_eq!(listing(dir.path()), vec!["new_a.txt", "new_a_1.txt", "new_b.txt"]);
    assert_eq!(fs::read(dir.path().join("new_a.txt")).unwrap(), b"occupied");
    assert_eq!(fs::read(dir.path().join("new_a_1.txt")).unwrap(), b"a.txt");
}

#[test]
fn successful_batch_moves_every_planned_entry() {
    let dir = TempDir::new().unwrap();
    let files = create(dir.path(), &["One.md", "two.md", "three.md", "skip.log"]);
    let rule = PatternRule {
        glob_pattern: "*.md".to_string(),
        case_mode: CaseMode::Title,
        number_start: 1,
        ..Default::default()
    };

    let planned: Vec<_> = plan_pattern(&files, &rule).unwrap().entries().cloned().collect();
    let result = plan_and_apply_pattern_rename(&files, &rule).unwrap();

    assert!(result.is_success());
    assert_eq!(result.renamed, planned);
    for entry in &planned {
        assert!(!entry.source.full_path.exists());
        assert!(entry.target_path.exists());
        assert_eq!(entry.target_path.parent(), Some(entry.source.directory.as_path()));
    }
    assert_eq!(
        listing(dir.path()),
        vec!["One_1.md", "Three_3.md", "Two_2.md", "skip.log"]
    );
}

#[test]
fn glob_skipped_files_are_untouched_and_unreported() {
    let dir = TempDir::new().unwrap();
    let files = create(dir.path(), &["a.txt", "b.jpg"]);
    let rule = PatternRule {
        glob_pattern: "*.txt".to_string(),
        suffix: "_done".to_string(),
        ..Default::default()
    };

    let result = plan_and_apply_pattern_rename(&files, &rule).unwrap();
    assert!(result.errors.is_empty());
    assert_eq!(result.renamed.len(), 1);
    assert_eq!(listing(dir.path()), vec!["a_done.txt", "b.jpg"]);
}

#[test]
fn external_names_keep_extensions() {
    let dir = TempDir::new().unwrap();
    let files = create(dir.path(), &["f1.png", "f2.png"]);
    let names = vec!["报告".to_string(), "总结".to_string()];

    let result = plan_and_apply_external_rename(&files, &names).unwrap();
    assert!(result.is_success());
    assert_eq!(listing(dir.path()), vec!["总结.png", "报告.png"]);
}

#[test]
fn count_mismatch_mutates_nothing() {
    let dir = TempDir::new().unwrap();
    let files = create(dir.path(), &["f1.png", "f2.png", "f3.png"]);
    let names = vec!["a".to_string(), "b".to_string()];

    let err = plan_and_apply_external_rename(&files, &names).unwrap_err();
    assert!(matches!(err, FileRenamingError::CountMismatch { files: 3, names: 2 }));
    assert_eq!(listing(dir.path()), vec!["f1.png", "f2.png", "f3.png"]);
}

#[test]
fn unchanged_names_are_neither_renamed_nor_reported() {
    let dir = TempDir::new().unwrap();
    let files = create(dir.path(), &["same.txt", "other.txt"]);
    let names = vec!["same".to_string(), "changed".to_string()];

    let result = plan_and_apply_external_rename(&files, &names).unwrap();
    assert!(result.is_success());
    assert_eq!(result.renamed.len(), 1);
    assert_eq!(listing(dir.path()), vec!["changed.txt", "same.txt"]);
}

#[test]
fn partial_failure_is_distinguishable() {
    let dir = TempDir::new().unwrap();
    let files = create(dir.path(), &["ok.txt", "vanished.txt"]);
    fs::remove_file(dir.path().join("vanished.txt")).unwrap();

    let rule = PatternRule {
        prefix: "x_".to_string(),
        ..Default::default()
    };
    let result = plan_and_apply_pattern_rename(&files, &rule).unwrap();

    assert!(!result.is_success());
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("vanished.txt"));
    assert_eq!(listing(dir.path()), vec!["x_ok.txt"]);
    assert!(matches!(
        result.into_result(),
        Err(FileRenamingError::PartialFailure { failed: 1, total: 2 })
    ));
}

#[test]
fn exhausted_collision_is_reported_and_batch_continues() {
    let dir = TempDir::new().unwrap();
    let files = create(dir.path(), &["a.dat", "b.dat"]);
    fs::write(dir.path().join("x.dat"), b"taken").unwrap();
    for n in 1..1000 {
        fs::write(dir.path().join(format!("x_{}.dat", n)), b"taken").unwrap();
    }

    let names = vec!["x".to_string(), "y".to_string()];
    let result = plan_and_apply_external_rename(&files, &names).unwrap();

    assert!(!result.is_success());
    assert_eq!(result.errors, vec!["Cannot rename a.dat: target already exists"]);
    assert_eq!(result.renamed.len(), 1);
    assert!(dir.path().join("a.dat").exists());
    assert!(dir.path().join("y.dat").exists());
    assert!(!dir.path().join("b.dat").exists());
    assert_eq!(fs::read(dir.path().join("x.dat")).unwrap(), b"taken");
}

struct FixedNames(Vec<&'static str>);

#[async_trait]
impl NameGenerator for FixedNames {
    async fn generate_names(&self, _files: &[FileEntry], _instruction: &str) -> Result<Vec<String>> {
        Ok(self.0.iter().map(|s| s.to_string()).collect())
    }
}

struct Unreachable;

#[async_trait]
impl NameGenerator for Unreachable {
    async fn generate_names(&self, _files: &[FileEntry], _instruction: &str) -> Result<Vec<String>> {
        Err(FileRenamingError::Generator("connection refused".to_string()))
    }
}

#[tokio::test]
async fn generated_names_are_applied() {
    let dir = TempDir::new().unwrap();
    let files = create(dir.path(), &["IMG_1.jpg", "IMG_2.jpg"]);

    let generator = FixedNames(vec!["beach", "beach"]);
    let result = plan_and_apply_generated_rename(&generator, &files, "describe")
        .await
        .unwrap();

    assert!(result.is_success());
    assert_eq!(listing(dir.path()), vec!["beach.jpg", "beach_1.jpg"]);
}

#[test]
fn generator_failure_aborts_before_any_rename() {
    let dir = TempDir::new().unwrap();
    let files = create(dir.path(), &["a.txt"]);

    let err = tokio_test::block_on(plan_and_apply_generated_rename(&Unreachable, &files, "x"))
        .unwrap_err();
    assert!(matches!(err, FileRenamingError::Generator(_)));
    assert_eq!(listing(dir.path()), vec!["a.txt"]);
}

#[test]
fn generator_count_mismatch_aborts() {
    let dir = TempDir::new().unwrap();
    let files = create(dir.path(), &["a.txt", "b.txt"]);

    let generator = FixedNames(vec!["only"]);
    let err = tokio_test::block_on(plan_and_apply_generated_rename(&generator, &files, "x"))
        .unwrap_err();
    assert!(matches!(err, FileRenamingError::CountMismatch { .. }));
    assert_eq!(listing(dir.path()), vec!["a.txt", "b.txt"]);
}
