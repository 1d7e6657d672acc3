// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Rule-based name transformation

use glob::Pattern;

use super::PatternRule;
use crate::Result;

/// Split a file name into stem and extension. The extension starts at the
/// last dot and keeps it, so a dotfile such as `.env` is all extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        None => (name, ""),
        Some(idx) => name.split_at(idx),
    }
}

/// Compile the rule's glob filter. `None` means every file matches.
pub fn compile_filter(rule: &PatternRule) -> Result<Option<Pattern>> {
    let pattern = rule.glob_pattern.trim();
    if pattern.is_empty() || pattern == "*" {
        return Ok(None);
    }
    Ok(Some(Pattern::new(pattern)?))
}

pub fn matches_filter(filter: Option<&Pattern>, name: &str) -> bool {
    filter.map_or(true, |p| p.matches(name))
}

/// Counter value for the `ordinal`-th matched file, if numbering is on
pub fn sequence_number(rule: &PatternRule, ordinal: usize) -> Option<i64> {
    if !rule.numbering_enabled() {
        return None;
    }
    let step = if rule.number_step == 0 { 1 } else { rule.number_step };
    let ordinal = i64::try_from(ordinal).unwrap_or(i64::MAX);
    Some(rule.number_start.saturating_add(step.saturating_mul(ordinal)))
}

/// Candidate stem for a matched file: replace, case, prefix/suffix, number
pub fn transform_stem(stem: &str, rule: &PatternRule, ordinal: usize) -> String {
    let replaced = if rule.replace_from.is_empty() {
        stem.to_string()
    } else {
        stem.replace(&rule.replace_from, &rule.replace_to)
    };

    let mut name = rule.case_mode.apply(&replaced);
    name.insert_str(0, &rule.prefix);
    name.push_str(&rule.suffix);

    if let Some(n) = sequence_number(rule, ordinal) {
        name = format!("{}_{}", name, n);
    }
    name
}

/// Candidate file name: transformed stem plus the untouched extension
pub fn transform(stem: &str, ext: &str, rule: &PatternRule, ordinal: usize) -> String {
    let mut name = transform_stem(stem, rule, ordinal);
    name.push_str(ext);
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rename::CaseMode;

    fn rule() -> PatternRule {
        PatternRule::default()
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("a.txt"), ("a", ".txt"));
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_extension("README"), ("README", ""));
        assert_eq!(split_extension(".env"), ("", ".env"));
        assert_eq!(split_extension(".config.bak"), (".config", ".bak"));
        assert_eq!(split_extension("trailing."), ("trailing", "."));
        assert_eq!(split_extension("报告.png"), ("报告", ".png"));
    }

    #[test]
    fn test_identity_rule() {
        assert_eq!(transform("photo", ".jpg", &rule(), 0), "photo.jpg");
    }

    #[test]
    fn test_replace_all_occurrences() {
        let r = PatternRule {
            replace_from: "a".to_string(),
            replace_to: "o".to_string(),
            ..rule()
        };
        assert_eq!(transform("banana", ".txt", &r, 0), "bonono.txt");

        let r = PatternRule {
            replace_from: "draft_".to_string(),
            ..rule()
        };
        assert_eq!(transform("draft_report", ".md", &r, 0), "report.md");
    }

    #[test]
    fn test_replace_happens_before_case() {
        let r = PatternRule {
            replace_from: "IMG".to_string(),
            replace_to: "Pic".to_string(),
            case_mode: CaseMode::Lower,
            ..rule()
        };
        assert_eq!(transform("IMG_001", ".JPG", &r, 0), "pic_001.JPG");
    }

    #[test]
    fn test_case_leaves_extension_alone() {
        let r = PatternRule {
            case_mode: CaseMode::Upper,
            ..rule()
        };
        assert_eq!(transform("x", ".jpg", &r, 0), "X.jpg");
    }

    #[test]
    fn test_prefix_and_suffix_after_case() {
        let r = PatternRule {
            prefix: "New_".to_string(),
            suffix: "_Final".to_string(),
            case_mode: CaseMode::Lower,
            ..rule()
        };
        assert_eq!(transform("REPORT", ".pdf", &r, 0), "New_report_Final.pdf");
    }

    #[test]
    fn test_numbering_applied_last() {
        let r = PatternRule {
            prefix: "p_".to_string(),
            number_start: 10,
            number_step: 5,
            ..rule()
        };
        assert_eq!(transform("a", ".txt", &r, 0), "p_a_10.txt");
        assert_eq!(transform("b", ".txt", &r, 1), "p_b_15.txt");
        assert_eq!(transform("c", ".txt", &r, 2), "p_c_20.txt");
    }

    #[test]
    fn test_step_zero_still_increments() {
        let r = PatternRule {
            number_start: 3,
            number_step: 0,
            ..rule()
        };
        let numbers: Vec<_> = (0..4).map(|i| sequence_number(&r, i).unwrap()).collect();
        assert_eq!(numbers, vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_numbering_off_when_start_and_step_zero() {
        assert_eq!(sequence_number(&rule(), 7), None);
    }

    #[test]
    fn test_step_only_starts_at_zero() {
        let r = PatternRule {
            number_step: 2,
            ..rule()
        };
        assert_eq!(sequence_number(&r, 0), Some(0));
        assert_eq!(sequence_number(&r, 1), Some(2));
    }

    #[test]
    fn test_negative_step() {
        let r = PatternRule {
            number_start: 10,
            number_step: -3,
            ..rule()
        };
        assert_eq!(sequence_number(&r, 2), Some(4));
    }

    #[test]
    fn test_filter() {
        let r = PatternRule {
            glob_pattern: "*.txt".to_string(),
            ..rule()
        };
        let filter = compile_filter(&r).unwrap();
        assert!(matches_filter(filter.as_ref(), "a.txt"));
        assert!(!matches_filter(filter.as_ref(), "b.jpg"));
    }

    #[test]
    fn test_wildcard_and_empty_filters_match_everything() {
        for pattern in ["", "*", "  "] {
            let r = PatternRule {
                glob_pattern: pattern.to_string(),
                ..rule()
            };
            assert!(compile_filter(&r).unwrap().is_none());
        }
    }

    #[test]
    fn test_invalid_filter() {
        let r = PatternRule {
            glob_pattern: "[".to_string(),
            ..rule()
        };
        assert!(compile_filter(&r).is_err());
    }
}
