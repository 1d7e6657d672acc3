// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use file_renaming::rename::transform::{compile_filter, matches_filter, transform};
use file_renaming::rename::split_extension;
use file_renaming::{CaseMode, PatternRule};

#[derive(Arbitrary, Debug)]
struct Input {
    name: String,
    pattern: String,
    replace_from: String,
    replace_to: String,
    prefix: String,
    suffix: String,
    case: u8,
    number_start: i64,
    number_step: i64,
    ordinal: u16,
}

fuzz_target!(|input: Input| {
    let rule = PatternRule {
        glob_pattern: input.pattern,
        replace_from: input.replace_from,
        replace_to: input.replace_to,
        prefix: input.prefix,
        suffix: input.suffix,
        case_mode: match input.case % 4 {
            0 => CaseMode::None,
            1 => CaseMode::Lower,
            2 => CaseMode::Upper,
            _ => CaseMode::Title,
        },
        number_start: input.number_start,
        number_step: input.number_step,
    };

    if let Ok(filter) = compile_filter(&rule) {
        let _ = matches_filter(filter.as_ref(), &input.name);
    }

    let (stem, ext) = split_extension(&input.name);
    let renamed = transform(stem, ext, &rule, usize::from(input.ordinal));
    assert!(renamed.ends_with(ext));
});
