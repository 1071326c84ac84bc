//! Left-pads whole numbers embedded in free text

use regex::Regex;
use std::sync::OnceLock;

fn digit_runs() -> &'static Regex {
    static DIGIT_RUNS: OnceLock<Regex> = OnceLock::new();
    DIGIT_RUNS.get_or_init(|| Regex::new(r"[0-9]+").expect("digit run pattern is valid"))
}

/// Zero-pad every whole-number run in `input` to at least `width` characters.
///
/// A run directly preceded by `.` is a fractional part and is copied verbatim.
/// Other runs are written in canonical form (no leading zeros) and then padded;
/// runs longer than `width` are never truncated. Everything that is not an
/// ASCII digit passes through untouched, including multi-byte UTF-8.
pub fn pad_numbers(input: &str, width: i64) -> String {
    let bytes = input.as_bytes();
    let mut output = String::with_capacity(input.len());
    let mut last = 0;

    for run in digit_runs().find_iter(input) {
        output.push_str(&input[last..run.start()]);
        last = run.end();

        let is_fraction = run.start() > 0 && bytes[run.start() - 1] == b'.';
        if is_fraction {
            output.push_str(run.as_str());
            continue;
        }

        let trimmed = run.as_str().trim_start_matches('0');
        let number = if trimmed.is_empty() { "0" } else { trimmed };
        let width = usize::try_from(width).unwrap_or(0);
        output.push_str(&format!("{:0>width$}", number, width = width));
    }

    output.push_str(&input[last..]);
    output
}
