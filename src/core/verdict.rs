// src/core/verdict.rs — Marker scanning over raw model output
//
// The model answers in free text. These rules turn that text into the
// pipeline's branch decisions, and default to the rejecting branch whenever
// the markers are missing or contradictory.

use super::types::ChosenAnswer;

pub const YES_MARKER: &str = "FINAL_DECISION: YES";
pub const NO_MARKER: &str = "FINAL_DECISION: NO";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    NeedsEdit,
}

/// Proceed only when the YES marker is present and the NO marker is absent.
pub fn gate_decision(response: &str) -> GateDecision {
    let has_yes = response.contains(YES_MARKER);
    let has_no = response.contains(NO_MARKER);
    if has_yes && !has_no {
        GateDecision::Proceed
    } else {
        GateDecision::NeedsEdit
    }
}

/// Strip all whitespace and lowercase, for agreement checks only.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|&c| !is_separator(c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whitespace as the ECMAScript `\s` class matches it. Includes U+FEFF,
/// excludes U+0085.
fn is_separator(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{000B}'
            | '\u{000C}'
            | '\r'
            | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

pub fn answers_agree(first: &str, second: &str) -> bool {
    normalize(first) == normalize(second)
}

/// Any '1' anywhere in the arbiter's reply counts as a vote for the first
/// answer; otherwise the second wins.
pub fn parse_arbitration(response: &str) -> ChosenAnswer {
    if response.contains('1') {
        ChosenAnswer::First
    } else {
        ChosenAnswer::Second
    }
}
