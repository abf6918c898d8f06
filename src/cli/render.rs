// src/cli/render.rs — Terminal rendering of pipeline results
//
// Answers follow the Given / Solution / Step N / Final Answer layout the
// answer prompt asks for. Math stays as raw `$$...$$` source.

use crate::core::{ChosenAnswer, PipelineResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// `None` for text before the first heading and for the bare
    /// `Solution:` heading, whose steps carry their own headings.
    pub heading: Option<String>,
    pub body: String,
}

/// Split on known headings at line start (case-insensitive, markdown bold
/// and `#` prefixes tolerated).
pub fn sections(text: &str) -> Vec<Section> {
    let mut out: Vec<Section> = Vec::new();
    let mut heading: Option<String> = None;
    let mut body: Vec<&str> = Vec::new();
    let mut started = false;

    for line in text.lines() {
        if let Some((h, rest)) = split_heading(line) {
            if started || !body.is_empty() {
                push_section(&mut out, heading.take(), &body);
            }
            body.clear();
            started = true;
            heading = if h.eq_ignore_ascii_case("solution:") {
                None
            } else {
                Some(h)
            };
            if !rest.is_empty() {
                body.push(rest);
            }
        } else {
            body.push(line);
        }
    }
    if started || !body.is_empty() {
        push_section(&mut out, heading, &body);
    }
    out
}

fn push_section(out: &mut Vec<Section>, heading: Option<String>, body: &[&str]) {
    let body = body.join("\n").trim().to_string();
    if heading.is_none() && body.is_empty() {
        return;
    }
    out.push(Section { heading, body });
}

fn split_heading(line: &str) -> Option<(String, &str)> {
    let stripped = line.trim_start_matches(|c: char| c == '*' || c == '#' || c.is_whitespace());
    let lower = stripped.to_ascii_lowercase();

    let len = if lower.starts_with("given:") {
        "given:".len()
    } else if lower.starts_with("solution:") {
        "solution:".len()
    } else if lower.starts_with("final answer:") {
        "final answer:".len()
    } else if let Some(after) = lower.strip_prefix("step ") {
        let digits = after.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits == 0 || !after[digits..].starts_with(':') {
            return None;
        }
        "step ".len() + digits + 1
    } else {
        return None;
    };

    let heading = stripped[..len].to_string();
    let rest = stripped[len..].trim_start_matches('*').trim();
    Some((heading, rest))
}

/// Human-readable rendering for `synapse ask`.
pub fn render_result(result: &PipelineResult) -> String {
    let mut out = String::new();
    match result {
        PipelineResult::NeedsEdit { feedback } => {
            out.push_str("Question needs editing:\n\n");
            out.push_str(feedback.trim());
            out.push('\n');
        }
        PipelineResult::Answered {
            final_answer,
            answers,
            arbitration,
        } => {
            match arbitration {
                None => out.push_str(&format!(
                    "Answer ({} and {} agree):\n\n",
                    answers[0].model_label, answers[1].model_label
                )),
                Some(arb) => {
                    let winner = arb.chosen.select(answers);
                    let loser = match arb.chosen {
                        ChosenAnswer::First => &answers[1],
                        ChosenAnswer::Second => &answers[0],
                    };
                    out.push_str(&format!(
                        "Answer ({} chosen over {} by arbitration):\n\n",
                        winner.model_label, loser.model_label
                    ));
                }
            }
            out.push_str(&render_sections(final_answer));
        }
    }
    out
}

pub fn render_sections(text: &str) -> String {
    let mut out = String::new();
    for section in sections(text) {
        if let Some(ref h) = section.heading {
            out.push_str(h);
            out.push('\n');
        }
        for line in section.body.lines() {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}
