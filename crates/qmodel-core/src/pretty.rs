//! Shared helpers for the human-readable model summaries.

use std::fmt::Write as _;

/// Terms rendered before the expression is truncated.
pub(crate) const PREVIEW_TERMS: usize = 30;

/// Render `offset + Σ bias · Π labels`, showing at most `limit` terms.
///
/// Zero biases are skipped; an expression with nothing left renders as `0`.
pub(crate) fn format_terms<I>(terms: I, offset: f64, limit: usize) -> String
where
    I: IntoIterator<Item = (Vec<String>, f64)>,
{
    let terms: Vec<(Vec<String>, f64)> = terms
        .into_iter()
        .filter(|(_, bias)| *bias != 0.0)
        .chain((offset != 0.0).then(|| (Vec::new(), offset)))
        .collect();
    if terms.is_empty() {
        return "0".to_string();
    }

    let shown = limit.min(terms.len());
    let mut rendered = String::new();
    for (idx, (factors, bias)) in terms.iter().take(shown).enumerate() {
        let magnitude = bias.abs();
        let body = if factors.is_empty() {
            format_number(magnitude)
        } else if magnitude == 1.0 {
            factors.join("*")
        } else {
            format!("{} {}", format_number(magnitude), factors.join("*"))
        };
        match (idx, *bias < 0.0) {
            (0, true) => {
                let _ = write!(rendered, "-{body}");
            }
            (0, false) => rendered.push_str(&body),
            (_, true) => {
                let _ = write!(rendered, " - {body}");
            }
            (_, false) => {
                let _ = write!(rendered, " + {body}");
            }
        }
    }
    if shown < terms.len() {
        let _ = write!(rendered, " + ... ({} more terms)", terms.len() - shown);
    }
    rendered
}

/// Shortest fixed-point rendering with at most 12 decimals.
pub(crate) fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() { "-inf" } else { "inf" }.to_string();
    }
    let mut rendered = format!("{value:.12}");
    while rendered.ends_with('0') {
        rendered.pop();
    }
    if rendered.ends_with('.') {
        rendered.pop();
    }
    if rendered == "-0" {
        "0".to_string()
    } else {
        rendered
    }
}
