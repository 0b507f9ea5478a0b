use crate::grading::{FilterChain, FilterOp, FilterOpKind};

/// CSS `filter` value for a chain, e.g. `brightness(110%) sepia(0.3)`.
/// An empty chain renders as `none`.
pub fn to_css(chain: &FilterChain) -> String {
    if chain.is_empty() {
        return "none".to_string();
    }
    chain
        .iter()
        .map(css_function)
        .collect::<Vec<_>>()
        .join(" ")
}

fn css_function(op: &FilterOp) -> String {
    match op.kind {
        FilterOpKind::Brightness | FilterOpKind::Contrast | FilterOpKind::Saturate => {
            format!("{}({}%)", op.kind, format_number(op.amount * 100.0))
        }
        FilterOpKind::Sepia | FilterOpKind::Grayscale => {
            format!("{}({})", op.kind, format_number(op.amount))
        }
    }
}

/// At most two decimals, trailing zeros trimmed.
fn format_number(v: f32) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
