use crate::diff::{format_path, Verdict};

/// Format a comparison verdict as plain text.
pub fn format_text(verdict: &Verdict) -> String {
    match verdict {
        Verdict::Equal => "= trees are equal".to_string(),
        Verdict::Unequal(mismatch) => {
            format!("! {}: {}", format_path(&mismatch.path), mismatch.kind)
        }
    }
}

/// Format a one-line summary of a verdict.
pub fn format_summary(verdict: &Verdict) -> String {
    match verdict {
        Verdict::Equal => "verdict=equal".to_string(),
        Verdict::Unequal(mismatch) => format!(
            "verdict=unequal path={} depth={}",
            format_path(&mismatch.path),
            mismatch.path.len()
        ),
    }
}
