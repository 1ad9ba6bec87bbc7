use crate::diff::Verdict;

/// Format a comparison verdict as JSON.
pub fn format_json(verdict: &Verdict) -> String {
    serde_json::to_string_pretty(verdict).unwrap_or_else(|_| "{}".to_string())
}
