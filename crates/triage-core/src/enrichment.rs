//! The enrichment record attached to a ticket by triage.
//!
//! Field values serialise as the uppercase strings the ticket store uses
//! (`"BILLING"`, `"CRITICAL"`, ...). Enum parsing is deliberately loose:
//! classifier output is trimmed and uppercased before matching, and a
//! non-member falls back to the field's default rather than rejecting the
//! whole record.

use serde::{Deserialize, Serialize};

/// Maximum summary length on the rule-based path.
pub const RULE_SUMMARY_MAX: usize = 200;
/// Maximum summary length on the model path.
pub const MODEL_SUMMARY_MAX: usize = 800;
/// Maximum suggested-reply length.
pub const REPLY_MAX: usize = 2000;

/// Ticket category produced by triage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Billing,
    Login,
    Tech,
    Feature,
    #[default]
    Other,
}

/// Ticket priority produced by triage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// Requester sentiment inferred by triage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Angry,
    #[default]
    Neutral,
    Positive,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Billing => "BILLING",
            Self::Login => "LOGIN",
            Self::Tech => "TECH",
            Self::Feature => "FEATURE",
            Self::Other => "OTHER",
        }
    }

    /// Parse a classifier-supplied value: trim, uppercase, match.
    pub fn parse_loose(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "BILLING" => Some(Self::Billing),
            "LOGIN" => Some(Self::Login),
            "TECH" => Some(Self::Tech),
            "FEATURE" => Some(Self::Feature),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    pub fn parse_loose(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "LOW" => Some(Self::Low),
            "MEDIUM" => Some(Self::Medium),
            "HIGH" => Some(Self::High),
            "CRITICAL" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Angry => "ANGRY",
            Self::Neutral => "NEUTRAL",
            Self::Positive => "POSITIVE",
        }
    }

    pub fn parse_loose(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "ANGRY" => Some(Self::Angry),
            "NEUTRAL" => Some(Self::Neutral),
            "POSITIVE" => Some(Self::Positive),
            _ => None,
        }
    }
}

/// A complete triage result for one ticket.
///
/// Produced once per triage invocation and written to the ticket wholesale;
/// the store never merges two results field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    pub category: Category,
    pub priority: Priority,
    pub sentiment: Sentiment,
    pub summary: String,
    pub suggested_reply: String,
    /// Nominally in [0, 1]. The model path passes the raw value through
    /// without clamping; only the defaults are trusted.
    pub confidence: f64,
}

/// Truncate a string to at most `max` characters (not bytes).
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_serialize_as_uppercase_strings() {
        assert_eq!(serde_json::to_string(&Category::Billing).unwrap(), "\"BILLING\"");
        assert_eq!(serde_json::to_string(&Priority::Critical).unwrap(), "\"CRITICAL\"");
        assert_eq!(serde_json::to_string(&Sentiment::Neutral).unwrap(), "\"NEUTRAL\"");
    }

    #[test]
    fn parse_loose_trims_and_uppercases() {
        assert_eq!(Category::parse_loose("  billing "), Some(Category::Billing));
        assert_eq!(Priority::parse_loose("high"), Some(Priority::High));
        assert_eq!(Sentiment::parse_loose("Positive"), Some(Sentiment::Positive));
    }

    #[test]
    fn parse_loose_rejects_non_members() {
        assert_eq!(Category::parse_loose("SPAM"), None);
        assert_eq!(Priority::parse_loose(""), None);
        assert_eq!(Sentiment::parse_loose("MEH"), None);
    }

    #[test]
    fn result_json_roundtrip() {
        let result = EnrichmentResult {
            category: Category::Login,
            priority: Priority::High,
            sentiment: Sentiment::Angry,
            summary: "User reports: cannot sign in.".into(),
            suggested_reply: "We are looking into it.".into(),
            confidence: 0.82,
        };
        let json = serde_json::to_string(&result).unwrap();
        let parsed: EnrichmentResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn truncate_chars_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("héllo", 3), "hél");
        assert_eq!(truncate_chars("short", 200), "short");
        assert_eq!(truncate_chars("", 10), "");
    }
}
