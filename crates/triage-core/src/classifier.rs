//! Rule-based keyword triage.
//!
//! This is the deterministic fallback behind the model classifier, so it is
//! a total function over arbitrary text: no I/O, no failure path, every
//! output field a member of its enum.
//!
//! # Matching rules
//!
//! - Category: the four keyword tables are checked in fixed order — BILLING,
//!   LOGIN, TECH, FEATURE — and the first table with any substring hit wins.
//!   A ticket matching both a billing and a tech phrase is always BILLING.
//! - Sentiment: anger phrases set ANGRY, then praise phrases override to
//!   POSITIVE. Last-match-wins between the two checks.
//! - Priority: urgency phrases upgrade MEDIUM to HIGH; critical-severity
//!   phrases (security breach, fraud, double charge) upgrade to CRITICAL
//!   unconditionally, so CRITICAL always beats HIGH.
//!
//! Matching is plain substring containment on the lowercased text, so a
//! phrase also hits inside a longer word ("fee" in "coffee"). The tables
//! are tuned for recall over precision; the model path exists for the rest.

use crate::enrichment::{
    Category, EnrichmentResult, Priority, RULE_SUMMARY_MAX, Sentiment, truncate_chars,
};

/// Confidence reported by the rule-based path. Deliberately low so that
/// downstream consumers can tell heuristic results from model results.
pub const RULE_CONFIDENCE: f64 = 0.55;

const BILLING_KEYWORDS: &[&str] = &[
    "charge", "charged", "overcharged", "double charged", "billing",
    "refund", "refunded", "invoice", "payment", "paid",
    "card", "credit card", "debit card",
    "transaction", "amount deducted", "money deducted",
    "subscription", "plan", "pricing",
    "renewal", "renewed",
    "failed payment", "payment failed",
    "receipt", "tax", "fee",
];

const LOGIN_KEYWORDS: &[&str] = &[
    "login", "log in", "signin", "sign in", "sign-in",
    "password", "forgot password", "reset password",
    "otp", "one time password",
    "2fa", "two factor", "verification code",
    "authentication", "auth",
    "account locked", "locked out",
    "cannot login", "unable to login",
    "access denied", "session expired",
];

const TECH_KEYWORDS: &[&str] = &[
    "bug", "issue", "error", "exception",
    "500", "502", "503", "504",
    "crash", "crashes", "crashed",
    "not working", "doesn't work", "does not work",
    "broken", "failure", "failed",
    "timeout", "timed out",
    "loading", "stuck", "hang", "freeze", "freezing",
    "slow", "lag", "latency",
    "page not loading", "blank page",
    "server down", "service unavailable",
    "api error", "backend error", "frontend issue",
];

const FEATURE_KEYWORDS: &[&str] = &[
    "feature", "feature request",
    "request", "enhancement",
    "add", "support for",
    "can you add", "would be nice",
    "it would be helpful",
    "improvement", "improve",
    "new feature",
    "enable", "option",
    "export", "download",
    "dark mode", "theme",
    "integration", "api support",
];

const ANGER_KEYWORDS: &[&str] = &["angry", "worst", "terrible", "hate"];

const PRAISE_KEYWORDS: &[&str] = &["thanks", "thank you", "love", "great"];

const URGENCY_KEYWORDS: &[&str] = &["asap", "urgent", "immediately", "critical", "down"];

const CRITICAL_KEYWORDS: &[&str] = &["security", "breach", "charged twice", "fraud"];

const ACK_REPLY: &str = "Thanks for reaching out. I’m looking into this now and will update you \
     shortly. Could you share any screenshots or exact error messages if available?";

/// Lowercase `title + " " + description` into a single match surface.
///
/// No truncation and no unicode normalisation beyond case folding.
pub fn normalize(title: &str, description: &str) -> String {
    format!("{title} {description}").to_lowercase()
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Classify a ticket by keyword rules alone.
pub fn classify(title: &str, description: &str) -> EnrichmentResult {
    let text = normalize(title, description);

    let category = if contains_any(&text, BILLING_KEYWORDS) {
        Category::Billing
    } else if contains_any(&text, LOGIN_KEYWORDS) {
        Category::Login
    } else if contains_any(&text, TECH_KEYWORDS) {
        Category::Tech
    } else if contains_any(&text, FEATURE_KEYWORDS) {
        Category::Feature
    } else {
        Category::Other
    };

    let mut sentiment = Sentiment::Neutral;
    if contains_any(&text, ANGER_KEYWORDS) {
        sentiment = Sentiment::Angry;
    }
    if contains_any(&text, PRAISE_KEYWORDS) {
        sentiment = Sentiment::Positive;
    }

    let mut priority = Priority::Medium;
    if contains_any(&text, URGENCY_KEYWORDS) {
        priority = Priority::High;
    }
    if contains_any(&text, CRITICAL_KEYWORDS) {
        priority = Priority::Critical;
    }

    EnrichmentResult {
        category,
        priority,
        sentiment,
        summary: truncate_chars(&format!("User reports: {title}."), RULE_SUMMARY_MAX),
        suggested_reply: ACK_REPLY.to_string(),
        confidence: RULE_CONFIDENCE,
    }
}
