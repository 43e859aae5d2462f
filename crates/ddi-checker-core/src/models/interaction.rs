//! Interaction check results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Interaction severity.
///
/// Parsed case-insensitively. Levels outside the known set are kept verbatim
/// in `Other` so they can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    Contraindicated,
    Major,
    Moderate,
    Minor,
    High,
    Medium,
    Low,
    Other(String),
}

impl Severity {
    /// Parse a severity label, ignoring case.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "contraindicated" => Severity::Contraindicated,
            "major" => Severity::Major,
            "moderate" => Severity::Moderate,
            "minor" => Severity::Minor,
            "high" => Severity::High,
            "medium" => Severity::Medium,
            "low" => Severity::Low,
            _ => Severity::Other(raw.to_string()),
        }
    }

    /// Lowercase key used for styling. `None` for unrecognized levels.
    pub fn key(&self) -> Option<&'static str> {
        match self {
            Severity::Contraindicated => Some("contraindicated"),
            Severity::Major => Some("major"),
            Severity::Moderate => Some("moderate"),
            Severity::Minor => Some("minor"),
            Severity::High => Some("high"),
            Severity::Medium => Some("medium"),
            Severity::Low => Some("low"),
            Severity::Other(_) => None,
        }
    }

    /// Style class for an interaction card, e.g. `severity-high`.
    pub fn css_class(&self) -> String {
        format!("severity-{}", self.key().unwrap_or("unknown"))
    }

    /// Label as the service sent it (known levels are capitalized).
    pub fn label(&self) -> &str {
        match self {
            Severity::Contraindicated => "Contraindicated",
            Severity::Major => "Major",
            Severity::Moderate => "Moderate",
            Severity::Minor => "Minor",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Other(raw) => raw,
        }
    }
}

impl From<String> for Severity {
    fn from(raw: String) -> Self {
        Severity::parse(&raw)
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.label().to_string()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One pairwise interaction reported by the check endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteractionResult {
    pub drug1: String,
    pub drug2: String,
    pub severity: Severity,
    /// Localized severity label; may be empty when the service has no translation
    #[serde(default)]
    pub severity_th: String,
    /// Source-language description
    pub description: String,
    /// Localized description
    #[serde(default)]
    pub description_th: String,
}

impl InteractionResult {
    /// Localized severity label, falling back to the raw level.
    pub fn severity_label(&self) -> &str {
        if self.severity_th.trim().is_empty() {
            self.severity.label()
        } else {
            &self.severity_th
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_case_insensitive() {
        assert_eq!(Severity::parse("HIGH"), Severity::High);
        assert_eq!(Severity::parse("high"), Severity::High);
        assert_eq!(Severity::parse("Major"), Severity::Major);
        assert_eq!(Severity::parse(" contraindicated "), Severity::Contraindicated);
    }

    #[test]
    fn test_css_class() {
        assert_eq!(Severity::parse("HIGH").css_class(), "severity-high");
        assert_eq!(Severity::Moderate.css_class(), "severity-moderate");
        assert_eq!(Severity::parse("catastrophic").css_class(), "severity-unknown");
    }

    #[test]
    fn test_unknown_severity_keeps_raw_label() {
        let severity = Severity::parse("Catastrophic");
        assert_eq!(severity.label(), "Catastrophic");
        assert_eq!(severity.key(), None);
    }

    #[test]
    fn test_parse_interaction() {
        let json = r#"{"drug1":"Aspirin","drug2":"Warfarin","severity":"HIGH","severity_th":"สูง","description":"Increased bleeding risk","description_th":"เสี่ยงเลือดออกเพิ่มขึ้น"}"#;
        let result: InteractionResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.severity, Severity::High);
        assert_eq!(result.severity_label(), "สูง");
        assert_eq!(result.description_th, "เสี่ยงเลือดออกเพิ่มขึ้น");
    }

    #[test]
    fn test_missing_translation_falls_back() {
        let json = r#"{"drug1":"a","drug2":"b","severity":"Minor","description":"x"}"#;
        let result: InteractionResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.severity_label(), "Minor");
        assert!(result.description_th.is_empty());
    }
}
