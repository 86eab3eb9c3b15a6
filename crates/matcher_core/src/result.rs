//! Canonical shape of the analysis service response.
//!
//! The service speaks snake_case JSON. Only `ats_score` and `overall_feedback`
//! are required; everything else is optional and stays `None` (or empty, for
//! sequences) when the payload omits it. Values are never clamped or invented.

use std::collections::BTreeMap;
use std::fmt;

use matcher_logging::matcher_warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::AnalysisError;

/// `current_content` value the service uses when a resume section does not exist.
pub const MISSING_SECTION_SENTINEL: &str = "Missing";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ats_score: f64,
    pub overall_feedback: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_summary: Option<MatchSummary>,
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<MissingSkill>,
    #[serde(default)]
    pub keyword_suggestions: Vec<KeywordSuggestion>,
    #[serde(default)]
    pub resume_improvements: Vec<ResumeImprovement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhanced_resume: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhanced_ats_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_factors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_comparison: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ats_keywords: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchSummary {
    #[serde(
        default,
        deserialize_with = "text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub experience_match: Option<String>,
    #[serde(
        default,
        deserialize_with = "text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub skills_match: Option<String>,
    #[serde(
        default,
        deserialize_with = "text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub education_match: Option<String>,
    #[serde(default)]
    pub key_strengths: Vec<String>,
    #[serde(default)]
    pub critical_gaps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingSkill {
    pub skill: String,
    pub importance: Importance,
    #[serde(default)]
    pub category: String,
}

/// How much a missing skill matters. Labels the service invents beyond the
/// first two land in `Other` with their original text preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Importance {
    Critical,
    Important,
    Other(String),
}

impl Importance {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "critical" => Importance::Critical,
            "important" => Importance::Important,
            _ => Importance::Other(label.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Importance::Critical => "Critical",
            Importance::Important => "Important",
            Importance::Other(label) => label,
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Importance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Importance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Importance::from_label(&label))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSuggestion {
    pub keyword: String,
    pub context: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeImprovement {
    pub section: String,
    #[serde(default = "missing_sentinel")]
    pub current_content: String,
    pub suggested_content: String,
    #[serde(default)]
    pub improvements: Vec<String>,
}

impl ResumeImprovement {
    /// The existing section text, or `None` when the section is missing.
    pub fn current_content(&self) -> Option<&str> {
        let text = self.current_content.trim();
        if text.is_empty() || text == MISSING_SECTION_SENTINEL {
            None
        } else {
            Some(&self.current_content)
        }
    }
}

fn missing_sentinel() -> String {
    MISSING_SECTION_SENTINEL.to_string()
}

/// Accepts `"75%"` as well as `75` for the summary assessments.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected text or number, got {other}"
        ))),
    }
}

impl AnalysisResult {
    /// Change between the enhanced and original score. Negative values are
    /// reported as-is.
    pub fn score_gain(&self) -> Option<f64> {
        self.enhanced_ats_score.map(|enhanced| enhanced - self.ats_score)
    }

    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::for_score(self.ats_score)
    }

    /// Keyword categories that actually contain keywords, in sorted order.
    pub fn keyword_categories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.ats_keywords
            .iter()
            .flat_map(|categories| categories.iter())
            .filter(|(_, keywords)| !keywords.is_empty())
            .map(|(category, keywords)| (category.as_str(), keywords.as_slice()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Strong,
    Fair,
    Weak,
}

impl ScoreBand {
    pub fn for_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreBand::Strong
        } else if score >= 60.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::Weak
        }
    }
}

/// Maps a raw service payload into an [`AnalysisResult`].
///
/// Fails only when `ats_score` is not a number or `overall_feedback` is not a
/// string. Mis-typed optional fields are dropped with a warning.
pub fn normalize(raw: &Value) -> Result<AnalysisResult, AnalysisError> {
    let Some(object) = raw.as_object() else {
        return Err(AnalysisError::MalformedResult(
            "response body is not a JSON object".to_string(),
        ));
    };

    let ats_score = object
        .get("ats_score")
        .and_then(Value::as_f64)
        .ok_or_else(|| required_field("ats_score", "a number"))?;
    let overall_feedback = object
        .get("overall_feedback")
        .and_then(Value::as_str)
        .ok_or_else(|| required_field("overall_feedback", "a string"))?
        .to_string();

    Ok(AnalysisResult {
        ats_score,
        overall_feedback,
        match_summary: optional(object, "match_summary"),
        matched_skills: optional_list(object, "matched_skills"),
        missing_skills: optional_list(object, "missing_skills"),
        keyword_suggestions: optional_list(object, "keyword_suggestions"),
        resume_improvements: optional_list(object, "resume_improvements"),
        enhanced_resume: optional(object, "enhanced_resume"),
        enhanced_ats_score: optional(object, "enhanced_ats_score"),
        key_factors: optional(object, "key_factors"),
        skill_comparison: optional(object, "skill_comparison"),
        ats_keywords: optional(object, "ats_keywords"),
    })
}

fn required_field(name: &str, expected: &str) -> AnalysisError {
    AnalysisError::MalformedResult(format!("`{name}` is missing or not {expected}"))
}

fn optional<T: DeserializeOwned>(object: &Map<String, Value>, key: &str) -> Option<T> {
    match object.get(key)? {
        Value::Null => None,
        value => match T::deserialize(value) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                matcher_warn!("Ignoring malformed `{}` in analysis result: {}", key, err);
                None
            }
        },
    }
}

/// Keeps the entries that parse; a malformed entry is skipped on its own.
fn optional_list<T: DeserializeOwned>(object: &Map<String, Value>, key: &str) -> Vec<T> {
    let items = match object.get(key) {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => {
            matcher_warn!("Ignoring `{}` in analysis result: not a list", key);
            return Vec::new();
        }
    };
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match T::deserialize(item) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                matcher_warn!(
                    "Skipping malformed `{}[{}]` in analysis result: {}",
                    key,
                    index,
                    err
                );
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn importance_labels_are_case_insensitive() {
        assert_eq!(Importance::from_label("CRITICAL"), Importance::Critical);
        assert_eq!(Importance::from_label(" important "), Importance::Important);
        assert_eq!(
            Importance::from_label("Nice to have"),
            Importance::Other("Nice to have".to_string())
        );
    }

    #[test]
    fn score_bands_follow_thresholds() {
        assert_eq!(ScoreBand::for_score(80.0), ScoreBand::Strong);
        assert_eq!(ScoreBand::for_score(79.9), ScoreBand::Fair);
        assert_eq!(ScoreBand::for_score(60.0), ScoreBand::Fair);
        assert_eq!(ScoreBand::for_score(12.0), ScoreBand::Weak);
        assert_eq!(ScoreBand::for_score(140.0), ScoreBand::Strong);
    }

    #[test]
    fn missing_sentinel_reads_as_absent() {
        let improvement = ResumeImprovement {
            section: "Summary".into(),
            current_content: "Missing".into(),
            suggested_content: "Add a summary".into(),
            improvements: vec![],
        };
        assert_eq!(improvement.current_content(), None);
    }

    #[test]
    fn numeric_summary_assessments_become_text() {
        let result = normalize(&json!({
            "ats_score": 50,
            "overall_feedback": "ok",
            "match_summary": { "experience_match": 75, "skills_match": "High" }
        }))
        .unwrap();
        let summary = result.match_summary.unwrap();
        assert_eq!(summary.experience_match.as_deref(), Some("75"));
        assert_eq!(summary.skills_match.as_deref(), Some("High"));
        assert_eq!(summary.education_match, None);
    }

    #[test]
    fn mistyped_optional_field_is_dropped() {
        let result = normalize(&json!({
            "ats_score": 50,
            "overall_feedback": "ok",
            "enhanced_ats_score": "high",
            "matched_skills": "rust",
        }))
        .unwrap();
        assert_eq!(result.enhanced_ats_score, None);
        assert!(result.matched_skills.is_empty());
    }
}
