use std::collections::BTreeMap;

use matcher_core::{
    normalize, AnalysisError, AnalysisResult, Importance, KeywordSuggestion, MatchSummary,
    MissingSkill, ResumeImprovement,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn full_payload() -> Value {
    json!({
        "ats_score": 64.5,
        "overall_feedback": "Solid backend profile, light on cloud.",
        "match_summary": {
            "experience_match": "80%",
            "skills_match": "Medium",
            "education_match": "Meets requirements",
            "key_strengths": ["Rust", "Distributed systems"],
            "critical_gaps": ["Kubernetes"]
        },
        "matched_skills": ["Rust", "PostgreSQL", "gRPC"],
        "missing_skills": [
            {"skill": "Kubernetes", "category": "Technical", "importance": "Critical"},
            {"skill": "Terraform", "category": "Technical", "importance": "Important"},
            {"skill": "Mentoring", "category": "Soft Skill", "importance": "Nice to have"}
        ],
        "keyword_suggestions": [
            {"keyword": "observability", "context": "Experience", "reason": "Listed twice in the posting"}
        ],
        "resume_improvements": [
            {
                "section": "Summary",
                "current_content": "Missing",
                "suggested_content": "Backend engineer with 6 years of Rust.",
                "improvements": ["Add a summary", "Lead with Rust"]
            }
        ],
        "enhanced_resume": "JANE DOE\nBackend engineer",
        "enhanced_ats_score": 58.0,
        "key_factors": "Cloud-native tooling",
        "skill_comparison": "Add Kubernetes exposure.",
        "ats_keywords": {
            "hard_skills": ["Rust", "Kubernetes"],
            "soft_skills": []
        }
    })
}

#[test]
fn all_fields_survive_normalization() {
    let result = normalize(&full_payload()).expect("valid payload");

    let expected = AnalysisResult {
        ats_score: 64.5,
        overall_feedback: "Solid backend profile, light on cloud.".to_string(),
        match_summary: Some(MatchSummary {
            experience_match: Some("80%".to_string()),
            skills_match: Some("Medium".to_string()),
            education_match: Some("Meets requirements".to_string()),
            key_strengths: vec!["Rust".to_string(), "Distributed systems".to_string()],
            critical_gaps: vec!["Kubernetes".to_string()],
        }),
        matched_skills: vec![
            "Rust".to_string(),
            "PostgreSQL".to_string(),
            "gRPC".to_string(),
        ],
        missing_skills: vec![
            MissingSkill {
                skill: "Kubernetes".to_string(),
                importance: Importance::Critical,
                category: "Technical".to_string(),
            },
            MissingSkill {
                skill: "Terraform".to_string(),
                importance: Importance::Important,
                category: "Technical".to_string(),
            },
            MissingSkill {
                skill: "Mentoring".to_string(),
                importance: Importance::Other("Nice to have".to_string()),
                category: "Soft Skill".to_string(),
            },
        ],
        keyword_suggestions: vec![KeywordSuggestion {
            keyword: "observability".to_string(),
            context: "Experience".to_string(),
            reason: "Listed twice in the posting".to_string(),
        }],
        resume_improvements: vec![ResumeImprovement {
            section: "Summary".to_string(),
            current_content: "Missing".to_string(),
            suggested_content: "Backend engineer with 6 years of Rust.".to_string(),
            improvements: vec!["Add a summary".to_string(), "Lead with Rust".to_string()],
        }],
        enhanced_resume: Some("JANE DOE\nBackend engineer".to_string()),
        enhanced_ats_score: Some(58.0),
        key_factors: Some("Cloud-native tooling".to_string()),
        skill_comparison: Some("Add Kubernetes exposure.".to_string()),
        ats_keywords: Some(BTreeMap::from([
            (
                "hard_skills".to_string(),
                vec!["Rust".to_string(), "Kubernetes".to_string()],
            ),
            ("soft_skills".to_string(), Vec::new()),
        ])),
    };
    assert_eq!(result, expected);
}

#[test]
fn normalize_is_idempotent() {
    let minimal = json!({"ats_score": 10, "overall_feedback": "x", "key_factors": null});
    for raw in [full_payload(), minimal] {
        let once = normalize(&raw).expect("valid payload");
        let reencoded = serde_json::to_value(&once).expect("serializable");
        let twice = normalize(&reencoded).expect("still valid");
        assert_eq!(once, twice);
    }
}

#[test]
fn missing_ats_score_is_malformed() {
    let mut raw = full_payload();
    raw.as_object_mut().unwrap().remove("ats_score");

    assert!(matches!(
        normalize(&raw),
        Err(AnalysisError::MalformedResult(_))
    ));
}

#[test]
fn missing_feedback_is_malformed() {
    let mut raw = full_payload();
    raw.as_object_mut().unwrap().remove("overall_feedback");

    assert!(matches!(
        normalize(&raw),
        Err(AnalysisError::MalformedResult(_))
    ));
}

#[test]
fn required_fields_must_have_primitive_types() {
    for raw in [
        json!({"ats_score": "72", "overall_feedback": "ok"}),
        json!({"ats_score": 72, "overall_feedback": 5}),
        json!({"ats_score": null, "overall_feedback": "ok"}),
        json!(["not", "an", "object"]),
    ] {
        assert!(
            matches!(normalize(&raw), Err(AnalysisError::MalformedResult(_))),
            "{raw} should be rejected"
        );
    }
}

#[test]
fn scores_are_not_clamped() {
    let result = normalize(&json!({
        "ats_score": 140.0,
        "overall_feedback": "odd",
        "enhanced_resume": "text",
        "enhanced_ats_score": -5
    }))
    .unwrap();

    assert_eq!(result.ats_score, 140.0);
    assert_eq!(result.enhanced_ats_score, Some(-5.0));
    assert_eq!(result.score_gain(), Some(-145.0));
}

#[test]
fn lower_enhanced_score_is_reported_as_negative_gain() {
    let result = normalize(&full_payload()).unwrap();
    assert_eq!(result.score_gain(), Some(58.0 - 64.5));
}

#[test]
fn empty_keyword_categories_are_filtered() {
    let result = normalize(&full_payload()).unwrap();
    let categories: Vec<_> = result.keyword_categories().map(|(name, _)| name).collect();
    assert_eq!(categories, vec!["hard_skills"]);
}

#[test]
fn empty_match_summary_is_present_not_absent() {
    let result = normalize(&json!({
        "ats_score": 50,
        "overall_feedback": "ok",
        "match_summary": {}
    }))
    .unwrap();
    assert_eq!(result.match_summary, Some(MatchSummary::default()));
}

#[test]
fn broken_list_entry_does_not_drop_its_siblings() {
    let result = normalize(&json!({
        "ats_score": 50,
        "overall_feedback": "ok",
        "matched_skills": ["Rust", 7, "SQL"],
        "missing_skills": [
            {"skill": "Kubernetes", "category": "Technical", "importance": "Critical"},
            {"skill": "Terraform", "category": "Technical"}
        ]
    }))
    .unwrap();

    assert_eq!(result.matched_skills, vec!["Rust", "SQL"]);
    assert_eq!(
        result.missing_skills,
        vec![MissingSkill {
            skill: "Kubernetes".into(),
            category: "Technical".into(),
            importance: Importance::Critical,
        }]
    );
}
