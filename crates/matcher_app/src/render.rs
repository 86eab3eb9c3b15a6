use std::fmt::Write;

use matcher_core::{AnalysisResult, Importance, ScoreBand, SessionView};

/// Renders the session as a plain-text report.
pub fn render(view: &SessionView) -> String {
    let mut out = String::new();

    let file_label = view.file_name.as_deref().unwrap_or("(no file)");
    let _ = writeln!(
        out,
        "Session: {} | Resume: {} | Job description: {} chars",
        view.phase, file_label, view.job_description_chars
    );
    if let Some(message) = &view.error_message {
        let _ = writeln!(out, "Error: {message}");
    }

    match &view.result {
        Some(result) => render_result(&mut out, view, result),
        None if view.is_busy => out.push_str("Analyzing your resume...\n"),
        None => out.push_str("No results yet\n"),
    }
    out
}

fn render_result(out: &mut String, view: &SessionView, result: &AnalysisResult) {
    let _ = writeln!(
        out,
        "\nATS score: {:.1}% ({})",
        result.ats_score,
        band_label(result.score_band())
    );
    let _ = writeln!(out, "{}", result.overall_feedback);

    if let Some(summary) = &result.match_summary {
        out.push_str("\nMatch summary\n");
        for (label, value) in [
            ("Experience", &summary.experience_match),
            ("Skills", &summary.skills_match),
            ("Education", &summary.education_match),
        ] {
            if let Some(value) = value {
                let _ = writeln!(out, "  {label}: {value}");
            }
        }
        render_list(out, "Key strengths", &summary.key_strengths);
        render_list(out, "Critical gaps", &summary.critical_gaps);
    }

    if !result.matched_skills.is_empty() {
        let _ = writeln!(
            out,
            "\nMatched skills ({}): {}",
            result.matched_skills.len(),
            result.matched_skills.join(", ")
        );
    }

    if !result.missing_skills.is_empty() {
        let _ = writeln!(out, "\nMissing skills ({})", result.missing_skills.len());
        for item in &result.missing_skills {
            let _ = writeln!(
                out,
                "  {} {} [{}]",
                importance_marker(&item.importance),
                item.skill,
                item.category
            );
        }
    }

    if !result.keyword_suggestions.is_empty() {
        let _ = writeln!(
            out,
            "\nKeyword suggestions ({})",
            result.keyword_suggestions.len()
        );
        for item in &result.keyword_suggestions {
            let _ = writeln!(out, "  {} ({}): {}", item.keyword, item.context, item.reason);
        }
    }

    if !result.resume_improvements.is_empty() {
        out.push_str("\nResume improvements\n");
        for section in &result.resume_improvements {
            let _ = writeln!(out, "  [{}]", section.section);
            if let Some(current) = section.current_content() {
                let _ = writeln!(out, "    Current: {current}");
            }
            let _ = writeln!(out, "    Suggested: {}", section.suggested_content);
            for improvement in &section.improvements {
                let _ = writeln!(out, "    - {improvement}");
            }
        }
    }

    if let Some(enhanced) = &result.enhanced_resume {
        out.push_str("\nAI-enhanced resume\n");
        if let Some(score) = result.enhanced_ats_score {
            let gain = view.score_gain.unwrap_or_default();
            let _ = writeln!(out, "  Enhanced ATS score: {score:.1}% ({gain:+.1}%)");
        }
        if let Some(factors) = &result.key_factors {
            let _ = writeln!(out, "  Key factors: {factors}");
        }
        let _ = writeln!(out, "{enhanced}");
    }

    if let Some(comparison) = &result.skill_comparison {
        let _ = writeln!(out, "\nSkill comparison\n{comparison}");
    }

    if !view.keyword_groups.is_empty() {
        out.push_str("\nATS keywords included\n");
        for group in &view.keyword_groups {
            let total = group.shown.len() + group.hidden_count;
            let _ = write!(out, "  {} ({}): {}", group.label, total, group.shown.join(", "));
            if group.hidden_count > 0 {
                let _ = write!(out, " +{} more", group.hidden_count);
            }
            out.push('\n');
        }
    }
}

fn render_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "  {title}:");
    for item in items {
        let _ = writeln!(out, "    - {item}");
    }
}

fn band_label(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::Strong => "strong match",
        ScoreBand::Fair => "fair match",
        ScoreBand::Weak => "weak match",
    }
}

fn importance_marker(importance: &Importance) -> String {
    match importance {
        Importance::Critical => "!!".to_string(),
        Importance::Important => "! ".to_string(),
        Importance::Other(label) => format!("({label})"),
    }
}
