// src/normalize.rs
//! Tolerant normalization of raw service payloads.
//!
//! The backend has returned the same logical field as an absent value, a
//! newline-delimited string and a structured array across its revisions.
//! Every field here goes through the same fallback chain: structured
//! extraction first, then newline-splitting, then an empty collection.
//! These are pure functions over JSON values; no I/O happens here.

use serde_json::Value;
use uuid::Uuid;

use crate::core::service_client::RawResponse;
use crate::types::{
    AtsScore, CoverLetter, FeedbackPoint, JobRecommendation, Mode, Normalized, ReasoningSection,
    ResumeFeedback, Severity, UNKNOWN_FIELD,
};

/// Reply used when the backend answered a chat request without any
/// recognizable reply field.
pub const MISSING_CHAT_REPLY: &str = "I'm sorry, I couldn't process your request.";

const GENERIC_BACKEND_ERROR: &str = "Analysis failed";

/// Normalize a raw response against the shape `kind` is expected to carry.
///
/// An explicit error indicator short-circuits to [`Normalized::Error`];
/// everything else produces a structurally valid result, with empty
/// collections standing in for whatever the backend omitted.
pub fn normalize(raw: &RawResponse, kind: Mode) -> Normalized {
    let value = raw.json();
    if let Some(message) = backend_error(value) {
        return Normalized::Error(message);
    }

    let root = envelope(value);
    match kind {
        // Combined upload responses carry the analysis payload directly.
        Mode::Upload | Mode::AtsScore => Normalized::Ats(ats_score(root)),
        Mode::ResumeFeedback => Normalized::Feedback(resume_feedback(root)),
        Mode::JobRecommendation => Normalized::Jobs(job_listings(root)),
        Mode::CoverLetter => Normalized::CoverLetter(cover_letter(root)),
        Mode::Chatbot => Normalized::ChatReply(chat_reply(root)),
    }
}

/// Explicit error indicator in an otherwise well-formed response: either a
/// non-empty `error` field or `status: "error"` with an optional message.
pub fn backend_error(value: &Value) -> Option<String> {
    let obj = value.as_object()?;

    if let Some(message) = obj.get("error").and_then(Value::as_str) {
        let message = message.trim();
        if !message.is_empty() {
            return Some(message.to_string());
        }
    }

    if obj.get("status").and_then(Value::as_str) == Some("error") {
        let message = obj
            .get("message")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(GENERIC_BACKEND_ERROR);
        return Some(message.to_string());
    }

    None
}

/// Whether a combined response carries data for `kind`. Lets the
/// orchestrator avoid recording empty sections the backend never sent.
pub fn section_present(raw: &RawResponse, kind: Mode) -> bool {
    let root = envelope(raw.json());
    match kind {
        Mode::Upload | Mode::AtsScore => {
            pick(root, &["score", "ats_score"]).is_some()
                || pick(root, &["keywords", "matched_keywords"]).is_some()
        }
        Mode::ResumeFeedback => {
            pick(root, &["resume_feedback", "feedback", "feedback_points"]).is_some()
        }
        Mode::JobRecommendation => {
            root.is_array()
                || pick(root, &["jobs", "job_recommendations", "recommendations", "listings"])
                    .is_some()
        }
        Mode::CoverLetter => pick(root, &["cover_letter", "content"]).is_some(),
        Mode::Chatbot => pick(root, &["response", "answer", "reply"]).is_some(),
    }
}

/// Stored-resume reference out of an upload acknowledgement.
pub fn resume_reference(raw: &RawResponse) -> Option<String> {
    string_field(
        envelope(raw.json()),
        &["resume_file", "filename", "file_id", "file"],
    )
}

// ===== The shared fallback chain =====

/// Structured array -> items, string -> trimmed non-empty lines, anything
/// else -> empty. This is the one normalization primitive every collection
/// field goes through.
pub fn lines_or_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(item_text).collect(),
        Some(Value::String(text)) => split_lines(text),
        _ => Vec::new(),
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn item_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

// ===== Field helpers =====

/// Some responses wrap the payload in a `data` envelope; unwrap it when
/// present.
fn envelope(value: &Value) -> &Value {
    value.get("data").unwrap_or(value)
}

fn pick<'a>(value: &'a Value, names: &[&str]) -> Option<&'a Value> {
    let obj = value.as_object()?;
    names.iter().find_map(|name| obj.get(*name))
}

fn string_field(value: &Value, names: &[&str]) -> Option<String> {
    pick(value, names).and_then(|v| match v {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        // Identifiers occasionally arrive as bare numbers.
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

fn score_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    }
}

fn clamped_score(value: Option<&Value>) -> u8 {
    optional_score(value).unwrap_or(0)
}

fn optional_score(value: Option<&Value>) -> Option<u8> {
    value
        .and_then(score_value)
        .map(|score| score.clamp(0.0, 100.0).round() as u8)
}

// ===== ATS score =====

fn ats_score(root: &Value) -> AtsScore {
    let keywords = pick(root, &["keywords", "keyword_analysis"]);

    let matched_keywords = lines_or_list(
        keywords
            .and_then(|k| pick(k, &["matched", "matched_keywords"]))
            .or_else(|| pick(root, &["matched_keywords"])),
    );
    let missed_keywords = lines_or_list(
        keywords
            .and_then(|k| pick(k, &["unmatched", "missed", "missed_keywords"]))
            .or_else(|| pick(root, &["missed_keywords", "unmatched_keywords"])),
    );

    AtsScore {
        score: clamped_score(pick(root, &["score", "ats_score"])),
        matched_keywords,
        missed_keywords,
        reasoning_sections: reasoning_sections(pick(root, &["reasoning", "reasoning_sections"])),
        tips: lines_or_list(pick(root, &["tips", "optimization_tips"])),
    }
}

/// Each section value may independently be a string or an array; both go
/// through the shared fallback chain.
fn reasoning_sections(value: Option<&Value>) -> Vec<ReasoningSection> {
    let Some(Value::Object(map)) = value else {
        return Vec::new();
    };
    map.iter()
        .map(|(heading, lines)| ReasoningSection {
            heading: heading.clone(),
            lines: lines_or_list(Some(lines)),
        })
        .collect()
}

// ===== Resume feedback =====

/// Verbs that mark a plain-text feedback line as an improvement
/// suggestion rather than an observation.
const IMPROVEMENT_VERBS: &[&str] = &[
    "add", "improve", "consider", "use", "include", "remove", "avoid", "quantify", "tailor",
    "highlight", "rewrite", "replace", "expand", "shorten", "try",
];

fn is_improvement_line(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .map(|word| IMPROVEMENT_VERBS.contains(&word.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn resume_feedback(root: &Value) -> ResumeFeedback {
    let node = pick(root, &["resume_feedback", "feedback"]).unwrap_or(root);

    if let Some(text) = node.as_str() {
        return feedback_from_text(text);
    }
    if node.is_array() {
        return ResumeFeedback {
            feedback_points: feedback_points(Some(node)),
            ..Default::default()
        };
    }

    ResumeFeedback {
        format_score: clamped_score(pick(node, &["format_score", "formatting_score"])),
        parsing_score: clamped_score(pick(node, &["parsing_score", "parse_score"])),
        feedback_points: feedback_points(pick(node, &["feedback_points", "points", "feedback"])),
        improvement_suggestions: lines_or_list(pick(
            node,
            &["improvement_suggestions", "improvements", "suggestions"],
        )),
    }
}

fn feedback_from_text(text: &str) -> ResumeFeedback {
    let mut feedback = ResumeFeedback::default();
    for line in split_lines(text) {
        if is_improvement_line(&line) {
            feedback.improvement_suggestions.push(line);
        } else {
            feedback.feedback_points.push(FeedbackPoint {
                severity: Severity::Success,
                message: line,
            });
        }
    }
    feedback
}

fn feedback_points(value: Option<&Value>) -> Vec<FeedbackPoint> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(feedback_point).collect(),
        Some(Value::String(text)) => split_lines(text)
            .into_iter()
            .map(|line| FeedbackPoint {
                severity: line_severity(&line),
                message: line,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn feedback_point(value: &Value) -> Option<FeedbackPoint> {
    if let Some(line) = value.as_str() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        return Some(FeedbackPoint {
            severity: line_severity(trimmed),
            message: trimmed.to_string(),
        });
    }

    let message = string_field(value, &["message", "text", "point"])?;
    Some(FeedbackPoint {
        severity: severity_from(pick(value, &["severity", "type", "level"])),
        message,
    })
}

fn line_severity(line: &str) -> Severity {
    if is_improvement_line(line) {
        Severity::Warning
    } else {
        Severity::Success
    }
}

fn severity_from(value: Option<&Value>) -> Severity {
    match value
        .and_then(Value::as_str)
        .map(str::to_lowercase)
        .as_deref()
    {
        Some("success" | "ok" | "good" | "pass" | "positive") => Severity::Success,
        Some("error" | "critical" | "fail" | "missing") => Severity::Error,
        _ => Severity::Warning,
    }
}

// ===== Job recommendations =====

fn job_listings(root: &Value) -> Vec<JobRecommendation> {
    let node = if root.is_array() {
        root
    } else {
        pick(root, &["jobs", "job_recommendations", "recommendations", "listings"]).unwrap_or(root)
    };

    match node {
        Value::Array(items) => items.iter().filter_map(job_from_value).collect(),
        // A plain-text listing becomes one placeholder per line; only the
        // title is real data, everything else is an explicit sentinel.
        Value::String(text) => split_lines(text)
            .into_iter()
            .map(JobRecommendation::placeholder)
            .collect(),
        _ => Vec::new(),
    }
}

fn job_from_value(value: &Value) -> Option<JobRecommendation> {
    if let Some(line) = value.as_str() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        return Some(JobRecommendation::placeholder(trimmed));
    }

    value.as_object()?;
    let field = |names: &[&str]| {
        string_field(value, names).unwrap_or_else(|| UNKNOWN_FIELD.to_string())
    };

    Some(JobRecommendation {
        id: string_field(value, &["id", "job_id"]).unwrap_or_else(|| Uuid::new_v4().to_string()),
        title: field(&["title", "job_title", "role"]),
        company: field(&["company", "company_name", "employer"]),
        location: field(&["location", "job_location"]),
        match_score: optional_score(pick(value, &["match_score", "score"])),
        date_posted: field(&["date_posted", "posted_date", "posted"]),
        summary: field(&["summary", "description"]),
        cover_letter_url: string_field(value, &["cover_letter_url", "cover_letter_path"]),
    })
}

// ===== Cover letter and chat =====

fn cover_letter(root: &Value) -> CoverLetter {
    let content = root
        .as_str()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .or_else(|| string_field(root, &["cover_letter", "content", "letter"]))
        .unwrap_or_default();

    CoverLetter {
        content,
        // May be a bare server-side path; the orchestrator resolves it
        // against the configured download endpoint.
        download_url: string_field(root, &["download_url", "path", "file"]),
    }
}

fn chat_reply(root: &Value) -> String {
    root.as_str()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .or_else(|| string_field(root, &["response", "answer", "message", "reply"]))
        .unwrap_or_else(|| MISSING_CHAT_REPLY.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawResponse {
        RawResponse::new(value)
    }

    // ----- fallback chain -----

    #[test]
    fn test_lines_or_list_splits_strings() {
        let value = json!("Python\n  AWS  \n\nDocker\n");
        assert_eq!(
            lines_or_list(Some(&value)),
            vec!["Python", "AWS", "Docker"]
        );
    }

    #[test]
    fn test_lines_or_list_passes_arrays_through() {
        let value = json!(["Python", "AWS"]);
        assert_eq!(lines_or_list(Some(&value)), vec!["Python", "AWS"]);
    }

    #[test]
    fn test_lines_or_list_absent_is_empty() {
        assert!(lines_or_list(None).is_empty());
        assert!(lines_or_list(Some(&json!(42))).is_empty());
        assert!(lines_or_list(Some(&json!({"not": "a list"}))).is_empty());
    }

    #[test]
    fn test_lines_or_list_is_idempotent() {
        let once = lines_or_list(Some(&json!("a\nb")));
        let again = lines_or_list(Some(&Value::Array(
            once.iter().map(|s| json!(s)).collect(),
        )));
        assert_eq!(once, again);
    }

    // ----- scores -----

    #[test]
    fn test_score_clamped_and_defaulted() {
        let over = raw(json!({"score": 140}));
        let Normalized::Ats(ats) = normalize(&over, Mode::AtsScore) else {
            panic!("expected ats");
        };
        assert_eq!(ats.score, 100);

        let negative = raw(json!({"score": -3}));
        let Normalized::Ats(ats) = normalize(&negative, Mode::AtsScore) else {
            panic!("expected ats");
        };
        assert_eq!(ats.score, 0);

        let missing = raw(json!({}));
        let Normalized::Ats(ats) = normalize(&missing, Mode::AtsScore) else {
            panic!("expected ats");
        };
        assert_eq!(ats.score, 0);
    }

    #[test]
    fn test_score_accepts_numeric_strings() {
        let value = raw(json!({"score": "85%"}));
        let Normalized::Ats(ats) = normalize(&value, Mode::AtsScore) else {
            panic!("expected ats");
        };
        assert_eq!(ats.score, 85);
    }

    // ----- ATS score -----

    #[test]
    fn test_ats_score_from_nested_keywords() {
        // Scenario: {score: 85, keywords: {matched: [...], unmatched: [...]}}
        let value = raw(json!({
            "score": 85,
            "keywords": {"matched": ["Python"], "unmatched": ["AWS"]}
        }));
        let Normalized::Ats(ats) = normalize(&value, Mode::AtsScore) else {
            panic!("expected ats");
        };
        assert_eq!(ats.score, 85);
        assert_eq!(ats.matched_keywords, vec!["Python"]);
        assert_eq!(ats.missed_keywords, vec!["AWS"]);
    }

    #[test]
    fn test_ats_score_from_flat_keyword_fields() {
        let value = raw(json!({
            "ats_score": 70,
            "matched_keywords": "React\nTypeScript",
            "missed_keywords": ["Docker"]
        }));
        let Normalized::Ats(ats) = normalize(&value, Mode::AtsScore) else {
            panic!("expected ats");
        };
        assert_eq!(ats.score, 70);
        assert_eq!(ats.matched_keywords, vec!["React", "TypeScript"]);
        assert_eq!(ats.missed_keywords, vec!["Docker"]);
    }

    #[test]
    fn test_reasoning_sections_mixed_shapes() {
        let value = raw(json!({
            "score": 50,
            "reasoning": {
                "strengths": ["Clear layout", "Good keywords"],
                "gaps": "No cloud experience\nNo metrics"
            }
        }));
        let Normalized::Ats(ats) = normalize(&value, Mode::AtsScore) else {
            panic!("expected ats");
        };
        assert_eq!(ats.reasoning_sections.len(), 2);
        let gaps = ats
            .reasoning_sections
            .iter()
            .find(|s| s.heading == "gaps")
            .unwrap();
        assert_eq!(gaps.lines, vec!["No cloud experience", "No metrics"]);
        let strengths = ats
            .reasoning_sections
            .iter()
            .find(|s| s.heading == "strengths")
            .unwrap();
        assert_eq!(strengths.lines, vec!["Clear layout", "Good keywords"]);
    }

    // ----- resume feedback -----

    #[test]
    fn test_feedback_from_plain_string() {
        // Scenario: "Good summary\nAdd more metrics"
        let value = raw(json!({"resume_feedback": "Good summary\nAdd more metrics"}));
        let Normalized::Feedback(feedback) = normalize(&value, Mode::ResumeFeedback) else {
            panic!("expected feedback");
        };
        assert_eq!(feedback.feedback_points.len(), 1);
        assert_eq!(feedback.feedback_points[0].severity, Severity::Success);
        assert_eq!(feedback.feedback_points[0].message, "Good summary");
        assert_eq!(feedback.improvement_suggestions, vec!["Add more metrics"]);
    }

    #[test]
    fn test_feedback_structured() {
        let value = raw(json!({
            "format_score": 88,
            "parsing_score": "92",
            "feedback_points": [
                {"severity": "success", "message": "Strong action verbs"},
                {"type": "warning", "text": "Summary is long"},
                {"severity": "critical", "message": "Missing contact info"}
            ],
            "improvement_suggestions": ["Add metrics"]
        }));
        let Normalized::Feedback(feedback) = normalize(&value, Mode::ResumeFeedback) else {
            panic!("expected feedback");
        };
        assert_eq!(feedback.format_score, 88);
        assert_eq!(feedback.parsing_score, 92);
        assert_eq!(feedback.feedback_points.len(), 3);
        assert_eq!(feedback.feedback_points[0].severity, Severity::Success);
        assert_eq!(feedback.feedback_points[1].severity, Severity::Warning);
        assert_eq!(feedback.feedback_points[1].message, "Summary is long");
        assert_eq!(feedback.feedback_points[2].severity, Severity::Error);
        assert_eq!(feedback.improvement_suggestions, vec!["Add metrics"]);
    }

    #[test]
    fn test_feedback_from_bare_array() {
        let value = raw(json!({"feedback": ["Strong summary", "Add measurable outcomes"]}));
        let Normalized::Feedback(feedback) = normalize(&value, Mode::ResumeFeedback) else {
            panic!("expected feedback");
        };
        assert_eq!(feedback.feedback_points.len(), 2);
        assert_eq!(feedback.feedback_points[0].severity, Severity::Success);
        assert_eq!(feedback.feedback_points[1].severity, Severity::Warning);
    }

    #[test]
    fn test_feedback_empty_response() {
        let value = raw(json!({}));
        let Normalized::Feedback(feedback) = normalize(&value, Mode::ResumeFeedback) else {
            panic!("expected feedback");
        };
        assert_eq!(feedback, ResumeFeedback::default());
    }

    // ----- job recommendations -----

    #[test]
    fn test_jobs_structured_with_alternate_field_names() {
        let value = raw(json!({
            "jobs": [
                {
                    "id": 7,
                    "job_title": "Backend Engineer",
                    "company_name": "Acme",
                    "job_location": "Remote",
                    "score": 91,
                    "posted_date": "2 days ago",
                    "description": "Rust services"
                }
            ]
        }));
        let Normalized::Jobs(jobs) = normalize(&value, Mode::JobRecommendation) else {
            panic!("expected jobs");
        };
        assert_eq!(jobs.len(), 1);
        let job = &jobs[0];
        assert_eq!(job.id, "7");
        assert_eq!(job.title, "Backend Engineer");
        assert_eq!(job.company, "Acme");
        assert_eq!(job.location, "Remote");
        assert_eq!(job.match_score, Some(91));
        assert_eq!(job.date_posted, "2 days ago");
        assert_eq!(job.summary, "Rust services");
    }

    #[test]
    fn test_jobs_missing_match_score_stays_unknown() {
        let value = raw(json!({"jobs": [{"title": "Data Engineer", "company": "Beta"}]}));
        let Normalized::Jobs(jobs) = normalize(&value, Mode::JobRecommendation) else {
            panic!("expected jobs");
        };
        assert_eq!(jobs[0].match_score, None);
        assert!(!jobs[0].id.is_empty());
    }

    #[test]
    fn test_jobs_from_plain_text_lines() {
        let value = raw(json!({"jobs": "Frontend Developer\n\nUI Engineer\n"}));
        let Normalized::Jobs(jobs) = normalize(&value, Mode::JobRecommendation) else {
            panic!("expected jobs");
        };
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].title, "Frontend Developer");
        assert_eq!(jobs[0].company, UNKNOWN_FIELD);
        assert_eq!(jobs[0].match_score, None);
        assert!(!jobs[0].id.is_empty());
    }

    #[test]
    fn test_jobs_round_trip_both_shapes_carry_title_and_id() {
        let structured = raw(json!({"jobs": [{"title": "Platform Engineer"}]}));
        let text = raw(json!({"jobs": "Platform Engineer"}));
        for value in [structured, text] {
            let Normalized::Jobs(jobs) = normalize(&value, Mode::JobRecommendation) else {
                panic!("expected jobs");
            };
            assert_eq!(jobs[0].title, "Platform Engineer");
            assert!(!jobs[0].id.is_empty());
        }
    }

    #[test]
    fn test_jobs_top_level_array() {
        let value = raw(json!([{"title": "SRE", "company": "Gamma"}]));
        let Normalized::Jobs(jobs) = normalize(&value, Mode::JobRecommendation) else {
            panic!("expected jobs");
        };
        assert_eq!(jobs[0].title, "SRE");
    }

    // ----- errors -----

    #[test]
    fn test_explicit_error_short_circuits() {
        // Scenario: {"error": "file too large"} with HTTP 200
        let value = raw(json!({"error": "file too large", "score": 90}));
        for kind in [Mode::AtsScore, Mode::ResumeFeedback, Mode::JobRecommendation] {
            assert_eq!(
                normalize(&value, kind),
                Normalized::Error("file too large".to_string())
            );
        }
    }

    #[test]
    fn test_status_error_with_message() {
        let value = raw(json!({"status": "error", "message": "resume not found"}));
        assert_eq!(
            normalize(&value, Mode::AtsScore),
            Normalized::Error("resume not found".to_string())
        );

        let bare = raw(json!({"status": "error"}));
        assert_eq!(
            normalize(&bare, Mode::AtsScore),
            Normalized::Error(GENERIC_BACKEND_ERROR.to_string())
        );
    }

    #[test]
    fn test_empty_error_field_is_not_an_error() {
        let value = raw(json!({"error": "", "score": 12}));
        let Normalized::Ats(ats) = normalize(&value, Mode::AtsScore) else {
            panic!("expected ats");
        };
        assert_eq!(ats.score, 12);
    }

    // ----- cover letter and chat -----

    #[test]
    fn test_cover_letter_content_and_path() {
        let value = raw(json!({"cover_letter": "Dear team,", "path": "letters/x.docx"}));
        let Normalized::CoverLetter(letter) = normalize(&value, Mode::CoverLetter) else {
            panic!("expected cover letter");
        };
        assert_eq!(letter.content, "Dear team,");
        assert_eq!(letter.download_url.as_deref(), Some("letters/x.docx"));
    }

    #[test]
    fn test_chat_reply_fallbacks() {
        let value = raw(json!({"response": "Focus on impact."}));
        assert_eq!(
            normalize(&value, Mode::Chatbot),
            Normalized::ChatReply("Focus on impact.".to_string())
        );

        let empty = raw(json!({}));
        assert_eq!(
            normalize(&empty, Mode::Chatbot),
            Normalized::ChatReply(MISSING_CHAT_REPLY.to_string())
        );
    }

    // ----- envelopes and degenerate payloads -----

    #[test]
    fn test_data_envelope_is_unwrapped() {
        let value = raw(json!({"data": {"score": 64}}));
        let Normalized::Ats(ats) = normalize(&value, Mode::AtsScore) else {
            panic!("expected ats");
        };
        assert_eq!(ats.score, 64);
    }

    #[test]
    fn test_scalar_top_level_yields_empty_sections() {
        let value = raw(json!(5));
        let Normalized::Ats(ats) = normalize(&value, Mode::AtsScore) else {
            panic!("expected ats");
        };
        assert_eq!(ats, AtsScore::default());
    }

    #[test]
    fn test_upload_ack_reference() {
        let ack = raw(json!({"message": "ok", "resume_file": "resume_123.pdf"}));
        assert_eq!(resume_reference(&ack).as_deref(), Some("resume_123.pdf"));
        assert_eq!(resume_reference(&raw(json!({}))), None);
    }

    #[test]
    fn test_section_present() {
        let combined = raw(json!({"score": 10, "jobs": []}));
        assert!(section_present(&combined, Mode::AtsScore));
        assert!(section_present(&combined, Mode::JobRecommendation));
        assert!(!section_present(&combined, Mode::ResumeFeedback));
    }
}
