//! Deterministic values returned when AI is unavailable or a task fails.
//! Every value still has the task's output shape where one exists.

use serde_json::{json, Map, Value};

use crate::ai::extract::preview;
use crate::ai::{Task, TaskFailure};

pub const ANALYSIS_UNAVAILABLE_NOTE: &str =
    "AI analysis unavailable - please configure GOOGLE_API_KEY for full analysis";
pub const AI_NOT_CONFIGURED: &str = "AI not configured";
pub const EVALUATION_NOT_CONFIGURED: &str = "AI Not configured";
pub const UNAVAILABLE_QUESTION: &str = "Describe yourself and your experience.";
pub const FAILURE_QUESTIONS: [&str; 2] = ["Describe yourself.", "Why do you want this job?"];

/// Fixed value for a task while the availability gate is closed.
pub fn unavailable(task: Task) -> Value {
    match task {
        Task::ResumeAnalysis => {
            let mut value = empty_analysis();
            value["note"] = json!(ANALYSIS_UNAVAILABLE_NOTE);
            value
        }
        Task::InterviewQuestions => json!([UNAVAILABLE_QUESTION]),
        Task::AnswerEvaluation => json!({
            "feedback": EVALUATION_NOT_CONFIGURED,
            "score": 0,
            "suggested_improvement": ""
        }),
        Task::ResumeTailoring | Task::ColdEmail => json!({ "error": AI_NOT_CONFIGURED }),
    }
}

/// Value for a task whose completion call, parse or shape check failed.
///
/// `input_text` is the caller's own text (the resume, for analysis) and is
/// echoed back as a bounded preview so the caller can see what was sent.
pub fn failed(task: Task, failure: &TaskFailure, input_text: Option<&str>) -> Value {
    if task == Task::InterviewQuestions {
        return json!(FAILURE_QUESTIONS);
    }

    let message = failure.to_string();
    let mut value = Map::new();

    match task {
        Task::AnswerEvaluation => {
            value.insert(
                "feedback".into(),
                json!(format!("{}: {message}", failure_prefix(task))),
            );
            value.insert("score".into(), json!(0));
            value.insert("suggested_improvement".into(), json!(""));
            value.insert("error".into(), json!(message));
        }
        _ => {
            value.insert(
                "error".into(),
                json!(format!("{}: {message}", failure_prefix(task))),
            );
        }
    }

    if let Some(text) = input_text {
        value.insert("raw_text_preview".into(), json!(preview(text)));
    }
    if let Some(response) = failure.response_preview() {
        value.insert("raw_response_preview".into(), json!(response));
    }

    Value::Object(value)
}

/// Human-readable lead-in for a task's failure message.
pub fn failure_prefix(task: Task) -> &'static str {
    match task {
        Task::ResumeAnalysis => "Failed to parse resume with AI",
        Task::InterviewQuestions => "Failed to generate questions",
        Task::AnswerEvaluation => "Error processing answer",
        Task::ResumeTailoring => "Failed to tailor resume",
        Task::ColdEmail => "Failed to generate email",
    }
}

fn empty_analysis() -> Value {
    json!({
        "personal_info": {"name": "", "email": "", "phone": "", "linkedin": "", "location": ""},
        "education": [],
        "experience": [],
        "skills": {"technical": [], "soft": [], "tools": []},
        "projects": [],
        "certifications": []
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::extract::{extract, ExpectedShape};
    use crate::ai::schema::SchemaMismatch;
    use crate::llm_client::CompletionError;

    #[test]
    fn test_unavailable_analysis_is_empty_structure_with_note() {
        let value = unavailable(Task::ResumeAnalysis);
        assert_eq!(value["note"], ANALYSIS_UNAVAILABLE_NOTE);
        assert_eq!(value["education"], json!([]));
        assert_eq!(value["skills"]["technical"], json!([]));
        assert_eq!(value["personal_info"]["email"], "");
    }

    #[test]
    fn test_unavailable_values_per_task() {
        assert_eq!(unavailable(Task::InterviewQuestions), json!([UNAVAILABLE_QUESTION]));
        assert_eq!(unavailable(Task::AnswerEvaluation)["score"], 0);
        assert_eq!(unavailable(Task::ColdEmail), json!({"error": "AI not configured"}));
        assert_eq!(unavailable(Task::ResumeTailoring), json!({"error": "AI not configured"}));
    }

    #[test]
    fn test_service_failure_for_cold_email() {
        let failure = TaskFailure::Service(CompletionError::QuotaExceeded("daily limit".into()));
        assert_eq!(
            failed(Task::ColdEmail, &failure, None),
            json!({"error": "Failed to generate email: quota exceeded: daily limit"})
        );
    }

    #[test]
    fn test_parse_failure_carries_response_preview() {
        let failure = TaskFailure::Parse(extract("no json", ExpectedShape::Object).unwrap_err());
        let value = failed(Task::ResumeTailoring, &failure, None);
        assert!(value["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to tailor resume: Could not extract valid JSON"));
        assert_eq!(value["raw_response_preview"], "no json");
    }

    #[test]
    fn test_analysis_failure_previews_resume_text() {
        let resume = "x".repeat(600);
        let failure = TaskFailure::Service(CompletionError::EmptyContent);
        let value = failed(Task::ResumeAnalysis, &failure, Some(&resume));
        assert_eq!(
            value["error"],
            "Failed to parse resume with AI: completion service returned empty content"
        );
        assert_eq!(value["raw_text_preview"], format!("{}...", "x".repeat(500)));
        assert!(value.get("raw_response_preview").is_none());
    }

    #[test]
    fn test_evaluation_failure_keeps_evaluation_shape() {
        let failure = TaskFailure::Schema(SchemaMismatch("missing field `score`".into()));
        let value = failed(Task::AnswerEvaluation, &failure, None);
        assert_eq!(value["score"], 0);
        assert_eq!(value["suggested_improvement"], "");
        assert!(value["feedback"]
            .as_str()
            .unwrap()
            .starts_with("Error processing answer: response did not match"));
        assert!(value["error"].is_string());
    }

    #[test]
    fn test_question_failure_is_default_list() {
        let failure = TaskFailure::Service(CompletionError::Timeout(60));
        assert_eq!(
            failed(Task::InterviewQuestions, &failure, None),
            json!(["Describe yourself.", "Why do you want this job?"])
        );
    }
}
