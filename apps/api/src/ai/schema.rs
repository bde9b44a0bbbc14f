//! Optional shape check for parsed completions.
//!
//! Off by default: the model's structure is trusted verbatim. When enabled
//! (`AI_VALIDATE_SCHEMA=true`), only top-level fields and their JSON kinds are
//! checked; extra fields are always allowed.

use serde_json::Value;
use thiserror::Error;

use super::Task;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("response did not match the expected shape: {0}")]
pub struct SchemaMismatch(pub String);

#[derive(Debug, Clone, Copy)]
enum Kind {
    String,
    Integer,
    Array,
    Object,
}

impl Kind {
    fn matches(self, value: &Value) -> bool {
        match self {
            Kind::String => value.is_string(),
            Kind::Integer => value.is_i64() || value.is_u64(),
            Kind::Array => value.is_array(),
            Kind::Object => value.is_object(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Array => "list",
            Kind::Object => "object",
        }
    }
}

fn required_fields(task: Task) -> &'static [(&'static str, Kind)] {
    match task {
        Task::ResumeAnalysis => &[
            ("personal_info", Kind::Object),
            ("education", Kind::Array),
            ("experience", Kind::Array),
            ("skills", Kind::Object),
            ("projects", Kind::Array),
            ("certifications", Kind::Array),
        ],
        Task::AnswerEvaluation => &[
            ("feedback", Kind::String),
            ("score", Kind::Integer),
            ("suggested_improvement", Kind::String),
        ],
        Task::ResumeTailoring => &[
            ("tailored_summary", Kind::String),
            ("key_improvements", Kind::Array),
            ("tailored_content_preview", Kind::String),
        ],
        Task::ColdEmail => &[("subject", Kind::String), ("body", Kind::String)],
        Task::InterviewQuestions => &[],
    }
}

pub fn validate(task: Task, value: &Value) -> Result<(), SchemaMismatch> {
    if task == Task::InterviewQuestions {
        let items = value
            .as_array()
            .ok_or_else(|| SchemaMismatch("expected a list of questions".to_string()))?;
        return match items.iter().position(|q| !q.is_string()) {
            Some(i) => Err(SchemaMismatch(format!("question {i} is not a string"))),
            None => Ok(()),
        };
    }

    let object = value
        .as_object()
        .ok_or_else(|| SchemaMismatch("expected a JSON object".to_string()))?;

    for (field, kind) in required_fields(task) {
        match object.get(*field) {
            None => return Err(SchemaMismatch(format!("missing field `{field}`"))),
            Some(v) if !kind.matches(v) => {
                return Err(SchemaMismatch(format!(
                    "field `{field}` should be a {}",
                    kind.name()
                )))
            }
            Some(_) => {}
        }
    }

    if task == Task::AnswerEvaluation {
        let score = object.get("score").and_then(Value::as_i64).unwrap_or(-1);
        if !(0..=100).contains(&score) {
            return Err(SchemaMismatch("`score` must be between 0 and 100".to_string()));
        }
    }

    Ok(())
}
