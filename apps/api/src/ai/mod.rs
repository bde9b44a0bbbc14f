// AI layer: resume analysis, tailoring, cold emails and interview practice.
// All completion calls go through llm_client::CompletionService; callers only
// ever see task-shaped JSON values, never an unhandled failure.

pub mod extract;
pub mod fallback;
pub mod gate;
pub mod handlers;
pub mod prompts;
pub mod schema;
pub mod service;

use thiserror::Error;

use crate::ai::extract::{ExpectedShape, ParseFailure};
use crate::ai::schema::SchemaMismatch;
use crate::llm_client::CompletionError;

/// The five AI tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    ResumeAnalysis,
    InterviewQuestions,
    AnswerEvaluation,
    ResumeTailoring,
    ColdEmail,
}

impl Task {
    pub fn name(self) -> &'static str {
        match self {
            Task::ResumeAnalysis => "resume_analysis",
            Task::InterviewQuestions => "interview_questions",
            Task::AnswerEvaluation => "answer_evaluation",
            Task::ResumeTailoring => "resume_tailoring",
            Task::ColdEmail => "cold_email",
        }
    }

    /// Only question generation expects a list back.
    pub fn expected_shape(self) -> ExpectedShape {
        match self {
            Task::InterviewQuestions => ExpectedShape::List,
            _ => ExpectedShape::Object,
        }
    }
}

/// Why a task fell back after the gate let it through.
#[derive(Debug, Error)]
pub enum TaskFailure {
    #[error(transparent)]
    Service(#[from] CompletionError),

    #[error(transparent)]
    Parse(#[from] ParseFailure),

    #[error(transparent)]
    Schema(#[from] SchemaMismatch),
}

impl TaskFailure {
    /// Bounded preview of the completion text, when the text itself was the problem.
    pub fn response_preview(&self) -> Option<&str> {
        match self {
            TaskFailure::Parse(failure) => Some(&failure.preview),
            _ => None,
        }
    }
}
