//! AI task orchestrator.
//!
//! Flow per call: gate check → build prompt → completion service →
//! structured extraction → (optional shape check) → value or fallback.
//!
//! Every public method returns a JSON value in the task's shape. Failures are
//! logged and folded into fallback values here; nothing propagates further.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::ai::extract::extract;
use crate::ai::fallback;
use crate::ai::gate::AvailabilityGate;
use crate::ai::prompts::{
    build_answer_evaluation_prompt, build_cold_email_prompt, build_interview_questions_prompt,
    build_resume_analysis_prompt, build_resume_tailoring_prompt, BuiltPrompt, ColdEmailInput,
};
use crate::ai::schema;
use crate::ai::{Task, TaskFailure};
use crate::llm_client::CompletionService;

/// Stateless between calls; cheap to clone and share across handlers.
#[derive(Clone)]
pub struct AiService {
    completion: Arc<dyn CompletionService>,
    gate: AvailabilityGate,
    validate_schema: bool,
}

impl AiService {
    pub fn new(completion: Arc<dyn CompletionService>, gate: AvailabilityGate) -> Self {
        Self {
            completion,
            gate,
            validate_schema: false,
        }
    }

    /// Rejects well-formed but off-shape completions. Off by default.
    pub fn with_schema_validation(mut self, enabled: bool) -> Self {
        self.validate_schema = enabled;
        self
    }

    pub fn is_available(&self) -> bool {
        self.gate.is_available()
    }

    /// Extracts structured resume data from already-extracted resume text.
    pub async fn analyze_resume(&self, resume_text: &str) -> Value {
        if !self.is_available() {
            info!("AI analysis skipped - no completion service configured");
            return fallback::unavailable(Task::ResumeAnalysis);
        }
        let prompt = build_resume_analysis_prompt(resume_text);
        self.run(Task::ResumeAnalysis, prompt, Some(resume_text))
            .await
    }

    pub async fn generate_interview_questions(
        &self,
        job_title: &str,
        job_description: &str,
    ) -> Value {
        if !self.is_available() {
            return fallback::unavailable(Task::InterviewQuestions);
        }
        let prompt = build_interview_questions_prompt(job_title, job_description);
        self.run(Task::InterviewQuestions, prompt, None).await
    }

    pub async fn evaluate_answer(&self, question: &str, answer: &str) -> Value {
        if !self.is_available() {
            return fallback::unavailable(Task::AnswerEvaluation);
        }
        let prompt = build_answer_evaluation_prompt(question, answer);
        self.run(Task::AnswerEvaluation, prompt, None).await
    }

    pub async fn tailor_resume(&self, resume_text: &str, job_description: &str) -> Value {
        if !self.is_available() {
            return fallback::unavailable(Task::ResumeTailoring);
        }
        let prompt = build_resume_tailoring_prompt(resume_text, job_description);
        self.run(Task::ResumeTailoring, prompt, None).await
    }

    pub async fn generate_cold_email(&self, input: ColdEmailInput<'_>) -> Value {
        if !self.is_available() {
            return fallback::unavailable(Task::ColdEmail);
        }
        let prompt = build_cold_email_prompt(input);
        self.run(Task::ColdEmail, prompt, None).await
    }

    async fn run(&self, task: Task, prompt: BuiltPrompt, input_text: Option<&str>) -> Value {
        if prompt.truncated {
            debug!(
                "{}: prompt input truncated to fit character budget",
                task.name()
            );
        }

        match self.complete_structured(task, &prompt.text).await {
            Ok(value) => value,
            Err(failure) => {
                warn!("{}: {failure}", fallback::failure_prefix(task));
                fallback::failed(task, &failure, input_text)
            }
        }
    }

    async fn complete_structured(&self, task: Task, prompt: &str) -> Result<Value, TaskFailure> {
        let raw = self.completion.complete(prompt).await?;
        let value = extract(&raw, task.expected_shape())?;
        if self.validate_schema {
            schema::validate(task, &value)?;
        }
        Ok(value)
    }
}
