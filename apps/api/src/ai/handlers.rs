//! Axum route handlers for the AI endpoints.
//!
//! Handlers validate input and resolve resume text; the AI result itself is
//! always a 200 with a task-shaped body, including degraded fallbacks.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::ai::prompts::ColdEmailInput;
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct InterviewRequest {
    pub job_title: String,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub raw_text: String,
}

#[derive(Debug, Deserialize)]
pub struct TailorRequest {
    pub user_id: i64,
    pub resume_id: i64,
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct ColdEmailRequest {
    pub user_id: i64,
    pub resume_id: i64,
    pub recipient_name: String,
    pub company_name: String,
    pub job_title: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interviews/generate
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Json(request): Json<InterviewRequest>,
) -> Result<Json<Value>, AppError> {
    require_text("job_title", &request.job_title)?;
    let questions = state
        .ai
        .generate_interview_questions(&request.job_title, &request.job_description)
        .await;
    Ok(Json(questions))
}

/// POST /api/v1/interviews/evaluate
pub async fn handle_evaluate_answer(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<Value>, AppError> {
    require_text("question", &request.question)?;
    let evaluation = state
        .ai
        .evaluate_answer(&request.question, &request.answer)
        .await;
    Ok(Json(evaluation))
}

/// POST /api/v1/resumes/analyze
///
/// Takes text already extracted from an uploaded resume.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<Value>, AppError> {
    require_text("raw_text", &request.raw_text)?;
    Ok(Json(state.ai.analyze_resume(&request.raw_text).await))
}

/// POST /api/v1/resumes/tailor
pub async fn handle_tailor_resume(
    State(state): State<AppState>,
    Json(request): Json<TailorRequest>,
) -> Result<Json<Value>, AppError> {
    require_text("job_description", &request.job_description)?;
    let resume_text = load_resume_text(&state, request.user_id, request.resume_id).await?;
    let tailored = state
        .ai
        .tailor_resume(&resume_text, &request.job_description)
        .await;
    Ok(Json(tailored))
}

/// POST /api/v1/resumes/cold-email
pub async fn handle_cold_email(
    State(state): State<AppState>,
    Json(request): Json<ColdEmailRequest>,
) -> Result<Json<Value>, AppError> {
    require_text("company_name", &request.company_name)?;
    require_text("job_title", &request.job_title)?;
    let resume_text = load_resume_text(&state, request.user_id, request.resume_id).await?;
    let email = state
        .ai
        .generate_cold_email(ColdEmailInput {
            resume_text: &resume_text,
            recipient_name: &request.recipient_name,
            company_name: &request.company_name,
            job_title: &request.job_title,
        })
        .await;
    Ok(Json(email))
}

async fn load_resume_text(
    state: &AppState,
    user_id: i64,
    resume_id: i64,
) -> Result<String, AppError> {
    state
        .resumes
        .find_raw_text(user_id, resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))
}

fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}
