//! Prompt builders for the five AI tasks.
//!
//! Each builder is a pure function from typed input to one instruction string.
//! Long free text (resume, job description) is cut to a per-task character
//! budget before submission; the caller is not told, but `BuiltPrompt::truncated`
//! records it for logging.

use crate::llm_client::prompts::{fill_template, truncate_chars};

/// Interview questions only need the gist of the job description.
pub const INTERVIEW_JD_BUDGET: usize = 1000;
pub const TAILOR_JD_BUDGET: usize = 2000;
pub const TAILOR_RESUME_BUDGET: usize = 2000;
pub const COLD_EMAIL_RESUME_BUDGET: usize = 1000;

/// Resume parsing prompt. Replace `{resume_text}` before sending.
pub const RESUME_ANALYSIS_TEMPLATE: &str = r#"You are an expert resume parser. Extract the information below from the resume text and return it as strict JSON.

Return a JSON object with this structure:
{
  "personal_info": {"name": "", "email": "", "phone": "", "linkedin": "", "location": ""},
  "education": [{"institution": "", "degree": "", "start_date": "", "end_date": "", "gpa": ""}],
  "experience": [{"company": "", "title": "", "start_date": "", "end_date": "", "description": "", "skills_used": []}],
  "skills": {"technical": [], "soft": [], "tools": []},
  "projects": [{"name": "", "description": "", "technologies": []}],
  "certifications": [{"name": "", "issuer": "", "date": ""}]
}

Use empty strings or empty lists for anything the resume does not mention.

RESUME TEXT:
{resume_text}"#;

/// Replace: {job_title}, {job_description}
pub const INTERVIEW_QUESTIONS_TEMPLATE: &str = r#"Generate 5 technical and behavioral interview questions for a {job_title} role.

JOB DESCRIPTION:
{job_description}...

Return ONLY a raw JSON list of strings. Example: ["Question 1", "Question 2"]"#;

/// Replace: {question}, {answer}
pub const ANSWER_EVALUATION_TEMPLATE: &str = r#"You are an expert interviewer. Evaluate the candidate's answer to the question below.

Question: {question}
Answer: {answer}

Return feedback as a JSON object:
{
  "feedback": "Constructive feedback on the answer",
  "score": 85,
  "suggested_improvement": "How the answer could be stronger"
}

`score` is an integer from 0 to 100."#;

/// Replace: {job_description}, {resume_text}
pub const RESUME_TAILORING_TEMPLATE: &str = r#"You are an expert resume tailor. Rewrite the summary and the key experience bullet points of the resume so they match the job description more closely.
Focus on keywords, relevant skills and measurable impact.

JOB DESCRIPTION:
{job_description}

RESUME TEXT:
{resume_text}

Return a JSON object:
{
  "tailored_summary": "Rewritten professional summary",
  "key_improvements": ["Each change that was made"],
  "tailored_content_preview": "Rewritten resume content"
}"#;

/// Replace: {resume_text}, {recipient_name}, {company_name}, {job_title}
pub const COLD_EMAIL_TEMPLATE: &str = r#"You are an expert career coach. Write a compelling, professional cold email to a hiring manager.

Context:
- Candidate resume summary: {resume_text}...
- Recipient: {recipient_name}
- Company: {company_name}
- Target role: {job_title}

The email must be:
- Concise (under 150 words)
- Persuasive but polite
- Built around 1-2 achievements from the resume that matter for the role
- Closed with a clear call to action

Return a JSON object:
{
  "subject": "Email subject line",
  "body": "Email body"
}"#;

/// A finished prompt plus whether any input was cut to fit its budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPrompt {
    pub text: String,
    pub truncated: bool,
}

/// Inputs for a cold email.
#[derive(Debug, Clone, Copy)]
pub struct ColdEmailInput<'a> {
    pub resume_text: &'a str,
    pub recipient_name: &'a str,
    pub company_name: &'a str,
    pub job_title: &'a str,
}

pub fn build_resume_analysis_prompt(resume_text: &str) -> BuiltPrompt {
    BuiltPrompt {
        text: fill_template(RESUME_ANALYSIS_TEMPLATE, &[("resume_text", resume_text)]),
        truncated: false,
    }
}

pub fn build_interview_questions_prompt(job_title: &str, job_description: &str) -> BuiltPrompt {
    let (job_description, truncated) = truncate_chars(job_description, INTERVIEW_JD_BUDGET);
    BuiltPrompt {
        text: fill_template(
            INTERVIEW_QUESTIONS_TEMPLATE,
            &[("job_title", job_title), ("job_description", job_description)],
        ),
        truncated,
    }
}

pub fn build_answer_evaluation_prompt(question: &str, answer: &str) -> BuiltPrompt {
    BuiltPrompt {
        text: fill_template(
            ANSWER_EVALUATION_TEMPLATE,
            &[("question", question), ("answer", answer)],
        ),
        truncated: false,
    }
}

pub fn build_resume_tailoring_prompt(resume_text: &str, job_description: &str) -> BuiltPrompt {
    let (job_description, jd_cut) = truncate_chars(job_description, TAILOR_JD_BUDGET);
    let (resume_text, resume_cut) = truncate_chars(resume_text, TAILOR_RESUME_BUDGET);
    BuiltPrompt {
        text: fill_template(
            RESUME_TAILORING_TEMPLATE,
            &[("job_description", job_description), ("resume_text", resume_text)],
        ),
        truncated: jd_cut || resume_cut,
    }
}

pub fn build_cold_email_prompt(input: ColdEmailInput<'_>) -> BuiltPrompt {
    let (resume_text, truncated) = truncate_chars(input.resume_text, COLD_EMAIL_RESUME_BUDGET);
    BuiltPrompt {
        text: fill_template(
            COLD_EMAIL_TEMPLATE,
            &[
                ("resume_text", resume_text),
                ("recipient_name", input.recipient_name),
                ("company_name", input.company_name),
                ("job_title", input.job_title),
            ],
        ),
        truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_prompt_embeds_full_resume_and_schema() {
        let resume = "Jane Doe\n".repeat(500);
        let prompt = build_resume_analysis_prompt(&resume);
        assert!(prompt.text.ends_with(&resume));
        assert!(!prompt.truncated);
        for field in ["personal_info", "education", "experience", "skills", "projects", "certifications"] {
            assert!(prompt.text.contains(field), "missing {field}");
        }
    }

    #[test]
    fn test_interview_prompt_truncates_description_to_budget() {
        let jd = "a".repeat(INTERVIEW_JD_BUDGET + 250);
        let prompt = build_interview_questions_prompt("Backend Engineer", &jd);
        assert!(prompt.truncated);
        assert!(prompt.text.contains("Backend Engineer role"));
        assert!(prompt.text.contains(&format!("{}...", "a".repeat(INTERVIEW_JD_BUDGET))));
        assert!(!prompt.text.contains(&"a".repeat(INTERVIEW_JD_BUDGET + 1)));
    }

    #[test]
    fn test_interview_prompt_short_description_not_truncated() {
        let prompt = build_interview_questions_prompt("SRE", "Keep services up.");
        assert!(!prompt.truncated);
        assert!(prompt.text.contains("Keep services up."));
        assert!(prompt.text.contains("raw JSON list of strings"));
    }

    #[test]
    fn test_evaluation_prompt_contains_question_answer_and_shape() {
        let prompt = build_answer_evaluation_prompt("Why Rust?", "Memory safety without GC.");
        assert!(prompt.text.contains("Question: Why Rust?"));
        assert!(prompt.text.contains("Answer: Memory safety without GC."));
        assert!(prompt.text.contains("\"suggested_improvement\""));
        assert!(!prompt.truncated);
    }

    #[test]
    fn test_tailoring_prompt_truncates_each_input_independently() {
        let resume = "r".repeat(TAILOR_RESUME_BUDGET + 1);
        let prompt = build_resume_tailoring_prompt(&resume, "short jd");
        assert!(prompt.truncated);
        assert!(prompt.text.contains("short jd"));
        assert!(prompt.text.contains(&"r".repeat(TAILOR_RESUME_BUDGET)));
        assert!(!prompt.text.contains(&"r".repeat(TAILOR_RESUME_BUDGET + 1)));

        let untouched = build_resume_tailoring_prompt("resume", "jd");
        assert!(!untouched.truncated);
    }

    #[test]
    fn test_tailoring_prompt_truncates_long_job_description() {
        let jd = "j".repeat(TAILOR_JD_BUDGET + 1);
        let prompt = build_resume_tailoring_prompt("short resume", &jd);
        assert!(prompt.truncated);
        assert!(prompt.text.contains("short resume"));
        assert!(prompt.text.contains(&"j".repeat(TAILOR_JD_BUDGET)));
        assert!(!prompt.text.contains(&"j".repeat(TAILOR_JD_BUDGET + 1)));
    }

    #[test]
    fn test_cold_email_prompt_fills_all_fields() {
        let prompt = build_cold_email_prompt(ColdEmailInput {
            resume_text: "Built a payments platform.",
            recipient_name: "Sam Lee",
            company_name: "Acme",
            job_title: "Staff Engineer",
        });
        assert!(prompt.text.contains("Built a payments platform...."));
        assert!(prompt.text.contains("Recipient: Sam Lee"));
        assert!(prompt.text.contains("Company: Acme"));
        assert!(prompt.text.contains("Target role: Staff Engineer"));
        assert!(prompt.text.contains("\"subject\""));
        assert!(!prompt.truncated);
    }

    #[test]
    fn test_cold_email_prompt_truncates_resume() {
        let resume = "é".repeat(COLD_EMAIL_RESUME_BUDGET + 10);
        let prompt = build_cold_email_prompt(ColdEmailInput {
            resume_text: &resume,
            recipient_name: "Sam",
            company_name: "Acme",
            job_title: "Engineer",
        });
        assert!(prompt.truncated);
        assert!(!prompt.text.contains(&"é".repeat(COLD_EMAIL_RESUME_BUDGET + 1)));
    }

    #[test]
    fn test_builders_are_deterministic() {
        assert_eq!(
            build_resume_tailoring_prompt("resume", "jd"),
            build_resume_tailoring_prompt("resume", "jd")
        );
    }
}
