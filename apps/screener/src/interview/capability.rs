//! Generation capability: the pluggable, best-effort source of tailored questions.
//!
//! A source never fails loudly: every transport error, API error or malformed body comes
//! back as `Generation::Unavailable` so the generator can move to its next tier.

use async_trait::async_trait;
use serde::Serialize;

use crate::intake::models::CandidateRecord;
use crate::interview::prompts::{QUESTION_PROMPT_TEMPLATE, QUESTION_SYSTEM, QUESTION_TEMPERATURE};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;

/// What a source gets to see about the candidate. Contact details are never included.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationContext {
    pub tech_stack: Vec<String>,
    pub years_experience: f64,
    pub desired_position: String,
}

impl GenerationContext {
    pub fn from_candidate(candidate: &CandidateRecord) -> Self {
        Self {
            tech_stack: candidate.tech_stack.clone(),
            years_experience: candidate.years_experience,
            desired_position: candidate.desired_position.clone(),
        }
    }
}

/// Outcome of one generation attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Generation {
    Questions(Vec<String>),
    Unavailable(String),
}

/// Implement this to plug in a different question backend.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Short backend label for logs.
    fn name(&self) -> &str;

    async fn generate(&self, context: &GenerationContext) -> Generation;
}

/// Tailored questions from Claude via the shared `LlmClient`.
pub struct LlmQuestionSource {
    llm: LlmClient,
}

impl LlmQuestionSource {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl QuestionSource for LlmQuestionSource {
    fn name(&self) -> &str {
        self.llm.model()
    }

    async fn generate(&self, context: &GenerationContext) -> Generation {
        let prompt = build_question_prompt(context);
        let system = format!("{QUESTION_SYSTEM} {JSON_ONLY_SYSTEM}");

        match self
            .llm
            .call_json::<Vec<String>>(&prompt, &system, QUESTION_TEMPERATURE)
            .await
        {
            Ok(questions) => Generation::Questions(questions),
            Err(e) => Generation::Unavailable(e.to_string()),
        }
    }
}

/// Fills the question prompt template with the candidate context.
pub fn build_question_prompt(context: &GenerationContext) -> String {
    QUESTION_PROMPT_TEMPLATE
        .replace("{tech_stack}", &context.tech_stack.join(", "))
        .replace("{years_experience}", &context.years_experience.to_string())
        .replace("{desired_position}", &context.desired_position)
}
