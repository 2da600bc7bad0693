//! Question Generator: picks the questions a candidate is asked.
//!
//! Flow: tailored (LLM capability) → rule-based (fallback bank) → generic set.
//!
//! Each tier is a `QuestionStrategy`. The generator tries them in order and stops at the
//! first one whose output survives `QuestionSet::normalize` non-empty. A strategy signals
//! "try next" by returning nothing; none of them can fail. The generic tier always yields
//! five questions, so a candidate is never shown an empty list.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

use crate::intake::models::CandidateRecord;
use crate::interview::capability::{Generation, GenerationContext, QuestionSource};
use crate::interview::question_bank;
use crate::interview::question_set::{QuestionSet, MAX_QUESTIONS};

/// Max questions taken from a single matched bank entry.
pub const PER_TECH_LIMIT: usize = 2;

/// Shown when neither the capability nor the bank produced anything.
pub const GENERIC_QUESTIONS: [&str; 5] = [
    "Describe a challenging technical problem you solved recently and your approach.",
    "How do you ensure code quality and maintainability in team projects?",
    "Explain a time you optimized performance—what was the baseline, the change, and the impact?",
    "How do you design tests for complex features or systems?",
    "Walk through a project architecture you would propose for the desired role.",
];

// ────────────────────────────────────────────────────────────────────────────
// Strategy trait
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Tailored,
    RuleBased,
    Generic,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tier::Tailored => "tailored",
            Tier::RuleBased => "rule_based",
            Tier::Generic => "generic",
        })
    }
}

#[async_trait]
pub trait QuestionStrategy: Send + Sync {
    fn tier(&self) -> Tier;

    /// Candidate questions, possibly unnormalized. Empty means "try the next tier".
    async fn propose(&self, candidate: &CandidateRecord) -> Vec<String>;
}

/// Questions from the external capability, bounded by `timeout`.
pub struct TailoredStrategy {
    source: Option<Arc<dyn QuestionSource>>,
    timeout: Duration,
}

impl TailoredStrategy {
    pub fn new(source: Option<Arc<dyn QuestionSource>>, timeout: Duration) -> Self {
        Self { source, timeout }
    }
}

#[async_trait]
impl QuestionStrategy for TailoredStrategy {
    fn tier(&self) -> Tier {
        Tier::Tailored
    }

    async fn propose(&self, candidate: &CandidateRecord) -> Vec<String> {
        let Some(source) = &self.source else {
            debug!("No generation capability configured");
            return Vec::new();
        };
        if !candidate.has_tech_stack() {
            debug!("Empty tech stack, skipping generation capability");
            return Vec::new();
        }

        let context = GenerationContext::from_candidate(candidate);
        match tokio::time::timeout(self.timeout, source.generate(&context)).await {
            Ok(Generation::Questions(questions)) => questions,
            Ok(Generation::Unavailable(reason)) => {
                info!("Generation capability '{}' unavailable: {reason}", source.name());
                Vec::new()
            }
            Err(_) => {
                info!(
                    "Generation capability '{}' timed out after {:?}",
                    source.name(),
                    self.timeout
                );
                Vec::new()
            }
        }
    }
}

/// Deterministic picks from the fallback bank, in tech stack order.
pub struct RuleBasedStrategy {
    per_tech: usize,
    max_total: usize,
}

impl Default for RuleBasedStrategy {
    fn default() -> Self {
        Self {
            per_tech: PER_TECH_LIMIT,
            max_total: MAX_QUESTIONS,
        }
    }
}

#[async_trait]
impl QuestionStrategy for RuleBasedStrategy {
    fn tier(&self) -> Tier {
        Tier::RuleBased
    }

    async fn propose(&self, candidate: &CandidateRecord) -> Vec<String> {
        fallback_questions(&candidate.tech_stack, self.per_tech, self.max_total)
    }
}

/// The fixed generic set. Never empty.
pub struct GenericStrategy;

#[async_trait]
impl QuestionStrategy for GenericStrategy {
    fn tier(&self) -> Tier {
        Tier::Generic
    }

    async fn propose(&self, _candidate: &CandidateRecord) -> Vec<String> {
        GENERIC_QUESTIONS.iter().map(|q| q.to_string()).collect()
    }
}

/// Walks the tech stack in order, taking up to `per_tech` questions from each matched
/// bank entry until `max_total` are collected.
pub fn fallback_questions(tech_stack: &[String], per_tech: usize, max_total: usize) -> Vec<String> {
    let mut picked: Vec<String> = Vec::new();
    for token in tech_stack {
        if picked.len() >= max_total {
            break;
        }
        let bank = question_bank::lookup(token);
        picked.extend(bank.iter().take(per_tech).map(|q| q.to_string()));
    }
    picked.truncate(max_total);
    picked
}

// ────────────────────────────────────────────────────────────────────────────
// Generator
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedQuestions {
    pub questions: QuestionSet,
    pub tier: Tier,
}

/// Runs the strategies in order and returns the first non-empty normalized result.
pub struct QuestionGenerator {
    strategies: Vec<Box<dyn QuestionStrategy>>,
}

impl QuestionGenerator {
    /// Standard three-tier generator. `source` is `None` when no provider is configured.
    pub fn new(source: Option<Arc<dyn QuestionSource>>, timeout: Duration) -> Self {
        Self::with_strategies(vec![
            Box::new(TailoredStrategy::new(source, timeout)),
            Box::new(RuleBasedStrategy::default()),
            Box::new(GenericStrategy),
        ])
    }

    pub fn with_strategies(strategies: Vec<Box<dyn QuestionStrategy>>) -> Self {
        Self { strategies }
    }

    pub async fn generate(&self, candidate: &CandidateRecord) -> GeneratedQuestions {
        for strategy in &self.strategies {
            let questions = QuestionSet::normalize(strategy.propose(candidate).await);
            if !questions.is_empty() {
                info!(
                    "Selected {} {} questions for {} technologies",
                    questions.len(),
                    strategy.tier(),
                    candidate.tech_stack.len()
                );
                return GeneratedQuestions {
                    questions,
                    tier: strategy.tier(),
                };
            }
            debug!("Tier {} produced no questions, trying next", strategy.tier());
        }

        GeneratedQuestions {
            questions: QuestionSet::normalize(GENERIC_QUESTIONS),
            tier: Tier::Generic,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
