//! Conversation State Machine: one candidate's pass through the screening flow.
//!
//! greeting → form → questions → chatting → end
//!
//! Every public method is one external trigger. A trigger that doesn't belong to the
//! current stage is rejected with `AppError::InvalidStage` and changes nothing.
//! Persistence runs exactly once, on the first arrival at `end`; later termination
//! triggers replay the stored outcome without touching the sink.

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::intake::models::{CandidateRecord, IntakeForm};
use crate::intake::validation::validate_intake;
use crate::interview::generator::{QuestionGenerator, Tier};
use crate::interview::question_set::QuestionSet;
use crate::persistence::SessionPersistence;
use crate::session::prompts::{
    is_termination_keyword, ACKNOWLEDGEMENT, CHAT_INTRO, CLOSING_MESSAGE, SYSTEM_PROMPT,
    WELCOME_MESSAGE,
};
use crate::session::registry::SessionId;
use crate::session::stage::Stage;
use crate::session::transcript::{Message, Role, Transcript};

/// Result of the one persistence attempt made when the session ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PersistOutcome {
    Saved { record_id: Uuid },
    Failed { reason: String },
}

/// What the candidate sees once the session is over.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Closing {
    pub message: &'static str,
    pub persistence: PersistOutcome,
}

/// Reply to a chat input.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatTurn {
    Reply(&'static str),
    Ended(Closing),
}

#[derive(Debug)]
pub struct Session {
    id: SessionId,
    stage: Stage,
    candidate: Option<CandidateRecord>,
    questions: Option<QuestionSet>,
    question_tier: Option<Tier>,
    transcript: Transcript,
    persistence: Option<PersistOutcome>,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            stage: Stage::Greeting,
            candidate: None,
            questions: None,
            question_tier: None,
            transcript: Transcript::default(),
            persistence: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[cfg(test)]
    pub fn candidate(&self) -> Option<&CandidateRecord> {
        self.candidate.as_ref()
    }

    pub fn questions(&self) -> Option<&QuestionSet> {
        self.questions.as_ref()
    }

    pub fn question_tier(&self) -> Option<Tier> {
        self.question_tier
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    fn require(&self, stage: Stage, operation: &'static str) -> Result<(), AppError> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(AppError::InvalidStage {
                operation,
                stage: self.stage,
            })
        }
    }

    /// greeting → form. Returns the welcome message.
    pub fn greet(&mut self) -> Result<&'static str, AppError> {
        self.require(Stage::Greeting, "greet")?;
        self.stage = Stage::Form;
        Ok(WELCOME_MESSAGE)
    }

    /// form → questions on a valid submission. On a validation error the stage and the
    /// (absent) candidate record are left as they were.
    pub fn submit_form(&mut self, form: &IntakeForm) -> Result<&CandidateRecord, AppError> {
        self.require(Stage::Form, "submit_form")?;

        let candidate = validate_intake(form)?;
        info!(
            "Session {}: intake accepted ({} technologies)",
            self.id,
            candidate.tech_stack.len()
        );
        self.stage = Stage::Questions;
        Ok(self.candidate.insert(candidate))
    }

    /// questions → chatting. Runs the generator once and seeds the transcript.
    pub async fn prepare_questions(
        &mut self,
        generator: &QuestionGenerator,
    ) -> Result<&QuestionSet, AppError> {
        self.require(Stage::Questions, "prepare_questions")?;
        let candidate = self.candidate.as_ref().ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("questions stage reached without a candidate"))
        })?;

        let generated = generator.generate(candidate).await;
        self.question_tier = Some(generated.tier);
        self.stage = Stage::Chatting;
        if self.transcript.is_empty() {
            self.transcript = Transcript::seeded(SYSTEM_PROMPT, CHAT_INTRO);
        }
        Ok(self.questions.insert(generated.questions))
    }

    /// One chat input. A termination keyword ends the session (persisting it on the first
    /// arrival); anything else is recorded verbatim and acknowledged.
    pub async fn handle_chat(
        &mut self,
        input: &str,
        persistence: &dyn SessionPersistence,
    ) -> Result<ChatTurn, AppError> {
        if is_termination_keyword(input) {
            return self.terminate(persistence).await.map(ChatTurn::Ended);
        }

        self.require(Stage::Chatting, "handle_chat")?;
        self.transcript.push(Message::new(Role::User, input));
        self.transcript
            .push(Message::new(Role::Assistant, ACKNOWLEDGEMENT));
        Ok(ChatTurn::Reply(ACKNOWLEDGEMENT))
    }

    /// chatting → end, or a replay when already at end.
    ///
    /// The sink is called only on the transition itself, and the transition happens after
    /// the save returns: a cancelled save leaves the session in `chatting`, so a later
    /// termination tries again. A failed write is reported in the returned `Closing` but
    /// still ends the session; it is not retried.
    pub async fn terminate(
        &mut self,
        persistence: &dyn SessionPersistence,
    ) -> Result<Closing, AppError> {
        if let Some(outcome) = &self.persistence {
            return Ok(Closing {
                message: CLOSING_MESSAGE,
                persistence: outcome.clone(),
            });
        }
        self.require(Stage::Chatting, "terminate")?;

        let (Some(candidate), Some(questions)) = (&self.candidate, &self.questions) else {
            return Err(AppError::Internal(anyhow::anyhow!(
                "chatting stage reached without candidate or questions"
            )));
        };

        let outcome = match persistence
            .persist(candidate, questions, &self.transcript)
            .await
        {
            Ok(record_id) => PersistOutcome::Saved { record_id },
            Err(e) => {
                warn!("Session {}: could not save submission: {e}", self.id);
                PersistOutcome::Failed {
                    reason: e.user_message(),
                }
            }
        };

        // Stage and outcome change together.
        self.stage = Stage::End;
        self.persistence = Some(outcome.clone());
        info!(
            "Session {} ended ({} transcript entries)",
            self.id,
            self.transcript.len()
        );

        Ok(Closing {
            message: CLOSING_MESSAGE,
            persistence: outcome,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::generator::GENERIC_QUESTIONS;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct CountingPersistence {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl SessionPersistence for CountingPersistence {
        async fn persist(
            &self,
            _candidate: &CandidateRecord,
            _questions: &QuestionSet,
            _transcript: &Transcript,
        ) -> Result<Uuid, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(std::io::Error::other("disk full").into())
            } else {
                Ok(Uuid::new_v4())
            }
        }
    }

    fn form() -> IntakeForm {
        IntakeForm {
            full_name: "Katherine Johnson".to_string(),
            email: "kj@example.com".to_string(),
            phone: "757-555-0123".to_string(),
            years_experience: 10.0,
            desired_position: "Data Engineer".to_string(),
            location: "Hampton".to_string(),
            tech_stack: "Python, Docker".to_string(),
        }
    }

    fn offline_generator() -> QuestionGenerator {
        QuestionGenerator::new(None, Duration::from_secs(1))
    }

    async fn chatting_session() -> Session {
        let mut session = Session::new(Uuid::new_v4());
        session.greet().unwrap();
        session.submit_form(&form()).unwrap();
        session.prepare_questions(&offline_generator()).await.unwrap();
        session
    }

    #[test]
    fn test_new_session_starts_at_greeting() {
        let session = Session::new(Uuid::new_v4());
        assert_eq!(session.stage(), Stage::Greeting);
        assert!(session.candidate().is_none());
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn test_greeting_moves_to_form_once() {
        let mut session = Session::new(Uuid::new_v4());
        assert_eq!(session.greet().unwrap(), WELCOME_MESSAGE);
        assert_eq!(session.stage(), Stage::Form);
        assert!(matches!(
            session.greet(),
            Err(AppError::InvalidStage { stage: Stage::Form, .. })
        ));
    }

    #[test]
    fn test_form_before_greeting_is_rejected() {
        let mut session = Session::new(Uuid::new_v4());
        assert!(session.submit_form(&form()).is_err());
        assert_eq!(session.stage(), Stage::Greeting);
    }

    #[test]
    fn test_empty_required_field_keeps_stage_at_form() {
        let mut session = Session::new(Uuid::new_v4());
        session.greet().unwrap();

        let bad = IntakeForm {
            full_name: String::new(),
            ..form()
        };
        assert!(matches!(
            session.submit_form(&bad),
            Err(AppError::Validation(_))
        ));
        assert_eq!(session.stage(), Stage::Form);
        assert!(session.candidate().is_none());

        let whitespace = IntakeForm {
            location: "   ".to_string(),
            ..form()
        };
        assert!(session.submit_form(&whitespace).is_err());
        assert_eq!(session.stage(), Stage::Form);
    }

    #[test]
    fn test_valid_form_freezes_candidate() {
        let mut session = Session::new(Uuid::new_v4());
        session.greet().unwrap();
        let candidate = session.submit_form(&form()).unwrap();
        assert_eq!(candidate.tech_stack, vec!["Python", "Docker"]);
        assert_eq!(session.stage(), Stage::Questions);

        // No second submission once past the form.
        let other = IntakeForm {
            full_name: "Someone Else".to_string(),
            ..form()
        };
        assert!(session.submit_form(&other).is_err());
        assert_eq!(session.candidate().unwrap().full_name, "Katherine Johnson");
    }

    #[tokio::test]
    async fn test_questions_stage_generates_and_seeds_transcript() {
        let session = chatting_session().await;

        assert_eq!(session.stage(), Stage::Chatting);
        assert_eq!(session.question_tier(), Some(Tier::RuleBased));
        assert_eq!(session.questions().unwrap().len(), 4);

        let transcript = session.transcript().as_slice();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0], Message::new(Role::System, SYSTEM_PROMPT));
        assert_eq!(transcript[1], Message::new(Role::Assistant, CHAT_INTRO));
    }

    #[tokio::test]
    async fn test_questions_generated_only_once() {
        let mut session = chatting_session().await;
        assert!(session.prepare_questions(&offline_generator()).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_split_stack_gets_generic_questions() {
        let mut session = Session::new(Uuid::new_v4());
        session.greet().unwrap();
        session
            .submit_form(&IntakeForm {
                tech_stack: ", ,".to_string(),
                ..form()
            })
            .unwrap();
        let questions = session.prepare_questions(&offline_generator()).await.unwrap();
        assert_eq!(questions.as_slice(), GENERIC_QUESTIONS);
    }

    #[tokio::test]
    async fn test_chat_input_is_recorded_and_acknowledged() {
        let mut session = chatting_session().await;
        let persistence = CountingPersistence::default();

        let turn = session
            .handle_chat("  Lists are mutable, tuples are not. ", &persistence)
            .await
            .unwrap();

        assert_eq!(turn, ChatTurn::Reply(ACKNOWLEDGEMENT));
        assert_eq!(session.stage(), Stage::Chatting);
        let transcript = session.transcript().as_slice();
        assert_eq!(transcript.len(), 4);
        assert_eq!(
            transcript[2],
            Message::new(Role::User, "  Lists are mutable, tuples are not. ")
        );
        assert_eq!(transcript[3].role, Role::Assistant);
        assert_eq!(persistence.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_mixed_case_quit_ends_session() {
        let mut session = chatting_session().await;
        let persistence = CountingPersistence::default();

        let turn = session.handle_chat("Quit", &persistence).await.unwrap();

        assert!(matches!(
            turn,
            ChatTurn::Ended(Closing {
                persistence: PersistOutcome::Saved { .. },
                ..
            })
        ));
        assert_eq!(session.stage(), Stage::End);
        assert_eq!(persistence.calls.load(Ordering::SeqCst), 1);
        // The keyword itself is not part of the transcript.
        assert_eq!(session.transcript().len(), 2);
    }

    #[tokio::test]
    async fn test_terminating_twice_persists_once() {
        let mut session = chatting_session().await;
        let persistence = CountingPersistence::default();

        let first = session.terminate(&persistence).await.unwrap();
        let second = session.terminate(&persistence).await.unwrap();
        let third = session.handle_chat("bye", &persistence).await.unwrap();

        assert_eq!(persistence.calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
        assert_eq!(third, ChatTurn::Ended(first));
    }

    #[tokio::test]
    async fn test_persistence_failure_still_reaches_end() {
        let mut session = chatting_session().await;
        let persistence = CountingPersistence {
            fail: true,
            ..Default::default()
        };

        let closing = session.terminate(&persistence).await.unwrap();
        assert!(matches!(closing.persistence, PersistOutcome::Failed { .. }));
        assert_eq!(closing.message, CLOSING_MESSAGE);
        assert_eq!(session.stage(), Stage::End);

        // Not retried on re-entry.
        session.terminate(&persistence).await.unwrap();
        assert_eq!(persistence.calls.load(Ordering::SeqCst), 1);
    }

    struct StalledPersistence;

    #[async_trait]
    impl SessionPersistence for StalledPersistence {
        async fn persist(
            &self,
            _candidate: &CandidateRecord,
            _questions: &QuestionSet,
            _transcript: &Transcript,
        ) -> Result<Uuid, AppError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Uuid::new_v4())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_save_leaves_session_able_to_end() {
        let mut session = chatting_session().await;

        let cancelled = tokio::time::timeout(
            Duration::from_secs(1),
            session.terminate(&StalledPersistence),
        )
        .await;
        assert!(cancelled.is_err());
        assert_eq!(session.stage(), Stage::Chatting);

        let persistence = CountingPersistence::default();
        let closing = session.terminate(&persistence).await.unwrap();
        assert!(matches!(closing.persistence, PersistOutcome::Saved { .. }));
        assert_eq!(session.stage(), Stage::End);
        assert_eq!(persistence.calls.load(Ordering::SeqCst), 1);

        let replay = session.handle_chat("end", &persistence).await.unwrap();
        assert_eq!(replay, ChatTurn::Ended(closing));
        assert_eq!(persistence.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_chat_after_end_is_rejected() {
        let mut session = chatting_session().await;
        let persistence = CountingPersistence::default();
        session.terminate(&persistence).await.unwrap();

        let result = session.handle_chat("one more thing", &persistence).await;
        assert!(matches!(
            result,
            Err(AppError::InvalidStage { stage: Stage::End, .. })
        ));
        assert_eq!(session.transcript().len(), 2);
    }

    #[tokio::test]
    async fn test_termination_before_chatting_is_rejected() {
        let mut session = Session::new(Uuid::new_v4());
        session.greet().unwrap();
        let persistence = CountingPersistence::default();

        assert!(session.handle_chat("exit", &persistence).await.is_err());
        assert_eq!(session.stage(), Stage::Form);
        assert_eq!(persistence.calls.load(Ordering::SeqCst), 0);
    }
}
