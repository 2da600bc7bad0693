//! Console driver: walks one candidate through a session over stdin/stdout.
//!
//! This is presentation only: every decision is made by `session::machine::Session`.
//! The driver is generic over its reader and writer so whole conversations can be
//! replayed in tests.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::intake::models::{IntakeField, IntakeForm};
use crate::session::machine::{ChatTurn, Closing, PersistOutcome, Session};
use crate::session::prompts::QUESTIONS_READY_MESSAGE;
use crate::state::AppState;

const APP_TITLE: &str = "TalentScout - Hiring Assistant";
const END_HINT: &str =
    "Type 'end', 'quit', 'exit', 'stop', or 'bye' at any time to finish the conversation.";

/// How a console run finished.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Consent was not given; no session was opened.
    Declined,
    /// Input ran out before the session ended. Nothing was persisted.
    Abandoned,
    Completed(Closing),
}

pub struct Console<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, out: W) -> Self {
        Self {
            lines: reader.lines(),
            out,
        }
    }

    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.out
    }

    pub async fn run(&mut self, state: &AppState) -> Result<RunOutcome, AppError> {
        self.say(APP_TITLE).await?;
        self.say(END_HINT).await?;

        if !self.ask_consent(state).await? {
            self.say("Please provide consent to proceed.").await?;
            return Ok(RunOutcome::Declined);
        }

        let id = state.sessions.open().await;
        let outcome = match state.sessions.get(id).await {
            Some(handle) => {
                let mut session = handle.lock().await;
                self.drive(&mut session, state).await
            }
            None => Err(AppError::SessionNotFound(id)),
        };
        state.sessions.close(id).await;
        debug!("{} sessions still open", state.sessions.len().await);

        if let Ok(RunOutcome::Abandoned) = &outcome {
            info!("Session {id} abandoned before completion");
        }
        outcome
    }

    async fn drive(
        &mut self,
        session: &mut Session,
        state: &AppState,
    ) -> Result<RunOutcome, AppError> {
        let welcome = session.greet()?;
        self.say(welcome).await?;

        // form
        loop {
            let Some(form) = self.read_form().await? else {
                return Ok(RunOutcome::Abandoned);
            };
            match session.submit_form(&form) {
                Ok(_) => break,
                Err(AppError::Validation(e)) => self.say(&format!("! {e}")).await?,
                Err(e) => return Err(e),
            }
        }

        // questions
        let questions = session.prepare_questions(&state.generator).await?;
        let mut listing = format!("{QUESTIONS_READY_MESSAGE}\n");
        for (i, q) in questions.iter().enumerate() {
            listing.push_str(&format!("Q{}. {q}\n", i + 1));
        }
        self.say(listing.trim_end()).await?;
        if let (Some(questions), Some(tier)) = (session.questions(), session.question_tier()) {
            info!(
                "Session {}: asking {} {tier} questions",
                session.id(),
                questions.len()
            );
        }

        // chatting
        self.say("\nYour Answers").await?;
        let intro: Vec<String> = session
            .transcript()
            .visible()
            .map(|m| format!("[{}] {}", m.role.label(), m.content))
            .collect();
        for line in intro {
            self.say(&line).await?;
        }

        loop {
            let Some(input) = self.read_line("> ").await? else {
                return Ok(RunOutcome::Abandoned);
            };
            if input.trim().is_empty() {
                continue;
            }
            match session
                .handle_chat(&input, state.persistence.as_ref())
                .await?
            {
                ChatTurn::Reply(reply) => self.say(&format!("[assistant] {reply}")).await?,
                ChatTurn::Ended(closing) => {
                    self.show_closing(&closing).await?;
                    debug_assert!(session.stage().is_terminal());
                    return Ok(RunOutcome::Completed(closing));
                }
            }
        }
    }

    async fn ask_consent(&mut self, state: &AppState) -> Result<bool, AppError> {
        let third_party = if state.config.anthropic_api_key.is_some() {
            "Your tech stack, experience and desired role are sent to the configured LLM \
             provider to tailor questions."
        } else {
            "No data is sent to third parties."
        };
        self.say(&format!(
            "\nPrivacy & Consent\n\
             This assistant stores minimal data locally ({}). \
             Email and phone are hashed with SHA-256 and a random salt before storage. \
             {third_party}",
            state.config.records_path.display()
        ))
        .await?;

        let answer = self
            .read_line("I understand and consent to this data handling (yes/no): ")
            .await?;
        Ok(matches!(
            answer.map(|a| a.trim().to_lowercase()).as_deref(),
            Some("yes") | Some("y")
        ))
    }

    /// Asks every intake field. `None` when input ends mid-form.
    async fn read_form(&mut self) -> Result<Option<IntakeForm>, AppError> {
        let mut form = IntakeForm::default();
        for field in IntakeField::ALL {
            let prompt = format!("{} *: ", field.label());
            if field == IntakeField::YearsExperience {
                let Some(years) = self.read_years(&prompt).await? else {
                    return Ok(None);
                };
                form.years_experience = years;
                continue;
            }

            let Some(value) = self.read_line(&prompt).await? else {
                return Ok(None);
            };
            match field {
                IntakeField::FullName => form.full_name = value,
                IntakeField::Email => form.email = value,
                IntakeField::Phone => form.phone = value,
                IntakeField::DesiredPosition => form.desired_position = value,
                IntakeField::Location => form.location = value,
                IntakeField::TechStack => form.tech_stack = value,
                IntakeField::YearsExperience => {}
            }
        }
        Ok(Some(form))
    }

    async fn read_years(&mut self, prompt: &str) -> Result<Option<f64>, AppError> {
        loop {
            let Some(raw) = self.read_line(prompt).await? else {
                return Ok(None);
            };
            match raw.trim().parse::<f64>() {
                Ok(years) => return Ok(Some(years)),
                Err(_) => self.say("! Please enter a number, e.g. 3 or 4.5").await?,
            }
        }
    }

    async fn show_closing(&mut self, closing: &Closing) -> Result<(), AppError> {
        self.say(closing.message).await?;
        match &closing.persistence {
            PersistOutcome::Saved { .. } => {
                self.say("Your submission has been saved (hashed identifiers).")
                    .await
            }
            PersistOutcome::Failed { reason } => {
                self.say(&format!("! Could not save your submission: {reason}"))
                    .await
            }
        }
    }

    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>, AppError> {
        self.out.write_all(prompt.as_bytes()).await?;
        self.out.flush().await?;
        Ok(self.lines.next_line().await?)
    }

    async fn say(&mut self, text: &str) -> Result<(), AppError> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await?;
        Ok(())
    }
}
