// Fixed conversation text for the session flow.

/// First transcript entry. Kept in the record, never shown to the candidate.
pub const SYSTEM_PROMPT: &str = "\
You are TalentScout, a friendly but professional hiring assistant for a tech recruitment agency.
Your goals:
1) Set expectations and be concise.
2) Keep the conversation on hiring topics only.
3) Encourage clear, structured answers.
4) If user asks unrelated things, politely redirect to the interview.
5) If the user types end/quit/exit/stop/bye, end gracefully.

Safety & Privacy:
- Never request government IDs, bank data, or passwords.
- Don't store or display full phone/email back to user; acknowledge receipt only.
- Keep tone neutral, inclusive, and respectful.";

pub const WELCOME_MESSAGE: &str = "Hello! I'm the TalentScout Hiring Assistant. \
I'll gather a few details and ask tailored technical questions based on your tech stack.";

pub const QUESTIONS_READY_MESSAGE: &str =
    "I’ve prepared a few questions to gauge your proficiency.";

pub const CHAT_INTRO: &str =
    "Let's begin. Please answer Q1. You can type 'end' to finish anytime.";

pub const ACKNOWLEDGEMENT: &str =
    "Thanks! Noted. When ready, continue with the next question or type 'end' to finish.";

pub const CLOSING_MESSAGE: &str =
    "Thanks for your time! We'll review your responses and get back to you with next steps.";

/// Inputs that end the chat, compared after trimming and lowercasing.
pub const TERMINATION_KEYWORDS: [&str; 5] = ["end", "quit", "exit", "stop", "bye"];

pub fn is_termination_keyword(input: &str) -> bool {
    let normalized = input.trim().to_lowercase();
    TERMINATION_KEYWORDS.contains(&normalized.as_str())
}
