// Conversation flow: stages, transcript, the per-session state machine and the
// registry that keeps concurrent sessions apart.

pub mod machine;
pub mod prompts;
pub mod registry;
pub mod stage;
pub mod transcript;
