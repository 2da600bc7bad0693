// Interview question selection.
// Tailored questions come from the LLM capability; the bank and the generic set
// back it up so a candidate always gets something to answer.

pub mod capability;
pub mod generator;
pub mod prompts;
pub mod question_bank;
pub mod question_set;
