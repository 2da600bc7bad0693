use std::fmt;

use serde::{Deserialize, Serialize};

/// Conversation stages. The flow only ever moves forward, one step per trigger:
/// greeting → form → questions → chatting → end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Greeting,
    Form,
    Questions,
    Chatting,
    End,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Greeting => "greeting",
            Stage::Form => "form",
            Stage::Questions => "questions",
            Stage::Chatting => "chatting",
            Stage::End => "end",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::End)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
