use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Assistant,
    User,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::Assistant => "assistant",
            Role::User => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Append-only chat history. Entries are never edited or reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript(Vec<Message>);

impl Transcript {
    /// Starts a transcript with the hidden system instruction and an opening message.
    pub fn seeded(system: &str, intro: &str) -> Self {
        Self(vec![
            Message::new(Role::System, system),
            Message::new(Role::Assistant, intro),
        ])
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.0.push(message);
    }

    /// Entries the candidate may see. The system instruction is excluded.
    pub fn visible(&self) -> impl Iterator<Item = &Message> {
        self.0.iter().filter(|m| m.role != Role::System)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn as_slice(&self) -> &[Message] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_starts_with_system_entry() {
        let t = Transcript::seeded("rules", "hello");
        assert_eq!(t.as_slice()[0].role, Role::System);
        assert_eq!(t.as_slice()[1], Message::new(Role::Assistant, "hello"));
    }

    #[test]
    fn test_visible_hides_system_entry() {
        let mut t = Transcript::seeded("rules", "hello");
        t.push(Message::new(Role::User, "my answer"));
        let visible: Vec<_> = t.visible().map(|m| m.content.as_str()).collect();
        assert_eq!(visible, ["hello", "my answer"]);
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn test_roles_serialize_lowercase() {
        let json = serde_json::to_string(&Message::new(Role::Assistant, "hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }
}
