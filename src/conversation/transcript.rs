use std::fmt;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message of the conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    role: Role,
    text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }

    pub const fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ordered history of turns for one session.
///
/// Only [`super::ChatSession`] mutates it: appends during normal operation,
/// a full clear on reset.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Number of user turns answered by the assistant.
    pub fn exchanges(&self) -> usize {
        self.turns
            .windows(2)
            .filter(|pair| pair[0].role == Role::User && pair[1].role == Role::Assistant)
            .count()
    }

    pub(super) fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub(super) fn clear(&mut self) {
        self.turns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_constructors() {
        let turn = Turn::user("hi");
        assert_eq!(turn.role(), Role::User);
        assert_eq!(turn.text(), "hi");

        let turn = Turn::assistant("hello");
        assert_eq!(turn.role(), Role::Assistant);
        assert_eq!(turn.text(), "hello");
    }

    #[test]
    fn test_transcript_preserves_order() {
        let mut transcript = Transcript::default();
        transcript.push(Turn::user("one"));
        transcript.push(Turn::assistant("two"));
        transcript.push(Turn::user("three"));

        let texts: Vec<_> = transcript.turns().iter().map(Turn::text).collect();
        assert_eq!(texts, ["one", "two", "three"]);
        assert_eq!(transcript.last().map(Turn::role), Some(Role::User));
    }

    #[test]
    fn test_exchanges_ignores_dangling_user_turns() {
        let mut transcript = Transcript::default();
        transcript.push(Turn::user("failed send"));
        transcript.push(Turn::user("ping"));
        transcript.push(Turn::assistant("pong"));
        transcript.push(Turn::user("another failure"));

        assert_eq!(transcript.len(), 4);
        assert_eq!(transcript.exchanges(), 1);
    }

    #[test]
    fn test_clear() {
        let mut transcript = Transcript::default();
        transcript.push(Turn::user("hi"));
        transcript.clear();
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }
}
