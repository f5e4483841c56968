use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

/// Per-chat conversation mode. Only the free-text handler consults this;
/// commands and callbacks stay active regardless.
///
/// Ephemeral by design: the add-user flow does not survive a restart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConversationState {
    #[default]
    Idle,
    /// The next free-text message is interpreted as an add-user identifier.
    AwaitingUserIdentifier,
}

pub type ConversationDialogue = Dialogue<ConversationState, InMemStorage<ConversationState>>;
