use crate::player::Player;

/// A player's chat session, as handed to hooks and commands.
pub trait ChatHandler {
    /// The player behind this session. `None` for the console.
    fn player(&self) -> Option<&Player>;

    fn send_sys_message(&mut self, message: &str);

    /// Marks that an error message was already sent, so the host does not
    /// echo its own result for the command.
    fn set_sent_error_message(&mut self, sent: bool);

    fn has_sent_error_message(&self) -> bool;
}

/// Chat session that records every message. Handy for hosts that forward
/// messages later, and for tests.
#[derive(Debug, Clone, Default)]
pub struct BufferedChat {
    player: Option<Player>,
    messages: Vec<String>,
    sent_error: bool,
}

impl BufferedChat {
    pub fn for_player(player: Player) -> Self {
        Self {
            player: Some(player),
            ..Self::default()
        }
    }

    pub fn console() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn take_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }
}

impl ChatHandler for BufferedChat {
    fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    fn send_sys_message(&mut self, message: &str) {
        self.messages.push(message.to_owned());
    }

    fn set_sent_error_message(&mut self, sent: bool) {
        self.sent_error = sent;
    }

    fn has_sent_error_message(&self) -> bool {
        self.sent_error
    }
}
