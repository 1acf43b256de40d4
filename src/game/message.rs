use super::membership::{Party, Role};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const LIBERAL_COLOR: u32 = 0x2e86c1;
pub const FASCIST_COLOR: u32 = 0xc0392b;
pub const NEUTRAL_COLOR: u32 = 0x7f8c8d;

/// Who a notification is addressed to.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(tag = "type", content = "id")]
pub enum Recipient {
    /// A single player, privately.
    Player(String),
    /// Everyone following the match.
    Table,
}

/// A rich message: a title, a colour bar and a list of header/value lines.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct Embed {
    pub title: String,
    pub color: u32,
    pub lines: Vec<(String, String)>,
    pub image: Option<String>,
}

impl Embed {
    pub fn new(title: impl Into<String>, color: u32) -> Self {
        Self { title: title.into(), color, lines: vec![], image: None }
    }

    pub fn line(mut self, header: impl Into<String>, value: impl Into<String>) -> Self {
        self.lines.push((header.into(), value.into()));
        self
    }

    pub fn image(mut self, url: Option<String>) -> Self {
        self.image = url;
        self
    }
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(tag = "type", content = "body")]
pub enum Message {
    Text(String),
    Embed(Embed),
}

impl Message {
    /// Plain text rendering, used by transports without rich message support.
    pub fn to_text(&self) -> String {
        match self {
            Message::Text(text) => text.clone(),
            Message::Embed(embed) => {
                let mut text = format!("**{}**", embed.title);
                for (header, value) in &embed.lines {
                    text.push_str(&format!("\n{}: {}", header, value));
                }
                text
            }
        }
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Text(text)
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::Text(text.to_string())
    }
}

impl From<Embed> for Message {
    fn from(embed: Embed) -> Self {
        Message::Embed(embed)
    }
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct Notification {
    pub recipient: Recipient,
    pub message: Message,
}

/// Delivers messages to players or to the table. Fire-and-forget.
pub trait MessageSink: Send + Sync {
    fn deliver(&self, recipient: &Recipient, message: &Message);
}

/// Looks up decorative imagery. Never consulted for game logic.
pub trait AssetResolver: Send + Sync {
    fn board_image(&self, num_players: usize, party: Party, cards: usize) -> Option<String>;
    fn role_image(&self, role: Role) -> Option<String>;
}

/// Queues notifications until a sink is attached, then delivers in order.
#[derive(Default)]
pub struct Outbox {
    sink: Option<Arc<dyn MessageSink>>,
    pending: Vec<Notification>,
}

impl Outbox {
    /// Attaches a sink, flushing anything queued while none was available.
    pub fn attach(&mut self, sink: Arc<dyn MessageSink>) {
        for Notification { recipient, message } in self.pending.drain(..) {
            sink.deliver(&recipient, &message);
        }
        self.sink = Some(sink);
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    pub fn send(&mut self, recipient: Recipient, message: impl Into<Message>) {
        let message = message.into();
        match &self.sink {
            Some(sink) => sink.deliver(&recipient, &message),
            None => self.pending.push(Notification { recipient, message }),
        }
    }
}

#[cfg(test)]
impl Outbox {
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl std::fmt::Debug for Outbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Outbox")
            .field("attached", &self.sink.is_some())
            .field("pending", &self.pending.len())
            .finish()
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use std::sync::Mutex;

    /// Sink that records everything delivered to it.
    #[derive(Default)]
    pub struct RecordingSink {
        pub delivered: Mutex<Vec<Notification>>,
    }

    impl RecordingSink {
        pub fn to(&self, recipient: &Recipient) -> Vec<String> {
            self.delivered
                .lock()
                .unwrap()
                .iter()
                .filter(|n| &n.recipient == recipient)
                .map(|n| n.message.to_text())
                .collect()
        }

        pub fn clear(&self) {
            self.delivered.lock().unwrap().clear();
        }
    }

    impl MessageSink for RecordingSink {
        fn deliver(&self, recipient: &Recipient, message: &Message) {
            self.delivered.lock().unwrap().push(Notification {
                recipient: recipient.clone(),
                message: message.clone(),
            });
        }
    }

    #[test]
    fn outbox_defers_until_attached() {
        let mut outbox = Outbox::default();
        outbox.send(Recipient::Table, "first");
        outbox.send(Recipient::Player("1".into()), "second");
        assert_eq!(outbox.pending(), 2);

        let sink = Arc::new(RecordingSink::default());
        outbox.attach(sink.clone());
        outbox.send(Recipient::Table, "third");

        assert_eq!(outbox.pending(), 0);
        assert_eq!(sink.to(&Recipient::Table), vec!["first", "third"]);
        assert_eq!(sink.to(&Recipient::Player("1".into())), vec!["second"]);
    }

    #[test]
    fn embed_text_rendering() {
        let embed = Embed::new("Board", NEUTRAL_COLOR).line("Fascist", "2").line("Liberal", "1");
        assert_eq!(Message::from(embed).to_text(), "**Board**\nFascist: 2\nLiberal: 1");
    }
}
