use crate::game::{Message, Participant, Recipient};
use crate::session::{ChatMessage, SessionManager, Transport};
use dashmap::DashMap;
use futures_util::{select, FutureExt, SinkExt, StreamExt, TryStreamExt};
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;

#[derive(Error, Debug)]
enum WsError {
    #[error("violation of the application-layer protocol")]
    ProtocolError,
    #[error("join a group before chatting")]
    NotJoined,
}

/// A notification on its way to the clients of one group.
#[derive(Clone, Debug)]
pub struct Delivery {
    pub group: String,
    pub recipient: Recipient,
    pub message: Message,
}

/// A connection that has joined a group, with the queue its deliveries are pushed onto.
struct Subscriber {
    participant: Participant,
    outbox: mpsc::UnboundedSender<Delivery>,
}

impl Subscriber {
    /// Table messages, and private messages addressed to this subscriber.
    fn wants(&self, recipient: &Recipient) -> bool {
        match recipient {
            Recipient::Table => true,
            Recipient::Player(id) => *id == self.participant.id,
        }
    }
}

/// Who is connected to each group. The connected clients are the group's roster, and each
/// notification is queued straight onto the connections it is meant for.
#[derive(Default)]
pub struct Presence {
    groups: DashMap<String, Vec<Subscriber>>,
}

impl Presence {
    fn join(&self, group: &str, participant: Participant, outbox: mpsc::UnboundedSender<Delivery>) {
        let mut members = self.groups.entry(group.to_string()).or_default();
        members.retain(|s| !s.outbox.same_channel(&outbox));
        members.push(Subscriber { participant, outbox });
    }

    fn leave(&self, group: &str, outbox: &mpsc::UnboundedSender<Delivery>) {
        if let Some(mut members) = self.groups.get_mut(group) {
            members.retain(|s| !s.outbox.same_channel(outbox));
        }
        self.groups.remove_if(group, |_, members| members.is_empty());
    }

    /// Everyone connected to the group in the order they joined, once each.
    pub fn roster(&self, group: &str) -> Vec<Participant> {
        let mut roster: Vec<Participant> = vec![];
        if let Some(members) = self.groups.get(group) {
            for member in members.iter() {
                if !roster.iter().any(|p| p.id == member.participant.id) {
                    roster.push(member.participant.clone());
                }
            }
        }
        roster
    }
}

impl Transport for Presence {
    fn deliver(&self, group: &str, recipient: &Recipient, message: &Message) {
        let Some(members) = self.groups.get(group) else {
            log::warn!("No clients connected to group {}, dropping a message", group);
            return;
        };
        let mut delivered = false;
        for member in members.iter().filter(|m| m.wants(recipient)) {
            let delivery = Delivery { group: group.to_string(), recipient: recipient.clone(), message: message.clone() };
            delivered |= member.outbox.send(delivery).is_ok();
        }
        if !delivered {
            log::warn!("No connection in group {} could take a message for {:?}", group, recipient);
        }
    }
}

/// The websocket chat gateway.
pub struct Gateway {
    manager: Arc<SessionManager>,
    presence: Arc<Presence>,
}

impl Gateway {
    pub fn new(manager: Arc<SessionManager>, presence: Arc<Presence>) -> Self {
        Self { manager, presence }
    }

    /// Processes a request from the client, returning the reply to send, if any.
    fn process_request(
        &self,
        req: Request,
        joined: &mut Option<Member>,
        outbox: &mpsc::UnboundedSender<Delivery>,
    ) -> Result<Option<Value>, WsError> {
        match req {
            Request::Join { group, participant } => {
                if let Some(old) = joined.take() {
                    self.presence.leave(&old.group, outbox);
                }
                log::info!("{} joined group {}", participant.name, group);
                self.presence.join(&group, participant.clone(), outbox.clone());
                let reply = json!({
                    "type": "joined",
                    "group": group,
                    "id": participant.id
                });
                *joined = Some(Member { group, participant });
                Ok(Some(reply))
            }
            Request::Say { channel, content } => {
                let member = joined.as_ref().ok_or(WsError::NotJoined)?;
                let msg = ChatMessage {
                    group: member.group.clone(),
                    channel,
                    author: member.participant.clone(),
                    content,
                };
                let roster = self.presence.roster(&member.group);
                self.manager.handle_message(&msg, &roster);
                Ok(None)
            }
        }
    }
}

/// The group and identity a connection has joined as.
struct Member {
    group: String,
    participant: Participant,
}

pub async fn accept_connection(stream: TcpStream, gateway: Arc<Gateway>) {
    log::info!("Accepted new connection");

    let Ok(stream) = tokio_tungstenite::accept_async(stream).await else {
        log::error!("Error occured during websocket handshake");
        return;
    };
    let (mut write, read) = stream.split();
    let mut read = read.fuse();
    let (outbox, mut deliveries) = mpsc::unbounded_channel();
    let mut joined: Option<Member> = None;

    loop {
        select! {
            msg = read.try_next() => {
                let msg = match msg {
                    Ok(Some(WsMessage::Text(msg))) => msg,
                    Ok(Some(WsMessage::Close(_))) | Ok(None) | Err(_) => break,
                    Ok(Some(_)) => continue,
                };
                let Ok(msg) = serde_json::from_str::<Value>(&msg) else {
                    log::error!("Invalid JSON received: {}", &msg);
                    break;
                };
                let Ok(req) = parse_request(&msg) else {
                    log::error!("Invalid message received: {}", &msg);
                    break;
                };
                let reply = match gateway.process_request(req, &mut joined, &outbox) {
                    Ok(reply) => reply,
                    Err(err) => Some(json!({
                        "type": "error",
                        "error": err.to_string()
                    })),
                };
                if let Some(reply) = reply {
                    write.send(WsMessage::Text(reply.to_string())).await.ok();
                }
            },
            delivery = deliveries.recv().fuse() => {
                let Some(delivery) = delivery else {
                    break;
                };
                if write.send(WsMessage::Text(format_delivery(&delivery).to_string())).await.is_err() {
                    log::error!("Could not send websockets message");
                    break;
                }
            }
        }
    }

    if let Some(member) = joined {
        gateway.presence.leave(&member.group, &outbox);
    }
}

/// A message sent by a chat client to the server.
#[derive(PartialEq, Eq, Debug)]
enum Request {
    Join { group: String, participant: Participant },
    Say { channel: String, content: String },
}

/// Parses a websockets message from the client.
fn parse_request(req: &Value) -> Result<Request, WsError> {
    let field = |name: &str| {
        req[name]
            .as_str()
            .map(|s| s.to_string())
            .ok_or(WsError::ProtocolError)
    };
    match req["type"].as_str().unwrap_or("") {
        "join" => {
            let id = field("id")?;
            let name = field("name").unwrap_or_else(|_| id.clone());
            Ok(Request::Join { group: field("group")?, participant: Participant::new(id, name) })
        }
        "say" => Ok(Request::Say { channel: field("channel")?, content: field("content")? }),
        _ => Err(WsError::ProtocolError),
    }
}

/// Formats a delivery to be sent over websockets.
fn format_delivery(delivery: &Delivery) -> Value {
    json!({
        "type": "message",
        "group": delivery.group,
        "private": matches!(delivery.recipient, Recipient::Player(_)),
        "message": delivery.message,
        "text": delivery.message.to_text()
    })
}
