use crate::command::{self, AdminCommand, Command, GameCommand, Parsed};
use crate::config::Config;
use crate::error::{GameError, SettingsError};
use crate::game::{AssetResolver, Game, Message, MessageSink, Participant, Recipient, RosterResolver};
use crate::settings::{GroupSettings, SettingsStore};
use dashmap::DashMap;
use rand::RngCore;
use std::sync::{Arc, Mutex};

/// Carries notifications out of the process, for any group.
pub trait Transport: Send + Sync {
    fn deliver(&self, group: &str, recipient: &Recipient, message: &Message);
}

/// A line of chat received from a group.
#[derive(Clone, Debug)]
pub struct ChatMessage {
    pub group: String,
    pub channel: String,
    pub author: Participant,
    pub content: String,
}

pub type GameHandle = Arc<Mutex<Game>>;

/// Routes chat commands to the match of the group they came from. One match per group.
pub struct SessionManager {
    games: DashMap<String, GameHandle>,
    settings: SettingsStore,
    config: Config,
    transport: Arc<dyn Transport>,
    assets: Option<Arc<dyn AssetResolver>>,
}

/// The messaging sink handed to a group's match.
struct GroupSink {
    group: String,
    transport: Arc<dyn Transport>,
}

impl MessageSink for GroupSink {
    fn deliver(&self, recipient: &Recipient, message: &Message) {
        self.transport.deliver(&self.group, recipient, message);
    }
}

impl SessionManager {
    pub fn new(config: Config, db: &sled::Db, transport: Arc<dyn Transport>) -> Result<Self, SettingsError> {
        let defaults = GroupSettings {
            prefix: config.default_prefix.clone(),
            channel: config.default_channel.clone(),
            visuals: true,
        };
        let settings = SettingsStore::open(db, defaults)?;
        let assets = config.assets().map(|a| Arc::new(a) as Arc<dyn AssetResolver>);
        Ok(Self { games: DashMap::new(), settings, config, transport, assets })
    }

    /// Number of groups that have a match, running or not.
    pub fn num_games(&self) -> usize {
        self.games.len()
    }

    /// Number of matches currently in play.
    pub fn num_running(&self) -> usize {
        self.games
            .iter()
            .filter(|game| game.lock().map(|g| g.is_running()).unwrap_or(false))
            .count()
    }

    /// Handles one line of chat. `roster` resolves the players of the author's group.
    pub fn handle_message(&self, msg: &ChatMessage, roster: &dyn RosterResolver) {
        let settings = self.settings.get(&msg.group);
        let (command, args) = match command::parse(&msg.content, &settings.prefix, &self.config.fallback_prefix) {
            Parsed::Ignored => return,
            Parsed::Unknown(word) => {
                self.reply(
                    msg,
                    format!("Unknown command {}{}. Use {}help to see available commands", settings.prefix, word, settings.prefix),
                );
                return;
            }
            Parsed::Command { command, args } => (command, args),
        };

        match command {
            Command::Admin(command) => self.run_admin(msg, &settings, command, args),
            Command::Game(command) => {
                if msg.channel != settings.channel {
                    log::debug!("Ignoring {:?} outside #{} in group {}", command, settings.channel, msg.group);
                    return;
                }
                self.run_game(msg, &settings, command, args, roster);
            }
        }
    }

    fn run_game(
        &self,
        msg: &ChatMessage,
        settings: &GroupSettings,
        command: GameCommand,
        args: &str,
        roster: &dyn RosterResolver,
    ) {
        let handle = self.game_for(&msg.group);
        let Ok(mut game) = handle.lock() else {
            log::error!("Found poisoned game for group {}", msg.group);
            self.games.remove(&msg.group);
            return;
        };
        game.set_assets(if settings.visuals { self.assets.clone() } else { None });

        if let Err(err) = dispatch(&mut game, command, &msg.author.id, args, roster) {
            log::warn!("Rejected {:?} from {}: {}", command, msg.author.name, err);
            drop(game);
            self.reply(msg, capitalize(&err.to_string()));
        }
    }

    fn run_admin(&self, msg: &ChatMessage, settings: &GroupSettings, command: AdminCommand, args: &str) {
        let result = match command {
            AdminCommand::SetPrefix => {
                let Some(prefix) = args.split_whitespace().next() else {
                    self.reply(msg, "You must provide a character(s) when setting the command prefix");
                    return;
                };
                self.settings
                    .update(&msg.group, |s| s.prefix = prefix.to_string())
                    .map(|s| format!("Command prefix now set to '{}'", s.prefix))
            }
            AdminCommand::SetChannel => {
                let channel = args.trim().trim_start_matches('#');
                if channel.is_empty() {
                    self.reply(msg, "You must provide a channel name when setting the game text channel");
                    return;
                }
                self.settings
                    .update(&msg.group, |s| s.channel = channel.to_string())
                    .map(|s| format!("Game command channel set to #{}", s.channel))
            }
            AdminCommand::SetVisuals => {
                let visuals = match args.trim().to_ascii_lowercase().as_str() {
                    "on" | "true" | "yes" => true,
                    "off" | "false" | "no" => false,
                    _ => {
                        self.reply(msg, format!("Usage: {}setvisuals <on|off>", settings.prefix));
                        return;
                    }
                };
                self.settings
                    .update(&msg.group, |s| s.visuals = visuals)
                    .map(|s| format!("Images are now {}", if s.visuals { "on" } else { "off" }))
            }
            AdminCommand::Settings => Ok(format!(
                "The current configuration is:\nprefix: {}\nchannel: #{}\nvisuals: {}",
                settings.prefix,
                settings.channel,
                if settings.visuals { "on" } else { "off" }
            )),
            AdminCommand::ResetConfig => self.settings.reset(&msg.group).map(|s| {
                format!(
                    "The configuration settings have been reset. Use {}settings to view the current settings.",
                    s.prefix
                )
            }),
            AdminCommand::Help => Ok(command::help_text(&settings.prefix, &self.config.fallback_prefix)),
        };

        match result {
            Ok(text) => self.reply(msg, text),
            Err(err) => {
                log::error!("Could not update settings for group {}: {}", msg.group, err);
                self.reply(msg, "The settings could not be saved. Try again later.");
            }
        }
    }

    /// Gets the group's match, creating an idle one connected to the transport if needed.
    fn game_for(&self, group: &str) -> GameHandle {
        self.games
            .entry(group.to_string())
            .or_insert_with(|| {
                log::info!("Creating a game for group {}", group);
                let mut game = Game::new(self.config.game_options, rand::thread_rng().next_u64());
                game.attach_transport(Arc::new(GroupSink {
                    group: group.to_string(),
                    transport: self.transport.clone(),
                }));
                Arc::new(Mutex::new(game))
            })
            .clone()
    }

    /// Replies to the author in front of the group.
    fn reply(&self, msg: &ChatMessage, text: impl Into<String>) {
        let message = Message::Text(format!("{}, {}", msg.author.name, text.into()));
        self.transport.deliver(&msg.group, &Recipient::Table, &message);
    }
}

/// Runs a game command against the match.
fn dispatch(
    game: &mut Game,
    command: GameCommand,
    actor: &str,
    args: &str,
    roster: &dyn RosterResolver,
) -> Result<(), GameError> {
    match command {
        GameCommand::Start => game.start_game(args, roster),
        GameCommand::Nominate => game.nominate_chancellor(actor, args),
        GameCommand::Vote => game.vote_on_nomination(actor, args),
        GameCommand::Draw => game.draw_policies(actor),
        GameCommand::Discard => game.discard_policy(actor, args),
        GameCommand::Veto => game.veto_policies(actor),
        GameCommand::Consent => game.consent_veto_request(actor, args),
        GameCommand::Elect => game.specially_elect_president(actor, args),
        GameCommand::Investigate => game.investigate_player(actor, args),
        GameCommand::Shoot => game.shoot_player(actor, args),
        GameCommand::Info => game.show_info(actor),
        GameCommand::End => game.end_game(actor, args),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
