use crate::error::ConfigError;
use crate::game::{AssetResolver, GameOptions, Party, Role, VoteQuorum};
use std::str::FromStr;

/// Process configuration, read from the environment (and a `.env` file, if present).
#[derive(Clone, Debug)]
pub struct Config {
    /// Port for the websocket chat gateway.
    pub port: u16,
    /// Port for the HTTP status endpoint. Not served when unset.
    pub status_port: Option<u16>,
    pub db_path: String,
    pub default_prefix: String,
    /// Always accepted as a command prefix, whatever a group has configured.
    pub fallback_prefix: String,
    /// Channel in which game commands are accepted until a group binds another.
    pub default_channel: String,
    pub asset_base_url: Option<String>,
    pub game_options: GameOptions,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        let port = parse(var("PORT").ok_or(ConfigError::Missing("PORT"))?, "PORT")?;
        let status_port = var("STATUS_PORT").map(|s| parse(s, "STATUS_PORT")).transpose()?;

        let defaults = GameOptions::default();
        let vote_quorum = match var("VOTE_QUORUM").map(|s| s.to_ascii_lowercase()).as_deref() {
            None | Some("seated") => VoteQuorum::Seated,
            Some("living") => VoteQuorum::Living,
            Some(other) => return Err(ConfigError::Invalid("VOTE_QUORUM", other.to_string())),
        };
        let hitler_knows_threshold = var("HITLER_KNOWS_THRESHOLD")
            .map(|s| parse(s, "HITLER_KNOWS_THRESHOLD"))
            .transpose()?
            .unwrap_or(defaults.hitler_knows_threshold);
        let veto_requires_unlock = var("VETO_REQUIRES_UNLOCK")
            .map(|s| parse(s, "VETO_REQUIRES_UNLOCK"))
            .transpose()?
            .unwrap_or(defaults.veto_requires_unlock);

        Ok(Self {
            port,
            status_port,
            db_path: var("DB_PATH").unwrap_or_else(|| "settings.db".to_string()),
            default_prefix: var("DEFAULT_PREFIX").unwrap_or_else(|| "!".to_string()),
            fallback_prefix: var("FALLBACK_PREFIX").unwrap_or_else(|| "sh!".to_string()),
            default_channel: var("DEFAULT_CHANNEL").unwrap_or_else(|| "secret-hitler".to_string()),
            asset_base_url: var("ASSET_BASE_URL").map(|s| s.trim_end_matches('/').to_string()),
            game_options: GameOptions { hitler_knows_threshold, vote_quorum, veto_requires_unlock },
        })
    }

    /// Image lookup for board and role art, if a base URL is configured.
    pub fn assets(&self) -> Option<StaticAssets> {
        self.asset_base_url.clone().map(|base_url| StaticAssets { base_url })
    }
}

fn parse<T: FromStr>(value: String, key: &'static str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid(key, value))
}

/// Board and role images served from a static file host.
#[derive(Clone, Debug)]
pub struct StaticAssets {
    base_url: String,
}

impl AssetResolver for StaticAssets {
    fn board_image(&self, num_players: usize, party: Party, cards: usize) -> Option<String> {
        match party {
            Party::Liberal => Some(format!("{}/board/liberal-{}.png", self.base_url, cards)),
            Party::Fascist => {
                let tier = match num_players {
                    0..=6 => "5-6",
                    7..=8 => "7-8",
                    _ => "9-10",
                };
                Some(format!("{}/board/fascist-{}-{}.png", self.base_url, tier, cards))
            }
        }
    }

    fn role_image(&self, role: Role) -> Option<String> {
        let role = role.to_string().to_ascii_lowercase();
        Some(format!("{}/roles/{}.png", self.base_url, role))
    }
}
