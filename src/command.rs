/// A command that drives a match. Each maps onto exactly one [Game](crate::game::Game) method.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameCommand {
    Start,
    Nominate,
    Vote,
    Draw,
    Discard,
    Veto,
    Consent,
    Elect,
    Investigate,
    Shoot,
    Info,
    End,
}

/// A command that manages the group's settings rather than the match.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AdminCommand {
    SetPrefix,
    SetChannel,
    SetVisuals,
    Settings,
    ResetConfig,
    Help,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Game(GameCommand),
    Admin(AdminCommand),
}

pub struct CommandSpec {
    pub command: Command,
    pub name: &'static str,
    pub alias: Option<&'static str>,
    pub description: &'static str,
    /// Usage without the prefix.
    pub usage: &'static str,
}

const fn admin(command: AdminCommand, name: &'static str, description: &'static str, usage: &'static str) -> CommandSpec {
    CommandSpec { command: Command::Admin(command), name, alias: None, description, usage }
}

const fn game(command: GameCommand, name: &'static str, description: &'static str, usage: &'static str) -> CommandSpec {
    CommandSpec { command: Command::Game(command), name, alias: None, description, usage }
}

/// Every command, in matching order. Settings commands are matched first.
pub const COMMANDS: &[CommandSpec] = &[
    admin(AdminCommand::SetPrefix, "setprefix", "Sets the command prefix", "setprefix <characters>"),
    admin(AdminCommand::SetChannel, "setchannel", "Sets which text channel games are played in", "setchannel <channel name>"),
    admin(AdminCommand::SetVisuals, "setvisuals", "Turns board and role images on or off", "setvisuals <on|off>"),
    admin(AdminCommand::Settings, "settings", "Displays the current configuration", "settings"),
    admin(AdminCommand::ResetConfig, "resetconfig", "Resets the configuration to default", "resetconfig"),
    admin(AdminCommand::Help, "help", "Displays help info", "help"),
    CommandSpec {
        command: Command::Game(GameCommand::Start),
        name: "play",
        alias: Some("start"),
        description: "Starts a new game",
        usage: "play <optional list of players>",
    },
    game(GameCommand::Nominate, "nominate", "Nominates a chancellor (president only)", "nominate <player>"),
    game(GameCommand::Vote, "vote", "Votes on the nominated government", "vote <ja|nein>"),
    game(GameCommand::Draw, "draw", "Draws three policy cards", "draw"),
    game(GameCommand::Discard, "discard", "Discards the specified card", "discard <card # to discard>"),
    game(GameCommand::Veto, "veto", "Initiates a veto of the current policies (if allowed)", "veto"),
    game(GameCommand::Consent, "consent", "Answers the chancellor's veto request (president only)", "consent <ja|nein>"),
    game(GameCommand::Elect, "elect", "Chooses the next president in a special election", "elect <player>"),
    game(
        GameCommand::Info,
        "info",
        "Displays the status of enacted policies, number of policy cards left, and the current Election Tracker status",
        "info",
    ),
    game(GameCommand::Investigate, "investigate", "Investigates a player's party membership", "investigate <player>"),
    game(GameCommand::Shoot, "shoot", "Shoots the specified player (if allowed)", "shoot <player>"),
    game(GameCommand::End, "end", "Ends the current game, asking for confirmation first", "end <ja|nein>"),
];

/// The result of reading a chat line.
#[derive(PartialEq, Eq, Debug)]
pub enum Parsed<'a> {
    /// Not addressed to the bot.
    Ignored,
    /// Prefixed, but no command starts with the given word.
    Unknown(String),
    Command { command: Command, args: &'a str },
}

/// Reads a chat line. It is a command if it starts with `prefix` or `fallback`; the first word
/// selects the first command whose name or alias it is a prefix of, and the rest are arguments.
pub fn parse<'a>(content: &'a str, prefix: &str, fallback: &str) -> Parsed<'a> {
    let rest = [prefix, fallback]
        .into_iter()
        .filter(|p| !p.is_empty())
        .find_map(|p| content.strip_prefix(p));
    let Some(rest) = rest else {
        return Parsed::Ignored;
    };

    let rest = rest.trim_start();
    let (word, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let word = word.to_lowercase();
    if word.chars().count() < 2 {
        return Parsed::Ignored;
    }

    let spec = COMMANDS
        .iter()
        .find(|c| c.name.starts_with(&word) || c.alias.is_some_and(|a| a.starts_with(&word)));
    match spec {
        Some(spec) => Parsed::Command { command: spec.command, args: args.trim() },
        None => Parsed::Unknown(word),
    }
}

/// Help text listing every command with the group's prefix.
pub fn help_text(prefix: &str, fallback: &str) -> String {
    let mut help = "The following commands are available:\n".to_string();
    for spec in COMMANDS {
        help.push_str(&format!("\n{} - {}\n    Usage: {}{}\n", spec.name, spec.description, prefix, spec.usage));
    }
    help.push_str(&format!("\nNote: The prefix {} can be used as a back-up if necessary.", fallback));
    help
}
