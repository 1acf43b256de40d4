use self::board::Board;
use self::deck::Deck;
use self::government::Government;
use self::membership::membership_deck;
pub use self::membership::{Party, Role};
pub use self::message::{AssetResolver, Embed, Message, MessageSink, Recipient};
use self::message::{Outbox, FASCIST_COLOR, LIBERAL_COLOR, NEUTRAL_COLOR};
pub use self::options::{GameOptions, VoteQuorum};
pub use self::player::Participant;
use self::player::{position_by_ident, Player};
pub use self::roster::RosterResolver;
pub use self::votes::Ballot;
use self::votes::Votes;
use crate::error::GameError;
use chrono::{DateTime, Utc};
use rand::prelude::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

mod board;
mod deck;
mod executive_power;
mod government;
mod membership;
mod message;
mod options;
mod player;
mod report;
mod roster;
mod test;
mod votes;

pub const MIN_PLAYERS: usize = 5;
pub const MAX_PLAYERS: usize = 10;

/// A match of Secret Hitler played over chat commands.
///
/// Every command method checks the current [Phase] and the acting player before touching any
/// state; an `Err` means nothing changed and the match is still waiting for a valid command.
pub struct Game {
    opts: GameOptions,
    players: Vec<Player>,
    board: Board,
    deck: Deck,
    phase: Phase,
    running: bool,
    president: Option<usize>,
    nominated_chancellor: Option<usize>,
    chancellor: Option<usize>,
    previous_government: Option<Government>,
    /// Seat of the president who called a special election; succession resumes after them.
    special_election_caller: Option<usize>,
    drawn_policies: Vec<Party>,
    votes: Votes,
    investigated: Vec<usize>,
    veto_requested: bool,
    veto_used: bool,
    /// Phase to return to if a request to end the game is declined.
    paused_phase: Option<Phase>,
    outcome: Option<WinCondition>,
    started: Option<DateTime<Utc>>,
    finished: Option<DateTime<Utc>>,
    rng: rand_chacha::ChaCha8Rng,
    outbox: Outbox,
    assets: Option<Arc<dyn AssetResolver>>,
}

/// Represents the current phase in the game loop.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Phase {
    Setup,
    AssignPresident,
    NominateChancellor,
    VoteOnNomination,
    PresidentDrawPolicies,
    PresidentDiscardPolicy,
    ChancellorDiscardPolicy,
    ChancellorVetoRequested,
    PresidentPolicyPeek,
    PresidentInvestigatePlayer,
    SpeciallyElectPresident,
    PresidentShootPlayer,
    ConfirmEndGame,
    Finished,
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum WinCondition {
    /// The liberals completed their policy track.
    LiberalPolicyTrack,
    /// The fascists completed their policy track.
    FascistPolicyTrack,
    /// Hitler was elected chancellor
    HitlerChancellor,
    /// Hitler was executed
    HitlerExecuted,
}

impl WinCondition {
    pub fn winner(&self) -> Party {
        match self {
            WinCondition::LiberalPolicyTrack | WinCondition::HitlerExecuted => Party::Liberal,
            WinCondition::FascistPolicyTrack | WinCondition::HitlerChancellor => Party::Fascist,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            WinCondition::LiberalPolicyTrack => "The liberals enacted five liberal policies.",
            WinCondition::FascistPolicyTrack => "The fascists enacted six fascist policies.",
            WinCondition::HitlerChancellor => "Hitler was elected chancellor.",
            WinCondition::HitlerExecuted => "Hitler was executed.",
        }
    }
}

impl Game {
    /// Creates an idle match. Nothing can be played until a transport is attached and
    /// [Game::start_game] succeeds.
    pub fn new(opts: GameOptions, seed: u64) -> Self {
        Game {
            opts,
            players: vec![],
            board: Board::new(0),
            deck: Deck::default(),
            phase: Phase::Setup,
            running: false,
            president: None,
            nominated_chancellor: None,
            chancellor: None,
            previous_government: None,
            special_election_caller: None,
            drawn_policies: vec![],
            votes: Votes::new(0),
            investigated: vec![],
            veto_requested: false,
            veto_used: false,
            paused_phase: None,
            outcome: None,
            started: None,
            finished: None,
            rng: rand_chacha::ChaCha8Rng::seed_from_u64(seed),
            outbox: Outbox::default(),
            assets: None,
        }
    }

    /// Attaches the messaging transport, delivering anything queued while there was none.
    pub fn attach_transport(&mut self, sink: Arc<dyn MessageSink>) {
        self.outbox.attach(sink);
    }

    /// Sets or clears the decorative image lookup.
    pub fn set_assets(&mut self, assets: Option<Arc<dyn AssetResolver>>) {
        self.assets = assets;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Gets the number of players in the game.
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Gets the number of players in the game that are alive.
    pub fn num_players_alive(&self) -> usize {
        self.players.iter().filter(|p| p.alive).count()
    }

    /// Seat of the player who is Hitler.
    pub fn hitler(&self) -> Option<usize> {
        self.players.iter().position(|p| p.is_hitler())
    }

    /// Seats of the fascists other than Hitler.
    pub fn fascists(&self) -> Vec<usize> {
        self.seats_where(|p| p.is_fascist() && !p.is_hitler())
    }

    /// Starts a new match.
    ///
    /// `roster_spec` is a whitespace separated list of player identifiers; when empty, everyone the
    /// resolver offers by default joins. Unknown identifiers are reported and skipped, and only the
    /// first [MAX_PLAYERS] resolved players take a seat.
    pub fn start_game(&mut self, roster_spec: &str, roster: &dyn RosterResolver) -> Result<(), GameError> {
        if self.running {
            return Err(GameError::AlreadyRunning);
        }
        if !self.outbox.has_sink() {
            return Err(GameError::NoTransport);
        }

        let participants = self.resolve_roster(roster_spec, roster)?;
        let num_players = participants.len();

        // Seating order and memberships are shuffled independently
        let mut players: Vec<Player> = participants.into_iter().map(Player::new).collect();
        let memberships = membership_deck(num_players, &mut self.rng);
        players.shuffle(&mut self.rng);
        for (player, membership) in players.iter_mut().zip(memberships) {
            player.assign_membership(membership);
        }

        self.players = players;
        self.board = Board::new(num_players);
        self.deck = Deck::new(&mut self.rng);
        self.president = None;
        self.nominated_chancellor = None;
        self.chancellor = None;
        self.previous_government = None;
        self.special_election_caller = None;
        self.drawn_policies.clear();
        self.votes = Votes::new(0);
        self.investigated.clear();
        self.veto_requested = false;
        self.veto_used = false;
        self.paused_phase = None;
        self.outcome = None;
        self.started = Some(Utc::now());
        self.finished = None;
        self.running = true;
        self.set_phase(Phase::Setup);
        log::info!("Starting a game with {} players", num_players);

        self.reveal_roles();

        self.set_phase(Phase::AssignPresident);
        let president = self.rng.gen_range(0..num_players);
        self.president = Some(president);

        let seating = self.players.iter().map(|p| p.name.clone()).collect::<Vec<_>>().join(", ");
        let embed = Embed::new("A new game of Secret Hitler has started", NEUTRAL_COLOR)
            .line("Players", format!("{} ({} fascists)", num_players, membership::num_fascists(num_players)))
            .line("Seating order", seating)
            .line("President", self.players[president].name.clone());
        self.announce(embed);
        self.begin_nomination();
        Ok(())
    }

    /// Called when the president nominates a chancellor.
    pub fn nominate_chancellor(&mut self, actor: &str, target: &str) -> Result<(), GameError> {
        self.check_phase(Phase::NominateChancellor)?;
        let president = self.check_president(actor)?;
        let nominee = self.find_player(target)?;

        if nominee == president {
            return Err(GameError::CannotTargetSelf);
        }
        self.check_alive(nominee)?;
        if self.previous_government.is_some_and(|g| g.includes(nominee)) {
            return Err(GameError::TermLimited(self.players[nominee].name.clone()));
        }

        self.nominated_chancellor = Some(nominee);
        self.votes = Votes::new(self.vote_quorum());
        self.announce(format!(
            "{} has nominated {} as chancellor. Everyone vote ja or nein.",
            self.players[president].name, self.players[nominee].name
        ));
        self.set_phase(Phase::VoteOnNomination);
        Ok(())
    }

    /// Called when a player casts their vote on the nominated government.
    pub fn vote_on_nomination(&mut self, actor: &str, choice: &str) -> Result<(), GameError> {
        self.check_phase(Phase::VoteOnNomination)?;
        let voter = self.seat_of(actor)?;
        self.check_alive(voter)?;
        if self.votes.has_cast(voter) {
            return Err(GameError::AlreadyVoted);
        }
        let vote = Ballot::parse(choice).as_bool().ok_or(GameError::UnrecognizedChoice)?;

        self.votes.vote(voter, vote);
        self.tell(voter, format!("Your vote ({}) has been recorded.", if vote { "Ja" } else { "Nein" }));
        self.announce(format!(
            "{} has voted ({}/{}).",
            self.players[voter].name,
            self.votes.count(),
            self.votes.required()
        ));

        if let Some(passed) = self.votes.outcome() {
            self.end_voting(passed);
        }
        Ok(())
    }

    /// Called when the president draws the top three policies.
    pub fn draw_policies(&mut self, actor: &str) -> Result<(), GameError> {
        self.check_phase(Phase::PresidentDrawPolicies)?;
        let president = self.check_president(actor)?;

        self.check_deck();
        self.drawn_policies = self.deck.draw_three();
        self.players[president].has_drawn = true;
        log::trace!("President drew {:?}", self.drawn_policies);

        let embed = self.hand_embed("Your policies", "Discard one with discard <number>");
        self.tell(president, embed);
        self.announce(format!("{} has drawn three policies.", self.players[president].name));
        self.set_phase(Phase::PresidentDiscardPolicy);
        Ok(())
    }

    /// Called when the president or chancellor discards a policy from their hand.
    /// `choice` is the 1-based position of the card in the hand they were shown.
    pub fn discard_policy(&mut self, actor: &str, choice: &str) -> Result<(), GameError> {
        let (player, chancellor) = match self.phase {
            Phase::PresidentDiscardPolicy => {
                let chancellor = self.chancellor.ok_or(GameError::InvalidAction)?;
                (self.check_president(actor)?, chancellor)
            }
            Phase::ChancellorDiscardPolicy => {
                let chancellor = self.check_chancellor(actor)?;
                (chancellor, chancellor)
            }
            _ => return Err(GameError::InvalidAction),
        };

        let hand = self.drawn_policies.len();
        let index = choice
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|i| (1..=hand).contains(i))
            .ok_or(GameError::InvalidCard(hand))?;

        let card = self.drawn_policies.remove(index - 1);
        self.deck.discard(card);
        self.players[player].has_discarded = true;

        if self.phase == Phase::PresidentDiscardPolicy {
            self.players[chancellor].pending_discard = true;
            let hint = if self.veto_available() {
                "Discard one with discard <number>, or request a veto with veto"
            } else {
                "Discard one with discard <number>"
            };
            let embed = self.hand_embed("Policies from the president", hint);
            self.tell(chancellor, embed);
            self.announce(format!(
                "{} has discarded a policy and passed two to {}.",
                self.players[player].name, self.players[chancellor].name
            ));
            self.set_phase(Phase::ChancellorDiscardPolicy);
        } else {
            self.players[chancellor].pending_discard = false;
            if let Some(card) = self.drawn_policies.pop() {
                self.enact_policy(card);
            }
        }
        Ok(())
    }

    /// Called when the chancellor proposes a veto of the current agenda.
    pub fn veto_policies(&mut self, actor: &str) -> Result<(), GameError> {
        self.check_phase(Phase::ChancellorDiscardPolicy)?;
        let chancellor = self.check_chancellor(actor)?;
        if !self.veto_available() {
            return Err(GameError::VetoUnavailable);
        }
        let president = self.president.ok_or(GameError::InvalidAction)?;

        self.veto_used = true;
        self.veto_requested = true;
        self.tell(president, "The chancellor wants to veto this agenda. Answer with consent ja or consent nein.");
        self.announce(format!("{} has requested a veto.", self.players[chancellor].name));
        self.set_phase(Phase::ChancellorVetoRequested);
        Ok(())
    }

    /// Called when the president answers the chancellor's veto request.
    pub fn consent_veto_request(&mut self, actor: &str, choice: &str) -> Result<(), GameError> {
        self.check_phase(Phase::ChancellorVetoRequested)?;
        let president = self.check_president(actor)?;
        let consent = Ballot::parse(choice).as_bool().ok_or(GameError::UnrecognizedChoice)?;

        self.veto_requested = false;
        if consent {
            for card in std::mem::take(&mut self.drawn_policies) {
                self.deck.discard(card);
            }
            if let Some(chancellor) = self.chancellor {
                self.players[chancellor].pending_discard = false;
            }
            let chaos = self.board.increase_election_tracker();
            self.announce(format!(
                "{} agreed to the veto. Both policies are discarded. Election tracker: {}.",
                self.players[president].name, self.board.election_tracker
            ));
            if chaos {
                self.enact_chaos_policy();
            } else {
                self.set_phase(Phase::AssignPresident);
                self.assign_next_president(None);
            }
        } else {
            if let Some(chancellor) = self.chancellor {
                self.tell(chancellor, "The president refused the veto. You must discard a policy.");
            }
            self.announce(format!("{} refused the veto.", self.players[president].name));
            self.set_phase(Phase::ChancellorDiscardPolicy);
        }
        Ok(())
    }

    /// Called when anyone asks to end the match. The first call asks for confirmation; a second
    /// call answering ja aborts the match, nein resumes it where it was.
    pub fn end_game(&mut self, actor: &str, choice: &str) -> Result<(), GameError> {
        if !self.running {
            return Err(GameError::NotRunning);
        }

        if self.phase != Phase::ConfirmEndGame {
            self.paused_phase = Some(self.phase);
            self.set_phase(Phase::ConfirmEndGame);
            self.announce(format!(
                "{} wants to end the game. Confirm with end ja, or carry on with end nein.",
                self.display_name(actor)
            ));
            return Ok(());
        }

        match Ballot::parse(choice) {
            Ballot::Ja => {
                self.running = false;
                self.paused_phase = None;
                self.finished = Some(Utc::now());
                self.set_phase(Phase::Finished);
                log::info!("Game ended early");
                self.announce(format!("The game was ended by {}.", self.display_name(actor)));
                self.announce(self.summary_embed());
            }
            Ballot::Nein => {
                let phase = self.paused_phase.take().unwrap_or(Phase::NominateChancellor);
                self.set_phase(phase);
                self.announce("The game continues.");
            }
            Ballot::Unrecognized => return Err(GameError::UnrecognizedChoice),
        }
        Ok(())
    }

    /// Moves the presidency on. Only legal in [Phase::AssignPresident].
    ///
    /// The outgoing government becomes the previous government. A special election jumps straight
    /// to the chosen player; the rotation after it resumes from the president who called it.
    fn assign_next_president(&mut self, specially_elected: Option<usize>) {
        if self.phase != Phase::AssignPresident {
            log::warn!("Cannot assign a president during {:?}", self.phase);
            return;
        }

        if let Some(president) = self.president {
            self.previous_government = Some(Government { president, chancellor: self.chancellor });
            self.players[president].reset_round();
            if let Some(chancellor) = self.chancellor {
                self.players[chancellor].reset_round();
            }
        }

        let current = self.president.unwrap_or(0);
        let next = match (self.special_election_caller.take(), specially_elected) {
            (_, Some(target)) => {
                self.special_election_caller = Some(current);
                target
            }
            (Some(caller), None) => self.next_player(caller),
            (None, None) => self.next_player(current),
        };

        self.president = Some(next);
        self.begin_nomination();
    }

    /// Clears the last round and asks the sitting president for a nomination.
    fn begin_nomination(&mut self) {
        self.chancellor = None;
        self.nominated_chancellor = None;
        self.veto_requested = false;
        self.veto_used = false;
        self.drawn_policies.clear();
        self.votes = Votes::new(self.vote_quorum());
        if let Some(president) = self.president {
            self.announce(format!(
                "{} is the president. Nominate a chancellor with nominate <player>.",
                self.players[president].name
            ));
        }
        self.set_phase(Phase::NominateChancellor);
    }

    /// Resolves the election once every required vote is in.
    fn end_voting(&mut self, passed: bool) {
        let Some(nominee) = self.nominated_chancellor.take() else {
            log::warn!("Election resolved without a nominee");
            return;
        };

        let (mut ja, mut nein) = (vec![], vec![]);
        for (player, vote) in self.players.iter().zip(self.votes.votes(self.players.len())) {
            match vote {
                Some(true) => ja.push(player.name.clone()),
                Some(false) => nein.push(player.name.clone()),
                None => {}
            }
        }
        let tally = Embed::new(if passed { "The vote passed" } else { "The vote failed" }, NEUTRAL_COLOR)
            .line("Ja", names_or_none(&ja))
            .line("Nein", names_or_none(&nein));
        self.announce(tally);

        if passed {
            self.chancellor = Some(nominee);
            if self.board.hitler_zone() {
                if self.players[nominee].is_hitler() {
                    self.finish(WinCondition::HitlerChancellor);
                    return;
                }
                self.players[nominee].not_hitler = true;
            }
            let president = self.president.map(|p| self.players[p].name.clone()).unwrap_or_default();
            self.announce(format!(
                "{} is elected chancellor. {}, draw the policies with draw.",
                self.players[nominee].name, president
            ));
            self.set_phase(Phase::PresidentDrawPolicies);
        } else {
            self.chancellor = None;
            let chaos = self.board.increase_election_tracker();
            self.announce(format!("Election tracker: {}.", self.board.election_tracker));
            if chaos {
                self.enact_chaos_policy();
            } else {
                self.set_phase(Phase::AssignPresident);
                self.assign_next_president(None);
            }
        }
    }

    /// Enacts the top policy after three failed governments, exactly as if it had been legislated.
    fn enact_chaos_policy(&mut self) {
        self.check_deck();
        let Some(card) = self.deck.draw_one() else {
            log::error!("Policy deck is empty");
            return;
        };
        self.announce("The country is thrown into chaos. The top policy is enacted.");
        self.enact_policy(card);
    }

    /// Plays a policy onto the board, then checks for a winner and any unlocked executive power.
    fn enact_policy(&mut self, card: Party) {
        self.board.play_card(card);
        let cards = match card {
            Party::Liberal => self.board.liberal_cards,
            Party::Fascist => self.board.fascist_cards,
        };
        let image = self
            .assets
            .as_ref()
            .and_then(|assets| assets.board_image(self.board.num_players, card, cards));
        let color = match card {
            Party::Liberal => LIBERAL_COLOR,
            Party::Fascist => FASCIST_COLOR,
        };
        let embed = Embed::new(format!("A {} policy has been enacted", card), color)
            .line("Board", self.board.summary())
            .image(image);
        self.announce(embed);

        if self.check_game_over() {
            return;
        }

        match self.board.get_executive_power() {
            Some(power) => self.start_executive_power(power),
            None => {
                self.set_phase(Phase::AssignPresident);
                self.assign_next_president(None);
            }
        }
    }

    /// Ends the match if a policy track is complete or Hitler is dead.
    fn check_game_over(&mut self) -> bool {
        if let Some(party) = self.board.check_tracks() {
            self.finish(match party {
                Party::Liberal => WinCondition::LiberalPolicyTrack,
                Party::Fascist => WinCondition::FascistPolicyTrack,
            });
            return true;
        }

        if self.hitler().is_some_and(|hitler| !self.players[hitler].alive) {
            self.finish(WinCondition::HitlerExecuted);
            return true;
        }

        false
    }

    fn finish(&mut self, outcome: WinCondition) {
        self.outcome = Some(outcome);
        self.running = false;
        self.finished = Some(Utc::now());
        self.set_phase(Phase::Finished);
        log::info!("Game over: {:?}", outcome);
        self.announce(self.summary_embed());
    }

    /// Privately tells every player their membership, and fascists what they may know of each other.
    fn reveal_roles(&mut self) {
        let num_players = self.players.len();
        let hitler = self.hitler();
        let fascists = self.fascists();
        let hitler_knows = num_players <= self.opts.hitler_knows_threshold;

        for idx in 0..num_players {
            let player = &self.players[idx];
            let Some(membership) = player.membership else {
                continue;
            };
            log::trace!("{} is {}", player.name, membership);

            let color = match membership.party() {
                Party::Liberal => LIBERAL_COLOR,
                Party::Fascist => FASCIST_COLOR,
            };
            let image = self.assets.as_ref().and_then(|assets| assets.role_image(membership.role()));
            let mut embed = Embed::new("Your secret role", color)
                .line("You", player.reveal_to_self())
                .line("Party", membership.party().to_string())
                .line("Role", membership.role().to_string())
                .image(image);

            let teammates = fascists
                .iter()
                .filter(|f| **f != idx)
                .map(|f| self.players[*f].reveal_to_others())
                .collect::<Vec<_>>();
            if membership.is_hitler() {
                if hitler_knows {
                    embed = embed.line("Fascists", names_or_none(&teammates));
                }
            } else if membership.party() == Party::Fascist {
                if let Some(hitler) = hitler {
                    embed = embed.line("Hitler", self.players[hitler].name.clone());
                }
                embed = embed.line("Other fascists", names_or_none(&teammates));
            }
            self.tell(idx, embed);
        }
    }

    fn resolve_roster(&mut self, roster_spec: &str, roster: &dyn RosterResolver) -> Result<Vec<Participant>, GameError> {
        let idents: Vec<&str> = roster_spec
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .collect();

        let candidates = if idents.is_empty() {
            roster.default_roster()
        } else {
            let mut found = vec![];
            let mut missing = vec![];
            for ident in idents {
                match roster.resolve(ident) {
                    Some(participant) => found.push(participant),
                    None => missing.push(ident.to_string()),
                }
            }
            if !missing.is_empty() {
                self.announce(format!("Could not find: {}", missing.join(", ")));
            }
            found
        };

        let mut participants: Vec<Participant> = vec![];
        for candidate in candidates {
            if !participants.iter().any(|p| p.id == candidate.id) {
                participants.push(candidate);
            }
        }

        if participants.len() < MIN_PLAYERS {
            return Err(GameError::TooFewPlayers(MIN_PLAYERS));
        }
        if participants.len() > MAX_PLAYERS {
            let left_out = participants.split_off(MAX_PLAYERS);
            let names = left_out.iter().map(|p| p.name.clone()).collect::<Vec<_>>();
            self.announce(format!("Only {} can play. Left out: {}", MAX_PLAYERS, names.join(", ")));
        }
        Ok(participants)
    }

    /// Number of votes needed to resolve an election.
    fn vote_quorum(&self) -> usize {
        match self.opts.vote_quorum {
            VoteQuorum::Seated => self.num_players(),
            VoteQuorum::Living => self.num_players_alive(),
        }
    }

    fn veto_available(&self) -> bool {
        !self.veto_used && (!self.opts.veto_requires_unlock || self.board.veto_unlocked())
    }

    /// Shuffles the discard pile back in if the draw pile is running low.
    fn check_deck(&mut self) {
        if self.deck.check_shuffle(&mut self.rng) {
            self.announce("The discard pile has been shuffled back into the deck.");
        }
    }

    /// Renders the cards currently in hand as a numbered list.
    fn hand_embed(&self, title: &str, hint: &str) -> Embed {
        let mut embed = Embed::new(title, NEUTRAL_COLOR);
        for (i, card) in self.drawn_policies.iter().enumerate() {
            embed = embed.line(format!("{}", i + 1), card.to_string());
        }
        embed.line("Next", hint)
    }

    fn set_phase(&mut self, phase: Phase) {
        log::debug!("Phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    fn tell(&mut self, player: usize, message: impl Into<Message>) {
        let id = self.players[player].id.clone();
        self.outbox.send(Recipient::Player(id), message);
    }

    fn announce(&mut self, message: impl Into<Message>) {
        self.outbox.send(Recipient::Table, message);
    }

    /// Returns `Ok` if the game is in the given phase, and an `Err` otherwise.
    fn check_phase(&self, phase: Phase) -> Result<(), GameError> {
        if !self.running {
            return Err(GameError::NotRunning);
        }
        if self.phase != phase {
            return Err(GameError::InvalidAction);
        }
        Ok(())
    }

    /// Returns the president's seat if `actor` is the president.
    fn check_president(&self, actor: &str) -> Result<usize, GameError> {
        let seat = self.seat_of(actor)?;
        if self.president != Some(seat) {
            return Err(GameError::NotYourTurn);
        }
        Ok(seat)
    }

    /// Returns the chancellor's seat if `actor` is the chancellor.
    fn check_chancellor(&self, actor: &str) -> Result<usize, GameError> {
        let seat = self.seat_of(actor)?;
        if self.chancellor != Some(seat) {
            return Err(GameError::NotYourTurn);
        }
        Ok(seat)
    }

    fn check_alive(&self, player: usize) -> Result<(), GameError> {
        if self.players[player].alive {
            Ok(())
        } else {
            Err(GameError::DeadPlayer(self.players[player].name.clone()))
        }
    }

    /// Finds the seat of the acting player by their exact id.
    fn seat_of(&self, actor: &str) -> Result<usize, GameError> {
        self.players.iter().position(|p| p.id == actor).ok_or(GameError::NotYourTurn)
    }

    /// Finds a seated player from a human-entered identifier.
    pub fn find_player(&self, ident: &str) -> Result<usize, GameError> {
        position_by_ident(&self.players, ident, |p| p.id.as_str(), |p| p.name.as_str())
            .ok_or_else(|| GameError::PlayerNotFound(ident.trim().to_string()))
    }

    fn display_name(&self, actor: &str) -> String {
        self.players
            .iter()
            .find(|p| p.id == actor)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| actor.to_string())
    }

    /// Finds the next alive player after the given seat, wrapping around.
    fn next_player(&self, player: usize) -> usize {
        (player + 1..self.num_players())
            .chain(0..player)
            .find(|idx| self.players[*idx].alive)
            .unwrap_or(player)
    }

    fn seats_where(&self, f: impl Fn(&Player) -> bool) -> Vec<usize> {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| f(p))
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
impl Game {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<WinCondition> {
        self.outcome
    }

    /// Gets the player names in seating order.
    pub fn player_names(&self) -> impl Iterator<Item = &'_ str> {
        self.players.iter().map(|p| &p.name[..])
    }

    /// Seats of the liberal players.
    pub fn liberals(&self) -> Vec<usize> {
        self.seats_where(|p| p.is_liberal())
    }
}

fn names_or_none(names: &[String]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}
