use super::{executive_power::ExecutivePower, membership::Party};
use serde::{Deserialize, Serialize};

pub const MAX_LIBERAL_CARDS: usize = 5;
pub const MAX_FASCIST_CARDS: usize = 6;
/// Consecutive rejected governments that force the top policy onto the board.
pub const MAX_ELECTION_TRACKER: usize = 3;

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Board {
    pub num_players: usize,
    pub liberal_cards: usize,
    pub fascist_cards: usize,
    pub election_tracker: usize,
    /// Power unlocked by the nth fascist policy, at index n - 1.
    pub power_track: [Option<ExecutivePower>; MAX_FASCIST_CARDS - 1],
}

impl Board {
    /// Creates a new board for the given number of players.
    pub fn new(num_players: usize) -> Self {
        Board {
            num_players,
            liberal_cards: 0,
            fascist_cards: 0,
            election_tracker: 0,
            power_track: power_track(num_players),
        }
    }

    /// Plays a policy card of the given party, clearing the election tracker.
    pub fn play_card(&mut self, party: Party) {
        match party {
            Party::Liberal => self.liberal_cards += 1,
            Party::Fascist => self.fascist_cards += 1,
        }
        self.election_tracker = 0;
    }

    /// Advances the election tracker, returning `true` once it is full.
    pub fn increase_election_tracker(&mut self) -> bool {
        self.election_tracker += 1;
        self.election_tracker >= MAX_ELECTION_TRACKER
    }

    /// Gets the executive power unlocked by the last played fascist card, if there is any.
    pub fn get_executive_power(&self) -> Option<ExecutivePower> {
        let slot = self.fascist_cards.checked_sub(1)?;
        self.power_track.get(slot).copied().flatten()
    }

    /// Checks whether either party has completed their policy track.
    pub fn check_tracks(&self) -> Option<Party> {
        if self.liberal_cards >= MAX_LIBERAL_CARDS {
            return Some(Party::Liberal);
        }
        if self.fascist_cards >= MAX_FASCIST_CARDS {
            return Some(Party::Fascist);
        }
        None
    }

    /// Whether electing Hitler as chancellor now wins the game for the fascists.
    pub fn hitler_zone(&self) -> bool {
        self.fascist_cards >= 3
    }

    /// Checks whether veto power is unlocked on the physical board.
    pub fn veto_unlocked(&self) -> bool {
        self.fascist_cards >= 5
    }

    /// Human readable summary of the tracks.
    pub fn summary(&self) -> String {
        format!(
            "Fascist Policies: {}/{}\nLiberal Policies: {}/{}\nRejected Govts: {} (policy enacted at {})",
            self.fascist_cards,
            MAX_FASCIST_CARDS,
            self.liberal_cards,
            MAX_LIBERAL_CARDS,
            self.election_tracker,
            MAX_ELECTION_TRACKER,
        )
    }
}

/// The fascist track printed on the board for each player-count tier.
fn power_track(num_players: usize) -> [Option<ExecutivePower>; MAX_FASCIST_CARDS - 1] {
    use ExecutivePower::*;
    match num_players {
        0..=6 => [None, None, Some(PolicyPeek), Some(Execution), Some(Execution)],
        7..=8 => [
            None,
            Some(InvestigateLoyalty),
            Some(SpecialElection),
            Some(Execution),
            Some(Execution),
        ],
        _ => [
            Some(InvestigateLoyalty),
            Some(InvestigateLoyalty),
            Some(SpecialElection),
            Some(Execution),
            Some(Execution),
        ],
    }
}
