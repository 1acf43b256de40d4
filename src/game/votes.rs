use super::MAX_PLAYERS;
use serde::{Deserialize, Serialize};

/// A ja/nein answer typed by a player. Anything else is `Unrecognized`.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Ballot {
    Ja,
    Nein,
    Unrecognized,
}

impl Ballot {
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "ja" | "j" | "yes" | "y" => Ballot::Ja,
            "nein" | "n" | "no" => Ballot::Nein,
            _ => Ballot::Unrecognized,
        }
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            Ballot::Ja => Some(true),
            Ballot::Nein => Some(false),
            Ballot::Unrecognized => None,
        }
    }
}

/// Tracks the vote of each seat.
#[derive(Clone, Copy, Serialize, Deserialize, Debug)]
pub struct Votes {
    required: usize,
    votes: [Option<bool>; MAX_PLAYERS],
}

impl Votes {
    /// Creates a new `Votes`, resolved once `required` votes are in.
    pub fn new(required: usize) -> Self {
        Self { required, votes: [None; MAX_PLAYERS] }
    }

    /// Returns whether the given seat has cast their vote.
    pub fn has_cast(&self, player_idx: usize) -> bool {
        self.votes[player_idx].is_some()
    }

    /// Records the vote of a seat. A second vote from the same seat is ignored and returns `false`.
    pub fn vote(&mut self, player_idx: usize, vote: bool) -> bool {
        if self.has_cast(player_idx) {
            return false;
        }
        self.votes[player_idx] = Some(vote);
        true
    }

    /// Number of votes cast so far.
    pub fn count(&self) -> usize {
        self.votes.iter().filter(|v| v.is_some()).count()
    }

    /// Number of votes needed before the election resolves.
    pub fn required(&self) -> usize {
        self.required
    }

    /// If all votes are counted, returns the outcome, otherwise returns `None`.
    /// A tie is not a majority.
    pub fn outcome(&self) -> Option<bool> {
        let yes = self.votes.iter().filter(|v| **v == Some(true)).count();
        let no = self.votes.iter().filter(|v| **v == Some(false)).count();
        (yes + no >= self.required).then_some(yes > no)
    }

    /// Gets the vote of each seat.
    pub fn votes(&self, num_players: usize) -> &[Option<bool>] {
        &self.votes[..num_players]
    }
}
