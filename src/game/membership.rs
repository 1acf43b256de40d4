use rand::prelude::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two political parties of the game. Policy cards carry a party too.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Debug)]
pub enum Party {
    Liberal,
    Fascist,
}

/// The secret role dealt to a player.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Debug)]
pub enum Role {
    Liberal,
    Fascist,
    Hitler,
}

/// A player's hidden party and role. Hitler always belongs to the fascist party.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct Membership {
    party: Party,
    role: Role,
}

impl Membership {
    pub fn liberal() -> Self {
        Self { party: Party::Liberal, role: Role::Liberal }
    }

    pub fn fascist() -> Self {
        Self { party: Party::Fascist, role: Role::Fascist }
    }

    pub fn hitler() -> Self {
        Self { party: Party::Fascist, role: Role::Hitler }
    }

    pub fn party(&self) -> Party {
        self.party
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_hitler(&self) -> bool {
        self.role == Role::Hitler
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Party::Liberal => "Liberal",
            Party::Fascist => "Fascist",
        })
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Liberal => "Liberal",
            Role::Fascist => "Fascist",
            Role::Hitler => "Hitler",
        })
    }
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} party, {} role", self.party, self.role)
    }
}

/// Number of fascist memberships (Hitler included) dealt for a given table size.
pub fn num_fascists(num_players: usize) -> usize {
    match num_players {
        0..=6 => 2,
        7..=8 => 3,
        _ => 4,
    }
}

/// Builds the shuffled membership deck for a table: one Hitler, the remaining
/// fascists, and liberals for every other seat.
pub fn membership_deck(num_players: usize, rng: &mut impl Rng) -> Vec<Membership> {
    let fascists = num_fascists(num_players);
    let mut deck = Vec::with_capacity(num_players);
    deck.push(Membership::hitler());
    deck.extend((1..fascists).map(|_| Membership::fascist()));
    deck.extend((fascists..num_players).map(|_| Membership::liberal()));
    deck.shuffle(rng);
    deck
}
