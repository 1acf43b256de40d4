use serde::{Deserialize, Serialize};

/// Options for customising a match.
#[derive(Clone, Copy, Serialize, Deserialize, Debug)]
pub struct GameOptions {
    /// Hitler learns who the other fascists are at tables of this size or smaller.
    pub hitler_knows_threshold: usize,
    /// Which seats must vote before an election resolves.
    pub vote_quorum: VoteQuorum,
    /// Whether veto is only available once five fascist policies are enacted.
    pub veto_requires_unlock: bool,
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum VoteQuorum {
    /// Every seat, dead or alive, must vote.
    Seated,
    /// Only living seats must vote.
    Living,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            hitler_knows_threshold: 6,
            vote_quorum: VoteQuorum::Seated,
            veto_requires_unlock: false,
        }
    }
}
