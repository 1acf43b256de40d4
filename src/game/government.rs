use serde::{Deserialize, Serialize};

/// The last government to hold office, barred from the next chancellor nomination.
/// The chancellor is absent when the presidency passed on without one being elected.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct Government {
    pub president: usize,
    pub chancellor: Option<usize>,
}

impl Government {
    pub fn includes(&self, player: usize) -> bool {
        self.president == player || self.chancellor == Some(player)
    }
}
