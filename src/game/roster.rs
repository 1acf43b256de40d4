use super::player::{position_by_ident, Participant};

/// Resolves human-entered identifiers to participants known to the transport.
pub trait RosterResolver {
    /// Looks up a participant by id, chat callout or display name.
    fn resolve(&self, ident: &str) -> Option<Participant>;

    /// Everyone who would join if the match were started without naming players.
    fn default_roster(&self) -> Vec<Participant>;
}

impl RosterResolver for Vec<Participant> {
    fn resolve(&self, ident: &str) -> Option<Participant> {
        position_by_ident(self, ident, |p| p.id.as_str(), |p| p.name.as_str()).map(|i| self[i].clone())
    }

    fn default_roster(&self) -> Vec<Participant> {
        self.clone()
    }
}
