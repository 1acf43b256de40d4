use super::membership::{Membership, Party, Role};
use serde::{Deserialize, Serialize};

/// Someone who can take a seat in a match, as known to the chat transport.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct Participant {
    pub id: String,
    pub name: String,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}

/// A game player.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub membership: Option<Membership>,
    pub alive: bool,
    pub not_hitler: bool,
    pub has_drawn: bool,
    pub has_discarded: bool,
    pub pending_discard: bool,
}

impl Player {
    pub fn new(participant: Participant) -> Self {
        Self {
            id: participant.id,
            name: participant.name,
            membership: None,
            alive: true,
            not_hitler: false,
            has_drawn: false,
            has_discarded: false,
            pending_discard: false,
        }
    }

    pub fn assign_membership(&mut self, membership: Membership) {
        self.membership = Some(membership);
    }

    pub fn party(&self) -> Option<Party> {
        self.membership.map(|m| m.party())
    }

    pub fn role(&self) -> Option<Role> {
        self.membership.map(|m| m.role())
    }

    pub fn is_hitler(&self) -> bool {
        self.role() == Some(Role::Hitler)
    }

    pub fn is_fascist(&self) -> bool {
        self.party() == Some(Party::Fascist)
    }

    /// Clears the per-round allowances, called when the presidency moves on.
    pub fn reset_round(&mut self) {
        self.has_drawn = false;
        self.has_discarded = false;
        self.pending_discard = false;
    }

    /// What the player is told about themself when roles are dealt.
    pub fn reveal_to_self(&self) -> String {
        match self.membership {
            Some(m) => format!("You are a member of the {} party. Your secret role is {}.", m.party(), m.role()),
            None => "You have not been dealt a role.".to_string(),
        }
    }

    /// How the player is described to a teammate who is allowed to know their role.
    pub fn reveal_to_others(&self) -> String {
        match self.role() {
            Some(role) => format!("{} ({})", self.name, role),
            None => self.name.clone(),
        }
    }

    /// Public one-line status used in the seating list.
    pub fn status_line(&self) -> String {
        let mut line = self.name.clone();
        if !self.alive {
            line.push_str(" (dead)");
        } else if self.not_hitler {
            line.push_str(" (not Hitler)");
        }
        line
    }
}

#[cfg(test)]
impl Player {
    pub fn is_liberal(&self) -> bool {
        self.party() == Some(Party::Liberal)
    }

    /// Whether the identifier is this player's id, bare or as a chat callout such as `<@!id>`.
    pub fn has_id(&self, ident: &str) -> bool {
        matches_id(&self.id, ident)
    }

    /// Whether the identifier is this player's display name, ignoring case.
    pub fn has_name(&self, ident: &str) -> bool {
        matches_name(&self.name, ident)
    }
}

/// Whether `ident` is the given id, bare or as a chat callout.
pub fn matches_id(id: &str, ident: &str) -> bool {
    let ident = ident.trim();
    !ident.is_empty() && strip_callout(ident) == id
}

/// Whether `ident` is the given display name, ignoring case.
pub fn matches_name(name: &str, ident: &str) -> bool {
    let ident = ident.trim();
    !ident.is_empty() && name.eq_ignore_ascii_case(ident)
}

/// Finds the first item whose id the identifier names, or failing that, the first whose display
/// name it names. A display name never shadows another player's id.
pub fn position_by_ident<T>(
    items: &[T],
    ident: &str,
    id: impl Fn(&T) -> &str,
    name: impl Fn(&T) -> &str,
) -> Option<usize> {
    items
        .iter()
        .position(|item| matches_id(id(item), ident))
        .or_else(|| items.iter().position(|item| matches_name(name(item), ident)))
}

/// Strips chat callout syntax (`<@id>`, `<@!id>`) from an identifier.
pub fn strip_callout(ident: &str) -> &str {
    ident
        .trim()
        .strip_prefix("<@")
        .and_then(|s| s.strip_suffix('>'))
        .map(|s| s.trim_start_matches('!'))
        .unwrap_or(ident.trim())
}
