use super::message::{Embed, FASCIST_COLOR, LIBERAL_COLOR, NEUTRAL_COLOR};
use super::{membership::Party, Game, Phase};
use crate::error::GameError;

impl Game {
    /// Called when anyone asks for the state of the match. Once the match is over this is the
    /// final summary instead.
    pub fn show_info(&mut self, _actor: &str) -> Result<(), GameError> {
        if self.players.is_empty() {
            return Err(GameError::NotRunning);
        }
        let report = if self.running { self.status_embed() } else { self.summary_embed() };
        self.announce(report);
        Ok(())
    }

    /// Public status of a running match.
    pub(super) fn status_embed(&self) -> Embed {
        let name_of = |seat: Option<usize>| {
            seat.map(|s| self.players[s].name.clone())
                .unwrap_or_else(|| "none".to_string())
        };
        let seating = self
            .players
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{}. {}", i + 1, p.status_line()))
            .collect::<Vec<_>>()
            .join("\n");

        let mut embed = Embed::new("Game status", NEUTRAL_COLOR)
            .line("Board", self.board.summary())
            .line("Draw pile", self.deck.count().to_string())
            .line("Discard pile", self.deck.discard_count().to_string())
            .line("Phase", describe_phase(self.phase))
            .line("President", name_of(self.president))
            .line("Chancellor", name_of(self.chancellor));
        if self.nominated_chancellor.is_some() {
            embed = embed.line("Nominee", name_of(self.nominated_chancellor));
        }
        if let Some(government) = self.previous_government {
            let mut names = vec![self.players[government.president].name.clone()];
            names.extend(government.chancellor.map(|c| self.players[c].name.clone()));
            embed = embed.line("Previous government", names.join(", "));
        }
        embed.line("Players", seating)
    }

    /// Outcome, winners and every player's role.
    pub(super) fn summary_embed(&self) -> Embed {
        let (title, color) = match self.outcome.map(|o| o.winner()) {
            Some(Party::Liberal) => ("The liberals win!", LIBERAL_COLOR),
            Some(Party::Fascist) => ("The fascists win!", FASCIST_COLOR),
            None => ("The game was ended early", NEUTRAL_COLOR),
        };
        let roles = self
            .players
            .iter()
            .map(|p| {
                let mut line = p.reveal_to_others();
                if !p.alive {
                    line.push_str(" (dead)");
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n");

        let mut embed = Embed::new(title, color);
        if let Some(outcome) = self.outcome {
            embed = embed.line("Outcome", outcome.describe());
        }
        embed = embed.line("Board", self.board.summary()).line("Roles", roles);
        if let (Some(started), Some(finished)) = (self.started, self.finished) {
            let minutes = (finished - started).num_minutes();
            embed = embed.line(
                "Played",
                format!("{} for {} minutes", started.format("%Y-%m-%d %H:%M UTC"), minutes),
            );
        }
        embed
    }
}

fn describe_phase(phase: Phase) -> &'static str {
    match phase {
        Phase::Setup => "Setting up",
        Phase::AssignPresident => "Assigning the next president",
        Phase::NominateChancellor => "The president is nominating a chancellor",
        Phase::VoteOnNomination => "Voting on the nominated government",
        Phase::PresidentDrawPolicies => "The president is drawing policies",
        Phase::PresidentDiscardPolicy => "The president is discarding a policy",
        Phase::ChancellorDiscardPolicy => "The chancellor is discarding a policy",
        Phase::ChancellorVetoRequested => "The president is considering a veto",
        Phase::PresidentPolicyPeek => "The president is peeking at policies",
        Phase::PresidentInvestigatePlayer => "The president is investigating a player",
        Phase::SpeciallyElectPresident => "The president is calling a special election",
        Phase::PresidentShootPlayer => "The president is executing a player",
        Phase::ConfirmEndGame => "Waiting for confirmation to end the game",
        Phase::Finished => "Finished",
    }
}
