use super::message::{Embed, NEUTRAL_COLOR};
use super::{Game, Phase};
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum ExecutivePower {
    /// The president must peek at the top three cards on the deck.
    PolicyPeek,
    /// The president must investigate a player's loyalty.
    InvestigateLoyalty,
    /// The president must call a special election.
    SpecialElection,
    /// The president must execute a player.
    Execution,
}

impl fmt::Display for ExecutivePower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExecutivePower::PolicyPeek => "Policy Peek",
            ExecutivePower::InvestigateLoyalty => "Investigate Loyalty",
            ExecutivePower::SpecialElection => "Special Election",
            ExecutivePower::Execution => "Execution",
        })
    }
}

impl Game {
    /// Begins an executive power unlocked by the policy just enacted.
    pub(super) fn start_executive_power(&mut self, power: ExecutivePower) {
        use ExecutivePower::*;

        let Some(president) = self.president else {
            log::warn!("{} unlocked without a president", power);
            return;
        };
        let name = self.players[president].name.clone();
        log::debug!("{} unlocked for {}", power, name);

        match power {
            PolicyPeek => {
                self.set_phase(Phase::PresidentPolicyPeek);
                self.policy_peek(president);
            }
            InvestigateLoyalty => {
                self.set_phase(Phase::PresidentInvestigatePlayer);
                self.announce(format!("{}, choose a player to investigate with investigate <player>.", name));
            }
            SpecialElection => {
                self.set_phase(Phase::SpeciallyElectPresident);
                self.announce(format!("{}, choose the next president with elect <player>.", name));
            }
            Execution => {
                self.set_phase(Phase::PresidentShootPlayer);
                self.announce(format!("{}, choose a player to execute with shoot <player>.", name));
            }
        }
    }

    /// Shows the president the top three policies without drawing them, then moves on.
    fn policy_peek(&mut self, president: usize) {
        self.check_deck();
        let mut embed = Embed::new("The top three policies", NEUTRAL_COLOR);
        for (i, card) in self.deck.peek_three().into_iter().enumerate() {
            embed = embed.line(format!("{}", i + 1), card.to_string());
        }
        self.tell(president, embed);
        self.announce(format!("{} has looked at the top three policies.", self.players[president].name));

        self.set_phase(Phase::AssignPresident);
        self.assign_next_president(None);
    }

    /// Called when the president chooses a player whose party membership they will learn.
    pub fn investigate_player(&mut self, actor: &str, target: &str) -> Result<(), GameError> {
        self.check_phase(Phase::PresidentInvestigatePlayer)?;
        let president = self.check_president(actor)?;
        let suspect = self.find_player(target)?;

        if suspect == president {
            return Err(GameError::CannotTargetSelf);
        }
        self.check_alive(suspect)?;
        if self.investigated.contains(&suspect) {
            return Err(GameError::AlreadyInvestigated(self.players[suspect].name.clone()));
        }

        self.investigated.push(suspect);
        let party = self.players[suspect]
            .party()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        self.tell(president, format!("{} is a member of the {} party.", self.players[suspect].name, party));
        self.announce(format!(
            "{} has investigated {}.",
            self.players[president].name, self.players[suspect].name
        ));

        self.set_phase(Phase::AssignPresident);
        self.assign_next_president(None);
        Ok(())
    }

    /// Called when the president chooses the next president.
    pub fn specially_elect_president(&mut self, actor: &str, target: &str) -> Result<(), GameError> {
        self.check_phase(Phase::SpeciallyElectPresident)?;
        let president = self.check_president(actor)?;
        let chosen = self.find_player(target)?;

        if chosen == president {
            return Err(GameError::CannotTargetSelf);
        }
        self.check_alive(chosen)?;

        self.announce(format!(
            "{} has called a special election. {} will be the next president.",
            self.players[president].name, self.players[chosen].name
        ));
        self.set_phase(Phase::AssignPresident);
        self.assign_next_president(Some(chosen));
        Ok(())
    }

    /// Called when the president chooses a player to execute.
    pub fn shoot_player(&mut self, actor: &str, target: &str) -> Result<(), GameError> {
        self.check_phase(Phase::PresidentShootPlayer)?;
        let president = self.check_president(actor)?;
        let victim = self.find_player(target)?;

        if victim == president {
            return Err(GameError::CannotTargetSelf);
        }
        self.check_alive(victim)?;

        let player = &mut self.players[victim];
        player.alive = false;
        player.not_hitler = !player.is_hitler();
        let name = player.name.clone();
        self.announce(format!("{} has executed {}.", self.players[president].name, name));

        if self.check_game_over() {
            return Ok(());
        }

        self.announce(format!("{} was not Hitler.", name));
        self.set_phase(Phase::AssignPresident);
        self.assign_next_president(None);
        Ok(())
    }
}
