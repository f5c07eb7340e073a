//! Decision-time game snapshot

use crate::core::{Board, Card, CardId, Hand, HERO_CAP, ROW_CAPACITY, STAT_CAP};
use crate::{Result, TacticsError};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Everything the engine sees when asked for one decision
///
/// Produced by the turn driver once per decision. The engine only reads it;
/// any simulation works on owned clones.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameState {
    pub ai_board: Board,
    pub enemy_board: Board,
    pub ai_hand: Hand,
    /// Cards the opponent holds; only the count is visible
    #[serde(default)]
    pub enemy_hand_size: u32,
    #[serde(default)]
    pub turn_number: u32,
    #[serde(default)]
    pub round_number: u32,
    /// Actions the AI already took this turn (persisted by the turn driver)
    #[serde(default)]
    pub actions_this_turn: u32,
    /// Turns the AI has taken this match (persisted by the turn driver)
    #[serde(default)]
    pub ai_turns_taken: u32,
}

impl GameState {
    pub fn new(ai_board: Board, enemy_board: Board, ai_hand: Hand) -> Self {
        GameState {
            ai_board,
            enemy_board,
            ai_hand,
            ..GameState::default()
        }
    }

    /// Check the data model invariants
    ///
    /// Returns `InvalidState` describing the first violation found.
    pub fn validate(&self) -> Result<()> {
        let mut seen = FxHashSet::default();

        for (label, board) in [("ai", &self.ai_board), ("enemy", &self.enemy_board)] {
            let live = board.live_count();
            if live > HERO_CAP {
                return Err(TacticsError::InvalidState(format!(
                    "{label} board has {live} live heroes (cap {HERO_CAP})"
                )));
            }
            for (row_name, row) in board.rows() {
                if row.live_count() > ROW_CAPACITY {
                    return Err(TacticsError::InvalidState(format!(
                        "{label} {row_name} row holds more than {ROW_CAPACITY} heroes"
                    )));
                }
                if row.synergy > STAT_CAP {
                    return Err(TacticsError::InvalidState(format!(
                        "{label} {row_name} row synergy {} exceeds {STAT_CAP}",
                        row.synergy
                    )));
                }
                for card in row.slots.iter().flatten() {
                    check_card(card, label)?;
                    check_unique(&mut seen, card.id)?;
                }
            }
        }

        for card in self.ai_hand.iter() {
            check_card(card, "hand")?;
            if !card.is_alive() {
                return Err(TacticsError::InvalidState(format!(
                    "hand card {} ({}) has no health",
                    card.id, card.hero
                )));
            }
            check_unique(&mut seen, card.id)?;
        }

        Ok(())
    }
}

fn check_card(card: &Card, label: &str) -> Result<()> {
    if card.max_health == 0 {
        return Err(TacticsError::InvalidState(format!(
            "{label} card {} ({}) has max_health 0",
            card.id, card.hero
        )));
    }
    if card.health > card.max_health {
        return Err(TacticsError::InvalidState(format!(
            "{label} card {} ({}) has health {} above max {}",
            card.id, card.hero, card.health, card.max_health
        )));
    }
    let stats = [
        ("max_health", card.max_health),
        ("shield", card.shield),
        ("power", card.power.max()),
        ("synergy gain", card.synergy_gain.max()),
    ];
    for (stat, value) in stats {
        if value > STAT_CAP {
            return Err(TacticsError::InvalidState(format!(
                "{label} card {} ({}) has {stat} {value} above {STAT_CAP}",
                card.id, card.hero
            )));
        }
    }
    Ok(())
}

fn check_unique(seen: &mut FxHashSet<CardId>, id: CardId) -> Result<()> {
    if !seen.insert(id) {
        return Err(TacticsError::InvalidState(format!(
            "card id {id} appears more than once"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EntityId, Role};

    fn card(id: u32) -> Card {
        Card::new(EntityId::new(id), "soldier", Role::Damage, 3).with_power(2, 2, 2)
    }

    #[test]
    fn test_empty_state_is_valid() {
        assert!(GameState::default().validate().is_ok());
    }

    #[test]
    fn test_health_above_max_rejected() {
        let mut state = GameState::default();
        state.ai_board.front.place(0, card(1).with_health(9));
        let err = state.validate().unwrap_err();
        assert!(matches!(err, TacticsError::InvalidState(_)));
        assert!(err.to_string().contains("above max"));
    }

    #[test]
    fn test_hero_cap_rejected() {
        let mut state = GameState::default();
        for slot in 0..4 {
            state.enemy_board.front.place(slot, card(slot as u32));
        }
        for slot in 0..3 {
            state.enemy_board.back.place(slot, card(10 + slot as u32));
        }
        assert!(state.validate().is_err());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut state = GameState::default();
        state.ai_board.front.place(0, card(1));
        state.ai_hand.cards.push(card(1));
        let err = state.validate().unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_dead_hand_card_rejected() {
        let mut state = GameState::default();
        state.ai_hand.cards.push(card(4).with_health(0));
        assert!(state.validate().is_err());
    }

    #[test]
    fn test_oversized_stats_rejected() {
        let mut state = GameState::default();
        state.enemy_board.front.place(0, card(1).with_shield(u32::MAX));
        let err = state.validate().unwrap_err();
        assert!(err.to_string().contains("shield"));

        let mut state = GameState::default();
        state.ai_hand.cards.push(card(2).with_power(u32::MAX, 0, 0));
        assert!(state.validate().unwrap_err().to_string().contains("power"));

        let mut state = GameState::default();
        state.ai_board.back.synergy = STAT_CAP + 1;
        assert!(state.validate().unwrap_err().to_string().contains("synergy"));
    }

    #[test]
    fn test_stats_at_cap_accepted() {
        let mut state = GameState::default();
        state.ai_board.front.place(
            0,
            card(1).with_shield(STAT_CAP).with_power(STAT_CAP, STAT_CAP, STAT_CAP),
        );
        state.ai_board.front.synergy = STAT_CAP;
        assert!(state.validate().is_ok());
    }
}
