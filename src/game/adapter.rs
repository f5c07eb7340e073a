//! Read adapter between the host game and the engine
//!
//! The host exposes its board through [`BoardReader`]. Every query can fail
//! with `AdapterUnavailable`; [`snapshot_from_reader`] absorbs those failures
//! by treating the missing data as empty, logs them, and hands the engine a
//! plain [`GameState`].

use crate::core::{Board, Card, CardId, Effect, GameState, Hand, Row, RowName, Side, ROW_CAPACITY};
use crate::game::logger::DecisionLogger;
use crate::{Result, TacticsError};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// What the host reports about one row
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RowView {
    /// Card id in each slot
    pub slots: [Option<CardId>; ROW_CAPACITY],
    pub synergy: u32,
    #[serde(default)]
    pub effects: SmallVec<[Effect; 2]>,
}

/// Turn-driver counters the host persists between calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TurnCounters {
    pub turn_number: u32,
    pub round_number: u32,
    pub actions_this_turn: u32,
    pub ai_turns_taken: u32,
}

/// Read-only view of the host game
pub trait BoardReader {
    fn row(&self, side: Side, row: RowName) -> Result<RowView>;

    fn card(&self, id: CardId) -> Result<Card>;

    /// Card ids in a side's hand
    fn hand(&self, side: Side) -> Result<Vec<CardId>>;

    /// Number of cards in a side's hand; hosts that hide the enemy hand
    /// override this
    fn hand_size(&self, side: Side) -> Result<u32> {
        self.hand(side).map(|ids| ids.len() as u32)
    }

    fn counters(&self) -> Result<TurnCounters> {
        Ok(TurnCounters::default())
    }
}

/// Build a [`GameState`] from a reader, treating failed queries as empty
pub fn snapshot_from_reader(reader: &dyn BoardReader, logger: &DecisionLogger) -> GameState {
    let ai_board = read_board(reader, Side::Ai, logger);
    let enemy_board = read_board(reader, Side::Enemy, logger);

    let ai_hand = match reader.hand(Side::Ai) {
        Ok(ids) => Hand::new(
            ids.into_iter()
                .filter_map(|id| absorb(reader.card(id), &format!("hand card {id}"), logger))
                .collect(),
        ),
        Err(err) => {
            logger.adapter_failure("ai hand", &err);
            Hand::default()
        }
    };

    let enemy_hand_size = absorb(reader.hand_size(Side::Enemy), "enemy hand size", logger).unwrap_or(0);
    let counters = absorb(reader.counters(), "turn counters", logger).unwrap_or_default();

    GameState {
        ai_board,
        enemy_board,
        ai_hand,
        enemy_hand_size,
        turn_number: counters.turn_number,
        round_number: counters.round_number,
        actions_this_turn: counters.actions_this_turn,
        ai_turns_taken: counters.ai_turns_taken,
    }
}

fn read_board(reader: &dyn BoardReader, side: Side, logger: &DecisionLogger) -> Board {
    let mut board = Board::new();
    for name in RowName::ALL {
        let Some(view) = absorb(reader.row(side, name), &format!("{side} {name} row"), logger) else {
            continue;
        };
        let row: &mut Row = board.row_mut(name);
        row.synergy = view.synergy;
        row.effects = view.effects;
        for (slot, id) in view.slots.iter().enumerate() {
            if let Some(id) = id {
                row.slots[slot] = absorb(reader.card(*id), &format!("card {id}"), logger);
            }
        }
    }
    board
}

fn absorb<T>(result: Result<T>, query: &str, logger: &DecisionLogger) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            logger.adapter_failure(query, &err);
            None
        }
    }
}

/// Reader over an in-memory [`GameState`]
///
/// Lets tests and the CLI drive the adapter path with snapshot files.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotReader<'a> {
    state: &'a GameState,
}

impl<'a> SnapshotReader<'a> {
    pub fn new(state: &'a GameState) -> Self {
        SnapshotReader { state }
    }

    fn board(&self, side: Side) -> &'a Board {
        match side {
            Side::Ai => &self.state.ai_board,
            Side::Enemy => &self.state.enemy_board,
        }
    }
}

impl<'a> BoardReader for SnapshotReader<'a> {
    fn row(&self, side: Side, row: RowName) -> Result<RowView> {
        let source = self.board(side).row(row);
        Ok(RowView {
            slots: std::array::from_fn(|slot| source.slots[slot].as_ref().map(|c| c.id)),
            synergy: source.synergy,
            effects: source.effects.clone(),
        })
    }

    fn card(&self, id: CardId) -> Result<Card> {
        let on_board = [&self.state.ai_board, &self.state.enemy_board]
            .into_iter()
            .flat_map(|b| [&b.front, &b.middle, &b.back])
            .flat_map(|r| r.slots.iter().flatten());
        on_board
            .chain(self.state.ai_hand.iter())
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| TacticsError::AdapterUnavailable(format!("card {id} not found")))
    }

    fn hand(&self, side: Side) -> Result<Vec<CardId>> {
        match side {
            Side::Ai => Ok(self.state.ai_hand.iter().map(|c| c.id).collect()),
            Side::Enemy => Err(TacticsError::AdapterUnavailable(
                "enemy hand is hidden".to_string(),
            )),
        }
    }

    fn hand_size(&self, side: Side) -> Result<u32> {
        match side {
            Side::Ai => Ok(self.state.ai_hand.len() as u32),
            Side::Enemy => Ok(self.state.enemy_hand_size),
        }
    }

    fn counters(&self) -> Result<TurnCounters> {
        Ok(TurnCounters {
            turn_number: self.state.turn_number,
            round_number: self.state.round_number,
            actions_this_turn: self.state.actions_this_turn,
            ai_turns_taken: self.state.ai_turns_taken,
        })
    }
}
