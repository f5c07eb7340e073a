//! Rows, boards and hands
//!
//! A row has four positional slots; the slot index is the card's column, so
//! the same index across front/middle/back forms a column. Dead cards may
//! still sit in a slot (the turn driver clears them on its own schedule) but
//! every query here skips them.

use crate::core::{Card, CardId, Effect, EffectKind, RowName};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Slots per row
pub const ROW_CAPACITY: usize = 4;

/// Live heroes allowed on one side
pub const HERO_CAP: usize = 6;

/// Largest health, shield, power, or synergy value a snapshot may carry
pub const STAT_CAP: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub slots: [Option<Card>; ROW_CAPACITY],
    #[serde(default)]
    pub synergy: u32,
    /// Row-wide markers (barriers, hazards)
    #[serde(default)]
    pub effects: SmallVec<[Effect; 2]>,
}

impl Row {
    pub fn new() -> Self {
        Row::default()
    }

    /// Live cards with their slot (column) index
    pub fn live(&self) -> impl Iterator<Item = (usize, &Card)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, card)| card.as_ref().filter(|c| c.is_alive()).map(|c| (slot, c)))
    }

    pub fn live_mut(&mut self) -> impl Iterator<Item = &mut Card> + '_ {
        self.slots
            .iter_mut()
            .filter_map(|card| card.as_mut().filter(|c| c.is_alive()))
    }

    pub fn live_count(&self) -> usize {
        self.live().count()
    }

    pub fn is_full(&self) -> bool {
        self.free_slots().next().is_none()
    }

    /// Slots that are empty or hold a dead card
    pub fn free_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, card)| card.as_ref().map(|c| !c.is_alive()).unwrap_or(true))
            .map(|(slot, _)| slot)
    }

    /// Live card in a slot
    pub fn card_at(&self, slot: usize) -> Option<&Card> {
        self.slots
            .get(slot)
            .and_then(|c| c.as_ref())
            .filter(|c| c.is_alive())
    }

    pub fn card_at_mut(&mut self, slot: usize) -> Option<&mut Card> {
        self.slots
            .get_mut(slot)
            .and_then(|c| c.as_mut())
            .filter(|c| c.is_alive())
    }

    /// Sum of live power, each card using its power for this row
    pub fn power(&self, row: RowName) -> u32 {
        self.live().map(|(_, c)| c.power_in(row)).fold(0, u32::saturating_add)
    }

    pub fn has_effect(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Place a card into a free slot, replacing any dead occupant
    pub fn place(&mut self, slot: usize, card: Card) -> bool {
        match self.slots.get_mut(slot) {
            Some(entry) if entry.as_ref().map(|c| !c.is_alive()).unwrap_or(true) => {
                *entry = Some(card);
                true
            }
            _ => false,
        }
    }
}

/// One side's three rows
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub front: Row,
    #[serde(default)]
    pub middle: Row,
    #[serde(default)]
    pub back: Row,
}

impl Board {
    pub fn new() -> Self {
        Board::default()
    }

    pub fn row(&self, row: RowName) -> &Row {
        match row {
            RowName::Front => &self.front,
            RowName::Middle => &self.middle,
            RowName::Back => &self.back,
        }
    }

    pub fn row_mut(&mut self, row: RowName) -> &mut Row {
        match row {
            RowName::Front => &mut self.front,
            RowName::Middle => &mut self.middle,
            RowName::Back => &mut self.back,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = (RowName, &Row)> + '_ {
        RowName::ALL.into_iter().map(move |name| (name, self.row(name)))
    }

    /// Every live card with its row and slot
    pub fn live(&self) -> impl Iterator<Item = (RowName, usize, &Card)> + '_ {
        self.rows()
            .flat_map(|(name, row)| row.live().map(move |(slot, card)| (name, slot, card)))
    }

    pub fn live_count(&self) -> usize {
        self.live().count()
    }

    pub fn is_empty(&self) -> bool {
        self.live_count() == 0
    }

    /// Side is below the hero cap
    pub fn has_room(&self) -> bool {
        self.live_count() < HERO_CAP
    }

    /// A card could be deployed into this row right now
    pub fn can_deploy(&self, row: RowName) -> bool {
        self.has_room() && !self.row(row).is_full()
    }

    /// Live cards in one column, front to back
    pub fn column(&self, slot: usize) -> impl Iterator<Item = (RowName, &Card)> + '_ {
        self.rows()
            .filter_map(move |(name, row)| row.card_at(slot).map(|c| (name, c)))
    }

    pub fn column_count(&self, slot: usize) -> usize {
        self.column(slot).count()
    }

    pub fn find(&self, id: CardId) -> Option<(RowName, usize, &Card)> {
        self.live().find(|(_, _, c)| c.id == id)
    }

    pub fn find_mut(&mut self, id: CardId) -> Option<&mut Card> {
        [&mut self.front, &mut self.middle, &mut self.back]
            .into_iter()
            .flat_map(|row| row.slots.iter_mut())
            .filter_map(|c| c.as_mut())
            .find(|c| c.id == id && c.is_alive())
    }

    /// Total live power, each card counted in its own row
    pub fn total_power(&self) -> u32 {
        self.rows().map(|(name, row)| row.power(name)).fold(0, u32::saturating_add)
    }

    pub fn total_synergy(&self) -> u32 {
        self.rows().map(|(_, row)| row.synergy).fold(0, u32::saturating_add)
    }

    /// A live tank sits in front of (row, slot) in the same column
    pub fn is_covered(&self, row: RowName, slot: usize) -> bool {
        row.ahead().iter().any(|ahead| {
            self.row(*ahead)
                .card_at(slot)
                .map(|c| c.role == crate::core::Role::Tank)
                .unwrap_or(false)
        })
    }

    /// Live cards whose ultimate can be fired now
    pub fn ready_ultimates(&self) -> impl Iterator<Item = (RowName, usize, &Card)> + '_ {
        self.live().filter(|(_, _, c)| c.has_ultimate_available())
    }
}

/// Undeployed cards for one side
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new(cards: Vec<Card>) -> Self {
        Hand { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn take(&mut self, id: CardId) -> Option<Card> {
        let index = self.cards.iter().position(|c| c.id == id)?;
        Some(self.cards.remove(index))
    }
}
