//! Property tests for the board evaluator
//!
//! Boards are generated from the built-in roster plus an unknown hero so the
//! fallbacks are exercised too. Some generated cards sit dead (0 HP) in their
//! slot, as the host leaves them until the slot is reused.

use hero_tactics::ai::evaluator::{evaluate, BoardEvaluator};
use hero_tactics::ai::Personality;
use hero_tactics::core::{Board, Card, EntityId, RowName, Role};
use proptest::prelude::*;

const HEROES: &[(&str, Role)] = &[
    ("reinhardt", Role::Tank),
    ("dva", Role::Tank),
    ("zarya", Role::Tank),
    ("hanzo", Role::Damage),
    ("junkrat", Role::Damage),
    ("widowmaker", Role::Damage),
    ("mercy", Role::Support),
    ("ana", Role::Support),
    ("lucio", Role::Support),
    ("mystery", Role::Other),
];

#[derive(Debug, Clone)]
struct UnitDraw {
    row: usize,
    slot: usize,
    hero: usize,
    health: u32,
    extra_max: u32,
    shield: u32,
    power: (u32, u32, u32),
    ultimate_ready: bool,
}

fn unit_draw() -> impl Strategy<Value = UnitDraw> {
    (
        0..3usize,
        0..4usize,
        0..HEROES.len(),
        0..7u32,
        0..3u32,
        0..3u32,
        (0..4u32, 0..4u32, 0..4u32),
        any::<bool>(),
    )
        .prop_map(
            |(row, slot, hero, health, extra_max, shield, power, ultimate_ready)| UnitDraw {
                row,
                slot,
                hero,
                health,
                extra_max,
                shield,
                power,
                ultimate_ready,
            },
        )
}

fn board_strategy(id_base: u32) -> impl Strategy<Value = Board> {
    (
        prop::collection::vec(unit_draw(), 0..=6),
        (0..6u32, 0..6u32, 0..6u32),
    )
        .prop_map(move |(units, (front, middle, back))| {
            let mut board = Board::new();
            for (i, draw) in units.into_iter().enumerate() {
                let (hero, role) = HEROES[draw.hero];
                let max = draw.health + draw.extra_max + 1;
                let mut card = Card::new(EntityId::new(id_base + i as u32), hero, role, max)
                    .with_health(draw.health)
                    .with_shield(draw.shield)
                    .with_power(draw.power.0, draw.power.1, draw.power.2);
                if draw.ultimate_ready {
                    card = card.with_ultimate_ready();
                }
                board.row_mut(RowName::ALL[draw.row]).place(draw.slot, card);
            }
            board.front.synergy = front;
            board.middle.synergy = middle;
            board.back.synergy = back;
            board
        })
}

/// Same board with every dead card lifted out of its slot
fn without_dead(board: &Board) -> Board {
    let mut cleared = board.clone();
    for row in RowName::ALL {
        for entry in cleared.row_mut(row).slots.iter_mut() {
            if entry.as_ref().map(|c| !c.is_alive()).unwrap_or(false) {
                *entry = None;
            }
        }
    }
    cleared
}

/// Slots holding a dead card
fn dead_slots(board: &Board) -> Vec<(RowName, usize)> {
    board
        .rows()
        .flat_map(|(name, row)| {
            row.slots
                .iter()
                .enumerate()
                .filter(|(_, c)| c.as_ref().map(|c| !c.is_alive()).unwrap_or(false))
                .map(move |(slot, _)| (name, slot))
        })
        .collect()
}

fn personality() -> impl Strategy<Value = Personality> {
    prop_oneof![
        Just(Personality::Balanced),
        Just(Personality::Aggressive),
        Just(Personality::Calculated),
    ]
}

proptest! {
    #[test]
    fn test_swapping_boards_negates_score(
        ai in board_strategy(1),
        enemy in board_strategy(100),
        personality in personality(),
    ) {
        let evaluator = BoardEvaluator::new(personality.weights());
        let forward = evaluator.evaluate(&ai, &enemy);
        let backward = evaluator.evaluate(&enemy, &ai);
        prop_assert_eq!(forward, -backward);
    }

    #[test]
    fn test_mirror_boards_score_zero(board in board_strategy(1)) {
        prop_assert_eq!(evaluate(&board, &board), 0.0);
    }

    #[test]
    fn test_extra_ally_health_never_hurts(
        ai in board_strategy(1),
        enemy in board_strategy(100),
        personality in personality(),
        pick in any::<prop::sample::Index>(),
        raise in 1..4u32,
    ) {
        let live: Vec<EntityId> = ai.live().map(|(_, _, c)| c.id).collect();
        prop_assume!(!live.is_empty());

        let evaluator = BoardEvaluator::new(personality.weights());
        let before = evaluator.evaluate(&ai, &enemy);

        let mut healed = ai.clone();
        let id = live[pick.index(live.len())];
        if let Some(card) = healed.find_mut(id) {
            card.max_health += raise;
            card.health += raise;
        }
        let after = evaluator.evaluate(&healed, &enemy);

        prop_assert!(after > before, "health raise lowered score: {} -> {}", before, after);
    }

    #[test]
    fn test_dead_cards_score_as_empty_slots(
        ai in board_strategy(1),
        enemy in board_strategy(100),
        personality in personality(),
    ) {
        let evaluator = BoardEvaluator::new(personality.weights());
        let with_dead = evaluator.evaluate(&ai, &enemy);
        let cleared = evaluator.evaluate(&without_dead(&ai), &without_dead(&enemy));
        prop_assert_eq!(with_dead, cleared);
    }

    #[test]
    fn test_reviving_scores_like_a_fresh_deploy(
        ai in board_strategy(1),
        enemy in board_strategy(100),
        personality in personality(),
        pick in any::<prop::sample::Index>(),
    ) {
        let dead = dead_slots(&ai);
        prop_assume!(!dead.is_empty());
        let (row, slot) = dead[pick.index(dead.len())];

        let mut revived = ai.clone();
        let fresh = match revived.row_mut(row).slots[slot].as_mut() {
            Some(card) => {
                card.health = 1;
                card.clone()
            }
            None => return Err(TestCaseError::fail("dead slot emptied")),
        };

        let mut deployed = without_dead(&ai);
        deployed.row_mut(row).place(slot, fresh);

        let evaluator = BoardEvaluator::new(personality.weights());
        prop_assert_eq!(
            evaluator.evaluate(&revived, &enemy),
            evaluator.evaluate(&deployed, &enemy)
        );
    }
}
