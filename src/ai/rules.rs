//! Hero-specific heuristic rules
//!
//! A few heroes need bespoke placement or ultimate-timing logic. Those rules
//! are trait objects registered per hero id; any hero without a registration
//! falls back to the generic per-shape ultimate rule and to plain row
//! scoring. Rules are pure: they read the boards and return numbers.

use crate::ai::positioning::{NetKillPlacement, ProtectorPlacement, SynergyThresholdPlacement};
use crate::ai::ultimates::{NetKillUltimate, ShapeUltimateRule, SynergyThresholdUltimate};
use crate::ai::win_condition::GamePlan;
use crate::core::hero::{self, Archetype, HeroProfile, ROSTER};
use crate::core::{Board, Card, HeroId, PerRow, RowName};
use crate::game::actions::Target;
use rustc_hash::FxHashMap;

/// Row scores for one placement; `None` marks an illegal row
pub type RowScores = PerRow<Option<f64>>;

/// Inputs to a placement rule
#[derive(Debug, Clone, Copy)]
pub struct PlacementContext<'a> {
    pub card: &'a Card,
    pub profile: Option<&'static HeroProfile>,
    pub ai: &'a Board,
    pub enemy: &'a Board,
    pub plan: GamePlan,
}

/// Inputs to an ultimate timing rule: the caster and where it stands
#[derive(Debug, Clone, Copy)]
pub struct UltimateContext<'a> {
    pub card: &'a Card,
    pub row: RowName,
    pub slot: usize,
    pub profile: Option<&'static HeroProfile>,
    pub ai: &'a Board,
    pub enemy: &'a Board,
}

/// Where to aim an ultimate and how much firing it now is worth
#[derive(Debug, Clone, PartialEq)]
pub struct UltimatePlan {
    pub target: Target,
    pub priority: f64,
    pub rationale: &'static str,
}

/// Adjusts the generic row scores for one hero
pub trait PositioningRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Add to (or subtract from) the legal entries of `scores`
    fn adjust(&self, ctx: &PlacementContext<'_>, scores: &mut RowScores);
}

/// Decides when and where a hero's ultimate should fire
pub trait UltimateTimingRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn plan(&self, ctx: &UltimateContext<'_>) -> UltimatePlan;
}

/// Per-hero rule lookup with a generic fallback
pub struct RuleRegistry {
    positioning: FxHashMap<String, Box<dyn PositioningRule>>,
    ultimates: FxHashMap<String, Box<dyn UltimateTimingRule>>,
    fallback: ShapeUltimateRule,
}

impl RuleRegistry {
    /// Registry with no hero-specific rules
    pub fn empty() -> Self {
        RuleRegistry {
            positioning: FxHashMap::default(),
            ultimates: FxHashMap::default(),
            fallback: ShapeUltimateRule,
        }
    }

    /// Registry with the bespoke rules for every roster hero that needs one
    pub fn builtin() -> Self {
        let mut registry = RuleRegistry::empty();
        for profile in ROSTER {
            let id = HeroId::new(profile.id);
            if profile.has(Archetype::Protector) {
                registry.register_positioning(&id, Box::new(ProtectorPlacement));
            }
            if profile.has(Archetype::NetKill) {
                registry.register_positioning(&id, Box::new(NetKillPlacement));
                registry.register_ultimate(&id, Box::new(NetKillUltimate));
            }
            if profile.has(Archetype::SynergyDependent) {
                registry.register_positioning(&id, Box::new(SynergyThresholdPlacement));
                registry.register_ultimate(&id, Box::new(SynergyThresholdUltimate));
            }
        }
        registry
    }

    /// Register (or replace) a hero's placement rule
    pub fn register_positioning(&mut self, hero: &HeroId, rule: Box<dyn PositioningRule>) {
        self.positioning.insert(hero.as_str().to_string(), rule);
    }

    /// Register (or replace) a hero's ultimate timing rule
    pub fn register_ultimate(&mut self, hero: &HeroId, rule: Box<dyn UltimateTimingRule>) {
        self.ultimates.insert(hero.as_str().to_string(), rule);
    }

    pub fn positioning_rule(&self, hero: &HeroId) -> Option<&dyn PositioningRule> {
        self.positioning.get(hero.as_str()).map(|r| r.as_ref())
    }

    /// The hero's registered rule, or the generic per-shape rule
    pub fn ultimate_rule(&self, hero: &HeroId) -> &dyn UltimateTimingRule {
        match self.ultimates.get(hero.as_str()) {
            Some(rule) => rule.as_ref(),
            None => &self.fallback,
        }
    }

    /// Plan the ultimate of the card at (row, slot) on the AI board
    pub fn plan_ultimate(
        &self,
        card: &Card,
        row: RowName,
        slot: usize,
        ai: &Board,
        enemy: &Board,
    ) -> UltimatePlan {
        let ctx = UltimateContext {
            card,
            row,
            slot,
            profile: hero::lookup(&card.hero),
            ai,
            enemy,
        };
        self.ultimate_rule(&card.hero).plan(&ctx)
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        RuleRegistry::builtin()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut positioning: Vec<&str> = self.positioning.keys().map(|k| k.as_str()).collect();
        let mut ultimates: Vec<&str> = self.ultimates.keys().map(|k| k.as_str()).collect();
        positioning.sort_unstable();
        ultimates.sort_unstable();
        f.debug_struct("RuleRegistry")
            .field("positioning", &positioning)
            .field("ultimates", &ultimates)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EntityId, Role};

    #[test]
    fn test_builtin_registrations() {
        let registry = RuleRegistry::builtin();
        assert_eq!(
            registry.positioning_rule(&HeroId::new("reinhardt")).map(|r| r.name()),
            Some("protector")
        );
        assert_eq!(registry.ultimate_rule(&HeroId::new("dva")).name(), "net_kill");
        assert_eq!(
            registry.ultimate_rule(&HeroId::new("zarya")).name(),
            "synergy_threshold"
        );
        assert!(registry.positioning_rule(&HeroId::new("mercy")).is_none());
    }

    #[test]
    fn test_unknown_hero_uses_fallback() {
        let registry = RuleRegistry::builtin();
        assert_eq!(registry.ultimate_rule(&HeroId::new("new_hero")).name(), "by_shape");
    }

    struct Never;

    impl UltimateTimingRule for Never {
        fn name(&self) -> &'static str {
            "never"
        }

        fn plan(&self, _ctx: &UltimateContext<'_>) -> UltimatePlan {
            UltimatePlan {
                target: Target::None,
                priority: 0.0,
                rationale: "held",
            }
        }
    }

    #[test]
    fn test_registration_overrides_fallback() {
        let mut registry = RuleRegistry::empty();
        let hero = HeroId::new("widowmaker");
        registry.register_ultimate(&hero, Box::new(Never));

        let card = Card::new(EntityId::new(1), "widowmaker", Role::Damage, 3).with_ultimate_ready();
        let plan = registry.plan_ultimate(&card, RowName::Back, 0, &Board::new(), &Board::new());
        assert_eq!(plan.rationale, "held");
        assert_eq!(plan.priority, 0.0);
    }
}
