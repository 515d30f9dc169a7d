/// Player status and inventory: core counters, stackable items, leveled abilities.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::schema::action::Stat;
use crate::schema::scene::StatusOverride;

/// Starting value for lives, sense, and money.
pub const STAT_START: i32 = 3;
/// Upper bound enforced on stat gains.
pub const STAT_CAP: i32 = 3;

/// Mutable per-playthrough player record.
///
/// Stat fields are public for direct arithmetic in the effect resolver.
/// The item and ability maps are private: entries hold counts of at least
/// one, and anything that reaches zero is removed rather than stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub lives: i32,
    pub sense: i32,
    pub money: i32,
    /// Running ending counter; drives tier selection.
    pub treasures: i32,
    /// Consecutive correct quiz answers. Transient, never saved.
    pub quiz_streak: u32,
    items: FxHashMap<String, u32>,
    abilities: FxHashMap<String, u32>,
}

impl Default for PlayerState {
    fn default() -> Self {
        PlayerState::new()
    }
}

impl PlayerState {
    /// Fresh state for a new playthrough: all stats at 3, nothing held.
    pub fn new() -> Self {
        PlayerState {
            lives: STAT_START,
            sense: STAT_START,
            money: STAT_START,
            treasures: 0,
            quiz_streak: 0,
            items: FxHashMap::default(),
            abilities: FxHashMap::default(),
        }
    }

    /// Gains one point of the stat. No-op at the cap.
    pub fn gain_stat(&mut self, stat: Stat) {
        let value = self.stat_mut(stat);
        if *value < STAT_CAP {
            *value += 1;
        }
    }

    fn stat_mut(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::Lives => &mut self.lives,
            Stat::Sense => &mut self.sense,
            Stat::Money => &mut self.money,
        }
    }

    /// Applies a scene's status overrides. Present fields are set to the
    /// given absolute value; absent fields keep their current value.
    pub fn apply_override(&mut self, over: &StatusOverride) {
        if let Some(lives) = over.lives {
            self.lives = lives;
        }
        if let Some(sense) = over.sense {
            self.sense = sense;
        }
        if let Some(money) = over.money {
            self.money = money;
        }
        if let Some(treasures) = over.treasures {
            self.treasures = treasures;
        }
    }

    /// Floors lives and sense at zero. Values may dip below transiently
    /// while a token pass runs; nothing outside the pass may observe that.
    pub fn clamp_floor(&mut self) {
        self.lives = self.lives.max(0);
        self.sense = self.sense.max(0);
    }

    /// Adds one of the item, creating the entry at 1.
    pub fn grant_item(&mut self, name: &str) {
        *self.items.entry(name.to_string()).or_insert(0) += 1;
    }

    /// Grants every item in the list; duplicates accumulate.
    pub fn grant_items(&mut self, names: &[String]) {
        for name in names {
            self.grant_item(name);
        }
    }

    /// Consumes exactly one of the item. Returns false with state
    /// untouched when none are held.
    pub fn consume_item(&mut self, name: &str) -> bool {
        match self.items.get_mut(name) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                self.items.remove(name);
                true
            }
            None => false,
        }
    }

    /// Raises the ability one level, creating it at level 1.
    pub fn grant_ability(&mut self, name: &str) {
        *self.abilities.entry(name.to_string()).or_insert(0) += 1;
    }

    /// Spends one level of the ability. Same removal rule as items.
    pub fn consume_ability(&mut self, name: &str) -> bool {
        match self.abilities.get_mut(name) {
            Some(level) if *level > 1 => {
                *level -= 1;
                true
            }
            Some(_) => {
                self.abilities.remove(name);
                true
            }
            None => false,
        }
    }

    /// Count of the item currently held, 0 when absent.
    pub fn item_count(&self, name: &str) -> u32 {
        self.items.get(name).copied().unwrap_or(0)
    }

    /// Current level of the ability, 0 when absent.
    pub fn ability_level(&self, name: &str) -> u32 {
        self.abilities.get(name).copied().unwrap_or(0)
    }

    /// Inventory as (name, count) pairs sorted by name.
    pub fn items(&self) -> Vec<(String, u32)> {
        let mut pairs: Vec<(String, u32)> =
            self.items.iter().map(|(name, count)| (name.clone(), *count)).collect();
        pairs.sort();
        pairs
    }

    /// Abilities as (name, level) pairs sorted by name.
    pub fn abilities(&self) -> Vec<(String, u32)> {
        let mut pairs: Vec<(String, u32)> =
            self.abilities.iter().map(|(name, level)| (name.clone(), *level)).collect();
        pairs.sort();
        pairs
    }

    /// Item labels in the product convention, e.g. "지도 x 2".
    pub fn item_labels(&self) -> Vec<String> {
        self.items()
            .into_iter()
            .map(|(name, count)| format!("{} x {}", name, count))
            .collect()
    }

    /// Ability labels in the product convention, e.g. "자물쇠 따기 lv. 1".
    pub fn ability_labels(&self) -> Vec<String> {
        self.abilities()
            .into_iter()
            .map(|(name, level)| format!("{} lv. {}", name, level))
            .collect()
    }

    /// Rebuilds both maps from saved pairs. Zero-count rows in a
    /// hand-edited save are dropped rather than stored.
    pub fn restore_inventory(&mut self, items: &[(String, u32)], abilities: &[(String, u32)]) {
        self.items = items
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(name, count)| (name.clone(), *count))
            .collect();
        self.abilities = abilities
            .iter()
            .filter(|(_, level)| *level > 0)
            .map(|(name, level)| (name.clone(), *level))
            .collect();
    }

    /// Back to the fresh-playthrough state.
    pub fn reset(&mut self) {
        *self = PlayerState::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_starts_full() {
        let state = PlayerState::new();
        assert_eq!(state.lives, 3);
        assert_eq!(state.sense, 3);
        assert_eq!(state.money, 3);
        assert_eq!(state.treasures, 0);
        assert_eq!(state.quiz_streak, 0);
        assert!(state.items().is_empty());
        assert!(state.abilities().is_empty());
    }

    #[test]
    fn gain_at_cap_is_a_no_op() {
        let mut state = PlayerState::new();
        state.gain_stat(Stat::Lives);
        assert_eq!(state.lives, 3);

        state.lives = 1;
        state.gain_stat(Stat::Lives);
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn override_sets_absolute_values() {
        let mut state = PlayerState::new();
        state.treasures = 2;
        state.apply_override(&StatusOverride {
            lives: Some(1),
            money: Some(0),
            ..StatusOverride::default()
        });
        assert_eq!(state.lives, 1);
        assert_eq!(state.money, 0);
        // Absent fields untouched.
        assert_eq!(state.sense, 3);
        assert_eq!(state.treasures, 2);
    }

    #[test]
    fn duplicate_grants_accumulate() {
        let mut state = PlayerState::new();
        state.grant_items(&["지도".to_string(), "지도".to_string()]);
        assert_eq!(state.item_count("지도"), 2);

        state.grant_item("지도");
        assert_eq!(state.item_count("지도"), 3);
    }

    #[test]
    fn consume_decrements_then_removes() {
        let mut state = PlayerState::new();
        state.grant_items(&["지도".to_string(), "지도".to_string()]);

        assert!(state.consume_item("지도"));
        assert_eq!(state.item_count("지도"), 1);

        assert!(state.consume_item("지도"));
        assert_eq!(state.item_count("지도"), 0);
        assert!(state.items().is_empty());
    }

    #[test]
    fn consume_missing_item_fails_cleanly() {
        let mut state = PlayerState::new();
        assert!(!state.consume_item("보석"));
        assert!(state.items().is_empty());
    }

    #[test]
    fn abilities_level_and_spend() {
        let mut state = PlayerState::new();
        state.grant_ability("자물쇠 따기");
        state.grant_ability("자물쇠 따기");
        assert_eq!(state.ability_level("자물쇠 따기"), 2);

        assert!(state.consume_ability("자물쇠 따기"));
        assert!(state.consume_ability("자물쇠 따기"));
        assert!(!state.consume_ability("자물쇠 따기"));
        assert!(state.abilities().is_empty());
    }

    #[test]
    fn labels_follow_product_convention() {
        let mut state = PlayerState::new();
        state.grant_item("지도");
        state.grant_item("지도");
        state.grant_item("보석");
        state.grant_ability("자물쇠 따기");

        assert_eq!(state.item_labels(), vec!["보석 x 1", "지도 x 2"]);
        assert_eq!(state.ability_labels(), vec!["자물쇠 따기 lv. 1"]);
    }

    #[test]
    fn clamp_floor_stops_at_zero() {
        let mut state = PlayerState::new();
        state.lives = -2;
        state.sense = 1;
        state.clamp_floor();
        assert_eq!(state.lives, 0);
        assert_eq!(state.sense, 1);
    }

    #[test]
    fn restore_drops_zero_rows() {
        let mut state = PlayerState::new();
        state.restore_inventory(
            &[("지도".to_string(), 2), ("보석".to_string(), 0)],
            &[("자물쇠 따기".to_string(), 1)],
        );
        assert_eq!(state.item_count("지도"), 2);
        assert_eq!(state.item_count("보석"), 0);
        assert!(!state.items().iter().any(|(name, _)| name == "보석"));
        assert_eq!(state.ability_level("자물쇠 따기"), 1);
    }

    #[test]
    fn reset_restores_fresh_state() {
        let mut state = PlayerState::new();
        state.lives = 0;
        state.treasures = 3;
        state.grant_item("지도");
        state.reset();
        assert_eq!(state.lives, 3);
        assert_eq!(state.treasures, 0);
        assert!(state.items().is_empty());
    }
}
