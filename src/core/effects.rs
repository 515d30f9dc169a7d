/// Effect resolution: applies a choice's action tokens to the player state.

use tracing::warn;

use crate::core::state::PlayerState;
use crate::schema::action::{ActionToken, Stat};

/// Correct answers in a row needed to earn one treasure.
pub const QUIZ_STREAK_TARGET: u32 = 3;

/// Result of one token pass.
///
/// A veto aborts the pending scene transition; tokens that ran before the
/// vetoing one stay applied. The resolver is not transactional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectOutcome {
    /// Warning message when a token refused. The transition must not run.
    pub veto: Option<String>,
    /// True when the item or ability maps changed.
    pub inventory_touched: bool,
}

impl EffectOutcome {
    pub fn vetoed(&self) -> bool {
        self.veto.is_some()
    }
}

/// Runs the token list in order against the state, stopping at the first
/// veto. Lives and sense may dip below zero inside the pass; the caller
/// floors them afterwards and handles the forced defeat transition.
pub fn apply_tokens(state: &mut PlayerState, tokens: &[ActionToken]) -> EffectOutcome {
    let mut inventory_touched = false;

    for token in tokens {
        match token {
            ActionToken::Noop | ActionToken::Unknown(_) => {}
            ActionToken::GainStat(stat) => state.gain_stat(*stat),
            ActionToken::LoseStat(Stat::Money) => {
                if state.money == 0 {
                    warn!("money spend refused at zero");
                    return EffectOutcome {
                        veto: Some("돈이 부족합니다!".to_string()),
                        inventory_touched,
                    };
                }
                state.money -= 1;
            }
            ActionToken::LoseStat(Stat::Lives) => state.lives -= 1,
            ActionToken::LoseStat(Stat::Sense) => state.sense -= 1,
            ActionToken::GainItem(item) => {
                state.grant_item(item.display_name());
                inventory_touched = true;
            }
            ActionToken::LoseItem(item) => {
                let name = item.display_name();
                if state.consume_item(name) {
                    inventory_touched = true;
                } else {
                    warn!(item = name, "item spend refused");
                    return EffectOutcome {
                        veto: Some(format!("{} 부족", name)),
                        inventory_touched,
                    };
                }
            }
            ActionToken::GainAbility(ability) => {
                state.grant_ability(ability.display_name());
                inventory_touched = true;
            }
            ActionToken::LoseAbility(ability) => {
                let name = ability.display_name();
                if state.consume_ability(name) {
                    inventory_touched = true;
                } else {
                    warn!(ability = name, "ability spend refused");
                    return EffectOutcome {
                        veto: Some(format!("{}이 부족합니다!", name)),
                        inventory_touched,
                    };
                }
            }
            ActionToken::QuizStart => state.quiz_streak = 0,
            ActionToken::QuizCorrect => {
                state.quiz_streak += 1;
                if state.quiz_streak >= QUIZ_STREAK_TARGET {
                    state.treasures += 1;
                    state.quiz_streak = 0;
                }
            }
        }
    }

    EffectOutcome {
        veto: None,
        inventory_touched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(state: &mut PlayerState, action: &str) -> EffectOutcome {
        apply_tokens(state, &ActionToken::parse_list(action))
    }

    #[test]
    fn stat_gains_clamp_at_three() {
        let mut state = PlayerState::new();
        let outcome = run(&mut state, "get_live, get_sense, get_money");
        assert!(!outcome.vetoed());
        assert_eq!((state.lives, state.sense, state.money), (3, 3, 3));
    }

    #[test]
    fn money_spend_at_zero_vetoes() {
        let mut state = PlayerState::new();
        state.money = 0;
        let outcome = run(&mut state, "lose_money");
        assert_eq!(outcome.veto.as_deref(), Some("돈이 부족합니다!"));
        assert_eq!(state.money, 0);
    }

    #[test]
    fn veto_keeps_earlier_effects_and_skips_later_tokens() {
        let mut state = PlayerState::new();
        state.money = 0;
        let outcome = run(&mut state, "get_map, lose_money, get_gem");
        assert!(outcome.vetoed());
        assert!(outcome.inventory_touched);
        // The map grant before the veto stands; the gem after it never ran.
        assert_eq!(state.item_count("지도"), 1);
        assert_eq!(state.item_count("보석"), 0);
    }

    #[test]
    fn missing_item_veto_message() {
        let mut state = PlayerState::new();
        let outcome = run(&mut state, "lose_map");
        assert_eq!(outcome.veto.as_deref(), Some("지도 부족"));
    }

    #[test]
    fn missing_ability_veto_message() {
        let mut state = PlayerState::new();
        let outcome = run(&mut state, "lose_lock");
        assert_eq!(outcome.veto.as_deref(), Some("자물쇠 따기이 부족합니다!"));
    }

    #[test]
    fn ability_spend_succeeds_when_held() {
        let mut state = PlayerState::new();
        state.grant_ability("자물쇠 따기");
        let outcome = run(&mut state, "lose_lock");
        assert!(!outcome.vetoed());
        assert!(outcome.inventory_touched);
        assert_eq!(state.ability_level("자물쇠 따기"), 0);
    }

    #[test]
    fn quiz_streak_of_three_earns_a_treasure() {
        let mut state = PlayerState::new();
        run(&mut state, "quiz");
        run(&mut state, "correct");
        run(&mut state, "correct");
        assert_eq!(state.treasures, 0);
        run(&mut state, "correct");
        assert_eq!(state.treasures, 1);
        assert_eq!(state.quiz_streak, 0);
    }

    #[test]
    fn fourth_correct_starts_the_next_streak() {
        let mut state = PlayerState::new();
        run(&mut state, "quiz, correct, correct, correct");
        assert_eq!(state.treasures, 1);
        run(&mut state, "correct");
        assert_eq!(state.quiz_streak, 1);
        assert_eq!(state.treasures, 1);
    }

    #[test]
    fn quiz_token_resets_a_partial_streak() {
        let mut state = PlayerState::new();
        run(&mut state, "correct, correct");
        assert_eq!(state.quiz_streak, 2);
        run(&mut state, "quiz");
        assert_eq!(state.quiz_streak, 0);
    }

    #[test]
    fn lives_may_dip_below_zero_inside_a_pass() {
        let mut state = PlayerState::new();
        let outcome = run(&mut state, "lose_live, lose_live, lose_live, lose_live");
        assert!(!outcome.vetoed());
        assert_eq!(state.lives, -1);
    }

    #[test]
    fn unknown_tokens_are_no_ops() {
        let mut state = PlayerState::new();
        let before = state.clone();
        let outcome = run(&mut state, "dance, sing");
        assert!(!outcome.vetoed());
        assert!(!outcome.inventory_touched);
        assert_eq!(state, before);
    }

    #[test]
    fn stat_only_pass_does_not_touch_inventory() {
        let mut state = PlayerState::new();
        let outcome = run(&mut state, "lose_live, get_sense");
        assert!(!outcome.inventory_touched);
    }
}
