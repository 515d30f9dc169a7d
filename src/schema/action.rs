use serde::{Deserialize, Serialize};

/// A core status counter tracked on the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Lives,
    Sense,
    Money,
}

/// A stackable inventory item. Display names are the product's Korean
/// item names and double as inventory keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Item {
    Map,
    Gem,
    Shoes,
    Umbrella,
    Padding,
    Book,
    Cake,
}

impl Item {
    /// Returns the display name, which is also the inventory key.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Map => "지도",
            Self::Gem => "보석",
            Self::Shoes => "운동화",
            Self::Umbrella => "우산",
            Self::Padding => "롱패딩",
            Self::Book => "책",
            Self::Cake => "케이크",
        }
    }
}

/// A leveled ability. Stored separately from items and rendered with a
/// level suffix rather than a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    LockPicking,
}

impl Ability {
    /// Returns the display name, which is also the ability-map key.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::LockPicking => "자물쇠 따기",
        }
    }
}

/// One effect keyword attached to a choice.
///
/// Choices author these as a comma-separated string (`"get_map, lose_money"`);
/// the catalog splits and parses the list at load time. Unrecognized keywords
/// parse to [`ActionToken::Unknown`] and are runtime no-ops, so stray ids in
/// story files degrade silently instead of failing the load. The linter
/// reports them offline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionToken {
    /// Explicit no-op (`none`).
    Noop,
    /// Gain one point of a stat, capped at 3.
    GainStat(Stat),
    /// Lose one point of a stat. Money vetoes at zero instead.
    LoseStat(Stat),
    /// Add one of the item to the inventory.
    GainItem(Item),
    /// Consume one of the item, vetoing on shortfall.
    LoseItem(Item),
    /// Raise the ability one level.
    GainAbility(Ability),
    /// Spend one level of the ability, vetoing on shortfall.
    LoseAbility(Ability),
    /// `quiz`: marks the start of a quiz sequence, resetting the streak.
    QuizStart,
    /// `correct`: one right answer; three in a row earn a treasure.
    QuizCorrect,
    /// Keyword the engine does not recognize. No-op.
    Unknown(String),
}

impl ActionToken {
    /// Parses a single token id. Never fails: unknown ids become
    /// [`ActionToken::Unknown`].
    pub fn parse(raw: &str) -> ActionToken {
        match raw {
            "none" => Self::Noop,
            "get_live" => Self::GainStat(Stat::Lives),
            "lose_live" => Self::LoseStat(Stat::Lives),
            "get_sense" => Self::GainStat(Stat::Sense),
            "lose_sense" => Self::LoseStat(Stat::Sense),
            "get_money" => Self::GainStat(Stat::Money),
            "lose_money" => Self::LoseStat(Stat::Money),
            "get_map" => Self::GainItem(Item::Map),
            "lose_map" => Self::LoseItem(Item::Map),
            "get_gem" => Self::GainItem(Item::Gem),
            "lose_gem" => Self::LoseItem(Item::Gem),
            "get_shoes" => Self::GainItem(Item::Shoes),
            "lose_shoes" => Self::LoseItem(Item::Shoes),
            "get_umbrella" => Self::GainItem(Item::Umbrella),
            "lose_umbrella" => Self::LoseItem(Item::Umbrella),
            "get_padding" => Self::GainItem(Item::Padding),
            "lose_padding" => Self::LoseItem(Item::Padding),
            "get_book" => Self::GainItem(Item::Book),
            "lose_book" => Self::LoseItem(Item::Book),
            // Story files spell the cake keyword "rice".
            "get_rice" => Self::GainItem(Item::Cake),
            "lose_rice" => Self::LoseItem(Item::Cake),
            "get_lock" => Self::GainAbility(Ability::LockPicking),
            "lose_lock" => Self::LoseAbility(Ability::LockPicking),
            "quiz" => Self::QuizStart,
            "correct" => Self::QuizCorrect,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Splits a comma-separated action string and parses each entry.
    /// Empty segments are dropped, so `"get_map,"` yields one token.
    pub fn parse_list(raw: &str) -> Vec<ActionToken> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Self::parse)
            .collect()
    }

    /// True for tokens that take part in the quiz flow.
    pub fn is_quiz_token(&self) -> bool {
        matches!(self, Self::QuizStart | Self::QuizCorrect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stat_tokens() {
        assert_eq!(ActionToken::parse("get_live"), ActionToken::GainStat(Stat::Lives));
        assert_eq!(ActionToken::parse("lose_sense"), ActionToken::LoseStat(Stat::Sense));
        assert_eq!(ActionToken::parse("lose_money"), ActionToken::LoseStat(Stat::Money));
    }

    #[test]
    fn parses_item_and_ability_tokens() {
        assert_eq!(ActionToken::parse("get_map"), ActionToken::GainItem(Item::Map));
        assert_eq!(ActionToken::parse("lose_padding"), ActionToken::LoseItem(Item::Padding));
        assert_eq!(
            ActionToken::parse("get_lock"),
            ActionToken::GainAbility(Ability::LockPicking)
        );
    }

    #[test]
    fn rice_keyword_maps_to_cake() {
        assert_eq!(ActionToken::parse("get_rice"), ActionToken::GainItem(Item::Cake));
        match ActionToken::parse("get_rice") {
            ActionToken::GainItem(item) => assert_eq!(item.display_name(), "케이크"),
            other => panic!("unexpected token: {:?}", other),
        }
    }

    #[test]
    fn unknown_keyword_is_preserved() {
        assert_eq!(
            ActionToken::parse("dance"),
            ActionToken::Unknown("dance".to_string())
        );
    }

    #[test]
    fn parse_list_splits_and_trims() {
        let tokens = ActionToken::parse_list("get_map, lose_money ,none");
        assert_eq!(
            tokens,
            vec![
                ActionToken::GainItem(Item::Map),
                ActionToken::LoseStat(Stat::Money),
                ActionToken::Noop,
            ]
        );
    }

    #[test]
    fn parse_list_drops_empty_segments() {
        assert_eq!(ActionToken::parse_list(""), vec![]);
        assert_eq!(ActionToken::parse_list("get_gem,"), vec![ActionToken::GainItem(Item::Gem)]);
    }

    #[test]
    fn quiz_tokens_are_flagged() {
        assert!(ActionToken::parse("quiz").is_quiz_token());
        assert!(ActionToken::parse("correct").is_quiz_token());
        assert!(!ActionToken::parse("none").is_quiz_token());
    }
}
