use serde::{Deserialize, Serialize};
use std::fmt;

use super::action::ActionToken;

/// A fully qualified scene location: category plus scene name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneAddress {
    pub category: String,
    pub scene: String,
}

impl SceneAddress {
    pub fn new(category: impl Into<String>, scene: impl Into<String>) -> Self {
        SceneAddress {
            category: category.into(),
            scene: scene.into(),
        }
    }

    /// Parses a `"category/scene"` string. Returns `None` when the
    /// separator is missing or either side is empty.
    pub fn parse(raw: &str) -> Option<SceneAddress> {
        let (category, scene) = raw.split_once('/')?;
        if category.is_empty() || scene.is_empty() {
            return None;
        }
        Some(SceneAddress::new(category, scene))
    }
}

impl fmt::Display for SceneAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.scene)
    }
}

/// Absolute status values a scene applies on entry.
///
/// Present fields set the counter outright (not a delta); absent fields
/// leave the counter untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusOverride {
    #[serde(default)]
    pub lives: Option<i32>,
    #[serde(default)]
    pub sense: Option<i32>,
    #[serde(default)]
    pub money: Option<i32>,
    #[serde(default)]
    pub treasures: Option<i32>,
}

impl StatusOverride {
    pub fn is_empty(&self) -> bool {
        self.lives.is_none() && self.sense.is_none() && self.money.is_none() && self.treasures.is_none()
    }
}

/// Where a choice leads, parsed from the authored `next` string.
///
/// A string containing the `/` separator is always an explicit address;
/// the sentinel spellings are checked next; anything else names a scene in
/// the current category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChoiceTarget {
    /// Fully qualified `category/scene` address.
    Explicit(SceneAddress),
    /// Draw the next category from the scene pool.
    RandomStory,
    /// Back to the title screen; player state and pool reset.
    StartGame,
    /// Settle the playthrough on an ending tier.
    EndGame,
    /// Terminate the session.
    Quit,
    /// A scene in the current category.
    Local(String),
}

impl ChoiceTarget {
    pub fn parse(raw: &str) -> ChoiceTarget {
        if let Some(addr) = SceneAddress::parse(raw) {
            return Self::Explicit(addr);
        }
        match raw {
            "random_story" => Self::RandomStory,
            "start_game" => Self::StartGame,
            "end_game" => Self::EndGame,
            "quit" => Self::Quit,
            other => Self::Local(other.to_string()),
        }
    }
}

/// One selectable option on a scene. Tokens run in order when the choice
/// is taken; the target is resolved only if no token vetoes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub tokens: Vec<ActionToken>,
    pub target: ChoiceTarget,
}

/// One narrative beat: display text, optional art reference, entry
/// effects, and the choices offered to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub text: String,
    pub image: Option<String>,
    pub status: StatusOverride,
    pub items: Vec<String>,
    pub choices: Vec<Choice>,
}

impl Scene {
    /// True when any choice carries quiz-flow tokens. Entering a scene
    /// outside the quiz flow resets the answer streak.
    pub fn is_quiz_scene(&self) -> bool {
        self.choices
            .iter()
            .any(|c| c.tokens.iter().any(ActionToken::is_quiz_token))
    }
}

/// A category's role in navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryGroup {
    /// Linear content reached by explicit addressing.
    Story,
    /// Member of the random-scene pool.
    Explore,
    /// Terminal content; never re-triggers the forced defeat transition.
    Ending,
}

impl Default for CategoryGroup {
    fn default() -> Self {
        CategoryGroup::Story
    }
}

/// Ending addresses plus the treasure-threshold tier table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndingsConfig {
    /// Shown when lives or sense hit zero outside the ending group.
    pub defeat: SceneAddress,
    /// Shown when a random draw finds the pool empty.
    pub exhausted: SceneAddress,
    /// Tier table, declared highest threshold first.
    pub tiers: Vec<EndingTier>,
}

/// One row of the ending tier table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndingTier {
    pub min_treasures: i32,
    pub target: SceneAddress,
}

impl EndingsConfig {
    /// First tier whose threshold the counter meets, walking the table in
    /// declared order. Falls back to the exhausted address when no tier
    /// matches.
    pub fn tier_for(&self, treasures: i32) -> &SceneAddress {
        self.tiers
            .iter()
            .find(|tier| treasures >= tier.min_treasures)
            .map(|tier| &tier.target)
            .unwrap_or(&self.exhausted)
    }
}
