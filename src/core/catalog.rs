/// Story catalog: RON loading, scene lookup, and category groups.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::schema::action::ActionToken;
use crate::schema::scene::{
    CategoryGroup, Choice, ChoiceTarget, EndingsConfig, EndingTier, Scene, SceneAddress,
    StatusOverride,
};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("bad scene address '{0}': expected 'category/scene'")]
    BadAddress(String),
    #[error("no story content provided")]
    NoContent,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// One named category: its navigation group plus its scenes.
#[derive(Debug, Clone)]
pub struct Category {
    pub group: CategoryGroup,
    pub scenes: HashMap<String, Scene>,
}

/// The immutable story definition: title, start address, endings
/// configuration, and every scene keyed by category and name.
///
/// Loaded once at startup and never mutated. Scene references are not
/// validated at load: a dangling address surfaces as a lookup miss at
/// first use, which the machine recovers from. Only the config header's
/// own addresses are parsed eagerly, since a malformed one could never
/// resolve at all.
#[derive(Debug, Clone)]
pub struct StoryCatalog {
    title: String,
    start: SceneAddress,
    endings: EndingsConfig,
    categories: HashMap<String, Category>,
}

// RON deserialization helpers: the authored story format differs from the
// internal types (comma-joined action strings, address strings), so
// intermediate structs bridge the two.

#[derive(Debug, Deserialize)]
#[serde(rename = "Story")]
struct RonStory {
    title: String,
    start: String,
    endings: RonEndings,
    categories: HashMap<String, RonCategory>,
}

#[derive(Debug, Deserialize)]
#[serde(rename = "Endings")]
struct RonEndings {
    defeat: String,
    exhausted: String,
    tiers: Vec<RonTier>,
}

#[derive(Debug, Deserialize)]
#[serde(rename = "Tier")]
struct RonTier {
    min_treasures: i32,
    target: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename = "Category")]
struct RonCategory {
    #[serde(default)]
    group: CategoryGroup,
    scenes: HashMap<String, RonScene>,
}

#[derive(Debug, Deserialize)]
#[serde(rename = "Scene")]
struct RonScene {
    text: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    status: StatusOverride,
    #[serde(default)]
    items: Vec<String>,
    #[serde(default)]
    choices: Vec<RonChoice>,
}

#[derive(Debug, Deserialize)]
#[serde(rename = "Choice")]
struct RonChoice {
    label: String,
    #[serde(default)]
    action: String,
    next: String,
}

impl StoryCatalog {
    /// Load a story from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<StoryCatalog, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a story from a RON string.
    pub fn parse_ron(input: &str) -> Result<StoryCatalog, CatalogError> {
        let raw: RonStory = ron::from_str(input)?;

        let start = parse_address(&raw.start)?;
        let mut tiers = Vec::new();
        for tier in raw.endings.tiers {
            tiers.push(EndingTier {
                min_treasures: tier.min_treasures,
                target: parse_address(&tier.target)?,
            });
        }
        let endings = EndingsConfig {
            defeat: parse_address(&raw.endings.defeat)?,
            exhausted: parse_address(&raw.endings.exhausted)?,
            tiers,
        };

        let mut categories = HashMap::new();
        let mut scene_count = 0;
        for (name, ron_category) in raw.categories {
            let mut scenes = HashMap::new();
            for (scene_name, ron_scene) in ron_category.scenes {
                scenes.insert(scene_name, convert_scene(ron_scene));
            }
            scene_count += scenes.len();
            categories.insert(
                name,
                Category {
                    group: ron_category.group,
                    scenes,
                },
            );
        }

        info!(
            title = %raw.title,
            categories = categories.len(),
            scenes = scene_count,
            "story catalog loaded"
        );

        Ok(StoryCatalog {
            title: raw.title,
            start,
            endings,
            categories,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start(&self) -> &SceneAddress {
        &self.start
    }

    pub fn endings(&self) -> &EndingsConfig {
        &self.endings
    }

    /// Looks up a scene. `None` is the recoverable missing-scene case.
    pub fn lookup(&self, category: &str, scene: &str) -> Option<&Scene> {
        self.categories.get(category)?.scenes.get(scene)
    }

    /// The navigation group a category was declared with.
    pub fn group_of(&self, category: &str) -> Option<CategoryGroup> {
        self.categories.get(category).map(|c| c.group)
    }

    /// Sorted keys of every explore-group category; the scene pool's
    /// initial contents.
    pub fn explore_categories(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .categories
            .iter()
            .filter(|(_, category)| category.group == CategoryGroup::Explore)
            .map(|(name, _)| name.clone())
            .collect();
        keys.sort();
        keys
    }

    /// Every (name, category) pair; the linter walks this.
    pub fn categories(&self) -> impl Iterator<Item = (&String, &Category)> {
        self.categories.iter()
    }
}

fn parse_address(raw: &str) -> Result<SceneAddress, CatalogError> {
    SceneAddress::parse(raw).ok_or_else(|| CatalogError::BadAddress(raw.to_string()))
}

fn convert_scene(raw: RonScene) -> Scene {
    let choices = raw
        .choices
        .into_iter()
        .map(|choice| Choice {
            label: choice.label,
            tokens: ActionToken::parse_list(&choice.action),
            target: ChoiceTarget::parse(&choice.next),
        })
        .collect();
    Scene {
        text: raw.text,
        image: raw.image,
        status: raw.status,
        items: raw.items,
        choices,
    }
}
