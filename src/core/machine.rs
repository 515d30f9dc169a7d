/// The scene machine: scene entry, choice handling, and playthrough lifecycle.
///
/// Wires together the story catalog, player state, scene pool, effect
/// resolution, and navigation behind a rendering sink.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::catalog::{CatalogError, StoryCatalog};
use crate::core::effects;
use crate::core::navigation::{self, Destination};
use crate::core::pool::ScenePool;
use crate::core::state::PlayerState;
use crate::schema::save::{SaveState, SAVE_VERSION};
use crate::schema::scene::{CategoryGroup, Scene, SceneAddress};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("scene '{scene}' not found in category '{category}'")]
    SceneNotFound { category: String, scene: String },
    #[error("choice index {index} out of range ({len} available)")]
    ChoiceOutOfRange { index: usize, len: usize },
    #[error("no scene entered; call start() first")]
    NoActiveScene,
}

/// Receives everything a front end needs to draw. The machine only calls
/// out through this trait; the selected choice index is the only input it
/// reads back.
pub trait RenderSink {
    /// A scene was entered: display text, optional art, choice labels.
    fn scene_entered(&mut self, text: &str, image: Option<&str>, choices: &[String]);
    /// Status counters changed or were refreshed.
    fn status_changed(&mut self, lives: i32, sense: i32, money: i32, treasures: i32);
    /// Item or ability holdings changed. Pairs arrive sorted by name.
    fn inventory_changed(&mut self, items: &[(String, u32)], abilities: &[(String, u32)]);
    /// A user-visible warning: vetoes and missing scenes.
    fn warning(&mut self, message: &str);
}

/// What the caller should do after a choice resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Keep playing; the next scene (or a warning) went through the sink.
    Continue,
    /// Show the title screen; state and pool were reset.
    Title,
    /// Terminate the session.
    Quit,
}

/// The top-level engine. Built via `SceneMachine::builder()`.
pub struct SceneMachine {
    catalog: StoryCatalog,
    state: PlayerState,
    pool: ScenePool,
    rng: StdRng,
    seed: u64,
    current: Option<SceneAddress>,
}

/// Builder for constructing a `SceneMachine`.
pub struct SceneMachineBuilder {
    story_path: Option<String>,
    seed: u64,
    /// Directly provided catalog (for testing without files).
    catalog: Option<StoryCatalog>,
}

impl SceneMachine {
    pub fn builder() -> SceneMachineBuilder {
        SceneMachineBuilder {
            story_path: None,
            seed: 0,
            catalog: None,
        }
    }

    /// Begins a playthrough: fresh state, full pool, re-seeded RNG, and
    /// entry into the story's start scene.
    pub fn start(&mut self, sink: &mut dyn RenderSink) {
        self.reset();
        let start = self.catalog.start().clone();
        debug!(start = %start, "playthrough started");
        self.enter(&start, sink);
    }

    /// Back to the title: fresh state, full pool, no scene current. The
    /// RNG is re-seeded so equal seeds replay identically.
    pub fn reset(&mut self) {
        self.state.reset();
        self.pool = ScenePool::from_categories(self.catalog.explore_categories());
        self.rng = StdRng::seed_from_u64(self.seed);
        self.current = None;
    }

    /// Enters a scene: applies its status override and item grants, then
    /// pushes text, status, and inventory through the sink.
    ///
    /// A missing scene is recovered here rather than returned: the sink
    /// gets a warning and the previous scene stays current.
    pub fn enter(&mut self, addr: &SceneAddress, sink: &mut dyn RenderSink) {
        let scene = match self.catalog.lookup(&addr.category, &addr.scene) {
            Some(scene) => scene,
            None => {
                warn!(category = %addr.category, scene = %addr.scene, "scene not found");
                sink.warning(&format!(
                    "장면 '{}' 또는 카테고리 '{}'을(를) 찾을 수 없습니다.",
                    addr.scene, addr.category
                ));
                return;
            }
        };

        debug!(category = %addr.category, scene = %addr.scene, "entering scene");
        self.current = Some(addr.clone());

        let labels: Vec<String> = scene.choices.iter().map(|c| c.label.clone()).collect();
        sink.scene_entered(&scene.text, scene.image.as_deref(), &labels);

        self.state.apply_override(&scene.status);
        sink.status_changed(
            self.state.lives,
            self.state.sense,
            self.state.money,
            self.state.treasures,
        );

        if !scene.items.is_empty() {
            self.state.grant_items(&scene.items);
            sink.inventory_changed(&self.state.items(), &self.state.abilities());
        }

        // A scene outside the quiz flow breaks the answer streak.
        if !scene.is_quiz_scene() {
            self.state.quiz_streak = 0;
        }
    }

    /// Applies the indexed choice of the current scene: the token pass
    /// first, then the forced defeat check, then target navigation.
    pub fn select_choice(
        &mut self,
        index: usize,
        sink: &mut dyn RenderSink,
    ) -> Result<StepOutcome, EngineError> {
        let addr = self.current.clone().ok_or(EngineError::NoActiveScene)?;
        let scene = self
            .catalog
            .lookup(&addr.category, &addr.scene)
            .ok_or_else(|| EngineError::SceneNotFound {
                category: addr.category.clone(),
                scene: addr.scene.clone(),
            })?;
        let choice = match scene.choices.get(index) {
            Some(choice) => choice.clone(),
            None => {
                return Err(EngineError::ChoiceOutOfRange {
                    index,
                    len: scene.choices.len(),
                })
            }
        };

        debug!(label = %choice.label, "choice selected");

        // 1. Token pass; on a veto the partial effects stay applied.
        let outcome = effects::apply_tokens(&mut self.state, &choice.tokens);
        if let Some(message) = &outcome.veto {
            sink.warning(message);
        }

        // 2. Post-pass refresh: floor the vitals, then always re-emit
        //    status; inventory only when it changed.
        self.state.clamp_floor();
        sink.status_changed(
            self.state.lives,
            self.state.sense,
            self.state.money,
            self.state.treasures,
        );
        if outcome.inventory_touched {
            sink.inventory_changed(&self.state.items(), &self.state.abilities());
        }

        // 3. Exhausted vitals force the defeat scene, veto or not, unless
        //    the player is already inside the ending group.
        if (self.state.lives == 0 || self.state.sense == 0)
            && self.catalog.group_of(&addr.category) != Some(CategoryGroup::Ending)
        {
            warn!(
                lives = self.state.lives,
                sense = self.state.sense,
                "vitals exhausted, forcing the defeat ending"
            );
            let defeat = self.catalog.endings().defeat.clone();
            self.enter(&defeat, sink);
            return Ok(StepOutcome::Continue);
        }

        // 4. A veto stops the declared transition.
        if outcome.vetoed() {
            return Ok(StepOutcome::Continue);
        }

        // 5. Resolve the declared target.
        let destination = navigation::resolve(
            &choice.target,
            &addr.category,
            &mut self.pool,
            &mut self.rng,
            self.state.treasures,
            self.catalog.endings(),
        );
        match destination {
            Destination::Scene(next) => {
                self.enter(&next, sink);
                Ok(StepOutcome::Continue)
            }
            Destination::Title => {
                self.reset();
                Ok(StepOutcome::Title)
            }
            Destination::Quit => Ok(StepOutcome::Quit),
        }
    }

    /// Captures everything needed to resume: counters, inventories, pool
    /// membership, and the current address.
    pub fn snapshot(&self) -> SaveState {
        SaveState {
            version: SAVE_VERSION,
            lives: self.state.lives,
            sense: self.state.sense,
            money: self.state.money,
            treasures: self.state.treasures,
            items: self.state.items(),
            abilities: self.state.abilities(),
            pool: self.pool.remaining().to_vec(),
            current: self.current.clone(),
        }
    }

    /// Restores a snapshot. The saved scene is validated first; on a miss
    /// nothing is mutated. The restored scene is re-displayed without
    /// re-applying its entry effects.
    pub fn restore(
        &mut self,
        save: &SaveState,
        sink: &mut dyn RenderSink,
    ) -> Result<(), EngineError> {
        if let Some(addr) = &save.current {
            if self.catalog.lookup(&addr.category, &addr.scene).is_none() {
                return Err(EngineError::SceneNotFound {
                    category: addr.category.clone(),
                    scene: addr.scene.clone(),
                });
            }
        }

        self.state.reset();
        self.state.lives = save.lives;
        self.state.sense = save.sense;
        self.state.money = save.money;
        self.state.treasures = save.treasures;
        self.state.restore_inventory(&save.items, &save.abilities);
        self.pool = ScenePool::from_categories(save.pool.iter().cloned());
        self.current = save.current.clone();

        sink.status_changed(
            self.state.lives,
            self.state.sense,
            self.state.money,
            self.state.treasures,
        );
        sink.inventory_changed(&self.state.items(), &self.state.abilities());
        if let Some(addr) = &self.current {
            if let Some(scene) = self.catalog.lookup(&addr.category, &addr.scene) {
                let labels: Vec<String> = scene.choices.iter().map(|c| c.label.clone()).collect();
                sink.scene_entered(&scene.text, scene.image.as_deref(), &labels);
            }
        }
        debug!("snapshot restored");
        Ok(())
    }

    pub fn title(&self) -> &str {
        self.catalog.title()
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn pool(&self) -> &ScenePool {
        &self.pool
    }

    pub fn current(&self) -> Option<&SceneAddress> {
        self.current.as_ref()
    }

    /// The scene currently displayed, if any.
    pub fn current_scene(&self) -> Option<&Scene> {
        let addr = self.current.as_ref()?;
        self.catalog.lookup(&addr.category, &addr.scene)
    }

    pub fn catalog(&self) -> &StoryCatalog {
        &self.catalog
    }
}

impl SceneMachineBuilder {
    pub fn story_path(mut self, path: &str) -> Self {
        self.story_path = Some(path.to_string());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Provide a catalog directly (for testing without files).
    pub fn with_catalog(mut self, catalog: StoryCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn build(self) -> Result<SceneMachine, EngineError> {
        let catalog = match (self.catalog, self.story_path) {
            (Some(catalog), _) => catalog,
            (None, Some(path)) => StoryCatalog::load_from_ron(Path::new(&path))?,
            (None, None) => return Err(EngineError::Catalog(CatalogError::NoContent)),
        };
        let pool = ScenePool::from_categories(catalog.explore_categories());
        Ok(SceneMachine {
            catalog,
            state: PlayerState::new(),
            pool,
            rng: StdRng::seed_from_u64(self.seed),
            seed: self.seed,
            current: None,
        })
    }
}
