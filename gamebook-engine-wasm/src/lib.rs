//! WASM bindings for gamebook-engine — powers the browser player.

use wasm_bindgen::prelude::*;

use gamebook_engine::core::catalog::StoryCatalog;
use gamebook_engine::core::machine::{RenderSink, SceneMachine, StepOutcome};
use gamebook_engine::schema::save::SaveState;

// ---------------------------------------------------------------------------
// Embedded stories — compiled into the WASM binary
// ---------------------------------------------------------------------------
mod data {
    pub const NONSENSE_SURVIVAL: &str =
        include_str!("../../stories/nonsense_survival/story.ron");
}

// ---------------------------------------------------------------------------
// JSON frame types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(Default, serde::Serialize)]
struct Frame {
    text: Option<String>,
    image: Option<String>,
    choices: Vec<String>,
    status: Option<StatusInfo>,
    items: Vec<InventoryEntry>,
    abilities: Vec<InventoryEntry>,
    warnings: Vec<String>,
    outcome: String,
}

#[derive(serde::Serialize)]
struct StatusInfo {
    lives: i32,
    sense: i32,
    money: i32,
    treasures: i32,
}

#[derive(serde::Serialize)]
struct InventoryEntry {
    name: String,
    count: u32,
}

#[derive(serde::Serialize)]
struct StoryInfo {
    story: String,
    title: String,
    start: String,
    categories: usize,
    scenes: usize,
}

/// Buffers one step's worth of render calls into a [`Frame`].
///
/// A frame with no `text` means the scene did not change (a vetoed choice);
/// the player keeps the last scene on screen and shows the warnings.
#[derive(Default)]
struct FrameSink {
    frame: Frame,
}

impl RenderSink for FrameSink {
    fn scene_entered(&mut self, text: &str, image: Option<&str>, choices: &[String]) {
        self.frame.text = Some(text.to_string());
        self.frame.image = image.map(|s| s.to_string());
        self.frame.choices = choices.to_vec();
    }

    fn status_changed(&mut self, _lives: i32, _sense: i32, _money: i32, _treasures: i32) {
        // The frame carries the authoritative post-step status instead.
    }

    fn inventory_changed(&mut self, _items: &[(String, u32)], _abilities: &[(String, u32)]) {
        // Same as status: filled from the machine after the step.
    }

    fn warning(&mut self, message: &str) {
        self.frame.warnings.push(message.to_string());
    }
}

// ---------------------------------------------------------------------------
// GameSession — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct GameSession {
    machine: SceneMachine,
    story: String,
}

#[wasm_bindgen]
impl GameSession {
    /// Create a session over a bundled story id with the given seed.
    #[wasm_bindgen(constructor)]
    pub fn new(story: &str, seed: u64) -> Result<GameSession, JsError> {
        let story_ron = match story {
            "nonsense_survival" => data::NONSENSE_SURVIVAL,
            _ => return Err(JsError::new(&format!("Unknown story: {story}"))),
        };
        GameSession::build(story, story_ron, seed)
    }

    /// Create a session over a caller-supplied story in RON form.
    pub fn with_story(story_ron: &str, seed: u64) -> Result<GameSession, JsError> {
        GameSession::build("custom", story_ron, seed)
    }

    /// The story's display title.
    pub fn title(&self) -> String {
        self.machine.title().to_string()
    }

    /// Return a JSON description of the loaded story.
    pub fn info(&self) -> Result<String, JsError> {
        let catalog = self.machine.catalog();
        let info = StoryInfo {
            story: self.story.clone(),
            title: catalog.title().to_string(),
            start: catalog.start().to_string(),
            categories: catalog.categories().count(),
            scenes: catalog.categories().map(|(_, c)| c.scenes.len()).sum(),
        };
        serde_json::to_string(&info)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Start (or restart) a playthrough. Returns a JSON frame.
    pub fn start(&mut self) -> Result<String, JsError> {
        let mut sink = FrameSink::default();
        self.machine.start(&mut sink);
        self.finish_frame(sink, StepOutcome::Continue)
    }

    /// Take the zero-based choice on the current scene. Returns a JSON frame:
    ///
    /// ```json
    /// {
    ///   "text": "...",
    ///   "image": "assets/beach.png",
    ///   "choices": ["...", "..."],
    ///   "status": { "lives": 3, "sense": 2, "money": 1, "treasures": 0 },
    ///   "items": [{ "name": "지도", "count": 1 }],
    ///   "abilities": [],
    ///   "warnings": [],
    ///   "outcome": "continue"
    /// }
    /// ```
    ///
    /// `outcome` is `"continue"`, `"title"` (show the title screen and call
    /// `start` to play again), or `"quit"`.
    pub fn choose(&mut self, index: usize) -> Result<String, JsError> {
        let mut sink = FrameSink::default();
        let outcome = self
            .machine
            .select_choice(index, &mut sink)
            .map_err(|e| JsError::new(&format!("Choice error: {e}")))?;
        self.finish_frame(sink, outcome)
    }

    /// Serialize the session to a RON save string.
    pub fn snapshot(&self) -> Result<String, JsError> {
        self.machine
            .snapshot()
            .to_ron()
            .map_err(|e| JsError::new(&format!("Save error: {e}")))
    }

    /// Resume from a RON save string. Returns the re-rendered frame.
    pub fn restore(&mut self, save_ron: &str) -> Result<String, JsError> {
        let save = SaveState::parse_ron(save_ron)
            .map_err(|e| JsError::new(&format!("Save parse error: {e}")))?;
        let mut sink = FrameSink::default();
        self.machine
            .restore(&save, &mut sink)
            .map_err(|e| JsError::new(&format!("Restore error: {e}")))?;
        self.finish_frame(sink, StepOutcome::Continue)
    }

    /// Back to the title screen: fresh state, full pool, no active scene.
    /// Returns a frame with outcome `"title"`.
    pub fn reset(&mut self) -> Result<String, JsError> {
        self.machine.reset();
        let sink = FrameSink::default();
        self.finish_frame(sink, StepOutcome::Title)
    }

    /// Return JSON array of bundled story identifiers.
    pub fn available_stories() -> String {
        serde_json::to_string(&["nonsense_survival"]).unwrap_or_else(|_| "[]".to_string())
    }

    /// Return JSON array of action-token ids the engine recognizes;
    /// story editors can offer these for choice authoring.
    pub fn action_tokens() -> String {
        serde_json::to_string(&[
            "none",
            "get_live",
            "lose_live",
            "get_sense",
            "lose_sense",
            "get_money",
            "lose_money",
            "get_map",
            "lose_map",
            "get_gem",
            "lose_gem",
            "get_shoes",
            "lose_shoes",
            "get_umbrella",
            "lose_umbrella",
            "get_padding",
            "lose_padding",
            "get_book",
            "lose_book",
            "get_rice",
            "lose_rice",
            "get_lock",
            "lose_lock",
            "quiz",
            "correct",
        ])
        .unwrap_or_else(|_| "[]".to_string())
    }
}

// Private helpers
impl GameSession {
    fn build(story: &str, story_ron: &str, seed: u64) -> Result<GameSession, JsError> {
        let catalog = StoryCatalog::parse_ron(story_ron)
            .map_err(|e| JsError::new(&format!("Story parse error: {e}")))?;
        let machine = SceneMachine::builder()
            .with_catalog(catalog)
            .seed(seed)
            .build()
            .map_err(|e| JsError::new(&format!("Machine build error: {e}")))?;
        Ok(GameSession {
            machine,
            story: story.to_string(),
        })
    }

    fn finish_frame(&self, mut sink: FrameSink, outcome: StepOutcome) -> Result<String, JsError> {
        let state = self.machine.state();
        sink.frame.status = Some(StatusInfo {
            lives: state.lives,
            sense: state.sense,
            money: state.money,
            treasures: state.treasures,
        });
        sink.frame.items = state
            .items()
            .into_iter()
            .map(|(name, count)| InventoryEntry { name, count })
            .collect();
        sink.frame.abilities = state
            .abilities()
            .into_iter()
            .map(|(name, count)| InventoryEntry { name, count })
            .collect();
        sink.frame.outcome = match outcome {
            StepOutcome::Continue => "continue",
            StepOutcome::Title => "title",
            StepOutcome::Quit => "quit",
        }
        .to_string();
        serde_json::to_string(&sink.frame)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }
}
