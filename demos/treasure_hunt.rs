/// Treasure Hunt example — plays the bundled story on autopilot.
///
/// Wanders the island preferring fresh pool draws, accepts every quiz it
/// stumbles into and answers well, and prints the transcript of one
/// seeded run from the opening to whichever ending it earns.
///
/// Run with: cargo run --example treasure_hunt

use gamebook_engine::core::machine::{RenderSink, SceneMachine, StepOutcome};
use gamebook_engine::schema::action::ActionToken;
use gamebook_engine::schema::scene::{CategoryGroup, ChoiceTarget, Scene};

struct TranscriptSink;

impl RenderSink for TranscriptSink {
    fn scene_entered(&mut self, text: &str, _image: Option<&str>, choices: &[String]) {
        println!();
        println!("{}", text);
        for (i, label) in choices.iter().enumerate() {
            println!("  {}. {}", i + 1, label);
        }
    }

    fn status_changed(&mut self, lives: i32, sense: i32, money: i32, treasures: i32) {
        println!(
            "[목숨 {} | 멘탈 {} | 돈 {} | 보물 {}]",
            lives, sense, money, treasures
        );
    }

    fn inventory_changed(&mut self, items: &[(String, u32)], abilities: &[(String, u32)]) {
        let lines: Vec<String> = items.iter().map(|(n, c)| format!("{} x {}", n, c)).collect();
        if !lines.is_empty() {
            println!("[소지품] {}", lines.join(", "));
        }
        let lines: Vec<String> = abilities
            .iter()
            .map(|(n, lv)| format!("{} lv. {}", n, lv))
            .collect();
        if !lines.is_empty() {
            println!("[능력] {}", lines.join(", "));
        }
    }

    fn warning(&mut self, message: &str) {
        println!("(!) {}", message);
    }
}

fn main() {
    // --- Load the bundled story ---
    let mut machine = SceneMachine::builder()
        .story_path("stories/nonsense_survival/story.ron")
        .seed(2026)
        .build()
        .expect("Failed to load the bundled story");

    println!("========================================");
    println!("   {}", machine.title());
    println!("   Autopilot run, seed 2026");
    println!("========================================");

    let mut sink = TranscriptSink;
    machine.start(&mut sink);

    // --- Wander the island ---
    let mut steps = 0;
    let finished = loop {
        steps += 1;
        if steps > 200 {
            break false;
        }

        let outcome = step(&mut machine, &mut sink);
        match outcome {
            StepOutcome::Continue => {}
            StepOutcome::Title | StepOutcome::Quit => break true,
        }

        let category = machine
            .current()
            .expect("an active scene after a continue")
            .category
            .clone();
        if machine.catalog().group_of(&category) == Some(CategoryGroup::Ending) {
            break true;
        }
    };

    // --- Final standing ---
    let state = machine.state();
    println!();
    println!("========================================");
    if finished {
        println!("   Run over after {} choices.", steps);
    } else {
        println!("   Stopped after {} choices.", steps);
    }
    println!(
        "   목숨 {} | 멘탈 {} | 돈 {} | 보물 {}",
        state.lives, state.sense, state.money, state.treasures
    );
    let items = state.item_labels();
    if !items.is_empty() {
        println!("   가방: {}", items.join(", "));
    }
    println!("========================================");
}

/// One autopilot move: take a quiz when offered, answer it well, otherwise
/// head for a fresh draw; fall back to the first choice that moves.
fn step(machine: &mut SceneMachine, sink: &mut TranscriptSink) -> StepOutcome {
    let scene = machine.current_scene().expect("an active scene").clone();

    for index in preference_order(&scene) {
        let before = machine.current().cloned();
        let outcome = machine
            .select_choice(index, sink)
            .expect("choice index from the scene itself");
        if !matches!(outcome, StepOutcome::Continue) || machine.current().cloned() != before {
            return outcome;
        }
        // A vetoed choice leaves the machine in place; try the next one.
    }
    StepOutcome::Continue
}

fn preference_order(scene: &Scene) -> Vec<usize> {
    let mut order: Vec<usize> = Vec::new();

    let quiz_start = scene
        .choices
        .iter()
        .position(|c| c.tokens.iter().any(|t| matches!(t, ActionToken::QuizStart)));
    let right_answer = scene
        .choices
        .iter()
        .position(|c| c.tokens.iter().any(|t| matches!(t, ActionToken::QuizCorrect)));
    let fresh_draw = scene
        .choices
        .iter()
        .position(|c| matches!(c.target, ChoiceTarget::RandomStory));

    for preferred in [quiz_start, right_answer, fresh_draw].into_iter().flatten() {
        if !order.contains(&preferred) {
            order.push(preferred);
        }
    }
    for index in 0..scene.choices.len() {
        if !order.contains(&index) {
            order.push(index);
        }
    }
    order
}
