/// Minimal Story example — a complete authored story in one RON literal.
///
/// Walks the whole engine surface in a dozen lines of content: a veto,
/// an item grant, a status override, a save snapshot, and an ending.
///
/// Run with: cargo run --example minimal_story

use gamebook_engine::core::catalog::StoryCatalog;
use gamebook_engine::core::machine::{RenderSink, SceneMachine, StepOutcome};

const STORY: &str = r#"(
    title: "The Toll Gate",
    start: "intro/opening",
    endings: (
        defeat: "fin/done",
        exhausted: "fin/done",
        tiers: [(min_treasures: 0, target: "fin/done")],
    ),
    categories: {
        "intro": (
            scenes: {
                "opening": (
                    text: "A toll keeper blocks the bridge and taps an open palm. Gems only.",
                    choices: [
                        (label: "Offer a gem", action: "lose_gem", next: "intro/far_side"),
                        (label: "Search the riverbank", action: "get_gem", next: "intro/opening"),
                    ],
                ),
                "far_side": (
                    text: "The far side at last. A grateful merchant stuffs your pockets.",
                    status: (money: Some(5)),
                    items: ["지도"],
                    choices: [
                        (label: "Take the ferry home", next: "end_game"),
                    ],
                ),
            },
        ),
        "grove": (
            group: explore,
            scenes: {
                "first": (
                    text: "A quiet grove beside the road.",
                    choices: [
                        (label: "Back to the bridge", next: "intro/opening"),
                    ],
                ),
            },
        ),
        "fin": (
            group: ending,
            scenes: {
                "done": (
                    text: "A quiet trip home, one toll poorer.",
                    choices: [
                        (label: "Again", next: "start_game"),
                        (label: "Leave", next: "quit"),
                    ],
                ),
            },
        ),
    },
)"#;

struct PrintSink;

impl RenderSink for PrintSink {
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
    // --- Build the machine from the inline story ---
    let catalog = StoryCatalog::parse_ron(STORY).expect("Failed to parse the story");
    let mut machine = SceneMachine::builder()
        .with_catalog(catalog)
        .seed(7)
        .build()
        .expect("Failed to build the machine");

    let mut sink = PrintSink;

    println!("=== {} ===", machine.title());
    machine.start(&mut sink);

    // --- Crossing without a gem gets vetoed ---
    machine
        .select_choice(0, &mut sink)
        .expect("valid choice index");

    // --- Pick one up on the riverbank ---
    machine
        .select_choice(1, &mut sink)
        .expect("valid choice index");

    // --- Pay the toll; the far side grants a map and a full purse ---
    machine
        .select_choice(0, &mut sink)
        .expect("valid choice index");

    // --- The session snapshots to plain RON ---
    let save = machine.snapshot();
    println!();
    println!("--- Save file ---");
    println!("{}", save.to_ron().expect("serializable save"));
    println!("-----------------");

    // --- Take the ferry; no treasures, so the single tier catches us ---
    machine
        .select_choice(0, &mut sink)
        .expect("valid choice index");

    // --- Leave from the ending scene ---
    let outcome = machine
        .select_choice(1, &mut sink)
        .expect("valid choice index");
    assert!(matches!(outcome, StepOutcome::Quit));
    println!();
    println!("Session over.");
}
