/// Play — terminal session for running bundled or custom stories.
///
/// Usage: play [--story <path>] [--seed <n>]
///
/// Commands:
///   <number>      — take the numbered choice
///   status        — reprint the current standing
///   items         — list held items and abilities
///   save <path>   — write the session to a RON save file
///   load <path>   — resume a session from a save file
///   restart       — back to the opening scene
///   help          — list commands
///   quit          — exit

use gamebook_engine::core::machine::{RenderSink, SceneMachine, StepOutcome};
use gamebook_engine::schema::save::SaveState;
use std::io::{self, BufRead, Write};
use std::path::Path;

const DEFAULT_STORY: &str = "stories/nonsense_survival/story.ron";

struct TerminalSink;

impl RenderSink for TerminalSink {
    fn scene_entered(&mut self, text: &str, image: Option<&str>, choices: &[String]) {
        println!();
        println!("{}", text);
        if let Some(path) = image {
            println!("[그림: {}]", path);
        }
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
        let item_line: Vec<String> = items.iter().map(|(n, c)| format!("{} x {}", n, c)).collect();
        let ability_line: Vec<String> = abilities
            .iter()
            .map(|(n, lv)| format!("{} lv. {}", n, lv))
            .collect();
        if !item_line.is_empty() {
            println!("[소지품] {}", item_line.join(", "));
        }
        if !ability_line.is_empty() {
            println!("[능력] {}", ability_line.join(", "));
        }
    }

    fn warning(&mut self, message: &str) {
        println!("(!) {}", message);
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() >= 2 && (args[1] == "--help" || args[1] == "-h") {
        print_usage();
        return;
    }

    let mut story_path = DEFAULT_STORY.to_string();
    let mut seed: u64 = 42;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--story" if i + 1 < args.len() => {
                i += 1;
                story_path = args[i].clone();
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().unwrap_or(42);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut machine = match SceneMachine::builder().story_path(&story_path).seed(seed).build() {
        Ok(machine) => machine,
        Err(e) => {
            eprintln!("ERROR loading {}: {}", story_path, e);
            std::process::exit(1);
        }
    };

    println!("=== {} ===", machine.title());
    println!("Story: {}", story_path);
    println!("Seed: {}", seed);
    println!("Type 'help' for commands.");

    let mut sink = TerminalSink;
    machine.start(&mut sink);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        // Bare numbers take the matching choice.
        if let Ok(number) = cmd.parse::<usize>() {
            if number == 0 {
                println!("Choices are numbered from 1.");
                continue;
            }
            match machine.select_choice(number - 1, &mut sink) {
                Ok(StepOutcome::Continue) => {}
                Ok(StepOutcome::Title) => {
                    println!("\n=== {} ===", machine.title());
                    machine.start(&mut sink);
                }
                Ok(StepOutcome::Quit) => {
                    println!("Goodbye.");
                    break;
                }
                Err(e) => {
                    println!("ERROR: {}", e);
                }
            }
            continue;
        }

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => {
                print_help();
            }
            "status" => {
                let state = machine.state();
                println!(
                    "[목숨 {} | 멘탈 {} | 돈 {} | 보물 {}]",
                    state.lives, state.sense, state.money, state.treasures
                );
            }
            "items" => {
                let items = machine.state().item_labels();
                let abilities = machine.state().ability_labels();
                if items.is_empty() && abilities.is_empty() {
                    println!("비어 있습니다.");
                }
                if !items.is_empty() {
                    println!("[소지품] {}", items.join(", "));
                }
                if !abilities.is_empty() {
                    println!("[능력] {}", abilities.join(", "));
                }
            }
            "save" => {
                if parts.len() < 2 {
                    println!("Usage: save <path>");
                    continue;
                }
                match machine.snapshot().save_to_ron(Path::new(parts[1])) {
                    Ok(()) => println!("Saved to {}.", parts[1]),
                    Err(e) => println!("ERROR saving {}: {}", parts[1], e),
                }
            }
            "load" => {
                if parts.len() < 2 {
                    println!("Usage: load <path>");
                    continue;
                }
                let save = match SaveState::load_from_ron(Path::new(parts[1])) {
                    Ok(save) => save,
                    Err(e) => {
                        println!("ERROR reading {}: {}", parts[1], e);
                        continue;
                    }
                };
                match machine.restore(&save, &mut sink) {
                    Ok(()) => println!("Loaded {}.", parts[1]),
                    Err(e) => println!("ERROR restoring {}: {}", parts[1], e),
                }
            }
            "restart" => {
                println!("\n=== {} ===", machine.title());
                machine.start(&mut sink);
            }
            _ => {
                println!("Unknown command: '{}'. Type 'help' for available commands.", cmd);
            }
        }
    }
}

fn print_usage() {
    println!("Play — terminal session for running bundled or custom stories.");
    println!();
    println!("Usage: play [--story <path>] [--seed <n>]");
    println!();
    println!("  --story <path>  Path to a story RON file (default: {})", DEFAULT_STORY);
    println!("  --seed <n>      RNG seed for pool draws (default: 42)");
}

fn print_help() {
    println!("Commands:");
    println!("  <number>      Take the numbered choice");
    println!("  status        Reprint the current standing");
    println!("  items         List held items and abilities");
    println!("  save <path>   Write the session to a RON save file");
    println!("  load <path>   Resume a session from a save file");
    println!("  restart       Back to the opening scene");
    println!("  help          Show this help");
    println!("  quit          Exit");
}
