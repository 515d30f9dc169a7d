/// Story Linter — validates scene addressing, token spelling, and ending
/// configuration of a story file before it ships.
///
/// Usage: story_linter <story.ron>

use gamebook_engine::core::catalog::StoryCatalog;
use gamebook_engine::schema::action::ActionToken;
use gamebook_engine::schema::scene::{CategoryGroup, ChoiceTarget, SceneAddress};
use std::collections::HashSet;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: story_linter <story.ron>");
        process::exit(0);
    }

    let story_path = &args[1];
    let catalog = match StoryCatalog::load_from_ron(Path::new(story_path)) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("ERROR: Failed to load story file: {}", e);
            process::exit(1);
        }
    };

    let scene_count: usize = catalog.categories().map(|(_, c)| c.scenes.len()).sum();
    println!(
        "Loaded '{}': {} categories, {} scenes",
        catalog.title(),
        catalog.categories().count(),
        scene_count
    );

    let (errors, warnings) = lint_story(&catalog);

    println!("\n=== Story Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn lint_story(catalog: &StoryCatalog) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // The start scene must exist.
    let start = catalog.start();
    if catalog.lookup(&start.category, &start.scene).is_none() {
        errors.push(format!("Start scene '{}' does not exist", start));
    }

    // Every explore category needs the scene random draws land on.
    for category in catalog.explore_categories() {
        if catalog.lookup(&category, "first").is_none() {
            errors.push(format!(
                "Explore category '{}' has no 'first' scene; random draws into it would fail",
                category
            ));
        }
    }

    // Choice targets must resolve; tokens must be spelled correctly.
    for (name, category) in catalog.categories() {
        for (scene_name, scene) in &category.scenes {
            if scene.text.is_empty() {
                warnings.push(format!("Scene {}/{} has empty text", name, scene_name));
            }
            if scene.choices.is_empty() {
                errors.push(format!(
                    "Scene {}/{} offers no choices and would strand the player",
                    name, scene_name
                ));
            }
            for choice in &scene.choices {
                match &choice.target {
                    ChoiceTarget::Explicit(addr) => {
                        if catalog.lookup(&addr.category, &addr.scene).is_none() {
                            errors.push(format!(
                                "Scene {}/{} choice '{}' points at missing scene '{}'",
                                name, scene_name, choice.label, addr
                            ));
                        }
                    }
                    ChoiceTarget::Local(target) => {
                        if catalog.lookup(name, target).is_none() {
                            errors.push(format!(
                                "Scene {}/{} choice '{}' points at missing sibling '{}'",
                                name, scene_name, choice.label, target
                            ));
                        }
                    }
                    ChoiceTarget::RandomStory
                    | ChoiceTarget::StartGame
                    | ChoiceTarget::EndGame
                    | ChoiceTarget::Quit => {}
                }
                for token in &choice.tokens {
                    if let ActionToken::Unknown(raw) = token {
                        warnings.push(format!(
                            "Scene {}/{} choice '{}' carries unrecognized token '{}' (it will be skipped)",
                            name, scene_name, choice.label, raw
                        ));
                    }
                }
            }
        }
    }

    // Ending configuration.
    let endings = catalog.endings();
    for (label, addr) in [("defeat", &endings.defeat), ("exhausted", &endings.exhausted)] {
        if catalog.lookup(&addr.category, &addr.scene).is_none() {
            errors.push(format!("Endings {} address '{}' does not exist", label, addr));
        } else if catalog.group_of(&addr.category) != Some(CategoryGroup::Ending) {
            warnings.push(format!(
                "Endings {} address '{}' sits outside an ending-group category",
                label, addr
            ));
        }
    }
    if endings.tiers.is_empty() {
        warnings.push("Tier table is empty; every finished run falls back to the exhausted ending".to_string());
    }
    for tier in &endings.tiers {
        if catalog.lookup(&tier.target.category, &tier.target.scene).is_none() {
            errors.push(format!(
                "Tier target '{}' (min {} treasures) does not exist",
                tier.target, tier.min_treasures
            ));
        }
    }
    for pair in endings.tiers.windows(2) {
        if pair[0].min_treasures <= pair[1].min_treasures {
            warnings.push(format!(
                "Tier '{}' (min {}) shadows tier '{}' (min {}); thresholds should descend",
                pair[0].target, pair[0].min_treasures, pair[1].target, pair[1].min_treasures
            ));
        }
    }
    if endings.tiers.last().is_some_and(|t| t.min_treasures > 0) {
        warnings.push(
            "No zero-treasure tier; a treasureless run falls back to the exhausted ending"
                .to_string(),
        );
    }

    // Reachability: anything not referenced anywhere is probably a typo.
    let mut reachable: HashSet<SceneAddress> = HashSet::new();
    reachable.insert(start.clone());
    for category in catalog.explore_categories() {
        reachable.insert(SceneAddress::new(category, "first"));
    }
    reachable.insert(endings.defeat.clone());
    reachable.insert(endings.exhausted.clone());
    for tier in &endings.tiers {
        reachable.insert(tier.target.clone());
    }
    for (name, category) in catalog.categories() {
        for scene in category.scenes.values() {
            for choice in &scene.choices {
                match &choice.target {
                    ChoiceTarget::Explicit(addr) => {
                        reachable.insert(addr.clone());
                    }
                    ChoiceTarget::Local(target) => {
                        reachable.insert(SceneAddress::new(name.clone(), target.clone()));
                    }
                    _ => {}
                }
            }
        }
    }
    for (name, category) in catalog.categories() {
        for scene_name in category.scenes.keys() {
            let addr = SceneAddress::new(name.clone(), scene_name.clone());
            if !reachable.contains(&addr) {
                warnings.push(format!("Scene {} is authored but never referenced", addr));
            }
        }
    }

    (errors, warnings)
}
