/// Bundled story integrity tests — every address and token must resolve.

use gamebook_engine::core::catalog::StoryCatalog;
use gamebook_engine::schema::action::ActionToken;
use gamebook_engine::schema::scene::{CategoryGroup, ChoiceTarget, SceneAddress};
use std::collections::HashSet;
use std::path::Path;

const STORY_PATH: &str = "stories/nonsense_survival/story.ron";

fn load_story() -> StoryCatalog {
    StoryCatalog::load_from_ron(Path::new(STORY_PATH)).unwrap()
}

#[test]
fn bundled_story_loads() {
    let catalog = load_story();
    assert_eq!(catalog.title(), "비상식에서 살아남기");

    let start = catalog.start();
    assert!(
        catalog.lookup(&start.category, &start.scene).is_some(),
        "start scene {} must exist",
        start
    );
}

#[test]
fn every_explore_category_has_a_first_scene() {
    let catalog = load_story();
    let explore = catalog.explore_categories();
    assert_eq!(explore.len(), 8);

    for category in &explore {
        assert!(
            catalog.lookup(category, "first").is_some(),
            "explore category '{}' is missing its 'first' scene",
            category
        );
    }
}

#[test]
fn every_choice_target_resolves() {
    let catalog = load_story();

    for (name, category) in catalog.categories() {
        for (scene_name, scene) in &category.scenes {
            for choice in &scene.choices {
                match &choice.target {
                    ChoiceTarget::Explicit(addr) => {
                        assert!(
                            catalog.lookup(&addr.category, &addr.scene).is_some(),
                            "{}/{} points at missing scene {}",
                            name,
                            scene_name,
                            addr
                        );
                    }
                    ChoiceTarget::Local(target) => {
                        assert!(
                            catalog.lookup(name, target).is_some(),
                            "{}/{} points at missing sibling '{}'",
                            name,
                            scene_name,
                            target
                        );
                    }
                    ChoiceTarget::RandomStory
                    | ChoiceTarget::StartGame
                    | ChoiceTarget::EndGame
                    | ChoiceTarget::Quit => {}
                }
            }
        }
    }
}

#[test]
fn no_unknown_action_tokens() {
    let catalog = load_story();

    for (name, category) in catalog.categories() {
        for (scene_name, scene) in &category.scenes {
            for choice in &scene.choices {
                for token in &choice.tokens {
                    assert!(
                        !matches!(token, ActionToken::Unknown(_)),
                        "{}/{} choice '{}' carries unknown token {:?}",
                        name,
                        scene_name,
                        choice.label,
                        token
                    );
                }
            }
        }
    }
}

#[test]
fn ending_configuration_resolves() {
    let catalog = load_story();
    let endings = catalog.endings();

    for addr in [&endings.defeat, &endings.exhausted] {
        assert!(
            catalog.lookup(&addr.category, &addr.scene).is_some(),
            "ending address {} must exist",
            addr
        );
        assert_eq!(
            catalog.group_of(&addr.category),
            Some(CategoryGroup::Ending),
            "ending address {} must sit in an ending category",
            addr
        );
    }
    for tier in &endings.tiers {
        assert!(
            catalog
                .lookup(&tier.target.category, &tier.target.scene)
                .is_some(),
            "tier target {} must exist",
            tier.target
        );
    }
}

#[test]
fn tier_table_descends_to_a_zero_floor() {
    let catalog = load_story();
    let tiers = &catalog.endings().tiers;
    assert!(!tiers.is_empty());

    for pair in tiers.windows(2) {
        assert!(
            pair[0].min_treasures > pair[1].min_treasures,
            "tier thresholds must be declared highest first"
        );
    }
    assert_eq!(
        tiers.last().unwrap().min_treasures,
        0,
        "the last tier must catch a treasureless run"
    );
}

#[test]
fn every_scene_is_reachable() {
    let catalog = load_story();

    let mut reachable: HashSet<SceneAddress> = HashSet::new();
    reachable.insert(catalog.start().clone());
    for category in catalog.explore_categories() {
        reachable.insert(SceneAddress::new(category, "first"));
    }
    let endings = catalog.endings();
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
            assert!(
                reachable.contains(&addr),
                "scene {} is authored but never referenced",
                addr
            );
        }
    }
}

#[test]
fn no_scene_dead_ends() {
    let catalog = load_story();

    for (name, category) in catalog.categories() {
        for (scene_name, scene) in &category.scenes {
            assert!(
                !scene.text.is_empty(),
                "{}/{} has empty text",
                name,
                scene_name
            );
            assert!(
                !scene.choices.is_empty(),
                "{}/{} offers no choices and would strand the player",
                name,
                scene_name
            );
            for choice in &scene.choices {
                assert!(
                    !choice.label.is_empty(),
                    "{}/{} has an unlabeled choice",
                    name,
                    scene_name
                );
            }
        }
    }
}
