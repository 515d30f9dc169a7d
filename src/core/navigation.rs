/// Choice-target navigation: decides where a selected choice leads.

use rand::rngs::StdRng;
use tracing::debug;

use crate::core::pool::ScenePool;
use crate::schema::scene::{ChoiceTarget, EndingsConfig, SceneAddress};

/// Entry scene every explore category provides; random draws land on
/// `<category>/first`.
pub const FIRST_SCENE: &str = "first";

/// Where a resolved choice leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Enter this scene.
    Scene(SceneAddress),
    /// Back to the title screen with a full reset.
    Title,
    /// Terminate the session.
    Quit,
}

/// Resolves a choice target. Evaluation order is normative:
///
/// 1. explicit `category/scene` addresses pass through;
/// 2. `random_story` draws from the pool, removing the drawn category
///    immediately; an exhausted pool routes to the worn-out ending;
/// 3. `start_game` returns to the title;
/// 4. `end_game`, and any remaining target once the pool is empty,
///    settles on an ending tier by thresholding the treasure counter;
/// 5. `quit` terminates;
/// 6. bare names resolve inside the current category.
///
/// The tier-4 pool-empty fallback captures `quit` and bare names once the
/// pool has drained; story files route post-exhaustion exits through
/// `start_game` or explicit addresses.
pub fn resolve(
    target: &ChoiceTarget,
    current_category: &str,
    pool: &mut ScenePool,
    rng: &mut StdRng,
    treasures: i32,
    endings: &EndingsConfig,
) -> Destination {
    match target {
        ChoiceTarget::Explicit(addr) => Destination::Scene(addr.clone()),
        ChoiceTarget::RandomStory => match pool.draw(rng) {
            Some(category) => {
                pool.remove(&category);
                debug!(category = %category, remaining = pool.len(), "random category drawn");
                Destination::Scene(SceneAddress::new(category, FIRST_SCENE))
            }
            None => {
                debug!("pool exhausted, routing to the worn-out ending");
                Destination::Scene(endings.exhausted.clone())
            }
        },
        ChoiceTarget::StartGame => Destination::Title,
        ChoiceTarget::EndGame => ending_tier(endings, treasures),
        ChoiceTarget::Quit if pool.is_empty() => ending_tier(endings, treasures),
        ChoiceTarget::Quit => Destination::Quit,
        ChoiceTarget::Local(_) if pool.is_empty() => ending_tier(endings, treasures),
        ChoiceTarget::Local(name) => {
            Destination::Scene(SceneAddress::new(current_category, name.clone()))
        }
    }
}

fn ending_tier(endings: &EndingsConfig, treasures: i32) -> Destination {
    let tier = endings.tier_for(treasures);
    debug!(treasures, target = %tier, "ending tier selected");
    Destination::Scene(tier.clone())
}
