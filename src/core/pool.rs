/// Random-content pool: the explore categories a playthrough has not yet visited.

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The set of explore categories still available to random draws.
///
/// Stored sorted so a fixed seed produces the same draw sequence no
/// matter how the catalog's maps iterate. The pool only shrinks during a
/// playthrough; restarting rebuilds it from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenePool {
    remaining: Vec<String>,
}

impl ScenePool {
    /// Builds a pool from category keys, sorted and deduplicated.
    pub fn from_categories<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut remaining: Vec<String> = keys.into_iter().collect();
        remaining.sort();
        remaining.dedup();
        ScenePool { remaining }
    }

    /// Uniform draw among the remaining categories. `None` means the pool
    /// is exhausted: an expected end-of-content signal, not an error. The
    /// drawn category stays in the pool until [`ScenePool::remove`].
    pub fn draw(&self, rng: &mut StdRng) -> Option<String> {
        if self.remaining.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.remaining.len());
        Some(self.remaining[index].clone())
    }

    /// Removes a category. Idempotent: absent keys are a no-op.
    pub fn remove(&mut self, category: &str) {
        self.remaining.retain(|c| c != category);
    }

    pub fn contains(&self, category: &str) -> bool {
        self.remaining.iter().any(|c| c == category)
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Remaining categories in sorted order, for saves and display.
    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn make_pool() -> ScenePool {
        ScenePool::from_categories(vec![
            "cave".to_string(),
            "beach".to_string(),
            "forest".to_string(),
        ])
    }

    #[test]
    fn from_categories_sorts_and_dedups() {
        let pool = ScenePool::from_categories(vec![
            "cave".to_string(),
            "beach".to_string(),
            "cave".to_string(),
        ]);
        assert_eq!(pool.remaining(), ["beach", "cave"]);
    }

    #[test]
    fn draw_returns_a_member_without_removing_it() {
        let pool = make_pool();
        let mut rng = StdRng::seed_from_u64(7);
        let drawn = pool.draw(&mut rng).unwrap();
        assert!(pool.contains(&drawn));
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn draw_from_empty_pool_is_none() {
        let pool = ScenePool::from_categories(vec![]);
        let mut rng = StdRng::seed_from_u64(7);
        assert!(pool.draw(&mut rng).is_none());
    }

    #[test]
    fn remove_is_idempotent() {
        let mut pool = make_pool();
        pool.remove("cave");
        assert_eq!(pool.len(), 2);
        pool.remove("cave");
        assert_eq!(pool.len(), 2);
        pool.remove("never_there");
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn same_seed_draws_the_same_sequence() {
        let drain = |seed: u64| {
            let mut pool = make_pool();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut order = Vec::new();
            while let Some(category) = pool.draw(&mut rng) {
                pool.remove(&category);
                order.push(category);
            }
            order
        };
        assert_eq!(drain(42), drain(42));
        assert_eq!(drain(42).len(), 3);
    }
}
