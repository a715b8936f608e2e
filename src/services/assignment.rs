// src/services/assignment.rs
//
// Admin workload assignment.
//
// Assignment is a pluggable policy so uniform random can later be swapped
// for round-robin or load-aware selection without touching the registry.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::seq::SliceRandom;
use uuid::Uuid;

/// Picks which admin takes responsibility for an application.
/// Returns None when the pool is empty.
pub trait AssignmentPolicy: Send + Sync {
    fn pick_assignee(&self, pool: &[Uuid]) -> Option<Uuid>;
}

/// Default policy: uniform random draw over the admin pool
#[derive(Default)]
pub struct UniformRandomPolicy;

impl UniformRandomPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl AssignmentPolicy for UniformRandomPolicy {
    fn pick_assignee(&self, pool: &[Uuid]) -> Option<Uuid> {
        pool.choose(&mut rand::thread_rng()).copied()
    }
}

/// Deterministic rotation through the pool, mainly for tests
#[derive(Default)]
pub struct RoundRobinPolicy {
    next: AtomicUsize,
}

impl RoundRobinPolicy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AssignmentPolicy for RoundRobinPolicy {
    fn pick_assignee(&self, pool: &[Uuid]) -> Option<Uuid> {
        if pool.is_empty() {
            return None;
        }
        let index = self.next.fetch_add(1, Ordering::SeqCst) % pool.len();
        Some(pool[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_pick_stays_in_pool() {
        let pool: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        let policy = UniformRandomPolicy::new();
        for _ in 0..50 {
            let picked = policy.pick_assignee(&pool).unwrap();
            assert!(pool.contains(&picked));
        }
    }

    #[test]
    fn test_empty_pool_yields_none() {
        assert!(UniformRandomPolicy::new().pick_assignee(&[]).is_none());
        assert!(RoundRobinPolicy::new().pick_assignee(&[]).is_none());
    }

    #[test]
    fn test_round_robin_rotates() {
        let pool: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        let policy = RoundRobinPolicy::new();
        assert_eq!(policy.pick_assignee(&pool), Some(pool[0]));
        assert_eq!(policy.pick_assignee(&pool), Some(pool[1]));
        assert_eq!(policy.pick_assignee(&pool), Some(pool[2]));
        assert_eq!(policy.pick_assignee(&pool), Some(pool[0]));
    }
}
