// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reveal-on-scroll decisions.

use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

/// Tuning for scroll reveals.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RevealConfig {
    /// Visible fraction of an element that counts as intersecting.
    pub threshold: f64,
    /// Length of the reveal transition in seconds.
    pub transition_secs: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.15,
            transition_secs: 0.9,
        }
    }
}

/// An element to make visible now.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Reveal<K> {
    /// The element.
    pub id: K,
    /// Play the transition; `false` means jump straight to the visible state.
    pub animate: bool,
    /// Transition delay in seconds.
    pub delay_secs: f64,
}

/// How a [`RevealTracker`] decides when elements become visible.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RevealStrategy {
    /// Reduced motion: everything visible at once, no transition.
    Static,
    /// No visibility observer: everything visible at once, animated.
    Eager,
    /// Each element reveals the first time it scrolls into view.
    OnIntersect,
}

impl RevealStrategy {
    /// Choose a strategy from the environment.
    pub fn select(reduced_motion: bool, observer_available: bool) -> Self {
        if reduced_motion {
            Self::Static
        } else if observer_available {
            Self::OnIntersect
        } else {
            Self::Eager
        }
    }
}

/// Tracks which fade-in elements are still waiting to be revealed.
///
/// Each element reveals at most once; after that the host should stop
/// observing it.
#[derive(Clone, Debug)]
pub struct RevealTracker<K> {
    strategy: RevealStrategy,
    config: RevealConfig,
    waiting: HashMap<K, f64>,
}

impl<K: Clone + Eq + Hash> RevealTracker<K> {
    /// Create a tracker with the default [`RevealConfig`].
    pub fn new(reduced_motion: bool, observer_available: bool) -> Self {
        Self::with_config(
            RevealConfig::default(),
            RevealStrategy::select(reduced_motion, observer_available),
        )
    }

    /// Create a tracker with an explicit configuration and strategy.
    pub fn with_config(config: RevealConfig, strategy: RevealStrategy) -> Self {
        tracing::debug!(?strategy, "reveal tracker ready");
        Self {
            strategy,
            config,
            waiting: HashMap::new(),
        }
    }

    /// The active strategy.
    pub fn strategy(&self) -> RevealStrategy {
        self.strategy
    }

    /// Reveal tuning.
    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// True if the host should attach a visibility observer to tracked elements.
    pub fn needs_observer(&self) -> bool {
        self.strategy == RevealStrategy::OnIntersect
    }

    /// Number of elements still waiting to scroll into view.
    pub fn waiting(&self) -> usize {
        self.waiting.len()
    }

    /// Register an element with its transition delay in seconds.
    ///
    /// Returns a reveal right away unless the element has to wait for
    /// intersection.
    pub fn track(&mut self, id: K, delay_secs: f64) -> Option<Reveal<K>> {
        match self.strategy {
            RevealStrategy::Static => Some(Reveal {
                id,
                animate: false,
                delay_secs: 0.0,
            }),
            RevealStrategy::Eager => Some(Reveal {
                id,
                animate: true,
                delay_secs,
            }),
            RevealStrategy::OnIntersect => {
                self.waiting.insert(id, delay_secs);
                None
            }
        }
    }

    /// An observed element changed intersection state.
    ///
    /// Returns the reveal the first time `id` intersects; the host then
    /// unobserves it.
    pub fn on_intersect(&mut self, id: &K, is_intersecting: bool) -> Option<Reveal<K>> {
        if !is_intersecting {
            return None;
        }
        let (id, delay_secs) = self.waiting.remove_entry(id)?;
        Some(Reveal {
            id,
            animate: true,
            delay_secs,
        })
    }
}

/// Delay between consecutive members of a [`StaggerGroup`].
pub const STAGGER_STEP_MS: u32 = 300;

/// Visible fraction of the first member that triggers a [`StaggerGroup`].
pub const STAGGER_THRESHOLD: f64 = 0.2;

/// A row of elements revealed together, one after another.
///
/// Only the first member is observed. When it intersects, member `i` is
/// scheduled `i * step_ms` later, and the group never fires again.
#[derive(Clone, Debug)]
pub struct StaggerGroup<K> {
    members: SmallVec<[K; 4]>,
    step_ms: u32,
    fired: bool,
}

impl<K: Clone> StaggerGroup<K> {
    /// Create a group with the default step.
    pub fn new(members: impl IntoIterator<Item = K>) -> Self {
        Self {
            members: members.into_iter().collect(),
            step_ms: STAGGER_STEP_MS,
            fired: false,
        }
    }

    /// Replace the step between members.
    pub fn with_step_ms(mut self, step_ms: u32) -> Self {
        self.step_ms = step_ms;
        self
    }

    /// The member the host should observe, if any.
    pub fn sentinel(&self) -> Option<&K> {
        if self.fired { None } else { self.members.first() }
    }

    /// True once the group has been revealed.
    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// The sentinel changed intersection state.
    ///
    /// Returns `(member, delay_ms)` pairs the first time it intersects and an
    /// empty list otherwise. The host disconnects its observer after a
    /// non-empty result.
    pub fn on_intersect(&mut self, is_intersecting: bool) -> SmallVec<[(K, u32); 4]> {
        if !is_intersecting || self.fired {
            return SmallVec::new();
        }
        self.fired = true;
        let mut delay = 0_u32;
        self.members
            .iter()
            .map(|member| {
                let scheduled = (member.clone(), delay);
                delay = delay.saturating_add(self.step_ms);
                scheduled
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn strategy_selection() {
        assert_eq!(RevealStrategy::select(true, true), RevealStrategy::Static);
        assert_eq!(RevealStrategy::select(true, false), RevealStrategy::Static);
        assert_eq!(RevealStrategy::select(false, false), RevealStrategy::Eager);
        assert_eq!(
            RevealStrategy::select(false, true),
            RevealStrategy::OnIntersect
        );
    }

    #[test]
    fn reduced_motion_reveals_without_transition() {
        let mut t = RevealTracker::new(true, true);
        assert!(!t.needs_observer());
        assert_eq!(
            t.track("intro", 0.4),
            Some(Reveal {
                id: "intro",
                animate: false,
                delay_secs: 0.0
            })
        );
        assert_eq!(t.waiting(), 0);
    }

    #[test]
    fn without_observer_reveals_animated_with_delay() {
        let mut t = RevealTracker::new(false, false);
        assert_eq!(
            t.track("intro", 0.4),
            Some(Reveal {
                id: "intro",
                animate: true,
                delay_secs: 0.4
            })
        );
    }

    #[test]
    fn reveals_once_on_first_intersection() {
        let mut t = RevealTracker::new(false, true);
        assert!(t.needs_observer());
        assert_eq!(t.track("a", 0.0), None);
        assert_eq!(t.track("b", 0.2), None);
        assert_eq!(t.waiting(), 2);

        assert_eq!(t.on_intersect(&"b", false), None);
        assert_eq!(
            t.on_intersect(&"b", true),
            Some(Reveal {
                id: "b",
                animate: true,
                delay_secs: 0.2
            })
        );
        assert_eq!(t.on_intersect(&"b", true), None);
        assert_eq!(t.on_intersect(&"unknown", true), None);
        assert_eq!(t.waiting(), 1);
    }

    #[test]
    fn stagger_fires_once_in_order() {
        let mut g = StaggerGroup::new(["t1", "t2", "t3"]);
        assert_eq!(g.sentinel(), Some(&"t1"));
        assert!(g.on_intersect(false).is_empty());

        let schedule: Vec<_> = g.on_intersect(true).into_iter().collect();
        assert_eq!(schedule, [("t1", 0), ("t2", 300), ("t3", 600)]);
        assert!(g.has_fired());
        assert_eq!(g.sentinel(), None);
        assert!(g.on_intersect(true).is_empty());
    }

    #[test]
    fn empty_stagger_group_has_no_sentinel() {
        let mut g = StaggerGroup::<&str>::new([]);
        assert_eq!(g.sentinel(), None);
        assert!(g.on_intersect(true).is_empty());
    }
}
