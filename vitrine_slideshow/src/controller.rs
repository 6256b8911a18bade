// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The slideshow controller: index, crossfade, and timers.

use alloc::vec::Vec;

use crate::config::SlideshowConfig;
use crate::error::SlideshowError;
use crate::types::{Direction, KeyOutcome, SlideEvent, SlideEvents, TransitionId};

/// A crossfade that has started but not resolved yet.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Pending {
    id: TransitionId,
    target: usize,
    /// Host time at which the crossfade commits without a finished signal.
    fallback_at: u64,
}

/// Timer-driven image rotator with manual controls.
///
/// Time is supplied by the host: every timed operation takes `now` in
/// milliseconds from any monotonic clock. The controller owns two deadlines,
/// the crossfade fallback and the auto-advance tick, and fires them from
/// [`advance`](Self::advance). Hosts arm a single wake-up for
/// [`next_deadline`](Self::next_deadline) and call `advance` when it elapses.
///
/// The committed index only changes when a crossfade resolves, either through
/// [`on_transition_end`](Self::on_transition_end) or the fallback deadline,
/// whichever comes first. A crossfade resolves at most once.
///
/// ## Example
///
/// ```rust
/// use vitrine_slideshow::{SlideEvent, SlideshowConfig, SlideshowController};
///
/// let mut show =
///     SlideshowController::new(["office.png", "meeting.png"], SlideshowConfig::default())
///         .unwrap();
/// show.resume(0);
///
/// // Nothing happens until the auto-advance interval elapses.
/// assert!(show.advance(7_999).is_empty());
/// let events = show.advance(8_000);
/// assert!(matches!(events[0], SlideEvent::CrossfadeStarted { target: 1, .. }));
///
/// // The presentation never reports the end of its fade: the fallback commits.
/// let events = show.advance(9_100);
/// assert!(matches!(events[0], SlideEvent::Committed { index: 1, .. }));
/// assert_eq!(show.current_index(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct SlideshowController<S> {
    slides: Vec<S>,
    current: usize,
    pending: Option<Pending>,
    /// Due time of the next automatic advance; `None` while paused.
    auto_advance: Option<u64>,
    config: SlideshowConfig,
    next_transition: u64,
}

impl<S> SlideshowController<S> {
    /// Create a paused slideshow showing the first slide.
    ///
    /// Fails with [`SlideshowError::NoSlides`] if `slides` is empty.
    pub fn new(
        slides: impl IntoIterator<Item = S>,
        config: SlideshowConfig,
    ) -> Result<Self, SlideshowError> {
        let slides: Vec<S> = slides.into_iter().collect();
        if slides.is_empty() {
            return Err(SlideshowError::NoSlides);
        }
        Ok(Self {
            slides,
            current: 0,
            pending: None,
            auto_advance: None,
            config,
            next_transition: 0,
        })
    }

    /// Number of slides; always at least one.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always `false`; construction rejects empty slide lists.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// All slides in order.
    pub fn slides(&self) -> &[S] {
        &self.slides
    }

    /// The slide at `index`, if in range.
    pub fn slide(&self, index: usize) -> Option<&S> {
        self.slides.get(index)
    }

    /// Index of the committed slide.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The committed slide.
    pub fn current_slide(&self) -> &S {
        &self.slides[self.current]
    }

    /// Configuration captured at construction.
    pub fn config(&self) -> &SlideshowConfig {
        &self.config
    }

    /// True between the start of a crossfade and its resolution.
    pub fn is_transition_in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// The crossfade in flight, if any.
    pub fn pending_transition(&self) -> Option<TransitionId> {
        self.pending.map(|p| p.id)
    }

    /// Index the crossfade in flight is heading to.
    pub fn pending_target(&self) -> Option<usize> {
        self.pending.map(|p| p.target)
    }

    /// True while the auto-advance timer is armed.
    pub fn is_auto_advancing(&self) -> bool {
        self.auto_advance.is_some()
    }

    /// Earliest host time at which [`advance`](Self::advance) has work to do.
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.pending.map(|p| p.fallback_at), self.auto_advance) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Start a crossfade toward `target` (taken modulo the slide count).
    ///
    /// If a crossfade is already in flight it is superseded: its fallback
    /// deadline is dropped, and only the new target will ever be committed.
    /// Targeting the committed slide cancels a crossfade in flight, reported
    /// as a [`SlideEvent::Committed`] back to the committed slide; with
    /// nothing in flight it is a no-op.
    pub fn go_to(&mut self, target: usize, now: u64) -> Option<SlideEvent> {
        let target = target % self.slides.len();
        if target == self.current {
            let Some(cancelled) = self.pending.take() else {
                tracing::trace!(target, "slideshow already on target");
                return None;
            };
            tracing::debug!(
                from = cancelled.target,
                to = target,
                "crossfade cancelled back to the committed slide"
            );
            return Some(SlideEvent::Committed {
                transition: cancelled.id,
                index: target,
            });
        }

        let id = TransitionId(self.next_transition);
        self.next_transition += 1;
        let superseded = self.pending.replace(Pending {
            id,
            target,
            fallback_at: now.saturating_add(self.config.fallback_ms),
        });
        match superseded {
            Some(old) => tracing::debug!(
                from = old.target,
                to = target,
                "crossfade superseded before it resolved"
            ),
            None => tracing::debug!(from = self.current, to = target, "crossfade started"),
        }
        Some(SlideEvent::CrossfadeStarted {
            transition: id,
            target,
        })
    }

    /// Crossfade to the slide after the one being shown.
    ///
    /// While a crossfade is in flight, steps from its target.
    pub fn next(&mut self, now: u64) -> Option<SlideEvent> {
        self.go_to(self.step(Direction::Next), now)
    }

    /// Crossfade to the slide before the one being shown.
    ///
    /// While a crossfade is in flight, steps from its target.
    pub fn previous(&mut self, now: u64) -> Option<SlideEvent> {
        self.go_to(self.step(Direction::Previous), now)
    }

    fn step(&self, direction: Direction) -> usize {
        let len = self.slides.len();
        let from = self.pending_target().unwrap_or(self.current);
        match direction {
            Direction::Next => (from + 1) % len,
            Direction::Previous => (from + len - 1) % len,
        }
    }

    /// Stop automatic advancing. Idempotent.
    pub fn pause(&mut self) {
        if self.auto_advance.take().is_some() {
            tracing::trace!("auto-advance paused");
        }
    }

    /// (Re)start automatic advancing, one full interval from `now`.
    ///
    /// Permanently a no-op when reduced motion was requested.
    pub fn resume(&mut self, now: u64) {
        if self.config.reduced_motion {
            return;
        }
        self.auto_advance = Some(now.saturating_add(self.config.interval_ms));
    }

    /// A user control moved the slideshow.
    ///
    /// Steps in `direction`, then restarts the auto-advance clock so the manual
    /// and automatic advances do not stack up.
    pub fn navigate(&mut self, direction: Direction, now: u64) -> Option<SlideEvent> {
        let event = match direction {
            Direction::Next => self.next(now),
            Direction::Previous => self.previous(now),
        };
        self.resume(now);
        event
    }

    /// A key was pressed while the slideshow region had focus.
    pub fn handle_key(&mut self, key: &str, now: u64) -> KeyOutcome {
        match Direction::from_key(key) {
            Some(direction) => KeyOutcome {
                prevent_default: true,
                event: self.navigate(direction, now),
            },
            None => KeyOutcome {
                prevent_default: false,
                event: None,
            },
        }
    }

    /// Pointer or focus entered the slideshow region.
    pub fn interaction_started(&mut self) {
        self.pause();
    }

    /// Pointer or focus left the slideshow region.
    pub fn interaction_ended(&mut self, now: u64) {
        self.resume(now);
    }

    /// The presentation layer finished the crossfade `transition`.
    ///
    /// Signals for anything but the crossfade in flight are ignored.
    pub fn on_transition_end(&mut self, transition: TransitionId) -> Option<SlideEvent> {
        if self.pending_transition() != Some(transition) {
            tracing::trace!(?transition, "ignoring stale transition end");
            return None;
        }
        self.resolve()
    }

    /// Fire every deadline that has elapsed at `now`, in deadline order.
    ///
    /// Follow-up deadlines are computed from the time the firing deadline was
    /// due, not from `now`, so a late wake-up behaves as if it had been on
    /// time. Auto-advance ticks that were missed entirely are coalesced into
    /// one.
    pub fn advance(&mut self, now: u64) -> SlideEvents {
        let mut events = SlideEvents::new();
        loop {
            let fallback = self
                .pending
                .map(|p| p.fallback_at)
                .filter(|&at| at <= now);
            let tick = self.auto_advance.filter(|&at| at <= now);
            match (fallback, tick) {
                (Some(at), Some(due)) if at <= due => events.extend(self.resolve()),
                (Some(_), None) => events.extend(self.resolve()),
                (_, Some(due)) => {
                    self.auto_advance = Some(self.following_tick(due, now));
                    events.extend(self.next(due));
                }
                (None, None) => break,
            }
        }
        events
    }

    fn following_tick(&self, due: u64, now: u64) -> u64 {
        let interval = self.config.interval_ms.max(1);
        let missed = (now - due) / interval;
        due.saturating_add(interval.saturating_mul(missed + 1))
    }

    /// Cancel every timer and settle any crossfade in flight.
    ///
    /// Call when the slideshow is torn down so no deadline outlives it.
    pub fn shutdown(&mut self) -> Option<SlideEvent> {
        self.pause();
        self.resolve()
    }

    fn resolve(&mut self) -> Option<SlideEvent> {
        let pending = self.pending.take()?;
        self.current = pending.target;
        tracing::debug!(index = pending.target, "crossfade committed");
        Some(SlideEvent::Committed {
            transition: pending.id,
            index: pending.target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn show(len: usize) -> SlideshowController<usize> {
        SlideshowController::new(0..len, SlideshowConfig::default()).unwrap()
    }

    fn started(event: Option<SlideEvent>) -> TransitionId {
        match event {
            Some(SlideEvent::CrossfadeStarted { transition, .. }) => transition,
            other => panic!("expected a crossfade start, got {other:?}"),
        }
    }

    #[test]
    fn empty_slide_list_is_rejected() {
        let err = SlideshowController::<&str>::new([], SlideshowConfig::default()).unwrap_err();
        assert_eq!(err, SlideshowError::NoSlides);
    }

    #[test]
    fn index_commits_only_at_resolution() {
        let mut s = show(3);
        let id = started(s.go_to(1, 0));
        assert!(s.is_transition_in_flight());
        assert_eq!(s.current_index(), 0);
        assert_eq!(
            s.on_transition_end(id),
            Some(SlideEvent::Committed {
                transition: id,
                index: 1
            })
        );
        assert_eq!(s.current_index(), 1);
        assert!(!s.is_transition_in_flight());
    }

    #[test]
    fn go_to_current_is_noop() {
        let mut s = show(3);
        assert_eq!(s.go_to(0, 0), None);
        assert_eq!(s.go_to(3, 0), None);
        assert!(!s.is_transition_in_flight());
    }

    #[test]
    fn fallback_commits_and_late_signal_is_ignored() {
        let mut s = show(3);
        let id = started(s.go_to(1, 100));
        assert!(s.advance(1_199).is_empty());
        let events = s.advance(1_200);
        assert_eq!(
            events.as_slice(),
            &[SlideEvent::Committed {
                transition: id,
                index: 1
            }]
        );
        assert_eq!(s.current_index(), 1);
        assert!(!s.is_transition_in_flight());

        assert_eq!(s.on_transition_end(id), None);
        assert!(s.advance(5_000).is_empty());
        assert_eq!(s.current_index(), 1);
    }

    #[test]
    fn finished_signal_cancels_fallback() {
        let mut s = show(3);
        let id = started(s.go_to(2, 0));
        assert!(s.on_transition_end(id).is_some());
        assert_eq!(s.next_deadline(), None);
        assert!(s.advance(10_000).is_empty());
    }

    #[test]
    fn last_go_to_wins() {
        let mut s = show(4);
        let first = started(s.go_to(1, 0));
        let second = started(s.go_to(2, 50));
        let third = started(s.go_to(3, 80));
        assert_eq!(s.pending_target(), Some(3));

        // Signals for superseded crossfades do not commit anything.
        assert_eq!(s.on_transition_end(first), None);
        assert_eq!(s.on_transition_end(second), None);
        assert!(s.is_transition_in_flight());

        // The superseded fallback at 1100 is gone; only 80 + 1100 remains.
        assert_eq!(s.next_deadline(), Some(1_180));
        assert!(s.advance(1_100).is_empty());
        let events = s.advance(1_180);
        assert_eq!(
            events.as_slice(),
            &[SlideEvent::Committed {
                transition: third,
                index: 3
            }]
        );
        assert_eq!(s.current_index(), 3);
        assert!(s.advance(2_000).is_empty());
    }

    #[test]
    fn next_then_previous_round_trips() {
        for len in 2..5 {
            let mut s = show(len);
            let id = started(s.next(0));
            s.on_transition_end(id);
            let id = started(s.previous(10));
            s.on_transition_end(id);
            assert_eq!(s.current_index(), 0, "len {len}");
        }
    }

    #[test]
    fn go_to_committed_cancels_crossfade_in_flight() {
        let mut s = show(3);
        let id = started(s.go_to(1, 0));
        assert_eq!(
            s.go_to(0, 10),
            Some(SlideEvent::Committed {
                transition: id,
                index: 0
            })
        );
        assert!(!s.is_transition_in_flight());
        assert_eq!(s.next_deadline(), None);
        assert!(s.advance(2_000).is_empty());
        assert_eq!(s.on_transition_end(id), None);
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn unsettled_next_then_previous_returns_to_start() {
        let mut s = show(3);
        started(s.next(0));
        assert!(matches!(
            s.previous(5),
            Some(SlideEvent::Committed { index: 0, .. })
        ));
        assert!(s.advance(5_000).is_empty());
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn steps_accumulate_while_in_flight() {
        let mut s = show(4);
        started(s.next(0));
        let id = started(s.next(10));
        assert_eq!(s.pending_target(), Some(2));
        s.on_transition_end(id);
        assert_eq!(s.current_index(), 2);
    }

    #[test]
    fn previous_wraps_to_last() {
        let mut s = show(3);
        assert!(matches!(
            s.previous(0),
            Some(SlideEvent::CrossfadeStarted { target: 2, .. })
        ));
    }

    #[test]
    fn single_slide_never_transitions() {
        let mut s = show(1);
        s.resume(0);
        for i in 0..10 {
            assert_eq!(s.next(i), None);
            assert_eq!(s.previous(i), None);
        }
        assert!(s.advance(100_000).is_empty());
        assert!(!s.is_transition_in_flight());
    }

    #[test]
    fn pause_is_idempotent() {
        let mut s = show(3);
        s.resume(0);
        s.pause();
        let after_first = s.next_deadline();
        s.pause();
        assert_eq!(s.next_deadline(), after_first);
        assert!(!s.is_auto_advancing());
        assert!(s.advance(50_000).is_empty());
    }

    #[test]
    fn auto_advance_ticks_every_interval() {
        let mut s = show(3);
        s.resume(0);
        let events = s.advance(8_000);
        let id = started(events.first().copied());
        s.on_transition_end(id);
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.next_deadline(), Some(16_000));
    }

    #[test]
    fn late_wakeup_resolves_fallback_and_coalesces_ticks() {
        let mut s = show(3);
        s.resume(0);
        // The host slept through two ticks; they fire as one advance.
        let events = s.advance(17_000);
        assert_eq!(
            events.as_slice(),
            &[
                SlideEvent::CrossfadeStarted {
                    transition: TransitionId(0),
                    target: 1
                },
                SlideEvent::Committed {
                    transition: TransitionId(0),
                    index: 1
                },
            ]
        );
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.next_deadline(), Some(24_000));
    }

    #[test]
    fn manual_navigation_restarts_the_clock() {
        let mut s = show(3);
        s.resume(0);
        let event = s.navigate(Direction::Next, 7_000);
        assert!(event.is_some());
        // The tick that was due at 8000 moved to 15000.
        s.advance(8_100);
        assert_eq!(s.current_index(), 1);
        assert!(s.advance(14_999).is_empty());
        assert_eq!(s.advance(15_000).len(), 1);
    }

    #[test]
    fn interaction_pauses_and_resumes() {
        let mut s = show(3);
        s.resume(0);
        s.interaction_started();
        assert!(s.advance(20_000).is_empty());
        s.interaction_ended(20_000);
        assert_eq!(s.next_deadline(), Some(28_000));
    }

    #[test]
    fn arrow_keys_navigate_and_suppress_scrolling() {
        let mut s = show(3);
        let outcome = s.handle_key("ArrowRight", 0);
        assert!(outcome.prevent_default);
        assert!(matches!(
            outcome.event,
            Some(SlideEvent::CrossfadeStarted { target: 1, .. })
        ));
        let outcome = s.handle_key("ArrowLeft", 10);
        assert!(matches!(
            outcome.event,
            Some(SlideEvent::Committed { index: 0, .. })
        ));
        let outcome = s.handle_key("ArrowLeft", 15);
        assert!(matches!(
            outcome.event,
            Some(SlideEvent::CrossfadeStarted { target: 2, .. })
        ));
        let outcome = s.handle_key("Enter", 20);
        assert_eq!(
            outcome,
            KeyOutcome {
                prevent_default: false,
                event: None
            }
        );
    }

    #[test]
    fn reduced_motion_never_arms_auto_advance() {
        let config = SlideshowConfig::with_reduced_motion(true);
        let mut s = SlideshowController::new(vec!["a", "b", "c"], config).unwrap();
        s.resume(0);
        s.interaction_ended(10);
        assert!(!s.is_auto_advancing());

        let id = started(s.navigate(Direction::Next, 100));
        assert!(!s.is_auto_advancing());
        assert_eq!(s.next_deadline(), Some(1_200));
        s.on_transition_end(id);
        assert_eq!(*s.current_slide(), "b");
        assert!(s.advance(1_000_000).is_empty());
    }

    #[test]
    fn shutdown_clears_every_deadline() {
        let mut s = show(3);
        s.resume(0);
        s.go_to(2, 10);
        assert!(matches!(
            s.shutdown(),
            Some(SlideEvent::Committed { index: 2, .. })
        ));
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn resume_after_shutdown_restarts_auto_advance() {
        let mut s = show(3);
        s.resume(0);
        s.shutdown();
        s.resume(30_000);
        assert_eq!(s.next_deadline(), Some(38_000));
        assert_eq!(s.advance(38_000).len(), 1);
    }
}
