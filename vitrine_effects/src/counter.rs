// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Count-up statistics that always end on their exact literal.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::Debug;

/// Options handed to the counter utility for every animated stat.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CountUpOptions {
    /// Animation length in seconds.
    pub duration_secs: f64,
    /// Thousands separator.
    pub separator: char,
    /// Digits after the decimal point.
    pub decimal_places: u32,
}

impl Default for CountUpOptions {
    fn default() -> Self {
        Self {
            duration_secs: 3.0,
            separator: ',',
            decimal_places: 0,
        }
    }
}

/// An external count-up animation utility.
pub trait CountUp<K> {
    /// Why an animation could not start.
    type Error: Debug;

    /// Start animating the display of `id` from zero to `target`.
    ///
    /// Implementations report the end of the animation back through
    /// [`StatBoard::complete`].
    fn start(&mut self, id: &K, target: u64, options: &CountUpOptions) -> Result<(), Self::Error>;
}

/// Where stat text ends up.
pub trait StatDisplay<K> {
    /// Replace the visible text of `id`.
    fn show(&mut self, id: &K, text: &str);
}

/// One statistic on the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatSpec<K> {
    /// Host identifier of the display element.
    pub id: K,
    /// Animation target; `None` for stats that are shown as-is.
    pub target: Option<u64>,
    /// Text the stat must read once settled.
    pub final_text: String,
}

impl<K> StatSpec<K> {
    /// A stat that counts up to `target` and settles on it grouped with `,`.
    pub fn counted(id: K, target: u64) -> Self {
        Self {
            id,
            target: Some(target),
            final_text: format_grouped(target, ','),
        }
    }

    /// A stat with no numeric animation (`€550M+`, `110+`).
    pub fn literal(id: K, text: impl Into<String>) -> Self {
        Self {
            id,
            target: None,
            final_text: text.into(),
        }
    }
}

/// Where a stat is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StatPhase {
    /// [`StatBoard::start`] has not run yet.
    Idle,
    /// The counter utility is animating it.
    Counting,
    /// Showing its final literal.
    Settled,
}

/// Counts of what [`StatBoard::start`] did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StartSummary {
    /// Stats handed to the counter utility.
    pub counting: usize,
    /// Stats that went straight to their final literal.
    pub settled: usize,
}

#[derive(Clone, Debug)]
struct Stat<K> {
    spec: StatSpec<K>,
    phase: StatPhase,
}

/// The set of statistics on a page.
///
/// Whatever happens to the animation, every stat ends on its exact final
/// literal: without a counter utility, for stats with no numeric target, and
/// when the utility refuses to start, the literal is shown immediately.
#[derive(Clone, Debug)]
pub struct StatBoard<K> {
    stats: Vec<Stat<K>>,
    options: CountUpOptions,
}

impl<K: PartialEq + Debug> StatBoard<K> {
    /// Create a board with default [`CountUpOptions`].
    pub fn new(specs: impl IntoIterator<Item = StatSpec<K>>) -> Self {
        Self {
            stats: specs
                .into_iter()
                .map(|spec| Stat {
                    spec,
                    phase: StatPhase::Idle,
                })
                .collect(),
            options: CountUpOptions::default(),
        }
    }

    /// Replace the counter options.
    pub fn with_options(mut self, options: CountUpOptions) -> Self {
        self.options = options;
        self
    }

    /// Options passed to the counter utility.
    pub fn options(&self) -> &CountUpOptions {
        &self.options
    }

    /// Number of stats.
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// True if the board has no stats.
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Phase of the stat `id`.
    pub fn phase(&self, id: &K) -> Option<StatPhase> {
        self.stat(id).map(|s| s.phase)
    }

    fn stat(&self, id: &K) -> Option<&Stat<K>> {
        self.stats.iter().find(|s| s.spec.id == *id)
    }

    /// Kick off every idle stat.
    ///
    /// Pass `None` when the counter utility is not available on the page.
    pub fn start<C, D>(&mut self, counter: Option<&mut C>, display: &mut D) -> StartSummary
    where
        C: CountUp<K>,
        D: StatDisplay<K>,
    {
        let mut summary = StartSummary::default();
        let Some(counter) = counter else {
            tracing::warn!("count-up utility unavailable; showing final stat values");
            for stat in self.stats.iter_mut().filter(|s| s.phase == StatPhase::Idle) {
                settle(stat, display);
                summary.settled += 1;
            }
            return summary;
        };

        for stat in self.stats.iter_mut().filter(|s| s.phase == StatPhase::Idle) {
            let Some(target) = stat.spec.target else {
                settle(stat, display);
                summary.settled += 1;
                continue;
            };
            match counter.start(&stat.spec.id, target, &self.options) {
                Ok(()) => {
                    tracing::debug!(id = ?stat.spec.id, target, "stat counting up");
                    stat.phase = StatPhase::Counting;
                    summary.counting += 1;
                }
                Err(err) => {
                    tracing::warn!(id = ?stat.spec.id, error = ?err, "count-up failed to start");
                    settle(stat, display);
                    summary.settled += 1;
                }
            }
        }
        summary
    }

    /// The counter utility finished animating `id`; pin its final literal.
    ///
    /// Returns `false` if `id` was not counting.
    pub fn complete<D: StatDisplay<K>>(&mut self, id: &K, display: &mut D) -> bool {
        match self.stats.iter_mut().find(|s| s.spec.id == *id) {
            Some(stat) if stat.phase == StatPhase::Counting => {
                settle(stat, display);
                true
            }
            _ => {
                tracing::trace!(?id, "completion for a stat that was not counting");
                false
            }
        }
    }
}

fn settle<K, D: StatDisplay<K>>(stat: &mut Stat<K>, display: &mut D) {
    display.show(&stat.spec.id, &stat.spec.final_text);
    stat.phase = StatPhase::Settled;
}

/// Format `value` with `separator` between groups of three digits.
///
/// ```rust
/// assert_eq!(vitrine_effects::format_grouped(1355, ','), "1,355");
/// assert_eq!(vitrine_effects::format_grouped(475, ','), "475");
/// ```
pub fn format_grouped(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[derive(Default)]
    struct Screen(Vec<(&'static str, String)>);

    impl StatDisplay<&'static str> for Screen {
        fn show(&mut self, id: &&'static str, text: &str) {
            self.0.push((*id, text.into()));
        }
    }

    #[derive(Default)]
    struct Counter {
        started: Vec<(&'static str, u64)>,
        refuse: Option<&'static str>,
    }

    impl CountUp<&'static str> for Counter {
        type Error = &'static str;

        fn start(
            &mut self,
            id: &&'static str,
            target: u64,
            options: &CountUpOptions,
        ) -> Result<(), Self::Error> {
            assert_eq!(options.separator, ',');
            assert_eq!(options.decimal_places, 0);
            if self.refuse == Some(*id) {
                return Err("target element missing");
            }
            self.started.push((*id, target));
            Ok(())
        }
    }

    fn shown(id: &'static str, text: &str) -> (&'static str, String) {
        (id, text.into())
    }

    fn board() -> StatBoard<&'static str> {
        StatBoard::new([
            StatSpec::counted("clients", 1355),
            StatSpec::literal("assets", "€550M+"),
            StatSpec::literal("projects", "110+"),
            StatSpec::counted("companies", 475),
        ])
    }

    #[test]
    fn grouping() {
        assert_eq!(format_grouped(0, ','), "0");
        assert_eq!(format_grouped(999, ','), "999");
        assert_eq!(format_grouped(1000, ','), "1,000");
        assert_eq!(format_grouped(1_234_567, '.'), "1.234.567");
    }

    #[test]
    fn missing_utility_shows_every_literal() {
        let mut b = board();
        let mut screen = Screen::default();
        let summary = b.start(None::<&mut Counter>, &mut screen);
        assert_eq!(
            summary,
            StartSummary {
                counting: 0,
                settled: 4
            }
        );
        assert_eq!(
            screen.0,
            vec![
                shown("clients", "1,355"),
                shown("assets", "€550M+"),
                shown("projects", "110+"),
                shown("companies", "475"),
            ]
        );
        assert_eq!(b.phase(&"clients"), Some(StatPhase::Settled));
    }

    #[test]
    fn numeric_stats_count_and_literals_show_immediately() {
        let mut b = board();
        let mut screen = Screen::default();
        let mut counter = Counter::default();
        let summary = b.start(Some(&mut counter), &mut screen);
        assert_eq!(
            summary,
            StartSummary {
                counting: 2,
                settled: 2
            }
        );
        assert_eq!(counter.started, vec![("clients", 1355), ("companies", 475)]);
        assert_eq!(
            screen.0,
            vec![shown("assets", "€550M+"), shown("projects", "110+")]
        );

        assert!(b.complete(&"clients", &mut screen));
        assert_eq!(screen.0.last(), Some(&shown("clients", "1,355")));
        assert_eq!(b.phase(&"clients"), Some(StatPhase::Settled));
        // Only once.
        assert!(!b.complete(&"clients", &mut screen));
        assert!(!b.complete(&"assets", &mut screen));
    }

    #[test]
    fn refused_start_falls_back_to_literal() {
        let mut b = board();
        let mut screen = Screen::default();
        let mut counter = Counter {
            refuse: Some("companies"),
            ..Counter::default()
        };
        b.start(Some(&mut counter), &mut screen);
        assert_eq!(b.phase(&"companies"), Some(StatPhase::Settled));
        assert_eq!(screen.0.last(), Some(&shown("companies", "475")));
        assert_eq!(b.phase(&"clients"), Some(StatPhase::Counting));
    }

    #[test]
    fn completion_reported_during_start_settles_afterwards() {
        // A utility that finishes instantly reports completion before
        // `start` returns; the host queues it and settles once `start` is done.
        let mut b = board();
        let mut screen = Screen::default();
        let mut counter = Counter::default();
        b.start(Some(&mut counter), &mut screen);
        let finished: Vec<_> = counter.started.iter().map(|(id, _)| *id).collect();
        for id in &finished {
            assert!(b.complete(id, &mut screen));
        }
        assert_eq!(b.phase(&"clients"), Some(StatPhase::Settled));
        assert_eq!(b.phase(&"companies"), Some(StatPhase::Settled));
        assert_eq!(screen.0.last(), Some(&shown("companies", "475")));
    }

    #[test]
    fn start_skips_stats_already_running() {
        let mut b = board();
        let mut screen = Screen::default();
        let mut counter = Counter::default();
        b.start(Some(&mut counter), &mut screen);
        let again = b.start(Some(&mut counter), &mut screen);
        assert_eq!(again, StartSummary::default());
        assert_eq!(counter.started.len(), 2);
    }
}
