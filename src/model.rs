//! Countdown state for the test and section timers.
//! The tick is pure: it mutates the counters and returns the page effects to apply.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

use crate::util::format_duration;

/// Per-timer enablement flag as the page script sets it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TimerFlag {
    /// "N": no countdown submit, display hidden.
    Disabled,
    /// "B": counts down and raises the five-minute warning.
    Warning,
    /// Any other value, including the empty string.
    Shown(String),
}

impl TimerFlag {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "N" => TimerFlag::Disabled,
            "B" => TimerFlag::Warning,
            other => TimerFlag::Shown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TimerFlag::Disabled => "N",
            TimerFlag::Warning => "B",
            TimerFlag::Shown(raw) => raw,
        }
    }

    pub fn counts_down(&self) -> bool {
        !matches!(self, TimerFlag::Disabled)
    }

    pub fn warns(&self) -> bool {
        matches!(self, TimerFlag::Warning)
    }

    /// Empty string hides the display but still counts down.
    pub fn hides_display(&self) -> bool {
        match self {
            TimerFlag::Disabled => true,
            TimerFlag::Shown(raw) => raw.is_empty(),
            TimerFlag::Warning => false,
        }
    }
}

impl From<String> for TimerFlag {
    fn from(raw: String) -> Self {
        TimerFlag::parse(&raw)
    }
}

impl From<TimerFlag> for String {
    fn from(flag: TimerFlag) -> Self {
        flag.as_str().to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    Test,
    Section,
}

impl TimerKind {
    /// Value written to the form's auto-submit reason field.
    pub fn reason(self) -> &'static str {
        match self {
            TimerKind::Test => "test",
            TimerKind::Section => "section",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerCounter {
    /// Seconds left; may dip below zero when ticks are delayed.
    pub remaining: i64,
    pub flag: TimerFlag,
}

impl TimerCounter {
    pub fn new(remaining: i64, flag: TimerFlag) -> Self {
        Self { remaining, flag }
    }

    fn expired(&self) -> bool {
        self.flag.counts_down() && self.remaining < 1
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickEffect {
    UpdateDisplay { kind: TimerKind, text: String },
    AutoSubmit { reason: TimerKind },
    Warn { kind: TimerKind },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownState {
    pub test: TimerCounter,
    pub section: TimerCounter,
    /// Remaining seconds that trigger the warning on a "B" timer.
    pub warning_at: i64,
    /// Cleared by the first auto-submit; a stopped state no longer ticks.
    pub running: bool,
    /// Bumped on every reduced tick so effect hooks re-run.
    pub version: u64,
    /// Effects produced by the latest tick, waiting to be applied to the page.
    pub pending: Vec<TickEffect>,
}

impl CountdownState {
    pub fn new(test: TimerCounter, section: TimerCounter, warning_at: i64) -> Self {
        Self {
            test,
            section,
            warning_at,
            running: true,
            version: 0,
            pending: Vec::new(),
        }
    }

    pub fn counter(&self, kind: TimerKind) -> &TimerCounter {
        match kind {
            TimerKind::Test => &self.test,
            TimerKind::Section => &self.section,
        }
    }

    /// Advance both timers by one second and report what the page should do.
    pub fn tick(&mut self) -> Vec<TickEffect> {
        if !self.running {
            return Vec::new();
        }
        self.test.remaining = self.test.remaining.saturating_sub(1);
        self.section.remaining = self.section.remaining.saturating_sub(1);
        let test_text = format_duration(self.test.remaining);
        let section_text = format_duration(self.section.remaining);

        let mut effects = Vec::with_capacity(4);
        for (kind, text) in [(TimerKind::Test, test_text), (TimerKind::Section, section_text)] {
            if self.counter(kind).expired() {
                effects.push(TickEffect::AutoSubmit { reason: kind });
            } else {
                effects.push(TickEffect::UpdateDisplay { kind, text });
            }
        }
        // exact match only; a skipped second past the mark never warns
        for kind in [TimerKind::Test, TimerKind::Section] {
            let c = self.counter(kind);
            if c.remaining == self.warning_at && c.flag.warns() {
                effects.push(TickEffect::Warn { kind });
            }
        }

        if effects.iter().any(|e| matches!(e, TickEffect::AutoSubmit { .. })) {
            self.running = false;
        }
        effects
    }
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug)]
pub enum CountdownAction {
    TickSecond, // one interval callback
    Halt,
}

impl Reducible for CountdownState {
    type Action = CountdownAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use CountdownAction::*;
        if !self.running {
            return self;
        }
        let mut new = (*self).clone();
        match action {
            TickSecond => {
                new.pending = new.tick();
                new.version = new.version.wrapping_add(1);
            }
            Halt => {
                new.running = false;
                new.pending.clear();
            }
        }
        Rc::new(new)
    }
}
