//! Boundary between the pure countdown and the hosting page.
//!
//! The page's DOM, its form, and its save/submit hooks are reached only through
//! [`Page`]. Nothing here returns an error to the tick path: every failure is
//! logged and absorbed so the interval keeps its guarantees.

pub mod web;

pub use web::WebPage;

use crate::config::TimerConfig;
use crate::error::TimerError;
use crate::model::{CountdownState, TickEffect, TimerFlag, TimerKind};
use crate::state::{PageInputs, Scheduler};

/// Which submit path the page can offer, decided before any attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitPath {
    /// Page hooks that flush the embedded recorder before submitting.
    Specialized,
    DirectOnly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Specialized,
    /// Specialized path failed; the form was submitted directly.
    Fallback,
    Direct,
}

pub trait Page {
    /// Replace an element's content. Returns false when the element is absent.
    fn set_text(&self, id: &str, text: &str) -> bool;
    /// Hide an element. Returns false when the element is absent.
    fn hide(&self, id: &str) -> bool;
    fn text_of(&self, id: &str) -> Option<String>;
    /// Blocking alert.
    fn alert(&self, message: &str);
    fn set_submit_reason(&self, reason: &str) -> Result<(), TimerError>;
    /// Persist in-progress work ahead of a forced submit.
    fn save_work(&self);
    fn submit_path(&self, button: &str) -> SubmitPath;
    fn submit_specialized(&self, button: &str) -> Result<(), TimerError>;
    fn submit_form(&self) -> Result<(), TimerError>;
    /// Enablement flags the page set before load; undefined reads as blank.
    fn read_flags(&self, config: &TimerConfig) -> (TimerFlag, TimerFlag);
    /// Test and section seconds the page set before load.
    fn read_counters(&self, config: &TimerConfig) -> Result<(i64, i64), TimerError>;

    fn read_inputs(&self, config: &TimerConfig) -> Result<PageInputs, TimerError> {
        let (test_flag, section_flag) = self.read_flags(config);
        let (test_seconds, section_seconds) = self.read_counters(config)?;
        Ok(PageInputs { test_seconds, section_seconds, test_flag, section_flag })
    }
}

/// Forced submit after a timer expires. Runs exactly one of the specialized
/// path or the direct form submit and never fails to the caller.
pub fn auto_submit<P, S>(page: &P, scheduler: &mut S, reason: TimerKind, button: &str) -> SubmitOutcome
where
    P: Page + ?Sized,
    S: Scheduler + ?Sized,
{
    scheduler.stop();
    log::info!("{} timer expired, auto-submitting", reason.reason());
    if let Err(e) = page.set_submit_reason(reason.reason()) {
        log::warn!("could not record submit reason: {e}");
    }
    page.save_work();

    let outcome = match page.submit_path(button) {
        SubmitPath::Specialized => match page.submit_specialized(button) {
            Ok(()) => SubmitOutcome::Specialized,
            Err(e) => {
                log::warn!("specialized submit failed, submitting form directly: {e}");
                submit_direct(page);
                SubmitOutcome::Fallback
            }
        },
        SubmitPath::DirectOnly => {
            submit_direct(page);
            SubmitOutcome::Direct
        }
    };
    log::debug!("auto-submit outcome: {outcome:?}");
    outcome
}

fn submit_direct<P: Page + ?Sized>(page: &P) {
    if let Err(e) = page.submit_form() {
        log::error!("form submit failed: {e}");
    }
}

/// Apply one tick's effects to the page, in order.
pub fn apply_effects<P, S>(page: &P, scheduler: &mut S, config: &TimerConfig, effects: &[TickEffect])
where
    P: Page + ?Sized,
    S: Scheduler + ?Sized,
{
    for effect in effects {
        match effect {
            TickEffect::UpdateDisplay { kind, text } => {
                // missing display is nothing to update
                let _ = page.set_text(&config.ids(*kind).display, text);
            }
            TickEffect::AutoSubmit { reason } => {
                auto_submit(page, scheduler, *reason, &config.submit_button);
            }
            TickEffect::Warn { kind } => {
                let id = &config.ids(*kind).warning;
                match page.text_of(id) {
                    Some(msg) => page.alert(&msg),
                    None => log::warn!("warning element #{id} missing, alert skipped"),
                }
            }
        }
    }
}

/// Hide the container of every timer switched off ("N") or left blank.
pub fn hide_disabled_containers<P: Page + ?Sized>(
    page: &P,
    config: &TimerConfig,
    test_flag: &TimerFlag,
    section_flag: &TimerFlag,
) {
    for (kind, flag) in [(TimerKind::Test, test_flag), (TimerKind::Section, section_flag)] {
        if flag.hides_display() {
            let id = &config.ids(kind).container;
            if !page.hide(id) {
                log::debug!("container #{id} not on page");
            }
        }
    }
}

/// Load-time setup: hide switched-off timers first, then build the starting
/// state. Containers are hidden even when the counters cannot be read.
pub fn prepare_countdown<P: Page + ?Sized>(page: &P, config: &TimerConfig) -> Result<CountdownState, TimerError> {
    let (test_flag, section_flag) = page.read_flags(config);
    hide_disabled_containers(page, config, &test_flag, &section_flag);

    let inputs = page.read_inputs(config)?;
    log::info!(
        "countdown starting: test {}s ({}), section {}s ({})",
        inputs.test_seconds,
        inputs.test_flag.as_str(),
        inputs.section_seconds,
        inputs.section_flag.as_str()
    );
    Ok(inputs.into_state(config.warning_at_secs))
}
