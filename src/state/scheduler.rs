// Repeating tick registration owned by the countdown host
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::error::TimerError;

/// A cancellable repeating task. At most one registration is live at a time.
pub trait Scheduler {
    /// Register `callback` every `period_ms`, replacing any live registration.
    fn start(&mut self, period_ms: i32, callback: Box<dyn FnMut()>) -> Result<(), TimerError>;
    /// Cancel the live registration. Stopping an idle scheduler does nothing.
    fn stop(&mut self);
    fn is_active(&self) -> bool;
}

/// `window.setInterval` backed scheduler.
///
/// Holds the closure for as long as the interval is registered. `stop` must not
/// be called from inside the callback itself, since it drops the closure.
#[derive(Default)]
pub struct IntervalScheduler {
    live: Option<(i32, Closure<dyn FnMut()>)>,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for IntervalScheduler {
    fn start(&mut self, period_ms: i32, callback: Box<dyn FnMut()>) -> Result<(), TimerError> {
        self.stop();
        let window = web_sys::window().ok_or(TimerError::NoWindow)?;
        let tick = Closure::wrap(callback);
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            period_ms,
        )?;
        log::debug!("interval {id} started, period {period_ms}ms");
        self.live = Some((id, tick));
        Ok(())
    }

    fn stop(&mut self) {
        if let Some((id, tick)) = self.live.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(id);
            }
            drop(tick);
            log::debug!("interval {id} cleared");
        }
    }

    fn is_active(&self) -> bool {
        self.live.is_some()
    }
}

impl Drop for IntervalScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
