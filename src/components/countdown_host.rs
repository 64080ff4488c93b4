use std::rc::Rc;
use yew::prelude::*;

use crate::config::TimerConfig;
use crate::model::{CountdownAction, CountdownState};
use crate::page::{WebPage, apply_effects};
use crate::state::{IntervalScheduler, Scheduler};

#[derive(Properties, PartialEq, Clone)]
pub struct CountdownHostProps {
    pub initial: CountdownState,
    pub config: Rc<TimerConfig>,
}

// Drives the countdown; the page's own markup shows the timers, so nothing is rendered.
#[function_component(CountdownHost)]
pub fn countdown_host(props: &CountdownHostProps) -> Html {
    let state = use_reducer({
        let initial = props.initial.clone();
        move || initial
    });
    let scheduler = use_mut_ref(IntervalScheduler::new);

    {
        // Ticker, one action per second
        let dispatcher = state.dispatcher();
        let scheduler = scheduler.clone();
        let period_ms = props.config.period_ms;
        use_effect_with((), move |_| {
            let tick = {
                let dispatcher = dispatcher.clone();
                Box::new(move || dispatcher.dispatch(CountdownAction::TickSecond)) as Box<dyn FnMut()>
            };
            if let Err(e) = scheduler.borrow_mut().start(period_ms, tick) {
                log::error!("countdown not started: {e}");
                dispatcher.dispatch(CountdownAction::Halt);
            }
            move || scheduler.borrow_mut().stop()
        });
    }

    {
        // Push each tick's effects out to the page
        let state = state.clone();
        let scheduler = scheduler.clone();
        let config = props.config.clone();
        use_effect_with(state.version, move |version| {
            log::trace!(
                "tick {version}: test {}s, section {}s, {} effect(s)",
                state.test.remaining,
                state.section.remaining,
                state.pending.len()
            );
            if !state.pending.is_empty() {
                match WebPage::new(&config) {
                    Ok(page) => apply_effects(&page, &mut *scheduler.borrow_mut(), &config, &state.pending),
                    Err(e) => log::error!("cannot reach page: {e}"),
                }
            }
            || ()
        });
    }

    html! {}
}
