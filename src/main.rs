use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use exam_countdown::components::{CountdownHost, CountdownHostProps};
use exam_countdown::page::{WebPage, prepare_countdown};
use exam_countdown::{CountdownState, TimerConfig, TimerError, logging};

// Detached element the (render-less) host component mounts into.
fn mount_point(page: &WebPage) -> Result<web_sys::Element, TimerError> {
    let doc = page.document();
    let host = doc.create_element("div")?;
    host.set_id("countdown-host");
    let body = doc.body().ok_or(TimerError::NoDocument)?;
    body.append_child(&host)?;
    Ok(host)
}

fn start(page: &WebPage, config: TimerConfig, initial: CountdownState) {
    let root = match mount_point(page) {
        Ok(r) => r,
        Err(e) => {
            log::error!("countdown not mounted: {e}");
            return;
        }
    };
    let props = CountdownHostProps {
        initial,
        config: Rc::new(config),
    };
    yew::Renderer::<CountdownHost>::with_root_and_props(root, props).render();
}

fn main() {
    logging::init(log::LevelFilter::Info);
    let config = WebPage::load_config();
    logging::init(config.level_filter());

    let page = match WebPage::new(&config) {
        Ok(p) => p,
        Err(e) => {
            log::error!("countdown disabled: {e}");
            return;
        }
    };

    let initial = match prepare_countdown(&page, &config) {
        Ok(s) => s,
        Err(e) => {
            log::error!("countdown not started: {e}");
            return;
        }
    };

    // ticking starts on window load
    if page.document().ready_state() == "complete" {
        start(&page, config, initial);
        return;
    }
    let window = page.window().clone();
    let on_load = Closure::once_into_js(move || start(&page, config, initial));
    if let Err(e) = window.add_event_listener_with_callback("load", on_load.unchecked_ref()) {
        log::error!("countdown not scheduled: {}", TimerError::from(e));
    }
}
