use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, Window};

use super::{Page, SubmitPath};
use crate::config::{CONFIG_ELEMENT_ID, TimerConfig};
use crate::error::TimerError;
use crate::model::TimerFlag;

// Page hooks provided by the exam page scripts
const SAVE_WORK_FN: &str = "ajaxSACWork";
const RECORDER_FLUSH_FN: &str = "do602Processing";
const SUBMIT_FN: &str = "SubmitTheForm";
const CLICKED_BUTTON_VAR: &str = "frm1ButtonClick";

/// The live document, as seen through `web-sys`.
pub struct WebPage {
    window: Window,
    document: Document,
    form_name: String,
    reason_field: String,
}

impl WebPage {
    pub fn new(config: &TimerConfig) -> Result<Self, TimerError> {
        let window = web_sys::window().ok_or(TimerError::NoWindow)?;
        let document = window.document().ok_or(TimerError::NoDocument)?;
        Ok(Self {
            window,
            document,
            form_name: config.form_name.clone(),
            reason_field: config.reason_field.clone(),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn page_function(&self, name: &str) -> Option<Function> {
        Reflect::get(&self.window, &JsValue::from_str(name))
            .ok()?
            .dyn_into::<Function>()
            .ok()
    }

    fn global(&self, name: &str) -> Option<JsValue> {
        let v = Reflect::get(&self.window, &JsValue::from_str(name)).ok()?;
        if v.is_undefined() || v.is_null() { None } else { Some(v) }
    }

    fn form(&self) -> Result<HtmlFormElement, TimerError> {
        self.document
            .forms()
            .named_item(&self.form_name)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
            .ok_or_else(|| TimerError::MissingForm(self.form_name.clone()))
    }

    /// Config overrides from the page, falling back to defaults on any problem.
    pub fn load_config() -> TimerConfig {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        match raw {
            Some(raw) => TimerConfig::from_json(&raw).unwrap_or_else(|e| {
                log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {e}");
                TimerConfig::default()
            }),
            None => TimerConfig::default(),
        }
    }

    fn counter(&self, name: &str) -> Result<i64, TimerError> {
        let v = self
            .global(name)
            .ok_or_else(|| TimerError::MissingGlobal(name.to_string()))?;
        counter_value(name, v.as_f64(), v.as_string())
    }

    fn flag(&self, name: &str) -> TimerFlag {
        let raw = self.global(name).and_then(|v| v.as_string()).unwrap_or_default();
        TimerFlag::parse(&raw)
    }
}

/// Page globals arrive as numbers or as numeric strings.
pub(crate) fn counter_value(name: &str, number: Option<f64>, text: Option<String>) -> Result<i64, TimerError> {
    let invalid = |value: String| TimerError::InvalidGlobal { name: name.to_string(), value };
    if let Some(n) = number {
        if !n.is_finite() {
            return Err(invalid(n.to_string()));
        }
        return Ok(n.trunc() as i64);
    }
    match text {
        Some(t) => t.trim().parse::<i64>().map_err(|_| invalid(t)),
        None => Err(invalid("non-numeric value".to_string())),
    }
}

impl Page for WebPage {
    fn set_text(&self, id: &str, text: &str) -> bool {
        match self.element(id) {
            Some(el) => {
                el.set_inner_html(text);
                true
            }
            None => false,
        }
    }

    fn hide(&self, id: &str) -> bool {
        let Some(el) = self.element(id) else { return false; };
        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            if let Err(e) = html.style().set_property("display", "none") {
                log::warn!("could not hide #{id}: {}", TimerError::from(e));
            }
        }
        true
    }

    fn text_of(&self, id: &str) -> Option<String> {
        self.element(id).map(|el| el.inner_html())
    }

    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            log::warn!("alert failed: {}", TimerError::from(e));
        }
    }

    fn set_submit_reason(&self, reason: &str) -> Result<(), TimerError> {
        let field = self
            .form()?
            .elements()
            .named_item(&self.reason_field)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .ok_or_else(|| TimerError::MissingField(self.reason_field.clone()))?;
        field.set_value(reason);
        Ok(())
    }

    fn save_work(&self) {
        match self.page_function(SAVE_WORK_FN) {
            Some(f) => {
                if let Err(e) = f.call0(&self.window) {
                    log::warn!("{SAVE_WORK_FN} failed: {}", TimerError::from(e));
                }
            }
            None => log::debug!("{SAVE_WORK_FN} not defined on this page"),
        }
    }

    fn submit_path(&self, _button: &str) -> SubmitPath {
        if self.page_function(RECORDER_FLUSH_FN).is_some() && self.page_function(SUBMIT_FN).is_some() {
            SubmitPath::Specialized
        } else {
            SubmitPath::DirectOnly
        }
    }

    fn submit_specialized(&self, button: &str) -> Result<(), TimerError> {
        let flush = self
            .page_function(RECORDER_FLUSH_FN)
            .ok_or_else(|| TimerError::MissingGlobal(RECORDER_FLUSH_FN.to_string()))?;
        let submit = self
            .page_function(SUBMIT_FN)
            .ok_or_else(|| TimerError::MissingGlobal(SUBMIT_FN.to_string()))?;
        let button = JsValue::from_str(button);
        Reflect::set(&self.window, &JsValue::from_str(CLICKED_BUTTON_VAR), &button)?;
        flush.call1(&self.window, &button)?;
        submit.call1(&self.window, &button)?;
        Ok(())
    }

    fn submit_form(&self) -> Result<(), TimerError> {
        self.form()?.submit()?;
        Ok(())
    }

    fn read_flags(&self, config: &TimerConfig) -> (TimerFlag, TimerFlag) {
        let names = &config.globals;
        (self.flag(&names.test_flag), self.flag(&names.section_flag))
    }

    fn read_counters(&self, config: &TimerConfig) -> Result<(i64, i64), TimerError> {
        let names = &config.globals;
        Ok((self.counter(&names.test_seconds)?, self.counter(&names.section_seconds)?))
    }
}
