// End-to-end tick runs against an in-memory page
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use exam_countdown::model::{CountdownAction, CountdownState, TimerCounter};
use exam_countdown::page::{Page, SubmitPath, apply_effects, hide_disabled_containers, prepare_countdown};
use exam_countdown::state::{PageInputs, Scheduler};
use exam_countdown::{TimerConfig, TimerError, TimerFlag};
use yew::Reducible;

struct MemoryPage {
    elements: RefCell<HashMap<String, String>>,
    hidden: RefCell<Vec<String>>,
    reason: RefCell<Option<String>>,
    alerts: RefCell<Vec<String>>,
    saves: RefCell<u32>,
    specialized_calls: RefCell<u32>,
    direct_submits: RefCell<u32>,
    specialized: SubmitPath,
    specialized_throws: bool,
    flags: (String, String),
    counters: Option<(i64, i64)>,
}

impl MemoryPage {
    fn stock(specialized: SubmitPath, specialized_throws: bool) -> Self {
        let page = MemoryPage {
            elements: RefCell::default(),
            hidden: RefCell::default(),
            reason: RefCell::default(),
            alerts: RefCell::default(),
            saves: RefCell::default(),
            specialized_calls: RefCell::default(),
            direct_submits: RefCell::default(),
            specialized,
            specialized_throws,
            flags: (String::new(), String::new()),
            counters: None,
        };
        for (id, text) in [
            ("tTimer", ""),
            ("sTimer", ""),
            ("testTimer", ""),
            ("sectionTimer", ""),
            ("testTimerWarning", "Five minutes remain on this test."),
            ("sectionTimerWarning", "Five minutes remain in this section."),
        ] {
            page.elements.borrow_mut().insert(id.into(), text.into());
        }
        page
    }

    fn text(&self, id: &str) -> String {
        self.elements.borrow().get(id).cloned().unwrap_or_default()
    }
}

impl Page for MemoryPage {
    fn set_text(&self, id: &str, text: &str) -> bool {
        match self.elements.borrow_mut().get_mut(id) {
            Some(t) => {
                *t = text.into();
                true
            }
            None => false,
        }
    }
    fn hide(&self, id: &str) -> bool {
        let present = self.elements.borrow().contains_key(id);
        if present {
            self.hidden.borrow_mut().push(id.into());
        }
        present
    }
    fn text_of(&self, id: &str) -> Option<String> {
        self.elements.borrow().get(id).cloned()
    }
    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.into());
    }
    fn set_submit_reason(&self, reason: &str) -> Result<(), TimerError> {
        *self.reason.borrow_mut() = Some(reason.into());
        Ok(())
    }
    fn save_work(&self) {
        *self.saves.borrow_mut() += 1;
    }
    fn submit_path(&self, _button: &str) -> SubmitPath {
        self.specialized
    }
    fn submit_specialized(&self, _button: &str) -> Result<(), TimerError> {
        *self.specialized_calls.borrow_mut() += 1;
        if self.specialized_throws {
            Err(TimerError::Js("recorder not ready".into()))
        } else {
            Ok(())
        }
    }
    fn submit_form(&self) -> Result<(), TimerError> {
        *self.direct_submits.borrow_mut() += 1;
        Ok(())
    }
    fn read_flags(&self, _config: &TimerConfig) -> (TimerFlag, TimerFlag) {
        (TimerFlag::parse(&self.flags.0), TimerFlag::parse(&self.flags.1))
    }
    fn read_counters(&self, config: &TimerConfig) -> Result<(i64, i64), TimerError> {
        self.counters
            .ok_or_else(|| TimerError::MissingGlobal(config.globals.test_seconds.clone()))
    }
}

struct ManualScheduler {
    active: bool,
}

impl Scheduler for ManualScheduler {
    fn start(&mut self, _period_ms: i32, _callback: Box<dyn FnMut()>) -> Result<(), TimerError> {
        self.active = true;
        Ok(())
    }
    fn stop(&mut self) {
        self.active = false;
    }
    fn is_active(&self) -> bool {
        self.active
    }
}

/// Tick through the reducer until the scheduler stops or `max` ticks pass.
fn run(
    page: &MemoryPage,
    initial: CountdownState,
    max: usize,
) -> (Rc<CountdownState>, ManualScheduler, usize) {
    let config = TimerConfig::default();
    let mut sched = ManualScheduler { active: false };
    sched.start(config.period_ms, Box::new(|| {})).unwrap();
    let mut state = Rc::new(initial);
    let mut ticks = 0;
    while sched.is_active() && ticks < max {
        state = state.reduce(CountdownAction::TickSecond);
        apply_effects(page, &mut sched, &config, &state.pending);
        ticks += 1;
    }
    (state, sched, ticks)
}

fn initial(test: i64, test_flag: &str, section: i64, section_flag: &str) -> CountdownState {
    PageInputs {
        test_seconds: test,
        section_seconds: section,
        test_flag: TimerFlag::parse(test_flag),
        section_flag: TimerFlag::parse(section_flag),
    }
    .into_state(300)
}

#[test]
fn test_timer_runs_out_and_submits_via_specialized_path() {
    let page = MemoryPage::stock(SubmitPath::Specialized, false);
    let (state, sched, ticks) = run(&page, initial(305, "B", 4000, "Y"), 1000);

    assert_eq!(ticks, 305);
    assert!(!sched.is_active());
    assert!(!state.running);
    assert_eq!(page.reason.borrow().as_deref(), Some("test"));
    assert_eq!(*page.saves.borrow(), 1);
    assert_eq!(*page.specialized_calls.borrow(), 1);
    assert_eq!(*page.direct_submits.borrow(), 0);
    assert_eq!(*page.alerts.borrow(), vec!["Five minutes remain on this test.".to_string()]);
    // last display written before expiry
    assert_eq!(page.text("tTimer"), "0:00:01");
    assert_eq!(page.text("sTimer"), "1:01:35");
}

#[test]
fn throwing_specialized_path_falls_back_to_direct_submit() {
    let page = MemoryPage::stock(SubmitPath::Specialized, true);
    let (_, sched, ticks) = run(&page, initial(5000, "Y", 3, "Y"), 1000);

    assert_eq!(ticks, 3);
    assert!(!sched.is_active());
    assert_eq!(page.reason.borrow().as_deref(), Some("section"));
    assert_eq!(*page.specialized_calls.borrow(), 1);
    assert_eq!(*page.direct_submits.borrow(), 1);
}

#[test]
fn missing_specialized_path_submits_directly() {
    let page = MemoryPage::stock(SubmitPath::DirectOnly, false);
    let (_, _, ticks) = run(&page, initial(2, "", 2, "N"), 1000);

    assert_eq!(ticks, 2);
    assert_eq!(*page.specialized_calls.borrow(), 0);
    assert_eq!(*page.direct_submits.borrow(), 1);
    assert_eq!(page.reason.borrow().as_deref(), Some("test"));
}

#[test]
fn disabled_timers_keep_ticking_without_submitting() {
    let page = MemoryPage::stock(SubmitPath::DirectOnly, false);
    let (state, sched, ticks) = run(&page, initial(3, "N", 3, "N"), 10);

    assert_eq!(ticks, 10);
    assert!(sched.is_active());
    assert!(state.running);
    assert_eq!(state.test.remaining, -7);
    assert_eq!(*page.direct_submits.borrow(), 0);
    assert_eq!(page.text("tTimer"), "-1d 23:59:53");
}

#[test]
fn warning_only_on_exact_second() {
    let page = MemoryPage::stock(SubmitPath::DirectOnly, false);
    // a delayed start already below the mark
    let mut state = CountdownState::new(
        TimerCounter::new(298, TimerFlag::Warning),
        TimerCounter::new(302, TimerFlag::Warning),
        300,
    );
    let config = TimerConfig::default();
    let mut sched = ManualScheduler { active: true };
    for _ in 0..10 {
        let effects = state.tick();
        apply_effects(&page, &mut sched, &config, &effects);
    }
    assert_eq!(*page.alerts.borrow(), vec!["Five minutes remain in this section.".to_string()]);
}

#[test]
fn both_timers_expiring_together_submit_test_then_section() {
    let page = MemoryPage::stock(SubmitPath::DirectOnly, false);
    let (_, sched, ticks) = run(&page, initial(1, "Y", 1, "Y"), 10);

    assert_eq!(ticks, 1);
    assert!(!sched.is_active());
    assert_eq!(*page.saves.borrow(), 2);
    assert_eq!(*page.direct_submits.borrow(), 2);
    assert_eq!(page.reason.borrow().as_deref(), Some("section"));
}

#[test]
fn init_hides_off_and_blank_containers() {
    let page = MemoryPage::stock(SubmitPath::DirectOnly, false);
    let inputs = PageInputs {
        test_seconds: 100,
        section_seconds: 100,
        test_flag: TimerFlag::parse(""),
        section_flag: TimerFlag::parse("B"),
    };
    hide_disabled_containers(&page, &TimerConfig::default(), &inputs.test_flag, &inputs.section_flag);
    assert_eq!(*page.hidden.borrow(), vec!["testTimer".to_string()]);

    // the hidden display still receives updates
    run(&page, inputs.into_state(300), 1);
    assert_eq!(page.text("tTimer"), "0:01:39");
}

#[test]
fn startup_hides_boxes_then_counts_down_from_page_globals() {
    let mut page = MemoryPage::stock(SubmitPath::DirectOnly, false);
    page.flags = ("N".into(), "B".into());
    page.counters = Some((10, 302));
    let state = prepare_countdown(&page, &TimerConfig::default()).unwrap();
    assert_eq!(*page.hidden.borrow(), vec!["testTimer".to_string()]);

    let (state, sched, ticks) = run(&page, state, 500);
    assert_eq!(ticks, 302);
    assert!(!sched.is_active());
    assert_eq!(state.test.remaining, -292);
    assert_eq!(page.reason.borrow().as_deref(), Some("section"));
    assert_eq!(*page.alerts.borrow(), vec!["Five minutes remain in this section.".to_string()]);
}

#[test]
fn startup_without_counters_still_hides_boxes() {
    let mut page = MemoryPage::stock(SubmitPath::DirectOnly, false);
    page.flags = (String::new(), "N".into());
    let err = prepare_countdown(&page, &TimerConfig::default()).unwrap_err();
    assert!(matches!(err, TimerError::MissingGlobal(_)));
    assert_eq!(
        *page.hidden.borrow(),
        vec!["testTimer".to_string(), "sectionTimer".to_string()]
    );
    assert_eq!(*page.direct_submits.borrow(), 0);
}
