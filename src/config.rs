//! Page-level timer configuration.
//!
//! Everything has a default matching the stock test page, so a page only needs
//! to ship a `countdown-config` JSON block when it deviates from it.

use serde::{Deserialize, Serialize};

use crate::error::TimerError;
use crate::model::TimerKind;

/// Id of the optional `<script type="application/json">` block holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "countdown-config";

/// Element ids for one timer. Overrides must name all three.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementIds {
    /// Element whose text shows the formatted remaining time.
    pub display: String,
    /// Wrapper hidden when the timer is switched off.
    pub container: String,
    /// Pre-populated five-minute warning message.
    pub warning: String,
}

impl ElementIds {
    fn new(display: &str, container: &str, warning: &str) -> Self {
        Self {
            display: display.to_string(),
            container: container.to_string(),
            warning: warning.to_string(),
        }
    }

    pub fn test_defaults() -> Self {
        Self::new("tTimer", "testTimer", "testTimerWarning")
    }

    pub fn section_defaults() -> Self {
        Self::new("sTimer", "sectionTimer", "sectionTimerWarning")
    }
}

/// Names of the page globals the server-rendered script sets before load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalNames {
    pub test_seconds: String,
    pub section_seconds: String,
    pub test_flag: String,
    pub section_flag: String,
}

impl Default for GlobalNames {
    fn default() -> Self {
        Self {
            test_seconds: "seconds_remaining".to_string(),
            section_seconds: "section_seconds_remaining".to_string(),
            test_flag: "show_timer".to_string(),
            section_flag: "show_section_timer".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Tick period in milliseconds.
    pub period_ms: i32,
    /// Remaining seconds at which a "B" timer raises its warning (exact match).
    pub warning_at_secs: i64,
    /// Button id handed to the audio-preserving submit path.
    pub submit_button: String,
    pub form_name: String,
    /// Hidden form field that receives "test" or "section".
    pub reason_field: String,
    pub log_level: String,
    pub test_ids: ElementIds,
    pub section_ids: ElementIds,
    pub globals: GlobalNames,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            period_ms: 1000,
            warning_at_secs: 300,
            submit_button: "cmdEndTestTop".to_string(),
            form_name: "form1".to_string(),
            reason_field: "TimerAutoSubmit".to_string(),
            log_level: "info".to_string(),
            test_ids: ElementIds::test_defaults(),
            section_ids: ElementIds::section_defaults(),
            globals: GlobalNames::default(),
        }
    }
}

impl TimerConfig {
    pub fn from_json(raw: &str) -> Result<Self, TimerError> {
        let cfg: TimerConfig = serde_json::from_str(raw)?;
        Ok(cfg)
    }

    pub fn ids(&self, kind: TimerKind) -> &ElementIds {
        match kind {
            TimerKind::Test => &self.test_ids,
            TimerKind::Section => &self.section_ids,
        }
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level
            .parse()
            .unwrap_or(log::LevelFilter::Info)
    }
}
