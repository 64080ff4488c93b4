// Values the server-rendered page hands to the timer before load
use serde::{Deserialize, Serialize};

use crate::model::{CountdownState, TimerCounter, TimerFlag};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInputs {
    pub test_seconds: i64,
    pub section_seconds: i64,
    pub test_flag: TimerFlag,
    pub section_flag: TimerFlag,
}

impl PageInputs {
    pub fn into_state(self, warning_at: i64) -> CountdownState {
        CountdownState::new(
            TimerCounter::new(self.test_seconds, self.test_flag),
            TimerCounter::new(self.section_seconds, self.section_flag),
            warning_at,
        )
    }
}
