//! Shift windows
//!
//! A shift is always twelve hours long. The day shift covers [06:00, 18:00);
//! the night shift covers [18:00, 06:00) and crosses midnight.

use serde::{Deserialize, Serialize};

use crate::constants::{DAY_SHIFT_START_HOUR, NIGHT_SHIFT_START_HOUR, SHIFT_LENGTH_HOURS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShiftType {
    Day,
    Night,
}

impl ShiftType {
    /// The shift an hour of the day belongs to.
    pub fn for_hour(hour: u32) -> Self {
        if (DAY_SHIFT_START_HOUR..NIGHT_SHIFT_START_HOUR).contains(&(hour % 24)) {
            Self::Day
        } else {
            Self::Night
        }
    }

    pub fn window(self) -> ShiftWindow {
        ShiftWindow::for_type(self)
    }
}

crate::impl_domain_enum_conversions!(ShiftType {
    Day => "day",
    Night => "night",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftWindow {
    #[serde(rename = "type")]
    pub shift_type: ShiftType,
    pub start_hour: u32,
    pub end_hour: u32,
}

impl ShiftWindow {
    pub fn for_type(shift_type: ShiftType) -> Self {
        let start_hour = match shift_type {
            ShiftType::Day => DAY_SHIFT_START_HOUR,
            ShiftType::Night => NIGHT_SHIFT_START_HOUR,
        };
        Self { shift_type, start_hour, end_hour: (start_hour + SHIFT_LENGTH_HOURS) % 24 }
    }

    /// Window length in hours; identical for both shift types.
    pub fn duration_hours(&self) -> u32 {
        SHIFT_LENGTH_HOURS
    }

    /// Whether `hour` (0..24) falls inside the window, honouring wrap-around.
    pub fn contains_hour(&self, hour: u32) -> bool {
        let hour = hour % 24;
        if self.start_hour < self.end_hour {
            (self.start_hour..self.end_hour).contains(&hour)
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}
