//! Time-of-day auto schedule.

use crate::error::OverlayError;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

/// Seconds a gradual transition takes to reach full strength.
pub const GRADUAL_RAMP_SECS: i64 = 30 * 60;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// How the filter comes on when the schedule window opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transition {
    /// Fade in over [`GRADUAL_RAMP_SECS`].
    #[default]
    Gradual,
    /// Switch on at full strength.
    Instant,
}

/// Where the schedule stands at a given moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchedulePhase {
    /// Outside the window, or the schedule is off.
    Inactive,
    /// Fading in; the value is progress in `[0, 1)`.
    Ramping(f32),
    /// Inside the window at full strength.
    Active,
}

/// When the filter should switch itself on and off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Whether the schedule drives the filter at all.
    pub enabled: bool,
    /// Start of the window.
    pub enable_time: NaiveTime,
    /// End of the window; at or before `enable_time` means the next day.
    pub disable_time: NaiveTime,
    /// Fade-in style.
    pub transition: Transition,
    active_days: [bool; 7],
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            enable_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap_or_default(),
            disable_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap_or_default(),
            transition: Transition::Gradual,
            active_days: [true, true, true, true, true, false, false],
        }
    }
}

impl ScheduleConfig {
    /// Whether windows starting on `day` count.
    pub fn is_day_active(&self, day: Weekday) -> bool {
        self.active_days[day.num_days_from_monday() as usize]
    }

    /// Include or exclude `day`.
    pub fn set_day(&mut self, day: Weekday, active: bool) {
        self.active_days[day.num_days_from_monday() as usize] = active;
    }

    /// Flip `day`.
    pub fn toggle_day(&mut self, day: Weekday) {
        let active = self.is_day_active(day);
        self.set_day(day, !active);
    }

    /// Active days, Monday first.
    pub fn active_days(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEK.into_iter().filter(|day| self.is_day_active(*day))
    }

    /// Set both ends of the window from `HH:MM` text.
    ///
    /// Nothing changes unless both parse.
    pub fn set_window(&mut self, enable: &str, disable: &str) -> Result<(), OverlayError> {
        let enable_time = parse_time(enable)?;
        let disable_time = parse_time(disable)?;
        self.enable_time = enable_time;
        self.disable_time = disable_time;
        Ok(())
    }

    /// Phase of the schedule at local time `now`.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use eyecare_core::{SchedulePhase, ScheduleConfig};
    ///
    /// let mut schedule = ScheduleConfig::default();
    /// schedule.enabled = true;
    /// // Monday 23:00, inside the default 20:00-06:00 window.
    /// let now = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(23, 0, 0).unwrap();
    /// assert_eq!(schedule.phase_at(now), SchedulePhase::Active);
    /// ```
    pub fn phase_at(&self, now: NaiveDateTime) -> SchedulePhase {
        if !self.enabled {
            return SchedulePhase::Inactive;
        }
        let Some(start_date) = self.window_start(now) else {
            return SchedulePhase::Inactive;
        };
        if !self.is_day_active(start_date.weekday()) {
            return SchedulePhase::Inactive;
        }

        match self.transition {
            Transition::Instant => SchedulePhase::Active,
            Transition::Gradual => {
                let elapsed = (now - start_date.and_time(self.enable_time)).num_seconds();
                if elapsed < GRADUAL_RAMP_SECS {
                    SchedulePhase::Ramping(elapsed as f32 / GRADUAL_RAMP_SECS as f32)
                } else {
                    SchedulePhase::Active
                }
            }
        }
    }

    /// Status line for the schedule page.
    pub fn summary(&self) -> String {
        if !self.enabled {
            return "Auto schedule is disabled".to_string();
        }
        let days: Vec<&str> = self.active_days().map(weekday_label).collect();
        format!(
            "Filter will enable at {} and disable at {} on {}",
            self.enable_time.format("%H:%M"),
            self.disable_time.format("%H:%M"),
            days.join(", ")
        )
    }

    /// Date on which the window containing `now` opened.
    fn window_start(&self, now: NaiveDateTime) -> Option<NaiveDate> {
        let time = now.time();
        let today = now.date();

        if self.enable_time < self.disable_time {
            (time >= self.enable_time && time < self.disable_time).then_some(today)
        } else if time >= self.enable_time {
            Some(today)
        } else if time < self.disable_time {
            today.pred_opt()
        } else {
            None
        }
    }
}

/// Parse an `HH:MM` time of day.
pub fn parse_time(text: &str) -> Result<NaiveTime, OverlayError> {
    NaiveTime::parse_from_str(text.trim(), "%H:%M")
        .map_err(|_| OverlayError::InvalidTime(text.to_string()))
}

/// Three-letter weekday label.
pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// All weekdays, Monday first.
pub fn week() -> [Weekday; 7] {
    WEEK
}
