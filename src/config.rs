use crate::model::{time_id_of, Weekday};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_START_HOUR: u32 = 6;
pub const MAX_START_HOUR: u32 = 20;
pub const MIN_END_HOUR: u32 = 7;
pub const MAX_END_HOUR: u32 = 21;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("shift start hour {0} must be between 6 and 20")]
    StartHourOutOfRange(u32),
    #[error("shift end hour {0} must be between 7 and 21")]
    EndHourOutOfRange(u32),
    #[error("start time must be before end time ({start} >= {end})")]
    EmptyShiftWindow { start: u32, end: u32 },
    #[error("maximum hours must be a positive multiple of 0.5 (got {0})")]
    InvalidMaxHours(f64),
    #[error("number of people per shift must be at least 1")]
    InvalidPeoplePerShift,
    #[error("invalid HHMM time: {0}")]
    InvalidTime(String),
    #[error("meeting start time must be before meeting end time")]
    EmptyMeetingWindow,
    #[error("meeting times must be within the overall shift times")]
    MeetingOutsideShift,
}

/// Réunion hebdomadaire obligatoire (bloque les créneaux pour tout le monde)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingWindow {
    pub day: Weekday,
    /// `HHMM`, inclus
    pub start: String,
    /// `HHMM`, exclu
    pub end: String,
}

impl MeetingWindow {
    pub fn new<S: Into<String>, E: Into<String>>(day: Weekday, start: S, end: E) -> Self {
        Self {
            day,
            start: start.into(),
            end: end.into(),
        }
    }

    /// Bornes en minutes depuis minuit.
    pub fn bounds_minutes(&self) -> Result<(u32, u32), ConfigError> {
        Ok((
            minutes_since_midnight(parse_hhmm(&self.start)?),
            minutes_since_midnight(parse_hhmm(&self.end)?),
        ))
    }
}

/// Paramètres du planning. Validés une fois, puis en lecture seule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub shift_start_hour: u32,
    pub shift_end_hour: u32,
    pub max_hours_limit: f64,
    #[serde(default = "default_people_per_shift")]
    pub people_per_shift: usize,
    #[serde(default)]
    pub include_devotional: bool,
    #[serde(default)]
    pub meeting: Option<MeetingWindow>,
    /// N'a d'effet que si `people_per_shift == 1`
    #[serde(default)]
    pub require_overlap: bool,
}

fn default_people_per_shift() -> usize {
    1
}

impl ScheduleConfig {
    pub fn new(shift_start_hour: u32, shift_end_hour: u32, max_hours_limit: f64) -> Self {
        Self {
            shift_start_hour,
            shift_end_hour,
            max_hours_limit,
            people_per_shift: 1,
            include_devotional: false,
            meeting: None,
            require_overlap: false,
        }
    }

    pub fn with_people_per_shift(mut self, n: usize) -> Self {
        self.people_per_shift = n;
        self
    }

    pub fn with_devotional(mut self, on: bool) -> Self {
        self.include_devotional = on;
        self
    }

    pub fn with_meeting(mut self, meeting: MeetingWindow) -> Self {
        self.meeting = Some(meeting);
        self
    }

    pub fn with_overlap(mut self, on: bool) -> Self {
        self.require_overlap = on;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_START_HOUR..=MAX_START_HOUR).contains(&self.shift_start_hour) {
            return Err(ConfigError::StartHourOutOfRange(self.shift_start_hour));
        }
        if !(MIN_END_HOUR..=MAX_END_HOUR).contains(&self.shift_end_hour) {
            return Err(ConfigError::EndHourOutOfRange(self.shift_end_hour));
        }
        if self.shift_start_hour >= self.shift_end_hour {
            return Err(ConfigError::EmptyShiftWindow {
                start: self.shift_start_hour,
                end: self.shift_end_hour,
            });
        }
        let doubled = self.max_hours_limit * 2.0;
        if !self.max_hours_limit.is_finite() || self.max_hours_limit <= 0.0 || doubled.fract() != 0.0
        {
            return Err(ConfigError::InvalidMaxHours(self.max_hours_limit));
        }
        if self.people_per_shift < 1 {
            return Err(ConfigError::InvalidPeoplePerShift);
        }
        if let Some(meeting) = &self.meeting {
            let (start, end) = meeting.bounds_minutes()?;
            if start >= end {
                return Err(ConfigError::EmptyMeetingWindow);
            }
            if start < self.shift_start_hour * 60 || end > self.shift_end_hour * 60 {
                return Err(ConfigError::MeetingOutsideShift);
            }
        }
        Ok(())
    }

    /// Plafond exprimé en demi-heures.
    pub fn max_half_slots(&self) -> usize {
        (self.max_hours_limit * 2.0).floor() as usize
    }

    /// La contrainte de chevauchement ne s'applique qu'aux créneaux à une personne.
    pub fn overlap_active(&self) -> bool {
        self.require_overlap && self.people_per_shift == 1
    }
}

/// Parse un `HHMM` aligné sur une demi-heure.
pub fn parse_hhmm(raw: &str) -> Result<NaiveTime, ConfigError> {
    let raw = raw.trim();
    if raw.len() != 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigError::InvalidTime(raw.to_string()));
    }
    let time = NaiveTime::parse_from_str(raw, "%H%M")
        .map_err(|_| ConfigError::InvalidTime(raw.to_string()))?;
    if time.minute() % 30 != 0 {
        return Err(ConfigError::InvalidTime(raw.to_string()));
    }
    Ok(time)
}

pub(crate) fn minutes_since_midnight(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

pub(crate) fn hhmm_from_minutes(minutes: u32) -> Option<String> {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).map(time_id_of)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_shift_window() {
        let cfg = ScheduleConfig::new(12, 9, 4.0);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::EmptyShiftWindow { start: 12, end: 9 })
        );
    }

    #[test]
    fn rejects_non_half_hour_cap() {
        assert!(ScheduleConfig::new(9, 17, 0.0).validate().is_err());
        assert!(ScheduleConfig::new(9, 17, 1.2).validate().is_err());
        assert!(ScheduleConfig::new(9, 17, 1.5).validate().is_ok());
    }

    #[test]
    fn meeting_must_fit_shift() {
        let cfg = ScheduleConfig::new(9, 12, 4.0)
            .with_meeting(MeetingWindow::new(Weekday::Wed, "1130", "1230"));
        assert_eq!(cfg.validate(), Err(ConfigError::MeetingOutsideShift));

        let cfg = ScheduleConfig::new(9, 12, 4.0)
            .with_meeting(MeetingWindow::new(Weekday::Wed, "1100", "1200"));
        assert!(cfg.validate().is_ok());

        let cfg = ScheduleConfig::new(9, 12, 4.0)
            .with_meeting(MeetingWindow::new(Weekday::Wed, "1000", "1000"));
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyMeetingWindow));
    }

    #[test]
    fn hhmm_parsing() {
        assert!(parse_hhmm("0930").is_ok());
        assert!(parse_hhmm("930").is_err());
        assert!(parse_hhmm("0945").is_err());
        assert!(parse_hhmm("2500").is_err());
        assert_eq!(hhmm_from_minutes(13 * 60 + 30).as_deref(), Some("1330"));
    }
}
