//! Weekly class schedule model

use serde::{Deserialize, Serialize};

/// Short weekday labels indexed by `ClassSchedule::weekday` (0 = Sunday)
pub const WEEKDAY_LABELS: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

/// A recurring weekly class slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSchedule {
    /// Unique identifier
    pub id: String,
    /// Discipline taught in this slot
    pub discipline_id: String,
    /// Day of week, 0 = Sunday .. 6 = Saturday
    pub weekday: u8,
    /// Start time, "HH:MM"
    pub start: String,
    /// End time, "HH:MM"
    pub end: String,
    /// Room or building
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ClassSchedule {
    /// Weekday label ("Seg", "Ter", ...), or "?" for out-of-range values
    #[must_use]
    pub fn weekday_label(&self) -> &'static str {
        WEEKDAY_LABELS
            .get(usize::from(self.weekday))
            .copied()
            .unwrap_or("?")
    }

    /// Start time in minutes after midnight
    #[must_use]
    pub fn start_minutes(&self) -> Option<u32> {
        parse_hhmm(&self.start)
    }

    /// End time in minutes after midnight
    #[must_use]
    pub fn end_minutes(&self) -> Option<u32> {
        parse_hhmm(&self.end)
    }
}

/// Parse an "HH:MM" clock time into minutes after midnight
#[must_use]
pub fn parse_hhmm(value: &str) -> Option<u32> {
    let (h, m) = value.trim().split_once(':')?;
    let hours: u32 = h.parse().ok()?;
    let minutes: u32 = m.parse().ok()?;
    (hours < 24 && minutes < 60 && m.len() == 2).then_some(hours * 60 + minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hhmm() {
        assert_eq!(parse_hhmm("08:00"), Some(480));
        assert_eq!(parse_hhmm("9:40"), Some(580));
        assert_eq!(parse_hhmm("23:59"), Some(1439));
        assert_eq!(parse_hhmm("24:00"), None);
        assert_eq!(parse_hhmm("08:7"), None);
        assert_eq!(parse_hhmm("noon"), None);
    }

    #[test]
    fn test_weekday_label() {
        let slot = ClassSchedule {
            id: "s1".to_string(),
            discipline_id: "d1".to_string(),
            weekday: 1,
            start: "08:00".to_string(),
            end: "09:40".to_string(),
            location: None,
        };
        assert_eq!(slot.weekday_label(), "Seg");
        assert_eq!(slot.start_minutes(), Some(480));
        assert_eq!(slot.end_minutes(), Some(580));
    }
}
