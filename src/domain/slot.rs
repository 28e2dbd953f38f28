use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const VISIT_DURATION_MINUTES: i64 = 60;

/// Per-date availability of an engineer as computed by the backend.
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct SlotGrid {
    pub date: NaiveDate,
    pub working_hours: WorkingHours,
    pub slots: Vec<Slot>,
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct WorkingHours {
    #[serde(with = "hh_mm")]
    pub start: NaiveTime,
    #[serde(with = "hh_mm")]
    pub end: NaiveTime,
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Slot {
    #[serde(with = "hh_mm")]
    pub start_time: NaiveTime,
    #[serde(with = "hh_mm")]
    pub end_time: NaiveTime,
    pub status: SlotStatus,
    #[serde(default)]
    pub blocked_by: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Available,
    Blocked,
}

/// A chosen slot turned into the proposed visit window.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct SlotSelection {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl SlotSelection {
    /// The proposed visit always lasts one hour. A start late in the evening
    /// ends on the following day.
    pub fn starting_at(date: NaiveDate, start: NaiveTime) -> Self {
        let start = date.and_time(start);
        SlotSelection {
            start,
            end: start + TimeDelta::minutes(VISIT_DURATION_MINUTES),
        }
    }
}

impl SlotGrid {
    pub fn available(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|slot| slot.status == SlotStatus::Available)
    }

    pub fn select(&self, start: NaiveTime) -> Result<SlotSelection, SlotError> {
        let slot = self
            .slots
            .iter()
            .find(|slot| slot.start_time == start)
            .ok_or(SlotError::NotFound { start })?;

        if slot.status == SlotStatus::Blocked {
            return Err(SlotError::Blocked {
                start,
                blocked_by: slot.blocked_by.clone(),
            });
        }

        Ok(SlotSelection::starting_at(self.date, start))
    }
}

#[derive(Error, PartialEq, Debug)]
pub enum SlotError {
    #[error("no slot starts at {}", start.format("%H:%M"))]
    NotFound { start: NaiveTime },
    #[error("the slot at {} is blocked{}", start.format("%H:%M"), blocked_by.as_ref().map(|by| format!(" by {}", by)).unwrap_or_default())]
    Blocked { start: NaiveTime, blocked_by: Option<String> },
}

/// Times are exchanged as `HH:MM`; seconds sent by the server are accepted
/// and dropped.
pub mod hh_mm {
    use chrono::NaiveTime;
    use serde::de::{Error, Unexpected};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(value: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(value, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
            .ok()
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        parse(&value).ok_or_else(|| Error::invalid_value(Unexpected::Str(&value), &"a time in HH:MM format"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn time(value: &str) -> NaiveTime {
        hh_mm::parse(value).unwrap()
    }

    fn grid() -> SlotGrid {
        serde_json::from_value(json!({
            "date": "2026-05-04",
            "working_hours": { "start": "09:00", "end": "18:00:00" },
            "slots": [
                { "start_time": "09:00", "end_time": "10:00", "status": "available" },
                { "start_time": "10:00", "end_time": "11:00", "status": "blocked", "blocked_by": "TKT-1002" },
                { "start_time": "23:30", "end_time": "00:30", "status": "available", "blocked_by": null }
            ]
        }))
        .unwrap()
    }

    #[rstest]
    #[case::on_the_hour("09:00", "2026-05-04T09:00:00", "2026-05-04T10:00:00")]
    #[case::half_hour("14:30", "2026-05-04T14:30:00", "2026-05-04T15:30:00")]
    #[case::crossing_midnight("23:30", "2026-05-04T23:30:00", "2026-05-05T00:30:00")]
    #[case::last_minute("23:59", "2026-05-04T23:59:00", "2026-05-05T00:59:00")]
    fn starting_at_ends_one_hour_later(#[case] start: &str, #[case] expected_start: &str, #[case] expected_end: &str) {
        let date = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();

        let selection = SlotSelection::starting_at(date, time(start));

        assert_eq!(selection.start.format("%Y-%m-%dT%H:%M:%S").to_string(), expected_start);
        assert_eq!(selection.end.format("%Y-%m-%dT%H:%M:%S").to_string(), expected_end);
        assert_eq!(selection.end - selection.start, TimeDelta::minutes(60));
    }

    #[test]
    fn select_returns_the_window_for_an_available_slot() {
        let selection = grid().select(time("23:30")).unwrap();

        assert_eq!(selection.end.date(), NaiveDate::from_ymd_opt(2026, 5, 5).unwrap());
        assert_eq!(selection.end.time(), time("00:30"));
    }

    #[test]
    fn select_rejects_blocked_slots() {
        let error = grid().select(time("10:00")).unwrap_err();

        assert_eq!(
            error,
            SlotError::Blocked {
                start: time("10:00"),
                blocked_by: Some("TKT-1002".to_string())
            }
        );
        assert_eq!(error.to_string(), "the slot at 10:00 is blocked by TKT-1002");
    }

    #[test]
    fn select_rejects_unknown_slots() {
        assert_eq!(
            grid().select(time("11:00")),
            Err(SlotError::NotFound { start: time("11:00") })
        );
    }

    #[test]
    fn available_skips_blocked_slots() {
        let grid = grid();

        let starts = grid.available().map(|slot| slot.start_time).collect::<Vec<_>>();

        assert_eq!(starts, vec![time("09:00"), time("23:30")]);
        assert_eq!(grid.working_hours.end, time("18:00"));
    }

    #[rstest]
    #[case("24:00")]
    #[case("9")]
    #[case("nine")]
    fn hh_mm_rejects_invalid_times(#[case] value: &str) {
        assert!(serde_json::from_value::<WorkingHours>(json!({ "start": value, "end": "10:00" })).is_err());
    }
}
