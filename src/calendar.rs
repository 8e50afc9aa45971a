//! Conversion of raw timetable records into zoned calendar events and
//! serialization of the result into an iCalendar file.

use crate::types::{ClockTime, RawEvent};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Europe::Riga;
use chrono_tz::Tz;
use ics::properties::{DtEnd, DtStart, Summary};
use ics::{Event as IcsEvent, ICalendar};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("Event timestamp {0} ms is out of range")]
    Timestamp(i64),
    #[error("Wall-clock time {hour:02}:{minute:02} does not exist on {date}")]
    LocalTime {
        date: NaiveDate,
        hour: u32,
        minute: u32,
    },
    #[error("Failed to write calendar file: {0}")]
    Io(#[from] std::io::Error),
}

/// A timetable entry resolved into the portal's local timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableEvent {
    pub summary: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

/// Combines a record's UTC epoch date with its wall-clock fields.
///
/// The epoch timestamp is converted into Riga time first and only its local
/// calendar date is kept; near midnight the UTC date and the local date
/// differ, and the wall-clock fields always refer to the local one.
pub fn resolve_event(raw: &RawEvent) -> Result<TimetableEvent, CalendarError> {
    let instant = Utc
        .timestamp_millis_opt(raw.event_date)
        .single()
        .ok_or(CalendarError::Timestamp(raw.event_date))?;

    let local_date = instant.with_timezone(&Riga).date_naive();

    let start = zoned(local_date, raw.custom_start)?;
    let end = zoned(local_date, raw.custom_end)?;

    Ok(TimetableEvent {
        summary: format!("{} ({})", raw.event_temp_name, raw.room_info_text),
        start,
        end,
    })
}

/// Attaches the Riga offset rules to a local date and time. An ambiguous
/// local time (the autumn DST rollback hour) resolves to the earlier offset.
fn zoned(date: NaiveDate, time: ClockTime) -> Result<DateTime<Tz>, CalendarError> {
    let error = CalendarError::LocalTime {
        date,
        hour: time.hour,
        minute: time.minute,
    };

    let naive = match date.and_hms_opt(time.hour, time.minute, 0) {
        Some(naive) => naive,
        None => return Err(error),
    };

    Riga.from_local_datetime(&naive).earliest().ok_or(error)
}

pub fn build_calendar(events: &[TimetableEvent]) -> ICalendar<'static> {
    let mut calendar = ICalendar::new("2.0", "-//rtucal//nodarbibas.rtu.lv timetable//EN");
    let stamp = instant_to_icalstr(&Utc::now());

    for (index, event) in events.iter().enumerate() {
        let uid = format!(
            "{}-{}@rtucal",
            event.start.with_timezone(&Utc).format("%Y%m%dT%H%M%SZ"),
            index
        );

        let mut ics_event = IcsEvent::new(uid, stamp.clone());
        ics_event.push(Summary::new(event.summary.clone()));
        ics_event.push(DtStart::new(instant_to_icalstr(
            &event.start.with_timezone(&Utc),
        )));
        ics_event.push(DtEnd::new(instant_to_icalstr(
            &event.end.with_timezone(&Utc),
        )));

        calendar.add_event(ics_event);
    }

    calendar
}

/// Writes the calendar file, overwriting any previous run's output. An empty
/// event list still produces a well-formed calendar.
pub fn write_calendar_file(path: &Path, events: &[TimetableEvent]) -> Result<(), CalendarError> {
    let calendar = build_calendar(events);
    calendar.save_file(path)?;
    Ok(())
}

fn instant_to_icalstr(instant: &DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn raw(event_date: i64, start: (u32, u32), end: (u32, u32)) -> RawEvent {
        RawEvent {
            event_temp_name: "Programmēšanas valodas (Lekcija)".to_string(),
            room_info_text: "Zunda krastmala 10-233".to_string(),
            event_date,
            custom_start: ClockTime {
                hour: start.0,
                minute: start.1,
            },
            custom_end: ClockTime {
                hour: end.0,
                minute: end.1,
            },
        }
    }

    #[test]
    fn test_resolve_event_summary_and_times() {
        // 2023-01-01T00:00:00Z, which is already 2023-01-01 in Riga (+02:00).
        let event = resolve_event(&raw(1672531200000, (10, 0), (11, 40))).unwrap();

        assert_eq!(
            event.summary,
            "Programmēšanas valodas (Lekcija) (Zunda krastmala 10-233)"
        );
        assert_eq!(event.start.date_naive(), NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(event.start.hour(), 10);
        assert_eq!(event.start.minute(), 0);
        assert_eq!(event.end.hour(), 11);
        assert_eq!(event.end.minute(), 40);
        // 10:00 +02:00 is 08:00 UTC.
        assert_eq!(event.start.with_timezone(&Utc).hour(), 8);
    }

    #[test]
    fn test_resolve_event_uses_local_date_near_midnight() {
        // 2022-12-31T23:00:00Z is 2023-01-01T01:00 in Riga; the event belongs
        // to January 1st even though the UTC date is still December 31st.
        let event = resolve_event(&raw(1672527600000, (10, 0), (11, 40))).unwrap();

        assert_eq!(event.start.date_naive(), NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(event.end.date_naive(), NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    }

    #[test]
    fn test_resolve_event_summer_offset() {
        // 2023-05-02T00:00:00Z; Riga is +03:00 in summer, so 10:00 local is
        // 07:00 UTC.
        let event = resolve_event(&raw(1682985600000, (10, 0), (11, 40))).unwrap();

        assert_eq!(event.start.date_naive(), NaiveDate::from_ymd_opt(2023, 5, 2).unwrap());
        assert_eq!(event.start.with_timezone(&Utc).hour(), 7);
    }

    #[test]
    fn test_resolve_event_dst_rollback_uses_earlier_offset() {
        // 2023-10-29T00:00:00Z is 03:00 EEST in Riga; clocks fall back to
        // 03:00 EET an hour later, so 03:30 local occurs twice. The earlier
        // offset (+03:00) wins, putting the start at 00:30 UTC.
        let event = resolve_event(&raw(1698537600000, (3, 30), (4, 0))).unwrap();

        assert_eq!(
            event.start.date_naive(),
            NaiveDate::from_ymd_opt(2023, 10, 29).unwrap()
        );
        let start_utc = event.start.with_timezone(&Utc);
        assert_eq!(start_utc.hour(), 0);
        assert_eq!(start_utc.minute(), 30);
        // 04:00 local is past the rollback and unambiguous at +02:00.
        assert_eq!(event.end.with_timezone(&Utc).hour(), 2);
    }

    #[test]
    fn test_resolve_event_dst_gap_is_error() {
        // 2023-03-26T00:00:00Z is 02:00 EET in Riga; clocks jump from 03:00
        // straight to 04:00, so 03:30 local never exists on that day.
        let result = resolve_event(&raw(1679788800000, (3, 30), (4, 0)));

        assert!(matches!(
            result,
            Err(CalendarError::LocalTime {
                hour: 3,
                minute: 30,
                ..
            })
        ));
    }

    #[test]
    fn test_resolve_event_rejects_bad_wall_clock() {
        let result = resolve_event(&raw(1672531200000, (24, 0), (25, 0)));
        assert!(matches!(result, Err(CalendarError::LocalTime { .. })));
    }

    #[test]
    fn test_build_calendar_one_vevent_per_record() {
        let events: Vec<TimetableEvent> = [
            raw(1672531200000, (10, 0), (11, 40)),
            raw(1672617600000, (12, 30), (14, 5)),
            raw(1672704000000, (8, 15), (9, 50)),
        ]
        .iter()
        .map(|r| resolve_event(r).unwrap())
        .collect();

        let output = build_calendar(&events).to_string();

        assert_eq!(output.matches("BEGIN:VEVENT").count(), 3);
        assert_eq!(output.matches("END:VEVENT").count(), 3);
        assert!(output.contains("SUMMARY:"));
        assert!(output.contains("DTSTART:20230101T080000Z"));
    }

    #[test]
    fn test_build_calendar_empty_is_still_valid() {
        let output = build_calendar(&[]).to_string();

        assert!(output.starts_with("BEGIN:VCALENDAR"));
        assert!(output.contains("VERSION:2.0"));
        assert_eq!(output.matches("BEGIN:VEVENT").count(), 0);
    }
}
