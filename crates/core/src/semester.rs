//! Academic semester calendar.
//!
//! Pure date→semester mapping with fixed windows:
//! - Term 1: March 1 – June 20
//! - Term 2: September 1 – December 20
//! - Everything else is vacation (no current term).
//!
//! `next`/`prev` always step one term with year rollover, so callers can
//! resolve phrases like "next semester" without touching a clock twice.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One academic term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    pub year: i32,
    /// 1 or 2
    pub term: u8,
}

impl Semester {
    pub fn new(year: i32, term: u8) -> Self {
        Self { year, term }
    }

    /// The "YYYY-T" token used by enrollment records.
    pub fn token(&self) -> String {
        format!("{}-{}", self.year, self.term)
    }
}

impl std::fmt::Display for Semester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}년 {}학기", self.year, self.term)
    }
}

/// The calendar position of a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterSnapshot {
    pub today: NaiveDate,
    /// `None` during vacation periods.
    pub current: Option<Semester>,
    pub next: Semester,
    pub prev: Semester,
}

impl SemesterSnapshot {
    /// Human-readable header for answers that reference the calendar.
    pub fn context_line(&self) -> String {
        let mut line = format!("오늘 날짜: {}", self.today.format("%Y-%m-%d"));
        match self.current {
            Some(cur) => line.push_str(&format!(" / 현재 학기: {cur}")),
            None => line.push_str(" / 현재는 방학 기간입니다"),
        }
        line.push_str(&format!(" / 다음 학기: {} / 지난 학기: {}", self.next, self.prev));
        line
    }
}

/// Pure calendar→semester mapping. Total: every date maps to a snapshot.
pub struct SemesterCalendar;

impl SemesterCalendar {
    /// Snapshot for today (UTC date).
    pub fn today() -> SemesterSnapshot {
        Self::info(Utc::now().date_naive())
    }

    /// Snapshot for an arbitrary date.
    pub fn info(date: NaiveDate) -> SemesterSnapshot {
        let year = date.year();
        let month = date.month();
        let day = date.day();

        let (current, next, prev) = if (3..=5).contains(&month) || (month == 6 && day <= 20) {
            // Term 1: March 1 – June 20
            (
                Some(Semester::new(year, 1)),
                Semester::new(year, 2),
                Semester::new(year - 1, 2),
            )
        } else if (9..=11).contains(&month) || (month == 12 && day <= 20) {
            // Term 2: September 1 – December 20
            (
                Some(Semester::new(year, 2)),
                Semester::new(year + 1, 1),
                Semester::new(year, 1),
            )
        } else if month <= 2 {
            // Winter vacation (January–February)
            (
                None,
                Semester::new(year, 1),
                Semester::new(year - 1, 2),
            )
        } else if month <= 8 {
            // Summer vacation (June 21 – August 31)
            (
                None,
                Semester::new(year, 2),
                Semester::new(year, 1),
            )
        } else {
            // Late December (after the 20th): next term crosses the year boundary
            (
                None,
                Semester::new(year + 1, 1),
                Semester::new(year, 2),
            )
        };

        SemesterSnapshot {
            today: date,
            current,
            next,
            prev,
        }
    }
}
