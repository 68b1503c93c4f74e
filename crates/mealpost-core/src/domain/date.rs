//! DateQuery - 対象日（UTC+9 のカレンダー日付）
//!
//! キャプション検索パターンの生成とキャッシュのキーの両方に使います。

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, ParseError, Utc};

/// Offset of the feed's local time zone (KST) from UTC, in seconds.
pub const LOCAL_OFFSET_SECS: i32 = 9 * 3600;

const LOCAL_OFFSET: FixedOffset = match FixedOffset::east_opt(LOCAL_OFFSET_SECS) {
    Some(offset) => offset,
    None => panic!("LOCAL_OFFSET_SECS is out of range"),
};

/// A calendar date in UTC+9, without a time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateQuery(NaiveDate);

impl DateQuery {
    /// Returns `None` for an impossible calendar date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The local (UTC+9) calendar date of an instant.
    pub fn local_date_of(instant: DateTime<Utc>) -> Self {
        Self(instant.with_timezone(&LOCAL_OFFSET).date_naive())
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Caption patterns for this date: spaced first, then unspaced.
    ///
    /// Month and day are plain decimals; `3월 5일` never becomes `03월 05일`.
    pub fn caption_patterns(&self) -> [String; 2] {
        let (month, day) = (self.month(), self.day());
        [format!("{month}월 {day}일"), format!("{month}월{day}일")]
    }

    /// Literal, case-sensitive substring match against either pattern.
    pub fn is_mentioned_in(&self, caption: &str) -> bool {
        self.caption_patterns()
            .iter()
            .any(|pattern| caption.contains(pattern.as_str()))
    }
}

impl fmt::Display for DateQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateQuery {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Self)
    }
}
