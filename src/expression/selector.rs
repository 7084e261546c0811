// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Selector payloads of the expression language.

use super::ExpressionError;
use chrono::{Days, Months, NaiveDate};

/// A parsed `{field:payload}` selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Match tracks by artist wildcard pattern.
    Artist(String),
    /// Match tracks by comment wildcard pattern.
    Comment(String),
    /// Match tracks by key wildcard pattern.
    Key(String),
    /// Match tracks by label wildcard pattern.
    Label(String),
    /// Match the tracks of a previously materialized playlist.
    Playlist(String),
    /// Match tracks by the date they were added.
    Date(DateSelector),
}

impl Selector {
    /// Parse the inner text of a `{…}` token.
    ///
    /// `offset` is the byte offset of the token in the expression source and is used for error
    /// reporting.
    ///
    /// # Errors
    ///
    /// Returns an [`ExpressionError`] for a missing `:`, an unknown field name, an empty
    /// payload, or a comparator prefix on a field other than `date`.
    pub(super) fn parse(content: &str, offset: usize) -> Result<Self, ExpressionError> {
        let Some((field, payload)) = content.split_once(':') else {
            return Err(ExpressionError::new(
                offset,
                "selector must have the form {field:payload}",
            ));
        };
        let field = field.trim();
        let payload = payload.trim();
        if payload.is_empty() {
            return Err(ExpressionError::new(offset, "empty selector payload"));
        }
        if field != "date" && (payload.starts_with('<') || payload.starts_with('>')) {
            return Err(ExpressionError::new(
                offset,
                "comparators are only valid in date selectors",
            ));
        }
        match field {
            "artist" => Ok(Selector::Artist(payload.to_string())),
            "comment" => Ok(Selector::Comment(payload.to_string())),
            "key" => Ok(Selector::Key(payload.to_string())),
            "label" => Ok(Selector::Label(payload.to_string())),
            "playlist" => Ok(Selector::Playlist(payload.to_string())),
            "date" => DateSelector::parse(payload, offset).map(Selector::Date),
            _ => Err(ExpressionError::new(
                offset,
                format!("unknown selector field {field:?}"),
            )),
        }
    }
}

/// A single inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericRange {
    /// Lower endpoint.
    pub lo: i64,
    /// Upper endpoint.
    pub hi: i64,
}

/// How a numeric range is interpreted against track attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum NumericKind {
    /// Both endpoints are at most 5: a rating range.
    Rating,
    /// Both endpoints are at least 1900: a year range.
    Year,
    /// Everything else: a BPM range.
    Bpm,
}

impl NumericRange {
    /// Decide how this range is interpreted.
    ///
    /// Values up to 5 denote ratings and values from 1900 denote years; BPMs sit in between.
    pub(super) fn kind(self) -> NumericKind {
        if self.hi <= 5 {
            NumericKind::Rating
        } else if self.lo >= 1900 {
            NumericKind::Year
        } else {
            NumericKind::Bpm
        }
    }
}

/// A parsed `[…]` selector: one or more numeric ranges whose results are unioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericSelector {
    /// The ranges, in source order.
    ranges: Vec<NumericRange>,
}

impl NumericSelector {
    /// Parse the inner text of a `[…]` token.
    ///
    /// # Errors
    ///
    /// Returns an [`ExpressionError`] if the selector is empty, an endpoint is not an integer,
    /// or a range has its upper endpoint below its lower one.
    pub(super) fn parse(content: &str, offset: usize) -> Result<Self, ExpressionError> {
        if content.trim().is_empty() {
            return Err(ExpressionError::new(offset, "empty numeric selector"));
        }
        let mut ranges = Vec::new();
        for item in content.split(',') {
            let item = item.trim();
            let (lo, hi) = match item.split_once('-') {
                Some((lo, hi)) => (lo.trim(), hi.trim()),
                None => (item, item),
            };
            let (Ok(lo), Ok(hi)) = (lo.parse::<i64>(), hi.parse::<i64>()) else {
                return Err(ExpressionError::new(
                    offset,
                    format!("malformed numeric range {item:?}"),
                ));
            };
            if hi < lo {
                return Err(ExpressionError::new(
                    offset,
                    format!("malformed numeric range {item:?} (upper endpoint below lower)"),
                ));
            }
            ranges.push(NumericRange { lo, hi });
        }
        Ok(Self { ranges })
    }

    /// The ranges of this selector.
    #[must_use]
    pub fn ranges(&self) -> &[NumericRange] {
        &self.ranges
    }
}

/// Comparator prefix of a date selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateComparator {
    /// No prefix: the date must lie within the denoted interval.
    Within,
    /// `<`: strictly before the reference date.
    Before,
    /// `<=`: not after the reference date.
    NotAfter,
    /// `>`: strictly after the reference date.
    After,
    /// `>=`: not before the reference date.
    NotBefore,
}

/// The date or interval a date selector compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DatePayload {
    /// An ISO calendar unit (`YYYY`, `YYYY-MM` or `YYYY-MM-DD`) as a closed interval.
    Interval {
        /// First day of the unit.
        start: NaiveDate,
        /// Last day of the unit.
        end: NaiveDate,
    },
    /// A duration (`NyNmNwNd`) anchored at the evaluation date.
    Relative {
        /// Whole years.
        years: u32,
        /// Whole months.
        months: u32,
        /// Whole weeks.
        weeks: u32,
        /// Whole days.
        days: u32,
    },
}

/// A parsed `{date:…}` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSelector {
    /// The comparator prefix, if any.
    comparator: DateComparator,
    /// The date or interval compared against.
    payload: DatePayload,
}

impl DateSelector {
    /// Parse a date selector payload.
    ///
    /// # Errors
    ///
    /// Returns an [`ExpressionError`] if the payload is neither an ISO calendar unit nor a
    /// relative duration.
    pub(super) fn parse(payload: &str, offset: usize) -> Result<Self, ExpressionError> {
        let (comparator, rest) = if let Some(rest) = payload.strip_prefix("<=") {
            (DateComparator::NotAfter, rest)
        } else if let Some(rest) = payload.strip_prefix(">=") {
            (DateComparator::NotBefore, rest)
        } else if let Some(rest) = payload.strip_prefix('<') {
            (DateComparator::Before, rest)
        } else if let Some(rest) = payload.strip_prefix('>') {
            (DateComparator::After, rest)
        } else {
            (DateComparator::Within, payload)
        };
        let rest = rest.trim();
        let payload = parse_relative(rest)
            .or_else(|| parse_iso(rest))
            .ok_or_else(|| {
                ExpressionError::new(offset, format!("malformed date selector payload {rest:?}"))
            })?;
        Ok(Self {
            comparator,
            payload,
        })
    }

    /// Returns `true` if the given added date satisfies the selector when evaluated at `as_of`.
    #[must_use]
    pub fn matches(&self, date: NaiveDate, as_of: NaiveDate) -> bool {
        match self.payload {
            DatePayload::Interval { start, end } => match self.comparator {
                DateComparator::Within => start <= date && date <= end,
                DateComparator::Before => date < start,
                DateComparator::NotAfter => date <= end,
                DateComparator::After => date > end,
                DateComparator::NotBefore => date >= start,
            },
            DatePayload::Relative {
                years,
                months,
                weeks,
                days,
            } => {
                let reference = as_of
                    .checked_sub_months(Months::new(years * 12 + months))
                    .and_then(|shifted| {
                        shifted.checked_sub_days(Days::new(u64::from(weeks * 7 + days)))
                    });
                let Some(reference) = reference else {
                    return false;
                };
                match self.comparator {
                    DateComparator::Within => reference <= date && date <= as_of,
                    DateComparator::Before => date < reference,
                    DateComparator::NotAfter => date <= reference,
                    DateComparator::After => date > reference,
                    DateComparator::NotBefore => date >= reference,
                }
            }
        }
    }
}

/// Parse a relative duration of the form `NyNmNwNd` (each component optional, at least one).
fn parse_relative(text: &str) -> Option<DatePayload> {
    let mut years = 0u32;
    let mut months = 0u32;
    let mut weeks = 0u32;
    let mut days = 0u32;
    let mut number = String::new();
    let mut components = 0usize;
    for c in text.chars() {
        if c.is_ascii_digit() {
            number.push(c);
        } else {
            let value: u32 = number.parse().ok()?;
            number.clear();
            match c {
                'y' => years += value,
                'm' => months += value,
                'w' => weeks += value,
                'd' => days += value,
                _ => return None,
            }
            components += 1;
        }
    }
    (number.is_empty() && components > 0).then_some(DatePayload::Relative {
        years,
        months,
        weeks,
        days,
    })
}

/// Parse an ISO calendar-unit prefix (`YYYY`, `YYYY-MM` or `YYYY-MM-DD`) as a closed interval.
fn parse_iso(text: &str) -> Option<DatePayload> {
    /// Parse a component that must consist of exactly `width` ASCII digits.
    fn fixed_digits<T: std::str::FromStr>(part: &str, width: usize) -> Option<T> {
        (part.len() == width && part.bytes().all(|byte| byte.is_ascii_digit()))
            .then(|| part.parse().ok())?
    }

    let parts: Vec<&str> = text.split('-').collect();
    let (start, end) = match parts.as_slice() {
        [year] => {
            let year: i32 = fixed_digits(year, 4)?;
            (
                NaiveDate::from_ymd_opt(year, 1, 1)?,
                NaiveDate::from_ymd_opt(year, 12, 31)?,
            )
        }
        [year, month] => {
            let year: i32 = fixed_digits(year, 4)?;
            let month: u32 = fixed_digits(month, 2)?;
            let start = NaiveDate::from_ymd_opt(year, month, 1)?;
            let end = start
                .checked_add_months(Months::new(1))?
                .pred_opt()?;
            (start, end)
        }
        [year, month, day] => {
            let year: i32 = fixed_digits(year, 4)?;
            let month: u32 = fixed_digits(month, 2)?;
            let day: u32 = fixed_digits(day, 2)?;
            let date = NaiveDate::from_ymd_opt(year, month, day)?;
            (date, date)
        }
        _ => return None,
    };
    Some(DatePayload::Interval { start, end })
}
