//! Occurrence calculation for recurrence rules.
//!
//! `RecurrenceCalculator` is built once per rule, validating everything
//! upfront (anchor and end dates, interval, custom pattern), and then
//! exposes pure date calculations: next/previous/first occurrence, windowed
//! enumeration, and previews. All calculations are date-only and
//! referentially transparent; concurrent callers need no coordination.

use chrono::{Datelike, NaiveDate};

use crate::calendar::{
    add_days, add_months, add_years, current_quarter_end, next_quarter_end, parse_iso_date,
    resolve_month_day, start_of_quarter,
};
use crate::error::CoreError;
use crate::models::{Frequency, OccurrenceOptions, OccurrenceSequence, RecurrenceRule};

/// Default day-of-month for monthly rules with neither anchor nor explicit
/// day.
const DEFAULT_DAY_OF_MONTH: u32 = 15;

/// Resolved form of a `custom_pattern`.
///
/// Only the weekly by-weekday subset is supported; anything else degrades to
/// a monthly-equivalent step. The fallback is deliberate (user-authored
/// templates must not fail generation outright) but observable: it is logged
/// at construction and queryable via [`RecurrenceCalculator::custom_fallback`].
#[derive(Debug, Clone, PartialEq, Eq)]
enum CustomPattern {
    /// `FREQ=WEEKLY;BYDAY=...`: sorted weekday numbers, 0 = Sunday.
    WeeklyByDay(Vec<u32>),
    /// `FREQ=WEEKLY` without a BYDAY list: plain 7-day step.
    WeeklyStep,
    /// Unrecognized pattern: monthly step.
    MonthlyFallback,
}

fn weekday_number(code: &str) -> Option<u32> {
    match code {
        "SU" => Some(0),
        "MO" => Some(1),
        "TU" => Some(2),
        "WE" => Some(3),
        "TH" => Some(4),
        "FR" => Some(5),
        "SA" => Some(6),
        _ => None,
    }
}

fn parse_custom_pattern(pattern: &str) -> Option<CustomPattern> {
    let mut freq = None;
    let mut byday = None;
    for part in pattern.split(';') {
        let mut kv = part.splitn(2, '=');
        if let (Some(key), Some(value)) = (kv.next(), kv.next()) {
            match key.trim() {
                "FREQ" => freq = Some(value.trim()),
                "BYDAY" => byday = Some(value.trim()),
                _ => {}
            }
        }
    }
    match freq? {
        "WEEKLY" => match byday {
            None => Some(CustomPattern::WeeklyStep),
            Some(codes) => {
                let mut weekdays = Vec::new();
                for code in codes.split(',') {
                    weekdays.push(weekday_number(code.trim())?);
                }
                weekdays.sort_unstable();
                weekdays.dedup();
                if weekdays.is_empty() {
                    None
                } else {
                    Some(CustomPattern::WeeklyByDay(weekdays))
                }
            }
        },
        _ => None,
    }
}

/// Occurrence calculator for a single recurrence rule.
#[derive(Debug, Clone)]
pub struct RecurrenceCalculator {
    rule: RecurrenceRule,
    anchor: Option<NaiveDate>,
    until: Option<NaiveDate>,
    custom: Option<CustomPattern>,
}

impl RecurrenceCalculator {
    /// Validates the rule and pre-parses its date fields.
    ///
    /// Malformed `anchor_date`/`end_date` strings and a zero `interval` are
    /// rejected outright: recurrence math compounds a misread input into
    /// far-future date drift, so there is no silent coercion here. An
    /// unrecognized `custom_pattern` is the one graceful path: it degrades
    /// to a monthly step, logged and queryable.
    pub fn new(rule: &RecurrenceRule) -> Result<Self, CoreError> {
        if rule.interval == 0 {
            return Err(CoreError::InvalidRule(
                "interval must be at least 1".to_string(),
            ));
        }
        if let Some(day) = rule.day_of_month {
            if !(1..=31).contains(&day) {
                return Err(CoreError::InvalidRule(format!(
                    "dayOfMonth must be within 1..=31, got {}",
                    day
                )));
            }
        }
        if let Some(day) = rule.day_of_quarter {
            if !(1..=31).contains(&day) {
                return Err(CoreError::InvalidRule(format!(
                    "dayOfQuarter must be within 1..=31, got {}",
                    day
                )));
            }
        }
        let anchor = rule.anchor_date.as_deref().map(parse_iso_date).transpose()?;
        let until = rule.end_date.as_deref().map(parse_iso_date).transpose()?;

        let custom = if rule.frequency == Frequency::Custom {
            let parsed = rule
                .custom_pattern
                .as_deref()
                .and_then(parse_custom_pattern);
            if parsed.is_none() {
                tracing::warn!(
                    pattern = rule.custom_pattern.as_deref().unwrap_or(""),
                    "unrecognized custom pattern, falling back to monthly step"
                );
            }
            Some(parsed.unwrap_or(CustomPattern::MonthlyFallback))
        } else {
            None
        };

        Ok(Self {
            rule: rule.clone(),
            anchor,
            until,
            custom,
        })
    }

    /// True when a `custom` rule's pattern was not recognized and the
    /// calculator is stepping monthly instead.
    pub fn custom_fallback(&self) -> bool {
        matches!(self.custom, Some(CustomPattern::MonthlyFallback))
    }

    fn interval(&self) -> i64 {
        i64::from(self.rule.interval)
    }

    /// Day-of-month alignment for monthly rules: anchor day, explicit
    /// `day_of_month`, or the default.
    fn monthly_day(&self) -> u32 {
        self.anchor
            .map(|a| a.day())
            .or(self.rule.day_of_month)
            .unwrap_or(DEFAULT_DAY_OF_MONTH)
    }

    /// Smallest matching date strictly after `reference`.
    pub fn next_occurrence(&self, reference: NaiveDate) -> NaiveDate {
        match self.rule.frequency {
            Frequency::Daily => add_days(reference, self.interval()),
            Frequency::Weekly => add_days(reference, self.interval() * 7),
            Frequency::Monthly => self.next_monthly(reference),
            Frequency::Quarterly => self.next_quarterly(reference),
            Frequency::Yearly => self.next_yearly(reference),
            Frequency::Custom => self.next_custom(reference),
        }
    }

    fn next_monthly(&self, reference: NaiveDate) -> NaiveDate {
        let day = self.monthly_day();
        let candidate = resolve_month_day(reference.year(), reference.month(), day);
        if candidate > reference {
            return candidate;
        }
        let shifted = add_months(reference, self.interval());
        resolve_month_day(shifted.year(), shifted.month(), day)
    }

    fn next_quarterly(&self, reference: NaiveDate) -> NaiveDate {
        match self.anchor {
            None => {
                let (mut end, _) = next_quarter_end(reference);
                match self.rule.day_of_quarter {
                    None => end,
                    Some(day) => loop {
                        let target = resolve_month_day(end.year(), end.month(), day).min(end);
                        if target > reference {
                            break target;
                        }
                        let (next, _) = next_quarter_end(end);
                        end = next;
                    },
                }
            }
            Some(anchor) => {
                let day = anchor.day();
                let quarter_start = start_of_quarter(reference);
                let candidate =
                    resolve_month_day(quarter_start.year(), quarter_start.month(), day);
                if candidate > reference {
                    return candidate;
                }
                let next_start = start_of_quarter(add_months(reference, self.interval() * 3));
                resolve_month_day(next_start.year(), next_start.month(), day)
            }
        }
    }

    fn next_yearly(&self, reference: NaiveDate) -> NaiveDate {
        match self.anchor {
            Some(anchor) => {
                let candidate =
                    resolve_month_day(reference.year(), anchor.month(), anchor.day());
                if candidate > reference {
                    return candidate;
                }
                let shifted = add_years(reference, self.interval());
                resolve_month_day(shifted.year(), anchor.month(), anchor.day())
            }
            None => add_years(reference, self.interval()),
        }
    }

    fn next_custom(&self, reference: NaiveDate) -> NaiveDate {
        match &self.custom {
            Some(CustomPattern::WeeklyByDay(weekdays)) => {
                let current = reference.weekday().num_days_from_sunday();
                for &target in weekdays {
                    if target > current {
                        return add_days(reference, i64::from(target - current));
                    }
                }
                // Wrap to the earliest listed weekday of the next week.
                let first = weekdays[0];
                add_days(reference, i64::from(7 - current + first))
            }
            Some(CustomPattern::WeeklyStep) => add_days(reference, 7),
            _ => add_months(reference, 1),
        }
    }

    /// Mirror of [`next_occurrence`](Self::next_occurrence) stepping backward
    /// by one interval unit. Only meaningful for the aligned frequencies
    /// (monthly/quarterly/yearly), which is all the back-fill step needs;
    /// daily/weekly/custom return `None`.
    pub fn previous_occurrence(&self, reference: NaiveDate) -> Option<NaiveDate> {
        match self.rule.frequency {
            Frequency::Monthly => {
                let day = self.monthly_day();
                let shifted = add_months(reference, -self.interval());
                Some(resolve_month_day(shifted.year(), shifted.month(), day))
            }
            Frequency::Quarterly => Some(self.previous_quarterly(reference)),
            Frequency::Yearly => {
                let shifted = add_years(reference, -self.interval());
                Some(match self.anchor {
                    Some(anchor) => {
                        resolve_month_day(shifted.year(), anchor.month(), anchor.day())
                    }
                    None => shifted,
                })
            }
            _ => None,
        }
    }

    fn previous_quarterly(&self, reference: NaiveDate) -> NaiveDate {
        match self.anchor {
            None => {
                let previous_end = add_days(start_of_quarter(reference), -1);
                match self.rule.day_of_quarter {
                    None => previous_end,
                    Some(day) => {
                        resolve_month_day(previous_end.year(), previous_end.month(), day)
                            .min(previous_end)
                    }
                }
            }
            Some(anchor) => {
                let previous_start =
                    start_of_quarter(add_months(reference, -self.interval() * 3));
                resolve_month_day(previous_start.year(), previous_start.month(), anchor.day())
            }
        }
    }

    /// Inclusive variant of [`next_occurrence`](Self::next_occurrence):
    /// returns `reference` itself when it already matches the rule's day
    /// alignment.
    pub fn first_occurrence(&self, reference: NaiveDate) -> NaiveDate {
        match self.rule.frequency {
            Frequency::Monthly => {
                let day = self.monthly_day();
                let candidate = resolve_month_day(reference.year(), reference.month(), day);
                if candidate >= reference {
                    return candidate;
                }
                let shifted = add_months(reference, self.interval());
                resolve_month_day(shifted.year(), shifted.month(), day)
            }
            Frequency::Quarterly => self.first_quarterly(reference),
            Frequency::Yearly => match self.anchor {
                Some(anchor) => {
                    let candidate =
                        resolve_month_day(reference.year(), anchor.month(), anchor.day());
                    if candidate >= reference {
                        return candidate;
                    }
                    let shifted = add_years(reference, self.interval());
                    resolve_month_day(shifted.year(), anchor.month(), anchor.day())
                }
                None => add_years(reference, self.interval()),
            },
            _ => reference,
        }
    }

    fn first_quarterly(&self, reference: NaiveDate) -> NaiveDate {
        match self.anchor {
            None => {
                let end = current_quarter_end(reference);
                match self.rule.day_of_quarter {
                    // The current quarter's end is never before a date
                    // within that quarter.
                    None => end,
                    Some(day) => {
                        let target = resolve_month_day(end.year(), end.month(), day).min(end);
                        if target >= reference {
                            return target;
                        }
                        let (next_end, _) = next_quarter_end(end);
                        resolve_month_day(next_end.year(), next_end.month(), day).min(next_end)
                    }
                }
            }
            Some(anchor) => {
                let day = anchor.day();
                let quarter_start = start_of_quarter(reference);
                let candidate =
                    resolve_month_day(quarter_start.year(), quarter_start.month(), day);
                if candidate >= reference {
                    return candidate;
                }
                let next_start = start_of_quarter(add_months(reference, self.interval() * 3));
                resolve_month_day(next_start.year(), next_start.month(), day)
            }
        }
    }

    /// Enumerates matching dates within `[start, end]` (both inclusive).
    ///
    /// The starting date itself is excluded unless `options.include_first`
    /// is set; the window boundary is not necessarily an occurrence.
    /// Enumeration stops at the window end, the rule's own `end_date` or
    /// `count` bound, or the hard `max_occurrences` cap; hitting the cap is
    /// reported via the `truncated` flag, not an error.
    pub fn generate_occurrences(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        options: &OccurrenceOptions,
    ) -> Result<OccurrenceSequence, CoreError> {
        if options.max_occurrences == 0 {
            return Err(CoreError::InvalidInput(
                "maxOccurrences must be at least 1".to_string(),
            ));
        }

        let mut dates = Vec::new();
        let mut truncated = false;

        if let Some(until) = self.until {
            if until < start {
                return Ok(OccurrenceSequence { dates, truncated });
            }
        }

        let mut current = start;
        let mut count: usize = 0;
        loop {
            if current > end {
                break;
            }
            if let Some(until) = self.until {
                if current > until {
                    break;
                }
            }
            if let Some(limit) = self.rule.count {
                if count >= limit as usize {
                    break;
                }
            }
            if count >= options.max_occurrences {
                truncated = true;
                break;
            }
            if count > 0 || options.include_first {
                dates.push(current);
            }
            let next = self.next_occurrence(current);
            if next <= current {
                // Saturated at the calendar's edge; nothing further to
                // enumerate.
                truncated = true;
                break;
            }
            current = next;
            count += 1;
        }

        Ok(OccurrenceSequence { dates, truncated })
    }

    /// Preview the next `count` occurrences strictly after `from`,
    /// respecting the rule's own end date. Powers "preview next N
    /// occurrences" in template editors.
    pub fn preview_occurrences(&self, from: NaiveDate, count: usize) -> Vec<NaiveDate> {
        let mut occurrences = Vec::with_capacity(count);
        let mut current = from;
        while occurrences.len() < count {
            let next = self.next_occurrence(current);
            if next <= current {
                break;
            }
            if let Some(until) = self.until {
                if next > until {
                    break;
                }
            }
            current = next;
            occurrences.push(next);
        }
        occurrences
    }

    /// The date on which the next occurrence's notification window opens,
    /// or `None` when the rule has no notification lead time configured.
    pub fn next_notification_date(&self, reference: NaiveDate) -> Option<NaiveDate> {
        if self.rule.notify_days_before == 0 {
            return None;
        }
        let next = self.next_occurrence(reference);
        Some(add_days(next, -i64::from(self.rule.notify_days_before)))
    }
}
