//! Task instance generation from recurring templates.
//!
//! The primary entry point is [`generate_task_instances`]: expand a
//! template's recurrence over a date window, apply its due rule, substitute
//! title placeholders, and filter to the notification window. Instances are
//! value objects with deterministic ids; persistence and deduplication
//! belong to the caller.

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate, Utc};
use regex_lite::{Captures, Regex};

use crate::calendar::{add_days, add_months, end_of_month, quarter_of, resolve_month_day};
use crate::error::CoreError;
use crate::models::{
    ChecklistItem, DueRule, GeneratedInstances, GenerationCheck, OccurrenceOptions, TaskInstance,
    Template,
};
use crate::recurrence::RecurrenceCalculator;

static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();

fn placeholder_re() -> &'static Regex {
    PLACEHOLDER_RE.get_or_init(|| {
        Regex::new(r"(?i)\{(Q[1-4]|QUARTER|MONTH|YEAR|INSTANCE)\}")
            .expect("placeholder pattern is a valid regex")
    })
}

/// Rewrites title placeholders against the occurrence date and the 1-based
/// instance index. All `{Q1}`..`{Q4}` forms render the date's actual
/// quarter, whichever literal appeared in the template.
pub fn expand_title_placeholders(title: &str, date: NaiveDate, instance_number: u32) -> String {
    let quarter = quarter_of(date);
    placeholder_re()
        .replace_all(title, |caps: &Captures<'_>| {
            match caps[1].to_ascii_uppercase().as_str() {
                "QUARTER" | "Q1" | "Q2" | "Q3" | "Q4" => format!("Q{}", quarter),
                "MONTH" => format!("{}月", date.month()),
                "YEAR" => format!("{}", date.year()),
                "INSTANCE" => format!("#{}", instance_number),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Applies a due rule to an occurrence date: shift by whole months, then
/// take the month end, clamp to a day-of-month, or leave the shifted date
/// unchanged. `use_month_end` wins when both it and `day_of_month` are set.
pub fn compute_due_date(occurrence: NaiveDate, rule: &DueRule) -> NaiveDate {
    let base = if rule.offset_months > 0 {
        add_months(occurrence, i64::from(rule.offset_months))
    } else {
        occurrence
    };
    if rule.use_month_end {
        return end_of_month(base);
    }
    if let Some(day) = rule.day_of_month {
        return resolve_month_day(base.year(), base.month(), day);
    }
    base
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Generates due-dated task instances for a template within `[start, end]`.
///
/// Aligned frequencies (monthly/quarterly/yearly) snap the window start to
/// the first matching occurrence so the first in-range date is not skipped,
/// and back-fill one occurrence from the prior period when its due date
/// (not its generation date) lands inside the window. When the rule carries
/// a notification lead time, only instances due within
/// `[start, start + notify_days_before]` are surfaced: wide-horizon
/// generation with narrow user-facing visibility.
pub fn generate_task_instances(
    template: &Template,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<GeneratedInstances, CoreError> {
    if let Some(day) = template.due_rule.day_of_month {
        if !(1..=31).contains(&day) {
            return Err(CoreError::InvalidRule(format!(
                "due rule dayOfMonth must be within 1..=31, got {}",
                day
            )));
        }
    }

    let calculator = RecurrenceCalculator::new(&template.recurrence)?;
    let aligned = template.recurrence.frequency.is_aligned();
    let aligned_start = if aligned {
        calculator.first_occurrence(start)
    } else {
        start
    };

    let options = OccurrenceOptions {
        include_first: aligned,
        ..Default::default()
    };
    let sequence = calculator.generate_occurrences(aligned_start, end, &options)?;
    let mut occurrences = sequence.dates;

    // A task generated in a prior period can still be due inside this
    // window (quarter-end generated last quarter, due with an offset this
    // quarter). The window is defined by due date, not generation date,
    // for this one edge.
    if aligned {
        if let Some(previous) = calculator.previous_occurrence(aligned_start) {
            if previous < aligned_start {
                let previous_due = compute_due_date(previous, &template.due_rule);
                if previous_due >= start && previous_due <= end {
                    occurrences.insert(0, previous);
                }
            }
        }
    }

    let notify_days = template.recurrence.notify_days_before;
    let window_end = (notify_days > 0).then(|| add_days(start, i64::from(notify_days)));

    let generated_at = Utc::now();
    let created_at = generated_at.to_rfc3339();
    let created_date = iso(generated_at.date_naive());

    let mut instances = Vec::with_capacity(occurrences.len());
    for (index, occurrence) in occurrences.into_iter().enumerate() {
        let due = compute_due_date(occurrence, &template.due_rule);
        let instance_number = (index + 1) as u32;
        if let Some(window_end) = window_end {
            if due < start || due > window_end {
                continue;
            }
        }
        instances.push(TaskInstance {
            id: TaskInstance::instance_id(&template.id, occurrence),
            title: expand_title_placeholders(&template.title, occurrence, instance_number),
            funds: template.funds.clone(),
            lp: template.lp.clone(),
            portfolio: template.portfolio.clone(),
            due_date: iso(due),
            tags: template.tags.clone(),
            checklist: template
                .checklist
                .iter()
                .map(|item| ChecklistItem::new(&item.id, &item.text))
                .collect(),
            completed: false,
            priority: template.priority,
            created_at: created_at.clone(),
            created_date: created_date.clone(),
            completed_date: None,
            note: String::new(),
            note_refined: String::new(),
            generated_from: template.id.clone(),
            instance_number,
            recurrence_date: iso(occurrence),
        });
    }

    Ok(GeneratedInstances {
        instances,
        truncated: sequence.truncated,
    })
}

/// Reports whether a template's notification window is open as of
/// `reference`, i.e. whether the surrounding app should generate its next
/// instance now.
pub fn should_generate_instance(
    template: &Template,
    reference: NaiveDate,
) -> Result<GenerationCheck, CoreError> {
    let calculator = RecurrenceCalculator::new(&template.recurrence)?;
    match calculator.next_notification_date(reference) {
        None => Ok(GenerationCheck {
            should_generate: false,
            due_date: None,
            notification_date: None,
            reason: Some("No notification configured".to_string()),
        }),
        Some(notification_date) => {
            if reference >= notification_date {
                let next = calculator.next_occurrence(reference);
                Ok(GenerationCheck {
                    should_generate: true,
                    due_date: Some(iso(next)),
                    notification_date: Some(iso(notification_date)),
                    reason: None,
                })
            } else {
                Ok(GenerationCheck {
                    should_generate: false,
                    due_date: None,
                    notification_date: Some(iso(notification_date)),
                    reason: Some("Not yet time to generate".to_string()),
                })
            }
        }
    }
}
