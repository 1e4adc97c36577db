use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// How often a recurrence rule fires.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
    Custom,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid frequency: {0}")]
pub struct ParseFrequencyError(String);

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "quarterly" => Ok(Frequency::Quarterly),
            "yearly" => Ok(Frequency::Yearly),
            "custom" => Ok(Frequency::Custom),
            _ => Err(ParseFrequencyError(s.to_string())),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Monthly => write!(f, "monthly"),
            Frequency::Quarterly => write!(f, "quarterly"),
            Frequency::Yearly => write!(f, "yearly"),
            Frequency::Custom => write!(f, "custom"),
        }
    }
}

impl Frequency {
    /// Monthly, quarterly, and yearly rules snap to a day-of-month alignment;
    /// instance generation aligns its window start to the first matching date
    /// for these frequencies.
    pub fn is_aligned(&self) -> bool {
        matches!(
            self,
            Frequency::Monthly | Frequency::Quarterly | Frequency::Yearly
        )
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Normal,
    High,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid priority: {0}")]
pub struct ParsePriorityError(String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Normal => write!(f, "normal"),
            Priority::High => write!(f, "high"),
        }
    }
}

/// Describes how often and on what calendar anchor a task repeats.
///
/// Day alignment comes from `anchor_date` when present; otherwise
/// `day_of_month` (monthly) or `day_of_quarter` (quarterly, absence meaning
/// "quarter end") substitute. Date fields are ISO `YYYY-MM-DD` strings as
/// supplied by the template-authoring surface; malformed values are rejected
/// when a calculator is built, never silently defaulted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    /// Step between occurrences in frequency units. Must be >= 1.
    pub interval: u32,
    pub anchor_date: Option<String>,
    pub day_of_month: Option<u32>,
    pub day_of_quarter: Option<u32>,
    /// Instances are only surfaced when their due date falls within
    /// `[windowStart, windowStart + notify_days_before]`. Zero disables the
    /// filter.
    pub notify_days_before: u32,
    pub end_date: Option<String>,
    pub count: Option<u32>,
    /// Simplified weekly by-weekday pattern (`FREQ=WEEKLY;BYDAY=MO,WE,FR`),
    /// consulted only when `frequency` is `custom`.
    pub custom_pattern: Option<String>,
}

impl Default for RecurrenceRule {
    fn default() -> Self {
        Self {
            frequency: Frequency::Monthly,
            interval: 1,
            anchor_date: None,
            day_of_month: None,
            day_of_quarter: None,
            notify_days_before: 0,
            end_date: None,
            count: None,
            custom_pattern: None,
        }
    }
}

/// Maps an occurrence date to a task's due date: shift by whole months, then
/// resolve the day. `use_month_end` wins over `day_of_month` when both are
/// set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct DueRule {
    pub offset_months: u32,
    pub day_of_month: Option<u32>,
    pub use_month_end: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    pub done: bool,
}

impl ChecklistItem {
    pub fn new(id: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            done: false,
        }
    }
}

/// A recurring-task definition. Read-only input to the engine: generation
/// copies everything it needs into instances and never mutates the template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub title: String,
    #[serde(default)]
    pub funds: Vec<String>,
    #[serde(default)]
    pub lp: Vec<String>,
    #[serde(default)]
    pub portfolio: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub recurrence: RecurrenceRule,
    #[serde(default)]
    pub due_rule: DueRule,
}

impl Template {
    /// Returns a copy of this template anchored on the given date, the way
    /// the template-authoring surface pins a seed template to a concrete
    /// task's due date.
    pub fn with_anchor(mut self, anchor: NaiveDate) -> Self {
        self.recurrence.anchor_date = Some(anchor.format("%Y-%m-%d").to_string());
        self
    }
}

/// A materialized, dated copy of a template occurrence.
///
/// Instances are value objects: the engine does not own or track them after
/// returning them, and persistence/deduplication is the caller's
/// responsibility. The `id` is deterministic per (template, occurrence date)
/// pair so re-running generation over an overlapping window yields identical
/// identities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskInstance {
    pub id: String,
    pub title: String,
    pub funds: Vec<String>,
    pub lp: Vec<String>,
    pub portfolio: Vec<String>,
    /// Due date (ISO `YYYY-MM-DD`), computed from the occurrence via the
    /// template's due rule.
    pub due_date: String,
    pub tags: Vec<String>,
    pub checklist: Vec<ChecklistItem>,
    pub completed: bool,
    pub priority: Priority,
    pub created_at: String,
    pub created_date: String,
    pub completed_date: Option<String>,
    pub note: String,
    pub note_refined: String,
    /// Back-reference to the template id; not a live link.
    pub generated_from: String,
    /// 1-based sequence index within the generation call.
    pub instance_number: u32,
    /// The underlying occurrence date (pre due-rule), retained for
    /// traceability.
    pub recurrence_date: String,
}

impl TaskInstance {
    /// Deterministic instance identity for a template + occurrence date pair.
    pub fn instance_id(template_id: &str, occurrence: NaiveDate) -> String {
        format!("{}-instance-{}", template_id, occurrence.format("%Y-%m-%d"))
    }
}

/// Result of an instance-generation call. `truncated` is set when the hard
/// occurrence cap cut enumeration short: a caller seeing it should treat the
/// result as "there may be more" rather than fully enumerated.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedInstances {
    pub instances: Vec<TaskInstance>,
    pub truncated: bool,
}

/// Verdict on whether a template is due for generation right now, based on
/// its notification window.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationCheck {
    pub should_generate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Options for occurrence enumeration.
#[derive(Debug, Clone)]
pub struct OccurrenceOptions {
    /// Include the window's starting date in the output when the caller has
    /// already confirmed it as a valid occurrence.
    pub include_first: bool,
    /// Hard iteration cap guarding against rules that never advance.
    pub max_occurrences: usize,
}

pub const DEFAULT_MAX_OCCURRENCES: usize = 100;

impl Default for OccurrenceOptions {
    fn default() -> Self {
        Self {
            include_first: false,
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
        }
    }
}

/// Ordered occurrence dates within a window, with an explicit flag when the
/// iteration cap truncated the enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccurrenceSequence {
    pub dates: Vec<NaiveDate>,
    pub truncated: bool,
}
