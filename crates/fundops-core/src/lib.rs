//! # FundOps Core Library
//!
//! A recurrence engine for private-equity fund operations: quarter-aligned
//! occurrence calculation, due-rule offsets, and recurring task instance
//! generation.
//!
//! ## Features
//!
//! - **Quarter-Aware Recurrence**: daily through yearly frequencies plus the
//!   PE reporting calendar (Mar 31 / Jun 30 / Sep 30 / Dec 31 quarter ends)
//! - **Month-End Clamping**: day-31 anchors and short months resolve to the
//!   month's actual last day throughout
//! - **Due Rules**: occurrence-to-due-date mapping with month offsets,
//!   day-of-month clamps, and month-end targeting
//! - **Deterministic Instances**: generated task instances carry stable ids
//!   per (template, occurrence date) pair for caller-side deduplication
//! - **Notification Windows**: wide-horizon generation filtered down to
//!   instances due soon enough to need action now
//!
//! ## Core Modules
//!
//! - [`calendar`]: date-only arithmetic primitives
//! - [`models`]: rules, templates, and instance data structures
//! - [`recurrence`]: occurrence calculation over recurrence rules
//! - [`instances`]: task instance generation from templates
//! - [`templates`]: seed templates for common fund operations
//! - [`error`]: error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use fundops_core::instances::generate_task_instances;
//! use fundops_core::templates::quarterly_report;
//!
//! fn main() -> Result<(), fundops_core::error::CoreError> {
//!     let template = quarterly_report();
//!     let start = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();
//!     let end = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
//!
//!     let generated = generate_task_instances(&template, start, end)?;
//!     for instance in &generated.instances {
//!         println!("{} due {}", instance.title, instance.due_date);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! The engine is a pure, synchronous computation: no I/O, no shared mutable
//! state. Templates are read-only inputs and instances are value objects,
//! so concurrent callers need no coordination.

pub mod calendar;
pub mod error;
pub mod instances;
pub mod models;
pub mod recurrence;
pub mod templates;
