//! End-to-end properties of the recurrence engine: month-end clamping,
//! quarter-end defaults, idempotent identity, notification windows,
//! placeholder substitution, checklist isolation, due-rule offsets, and
//! back-fill across the window boundary.

use chrono::NaiveDate;
use fundops_core::instances::{compute_due_date, generate_task_instances};
use fundops_core::models::{
    ChecklistItem, DueRule, Frequency, Priority, RecurrenceRule, Template,
};
use fundops_core::recurrence::RecurrenceCalculator;
use rstest::rstest;

fn d(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn template(recurrence: RecurrenceRule, due_rule: DueRule) -> Template {
    Template {
        id: "template-props".to_string(),
        name: "Props".to_string(),
        description: String::new(),
        title: "{QUARTER}季度报告 {INSTANCE}".to_string(),
        funds: vec!["Fund II".to_string()],
        lp: vec![],
        portfolio: vec![],
        tags: vec!["Quarterly Report".to_string()],
        checklist: vec![
            ChecklistItem::new("p-1", "汇总数据"),
            ChecklistItem::new("p-2", "内部审阅"),
        ],
        priority: Priority::High,
        recurrence,
        due_rule,
    }
}

#[rstest]
// Day-31 monthly rules clamp to the month's actual last day.
#[case(d(2026, 2, 1), d(2026, 2, 28))]
#[case(d(2028, 2, 1), d(2028, 2, 29))]
#[case(d(2026, 4, 1), d(2026, 4, 30))]
fn month_end_clamping(#[case] reference: NaiveDate, #[case] expected: NaiveDate) {
    let rule = RecurrenceRule {
        frequency: Frequency::Monthly,
        day_of_month: Some(31),
        ..Default::default()
    };
    let calc = RecurrenceCalculator::new(&rule).unwrap();
    assert_eq!(calc.next_occurrence(reference), expected);
}

#[test]
fn quarter_end_defaults() {
    let rule = RecurrenceRule {
        frequency: Frequency::Quarterly,
        ..Default::default()
    };
    let calc = RecurrenceCalculator::new(&rule).unwrap();
    assert_eq!(calc.next_occurrence(d(2026, 1, 1)), d(2026, 3, 31));
    assert_eq!(calc.next_occurrence(d(2026, 3, 31)), d(2026, 6, 30));
}

#[test]
fn idempotent_instance_ids_across_overlapping_windows() {
    let t = template(
        RecurrenceRule {
            frequency: Frequency::Quarterly,
            ..Default::default()
        },
        DueRule::default(),
    );
    let first = generate_task_instances(&t, d(2026, 1, 1), d(2026, 9, 30)).unwrap();
    let second = generate_task_instances(&t, d(2026, 5, 1), d(2026, 12, 31)).unwrap();

    let id_for = |result: &fundops_core::models::GeneratedInstances, date: &str| {
        result
            .instances
            .iter()
            .find(|i| i.recurrence_date == date)
            .map(|i| i.id.clone())
    };
    let from_first = id_for(&first, "2026-06-30").expect("Jun 30 in first window");
    let from_second = id_for(&second, "2026-06-30").expect("Jun 30 in second window");
    assert_eq!(from_first, from_second);
    assert_eq!(from_first, "template-props-instance-2026-06-30");
}

#[test]
fn notification_window_is_relative_to_window_start() {
    let t = template(
        RecurrenceRule {
            frequency: Frequency::Monthly,
            day_of_month: Some(15),
            notify_days_before: 7,
            ..Default::default()
        },
        DueRule::default(),
    );
    // Mar 15 is 5 days past the window start: surfaced.
    let generated = generate_task_instances(&t, d(2026, 3, 10), d(2026, 4, 30)).unwrap();
    assert_eq!(generated.instances.len(), 1);
    assert_eq!(generated.instances[0].due_date, "2026-03-15");

    // A due date 10 days past the window start is not surfaced.
    let t = template(
        RecurrenceRule {
            frequency: Frequency::Monthly,
            day_of_month: Some(20),
            notify_days_before: 7,
            ..Default::default()
        },
        DueRule::default(),
    );
    let generated = generate_task_instances(&t, d(2026, 3, 10), d(2026, 4, 30)).unwrap();
    assert!(generated.instances.is_empty());
}

#[test]
fn placeholder_substitution_uses_occurrence_quarter_and_index() {
    let t = template(
        RecurrenceRule {
            frequency: Frequency::Quarterly,
            ..Default::default()
        },
        DueRule::default(),
    );
    let generated = generate_task_instances(&t, d(2026, 1, 1), d(2026, 9, 30)).unwrap();
    let third_quarter = generated
        .instances
        .iter()
        .find(|i| i.recurrence_date == "2026-09-30")
        .unwrap();
    assert_eq!(third_quarter.title, "Q3季度报告 #3");
}

#[test]
fn checklist_mutation_does_not_leak() {
    let t = template(
        RecurrenceRule {
            frequency: Frequency::Quarterly,
            ..Default::default()
        },
        DueRule::default(),
    );
    let mut generated = generate_task_instances(&t, d(2026, 1, 1), d(2026, 6, 30)).unwrap();
    assert_eq!(generated.instances.len(), 2);

    generated.instances[0].checklist[0].done = true;
    assert!(!t.checklist[0].done);
    assert!(!generated.instances[1].checklist[0].done);
}

#[rstest]
#[case(d(2026, 1, 30), 3, d(2026, 4, 30))]
#[case(d(2026, 1, 31), 1, d(2026, 2, 28))]
fn due_rule_offset_with_month_end(
    #[case] occurrence: NaiveDate,
    #[case] offset_months: u32,
    #[case] expected: NaiveDate,
) {
    let rule = DueRule {
        offset_months,
        day_of_month: None,
        use_month_end: true,
    };
    assert_eq!(compute_due_date(occurrence, &rule), expected);
}

#[test]
fn backfill_surfaces_prior_quarter_instance_exactly_once() {
    let t = template(
        RecurrenceRule {
            frequency: Frequency::Quarterly,
            anchor_date: Some("2024-01-10".to_string()),
            notify_days_before: 30,
            ..Default::default()
        },
        DueRule {
            offset_months: 3,
            day_of_month: None,
            use_month_end: false,
        },
    );
    // The narrow April window contains only the due date of January's
    // occurrence; April's own occurrence is due in July.
    let generated = generate_task_instances(&t, d(2026, 4, 5), d(2026, 4, 30)).unwrap();
    assert_eq!(generated.instances.len(), 1);
    let instance = &generated.instances[0];
    assert_eq!(instance.recurrence_date, "2026-01-10");
    assert_eq!(instance.due_date, "2026-04-10");
    assert!(generated
        .instances
        .iter()
        .all(|i| i.recurrence_date != "2026-04-10"));
}
