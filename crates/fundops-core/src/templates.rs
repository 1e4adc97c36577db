//! Seed templates for common PE fund operations.
//!
//! Pure data: each entry pairs a recurrence rule, a due rule, a checklist,
//! and tags into a valid [`Template`] for the instance generator. The
//! template-authoring surface uses these as starter content and typically
//! re-anchors them (see [`Template::with_anchor`]).

use crate::models::{ChecklistItem, DueRule, Frequency, Priority, RecurrenceRule, Template};

/// Registry keys, in display order.
pub const TEMPLATE_KEYS: [&str; 4] = [
    "quarterly-report",
    "capital-call",
    "annual-meeting",
    "monthly-valuation",
];

/// LP quarterly report, due on quarter end, two weeks of lead time.
pub fn quarterly_report() -> Template {
    Template {
        id: "template-quarterly-report".to_string(),
        name: "季度报告".to_string(),
        description: "LP季度报告标准流程".to_string(),
        title: "季度报告".to_string(),
        funds: vec![],
        lp: vec![],
        portfolio: vec![],
        tags: vec!["Quarterly Report".to_string()],
        checklist: vec![
            ChecklistItem::new("qr-1", "汇总组合公司经营指标"),
            ChecklistItem::new("qr-2", "更新估值模型"),
            ChecklistItem::new("qr-3", "整理 LP 报告材料"),
            ChecklistItem::new("qr-4", "内部审阅与修订"),
            ChecklistItem::new("qr-5", "对 LP 发布报告"),
        ],
        priority: Priority::High,
        recurrence: RecurrenceRule {
            frequency: Frequency::Quarterly,
            notify_days_before: 14,
            ..Default::default()
        },
        due_rule: DueRule {
            offset_months: 0,
            day_of_month: None,
            use_month_end: true,
        },
    }
}

/// Capital call notices on the 15th of each quarter-end month.
pub fn capital_call() -> Template {
    Template {
        id: "template-capital-call".to_string(),
        name: "出资通知 (Capital Call)".to_string(),
        description: "标准出资通知流程".to_string(),
        title: "出资通知 (Capital Call)".to_string(),
        funds: vec![],
        lp: vec![],
        portfolio: vec![],
        tags: vec!["Capital Call".to_string()],
        checklist: vec![
            ChecklistItem::new("cc-1", "收集 Capital Call 所需数据"),
            ChecklistItem::new("cc-2", "起草 LP 通知"),
            ChecklistItem::new("cc-3", "合规与法务复核"),
            ChecklistItem::new("cc-4", "发送出资通知"),
            ChecklistItem::new("cc-5", "跟踪确认回执与到账情况"),
        ],
        priority: Priority::High,
        recurrence: RecurrenceRule {
            frequency: Frequency::Quarterly,
            day_of_quarter: Some(15),
            notify_days_before: 7,
            ..Default::default()
        },
        due_rule: DueRule::default(),
    }
}

/// Annual LP advisory committee meeting, one month of lead time.
pub fn annual_meeting() -> Template {
    Template {
        id: "template-annual-meeting".to_string(),
        name: "年度 LP 会议".to_string(),
        description: "年度投资人顾问委员会会议".to_string(),
        title: "年度 LP 会议".to_string(),
        funds: vec![],
        lp: vec![],
        portfolio: vec![],
        tags: vec!["LP Meeting".to_string(), "Annual".to_string()],
        checklist: vec![
            ChecklistItem::new("am-1", "确定会议时间地点"),
            ChecklistItem::new("am-2", "准备年度业绩报告"),
            ChecklistItem::new("am-3", "发送会议邀请"),
            ChecklistItem::new("am-4", "收集 RSVP"),
            ChecklistItem::new("am-5", "准备会议材料和餐饮"),
        ],
        priority: Priority::High,
        recurrence: RecurrenceRule {
            frequency: Frequency::Yearly,
            interval: 1,
            notify_days_before: 30,
            ..Default::default()
        },
        due_rule: DueRule::default(),
    }
}

/// Monthly portfolio valuation update on the 5th.
pub fn monthly_valuation() -> Template {
    Template {
        id: "template-monthly-valuation".to_string(),
        name: "月度估值更新".to_string(),
        description: "组合公司月度估值更新".to_string(),
        title: "月度估值更新".to_string(),
        funds: vec![],
        lp: vec![],
        portfolio: vec![],
        tags: vec!["Valuation".to_string(), "Monthly".to_string()],
        checklist: vec![
            ChecklistItem::new("mv-1", "收集各公司财务数据"),
            ChecklistItem::new("mv-2", "更新估值模型"),
            ChecklistItem::new("mv-3", "与投资团队核对"),
            ChecklistItem::new("mv-4", "更新内部估值表"),
        ],
        priority: Priority::Normal,
        recurrence: RecurrenceRule {
            frequency: Frequency::Monthly,
            day_of_month: Some(5),
            notify_days_before: 3,
            ..Default::default()
        },
        due_rule: DueRule::default(),
    }
}

/// All seed templates as (key, template) pairs, in display order.
pub fn builtin_templates() -> Vec<(&'static str, Template)> {
    vec![
        ("quarterly-report", quarterly_report()),
        ("capital-call", capital_call()),
        ("annual-meeting", annual_meeting()),
        ("monthly-valuation", monthly_valuation()),
    ]
}

/// Looks up a seed template by registry key.
pub fn builtin_template(key: &str) -> Option<Template> {
    match key {
        "quarterly-report" => Some(quarterly_report()),
        "capital-call" => Some(capital_call()),
        "annual-meeting" => Some(annual_meeting()),
        "monthly-valuation" => Some(monthly_valuation()),
        _ => None,
    }
}
