use comfy_table::Table;
use fundops_core::models::{TaskInstance, Template};

pub fn display_templates(templates: &[(&str, Template)]) {
    let mut table = Table::new();
    table
        .set_header(vec![
            "Key",
            "Name",
            "Frequency",
            "Notify",
            "Priority",
            "Checklist",
        ])
        .load_preset(comfy_table::presets::UTF8_FULL);

    for (key, template) in templates {
        let notify = if template.recurrence.notify_days_before > 0 {
            format!("{}d before", template.recurrence.notify_days_before)
        } else {
            "-".to_string()
        };
        table.add_row(vec![
            key.to_string(),
            template.name.clone(),
            template.recurrence.frequency.to_string(),
            notify,
            template.priority.to_string(),
            format!("{} items", template.checklist.len()),
        ]);
    }

    println!("{}", table);
}

pub fn display_instances(instances: &[TaskInstance]) {
    if instances.is_empty() {
        println!("No instances generated.");
        return;
    }

    let mut table = Table::new();
    table
        .set_header(vec!["#", "Title", "Due", "Occurrence", "Priority", "Tags"])
        .load_preset(comfy_table::presets::UTF8_FULL);

    for instance in instances {
        table.add_row(vec![
            instance.instance_number.to_string(),
            instance.title.clone(),
            instance.due_date.clone(),
            instance.recurrence_date.clone(),
            instance.priority.to_string(),
            instance.tags.join(", "),
        ]);
    }

    println!("{}", table);
}
