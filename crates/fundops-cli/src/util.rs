use anyhow::Result;
use fundops_core::models::Template;
use fundops_core::templates::{builtin_template, TEMPLATE_KEYS};

use crate::parser::parse_date;

/// Resolves a registry key to a template, optionally re-anchored on a
/// concrete date.
pub fn resolve_template(key: &str, anchor: Option<&str>) -> Result<Template> {
    let template = builtin_template(key).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown template '{}'. Available: {}",
            key,
            TEMPLATE_KEYS.join(", ")
        )
    })?;
    match anchor {
        Some(anchor) => Ok(template.with_anchor(parse_date(anchor)?)),
        None => Ok(template),
    }
}
