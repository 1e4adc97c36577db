use anyhow::Result;
use fundops_core::templates::builtin_templates;

use crate::views;

pub fn list_templates() -> Result<()> {
    let templates = builtin_templates();
    views::table::display_templates(&templates);
    Ok(())
}
