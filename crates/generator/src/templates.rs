//! Template loading and management

use openapi_scout_common::{Result, ScoutError};
use tera::Tera;

/// Load all output templates
///
/// Templates are compiled into the binary; there is no runtime template
/// directory to configure.
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.add_raw_template("overview.md", include_str!("../templates/overview.md.tera"))
        .map_err(|e| {
            ScoutError::Generation(format!("Failed to load overview.md template: {e}"))
        })?;

    tera.add_raw_template("skill.md", include_str!("../templates/skill.md.tera"))
        .map_err(|e| {
            ScoutError::Generation(format!("Failed to load skill.md template: {e}"))
        })?;

    tera.add_raw_template("request.ts", include_str!("../templates/request.ts.tera"))
        .map_err(|e| {
            ScoutError::Generation(format!("Failed to load request.ts template: {e}"))
        })?;

    Ok(tera)
}
