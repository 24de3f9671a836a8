//! Fixed-width result printing for the three tools.
//!
//! Each tool prints its own table; the only shared piece is the error
//! line rendered from a category/message element.

use blpq_core::name;
use blpq_core::value::DATETIME_FORMAT;
use blpq_core::Element;

/// `"{leading}category (message)"` from an error-info element.
pub fn error_info(leading: &str, info: &Element) -> String {
    let category = info.get_string(&name::CATEGORY).unwrap_or_default();
    let message = info.get_string(&name::MESSAGE).unwrap_or_default();
    format!("{leading}{category} ({message})")
}

pub fn bar_header() -> String {
    format!(
        "{:<20}{:>10}{:>10}{:>10}{:>10}{:>8}{:>12}",
        "TIME", "OPEN", "HIGH", "LOW", "CLOSE", "EVENTS", "VOLUME"
    )
}

/// One `barTickData` row.
pub fn bar_row(bar: &Element) -> String {
    let time = bar
        .get_datetime("time")
        .map(|t| t.format(DATETIME_FORMAT).to_string())
        .unwrap_or_default();
    format!(
        "{:<20}{:>10.3}{:>10.3}{:>10.3}{:>10.3}{:>8}{:>12}",
        time,
        bar.get_f64("open").unwrap_or_default(),
        bar.get_f64("high").unwrap_or_default(),
        bar.get_f64("low").unwrap_or_default(),
        bar.get_f64("close").unwrap_or_default(),
        bar.get_i64("numEvents").unwrap_or_default(),
        bar.get_i64("volume").unwrap_or_default(),
    )
}

/// One `fieldData` line of a reference-data response.
pub fn field_value_row(field: &Element) -> String {
    let value = field.get_at::<String>(0).unwrap_or_default();
    format!("    {:<25}{}", field.name(), value)
}

pub fn field_table_header() -> String {
    format!("{:<14}{:<14}{}", "FIELD ID", "MNEMONIC", "DESCRIPTION")
}

/// One `fieldData` row of a field-search response.
pub fn field_row(field: &Element) -> String {
    let id = field.get_string("id").unwrap_or_default();
    if let Some(info) = field.element(&name::FIELD_INFO) {
        format!(
            "{:<14}{:<14}{}",
            id,
            info.get_string("mnemonic").unwrap_or_default(),
            info.get_string("description").unwrap_or_default()
        )
    } else if let Some(error) = field.element(&name::FIELD_ERROR) {
        format!(
            "{:<14}{}",
            id,
            error.get_string(&name::MESSAGE).unwrap_or_default()
        )
    } else {
        id
    }
}
