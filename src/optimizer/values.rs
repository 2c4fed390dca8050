use polars::prelude::AnyValue;

/// Display text for a cell, or `None` when the cell is missing.
///
/// Booleans render as `True`/`False` and whole floats keep a `.0` suffix,
/// matching how the datasets read when opened in a notebook. NaN counts as
/// missing.
pub fn render_value(value: &AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::Boolean(b) => Some(if *b { "True" } else { "False" }.to_owned()),
        AnyValue::String(s) => Some((*s).to_owned()),
        AnyValue::StringOwned(s) => Some(s.to_string()),
        AnyValue::Float32(v) => render_float(f64::from(*v)),
        AnyValue::Float64(v) => render_float(*v),
        other => Some(other.to_string()),
    }
}

fn render_float(v: f64) -> Option<String> {
    if v.is_nan() {
        None
    } else if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        Some(format!("{v:.1}"))
    } else {
        Some(v.to_string())
    }
}

/// Whether a cell should be left out of a narrative.
pub fn is_blank(value: &AnyValue<'_>) -> bool {
    render_value(value).is_none_or(|s| s.trim().is_empty())
}
