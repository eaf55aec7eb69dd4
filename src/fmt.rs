/// Format an amount for the table: absolute value, exactly two decimals, no
/// currency symbol or separators. Column sorting compares these strings.
pub fn amount(val: f64) -> String {
    format!("{:.2}", val.abs())
}

/// Share of `total` as a one-decimal percentage string: 12.5%
pub fn percent(pct: f64) -> String {
    format!("{pct:.1}%")
}
