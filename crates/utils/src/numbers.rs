/// Parses a locale-formatted numeric token into an `f64`.
///
/// Statement text mixes European formatting (decimal comma, dot thousands,
/// e.g. `1.234,56`) with plain decimal tokens (`264.45`). Disambiguation:
/// when a comma is present it is the decimal separator and any dots before
/// it are thousands separators; without a comma, a single dot is the
/// decimal point and multiple dots are thousands separators (`1.234.567`).
///
/// Returns `None` for anything else — letters, currency symbols, more than
/// one comma. Callers treat `None` as a recoverable gap, never an error.
pub fn parse_locale_number(text: &str) -> Option<f64> {
    let text = text.trim();
    let negative = text.starts_with('-');
    let unsigned = text.strip_prefix('-').unwrap_or(text);

    if !unsigned.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    if !unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
    {
        return None;
    }

    let normalized = match unsigned.split_once(',') {
        Some((_, decimal)) if decimal.contains(',') => return None,
        Some((integer, decimal)) => {
            let decimal = if decimal.is_empty() { "0" } else { decimal };
            format!("{}.{}", integer.replace('.', ""), decimal)
        }
        None if unsigned.matches('.').count() > 1 => unsigned.replace('.', ""),
        None => unsigned.to_string(),
    };

    let value: f64 = normalized.parse().ok()?;
    Some(if negative { -value } else { value })
}
