//! Number formatting for contribution tables.

/// Round to an integer and group digits by thousands: `-1234.6` → `-1,235`.
///
/// Halves round to even, so `2.5` prints as `2`. Non-finite values are
/// printed as-is.
pub fn thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = value.round_ties_even();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Sample values are shown as given: integers without a fraction.
pub fn plain(value: f64) -> String {
    format!("{value}")
}
