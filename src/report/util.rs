use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Dollar amount rounded to cents with comma-grouped thousands, e.g.
/// `-1234.5` → `"-$1,234.50"`.
pub(crate) fn format_amount(val: Decimal) -> String {
    let cents = val.round_dp(2);
    let digits = cents.abs().trunc().to_string();
    let fraction = (cents.abs().fract() * Decimal::ONE_HUNDRED)
        .to_u32()
        .unwrap_or(0);

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if cents.is_sign_negative() && !cents.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{fraction:02}")
}

/// Cut `s` to at most `width` characters, marking the cut with `…`.
pub(crate) fn truncate(s: &str, width: usize) -> String {
    match s.char_indices().nth(width) {
        None => s.to_string(),
        Some(_) if width == 0 => String::new(),
        Some(_) => {
            let keep = s
                .char_indices()
                .nth(width - 1)
                .map_or(s.len(), |(idx, _)| idx);
            format!("{}…", &s[..keep])
        }
    }
}

/// Fixed-width bar for a percentage in `0..=100`. Values outside are clamped.
pub(crate) fn progress_bar(percent: Decimal, width: usize) -> String {
    let ratio = (percent / Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or(0.0)
        .clamp(0.0, 1.0);
    let filled = ((ratio * width as f64) as usize).min(width);
    let empty = width - filled;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

/// `2024-03` → `Mar 2024`. Unrecognised keys are returned unchanged.
pub(crate) fn month_label(period: &str) -> String {
    chrono::NaiveDate::parse_from_str(&format!("{period}-01"), "%Y-%m-%d")
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|_| period.to_string())
}
