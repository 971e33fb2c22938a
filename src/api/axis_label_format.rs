use std::sync::Arc;

use crate::core::primitives::unix_seconds_to_datetime;

use super::{AxisLabelLocale, LabelAxis};

/// Custom label formatter. Returning `None` falls back to the default
/// adaptive formatter for that value.
pub type LabelFormatterFn = Arc<dyn Fn(f64, LabelAxis) -> Option<String> + Send + Sync + 'static>;

/// Fraction digits used by the default formatter for an axis whose resolved
/// range spans `span`.
#[must_use]
pub fn adaptive_fraction_digits(span: f64) -> usize {
    if span < 0.1 {
        6
    } else if span < 1.0 {
        4
    } else if span < 20.0 {
        3
    } else if span < 100.0 {
        1
    } else {
        0
    }
}

/// Formats `value` with at most `max_fraction_digits` digits, locale
/// separators and thousands grouping. Trailing fraction zeros are dropped.
#[must_use]
pub fn format_axis_decimal(value: f64, max_fraction_digits: usize, locale: AxisLabelLocale) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let text = format!("{:.max_fraction_digits$}", value.abs());
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut out = String::with_capacity(text.len() + integer.len() / 3 + 1);
    let is_zero = integer.bytes().all(|digit| digit == b'0') && fraction.is_empty();
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    push_grouped(&mut out, integer, locale.grouping_separator());
    if !fraction.is_empty() {
        out.push(locale.decimal_separator());
        out.push_str(fraction);
    }
    out
}

fn push_grouped(out: &mut String, digits: &str, separator: char) {
    let len = digits.len();
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push(separator);
        }
        out.push(digit);
    }
}

/// Default axis formatter: digits adapt to the magnitude of the axis span.
#[must_use]
pub fn format_adaptive_label(value: f64, span: f64, locale: AxisLabelLocale) -> String {
    format_axis_decimal(value, adaptive_fraction_digits(span), locale)
}

/// Two-decimal value used by legend readouts.
#[must_use]
pub fn format_readout_value(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    format!("{value:.2}")
}

/// Formatter with a fixed maximum number of fraction digits on both axes.
#[must_use]
pub fn fixed_fraction_digits_formatter(digits: usize, locale: AxisLabelLocale) -> LabelFormatterFn {
    Arc::new(move |value, _axis| Some(format_axis_decimal(value, digits, locale)))
}

/// Formats horizontal labels as UTC date-times, treating x as unix seconds.
///
/// Vertical labels and x values outside chrono's range fall back to the
/// default formatter.
#[must_use]
pub fn utc_date_time_formatter(show_seconds: bool) -> LabelFormatterFn {
    let pattern = if show_seconds {
        "%Y-%m-%d %H:%M:%S"
    } else {
        "%Y-%m-%d %H:%M"
    };
    Arc::new(move |value, axis| match axis {
        LabelAxis::Horizontal => {
            unix_seconds_to_datetime(value).map(|time| time.format(pattern).to_string())
        }
        LabelAxis::Vertical => None,
    })
}

#[cfg(test)]
mod tests {
    use super::{
        adaptive_fraction_digits, format_axis_decimal, format_readout_value,
        utc_date_time_formatter,
    };
    use crate::api::{AxisLabelLocale, LabelAxis};

    #[test]
    fn digits_follow_span_magnitude() {
        assert_eq!(adaptive_fraction_digits(0.05), 6);
        assert_eq!(adaptive_fraction_digits(0.5), 4);
        assert_eq!(adaptive_fraction_digits(19.0), 3);
        assert_eq!(adaptive_fraction_digits(99.0), 1);
        assert_eq!(adaptive_fraction_digits(100.0), 0);
    }

    #[test]
    fn decimal_groups_and_trims_per_locale() {
        assert_eq!(format_axis_decimal(1234.5, 1, AxisLabelLocale::EnUs), "1,234.5");
        assert_eq!(format_axis_decimal(1234.5, 1, AxisLabelLocale::EsEs), "1.234,5");
        assert_eq!(format_axis_decimal(2.0, 3, AxisLabelLocale::EnUs), "2");
        assert_eq!(format_axis_decimal(-1_000_000.0, 0, AxisLabelLocale::EnUs), "-1,000,000");
        assert_eq!(format_axis_decimal(-0.0001, 1, AxisLabelLocale::EnUs), "0");
    }

    #[test]
    fn readout_uses_two_decimals() {
        assert_eq!(format_readout_value(3.5), "3.50");
    }

    #[test]
    fn utc_formatter_only_formats_horizontal_axis() {
        let formatter = utc_date_time_formatter(false);
        assert_eq!(
            formatter(0.0, LabelAxis::Horizontal).as_deref(),
            Some("1970-01-01 00:00")
        );
        assert_eq!(formatter(0.0, LabelAxis::Vertical), None);
    }
}
