//! Rendering of counter/total values: plain, locale-grouped, or binary bytes.

use serde::{Deserialize, Serialize};

use super::locale::NumberLocale;

/// What a counted item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressUnit {
    /// Dimensionless items.
    #[default]
    None,
    /// Bytes, rendered as binary multiples (KiB, MiB, ...).
    Byte,
}

const BYTE_UNITS: [&str; 9] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB"];

/// Format `value` for display.
///
/// Byte values are divided by 1024 until below 1024 or YiB is reached and are
/// printed with exactly two fractional digits once scaled (`1.95 KiB`), none
/// otherwise (`1000 B`). With a locale, digits are grouped per its convention.
pub fn format_value(value: u64, locale: Option<&NumberLocale>, unit: ProgressUnit) -> String {
    let (plain, suffix) = match unit {
        ProgressUnit::None => (value.to_string(), None),
        ProgressUnit::Byte => {
            let (plain, step) = scale_bytes(value);
            (plain, Some(BYTE_UNITS[step]))
        }
    };
    let mut out = match locale {
        Some(locale) => locale.localize(&plain),
        None => plain,
    };
    if let Some(suffix) = suffix {
        out.push(' ');
        out.push_str(suffix);
    }
    out
}

/// Returns the plain ASCII number and the index into `BYTE_UNITS`.
fn scale_bytes(value: u64) -> (String, usize) {
    if value < 1024 {
        return (value.to_string(), 0);
    }
    let mut scaled = value as f64;
    let mut step = 0;
    while scaled >= 1024.0 && step < BYTE_UNITS.len() - 1 {
        scaled /= 1024.0;
        step += 1;
    }
    // Round half away from zero first, then fix the digit count.
    let rounded = (scaled * 100.0).round() / 100.0;
    (format!("{rounded:.2}"), step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_values_have_no_grouping() {
        assert_eq!(format_value(0, None, ProgressUnit::None), "0");
        assert_eq!(format_value(1000, None, ProgressUnit::None), "1000");
        assert_eq!(
            format_value(u64::MAX, None, ProgressUnit::None),
            "18446744073709551615"
        );
    }

    #[test]
    fn locale_groups_plain_values() {
        let de = NumberLocale::parse("de-DE");
        assert_eq!(format_value(1000, Some(&de), ProgressUnit::None), "1.000");
        assert_eq!(format_value(12, Some(&de), ProgressUnit::None), "12");
    }

    #[test]
    fn bytes_below_one_kib_stay_integral() {
        assert_eq!(format_value(0, None, ProgressUnit::Byte), "0 B");
        assert_eq!(format_value(1000, None, ProgressUnit::Byte), "1000 B");
        assert_eq!(format_value(1023, None, ProgressUnit::Byte), "1023 B");
    }

    #[test]
    fn bytes_scale_with_two_decimals() {
        assert_eq!(format_value(1024, None, ProgressUnit::Byte), "1.00 KiB");
        assert_eq!(format_value(2000, None, ProgressUnit::Byte), "1.95 KiB");
        assert_eq!(format_value(2400, None, ProgressUnit::Byte), "2.34 KiB");
        assert_eq!(format_value(1_048_576, None, ProgressUnit::Byte), "1.00 MiB");
        assert_eq!(format_value(2_000_000, None, ProgressUnit::Byte), "1.91 MiB");
        assert_eq!(format_value(1 << 40, None, ProgressUnit::Byte), "1.00 TiB");
        assert_eq!(format_value(u64::MAX, None, ProgressUnit::Byte), "16.00 EiB");
    }

    #[test]
    fn just_below_next_unit_rounds_up_in_place() {
        // 1023.999 KiB rounds to 1024.00 KiB rather than switching to MiB.
        assert_eq!(
            format_value(1_048_575, None, ProgressUnit::Byte),
            "1024.00 KiB"
        );
    }

    #[test]
    fn bytes_with_locale() {
        let de = NumberLocale::parse("de-DE");
        assert_eq!(format_value(1000, Some(&de), ProgressUnit::Byte), "1.000 B");
        assert_eq!(format_value(2400, Some(&de), ProgressUnit::Byte), "2,34 KiB");
        assert_eq!(
            format_value(1_048_575, Some(&de), ProgressUnit::Byte),
            "1.024,00 KiB"
        );
    }

    #[test]
    fn unit_parses_lowercase() {
        #[derive(Deserialize)]
        struct Wrap {
            unit: ProgressUnit,
        }
        let w: Wrap = toml::from_str("unit = \"byte\"").unwrap();
        assert_eq!(w.unit, ProgressUnit::Byte);
        let w: Wrap = toml::from_str("unit = \"none\"").unwrap();
        assert_eq!(w.unit, ProgressUnit::None);
    }
}
