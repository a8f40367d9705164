//! Numeric conventions (group separator, decimal mark) per locale identifier.
//!
//! Only digit grouping is localized; digits stay ASCII. Values follow CLDR's
//! `latn` number symbols for the locales listed here. Anything else falls back
//! to the root convention.

/// Group separator, decimal mark and minimum grouping digits for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberLocale {
    tag: String,
    group: &'static str,
    decimal: &'static str,
    /// Number of digits that must precede the first group before grouping
    /// kicks in (2 for e.g. Spanish: `1000` but `10.000`).
    min_grouping: usize,
}

const NBSP: &str = "\u{00A0}";
const NNBSP: &str = "\u{202F}";

type Symbols = (&'static str, &'static str, usize);

const ROOT: Symbols = (",", ".", 1);

fn region_symbols(language: &str, region: &str) -> Option<Symbols> {
    let symbols = match (language, region) {
        ("de", "CH") | ("de", "LI") | ("it", "CH") => ("\u{2019}", ".", 1),
        ("de", "AT") => (NBSP, ",", 1),
        ("fr", "CH") => (NNBSP, ",", 1),
        ("fr", "CA") => (NBSP, ",", 1),
        ("pt", "PT") => (NBSP, ",", 2),
        ("en", "ZA") => (NBSP, ",", 1),
        ("es", "MX") | ("es", "US") | ("es", "419") => (",", ".", 1),
        _ => return None,
    };
    Some(symbols)
}

fn language_symbols(language: &str) -> Option<Symbols> {
    let symbols = match language {
        "en" | "ja" | "zh" | "ko" | "th" | "he" | "ga" | "ms" | "fil" => (",", ".", 1),
        "de" | "nl" | "it" | "da" | "id" | "tr" | "el" | "ro" | "hr" | "sl" | "sr"
        | "vi" => (".", ",", 1),
        "pt" => (".", ",", 1),
        "es" => (".", ",", 2),
        "pl" => (NBSP, ",", 2),
        "fr" => (NNBSP, ",", 1),
        "ru" | "uk" | "cs" | "sk" | "fi" | "sv" | "nb" | "no" | "nn" | "hu" | "bg"
        | "lt" | "lv" | "et" => (NBSP, ",", 1),
        _ => return None,
    };
    Some(symbols)
}

impl NumberLocale {
    /// Parse identifiers such as `de-DE`, `de_DE`, `de`, `de_DE.UTF-8` or
    /// `sr_RS@latin`. Unknown identifiers get the root convention.
    pub fn parse(id: &str) -> Self {
        let base = id
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .trim();
        let mut parts = base.split(['-', '_']);
        let language = parts.next().unwrap_or_default().to_ascii_lowercase();
        // Skip a script subtag (`sr-Latn-RS`) when looking for the region.
        let region = parts
            .find(|p| p.len() == 2 || (p.len() == 3 && p.bytes().all(|b| b.is_ascii_digit())))
            .map(|p| p.to_ascii_uppercase());

        let symbols = region
            .as_deref()
            .and_then(|r| region_symbols(&language, r))
            .or_else(|| language_symbols(&language));
        let (group, decimal, min_grouping) = match symbols {
            Some(s) => s,
            None => {
                tracing::debug!(locale = id, "unknown locale, using root number format");
                ROOT
            }
        };

        Self {
            tag: id.to_string(),
            group,
            decimal,
            min_grouping,
        }
    }

    /// The identifier this locale was parsed from.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn group_separator(&self) -> &str {
        self.group
    }

    pub fn decimal_mark(&self) -> &str {
        self.decimal
    }

    /// Localize a plain ASCII number (`1234.5` form, no sign).
    pub fn localize(&self, plain: &str) -> String {
        let (int_part, frac_part) = match plain.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (plain, None),
        };
        let mut out = self.group_digits(int_part);
        if let Some(frac) = frac_part {
            out.push_str(self.decimal);
            out.push_str(frac);
        }
        out
    }

    fn group_digits(&self, digits: &str) -> String {
        if digits.len() < 3 + self.min_grouping {
            return digits.to_string();
        }
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 * self.group.len());
        let lead = digits.len() % 3;
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (i + 3 - lead) % 3 == 0 {
                out.push_str(self.group);
            }
            out.push(ch);
        }
        out
    }
}
