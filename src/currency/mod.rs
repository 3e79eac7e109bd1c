use lens_config::AnalysisConfig;
use lens_domain::{div_round_half_away, Milliunits, MILLIUNITS_PER_UNIT};
use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

/// Locale-aware number separators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language_tag: "en-US".into(),
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }
}

impl LocaleConfig {
    /// Separators for a BCP 47 tag. Unknown tags use the `en-US` separators.
    pub fn from_tag(tag: &str) -> Self {
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let (decimal_separator, grouping_separator) = match language.as_str() {
            "de" | "es" | "it" | "nl" | "pt" | "da" => (',', '.'),
            "fr" | "sv" | "nb" | "fi" | "pl" | "cs" => (',', ' '),
            _ => ('.', ','),
        };
        Self {
            language_tag: tag.to_string(),
            decimal_separator,
            grouping_separator,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FormatOptions {
    pub currency_display: CurrencyDisplay,
    pub negative_style: NegativeStyle,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum NegativeStyle {
    #[default]
    Sign,
    Parentheses,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CurrencyDisplay {
    #[default]
    Symbol,
    Code,
    SymbolAndCode,
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "AUD" => "A$".into(),
        "CAD" => "CA$".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" | "KRW" => 0,
        "KWD" | "BHD" | "TND" => 3,
        _ => 2,
    }
}

/// Formats an amount in milliunits using the currency's minor units.
///
/// Milliunits are rounded half away from zero to the minor unit with integer math,
/// so `1_234_567` USD renders as `$1,234.57`.
pub fn format_milliunits(
    amount: Milliunits,
    code: &CurrencyCode,
    locale: &LocaleConfig,
    options: &FormatOptions,
) -> String {
    let precision = u32::from(minor_units_for(code.as_str()).min(3));
    let minor_per_unit = 10i64.pow(precision);
    let divisor = MILLIUNITS_PER_UNIT / minor_per_unit;
    let minor = div_round_half_away(amount, divisor).unwrap_or(amount);

    let magnitude = minor.unsigned_abs();
    let whole = magnitude / minor_per_unit.unsigned_abs();
    let fraction = magnitude % minor_per_unit.unsigned_abs();

    let mut body = group_digits(&whole.to_string(), locale.grouping_separator);
    if precision > 0 {
        body.push(locale.decimal_separator);
        body.push_str(&format!("{:0width$}", fraction, width = precision as usize));
    }

    let negative = minor < 0;
    let symbol = symbol_for(code.as_str());
    match (options.negative_style, negative) {
        (NegativeStyle::Parentheses, true) => {
            let body = format!("({body})");
            decorate(&symbol, code, &format!(" {body}"), &body, options)
        }
        (NegativeStyle::Sign, true) => {
            format!("-{}", decorate(&symbol, code, &body, &body, options))
        }
        (_, false) => decorate(&symbol, code, &body, &body, options),
    }
}

fn decorate(
    symbol: &str,
    code: &CurrencyCode,
    after_symbol: &str,
    body: &str,
    options: &FormatOptions,
) -> String {
    match options.currency_display {
        CurrencyDisplay::Symbol => format!("{symbol}{after_symbol}"),
        CurrencyDisplay::Code => format!("{} {}", code.as_str(), body),
        CurrencyDisplay::SymbolAndCode => {
            format!("{symbol}{after_symbol} ({})", code.as_str())
        }
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index != 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Formatter bound to the currency and locale of an [`AnalysisConfig`].
#[derive(Debug, Clone, Default)]
pub struct MoneyFormatter {
    code: CurrencyCode,
    locale: LocaleConfig,
    options: FormatOptions,
}

impl MoneyFormatter {
    pub fn new(code: CurrencyCode, locale: LocaleConfig, options: FormatOptions) -> Self {
        Self {
            code,
            locale,
            options,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(
            CurrencyCode::new(config.currency.as_str()),
            LocaleConfig::from_tag(&config.locale),
            FormatOptions::default(),
        )
    }

    pub fn format(&self, amount: Milliunits) -> String {
        format_milliunits(amount, &self.code, &self.locale, &self.options)
    }

    /// Formats an optional amount, rendering `None` as `n/a`.
    pub fn format_optional(&self, amount: Option<Milliunits>) -> String {
        amount.map_or_else(|| "n/a".to_string(), |value| self.format(value))
    }
}
