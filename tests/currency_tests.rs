use budget_lens::currency::{
    format_milliunits, CurrencyCode, CurrencyDisplay, FormatOptions, LocaleConfig,
    MoneyFormatter, NegativeStyle,
};
use budget_lens::AnalysisConfig;

#[test]
fn formats_currency_with_locale() {
    let mut locale = LocaleConfig::default();
    locale.decimal_separator = ',';
    locale.grouping_separator = ' ';
    let options = FormatOptions {
        currency_display: CurrencyDisplay::Symbol,
        negative_style: NegativeStyle::Parentheses,
    };
    let code = CurrencyCode::new("EUR");
    let formatted = format_milliunits(-1_234_500, &code, &locale, &options);
    assert_eq!(formatted, "€ (1 234,50)");
}

#[test]
fn symbol_and_code_display() {
    let options = FormatOptions {
        currency_display: CurrencyDisplay::SymbolAndCode,
        negative_style: NegativeStyle::Sign,
    };
    let formatted = format_milliunits(
        987_654_321,
        &CurrencyCode::new("GBP"),
        &LocaleConfig::default(),
        &options,
    );
    assert_eq!(formatted, "£987,654.32 (GBP)");
}

#[test]
fn formatter_follows_analysis_config() {
    let mut config = AnalysisConfig::default();
    config.currency = "JPY".into();
    let formatter = MoneyFormatter::from_config(&config);

    assert_eq!(formatter.format(1_499), "¥1");
    assert_eq!(formatter.format(1_500), "¥2");
    assert_eq!(formatter.format(-1_500), "-¥2");
}
