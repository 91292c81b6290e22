//! Currency presentation for the supported locales.
//!
//! TrackServ stores money as integer cents; these helpers render it for
//! the provider's currency and language. The supported sets mirror the
//! profile options: eight Latin-America-centric currencies and three
//! languages.

use crate::error::{CoreError, CoreResult};

/// ISO 4217 codes offered in the profile settings.
pub const SUPPORTED_CURRENCIES: [&str; 8] =
    ["USD", "EUR", "MXN", "COP", "ARS", "BRL", "CLP", "PEN"];

/// Languages offered in the profile settings.
pub const SUPPORTED_LANGUAGES: [&str; 3] = ["pt", "es", "en"];

pub fn is_supported_currency(code: &str) -> bool {
    SUPPORTED_CURRENCIES.contains(&code)
}

pub fn is_supported_language(code: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&code)
}

pub fn symbol_for(code: &str) -> &'static str {
    match code {
        "USD" | "MXN" | "COP" | "ARS" | "CLP" => "$",
        "EUR" => "€",
        "BRL" => "R$",
        "PEN" => "S/",
        _ => "",
    }
}

/// Number of minor-unit digits shown for a currency.
pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "CLP" => 0,
        _ => 2,
    }
}

/// Digit separators per language: pt/es group with `.` and use `,` as the
/// decimal mark; en is the inverse.
fn separators_for(language: &str) -> (char, char) {
    match language {
        "en" => ('.', ','),
        _ => (',', '.'),
    }
}

/// Renders `cents` as a localized currency string, e.g. `R$ 1.234,50`.
pub fn format_cents(cents: i64, currency_code: &str, language_code: &str) -> CoreResult<String> {
    if !is_supported_currency(currency_code) {
        return Err(CoreError::Validation(format!(
            "unsupported currency `{currency_code}`"
        )));
    }
    if !is_supported_language(language_code) {
        return Err(CoreError::Validation(format!(
            "unsupported language `{language_code}`"
        )));
    }

    let (decimal, grouping) = separators_for(language_code);
    let precision = minor_units_for(currency_code);
    let negative = cents < 0;
    let magnitude = cents.unsigned_abs();

    let divisor = 10u64.pow(precision as u32);
    let whole = magnitude / divisor;
    let fraction = magnitude % divisor;

    let mut body = group_digits(whole, grouping);
    if precision > 0 {
        body.push(decimal);
        body.push_str(&format!("{:0width$}", fraction, width = precision as usize));
    }

    let sign = if negative { "-" } else { "" };
    Ok(format!("{}{} {}", sign, symbol_for(currency_code), body))
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}
