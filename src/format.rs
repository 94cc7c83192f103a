//! Locale-aware formatting of the currency totals and dates printed on a report.

use chrono::{Datelike, NaiveDate};

/// Formats the locale-dependent strings of a report. Injected into the
/// renderer so that output never depends on process-wide locale state.
pub trait Formatter {
    /// A currency amount with thousands separators and exactly two decimals
    fn currency(&self, amount: f64) -> String;

    /// A long-form date, e.g. "October 19, 2026"
    fn long_date(&self, date: NaiveDate) -> String;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum DateOrder {
    /// "October 19, 2026"
    MonthDayYear,
    /// "19 de octubre de 2026"
    DayMonthYear,
}

/// A table-driven [Formatter]
#[derive(Clone, Debug, PartialEq)]
pub struct LocaleFormatter {
    pub currency_symbol: String,
    pub thousands_separator: char,
    pub decimal_separator: char,
    months: [&'static str; 12],
    date_order: DateOrder,
}

impl LocaleFormatter {
    pub fn en_us() -> LocaleFormatter {
        LocaleFormatter {
            currency_symbol: "$".into(),
            thousands_separator: ',',
            decimal_separator: '.',
            months: [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ],
            date_order: DateOrder::MonthDayYear,
        }
    }

    pub fn es_mx() -> LocaleFormatter {
        LocaleFormatter {
            currency_symbol: "$".into(),
            thousands_separator: ',',
            decimal_separator: '.',
            months: [
                "enero",
                "febrero",
                "marzo",
                "abril",
                "mayo",
                "junio",
                "julio",
                "agosto",
                "septiembre",
                "octubre",
                "noviembre",
                "diciembre",
            ],
            date_order: DateOrder::DayMonthYear,
        }
    }

    /// `amount` rounded to two decimals, grouped in thousands
    pub fn number(&self, amount: f64) -> String {
        let cents = (amount.abs() * 100.0).round() as u128;
        let whole = (cents / 100).to_string();
        let fraction = cents % 100;

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(self.thousands_separator);
            }
            grouped.push(digit);
        }

        let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
        format!("{sign}{grouped}{}{fraction:02}", self.decimal_separator)
    }
}

impl Default for LocaleFormatter {
    fn default() -> Self {
        LocaleFormatter::en_us()
    }
}

impl Formatter for LocaleFormatter {
    fn currency(&self, amount: f64) -> String {
        let number = self.number(amount);
        match number.strip_prefix('-') {
            Some(positive) => format!("-{}{positive}", self.currency_symbol),
            None => format!("{}{number}", self.currency_symbol),
        }
    }

    fn long_date(&self, date: NaiveDate) -> String {
        let month = self.months[date.month0() as usize];
        match self.date_order {
            DateOrder::MonthDayYear => format!("{month} {}, {}", date.day(), date.year()),
            DateOrder::DayMonthYear => format!("{} de {month} de {}", date.day(), date.year()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_is_grouped_with_two_decimals() {
        let f = LocaleFormatter::en_us();
        assert_eq!(f.currency(0.0), "$0.00");
        assert_eq!(f.currency(999.5), "$999.50");
        assert_eq!(f.currency(1000.0), "$1,000.00");
        assert_eq!(f.currency(1234567.891), "$1,234,567.89");
        assert_eq!(f.currency(-2500.125), "-$2,500.13");
    }

    #[test]
    fn separators_follow_the_locale() {
        let f = LocaleFormatter {
            thousands_separator: '.',
            decimal_separator: ',',
            ..LocaleFormatter::es_mx()
        };
        assert_eq!(f.number(1234.5), "1.234,50");
    }

    #[test]
    fn long_dates() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date");
        assert_eq!(LocaleFormatter::en_us().long_date(date), "October 19, 2026");
        assert_eq!(LocaleFormatter::es_mx().long_date(date), "19 de octubre de 2026");
    }
}
