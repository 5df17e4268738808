//! Stable orderings used by the listing operations.
//!
//! `slice::sort_by` is stable, so rows with equal keys keep their input order.

use crate::domain::quote::{PriceField, PriceQuote};
use crate::domain::returns::AnnualizedReturn;

/// Ascending by the chosen price field.
pub fn sort_by_price(quotes: &mut [PriceQuote], field: PriceField) {
    quotes.sort_by(|a, b| field.value(a).total_cmp(&field.value(b)));
}

/// Descending by annualized return.
pub fn sort_by_annualized_return(returns: &mut [AnnualizedReturn]) {
    returns.sort_by(|a, b| b.annualized_return.total_cmp(&a.annualized_return));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn quote(symbol: &str, open: f64, close: f64) -> PriceQuote {
        PriceQuote {
            symbol: symbol.into(),
            date: NaiveDate::from_ymd_opt(2021, 3, 10).unwrap(),
            open,
            high: open.max(close),
            low: open.min(close),
            close,
        }
    }

    fn ret(symbol: &str, annualized: f64) -> AnnualizedReturn {
        AnnualizedReturn {
            symbol: symbol.into(),
            simple_return: annualized,
            annualized_return: annualized,
        }
    }

    fn symbols_of(quotes: &[PriceQuote]) -> Vec<&str> {
        quotes.iter().map(|q| q.symbol.as_str()).collect()
    }

    #[test]
    fn ascending_by_close() {
        let mut quotes = vec![
            quote("A", 1.0, 30.0),
            quote("B", 2.0, 10.0),
            quote("C", 3.0, 20.0),
        ];
        sort_by_price(&mut quotes, PriceField::Close);
        assert_eq!(symbols_of(&quotes), vec!["B", "C", "A"]);
    }

    #[test]
    fn ascending_by_open() {
        let mut quotes = vec![
            quote("A", 3.0, 10.0),
            quote("B", 1.0, 30.0),
            quote("C", 2.0, 20.0),
        ];
        sort_by_price(&mut quotes, PriceField::Open);
        assert_eq!(symbols_of(&quotes), vec!["B", "C", "A"]);
    }

    #[test]
    fn equal_prices_keep_input_order() {
        let mut forward = vec![quote("X", 1.0, 50.0), quote("Y", 1.0, 50.0)];
        sort_by_price(&mut forward, PriceField::Close);
        assert_eq!(symbols_of(&forward), vec!["X", "Y"]);

        let mut reversed = vec![quote("Y", 1.0, 50.0), quote("X", 1.0, 50.0)];
        sort_by_price(&mut reversed, PriceField::Close);
        assert_eq!(symbols_of(&reversed), vec!["Y", "X"]);
    }

    #[test]
    fn returns_descending() {
        let mut returns = vec![ret("A", 0.05), ret("B", 0.20), ret("C", -0.10)];
        sort_by_annualized_return(&mut returns);
        let order: Vec<_> = returns.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
    }

    #[test]
    fn equal_returns_keep_input_order() {
        let mut returns = vec![ret("A", 0.1), ret("B", 0.3), ret("C", 0.1)];
        sort_by_annualized_return(&mut returns);
        let order: Vec<_> = returns.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
    }
}
