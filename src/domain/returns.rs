//! Simple and annualized return calculation.

use crate::domain::error::AnalyzerError;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualizedReturn {
    pub symbol: String,
    pub simple_return: f64,
    pub annualized_return: f64,
}

/// `(current - purchase) / purchase`
pub fn simple_return(
    symbol: &str,
    purchase_price: f64,
    current_price: f64,
) -> Result<f64, AnalyzerError> {
    if !purchase_price.is_finite() || purchase_price <= 0.0 {
        return Err(AnalyzerError::InvalidPrice {
            symbol: symbol.to_string(),
            price: purchase_price,
        });
    }
    if !current_price.is_finite() || current_price < 0.0 {
        return Err(AnalyzerError::InvalidPrice {
            symbol: symbol.to_string(),
            price: current_price,
        });
    }
    Ok((current_price - purchase_price) / purchase_price)
}

/// `(1 + simple)^years - 1`. A one-year holding period returns `simple`
/// unchanged.
pub fn annualize(simple: f64, years: u32) -> Result<f64, AnalyzerError> {
    match years {
        0 => Err(AnalyzerError::InvalidHoldingPeriod { years }),
        1 => Ok(simple),
        n => {
            let exponent = i32::try_from(n)
                .map_err(|_| AnalyzerError::InvalidHoldingPeriod { years })?;
            Ok((1.0 + simple).powi(exponent) - 1.0)
        }
    }
}

impl AnnualizedReturn {
    pub fn compute(
        symbol: &str,
        purchase_price: f64,
        current_price: f64,
        years: u32,
    ) -> Result<Self, AnalyzerError> {
        let simple = simple_return(symbol, purchase_price, current_price)?;
        let annualized = annualize(simple, years)?;
        Ok(Self {
            symbol: symbol.to_string(),
            simple_return: simple,
            annualized_return: annualized,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn ten_percent_gain_over_one_year() {
        let r = AnnualizedReturn::compute("AAPL", 100.0, 110.0, 1).unwrap();
        assert_relative_eq!(r.simple_return, 0.10);
        assert_relative_eq!(r.annualized_return, 0.10);
        assert_eq!(r.symbol, "AAPL");
    }

    #[test]
    fn loss_is_negative() {
        let r = AnnualizedReturn::compute("MSFT", 200.0, 150.0, 1).unwrap();
        assert_relative_eq!(r.simple_return, -0.25);
        assert_relative_eq!(r.annualized_return, -0.25);
    }

    #[test]
    fn multi_year_compounds() {
        // (1 + 0.1)^2 - 1 = 0.21
        let r = AnnualizedReturn::compute("GOOG", 100.0, 110.0, 2).unwrap();
        assert_relative_eq!(r.simple_return, 0.10);
        assert_relative_eq!(r.annualized_return, 0.21, epsilon = 1e-12);
    }

    #[test]
    fn total_loss_is_minus_one() {
        let r = AnnualizedReturn::compute("XYZ", 50.0, 0.0, 1).unwrap();
        assert_relative_eq!(r.simple_return, -1.0);
    }

    #[test]
    fn zero_purchase_price_is_invalid() {
        let err = AnnualizedReturn::compute("AAPL", 0.0, 110.0, 1).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidPrice { price, .. } if price == 0.0));
    }

    #[test]
    fn negative_and_nan_prices_are_invalid() {
        assert!(matches!(
            simple_return("AAPL", -1.0, 10.0),
            Err(AnalyzerError::InvalidPrice { .. })
        ));
        assert!(matches!(
            simple_return("AAPL", f64::NAN, 10.0),
            Err(AnalyzerError::InvalidPrice { .. })
        ));
        assert!(matches!(
            simple_return("AAPL", 10.0, f64::INFINITY),
            Err(AnalyzerError::InvalidPrice { .. })
        ));
        assert!(matches!(
            simple_return("AAPL", 10.0, -5.0),
            Err(AnalyzerError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn zero_years_is_invalid() {
        assert!(matches!(
            annualize(0.1, 0),
            Err(AnalyzerError::InvalidHoldingPeriod { years: 0 })
        ));
    }

    proptest! {
        #[test]
        fn one_year_annualized_equals_simple(
            purchase in 0.01f64..1e6,
            current in 0.01f64..1e6,
        ) {
            let r = AnnualizedReturn::compute("P", purchase, current, 1).unwrap();
            prop_assert_eq!(r.annualized_return, r.simple_return);
        }

        #[test]
        fn results_are_finite(
            purchase in 0.01f64..1e6,
            current in 0.0f64..1e6,
            years in 1u32..10,
        ) {
            let r = AnnualizedReturn::compute("P", purchase, current, years).unwrap();
            prop_assert!(r.simple_return.is_finite());
            prop_assert!(r.annualized_return.is_finite());
        }
    }
}
