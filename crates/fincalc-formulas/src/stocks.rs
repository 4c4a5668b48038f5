//! Stock valuation: one- and two-period prices, total return and the
//! dividend discount models.

use fincalc_core::{ensure_finite, FinanceError, FinanceResult};

use crate::guards::{compound, exceeds_growth, fraction, non_empty, positive};

/// Price today of a stock held for one year, `(div1 + P1) / (1 + re)`.
pub fn one_year_stock_price(dividend_1: f64, price_1: f64, equity_cost: f64) -> FinanceResult<f64> {
    const NAME: &str = "one_year_stock_price";
    positive(NAME, "equity_cost", equity_cost)?;
    ensure_finite(NAME, (dividend_1 + price_1) / (1.0 + equity_cost))
}

/// Total return, dividend yield plus capital gain rate.
pub fn total_return(dividend_1: f64, price_0: f64, price_1: f64) -> FinanceResult<f64> {
    const NAME: &str = "total_return";
    positive(NAME, "price_0", price_0)?;
    ensure_finite(NAME, dividend_1 / price_0 + (price_1 - price_0) / price_0)
}

/// Price today of a stock held for two years,
/// `div1 / (1 + re) + (div2 + P2) / (1 + re)^2`.
pub fn multi_year_stock_price(
    dividend_1: f64,
    dividend_2: f64,
    price_2: f64,
    equity_cost: f64,
) -> FinanceResult<f64> {
    const NAME: &str = "multi_year_stock_price";
    positive(NAME, "equity_cost", equity_cost)?;
    let growth = 1.0 + equity_cost;
    ensure_finite(
        NAME,
        dividend_1 / growth + (dividend_2 + price_2) / (growth * growth),
    )
}

/// Present value of explicit dividends, `Σ div_t / (1 + re)^t` for
/// `t = 1..=N`.
///
/// # Example
///
/// ```rust
/// use fincalc_formulas::stocks::dividend_discount_model;
///
/// let value = dividend_discount_model(&[1.10, 1.21], 0.10).unwrap();
/// assert!((value - 2.0).abs() < 1e-12);
/// ```
pub fn dividend_discount_model(dividends: &[f64], equity_cost: f64) -> FinanceResult<f64> {
    const NAME: &str = "dividend_discount_model";
    positive(NAME, "equity_cost", equity_cost)?;
    check_dividends(NAME, dividends)?;
    let pv = discount_dividends(NAME, dividends, equity_cost)?;
    ensure_finite(NAME, pv)
}

/// Gordon growth model, `div1 / (re - g)`.
pub fn constant_growth_ddm(dividend_1: f64, equity_cost: f64, growth_rate: f64) -> FinanceResult<f64> {
    const NAME: &str = "constant_growth_ddm";
    exceeds_growth(NAME, equity_cost, growth_rate)?;
    ensure_finite(NAME, dividend_1 / (equity_cost - growth_rate))
}

/// Dividend per share, `E * payout_rate / shares`.
pub fn dividend_per_share(
    earnings: f64,
    shares_outstanding: f64,
    payout_rate: f64,
) -> FinanceResult<f64> {
    const NAME: &str = "dividend_per_share";
    positive(NAME, "shares_outstanding", shares_outstanding)?;
    fraction(NAME, "payout_rate", payout_rate)?;
    ensure_finite(NAME, earnings * payout_rate / shares_outstanding)
}

/// Explicit dividends followed by a growing perpetuity.
///
/// The terminal value `div_N * (1 + g) / (re - g)` is priced at year `N` and
/// discounted with the last dividend.
pub fn ddm_terminal_growth(
    dividends: &[f64],
    equity_cost: f64,
    growth_rate: f64,
) -> FinanceResult<f64> {
    const NAME: &str = "ddm_terminal_growth";
    positive(NAME, "equity_cost", equity_cost)?;
    exceeds_growth(NAME, equity_cost, growth_rate)?;
    check_dividends(NAME, dividends)?;

    let explicit = discount_dividends(NAME, dividends, equity_cost)?;
    let horizon = dividends.len();
    let last = dividends[horizon - 1];
    let terminal = last * (1.0 + growth_rate) / (equity_cost - growth_rate);
    let factor = compound(NAME, equity_cost, horizon as f64)?;

    ensure_finite(NAME, explicit + terminal / factor)
}

fn check_dividends(formula: &str, dividends: &[f64]) -> FinanceResult<()> {
    non_empty(formula, "dividends", dividends)?;
    match dividends.iter().position(|d| !(*d >= 0.0)) {
        Some(year) => Err(FinanceError::domain(
            formula,
            format!(
                "dividend for year {} cannot be negative, got {}",
                year + 1,
                dividends[year]
            ),
        )),
        None => Ok(()),
    }
}

fn discount_dividends(formula: &str, dividends: &[f64], equity_cost: f64) -> FinanceResult<f64> {
    let mut total = 0.0;
    for (year, dividend) in (1u32..).zip(dividends) {
        total += dividend / compound(formula, equity_cost, f64::from(year))?;
    }
    Ok(total)
}
