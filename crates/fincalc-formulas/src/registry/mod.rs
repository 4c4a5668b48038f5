//! Formula registry.
//!
//! Every closed-form formula is listed in a static catalog keyed by
//! [`FormulaId`]. [`evaluate`] binds a [`Params`] map against the formula's
//! declared parameters and calls the typed function.
//!
//! IRR is not in the catalog: its outcome is not a single number. Call
//! [`crate::capital_budgeting::irr`] directly.
//!
//! # Example
//!
//! ```rust
//! use fincalc_formulas::registry::{evaluate, FormulaId, Params};
//!
//! let id: FormulaId = "enterprise_value".parse().unwrap();
//! let params = Params::new()
//!     .with("equity", 500.0)
//!     .with("debt", 200.0)
//!     .with("cash", 50.0);
//!
//! assert_eq!(evaluate(id, &params).unwrap(), 650.0);
//! ```

mod params;

pub use params::Params;

use std::fmt;
use std::str::FromStr;

use fincalc_core::{FinanceError, FinanceResult, ParamKind, ParamSpec};
use log::trace;
use serde::Serialize;

use crate::{annuities, bonds, capital_budgeting, firm, options, rates, stocks, time_value};
use params::Bound;

/// Formula grouping, as the calculators present them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Discounting and compounding.
    TimeValue,
    /// Perpetuities and annuities.
    Annuities,
    /// Rate conversions.
    InterestRates,
    /// Bond prices and yields.
    Bonds,
    /// Stock prices and dividend models.
    Stocks,
    /// Enterprise value and cash flow.
    Firm,
    /// Option payoffs.
    Options,
    /// Multi-stage dividend models.
    Advanced,
    /// NPV, payback and IRR.
    CapitalBudgeting,
}

impl Category {
    /// All categories in display order.
    #[must_use]
    pub fn all() -> &'static [Category] {
        &[
            Self::TimeValue,
            Self::Annuities,
            Self::InterestRates,
            Self::Bonds,
            Self::Stocks,
            Self::Firm,
            Self::Options,
            Self::Advanced,
            Self::CapitalBudgeting,
        ]
    }

    /// Display title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::TimeValue => "Time Value of Money",
            Self::Annuities => "Annuities",
            Self::InterestRates => "Interest Rates",
            Self::Bonds => "Bonds",
            Self::Stocks => "Stock Valuation",
            Self::Firm => "Firm Valuation",
            Self::Options => "Options",
            Self::Advanced => "Advanced Models",
            Self::CapitalBudgeting => "Capital Budgeting",
        }
    }

    /// Machine name, accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TimeValue => "time_value",
            Self::Annuities => "annuities",
            Self::InterestRates => "interest_rates",
            Self::Bonds => "bonds",
            Self::Stocks => "stocks",
            Self::Firm => "firm",
            Self::Options => "options",
            Self::Advanced => "advanced",
            Self::CapitalBudgeting => "capital_budgeting",
        }
    }

    /// Decimal places used when displaying results.
    ///
    /// Money-valued groups show cents; rate-valued groups show four places.
    #[must_use]
    pub fn precision(self) -> usize {
        match self {
            Self::TimeValue | Self::Annuities | Self::Firm | Self::Options => 2,
            Self::InterestRates
            | Self::Bonds
            | Self::Stocks
            | Self::Advanced
            | Self::CapitalBudgeting => 4,
        }
    }

    /// Formulas in this category, in catalog order.
    pub fn formulas(self) -> impl Iterator<Item = FormulaId> {
        FormulaId::all()
            .iter()
            .copied()
            .filter(move |id| id.category() == self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == key || normalize(c.title()) == key)
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

/// Identifier of a catalog formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaId {
    /// `1 / (1 + r)^t`
    DiscountFactor,
    /// `PV * (1 + r)^t`
    FutureValue,
    /// `FV / (1 + r)^t`
    PresentValue,
    /// Flat amount received every period `0..=N`.
    PvCashflowStream,
    /// `C / r`
    PvPerpetuity,
    /// Ordinary annuity present value.
    PvAnnuity,
    /// Annuity future value.
    FvAnnuity,
    /// `C / (r - g)`
    PvPerpetuityGrowth,
    /// Growing annuity present value.
    PvGrowingAnnuity,
    /// `(1 + r)^n - 1`
    EqDiscountPeriodConversion,
    /// `APR / k`
    InterestRatePerPeriod,
    /// `(1 + APR / k)^k - 1`
    AprToEar,
    /// `(1 + real) / (1 + inflation) - 1`
    GrowthInPurchasingPower,
    /// `(real - inflation) / (1 + inflation)`
    RealInterestRate,
    /// `FV * coupon_rate / N`
    CouponPayment,
    /// `FV / (1 + YTM)^N`
    ZeroCouponPrice,
    /// `(FV / P)^(1 / N) - 1`
    YtmZeroCoupon,
    /// Coupon bond price from its yield.
    YtmCouponBond,
    /// `(div1 + P1) / (1 + re)`
    OneYearStockPrice,
    /// Dividend yield plus capital gain rate.
    TotalReturn,
    /// Two-year holding period price.
    MultiYearStockPrice,
    /// Explicit dividends discounted at `re`.
    DividendDiscountModel,
    /// `div1 / (re - g)`
    ConstantGrowthDdm,
    /// `E * payout / shares`
    DividendPerShare,
    /// `equity + debt - cash`
    EnterpriseValue,
    /// Unlevered free cash flow.
    FreeCashflow,
    /// `capex - depreciation`
    NetInvestment,
    /// `max(S - K, 0)`
    CallOptionPayoff,
    /// `max(K - S, 0)`
    PutOptionPayoff,
    /// Explicit dividends plus a growing terminal value.
    DdmTerminalGrowth,
    /// Net present value.
    Npv,
    /// Payback period.
    PaybackPeriod,
    /// Irregular cash flow vector present value.
    PvCashflows,
}

impl FormulaId {
    /// All formulas in catalog order.
    #[must_use]
    pub fn all() -> &'static [FormulaId] {
        use FormulaId::*;
        &[
            DiscountFactor,
            FutureValue,
            PresentValue,
            PvCashflowStream,
            PvPerpetuity,
            PvAnnuity,
            FvAnnuity,
            PvPerpetuityGrowth,
            PvGrowingAnnuity,
            EqDiscountPeriodConversion,
            InterestRatePerPeriod,
            AprToEar,
            GrowthInPurchasingPower,
            RealInterestRate,
            CouponPayment,
            ZeroCouponPrice,
            YtmZeroCoupon,
            YtmCouponBond,
            OneYearStockPrice,
            TotalReturn,
            MultiYearStockPrice,
            DividendDiscountModel,
            ConstantGrowthDdm,
            DividendPerShare,
            EnterpriseValue,
            FreeCashflow,
            NetInvestment,
            CallOptionPayoff,
            PutOptionPayoff,
            DdmTerminalGrowth,
            Npv,
            PaybackPeriod,
            PvCashflows,
        ]
    }

    /// Catalog entry for this formula.
    #[must_use]
    pub fn spec(self) -> &'static FormulaSpec {
        &CATALOG[self as usize]
    }

    /// Machine name, e.g. `"pv_annuity"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.spec().key
    }

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Category.
    #[must_use]
    pub fn category(self) -> Category {
        self.spec().category
    }

    /// Declared parameters, in prompt order.
    #[must_use]
    pub fn params(self) -> &'static [ParamSpec] {
        self.spec().params
    }
}

impl fmt::Display for FormulaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormulaId {
    type Err = FinanceError;

    /// Accepts the machine name in any case, with `-` or spaces for `_`,
    /// plus a few common aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        let alias = match key.as_str() {
            "df" => Some(Self::DiscountFactor),
            "fv" => Some(Self::FutureValue),
            "pv" => Some(Self::PresentValue),
            "ear" => Some(Self::AprToEar),
            "ddm" => Some(Self::DividendDiscountModel),
            "gordon" | "gordon_growth" => Some(Self::ConstantGrowthDdm),
            "ev" => Some(Self::EnterpriseValue),
            "fcf" => Some(Self::FreeCashflow),
            "call" => Some(Self::CallOptionPayoff),
            "put" => Some(Self::PutOptionPayoff),
            "payback" | "pb" => Some(Self::PaybackPeriod),
            _ => None,
        };
        alias
            .or_else(|| Self::all().iter().copied().find(|id| id.as_str() == key))
            .ok_or_else(|| FinanceError::unknown_formula(s))
    }
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Catalog entry describing one formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FormulaSpec {
    /// Identifier.
    pub id: FormulaId,
    #[serde(skip)]
    key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Category.
    pub category: Category,
    /// One-line description of the result.
    pub summary: &'static str,
    /// Declared parameters, in prompt order.
    pub params: &'static [ParamSpec],
}

impl FormulaSpec {
    /// Looks up a declared parameter by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&'static ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }
}

use ParamKind::{Count, Money, MoneySeries, PeriodCount, Rate, Years};

const fn p(name: &'static str, label: &'static str, kind: ParamKind) -> ParamSpec {
    ParamSpec::new(name, label, kind)
}

macro_rules! formula {
    ($id:ident, $key:literal, $name:literal, $category:ident, $summary:literal, $params:expr $(,)?) => {
        FormulaSpec {
            id: FormulaId::$id,
            key: $key,
            name: $name,
            category: Category::$category,
            summary: $summary,
            params: $params,
        }
    };
}

const RATE: ParamSpec = p("rate", "Interest rate", Rate);
const PERIODS: ParamSpec = p("periods", "Number of periods", PeriodCount);
const CASH_FLOW: ParamSpec = p("cash_flow", "Cash flow amount", Money);
const GROWTH: ParamSpec = p("growth_rate", "Growth rate", Rate);
const EQUITY_COST: ParamSpec = p("equity_cost", "Required return rate", Rate);
const APR: ParamSpec = p("apr", "APR", Rate);
const COMPOUNDING: ParamSpec = p(
    "compounding_periods",
    "Number of compounding periods per year",
    PeriodCount,
);
const FACE_VALUE: ParamSpec = p("face_value", "Face value", Money);
const YTM: ParamSpec = p("ytm", "Yield to maturity", Rate);
const INFLATION: ParamSpec = p("inflation_rate", "Inflation rate", Rate);
const REAL_RATE: ParamSpec = p("real_rate", "Real rate", Rate);
const DIVIDEND_1: ParamSpec = p("dividend_1", "Dividend paid in year 1", Money);
const DIVIDENDS: ParamSpec = p("dividends", "Expected dividends", MoneySeries);
const STOCK_PRICE: ParamSpec = p("stock_price", "Current stock price", Money);
const STRIKE: ParamSpec = p("strike_price", "Strike price", Money);
const CAPEX: ParamSpec = p("capex", "Capital expenditure", Money);
const DEPRECIATION: ParamSpec = p("depreciation", "Depreciation", Money);

/// Indexed by `FormulaId as usize`.
static CATALOG: [FormulaSpec; 33] = [
    formula!(
        DiscountFactor,
        "discount_factor",
        "Discount Factor",
        TimeValue,
        "Value today of 1 received at time t",
        &[RATE, p("time", "Time period", Years)],
    ),
    formula!(
        FutureValue,
        "future_value",
        "Future Value",
        TimeValue,
        "Value at time t of an amount invested today",
        &[p("present_value", "Present value", Money), RATE, p("time", "Time period", Years)],
    ),
    formula!(
        PresentValue,
        "present_value",
        "Present Value",
        TimeValue,
        "Value today of an amount received at time t",
        &[p("future_value", "Future value", Money), RATE, p("time", "Time period", Years)],
    ),
    formula!(
        PvCashflowStream,
        "pv_cashflow_stream",
        "PV of Cash Flow Stream",
        TimeValue,
        "One flat amount received in every period 0..=N",
        &[CASH_FLOW, RATE, PERIODS],
    ),
    formula!(
        PvPerpetuity,
        "pv_perpetuity",
        "PV of Perpetuity",
        Annuities,
        "Level payment forever",
        &[CASH_FLOW, RATE],
    ),
    formula!(
        PvAnnuity,
        "pv_annuity",
        "PV of Annuity",
        Annuities,
        "Level payment for N periods, valued today",
        &[CASH_FLOW, RATE, PERIODS],
    ),
    formula!(
        FvAnnuity,
        "fv_annuity",
        "FV of Annuity",
        Annuities,
        "Level payment for N periods, valued at period N",
        &[p("present_value", "Present value", Money), RATE, PERIODS],
    ),
    formula!(
        PvPerpetuityGrowth,
        "pv_perpetuity_growth",
        "PV of Perpetuity with Growth",
        Annuities,
        "Payment growing at g forever",
        &[CASH_FLOW, RATE, GROWTH],
    ),
    formula!(
        PvGrowingAnnuity,
        "pv_growing_annuity",
        "PV of Growing Annuity",
        Annuities,
        "Payment growing at g for N periods",
        &[CASH_FLOW, RATE, GROWTH, PERIODS],
    ),
    formula!(
        EqDiscountPeriodConversion,
        "eq_discount_period_conversion",
        "Equivalent Discount Period Conversion",
        InterestRates,
        "Rate over n periods equivalent to a per-period rate",
        &[RATE, p("periods", "Number of periods", Years)],
    ),
    formula!(
        InterestRatePerPeriod,
        "interest_rate_per_period",
        "Interest Rate per Compounding Period",
        InterestRates,
        "APR divided by compounding periods",
        &[APR, COMPOUNDING],
    ),
    formula!(
        AprToEar,
        "apr_to_ear",
        "APR to EAR",
        InterestRates,
        "Effective annual rate",
        &[APR, COMPOUNDING],
    ),
    formula!(
        GrowthInPurchasingPower,
        "growth_in_purchasing_power",
        "Growth in Purchasing Power",
        InterestRates,
        "Real growth after inflation",
        &[INFLATION, REAL_RATE],
    ),
    formula!(
        RealInterestRate,
        "real_interest_rate",
        "Real Interest Rate",
        InterestRates,
        "Rate net of inflation",
        &[REAL_RATE, INFLATION],
    ),
    formula!(
        CouponPayment,
        "coupon_payment",
        "Coupon Payment",
        Bonds,
        "Coupon paid each period",
        &[
            p("face_value", "Face value of bond", Money),
            p("coupon_rate", "Coupon rate", Rate),
            PERIODS,
        ],
    ),
    formula!(
        ZeroCouponPrice,
        "zero_coupon_price",
        "Zero Coupon Bond Price",
        Bonds,
        "Price of a zero-coupon bond",
        &[FACE_VALUE, YTM, PERIODS],
    ),
    formula!(
        YtmZeroCoupon,
        "ytm_zero_coupon",
        "YTM of Zero Coupon Bond",
        Bonds,
        "Yield implied by a zero-coupon bond price",
        &[FACE_VALUE, p("price", "Price", Money), PERIODS],
    ),
    formula!(
        YtmCouponBond,
        "ytm_coupon_bond",
        "YTM of Coupon Bond",
        Bonds,
        "Coupon bond price at a given yield",
        &[p("coupon_payment", "Coupon payment", Money), FACE_VALUE, YTM, PERIODS],
    ),
    formula!(
        OneYearStockPrice,
        "one_year_stock_price",
        "One Year Stock Price",
        Stocks,
        "Price for a one-year holding period",
        &[DIVIDEND_1, p("price_1", "Expected price in year 1", Money), EQUITY_COST],
    ),
    formula!(
        TotalReturn,
        "total_return",
        "Total Return",
        Stocks,
        "Dividend yield plus capital gain rate",
        &[
            DIVIDEND_1,
            p("price_0", "Initial price", Money),
            p("price_1", "Price in year 1", Money),
        ],
    ),
    formula!(
        MultiYearStockPrice,
        "multi_year_stock_price",
        "Multi-Year Stock Price",
        Stocks,
        "Price for a two-year holding period",
        &[
            DIVIDEND_1,
            p("dividend_2", "Dividend paid in year 2", Money),
            p("price_2", "Expected price in year 2", Money),
            EQUITY_COST,
        ],
    ),
    formula!(
        DividendDiscountModel,
        "dividend_discount_model",
        "Dividend Discount Model",
        Stocks,
        "Present value of explicit dividends",
        &[DIVIDENDS, EQUITY_COST],
    ),
    formula!(
        ConstantGrowthDdm,
        "constant_growth_ddm",
        "Constant Dividend Growth Model",
        Stocks,
        "Gordon growth model",
        &[p("dividend_1", "Expected dividend in year 1", Money), EQUITY_COST, GROWTH],
    ),
    formula!(
        DividendPerShare,
        "dividend_per_share",
        "Dividend Per Share",
        Stocks,
        "Earnings paid out per share",
        &[
            p("earnings", "Earnings", Money),
            p("shares_outstanding", "Number of shares outstanding", Count),
            p("payout_rate", "Dividend payout rate", Rate),
        ],
    ),
    formula!(
        EnterpriseValue,
        "enterprise_value",
        "Enterprise Value",
        Firm,
        "Equity plus debt less cash",
        &[
            p("equity", "Equity value", Money),
            p("debt", "Debt value", Money),
            p("cash", "Cash value", Money),
        ],
    ),
    formula!(
        FreeCashflow,
        "free_cashflow",
        "Free Cash Flow",
        Firm,
        "Unlevered free cash flow",
        &[
            p("ebit", "EBIT", Money),
            p("tax_rate", "Tax rate", Rate),
            DEPRECIATION,
            CAPEX,
            p("nwc_increase", "Increase in net working capital", Money),
        ],
    ),
    formula!(
        NetInvestment,
        "net_investment",
        "Net Investment",
        Firm,
        "Capital expenditure less depreciation",
        &[CAPEX, DEPRECIATION],
    ),
    formula!(
        CallOptionPayoff,
        "call_option_payoff",
        "Call Option Value",
        Options,
        "Intrinsic value of a call at expiry",
        &[STOCK_PRICE, STRIKE],
    ),
    formula!(
        PutOptionPayoff,
        "put_option_payoff",
        "Put Option Value",
        Options,
        "Intrinsic value of a put at expiry",
        &[STOCK_PRICE, STRIKE],
    ),
    formula!(
        DdmTerminalGrowth,
        "ddm_terminal_growth",
        "DDM with Constant Long Term Growth",
        Advanced,
        "Explicit dividends plus a growing terminal value",
        &[DIVIDENDS, EQUITY_COST, p("growth_rate", "Long-term growth rate", Rate)],
    ),
    formula!(
        Npv,
        "npv",
        "Net Present Value (NPV)",
        CapitalBudgeting,
        "Discounted cash flows less the initial outlay",
        &[
            p("initial_outlay", "Initial investment", Money),
            p("rate", "Required return rate", Rate),
            p("cash_flows", "Expected cash flows", MoneySeries),
        ],
    ),
    formula!(
        PaybackPeriod,
        "payback_period",
        "Payback Period (PB)",
        CapitalBudgeting,
        "Years until the initial cost is recovered",
        &[
            p("years_before_recovery", "Years before cost recovery", Years),
            p("remaining_cost", "Remaining cost to recover", Money),
            p("cash_flow_in_year", "Cash flow during the recovery year", Money),
        ],
    ),
    formula!(
        PvCashflows,
        "pv_cashflows",
        "PV of Cash Flows",
        TimeValue,
        "Present value of an irregular cash flow vector",
        &[p("cash_flows", "Cash flows from period 0", MoneySeries), RATE],
    ),
];

/// Evaluates a catalog formula with named parameters.
///
/// # Errors
///
/// * [`FinanceError::MissingParameter`], [`FinanceError::UnexpectedParameter`]
///   or [`FinanceError::WrongParameterType`] if `params` does not match the
///   formula's declaration
/// * [`FinanceError::Domain`] if an input violates the formula's domain
/// * [`FinanceError::Numeric`] if the result is not finite
pub fn evaluate(id: FormulaId, params: &Params) -> FinanceResult<f64> {
    let args = Bound::new(id.spec(), params)?;
    trace!("evaluating {id} with {} parameters", params.len());

    match id {
        FormulaId::DiscountFactor => {
            time_value::discount_factor(args.scalar("rate")?, args.scalar("time")?)
        }
        FormulaId::FutureValue => time_value::future_value(
            args.scalar("present_value")?,
            args.scalar("rate")?,
            args.scalar("time")?,
        ),
        FormulaId::PresentValue => time_value::present_value(
            args.scalar("future_value")?,
            args.scalar("rate")?,
            args.scalar("time")?,
        ),
        FormulaId::PvCashflowStream => time_value::pv_cashflow_stream(
            args.scalar("cash_flow")?,
            args.scalar("rate")?,
            args.periods("periods")?,
        ),
        FormulaId::PvCashflows => {
            time_value::pv_cashflows(args.series("cash_flows")?, args.scalar("rate")?)
        }
        FormulaId::PvPerpetuity => {
            annuities::pv_perpetuity(args.scalar("cash_flow")?, args.scalar("rate")?)
        }
        FormulaId::PvAnnuity => annuities::pv_annuity(
            args.scalar("cash_flow")?,
            args.scalar("rate")?,
            args.periods("periods")?,
        ),
        FormulaId::FvAnnuity => annuities::fv_annuity(
            args.scalar("present_value")?,
            args.scalar("rate")?,
            args.periods("periods")?,
        ),
        FormulaId::PvPerpetuityGrowth => annuities::pv_perpetuity_growth(
            args.scalar("cash_flow")?,
            args.scalar("rate")?,
            args.scalar("growth_rate")?,
        ),
        FormulaId::PvGrowingAnnuity => annuities::pv_growing_annuity(
            args.scalar("cash_flow")?,
            args.scalar("rate")?,
            args.scalar("growth_rate")?,
            args.periods("periods")?,
        ),
        FormulaId::EqDiscountPeriodConversion => {
            rates::eq_discount_period_conversion(args.scalar("rate")?, args.scalar("periods")?)
        }
        FormulaId::InterestRatePerPeriod => rates::interest_rate_per_period(
            args.scalar("apr")?,
            args.periods("compounding_periods")?,
        ),
        FormulaId::AprToEar => {
            rates::apr_to_ear(args.scalar("apr")?, args.periods("compounding_periods")?)
        }
        FormulaId::GrowthInPurchasingPower => rates::growth_in_purchasing_power(
            args.scalar("inflation_rate")?,
            args.scalar("real_rate")?,
        ),
        FormulaId::RealInterestRate => {
            rates::real_interest_rate(args.scalar("real_rate")?, args.scalar("inflation_rate")?)
        }
        FormulaId::CouponPayment => bonds::coupon_payment(
            args.scalar("face_value")?,
            args.scalar("coupon_rate")?,
            args.periods("periods")?,
        ),
        FormulaId::ZeroCouponPrice => bonds::zero_coupon_price(
            args.scalar("face_value")?,
            args.scalar("ytm")?,
            args.periods("periods")?,
        ),
        FormulaId::YtmZeroCoupon => bonds::ytm_zero_coupon(
            args.scalar("face_value")?,
            args.scalar("price")?,
            args.periods("periods")?,
        ),
        FormulaId::YtmCouponBond => bonds::ytm_coupon_bond(
            args.scalar("coupon_payment")?,
            args.scalar("face_value")?,
            args.scalar("ytm")?,
            args.periods("periods")?,
        ),
        FormulaId::OneYearStockPrice => stocks::one_year_stock_price(
            args.scalar("dividend_1")?,
            args.scalar("price_1")?,
            args.scalar("equity_cost")?,
        ),
        FormulaId::TotalReturn => stocks::total_return(
            args.scalar("dividend_1")?,
            args.scalar("price_0")?,
            args.scalar("price_1")?,
        ),
        FormulaId::MultiYearStockPrice => stocks::multi_year_stock_price(
            args.scalar("dividend_1")?,
            args.scalar("dividend_2")?,
            args.scalar("price_2")?,
            args.scalar("equity_cost")?,
        ),
        FormulaId::DividendDiscountModel => {
            stocks::dividend_discount_model(args.series("dividends")?, args.scalar("equity_cost")?)
        }
        FormulaId::ConstantGrowthDdm => stocks::constant_growth_ddm(
            args.scalar("dividend_1")?,
            args.scalar("equity_cost")?,
            args.scalar("growth_rate")?,
        ),
        FormulaId::DividendPerShare => stocks::dividend_per_share(
            args.scalar("earnings")?,
            args.scalar("shares_outstanding")?,
            args.scalar("payout_rate")?,
        ),
        FormulaId::DdmTerminalGrowth => stocks::ddm_terminal_growth(
            args.series("dividends")?,
            args.scalar("equity_cost")?,
            args.scalar("growth_rate")?,
        ),
        FormulaId::EnterpriseValue => firm::enterprise_value(
            args.scalar("equity")?,
            args.scalar("debt")?,
            args.scalar("cash")?,
        ),
        FormulaId::FreeCashflow => firm::free_cashflow(
            args.scalar("ebit")?,
            args.scalar("tax_rate")?,
            args.scalar("depreciation")?,
            args.scalar("capex")?,
            args.scalar("nwc_increase")?,
        ),
        FormulaId::NetInvestment => {
            firm::net_investment(args.scalar("capex")?, args.scalar("depreciation")?)
        }
        FormulaId::CallOptionPayoff => {
            options::call_option_payoff(args.scalar("stock_price")?, args.scalar("strike_price")?)
        }
        FormulaId::PutOptionPayoff => {
            options::put_option_payoff(args.scalar("stock_price")?, args.scalar("strike_price")?)
        }
        FormulaId::Npv => capital_budgeting::npv(
            args.scalar("initial_outlay")?,
            args.scalar("rate")?,
            args.series("cash_flows")?,
        ),
        FormulaId::PaybackPeriod => capital_budgeting::payback_period(
            args.scalar("years_before_recovery")?,
            args.scalar("remaining_cost")?,
            args.scalar("cash_flow_in_year")?,
        ),
    }
}

/// Looks up a formula by name and evaluates it.
pub fn evaluate_named(name: &str, params: &Params) -> FinanceResult<f64> {
    evaluate(name.parse()?, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_catalog_is_indexed_by_id() {
        assert_eq!(FormulaId::all().len(), CATALOG.len());
        for (index, id) in FormulaId::all().iter().enumerate() {
            assert_eq!(*id as usize, index, "{id:?} out of order");
            assert_eq!(id.spec().id, *id);
        }
    }

    #[test]
    fn test_keys_match_serde_names() {
        for id in FormulaId::all() {
            let json = serde_json::to_string(id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }

    #[test]
    fn test_parse_round_trip() {
        for id in FormulaId::all() {
            assert_eq!(id.as_str().parse::<FormulaId>().unwrap(), *id);
        }
    }

    #[test]
    fn test_parse_aliases_and_case() {
        assert_eq!("PV-Annuity".parse::<FormulaId>().unwrap(), FormulaId::PvAnnuity);
        assert_eq!("NPV".parse::<FormulaId>().unwrap(), FormulaId::Npv);
        assert_eq!("gordon".parse::<FormulaId>().unwrap(), FormulaId::ConstantGrowthDdm);
        assert_eq!(
            "black_scholes".parse::<FormulaId>().unwrap_err(),
            FinanceError::unknown_formula("black_scholes")
        );
    }

    #[test]
    fn test_param_names_unique() {
        for id in FormulaId::all() {
            let params = id.params();
            for (i, a) in params.iter().enumerate() {
                assert!(
                    params[i + 1..].iter().all(|b| b.name != a.name),
                    "{id} declares {} twice",
                    a.name
                );
            }
        }
    }

    #[test]
    fn test_field_order() {
        let names: Vec<_> = FormulaId::FreeCashflow.params().iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            ["ebit", "tax_rate", "depreciation", "capex", "nwc_increase"]
        );
    }

    #[test]
    fn test_categories() {
        assert_eq!(FormulaId::Npv.category(), Category::CapitalBudgeting);
        assert_eq!(Category::Annuities.formulas().count(), 5);
        assert_eq!(Category::Firm.precision(), 2);
        assert_eq!(Category::Bonds.precision(), 4);
        assert_eq!("Stock Valuation".parse::<Category>().unwrap(), Category::Stocks);
        assert_eq!("capital-budgeting".parse::<Category>().unwrap(), Category::CapitalBudgeting);

        let total: usize = Category::all().iter().map(|c| c.formulas().count()).sum();
        assert_eq!(total, FormulaId::all().len());
    }

    #[test]
    fn test_evaluate_enterprise_value() {
        let params = Params::new()
            .with("equity", 500.0)
            .with("debt", 200.0)
            .with("cash", 50.0);
        assert_eq!(evaluate(FormulaId::EnterpriseValue, &params).unwrap(), 650.0);
    }

    #[test]
    fn test_evaluate_npv_series() {
        let params = Params::new()
            .with("initial_outlay", 1000.0)
            .with("rate", 0.10)
            .with_series("cash_flows", vec![500.0, 500.0, 500.0]);
        let value = evaluate(FormulaId::Npv, &params).unwrap();
        assert_relative_eq!(value, 243.425995492111, epsilon = 1e-9);
    }

    #[test]
    fn test_evaluate_named() {
        let params = Params::new().with("stock_price", 120.0).with("strike_price", 100.0);
        assert_eq!(evaluate_named("call", &params).unwrap(), 20.0);
        assert!(matches!(
            evaluate_named("nope", &params),
            Err(FinanceError::UnknownFormula { .. })
        ));
    }

    #[test]
    fn test_evaluate_reports_domain_error() {
        let params = Params::new()
            .with("cash_flow", 100.0)
            .with("rate", 0.05)
            .with("growth_rate", 0.06);
        let err = evaluate(FormulaId::PvPerpetuityGrowth, &params).unwrap_err();
        assert!(err.is_domain());
    }

    #[test]
    fn test_every_formula_reports_missing_parameters() {
        for id in FormulaId::all() {
            let err = evaluate(*id, &Params::new()).unwrap_err();
            assert_eq!(
                err,
                FinanceError::missing_parameter(id.as_str(), id.params()[0].name)
            );
        }
    }
}
