//! Named parameter maps and binding against a formula's parameter list.

use std::collections::BTreeMap;

use fincalc_core::{FinanceError, FinanceResult, ParamValue};
use serde::{Deserialize, Serialize};

use super::FormulaSpec;

/// Named inputs for one formula evaluation.
///
/// # Example
///
/// ```rust
/// use fincalc_formulas::registry::Params;
///
/// let params = Params::new()
///     .with("initial_outlay", 1000.0)
///     .with("rate", 0.10)
///     .with_series("cash_flows", vec![500.0, 500.0, 500.0]);
/// assert_eq!(params.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params {
    values: BTreeMap<String, ParamValue>,
}

impl Params {
    /// Creates an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a scalar.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds a series.
    #[must_use]
    pub fn with_series(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.insert(name, values);
        self
    }

    /// Inserts a value, replacing any previous value under `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Looks up a value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Returns the number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no values are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// Parameters checked against a [`FormulaSpec`].
///
/// Construction verifies that every declared parameter is present with the
/// right shape and passes its kind's checks, and that nothing else was
/// supplied. The accessors then only convert.
pub(crate) struct Bound<'a> {
    spec: &'static FormulaSpec,
    params: &'a Params,
}

impl<'a> Bound<'a> {
    pub(crate) fn new(spec: &'static FormulaSpec, params: &'a Params) -> FinanceResult<Self> {
        let formula = spec.id.as_str();

        if let Some((extra, _)) = params.iter().find(|(name, _)| spec.param(name).is_none()) {
            return Err(FinanceError::unexpected_parameter(formula, extra));
        }

        for param in spec.params {
            let value = params
                .get(param.name)
                .ok_or_else(|| FinanceError::missing_parameter(formula, param.name))?;

            match (param.kind.is_series(), value) {
                (false, ParamValue::Scalar(v)) => {
                    param.kind.check_scalar(formula, param.name, *v)?;
                }
                (true, ParamValue::Series(values)) => {
                    if let Some(i) = values.iter().position(|v| !v.is_finite()) {
                        return Err(FinanceError::domain(
                            formula,
                            format!("{}[{i}] must be a finite number", param.name),
                        ));
                    }
                }
                (is_series, _) => {
                    let expected = if is_series { "series" } else { "number" };
                    return Err(FinanceError::wrong_parameter_type(
                        formula, param.name, expected,
                    ));
                }
            }
        }

        Ok(Self { spec, params })
    }

    pub(crate) fn scalar(&self, name: &str) -> FinanceResult<f64> {
        match self.value(name)? {
            ParamValue::Scalar(v) => Ok(*v),
            ParamValue::Series(_) => Err(self.wrong_type(name, "number")),
        }
    }

    /// A `PeriodCount` value as an integer.
    pub(crate) fn periods(&self, name: &str) -> FinanceResult<u32> {
        let value = self.scalar(name)?;
        if value > f64::from(u32::MAX) {
            return Err(FinanceError::domain(
                self.formula(),
                format!("{name} is too large, got {value}"),
            ));
        }
        // Whole and non-negative, checked in `new`.
        Ok(value as u32)
    }

    pub(crate) fn series(&self, name: &str) -> FinanceResult<&'a [f64]> {
        match self.value(name)? {
            ParamValue::Series(values) => Ok(values),
            ParamValue::Scalar(_) => Err(self.wrong_type(name, "series")),
        }
    }

    fn value(&self, name: &str) -> FinanceResult<&'a ParamValue> {
        self.params
            .get(name)
            .ok_or_else(|| FinanceError::missing_parameter(self.formula(), name))
    }

    fn formula(&self) -> &'static str {
        self.spec.id.as_str()
    }

    fn wrong_type(&self, name: &str, expected: &str) -> FinanceError {
        FinanceError::wrong_parameter_type(self.formula(), name, expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FormulaId;

    #[test]
    fn test_params_builder() {
        let params = Params::new().with("rate", 0.05).with("rate", 0.06);
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("rate"), Some(&ParamValue::Scalar(0.06)));
        assert!(params.get("time").is_none());
    }

    #[test]
    fn test_params_from_iter() {
        let params: Params = [("rate", 0.05), ("time", 2.0)].into_iter().collect();
        let names: Vec<_> = params.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["rate", "time"]);
    }

    #[test]
    fn test_params_json() {
        let params: Params =
            serde_json::from_str(r#"{"rate": 0.1, "cash_flows": [1.0, 2.0]}"#).unwrap();
        assert_eq!(params.get("rate"), Some(&ParamValue::Scalar(0.1)));
        assert_eq!(
            params.get("cash_flows"),
            Some(&ParamValue::Series(vec![1.0, 2.0]))
        );
    }

    #[test]
    fn test_bind_missing() {
        let params = Params::new().with("rate", 0.05);
        let err = Bound::new(FormulaId::DiscountFactor.spec(), &params)
            .err()
            .unwrap();
        assert_eq!(err, FinanceError::missing_parameter("discount_factor", "time"));
    }

    #[test]
    fn test_bind_unexpected() {
        let params = Params::new().with("rate", 0.05).with("time", 1.0).with("t", 1.0);
        let err = Bound::new(FormulaId::DiscountFactor.spec(), &params)
            .err()
            .unwrap();
        assert_eq!(err, FinanceError::unexpected_parameter("discount_factor", "t"));
    }

    #[test]
    fn test_bind_wrong_shape() {
        let params = Params::new()
            .with("initial_outlay", 100.0)
            .with("rate", 0.1)
            .with("cash_flows", 110.0);
        let err = Bound::new(FormulaId::Npv.spec(), &params).err().unwrap();
        assert!(matches!(err, FinanceError::WrongParameterType { .. }));
    }

    #[test]
    fn test_bind_fractional_periods() {
        let params = Params::new()
            .with("cash_flow", 100.0)
            .with("rate", 0.05)
            .with("periods", 2.5);
        let err = Bound::new(FormulaId::PvAnnuity.spec(), &params).err().unwrap();
        assert!(err.is_domain());
    }

    #[test]
    fn test_bind_non_finite_series() {
        let params = Params::new()
            .with_series("cash_flows", vec![1.0, f64::INFINITY])
            .with("rate", 0.05);
        let err = Bound::new(FormulaId::PvCashflows.spec(), &params).err().unwrap();
        assert!(err.is_domain());
    }

    #[test]
    fn test_periods_accessor() {
        let params = Params::new()
            .with("cash_flow", 100.0)
            .with("rate", 0.05)
            .with("periods", 12.0);
        let bound = Bound::new(FormulaId::PvAnnuity.spec(), &params).unwrap();
        assert_eq!(bound.periods("periods").unwrap(), 12);
    }
}
