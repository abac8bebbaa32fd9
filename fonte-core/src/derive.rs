//! Null-propagating fundamental derivations.
//!
//! Each derivation yields `Some` only when every input it needs is present;
//! a missing input makes that one output `None` without affecting siblings.

/// Free cash flow: operating cash flow minus capital expenditure.
#[must_use]
pub fn free_cash_flow(operating_cash_flow: Option<f64>, capital_expenditure: Option<f64>) -> Option<f64> {
    Some(operating_cash_flow? - capital_expenditure?)
}

/// Working capital: current assets minus current liabilities.
#[must_use]
pub fn working_capital(current_assets: Option<f64>, current_liabilities: Option<f64>) -> Option<f64> {
    Some(current_assets? - current_liabilities?)
}

/// EBIT reconstructed from net income by adding back interest and tax.
#[must_use]
pub fn ebit(
    net_income: Option<f64>,
    interest_expense: Option<f64>,
    tax_expense: Option<f64>,
) -> Option<f64> {
    Some(net_income? + interest_expense? + tax_expense?)
}

/// EBITDA: EBIT plus depreciation and amortization.
#[must_use]
pub fn ebitda(ebit: Option<f64>, depreciation_and_amortization: Option<f64>) -> Option<f64> {
    Some(ebit? + depreciation_and_amortization?)
}

/// Ratio guarded against missing inputs and non-positive denominators.
#[must_use]
pub fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let denominator = denominator?;
    if denominator > 0.0 {
        Some(numerator? / denominator)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivations_need_all_inputs() {
        assert_eq!(free_cash_flow(Some(100.0), Some(30.0)), Some(70.0));
        assert_eq!(free_cash_flow(Some(100.0), None), None);
        assert_eq!(working_capital(Some(50.0), Some(20.0)), Some(30.0));
        assert_eq!(working_capital(None, Some(20.0)), None);
        assert_eq!(ebit(Some(10.0), Some(2.0), Some(3.0)), Some(15.0));
        assert_eq!(ebit(Some(10.0), None, Some(3.0)), None);
        assert_eq!(ebitda(Some(15.0), Some(5.0)), Some(20.0));
        assert_eq!(ebitda(None, Some(5.0)), None);
    }

    #[test]
    fn ratio_rejects_non_positive_denominator() {
        assert_eq!(ratio(Some(10.0), Some(4.0)), Some(2.5));
        assert_eq!(ratio(Some(10.0), Some(0.0)), None);
        assert_eq!(ratio(Some(10.0), Some(-1.0)), None);
        assert_eq!(ratio(None, Some(4.0)), None);
    }
}
