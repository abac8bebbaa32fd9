use core::fmt;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reporting cadence of a financial snapshot or line-item record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    /// Trailing twelve months.
    #[default]
    Ttm,
    /// Fiscal year.
    Annual,
    /// Fiscal quarter.
    Quarterly,
}

impl PeriodKind {
    /// Stable identifier used in upstream query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ttm => "ttm",
            Self::Annual => "annual",
            Self::Quarterly => "quarterly",
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse sentiment tag attached to company news.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Favorable coverage.
    Positive,
    /// No clear direction.
    #[default]
    Neutral,
    /// Unfavorable coverage.
    Negative,
}

/// One daily bar of normalized price history.
///
/// Dates are unique per ticker within a series; a series sorts ascending by
/// date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading day.
    pub date: NaiveDate,
    /// Opening price.
    pub open: f64,
    /// Intraday high.
    pub high: f64,
    /// Intraday low.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Shares (or contracts) traded.
    pub volume: u64,
}

/// Fixed-vocabulary ratio/metric snapshot for one report period.
///
/// Every metric is nullable: an upstream that cannot supply a field leaves it
/// `None`, never a synthetic default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetricsSnapshot {
    /// Instrument the snapshot belongs to.
    pub ticker: String,
    /// Fiscal period end the snapshot is attributed to.
    pub report_period: NaiveDate,
    /// Reporting cadence.
    pub period: PeriodKind,
    /// ISO currency code of monetary fields.
    pub currency: String,
    /// Total market capitalization.
    pub market_cap: Option<f64>,
    /// Enterprise value.
    pub enterprise_value: Option<f64>,

    // Valuation
    /// Price to earnings.
    pub price_to_earnings_ratio: Option<f64>,
    /// Price to book.
    pub price_to_book_ratio: Option<f64>,
    /// Price to sales.
    pub price_to_sales_ratio: Option<f64>,
    /// EV / EBITDA.
    pub enterprise_value_to_ebitda_ratio: Option<f64>,
    /// EV / revenue.
    pub enterprise_value_to_revenue_ratio: Option<f64>,
    /// Free cash flow yield.
    pub free_cash_flow_yield: Option<f64>,
    /// PEG ratio.
    pub peg_ratio: Option<f64>,

    // Profitability
    /// Gross margin.
    pub gross_margin: Option<f64>,
    /// Operating margin.
    pub operating_margin: Option<f64>,
    /// Net margin.
    pub net_margin: Option<f64>,
    /// Return on equity.
    pub return_on_equity: Option<f64>,
    /// Return on assets.
    pub return_on_assets: Option<f64>,
    /// Return on invested capital.
    pub return_on_invested_capital: Option<f64>,

    // Efficiency
    /// Asset turnover.
    pub asset_turnover: Option<f64>,
    /// Inventory turnover.
    pub inventory_turnover: Option<f64>,
    /// Receivables turnover.
    pub receivables_turnover: Option<f64>,
    /// Days sales outstanding.
    pub days_sales_outstanding: Option<f64>,
    /// Operating cycle length in days.
    pub operating_cycle: Option<f64>,
    /// Working capital turnover.
    pub working_capital_turnover: Option<f64>,

    // Liquidity
    /// Current ratio.
    pub current_ratio: Option<f64>,
    /// Quick ratio.
    pub quick_ratio: Option<f64>,
    /// Cash ratio.
    pub cash_ratio: Option<f64>,
    /// Operating cash flow ratio.
    pub operating_cash_flow_ratio: Option<f64>,

    // Leverage
    /// Debt to equity.
    pub debt_to_equity: Option<f64>,
    /// Debt to assets.
    pub debt_to_assets: Option<f64>,
    /// Interest coverage.
    pub interest_coverage: Option<f64>,

    // Growth
    /// Revenue growth.
    pub revenue_growth: Option<f64>,
    /// Earnings growth.
    pub earnings_growth: Option<f64>,
    /// Book value growth.
    pub book_value_growth: Option<f64>,
    /// EPS growth.
    pub earnings_per_share_growth: Option<f64>,
    /// Free cash flow growth.
    pub free_cash_flow_growth: Option<f64>,
    /// Operating income growth.
    pub operating_income_growth: Option<f64>,
    /// EBITDA growth.
    pub ebitda_growth: Option<f64>,

    // Per share / distribution
    /// Dividend payout ratio.
    pub payout_ratio: Option<f64>,
    /// Earnings per share.
    pub earnings_per_share: Option<f64>,
    /// Book value per share.
    pub book_value_per_share: Option<f64>,
    /// Free cash flow per share.
    pub free_cash_flow_per_share: Option<f64>,
}

impl FinancialMetricsSnapshot {
    /// A snapshot with identity fields set and every metric `None`.
    #[must_use]
    pub fn empty(
        ticker: impl Into<String>,
        report_period: NaiveDate,
        period: PeriodKind,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            report_period,
            period,
            currency: currency.into(),
            market_cap: None,
            enterprise_value: None,
            price_to_earnings_ratio: None,
            price_to_book_ratio: None,
            price_to_sales_ratio: None,
            enterprise_value_to_ebitda_ratio: None,
            enterprise_value_to_revenue_ratio: None,
            free_cash_flow_yield: None,
            peg_ratio: None,
            gross_margin: None,
            operating_margin: None,
            net_margin: None,
            return_on_equity: None,
            return_on_assets: None,
            return_on_invested_capital: None,
            asset_turnover: None,
            inventory_turnover: None,
            receivables_turnover: None,
            days_sales_outstanding: None,
            operating_cycle: None,
            working_capital_turnover: None,
            current_ratio: None,
            quick_ratio: None,
            cash_ratio: None,
            operating_cash_flow_ratio: None,
            debt_to_equity: None,
            debt_to_assets: None,
            interest_coverage: None,
            revenue_growth: None,
            earnings_growth: None,
            book_value_growth: None,
            earnings_per_share_growth: None,
            free_cash_flow_growth: None,
            operating_income_growth: None,
            ebitda_growth: None,
            payout_ratio: None,
            earnings_per_share: None,
            book_value_per_share: None,
            free_cash_flow_per_share: None,
        }
    }
}

/// Sparse, caller-shaped statement record for one report period.
///
/// Unlike [`FinancialMetricsSnapshot`], the field set is *requested*: callers
/// name the line items they want and the record carries exactly those names,
/// each mapped to a value or `None` when the upstream cannot supply or derive
/// it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemRecord {
    /// Instrument the record belongs to.
    pub ticker: String,
    /// Fiscal period end.
    pub report_period: NaiveDate,
    /// Reporting cadence.
    pub period: PeriodKind,
    /// ISO currency code.
    pub currency: String,
    /// Requested line-item name → nullable value.
    pub items: BTreeMap<String, Option<f64>>,
}

impl LineItemRecord {
    /// A record with identity fields set and no items.
    #[must_use]
    pub fn new(
        ticker: impl Into<String>,
        report_period: NaiveDate,
        period: PeriodKind,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            report_period,
            period,
            currency: currency.into(),
            items: BTreeMap::new(),
        }
    }

    /// The value recorded for `name`, flattening "not requested" and
    /// "requested but unavailable" to `None`.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<f64> {
        self.items.get(name).copied().flatten()
    }
}

/// One insider/executive transaction filing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsiderTradeRecord {
    /// Instrument the filing concerns.
    pub ticker: String,
    /// Reporting person.
    pub name: Option<String>,
    /// Reporting person's role.
    pub title: Option<String>,
    /// Whether the person sits on the board, when disclosed.
    pub is_board_director: Option<bool>,
    /// Trade execution date, when distinct from the filing date.
    pub transaction_date: Option<NaiveDate>,
    /// Regulatory filing date.
    pub filing_date: NaiveDate,
    /// Shares transacted; negative for dispositions.
    pub transaction_shares: Option<f64>,
    /// Execution price per share.
    pub transaction_price_per_share: Option<f64>,
    /// Total transaction value.
    pub transaction_value: Option<f64>,
    /// Holdings before the transaction.
    pub shares_owned_before_transaction: Option<f64>,
    /// Holdings after the transaction.
    pub shares_owned_after_transaction: Option<f64>,
    /// Security class named in the filing.
    pub security_title: Option<String>,
}

/// One company news item or exchange announcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyNewsRecord {
    /// Instrument the item concerns.
    pub ticker: String,
    /// Headline.
    pub title: String,
    /// Byline or publisher role.
    pub author: String,
    /// Publishing outlet or exchange.
    pub source: String,
    /// Publication date.
    pub date: NaiveDate,
    /// Canonical URL.
    pub url: String,
    /// Coarse sentiment tag.
    pub sentiment: Sentiment,
}
