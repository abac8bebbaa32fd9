//! Translation from native statement vocabulary to canonical records.

use chrono::NaiveDate;

use fonte_core::derive;
use fonte_core::{FinancialMetricsSnapshot, LineItemRecord, PeriodKind, Sentiment};

use crate::source::{StatementTable, ValuationIndicators};

// Income statement rows.
pub(crate) const REVENUE: &str = "营业收入";
pub(crate) const NET_INCOME: &str = "净利润";
pub(crate) const OPERATING_INCOME: &str = "营业利润";
pub(crate) const INTEREST_EXPENSE: &str = "财务费用";
pub(crate) const TAX_EXPENSE: &str = "所得税费用";

// Balance sheet rows.
pub(crate) const TOTAL_ASSETS: &str = "资产总计";
pub(crate) const TOTAL_LIABILITIES: &str = "负债合计";
pub(crate) const SHAREHOLDERS_EQUITY: &str = "所有者权益(或股东权益)合计";
pub(crate) const CURRENT_ASSETS: &str = "流动资产合计";
pub(crate) const CURRENT_LIABILITIES: &str = "流动负债合计";
pub(crate) const CASH_AND_EQUIVALENTS: &str = "货币资金";

// Cash flow statement rows.
pub(crate) const OPERATING_CASH_FLOW: &str = "经营活动产生的现金流量净额";
pub(crate) const CAPITAL_EXPENDITURE: &str = "购建固定资产、无形资产和其他长期资产支付的现金";
pub(crate) const DEPRECIATION: &str = "固定资产折旧、油气资产折耗、生产性生物资产折旧";
pub(crate) const DIVIDENDS_PAID: &str = "分配股利、利润或偿付利息支付的现金";

const RESEARCH_AND_DEVELOPMENT: &str = "研发费用";

/// Direct line-item name → native row label, for items that need no
/// derivation. Derived items (free_cash_flow, working_capital, ebit, ebitda,
/// outstanding_shares) are handled separately; anything else maps to `None`.
pub(crate) fn line_item_label(name: &str) -> Option<&'static str> {
    match name {
        "revenue" => Some(REVENUE),
        "net_income" => Some(NET_INCOME),
        "operating_income" => Some(OPERATING_INCOME),
        "capital_expenditure" => Some(CAPITAL_EXPENDITURE),
        "cash_and_equivalents" => Some(CASH_AND_EQUIVALENTS),
        "shareholders_equity" => Some(SHAREHOLDERS_EQUITY),
        "research_and_development" => Some(RESEARCH_AND_DEVELOPMENT),
        "total_assets" => Some(TOTAL_ASSETS),
        "total_liabilities" => Some(TOTAL_LIABILITIES),
        "dividends_and_other_cash_distributions" => Some(DIVIDENDS_PAID),
        "depreciation_and_amortization" => Some(DEPRECIATION),
        _ => None,
    }
}

/// Build the metrics snapshot for one report period from the statement
/// tables plus the spot valuation indicators (which the upstream only
/// publishes for the latest trading day, so they repeat across periods).
pub(crate) fn metrics_for_period(
    ticker: &str,
    report_period: NaiveDate,
    period: PeriodKind,
    income: &StatementTable,
    balance: &StatementTable,
    valuation: ValuationIndicators,
) -> FinancialMetricsSnapshot {
    let revenue = income.value(REVENUE, report_period);
    let net_income = income.value(NET_INCOME, report_period);
    let operating_income = income.value(OPERATING_INCOME, report_period);
    let total_assets = balance.value(TOTAL_ASSETS, report_period);
    let equity = balance.value(SHAREHOLDERS_EQUITY, report_period);

    let mut snap = FinancialMetricsSnapshot::empty(ticker, report_period, period, "CNY");
    snap.market_cap = valuation.market_cap;
    snap.price_to_earnings_ratio = valuation.pe_ratio;
    snap.price_to_book_ratio = valuation.pb_ratio;
    snap.net_margin = derive::ratio(net_income, revenue);
    snap.operating_margin = derive::ratio(operating_income, revenue);
    snap.return_on_equity = derive::ratio(net_income, equity);
    snap.return_on_assets = derive::ratio(net_income, total_assets);
    snap
}

/// Resolve one requested line item for one report period.
#[allow(clippy::too_many_arguments)]
pub(crate) fn resolve_line_item(
    name: &str,
    report_period: NaiveDate,
    income: &StatementTable,
    balance: &StatementTable,
    cashflow: &StatementTable,
    total_shares: Option<f64>,
) -> Option<f64> {
    match name {
        "free_cash_flow" => derive::free_cash_flow(
            cashflow.value(OPERATING_CASH_FLOW, report_period),
            cashflow.value(CAPITAL_EXPENDITURE, report_period),
        ),
        "working_capital" => derive::working_capital(
            balance.value(CURRENT_ASSETS, report_period),
            balance.value(CURRENT_LIABILITIES, report_period),
        ),
        "ebit" => ebit_for_period(income, report_period),
        "ebitda" => derive::ebitda(
            ebit_for_period(income, report_period),
            cashflow.value(DEPRECIATION, report_period),
        ),
        // Share structure carries no history; the latest total stands in
        // for every period.
        "outstanding_shares" => total_shares,
        _ => {
            let label = line_item_label(name)?;
            income
                .value(label, report_period)
                .or_else(|| balance.value(label, report_period))
                .or_else(|| cashflow.value(label, report_period))
        }
    }
}

fn ebit_for_period(income: &StatementTable, report_period: NaiveDate) -> Option<f64> {
    derive::ebit(
        income.value(NET_INCOME, report_period),
        income.value(INTEREST_EXPENSE, report_period),
        income.value(TAX_EXPENSE, report_period),
    )
}

/// Build one period's record around the caller's requested item names.
pub(crate) fn line_items_for_period(
    ticker: &str,
    report_period: NaiveDate,
    period: PeriodKind,
    requested: &[String],
    income: &StatementTable,
    balance: &StatementTable,
    cashflow: &StatementTable,
    total_shares: Option<f64>,
) -> LineItemRecord {
    let mut record = LineItemRecord::new(ticker, report_period, period, "CNY");
    for name in requested {
        let value =
            resolve_line_item(name, report_period, income, balance, cashflow, total_shares);
        record.items.insert(name.clone(), value);
    }
    record
}

const POSITIVE_WORDS: &[&str] = &["增长", "盈利", "利好", "上涨", "突破", "提升"];
const NEGATIVE_WORDS: &[&str] = &["下跌", "亏损", "风险", "下降", "违规", "处罚"];

/// Keyword sentiment over an announcement title; positive words win ties.
pub(crate) fn title_sentiment(title: &str) -> Sentiment {
    if POSITIVE_WORDS.iter().any(|w| title.contains(w)) {
        Sentiment::Positive
    } else if NEGATIVE_WORDS.iter().any(|w| title.contains(w)) {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Board membership inferred from the disclosed role.
pub(crate) fn is_board_director(title: &str) -> bool {
    title.contains("董事")
}
