use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use fonte_ashare::AshareConnector;
use fonte_ashare::source::{
    Announcement, ExecutiveHolding, StatementKind, StatementSource, StatementTable,
    ValuationIndicators,
};
use fonte_core::connector::{
    CompanyNewsProvider, FinancialMetricsProvider, InsiderTradesProvider, LineItemsProvider,
    MarketCapProvider,
};
use fonte_core::{FonteError, PeriodKind, PricePoint, Sentiment, Ticker};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[derive(Default)]
struct FakeSource {
    income: StatementTable,
    balance: StatementTable,
    cashflow: StatementTable,
    valuation: ValuationIndicators,
    holdings: Vec<ExecutiveHolding>,
    announcements: Vec<Announcement>,
    total_shares: Option<f64>,
}

#[async_trait]
impl StatementSource for FakeSource {
    async fn statement(
        &self,
        _code: &str,
        kind: StatementKind,
    ) -> Result<StatementTable, FonteError> {
        Ok(match kind {
            StatementKind::Income => self.income.clone(),
            StatementKind::Balance => self.balance.clone(),
            StatementKind::CashFlow => self.cashflow.clone(),
        })
    }

    async fn valuation(&self, _code: &str) -> Result<ValuationIndicators, FonteError> {
        Ok(self.valuation)
    }

    async fn daily_bars(
        &self,
        _code: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<PricePoint>, FonteError> {
        Ok(Vec::new())
    }

    async fn executive_holdings(&self, _code: &str) -> Result<Vec<ExecutiveHolding>, FonteError> {
        Ok(self.holdings.clone())
    }

    async fn announcements(&self, _code: &str) -> Result<Vec<Announcement>, FonteError> {
        Ok(self.announcements.clone())
    }

    async fn total_shares(&self, _code: &str) -> Result<Option<f64>, FonteError> {
        Ok(self.total_shares)
    }
}

fn statements() -> FakeSource {
    let mut src = FakeSource::default();
    for (year, revenue, net_income) in [(2023, 800.0, 160.0), (2024, 1000.0, 250.0)] {
        let p = d(year, 12, 31);
        src.income.insert("营业收入", p, revenue);
        src.income.insert("净利润", p, net_income);
        src.income.insert("财务费用", p, 10.0);
        src.income.insert("所得税费用", p, 40.0);
        src.balance.insert("资产总计", p, 5000.0);
        src.balance.insert("所有者权益(或股东权益)合计", p, 2000.0);
        src.cashflow.insert("经营活动产生的现金流量净额", p, 400.0);
        src.cashflow.insert("购建固定资产、无形资产和其他长期资产支付的现金", p, 150.0);
    }
    src.valuation = ValuationIndicators {
        market_cap: Some(2.1e12),
        pe_ratio: Some(30.0),
        pb_ratio: Some(8.0),
    };
    src
}

#[tokio::test]
async fn metrics_respect_end_date_and_limit() {
    let conn = AshareConnector::new(Arc::new(statements()));
    let ticker = Ticker::new("600519.SH");

    // End date excludes the 2024 annual report.
    let snaps = conn
        .financial_metrics(&ticker, d(2024, 6, 30), PeriodKind::Annual, 10)
        .await
        .unwrap();
    assert_eq!(snaps.len(), 1);
    assert_eq!(snaps[0].report_period, d(2023, 12, 31));
    assert_eq!(snaps[0].net_margin, Some(0.2));
    assert_eq!(snaps[0].currency, "CNY");

    // Later end date sees both, most recent first, limit applies.
    let snaps = conn
        .financial_metrics(&ticker, d(2025, 6, 30), PeriodKind::Annual, 1)
        .await
        .unwrap();
    assert_eq!(snaps.len(), 1);
    assert_eq!(snaps[0].report_period, d(2024, 12, 31));
}

#[tokio::test]
async fn line_items_mix_direct_and_derived() {
    let conn = AshareConnector::new(Arc::new(FakeSource {
        total_shares: Some(1.256e9),
        ..statements()
    }));
    let ticker = Ticker::new("600519.SH");

    let items = vec![
        "revenue".to_string(),
        "free_cash_flow".to_string(),
        "ebit".to_string(),
        "outstanding_shares".to_string(),
        "total_debt".to_string(),
    ];
    let records = conn
        .line_items(&ticker, &items, d(2025, 1, 1), PeriodKind::Annual, 1)
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.report_period, d(2024, 12, 31));
    assert_eq!(record.value("revenue"), Some(1000.0));
    assert_eq!(record.value("free_cash_flow"), Some(250.0));
    assert_eq!(record.value("ebit"), Some(300.0));
    assert_eq!(record.value("outstanding_shares"), Some(1.256e9));
    // Requested but unmappable: explicit null, not absent.
    assert_eq!(record.items.get("total_debt"), Some(&None));
}

#[tokio::test]
async fn insider_trades_from_executive_holdings() {
    let src = FakeSource {
        holdings: vec![
            ExecutiveHolding {
                name: "张伟".to_string(),
                title: "董事长".to_string(),
                change_date: d(2024, 5, 10),
                shares_changed: Some(-20_000.0),
                shares_after: Some(1_000_000.0),
            },
            ExecutiveHolding {
                name: "李娜".to_string(),
                title: "总经理".to_string(),
                change_date: d(2023, 11, 2),
                shares_changed: Some(5_000.0),
                shares_after: Some(80_000.0),
            },
        ],
        ..FakeSource::default()
    };
    let conn = AshareConnector::new(Arc::new(src));
    let ticker = Ticker::new("600519.SH");

    let trades = conn
        .insider_trades(&ticker, Some(d(2024, 1, 1)), d(2024, 12, 31), 100)
        .await
        .unwrap();

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].name.as_deref(), Some("张伟"));
    assert_eq!(trades[0].is_board_director, Some(true));
    assert_eq!(trades[0].filing_date, d(2024, 5, 10));
    assert_eq!(trades[0].transaction_shares, Some(-20_000.0));
    assert_eq!(trades[0].security_title.as_deref(), Some("A股"));
}

#[tokio::test]
async fn announcements_become_news_with_sentiment() {
    let src = FakeSource {
        announcements: vec![
            Announcement {
                title: "2024年度净利润增长公告".to_string(),
                date: d(2024, 4, 20),
                url: "https://example.com/1".to_string(),
            },
            Announcement {
                title: "关于收到行政处罚决定书的公告".to_string(),
                date: d(2024, 3, 5),
                url: String::new(),
            },
        ],
        ..FakeSource::default()
    };
    let conn = AshareConnector::new(Arc::new(src));

    let news = conn
        .news(
            &Ticker::new("000001.SZ"),
            Some(d(2024, 1, 1)),
            d(2024, 12, 31),
            100,
        )
        .await
        .unwrap();

    assert_eq!(news.len(), 2);
    assert_eq!(news[0].sentiment, Sentiment::Positive);
    assert_eq!(news[1].sentiment, Sentiment::Negative);
    assert_eq!(news[0].source, "深圳证券交易所");
    assert_eq!(news[0].author, "公司公告");
}

#[tokio::test]
async fn market_cap_from_valuation_table() {
    let conn = AshareConnector::new(Arc::new(statements()));
    let cap = conn
        .market_cap(&Ticker::new("600519.SH"), d(2024, 12, 31))
        .await
        .unwrap();
    assert_eq!(cap, Some(2.1e12));
}
