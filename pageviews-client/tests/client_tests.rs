//! Orchestration tests against a canned transport.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use pageviews_client::{PageViewClient, PageViewError};
use pageviews_core::{
    AccessMethod, AgentType, AggregatePageViewRequest, ApiHeader, DaySelector, Granularity,
    InputError, PerArticlePageViewRequest, TableError, TopViewedArticleRequest,
    TopViewedCountryRequest, TopViewedPerCountryRequest, ValidityWindows,
};
use pageviews_fetch::{Endpoint, EndpointSet, FetchError, JsonTransport, Params, render_template};
use serde_json::{Value, json};

// ============================================================================
// Mock Transport
// ============================================================================

type Responder = Box<dyn Fn(Endpoint, &Params) -> Result<Value, FetchError> + Send + Sync>;

struct MockTransport {
    endpoints: EndpointSet,
    responder: Responder,
    calls: Mutex<Vec<(Endpoint, Params)>>,
}

impl MockTransport {
    fn new(
        responder: impl Fn(Endpoint, &Params) -> Result<Value, FetchError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            endpoints: EndpointSet::default(),
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Answers every endpoint with a plausible body.
    fn canned() -> Arc<Self> {
        Self::new(|endpoint, params| Ok(canned_body(endpoint, params)))
    }

    fn calls(&self) -> Vec<(Endpoint, Params)> {
        self.calls.lock().unwrap().clone()
    }

    fn calls_to(&self, endpoint: Endpoint) -> Vec<Params> {
        self.calls()
            .into_iter()
            .filter(|(e, _)| *e == endpoint)
            .map(|(_, p)| p)
            .collect()
    }
}

#[async_trait]
impl JsonTransport for MockTransport {
    async fn fetch_json(
        &self,
        template: &str,
        params: &Params,
        headers: &ApiHeader,
    ) -> Result<Value, FetchError> {
        assert_eq!(headers, &header());
        let endpoint = *Endpoint::all()
            .iter()
            .find(|e| self.endpoints.template(**e) == template)
            .ok_or_else(|| FetchError::InvalidUrl(template.to_string()))?;
        render_template(template, params)?;
        self.calls.lock().unwrap().push((endpoint, params.clone()));
        (self.responder)(endpoint, params)
    }
}

fn param(params: &Params, name: &str) -> String {
    params.get(name).unwrap_or_default().to_string()
}

fn canned_body(endpoint: Endpoint, params: &Params) -> Value {
    match endpoint {
        Endpoint::AggregateLegacy => json!({"items": [
            {"project": param(params, "project"), "access-site": param(params, "access-site"),
             "granularity": param(params, "granularity"), "timestamp": "2010010100", "count": 100},
            {"project": param(params, "project"), "access-site": param(params, "access-site"),
             "granularity": param(params, "granularity"), "timestamp": "2010020100", "count": 110}
        ]}),
        Endpoint::Aggregate => json!({"items": [
            {"project": param(params, "project"), "access": param(params, "access"),
             "agent": param(params, "agent"), "granularity": param(params, "granularity"),
             "timestamp": "2016010100", "views": 200},
            {"project": param(params, "project"), "access": param(params, "access"),
             "agent": param(params, "agent"), "granularity": param(params, "granularity"),
             "timestamp": "2016020100", "views": 210}
        ]}),
        Endpoint::PerArticle => json!({"items": [
            {"project": param(params, "project"), "article": param(params, "article"),
             "granularity": param(params, "granularity"), "timestamp": "2020010100",
             "access": param(params, "access"), "agent": param(params, "agent"), "views": 42}
        ]}),
        Endpoint::Top => json!({"items": [{
            "project": param(params, "project"), "access": param(params, "access"),
            "year": param(params, "year"), "month": param(params, "month"), "day": param(params, "day"),
            "articles": [
                {"article": "Main_Page", "views": 5000, "rank": 1},
                {"article": "Special:Search", "views": 4000, "rank": 2}
            ]
        }]}),
        Endpoint::TopByCountry => json!({"items": [{
            "project": param(params, "project"), "access": param(params, "access"),
            "year": param(params, "year"), "month": param(params, "month"),
            "countries": [
                {"country": "US", "views": 1000, "rank": 1, "views_ceil": 1000},
                {"country": "GB", "views": 500, "rank": 2, "views_ceil": 500}
            ]
        }]}),
        Endpoint::TopPerCountry => json!({"items": [{
            "country": param(params, "country"), "access": param(params, "access"),
            "year": param(params, "year"), "month": param(params, "month"), "day": param(params, "day"),
            "articles": []
        }]}),
    }
}

fn header() -> ApiHeader {
    ApiHeader::new("pageviews-tests/0.1", "tests@example.org")
}

fn client(transport: &Arc<MockTransport>) -> PageViewClient {
    PageViewClient::with_transport("en.wikipedia", header(), Arc::clone(transport))
}

fn aggregate_request(access: AccessMethod, start: &str, end: &str) -> AggregatePageViewRequest {
    AggregatePageViewRequest {
        access,
        agent: AgentType::All,
        granularity: Granularity::Monthly,
        start_time: start.to_string(),
        end_time: end.to_string(),
    }
}

fn assert_input_error(result: Result<pageviews_core::Table, PageViewError>) -> InputError {
    match result {
        Err(PageViewError::Input(err)) => err,
        other => panic!("expected input error, got {other:?}"),
    }
}

// ============================================================================
// Aggregated Pageviews
// ============================================================================

#[tokio::test]
async fn test_aggregate_mobile_straddle_fetches_legacy_once_and_current_twice() {
    let transport = MockTransport::canned();
    let table = client(&transport)
        .get_aggregated_pageviews(&aggregate_request(AccessMethod::Mobile, "20100101", "20170101"))
        .await
        .unwrap();

    let legacy = transport.calls_to(Endpoint::AggregateLegacy);
    let current = transport.calls_to(Endpoint::Aggregate);
    assert_eq!(legacy.len(), 1);
    assert_eq!(current.len(), 2);

    assert_eq!(legacy[0].get("access-site"), Some("mobile-site"));
    assert_eq!(legacy[0].get("start"), Some("2010010100"));
    assert_eq!(legacy[0].get("end"), Some("2015063023"));

    assert_eq!(current[0].get("access"), Some("mobile-app"));
    assert_eq!(current[1].get("access"), Some("mobile-web"));
    for params in &current {
        assert_eq!(params.get("start"), Some("2015070100"));
        assert_eq!(params.get("end"), Some("2017010100"));
        assert_eq!(params.get("agent"), Some("all-agents"));
    }

    assert_eq!(table.len(), 6);
    assert_eq!(table.get(0, "access"), Some(&json!("mobile-site")));
    assert_eq!(table.get(2, "access"), Some(&json!("mobile-app")));
    assert_eq!(table.get(4, "access"), Some(&json!("mobile-web")));
}

#[tokio::test]
async fn test_aggregate_straddle_aligns_legacy_rows() {
    let transport = MockTransport::canned();
    let table = client(&transport)
        .get_aggregated_pageviews(&aggregate_request(AccessMethod::All, "20100101", "20170101"))
        .await
        .unwrap();

    assert_eq!(transport.calls_to(Endpoint::AggregateLegacy).len(), 1);
    assert_eq!(transport.calls_to(Endpoint::Aggregate).len(), 1);
    assert_eq!(table.len(), 4);

    let mut columns = table.columns().to_vec();
    columns.sort();
    assert_eq!(
        columns,
        ["access", "agent", "granularity", "project", "timestamp", "views"]
    );

    assert_eq!(table.get(0, "access"), Some(&json!("all-access")));
    assert_eq!(table.get(0, "agent"), Some(&json!("all-agents")));
    assert_eq!(table.get(0, "views"), Some(&json!(100)));
    assert_eq!(table.get(1, "timestamp"), Some(&json!("2010020100")));
    assert_eq!(table.get(2, "views"), Some(&json!(200)));
    assert!(table.rows().iter().all(|r| !r.contains_key("count")));
}

#[tokio::test]
async fn test_aggregate_desktop_legacy_token_is_mapped() {
    let transport = MockTransport::canned();
    let table = client(&transport)
        .get_aggregated_pageviews(&aggregate_request(AccessMethod::Desktop, "20100101", "20110101"))
        .await
        .unwrap();

    assert_eq!(transport.calls_to(Endpoint::AggregateLegacy)[0].get("access-site"), Some("desktop-site"));
    assert!(transport.calls_to(Endpoint::Aggregate).is_empty());
    assert_eq!(table.get(0, "access"), Some(&json!("desktop")));
}

#[tokio::test]
async fn test_aggregate_legacy_only_keeps_inclusive_end() {
    let transport = MockTransport::canned();
    client(&transport)
        .get_aggregated_pageviews(&aggregate_request(AccessMethod::All, "20100101", "20150701"))
        .await
        .unwrap();

    let legacy = transport.calls_to(Endpoint::AggregateLegacy);
    assert_eq!(legacy.len(), 1);
    assert_eq!(legacy[0].get("end"), Some("2015070100"));
    assert!(transport.calls_to(Endpoint::Aggregate).is_empty());
}

#[tokio::test]
async fn test_aggregate_current_only() {
    let transport = MockTransport::canned();
    let table = client(&transport)
        .get_aggregated_pageviews(&aggregate_request(AccessMethod::All, "2016010100", "2016020123"))
        .await
        .unwrap();

    assert!(transport.calls_to(Endpoint::AggregateLegacy).is_empty());
    let current = transport.calls_to(Endpoint::Aggregate);
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].get("end"), Some("2016020123"));
    assert_eq!(table.len(), 2);
}

#[tokio::test]
async fn test_aggregate_rejects_before_legacy_start() {
    let transport = MockTransport::canned();
    let err = assert_input_error(
        client(&transport)
            .get_aggregated_pageviews(&aggregate_request(AccessMethod::All, "20061110", "20201110"))
            .await,
    );
    assert!(matches!(err, InputError::BeforeBoundary { .. }));
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_aggregate_rejects_bad_range() {
    let transport = MockTransport::canned();
    let c = client(&transport);

    let err = assert_input_error(
        c.get_aggregated_pageviews(&aggregate_request(AccessMethod::All, "20201112", "20201110"))
            .await,
    );
    assert!(matches!(err, InputError::StartAfterEnd { .. }));

    let err = assert_input_error(
        c.get_aggregated_pageviews(&aggregate_request(AccessMethod::All, "2020111", "20201110"))
            .await,
    );
    assert!(matches!(err, InputError::InvalidTimestamp(_)));
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_aggregate_schema_mismatch_is_an_error() {
    let transport = MockTransport::new(|endpoint, params| {
        let mut body = canned_body(endpoint, params);
        if endpoint == Endpoint::Aggregate {
            body["items"][0]["extra"] = json!(1);
            body["items"][1]["extra"] = json!(1);
        }
        Ok(body)
    });
    let err = client(&transport)
        .get_aggregated_pageviews(&aggregate_request(AccessMethod::All, "20100101", "20170101"))
        .await
        .unwrap_err();
    assert!(matches!(err, PageViewError::Table(TableError::SchemaMismatch { .. })));
}

#[tokio::test]
async fn test_aggregate_fetch_failure_fails_whole_operation() {
    let transport = MockTransport::new(|endpoint, params| {
        if params.get("access") == Some("mobile-web") {
            return Err(FetchError::Status {
                status: 500,
                url: "https://wikimedia.org".to_string(),
                body: "boom".to_string(),
            });
        }
        Ok(canned_body(endpoint, params))
    });
    let err = client(&transport)
        .get_aggregated_pageviews(&aggregate_request(AccessMethod::Mobile, "20160101", "20170101"))
        .await
        .unwrap_err();
    assert!(matches!(err, PageViewError::Fetch(FetchError::Status { status: 500, .. })));
}

#[tokio::test]
async fn test_aggregate_custom_windows_move_cutover() {
    let transport = MockTransport::canned();
    let windows = ValidityWindows {
        pageviews_start: NaiveDate::from_ymd_opt(2012, 1, 1).unwrap(),
        ..ValidityWindows::default()
    };
    client(&transport)
        .with_windows(windows)
        .get_aggregated_pageviews(&aggregate_request(AccessMethod::All, "20110101", "20130101"))
        .await
        .unwrap();

    assert_eq!(transport.calls_to(Endpoint::AggregateLegacy)[0].get("end"), Some("2011123123"));
    assert_eq!(transport.calls_to(Endpoint::Aggregate)[0].get("start"), Some("2012010100"));
}

// ============================================================================
// Per-Article Pageviews
// ============================================================================

fn article_request(access: AccessMethod, granularity: Granularity, start: &str) -> PerArticlePageViewRequest {
    PerArticlePageViewRequest {
        access,
        agent: AgentType::User,
        article: "Albert Einstein".to_string(),
        granularity,
        start_time: start.to_string(),
        end_time: "20201110".to_string(),
    }
}

#[tokio::test]
async fn test_per_article() {
    let transport = MockTransport::canned();
    let table = client(&transport)
        .get_per_article_pageviews(&article_request(AccessMethod::Desktop, Granularity::Daily, "20200101"))
        .await
        .unwrap();

    let calls = transport.calls_to(Endpoint::PerArticle);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].get("article"), Some("Albert_Einstein"));
    assert_eq!(calls[0].get("access"), Some("desktop"));
    assert_eq!(calls[0].get("agent"), Some("user"));
    assert_eq!(calls[0].get("granularity"), Some("daily"));
    assert_eq!(calls[0].get("start"), Some("2020010100"));
    assert_eq!(calls[0].get("end"), Some("2020111000"));
    assert_eq!(table.get(0, "views"), Some(&json!(42)));
}

#[tokio::test]
async fn test_per_article_rejections_send_nothing() {
    let transport = MockTransport::canned();
    let c = client(&transport);

    let err = assert_input_error(
        c.get_per_article_pageviews(&article_request(AccessMethod::All, Granularity::Hourly, "20200101"))
            .await,
    );
    assert!(matches!(err, InputError::UnsupportedGranularity { granularity: Granularity::Hourly, .. }));

    let err = assert_input_error(
        c.get_per_article_pageviews(&article_request(AccessMethod::Mobile, Granularity::Daily, "20200101"))
            .await,
    );
    assert!(matches!(err, InputError::UnsupportedAccess { access: AccessMethod::Mobile, .. }));

    let err = assert_input_error(
        c.get_per_article_pageviews(&article_request(AccessMethod::All, Granularity::Daily, "20141112"))
            .await,
    );
    assert!(matches!(err, InputError::BeforeBoundary { .. }));

    assert!(transport.calls().is_empty());
}

// ============================================================================
// Top Articles / Countries
// ============================================================================

#[tokio::test]
async fn test_top_pageviews_adds_request_columns() {
    let transport = MockTransport::canned();
    let table = client(&transport)
        .get_top_pageviews(&TopViewedArticleRequest {
            access: AccessMethod::MobileWeb,
            year: 2020,
            month: 1,
            day: DaySelector::Day(2),
        })
        .await
        .unwrap();

    let calls = transport.calls_to(Endpoint::Top);
    assert_eq!(calls[0].get("month"), Some("01"));
    assert_eq!(calls[0].get("day"), Some("02"));

    assert_eq!(table.len(), 2);
    assert_eq!(table.get(0, "article"), Some(&json!("Main_Page")));
    assert_eq!(table.get(1, "project"), Some(&json!("en.wikipedia")));
    assert_eq!(table.get(1, "access"), Some(&json!("mobile-web")));
    assert_eq!(table.get(1, "year"), Some(&json!("2020")));
    assert_eq!(table.get(1, "day"), Some(&json!("02")));
}

#[tokio::test]
async fn test_top_pageviews_whole_month_is_one_request() {
    let transport = MockTransport::canned();
    let table = client(&transport)
        .get_top_pageviews(&TopViewedArticleRequest {
            access: AccessMethod::All,
            year: 2020,
            month: 12,
            day: DaySelector::AllDays,
        })
        .await
        .unwrap();

    let calls = transport.calls_to(Endpoint::Top);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].get("day"), Some("all-days"));
    assert_eq!(table.get(0, "day"), Some(&json!("all-days")));
}

#[tokio::test]
async fn test_top_pageviews_validation() {
    let transport = MockTransport::canned();
    let c = client(&transport);
    let request = |access, year, month, day| TopViewedArticleRequest {
        access,
        year,
        month,
        day,
    };

    let cases = [
        request(AccessMethod::Mobile, 2020, 1, DaySelector::Day(1)),
        request(AccessMethod::All, 0, 1, DaySelector::Day(1)),
        request(AccessMethod::All, -2020, 1, DaySelector::Day(1)),
        request(AccessMethod::All, 2020, 0, DaySelector::Day(1)),
        request(AccessMethod::All, 2020, 13, DaySelector::Day(1)),
        request(AccessMethod::All, 2020, 2, DaySelector::Day(30)),
        request(AccessMethod::All, 2015, 6, DaySelector::AllDays),
    ];
    for case in &cases {
        let result = c.get_top_pageviews(case).await;
        assert!(matches!(result, Err(PageViewError::Input(_))), "{case:?}");
    }
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_top_viewed_country() {
    let transport = MockTransport::canned();
    let c = client(&transport);

    let table = c
        .get_top_viewed_country(&TopViewedCountryRequest {
            access: AccessMethod::All,
            year: 2015,
            month: 5,
        })
        .await
        .unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(0, "country"), Some(&json!("US")));
    assert_eq!(table.get(0, "month"), Some(&json!("05")));
    assert_eq!(table.get(0, "project"), Some(&json!("en.wikipedia")));

    let err = assert_input_error(
        c.get_top_viewed_country(&TopViewedCountryRequest {
            access: AccessMethod::All,
            year: 2015,
            month: 4,
        })
        .await,
    );
    assert!(matches!(err, InputError::BeforeBoundary { .. }));
    assert_eq!(transport.calls().len(), 1);
}

// ============================================================================
// Top Per Country
// ============================================================================

fn per_country_request(year: i32, month: u32, day: DaySelector) -> TopViewedPerCountryRequest {
    TopViewedPerCountryRequest {
        country: "FR".to_string(),
        access: AccessMethod::All,
        year,
        month,
        day,
    }
}

fn daily_articles(params: &Params) -> Value {
    let articles = match params.get("day") {
        Some("01") => json!([
            {"article": "Deaths_in_2021", "project": "en.wikipedia", "views_ceil": 1000, "rank": 1},
            {"article": "Thank_You", "project": "en.wikipedia", "views_ceil": 900, "rank": 2}
        ]),
        Some("02") => json!([
            {"article": "Thank_You", "project": "en.wikipedia", "views_ceil": 1000, "rank": 1},
            {"article": "Deaths_in_2021", "project": "en.wikipedia", "views_ceil": 500, "rank": 2}
        ]),
        _ => json!([]),
    };
    json!({"items": [{"country": "FR", "access": "all-access", "articles": articles}]})
}

#[tokio::test]
async fn test_per_country_whole_month_ranks_summed_views() {
    let transport = MockTransport::new(|_, params| Ok(daily_articles(params)));
    let table = client(&transport)
        .get_top_view_per_country(&per_country_request(2021, 1, DaySelector::AllDays))
        .await
        .unwrap();

    let calls = transport.calls_to(Endpoint::TopPerCountry);
    assert_eq!(calls.len(), 31);
    let mut days: Vec<String> = calls.iter().map(|p| param(p, "day")).collect();
    days.sort();
    assert_eq!(days.first().map(String::as_str), Some("01"));
    assert_eq!(days.last().map(String::as_str), Some("31"));

    assert_eq!(table.len(), 2);
    assert_eq!(table.get(0, "article"), Some(&json!("Thank_You")));
    assert_eq!(table.get(0, "project"), Some(&json!("en.wikipedia")));
    assert_eq!(table.get(0, "views_ceil"), Some(&json!(1900)));
    assert_eq!(table.get(0, "rank"), Some(&json!(1)));
    assert_eq!(table.get(1, "article"), Some(&json!("Deaths_in_2021")));
    assert_eq!(table.get(1, "views_ceil"), Some(&json!(1500)));
    assert_eq!(table.get(1, "rank"), Some(&json!(2)));
    for row in 0..table.len() {
        assert_eq!(table.get(row, "day"), Some(&json!("all-days")));
        assert_eq!(table.get(row, "country"), Some(&json!("FR")));
        assert_eq!(table.get(row, "month"), Some(&json!("01")));
    }
}

#[tokio::test]
async fn test_per_country_december_stops_at_year_end() {
    let transport = MockTransport::canned();
    let table = client(&transport)
        .get_top_view_per_country(&per_country_request(2021, 12, DaySelector::AllDays))
        .await
        .unwrap();

    let calls = transport.calls_to(Endpoint::TopPerCountry);
    assert_eq!(calls.len(), 31);
    assert!(calls.iter().all(|p| p.get("year") == Some("2021") && p.get("month") == Some("12")));
    assert!(table.is_empty());
}

#[tokio::test]
async fn test_per_country_single_day() {
    let transport = MockTransport::new(|_, params| Ok(daily_articles(params)));
    let table = client(&transport)
        .get_top_view_per_country(&per_country_request(2021, 1, DaySelector::Day(1)))
        .await
        .unwrap();

    assert_eq!(transport.calls().len(), 1);
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(0, "article"), Some(&json!("Deaths_in_2021")));
    assert_eq!(table.get(0, "day"), Some(&json!("01")));
}

#[tokio::test]
async fn test_per_country_validation() {
    let transport = MockTransport::canned();
    let c = client(&transport);

    let err = assert_input_error(
        c.get_top_view_per_country(&per_country_request(2020, 12, DaySelector::Day(31)))
            .await,
    );
    assert!(matches!(err, InputError::BeforeBoundary { .. }));

    let err = assert_input_error(
        c.get_top_view_per_country(&per_country_request(2020, 12, DaySelector::AllDays))
            .await,
    );
    assert!(matches!(err, InputError::BeforeBoundary { .. }));

    let err = assert_input_error(
        c.get_top_view_per_country(&per_country_request(2021, 13, DaySelector::AllDays))
            .await,
    );
    assert_eq!(err, InputError::InvalidMonth(13));

    let mut mobile = per_country_request(2021, 1, DaySelector::Day(1));
    mobile.access = AccessMethod::Mobile;
    let err = assert_input_error(c.get_top_view_per_country(&mobile).await);
    assert!(matches!(err, InputError::UnsupportedAccess { .. }));

    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_per_country_day_failure_fails_month() {
    let transport = MockTransport::new(|_, params| {
        if params.get("day") == Some("15") {
            return Err(FetchError::MissingKey("items".to_string()));
        }
        Ok(daily_articles(params))
    });
    let err = client(&transport)
        .get_top_view_per_country(&per_country_request(2021, 1, DaySelector::AllDays))
        .await
        .unwrap_err();
    assert!(matches!(err, PageViewError::Fetch(FetchError::MissingKey(_))));
}

#[test]
fn test_client_accessors() {
    let transport = MockTransport::canned();
    let c = client(&transport).with_endpoints(EndpointSet::new("http://localhost:9000"));
    assert_eq!(c.project(), "en.wikipedia");
    assert_eq!(c.windows(), &ValidityWindows::default());
    assert_eq!(c.endpoints().base_url(), "http://localhost:9000");
}
