#[path = "../support/mod.rs"]
mod support;

use std::future::Future;
use std::sync::Arc;
use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

use marketview_core::http_client::redact_url;
use marketview_core::{
    AlphaVantageClient, HttpResponse, MalformedRecord, MarketDataError, SecurityRequest,
    SecuritySource,
};
use serde_json::{json, Value};

use support::{daily_payload, daily_row, test_config, ScriptedHttpClient, API_KEY, BASE_URL};

/// One provider answer and the outcome a caller must see for it.
struct WireCase {
    name: &'static str,
    time_series: HttpResponse,
    expect: Expect,
}

enum Expect {
    Bars(usize),
    Unavailable(&'static str),
    Malformed(fn(&MalformedRecord) -> bool),
}

fn body(value: Value) -> HttpResponse {
    HttpResponse::ok_json(value.to_string())
}

fn wire_cases() -> Vec<WireCase> {
    vec![
        WireCase {
            name: "string fields with dividend and split columns",
            time_series: body(daily_payload(vec![
                ("2024-03-01", daily_row(185.0, 188.5, 184.2, 187.9, 4_200_000)),
                ("2024-02-29", daily_row(184.0, 186.0, 182.5, 185.0, 3_900_000)),
                ("2024-02-28", daily_row(183.0, 185.1, 182.9, 184.0, 3_100_000)),
            ])),
            expect: Expect::Bars(3),
        },
        WireCase {
            name: "numeric JSON fields",
            time_series: body(json!({
                "Time Series (Daily)": {
                    "2024-01-02": {
                        "1. open": 10, "2. high": 12.5, "3. low": 9.75, "4. close": 12,
                        "5. adjusted close": 11.9, "6. volume": 1000
                    }
                }
            })),
            expect: Expect::Bars(1),
        },
        WireCase {
            name: "empty series object",
            time_series: body(json!({ "Time Series (Daily)": {} })),
            expect: Expect::Unavailable("no rows"),
        },
        WireCase {
            name: "unknown symbol",
            time_series: body(json!({
                "Error Message": "Invalid API call. Please retry or visit the documentation."
            })),
            expect: Expect::Unavailable("Invalid API call"),
        },
        WireCase {
            name: "premium endpoint notice",
            time_series: body(json!({
                "Information": "This is a premium endpoint."
            })),
            expect: Expect::Unavailable("premium endpoint"),
        },
        WireCase {
            name: "payload without series or diagnostics",
            time_series: body(json!({ "Meta Data": {} })),
            expect: Expect::Unavailable("Time Series (Daily)"),
        },
        WireCase {
            name: "HTML error page",
            time_series: HttpResponse::ok_json("<html>bad gateway</html>"),
            expect: Expect::Unavailable("not valid JSON"),
        },
        WireCase {
            name: "JSON array body",
            time_series: body(json!([1, 2, 3])),
            expect: Expect::Unavailable("not a JSON object"),
        },
        WireCase {
            name: "series is a string",
            time_series: body(json!({ "Time Series (Daily)": "none" })),
            expect: Expect::Malformed(|error| matches!(error, MalformedRecord::SeriesNotObject)),
        },
        WireCase {
            name: "row is an array",
            time_series: body(json!({ "Time Series (Daily)": { "2024-01-02": [1, 2] } })),
            expect: Expect::Malformed(|error| {
                matches!(error, MalformedRecord::RowNotObject { date } if date == "2024-01-02")
            }),
        },
        WireCase {
            name: "date key in another format",
            time_series: body(daily_payload(vec![(
                "01/02/2024",
                daily_row(10.0, 12.0, 9.0, 11.0, 1_000),
            )])),
            expect: Expect::Malformed(|error| {
                matches!(error, MalformedRecord::InvalidDate { value } if value == "01/02/2024")
            }),
        },
        WireCase {
            name: "row without volume",
            time_series: body(json!({
                "Time Series (Daily)": {
                    "2024-01-02": {
                        "1. open": "10", "2. high": "12", "3. low": "9", "4. close": "11",
                        "5. adjusted close": "11"
                    }
                }
            })),
            expect: Expect::Malformed(|error| {
                matches!(error, MalformedRecord::MissingField { field, .. } if *field == "volume")
            }),
        },
        WireCase {
            name: "high below close",
            time_series: body(daily_payload(vec![(
                "2024-01-02",
                daily_row(10.0, 10.5, 9.0, 11.0, 1_000),
            )])),
            expect: Expect::Malformed(|error| matches!(error, MalformedRecord::InvalidBar { .. })),
        },
    ]
}

#[test]
fn time_series_wire_shapes_map_to_documented_outcomes() {
    for case in wire_cases() {
        let http = Arc::new(ScriptedHttpClient::with_responses(
            Ok(case.time_series),
            Ok(body(json!({}))),
        ));
        let client = AlphaVantageClient::with_http_client(http, test_config());
        let request = SecurityRequest::parse("IBM", None).expect("valid request");

        let result = block_on(client.fetch_security(request));

        match (case.expect, result) {
            (Expect::Bars(count), Ok(snapshot)) => {
                assert_eq!(snapshot.prices.len(), count, "case '{}': bar count", case.name);
                let dates = snapshot.prices.dates();
                assert!(
                    dates.windows(2).all(|pair| pair[0] < pair[1]),
                    "case '{}': dates must be ascending",
                    case.name
                );
            }
            (Expect::Unavailable(fragment), Err(MarketDataError::DataUnavailable { reason, .. })) => {
                assert!(
                    reason.contains(fragment),
                    "case '{}': reason '{reason}' should mention '{fragment}'",
                    case.name
                );
            }
            (Expect::Malformed(check), Err(MarketDataError::MalformedRecord(error))) => {
                assert!(check(&error), "case '{}': unexpected {error:?}", case.name);
            }
            (_, other) => panic!("case '{}': unexpected outcome {other:?}", case.name),
        }
    }
}

#[test]
fn overview_wire_shapes_never_fail_the_request() {
    let overviews = [
        json!({}),
        json!([]),
        json!("Invalid API call"),
        json!({ "Information": "rate limited" }),
        json!({ "Name": null, "PERatio": "-", "Beta": "None", "EPS": "" }),
        json!({ "Name": "IBM", "PERatio": 21.4, "EBITDA": 14_600_000_000_u64 }),
    ];

    for overview in overviews {
        let http = Arc::new(ScriptedHttpClient::new(
            daily_payload(vec![("2024-01-02", daily_row(10.0, 12.0, 9.0, 11.0, 1_000))]),
            overview.clone(),
        ));
        let client = AlphaVantageClient::with_http_client(http, test_config());
        let request = SecurityRequest::parse("IBM", None).expect("valid request");

        let snapshot = block_on(client.fetch_security(request))
            .unwrap_or_else(|error| panic!("overview {overview} failed the request: {error}"));
        assert_eq!(snapshot.prices.len(), 1, "overview {overview}");
    }
}

#[test]
fn numeric_overview_values_are_read_as_numbers() {
    let http = Arc::new(ScriptedHttpClient::new(
        daily_payload(vec![("2024-01-02", daily_row(10.0, 12.0, 9.0, 11.0, 1_000))]),
        json!({ "Name": "IBM", "PERatio": 21.4, "EBITDA": 14_600_000_000_u64 }),
    ));
    let client = AlphaVantageClient::with_http_client(http, test_config());
    let request = SecurityRequest::parse("IBM", None).expect("valid request");

    let snapshot = block_on(client.fetch_security(request)).expect("loads");

    assert_eq!(snapshot.fundamentals.known_count(), 3);
    assert_eq!(snapshot.fundamentals.pe_ratio.as_known(), Some(&21.4));
    assert_eq!(snapshot.fundamentals.ebitda.as_known(), Some(&14_600_000_000.0));
}

#[test]
fn request_urls_follow_the_query_contract() {
    let http = Arc::new(ScriptedHttpClient::new(
        daily_payload(vec![("2024-01-02", daily_row(10.0, 12.0, 9.0, 11.0, 1_000))]),
        json!({}),
    ));
    let client = AlphaVantageClient::with_http_client(http.clone(), test_config());
    let request = SecurityRequest::parse("brk.b", Some("nyse")).expect("valid request");

    block_on(client.fetch_security(request)).expect("loads");

    let urls = http.recorded_urls();
    assert_eq!(urls.len(), 2);
    for url in &urls {
        assert!(url.starts_with(BASE_URL), "{url}");
        assert!(url.contains("symbol=BRK.B"), "{url}");
        assert!(url.contains(&format!("apikey={API_KEY}")), "{url}");

        let redacted = redact_url(url);
        assert!(!redacted.contains(API_KEY), "{redacted}");
        assert!(redacted.contains("apikey=***"), "{redacted}");
    }
    assert!(urls.iter().any(|url| url.contains("function=TIME_SERIES_DAILY_ADJUSTED")
        && url.contains("outputsize=compact")
        && url.contains("market=NYSE")));
    assert!(urls.iter().any(|url| url.contains("function=OVERVIEW")));
}

fn block_on<F>(future: F) -> F::Output
where
    F: Future,
{
    let waker = noop_waker();
    let mut context = Context::from_waker(&waker);
    let mut future = std::pin::pin!(future);

    loop {
        match future.as_mut().poll(&mut context) {
            Poll::Ready(output) => return output,
            Poll::Pending => std::thread::yield_now(),
        }
    }
}

fn noop_waker() -> Waker {
    // SAFETY: The vtable functions never dereference the data pointer and are no-op operations.
    unsafe { Waker::from_raw(noop_raw_waker()) }
}

fn noop_raw_waker() -> RawWaker {
    RawWaker::new(std::ptr::null(), &NOOP_RAW_WAKER_VTABLE)
}

unsafe fn noop_raw_waker_clone(_: *const ()) -> RawWaker {
    noop_raw_waker()
}

unsafe fn noop_raw_waker_wake(_: *const ()) {}

static NOOP_RAW_WAKER_VTABLE: RawWakerVTable = RawWakerVTable::new(
    noop_raw_waker_clone,
    noop_raw_waker_wake,
    noop_raw_waker_wake,
    noop_raw_waker_wake,
);
