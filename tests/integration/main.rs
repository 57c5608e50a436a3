//! Integration tests for the Kraken triangle monitor.
//!
//! Offline tests drive the full cycle through the mock quote source or a
//! local axum stub of the Depth endpoint. Tests marked `#[ignore]` hit the
//! live Kraken API.
//! Run them with: cargo test --test integration -- --ignored

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::RawQuery;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use kraken_tri_arb::arbitrage::overall_fee_factor;
use kraken_tri_arb::config::Config;
use kraken_tri_arb::error::FetchError;
use kraken_tri_arb::market::{KrakenClient, MockQuoteSource, Pair, QuoteSource};
use kraken_tri_arb::poller::{run_cycle, Poller, Scheduler};

fn triangle_source() -> MockQuoteSource {
    MockQuoteSource::new()
        .with_book(Pair::LtcUsd, 50.0, 51.0)
        .with_book(Pair::LtcXbt, 0.01, 0.0102)
        .with_book(Pair::XbtUsd, 5000.0, 5010.0)
}

const TRIANGLE_BODY: &str = r#"{
    "error": [],
    "result": {
        "XLTCZUSD": {"asks": [["51.0", "1", 1]], "bids": [["50.0", "1", 1]]},
        "XLTCXXBT": {"asks": [["0.0102", "1", 1]], "bids": [["0.01", "1", 1]]},
        "XXBTZUSD": {"asks": [["5010.0", "1", 1]], "bids": [["5000.0", "1", 1]]}
    }
}"#;

/// Serve a fixed Depth response on a local port and record each raw query.
async fn spawn_depth_stub(
    status: StatusCode,
    body: &'static str,
) -> (KrakenClient, Arc<Mutex<Vec<String>>>) {
    let queries = Arc::new(Mutex::new(Vec::new()));

    let recorded = Arc::clone(&queries);
    let router = Router::new().route(
        "/0/public/Depth",
        get(move |RawQuery(query): RawQuery| {
            let recorded = Arc::clone(&recorded);
            async move {
                recorded.lock().unwrap().push(query.unwrap_or_default());
                (status, body)
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let config = Config {
        kraken_depth_url: format!("http://{}/0/public/Depth", addr),
        ..Config::default()
    };
    (KrakenClient::new(&config).unwrap(), queries)
}

/// Report line has the exact console format.
#[tokio::test]
async fn test_cycle_report_line_format() {
    let report = run_cycle(&triangle_source()).await.unwrap();
    let line = report.to_string();

    let (clock, rest) = line.split_at(10);
    assert!(clock.starts_with('(') && clock.ends_with(')'));
    assert_eq!(rest, " [forward]: 0.97276\t[reverse]: 0.97082");
}

/// A failing fetch skips the cycle without affecting later cycles.
#[tokio::test(start_paused = true)]
async fn test_skipped_cycles_do_not_stop_scheduler() {
    let healthy = Poller::new(Arc::new(triangle_source()));
    let broken = Poller::new(Arc::new(triangle_source().fail_pair(Pair::LtcUsd)));

    let reports = Arc::new(AtomicUsize::new(0));
    let ticks = Arc::new(AtomicUsize::new(0));

    let (r, t) = (Arc::clone(&reports), Arc::clone(&ticks));
    let handle = Scheduler::new(Duration::from_secs(5)).spawn(move || {
        // Alternate between a failing and a healthy source.
        let n = t.fetch_add(1, Ordering::SeqCst);
        let poller = if n % 2 == 0 { broken.clone() } else { healthy.clone() };
        let r = Arc::clone(&r);
        async move {
            if poller.poll_once().await.is_some() {
                r.fetch_add(1, Ordering::SeqCst);
            }
        }
    });

    tokio::time::sleep(Duration::from_millis(15_500)).await;
    handle.stop().await.unwrap();

    assert_eq!(ticks.load(Ordering::SeqCst), 4);
    assert_eq!(reports.load(Ordering::SeqCst), 2);
}

/// Unknown symbols are rejected before a request is built.
#[tokio::test]
async fn test_unknown_pair_rejected() {
    let client = KrakenClient::new(&Config::default()).unwrap();

    let result = client.fetch_quote("ETHUSD").await;
    assert!(matches!(result, Err(FetchError::UnknownPair(_))));
}

/// The client asks for one level of the pair's exchange id.
#[tokio::test]
async fn test_depth_request_query_and_prices() {
    let (client, queries) = spawn_depth_stub(StatusCode::OK, TRIANGLE_BODY).await;

    let quote = client.fetch_quote("LTCUSD").await.unwrap();
    assert_eq!(quote.pair, Pair::LtcUsd);
    assert_eq!(quote.bid, 50.0);
    assert_eq!(quote.ask, 51.0);

    let queries = queries.lock().unwrap().clone();
    assert_eq!(queries, vec!["pair=XLTCZUSD&count=1".to_string()]);
}

/// A non-2xx response is a status error, whatever the body says.
#[tokio::test]
async fn test_depth_server_error_status() {
    let (client, _) = spawn_depth_stub(StatusCode::SERVICE_UNAVAILABLE, TRIANGLE_BODY).await;

    let result = client.fetch(Pair::XbtUsd).await;
    assert!(matches!(
        result,
        Err(FetchError::Status { ref pair, status: 503 }) if pair == "XXBTZUSD"
    ));
}

/// A body without `result` skips the whole cycle.
#[tokio::test]
async fn test_malformed_depth_skips_cycle() {
    let (client, queries) = spawn_depth_stub(StatusCode::OK, r#"{"error":[]}"#).await;
    let poller = Poller::new(Arc::new(client));

    assert!(poller.poll_once().await.is_none());
    assert!(!queries.lock().unwrap().is_empty());
}

/// A full cycle over HTTP requests each pair once and reports both factors.
#[tokio::test]
async fn test_cycle_over_http() {
    let (client, queries) = spawn_depth_stub(StatusCode::OK, TRIANGLE_BODY).await;

    let report = run_cycle(&client).await.unwrap();
    assert_eq!(format!("{:.5}", report.factors.forward), "0.97276");
    assert_eq!(format!("{:.5}", report.factors.reverse), "0.97082");

    let mut queries = queries.lock().unwrap().clone();
    queries.sort();
    assert_eq!(
        queries,
        vec![
            "pair=XLTCXXBT&count=1".to_string(),
            "pair=XLTCZUSD&count=1".to_string(),
            "pair=XXBTZUSD&count=1".to_string(),
        ]
    );
}

/// Fetch a live quote for every registry pair.
#[tokio::test]
#[ignore = "requires network access to api.kraken.com"]
async fn test_live_depth_for_registry() {
    let client = KrakenClient::new(&Config::default()).unwrap();

    for pair in Pair::registry() {
        let result = client.fetch_quote(&pair.symbol()).await;
        assert!(result.is_ok(), "Failed to fetch {}: {:?}", pair, result.err());

        let quote = result.unwrap();
        assert!(quote.bid > 0.0 && quote.ask > 0.0);
        println!("{}: bid={} ask={}", pair, quote.bid, quote.ask);
    }
}

/// Run a full live cycle.
#[tokio::test]
#[ignore = "requires network access to api.kraken.com"]
async fn test_live_cycle() {
    let client = KrakenClient::new(&Config::default()).unwrap();

    let report = run_cycle(&client).await;
    assert!(report.is_ok(), "Cycle failed: {:?}", report.err());

    let report = report.unwrap();
    assert!(report.factors.forward.is_finite());
    assert!(report.factors.reverse.is_finite());
    // Fees alone keep both directions well under 1 / fee^3.
    assert!(report.factors.best() < 1.0 / overall_fee_factor());
    println!("{}", report);
}
