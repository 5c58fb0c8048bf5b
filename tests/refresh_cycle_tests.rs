/// Integration tests for the fetch, apply and render cycle against a mock zone endpoint
use httpmock::prelude::*;
use serde_json::json;
use std::{sync::Arc, time::Duration};
use tokio::sync::{mpsc, watch};

use price_table::{
    dashboard::{ApplyOutcome, PriceTable},
    pricing::{ParamField, Parameters, SelectorChoice, SortField},
    refresh::{HttpZoneSource, Poller, RefreshUpdate},
};

// Long enough that only the mount fetch and explicit refreshes run
const IDLE_INTERVAL: Duration = Duration::from_secs(60);

async fn next_update(updates: &mut mpsc::UnboundedReceiver<RefreshUpdate>) -> RefreshUpdate {
    tokio::time::timeout(Duration::from_secs(5), updates.recv())
        .await
        .expect("timed out waiting for refresh")
        .expect("poller stopped")
}

fn zones_body() -> serde_json::Value {
    json!({
        "zones": [
            {"zone": "us-east", "type": "standard", "cost_per_gb": 0.05,
             "cpm": 1.2, "spend_limit": 500, "current_usage": 10},
            {"zone": "eu-west", "type": "premium", "cost_per_gb": 0.125,
             "cpm": null, "spend_limit": null, "current_usage": 0},
            {"zone": "ap-south", "type": "standard", "cost_per_gb": null,
             "cpm": 0.8, "spend_limit": 50}
        ]
    })
}

type Harness = (
    PriceTable,
    Poller,
    watch::Sender<Parameters>,
    watch::Receiver<Parameters>,
);

fn start(server: &MockServer, params: Parameters) -> Harness {
    let source = HttpZoneSource::new(server.url("/dummy-data"), Duration::from_secs(5)).unwrap();
    let poller = Poller::new(Arc::new(source), IDLE_INTERVAL);
    let table = PriceTable::new(false);
    let (params_tx, params_rx) = watch::channel(params);
    (table, poller, params_tx, params_rx)
}

#[tokio::test]
async fn test_mount_fetches_and_derives_rows() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/dummy-data");
            then.status(200).json_body(zones_body());
        })
        .await;

    let params = Parameters::new("100", "2", "30");
    let (mut table, poller, _params_tx, params_rx) = start(&server, params.clone());
    let (handle, mut updates) = poller.spawn(params_rx);

    let update = next_update(&mut updates).await;
    assert_eq!(table.apply_refresh(update, &params), ApplyOutcome::Replaced(3));

    let rows = table.rows();
    assert_eq!(rows[0].zone, "us-east");
    assert_eq!(rows[0].total_cost, 0.10);
    assert_eq!(rows[0].total_monthly_cost, 3.00);
    assert_eq!(rows[1].total_cost, 0.25);
    assert_eq!(rows[2].total_cost, 0.0);
    assert_eq!(rows[2].current_usage, "-");

    mock.assert_hits_async(1).await;
    handle.cancel().await;
}

#[tokio::test]
async fn test_empty_zone_list_renders_empty_table() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/dummy-data");
            then.status(200).json_body(json!({"zones": []}));
        })
        .await;

    let params = Parameters::default();
    let (mut table, poller, _params_tx, params_rx) = start(&server, params.clone());
    let (handle, mut updates) = poller.spawn(params_rx);

    let update = next_update(&mut updates).await;
    assert_eq!(table.apply_refresh(update, &params), ApplyOutcome::Replaced(0));
    assert!(table.rows().is_empty());
    assert_eq!(table.totals(), (0.0, 0.0));

    handle.cancel().await;
}

#[tokio::test]
async fn test_server_error_keeps_previous_rows() {
    let server = MockServer::start_async().await;
    let mut ok = server
        .mock_async(|when, then| {
            when.method(GET).path("/dummy-data");
            then.status(200).json_body(zones_body());
        })
        .await;

    let params = Parameters::new("0", "2", "30");
    let (mut table, poller, _params_tx, params_rx) = start(&server, params.clone());
    let (handle, mut updates) = poller.spawn(params_rx);

    let update = next_update(&mut updates).await;
    table.apply_refresh(update, &params);
    let before = table.rows().to_vec();

    ok.delete_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/dummy-data");
            then.status(500);
        })
        .await;

    handle.refresh_now();
    let update = next_update(&mut updates).await;
    assert!(update.outcome.is_err());
    assert_eq!(table.apply_refresh(update, &params), ApplyOutcome::Failed);

    assert_eq!(table.rows(), before.as_slice());
    assert!(table.last_error().unwrap().contains("500"));

    handle.cancel().await;
}

#[tokio::test]
async fn test_parameter_change_refetches_and_restores_source_order() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/dummy-data");
            then.status(200).json_body(zones_body());
        })
        .await;

    let mut params = Parameters::new("0", "2", "30");
    let (mut table, poller, params_tx, params_rx) = start(&server, params.clone());
    let (handle, mut updates) = poller.spawn(params_rx);

    let update = next_update(&mut updates).await;
    table.apply_refresh(update, &params);

    table.select(SortField::TotalCost, SelectorChoice::HighToLow);
    let sorted: Vec<&str> = table.rows().iter().map(|r| r.zone.as_str()).collect();
    assert_eq!(sorted, vec!["eu-west", "us-east", "ap-south"]);

    assert!(params.set_raw(ParamField::ResponseSize, "4"));
    params_tx.send_replace(params.clone());

    let update = next_update(&mut updates).await;
    assert_eq!(table.apply_refresh(update, &params), ApplyOutcome::Replaced(3));

    let restored: Vec<&str> = table.rows().iter().map(|r| r.zone.as_str()).collect();
    assert_eq!(restored, vec!["us-east", "eu-west", "ap-south"]);
    assert_eq!(table.rows()[0].total_cost, 0.20);
    assert_eq!(table.sort_state().field, SortField::None);

    mock.assert_hits_async(2).await;
    handle.cancel().await;
}
