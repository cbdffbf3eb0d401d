#![allow(dead_code)]

use clap::Parser;
use skycast::app::events::SessionEvent;
use skycast::cli::Cli;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn cli_for(base_url: &str, city: &str, units: &str) -> Cli {
    Cli::parse_from([
        "skycast",
        city,
        "--units",
        units,
        "--api-key",
        "test-key",
        "--api-url",
        base_url,
    ])
}

pub fn current_payload(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "visibility": 10000.0,
        "timezone": -18000,
        "main": {"temp": 14.3, "feels_like": 13.6, "humidity": 82.0, "pressure": 1026.0},
        "wind": {"speed": 3.4},
        "clouds": {"all": 75.0},
        "sys": {"country": "CO", "sunrise": 1_700_000_000_i64, "sunset": 1_700_042_000_i64},
        "weather": [{"description": "broken clouds", "icon": "04d"}]
    })
}

pub fn forecast_payload(entries: usize) -> serde_json::Value {
    let list: Vec<serde_json::Value> = (0..entries)
        .map(|idx| {
            serde_json::json!({
                "dt": 1_700_000_000_i64 + (idx as i64) * 10_800,
                "main": {"temp": 12.0 + idx as f64, "humidity": 70.0},
                "pop": 0.4
            })
        })
        .collect();
    serde_json::json!({"list": list, "city": {"timezone": -18000}})
}

/// Mounts 200 responses for both endpoints regardless of query.
pub async fn mount_success(server: &MockServer, name: &str) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_payload(name)))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_payload(10)))
        .mount(server)
        .await;
}

/// Pumps the event channel until the next cycle settlement arrives.
pub async fn wait_for_settlement(rx: &mut mpsc::Receiver<SessionEvent>) -> SessionEvent {
    loop {
        match rx.recv().await {
            Some(event @ SessionEvent::CycleSettled { .. }) => return event,
            Some(_) => {}
            None => panic!("event channel closed before settlement"),
        }
    }
}
