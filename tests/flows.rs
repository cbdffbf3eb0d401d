mod common;

use std::time::Duration;

use common::{cli_for, current_payload, forecast_payload, mount_success, wait_for_settlement};
use skycast::app::events::SessionEvent;
use skycast::app::session::SessionState;
use skycast::cli::UnitsArg;
use skycast::domain::weather::Units;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn unit_change_refetches_with_the_new_units() {
    let server = MockServer::start().await;
    mount_success(&server, "Bogotá").await;

    let cli = cli_for(&server.uri(), "Bogotá", "metric");
    assert_eq!(cli.units, UnitsArg::Metric);
    let mut session = SessionState::new(&cli);
    let (tx, mut rx) = mpsc::channel(16);

    session.handle_event(SessionEvent::Bootstrap, &tx);
    let settled = wait_for_settlement(&mut rx).await;
    session.handle_event(settled, &tx);

    session.handle_event(SessionEvent::ChangeUnits(Units::Imperial), &tx);
    let settled = wait_for_settlement(&mut rx).await;
    session.handle_event(settled, &tx);

    assert_eq!(session.units, Units::Imperial);
    assert_eq!(session.error, None);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 4);
    let imperial_requests = requests
        .iter()
        .filter(|req| {
            req.url
                .query_pairs()
                .any(|(key, value)| key == "units" && value == "imperial")
        })
        .count();
    assert_eq!(imperial_requests, 2);
}

#[tokio::test]
async fn manual_refresh_issues_a_fresh_pair() {
    let server = MockServer::start().await;
    mount_success(&server, "Bogotá").await;

    let cli = cli_for(&server.uri(), "Bogotá", "metric");
    let mut session = SessionState::new(&cli);
    let (tx, mut rx) = mpsc::channel(16);

    session.handle_event(SessionEvent::Bootstrap, &tx);
    let settled = wait_for_settlement(&mut rx).await;
    session.handle_event(settled, &tx);

    session.handle_event(SessionEvent::ManualRefresh, &tx);
    let settled = wait_for_settlement(&mut rx).await;
    session.handle_event(settled, &tx);

    assert_eq!(session.error, None);
    assert!(session.last_updated_at.is_some());
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 4);
}

/// Cycle A (Bogotá) is slow and settles after cycle B (Lima). B's result
/// must win regardless of settlement order.
#[tokio::test]
async fn superseded_cycle_cannot_overwrite_the_latest_result() {
    let server = MockServer::start().await;
    for endpoint in ["/weather", "/forecast"] {
        let slow_body = if endpoint == "/weather" {
            current_payload("Bogotá")
        } else {
            forecast_payload(10)
        };
        Mock::given(method("GET"))
            .and(path(endpoint))
            .and(query_param("q", "Bogotá"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(slow_body)
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let fast_body = if endpoint == "/weather" {
            current_payload("Lima")
        } else {
            forecast_payload(10)
        };
        Mock::given(method("GET"))
            .and(path(endpoint))
            .and(query_param("q", "Lima"))
            .respond_with(ResponseTemplate::new(200).set_body_json(fast_body))
            .mount(&server)
            .await;
    }

    let cli = cli_for(&server.uri(), "Bogotá", "metric");
    let mut session = SessionState::new(&cli);
    let (tx, mut rx) = mpsc::channel(16);

    session.handle_event(SessionEvent::SubmitCity("Bogotá".to_string()), &tx);
    session.handle_event(SessionEvent::SubmitCity("Lima".to_string()), &tx);

    // Lima settles first, then the delayed Bogotá cycle straggles in.
    let first = wait_for_settlement(&mut rx).await;
    let second = wait_for_settlement(&mut rx).await;
    session.handle_event(first, &tx);
    session.handle_event(second, &tx);

    let committed = session.current.as_ref().expect("latest cycle committed");
    assert_eq!(committed.location_name, "Lima");
    assert_eq!(session.city, "Lima");
    assert!(!session.loading);
}
