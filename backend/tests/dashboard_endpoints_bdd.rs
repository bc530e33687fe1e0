//! Behaviour tests for the dashboard HTTP surface.
//!
//! Each scenario drives a real Actix server over loopback so the cookie
//! session, the trace middleware and the per-session dataset cache are
//! exercised together.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

#[path = "support/harness.rs"]
mod harness;

use actix_web::http::header;
use awc::Client;
use backend::domain::TRACE_ID_HEADER;
use chrono::TimeDelta;
use harness::{Recorded, SharedWorld, WorldFixture, with_world_async};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;

#[fixture]
fn world() -> WorldFixture {
    harness::world()
}

fn header_value(headers: &header::HeaderMap, name: impl header::AsHeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Send a request and record the response. `cookie` is replayed when set;
/// the returned cookie is whatever the server issued, if anything.
fn perform(
    world: &SharedWorld,
    path: &str,
    cookie: Option<String>,
    upload: Option<&'static [u8]>,
) -> (Recorded, Option<String>) {
    let path = path.to_owned();
    with_world_async(world, |base_url| async move {
        let client = Client::default();
        let url = format!("{base_url}{path}");
        let mut request = match upload {
            Some(_) => client.post(url),
            None => client.get(url),
        };
        if let Some(cookie) = cookie {
            request = request.insert_header((header::COOKIE, cookie));
        }
        let mut response = match upload {
            Some(body) => request.send_body(body).await.expect("upload request"),
            None => request.send().await.expect("request"),
        };

        let headers = response.headers();
        let issued_cookie = header_value(headers, header::SET_COOKIE)
            .and_then(|value| value.split(';').next().map(str::to_owned));
        let recorded = Recorded {
            status: response.status().as_u16(),
            trace_id: header_value(headers, TRACE_ID_HEADER),
            content_type: header_value(headers, header::CONTENT_TYPE),
            content_disposition: header_value(headers, header::CONTENT_DISPOSITION),
            body: Vec::new(),
        };
        let body = response.body().await.expect("response body");
        (
            Recorded {
                body: body.to_vec(),
                ..recorded
            },
            issued_cookie,
        )
    })
}

fn record(world: &SharedWorld, recorded: Recorded) {
    world.borrow_mut().responses.push(recorded);
}

fn last(world: &SharedWorld) -> Recorded {
    world
        .borrow()
        .responses
        .last()
        .cloned()
        .expect("a response was recorded")
}

fn json(recorded: &Recorded) -> Value {
    serde_json::from_slice(&recorded.body).expect("JSON body")
}

fn raw_rows(recorded: &Recorded) -> Value {
    json(recorded)
        .pointer("/sections/2/rawTable/rows")
        .cloned()
        .expect("raw table rows")
}

fn last_two_raw_rows(world: &SharedWorld) -> (Value, Value) {
    let ctx = world.borrow();
    let [.., previous, latest] = ctx.responses.as_slice() else {
        panic!("expected at least two responses");
    };
    (raw_rows(previous), raw_rows(latest))
}

#[given("a running dashboard server")]
fn a_running_dashboard_server(world: &WorldFixture) {
    let _ = world;
}

#[when("the client requests \"{path}\"")]
fn the_client_requests(world: &WorldFixture, path: String) {
    let shared = world.world();
    let cookie = shared.borrow().session_cookie.clone();
    let (recorded, issued) = perform(&shared, &path, cookie, None);
    if let Some(issued) = issued {
        shared.borrow_mut().session_cookie = Some(issued);
    }
    record(&shared, recorded);
}

#[when("a new client requests \"{path}\"")]
fn a_new_client_requests(world: &WorldFixture, path: String) {
    let shared = world.world();
    let (recorded, _) = perform(&shared, &path, None, None);
    record(&shared, recorded);
}

#[when("the client uploads \"{file_name}\"")]
fn the_client_uploads(world: &WorldFixture, file_name: String) {
    let shared = world.world();
    let path = format!("/api/v1/uploads/preview?fileName={file_name}");
    let (recorded, _) = perform(&shared, &path, None, Some(b"name,score\nada,9\n"));
    record(&shared, recorded);
}

#[when("the session stays idle for {minutes} minutes")]
fn the_session_stays_idle(world: &WorldFixture, minutes: i64) {
    world
        .world()
        .borrow()
        .clock
        .advance(TimeDelta::minutes(minutes));
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &WorldFixture, status: u16) {
    assert_eq!(last(&world.world()).status, status);
}

#[then("the sections are header, notices, body and footer")]
fn the_sections_are_in_order(world: &WorldFixture) {
    let body = json(&last(&world.world()));
    let kinds: Vec<_> = body
        .get("sections")
        .and_then(Value::as_array)
        .expect("sections array")
        .iter()
        .filter_map(|section| section.get("section").and_then(Value::as_str))
        .collect();
    assert_eq!(kinds, vec!["header", "notices", "body", "footer"]);
}

#[then("the response carries a trace id")]
fn the_response_carries_a_trace_id(world: &WorldFixture) {
    let recorded = last(&world.world());
    let trace_id = recorded.trace_id.as_deref().expect("trace id header");
    assert!(uuid::Uuid::parse_str(trace_id).is_ok());
    if recorded.status >= 400 {
        let body = json(&recorded);
        assert_eq!(body.get("traceId").and_then(Value::as_str), Some(trace_id));
    }
}

#[then("the raw rows match the previous response")]
fn the_raw_rows_match(world: &WorldFixture) {
    let (previous, latest) = last_two_raw_rows(&world.world());
    assert_eq!(previous, latest);
}

#[then("the raw rows differ from the previous response")]
fn the_raw_rows_differ(world: &WorldFixture) {
    let (previous, latest) = last_two_raw_rows(&world.world());
    assert_ne!(previous, latest);
}

#[then("the notices include \"{message}\"")]
fn the_notices_include(world: &WorldFixture, message: String) {
    let body = json(&last(&world.world()));
    let messages: Vec<_> = body
        .pointer("/sections/1/items")
        .and_then(Value::as_array)
        .expect("notice items")
        .iter()
        .filter_map(|item| item.get("message").and_then(Value::as_str))
        .collect();
    assert!(messages.contains(&message.as_str()), "notices: {messages:?}");
}

#[then("the error details name field \"{field}\" with code \"{code}\"")]
fn the_error_details_name(world: &WorldFixture, field: String, code: String) {
    let body = json(&last(&world.world()));
    assert_eq!(body.get("code").and_then(Value::as_str), Some("invalid_request"));
    assert_eq!(
        body.pointer("/details/field").and_then(Value::as_str),
        Some(field.as_str())
    );
    assert_eq!(
        body.pointer("/details/code").and_then(Value::as_str),
        Some(code.as_str())
    );
}

#[then("the download is a CSV attachment named \"{file_name}\" with {lines} lines")]
fn the_download_is_a_csv_attachment(world: &WorldFixture, file_name: String, lines: usize) {
    let recorded = last(&world.world());
    let content_type = recorded.content_type.as_deref().expect("content type");
    assert!(content_type.starts_with("text/csv"), "content type: {content_type}");
    let disposition = recorded
        .content_disposition
        .as_deref()
        .expect("content disposition");
    assert!(disposition.starts_with("attachment"), "disposition: {disposition}");
    assert!(disposition.contains(&file_name), "disposition: {disposition}");
    let text = String::from_utf8(recorded.body).expect("utf-8 CSV");
    assert_eq!(text.lines().count(), lines);
}

#[scenario(
    path = "tests/features/dashboard_endpoints.feature",
    name = "A render pass emits sections in a fixed order"
)]
fn render_pass_emits_sections_in_order(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/dashboard_endpoints.feature",
    name = "Repeated renders reuse the session dataset"
)]
fn repeated_renders_reuse_the_session_dataset(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/dashboard_endpoints.feature",
    name = "Separate sessions get independent datasets"
)]
fn separate_sessions_get_independent_datasets(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/dashboard_endpoints.feature",
    name = "Refresh regenerates the session dataset"
)]
fn refresh_regenerates_the_session_dataset(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/dashboard_endpoints.feature",
    name = "Idle sessions lose their cached dataset"
)]
fn idle_sessions_lose_their_cached_dataset(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/dashboard_endpoints.feature",
    name = "Invalid controls are rejected with field details"
)]
fn invalid_controls_are_rejected(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/dashboard_endpoints.feature",
    name = "The time series downloads as a CSV attachment"
)]
fn time_series_downloads_as_csv(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/dashboard_endpoints.feature",
    name = "Unsupported uploads are rejected"
)]
fn unsupported_uploads_are_rejected(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/dashboard_endpoints.feature",
    name = "Readiness is reported once the server is up"
)]
fn readiness_is_reported(world: WorldFixture) {
    drop(world);
}
