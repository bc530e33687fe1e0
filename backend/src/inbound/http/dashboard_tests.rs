//! Tests for dashboard HTTP handlers.

use actix_web::cookie::Cookie;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::Value;

use super::*;
use crate::domain::Variant;
use crate::inbound::http::test_utils::{registry_state, seeded_mock_state, test_session_middleware};

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api/v1")
            .wrap(test_session_middleware())
            .service(render_dashboard)
            .service(export_time_series)
            .service(export_product_summary)
            .service(clear_cache),
    )
}

fn session_cookie(res: &actix_web::dev::ServiceResponse) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

fn detail_code(body: &Value) -> Option<&str> {
    body.pointer("/details/code").and_then(Value::as_str)
}

#[actix_web::test]
async fn render_returns_sections_in_order() {
    let app = actix_test::init_service(test_app(seeded_mock_state())).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/dashboard").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()
            .get(header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok()),
        Some("private, no-cache, must-revalidate")
    );
    let body: Value = actix_test::read_body_json(res).await;
    let kinds: Vec<_> = body["sections"]
        .as_array()
        .expect("sections array")
        .iter()
        .filter_map(|section| section.get("section").and_then(Value::as_str))
        .collect();
    assert_eq!(kinds, vec!["header", "notices", "body", "footer"]);
    assert_eq!(body["variant"], "styled");
}

#[actix_web::test]
async fn raw_table_honours_rows_control() {
    let app = actix_test::init_service(test_app(seeded_mock_state())).await;
    let req = actix_test::TestRequest::get()
        .uri("/api/v1/dashboard?showRaw=true&rows=3")
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, req).await;
    let rows = body
        .pointer("/sections/2/rawTable/rows")
        .and_then(Value::as_array)
        .expect("raw table rows");
    assert_eq!(rows.len(), 3);
}

#[rstest]
#[case("menu=settings", "menu", "invalid_menu")]
#[case("rows=0", "rows", "out_of_range")]
#[case("rows=91", "rows", "out_of_range")]
#[case("rows=lots", "rows", "invalid_integer")]
#[case("darkMode=maybe", "darkMode", "invalid_boolean")]
#[case("startDate=2023-12-31", "startDate", "out_of_range")]
#[case("endDate=03/01/2024", "endDate", "invalid_date")]
#[case("startDate=2024-03-01&endDate=2024-02-01", "startDate", "inverted_range")]
#[actix_web::test]
async fn invalid_controls_are_rejected(
    #[case] query: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(seeded_mock_state())).await;
    let req = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/dashboard?{query}"))
        .to_request();
    let res = actix_test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body.pointer("/details/field").and_then(Value::as_str), Some(field));
    assert_eq!(detail_code(&body), Some(code));
}

#[actix_web::test]
async fn export_is_a_csv_attachment() {
    let app = actix_test::init_service(test_app(seeded_mock_state())).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/dashboard/export.csv")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let header_str = |name| {
        res.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };
    assert_eq!(
        header_str(header::CONTENT_TYPE).as_deref(),
        Some("text/csv; charset=utf-8")
    );
    assert_eq!(
        header_str(header::CONTENT_DISPOSITION).as_deref(),
        Some("attachment; filename=\"dashboard_data.csv\"")
    );
    let body = actix_test::read_body(res).await;
    let text = std::str::from_utf8(&body).expect("utf8 CSV");
    let rows = dashboard_data::time_series_from_csv(text).expect("CSV re-imports");
    assert_eq!(rows.len(), 90);
}

#[actix_web::test]
async fn product_summary_export_lists_five_products() {
    let app = actix_test::init_service(test_app(seeded_mock_state())).await;
    let req = actix_test::TestRequest::get()
        .uri("/api/v1/dashboard/products.csv")
        .to_request();
    let body = actix_test::call_and_read_body(&app, req).await;
    let text = std::str::from_utf8(&body).expect("utf8 CSV");
    assert_eq!(text.lines().count(), 6);
}

#[actix_web::test]
async fn clear_cache_reports_whether_a_dataset_was_held() {
    let app = actix_test::init_service(test_app(registry_state(Variant::Analytics))).await;

    let first = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/dashboard/cache/clear")
            .to_request(),
    )
    .await;
    let cookie = session_cookie(&first).expect("session cookie");
    let body: CacheClearResponse = actix_test::read_body_json(first).await;
    assert!(!body.cleared);

    let render = actix_test::TestRequest::get()
        .uri("/api/v1/dashboard")
        .cookie(cookie.clone())
        .to_request();
    assert_eq!(
        actix_test::call_service(&app, render).await.status(),
        StatusCode::OK
    );

    let clear = actix_test::TestRequest::post()
        .uri("/api/v1/dashboard/cache/clear")
        .cookie(cookie)
        .to_request();
    let body: CacheClearResponse = actix_test::call_and_read_body_json(&app, clear).await;
    assert!(body.cleared);
}

#[actix_web::test]
async fn refresh_regenerates_unseeded_data() {
    let app = actix_test::init_service(test_app(registry_state(Variant::Analytics))).await;
    let first = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/dashboard/export.csv")
            .to_request(),
    )
    .await;
    let cookie = session_cookie(&first).expect("session cookie");
    let before = actix_test::read_body(first).await;

    let again = actix_test::TestRequest::get()
        .uri("/api/v1/dashboard/export.csv")
        .cookie(cookie.clone())
        .to_request();
    assert_eq!(actix_test::call_and_read_body(&app, again).await, before);

    let refresh = actix_test::TestRequest::get()
        .uri("/api/v1/dashboard?refresh=true")
        .cookie(cookie.clone())
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, refresh).await;
    assert_eq!(
        body.pointer("/sections/1/items/0/message").and_then(Value::as_str),
        Some("Cache cleared!")
    );

    let after = actix_test::TestRequest::get()
        .uri("/api/v1/dashboard/export.csv")
        .cookie(cookie)
        .to_request();
    assert_ne!(actix_test::call_and_read_body(&app, after).await, before);
}
