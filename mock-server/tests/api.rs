use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_key, DEFAULT_API_KEY};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header("x-api-key", DEFAULT_API_KEY)
        .body(String::new())
        .unwrap()
}

fn post_request(uri: &str, content_type: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("x-api-key", DEFAULT_API_KEY)
        .header(http::header::CONTENT_TYPE, content_type)
        .body(body.to_string())
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_api_key_returns_401() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/chemical/fate/search/by-dtxsid/DTXSID7020182")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_api_key_returns_401() {
    let resp = app_with_key("expected")
        .oneshot(get_request("/chemical/fate/search/by-dtxsid/DTXSID7020182"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- chemical search ---

#[tokio::test]
async fn start_with_echoes_word_and_query() {
    let resp = app()
        .oneshot(get_request("/chemical/search/start-with/95-16-9?top=10"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body[0]["searchName"], "start-with");
    assert_eq!(body[0]["searchValue"], "95-16-9");
    assert_eq!(body[0]["query"], json!({"top": "10"}));
}

#[tokio::test]
async fn encoded_word_is_decoded() {
    let resp = app()
        .oneshot(get_request("/chemical/search/equal/bisphenol%20A"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body[0]["searchValue"], "bisphenol A");
}

#[tokio::test]
async fn equal_batch_splits_text_body() {
    let resp = app()
        .oneshot(post_request("/chemical/search/equal", "text/plain", "A\nB"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[1]["searchValue"], "B");
}

#[tokio::test]
async fn equal_batch_rejects_json_body() {
    let resp = app()
        .oneshot(post_request("/chemical/search/equal", "application/json", r#"["A"]"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn msready_by_mass_parses_bounds() {
    let resp = app()
        .oneshot(get_request("/chemical/msready/search/by-mass/200.9/201"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({"min": 200.9, "max": 201.0}));
}

// --- errors ---

#[tokio::test]
async fn missing_identifier_returns_404() {
    let resp = app()
        .oneshot(get_request("/hazard/search/by-dtxsid/MISSING1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn boom_identifier_returns_500() {
    let resp = app()
        .oneshot(get_request("/exposure/httk/search/by-dtxsid/BOOM"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn httk_echoes_query() {
    let resp = app()
        .oneshot(get_request("/exposure/httk/search/by-dtxsid/DTXSID7020182?species=Human"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body[0]["dtxsid"], "DTXSID7020182");
    assert_eq!(body[0]["query"], json!({"species": "Human"}));
}

// --- batches ---

#[tokio::test]
async fn hazard_batch_echoes_identifiers() {
    let resp = app()
        .oneshot(post_request("/hazard/human/search/by-dtxsid", "application/json", r#"["A","B"]"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body[0], json!({"dtxsid": "A", "humanEcoNt": "human health"}));
    assert_eq!(body[1]["dtxsid"], "B");
}

#[tokio::test]
async fn hazard_batch_over_cap_returns_400() {
    let ids: Vec<String> = (0..201).map(|i| format!("DTXSID{i}")).collect();
    let resp = app()
        .oneshot(post_request(
            "/hazard/search/by-dtxsid",
            "application/json",
            &serde_json::to_string(&ids).unwrap(),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn fate_single_returns_dtxsid() {
    let resp = app()
        .oneshot(get_request("/chemical/fate/search/by-dtxsid/DTXSID7020182"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({"dtxsid": "DTXSID7020182"}));
}

#[tokio::test]
async fn product_use_categories_need_no_identifier() {
    let resp = app()
        .oneshot(get_request("/exposure/product-data/puc"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await[0]["kindName"], "Formulation");
}
