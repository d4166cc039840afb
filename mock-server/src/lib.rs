//! In-process fake of the CompTox REST service.
//!
//! Serves canned JSON for the chemical, exposure, hazard and fate endpoints.
//! Responses echo the identifiers they were asked about so callers can check
//! what actually went over the wire. Identifiers starting with `MISSING`
//! answer 404 and those starting with `BOOM` answer 500.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const API_KEY_HEADER: &str = "x-api-key";
pub const DEFAULT_API_KEY: &str = "test-api-key";

pub const HAZARD_BATCH_MAX: usize = 200;
pub const FATE_BATCH_MAX: usize = 1000;

#[derive(Clone)]
struct AppState {
    api_key: Arc<str>,
}

type Params = Query<BTreeMap<String, String>>;

/// Router accepting `DEFAULT_API_KEY`.
pub fn app() -> Router {
    app_with_key(DEFAULT_API_KEY)
}

/// Router accepting only `api_key` in the `x-api-key` header.
pub fn app_with_key(api_key: &str) -> Router {
    let state = AppState {
        api_key: Arc::from(api_key),
    };
    Router::new()
        .route("/chemical/search/start-with/{word}", get(search_start_with))
        .route("/chemical/search/equal/{word}", get(search_equal))
        .route("/chemical/search/contain/{word}", get(search_contain))
        .route("/chemical/search/equal", post(search_equal_batch))
        .route("/chemical/msready/search/by-mass/{min}/{max}", get(msready_by_mass))
        .route("/chemical/msready/search/by-formula/{formula}", get(msready_by_formula))
        .route("/chemical/msready/search/by-dtxcid/{dtxcid}", get(msready_by_dtxcid))
        .route(
            "/exposure/functional-use/probability/search/by-dtxsid/{dtxsid}",
            get(functional_use_probability),
        )
        .route("/exposure/functional-use/search/by-dtxsid/{dtxsid}", get(functional_use))
        .route("/exposure/product-data/puc", get(product_use_categories))
        .route("/exposure/product-data/search/by-dtxsid/{dtxsid}", get(product_data))
        .route("/exposure/httk/search/by-dtxsid/{dtxsid}", get(httk))
        .route("/hazard/search/by-dtxsid/{dtxsid}", get(hazard_all))
        .route("/hazard/human/search/by-dtxsid/{dtxsid}", get(hazard_human))
        .route("/hazard/eco/search/by-dtxsid/{dtxsid}", get(hazard_eco))
        .route("/hazard/search/by-dtxsid", post(hazard_all_batch))
        .route("/hazard/human/search/by-dtxsid", post(hazard_human_batch))
        .route("/hazard/eco/search/by-dtxsid", post(hazard_eco_batch))
        .route("/chemical/fate/search/by-dtxsid/{dtxsid}", get(fate))
        .route("/chemical/fate/search/by-dtxsid", post(fate_batch))
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_key(listener, DEFAULT_API_KEY).await
}

pub async fn run_with_key(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_key(api_key)).await
}

async fn require_api_key(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());
    if presented != Some(&*state.api_key) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"title": "Unauthorized"}))).into_response();
    }
    next.run(request).await
}

/// Map the magic identifier prefixes to error statuses.
fn lookup(id: &str) -> Result<(), (StatusCode, Json<Value>)> {
    if id.starts_with("MISSING") {
        return Err((StatusCode::NOT_FOUND, Json(json!({"title": "Not Found", "detail": id}))));
    }
    if id.starts_with("BOOM") {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"title": "Internal Server Error"})),
        ));
    }
    Ok(())
}

type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn search_hits(search_name: &str, word: &str, params: BTreeMap<String, String>) -> Reply {
    lookup(word)?;
    Ok(Json(json!([{
        "dtxsid": "DTXSID7020182",
        "preferredName": "Bisphenol A",
        "casrn": "80-05-7",
        "searchName": search_name,
        "searchValue": word,
        "rank": 1,
        "query": params,
    }])))
}

async fn search_start_with(Path(word): Path<String>, Query(params): Params) -> Reply {
    search_hits("start-with", &word, params)
}

async fn search_equal(Path(word): Path<String>, Query(params): Params) -> Reply {
    search_hits("equal", &word, params)
}

async fn search_contain(Path(word): Path<String>, Query(params): Params) -> Reply {
    search_hits("contain", &word, params)
}

async fn search_equal_batch(headers: HeaderMap, body: String) -> Reply {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !content_type.starts_with("text/plain") {
        return Err((
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Json(json!({"title": "expected text/plain"})),
        ));
    }
    let hits: Vec<Value> = body
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| json!({"searchName": "equal", "searchValue": line}))
        .collect();
    Ok(Json(Value::Array(hits)))
}

async fn msready_by_mass(Path((min, max)): Path<(String, String)>) -> Reply {
    let (Ok(min), Ok(max)) = (min.parse::<f64>(), max.parse::<f64>()) else {
        return Err((StatusCode::BAD_REQUEST, Json(json!({"title": "mass must be numeric"}))));
    };
    Ok(Json(json!({"min": min, "max": max})))
}

async fn msready_by_formula(Path(formula): Path<String>) -> Reply {
    lookup(&formula)?;
    Ok(Json(json!([format!("formula:{formula}")])))
}

async fn msready_by_dtxcid(Path(dtxcid): Path<String>) -> Reply {
    lookup(&dtxcid)?;
    Ok(Json(json!([format!("dtxcid:{dtxcid}")])))
}

async fn functional_use_probability(Path(dtxsid): Path<String>) -> Reply {
    lookup(&dtxsid)?;
    Ok(Json(json!([{"harmonizedFunctionalUse": "plasticizer", "probability": 0.75}])))
}

async fn functional_use(Path(dtxsid): Path<String>) -> Reply {
    lookup(&dtxsid)?;
    Ok(Json(json!([{"id": 1, "dtxsid": dtxsid, "reportedfunction": "monomer"}])))
}

async fn product_use_categories() -> Json<Value> {
    Json(json!([{"id": 1, "kindName": "Formulation", "genCat": "Home maintenance", "definition": null}]))
}

async fn product_data(Path(dtxsid): Path<String>) -> Reply {
    lookup(&dtxsid)?;
    Ok(Json(json!([{"id": 7, "dtxsid": dtxsid, "productname": "adhesive"}])))
}

async fn httk(Path(dtxsid): Path<String>, Query(params): Params) -> Reply {
    lookup(&dtxsid)?;
    Ok(Json(json!([{
        "dtxsid": dtxsid,
        "parameter": "Css",
        "predicted": 1.5,
        "species": "Human",
        "query": params,
    }])))
}

fn hazard_records(group: &str, dtxsids: &[String]) -> Value {
    Value::Array(
        dtxsids
            .iter()
            .map(|dtxsid| json!({"dtxsid": dtxsid, "humanEcoNt": group}))
            .collect(),
    )
}

fn hazard_single(group: &str, dtxsid: String) -> Reply {
    lookup(&dtxsid)?;
    Ok(Json(hazard_records(group, &[dtxsid])))
}

async fn hazard_all(Path(dtxsid): Path<String>) -> Reply {
    hazard_single("all", dtxsid)
}

async fn hazard_human(Path(dtxsid): Path<String>) -> Reply {
    hazard_single("human health", dtxsid)
}

async fn hazard_eco(Path(dtxsid): Path<String>) -> Reply {
    hazard_single("eco", dtxsid)
}

fn hazard_batch(group: &str, dtxsids: Vec<String>) -> Reply {
    if dtxsids.len() > HAZARD_BATCH_MAX {
        return Err((StatusCode::BAD_REQUEST, Json(json!({"title": "too many identifiers"}))));
    }
    Ok(Json(hazard_records(group, &dtxsids)))
}

async fn hazard_all_batch(Json(dtxsids): Json<Vec<String>>) -> Reply {
    hazard_batch("all", dtxsids)
}

async fn hazard_human_batch(Json(dtxsids): Json<Vec<String>>) -> Reply {
    hazard_batch("human health", dtxsids)
}

async fn hazard_eco_batch(Json(dtxsids): Json<Vec<String>>) -> Reply {
    hazard_batch("eco", dtxsids)
}

async fn fate(Path(dtxsid): Path<String>) -> Reply {
    lookup(&dtxsid)?;
    Ok(Json(json!({"dtxsid": dtxsid})))
}

async fn fate_batch(Json(dtxsids): Json<Vec<String>>) -> Reply {
    if dtxsids.len() > FATE_BATCH_MAX {
        return Err((StatusCode::BAD_REQUEST, Json(json!({"title": "too many identifiers"}))));
    }
    Ok(Json(Value::Array(
        dtxsids
            .iter()
            .map(|dtxsid| json!({"dtxsid": dtxsid, "valueType": "predicted"}))
            .collect(),
    )))
}
