use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const TRANSLATIONS: &[&str] = &["asv", "kjv", "leb"];

const BOOKS: &[&str] = &["Genesis", "Ge", "Psalm", "Ps", "John", "Romans"];

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bible {
    pub bible: String,
    pub title: String,
    pub abbreviated_title: String,
    pub languages: Vec<String>,
}

/// Raw `path?query` of every request seen, in arrival order.
pub type RequestLog = Arc<RwLock<Vec<String>>>;

type Params = Query<HashMap<String, String>>;
type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

pub fn bibles() -> Vec<Bible> {
    [
        ("asv", "American Standard Version", "ASV"),
        ("kjv", "King James Version", "KJV"),
        ("leb", "Lexham English Bible", "LEB"),
    ]
    .into_iter()
    .map(|(bible, title, abbreviated)| Bible {
        bible: bible.to_string(),
        title: title.to_string(),
        abbreviated_title: abbreviated.to_string(),
        languages: vec!["en".to_string()],
    })
    .collect()
}

pub fn app() -> Router {
    let log: RequestLog = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/v1/bible/find.js", get(find))
        .route("/v1/bible/parse", get(parse))
        .route("/v1/bible/scan.js", get(scan))
        .route("/v1/bible/compare", get(compare))
        .route("/v1/bible/search/{file}", get(search))
        .route("/v1/bible/content/{file}", get(content))
        .route("/_requests", get(requests))
        .with_state(log)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn error(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message })))
}

async fn record(log: &RequestLog, uri: &Uri) {
    let raw = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    tracing::debug!(request = %raw, "received");
    log.write().await.push(raw);
}

fn require_key(params: &HashMap<String, String>) -> Result<(), (StatusCode, Json<Value>)> {
    match params.get("key") {
        Some(key) if !key.is_empty() => Ok(()),
        _ => Err(error(StatusCode::UNAUTHORIZED, "An API key is required.")),
    }
}

fn param<'a>(params: &'a HashMap<String, String>, name: &str) -> Result<&'a str, (StatusCode, Json<Value>)> {
    params
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| error(StatusCode::BAD_REQUEST, &format!("missing parameter: {name}")))
}

fn number(params: &HashMap<String, String>, name: &str) -> Option<usize> {
    params.get(name).and_then(|v| v.parse().ok())
}

/// Split `file` (`kjv.js`, `kjv.html.js`) into a known translation and
/// whether HTML was requested.
fn translation_of(file: &str) -> Result<(&str, bool), (StatusCode, Json<Value>)> {
    let stem = file
        .strip_suffix(".js")
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "unknown resource"))?;
    let (bible, html) = match stem.strip_suffix(".html") {
        Some(bible) => (bible, true),
        None => (stem, false),
    };
    if TRANSLATIONS.contains(&bible) {
        Ok((bible, html))
    } else {
        Err(error(StatusCode::NOT_FOUND, &format!("unknown bible: {bible}")))
    }
}

/// Book name and the chapter/verse token of a reference such as `John 3:16`.
fn split_reference(reference: &str) -> (String, Option<u32>, Option<u32>) {
    let mut words: Vec<&str> = reference.split_whitespace().collect();
    let has_numbers = words.len() > 1
        && words
            .last()
            .is_some_and(|w| w.starts_with(|c: char| c.is_ascii_digit()));
    let numbers = if has_numbers { words.pop() } else { None };
    let book = words.join(" ");
    let Some(numbers) = numbers else {
        return (book, None, None);
    };
    let start = numbers.split('-').next().unwrap_or(numbers);
    let mut parts = start.split(':');
    let chapter = parts.next().and_then(|c| c.parse().ok());
    let verse = parts.next().and_then(|v| v.parse().ok());
    (book, chapter, verse)
}

async fn find(State(log): State<RequestLog>, uri: Uri, Query(params): Params) -> Reply {
    record(&log, &uri).await;
    require_key(&params)?;
    let query = params.get("query").map(|q| q.to_lowercase());
    let matches: Vec<Bible> = bibles()
        .into_iter()
        .filter(|b| params.get("bible").map_or(true, |want| &b.bible == want))
        .filter(|b| query.as_ref().map_or(true, |q| b.title.to_lowercase().contains(q)))
        .skip(number(&params, "start").unwrap_or(0))
        .take(number(&params, "limit").unwrap_or(usize::MAX))
        .collect();
    Ok(Json(json!({ "bibles": matches })))
}

async fn parse(State(log): State<RequestLog>, uri: Uri, Query(params): Params) -> Reply {
    record(&log, &uri).await;
    require_key(&params)?;
    let passage = param(&params, "passage")?;
    let (book, chapter, verse) = split_reference(passage);
    Ok(Json(json!({
        "passage": passage,
        "passages": [{
            "passage": passage,
            "parts": { "book": book, "chapter": chapter, "verse": verse }
        }]
    })))
}

async fn scan(State(log): State<RequestLog>, uri: Uri, Query(params): Params) -> Reply {
    record(&log, &uri).await;
    require_key(&params)?;
    let text = param(&params, "text")?;
    let mut results = Vec::new();
    for book in BOOKS {
        let needle = format!("{book} ");
        for (idx, _) in text.match_indices(&needle) {
            let after = &text[idx + needle.len()..];
            let len = after
                .find(|c: char| !(c.is_ascii_digit() || c == ':' || c == '-'))
                .unwrap_or(after.len());
            if len == 0 {
                continue;
            }
            let text_length = needle.len() + len;
            results.push(json!({
                "passage": &text[idx..idx + text_length],
                "textIndex": idx,
                "textLength": text_length,
            }));
        }
    }
    Ok(Json(json!({ "results": results })))
}

async fn compare(State(log): State<RequestLog>, uri: Uri, Query(params): Params) -> Reply {
    record(&log, &uri).await;
    require_key(&params)?;
    let first = param(&params, "first")?;
    let second = param(&params, "second")?;
    if first == second {
        return Ok(Json(json!({
            "equal": true, "intersects": true, "compare": 0,
            "startToStart": 0, "startToEnd": -1, "endToStart": 1, "endToEnd": 0,
            "after": false, "before": false,
            "subset": true, "strictSubset": false, "superset": true, "strictSuperset": false
        })));
    }
    Ok(Json(json!({
        "equal": false, "intersects": true, "compare": 1,
        "startToStart": 1, "startToEnd": -1, "endToStart": 1, "endToEnd": -1,
        "after": false, "before": false,
        "subset": true, "strictSubset": true, "superset": false, "strictSuperset": false
    })))
}

async fn search(
    State(log): State<RequestLog>,
    uri: Uri,
    Path(file): Path<String>,
    Query(params): Params,
) -> Reply {
    record(&log, &uri).await;
    require_key(&params)?;
    let (bible, _) = translation_of(&file)?;
    let query = param(&params, "query")?;
    let hits: Vec<Value> = ["John 6:35", "John 6:48", "Matthew 4:4"]
        .iter()
        .map(|title| json!({ "title": title, "preview": format!("[{bible}] ... {query} ...") }))
        .collect();
    let start = number(&params, "start").unwrap_or(0);
    let limit = number(&params, "limit").unwrap_or(hits.len());
    let page: Vec<Value> = hits.iter().skip(start).take(limit).cloned().collect();
    Ok(Json(json!({
        "resultCount": hits.len(),
        "hitCount": hits.len(),
        "start": start,
        "limit": limit,
        "results": page,
    })))
}

async fn content(
    State(log): State<RequestLog>,
    uri: Uri,
    Path(file): Path<String>,
    Query(params): Params,
) -> Reply {
    record(&log, &uri).await;
    require_key(&params)?;
    let (bible, html) = translation_of(&file)?;
    let passage = param(&params, "passage")?;
    let text = if html {
        format!("<p class=\"{bible}\">{passage}</p>")
    } else {
        format!("{passage} ({bible})")
    };
    Ok(Json(json!({ "text": text })))
}

async fn requests(State(log): State<RequestLog>) -> Json<Vec<String>> {
    Json(log.read().await.clone())
}
