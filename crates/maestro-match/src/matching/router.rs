use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use super::{normalize, MatchReason, NameMatcher};

/// Router builder exposing the matcher over JSON.
pub fn name_router(matcher: Arc<NameMatcher>) -> Router {
    Router::new()
        .route("/api/v1/names/normalize", post(normalize_handler))
        .route("/api/v1/names/match", post(match_handler))
        .route("/api/v1/names/lookup", post(lookup_handler))
        .with_state(matcher)
}

#[derive(Debug, Deserialize)]
pub(crate) struct NormalizeRequest {
    pub(crate) name: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct NormalizeResponse {
    pub(crate) name: String,
    pub(crate) normalized: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MatchRequest {
    pub(crate) left: String,
    pub(crate) right: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct MatchResponse {
    pub(crate) matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) reason: Option<MatchReason>,
    pub(crate) left_normalized: String,
    pub(crate) right_normalized: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LookupRequest {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) candidates: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LookupResponse {
    pub(crate) name: String,
    pub(crate) matches: Vec<LookupMatch>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LookupMatch {
    pub(crate) candidate: String,
    pub(crate) reason: MatchReason,
}

pub(crate) async fn normalize_handler(
    Json(request): Json<NormalizeRequest>,
) -> Json<NormalizeResponse> {
    let normalized = normalize(&request.name);
    Json(NormalizeResponse {
        name: request.name,
        normalized,
    })
}

pub(crate) async fn match_handler(
    State(matcher): State<Arc<NameMatcher>>,
    Json(request): Json<MatchRequest>,
) -> Json<MatchResponse> {
    let reason = matcher.explain(&request.left, &request.right);
    Json(MatchResponse {
        matched: reason.is_some(),
        reason,
        left_normalized: normalize(&request.left),
        right_normalized: normalize(&request.right),
    })
}

pub(crate) async fn lookup_handler(
    State(matcher): State<Arc<NameMatcher>>,
    Json(request): Json<LookupRequest>,
) -> Json<LookupResponse> {
    let matches = matcher
        .best_matches(&request.name, request.candidates.iter().map(String::as_str))
        .into_iter()
        .map(|(candidate, reason)| LookupMatch {
            candidate: candidate.to_string(),
            reason,
        })
        .collect();

    Json(LookupResponse {
        name: request.name,
        matches,
    })
}
