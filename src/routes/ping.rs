use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::http::server::AppState;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pong {
    pub message: String,
}

pub async fn ping() -> Json<Pong> {
    tracing::debug!("ping");
    Json(Pong {
        message: "pong".to_string(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/ping", get(ping))
}
