//! LLM provider routes.
//!
//! Reports which upstream providers have credentials configured. Key
//! material is never included in a response.

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::http::server::AppState;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderStatus {
    pub name: String,
    pub configured: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProvidersResponse {
    pub providers: Vec<ProviderStatus>,
    pub iam_configured: bool,
}

impl ProvidersResponse {
    pub fn from_settings(settings: &Settings) -> Self {
        let provider = |name: &str, key: &Option<String>| ProviderStatus {
            name: name.to_string(),
            configured: key.is_some(),
        };

        Self {
            providers: vec![
                provider("openai", &settings.open_ai_key),
                provider("anthropic", &settings.anthropic_api_key),
            ],
            iam_configured: settings.iam_configured(),
        }
    }
}

pub async fn get_providers(State(state): State<AppState>) -> Json<ProvidersResponse> {
    let response = ProvidersResponse::from_settings(&state.settings);
    tracing::info!(
        configured = response.providers.iter().filter(|p| p.configured).count(),
        "Provider status requested"
    );
    Json(response)
}

pub fn router() -> Router<AppState> {
    Router::new().route("/llm/providers", get(get_providers))
}
