//! Credentials and model paths read from the environment.
//!
//! A `.env` file in the working directory is loaded first when present.
//! Missing variables leave the field unset; nothing here fails startup.

use std::fmt;
use std::path::PathBuf;

pub const OPEN_AI_KEY: &str = "open_ai_key";
pub const IAM_CUSTOMER_SECRET_KEY: &str = "iam_customer_secret_key";
pub const IAM_APP_IDENTIFIER: &str = "iam_app_identifier";
pub const IAM_API_SERVER_URL: &str = "iam_api_server_url";
pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const LLAMA_CKPT_DIR: &str = "LLAMA_CKPT_DIR";
pub const LLAMA_TOKENIZER_PATH: &str = "LLAMA_TOKENIZER_PATH";

/// Process settings, loaded once at startup.
#[derive(Clone)]
pub struct Settings {
    pub open_ai_key: Option<String>,
    pub iam_customer_secret_key: Option<String>,
    pub iam_app_identifier: Option<String>,
    pub iam_api_server_url: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub llama_ckpt_dir: PathBuf,
    pub llama_tokenizer_path: PathBuf,
}

impl Settings {
    /// Load `.env` (if any) and read the process environment.
    pub fn load() -> Self {
        // Absence of a .env file is the normal production case.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        Self {
            open_ai_key: get(OPEN_AI_KEY),
            iam_customer_secret_key: get(IAM_CUSTOMER_SECRET_KEY),
            iam_app_identifier: get(IAM_APP_IDENTIFIER),
            iam_api_server_url: get(IAM_API_SERVER_URL),
            anthropic_api_key: get(ANTHROPIC_API_KEY),
            llama_ckpt_dir: get(LLAMA_CKPT_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("model")),
            llama_tokenizer_path: get(LLAMA_TOKENIZER_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("model/tokenizer.model")),
        }
    }

    /// All three IAM values are present.
    pub fn iam_configured(&self) -> bool {
        self.iam_customer_secret_key.is_some()
            && self.iam_app_identifier.is_some()
            && self.iam_api_server_url.is_some()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

struct Redacted<'a>(&'a Option<String>);

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("Some(<redacted>)"),
            None => f.write_str("None"),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("open_ai_key", &Redacted(&self.open_ai_key))
            .field("iam_customer_secret_key", &Redacted(&self.iam_customer_secret_key))
            .field("iam_app_identifier", &self.iam_app_identifier)
            .field("iam_api_server_url", &self.iam_api_server_url)
            .field("anthropic_api_key", &Redacted(&self.anthropic_api_key))
            .field("llama_ckpt_dir", &self.llama_ckpt_dir)
            .field("llama_tokenizer_path", &self.llama_tokenizer_path)
            .finish()
    }
}
