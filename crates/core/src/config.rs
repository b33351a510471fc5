use std::path::PathBuf;

use reqwest::Url;

use crate::error::{Result, TldlError};

pub const API_URL_ENV: &str = "TLDL_API_URL";
pub const TAKEAWAYS_PROMPT_ENV: &str = "TLDL_TAKEAWAYS_PROMPT";
pub const STORAGE_PATH_ENV: &str = "TLDL_STORAGE_PATH";

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Query sent with the second landing request. Opaque to this client.
pub const DEFAULT_TAKEAWAYS_PROMPT: &str = "What are the key takeaways and main points discussed in this podcast? Please list them in a clear, organized manner.";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: Url,
    pub takeaways_prompt: String,
    pub storage_path: PathBuf,
}

impl ClientConfig {
    /// Resolve from `TLDL_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = parse_api_url(
            lookup(API_URL_ENV)
                .as_deref()
                .unwrap_or(DEFAULT_API_URL),
        )?;
        let takeaways_prompt = lookup(TAKEAWAYS_PROMPT_ENV)
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TAKEAWAYS_PROMPT.to_string());
        let storage_path = lookup(STORAGE_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_storage_path);

        Ok(Self {
            api_url,
            takeaways_prompt,
            storage_path,
        })
    }

    pub fn with_api_url(mut self, raw: &str) -> Result<Self> {
        self.api_url = parse_api_url(raw)?;
        Ok(self)
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = path.into();
        self
    }
}

pub fn default_storage_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("tldl")
        .join("storage.json")
}

fn parse_api_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| TldlError::InvalidConfig {
        key: API_URL_ENV,
        reason: format!("{raw:?} is not a valid URL ({e})"),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(TldlError::InvalidConfig {
            key: API_URL_ENV,
            reason: format!("unsupported scheme {:?}", url.scheme()),
        });
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn resolve_with(vars: &[(&str, &str)]) -> Result<ClientConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::resolve(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_point_at_local_service() {
        let config = resolve_with(&[]).unwrap();
        assert_eq!(config.api_url.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(config.takeaways_prompt, DEFAULT_TAKEAWAYS_PROMPT);
        assert!(config.storage_path.ends_with("tldl/storage.json"));
    }

    #[test]
    fn env_overrides_are_applied() {
        let config = resolve_with(&[
            (API_URL_ENV, "https://tldl.example.com/api/"),
            (TAKEAWAYS_PROMPT_ENV, "List three points."),
            (STORAGE_PATH_ENV, "/var/lib/tldl/links.json"),
        ])
        .unwrap();
        assert_eq!(config.api_url.as_str(), "https://tldl.example.com/api/");
        assert_eq!(config.takeaways_prompt, "List three points.");
        assert_eq!(config.storage_path, PathBuf::from("/var/lib/tldl/links.json"));
    }

    #[test]
    fn blank_prompt_keeps_default() {
        let config = resolve_with(&[(TAKEAWAYS_PROMPT_ENV, "   ")]).unwrap();
        assert_eq!(config.takeaways_prompt, DEFAULT_TAKEAWAYS_PROMPT);
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(matches!(
            resolve_with(&[(API_URL_ENV, "not a url")]),
            Err(TldlError::InvalidConfig { .. })
        ));
        assert!(matches!(
            resolve_with(&[(API_URL_ENV, "ftp://127.0.0.1")]),
            Err(TldlError::InvalidConfig { .. })
        ));
    }
}
