use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_DEPLOY_URL: &str = "https://ionora.in";
pub const DEPLOY_URL_ENV: &str = "DEPLOY_URL";
pub const DEFAULT_USER_AGENT: &str = "curl/8.4";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// HTTP method used for the per-link reachability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckMethod {
    Head,
    Get,
}

impl CheckMethod {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "head" => Some(CheckMethod::Head),
            "get" => Some(CheckMethod::Get),
            _ => None,
        }
    }

    pub fn as_reqwest(self) -> reqwest::Method {
        match self {
            CheckMethod::Head => reqwest::Method::HEAD,
            CheckMethod::Get => reqwest::Method::GET,
        }
    }
}

impl fmt::Display for CheckMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckMethod::Head => write!(f, "HEAD"),
            CheckMethod::Get => write!(f, "GET"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckerConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub method: CheckMethod,
}

impl CheckerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            method: CheckMethod::Head,
        }
    }

    /// Reads the base URL from `DEPLOY_URL`, falling back to the production site.
    pub fn from_env() -> Self {
        Self::new(base_url_or_default(std::env::var(DEPLOY_URL_ENV).ok()))
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_method(mut self, method: CheckMethod) -> Self {
        self.method = method;
        self
    }
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DEPLOY_URL)
    }
}

/// Empty or unset values fall back to [`DEFAULT_DEPLOY_URL`]. Anything else
/// is used exactly as given.
pub fn base_url_or_default(value: Option<String>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_DEPLOY_URL.to_string())
}
