use crate::config::{CheckMethod, CheckerConfig};
use crate::error::{FetchError, LinkCheckError, Result};
use crate::extract::extract_media_references;
use crate::normalize::normalize_url;
use crate::result::{CheckSummary, LinkCheck};
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, Method, Response, StatusCode};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

/// Called before each link check with (position, total, resolved url).
pub type ProgressCallback = Arc<dyn Fn(usize, usize, String) + Send + Sync>;
/// Called with each finished link check.
pub type ResultCallback = Arc<dyn Fn(LinkCheck) + Send + Sync>;

pub struct Checker {
    client: Client,
    config: CheckerConfig,
    progress_callback: Option<ProgressCallback>,
    result_callback: Option<ResultCallback>,
}

impl Checker {
    pub fn new(config: CheckerConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(timeout)
            .connect_timeout(Duration::from_secs((config.timeout_secs / 2).max(1)))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(FetchError::ClientBuild)?;

        Ok(Self {
            client,
            config,
            progress_callback: None,
            result_callback: None,
        })
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn with_result_callback(mut self, callback: ResultCallback) -> Self {
        self.result_callback = Some(callback);
        self
    }

    /// Issue a request and require a success status.
    pub async fn fetch(&self, url: &str, method: Method) -> Result<Response> {
        let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        debug!("{} {}", method, parsed);
        let response = self
            .client
            .request(method, parsed)
            .send()
            .await
            .map_err(FetchError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        Ok(response)
    }

    /// Fetch the base page and decode it, replacing invalid UTF-8 sequences.
    pub async fn fetch_page(&self) -> Result<String> {
        let response = self.fetch(&self.config.base_url, Method::GET).await?;
        let bytes = response.bytes().await.map_err(FetchError::Body)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Check one resolved media URL. Failures are recorded on the result.
    pub async fn check_link(&self, reference: &str, url: &str) -> LinkCheck {
        let mut method = self.config.method;
        let start = Instant::now();
        let mut response = self.send(url, method).await;

        // Some origins reject HEAD outright; retry those with GET.
        let head_rejected = method == CheckMethod::Head
            && response.as_ref().is_ok_and(|r| {
                matches!(
                    r.status(),
                    StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_IMPLEMENTED
                )
            });
        if head_rejected {
            debug!("HEAD rejected by {}, retrying with GET", url);
            method = CheckMethod::Get;
            response = self.send(url, method).await;
        }

        let mut check = LinkCheck::new(reference.to_string(), url.to_string(), method);
        check.response_time = start.elapsed();

        match response {
            Ok(response) => {
                let status = response.status();
                check.status_code = Some(status.as_u16());
                check.content_type = response
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(|s| s.to_string());
                check.content_length = response
                    .headers()
                    .get(CONTENT_LENGTH)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse().ok());

                if status.is_success() {
                    debug!("{} {} -> {}", method, url, status);
                    check
                } else {
                    let error = LinkCheckError::Status {
                        status: status.as_u16(),
                        reason: status.canonical_reason().unwrap_or("").to_string(),
                    };
                    warn!("Media check failed for {}: {}", url, error);
                    check.with_error(&error)
                }
            }
            Err(e) => {
                let error = LinkCheckError::from(e);
                warn!("Media check failed for {}: {}", url, error);
                check.with_error(&error)
            }
        }
    }

    /// Fetch the base page, then check every `<source>` URL on it in order.
    pub async fn run(&self) -> Result<CheckSummary> {
        let base_url = &self.config.base_url;
        info!("Fetching {}", base_url);

        let html = self.fetch_page().await?;
        let references = extract_media_references(&html);
        info!(
            "Found {} media reference(s) in {} bytes",
            references.len(),
            html.len()
        );

        let mut summary = CheckSummary::new(base_url.clone(), html.len());
        let total = references.len();

        for (idx, reference) in references.iter().enumerate() {
            let url = normalize_url(base_url, reference);

            if let Some(ref callback) = self.progress_callback {
                callback(idx + 1, total, url.clone());
            }

            let check = self.check_link(reference, &url).await;

            if let Some(ref callback) = self.result_callback {
                callback(check.clone());
            }
            summary.checks.push(check);
        }

        info!(
            "Media check complete: {} passed, {} failed",
            summary.passed_count(),
            summary.failed_count()
        );
        Ok(summary)
    }

    async fn send(
        &self,
        url: &str,
        method: CheckMethod,
    ) -> std::result::Result<Response, reqwest::Error> {
        self.client.request(method.as_reqwest(), url).send().await
    }
}
