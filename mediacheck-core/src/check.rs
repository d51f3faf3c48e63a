use indicatif::{ProgressBar, ProgressStyle};
use mediacheck_scanner::config::{CheckMethod, CheckerConfig};
use mediacheck_scanner::{CheckSummary, Checker, FetchError, LinkCheck};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Options for configuring a media check run
pub struct CheckOptions {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub method: CheckMethod,
    pub show_progress_bars: bool,
}

/// Defaults honour `DEPLOY_URL`, like the command line does.
impl Default for CheckOptions {
    fn default() -> Self {
        let config = CheckerConfig::from_env();
        Self {
            base_url: config.base_url,
            user_agent: config.user_agent,
            timeout_secs: config.timeout_secs,
            method: config.method,
            show_progress_bars: false,
        }
    }
}

impl From<&CheckOptions> for CheckerConfig {
    fn from(options: &CheckOptions) -> Self {
        CheckerConfig::new(options.base_url.clone())
            .with_user_agent(options.user_agent.clone())
            .with_timeout(options.timeout_secs)
            .with_method(options.method)
    }
}

/// Callback for reporting run progress
pub type CheckProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Callback for reporting individual link checks as they finish
pub type CheckResultCallback = Arc<dyn Fn(LinkCheck) + Send + Sync>;

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Fetch the base page and check each media source on it.
///
/// A failure to fetch the base page is returned as-is; no links are
/// checked in that case.
pub async fn execute_check(
    options: CheckOptions,
    progress_callback: Option<CheckProgressCallback>,
    result_callback: Option<CheckResultCallback>,
) -> Result<CheckSummary, FetchError> {
    let config = CheckerConfig::from(&options);

    if let Some(ref callback) = progress_callback {
        callback("1) Fetching production HTML and extracting <source src=...> values...".to_string());
    }

    let progress_bar = if options.show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Fetching {}", config.base_url));
        Some(Arc::new(pb))
    } else {
        None
    };

    let passed = Arc::new(AtomicUsize::new(0));
    let failed = Arc::new(AtomicUsize::new(0));

    let internal_progress: mediacheck_scanner::ProgressCallback = match progress_bar {
        Some(ref pb) => {
            let pb_clone = pb.clone();
            let passed_clone = passed.clone();
            let failed_clone = failed.clone();
            Arc::new(move |idx: usize, total: usize, url: String| {
                pb_clone.set_message(format!(
                    "Checking {}/{}: {} ({} ok, {} failed)",
                    idx,
                    total,
                    extract_url_path(&url),
                    passed_clone.load(Ordering::Relaxed),
                    failed_clone.load(Ordering::Relaxed)
                ));
            })
        }
        None => Arc::new(|idx: usize, total: usize, url: String| {
            debug!("Checking {}/{}: {}", idx, total, url);
        }),
    };

    let pb_for_results = progress_bar.clone();
    let passed_clone = passed.clone();
    let failed_clone = failed.clone();
    let internal_result: mediacheck_scanner::ResultCallback = Arc::new(move |check: LinkCheck| {
        if check.passed() {
            passed_clone.fetch_add(1, Ordering::Relaxed);
        } else {
            failed_clone.fetch_add(1, Ordering::Relaxed);
        }

        if let Some(ref cb) = result_callback {
            match pb_for_results {
                Some(ref pb) => pb.suspend(|| cb(check)),
                None => cb(check),
            }
        }
    });

    let checker = Checker::new(config)?
        .with_progress_callback(internal_progress)
        .with_result_callback(internal_result);

    let outcome = checker.run().await;

    if let Some(ref pb) = progress_bar {
        match outcome {
            Ok(ref summary) => pb.finish_with_message(format!(
                "Check complete! {} media URL(s) checked",
                summary.checks.len()
            )),
            Err(_) => pb.finish_and_clear(),
        }
    }

    if let (Some(callback), Ok(summary)) = (&progress_callback, &outcome) {
        callback(format!(
            "2) Checked {} media URL(s): {} passed, {} failed",
            summary.checks.len(),
            summary.passed_count(),
            summary.failed_count()
        ));
    }

    outcome
}
