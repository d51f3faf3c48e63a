use anyhow::Context;
use clap::ArgMatches;
use colored::Colorize;
use mediacheck_core::check::{CheckOptions, CheckProgressCallback, CheckResultCallback, execute_check};
use mediacheck_core::banner;
use mediacheck_core::report::{
    ReportFormat, format_check_line, generate_report, strip_ansi, write_report,
};
use mediacheck_scanner::config::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, base_url_or_default};
use mediacheck_scanner::{CheckMethod, CheckSummary, LinkCheck};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub const EXIT_OK: i32 = 0;
pub const EXIT_FETCH_FAILED: i32 = 1;
pub const EXIT_REPORT_FAILED: i32 = 1;
pub const EXIT_LINKS_FAILED: i32 = 2;

/// Everything a run needs, pulled out of the parsed command line
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub base_url: String,
    pub quiet: bool,
    pub method: CheckMethod,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub format: ReportFormat,
    pub output: Option<PathBuf>,
    pub strict: bool,
}

impl RunSettings {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let base_url = base_url_or_default(matches.get_one::<String>("url").cloned());
        let method = matches
            .get_one::<String>("method")
            .and_then(|m| CheckMethod::from_str(m))
            .unwrap_or(CheckMethod::Head);
        let format = matches
            .get_one::<String>("format")
            .and_then(|f| ReportFormat::from_str(f))
            .unwrap_or(ReportFormat::Text);

        Self {
            base_url,
            quiet: matches.get_flag("quiet"),
            method,
            timeout_secs: *matches
                .get_one::<u64>("timeout")
                .unwrap_or(&DEFAULT_TIMEOUT_SECS),
            user_agent: matches
                .get_one::<String>("user-agent")
                .cloned()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            format,
            output: matches.get_one::<PathBuf>("output").cloned(),
            strict: matches.get_flag("strict"),
        }
    }

    pub fn check_options(&self) -> CheckOptions {
        CheckOptions {
            base_url: self.base_url.clone(),
            user_agent: self.user_agent.clone(),
            timeout_secs: self.timeout_secs,
            method: self.method,
            show_progress_bars: !self.quiet,
        }
    }

    /// Live per-link lines are only printed when the report itself will not
    /// list them on the terminal.
    fn wants_live_lines(&self) -> bool {
        !self.quiet && (self.output.is_some() || self.format == ReportFormat::Json)
    }

    /// A JSON report on stdout must be the only thing there, so the banner
    /// and progress lines move to stderr.
    pub fn status_on_stderr(&self) -> bool {
        self.output.is_none() && self.format == ReportFormat::Json
    }
}

/// Logs go to stderr so stdout stays clean for the report.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn emit(to_stderr: bool, text: &str) {
    if to_stderr {
        eprint!("{}", text);
    } else {
        print!("{}", text);
    }
}

pub fn exit_code_for(summary: &CheckSummary, strict: bool) -> i32 {
    if strict && !summary.all_passed() {
        EXIT_LINKS_FAILED
    } else {
        EXIT_OK
    }
}

/// Print the report, or save it when an output path is given.
pub fn render_output(
    summary: &CheckSummary,
    format: ReportFormat,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            let report = generate_report(summary, format).context("Failed to render report")?;
            // Saved reports are plain text
            write_report(path, &strip_ansi(&report))
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!(
                "{} Report saved to {}",
                "✓".green().bold(),
                path.display().to_string().bright_white()
            );
        }
        None => {
            let report = generate_report(summary, format).context("Failed to render report")?;
            println!("{}", report);
        }
    }
    Ok(())
}

pub async fn handle_check(matches: &ArgMatches) -> i32 {
    init_logging();

    let settings = RunSettings::from_matches(matches);
    debug!("Run settings: {:?}", settings);

    let to_stderr = settings.status_on_stderr();
    if !settings.quiet {
        emit(to_stderr, &banner());
    }

    let progress_callback: Option<CheckProgressCallback> = if settings.quiet {
        None
    } else {
        Some(Arc::new(move |msg: String| {
            emit(to_stderr, &format!("\n{}\n\n", msg));
        }))
    };

    let result_callback: Option<CheckResultCallback> = if settings.wants_live_lines() {
        Some(Arc::new(move |check: LinkCheck| {
            emit(to_stderr, &format!("{}\n", format_check_line(&check)));
        }))
    } else {
        None
    };

    let summary = match execute_check(settings.check_options(), progress_callback, result_callback).await {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Failed to fetch {}: {}", settings.base_url, e);
            return EXIT_FETCH_FAILED;
        }
    };

    if let Err(e) = render_output(&summary, settings.format, settings.output.as_deref()) {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        return EXIT_REPORT_FAILED;
    }

    exit_code_for(&summary, settings.strict)
}
