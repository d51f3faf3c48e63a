use crate::CLAP_STYLING;
use clap::arg;
use mediacheck_scanner::config::{
    DEFAULT_DEPLOY_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, DEPLOY_URL_ENV,
};

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("mediacheck")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("mediacheck")
        .styles(CLAP_STYLING)
        .about(
            "Fetches a deployed page, extracts every <source src=...> media URL and checks \
            that each one resolves.",
        )
        .arg(arg!(-q --"quiet" "Suppress banner and progress output").required(false))
        .arg(
            arg!(-u --"url" <URL>)
                .required(false)
                .help("The page to check")
                .env(DEPLOY_URL_ENV)
                .default_value(DEFAULT_DEPLOY_URL),
        )
        .arg(
            arg!(--"method" <METHOD>)
                .required(false)
                .help("HTTP method for media checks (HEAD falls back to GET when rejected)")
                .value_parser(["head", "get"])
                .default_value("head"),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Request timeout in seconds")
                .value_parser(clap::value_parser!(u64).range(1..))
                .default_value(DEFAULT_TIMEOUT_SECS.to_string()),
        )
        .arg(
            arg!(--"user-agent" <USER_AGENT>)
                .required(false)
                .help("User-Agent header sent with every request")
                .default_value(DEFAULT_USER_AGENT),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Report format: text, json")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("Save report to file (default: display to screen)")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            arg!(--"strict")
                .required(false)
                .help("Exit with status 2 when any media URL fails its check")
                .action(clap::ArgAction::SetTrue),
        )
}
