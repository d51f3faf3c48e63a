pub mod checker;
pub mod config;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod result;

pub use checker::{Checker, ProgressCallback, ResultCallback};
pub use config::{CheckMethod, CheckerConfig};
pub use error::{FetchError, LinkCheckError};
pub use extract::extract_media_references;
pub use normalize::normalize_url;
pub use result::{CheckSummary, LinkCheck};
