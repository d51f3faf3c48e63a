use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::CheckMethod;
use crate::error::LinkCheckError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkCheck {
    /// The raw `src` value as it appeared in the page.
    pub reference: String,
    pub url: String,
    pub method: CheckMethod,
    pub status_code: Option<u16>,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub response_time: Duration,
    pub error: Option<String>,
}

impl LinkCheck {
    pub fn new(reference: String, url: String, method: CheckMethod) -> Self {
        Self {
            reference,
            url,
            method,
            status_code: None,
            content_type: None,
            content_length: None,
            response_time: Duration::from_secs(0),
            error: None,
        }
    }

    pub fn with_error(mut self, error: &LinkCheckError) -> Self {
        if self.status_code.is_none() {
            self.status_code = error.status_code();
        }
        self.error = Some(error.to_string());
        self
    }

    pub fn passed(&self) -> bool {
        self.error.is_none() && matches!(self.status_code, Some(200..=299))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckSummary {
    pub base_url: String,
    pub page_bytes: usize,
    pub checks: Vec<LinkCheck>,
}

impl CheckSummary {
    pub fn new(base_url: String, page_bytes: usize) -> Self {
        Self {
            base_url,
            page_bytes,
            checks: Vec::new(),
        }
    }

    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.checks.len() - self.passed_count()
    }

    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(LinkCheck::passed)
    }
}
