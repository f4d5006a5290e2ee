// src/fetch/error.rs
// Per-seed failures. None of these stop the batch.

use reqwest::StatusCode;
use std::string::FromUtf8Error;
use thiserror::Error;

use crate::extract::ExtractError;

/// Coarse failure category, for deciding how to treat a failed seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connect, send, receive, timeout or non-success status
    Network,
    /// Body was not valid UTF-8
    Decode,
    /// Page parsed but the rule set could not be applied
    Parse,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {}", .0.as_u16())]
    Status(StatusCode),

    #[error("body is not valid UTF-8: {0}")]
    Decode(#[from] FromUtf8Error),

    #[error("{0}")]
    Parse(#[from] ExtractError),
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Request(_) | FetchError::Status(_) => ErrorKind::Network,
            FetchError::Decode(_) => ErrorKind::Decode,
            FetchError::Parse(_) => ErrorKind::Parse,
        }
    }
}
