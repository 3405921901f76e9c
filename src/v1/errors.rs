/*
 * Copyright (c) 2025 The gphotos Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::v1::routing::{Operation, Resource};
use thiserror::Error;

/// Error conditions that can be returned
#[derive(Error, Debug)]
pub enum GooglePhotosError {
    #[error("Request network error")]
    Request(#[from] reqwest::Error),

    #[error("Deserialization error")]
    Deserialization(#[from] serde_json::Error),

    #[error("URL Parse error")]
    UrlParsing(#[from] url::ParseError),

    /// A caller-supplied parameter was rejected before any request was
    /// issued. Not retriable; the message says what to correct.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Operation {operation} is not supported for resource {resource}")]
    UnsupportedOperation {
        resource: Resource,
        operation: Operation,
    },

    #[error("Expected response missing")]
    ResponseMissing(),

    #[error("API Response was error: {0}, msg: {1}")]
    ApiResponse(u16, String),

    /// The raw upload call returned success but an empty token body.
    #[error(
        "No upload token was returned for {0}. The upload may have succeeded but the service sent an empty response"
    )]
    UploadTokenMissing(String),

    /// An upload call failed; the index is the 1-based position of the file
    /// within the batch.
    #[error("Failed to upload file {index} ({file_name}): {detail}")]
    UploadFailed {
        index: usize,
        file_name: String,
        detail: String,
    },

    #[error("Media item creation failed: {0}")]
    CreationFailed(String),
}
