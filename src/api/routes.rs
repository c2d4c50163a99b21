//! Paths, query parameters and status handling for the Pixly HTTP API.
//!
//! Kept free of any transport so the wire contract can be checked on every
//! target.

use crate::config::SEARCH_QUERY_PARAM;
use crate::error::{EditError, FetchError, UploadError};
use crate::model::PhotoId;

const STATUS_NOT_FOUND: u16 = 404;

/// Endpoint URLs under one base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routes {
    base_url: String,
}

impl Routes {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `GET` target for the collection.
    pub fn photos(&self) -> String {
        format!("{}/photos", self.base_url)
    }

    /// `POST` target for uploads.
    pub fn upload(&self) -> String {
        format!("{}/photo", self.base_url)
    }

    pub fn edit_photo(&self, photo_id: &PhotoId) -> String {
        format!("{}/edit-photo/{}", self.base_url, photo_id)
    }
}

/// Query pairs for a collection read; empty when there is no filter.
pub fn search_query(filter: Option<&str>) -> Vec<(&'static str, &str)> {
    filter
        .filter(|term| !term.is_empty())
        .map(|term| (SEARCH_QUERY_PARAM, term))
        .into_iter()
        .collect()
}

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

pub fn fetch_status(status: u16) -> Result<(), FetchError> {
    if is_success(status) {
        Ok(())
    } else {
        Err(FetchError::Status(status))
    }
}

/// Error for a non-success upload response. `body` is the response text, if any.
pub fn upload_failure(status: u16, body: Option<String>) -> UploadError {
    UploadError::Rejected(rejection_message(status, body))
}

/// Error for a non-success edit response. 404 means the photo is gone.
pub fn edit_failure(status: u16, photo_id: &PhotoId, body: Option<String>) -> EditError {
    if status == STATUS_NOT_FOUND {
        EditError::NotFound(photo_id.clone())
    } else {
        EditError::Rejected(rejection_message(status, body))
    }
}

fn rejection_message(status: u16, body: Option<String>) -> String {
    match body {
        Some(text) if !text.trim().is_empty() => text,
        _ => format!("status {}", status),
    }
}
