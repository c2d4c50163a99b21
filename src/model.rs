//! Photo records and mutation payloads exchanged with the remote service.

use crate::error::UploadError;
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// EXIF `DateTimeOriginal` layout.
const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";
const ISO_LOCAL_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Opaque photo identifier. The remote may send it as a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "RawPhotoId")]
pub struct PhotoId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPhotoId {
    Number(u64),
    Text(String),
}

impl From<RawPhotoId> for PhotoId {
    fn from(raw: RawPhotoId) -> Self {
        match raw {
            RawPhotoId::Number(n) => PhotoId(n.to_string()),
            RawPhotoId::Text(s) => PhotoId(s),
        }
    }
}

impl PhotoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for PhotoId {
    fn from(n: u64) -> Self {
        PhotoId(n.to_string())
    }
}

impl From<&str> for PhotoId {
    fn from(s: &str) -> Self {
        PhotoId(s.to_string())
    }
}

impl From<String> for PhotoId {
    fn from(s: String) -> Self {
        PhotoId(s)
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One photo's metadata as known to the client.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub id: PhotoId,
    #[serde(default, alias = "dateTime")]
    pub date_time: Option<String>,
    #[serde(default)]
    pub iso: Option<u32>,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub color: bool,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub author: String,
    /// Reference used to fetch the image bytes.
    #[serde(default)]
    pub key: String,
}

impl PhotoRecord {
    pub fn new(id: impl Into<PhotoId>, author: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            color: true,
            ..Self::default()
        }
    }

    /// Capture time parsed from `date_time`.
    ///
    /// Accepts the EXIF layout, ISO-8601 without offset and RFC 3339.
    pub fn taken_at(&self) -> Option<NaiveDateTime> {
        let raw = self.date_time.as_deref()?.trim();
        NaiveDateTime::parse_from_str(raw, EXIF_DATE_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(raw, ISO_LOCAL_DATE_FORMAT))
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|dt| dt.naive_utc())
            })
    }
}

/// Fields and bytes for a new photo.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadData {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub author: String,
}

impl UploadData {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>, author: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
            author: author.into(),
        }
    }

    /// Rejects uploads the remote would refuse anyway.
    pub fn validate(&self) -> Result<(), UploadError> {
        if self.file_name.trim().is_empty() {
            return Err(UploadError::Invalid("file name is empty".to_string()));
        }
        if self.bytes.is_empty() {
            return Err(UploadError::Invalid(format!("{} has no content", self.file_name)));
        }
        if self.author.trim().is_empty() {
            return Err(UploadError::Invalid("author is required".to_string()));
        }
        Ok(())
    }
}

/// Channel values for an RGB edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbVals {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbVals {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Transform applied to an existing photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoEdit {
    Rgb(RgbVals),
    Grayscale,
}

/// Wire shape of an edit: exactly one of `rgbVals` / `convertToGrayscale` is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    pub photo_id: PhotoId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rgb_vals: Option<RgbVals>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub convert_to_grayscale: Option<bool>,
}

impl EditRequest {
    pub fn new(photo_id: &PhotoId, edit: PhotoEdit) -> Self {
        let (rgb_vals, convert_to_grayscale) = match edit {
            PhotoEdit::Rgb(vals) => (Some(vals), None),
            PhotoEdit::Grayscale => (None, Some(true)),
        };
        Self {
            photo_id: photo_id.clone(),
            rgb_vals,
            convert_to_grayscale,
        }
    }

    /// Recovers the transform. `None` when neither or both fields are populated.
    pub fn edit(&self) -> Option<PhotoEdit> {
        match (self.rgb_vals, self.convert_to_grayscale) {
            (Some(vals), None | Some(false)) => Some(PhotoEdit::Rgb(vals)),
            (None, Some(true)) => Some(PhotoEdit::Grayscale),
            _ => None,
        }
    }
}
