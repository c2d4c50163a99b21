//! In-process photo service for offline use and tests.
//!
//! Filtering is a case-insensitive substring match over the descriptive
//! fields; ISO values also match as `iso<value>` (e.g. `iso800`).

use super::{MutationGateway, PhotoFetcher};
use crate::error::{EditError, FetchError, UploadError};
use crate::model::{PhotoEdit, PhotoId, PhotoRecord, UploadData};
use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use std::cell::RefCell;

#[derive(Debug, Default)]
struct Inner {
    photos: Vec<PhotoRecord>,
    offline: bool,
    fetch_log: Vec<Option<String>>,
}

#[derive(Debug, Default)]
pub struct MemoryPhotoApi {
    inner: RefCell<Inner>,
}

fn record_matches(record: &PhotoRecord, needle: &str) -> bool {
    let iso = record.iso.map(|iso| format!("iso{}", iso));
    [
        Some(record.author.as_str()),
        record.make.as_deref(),
        Some(record.key.as_str()),
        record.date_time.as_deref(),
        iso.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(needle))
}

impl MemoryPhotoApi {
    pub fn new(photos: Vec<PhotoRecord>) -> Self {
        Self {
            inner: RefCell::new(Inner {
                photos,
                ..Inner::default()
            }),
        }
    }

    /// While offline every call fails with a network error.
    pub fn set_offline(&self, offline: bool) {
        self.inner.borrow_mut().offline = offline;
    }

    pub fn photos(&self) -> Vec<PhotoRecord> {
        self.inner.borrow().photos.clone()
    }

    /// Filters passed to `fetch_all`, oldest first.
    pub fn fetch_log(&self) -> Vec<Option<String>> {
        self.inner.borrow().fetch_log.clone()
    }

    fn next_id(photos: &[PhotoRecord]) -> PhotoId {
        let max = photos
            .iter()
            .filter_map(|p| p.id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        PhotoId::from(max + 1)
    }
}

#[async_trait(?Send)]
impl PhotoFetcher for MemoryPhotoApi {
    async fn fetch_all(&self, filter: Option<&str>) -> Result<Vec<PhotoRecord>, FetchError> {
        let mut inner = self.inner.borrow_mut();
        inner.fetch_log.push(filter.map(str::to_string));
        if inner.offline {
            return Err(FetchError::Network("service offline".to_string()));
        }

        let photos = match filter.filter(|f| !f.is_empty()) {
            Some(term) => {
                let needle = term.to_lowercase();
                inner
                    .photos
                    .iter()
                    .filter(|p| record_matches(p, &needle))
                    .cloned()
                    .collect()
            }
            None => inner.photos.clone(),
        };
        debug!("Serving {} photos for filter {:?}", photos.len(), filter);
        Ok(photos)
    }
}

#[async_trait(?Send)]
impl MutationGateway for MemoryPhotoApi {
    async fn upload(&self, data: UploadData) -> Result<PhotoRecord, UploadError> {
        data.validate()?;
        let mut inner = self.inner.borrow_mut();
        if inner.offline {
            return Err(UploadError::Network("service offline".to_string()));
        }

        let record = PhotoRecord {
            id: Self::next_id(&inner.photos),
            date_time: Some(Utc::now().format("%Y:%m:%d %H:%M:%S").to_string()),
            author: data.author,
            key: data.file_name,
            color: true,
            ..PhotoRecord::default()
        };
        inner.photos.push(record.clone());
        Ok(record)
    }

    async fn edit(&self, photo_id: &PhotoId, edit: PhotoEdit) -> Result<PhotoRecord, EditError> {
        let mut inner = self.inner.borrow_mut();
        if inner.offline {
            return Err(EditError::Network("service offline".to_string()));
        }

        let record = inner
            .photos
            .iter_mut()
            .find(|p| &p.id == photo_id)
            .ok_or_else(|| EditError::NotFound(photo_id.clone()))?;
        match edit {
            PhotoEdit::Grayscale => record.color = false,
            PhotoEdit::Rgb(vals) => {
                record.color = !(vals.r == vals.g && vals.g == vals.b);
            }
        }
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RgbVals;
    use async_std::task::block_on;

    fn gallery() -> MemoryPhotoApi {
        let mut dusk = PhotoRecord::new(1, "ann");
        dusk.make = Some("Canon".to_string());
        dusk.key = "sunset-pier.jpg".to_string();
        dusk.iso = Some(100);
        let mut night = PhotoRecord::new(2, "bo");
        night.make = Some("Nikon".to_string());
        night.iso = Some(800);
        MemoryPhotoApi::new(vec![dusk, night])
    }

    #[test]
    fn filter_matches_fields_case_insensitively() {
        let api = gallery();
        let ids = |filter: Option<&str>| -> Vec<String> {
            block_on(api.fetch_all(filter))
                .unwrap()
                .into_iter()
                .map(|p| p.id.to_string())
                .collect()
        };

        assert_eq!(ids(None), ["1", "2"]);
        assert_eq!(ids(Some("")), ["1", "2"]);
        assert_eq!(ids(Some("SUNSET")), ["1"]);
        assert_eq!(ids(Some("iso800")), ["2"]);
        assert_eq!(ids(Some("nikon")), ["2"]);
        assert!(ids(Some("leica")).is_empty());
        assert_eq!(api.fetch_log().len(), 6);
    }

    #[test]
    fn upload_assigns_next_id() {
        let api = gallery();
        let record = block_on(api.upload(UploadData::new("pier.jpg", vec![0xff], "cy"))).unwrap();
        assert_eq!(record.id, PhotoId::from(3));
        assert_eq!(record.key, "pier.jpg");
        assert!(record.taken_at().is_some());
        assert_eq!(api.photos().len(), 3);
    }

    #[test]
    fn upload_rejects_invalid_payload() {
        let api = gallery();
        let err = block_on(api.upload(UploadData::new("pier.jpg", vec![], "cy"))).unwrap_err();
        assert!(matches!(err, UploadError::Invalid(_)));
        assert_eq!(api.photos().len(), 2);
    }

    #[test]
    fn edit_returns_replacement_record() {
        let api = gallery();
        let gray = block_on(api.edit(&PhotoId::from(2), PhotoEdit::Grayscale)).unwrap();
        assert!(!gray.color);

        let tinted =
            block_on(api.edit(&PhotoId::from(2), PhotoEdit::Rgb(RgbVals::new(200, 10, 10)))).unwrap();
        assert!(tinted.color);
    }

    #[test]
    fn edit_of_unknown_photo_is_not_found() {
        let api = gallery();
        let err = block_on(api.edit(&PhotoId::from(99), PhotoEdit::Grayscale)).unwrap_err();
        assert_eq!(err, EditError::NotFound(PhotoId::from(99)));
    }

    #[test]
    fn offline_service_fails_every_call() {
        let api = gallery();
        api.set_offline(true);
        assert!(matches!(block_on(api.fetch_all(None)), Err(FetchError::Network(_))));
        assert!(matches!(
            block_on(api.edit(&PhotoId::from(1), PhotoEdit::Grayscale)),
            Err(EditError::Network(_))
        ));
    }
}
