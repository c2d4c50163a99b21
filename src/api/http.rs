//! HTTP transport to the Pixly backend, built on `gloo-net` for the browser.

use super::routes::{self, Routes};
use super::{MutationGateway, PhotoFetcher};
use crate::config::ClientConfig;
use crate::error::{EditError, FetchError, UploadError};
use crate::model::{EditRequest, PhotoEdit, PhotoId, PhotoRecord, UploadData};
use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use log::debug;
use wasm_bindgen::JsValue;
use web_sys::{Blob, FormData};

#[derive(Debug, Clone)]
pub struct PixlyApi {
    routes: Routes,
}

impl PixlyApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            routes: Routes::new(base_url),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.api_base_url)
    }

    /// Builds the multipart body expected by `POST /photo`.
    fn upload_form(data: &UploadData) -> Result<FormData, JsValue> {
        let bytes = js_sys::Uint8Array::from(data.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes.into());
        let blob = Blob::new_with_u8_array_sequence(&parts)?;

        let form = FormData::new()?;
        form.append_with_blob_and_filename("file", &blob, &data.file_name)?;
        form.append_with_str("author", &data.author)?;
        Ok(form)
    }
}

async fn body_text(response: Response) -> Option<String> {
    response.text().await.ok()
}

#[async_trait(?Send)]
impl PhotoFetcher for PixlyApi {
    async fn fetch_all(&self, filter: Option<&str>) -> Result<Vec<PhotoRecord>, FetchError> {
        let mut request = Request::get(&self.routes.photos());
        let query = routes::search_query(filter);
        if !query.is_empty() {
            request = request.query(query);
        }
        debug!("GET /photos filter={:?}", filter);

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        routes::fetch_status(response.status())?;
        response
            .json::<Vec<PhotoRecord>>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl MutationGateway for PixlyApi {
    async fn upload(&self, data: UploadData) -> Result<PhotoRecord, UploadError> {
        data.validate()?;
        let form = Self::upload_form(&data)
            .map_err(|e| UploadError::Invalid(format!("could not encode upload: {:?}", e)))?;
        debug!("POST /photo {} ({} bytes)", data.file_name, data.bytes.len());

        let response = Request::post(&self.routes.upload())
            .body(form)
            .map_err(|e| UploadError::Invalid(e.to_string()))?
            .send()
            .await
            .map_err(|e| UploadError::Network(e.to_string()))?;
        let status = response.status();
        if !routes::is_success(status) {
            return Err(routes::upload_failure(status, body_text(response).await));
        }
        response
            .json::<PhotoRecord>()
            .await
            .map_err(|e| UploadError::Rejected(format!("unreadable response: {}", e)))
    }

    async fn edit(&self, photo_id: &PhotoId, edit: PhotoEdit) -> Result<PhotoRecord, EditError> {
        let body = EditRequest::new(photo_id, edit);
        debug!("POST /edit-photo/{} {:?}", photo_id, edit);

        let response = Request::post(&self.routes.edit_photo(photo_id))
            .json(&body)
            .map_err(|e| EditError::Rejected(e.to_string()))?
            .send()
            .await
            .map_err(|e| EditError::Network(e.to_string()))?;
        let status = response.status();
        if !routes::is_success(status) {
            return Err(routes::edit_failure(status, photo_id, body_text(response).await));
        }
        response
            .json::<PhotoRecord>()
            .await
            .map_err(|e| EditError::Rejected(format!("unreadable response: {}", e)))
    }
}
