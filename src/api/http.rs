//! reqwest-backed implementation of the backend traits.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::config::ServerSettings;
use crate::error::Result;
use crate::persona::PersonaRecord;
use crate::settings::ConfigValues;
use crate::ui::SelectedFile;

use super::types::{decode_body, interpret_post};
use super::{
    ApiResponse, PersonaApi, PersonaListResponse, SettingsApi, SettingsBundle, UploadResponse,
    CONFIG_PATH, PERSONAS_PATH, UPLOAD_PATH,
};

/// HTTP client for one admin backend
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    pub fn new(settings: &ServerSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: normalize_base(&settings.base_url)?,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        debug!(url = %url, "GET");
        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        decode_body(url.path(), status, &body)
    }

    async fn post_json<B: serde::Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        let url = self.endpoint(path)?;
        debug!(url = %url, "POST");
        let resp = self.client.post(url.clone()).json(body).send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        interpret_post(url.path(), status, &text)
    }
}

/// Ensure the base URL ends in `/` so relative joins keep any path prefix
fn normalize_base(base: &str) -> Result<Url> {
    let mut url = Url::parse(base)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn image_mime(file: &SelectedFile) -> &'static str {
    match file.extension().as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl SettingsApi for HttpClient {
    async fn fetch_settings(&self) -> Result<SettingsBundle> {
        self.get_json(CONFIG_PATH).await
    }

    async fn save_settings(&self, values: &ConfigValues) -> Result<ApiResponse> {
        self.post_json(CONFIG_PATH, values).await
    }
}

#[async_trait]
impl PersonaApi for HttpClient {
    async fn fetch_personas(&self) -> Result<PersonaListResponse> {
        self.get_json(PERSONAS_PATH).await
    }

    async fn save_personas(&self, personas: &[PersonaRecord]) -> Result<ApiResponse> {
        self.post_json(PERSONAS_PATH, personas).await
    }

    async fn upload_image(&self, file: &SelectedFile) -> Result<UploadResponse> {
        let url = self.endpoint(UPLOAD_PATH)?;
        info!(url = %url, file = %file.name, size = file.bytes.len(), "Uploading image");

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(image_mime(file))?;
        let form = Form::new().part("file", part);

        let resp = self.client.post(url.clone()).multipart(form).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        decode_body(url.path(), status, &body)
    }
}
