//! Catalog backend API client
//!
//! One logical client with two hosts: `host` for anonymous reads and
//! `protected_host` for writes carrying the bearer token.

mod error;
mod resource;

pub use error::{ClientError, Result};
pub use resource::Resource;

use catalog_common::payload::{PartValue, RequestBody};
use catalog_common::{Expert, Price, Service};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:4000/api";
pub const DEFAULT_STATIC_URL: &str = "http://localhost:4000/static";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Where uploaded photos and icons are served from
    pub static_url: String,
    pub token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            static_url: DEFAULT_STATIC_URL.to_string(),
            token: None,
        }
    }
}

#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl CatalogClient {
    pub fn new(config: ClientConfig) -> Self {
        let config = ClientConfig {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ..config
        };
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Set authentication token
    pub fn with_token(mut self, token: &str) -> Self {
        self.config.token = Some(token.to_string());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.config.token.as_deref()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn experts(&self) -> Resource<Expert> {
        Resource::new(self.clone())
    }

    pub fn services(&self) -> Resource<Service> {
        Resource::new(self.clone())
    }

    pub fn prices(&self) -> Resource<Price> {
        Resource::new(self.clone())
    }

    pub fn asset_url(&self, filename: &str) -> String {
        catalog_common::asset_url(&self.config.static_url, filename)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Anonymous request
    pub(crate) fn host(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    /// Request with the bearer token; fails before sending when there is none
    pub(crate) fn protected_host(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let token = self.config.token.as_deref().ok_or(ClientError::MissingToken)?;
        Ok(self
            .host(method, path)
            .header(AUTHORIZATION, format!("Bearer {}", token)))
    }

    async fn send(&self, request: RequestBuilder) -> Result<String> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(status = status.as_u16(), url = %response.url(), "response");

        let body = response.text().await?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(error::api_error(status.as_u16(), &body))
        }
    }

    pub(crate) async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let body = self.send(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn execute_discarding(&self, request: RequestBuilder) -> Result<()> {
        self.send(request).await.map(|_| ())
    }

    /// Exchange credentials for an access token
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        #[derive(Serialize)]
        struct LoginRequest<'a> {
            email: &'a str,
            password: &'a str,
        }

        #[derive(Deserialize)]
        struct LoginResponse {
            #[serde(alias = "accessToken", alias = "access_token")]
            token: String,
        }

        let request = self
            .host(Method::POST, "/auth/login")
            .json(&LoginRequest { email, password });
        let response: LoginResponse = self.execute(request).await?;
        Ok(response.token)
    }
}

/// Attach a JSON or multipart body to a write request
pub(crate) fn attach_body(request: RequestBuilder, body: RequestBody) -> Result<RequestBuilder> {
    match body {
        RequestBody::Json(value) => Ok(request.json(&value)),
        RequestBody::Multipart(body) => {
            let mut form = Form::new();
            for (name, value) in body.into_parts() {
                form = match value {
                    PartValue::Text(text) => form.text(name, text),
                    PartValue::File(file) => {
                        let part = Part::bytes(file.bytes)
                            .file_name(file.file_name)
                            .mime_str(&file.mime_type)?;
                        form.part(name, part)
                    }
                };
            }
            Ok(request.multipart(form))
        }
    }
}
