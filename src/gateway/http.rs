use async_trait::async_trait;
use reqwest::{multipart, Client, Method, Response};
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::{debug, warn};

use super::{backend_message, Gateway, UploadForm};
use crate::error::{Error, Result};

#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn read_body(response: Response) -> Result<JsonValue> {
        let status = response.status();
        let text = response.text().await?;

        let body = if text.trim().is_empty() {
            JsonValue::Null
        } else {
            match serde_json::from_str::<JsonValue>(&text) {
                Ok(value) => value,
                Err(e) if status.is_success() => return Err(Error::Json(e)),
                Err(_) => JsonValue::String(text),
            }
        };

        if !status.is_success() {
            let message = backend_message(&body)
                .or_else(|| body.as_str().map(|s| s.trim().to_string()))
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| format!("HTTP error {}", status));
            warn!(status = status.as_u16(), "Backend request failed: {}", message);
            return Err(Error::api(status.as_u16(), message));
        }

        Ok(body)
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<JsonValue>,
    ) -> Result<JsonValue> {
        let url = self.url(path);
        debug!(%method, %url, "Calling screening API");

        let mut request = self.client.request(method.clone(), &url);
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(%method, %url, "Backend unreachable: {}", e);
            Error::Transport(e)
        })?;
        Self::read_body(response).await
    }

    async fn upload(&self, path: &str, form: UploadForm) -> Result<JsonValue> {
        let url = self.url(path);
        debug!(%url, file = %form.file_name, size = form.bytes.len(), "Uploading file");

        let part = multipart::Part::bytes(form.bytes.to_vec())
            .file_name(form.file_name.clone())
            .mime_str("application/pdf")?;
        let mut multipart_form = multipart::Form::new().part("file", part);
        for (name, value) in form.fields {
            multipart_form = multipart_form.text(name, value);
        }

        let response = self
            .client
            .post(&url)
            .multipart(multipart_form)
            .send()
            .await
            .map_err(|e| {
                warn!(%url, "Upload failed to reach backend: {}", e);
                Error::Transport(e)
            })?;
        Self::read_body(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_without_double_slashes() {
        let gateway = HttpGateway::new("http://localhost:5512/api/", None).unwrap();
        assert_eq!(gateway.base_url(), "http://localhost:5512/api");
        assert_eq!(
            gateway.url("/candidates/3/update_status/"),
            "http://localhost:5512/api/candidates/3/update_status/"
        );
        assert_eq!(
            gateway.url("emails/"),
            "http://localhost:5512/api/emails/"
        );
    }
}
