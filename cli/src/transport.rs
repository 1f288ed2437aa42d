//! `reqwest` transport for the core API client.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::time::Duration;

use quill::{ApiRequest, ApiResponse, ClientConfig, Method, Transport, TransportError};

pub struct ReqwestTransport {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns the builder error when the TLS backend cannot be initialized.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    fn timeout(&self) -> Duration {
        self.config.timeout
    }

    fn classify(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

pub(crate) fn http_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.config.url(&request.path);
        tracing::debug!(method = %request.method, %url, "sending request");

        let mut builder = self.http.request(http_method(request.method), &url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.classify(e))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| self.classify(e))?;
        Ok(ApiResponse::from_text(status, &text))
    }
}
