use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use super::{Body, HttpTransport, Method, RequestOptions, Response};
use crate::error::{Error, Result};

const USER_AGENT: &str = concat!("transync/", env!("CARGO_PKG_VERSION"));

/// Blocking transport backed by `reqwest`.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| Error::Transport(err.to_string()))?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn request(&self, method: Method, url: &str, options: RequestOptions) -> Result<Response> {
        debug!(%method, url, "sending request");

        let method = match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, url);
        for (name, value) in &options.headers {
            builder = builder.header(name, value);
        }
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        builder = match options.body {
            Body::Empty => builder,
            Body::Text(text) => builder.body(text),
            Body::Form(fields) => builder.form(&fields),
            Body::Json(value) => {
                let payload = serde_json::to_vec(&value)
                    .map_err(|err| Error::Transport(err.to_string()))?;
                let builder = if options
                    .headers
                    .iter()
                    .any(|(k, _)| k.eq_ignore_ascii_case("content-type"))
                {
                    builder
                } else {
                    builder.header("Content-Type", "application/json")
                };
                builder.body(payload)
            }
        };

        let response = builder
            .send()
            .map_err(|err| Error::Transport(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|err| Error::Transport(err.to_string()))?;

        debug!(status, "received response");
        Ok(Response { status, body })
    }
}
