use crate::shared::error::AppError;
use gloo_net::http::Request;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

/// Status and raw body; the body is empty for 204.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a request and returns whatever the server answered.
///
/// Only failures to get any response at all are errors here.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, AppError>;
}

/// Browser `fetch` through gloo-net.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, AppError> {
        let builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        let builder = request
            .headers
            .iter()
            .fold(builder, |b, (name, value)| b.header(name, value));
        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| AppError::Network(e.to_string()))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = response.status();
        if status == 204 {
            return Ok(RawResponse {
                status,
                body: String::new(),
            });
        }
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Decode(e.to_string()))?;
        Ok(RawResponse { status, body })
    }
}
