use super::transport::{FetchTransport, Method, OutgoingRequest, RawResponse, Transport};
use crate::config::{AppConfig, AuthScheme};
use crate::shared::alert::{AlertService, AlertSink, Severity};
use crate::shared::api_utils::join_url;
use crate::shared::error::AppError;
use contracts::shared::actions::{ActionId, ACTION_HEADER};
use contracts::shared::api_error::ApiErrorBody;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Successful response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<T> {
    Json(T),
    /// 204; the body is never parsed.
    NoContent,
}

impl<T> Payload<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::NoContent => None,
        }
    }

    /// For endpoints that must return a body.
    pub fn into_value(self) -> Result<T, AppError> {
        self.into_option()
            .ok_or_else(|| AppError::Decode("phản hồi rỗng".to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub scheme: AuthScheme,
    pub key: String,
}

/// Header set sent with every request.
pub fn request_headers(
    credentials: Option<&Credentials>,
    action: Option<ActionId>,
) -> Vec<(&'static str, String)> {
    let mut headers = vec![("Content-Type", "application/json".to_string())];
    if let Some(creds) = credentials {
        match creds.scheme {
            AuthScheme::Bearer => headers.push(("Authorization", format!("Bearer {}", creds.key))),
            AuthScheme::ApiKeyHeader => headers.push(("X-API-KEY", creds.key.clone())),
        }
    }
    if let Some(action) = action {
        headers.push((ACTION_HEADER, action.as_str().to_string()));
    }
    headers
}

/// Message for a non-2xx response: the server's `error`, then `message`,
/// then a generic status line.
pub fn request_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(ApiErrorBody::into_message)
        .unwrap_or_else(|| format!("Request failed with status {}", status))
}

/// Maps a raw response to a typed payload.
pub fn settle<T: DeserializeOwned>(raw: RawResponse) -> Result<Payload<T>, AppError> {
    if !raw.is_success() {
        return Err(AppError::Request {
            status: raw.status,
            message: request_error_message(raw.status, &raw.body),
        });
    }
    if raw.status == 204 {
        return Ok(Payload::NoContent);
    }
    serde_json::from_str(&raw.body)
        .map(Payload::Json)
        .map_err(|e| AppError::Decode(e.to_string()))
}

/// Sends one request and reports a failure to `sink` exactly once.
pub async fn execute<T, Tr, S>(
    transport: &Tr,
    sink: Option<&S>,
    request: OutgoingRequest,
) -> Result<Payload<T>, AppError>
where
    T: DeserializeOwned,
    Tr: Transport,
    S: AlertSink,
{
    let method = request.method;
    let url = request.url.clone();
    let result = match transport.send(request).await {
        Ok(raw) => settle(raw),
        Err(e) => Err(e),
    };
    if let Err(err) = &result {
        report_failure(sink, method, &url, err);
    }
    result
}

fn report_failure<S: AlertSink>(sink: Option<&S>, method: Method, url: &str, err: &AppError) {
    log::error!("{} {} failed: {:?}", method.as_str(), url, err);
    if let Some(sink) = sink {
        sink.show(Severity::Error, &err.to_string());
    }
}

/// [`execute`] for a request that may have failed to build; that failure is
/// reported the same way as a failed send.
pub async fn dispatch<T, Tr, S>(
    transport: &Tr,
    sink: Option<&S>,
    method: Method,
    url: &str,
    prepared: Result<OutgoingRequest, AppError>,
) -> Result<Payload<T>, AppError>
where
    T: DeserializeOwned,
    Tr: Transport,
    S: AlertSink,
{
    match prepared {
        Ok(request) => execute(transport, sink, request).await,
        Err(err) => {
            report_failure(sink, method, url, &err);
            Err(err)
        }
    }
}

/// JSON text of a request body.
pub fn encode_body<B: Serialize + ?Sized>(body: Option<&B>) -> Result<Option<String>, AppError> {
    body.map(serde_json::to_string)
        .transpose()
        .map_err(|e| AppError::Validation(format!("Không thể mã hoá dữ liệu: {}", e)))
}

#[derive(Clone)]
pub struct ApiClient {
    base: String,
    credentials: Option<Credentials>,
    alerts: AlertService,
    silent: bool,
}

impl ApiClient {
    pub fn new(config: &AppConfig, alerts: AlertService) -> Self {
        Self {
            base: config.api_base.clone(),
            credentials: config.api_key.clone().map(|key| Credentials {
                scheme: config.auth_scheme,
                key,
            }),
            alerts,
            silent: false,
        }
    }

    /// Same client, but failures are returned without an alert.
    pub fn silent(&self) -> Self {
        Self {
            silent: true,
            ..self.clone()
        }
    }

    pub fn url(&self, path: &str) -> String {
        join_url(&self.base, path)
    }

    pub fn build_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        action: Option<ActionId>,
    ) -> Result<OutgoingRequest, AppError> {
        let body = encode_body(body)?;
        Ok(OutgoingRequest {
            method,
            url: self.url(path),
            headers: request_headers(self.credentials.as_ref(), action),
            body,
        })
    }

    pub async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        action: Option<ActionId>,
    ) -> Result<Payload<T>, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let prepared = self.build_request(method, path, body, action);
        let sink = (!self.silent).then_some(&self.alerts);
        dispatch(&FetchTransport, sink, method, &self.url(path), prepared).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.request::<(), T>(Method::Get, path, None, None)
            .await?
            .into_value()
    }

    pub async fn post<B, T>(
        &self,
        path: &str,
        body: &B,
        action: Option<ActionId>,
    ) -> Result<Payload<T>, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::Post, path, Some(body), action).await
    }

    pub async fn put<B, T>(
        &self,
        path: &str,
        body: &B,
        action: Option<ActionId>,
    ) -> Result<Payload<T>, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::Put, path, Some(body), action).await
    }

    pub async fn delete<B, T>(
        &self,
        path: &str,
        body: Option<&B>,
        action: Option<ActionId>,
    ) -> Result<Payload<T>, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::Delete, path, body, action).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::alert::RecordingSink;
    use futures::executor::block_on;
    use serde::Deserialize;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    struct FakeTransport {
        replies: RefCell<VecDeque<Result<RawResponse, AppError>>>,
        seen: RefCell<Vec<OutgoingRequest>>,
    }

    impl FakeTransport {
        fn new(replies: Vec<Result<RawResponse, AppError>>) -> Self {
            Self {
                replies: RefCell::new(replies.into()),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for FakeTransport {
        async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, AppError> {
            self.seen.borrow_mut().push(request);
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(AppError::Network("no reply queued".into())))
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Created {
        success: bool,
        id: String,
    }

    fn raw(status: u16, body: &str) -> Result<RawResponse, AppError> {
        Ok(RawResponse {
            status,
            body: body.to_string(),
        })
    }

    fn request() -> OutgoingRequest {
        OutgoingRequest {
            method: Method::Post,
            url: "/api/books".into(),
            headers: request_headers(None, Some(ActionId::CreateBook)),
            body: Some("{}".into()),
        }
    }

    #[test]
    fn headers_carry_auth_and_action() {
        let bearer = Credentials {
            scheme: AuthScheme::Bearer,
            key: "k1".into(),
        };
        let headers = request_headers(Some(&bearer), Some(ActionId::DeleteBook));
        assert!(headers.contains(&("Content-Type", "application/json".into())));
        assert!(headers.contains(&("Authorization", "Bearer k1".into())));
        assert!(headers.contains(&("X-Action-Identifier", "DELETE_BOOK".into())));

        let header_key = Credentials {
            scheme: AuthScheme::ApiKeyHeader,
            key: "k2".into(),
        };
        let headers = request_headers(Some(&header_key), None);
        assert!(headers.contains(&("X-API-KEY", "k2".into())));
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn success_parses_json() {
        let transport = FakeTransport::new(vec![raw(201, r#"{"success":true,"id":"b7"}"#)]);
        let sink = RecordingSink::default();
        let result: Result<Payload<Created>, _> =
            block_on(execute(&transport, Some(&sink), request()));
        assert_eq!(
            result.unwrap(),
            Payload::Json(Created {
                success: true,
                id: "b7".into()
            })
        );
        assert!(sink.0.borrow().is_empty());
        assert_eq!(transport.seen.borrow()[0].url, "/api/books");
    }

    #[test]
    fn no_content_skips_parsing() {
        let transport = FakeTransport::new(vec![raw(204, "")]);
        let sink = RecordingSink::default();
        let result: Result<Payload<Created>, _> =
            block_on(execute(&transport, Some(&sink), request()));
        assert_eq!(result.unwrap(), Payload::NoContent);
    }

    #[test]
    fn unencodable_body_alerts_once_and_sends_nothing() {
        // JSON object keys must be strings
        let mut body = std::collections::HashMap::new();
        body.insert((1, 2), "ô");
        let prepared = encode_body(Some(&body)).map(|body| OutgoingRequest {
            body,
            ..request()
        });
        assert!(matches!(prepared, Err(AppError::Validation(_))));

        let transport = FakeTransport::new(vec![raw(200, "{}")]);
        let sink = RecordingSink::default();
        let result: Result<Payload<Created>, _> = block_on(dispatch(
            &transport,
            Some(&sink),
            Method::Post,
            "/api/books",
            prepared,
        ));
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(sink.0.borrow().len(), 1);
        assert_eq!(sink.0.borrow()[0].0, Severity::Error);
        assert!(transport.seen.borrow().is_empty());
    }

    #[test]
    fn request_error_alerts_once_with_server_message() {
        let transport = FakeTransport::new(vec![raw(400, r#"{"error":"Dữ liệu không hợp lệ"}"#)]);
        let sink = RecordingSink::default();
        let result: Result<Payload<Created>, _> =
            block_on(execute(&transport, Some(&sink), request()));
        assert_eq!(
            result.unwrap_err(),
            AppError::Request {
                status: 400,
                message: "Dữ liệu không hợp lệ".into()
            }
        );
        let alerts = sink.0.borrow();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0], (Severity::Error, "Lỗi API: Dữ liệu không hợp lệ".into()));
    }

    #[test]
    fn error_message_fallbacks() {
        assert_eq!(request_error_message(403, r#"{"message":"Forbidden"}"#), "Forbidden");
        assert_eq!(
            request_error_message(502, "<html>Bad gateway</html>"),
            "Request failed with status 502"
        );
    }

    #[test]
    fn network_failure_alerts_once() {
        let transport = FakeTransport::new(vec![Err(AppError::Network("offline".into()))]);
        let sink = RecordingSink::default();
        let result: Result<Payload<Created>, _> =
            block_on(execute(&transport, Some(&sink), request()));
        assert!(matches!(result, Err(AppError::Network(_))));
        assert_eq!(sink.0.borrow().len(), 1);
        assert_eq!(
            sink.0.borrow()[0].1,
            crate::shared::error::NETWORK_MESSAGE.to_string()
        );
    }

    #[test]
    fn silent_caller_gets_no_alert() {
        let transport = FakeTransport::new(vec![raw(500, r#"{"error":"boom"}"#)]);
        let result: Result<Payload<Created>, _> =
            block_on(execute(&transport, None::<&RecordingSink>, request()));
        assert!(matches!(result, Err(AppError::Request { status: 500, .. })));
    }

    #[test]
    fn malformed_success_body_is_a_decode_error() {
        let transport = FakeTransport::new(vec![raw(200, "not json")]);
        let sink = RecordingSink::default();
        let result: Result<Payload<Created>, _> =
            block_on(execute(&transport, Some(&sink), request()));
        assert!(matches!(result, Err(AppError::Decode(_))));
        assert_eq!(sink.0.borrow().len(), 1);
    }
}
