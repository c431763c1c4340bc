use std::sync::Mutex;

use super::*;

#[derive(Debug, Clone)]
pub(super) struct FakeTransport {
    state: Arc<Mutex<FakeTransportState>>,
}

#[derive(Debug)]
struct FakeTransportState {
    last_request: Option<HttpRequest>,
    response: Result<HttpResponse, String>,
}

impl FakeTransport {
    pub(super) fn new(status: u16, content_type: Option<&str>, body: impl Into<Vec<u8>>) -> Self {
        Self::with_response(Ok(HttpResponse {
            status,
            content_type: content_type.map(str::to_owned),
            body: body.into(),
        }))
    }

    pub(super) fn json(status: u16, body: serde_json::Value) -> Self {
        Self::new(status, Some("application/json"), body.to_string())
    }

    pub(super) fn failing(message: &str) -> Self {
        Self::with_response(Err(message.to_owned()))
    }

    fn with_response(response: Result<HttpResponse, String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeTransportState {
                last_request: None,
                response,
            })),
        }
    }

    pub(super) fn last_request(&self) -> HttpRequest {
        let state = self.state.lock().unwrap();
        state.last_request.clone().expect("no request was sent")
    }
}

impl HttpTransport for FakeTransport {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let response = {
                let mut state = self.state.lock().unwrap();
                state.last_request = Some(request);
                state.response.clone()
            };
            response.map_err(|message| -> BoxError { message.into() })
        })
    }
}

pub(super) fn make_client(transport: FakeTransport) -> UnipileClient {
    UnipileClient {
        access_token: AccessToken::new("test_token").unwrap(),
        base_url: Url::parse("https://example.invalid/api/v1").unwrap(),
        http: Arc::new(transport),
    }
}

/// Text parts of a recorded multipart body, files rendered as `file:<name>`.
pub(super) fn multipart_summary(request: &HttpRequest) -> Vec<(String, String)> {
    let Body::Multipart(body) = &request.body else {
        panic!("expected multipart body, got {:?}", request.body);
    };
    body.parts()
        .iter()
        .map(|part| {
            let value = match &part.value {
                PartValue::Text(text) => text.clone(),
                PartValue::File { filename, .. } => format!("file:{filename}"),
            };
            (part.name.clone(), value)
        })
        .collect()
}
