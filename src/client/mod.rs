//! Client layer: executes request descriptors and maps transport ↔ domain.

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::domain::{AccessToken, ValidationError};
use crate::transport::{
    Body, DecodeError, DecodePayload, Method, MultipartBody, PartValue, QueryParams, RawResponse,
    RequestDescriptor, ResponseValidationError, ResponseValidator,
};

mod dual;
mod email;
mod messaging;

#[cfg(test)]
mod fake;

pub use dual::DualAddress;
pub use email::EmailResource;
pub use messaging::MessagingResource;

/// Environment variable holding the account DSN (`host:port` or a full URL).
pub const DSN_ENV: &str = "UNIPILE_DSN";
/// Environment variable holding the access token.
pub const ACCESS_TOKEN_ENV: &str = "UNIPILE_ACCESS_TOKEN";

const API_ROOT: &str = "/api/v1";
const API_KEY_HEADER: &str = "x-api-key";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Clone)]
struct HttpRequest {
    method: Method,
    url: Url,
    headers: BTreeMap<String, String>,
    body: Body,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    content_type: Option<String>,
    body: Vec<u8>,
}

trait HttpTransport: Send + Sync {
    fn execute<'a>(&'a self, request: HttpRequest) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let mut builder = self
                .client
                .request(reqwest_method(request.method), request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder = match request.body {
                Body::Empty => builder,
                Body::Json(map) => builder.json(&map),
                Body::Multipart(body) => builder.multipart(multipart_form(body)),
            };

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let body = response.bytes().await?.to_vec();
            Ok(HttpResponse {
                status,
                content_type,
                body,
            })
        })
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn multipart_form(body: MultipartBody) -> reqwest::multipart::Form {
    body.into_parts()
        .into_iter()
        .fold(reqwest::multipart::Form::new(), |form, part| match part.value {
            PartValue::Text(text) => form.text(part.name, text),
            PartValue::File { filename, content } => form.part(
                part.name,
                reqwest::multipart::Part::bytes(content).file_name(filename),
            ),
        })
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`UnipileClient`].
///
/// Request failures (transport, HTTP status, API problem) are kept apart from
/// response failures (undecodable body, payload rejected by the endpoint's validator),
/// so a caller can tell "the call failed" from "the call succeeded with an unexpected
/// answer".
pub enum UnipileError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// Non-successful HTTP status code without a structured error body.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Non-successful HTTP status code with the API's problem description.
    #[error("API error {status}: {title:?}")]
    Api {
        status: u16,
        kind: Option<String>,
        title: Option<String>,
        detail: Option<String>,
    },

    /// Successful status, but the body could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[source] DecodeError),

    /// Successful status, but the payload does not match the endpoint's response shape.
    #[error("invalid response: {0}")]
    InvalidResponse(#[source] ResponseValidationError),

    /// A structured multipart field could not be serialized.
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// The base URL parsed, but cannot carry path segments (e.g. `mailto:`).
    #[error("base URL cannot be used for API paths: {0}")]
    UnsupportedBaseUrl(String),

    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),
}

/// Problem description returned by the API on failures.
#[derive(Debug, Deserialize)]
struct ProblemJson {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

fn status_error(response: HttpResponse) -> UnipileError {
    if let Ok(problem) = serde_json::from_slice::<ProblemJson>(&response.body) {
        if problem.kind.is_some() || problem.title.is_some() {
            return UnipileError::Api {
                status: response.status,
                kind: problem.kind,
                title: problem.title,
                detail: problem.detail,
            };
        }
    }

    let body = String::from_utf8_lossy(&response.body).into_owned();
    UnipileError::HttpStatus {
        status: response.status,
        body: if body.trim().is_empty() {
            None
        } else {
            Some(body)
        },
    }
}

/// Turn a DSN or URL into the API root.
///
/// `api1.unipile.com:13111` becomes `https://api1.unipile.com:13111/api/v1`; a URL
/// with an explicit path is kept as given.
fn api_base_url(dsn: &str) -> Result<Url, UnipileError> {
    let trimmed = dsn.trim().trim_end_matches('/');
    let mut url = if trimmed.contains("://") {
        Url::parse(trimmed)?
    } else {
        Url::parse(&format!("https://{trimmed}"))?
    };
    if url.cannot_be_a_base() {
        return Err(UnipileError::UnsupportedBaseUrl(url.into()));
    }
    if url.path() == "/" {
        url.set_path(API_ROOT);
    }
    Ok(url)
}

#[derive(Debug, Clone)]
/// Builder for [`UnipileClient`].
///
/// Use this when you need to customize the timeout or user-agent.
pub struct UnipileClientBuilder {
    dsn: String,
    access_token: AccessToken,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl UnipileClientBuilder {
    /// Create a builder for the account DSN (`host:port`) or a full API root URL.
    pub fn new(dsn: impl Into<String>, access_token: AccessToken) -> Self {
        Self {
            dsn: dsn.into(),
            access_token,
            timeout: None,
            user_agent: None,
        }
    }

    /// Read the DSN and access token from `UNIPILE_DSN` and `UNIPILE_ACCESS_TOKEN`.
    pub fn from_env() -> Result<Self, UnipileError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, UnipileError> {
        let dsn = lookup(DSN_ENV).ok_or(UnipileError::MissingEnv(DSN_ENV))?;
        let token = lookup(ACCESS_TOKEN_ENV).ok_or(UnipileError::MissingEnv(ACCESS_TOKEN_ENV))?;
        Ok(Self::new(dsn, AccessToken::new(token)?))
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`UnipileClient`].
    pub fn build(self) -> Result<UnipileClient, UnipileError> {
        let base_url = api_base_url(&self.dsn)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| UnipileError::Transport(Box::new(err)))?;

        Ok(UnipileClient {
            access_token: self.access_token,
            base_url,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level Unipile client.
///
/// Cheap to clone and safe to share between tasks: it only holds immutable
/// configuration and a shared HTTP client. Operations are grouped by resource, see
/// [`UnipileClient::email`] and [`UnipileClient::messaging`].
pub struct UnipileClient {
    access_token: AccessToken,
    base_url: Url,
    http: Arc<dyn HttpTransport>,
}

impl UnipileClient {
    /// Create a client with default HTTP settings.
    ///
    /// For more customization, use [`UnipileClient::builder`].
    pub fn new(dsn: impl AsRef<str>, access_token: AccessToken) -> Result<Self, UnipileError> {
        Ok(Self {
            access_token,
            base_url: api_base_url(dsn.as_ref())?,
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        })
    }

    /// Start building a client with custom settings.
    pub fn builder(dsn: impl Into<String>, access_token: AccessToken) -> UnipileClientBuilder {
        UnipileClientBuilder::new(dsn, access_token)
    }

    /// API root every request path is appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Email, folder and email-attachment operations.
    pub fn email(&self) -> EmailResource<'_> {
        EmailResource::new(self)
    }

    /// Chat, message and attendee operations.
    pub fn messaging(&self) -> MessagingResource<'_> {
        MessagingResource::new(self)
    }

    /// Execute a request descriptor and run its validator on the response.
    ///
    /// Errors:
    /// - [`UnipileError::Transport`] when the HTTP exchange itself fails,
    /// - [`UnipileError::Api`] / [`UnipileError::HttpStatus`] for non-2xx responses,
    /// - [`UnipileError::Decode`] when a 2xx body cannot be decoded,
    /// - [`UnipileError::InvalidResponse`] when the validator rejects the payload.
    ///
    /// Nothing is retried.
    pub async fn send<V>(&self, descriptor: RequestDescriptor<V>) -> Result<V::Output, UnipileError>
    where
        V: ResponseValidator,
    {
        let path = descriptor.path_display();
        let RequestDescriptor {
            path: segments,
            method,
            parameters,
            body,
            headers: descriptor_headers,
            validator,
        } = descriptor;

        let url = self.endpoint_url(&segments, &parameters)?;
        let mut headers = BTreeMap::new();
        headers.insert(
            API_KEY_HEADER.to_owned(),
            self.access_token.as_str().to_owned(),
        );
        headers.insert(
            "accept".to_owned(),
            <V::Input as DecodePayload>::ACCEPT.to_owned(),
        );
        headers.extend(descriptor_headers);

        tracing::debug!(%method, %path, parameters = parameters.len(), "sending request");
        let response = self
            .http
            .execute(HttpRequest {
                method,
                url,
                headers,
                body,
            })
            .await
            .map_err(UnipileError::Transport)?;
        tracing::debug!(%method, %path, status = response.status, "received response");

        if !(200..=299).contains(&response.status) {
            return Err(status_error(response));
        }

        let payload = V::Input::decode(RawResponse {
            content_type: response.content_type,
            body: response.body,
        })
        .map_err(UnipileError::Decode)?;

        validator.validate(payload).map_err(|err| {
            tracing::warn!(%method, %path, error = %err, "response failed validation");
            UnipileError::InvalidResponse(err)
        })
    }

    fn endpoint_url(
        &self,
        segments: &[String],
        parameters: &QueryParams,
    ) -> Result<Url, UnipileError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| UnipileError::UnsupportedBaseUrl(self.base_url.to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        if !parameters.is_empty() {
            url.query_pairs_mut().extend_pairs(parameters.iter());
        }
        Ok(url)
    }
}
