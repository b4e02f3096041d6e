// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The HTTP client core.
//!
//! [ReqwestClient] owns the base URL, the credentials, and the default
//! headers. Requests are built with [ReqwestClient::new_request] and executed
//! with one of three sinks:
//! - [execute][ReqwestClient::execute] decodes a JSON body,
//! - [execute_to_writer][ReqwestClient::execute_to_writer] copies the body
//!   verbatim into an [AsyncWrite],
//! - [execute_empty][ReqwestClient::execute_empty] discards the body.
//!
//! Responses outside the accepted status codes become HTTP errors carrying
//! the full response payload. Bodies that are not consumed are drained, up to
//! [DRAIN_LIMIT] bytes, so the connection can be reused.

use crate::observability;
use crate::options::{ClientConfig, ClientInfo, Credentials};
use bytes::Bytes;
use edgecloud_auth::credentials::{anonymous, api_key};
use edgecloud_gax::Result;
use edgecloud_gax::client_builder::{AfterRequestHook, Error as BuilderError};
use edgecloud_gax::error::{Error, ErrorKind, HttpError};
use edgecloud_gax::options::RequestOptions;
use edgecloud_gax::response::{Parts, Response};
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use http::{Method, StatusCode};
use reqwest::Url;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{Instrument, Span};

/// Bodies are drained up to this many bytes before the response is closed.
pub const DRAIN_LIMIT: u64 = 2 * 1024;

/// A request ready to be executed.
///
/// The body is already encoded, and the default, `Accept`, `User-Agent`, and
/// `Content-Type` headers are set. The authentication headers are added when
/// the request is executed.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl HttpRequest {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The encoded body, `None` for requests without a body.
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }
}

#[derive(Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
    cred: Credentials,
    endpoint: Url,
    default_headers: HeaderMap,
    user_agent: HeaderValue,
    after_request: Option<AfterRequestHook>,
    tracing: bool,
}

impl std::fmt::Debug for ReqwestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestClient")
            .field("cred", &self.cred)
            .field("endpoint", &self.endpoint.as_str())
            .field("default_headers", &self.default_headers)
            .field("user_agent", &self.user_agent)
            .field("after_request", &self.after_request.as_ref().map(|_| "..."))
            .field("tracing", &self.tracing)
            .finish()
    }
}

impl ReqwestClient {
    pub async fn new(
        config: ClientConfig,
        default_endpoint: &str,
        info: ClientInfo,
    ) -> edgecloud_gax::client_builder::Result<Self> {
        let tracing = crate::options::tracing_enabled(&config);
        let cred = Self::make_credentials(&config)?;
        let endpoint = parse_endpoint(config.endpoint.as_deref().unwrap_or(default_endpoint))
            .map_err(BuilderError::config)?;
        let default_headers =
            parse_headers(&config.default_headers).map_err(BuilderError::config)?;
        let user_agent = config.user_agent.unwrap_or_else(|| info.user_agent());
        let user_agent = HeaderValue::try_from(user_agent.as_str())
            .map_err(|_| BuilderError::config(Error::invalid_input("user_agent", &user_agent)))?;
        let inner = reqwest::Client::builder()
            .build()
            .map_err(BuilderError::transport)?;
        Ok(Self {
            inner,
            cred,
            endpoint,
            default_headers,
            user_agent,
            after_request: config.after_request,
            tracing,
        })
    }

    fn make_credentials(config: &ClientConfig) -> edgecloud_gax::client_builder::Result<Credentials> {
        if let Some(c) = config.cred.clone() {
            return Ok(c);
        }
        if config.env {
            return api_key::Builder::from_env()
                .and_then(|b| b.build())
                .map_err(BuilderError::cred);
        }
        Ok(anonymous::Builder::new().build())
    }

    /// The base URL for all requests, always ending with a separator.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Builds a request for `path`, relative to the endpoint.
    ///
    /// An absolute URL, such as one produced by an endpoint locator, replaces
    /// the endpoint.
    ///
    /// Methods without a body (`GET`, `HEAD`, and `OPTIONS`) ignore `body` and
    /// never carry a `Content-Type` header. For other methods a body, if
    /// present, is encoded as JSON.
    pub fn new_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<HttpRequest>
    where
        B: serde::Serialize + ?Sized,
    {
        let url = self
            .endpoint
            .join(path.trim_start_matches('/'))
            .map_err(|_| Error::invalid_input("path", path))?;
        let mut headers = self.default_headers.clone();
        let body = match body {
            Some(b) if method_has_body(&method) => {
                let payload = serde_json::to_vec(b).map_err(Error::ser)?;
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                Some(Bytes::from(payload))
            }
            _ => None,
        };
        if !method_has_body(&method) {
            headers.remove(CONTENT_TYPE);
        }
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, self.user_agent.clone());
        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Executes the request and decodes the JSON body.
    ///
    /// A `204 No Content` response yields `O::default()`.
    pub async fn execute<O>(&self, request: &HttpRequest, options: &RequestOptions) -> Result<Response<O>>
    where
        O: serde::de::DeserializeOwned + Default,
    {
        let span = observability::http_span(self.tracing, &request.method, request.url.as_str());
        let attempt = async {
            let (parts, response) = self.send(request, options, &span).await?;
            decode(parts, response).await
        };
        cancellable(options, attempt).instrument(span.clone()).await
    }

    /// Executes the request and copies the body verbatim into `writer`.
    ///
    /// Returns the number of bytes written.
    pub async fn execute_to_writer<W>(
        &self,
        request: &HttpRequest,
        options: &RequestOptions,
        writer: &mut W,
    ) -> Result<Response<u64>>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let span = observability::http_span(self.tracing, &request.method, request.url.as_str());
        let attempt = async {
            let (parts, mut response) = self.send(request, options, &span).await?;
            let mut written = 0_u64;
            if parts.status == StatusCode::NO_CONTENT {
                drain(response).await;
                return Ok(Response::from_parts(parts, written));
            }
            while let Some(chunk) = response.chunk().await.map_err(map_reqwest_error)? {
                writer.write_all(&chunk).await.map_err(Error::io)?;
                written += chunk.len() as u64;
            }
            writer.flush().await.map_err(Error::io)?;
            Ok(Response::from_parts(parts, written))
        };
        cancellable(options, attempt).instrument(span.clone()).await
    }

    /// Executes the request and discards the body.
    pub async fn execute_empty(
        &self,
        request: &HttpRequest,
        options: &RequestOptions,
    ) -> Result<Response<()>> {
        let span = observability::http_span(self.tracing, &request.method, request.url.as_str());
        let attempt = async {
            let (parts, response) = self.send(request, options, &span).await?;
            drain(response).await;
            Ok(Response::from_parts(parts, ()))
        };
        cancellable(options, attempt).instrument(span.clone()).await
    }

    // Sends the request, refreshing the credentials and replaying the request
    // once if the service rejects them.
    async fn send(
        &self,
        request: &HttpRequest,
        options: &RequestOptions,
        span: &Span,
    ) -> Result<(Parts, reqwest::Response)> {
        match self.attempt(request, options, span).await {
            Err(e) if e.kind() == ErrorKind::Unauthenticated && self.cred.can_refresh() => {
                tracing::debug!("the service rejected the credentials, refreshing them");
                self.cred
                    .refresh()
                    .await
                    .map_err(Error::reauthentication_failed)?;
                observability::record_resend(span, 1);
                self.attempt(request, options, span)
                    .await
                    .map_err(|e| Error::after_reauthentication(options.error_overrides().apply(e)))
            }
            Err(e) => Err(options.error_overrides().apply(e)),
            Ok(r) => Ok(r),
        }
    }

    async fn attempt(
        &self,
        request: &HttpRequest,
        options: &RequestOptions,
        span: &Span,
    ) -> Result<(Parts, reqwest::Response)> {
        let sent = self
            .request_builder(request, options)
            .await?
            .build()
            .map_err(map_reqwest_error)?;
        let observed = match &self.after_request {
            Some(_) => Some(observed_request(&sent, request.body.clone())?),
            None => None,
        };
        let response = self.inner.execute(sent).await.map_err(map_reqwest_error)?;
        let parts = Parts::new()
            .set_status(response.status())
            .set_headers(response.headers().clone())
            .set_method(request.method.clone())
            .set_url(response.url().as_str());
        observability::record_status(span, parts.status.as_u16());
        if let (Some(hook), Some(observed)) = (&self.after_request, &observed) {
            hook(observed, &parts);
        }
        if !options.is_ok_status(parts.status.as_u16()) {
            return Err(to_http_error(parts, options, response).await);
        }
        Ok((parts, response))
    }

    async fn request_builder(
        &self,
        request: &HttpRequest,
        options: &RequestOptions,
    ) -> Result<reqwest::RequestBuilder> {
        let mut url = request.url.clone();
        if !options.query().is_empty() {
            url.query_pairs_mut().extend_pairs(
                options
                    .query()
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            );
        }
        let mut headers = request.headers.clone();
        for (name, value) in options.headers() {
            if !is_protected(name) {
                headers.insert(name.clone(), value.clone());
            }
        }
        let auth = self.cred.headers().await.map_err(Error::authentication)?;
        headers.extend(auth);

        let mut builder = self.inner.request(request.method.clone(), url).headers(headers);
        if let Some(timeout) = options.attempt_timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        Ok(builder)
    }
}

// The request as it goes on the wire, including the query string and the
// authentication headers.
fn observed_request(sent: &reqwest::Request, body: Option<Bytes>) -> Result<http::Request<Bytes>> {
    let uri = sent
        .url()
        .as_str()
        .parse::<http::Uri>()
        .map_err(|_| Error::invalid_input("url", sent.url()))?;
    let mut observed = http::Request::new(body.unwrap_or_default());
    *observed.method_mut() = sent.method().clone();
    *observed.uri_mut() = uri;
    *observed.headers_mut() = sent.headers().clone();
    Ok(observed)
}

fn method_has_body(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

// Headers the client always sets, per-request options cannot change them.
fn is_protected(name: &HeaderName) -> bool {
    name == AUTHORIZATION || name == ACCEPT || name == USER_AGENT
}

fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let mut url = Url::parse(endpoint).map_err(|_| Error::invalid_input("endpoint", endpoint))?;
    if url.cannot_be_a_base() {
        return Err(Error::invalid_input("endpoint", endpoint));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_headers(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (k, v) in headers {
        let name = HeaderName::try_from(k.as_str()).map_err(|_| Error::invalid_input("header name", k))?;
        let value = HeaderValue::try_from(v.as_str()).map_err(|_| Error::invalid_input("header value", k))?;
        map.insert(name, value);
    }
    Ok(map)
}

fn map_reqwest_error(err: reqwest::Error) -> Error {
    match err {
        e if e.is_timeout() => Error::timeout(e),
        e => Error::io(e),
    }
}

async fn cancellable<T, F>(options: &RequestOptions, attempt: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let Some(token) = options.cancellation_token() else {
        return attempt.await;
    };
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(Error::cancelled()),
        r = attempt => r,
    }
}

async fn decode<O>(parts: Parts, response: reqwest::Response) -> Result<Response<O>>
where
    O: serde::de::DeserializeOwned + Default,
{
    // 204 No Content has no body, and an empty body is not valid JSON.
    if parts.status == StatusCode::NO_CONTENT {
        drain(response).await;
        return Ok(Response::from_parts(parts, O::default()));
    }
    let body = response
        .bytes()
        .await
        .map_err(|e| map_reqwest_error(e).with_response(parts.clone()))?;
    let body = serde_json::from_slice::<O>(&body)
        .map_err(|e| Error::deser(e).with_response(parts.clone()))?;
    Ok(Response::from_parts(parts, body))
}

async fn to_http_error(parts: Parts, options: &RequestOptions, response: reqwest::Response) -> Error {
    let payload = match response.bytes().await {
        Ok(b) => b,
        Err(e) => return map_reqwest_error(e).with_response(parts),
    };
    let details = HttpError::new(
        parts.method.clone(),
        parts.url.clone(),
        options.ok_codes().to_vec(),
        parts.status.as_u16(),
        parts.headers.clone(),
        payload,
    );
    Error::http(details).with_response(parts)
}

/// Reads and discards up to [DRAIN_LIMIT] bytes of the body.
///
/// Bodies with a known length above the limit are not drained. Bodies of
/// unknown length are drained up to the limit. Errors are ignored. Returns the
/// number of bytes read.
pub(crate) async fn drain(mut response: reqwest::Response) -> u64 {
    if response.content_length().is_some_and(|n| n > DRAIN_LIMIT) {
        tracing::debug!(
            content_length = response.content_length(),
            "body too large, closing without draining"
        );
        return 0;
    }
    let mut drained = 0_u64;
    while drained < DRAIN_LIMIT {
        match response.chunk().await {
            Ok(Some(chunk)) => drained += chunk.len() as u64,
            Ok(None) | Err(_) => break,
        }
    }
    tracing::debug!(drained, "drained response body");
    drained
}
