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

use super::HttpError;
use crate::response::Parts;
use std::error::Error as StdError;

type BoxError = Box<dyn StdError + Send + Sync>;

/// The core error returned by all client libraries.
///
/// The client libraries report errors from multiple sources. The service may
/// return an error status, the transport may be unable to complete the
/// request, the request may be cancelled or time out, or the library may
/// reject invalid or missing application inputs before any request is made.
///
/// Every error carries a stable [ErrorKind] tag. Errors created from HTTP
/// responses also carry the method, URL, expected and actual status codes, and
/// the response payload. Use [status_code()][Error::status_code] to branch on
/// the HTTP status without enumerating the kinds.
///
/// # Example
/// ```
/// use edgecloud_gax::error::{Error, ErrorKind};
/// match example_function() {
///     Err(e) if e.kind() == ErrorKind::NotFound => {
///         println!("cannot find the thing: {e}");
///     },
///     Err(e) if e.status_code().is_some_and(|c| c >= 500) => {
///         println!("the service is having a bad day: {e}");
///     },
///     Err(e) => { println!("some other error {e}"); },
///     Ok(_) => { println!("success, how boring"); },
/// }
///
/// fn example_function() -> Result<String, Error> {
///     // ... details omitted ...
///     # Err(Error::missing_input("project_id"))
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    info: Option<String>,
    http: Option<Box<HttpError>>,
    response: Option<Box<Parts>>,
    source: Option<BoxError>,
}

impl Error {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            info: None,
            http: None,
            response: None,
            source: None,
        }
    }

    fn with_source<T: Into<BoxError>>(mut self, source: T) -> Self {
        self.source = Some(source.into());
        self
    }

    /// A required argument was not provided.
    ///
    /// # Example
    /// ```
    /// use edgecloud_gax::error::{Error, ErrorKind};
    /// let error = Error::missing_input("region_id");
    /// assert_eq!(error.kind(), ErrorKind::MissingInput);
    /// assert!(error.to_string().contains("region_id"));
    /// ```
    pub fn missing_input<T: Into<String>>(argument: T) -> Self {
        let argument = argument.into();
        Self::new(
            ErrorKind::MissingInput,
            format!("missing input for argument [{argument}]"),
        )
    }

    /// An argument was provided, but its value is malformed.
    pub fn invalid_input<T: Into<String>, V: std::fmt::Display>(argument: T, value: V) -> Self {
        let argument = argument.into();
        Self::new(
            ErrorKind::InvalidInput,
            format!("invalid input provided for argument [{argument}]: [{value}]"),
        )
    }

    /// A required environment variable is not set.
    pub fn missing_env_var<T: Into<String>>(name: T) -> Self {
        let name = name.into();
        Self::new(
            ErrorKind::MissingEnvVar,
            format!("missing environment variable [{name}]"),
        )
    }

    /// The operation did not complete before its deadline.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use edgecloud_gax::error::Error;
    /// let error = Error::timeout("simulated timeout");
    /// assert!(error.is_timeout());
    /// assert!(error.source().is_some());
    /// ```
    pub fn timeout<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::TimeOut, "the operation exceeded its deadline").with_source(source)
    }

    /// Creates an error from a non-successful HTTP response.
    ///
    /// The kind is derived from the status code, see [ErrorKind::from_status].
    ///
    /// # Example
    /// ```
    /// use edgecloud_gax::error::{Error, ErrorKind, HttpError};
    /// let http = HttpError::new(
    ///     http::Method::GET,
    ///     "https://api.example.com/v1/things/1/2",
    ///     Vec::new(),
    ///     404,
    ///     http::HeaderMap::new(),
    ///     bytes::Bytes::from_static(br#"{"message": "no such thing"}"#),
    /// );
    /// let error = Error::http(http);
    /// assert_eq!(error.kind(), ErrorKind::NotFound);
    /// assert_eq!(error.status_code(), Some(404));
    /// assert_eq!(error.to_string(), "no such thing");
    /// ```
    pub fn http(details: HttpError) -> Self {
        let kind = ErrorKind::from_status(details.status_code());
        let message = details.human_text();
        let mut error = Self::new(kind, message);
        error.http = Some(Box::new(details));
        error
    }

    /// The endpoint locator could not produce an endpoint for the service.
    pub fn endpoint_not_found() -> Self {
        Self::new(
            ErrorKind::EndpointNotFound,
            "no suitable endpoint could be found in the service catalog",
        )
    }

    /// The named service is not known to the client.
    pub fn service_not_found<T: Into<String>>(name: T) -> Self {
        let name = name.into();
        Self::new(
            ErrorKind::ServiceNotFound,
            format!("no suitable service [{name}] could be found"),
        )
    }

    /// A lookup by name returned no results.
    pub fn resource_not_found<T: Into<String>, N: Into<String>>(resource_type: T, name: N) -> Self {
        let (resource_type, name) = (resource_type.into(), name.into());
        Self::new(
            ErrorKind::ResourceNotFound,
            format!("unable to find {resource_type} with name {name}"),
        )
    }

    /// A lookup by name returned more than one result.
    pub fn multiple_resources_found<T: Into<String>, N: Into<String>>(
        resource_type: T,
        name: N,
        count: usize,
    ) -> Self {
        let (resource_type, name) = (resource_type.into(), name.into());
        Self::new(
            ErrorKind::MultipleResourcesFound,
            format!("found {count} {resource_type}s matching {name}"),
        )
    }

    /// A value did not have the expected type.
    pub fn unexpected_type<E: Into<String>, A: Into<String>>(expected: E, actual: A) -> Self {
        let (expected, actual) = (expected.into(), actual.into());
        Self::new(
            ErrorKind::UnexpectedType,
            format!("expected {expected} but got {actual}"),
        )
    }

    /// Refreshing the credentials after a `401 Unauthorized` response failed.
    pub fn reauthentication_failed<T: Into<BoxError>>(source: T) -> Self {
        Self::new(
            ErrorKind::ReauthenticationFailed,
            "unable to re-authenticate",
        )
        .with_source(source)
    }

    /// The credentials were refreshed, but the replayed request still failed.
    ///
    /// The source is the error returned by the replayed request.
    pub fn after_reauthentication(source: Error) -> Self {
        Self::new(
            ErrorKind::AfterReauthentication,
            "successfully re-authenticated, but got error executing request",
        )
        .with_source(source)
    }

    /// Cannot create the authentication headers.
    pub fn authentication<T: Into<BoxError>>(source: T) -> Self {
        Self::new(
            ErrorKind::Authentication,
            "cannot create the authentication headers",
        )
        .with_source(source)
    }

    /// The request body could not be serialized.
    pub fn ser<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Serialization, "cannot serialize the request").with_source(source)
    }

    /// The response body could not be deserialized.
    pub fn deser<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Deserialization, "cannot deserialize the response")
            .with_source(source)
    }

    /// A problem in the transport layer without a full HTTP response.
    ///
    /// Examples include connection failures, read or write problems, and
    /// broken connections.
    pub fn io<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Io, "the transport reports an error").with_source(source)
    }

    /// The operation was cancelled by the caller.
    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled, "the operation was cancelled")
    }

    /// Replaces the human readable text of this error.
    ///
    /// Empty strings are ignored, the default message is used in that case.
    ///
    /// # Example
    /// ```
    /// use edgecloud_gax::error::Error;
    /// let error = Error::missing_input("name").with_info("the server name is required");
    /// assert_eq!(error.to_string(), "the server name is required");
    /// let error = Error::missing_input("name").with_info("");
    /// assert!(error.to_string().contains("[name]"));
    /// ```
    pub fn with_info<T: Into<String>>(mut self, info: T) -> Self {
        let info = info.into();
        self.info = (!info.is_empty()).then_some(info);
        self
    }

    /// Attaches the response metadata to this error.
    pub fn with_response(mut self, parts: Parts) -> Self {
        self.response = Some(Box::new(parts));
        self
    }

    /// The kind of error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The human readable text for this error.
    ///
    /// Returns the `info` override if one is set. For errors created from HTTP
    /// responses this is the `message` field in the response payload, if
    /// present, or a description of the request and response otherwise.
    pub fn message(&self) -> &str {
        self.info.as_deref().unwrap_or(self.message.as_str())
    }

    /// The HTTP status code, if any, associated with this error.
    ///
    /// This is `Some` for every kind derived from a HTTP response, including
    /// [ErrorKind::UnexpectedResponseCode]. Errors wrapping a failed
    /// re-authentication replay report the status of the replayed request.
    pub fn status_code(&self) -> Option<u16> {
        if let Some(http) = &self.http {
            return Some(http.status_code());
        }
        match self.kind {
            ErrorKind::AfterReauthentication => self
                .source
                .as_ref()
                .and_then(|e| e.downcast_ref::<Error>())
                .and_then(Error::status_code),
            _ => None,
        }
    }

    /// The HTTP request and response details, if any.
    pub fn http_error(&self) -> Option<&HttpError> {
        self.http.as_deref()
    }

    /// The response metadata, if the error happened after a response was
    /// received.
    pub fn response(&self) -> Option<&Parts> {
        self.response.as_deref()
    }

    /// If true, the operation exceeded its deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, ErrorKind::TimeOut)
    }

    /// If true, the operation was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind, ErrorKind::Cancelled)
    }

    /// If true, the error is likely to go away if the operation is retried.
    ///
    /// Transport errors, timeouts, `408`, `429`, and all `5xx` responses are
    /// considered transient.
    pub fn is_transient(&self) -> bool {
        match self.kind {
            ErrorKind::Io
            | ErrorKind::TimeOut
            | ErrorKind::RequestTimeout
            | ErrorKind::TooManyRequests
            | ErrorKind::InternalServerError
            | ErrorKind::ServiceUnavailable => true,
            ErrorKind::UnexpectedResponseCode => {
                self.status_code().is_some_and(|c| (500..600).contains(&c))
            }
            _ => false,
        }
    }

    /// Returns the source of the error as a specific type, if possible.
    pub fn as_inner<T: StdError + Send + Sync + 'static>(&self) -> Option<&T> {
        self.source.as_ref().and_then(|e| e.downcast_ref::<T>())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(info) = &self.info {
            return f.write_str(info);
        }
        match &self.source {
            Some(e) => write!(f, "{}: {e}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

/// The kind of error held by an [Error] instance.
///
/// This is a closed set. The HTTP status derived kinds are produced by
/// [ErrorKind::from_status].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required argument was not provided.
    MissingInput,
    /// An argument has a malformed value.
    InvalidInput,
    /// A required environment variable is not set.
    MissingEnvVar,
    /// The service returned a status code without a more specific kind.
    UnexpectedResponseCode,
    /// The operation exceeded its deadline.
    TimeOut,
    /// `401 Unauthorized`.
    Unauthenticated,
    /// `403 Forbidden`.
    Forbidden,
    /// `404 Not Found`.
    NotFound,
    /// `405 Method Not Allowed`.
    MethodNotAllowed,
    /// `408 Request Timeout`.
    RequestTimeout,
    /// `409 Conflict`.
    Conflict,
    /// `429 Too Many Requests`.
    TooManyRequests,
    /// `500 Internal Server Error`.
    InternalServerError,
    /// `503 Service Unavailable`.
    ServiceUnavailable,
    /// The endpoint locator could not produce an endpoint.
    EndpointNotFound,
    /// The requested service is unknown.
    ServiceNotFound,
    /// A lookup by name returned no results.
    ResourceNotFound,
    /// A lookup by name returned more than one result.
    MultipleResourcesFound,
    /// A value did not have the expected type.
    UnexpectedType,
    /// Refreshing the credentials failed.
    ReauthenticationFailed,
    /// The request failed after refreshing the credentials.
    AfterReauthentication,
    /// The credentials are malformed or cannot produce headers.
    Authentication,
    /// The request body could not be serialized.
    Serialization,
    /// The response body could not be deserialized.
    Deserialization,
    /// The transport failed without a full HTTP response.
    Io,
    /// The operation was cancelled.
    Cancelled,
}

impl ErrorKind {
    /// Maps a non-successful HTTP status code to its kind.
    ///
    /// # Example
    /// ```
    /// use edgecloud_gax::error::ErrorKind;
    /// assert_eq!(ErrorKind::from_status(409), ErrorKind::Conflict);
    /// assert_eq!(ErrorKind::from_status(400), ErrorKind::UnexpectedResponseCode);
    /// ```
    pub fn from_status(status_code: u16) -> Self {
        match status_code {
            401 => Self::Unauthenticated,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            405 => Self::MethodNotAllowed,
            408 => Self::RequestTimeout,
            409 => Self::Conflict,
            429 => Self::TooManyRequests,
            500 => Self::InternalServerError,
            503 => Self::ServiceUnavailable,
            _ => Self::UnexpectedResponseCode,
        }
    }

    /// A stable name for the kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MissingInput => "MissingInput",
            Self::InvalidInput => "InvalidInput",
            Self::MissingEnvVar => "MissingEnvVar",
            Self::UnexpectedResponseCode => "UnexpectedResponseCode",
            Self::TimeOut => "TimeOut",
            Self::Unauthenticated => "Unauthenticated",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "NotFound",
            Self::MethodNotAllowed => "MethodNotAllowed",
            Self::RequestTimeout => "RequestTimeout",
            Self::Conflict => "Conflict",
            Self::TooManyRequests => "TooManyRequests",
            Self::InternalServerError => "InternalServerError",
            Self::ServiceUnavailable => "ServiceUnavailable",
            Self::EndpointNotFound => "EndpointNotFound",
            Self::ServiceNotFound => "ServiceNotFound",
            Self::ResourceNotFound => "ResourceNotFound",
            Self::MultipleResourcesFound => "MultipleResourcesFound",
            Self::UnexpectedType => "UnexpectedType",
            Self::ReauthenticationFailed => "ReauthenticationFailed",
            Self::AfterReauthentication => "AfterReauthentication",
            Self::Authentication => "Authentication",
            Self::Serialization => "Serialization",
            Self::Deserialization => "Deserialization",
            Self::Io => "Io",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::{HeaderMap, Method};
    use std::error::Error as _;
    use test_case::test_case;

    fn http_error(status: u16, payload: &'static str) -> HttpError {
        HttpError::new(
            Method::GET,
            "https://api.example.com/v1/things/42/7",
            Vec::new(),
            status,
            HeaderMap::new(),
            Bytes::from_static(payload.as_bytes()),
        )
    }

    #[test_case(401, ErrorKind::Unauthenticated)]
    #[test_case(403, ErrorKind::Forbidden)]
    #[test_case(404, ErrorKind::NotFound)]
    #[test_case(405, ErrorKind::MethodNotAllowed)]
    #[test_case(408, ErrorKind::RequestTimeout)]
    #[test_case(409, ErrorKind::Conflict)]
    #[test_case(429, ErrorKind::TooManyRequests)]
    #[test_case(500, ErrorKind::InternalServerError)]
    #[test_case(503, ErrorKind::ServiceUnavailable)]
    #[test_case(400, ErrorKind::UnexpectedResponseCode)]
    #[test_case(502, ErrorKind::UnexpectedResponseCode)]
    #[test_case(302, ErrorKind::UnexpectedResponseCode)]
    fn http_kinds(status: u16, want: ErrorKind) {
        let error = Error::http(http_error(status, ""));
        assert_eq!(error.kind(), want, "{error:?}");
        assert_eq!(error.status_code(), Some(status), "{error:?}");
        assert!(error.http_error().is_some(), "{error:?}");
        assert!(error.source().is_none(), "{error:?}");
    }

    #[test]
    fn http_with_service_message() {
        let error = Error::http(http_error(404, r#"{"message": "Region not found"}"#));
        assert_eq!(error.to_string(), "Region not found");
        assert_eq!(error.message(), "Region not found");
    }

    #[test]
    fn http_without_service_message() {
        let error = Error::http(http_error(404, "Region not found"));
        let fmt = error.to_string();
        assert!(fmt.contains("Region not found"), "{fmt}");
        assert!(fmt.contains("GET"), "{fmt}");
        assert!(fmt.contains("https://api.example.com/v1/things/42/7"), "{fmt}");
        assert!(fmt.contains("404"), "{fmt}");
    }

    #[test]
    fn info_takes_priority() {
        let error = Error::http(http_error(409, r#"{"message": "conflict"}"#))
            .with_info("floating IP already exists");
        assert_eq!(error.to_string(), "floating IP already exists");
        assert_eq!(error.kind(), ErrorKind::Conflict);
        assert_eq!(error.status_code(), Some(409));
    }

    #[test]
    fn validation_kinds() {
        let error = Error::missing_input("project_id");
        assert_eq!(error.kind(), ErrorKind::MissingInput);
        assert!(error.to_string().contains("project_id"), "{error}");
        assert!(error.status_code().is_none(), "{error:?}");

        let error = Error::invalid_input("id", "not-a-uuid");
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
        assert!(error.to_string().contains("not-a-uuid"), "{error}");

        let error = Error::missing_env_var("EDGECLOUD_API_KEY");
        assert_eq!(error.kind(), ErrorKind::MissingEnvVar);
        assert!(error.to_string().contains("EDGECLOUD_API_KEY"), "{error}");
    }

    #[test]
    fn lookup_kinds() {
        let error = Error::resource_not_found("floating IP", "10.0.0.1");
        assert_eq!(error.kind(), ErrorKind::ResourceNotFound);
        assert!(error.to_string().contains("10.0.0.1"), "{error}");

        let error = Error::multiple_resources_found("floating IP", "10.0.0.1", 2);
        assert_eq!(error.kind(), ErrorKind::MultipleResourcesFound);
        assert!(error.to_string().contains("found 2"), "{error}");

        let error = Error::unexpected_type("string", "number");
        assert_eq!(error.kind(), ErrorKind::UnexpectedType);

        assert_eq!(Error::endpoint_not_found().kind(), ErrorKind::EndpointNotFound);
        assert_eq!(
            Error::service_not_found("dns").kind(),
            ErrorKind::ServiceNotFound
        );
    }

    #[test]
    fn reauthentication() {
        let error = Error::reauthentication_failed("token endpoint unavailable");
        assert_eq!(error.kind(), ErrorKind::ReauthenticationFailed);
        assert!(error.source().is_some(), "{error:?}");
        assert!(error.status_code().is_none(), "{error:?}");

        let replay = Error::http(http_error(403, ""));
        let error = Error::after_reauthentication(replay);
        assert_eq!(error.kind(), ErrorKind::AfterReauthentication);
        assert_eq!(error.status_code(), Some(403));
        let inner = error.as_inner::<Error>();
        assert!(
            matches!(inner, Some(e) if e.kind() == ErrorKind::Forbidden),
            "{error:?}"
        );
    }

    #[test]
    fn source_is_displayed() {
        let error = Error::io("connection reset");
        assert_eq!(error.kind(), ErrorKind::Io);
        assert!(error.to_string().contains("connection reset"), "{error}");
        assert!(error.source().is_some(), "{error:?}");
    }

    #[test_case(Error::io("reset"), true)]
    #[test_case(Error::timeout("slow"), true)]
    #[test_case(Error::http(http_error(500, "")), true)]
    #[test_case(Error::http(http_error(502, "")), true)]
    #[test_case(Error::http(http_error(503, "")), true)]
    #[test_case(Error::http(http_error(429, "")), true)]
    #[test_case(Error::http(http_error(408, "")), true)]
    #[test_case(Error::http(http_error(400, "")), false)]
    #[test_case(Error::http(http_error(404, "")), false)]
    #[test_case(Error::cancelled(), false)]
    #[test_case(Error::deser("bad json"), false)]
    #[test_case(Error::missing_input("id"), false)]
    fn transient(error: Error, want: bool) {
        assert_eq!(error.is_transient(), want, "{error:?}");
    }

    #[test]
    fn response_parts() {
        let parts = Parts::new().set_status(http::StatusCode::OK);
        let error = Error::deser("bad json").with_response(parts);
        assert_eq!(
            error.response().map(|p| p.status),
            Some(http::StatusCode::OK)
        );
    }

    #[test]
    fn kind_names() {
        assert_eq!(ErrorKind::NotFound.to_string(), "NotFound");
        assert_eq!(ErrorKind::TimeOut.name(), "TimeOut");
    }
}
