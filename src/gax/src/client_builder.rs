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

//! Client construction.
//!
//! Clients are configured through a [ClientBuilder]: the endpoint, the
//! credentials, the project and region scope, extra default headers, and an
//! optional hook observing every response. Each client type exposes a
//! `builder()` function returning the builder with the right factory.
//!
//! With [with_env()][ClientBuilder::with_env] any setting left unset is read
//! from the `EDGECLOUD_*` environment variables when the client is built.
//!
//! ## Example: the default configuration
//!
//! ```
//! # use edgecloud_gax::client_builder::examples;
//! # use edgecloud_gax::client_builder::Result;
//! # tokio_test::block_on(async {
//! pub use examples::Client; // Placeholder for examples
//! let client = Client::builder().build().await?;
//! # Result::<()>::Ok(()) });
//! ```
//!
//! ## Example: create a client scoped to a project and region
//!
//! ```
//! # use edgecloud_gax::client_builder::examples;
//! # use edgecloud_gax::client_builder::Result;
//! # tokio_test::block_on(async {
//! pub use examples::Client; // Placeholder for examples
//! let client = Client::builder()
//!     .with_endpoint("https://private.example.com/cloud/")
//!     .with_project_id(42)
//!     .with_region_id(7)
//!     .build().await?;
//! # Result::<()>::Ok(()) });
//! ```

use bytes::Bytes;
use crate::endpoint::EndpointLocator;
use crate::response::Parts;
use std::sync::Arc;

/// The result type for this module.
pub type Result<T> = std::result::Result<T, Error>;

/// Indicates a problem while constructing a client.
///
/// # Examples
/// ```no_run
/// # use edgecloud_gax::client_builder::examples;
/// # use edgecloud_gax::client_builder::Error;
/// # tokio_test::block_on(async {
/// use examples::Client; // Placeholder for examples
/// let client = match Client::builder().build().await {
///     Ok(c) => c,
///     Err(e) if e.is_credentials() => {
///         println!("error loading the credentials: {e}");
///         return;
///     }
///     Err(e) => {
///         println!("unexpected error: {e}");
///         return;
///     }
/// };
/// # });
/// ```
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    /// If true, the client could not load the credentials.
    pub fn is_credentials(&self) -> bool {
        matches!(&self.0, ErrorKind::Credentials(_))
    }

    /// If true, the client could not initialize the transport client.
    pub fn is_transport(&self) -> bool {
        matches!(&self.0, ErrorKind::Transport(_))
    }

    /// If true, the configuration (including the environment) is invalid.
    pub fn is_config(&self) -> bool {
        matches!(&self.0, ErrorKind::Config(_))
    }

    /// Returns the underlying error as a specific type, if possible.
    pub fn as_inner<T: std::error::Error + 'static>(&self) -> Option<&T> {
        match &self.0 {
            ErrorKind::Credentials(e) | ErrorKind::Transport(e) | ErrorKind::Config(e) => {
                e.downcast_ref::<T>()
            }
        }
    }

    /// Cannot create the credentials.
    pub fn cred<T: Into<BoxError>>(source: T) -> Self {
        Self(ErrorKind::Credentials(source.into()))
    }

    /// Cannot create the transport client.
    pub fn transport<T: Into<BoxError>>(source: T) -> Self {
        Self(ErrorKind::Transport(source.into()))
    }

    /// The configuration is invalid.
    pub fn config<T: Into<BoxError>>(source: T) -> Self {
        Self(ErrorKind::Config(source.into()))
    }
}

#[derive(thiserror::Error, Debug)]
enum ErrorKind {
    #[error("could not create the credentials")]
    Credentials(#[source] BoxError),
    #[error("could not initialize transport client")]
    Transport(#[source] BoxError),
    #[error("invalid client configuration")]
    Config(#[source] BoxError),
}

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Observes every HTTP exchange, including error responses.
///
/// The hook receives the request as sent, with the query string and the
/// authentication headers, and the metadata of the raw response.
pub type AfterRequestHook = Arc<dyn Fn(&http::Request<Bytes>, &Parts) + Send + Sync>;

/// The environment variable holding the API endpoint.
pub const API_URL_VAR: &str = "EDGECLOUD_API_URL";
/// The environment variable holding the project id.
pub const PROJECT_ID_VAR: &str = "EDGECLOUD_PROJECT_ID";
/// The environment variable holding the region id.
pub const REGION_ID_VAR: &str = "EDGECLOUD_REGION_ID";

/// A generic builder for clients.
///
/// Each client library defines a type alias for this builder, with the
/// factory and credentials types filled in.
#[derive(Clone, Debug)]
pub struct ClientBuilder<F, Cr> {
    config: internal::ClientConfig<Cr>,
    factory: F,
}

impl<F, Cr> ClientBuilder<F, Cr> {
    /// Creates a new client.
    pub async fn build<C>(self) -> Result<C>
    where
        F: internal::ClientFactory<Client = C, Credentials = Cr>,
    {
        self.factory.build(self.config).await
    }

    /// Sets the endpoint.
    ///
    /// The endpoint is the base URL for all requests. A trailing separator is
    /// added if missing.
    pub fn with_endpoint<V: Into<String>>(mut self, v: V) -> Self {
        self.config.endpoint = Some(v.into());
        self
    }

    /// Enables tracing.
    ///
    /// The client opens a `http_request` span for each request, see the
    /// [tracing] crate for details on how to collect them.
    ///
    /// [tracing]: https://docs.rs/tracing
    pub fn with_tracing(mut self) -> Self {
        self.config.tracing = true;
        self
    }

    /// Configure the authentication credentials.
    pub fn with_credentials<T: Into<Cr>>(mut self, v: T) -> Self {
        self.config.cred = Some(v.into());
        self
    }

    /// Replaces the default `User-Agent` header value.
    pub fn with_user_agent<V: Into<String>>(mut self, v: V) -> Self {
        self.config.user_agent = Some(v.into());
        self
    }

    /// Adds a header sent with every request.
    ///
    /// `Accept` and `User-Agent` are always set by the client and take
    /// priority over default headers with the same name.
    pub fn with_default_header<K: Into<String>, V: Into<String>>(mut self, k: K, v: V) -> Self {
        self.config.default_headers.push((k.into(), v.into()));
        self
    }

    /// Sets the project id used to scope requests.
    pub fn with_project_id(mut self, v: u64) -> Self {
        self.config.project_id = v;
        self
    }

    /// Sets the region id used to scope requests.
    pub fn with_region_id(mut self, v: u64) -> Self {
        self.config.region_id = v;
        self
    }

    /// Replaces the endpoint locator.
    pub fn with_endpoint_locator<L: EndpointLocator + 'static>(mut self, v: L) -> Self {
        self.config.locator = Some(Arc::new(v));
        self
    }

    /// Installs a hook called with every request and the metadata of its
    /// response.
    pub fn with_after_request<H>(mut self, v: H) -> Self
    where
        H: Fn(&http::Request<Bytes>, &Parts) + Send + Sync + 'static,
    {
        self.config.after_request = Some(Arc::new(v));
        self
    }

    /// Reads the endpoint, project id, and region id from the environment.
    ///
    /// Uses `EDGECLOUD_API_URL`, `EDGECLOUD_PROJECT_ID`, and
    /// `EDGECLOUD_REGION_ID`. Unset variables leave the configuration
    /// unchanged. Values set explicitly on the builder take priority.
    pub fn with_env(mut self) -> Self {
        self.config.env = true;
        self
    }
}

#[doc(hidden)]
pub mod internal {
    use super::*;
    use crate::error::Error as GaxError;

    /// Creates clients from a configuration.
    pub trait ClientFactory {
        type Client;
        type Credentials;
        fn build(
            self,
            config: internal::ClientConfig<Self::Credentials>,
        ) -> impl Future<Output = Result<Self::Client>>;
    }

    pub fn new_builder<F, Cr, C>(factory: F) -> super::ClientBuilder<F, Cr>
    where
        F: ClientFactory<Client = C, Credentials = Cr>,
    {
        super::ClientBuilder {
            factory,
            config: ClientConfig::default(),
        }
    }

    /// Configure a client.
    ///
    /// A common client configuration for all the client libraries.
    #[derive(Clone)]
    pub struct ClientConfig<Cr> {
        pub endpoint: Option<String>,
        pub cred: Option<Cr>,
        pub tracing: bool,
        pub user_agent: Option<String>,
        pub default_headers: Vec<(String, String)>,
        pub project_id: u64,
        pub region_id: u64,
        pub locator: Option<Arc<dyn EndpointLocator>>,
        pub after_request: Option<AfterRequestHook>,
        pub env: bool,
    }

    impl<Cr> ClientConfig<Cr> {
        /// Fills unset fields from the environment, if requested.
        pub fn resolve_env(mut self) -> crate::Result<Self> {
            if !self.env {
                return Ok(self);
            }
            if self.endpoint.is_none() {
                self.endpoint = std::env::var(API_URL_VAR).ok().filter(|v| !v.is_empty());
            }
            if self.project_id == 0 {
                self.project_id = id_from_env(PROJECT_ID_VAR)?;
            }
            if self.region_id == 0 {
                self.region_id = id_from_env(REGION_ID_VAR)?;
            }
            Ok(self)
        }
    }

    fn id_from_env(name: &str) -> crate::Result<u64> {
        match std::env::var(name) {
            Err(_) => Ok(0),
            Ok(v) if v.is_empty() => Ok(0),
            Ok(v) => v.parse::<u64>().map_err(|_| GaxError::invalid_input(name, v)),
        }
    }

    impl<Cr> std::default::Default for ClientConfig<Cr> {
        fn default() -> Self {
            Self {
                endpoint: None,
                cred: None,
                tracing: false,
                user_agent: None,
                default_headers: Vec::new(),
                project_id: 0,
                region_id: 0,
                locator: None,
                after_request: None,
                env: false,
            }
        }
    }

    impl<Cr: std::fmt::Debug> std::fmt::Debug for ClientConfig<Cr> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("ClientConfig")
                .field("endpoint", &self.endpoint)
                .field("cred", &self.cred)
                .field("tracing", &self.tracing)
                .field("user_agent", &self.user_agent)
                .field("default_headers", &self.default_headers)
                .field("project_id", &self.project_id)
                .field("region_id", &self.region_id)
                .field("locator", &self.locator)
                .field("after_request", &self.after_request.as_ref().map(|_| "..."))
                .field("env", &self.env)
                .finish()
        }
    }
}

#[doc(hidden)]
pub mod examples {
    //! This module contains helper types used in the rustdoc examples.
    //!
    //! The examples require relatively complex types to be useful.

    type Config = super::internal::ClientConfig<Credentials>;
    use super::Result;

    /// A client type for use in examples.
    ///
    /// This type is inaccessible to users of this crate. It is used in the
    /// examples and tests.
    #[allow(dead_code)]
    pub struct Client(pub Config);
    impl Client {
        pub fn builder() -> client::Builder {
            super::internal::new_builder(client::Factory)
        }

        async fn new(config: Config) -> Result<Self> {
            let config = config.resolve_env().map_err(super::Error::config)?;
            Ok(Self(config))
        }
    }

    mod client {
        pub type Builder = super::super::ClientBuilder<Factory, super::Credentials>;
        pub struct Factory;
        impl super::super::internal::ClientFactory for Factory {
            type Credentials = super::Credentials;
            type Client = super::Client;
            async fn build(
                self,
                config: crate::client_builder::internal::ClientConfig<Self::Credentials>,
            ) -> super::Result<Self::Client> {
                Self::Client::new(config).await
            }
        }
    }

    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct Credentials {
        pub api_key: String,
    }
}
