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

//! Contains the EdgeCloud client and its builder.

use crate::availability_zones::AvailabilityZones;
use crate::flavors::Flavors;
use crate::floating_ips::FloatingIps;
use crate::tasks::Tasks;
use gax::client_builder::Error as BuilderError;
use gax::endpoint::{DefaultEndpointLocator, EndpointLocator, EndpointOpts, ServiceScope, add_service_scope};
use gax::error::Error;
use gax::options::RequestOptions;
use gax::response::Response;
use gaxi::http::ReqwestClient;
use gaxi::options::ClientInfo;
use http::Method;
use std::sync::Arc;

/// The endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.edgecloud.example/cloud/";

const INFO: ClientInfo = ClientInfo {
    name: "edgecloud-rust",
    version: env!("CARGO_PKG_VERSION"),
};

// The version prefix shared by all the resource paths.
const VERSION: &str = "v1";

/// The EdgeCloud client.
///
/// The client is cheap to clone, clones share the same connection pool.
/// Requests to most resources are scoped by a project and a region, which are
/// set once, when the client is built.
///
/// # Example
/// ```no_run
/// # tokio_test::block_on(async {
/// use edgecloud::client::Client;
/// use auth::credentials::api_key;
/// let client = Client::builder()
///     .with_credentials(api_key::Builder::new("my-api-key").build()?)
///     .with_project_id(42)
///     .with_region_id(7)
///     .build()
///     .await?;
/// let zones = client.availability_zones().get().await?;
/// # anyhow::Result::<()>::Ok(()) });
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    http: ReqwestClient,
    project_id: u64,
    region_id: u64,
    locator: Arc<dyn EndpointLocator>,
}

impl Client {
    /// Returns a builder for [Client].
    ///
    /// ```no_run
    /// # tokio_test::block_on(async {
    /// # use edgecloud::client::Client;
    /// let client = Client::builder().with_env().build().await?;
    /// # anyhow::Result::<()>::Ok(()) });
    /// ```
    pub fn builder() -> ClientBuilder {
        gax::client_builder::internal::new_builder(client_builder::Factory)
    }

    pub(crate) async fn new(config: gaxi::options::ClientConfig) -> gax::client_builder::Result<Self> {
        let config = config.resolve_env().map_err(BuilderError::config)?;
        let project_id = config.project_id;
        let region_id = config.region_id;
        let locator = config
            .locator
            .clone()
            .unwrap_or_else(|| Arc::new(DefaultEndpointLocator));
        let http = ReqwestClient::new(config, DEFAULT_ENDPOINT, INFO).await?;
        Ok(Self {
            http,
            project_id,
            region_id,
            locator,
        })
    }

    /// The project used to scope requests, zero if unset.
    pub fn project_id(&self) -> u64 {
        self.project_id
    }

    /// The region used to scope requests, zero if unset.
    pub fn region_id(&self) -> u64 {
        self.region_id
    }

    /// Verifies the client can make project and region scoped requests.
    pub fn validate(&self) -> gax::Result<()> {
        if self.project_id == 0 {
            return Err(Error::missing_input("project_id"));
        }
        self.validate_region()
    }

    /// Verifies the client can make region scoped requests.
    pub fn validate_region(&self) -> gax::Result<()> {
        if self.region_id == 0 {
            return Err(Error::missing_input("region_id"));
        }
        Ok(())
    }

    /// Resolves the URL of a service using the configured endpoint locator.
    ///
    /// The project and region default to the client's.
    pub fn service_url(&self, opts: &EndpointOpts) -> gax::Result<String> {
        let mut opts = opts.clone();
        if opts.project_id == 0 {
            opts.project_id = self.project_id;
        }
        if opts.region_id == 0 {
            opts.region_id = self.region_id;
        }
        self.locator.locate(self.http.endpoint(), &opts)
    }

    pub fn floating_ips(&self) -> FloatingIps<'_> {
        FloatingIps::new(self)
    }

    pub fn flavors(&self) -> Flavors<'_> {
        Flavors::new(self)
    }

    pub fn availability_zones(&self) -> AvailabilityZones<'_> {
        AvailabilityZones::new(self)
    }

    pub fn tasks(&self) -> Tasks<'_> {
        Tasks::new(self)
    }

    // Resolves `resource` through the endpoint locator and returns its URL
    // with the identifiers required by `scope`, after verifying they are set.
    // Trailing separators from empty segments are dropped.
    pub(crate) fn resource_path(&self, resource: &str, scope: ServiceScope) -> gax::Result<String> {
        let opts = EndpointOpts::new().set_version(VERSION).set_name(resource);
        let opts = match scope {
            ServiceScope::ProjectRegion => {
                self.validate()?;
                opts.set_project_id(self.project_id)
                    .set_region_id(self.region_id)
            }
            ServiceScope::RegionOnly => {
                self.validate_region()?;
                opts
            }
            ServiceScope::Client => opts,
        };
        let url = self.locator.locate(self.http.endpoint(), &opts)?;
        let url = url.trim_end_matches('/');
        // The locator has no layout for a region without a project.
        Ok(match scope {
            ServiceScope::RegionOnly => add_service_scope(url, scope, 0, self.region_id),
            _ => url.to_string(),
        })
    }

    pub(crate) async fn execute<B, O>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> gax::Result<Response<O>>
    where
        B: serde::Serialize + ?Sized,
        O: serde::de::DeserializeOwned + Default,
    {
        let request = self.http.new_request(method, path, body)?;
        self.http.execute(&request, options).await
    }
}

/// A builder for [Client].
///
/// ```no_run
/// # tokio_test::block_on(async {
/// # use edgecloud::client::{Client, ClientBuilder};
/// let builder: ClientBuilder = Client::builder();
/// let client = builder
///     .with_endpoint("https://api.edgecloud.example/cloud/")
///     .build()
///     .await?;
/// # anyhow::Result::<()>::Ok(()) });
/// ```
pub type ClientBuilder =
    gax::client_builder::ClientBuilder<client_builder::Factory, gaxi::options::Credentials>;

/// Configures the [ClientBuilder] with API key credentials.
pub trait WithApiKey: Sized {
    /// Authenticates every request with `api_key`.
    ///
    /// Fails if the key is empty or cannot be sent in a header.
    fn with_api_key<V: Into<String>>(self, api_key: V) -> gax::Result<Self>;
}

impl WithApiKey for ClientBuilder {
    fn with_api_key<V: Into<String>>(self, api_key: V) -> gax::Result<Self> {
        let cred = auth::credentials::api_key::Builder::new(api_key).build()?;
        Ok(self.with_credentials(cred))
    }
}

pub(crate) mod client_builder {
    use super::Client;
    #[derive(Debug)]
    pub struct Factory;
    impl gax::client_builder::internal::ClientFactory for Factory {
        type Client = Client;
        type Credentials = gaxi::options::Credentials;
        async fn build(
            self,
            config: gaxi::options::ClientConfig,
        ) -> gax::client_builder::Result<Self::Client> {
            Self::Client::new(config).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gax::error::ErrorKind;
    use gax::endpoint::CatalogEndpointLocator;
    use test_case::test_case;

    type TestResult = anyhow::Result<()>;

    async fn test_client(project_id: u64, region_id: u64) -> anyhow::Result<Client> {
        let client = Client::builder()
            .with_endpoint("https://api.example.com/cloud")
            .with_project_id(project_id)
            .with_region_id(region_id)
            .build()
            .await?;
        Ok(client)
    }

    #[tokio::test]
    async fn scoping() -> TestResult {
        let client = test_client(42, 7).await?;
        assert_eq!(client.project_id(), 42);
        assert_eq!(client.region_id(), 7);
        client.validate()?;
        client.validate_region()?;
        Ok(())
    }

    #[tokio::test]
    #[test_case(0, 7, "project_id")]
    #[test_case(42, 0, "region_id")]
    #[test_case(0, 0, "project_id")]
    async fn missing_scope(project_id: u64, region_id: u64, want: &str) -> TestResult {
        let client = test_client(project_id, region_id).await?;
        let err = client.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingInput);
        assert!(err.to_string().contains(want), "{err}");
        Ok(())
    }

    #[tokio::test]
    async fn region_only() -> TestResult {
        let client = test_client(0, 7).await?;
        client.validate_region()?;
        assert_eq!(
            client.resource_path("availability_zones", ServiceScope::RegionOnly)?,
            "https://api.example.com/cloud/v1/availability_zones/7"
        );
        Ok(())
    }

    #[tokio::test]
    #[test_case(ServiceScope::ProjectRegion, "https://api.example.com/cloud/v1/floatingips/42/7")]
    #[test_case(ServiceScope::RegionOnly, "https://api.example.com/cloud/v1/floatingips/7")]
    #[test_case(ServiceScope::Client, "https://api.example.com/cloud/v1/floatingips")]
    async fn resource_paths(scope: ServiceScope, want: &str) -> TestResult {
        let client = test_client(42, 7).await?;
        assert_eq!(client.resource_path("floatingips", scope)?, want);
        Ok(())
    }

    #[tokio::test]
    async fn resource_path_validates_scope() -> TestResult {
        let client = test_client(0, 7).await?;
        let err = client
            .resource_path("floatingips", ServiceScope::ProjectRegion)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingInput);
        assert_eq!(
            client.resource_path("tasks", ServiceScope::Client)?,
            "https://api.example.com/cloud/v1/tasks"
        );
        Ok(())
    }

    #[tokio::test]
    async fn default_locator() -> TestResult {
        let client = test_client(42, 7).await?;
        let opts = EndpointOpts::new()
            .set_name("dns")
            .set_version("v2")
            .set_service_type("zones");
        assert_eq!(
            client.service_url(&opts)?,
            "https://api.example.com/cloud/v2/dns/42/7/zones"
        );
        Ok(())
    }

    #[tokio::test]
    async fn catalog_locator() -> TestResult {
        let client = Client::builder()
            .with_endpoint("https://api.example.com/cloud")
            .with_endpoint_locator(
                CatalogEndpointLocator::new().with_service("dns", "https://dns.example.com/v2"),
            )
            .build()
            .await?;
        let got = client.service_url(&EndpointOpts::new().set_name("dns"))?;
        assert_eq!(got, "https://dns.example.com/v2//dns///");

        let err = client
            .service_url(&EndpointOpts::new().set_name("unknown"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServiceNotFound);
        Ok(())
    }

    #[tokio::test]
    async fn resource_path_uses_locator() -> TestResult {
        let client = Client::builder()
            .with_endpoint("https://api.example.com/cloud")
            .with_project_id(42)
            .with_region_id(7)
            .with_endpoint_locator(
                CatalogEndpointLocator::new()
                    .with_service("floatingips", "https://fip.example.com/")
                    .with_service("availability_zones", "https://az.example.com"),
            )
            .build()
            .await?;
        assert_eq!(
            client.resource_path("floatingips", ServiceScope::ProjectRegion)?,
            "https://fip.example.com/v1/floatingips/42/7"
        );
        assert_eq!(
            client.resource_path("availability_zones", ServiceScope::RegionOnly)?,
            "https://az.example.com/v1/availability_zones/7"
        );
        let err = client
            .resource_path("tasks", ServiceScope::Client)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServiceNotFound);
        Ok(())
    }

    #[tokio::test]
    async fn with_api_key() -> TestResult {
        let client = Client::builder()
            .with_api_key("my-api-key")?
            .with_endpoint("https://api.example.com/cloud")
            .build()
            .await?;
        assert_eq!(client.project_id(), 0);

        let err = Client::builder().with_api_key("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authentication);
        Ok(())
    }
}
