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

//! Endpoint location and path scoping.
//!
//! An [EndpointLocator] turns a service identity into a URL. The
//! [DefaultEndpointLocator] renders `base/version/name/project/region/type`,
//! where zero identifiers render as empty segments. Consecutive separators
//! produced by empty segments are preserved.
//!
//! The scope helpers append the project and region identifiers to a resource
//! path, as required by most resources.

use crate::Result;
use crate::error::Error;
use std::collections::HashMap;

/// Identifies a service and the scope used to reach it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct EndpointOpts {
    /// The service type, rendered as the last segment.
    pub service_type: String,
    /// The service name.
    pub name: String,
    /// The API version, for example `v1`.
    pub version: String,
    /// The project id, zero means unset.
    pub project_id: u64,
    /// The region id, zero means unset.
    pub region_id: u64,
}

impl EndpointOpts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_service_type<V: Into<String>>(mut self, v: V) -> Self {
        self.service_type = v.into();
        self
    }

    pub fn set_name<V: Into<String>>(mut self, v: V) -> Self {
        self.name = v.into();
        self
    }

    pub fn set_version<V: Into<String>>(mut self, v: V) -> Self {
        self.version = v.into();
        self
    }

    pub fn set_project_id(mut self, v: u64) -> Self {
        self.project_id = v;
        self
    }

    pub fn set_region_id(mut self, v: u64) -> Self {
        self.region_id = v;
        self
    }
}

/// Produces the URL for a service.
///
/// Applications may provide their own implementation, for example to route
/// some services through a proxy.
pub trait EndpointLocator: std::fmt::Debug + Send + Sync {
    /// Returns the URL for the service described by `opts`, rooted at `base`.
    fn locate(&self, base: &str, opts: &EndpointOpts) -> Result<String>;
}

/// Renders `base/version/name/project/region/type`.
///
/// # Example
/// ```
/// # use edgecloud_gax::endpoint::*;
/// let opts = EndpointOpts::new()
///     .set_version("v1")
///     .set_name("floatingips")
///     .set_project_id(42);
/// let url = DefaultEndpointLocator.locate("https://api.example.com/cloud/", &opts)?;
/// assert_eq!(url, "https://api.example.com/cloud/v1/floatingips/42//");
/// # edgecloud_gax::Result::<()>::Ok(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultEndpointLocator;

impl EndpointLocator for DefaultEndpointLocator {
    fn locate(&self, base: &str, opts: &EndpointOpts) -> Result<String> {
        Ok(render(base, opts))
    }
}

/// Resolves services through a catalog of per-service base URLs.
///
/// Services missing from the catalog fail with
/// [ServiceNotFound][crate::error::ErrorKind::ServiceNotFound], services
/// registered with an empty base fail with
/// [EndpointNotFound][crate::error::ErrorKind::EndpointNotFound].
#[derive(Clone, Debug, Default)]
pub struct CatalogEndpointLocator {
    services: HashMap<String, String>,
}

impl CatalogEndpointLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the base URL for a service name.
    pub fn with_service<N: Into<String>, B: Into<String>>(mut self, name: N, base: B) -> Self {
        self.services.insert(name.into(), base.into());
        self
    }
}

impl EndpointLocator for CatalogEndpointLocator {
    fn locate(&self, _base: &str, opts: &EndpointOpts) -> Result<String> {
        let base = self
            .services
            .get(&opts.name)
            .ok_or_else(|| Error::service_not_found(&opts.name))?;
        if base.is_empty() {
            return Err(Error::endpoint_not_found());
        }
        Ok(render(base, opts))
    }
}

fn render(base: &str, opts: &EndpointOpts) -> String {
    [
        base.trim_end_matches('/').to_string(),
        opts.version.clone(),
        opts.name.clone(),
        id_segment(opts.project_id),
        id_segment(opts.region_id),
        opts.service_type.clone(),
    ]
    .join("/")
}

fn id_segment(id: u64) -> String {
    match id {
        0 => String::new(),
        n => n.to_string(),
    }
}

/// Which identifiers a resource path carries after its leaf segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceScope {
    /// `/<project>/<region>`
    ProjectRegion,
    /// `/<region>`
    RegionOnly,
    /// No scoping.
    Client,
}

/// Appends `/<project>/<region>` to a resource path.
///
/// The caller validates that both identifiers are non-zero.
///
/// # Example
/// ```
/// # use edgecloud_gax::endpoint::add_project_region;
/// assert_eq!(add_project_region("/v1/instances", 42, 7), "/v1/instances/42/7");
/// ```
pub fn add_project_region(path: &str, project_id: u64, region_id: u64) -> String {
    format!("{}/{project_id}/{region_id}", path.trim_end_matches('/'))
}

/// Appends the identifiers required by `scope` to a resource path.
pub fn add_service_scope(path: &str, scope: ServiceScope, project_id: u64, region_id: u64) -> String {
    match scope {
        ServiceScope::ProjectRegion => add_project_region(path, project_id, region_id),
        ServiceScope::RegionOnly => format!("{}/{region_id}", path.trim_end_matches('/')),
        ServiceScope::Client => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use test_case::test_case;

    fn opts(project_id: u64, region_id: u64, service_type: &str) -> EndpointOpts {
        EndpointOpts::new()
            .set_version("v1")
            .set_name("loadbalancers")
            .set_project_id(project_id)
            .set_region_id(region_id)
            .set_service_type(service_type)
    }

    #[test_case("https://api.example.com", 42, 7, "", "https://api.example.com/v1/loadbalancers/42/7/")]
    #[test_case("https://api.example.com/", 42, 7, "", "https://api.example.com/v1/loadbalancers/42/7/")]
    #[test_case("https://api.example.com///", 42, 7, "pools", "https://api.example.com/v1/loadbalancers/42/7/pools")]
    #[test_case("https://api.example.com", 0, 7, "", "https://api.example.com/v1/loadbalancers//7/")]
    #[test_case("https://api.example.com", 0, 0, "", "https://api.example.com/v1/loadbalancers///")]
    #[test_case("", 42, 7, "pools", "/v1/loadbalancers/42/7/pools")]
    fn default_locator(base: &str, project_id: u64, region_id: u64, service_type: &str, want: &str) {
        let got = DefaultEndpointLocator
            .locate(base, &opts(project_id, region_id, service_type))
            .unwrap();
        assert_eq!(got, want);
    }

    #[test]
    fn default_locator_string_components_verbatim() {
        let o = EndpointOpts::new()
            .set_version("v2")
            .set_name("k8s/clusters")
            .set_region_id(7);
        let got = DefaultEndpointLocator.locate("https://h/", &o).unwrap();
        assert_eq!(got, "https://h/v2/k8s/clusters//7/");
    }

    #[test]
    fn catalog_locator() {
        let locator = CatalogEndpointLocator::new()
            .with_service("loadbalancers", "https://lb.example.com/")
            .with_service("dns", "");

        let got = locator.locate("ignored", &opts(42, 7, "")).unwrap();
        assert_eq!(got, "https://lb.example.com/v1/loadbalancers/42/7/");

        let err = locator
            .locate("ignored", &EndpointOpts::new().set_name("storage"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServiceNotFound);
        assert!(err.to_string().contains("storage"), "{err}");

        let err = locator
            .locate("ignored", &EndpointOpts::new().set_name("dns"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EndpointNotFound);
    }

    #[test_case("/v1/floatingips", ServiceScope::ProjectRegion, "/v1/floatingips/42/7")]
    #[test_case("/v1/floatingips/", ServiceScope::ProjectRegion, "/v1/floatingips/42/7")]
    #[test_case("/v1/availability_zones", ServiceScope::RegionOnly, "/v1/availability_zones/7")]
    #[test_case("/v1/regions", ServiceScope::Client, "/v1/regions")]
    fn service_scope(path: &str, scope: ServiceScope, want: &str) {
        assert_eq!(add_service_scope(path, scope, 42, 7), want);
    }
}
