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

//! Floating IP addresses.

use crate::client::Client;
use crate::lookup::{ListResponse, find_one};
use crate::model::{CreateFloatingIpRequest, FloatingIp, TaskResults};
use gax::endpoint::ServiceScope;
use gax::error::ErrorOverrides;
use gax::options::RequestOptions;
use gax::path_parameter;
use gax::response::Response;
use http::Method;

const RESOURCE: &str = "floatingips";

/// Manages the floating IPs in the client's project and region.
///
/// # Example
/// ```no_run
/// # use edgecloud::client::Client;
/// # use edgecloud::model::CreateFloatingIpRequest;
/// async fn sample(client: &Client) -> anyhow::Result<()> {
///     let tasks = client
///         .floating_ips()
///         .create(&CreateFloatingIpRequest::new())
///         .await?
///         .into_body();
///     println!("created by tasks {:?}", tasks.tasks);
///     Ok(())
/// }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FloatingIps<'a> {
    client: &'a Client,
}

impl<'a> FloatingIps<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> gax::Result<Response<Vec<FloatingIp>>> {
        let path = self.client.resource_path(RESOURCE, ServiceScope::ProjectRegion)?;
        let response = self
            .client
            .execute::<(), ListResponse<FloatingIp>>(Method::GET, &path, None, &RequestOptions::new())
            .await?;
        Ok(response.map(|l| l.results))
    }

    pub async fn get(&self, id: &str) -> gax::Result<Response<FloatingIp>> {
        let path = self.item_path(id)?;
        self.client
            .execute::<(), _>(Method::GET, &path, None, &RequestOptions::new())
            .await
    }

    /// Allocates a new floating IP.
    ///
    /// The address is allocated asynchronously, the response contains the
    /// tasks doing the work. A `409 Conflict` means the address is already
    /// allocated.
    pub async fn create(&self, request: &CreateFloatingIpRequest) -> gax::Result<Response<TaskResults>> {
        let path = self.client.resource_path(RESOURCE, ServiceScope::ProjectRegion)?;
        let mut options = RequestOptions::new();
        options.set_error_overrides(
            ErrorOverrides::new().on_status(409, |e| e.with_info("floating IP already exists")),
        );
        self.client
            .execute(Method::POST, &path, Some(request), &options)
            .await
    }

    pub async fn delete(&self, id: &str) -> gax::Result<Response<TaskResults>> {
        let path = self.item_path(id)?;
        self.client
            .execute::<(), _>(Method::DELETE, &path, None, &RequestOptions::new())
            .await
    }

    /// Finds the floating IP with the given address.
    pub async fn find_by_address(&self, address: &str) -> gax::Result<FloatingIp> {
        if address.is_empty() {
            return Err(path_parameter::missing("address"));
        }
        let matches = self
            .list()
            .await?
            .into_body()
            .into_iter()
            .filter(|ip| ip.floating_ip_address.as_deref() == Some(address))
            .collect();
        find_one("floating IP", address, matches)
    }

    fn item_path(&self, id: &str) -> gax::Result<String> {
        let id = path_parameter::uuid("id", id)?;
        let path = self.client.resource_path(RESOURCE, ServiceScope::ProjectRegion)?;
        Ok(format!("{path}/{id}"))
    }
}
