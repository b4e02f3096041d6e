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

//! Virtual machine flavors.

use crate::client::Client;
use crate::lookup::ListResponse;
use crate::model::{Flavor, FlavorListOptions};
use gax::endpoint::ServiceScope;
use gax::options::RequestOptions;
use gax::response::Response;
use http::Method;

/// Lists the flavors available in the client's project and region.
#[derive(Clone, Copy, Debug)]
pub struct Flavors<'a> {
    client: &'a Client,
}

impl<'a> Flavors<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Returns one page of flavors.
    ///
    /// # Example
    /// ```no_run
    /// # use edgecloud::client::Client;
    /// # use edgecloud::model::FlavorListOptions;
    /// async fn sample(client: &Client) -> gax::Result<()> {
    ///     let options = FlavorListOptions::new().set_include_prices(true);
    ///     for flavor in client.flavors().list(&options).await?.into_body() {
    ///         println!("{} costs {:?}", flavor.flavor_name, flavor.price_per_hour);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn list(&self, options: &FlavorListOptions) -> gax::Result<Response<Vec<Flavor>>> {
        let path = self.client.resource_path("flavors", ServiceScope::ProjectRegion)?;
        let mut request_options = RequestOptions::new();
        request_options.set_query(options);
        let response = self
            .client
            .execute::<(), ListResponse<Flavor>>(Method::GET, &path, None, &request_options)
            .await?;
        Ok(response.map(|l| l.results))
    }
}
