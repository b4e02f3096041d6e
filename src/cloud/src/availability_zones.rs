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

//! Availability zones.

use crate::client::Client;
use crate::model::AvailabilityZones as Zones;
use gax::endpoint::ServiceScope;
use gax::options::RequestOptions;
use gax::response::Response;
use http::Method;

/// Describes the availability zones of the client's region.
///
/// Only the region needs to be configured.
#[derive(Clone, Copy, Debug)]
pub struct AvailabilityZones<'a> {
    client: &'a Client,
}

impl<'a> AvailabilityZones<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> gax::Result<Response<Zones>> {
        let path = self
            .client
            .resource_path("availability_zones", ServiceScope::RegionOnly)?;
        self.client
            .execute::<(), _>(Method::GET, &path, None, &RequestOptions::new())
            .await
    }
}
