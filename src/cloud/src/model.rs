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

//! The resources and request messages exchanged with the service.

use gax::query_parameter::{QueryPairs, QueryParameters};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A floating IP address.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct FloatingIp {
    pub id: String,
    pub floating_ip_address: Option<String>,
    pub fixed_ip_address: Option<String>,
    pub port_id: Option<String>,
    pub router_id: Option<String>,
    pub status: String,
    pub project_id: u64,
    pub region_id: u64,
    pub region: String,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub metadata: BTreeMap<String, String>,
}

impl FloatingIp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_id<T: Into<String>>(mut self, v: T) -> Self {
        self.id = v.into();
        self
    }

    pub fn set_floating_ip_address<T: Into<String>>(mut self, v: T) -> Self {
        self.floating_ip_address = Some(v.into());
        self
    }

    pub fn set_status<T: Into<String>>(mut self, v: T) -> Self {
        self.status = v.into();
        self
    }
}

/// The request message for [FloatingIps::create][crate::floating_ips::FloatingIps::create].
///
/// Unset fields are omitted from the request body.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[non_exhaustive]
pub struct CreateFloatingIpRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_ip_address: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl CreateFloatingIpRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the new address to a port.
    pub fn set_port_id<T: Into<String>>(mut self, v: T) -> Self {
        self.port_id = Some(v.into());
        self
    }

    pub fn set_fixed_ip_address<T: Into<String>>(mut self, v: T) -> Self {
        self.fixed_ip_address = Some(v.into());
        self
    }

    pub fn set_metadata<T, K, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.metadata = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }
}

/// A virtual machine flavor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Flavor {
    pub flavor_id: String,
    pub flavor_name: String,
    pub vcpus: u32,
    /// The memory size, in MiB.
    pub ram: u64,
    pub disabled: bool,
    pub os_type: Option<String>,
    pub price_per_hour: Option<f64>,
    pub price_per_month: Option<f64>,
    pub currency_code: Option<String>,
    pub price_status: Option<String>,
}

impl Flavor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_flavor_id<T: Into<String>>(mut self, v: T) -> Self {
        self.flavor_id = v.into();
        self
    }

    pub fn set_flavor_name<T: Into<String>>(mut self, v: T) -> Self {
        self.flavor_name = v.into();
        self
    }
}

/// The query parameters for [Flavors::list][crate::flavors::Flavors::list].
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct FlavorListOptions {
    /// Include the prices of each flavor.
    pub include_prices: bool,
    /// Exclude the flavors that cannot run Windows.
    pub exclude_windows: bool,
    /// Include disabled flavors.
    pub disabled: bool,
}

impl FlavorListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_include_prices(mut self, v: bool) -> Self {
        self.include_prices = v;
        self
    }

    pub fn set_exclude_windows(mut self, v: bool) -> Self {
        self.exclude_windows = v;
        self
    }

    pub fn set_disabled(mut self, v: bool) -> Self {
        self.disabled = v;
        self
    }
}

impl QueryParameters for FlavorListOptions {
    fn query_pairs(&self) -> Vec<(String, String)> {
        QueryPairs::new()
            .add("include_prices", &self.include_prices)
            .add("exclude_windows", &self.exclude_windows)
            .add("disabled", &self.disabled)
            .build()
    }
}

/// The availability zones of a region.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct AvailabilityZones {
    pub region_id: u64,
    pub region_name: String,
    pub availability_zones: Vec<String>,
}

/// The task identifiers returned by mutating requests.
///
/// These requests complete asynchronously, use
/// [Tasks::wait][crate::tasks::Tasks::wait] to wait for the work to finish.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct TaskResults {
    pub tasks: Vec<String>,
}

/// The well-known values of [Task::state].
pub mod task_state {
    pub const NEW: &str = "NEW";
    pub const RUNNING: &str = "RUNNING";
    pub const FINISHED: &str = "FINISHED";
    pub const ERROR: &str = "ERROR";
}

/// A unit of asynchronous work in the service.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Task {
    pub id: String,
    /// One of the [task_state] values.
    pub state: String,
    pub task_type: String,
    pub project_id: u64,
    pub region_id: u64,
    pub created_on: Option<String>,
    pub finished_on: Option<String>,
    /// The error message, for tasks in the [ERROR][task_state::ERROR] state.
    pub error: Option<String>,
    /// The resources created by the task, grouped by resource type.
    pub created_resources: BTreeMap<String, Vec<String>>,
}

impl Task {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_id<T: Into<String>>(mut self, v: T) -> Self {
        self.id = v.into();
        self
    }

    pub fn set_state<T: Into<String>>(mut self, v: T) -> Self {
        self.state = v.into();
        self
    }

    /// Returns true if the task will not change state again.
    pub fn is_final(&self) -> bool {
        self.state == task_state::FINISHED || self.state == task_state::ERROR
    }
}

/// The query parameters for [Tasks::list][crate::tasks::Tasks::list].
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct TaskListOptions {
    /// Only return tasks in one of these [task_state] values.
    pub state: Vec<String>,
    pub project_id: u64,
    /// The maximum number of tasks returned.
    pub limit: u64,
}

impl TaskListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_state<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.state = v.into_iter().map(Into::into).collect();
        self
    }

    pub fn set_project_id(mut self, v: u64) -> Self {
        self.project_id = v;
        self
    }

    pub fn set_limit(mut self, v: u64) -> Self {
        self.limit = v;
        self
    }
}

impl QueryParameters for TaskListOptions {
    fn query_pairs(&self) -> Vec<(String, String)> {
        QueryPairs::new()
            .add("state", &self.state)
            .add("project_id", &self.project_id)
            .add("limit", &self.limit)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn pairs(v: &[(&str, &str)]) -> Vec<(String, String)> {
        v.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn create_request_omits_unset_fields() -> anyhow::Result<()> {
        let got = serde_json::to_value(CreateFloatingIpRequest::new())?;
        assert_eq!(got, json!({}));

        let request = CreateFloatingIpRequest::new()
            .set_port_id("p-123")
            .set_metadata([("env", "test")]);
        let got = serde_json::to_value(request)?;
        assert_eq!(got, json!({"port_id": "p-123", "metadata": {"env": "test"}}));
        Ok(())
    }

    #[test]
    fn flavor_query() {
        assert!(FlavorListOptions::new().query_pairs().is_empty());
        let options = FlavorListOptions::new()
            .set_include_prices(true)
            .set_disabled(true);
        assert_eq!(
            options.query_pairs(),
            pairs(&[("include_prices", "true"), ("disabled", "true")])
        );
    }

    #[test]
    fn task_query() {
        assert!(TaskListOptions::new().query_pairs().is_empty());
        let options = TaskListOptions::new()
            .set_state([task_state::NEW, task_state::RUNNING])
            .set_limit(10);
        assert_eq!(
            options.query_pairs(),
            pairs(&[("state", "NEW,RUNNING"), ("limit", "10")])
        );
    }

    #[test]
    fn task_is_final() {
        assert!(!Task::new().set_state(task_state::NEW).is_final());
        assert!(!Task::new().set_state(task_state::RUNNING).is_final());
        assert!(Task::new().set_state(task_state::FINISHED).is_final());
        assert!(Task::new().set_state(task_state::ERROR).is_final());
    }

    #[test]
    fn task_from_json() -> anyhow::Result<()> {
        let got = serde_json::from_value::<Task>(json!({
            "id": "t1",
            "state": "FINISHED",
            "created_resources": {"floatingips": ["f1"]},
            "unknown_field": 123,
        }))?;
        assert_eq!(got.id, "t1");
        assert!(got.is_final());
        assert_eq!(
            got.created_resources.get("floatingips"),
            Some(&vec!["f1".to_string()])
        );
        Ok(())
    }
}
