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

//! EdgeCloud client library for Rust.
//!
//! The [Client][client::Client] holds the configuration shared by all the
//! resources: the endpoint, the credentials, and the project and region used
//! to scope most requests. Each resource is reached through a small facade
//! that borrows the client.
//!
//! # Example
//! ```no_run
//! # tokio_test::block_on(async {
//! use edgecloud::client::{Client, WithApiKey};
//! let client = Client::builder()
//!     .with_api_key("my-api-key")?
//!     .with_project_id(42)
//!     .with_region_id(7)
//!     .build()
//!     .await?;
//! for ip in client.floating_ips().list().await?.into_body() {
//!     println!("{ip:?}");
//! }
//! # anyhow::Result::<()>::Ok(()) });
//! ```

pub mod availability_zones;
pub mod client;
pub mod flavors;
pub mod floating_ips;
pub mod lookup;
pub mod model;
pub mod tasks;

pub use gax::Result;
pub use gax::error::Error;
pub use gax::response::Response;
