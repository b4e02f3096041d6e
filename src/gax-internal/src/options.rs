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

pub use edgecloud_auth::credentials::Credentials;

// The client configuration for [crate::http::ReqwestClient].
pub type ClientConfig = edgecloud_gax::client_builder::internal::ClientConfig<Credentials>;

pub(crate) const LOGGING_VAR: &str = "EDGECLOUD_RUST_LOGGING";

/// Information about the client library, used in the `User-Agent` header.
#[derive(Copy, Clone, Debug)]
pub struct ClientInfo {
    /// The name of the client library, e.g., `edgecloud-rust`.
    pub name: &'static str,
    /// The version of the client library.
    pub version: &'static str,
}

impl ClientInfo {
    /// The default `User-Agent` value: `<name>/<version>`.
    pub fn user_agent(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

// Returns true if the environment or client configuration enables tracing.
pub fn tracing_enabled(config: &ClientConfig) -> bool {
    if config.tracing {
        return true;
    }
    std::env::var(LOGGING_VAR)
        .map(|v| v == "true")
        .unwrap_or(false)
}
