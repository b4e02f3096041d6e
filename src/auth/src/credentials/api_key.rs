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

//! API key credentials.
//!
//! The EdgeCloud API accepts API keys as `Authorization: APIKey <key>`. Keys
//! do not expire and cannot be refreshed, a rejected key is a permanent
//! failure.

use crate::Result;
use crate::credentials::dynamic::CredentialsProvider;
use crate::credentials::Credentials;
use crate::headers_util::authorization_headers;
use edgecloud_gax::error::Error;
use http::HeaderMap;

/// The environment variable holding the API key.
pub const API_KEY_VAR: &str = "EDGECLOUD_API_KEY";

const SCHEME: &str = "APIKey";

struct ApiKeyCredentials {
    headers: HeaderMap,
}

impl std::fmt::Debug for ApiKeyCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyCredentials")
            .field("api_key", &"[censored]")
            .finish()
    }
}

#[async_trait::async_trait]
impl CredentialsProvider for ApiKeyCredentials {
    async fn headers(&self) -> Result<HeaderMap> {
        Ok(self.headers.clone())
    }
}

/// A builder for credentials that authenticate using an API key.
pub struct Builder {
    api_key: String,
}

impl std::fmt::Debug for Builder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder")
            .field("api_key", &"[censored]")
            .finish()
    }
}

impl Builder {
    /// Creates a new builder with the given API key.
    ///
    /// # Example
    /// ```
    /// # use edgecloud_auth::credentials::api_key::Builder;
    /// let credentials = Builder::new("my-api-key").build();
    /// assert!(credentials.is_ok());
    /// ```
    pub fn new<T: Into<String>>(api_key: T) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Creates a new builder using the `EDGECLOUD_API_KEY` environment
    /// variable.
    ///
    /// Fails with a [MissingEnvVar][edgecloud_gax::error::ErrorKind::MissingEnvVar]
    /// error if the variable is not set.
    pub fn from_env() -> edgecloud_gax::Result<Self> {
        let api_key = std::env::var(API_KEY_VAR).map_err(|_| Error::missing_env_var(API_KEY_VAR))?;
        Ok(Self::new(api_key))
    }

    /// Returns a [Credentials] instance with the configured settings.
    ///
    /// Fails with an [Authentication][edgecloud_gax::error::ErrorKind::Authentication]
    /// error if the key is empty or contains characters that cannot appear in
    /// an HTTP header.
    pub fn build(self) -> edgecloud_gax::Result<Credentials> {
        let headers =
            authorization_headers("API key", SCHEME, &self.api_key).map_err(Error::authentication)?;
        Ok(Credentials::from(ApiKeyCredentials { headers }))
    }
}
