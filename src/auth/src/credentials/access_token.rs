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

//! Access token credentials.
//!
//! Access tokens are sent as `Authorization: Bearer <token>`. Tokens expire,
//! and the service rejects expired tokens with `401 Unauthorized`. If the
//! credentials are built with a [TokenRefresher], the client obtains a new
//! token and replays the request once.
//!
//! # Example
//! ```
//! # use edgecloud_auth::credentials::access_token::{Builder, TokenRefresher};
//! # use edgecloud_auth::errors::CredentialsError;
//! #[derive(Debug)]
//! struct Login;
//!
//! #[async_trait::async_trait]
//! impl TokenRefresher for Login {
//!     async fn refresh(&self) -> Result<String, CredentialsError> {
//!         // exchange a refresh token for a new access token ...
//!         Ok("new-access-token".to_string())
//!     }
//! }
//!
//! let credentials = Builder::new("access-token").with_refresher(Login).build()?;
//! assert!(credentials.can_refresh());
//! # edgecloud_gax::Result::<()>::Ok(())
//! ```

use crate::Result;
use crate::credentials::Credentials;
use crate::credentials::dynamic::CredentialsProvider;
use crate::errors::CredentialsError;
use crate::headers_util::authorization_headers;
use edgecloud_gax::error::Error;
use http::HeaderMap;
use std::sync::{Arc, RwLock};

const SCHEME: &str = "Bearer";
const WHAT: &str = "access token";

/// Obtains new access tokens.
#[async_trait::async_trait]
pub trait TokenRefresher: Send + Sync + std::fmt::Debug {
    /// Returns a new access token.
    async fn refresh(&self) -> Result<String>;
}

struct AccessTokenCredentials {
    headers: RwLock<HeaderMap>,
    refresher: Option<Arc<dyn TokenRefresher>>,
}

impl std::fmt::Debug for AccessTokenCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenCredentials")
            .field("token", &"[censored]")
            .field("refresher", &self.refresher)
            .finish()
    }
}

#[async_trait::async_trait]
impl CredentialsProvider for AccessTokenCredentials {
    async fn headers(&self) -> Result<HeaderMap> {
        self.headers
            .read()
            .map(|h| h.clone())
            .map_err(|_| CredentialsError::from_msg(false, "the token lock is poisoned"))
    }

    fn can_refresh(&self) -> bool {
        self.refresher.is_some()
    }

    async fn refresh(&self) -> Result<()> {
        let Some(refresher) = &self.refresher else {
            return Err(CredentialsError::from_msg(
                false,
                "these credentials do not have a token refresher",
            ));
        };
        let token = refresher.refresh().await?;
        let headers = authorization_headers(WHAT, SCHEME, &token)
            .map_err(|e| CredentialsError::from_source(false, e))?;
        let mut current = self
            .headers
            .write()
            .map_err(|_| CredentialsError::from_msg(false, "the token lock is poisoned"))?;
        *current = headers;
        Ok(())
    }
}

/// A builder for credentials that authenticate using an access token.
pub struct Builder {
    token: String,
    refresher: Option<Arc<dyn TokenRefresher>>,
}

impl std::fmt::Debug for Builder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder")
            .field("token", &"[censored]")
            .field("refresher", &self.refresher)
            .finish()
    }
}

impl Builder {
    /// Creates a new builder with the given access token.
    pub fn new<T: Into<String>>(token: T) -> Self {
        Self {
            token: token.into(),
            refresher: None,
        }
    }

    /// Sets the function used to obtain a new token after a `401` response.
    pub fn with_refresher<R: TokenRefresher + 'static>(mut self, refresher: R) -> Self {
        self.refresher = Some(Arc::new(refresher));
        self
    }

    /// Returns a [Credentials] instance with the configured settings.
    ///
    /// Fails with an [Authentication][edgecloud_gax::error::ErrorKind::Authentication]
    /// error if the token is malformed.
    pub fn build(self) -> edgecloud_gax::Result<Credentials> {
        let headers =
            authorization_headers(WHAT, SCHEME, &self.token).map_err(Error::authentication)?;
        Ok(Credentials::from(AccessTokenCredentials {
            headers: RwLock::new(headers),
            refresher: self.refresher,
        }))
    }
}
