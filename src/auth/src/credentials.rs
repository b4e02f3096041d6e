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

//! Types and functions to work with EdgeCloud authentication credentials.
//!
//! # Example
//! ```
//! # use edgecloud_auth::credentials::api_key;
//! # tokio_test::block_on(async {
//! let credentials = api_key::Builder::new("my-api-key").build()?;
//! let headers = credentials.headers().await?;
//! assert_eq!(
//!     headers.get(http::header::AUTHORIZATION).map(|v| v.as_bytes()),
//!     Some(b"APIKey my-api-key".as_slice())
//! );
//! # anyhow::Result::<()>::Ok(()) });
//! ```

use crate::Result;
use http::HeaderMap;
use std::sync::Arc;

pub mod access_token;
pub mod anonymous;
pub mod api_key;

/// An implementation of [crate::credentials::CredentialsProvider].
///
/// Represents a [Credentials] used to obtain the auth request headers.
///
/// Clients hold a `Credentials` value and ask it for the headers of every
/// request. Cloning is cheap, all clones share the same state.
#[derive(Clone, Debug)]
pub struct Credentials {
    inner: Arc<dyn dynamic::CredentialsProvider>,
}

impl<T> std::convert::From<T> for Credentials
where
    T: dynamic::CredentialsProvider + 'static,
{
    fn from(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }
}

impl Credentials {
    /// Returns the headers used to authenticate a request.
    pub async fn headers(&self) -> Result<HeaderMap> {
        self.inner.headers().await
    }

    /// If true, [refresh()][Credentials::refresh] can obtain new credentials
    /// after the service rejects the current ones.
    pub fn can_refresh(&self) -> bool {
        self.inner.can_refresh()
    }

    /// Obtains new credentials, replacing the current ones.
    pub async fn refresh(&self) -> Result<()> {
        self.inner.refresh().await
    }
}

/// Represents an auth provider.
///
/// Applications rarely need to implement this trait, the builders in this
/// module cover the supported credential types. It is useful in tests, and for
/// applications that obtain their credentials from a custom source.
///
/// # Example
/// ```
/// # use edgecloud_auth::credentials::{Credentials, CredentialsProvider};
/// # use edgecloud_auth::errors::CredentialsError;
/// # use http::HeaderMap;
/// #[derive(Debug)]
/// struct Static(HeaderMap);
///
/// #[async_trait::async_trait]
/// impl CredentialsProvider for Static {
///     async fn headers(&self) -> Result<HeaderMap, CredentialsError> {
///         Ok(self.0.clone())
///     }
/// }
///
/// let credentials = Credentials::from(Static(HeaderMap::new()));
/// assert!(!credentials.can_refresh());
/// ```
pub use dynamic::CredentialsProvider;

pub(crate) mod dynamic {
    use super::Result;
    use crate::errors::CredentialsError;
    use http::HeaderMap;

    /// Produces the authentication headers for each request.
    #[async_trait::async_trait]
    pub trait CredentialsProvider: Send + Sync + std::fmt::Debug {
        /// Asynchronously constructs the auth headers.
        async fn headers(&self) -> Result<HeaderMap>;

        /// If true, the credentials support [refresh()][Self::refresh].
        fn can_refresh(&self) -> bool {
            false
        }

        /// Obtains new credentials.
        async fn refresh(&self) -> Result<()> {
            Err(CredentialsError::from_msg(
                false,
                "these credentials do not support refreshing",
            ))
        }
    }
}
