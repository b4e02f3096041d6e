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

//! Common errors generated by the components in this crate.

use std::error::Error;
use std::sync::Arc;

/// Represents an error creating or refreshing the authentication headers.
///
/// Some errors are transient: the operation may succeed if retried, for
/// example when the token endpoint is temporarily unavailable. Applications
/// can use [is_transient()][CredentialsError::is_transient] to decide.
#[derive(Clone, Debug)]
pub struct CredentialsError {
    is_transient: bool,
    message: Option<String>,
    source: Option<Arc<dyn Error + Send + Sync>>,
}

impl CredentialsError {
    /// Creates a new error with the given message and source.
    pub fn new<T>(is_transient: bool, message: &str, source: T) -> Self
    where
        T: Error + Send + Sync + 'static,
    {
        Self {
            is_transient,
            message: Some(message.into()),
            source: Some(Arc::new(source)),
        }
    }

    /// Creates a new error with only a message.
    pub fn from_msg<T: Into<String>>(is_transient: bool, message: T) -> Self {
        Self {
            is_transient,
            message: Some(message.into()),
            source: None,
        }
    }

    /// Creates a new error wrapping `source`.
    pub fn from_source<T>(is_transient: bool, source: T) -> Self
    where
        T: Error + Send + Sync + 'static,
    {
        Self {
            is_transient,
            message: None,
            source: Some(Arc::new(source)),
        }
    }

    /// If true, the operation may succeed in future attempts.
    pub fn is_transient(&self) -> bool {
        self.is_transient
    }
}

impl Error for CredentialsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

const TRANSIENT_MSG: &str = "but future attempts may succeed";
const PERMANENT_MSG: &str = "and future attempts will not succeed";

impl std::fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = if self.is_transient {
            TRANSIENT_MSG
        } else {
            PERMANENT_MSG
        };
        match &self.message {
            None => write!(f, "cannot create the authentication headers, {msg}"),
            Some(m) => write!(f, "{m}, {msg}"),
        }
    }
}

/// The credentials are malformed.
///
/// These errors are detected when the credentials are built, before any
/// request is made.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum BuildError {
    #[error("the {0} is empty")]
    Empty(&'static str),
    #[error("the {0} contains whitespace or control characters")]
    InvalidCharacters(&'static str),
    #[error("the {0} contains characters that are not allowed in HTTP headers")]
    NotHeaderSafe(&'static str),
}
