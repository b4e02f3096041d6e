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

use super::Error;
use std::collections::HashMap;
use std::sync::Arc;

/// A function that rewrites an error before it is returned to the caller.
pub type ErrorRewriter = Arc<dyn Fn(Error) -> Error + Send + Sync>;

/// Per-request error rewriting, keyed by HTTP status code.
///
/// Operations use this to replace the generic error for a given status with
/// something more meaningful for the resource in question.
///
/// # Example
/// ```
/// use edgecloud_gax::error::{Error, ErrorKind, ErrorOverrides};
/// let overrides = ErrorOverrides::new()
///     .on_status(409, |e: Error| e.with_info("floating IP already exists"));
/// let error = overrides.apply(Error::missing_input("unrelated"));
/// assert_eq!(error.kind(), ErrorKind::MissingInput);
/// ```
#[derive(Clone, Default)]
pub struct ErrorOverrides {
    rewriters: HashMap<u16, ErrorRewriter>,
}

impl ErrorOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `f` to rewrite errors with the given status code.
    ///
    /// Registering the same status twice replaces the previous rewriter.
    pub fn on_status<F>(mut self, status_code: u16, f: F) -> Self
    where
        F: Fn(Error) -> Error + Send + Sync + 'static,
    {
        self.rewriters.insert(status_code, Arc::new(f));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rewriters.is_empty()
    }

    /// Applies the rewriter matching the error's status code, if any.
    pub fn apply(&self, error: Error) -> Error {
        let Some(rewriter) = error
            .status_code()
            .and_then(|code| self.rewriters.get(&code))
        else {
            return error;
        };
        tracing::debug!(status = error.status_code(), "applying error override");
        rewriter(error)
    }
}

impl std::fmt::Debug for ErrorOverrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut codes = self.rewriters.keys().collect::<Vec<_>>();
        codes.sort();
        f.debug_struct("ErrorOverrides")
            .field("status_codes", &codes)
            .finish()
    }
}
