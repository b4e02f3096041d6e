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

//! Validation of path parameters.
//!
//! Identifiers used to build request paths are validated before any request
//! is made. Failures are reported as
//! [InvalidInput][crate::error::ErrorKind::InvalidInput] or
//! [MissingInput][crate::error::ErrorKind::MissingInput] errors.

use crate::Result;
use crate::error::Error;

/// Validates that `value` is a well-formed UUID.
///
/// # Example
/// ```
/// # use edgecloud_gax::path_parameter::uuid;
/// assert!(uuid("id", "726ecfcc-7fd0-4e30-a86e-7892524aa483").is_ok());
/// assert!(uuid("id", "not-a-uuid").is_err());
/// ```
pub fn uuid(name: &str, value: &str) -> Result<::uuid::Uuid> {
    if value.is_empty() {
        return Err(missing(name));
    }
    ::uuid::Uuid::try_parse(value).map_err(|_| Error::invalid_input(name, value))
}

/// Returns the error for a required parameter that was not provided.
pub fn missing(name: &str) -> Error {
    Error::missing_input(name)
}
