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

//! Helpers to locate a single resource in a list.

use gax::error::Error;
use serde::Deserialize;

/// Returns the only element of `matches`.
///
/// Fails with [ResourceNotFound][gax::error::ErrorKind::ResourceNotFound] if
/// there are no matches, and with
/// [MultipleResourcesFound][gax::error::ErrorKind::MultipleResourcesFound] if
/// there is more than one.
///
/// # Example
/// ```
/// # use edgecloud::lookup::find_one;
/// # use gax::error::ErrorKind;
/// let found = find_one("flavor", "g1-standard-1-2", vec![1])?;
/// assert_eq!(found, 1);
/// let err = find_one::<u32>("flavor", "g1-standard-1-2", vec![]).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::ResourceNotFound);
/// # gax::Result::<()>::Ok(())
/// ```
pub fn find_one<T>(resource_type: &str, name: &str, matches: Vec<T>) -> gax::Result<T> {
    let count = matches.len();
    let mut iter = matches.into_iter();
    match (iter.next(), count) {
        (Some(found), 1) => Ok(found),
        (None, _) => Err(Error::resource_not_found(resource_type, name)),
        (Some(_), n) => Err(Error::multiple_resources_found(resource_type, name, n)),
    }
}

// The envelope used by the service for list responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self {
            count: 0,
            results: Vec::new(),
        }
    }
}
