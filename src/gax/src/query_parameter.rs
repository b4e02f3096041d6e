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

//! Sparse query-string encoding.
//!
//! Option types implement [QueryParameters] by listing their fields in a
//! [QueryPairs] builder. Values that are empty, zero, or `false` are omitted,
//! and collections are joined with a comma.
//!
//! # Example
//! ```
//! # use edgecloud_gax::query_parameter::*;
//! #[derive(Default)]
//! struct ListOptions {
//!     state: Vec<String>,
//!     limit: u32,
//!     detailed: bool,
//! }
//!
//! impl QueryParameters for ListOptions {
//!     fn query_pairs(&self) -> Vec<(String, String)> {
//!         QueryPairs::new()
//!             .add("state", &self.state)
//!             .add("limit", &self.limit)
//!             .add("detailed", &self.detailed)
//!             .build()
//!     }
//! }
//!
//! let options = ListOptions { state: vec!["NEW".into(), "RUNNING".into()], ..Default::default() };
//! assert_eq!(options.query_pairs(), vec![("state".to_string(), "NEW,RUNNING".to_string())]);
//! ```

/// Types that encode themselves as query-string pairs.
pub trait QueryParameters {
    fn query_pairs(&self) -> Vec<(String, String)>;
}

/// A value that may appear in a query string.
///
/// Returns `None` when the value is absent, empty, zero, or `false`.
pub trait QueryValue {
    fn format(&self) -> Option<String>;
}

impl QueryValue for bool {
    fn format(&self) -> Option<String> {
        self.then(|| "true".to_string())
    }
}

impl QueryValue for String {
    fn format(&self) -> Option<String> {
        self.as_str().format()
    }
}

impl QueryValue for str {
    fn format(&self) -> Option<String> {
        (!self.is_empty()).then(|| self.to_string())
    }
}

impl<T: QueryValue + ?Sized> QueryValue for &T {
    fn format(&self) -> Option<String> {
        (**self).format()
    }
}

impl<T: QueryValue> QueryValue for Option<T> {
    fn format(&self) -> Option<String> {
        self.as_ref().and_then(QueryValue::format)
    }
}

impl<T: QueryValue> QueryValue for Vec<T> {
    fn format(&self) -> Option<String> {
        self.as_slice().format()
    }
}

impl<T: QueryValue> QueryValue for [T] {
    fn format(&self) -> Option<String> {
        let joined = self
            .iter()
            .filter_map(QueryValue::format)
            .collect::<Vec<_>>()
            .join(",");
        (!joined.is_empty()).then_some(joined)
    }
}

macro_rules! integer_query_value {
    ($($t:ty),*) => {
        $(
            impl QueryValue for $t {
                fn format(&self) -> Option<String> {
                    (*self != 0).then(|| self.to_string())
                }
            }
        )*
    };
}

integer_query_value!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

/// Accumulates the non-empty query pairs of an options type.
#[derive(Clone, Debug, Default)]
pub struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `name=value` unless the value is empty, zero, or `false`.
    pub fn add<V: QueryValue + ?Sized>(mut self, name: &str, value: &V) -> Self {
        if let Some(v) = value.format() {
            self.0.push((name.to_string(), v));
        }
        self
    }

    pub fn build(self) -> Vec<(String, String)> {
        self.0
    }
}
