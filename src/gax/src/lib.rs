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

//! EdgeCloud API helpers.
//!
//! This crate contains the types and functions shared by the EdgeCloud client
//! libraries for Rust: the error taxonomy, the retry engine and its backoff,
//! endpoint location, query-string encoding, and the generic client builder.
//!
//! Applications typically use the [error] types, the [retry_loop] to wrap
//! calls that may fail transiently, and the [response] envelope returned by
//! every call.

/// An alias of [std::result::Result] where the error is always [crate::error::Error].
///
/// This is the result type used by all functions issuing requests.
pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// The core error types used by the clients.
pub mod error;

pub mod backoff_policy;
pub mod client_builder;
pub mod endpoint;
pub mod exponential_backoff;
pub mod options;
pub mod path_parameter;
pub mod query_parameter;
pub mod response;
pub mod retry_loop;
pub mod retry_policy;

#[cfg(test)]
pub(crate) mod mock_rng;
