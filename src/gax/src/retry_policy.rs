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

//! Defines the trait implemented by retry policies and some common
//! implementations.
//!
//! A retry policy examines the result of each attempt and decides whether the
//! [Retryer][crate::retry_loop::Retryer] should return it or try again. Any
//! `Fn(&Result<T>) -> RetryDecision` closure is also a policy.
//!
//! # Example
//! ```
//! # use edgecloud_gax::retry_policy::*;
//! # use edgecloud_gax::Result;
//! let policy = |r: &Result<u32>| match r {
//!     Ok(v) if *v < 3 => RetryDecision::Retry,
//!     Ok(_) => RetryDecision::Succeed,
//!     Err(_) => RetryDecision::Fail,
//! };
//! assert_eq!(policy.decide(&Ok(1)), RetryDecision::Retry);
//! ```

use crate::Result;

/// What the retry loop should do with the result of an attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryDecision {
    /// Return the result, the operation completed.
    Succeed,
    /// Return the result, the operation failed and retrying will not help.
    Fail,
    /// Try again, subject to the backoff.
    Retry,
}

/// Classifies the result of an attempt.
pub trait RetryPolicy<T>: Send + Sync {
    fn decide(&self, result: &Result<T>) -> RetryDecision;
}

impl<T, F> RetryPolicy<T> for F
where
    F: Fn(&Result<T>) -> RetryDecision + Send + Sync,
{
    fn decide(&self, result: &Result<T>) -> RetryDecision {
        self(result)
    }
}

/// Succeeds on `Ok`, retries every error.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysRetry;

impl<T> RetryPolicy<T> for AlwaysRetry {
    fn decide(&self, result: &Result<T>) -> RetryDecision {
        match result {
            Ok(_) => RetryDecision::Succeed,
            Err(_) => RetryDecision::Retry,
        }
    }
}

/// Succeeds on `Ok`, retries transient errors, fails on everything else.
///
/// See [Error::is_transient][crate::error::Error::is_transient].
#[derive(Clone, Copy, Debug, Default)]
pub struct TransientErrors;

impl<T> RetryPolicy<T> for TransientErrors {
    fn decide(&self, result: &Result<T>) -> RetryDecision {
        match result {
            Ok(_) => RetryDecision::Succeed,
            Err(e) if e.is_transient() => RetryDecision::Retry,
            Err(_) => RetryDecision::Fail,
        }
    }
}
