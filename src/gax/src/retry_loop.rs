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

//! The retry engine.
//!
//! A [Retryer] drives a unit of work through a [Backoff], consulting a
//! [RetryPolicy] after each attempt. Sleeps between attempts are interrupted
//! when the cancellation token fires.
//!
//! # Example
//! ```
//! # use edgecloud_gax::exponential_backoff::ExponentialBackoffBuilder;
//! # use edgecloud_gax::retry_loop::Retryer;
//! # use edgecloud_gax::retry_policy::TransientErrors;
//! # use tokio_util::sync::CancellationToken;
//! use std::time::Duration;
//! # tokio_test::block_on(async {
//! let backoff = ExponentialBackoffBuilder::new()
//!     .with_minimum_delay(Duration::from_millis(10))
//!     .with_maximum_delay(Duration::from_secs(1))
//!     .build()?;
//! let mut retryer = Retryer::new(backoff).with_policy(TransientErrors);
//! let cancel = CancellationToken::new();
//! let value = retryer.run(&cancel, async |_cancel| Ok(42)).await?;
//! assert_eq!(value, 42);
//! # anyhow::Result::<()>::Ok(()) });
//! ```

use crate::Result;
use crate::backoff_policy::{Backoff, Next};
use crate::error::Error;
use crate::retry_policy::{AlwaysRetry, RetryDecision, RetryPolicy};
use tokio_util::sync::CancellationToken;

/// Runs a cancellable unit of work under a retry policy and a backoff.
///
/// The backoff state is mutated by [run()][Retryer::run], so one retryer
/// serves a single retry loop at a time. The backoff is reset whenever `run`
/// returns, so the retryer can be reused sequentially.
#[derive(Debug)]
pub struct Retryer<B, P = AlwaysRetry> {
    backoff: B,
    policy: P,
}

impl<B: Backoff> Retryer<B, AlwaysRetry> {
    /// Creates a retryer that retries every error.
    pub fn new(backoff: B) -> Self {
        Self {
            backoff,
            policy: AlwaysRetry,
        }
    }
}

impl<B: Backoff, P> Retryer<B, P> {
    /// Replaces the retry policy.
    pub fn with_policy<Q>(self, policy: Q) -> Retryer<B, Q> {
        Retryer {
            backoff: self.backoff,
            policy,
        }
    }

    /// Invokes `work` until the policy is satisfied, the backoff stops, or
    /// `cancel` fires.
    ///
    /// Returns the result of the last attempt when the policy decides to
    /// succeed or fail, or when the backoff returns [Next::Stop]. Returns a
    /// [Cancelled][crate::error::ErrorKind::Cancelled] error if the token
    /// fires while sleeping; `work` is not invoked again in that case.
    pub async fn run<T, F>(&mut self, cancel: &CancellationToken, work: F) -> Result<T>
    where
        P: RetryPolicy<T>,
        F: AsyncFnMut(CancellationToken) -> Result<T>,
    {
        let result = self.run_inner(cancel, work).await;
        self.backoff.reset();
        result
    }

    async fn run_inner<T, F>(&mut self, cancel: &CancellationToken, mut work: F) -> Result<T>
    where
        P: RetryPolicy<T>,
        F: AsyncFnMut(CancellationToken) -> Result<T>,
    {
        let mut attempt = 0_u32;
        loop {
            attempt += 1;
            let result = work(cancel.clone()).await;
            match self.policy.decide(&result) {
                RetryDecision::Succeed | RetryDecision::Fail => return result,
                RetryDecision::Retry => {}
            }
            let delay = match self.backoff.next() {
                Next::Stop => {
                    tracing::debug!(attempt, "backoff exhausted, returning last result");
                    return result;
                }
                Next::Delay(d) => d,
            };
            if let Err(e) = &result {
                tracing::debug!(attempt, ?delay, "retrying after error: {e}");
            } else {
                tracing::debug!(attempt, ?delay, "retrying");
            }
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!(attempt, "cancelled during backoff");
                    return Err(Error::cancelled());
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::retry_policy::TransientErrors;
    use std::time::Duration;

    mockall::mock! {
        Backoff {}
        impl Backoff for Backoff {
            fn next(&mut self) -> Next;
            fn reset(&mut self);
        }
    }

    fn transient() -> Error {
        Error::io("connection reset")
    }

    #[tokio::test(start_paused = true)]
    async fn success_first_attempt() -> anyhow::Result<()> {
        let mut backoff = MockBackoff::new();
        backoff.expect_next().never();
        backoff.expect_reset().times(1).return_const(());

        let mut retryer = Retryer::new(backoff);
        let mut calls = 0;
        let got = retryer
            .run(&CancellationToken::new(), async |_| {
                calls += 1;
                Ok("done")
            })
            .await?;
        assert_eq!(got, "done");
        assert_eq!(calls, 1);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn stop_returns_last_error() {
        let mut seq = mockall::Sequence::new();
        let mut backoff = MockBackoff::new();
        backoff
            .expect_next()
            .times(2)
            .in_sequence(&mut seq)
            .return_const(Next::Delay(Duration::from_millis(10)));
        backoff
            .expect_next()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(Next::Stop);
        backoff.expect_reset().times(1).return_const(());

        let mut retryer = Retryer::new(backoff);
        let mut calls = 0;
        let got = retryer
            .run(&CancellationToken::new(), async |_| -> Result<()> {
                calls += 1;
                Err(Error::missing_input(format!("attempt-{calls}")))
            })
            .await;
        assert_eq!(calls, 3);
        let err = got.unwrap_err();
        assert!(err.to_string().contains("attempt-3"), "{err}");
    }

    #[tokio::test(start_paused = true)]
    async fn permanent_error_with_transient_policy() {
        let mut backoff = MockBackoff::new();
        backoff.expect_next().never();
        backoff.expect_reset().times(1).return_const(());

        let mut retryer = Retryer::new(backoff).with_policy(TransientErrors);
        let mut calls = 0;
        let got = retryer
            .run(&CancellationToken::new(), async |_| -> Result<()> {
                calls += 1;
                Err(Error::missing_input("id"))
            })
            .await;
        assert_eq!(calls, 1);
        assert!(
            matches!(&got, Err(e) if e.kind() == ErrorKind::MissingInput),
            "{got:?}"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn policy_retries_ok_values() -> anyhow::Result<()> {
        let mut backoff = MockBackoff::new();
        backoff
            .expect_next()
            .times(2)
            .return_const(Next::Delay(Duration::from_secs(1)));
        backoff.expect_reset().times(1).return_const(());

        let policy = |r: &Result<u32>| match r {
            Ok(v) if *v < 3 => RetryDecision::Retry,
            Ok(_) => RetryDecision::Succeed,
            Err(_) => RetryDecision::Fail,
        };
        let mut retryer = Retryer::new(backoff).with_policy(policy);
        let mut calls = 0;
        let got = retryer
            .run(&CancellationToken::new(), async |_| {
                calls += 1;
                Ok(calls)
            })
            .await?;
        assert_eq!(got, 3);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_during_sleep() {
        let mut backoff = MockBackoff::new();
        backoff
            .expect_next()
            .times(1)
            .return_const(Next::Delay(Duration::from_secs(3600)));
        backoff.expect_reset().times(1).return_const(());

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            trigger.cancel();
        });

        let mut retryer = Retryer::new(backoff);
        let mut calls = 0;
        let start = tokio::time::Instant::now();
        let got = retryer
            .run(&cancel, async |_| -> Result<()> {
                calls += 1;
                Err(transient())
            })
            .await;
        assert_eq!(calls, 1);
        assert!(
            matches!(&got, Err(e) if e.is_cancelled()),
            "{got:?}"
        );
        assert!(start.elapsed() < Duration::from_secs(3600));
    }

    #[tokio::test(start_paused = true)]
    async fn work_sees_token() -> anyhow::Result<()> {
        let mut backoff = MockBackoff::new();
        backoff.expect_reset().return_const(());
        let cancel = CancellationToken::new();
        let mut retryer = Retryer::new(backoff);
        let got = retryer
            .run(&cancel, async |token| Ok(token.is_cancelled()))
            .await?;
        assert!(!got);
        Ok(())
    }
}
