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

//! Truncated exponential backoff with jitter.
//!
//! The delay for attempt `n` (starting at 1) is `min * 2^n`, plus a jitter of
//! `U * min * n` where `U` is uniform in `[0, 1)`, clamped to `max`. After
//! `max_attempts` delays the backoff returns [Next::Stop].
//!
//! The strategy can be replaced with any function of `(attempt, min, max)`.

use crate::backoff_policy::{Backoff, Next};
use std::sync::Arc;
use std::time::Duration;

/// The error type for exponential backoff creation.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(
        "the maximum delay ({maximum:?}) should be greater than or equal to the minimum delay ({minimum:?})"
    )]
    EmptyRange { maximum: Duration, minimum: Duration },
}

/// A function computing the delay for an attempt, given the floor and ceiling.
pub type Strategy = Arc<dyn Fn(u32, Duration, Duration) -> Duration + Send + Sync>;

/// Builds [ExponentialBackoff] instances.
#[derive(Clone)]
pub struct ExponentialBackoffBuilder {
    minimum_delay: Duration,
    maximum_delay: Duration,
    max_attempts: u32,
    strategy: Strategy,
}

impl ExponentialBackoffBuilder {
    /// Creates a builder with the default parameters.
    ///
    /// # Example
    /// ```
    /// # use edgecloud_gax::exponential_backoff::Error;
    /// # use edgecloud_gax::exponential_backoff::ExponentialBackoffBuilder;
    /// use std::time::Duration;
    ///
    /// let backoff = ExponentialBackoffBuilder::new()
    ///         .with_minimum_delay(Duration::from_millis(100))
    ///         .with_maximum_delay(Duration::from_secs(5))
    ///         .with_max_attempts(3)
    ///         .build()?;
    /// # Ok::<(), Error>(())
    /// ```
    pub fn new() -> Self {
        Self {
            minimum_delay: Duration::from_secs(1),
            maximum_delay: Duration::from_secs(60),
            max_attempts: 5,
            strategy: Arc::new(jittered_exponential),
        }
    }

    /// Change the minimum delay.
    pub fn with_minimum_delay<V: Into<Duration>>(mut self, v: V) -> Self {
        self.minimum_delay = v.into();
        self
    }

    /// Change the maximum delay.
    pub fn with_maximum_delay<V: Into<Duration>>(mut self, v: V) -> Self {
        self.maximum_delay = v.into();
        self
    }

    /// Change the number of delays produced before [Next::Stop].
    pub fn with_max_attempts(mut self, v: u32) -> Self {
        self.max_attempts = v;
        self
    }

    /// Replace the delay strategy.
    ///
    /// The function receives the attempt number (starting at 1), the minimum
    /// and the maximum delay. Its result is clamped to the maximum.
    ///
    /// # Example
    /// ```
    /// # use edgecloud_gax::exponential_backoff::ExponentialBackoffBuilder;
    /// # use edgecloud_gax::backoff_policy::{Backoff, Next};
    /// use std::time::Duration;
    /// let mut backoff = ExponentialBackoffBuilder::new()
    ///     .with_minimum_delay(Duration::from_secs(1))
    ///     .with_maximum_delay(Duration::from_secs(10))
    ///     .with_strategy(|attempt, min, _max| min * attempt)
    ///     .build()?;
    /// assert_eq!(backoff.next(), Next::Delay(Duration::from_secs(1)));
    /// assert_eq!(backoff.next(), Next::Delay(Duration::from_secs(2)));
    /// # Ok::<(), edgecloud_gax::exponential_backoff::Error>(())
    /// ```
    pub fn with_strategy<F>(mut self, f: F) -> Self
    where
        F: Fn(u32, Duration, Duration) -> Duration + Send + Sync + 'static,
    {
        self.strategy = Arc::new(f);
        self
    }

    /// Creates a new exponential backoff.
    ///
    /// Fails if the maximum delay is smaller than the minimum delay.
    pub fn build(self) -> Result<ExponentialBackoff, Error> {
        if self.maximum_delay < self.minimum_delay {
            return Err(Error::EmptyRange {
                maximum: self.maximum_delay,
                minimum: self.minimum_delay,
            });
        }
        Ok(self.into_backoff())
    }

    /// Creates a new exponential backoff, clamping the minimum delay to the
    /// maximum delay.
    ///
    /// # Example
    /// ```
    /// # use edgecloud_gax::exponential_backoff::ExponentialBackoffBuilder;
    /// # use edgecloud_gax::backoff_policy::{Backoff, Next};
    /// use std::time::Duration;
    /// let mut backoff = ExponentialBackoffBuilder::new()
    ///     .with_minimum_delay(Duration::from_secs(10))
    ///     .with_maximum_delay(Duration::from_secs(1))
    ///     .clamp();
    /// assert_eq!(backoff.next(), Next::Delay(Duration::from_secs(1)));
    /// ```
    pub fn clamp(mut self) -> ExponentialBackoff {
        self.minimum_delay = self.minimum_delay.min(self.maximum_delay);
        self.into_backoff()
    }

    fn into_backoff(self) -> ExponentialBackoff {
        ExponentialBackoff {
            minimum_delay: self.minimum_delay,
            maximum_delay: self.maximum_delay,
            max_attempts: self.max_attempts,
            attempt: 0,
            strategy: self.strategy,
        }
    }
}

impl Default for ExponentialBackoffBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ExponentialBackoffBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExponentialBackoffBuilder")
            .field("minimum_delay", &self.minimum_delay)
            .field("maximum_delay", &self.maximum_delay)
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}

/// Implements truncated exponential backoff with jitter.
#[derive(Clone)]
pub struct ExponentialBackoff {
    minimum_delay: Duration,
    maximum_delay: Duration,
    max_attempts: u32,
    attempt: u32,
    strategy: Strategy,
}

impl ExponentialBackoff {
    /// The number of delays returned since creation or the last reset.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        ExponentialBackoffBuilder::new().into_backoff()
    }
}

impl std::fmt::Debug for ExponentialBackoff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExponentialBackoff")
            .field("minimum_delay", &self.minimum_delay)
            .field("maximum_delay", &self.maximum_delay)
            .field("max_attempts", &self.max_attempts)
            .field("attempt", &self.attempt)
            .finish_non_exhaustive()
    }
}

impl Backoff for ExponentialBackoff {
    fn next(&mut self) -> Next {
        if self.attempt >= self.max_attempts {
            return Next::Stop;
        }
        self.attempt += 1;
        let delay = (self.strategy)(self.attempt, self.minimum_delay, self.maximum_delay);
        Next::Delay(delay.min(self.maximum_delay))
    }

    fn reset(&mut self) {
        self.attempt = 0;
    }
}

fn jittered_exponential(attempt: u32, minimum: Duration, maximum: Duration) -> Duration {
    jittered_exponential_with_rng(attempt, minimum, maximum, &mut rand::rng())
}

fn jittered_exponential_with_rng(
    attempt: u32,
    minimum: Duration,
    maximum: Duration,
    rng: &mut impl rand::Rng,
) -> Duration {
    if minimum.is_zero() {
        return Duration::ZERO;
    }
    let min = minimum.as_secs_f64();
    let exp = attempt.min(i32::MAX as u32) as i32;
    let base = min * 2_f64.powi(exp);
    let jitter = rng.random::<f64>() * min * f64::from(attempt);
    let delay = base + jitter;
    // Overflows to infinity for large attempts.
    if !delay.is_finite() || delay >= maximum.as_secs_f64() {
        return maximum;
    }
    Duration::from_secs_f64(delay)
}
