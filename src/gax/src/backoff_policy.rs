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

//! Defines the trait implemented by all backoff strategies.

use std::time::Duration;

/// The result of asking a [Backoff] for the next delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Next {
    /// Wait this long before the next attempt.
    Delay(Duration),
    /// No further attempts are permitted.
    Stop,
}

/// Computes the delay between successive retry attempts.
///
/// Implementations are stateful: each call to [next()][Backoff::next]
/// advances an attempt counter, and [reset()][Backoff::reset] returns it to
/// zero. A single instance must not be shared between concurrent retry loops.
pub trait Backoff: Send {
    /// Advances the attempt counter and returns the delay for that attempt.
    ///
    /// Returns [Next::Stop], without advancing, once the attempt limit has
    /// been reached.
    fn next(&mut self) -> Next;

    /// Returns the attempt counter to zero.
    fn reset(&mut self);
}

impl<T: Backoff + ?Sized> Backoff for Box<T> {
    fn next(&mut self) -> Next {
        (**self).next()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

impl<T: Backoff + ?Sized> Backoff for &mut T {
    fn next(&mut self) -> Next {
        (**self).next()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
