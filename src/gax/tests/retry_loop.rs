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

//! These tests drive the retry engine with the real exponential backoff. The
//! tokio clock is paused, so the sleeps complete instantly while the elapsed
//! (virtual) time still reflects the requested delays.

#[cfg(test)]
mod tests {
    use edgecloud_gax::backoff_policy::{Backoff, Next};
    use edgecloud_gax::error::{Error, ErrorKind};
    use edgecloud_gax::exponential_backoff::ExponentialBackoffBuilder;
    use edgecloud_gax::retry_loop::Retryer;
    use edgecloud_gax::retry_policy::TransientErrors;
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::Instant;
    use tokio_util::sync::CancellationToken;

    type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

    fn retryable() -> Error {
        Error::io("connection reset by peer")
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_attempts() -> Result<()> {
        let min = Duration::from_millis(10);
        let max = Duration::from_secs(1);
        let delays = Arc::new(Mutex::new(Vec::new()));
        let recorded = delays.clone();
        let backoff = ExponentialBackoffBuilder::new()
            .with_minimum_delay(min)
            .with_maximum_delay(max)
            .with_max_attempts(5)
            .with_strategy(move |attempt, min, max| {
                let d = (min * 2_u32.pow(attempt)).min(max);
                recorded.lock().unwrap().push(d);
                d
            })
            .build()?;

        let mut retryer = Retryer::new(backoff);
        let mut calls = 0;
        let start = Instant::now();
        let got = retryer
            .run(&CancellationToken::new(), async |_| -> edgecloud_gax::Result<()> {
                calls += 1;
                Err(retryable())
            })
            .await;
        let elapsed = start.elapsed();

        assert_eq!(calls, 6);
        let err = got.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("connection reset by peer"), "{err}");

        let delays = delays.lock().unwrap().clone();
        assert_eq!(delays.len(), 5, "{delays:?}");
        for d in &delays {
            assert!(*d >= min && *d <= max, "{d:?}");
        }
        let total: Duration = delays.iter().sum();
        assert!(elapsed >= total, "{elapsed:?} < {total:?}");
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_with_default_strategy() -> Result<()> {
        let min = Duration::from_millis(10);
        let max = Duration::from_secs(1);
        let backoff = ExponentialBackoffBuilder::new()
            .with_minimum_delay(min)
            .with_maximum_delay(max)
            .with_max_attempts(5)
            .build()?;

        let mut retryer = Retryer::new(backoff);
        let mut calls = 0;
        let start = Instant::now();
        let got = retryer
            .run(&CancellationToken::new(), async |_| -> edgecloud_gax::Result<()> {
                calls += 1;
                Err(retryable())
            })
            .await;
        assert_eq!(calls, 6);
        assert!(got.is_err(), "{got:?}");
        assert!(start.elapsed() >= min * 5, "{:?}", start.elapsed());
        assert!(start.elapsed() <= max * 5, "{:?}", start.elapsed());
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_mid_sequence() -> Result<()> {
        let backoff = ExponentialBackoffBuilder::new()
            .with_minimum_delay(Duration::from_millis(10))
            .with_maximum_delay(Duration::from_secs(1))
            .with_max_attempts(5)
            .build()?;

        let mut retryer = Retryer::new(backoff);
        let mut calls = 0;
        let got = retryer
            .run(&CancellationToken::new(), async |_| {
                calls += 1;
                if calls == 1 {
                    return Err(retryable());
                }
                Ok("done")
            })
            .await?;
        assert_eq!(calls, 2);
        assert_eq!(got, "done");
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_during_backoff() -> Result<()> {
        let backoff = ExponentialBackoffBuilder::new()
            .with_minimum_delay(Duration::from_secs(10))
            .with_maximum_delay(Duration::from_secs(60))
            .with_max_attempts(5)
            .build()?;

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        let mut retryer = Retryer::new(backoff);
        let mut calls = 0;
        let got = retryer
            .run(&cancel, async |_| -> edgecloud_gax::Result<()> {
                calls += 1;
                // Cancel while the loop sleeps before the second attempt.
                let trigger = trigger.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_secs(1)).await;
                    trigger.cancel();
                });
                Err(retryable())
            })
            .await;
        assert_eq!(calls, 1);
        let err = got.unwrap_err();
        assert!(err.is_cancelled(), "{err:?}");
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn reusable_after_run() -> Result<()> {
        let backoff = ExponentialBackoffBuilder::new()
            .with_minimum_delay(Duration::from_millis(10))
            .with_maximum_delay(Duration::from_secs(1))
            .with_max_attempts(2)
            .build()?;
        let mut retryer = Retryer::new(backoff).with_policy(TransientErrors);

        for _ in 0..2 {
            let mut calls = 0;
            let got = retryer
                .run(&CancellationToken::new(), async |_| -> edgecloud_gax::Result<()> {
                    calls += 1;
                    Err(retryable())
                })
                .await;
            assert!(got.is_err(), "{got:?}");
            // Each run starts from a fresh backoff.
            assert_eq!(calls, 3);
        }
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn boxed_backoff() -> Result<()> {
        let backoff: Box<dyn Backoff> = Box::new(
            ExponentialBackoffBuilder::new()
                .with_max_attempts(0)
                .clamp(),
        );
        let mut retryer = Retryer::new(backoff);
        let mut calls = 0;
        let got = retryer
            .run(&CancellationToken::new(), async |_| -> edgecloud_gax::Result<()> {
                calls += 1;
                Err(Error::missing_input("id"))
            })
            .await;
        assert_eq!(calls, 1);
        assert!(matches!(got, Err(e) if e.kind() == ErrorKind::MissingInput));
        let mut b = ExponentialBackoffBuilder::new().with_max_attempts(0).clamp();
        assert_eq!(b.next(), Next::Stop);
        Ok(())
    }
}
