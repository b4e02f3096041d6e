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

//! Asynchronous tasks.
//!
//! Mutating requests return the ids of the tasks doing the work. Use
//! [Tasks::wait] to poll a task until it finishes.

use crate::client::Client;
use crate::lookup::ListResponse;
use crate::model::{Task, TaskListOptions};
use gax::backoff_policy::Backoff;
use gax::endpoint::ServiceScope;
use gax::error::Error;
use gax::options::RequestOptions;
use gax::path_parameter;
use gax::response::Response;
use gax::retry_loop::Retryer;
use gax::retry_policy::{RetryDecision, RetryPolicy, TransientErrors};
use http::Method;
use tokio_util::sync::CancellationToken;

const RESOURCE: &str = "tasks";

#[derive(Clone, Copy, Debug)]
pub struct Tasks<'a> {
    client: &'a Client,
}

impl<'a> Tasks<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &str) -> gax::Result<Response<Task>> {
        self.get_with_options(id, &RequestOptions::new()).await
    }

    /// Returns one page of tasks.
    pub async fn list(&self, options: &TaskListOptions) -> gax::Result<Response<Vec<Task>>> {
        let path = self.client.resource_path(RESOURCE, ServiceScope::Client)?;
        let mut request_options = RequestOptions::new();
        request_options.set_query(options);
        let response = self
            .client
            .execute::<(), ListResponse<Task>>(Method::GET, &path, None, &request_options)
            .await?;
        Ok(response.map(|l| l.results))
    }

    /// Polls a task until it reaches a final state.
    ///
    /// Returns the task once its state is
    /// [FINISHED][crate::model::task_state::FINISHED] or
    /// [ERROR][crate::model::task_state::ERROR], callers should inspect the
    /// state. Transient errors are retried, other errors are returned
    /// immediately. If `backoff` stops before the task finishes the result is a
    /// [TimeOut][gax::error::ErrorKind::TimeOut] error.
    ///
    /// # Example
    /// ```no_run
    /// # use edgecloud::client::Client;
    /// # use gax::exponential_backoff::ExponentialBackoffBuilder;
    /// # use tokio_util::sync::CancellationToken;
    /// # use std::time::Duration;
    /// async fn sample(client: &Client, id: &str) -> anyhow::Result<()> {
    ///     let backoff = ExponentialBackoffBuilder::new()
    ///         .with_minimum_delay(Duration::from_secs(1))
    ///         .with_maximum_delay(Duration::from_secs(10))
    ///         .with_max_attempts(30)
    ///         .build()?;
    ///     let task = client.tasks().wait(id, backoff, &CancellationToken::new()).await?;
    ///     println!("task {} is {}", task.id, task.state);
    ///     Ok(())
    /// }
    /// ```
    pub async fn wait<B: Backoff>(
        &self,
        id: &str,
        backoff: B,
        cancel: &CancellationToken,
    ) -> gax::Result<Task> {
        path_parameter::uuid("id", id)?;
        let policy = |result: &gax::Result<Task>| match result {
            Ok(task) if task.is_final() => RetryDecision::Succeed,
            Ok(_) => RetryDecision::Retry,
            Err(_) => RetryPolicy::<Task>::decide(&TransientErrors, result),
        };
        let mut retryer = Retryer::new(backoff).with_policy(policy);
        let task = retryer
            .run(cancel, async |cancel| {
                let mut options = RequestOptions::new();
                options.set_cancellation_token(cancel);
                let task = self.get_with_options(id, &options).await?.into_body();
                tracing::debug!(id, state = %task.state, "polled task");
                Ok(task)
            })
            .await?;
        if !task.is_final() {
            return Err(Error::timeout(format!(
                "task {id} did not finish, its last state was {}",
                task.state
            )));
        }
        Ok(task)
    }

    async fn get_with_options(&self, id: &str, options: &RequestOptions) -> gax::Result<Response<Task>> {
        let id = path_parameter::uuid("id", id)?;
        let path = self.client.resource_path(RESOURCE, ServiceScope::Client)?;
        self.client
            .execute::<(), _>(Method::GET, &format!("{path}/{id}"), None, options)
            .await
    }
}
