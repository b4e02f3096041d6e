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

//! EdgeCloud Client Libraries for Rust - Authentication Components
//!
//! This crate contains the types and functions used to authenticate requests
//! to the EdgeCloud API. The clients consume a [credentials::Credentials]
//! value and use it to create the `Authorization` header of every request.
//!
//! Three kinds of credentials are supported:
//! - [API keys][credentials::api_key], sent as `Authorization: APIKey <key>`.
//! - [Access tokens][credentials::access_token], sent as
//!   `Authorization: Bearer <token>`, optionally refreshed when the service
//!   rejects them.
//! - [Anonymous][credentials::anonymous] credentials, which send no header.

pub mod errors;

/// Types and functions to work with EdgeCloud authentication credentials.
pub mod credentials;

/// A `Result` alias where the `Err` case is
/// `edgecloud_auth::errors::CredentialsError`.
pub(crate) type Result<T> = std::result::Result<T, crate::errors::CredentialsError>;

pub(crate) mod headers_util;
