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

use crate::errors::BuildError;
use http::header::{AUTHORIZATION, HeaderMap, HeaderValue};

/// Validates `secret` and builds the `Authorization` header map.
///
/// `what` names the secret in error messages, for example `"API key"`.
pub(crate) fn authorization_headers(
    what: &'static str,
    scheme: &str,
    secret: &str,
) -> Result<HeaderMap, BuildError> {
    validate_secret(what, secret)?;
    let mut value = HeaderValue::from_str(&format!("{scheme} {secret}"))
        .map_err(|_| BuildError::NotHeaderSafe(what))?;
    value.set_sensitive(true);
    let mut headers = HeaderMap::with_capacity(1);
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

pub(crate) fn validate_secret(what: &'static str, secret: &str) -> Result<(), BuildError> {
    if secret.is_empty() {
        return Err(BuildError::Empty(what));
    }
    if secret.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(BuildError::InvalidCharacters(what));
    }
    if !secret.chars().all(|c| c.is_ascii_graphic()) {
        return Err(BuildError::NotHeaderSafe(what));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn builds_header() {
        let headers = authorization_headers("API key", "APIKey", "abc123").unwrap();
        let value = headers.get(AUTHORIZATION).unwrap();
        assert_eq!(value, &HeaderValue::from_static("APIKey abc123"));
        assert!(value.is_sensitive());
    }

    #[test_case("", BuildError::Empty("API key"))]
    #[test_case("abc 123", BuildError::InvalidCharacters("API key"))]
    #[test_case("abc\t123", BuildError::InvalidCharacters("API key"))]
    #[test_case("abc\n", BuildError::InvalidCharacters("API key"))]
    #[test_case("abc\u{7f}", BuildError::InvalidCharacters("API key"))]
    #[test_case("clé", BuildError::NotHeaderSafe("API key"))]
    fn invalid(secret: &str, want: BuildError) {
        let got = authorization_headers("API key", "APIKey", secret).unwrap_err();
        assert_eq!(got, want);
    }
}
