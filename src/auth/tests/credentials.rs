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

#[cfg(test)]
mod tests {
    use edgecloud_auth::credentials::{Credentials, access_token, anonymous, api_key};
    use edgecloud_auth::errors::CredentialsError;
    use edgecloud_gax::error::ErrorKind;
    use http::header::AUTHORIZATION;
    use test_case::test_case;

    type Result<T> = anyhow::Result<T>;

    #[derive(Debug)]
    struct Rotating;

    #[async_trait::async_trait]
    impl access_token::TokenRefresher for Rotating {
        async fn refresh(&self) -> std::result::Result<String, CredentialsError> {
            Ok("rotated".to_string())
        }
    }

    async fn authorization(credentials: &Credentials) -> Result<Option<String>> {
        let headers = credentials.headers().await?;
        let value = headers
            .get(AUTHORIZATION)
            .map(|v| v.to_str().map(str::to_string))
            .transpose()?;
        Ok(value)
    }

    #[tokio::test]
    async fn schemes() -> Result<()> {
        let credentials = api_key::Builder::new("k1").build()?;
        assert_eq!(authorization(&credentials).await?.as_deref(), Some("APIKey k1"));

        let credentials = access_token::Builder::new("t1").build()?;
        assert_eq!(authorization(&credentials).await?.as_deref(), Some("Bearer t1"));

        let credentials = anonymous::Builder::new().build();
        assert_eq!(authorization(&credentials).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn refresh_is_visible_to_clones() -> Result<()> {
        let credentials = access_token::Builder::new("t1")
            .with_refresher(Rotating)
            .build()?;
        let clone = credentials.clone();
        credentials.refresh().await?;
        assert_eq!(authorization(&clone).await?.as_deref(), Some("Bearer rotated"));
        Ok(())
    }

    #[test_case("")]
    #[test_case(" leading")]
    #[test_case("trailing\r\n")]
    #[test_case("ünïcode")]
    fn malformed_secrets(secret: &str) {
        let err = api_key::Builder::new(secret).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authentication, "{err:?}");
        let err = access_token::Builder::new(secret).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authentication, "{err:?}");
    }
}
