// src/probe/transcription.rs
use super::{endpoint_url, CheckError, ServiceProbe};
use crate::auth::{fetch_access_token, ServiceAccountKey};
use crate::config::{Configuration, Settings, PROJECT_ID_VAR};
use crate::health::ServiceName;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Speech-to-Text reachability through a service-account key file.
pub struct TranscriptionProbe {
    client: Client,
    credentials_path: String,
    project_id: String,
    endpoint: Url,
    timeout: Duration,
}

impl TranscriptionProbe {
    pub fn new(client: Client, config: &Configuration, settings: &Settings) -> Self {
        Self {
            client,
            credentials_path: config.credentials_path.clone(),
            project_id: config.project_id.clone(),
            endpoint: settings.speech_endpoint.clone(),
            timeout: settings.timeout(),
        }
    }
}

#[async_trait]
impl ServiceProbe for TranscriptionProbe {
    fn service(&self) -> ServiceName {
        ServiceName::Transcription
    }

    async fn authenticate_and_probe(&self) -> Result<(), CheckError> {
        let key = ServiceAccountKey::from_file(&self.credentials_path)
            .await
            .map_err(|e| e.into_check_error(self.timeout))?;

        if self.project_id.is_empty() {
            return Err(CheckError::Configuration(format!("{} is not set", PROJECT_ID_VAR)));
        }
        if !key.project_id.is_empty() && key.project_id != self.project_id {
            warn!(
                "Key file belongs to project {} but {} is {}",
                key.project_id, PROJECT_ID_VAR, self.project_id
            );
        }

        let token = fetch_access_token(&self.client, &key)
            .await
            .map_err(|e| e.into_check_error(self.timeout))?;
        debug!(
            "Obtained access token for {} (expires in {:?}s)",
            key.client_email, token.expires_in
        );

        let response = self
            .client
            .get(endpoint_url(&self.endpoint, "v1/operations"))
            .query(&[("pageSize", "1")])
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| CheckError::from_transport(e, self.timeout))?;

        let status = response.status();
        if status.is_success() {
            debug!("Speech-to-Text answered {}", status);
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(CheckError::from_google_response(status, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::CheckErrorKind;
    use mockito::{Matcher, Server};
    use std::path::PathBuf;

    const KEY_FIXTURE: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/service-account.json"
    ));

    fn key_file_for(server: &Server, dir: &tempfile::TempDir) -> PathBuf {
        let mut key: serde_json::Value = serde_json::from_str(KEY_FIXTURE).unwrap();
        key["token_uri"] = format!("{}/token", server.url()).into();
        let path = dir.path().join("key.json");
        std::fs::write(&path, key.to_string()).unwrap();
        path
    }

    fn probe_for(server: &Server, credentials_path: &str, project_id: &str) -> TranscriptionProbe {
        let settings = Settings {
            speech_endpoint: Url::parse(&server.url()).unwrap(),
            ..Settings::default()
        };
        let config = Configuration::new(credentials_path, project_id, "AIzaGOOD");
        TranscriptionProbe::new(Client::new(), &config, &settings)
    }

    async fn mock_token(server: &mut Server) -> mockito::Mock {
        server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"ya29.test","expires_in":3599}"#)
            .create_async()
            .await
    }

    #[tokio::test]
    async fn succeeds_against_provisioned_project() {
        let mut server = Server::new_async().await;
        let dir = tempfile::tempdir().unwrap();
        let key_path = key_file_for(&server, &dir);

        let token = mock_token(&mut server).await;
        let operations = server
            .mock("GET", "/v1/operations")
            .match_query(Matcher::UrlEncoded("pageSize".into(), "1".into()))
            .match_header("authorization", "Bearer ya29.test")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let probe = probe_for(&server, key_path.to_str().unwrap(), "proj-1");
        assert_eq!(probe.authenticate_and_probe().await, Ok(()));

        token.assert_async().await;
        operations.assert_async().await;
    }

    #[tokio::test]
    async fn missing_key_file_fails_before_network() {
        let mut server = Server::new_async().await;
        let token = server.mock("POST", "/token").expect(0).create_async().await;

        let probe = probe_for(&server, "/nonexistent/file.json", "proj-1");
        let err = probe.authenticate_and_probe().await.unwrap_err();

        assert_eq!(err.kind(), CheckErrorKind::AuthenticationError);
        token.assert_async().await;
    }

    #[tokio::test]
    async fn empty_project_is_a_configuration_failure() {
        let mut server = Server::new_async().await;
        let dir = tempfile::tempdir().unwrap();
        let key_path = key_file_for(&server, &dir);
        let token = server.mock("POST", "/token").expect(0).create_async().await;

        let probe = probe_for(&server, key_path.to_str().unwrap(), "");
        let err = probe.authenticate_and_probe().await.unwrap_err();

        assert_eq!(err.kind(), CheckErrorKind::ConfigurationError);
        token.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_assertion_is_authentication() {
        let mut server = Server::new_async().await;
        let dir = tempfile::tempdir().unwrap();
        let key_path = key_file_for(&server, &dir);
        let _token = server
            .mock("POST", "/token")
            .with_status(400)
            .with_body(r#"{"error":"invalid_grant","error_description":"account not found"}"#)
            .create_async()
            .await;

        let probe = probe_for(&server, key_path.to_str().unwrap(), "proj-1");
        let err = probe.authenticate_and_probe().await.unwrap_err();

        assert_eq!(err.kind(), CheckErrorKind::AuthenticationError);
        assert!(err.to_string().contains("account not found"));
    }

    #[tokio::test]
    async fn disabled_speech_api_is_reported() {
        let mut server = Server::new_async().await;
        let dir = tempfile::tempdir().unwrap();
        let key_path = key_file_for(&server, &dir);
        let _token = mock_token(&mut server).await;
        let _operations = server
            .mock("GET", "/v1/operations")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(
                serde_json::json!({
                    "error": {
                        "code": 403,
                        "message": "Cloud Speech-to-Text API has not been used in project proj-1 before or it is disabled.",
                        "status": "PERMISSION_DENIED",
                        "details": [{ "reason": "SERVICE_DISABLED" }]
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let probe = probe_for(&server, key_path.to_str().unwrap(), "proj-1");
        let err = probe.authenticate_and_probe().await.unwrap_err();

        assert_eq!(err.kind(), CheckErrorKind::ApiDisabledError);
    }
}
