// src/probe/mod.rs
mod error;
mod generative;
mod transcription;

pub use error::{CheckError, CheckErrorKind};
pub use generative::GenerativeProbe;
pub use transcription::TranscriptionProbe;

use crate::health::ServiceName;
use async_trait::async_trait;
use url::Url;

/// One authenticated round trip against an external service.
#[async_trait]
pub trait ServiceProbe: Send + Sync {
    fn service(&self) -> ServiceName;

    async fn authenticate_and_probe(&self) -> Result<(), CheckError>;
}

fn endpoint_url(base: &Url, path: &str) -> String {
    format!("{}/{}", base.as_str().trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_joins_without_double_slash() {
        let base = Url::parse("https://speech.googleapis.com").unwrap();
        assert_eq!(
            endpoint_url(&base, "/v1/operations"),
            "https://speech.googleapis.com/v1/operations"
        );

        let base = Url::parse("http://127.0.0.1:1234/proxy/").unwrap();
        assert_eq!(
            endpoint_url(&base, "v1beta/models/m:generateContent"),
            "http://127.0.0.1:1234/proxy/v1beta/models/m:generateContent"
        );
    }
}
