/*!
 * Tests for error classification and conversion
 */

use std::time::Duration;
use contextual_translator::errors::{ProviderError, SessionError, SpeechError};

#[test]
fn test_fromStatus_withAuthCodes_shouldBeAuthenticationError() {
    assert!(matches!(ProviderError::from_status(401, "bad key"), ProviderError::AuthenticationError(_)));
    assert!(matches!(ProviderError::from_status(403, "forbidden"), ProviderError::AuthenticationError(_)));
}

#[test]
fn test_fromStatus_with429_shouldBeRateLimit() {
    assert!(matches!(ProviderError::from_status(429, "slow down"), ProviderError::RateLimitExceeded(_)));
}

#[test]
fn test_fromStatus_withServerError_shouldKeepStatus() {
    match ProviderError::from_status(503, "overloaded") {
        ProviderError::ApiError { status_code, message } => {
            assert_eq!(status_code, 503);
            assert_eq!(message, "overloaded");
        }
        other => panic!("unexpected variant: {:?}", other),
    }
}

#[test]
fn test_providerError_display_shouldDescribeTimeout() {
    let err = ProviderError::Timeout(Duration::from_secs(5));
    assert_eq!(err.to_string(), "Request timed out after 5s");
}

#[test]
fn test_sessionError_fromSpeechError_shouldKeepMessage() {
    let err = SessionError::from(SpeechError::UnsupportedLanguage { language: "klingon".to_string() });
    assert!(err.to_string().contains("klingon"));
}
