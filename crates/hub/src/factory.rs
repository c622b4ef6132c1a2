//! Hub client factory.
//!
//! Creates a registry client from the configured provider name, endpoint and
//! API key.

use crate::client::HubClient;
use crate::providers::LangSmithClient;
use crate::types::ProviderType;
use std::sync::Arc;

/// Create a hub client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("langsmith")
/// * `endpoint` - Optional custom API endpoint
/// * `api_key` - API key; every provider requires one
///
/// # Errors
/// Returns an error if the provider is unknown or the API key is missing.
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> Result<Arc<dyn HubClient>, String> {
    match ProviderType::parse(provider) {
        Some(ProviderType::LangSmith) => {
            let api_key = api_key
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| "LangSmith provider requires API key".to_string())?;
            let client = match endpoint {
                Some(endpoint) => LangSmithClient::with_base_url(endpoint, api_key),
                None => LangSmithClient::new(api_key),
            };
            Ok(Arc::new(client))
        }
        None => Err(format!("Unknown provider: {}", provider)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_langsmith_client() {
        let client = create_client("langsmith", None, Some("key")).unwrap();
        assert_eq!(client.provider_name(), "langsmith");
    }

    #[test]
    fn test_create_with_custom_endpoint() {
        let client = create_client("langsmith", Some("http://localhost:1984"), Some("key"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_langsmith_requires_api_key() {
        for key in [None, Some(""), Some("  ")] {
            match create_client("langsmith", None, key) {
                Err(err) => assert!(err.contains("requires API key")),
                Ok(_) => panic!("Expected error without API key"),
            }
        }
    }

    #[test]
    fn test_unknown_provider() {
        match create_client("unknown", None, Some("key")) {
            Err(err) => assert!(err.contains("Unknown provider")),
            Ok(_) => panic!("Expected error for unknown provider"),
        }
    }
}
