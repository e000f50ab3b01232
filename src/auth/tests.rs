//! Tests for the auth module

use super::*;
use crate::catalog::AuthDefinition;
use crate::template::TemplateContext;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn build_headers(auth: &Authenticator) -> reqwest::header::HeaderMap {
    let client = reqwest::Client::new();
    let req = client.get("https://open.example.com/ping");
    let req = tokio_test::block_on(auth.apply(req)).unwrap();
    req.build().unwrap().headers().clone()
}

#[test]
fn test_apply_none_adds_nothing() {
    let auth = Authenticator::new(AuthConfig::None);
    let headers = build_headers(&auth);
    assert!(headers.get("authorization").is_none());
}

#[test]
fn test_apply_bearer() {
    let auth = Authenticator::new(AuthConfig::Bearer {
        token: "tok_123".to_string(),
    });
    let headers = build_headers(&auth);
    assert_eq!(headers.get("authorization").unwrap(), "Bearer tok_123");
}

#[test]
fn test_apply_api_key_with_prefix() {
    let auth = Authenticator::new(AuthConfig::ApiKey {
        header_name: "X-Api-Key".to_string(),
        prefix: Some("Key ".to_string()),
        value: "secret".to_string(),
    });
    let headers = build_headers(&auth);
    assert_eq!(headers.get("X-Api-Key").unwrap(), "Key secret");
}

#[test]
fn test_apply_api_key_without_prefix() {
    let auth = Authenticator::new(AuthConfig::ApiKey {
        header_name: "X-Api-Key".to_string(),
        prefix: None,
        value: "secret".to_string(),
    });
    let headers = build_headers(&auth);
    assert_eq!(headers.get("X-Api-Key").unwrap(), "secret");
}

#[tokio::test]
async fn test_app_token_exchange() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v3/tenant_access_token"))
        .and(body_json(json!({
            "app_id": "cli_a1",
            "app_secret": "s3cret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "msg": "ok",
            "tenant_access_token": "t-abc",
            "expire": 7200
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::AppToken {
        token_url: format!("{}/auth/v3/tenant_access_token", mock_server.uri()),
        app_id: "cli_a1".to_string(),
        app_secret: "s3cret".to_string(),
    });

    let client = reqwest::Client::new();
    let req = auth
        .apply(client.get("https://open.example.com/ping"))
        .await
        .unwrap();
    let headers = req.build().unwrap().headers().clone();
    assert_eq!(headers.get("authorization").unwrap(), "Bearer t-abc");
}

#[tokio::test]
async fn test_app_token_is_cached() {
    let mock_server = MockServer::start().await;

    // A second apply must reuse the cached token, not hit the endpoint again
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "tenant_access_token": "t-abc",
            "expire": 7200
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::AppToken {
        token_url: format!("{}/token", mock_server.uri()),
        app_id: "a".to_string(),
        app_secret: "b".to_string(),
    });

    let client = reqwest::Client::new();
    for _ in 0..3 {
        auth.apply(client.get("https://open.example.com/ping"))
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn test_app_token_refreshes_after_clear() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "tenant_access_token": "t-abc",
            "expire": 7200
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::AppToken {
        token_url: format!("{}/token", mock_server.uri()),
        app_id: "a".to_string(),
        app_secret: "b".to_string(),
    });

    let client = reqwest::Client::new();
    auth.apply(client.get("https://open.example.com/ping"))
        .await
        .unwrap();
    auth.clear_cache().await;
    auth.apply(client.get("https://open.example.com/ping"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_app_token_provider_error_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 10003,
            "msg": "invalid app_secret"
        })))
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::AppToken {
        token_url: format!("{}/token", mock_server.uri()),
        app_id: "a".to_string(),
        app_secret: "wrong".to_string(),
    });

    let client = reqwest::Client::new();
    let err = auth
        .apply(client.get("https://open.example.com/ping"))
        .await
        .unwrap_err();
    assert!(matches!(err, crate::error::Error::TokenRefresh { .. }));
    assert!(err.to_string().contains("invalid app_secret"));
}

#[tokio::test]
async fn test_app_token_http_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::AppToken {
        token_url: format!("{}/token", mock_server.uri()),
        app_id: "a".to_string(),
        app_secret: "b".to_string(),
    });

    let client = reqwest::Client::new();
    let err = auth
        .apply(client.get("https://open.example.com/ping"))
        .await
        .unwrap_err();
    assert!(matches!(err, crate::error::Error::TokenRefresh { .. }));
}

// ============================================================================
// Config resolution
// ============================================================================

#[test]
fn test_resolve_bearer_from_definition() {
    let def = AuthDefinition::Bearer {
        token: "{{ config.token }}".to_string(),
    };
    let mut ctx = TemplateContext::new();
    ctx.set_config(json!({ "token": "tok_9" }));

    match AuthConfig::resolve(&def, &ctx).unwrap() {
        AuthConfig::Bearer { token } => assert_eq!(token, "tok_9"),
        other => panic!("Expected Bearer, got {other:?}"),
    }
}

#[test]
fn test_resolve_app_token_from_definition() {
    let def = AuthDefinition::AppToken {
        token_url: "https://open.example.com/auth".to_string(),
        app_id: "{{ config.app_id }}".to_string(),
        app_secret: "{{ config.app_secret }}".to_string(),
    };
    let mut ctx = TemplateContext::new();
    ctx.set_config(json!({ "app_id": "cli_1", "app_secret": "sec" }));

    match AuthConfig::resolve(&def, &ctx).unwrap() {
        AuthConfig::AppToken {
            app_id, app_secret, ..
        } => {
            assert_eq!(app_id, "cli_1");
            assert_eq!(app_secret, "sec");
        }
        other => panic!("Expected AppToken, got {other:?}"),
    }
}

#[test]
fn test_resolve_missing_config_value_errors() {
    let def = AuthDefinition::Bearer {
        token: "{{ config.token }}".to_string(),
    };
    let ctx = TemplateContext::new();
    assert!(AuthConfig::resolve(&def, &ctx).is_err());
}

// ============================================================================
// CachedToken
// ============================================================================

#[test]
fn test_cached_token_without_expiry_never_expires() {
    let token = CachedToken::new("t".to_string(), None);
    assert!(!token.is_expired());
}

#[test]
fn test_cached_token_expiry() {
    let fresh = CachedToken::expires_in("t".to_string(), 7200);
    assert!(!fresh.is_expired());

    // Inside the refresh margin counts as expired
    let stale = CachedToken::expires_in("t".to_string(), 30);
    assert!(stale.is_expired());
}
