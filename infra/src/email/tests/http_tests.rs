use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tienda_core::services::{EmailMessage, EmailServiceTrait, EmailTemplate};

use crate::config::{EmailConfig, EmailProvider};
use crate::email::HttpEmailService;

fn config_for(server: &MockServer) -> EmailConfig {
    EmailConfig {
        provider: EmailProvider::Http,
        api_url: format!("{}/emails", server.uri()),
        api_key: "test-key".to_string(),
        from: "Tienda <no-reply@tienda.cl>".to_string(),
        timeout_seconds: 5,
    }
}

#[tokio::test]
async fn test_sends_template_and_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_json(json!({
            "from": "Tienda <no-reply@tienda.cl>",
            "to": ["ana@tienda.cl"],
            "subject": "Verify your email",
            "template": "verification-code",
            "code": "482913"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "msg_123" })))
        .expect(1)
        .mount(&server)
        .await;

    let service = HttpEmailService::new(&config_for(&server)).unwrap();
    let message = EmailMessage::new("ana@tienda.cl", EmailTemplate::VerificationCode).with_code("482913");

    assert_eq!(service.send(&message).await.unwrap(), "msg_123");
}

#[tokio::test]
async fn test_welcome_mail_omits_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({
            "from": "Tienda <no-reply@tienda.cl>",
            "to": ["ana@tienda.cl"],
            "subject": "Welcome to Tienda",
            "template": "welcome"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "msg_456" })))
        .mount(&server)
        .await;

    let service = HttpEmailService::new(&config_for(&server)).unwrap();
    let id = service
        .send(&EmailMessage::new("ana@tienda.cl", EmailTemplate::Welcome))
        .await
        .unwrap();
    assert_eq!(id, "msg_456");
}

#[tokio::test]
async fn test_provider_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(422).set_body_string("invalid recipient"))
        .mount(&server)
        .await;

    let service = HttpEmailService::new(&config_for(&server)).unwrap();
    let err = service
        .send(&EmailMessage::new("bad", EmailTemplate::Welcome))
        .await
        .unwrap_err();

    assert!(err.contains("422"));
    assert!(err.contains("invalid recipient"));
}
