use serde_json::Value;

use crate::helpers::{TestApp, PASSWORD};

#[actix_web::test]
async fn signup_returns_token_and_client_profile(){
    let app = TestApp::spawn_app().await;

    let response = app.post_signup(&serde_json::json!({
        "email": "Jean.Dupont@Example.com",
        "password": PASSWORD,
        "fname": "Jean",
        "lname": "Dupont"
    }))
    .await;

    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.unwrap();
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["email"], "jean.dupont@example.com");
    assert_eq!(body["user"]["role"], "client");
    assert_eq!(body["user"]["fname"], "Jean");
    assert!(body["user"].get("password_hash").is_none());
}

#[actix_web::test]
async fn signup_with_taken_email_is_rejected(){
    let app = TestApp::spawn_app().await;
    app.client_token("jean@example.com").await;

    let response = app.post_signup(&serde_json::json!({
        "email": "jean@example.com",
        "password": PASSWORD,
        "fname": "Other",
        "lname": "Person"
    }))
    .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
async fn signup_with_invalid_data_is_rejected(){
    let app = TestApp::spawn_app().await;

    let cases = [
        (serde_json::json!({"email": "not-an-email", "password": PASSWORD, "fname": "A", "lname": "B"}), "invalid email"),
        (serde_json::json!({"email": "a@example.com", "password": "123", "fname": "A", "lname": "B"}), "short password"),
        (serde_json::json!({"email": "a@example.com", "password": PASSWORD, "fname": " ", "lname": "B"}), "blank first name"),
        (serde_json::json!({"email": "a@example.com", "password": PASSWORD}), "missing names"),
    ];

    for (body, description) in cases {
        let response = app.post_signup(&body).await;
        assert_eq!(response.status().as_u16(), 400, "Signup did not fail with {}", description);

        let body: Value = response.json().await.unwrap();
        assert!(body["message"].as_str().is_some());
    }
}

#[actix_web::test]
async fn login_failures_share_one_answer(){
    let app = TestApp::spawn_app().await;
    app.client_token("jean@example.com").await;

    let wrong_password = app.post_login(&serde_json::json!({
        "email": "jean@example.com",
        "password": "wrong-password"
    }))
    .await;

    let unknown_email = app.post_login(&serde_json::json!({
        "email": "nobody@example.com",
        "password": PASSWORD
    }))
    .await;

    assert_eq!(wrong_password.status().as_u16(), 401);
    assert_eq!(unknown_email.status().as_u16(), 401);

    let first: Value = wrong_password.json().await.unwrap();
    let second: Value = unknown_email.json().await.unwrap();
    assert_eq!(first["message"], second["message"]);
}

#[actix_web::test]
async fn profile_requires_a_valid_token(){
    let app = TestApp::spawn_app().await;
    let token = app.client_token("jean@example.com").await;

    assert_eq!(app.get("/api/profile", None).await.status().as_u16(), 401);
    assert_eq!(app.get("/api/profile", Some("garbage")).await.status().as_u16(), 401);

    let response = app.get("/api/profile", Some(&token)).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"]["email"], "jean@example.com");
}
