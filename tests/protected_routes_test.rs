mod common;

use actix_web::{http::header, test, web, App, HttpResponse, Responder};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use serial_test::serial;

use common::{get_test_email, TestApp};
use tourdesk_api::middleware::auth::{AuthMiddleware, AuthenticatedUser, Claims};

#[actix_rt::test]
#[serial]
async fn test_quote_routes_require_auth() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let quote_id = "64f0aa00bb11cc22dd33ee44";

    let req = test::TestRequest::get().uri("/api/quotes").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::post()
        .uri("/api/quotes")
        .set_json(&json!({"title": "沖繩五日"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::post()
        .uri(&format!("/api/quotes/{}/edits", quote_id))
        .set_json(&json!({
            "op": "set_participants",
            "counts": {"adult": 10, "child_with_bed": 2, "child_no_bed": 1, "infant": 0, "single_room": 1}
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::get()
        .uri(&format!("/api/quotes/{}/pricing", quote_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::post()
        .uri(&format!("/api/quotes/{}/tiers", quote_id))
        .set_json(&json!({"participant_count": 20}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn test_quick_quote_routes_require_auth() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/quick-quotes").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::post()
        .uri("/api/quick-quotes")
        .set_json(&json!({"title": "一日遊報價", "items": []}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn test_get_session_without_auth() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/auth/session").to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

// The remaining tests run the real middleware over a local handler using
// the AuthenticatedUser extractor, the same surface the session route reads.

async fn whoami(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().body(format!("{} {}", user.user_id, user.email))
}

fn issue_token(secret: &str, user_id: &str, expires_in: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: get_test_email(),
        exp: (now + expires_in) as usize,
        iat: now as usize,
        user_id: user_id.to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to encode test token")
}

#[actix_rt::test]
#[serial]
async fn test_middleware_rejects_missing_header() {
    let app = test::init_service(
        App::new().service(
            web::scope("/api")
                .wrap(AuthMiddleware)
                .route("/whoami", web::get().to(whoami)),
        ),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/whoami").to_request();
    let err = test::try_call_service(&app, req)
        .await
        .err()
        .expect("request without a token should be rejected");
    assert_eq!(err.error_response().status(), 401);
}

#[actix_rt::test]
#[serial]
async fn test_middleware_rejects_bad_token() {
    std::env::set_var("JWT_SECRET", "test_secret");

    let app = test::init_service(
        App::new().service(
            web::scope("/api")
                .wrap(AuthMiddleware)
                .route("/whoami", web::get().to(whoami)),
        ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/whoami")
        .insert_header((header::AUTHORIZATION, "Bearer not.a.jwt"))
        .to_request();
    let err = test::try_call_service(&app, req)
        .await
        .err()
        .expect("garbage token should be rejected");
    assert_eq!(err.error_response().status(), 401);

    // Signed with the wrong secret.
    let forged = issue_token("some_other_secret", "64f0aa00bb11cc22dd33ee44", 3600);
    let req = test::TestRequest::get()
        .uri("/api/whoami")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", forged)))
        .to_request();
    let err = test::try_call_service(&app, req)
        .await
        .err()
        .expect("forged token should be rejected");
    assert_eq!(err.error_response().status(), 401);
}

#[actix_rt::test]
#[serial]
async fn test_middleware_rejects_expired_token() {
    std::env::set_var("JWT_SECRET", "test_secret");

    let app = test::init_service(
        App::new().service(
            web::scope("/api")
                .wrap(AuthMiddleware)
                .route("/whoami", web::get().to(whoami)),
        ),
    )
    .await;

    // Well past the default validation leeway.
    let expired = issue_token("test_secret", "64f0aa00bb11cc22dd33ee44", -3600);
    let req = test::TestRequest::get()
        .uri("/api/whoami")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", expired)))
        .to_request();
    let err = test::try_call_service(&app, req)
        .await
        .err()
        .expect("expired token should be rejected");
    assert_eq!(err.error_response().status(), 401);
}

#[actix_rt::test]
#[serial]
async fn test_middleware_passes_identity_to_handler() {
    std::env::set_var("JWT_SECRET", "test_secret");

    let app = test::init_service(
        App::new().service(
            web::scope("/api")
                .wrap(AuthMiddleware)
                .route("/whoami", web::get().to(whoami)),
        ),
    )
    .await;

    let token = issue_token("test_secret", "64f0aa00bb11cc22dd33ee44", 3600);
    let req = test::TestRequest::get()
        .uri("/api/whoami")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    // user_id and email both come out of the validated claims.
    let body = test::read_body(resp).await;
    assert_eq!(
        body,
        format!("64f0aa00bb11cc22dd33ee44 {}", get_test_email())
    );
}
