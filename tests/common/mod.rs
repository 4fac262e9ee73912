use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, Responder};
use std::sync::Arc;

pub struct TestApp {
    pub client: Arc<mongodb::Client>,
}

impl TestApp {
    pub async fn new() -> Self {
        let mongo_uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        // Lazy client: nothing connects until a handler actually runs a query,
        // so the suite works without a running MongoDB.
        let client = mongodb::Client::with_uri_str(&mongo_uri)
            .await
            .expect("Failed to parse MongoDB URI");

        Self {
            client: Arc::new(client),
        }
    }

    // Mirrors the route tree in main.rs with mock handlers so the suite can
    // assert routing shape and auth behavior without live services.
    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.client.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/auth")
                            .route("/signup", web::post().to(signup))
                            .route("/signin", web::post().to(signin))
                            .route("/session", web::get().to(unauthorized_handler)),
                    )
                    .route("/resources/search", web::get().to(search_resources))
                    .service(
                        web::scope("/quotes")
                            .route("", web::get().to(unauthorized_handler))
                            .route("", web::post().to(unauthorized_handler))
                            .route("/{id}", web::get().to(unauthorized_handler))
                            .route("/{id}", web::put().to(unauthorized_handler))
                            .route("/{id}", web::delete().to(unauthorized_handler))
                            .route("/{id}/edits", web::post().to(unauthorized_handler))
                            .route("/{id}/pricing", web::get().to(unauthorized_handler))
                            .route("/{id}/itinerary-import", web::post().to(unauthorized_handler))
                            .route("/{id}/tiers", web::post().to(unauthorized_handler))
                            .route(
                                "/{id}/tiers/{tier_id}/selling-prices",
                                web::put().to(unauthorized_handler),
                            )
                            .route("/{id}/tiers/{tier_id}", web::delete().to(unauthorized_handler)),
                    )
                    .service(
                        web::scope("/quick-quotes")
                            .route("", web::get().to(unauthorized_handler))
                            .route("", web::post().to(unauthorized_handler))
                            .route("/{id}", web::get().to(unauthorized_handler))
                            .route("/{id}", web::put().to(unauthorized_handler))
                            .route("/{id}", web::delete().to(unauthorized_handler)),
                    ),
            )
    }
}

// Mock handler functions for testing
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({"status": "ok"}))
}

async fn signup() -> impl Responder {
    HttpResponse::BadRequest().json(serde_json::json!({"error": "Invalid input"}))
}

async fn signin() -> impl Responder {
    HttpResponse::Unauthorized().json(serde_json::json!({"error": "Invalid credentials"}))
}

async fn search_resources() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!([]))
}

async fn unauthorized_handler() -> impl Responder {
    HttpResponse::Unauthorized().json(serde_json::json!({"error": "Unauthorized"}))
}

pub fn get_test_email() -> String {
    "test@example.com".to_string()
}

pub fn get_test_password() -> String {
    "testpassword123".to_string()
}
