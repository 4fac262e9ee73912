use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

mod db;
mod middleware;
mod models;
mod routes;
mod services;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    println!("Logger initialized");

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);
    println!("Attempting to bind to {}:{}", host, port);

    let mongo_uri = std::env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    println!("Got MongoDB URI, attempting connection...");
    let client = db::mongo::create_mongo_client(&mongo_uri).await;
    println!("MongoDB connection established");

    println!("Starting HTTP server...");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .route("/health", web::get().to(routes::health::health_check))
            .app_data(web::Data::new(client.clone()))
            .service(
                web::scope("/api")
                    // Public routes
                    .service(
                        web::scope("/auth")
                            .route("/signup", web::post().to(routes::auth::signup))
                            .route("/signin", web::post().to(routes::auth::signin))
                            .service(
                                web::scope("").wrap(middleware::auth::AuthMiddleware).route(
                                    "/session",
                                    web::get().to(routes::auth::user_session),
                                ),
                            ),
                    )
                    .route(
                        "/resources/search",
                        web::get().to(routes::resource::search),
                    )
                    // Protected routes
                    .service(
                        web::scope("")
                            .wrap(middleware::auth::AuthMiddleware)
                            .service(
                                web::scope("/quotes")
                                    .route("", web::get().to(routes::quote::get_all))
                                    .route("", web::post().to(routes::quote::create))
                                    .route("/{id}", web::get().to(routes::quote::get_by_id))
                                    .route("/{id}", web::put().to(routes::quote::update))
                                    .route("/{id}", web::delete().to(routes::quote::delete))
                                    .route("/{id}/edits", web::post().to(routes::quote::apply_edit))
                                    .route("/{id}/pricing", web::get().to(routes::quote::pricing))
                                    .route(
                                        "/{id}/itinerary-import",
                                        web::post().to(routes::quote::import_itinerary),
                                    )
                                    .route("/{id}/tiers", web::post().to(routes::tier::add_tier))
                                    .route(
                                        "/{id}/tiers/{tier_id}/selling-prices",
                                        web::put().to(routes::tier::update_selling_prices),
                                    )
                                    .route(
                                        "/{id}/tiers/{tier_id}",
                                        web::delete().to(routes::tier::delete_tier),
                                    ),
                            )
                            .service(
                                web::scope("/quick-quotes")
                                    .route("", web::get().to(routes::quick_quote::get_all))
                                    .route("", web::post().to(routes::quick_quote::create))
                                    .route("/{id}", web::get().to(routes::quick_quote::get_by_id))
                                    .route("/{id}", web::put().to(routes::quick_quote::update))
                                    .route("/{id}", web::delete().to(routes::quick_quote::delete)),
                            ),
                    ),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
