use actix_web::{web, HttpResponse, Responder};
use mongodb::Client;
use serde::Deserialize;
use std::sync::Arc;

use crate::models::cost::ResourceKind;
use crate::services::resource_service::ResourceService;

#[derive(Debug, Deserialize)]
pub struct ResourceSearchQuery {
    pub kind: ResourceKind,
    pub query: String,
}

/*
    GET /api/resources/search?kind=hotel&query=礁溪
*/
pub async fn search(
    data: web::Data<Arc<Client>>,
    params: web::Query<ResourceSearchQuery>,
) -> impl Responder {
    if params.query.trim().is_empty() {
        return HttpResponse::BadRequest().body("Query must not be empty");
    }

    let client = data.get_ref().clone();

    let service = match ResourceService::new(client) {
        Ok(service) => service,
        Err(err) => {
            eprintln!("Place search unavailable: {}", err);
            return HttpResponse::ServiceUnavailable().body("Place search is not configured");
        }
    };

    match service.search(params.kind, params.query.trim()).await {
        Ok(candidates) => HttpResponse::Ok().json(candidates),
        Err(err) => {
            eprintln!("Place search failed: {}", err);
            HttpResponse::InternalServerError().body("Place search failed")
        }
    }
}
