use actix_web::{web, HttpResponse, Responder};
use bson::doc;
use chrono::Utc;
use mongodb::{bson::oid::ObjectId, Client, Collection};
use std::sync::Arc;

use crate::models::participants::SellingPrices;
use crate::models::quote::GroupQuote;
use crate::models::tier::AddTierInput;
use crate::services::tier_service::TierService;

fn quotes_collection(client: &Arc<Client>) -> Collection<GroupQuote> {
    client.database("Quotes").collection("GroupQuotes")
}

/*
    POST /api/quotes/{id}/tiers
*/
pub async fn add_tier(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<AddTierInput>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = quotes_collection(&client);

    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    match collection.find_one(doc! { "_id": id }).await {
        Ok(Some(mut quote)) => {
            let tier = TierService::build_tier(
                &quote.categories,
                &quote.participants,
                &quote.selling_prices,
                input.participant_count,
            );
            quote.tiers.push(tier.clone());
            quote.updated_at = Some(Utc::now());

            match collection.replace_one(doc! { "_id": id }, &quote).await {
                Ok(_) => HttpResponse::Ok().json(tier),
                Err(err) => {
                    eprintln!("Failed to store tier: {:?}", err);
                    HttpResponse::InternalServerError().body("Failed to store tier")
                }
            }
        }
        Ok(None) => HttpResponse::NotFound().body("Quote not found"),
        Err(err) => {
            eprintln!("Failed to retrieve quote: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve quote")
        }
    }
}

/*
    PUT /api/quotes/{id}/tiers/{tier_id}/selling-prices
*/
pub async fn update_selling_prices(
    path: web::Path<(String, String)>,
    data: web::Data<Arc<Client>>,
    input: web::Json<SellingPrices>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = quotes_collection(&client);
    let (quote_id, tier_id) = path.into_inner();

    let id: ObjectId = match ObjectId::parse_str(quote_id.as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    match collection.find_one(doc! { "_id": id }).await {
        Ok(Some(mut quote)) => {
            let tier = match quote.tiers.iter_mut().find(|tier| tier.id == tier_id) {
                Some(tier) => tier,
                None => return HttpResponse::NotFound().body("Tier not found"),
            };

            tier.selling_prices = input.into_inner();
            TierService::recompute_profits(tier);
            let updated = tier.clone();
            quote.updated_at = Some(Utc::now());

            match collection.replace_one(doc! { "_id": id }, &quote).await {
                Ok(_) => HttpResponse::Ok().json(updated),
                Err(err) => {
                    eprintln!("Failed to store tier prices: {:?}", err);
                    HttpResponse::InternalServerError().body("Failed to store tier prices")
                }
            }
        }
        Ok(None) => HttpResponse::NotFound().body("Quote not found"),
        Err(err) => {
            eprintln!("Failed to retrieve quote: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve quote")
        }
    }
}

/*
    DELETE /api/quotes/{id}/tiers/{tier_id}
*/
pub async fn delete_tier(
    path: web::Path<(String, String)>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = quotes_collection(&client);
    let (quote_id, tier_id) = path.into_inner();

    let id: ObjectId = match ObjectId::parse_str(quote_id.as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    match collection.find_one(doc! { "_id": id }).await {
        Ok(Some(mut quote)) => {
            let before = quote.tiers.len();
            quote.tiers.retain(|tier| tier.id != tier_id);

            if quote.tiers.len() == before {
                return HttpResponse::NotFound().body("Tier not found");
            }
            quote.updated_at = Some(Utc::now());

            match collection.replace_one(doc! { "_id": id }, &quote).await {
                Ok(_) => HttpResponse::Ok().body("Tier deleted"),
                Err(err) => {
                    eprintln!("Failed to delete tier: {:?}", err);
                    HttpResponse::InternalServerError().body("Failed to delete tier")
                }
            }
        }
        Ok(None) => HttpResponse::NotFound().body("Quote not found"),
        Err(err) => {
            eprintln!("Failed to retrieve quote: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve quote")
        }
    }
}
