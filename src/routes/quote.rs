use actix_web::{web, HttpResponse, Responder};
use bson::doc;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{bson::oid::ObjectId, Client, Collection};
use std::sync::Arc;

use crate::models::itinerary::ImportItinerary;
use crate::models::quote::{CreateQuoteInput, GroupQuote, QuoteSummary, UpdateQuoteInput};
use crate::services::category_service::{CategoryService, QuoteEdit, QuoteState};
use crate::services::itinerary_import_service::ItineraryImportService;
use crate::services::pricing_service::PricingService;
use crate::services::quote_service::QuoteService;

fn quotes_collection(client: &Arc<Client>) -> Collection<GroupQuote> {
    client.database("Quotes").collection("GroupQuotes")
}

/*
    GET /api/quotes
*/
pub async fn get_all(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = quotes_collection(&client);

    let cursor = collection
        .find(doc! {})
        .sort(doc! { "updated_at": -1 })
        .limit(100)
        .await;

    match cursor {
        Ok(cursor) => match cursor.try_collect::<Vec<GroupQuote>>().await {
            Ok(quotes) => {
                let summaries: Vec<QuoteSummary> =
                    quotes.iter().map(|quote| quote.summary()).collect();
                HttpResponse::Ok().json(summaries)
            }
            Err(err) => {
                eprintln!("Failed to collect quotes: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to process quotes")
            }
        },
        Err(err) => {
            eprintln!("Failed to retrieve quotes: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve quotes")
        }
    }
}

/*
    POST /api/quotes
*/
pub async fn create(
    data: web::Data<Arc<Client>>,
    input: web::Json<CreateQuoteInput>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = quotes_collection(&client);

    let mut quote = QuoteService::new_quote(input.into_inner());

    match collection.insert_one(&quote).await {
        Ok(result) => {
            quote.id = result.inserted_id.as_object_id();
            HttpResponse::Ok().json(quote)
        }
        Err(err) => {
            eprintln!("Failed to insert quote: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create quote")
        }
    }
}

/*
    GET /api/quotes/{id}
*/
pub async fn get_by_id(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = quotes_collection(&client);

    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    match collection.find_one(doc! { "_id": id }).await {
        Ok(Some(quote)) => HttpResponse::Ok().json(quote),
        Ok(None) => HttpResponse::NotFound().body("Quote not found"),
        Err(err) => {
            eprintln!("Failed to retrieve quote: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve quote")
        }
    }
}

/*
    PUT /api/quotes/{id} (header fields only; items go through /edits)
*/
pub async fn update(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<UpdateQuoteInput>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = quotes_collection(&client);

    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    match collection.find_one(doc! { "_id": id }).await {
        Ok(Some(mut quote)) => {
            QuoteService::apply_header_update(&mut quote, input.into_inner());

            match collection.replace_one(doc! { "_id": id }, &quote).await {
                Ok(_) => HttpResponse::Ok().json(quote),
                Err(err) => {
                    eprintln!("Failed to update quote: {:?}", err);
                    HttpResponse::InternalServerError().body("Failed to update quote")
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
    DELETE /api/quotes/{id}
*/
pub async fn delete(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = quotes_collection(&client);

    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    match collection.delete_one(doc! { "_id": id }).await {
        Ok(result) => {
            if result.deleted_count == 0 {
                HttpResponse::NotFound().body("Quote not found")
            } else {
                HttpResponse::Ok().body("Quote deleted")
            }
        }
        Err(err) => {
            eprintln!("Failed to delete quote: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to delete quote")
        }
    }
}

/*
    POST /api/quotes/{id}/edits

    One edit per request. The reducer recomputes the touched item, the
    guide-share ripple and the category totals before the quote is stored.
*/
pub async fn apply_edit(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<QuoteEdit>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = quotes_collection(&client);

    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    match collection.find_one(doc! { "_id": id }).await {
        Ok(Some(mut quote)) => {
            let state = QuoteState::from_quote(&quote);
            let next = CategoryService::apply_edit(&state, input.into_inner());
            next.apply_to(&mut quote);
            quote.updated_at = Some(Utc::now());

            match collection.replace_one(doc! { "_id": id }, &quote).await {
                Ok(_) => HttpResponse::Ok().json(quote),
                Err(err) => {
                    eprintln!("Failed to store edited quote: {:?}", err);
                    HttpResponse::InternalServerError().body("Failed to store edited quote")
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
    GET /api/quotes/{id}/pricing
*/
pub async fn pricing(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = quotes_collection(&client);

    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    match collection.find_one(doc! { "_id": id }).await {
        Ok(Some(quote)) => {
            let pricing = PricingService::quote_pricing(
                &quote.categories,
                &quote.participants,
                &quote.selling_prices,
            );
            HttpResponse::Ok().json(pricing)
        }
        Ok(None) => HttpResponse::NotFound().body("Quote not found"),
        Err(err) => {
            eprintln!("Failed to retrieve quote: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve quote")
        }
    }
}

/*
    POST /api/quotes/{id}/itinerary-import
*/
pub async fn import_itinerary(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<ImportItinerary>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = quotes_collection(&client);

    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    match collection.find_one(doc! { "_id": id }).await {
        Ok(Some(mut quote)) => {
            let state = QuoteState::from_quote(&quote);
            let next = ItineraryImportService::seed_items(&state, &input.days);
            next.apply_to(&mut quote);
            quote.updated_at = Some(Utc::now());

            match collection.replace_one(doc! { "_id": id }, &quote).await {
                Ok(_) => HttpResponse::Ok().json(quote),
                Err(err) => {
                    eprintln!("Failed to store imported items: {:?}", err);
                    HttpResponse::InternalServerError().body("Failed to store imported items")
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
