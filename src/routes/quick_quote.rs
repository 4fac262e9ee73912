use actix_web::{web, HttpResponse, Responder};
use bson::doc;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{bson::oid::ObjectId, Client, Collection};
use std::sync::Arc;

use crate::models::quick_quote::QuickQuote;

fn quick_quotes_collection(client: &Arc<Client>) -> Collection<QuickQuote> {
    client.database("Quotes").collection("QuickQuotes")
}

/*
    GET /api/quick-quotes
*/
pub async fn get_all(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = quick_quotes_collection(&client);

    let cursor = collection
        .find(doc! {})
        .sort(doc! { "updated_at": -1 })
        .limit(100)
        .await;

    match cursor {
        Ok(cursor) => match cursor.try_collect::<Vec<QuickQuote>>().await {
            Ok(quotes) => HttpResponse::Ok().json(quotes),
            Err(err) => {
                eprintln!("Failed to collect quick quotes: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to process quick quotes")
            }
        },
        Err(err) => {
            eprintln!("Failed to retrieve quick quotes: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve quick quotes")
        }
    }
}

/*
    POST /api/quick-quotes

    Totals are always re-derived on the server before the sheet is stored.
*/
pub async fn create(
    data: web::Data<Arc<Client>>,
    input: web::Json<QuickQuote>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = quick_quotes_collection(&client);

    let mut quote = input.into_inner();
    quote.id = None;
    quote.recompute_totals();
    quote.created_at = Some(Utc::now());
    quote.updated_at = Some(Utc::now());

    match collection.insert_one(&quote).await {
        Ok(result) => {
            quote.id = result.inserted_id.as_object_id();
            HttpResponse::Ok().json(quote)
        }
        Err(err) => {
            eprintln!("Failed to insert quick quote: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create quick quote")
        }
    }
}

/*
    GET /api/quick-quotes/{id}
*/
pub async fn get_by_id(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = quick_quotes_collection(&client);

    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    match collection.find_one(doc! { "_id": id }).await {
        Ok(Some(quote)) => HttpResponse::Ok().json(quote),
        Ok(None) => HttpResponse::NotFound().body("Quick quote not found"),
        Err(err) => {
            eprintln!("Failed to retrieve quick quote: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve quick quote")
        }
    }
}

/*
    PUT /api/quick-quotes/{id}
*/
pub async fn update(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<QuickQuote>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = quick_quotes_collection(&client);

    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    match collection.find_one(doc! { "_id": id }).await {
        Ok(Some(existing)) => {
            let mut quote = input.into_inner();
            quote.id = Some(id);
            quote.recompute_totals();
            quote.created_at = existing.created_at;
            quote.updated_at = Some(Utc::now());

            match collection.replace_one(doc! { "_id": id }, &quote).await {
                Ok(_) => HttpResponse::Ok().json(quote),
                Err(err) => {
                    eprintln!("Failed to update quick quote: {:?}", err);
                    HttpResponse::InternalServerError().body("Failed to update quick quote")
                }
            }
        }
        Ok(None) => HttpResponse::NotFound().body("Quick quote not found"),
        Err(err) => {
            eprintln!("Failed to retrieve quick quote: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve quick quote")
        }
    }
}

/*
    DELETE /api/quick-quotes/{id}
*/
pub async fn delete(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = quick_quotes_collection(&client);

    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    match collection.delete_one(doc! { "_id": id }).await {
        Ok(result) => {
            if result.deleted_count == 0 {
                HttpResponse::NotFound().body("Quick quote not found")
            } else {
                HttpResponse::Ok().body("Quick quote deleted")
            }
        }
        Err(err) => {
            eprintln!("Failed to delete quick quote: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to delete quick quote")
        }
    }
}
