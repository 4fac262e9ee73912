//! Place lookup for the quote sheet resource selectors.
//!
//! Restaurants, hotels and attractions are searched through the Google
//! Places text search API and cached in MongoDB so repeated lookups for the
//! same query do not burn API quota.
//!
//! Setup: enable the Places API in Google Cloud Console and set
//! `GOOGLE_PLACES_API_KEY`.

use mongodb::{bson::oid::ObjectId, Client, Collection};
use reqwest;
use serde::{Deserialize, Serialize};
use std::{env, sync::Arc, time::Duration};

use crate::models::cost::ResourceKind;

// Places change rarely; a week of caching is safe.
const CACHE_DURATION_SECS: i64 = 7 * 86400;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedResourceSearch {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub kind: String,
    pub query: String,
    pub results: Vec<ResourceCandidate>,
    pub cached_at: mongodb::bson::DateTime,
    pub expires_at: mongodb::bson::DateTime,
}

/// One selectable place, as handed to the quote sheet. Staff pick a
/// candidate and its fields get stamped onto the cost item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceCandidate {
    pub name: String,
    pub place_id: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GooglePlacesResponse {
    status: String,
    #[serde(default)]
    results: Vec<GooglePlaceResult>,
}

#[derive(Debug, Deserialize)]
struct GooglePlaceResult {
    name: String,
    place_id: Option<String>,
    formatted_address: Option<String>,
    geometry: Option<GooglePlaceGeometry>,
}

#[derive(Debug, Deserialize)]
struct GooglePlaceGeometry {
    location: GooglePlaceLocation,
}

#[derive(Debug, Deserialize)]
struct GooglePlaceLocation {
    lat: f64,
    lng: f64,
}

pub struct ResourceService {
    client: Arc<Client>,
    http_client: reqwest::Client,
    api_key: String,
}

impl ResourceService {
    pub fn new(client: Arc<Client>) -> Result<Self, Box<dyn std::error::Error>> {
        let api_key = env::var("GOOGLE_PLACES_API_KEY")
            .map_err(|_| "GOOGLE_PLACES_API_KEY environment variable not set")?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            http_client,
            api_key,
        })
    }

    /// Search places of one kind, cache-first.
    pub async fn search(
        &self,
        kind: ResourceKind,
        query: &str,
    ) -> Result<Vec<ResourceCandidate>, Box<dyn std::error::Error>> {
        if let Ok(Some(cached)) = self.get_cached_search(kind, query).await {
            println!("Using cached {} search for '{}'", kind.as_str(), query);
            return Ok(cached.results);
        }

        println!("Fetching {} search from Places API for '{}'", kind.as_str(), query);
        let results = self.fetch_from_places(kind, query).await?;

        if let Err(e) = self.cache_search(kind, query, &results).await {
            eprintln!("Failed to cache place search: {}", e);
        }

        Ok(results)
    }

    fn cache_collection(&self) -> Collection<CachedResourceSearch> {
        self.client.database("Resources").collection("PlaceCache")
    }

    async fn get_cached_search(
        &self,
        kind: ResourceKind,
        query: &str,
    ) -> mongodb::error::Result<Option<CachedResourceSearch>> {
        let filter = mongodb::bson::doc! {
            "kind": kind.as_str(),
            "query": query,
            "expires_at": { "$gt": mongodb::bson::DateTime::now() }
        };

        self.cache_collection().find_one(filter).await
    }

    async fn cache_search(
        &self,
        kind: ResourceKind,
        query: &str,
        results: &[ResourceCandidate],
    ) -> mongodb::error::Result<()> {
        let collection = self.cache_collection();

        // Drop stale entries for this key before inserting the fresh one.
        let _ = collection
            .delete_many(mongodb::bson::doc! {
                "kind": kind.as_str(),
                "query": query,
            })
            .await;

        let now = mongodb::bson::DateTime::now();
        let expires_at =
            mongodb::bson::DateTime::from_millis(now.timestamp_millis() + CACHE_DURATION_SECS * 1000);

        let cached = CachedResourceSearch {
            id: None,
            kind: kind.as_str().to_string(),
            query: query.to_string(),
            results: results.to_vec(),
            cached_at: now,
            expires_at,
        };

        collection.insert_one(cached).await?;
        Ok(())
    }

    async fn fetch_from_places(
        &self,
        kind: ResourceKind,
        query: &str,
    ) -> Result<Vec<ResourceCandidate>, Box<dyn std::error::Error>> {
        let place_type = match kind {
            ResourceKind::Restaurant => "restaurant",
            ResourceKind::Hotel => "lodging",
            ResourceKind::Attraction => "tourist_attraction",
        };

        let response = self
            .http_client
            .get("https://maps.googleapis.com/maps/api/place/textsearch/json")
            .query(&[
                ("query", query),
                ("type", place_type),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;
        let response_text = response.text().await?;

        let places_response: GooglePlacesResponse = serde_json::from_str(&response_text)
            .map_err(|e| format!("Failed to parse Places response: {}. Response: {}", e, response_text))?;

        if places_response.status != "OK" && places_response.status != "ZERO_RESULTS" {
            return Err(format!("Places API error: {}", places_response.status).into());
        }

        let candidates = places_response
            .results
            .into_iter()
            .map(|place| ResourceCandidate {
                name: place.name,
                place_id: place.place_id,
                lat: place.geometry.as_ref().map(|g| g.location.lat),
                lng: place.geometry.as_ref().map(|g| g.location.lng),
                address: place.formatted_address,
            })
            .collect();

        Ok(candidates)
    }
}
