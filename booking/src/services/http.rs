//! REST catalog client.
//!
//! The catalog API wraps every payload in a `{ "data": { ... } }` envelope and
//! uses its own field names; the DTOs below decode those and convert into the
//! catalog types.

use super::{CatalogFuture, CatalogResult, CatalogService};
use crate::catalog::{
    CateringPlan, CatererOption, PhotographerOption, PhotographyCategory, RoomClassListing,
    RoomListing, VenueCatalogEntry,
};
use crate::config::CatalogServiceConfig;
use crate::error::CatalogError;
use crate::types::{CatererId, Money, PhotographerId, VenueId};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Catalog service backed by the venue REST API
#[derive(Clone, Debug)]
pub struct HttpCatalogService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogService {
    /// Creates a client for the given base URL
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Configuration`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, config: &CatalogServiceConfig) -> CatalogResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CatalogError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str, venue_id: &VenueId) -> String {
        format!("{}/{path}/mandap/{venue_id}", self.base_url)
    }

    fn get<T, D>(&self, url: String) -> CatalogFuture<T>
    where
        D: DeserializeOwned + Into<T> + Send + 'static,
        T: Send + 'static,
    {
        let client = self.client.clone();

        Box::pin(async move {
            tracing::debug!(%url, "Fetching catalog");

            let response = client.get(&url).send().await?.error_for_status()?;
            let envelope: Envelope<D> = response.json().await?;

            Ok::<T, CatalogError>(envelope.data.into())
        })
    }
}

impl CatalogService for HttpCatalogService {
    fn fetch_venue(&self, venue_id: &VenueId) -> CatalogFuture<VenueCatalogEntry> {
        self.get::<_, MandapData>(self.url("mandaps", venue_id))
    }

    fn fetch_photographers(&self, venue_id: &VenueId) -> CatalogFuture<Vec<PhotographerOption>> {
        self.get::<_, PhotographersData>(self.url("photographers", venue_id))
    }

    fn fetch_caterers(&self, venue_id: &VenueId) -> CatalogFuture<Vec<CatererOption>> {
        self.get::<_, CaterersData>(self.url("caterers", venue_id))
    }

    fn fetch_rooms(&self, venue_id: &VenueId) -> CatalogFuture<RoomListing> {
        self.get::<_, RoomsData>(self.url("rooms", venue_id))
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct MandapData {
    mandap: MandapDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MandapDto {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    mandap_name: String,
    #[serde(default)]
    venue_pricing: u64,
}

impl From<MandapData> for VenueCatalogEntry {
    fn from(data: MandapData) -> Self {
        Self {
            id: VenueId::new(data.mandap.id),
            name: data.mandap.mandap_name,
            base_price: Money::from_rupees(data.mandap.venue_pricing),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PhotographersData {
    #[serde(default)]
    photographers: Vec<PhotographerDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PhotographerDto {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    photographer_name: String,
    #[serde(default)]
    photography_types: Vec<PhotographyTypeDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PhotographyTypeDto {
    phtype: String,
    #[serde(default)]
    price_per_event: u64,
}

impl From<PhotographersData> for Vec<PhotographerOption> {
    fn from(data: PhotographersData) -> Self {
        data.photographers
            .into_iter()
            .map(|dto| PhotographerOption {
                id: PhotographerId::new(dto.id),
                name: dto.photographer_name,
                categories: dto
                    .photography_types
                    .into_iter()
                    .map(|t| PhotographyCategory::new(t.phtype, Money::from_rupees(t.price_per_event)))
                    .collect(),
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct CaterersData {
    #[serde(default)]
    caterers: Vec<CatererDto>,
}

#[derive(Debug, Deserialize)]
struct CatererDto {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "catereName", default)]
    name: String,
    #[serde(default)]
    plans: Vec<PlanDto>,
}

#[derive(Debug, Deserialize)]
struct PlanDto {
    name: String,
    #[serde(default)]
    price: u64,
    #[serde(default)]
    items: Vec<String>,
}

impl From<CaterersData> for Vec<CatererOption> {
    fn from(data: CaterersData) -> Self {
        data.caterers
            .into_iter()
            .map(|dto| CatererOption {
                id: CatererId::new(dto.id),
                name: dto.name,
                plans: dto
                    .plans
                    .into_iter()
                    .map(|plan| CateringPlan {
                        name: plan.name,
                        price: Money::from_rupees(plan.price),
                        items: plan.items,
                    })
                    .collect(),
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct RoomsData {
    rooms: RoomsDto,
}

#[derive(Debug, Deserialize)]
struct RoomsDto {
    #[serde(rename = "AcRoom", default)]
    ac_room: Option<RoomClassDto>,
    #[serde(rename = "NonAcRoom", default)]
    non_ac_room: Option<RoomClassDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoomClassDto {
    #[serde(default)]
    no_of_rooms: u32,
    #[serde(default)]
    price_per_night: u64,
    #[serde(default)]
    amenities: Vec<String>,
    #[serde(default)]
    room_images: Vec<String>,
}

impl From<RoomClassDto> for RoomClassListing {
    fn from(dto: RoomClassDto) -> Self {
        Self {
            available: dto.no_of_rooms,
            price_per_night: Money::from_rupees(dto.price_per_night),
            amenities: dto.amenities,
            images: dto.room_images,
        }
    }
}

impl From<RoomsData> for RoomListing {
    fn from(data: RoomsData) -> Self {
        Self {
            ac: data.rooms.ac_room.map(Into::into),
            non_ac: data.rooms.non_ac_room.map(Into::into),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RoomClass;

    fn decode<D, T>(json: &str) -> Option<T>
    where
        D: DeserializeOwned + Into<T>,
    {
        serde_json::from_str::<Envelope<D>>(json)
            .ok()
            .map(|envelope| envelope.data.into())
    }

    #[test]
    fn test_decode_venue() {
        let venue: Option<VenueCatalogEntry> = decode::<MandapData, _>(
            r#"{"data":{"mandap":{"_id":"m-1","mandapName":"Lotus Mandap","venuePricing":50000}}}"#,
        );

        let venue = venue.unwrap_or_else(|| VenueCatalogEntry {
            id: VenueId::new(""),
            name: String::new(),
            base_price: Money::ZERO,
        });
        assert_eq!(venue.id, VenueId::new("m-1"));
        assert_eq!(venue.base_price, Money::from_rupees(50_000));
    }

    #[test]
    fn test_decode_photographers() {
        let photographers: Option<Vec<PhotographerOption>> = decode::<PhotographersData, _>(
            r#"{"data":{"photographers":[{
                "_id":"p-1",
                "photographerName":"John Doe Photography",
                "photographyTypes":[
                    {"phtype":"Candid","pricePerEvent":25000},
                    {"phtype":"Drone","pricePerEvent":30000}
                ]
            }]}}"#,
        );

        let photographers = photographers.unwrap_or_default();
        assert_eq!(photographers.len(), 1);
        assert_eq!(photographers[0].name, "John Doe Photography");
        assert_eq!(
            photographers[0].category("Drone").map(|c| c.price_per_event),
            Some(Money::from_rupees(30_000))
        );
    }

    #[test]
    fn test_decode_caterers() {
        let caterers: Option<Vec<CatererOption>> = decode::<CaterersData, _>(
            r#"{"data":{"caterers":[{
                "_id":"c-1",
                "catereName":"Royal Caterers",
                "plans":[{"name":"Basic","price":800,"items":["North Indian"]}]
            }]}}"#,
        );

        let caterers = caterers.unwrap_or_default();
        assert_eq!(caterers[0].id, CatererId::new("c-1"));
        assert_eq!(caterers[0].name, "Royal Caterers");
        assert_eq!(caterers[0].plan("Basic").map(|p| p.items.len()), Some(1));
    }

    #[test]
    fn test_decode_rooms_with_missing_class() {
        let rooms: Option<RoomListing> = decode::<RoomsData, _>(
            r#"{"data":{"rooms":{
                "AcRoom":{"noOfRooms":4,"pricePerNight":5000,"amenities":["TV"],"roomImages":["a.jpg","b.jpg"]}
            }}}"#,
        );

        let rooms = rooms.unwrap_or_default();
        assert_eq!(rooms.visible_classes(), vec![RoomClass::Ac]);
        assert_eq!(rooms.class(RoomClass::Ac).map(|l| l.images.len()), Some(2));
        assert!(rooms.non_ac.is_none());
    }

    #[test]
    fn test_urls_strip_trailing_slash() {
        let config = CatalogServiceConfig {
            base_url: None,
            timeout_secs: 1,
        };
        let service = HttpCatalogService::new("https://catalog.local/api/", &config);

        let url = service.map(|s| s.url("rooms", &VenueId::new("m-1")));
        assert_eq!(url.ok().as_deref(), Some("https://catalog.local/api/rooms/mandap/m-1"));
    }
}
