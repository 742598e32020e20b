// src/services/spot_service.rs
// DOCUMENTATION: Business logic for spots
// PURPOSE: Intermediary between handlers and the store client

use crate::errors::SpotsError;
use crate::models::geometry;
use crate::models::{CreateSpotRequest, NearQuery, NearSearch, NewSpotRow, SpotResponse};
use crate::services::SupabaseClient;
use geo_types::Point;
use uuid::Uuid;
use validator::Validate;

/// Near-search radius used when the query does not provide one
const DEFAULT_RADIUS_KM: f64 = 10.0;

pub struct SpotService;

impl SpotService {
    /// List all spots visible to the resolved identity
    pub async fn list_spots(store: &SupabaseClient) -> Result<Vec<SpotResponse>, SpotsError> {
        let rows = store.list_spots().await?;
        Ok(rows.into_iter().map(|row| row.into_response()).collect())
    }

    /// Proximity search through the store's spots_near procedure
    /// DOCUMENTATION: Validates coordinates before any remote call
    pub async fn near_spots(
        store: &SupabaseClient,
        query: &NearQuery,
    ) -> Result<Vec<SpotResponse>, SpotsError> {
        let search = parse_near_query(query)?;
        let rows = store.spots_near(&search).await?;
        Ok(rows.into_iter().map(|row| row.into_response()).collect())
    }

    /// Create a spot under the resolved caller identity
    /// DOCUMENTATION: Identity is confirmed first; field validation only runs
    /// for an authenticated caller, and no write is attempted on failure
    pub async fn create_spot(
        store: &SupabaseClient,
        req: CreateSpotRequest,
    ) -> Result<Option<SpotResponse>, SpotsError> {
        let user = store.current_user().await?;

        let row = build_new_spot(req, user.id)?;
        let inserted = store.insert_spot(&row).await?;

        if let Some(spot) = &inserted {
            log::info!("Created spot with id: {}", spot.id);
        }

        Ok(inserted.map(|row| row.into_response()))
    }
}

/// Parse and validate near-search query parameters
/// DOCUMENTATION: lat/lng are required numerics; radiusKm falls back to the
/// default when absent or unparseable
fn parse_near_query(query: &NearQuery) -> Result<NearSearch, SpotsError> {
    let lat = query.lat.as_deref().and_then(|v| v.parse::<f64>().ok());
    let lng = query.lng.as_deref().and_then(|v| v.parse::<f64>().ok());

    match (lat, lng) {
        (Some(lat), Some(lng)) => Ok(NearSearch {
            lat,
            lng,
            radius_km: query
                .radius_km
                .as_deref()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_RADIUS_KM),
        }),
        _ => Err(SpotsError::Validation(
            "lat and lng query parameters are required".to_string(),
        )),
    }
}

/// Build the insert payload for a resolved caller
fn build_new_spot(req: CreateSpotRequest, created_by: Uuid) -> Result<NewSpotRow, SpotsError> {
    req.validate()
        .map_err(|e| SpotsError::Validation(e.to_string()))?;

    let name = match req.name {
        Some(name) if !name.is_empty() => name,
        _ => return Err(SpotsError::Validation("name is required".to_string())),
    };

    let (lat, lng) = match (req.lat, req.lng) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => {
            return Err(SpotsError::Validation(
                "lat and lng must be numeric".to_string(),
            ))
        }
    };

    Ok(NewSpotRow {
        name,
        description: req.description,
        city: req.city,
        country: req.country,
        rating: req.rating,
        visibility: req.visibility.unwrap_or_else(|| "public".to_string()),
        location: geometry::encode_point(Point::new(lng, lat)),
        created_by,
    })
}
