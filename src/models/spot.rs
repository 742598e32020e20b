// src/models/spot.rs
// DOCUMENTATION: Core data structures for spots
// PURPOSE: Defines all serialization/deserialization models for API and store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use super::geometry;

/// Represents a spot record as returned by the store
/// DOCUMENTATION: Maps the fixed projection selected on every read
#[derive(Debug, Clone, Deserialize)]
pub struct SpotRow {
    /// Unique identifier, assigned by the store on insert
    pub id: Uuid,

    /// Spot name - required field for all spots
    pub name: String,

    /// Optional detailed description
    #[serde(default)]
    pub description: Option<String>,

    /// City name
    #[serde(default)]
    pub city: Option<String>,

    /// Country name
    #[serde(default)]
    pub country: Option<String>,

    /// Optional rating
    #[serde(default)]
    pub rating: Option<f64>,

    /// Row visibility: public, private, ...
    #[serde(default)]
    pub visibility: Option<String>,

    /// Creator identity; null for anonymous-era records
    #[serde(default)]
    pub created_by: Option<Uuid>,

    /// Server-assigned creation timestamp
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Raw geography value; WKT text when the store renders it as such.
    /// Anything else decodes to null coordinates.
    #[serde(default)]
    pub location: Option<Value>,
}

/// Response DTO for API consumers
/// DOCUMENTATION: The raw location is replaced by derived lat/lng fields
#[derive(Debug, Clone, Serialize)]
pub struct SpotResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub rating: Option<f64>,
    pub visibility: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,

    /// Geographic coordinates, decoded from the stored geography value
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl SpotRow {
    /// Convert SpotRow to SpotResponse for the API
    /// DOCUMENTATION: Decodes the location field via the geometry codec;
    /// non-text or malformed geometry yields null coordinates
    pub fn into_response(self) -> SpotResponse {
        let (lat, lng) = match self.location.as_ref().and_then(Value::as_str) {
            Some(raw) => geometry::decode_point(raw),
            None => (None, None),
        };

        SpotResponse {
            id: self.id,
            name: self.name,
            description: self.description,
            city: self.city,
            country: self.country,
            rating: self.rating,
            visibility: self.visibility,
            created_by: self.created_by,
            created_at: self.created_at,
            lat,
            lng,
        }
    }
}

/// Request DTO for creating a new spot
/// DOCUMENTATION: Data transfer object for POST /spots
/// Required fields stay optional at the serde layer so their absence is
/// reported through the shared error shape instead of a framework 400
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSpotRequest {
    /// Spot name (required, non-empty)
    #[validate(length(min = 1, message = "name is required"))]
    pub name: Option<String>,

    /// Optional description
    pub description: Option<String>,

    /// City name
    pub city: Option<String>,

    /// Country name
    pub country: Option<String>,

    /// Optional rating
    pub rating: Option<f64>,

    /// Visibility, defaults to "public" when unset
    pub visibility: Option<String>,

    /// Geographic latitude (required)
    pub lat: Option<f64>,

    /// Geographic longitude (required)
    pub lng: Option<f64>,
}

/// Insert payload sent to the store
/// DOCUMENTATION: The location travels as an EWKT geography literal
#[derive(Debug, Clone, Serialize)]
pub struct NewSpotRow {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    pub visibility: String,

    /// EWKT literal, e.g. SRID=4326;POINT(-68.83 -32.89)
    pub location: String,

    /// Resolved caller identity
    pub created_by: Uuid,
}

/// Query parameters for GET /spots/near
/// DOCUMENTATION: Coordinates arrive as raw text so that a missing or
/// non-numeric value is rejected with an explanatory message
#[derive(Debug, Deserialize)]
pub struct NearQuery {
    pub lat: Option<String>,

    pub lng: Option<String>,

    /// Search radius in kilometers (optional, defaults to 10)
    #[serde(rename = "radiusKm")]
    pub radius_km: Option<String>,
}

/// Arguments passed to the store's spots_near procedure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearSearch {
    pub lat: f64,
    pub lng: f64,
    pub radius_km: f64,
}

/// Response envelope for list and near-search
#[derive(Debug, Serialize)]
pub struct SpotListResponse {
    pub ok: bool,
    pub count: usize,
    pub spots: Vec<SpotResponse>,
}

/// Response envelope for create
#[derive(Debug, Serialize)]
pub struct SpotCreatedResponse {
    pub ok: bool,
    pub spot: Option<SpotResponse>,
}
