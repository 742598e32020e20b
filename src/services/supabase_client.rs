// src/services/supabase_client.rs
// DOCUMENTATION: Remote data store client (Supabase)
// PURPOSE: Handle communication with the store's table, RPC and auth endpoints

use crate::config::Config;
use crate::errors::SpotsError;
use crate::models::{NearSearch, NewSpotRow, SpotRow};
use reqwest::{Client, Response};
use serde::Deserialize;
use uuid::Uuid;

/// Projection selected on every read; location is decoded client-side
const SPOT_COLUMNS: &str =
    "id,name,description,city,country,rating,visibility,created_by,created_at,location";

/// Projection echoed back from inserts; the raw location is excluded
const SPOT_INSERT_COLUMNS: &str =
    "id,name,description,city,country,rating,visibility,created_by,created_at";

/// Supabase store client
/// DOCUMENTATION: One value per identity. The anonymous client is built once
/// at startup and shared for the process lifetime; authenticated requests get
/// a fresh value via for_request carrying the caller's credential.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    /// HTTP client for making requests (shared connection pool)
    client: Client,
    /// Store endpoint, e.g. https://<project>.supabase.co
    base_url: String,
    /// Anonymous access key, sent as the apikey header on every call
    api_key: String,
    /// Credential presented in the Authorization header of every call
    bearer: String,
}

/// Authenticated user as reported by the store's auth endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct StoreUser {
    /// User identifier, recorded as created_by on inserts
    pub id: Uuid,

    #[serde(default)]
    pub email: Option<String>,
}

impl SupabaseClient {
    /// Create the process-wide anonymous client
    /// DOCUMENTATION: The anonymous key doubles as the bearer credential;
    /// the value is immutable after construction and safe to share
    pub fn from_config(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            api_key: config.supabase_anon_key.clone(),
            bearer: config.supabase_anon_key.clone(),
        }
    }

    /// Resolve the client for one request
    /// DOCUMENTATION: A presented credential produces a fresh value scoped to
    /// that caller, so row-level policy is enforced by the store under the
    /// caller's identity. Without a credential the shared anonymous
    /// configuration is reused. Nothing is cached across requests.
    pub fn for_request(&self, bearer: Option<&str>) -> SupabaseClient {
        match bearer {
            Some(token) => SupabaseClient {
                client: self.client.clone(),
                base_url: self.base_url.clone(),
                api_key: self.api_key.clone(),
                bearer: token.to_string(),
            },
            None => self.clone(),
        }
    }

    /// Read all spots with the fixed projection
    pub async fn list_spots(&self) -> Result<Vec<SpotRow>, SpotsError> {
        let url = format!("{}/rest/v1/spots", self.base_url);

        log::debug!("Store select: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("select", SPOT_COLUMNS)])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.bearer)
            .send()
            .await
            .map_err(|e| {
                log::error!("Store select request failed: {}", e);
                SpotsError::Store(format!("Request failed: {}", e))
            })?;

        Self::read_rows(response).await
    }

    /// Invoke the spots_near procedure
    /// DOCUMENTATION: The procedure performs the geography proximity
    /// computation and ordering server-side; rows come back in the same
    /// projection as a table read
    pub async fn spots_near(&self, search: &NearSearch) -> Result<Vec<SpotRow>, SpotsError> {
        let url = format!("{}/rest/v1/rpc/spots_near", self.base_url);

        log::debug!(
            "Store rpc spots_near: lat={}, lng={}, radius_km={}",
            search.lat,
            search.lng,
            search.radius_km
        );

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.bearer)
            .json(search)
            .send()
            .await
            .map_err(|e| {
                log::error!("Store rpc request failed: {}", e);
                SpotsError::Store(format!("Request failed: {}", e))
            })?;

        Self::read_rows(response).await
    }

    /// Insert one spot, returning the echoed row
    /// DOCUMENTATION: return=representation makes the store echo the inserted
    /// row in the insert projection
    pub async fn insert_spot(&self, row: &NewSpotRow) -> Result<Option<SpotRow>, SpotsError> {
        let url = format!("{}/rest/v1/spots", self.base_url);

        log::debug!("Store insert: {}", row.name);

        let response = self
            .client
            .post(&url)
            .query(&[("select", SPOT_INSERT_COLUMNS)])
            .header("apikey", &self.api_key)
            .header("Prefer", "return=representation")
            .bearer_auth(&self.bearer)
            .json(row)
            .send()
            .await
            .map_err(|e| {
                log::error!("Store insert request failed: {}", e);
                SpotsError::Store(format!("Request failed: {}", e))
            })?;

        let rows = Self::read_rows(response).await?;
        Ok(rows.into_iter().next())
    }

    /// Confirm the identity behind this client's credential
    /// DOCUMENTATION: Any failure resolves to Unauthorized - an anonymous or
    /// invalid credential carries no identity
    pub async fn current_user(&self) -> Result<StoreUser, SpotsError> {
        let url = format!("{}/auth/v1/user", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.bearer)
            .send()
            .await
            .map_err(|e| {
                log::debug!("Identity lookup failed: {}", e);
                SpotsError::Unauthorized
            })?;

        if !response.status().is_success() {
            log::debug!("Identity rejected by store: {}", response.status());
            return Err(SpotsError::Unauthorized);
        }

        response
            .json::<StoreUser>()
            .await
            .map_err(|_| SpotsError::Unauthorized)
    }

    /// Parse a row-set response, surfacing store failures
    async fn read_rows(response: Response) -> Result<Vec<SpotRow>, SpotsError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Store error {}: {}", status, body);
            return Err(SpotsError::Store(format!("Store error {}: {}", status, body)));
        }

        response.json().await.map_err(|e| {
            log::error!("Failed to parse store response: {}", e);
            SpotsError::Store(format!("Parse error: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            supabase_url: "http://localhost:54321/".to_string(),
            supabase_anon_key: "anon-key".to_string(),
            server_address: "127.0.0.1".to_string(),
            server_port: 3000,
            environment: "test".to_string(),
            log_level: "debug".to_string(),
        }
    }

    #[test]
    fn test_anonymous_client_uses_anon_credential() {
        let anon = SupabaseClient::from_config(&test_config());

        assert_eq!(anon.base_url, "http://localhost:54321");
        assert_eq!(anon.bearer, "anon-key");
    }

    #[test]
    fn test_for_request_without_credential_keeps_anon_identity() {
        let anon = SupabaseClient::from_config(&test_config());
        let resolved = anon.for_request(None);

        assert_eq!(resolved.bearer, "anon-key");
        assert_eq!(resolved.api_key, "anon-key");
    }

    #[test]
    fn test_for_request_scopes_fresh_client_to_caller() {
        let anon = SupabaseClient::from_config(&test_config());
        let resolved = anon.for_request(Some("caller-jwt"));

        assert_eq!(resolved.bearer, "caller-jwt");
        // the anon key still rides along as the apikey header
        assert_eq!(resolved.api_key, "anon-key");
        // the shared client is untouched
        assert_eq!(anon.bearer, "anon-key");
    }
}
