// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod spot_service;
pub mod supabase_client;

pub use spot_service::*;
pub use supabase_client::*;
