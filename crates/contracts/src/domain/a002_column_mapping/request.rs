use serde::{Deserialize, Serialize};

use super::aggregate::MappingPair;

/// Persist the full mapping set of a catalog (replaces the previous one)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveMappingRequest {
    pub catalog_id: u64,
    pub mappings: Vec<MappingPair>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetMappingRequest {
    pub catalog_id: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingResponse {
    #[serde(default)]
    pub mappings: Vec<MappingPair>,
}
