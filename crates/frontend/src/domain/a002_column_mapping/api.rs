use contracts::domain::a002_column_mapping::{
    GetMappingRequest, MappingPair, MappingResponse, SaveMappingRequest,
};
use contracts::shared::ajax::{Ack, AjaxAction, CatalogError};

use crate::shared::api_utils::post_action;

/// Mapping persisted for the catalog, empty when none was saved yet
pub async fn get_mapping(catalog_id: u64) -> Result<Vec<MappingPair>, CatalogError> {
    let resp: MappingResponse =
        post_action(AjaxAction::GetMapping, &GetMappingRequest { catalog_id }).await?;
    Ok(resp.mappings)
}

pub async fn save_mapping(catalog_id: u64, mappings: Vec<MappingPair>) -> Result<Ack, CatalogError> {
    post_action(
        AjaxAction::SaveMapping,
        &SaveMappingRequest {
            catalog_id,
            mappings,
        },
    )
    .await
}
