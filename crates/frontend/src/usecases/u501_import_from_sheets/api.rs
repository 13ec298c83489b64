use contracts::shared::ajax::{AjaxAction, CatalogError};
use contracts::usecases::u501_import_from_sheets::{
    ConnectionInfo, HeadersResponse, ImportRequest, ImportResponse, SheetSourceRequest,
};

use crate::shared::api_utils::post_action;

/// Check that the sheet is reachable; reports header and row counts
pub async fn test_connection(source: &SheetSourceRequest) -> Result<ConnectionInfo, CatalogError> {
    post_action(AjaxAction::TestConnection, source).await
}

/// Header row of the sheet, in column order
pub async fn fetch_headers(source: &SheetSourceRequest) -> Result<Vec<String>, CatalogError> {
    let resp: HeadersResponse = post_action(AjaxAction::GetHeaders, source).await?;
    Ok(resp.headers)
}

/// Replace the catalog rows with the mapped sheet content
pub async fn import_data(catalog_id: u64) -> Result<ImportResponse, CatalogError> {
    post_action(AjaxAction::ImportData, &ImportRequest { catalog_id }).await
}
