use contracts::shared::ajax::{AjaxAction, CatalogError};
use contracts::usecases::u502_export_catalog::{ExportFormat, ExportRequest, ExportResponse};

use crate::shared::api_utils::post_action;

pub async fn export_catalog(
    catalog_id: u64,
    format: ExportFormat,
) -> Result<ExportResponse, CatalogError> {
    post_action(AjaxAction::Export, &ExportRequest { catalog_id, format }).await
}
