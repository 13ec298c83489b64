use contracts::domain::a001_catalog_item::aggregate::CatalogItemId;
use contracts::projections::p900_catalog_table::{
    DeleteItemRequest, TablePageRequest, TablePageResponse, UpdateItemRequest,
    UploadImageRequest, UploadImageResponse,
};
use contracts::shared::ajax::{Ack, AjaxAction, CatalogError};

use crate::shared::api_utils::{post_action, upload_action, with_timeout};
use crate::shared::config::TABLE_LOAD_TIMEOUT_MS;

/// One page of catalog rows; gives up after the table load timeout
pub async fn fetch_table_page(req: &TablePageRequest) -> Result<TablePageResponse, CatalogError> {
    with_timeout(
        post_action(AjaxAction::GetTableData, req),
        TABLE_LOAD_TIMEOUT_MS,
    )
    .await
}

pub async fn update_item(req: &UpdateItemRequest) -> Result<Ack, CatalogError> {
    post_action(AjaxAction::UpdateItem, req).await
}

pub async fn delete_item(item_id: CatalogItemId) -> Result<Ack, CatalogError> {
    post_action(AjaxAction::DeleteItem, &DeleteItemRequest { item_id }).await
}

/// Upload an image file into a field; returns the stored image URL
pub async fn upload_image(
    req: &UploadImageRequest,
    file: &web_sys::File,
) -> Result<String, CatalogError> {
    let fields = [
        ("catalog_id", req.catalog_id.to_string()),
        ("item_id", req.item_id.to_string()),
        ("field", req.field.key().to_string()),
    ];
    let resp: UploadImageResponse = upload_action(AjaxAction::UploadImage, &fields, file).await?;
    Ok(resp.url)
}
