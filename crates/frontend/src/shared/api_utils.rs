//! admin-ajax client.
//!
//! Every backend operation is a POST to `admin-ajax.php` carrying the
//! WordPress `action` name and the page nonce, form-encoded the same way
//! jQuery's `$.param` does it (`filters[0][column]=...`). Responses are the
//! `{success, data}` envelope; both transport and logical failures come back
//! as [`CatalogError`].

use contracts::shared::ajax::{AjaxAction, AjaxEnvelope, CatalogError};
use futures::future::{select, Either};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;

use super::config::AdminConfig;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

#[derive(Serialize)]
struct ActionParams<'a> {
    action: &'a str,
    nonce: &'a str,
}

/// Build the urlencoded body: `action`, `nonce`, then the payload fields
pub fn encode_form<T: Serialize>(
    action: AjaxAction,
    nonce: &str,
    payload: &T,
) -> Result<String, CatalogError> {
    let head = serde_qs::to_string(&ActionParams {
        action: action.as_str(),
        nonce,
    })
    .map_err(|e| CatalogError::Transport(format!("Failed to encode request: {e}")))?;
    let body = serde_qs::to_string(payload)
        .map_err(|e| CatalogError::Transport(format!("Failed to encode request: {e}")))?;
    if body.is_empty() {
        Ok(head)
    } else {
        Ok(format!("{head}&{body}"))
    }
}

/// Call a plugin action and decode the `data` of a successful envelope
pub async fn post_action<Req, Resp>(action: AjaxAction, payload: &Req) -> Result<Resp, CatalogError>
where
    Req: Serialize,
    Resp: DeserializeOwned,
{
    let cfg = AdminConfig::current();
    let body = encode_form(action, &cfg.nonce, payload)?;
    log::debug!("ajax -> {}", action);

    let response = Request::post(&cfg.ajax_url)
        .header("Content-Type", FORM_CONTENT_TYPE)
        .header("Accept", "application/json")
        .body(body)
        .map_err(|e| CatalogError::Transport(format!("Failed to build request: {e}")))?
        .send()
        .await
        .map_err(|e| {
            log::error!("ajax {} failed to send: {}", action, e);
            CatalogError::Transport(format!("Failed to send request: {e}"))
        })?;

    unwrap_envelope(action, response).await
}

/// Multipart variant used for file uploads
pub async fn upload_action<Resp>(
    action: AjaxAction,
    fields: &[(&str, String)],
    file: &web_sys::File,
) -> Result<Resp, CatalogError>
where
    Resp: DeserializeOwned,
{
    let cfg = AdminConfig::current();
    let form = web_sys::FormData::new()
        .map_err(|e| CatalogError::Transport(format!("FormData unavailable: {e:?}")))?;
    let append = |key: &str, value: &str| {
        form.append_with_str(key, value)
            .map_err(|e| CatalogError::Transport(format!("Failed to build form: {e:?}")))
    };
    append("action", action.as_str())?;
    append("nonce", &cfg.nonce)?;
    for (key, value) in fields {
        append(key, value)?;
    }
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| CatalogError::Transport(format!("Failed to attach file: {e:?}")))?;

    log::debug!("ajax upload -> {} ({} bytes)", action, file.size());

    let response = Request::post(&cfg.ajax_url)
        .header("Accept", "application/json")
        .body(form)
        .map_err(|e| CatalogError::Transport(format!("Failed to build request: {e}")))?
        .send()
        .await
        .map_err(|e| {
            log::error!("ajax {} upload failed: {}", action, e);
            CatalogError::Transport(format!("Failed to send request: {e}"))
        })?;

    unwrap_envelope(action, response).await
}

async fn unwrap_envelope<Resp: DeserializeOwned>(
    action: AjaxAction,
    response: Response,
) -> Result<Resp, CatalogError> {
    if !response.ok() {
        log::error!("ajax {} -> HTTP {}", action, response.status());
        return Err(CatalogError::Transport(format!("HTTP {}", response.status())));
    }

    let envelope: AjaxEnvelope = response
        .json()
        .await
        .map_err(|e| CatalogError::Transport(format!("Failed to parse response: {e}")))?;

    envelope.into_result().map_err(|e| {
        log::warn!("ajax {} rejected: {}", action, e);
        e
    })
}

/// Race a request against a timer so a hung request cannot block forever
pub async fn with_timeout<T, F>(fut: F, timeout_ms: u32) -> Result<T, CatalogError>
where
    F: Future<Output = Result<T, CatalogError>>,
{
    match select(Box::pin(fut), Box::pin(TimeoutFuture::new(timeout_ms))).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => Err(CatalogError::Transport(format!(
            "request timed out after {} s",
            timeout_ms / 1000
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_catalog_item::CatalogColumn;
    use contracts::domain::a001_catalog_item::aggregate::CatalogItemId;
    use contracts::domain::a002_column_mapping::{MappingPair, SaveMappingRequest};
    use contracts::projections::p900_catalog_table::UpdateItemRequest;

    #[test]
    fn test_action_and_nonce_come_first() {
        #[derive(Serialize)]
        struct Empty {}

        let body = encode_form(AjaxAction::GetMapping, "n0nce", &Empty {}).unwrap();
        assert_eq!(body, "action=catalog_master_get_mapping&nonce=n0nce");
    }

    #[test]
    fn test_nested_payload_is_bracket_encoded() {
        let req = SaveMappingRequest {
            catalog_id: 7,
            mappings: vec![MappingPair::new("SKU", CatalogColumn::ProductId)],
        };
        let body = encode_form(AjaxAction::SaveMapping, "n", &req).unwrap();
        assert!(body.starts_with("action=catalog_master_save_mapping&nonce=n&"));
        assert!(body.contains("catalog_id=7"));
        assert!(body.contains("SKU"));
        assert!(body.contains("product_id"));
        assert!(body.contains("source_column"));
    }

    #[test]
    fn test_update_sends_field_map() {
        let req = UpdateItemRequest::single(CatalogItemId(5), CatalogColumn::ProductName, "Desk lamp");
        let body = encode_form(AjaxAction::UpdateItem, "n", &req).unwrap();
        assert!(body.starts_with("action=catalog_master_update_item&nonce=n&item_id=5&"));
        assert!(body.contains("data%5Bproduct_name%5D=Desk+lamp") || body.contains("data[product_name]=Desk+lamp"));
        assert!(!body.contains("field="));
    }
}
