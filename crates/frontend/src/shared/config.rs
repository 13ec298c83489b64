//! Page configuration localized by WordPress (`wp_localize_script`).
//!
//! The plugin prints `var catalogMasterAdmin = {...}` before the wasm bundle
//! loads. `wp_localize_script` casts every scalar to a string, so numeric
//! fields are parsed leniently.

use serde::{Deserialize, Deserializer};
use std::cell::OnceCell;

const GLOBAL_NAME: &str = "catalogMasterAdmin";
const DEFAULT_AJAX_URL: &str = "/wp-admin/admin-ajax.php";

pub const SEARCH_DEBOUNCE_MS: u32 = 300;
pub const DEFAULT_PAGE_SIZE: usize = 25;
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];
pub const NOTICE_LIFETIME_MS: u32 = 5_000;
pub const TABLE_LOAD_TIMEOUT_MS: u32 = 30_000;
pub const EDIT_BLUR_GRACE_MS: u32 = 150;
pub const EDIT_ERROR_FLASH_MS: u32 = 3_000;
pub const TAB_SWITCH_AFTER_IMPORT_MS: u32 = 1_500;
pub const MAX_IMAGE_BYTES: f64 = 50.0 * 1024.0 * 1024.0;

/// Which admin screen the bundle is mounted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminPage {
    #[default]
    CatalogEdit,
    Settings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_ajax_url")]
    pub ajax_url: String,
    #[serde(default)]
    pub nonce: String,
    #[serde(default)]
    pub page: AdminPage,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub catalog_id: Option<u64>,
    /// Sheet coordinates already saved on the catalog, used to prefill forms
    #[serde(default)]
    pub sheet_url: String,
    #[serde(default)]
    pub sheet_name: String,
    /// Whether the catalog already holds imported rows
    #[serde(default, deserialize_with = "de_flag")]
    pub has_data: bool,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            ajax_url: default_ajax_url(),
            nonce: String::new(),
            page: AdminPage::default(),
            catalog_id: None,
            sheet_url: String::new(),
            sheet_name: String::new(),
            has_data: false,
        }
    }
}

thread_local! {
    static CONFIG: OnceCell<AdminConfig> = const { OnceCell::new() };
}

impl AdminConfig {
    /// Configuration of the current page, read from the window once
    pub fn current() -> AdminConfig {
        CONFIG.with(|cell| cell.get_or_init(Self::load).clone())
    }

    fn load() -> AdminConfig {
        let Some(window) = web_sys::window() else {
            return AdminConfig::default();
        };
        let raw = match js_sys::Reflect::get(&window, &GLOBAL_NAME.into()) {
            Ok(v) if !v.is_undefined() && !v.is_null() => v,
            _ => {
                log::warn!("{} is not defined, using defaults", GLOBAL_NAME);
                return AdminConfig::default();
            }
        };
        match serde_wasm_bindgen::from_value::<AdminConfig>(raw) {
            Ok(cfg) => {
                log::debug!(
                    "admin config loaded: page={:?} catalog_id={:?}",
                    cfg.page,
                    cfg.catalog_id
                );
                cfg
            }
            Err(e) => {
                log::warn!("failed to read {}: {}", GLOBAL_NAME, e);
                AdminConfig::default()
            }
        }
    }
}

fn default_ajax_url() -> String {
    DEFAULT_AJAX_URL.to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(u64),
    Float(f64),
    Bool(bool),
    Text(String),
}

fn de_opt_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Int(n)) if n > 0 => Some(n),
        Some(Scalar::Float(f)) if f >= 1.0 && f.fract() == 0.0 => Some(f as u64),
        Some(Scalar::Text(s)) => s.trim().parse().ok().filter(|n| *n > 0),
        _ => None,
    })
}

fn de_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Bool(b)) => b,
        Some(Scalar::Int(n)) => n != 0,
        Some(Scalar::Float(f)) => f != 0.0,
        Some(Scalar::Text(s)) => matches!(s.trim(), "1" | "true" | "yes"),
        None => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_localized_strings_are_parsed() {
        let cfg: AdminConfig = serde_json::from_value(json!({
            "ajax_url": "https://shop.test/wp-admin/admin-ajax.php",
            "nonce": "abc123",
            "page": "catalog_edit",
            "catalog_id": "7",
            "has_data": "1"
        }))
        .unwrap();
        assert_eq!(cfg.catalog_id, Some(7));
        assert!(cfg.has_data);
        assert_eq!(cfg.page, AdminPage::CatalogEdit);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let cfg: AdminConfig = serde_json::from_value(json!({"page": "settings"})).unwrap();
        assert_eq!(cfg.ajax_url, DEFAULT_AJAX_URL);
        assert_eq!(cfg.page, AdminPage::Settings);
        assert_eq!(cfg.catalog_id, None);
        assert!(!cfg.has_data);
    }

    #[test]
    fn test_zero_or_garbage_catalog_id_is_none() {
        let cfg: AdminConfig = serde_json::from_value(json!({"catalog_id": "0"})).unwrap();
        assert_eq!(cfg.catalog_id, None);
        let cfg: AdminConfig = serde_json::from_value(json!({"catalog_id": "new"})).unwrap();
        assert_eq!(cfg.catalog_id, None);
        let cfg: AdminConfig = serde_json::from_value(json!({"catalog_id": 12})).unwrap();
        assert_eq!(cfg.catalog_id, Some(12));
    }
}
