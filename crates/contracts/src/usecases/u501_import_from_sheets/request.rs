use serde::{Deserialize, Serialize};

use super::sheet_url::validate_sheet_url;
use crate::shared::ajax::CatalogError;

/// Sheet coordinates used by both the connection test and the header fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSourceRequest {
    pub sheet_url: String,
    /// Tab name inside the spreadsheet; empty means the first sheet
    #[serde(default)]
    pub sheet_name: String,
}

impl SheetSourceRequest {
    /// Validate form input before any request is sent
    pub fn from_form(sheet_url: &str, sheet_name: &str) -> Result<Self, CatalogError> {
        let sheet_url = sheet_url.trim();
        if sheet_url.is_empty() {
            return Err(CatalogError::validation("Please enter a Google Sheets URL."));
        }
        if validate_sheet_url(sheet_url).is_none() {
            return Err(CatalogError::validation(
                "Please enter a valid Google Sheets URL (https://docs.google.com/spreadsheets/d/...).",
            ));
        }
        Ok(Self {
            sheet_url: sheet_url.to_string(),
            sheet_name: sheet_name.trim().to_string(),
        })
    }
}

/// Run the import of the configured sheet into the catalog using the saved mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRequest {
    pub catalog_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_input_is_trimmed() {
        let req = SheetSourceRequest::from_form(
            " https://docs.google.com/spreadsheets/d/abc/edit ",
            " Products ",
        )
        .unwrap();
        assert_eq!(req.sheet_url, "https://docs.google.com/spreadsheets/d/abc/edit");
        assert_eq!(req.sheet_name, "Products");
    }

    #[test]
    fn test_missing_or_bad_url_is_a_validation_error() {
        assert!(matches!(
            SheetSourceRequest::from_form("  ", "Sheet1"),
            Err(CatalogError::Validation(_))
        ));
        assert!(matches!(
            SheetSourceRequest::from_form("https://example.com/x", ""),
            Err(CatalogError::Validation(_))
        ));
    }
}
