use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::shared::filter::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Excel,
    Json,
    Xml,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Csv,
        ExportFormat::Excel,
        ExportFormat::Json,
        ExportFormat::Xml,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "excel",
            ExportFormat::Json => "json",
            ExportFormat::Xml => "xml",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV file",
            ExportFormat::Excel => "Excel workbook",
            ExportFormat::Json => "JSON feed",
            ExportFormat::Xml => "XML feed",
        }
    }

    /// Feed formats are served live at a stable URL; the others are downloads
    pub fn is_feed(&self) -> bool {
        matches!(self, ExportFormat::Json | ExportFormat::Xml)
    }
}

impl FromStr for ExportFormat {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("export format", s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    pub catalog_id: u64,
    pub format: ExportFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportResponse {
    pub feed_url: String,
    pub download_url: String,
}

impl ExportResponse {
    /// URL to open for the requested format
    pub fn url_for(&self, format: ExportFormat) -> &str {
        if format.is_feed() {
            &self.feed_url
        } else {
            &self.download_url
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response() -> ExportResponse {
        ExportResponse {
            feed_url: "https://shop.test/?catalog_feed=7&format=json".to_string(),
            download_url: "https://shop.test/wp-content/uploads/catalog-7.csv".to_string(),
        }
    }

    #[test]
    fn test_file_formats_open_download_url() {
        let r = response();
        assert_eq!(r.url_for(ExportFormat::Csv), r.download_url);
        assert_eq!(r.url_for(ExportFormat::Excel), r.download_url);
    }

    #[test]
    fn test_feed_formats_open_feed_url() {
        let r = response();
        assert_eq!(r.url_for(ExportFormat::Json), r.feed_url);
        assert_eq!(r.url_for(ExportFormat::Xml), r.feed_url);
    }

    #[test]
    fn test_format_names() {
        for f in ExportFormat::ALL {
            assert_eq!(f.as_str().parse::<ExportFormat>(), Ok(f));
        }
        assert!("pdf".parse::<ExportFormat>().is_err());
        assert_eq!(serde_json::to_string(&ExportFormat::Excel).unwrap(), "\"excel\"");
    }
}
