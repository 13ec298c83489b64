//! Column mapping rows and the option sets derived from them.
//!
//! Every select only offers values that no sibling row has taken, plus its own
//! current choice. Options are recomputed from the rows on every render, so
//! exclusivity holds after any add, remove or change.

use contracts::domain::a001_catalog_item::CatalogColumn;
use contracts::domain::a002_column_mapping::MappingPair;
use contracts::shared::ajax::CatalogError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRow {
    pub id: u32,
    pub source: Option<String>,
    pub catalog: Option<CatalogColumn>,
}

impl MappingRow {
    fn empty(id: u32) -> Self {
        Self {
            id,
            source: None,
            catalog: None,
        }
    }

    fn has_selection(&self) -> bool {
        self.source.is_some() || self.catalog.is_some()
    }

    fn pair(&self) -> Option<MappingPair> {
        match (&self.source, self.catalog) {
            (Some(source), Some(catalog)) => Some(MappingPair::new(source.clone(), catalog)),
            _ => None,
        }
    }
}

/// Catalog side chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogChip {
    Mapped,
    Unmapped,
}

/// Spreadsheet side chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceChip {
    Available,
    Mapped,
}

impl CatalogChip {
    pub fn css_class(&self) -> &'static str {
        match self {
            CatalogChip::Mapped => "mapping-chip mapping-chip--mapped",
            CatalogChip::Unmapped => "mapping-chip mapping-chip--unmapped",
        }
    }
}

impl SourceChip {
    pub fn css_class(&self) -> &'static str {
        match self {
            SourceChip::Available => "mapping-chip mapping-chip--available",
            SourceChip::Mapped => "mapping-chip mapping-chip--mapped",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingModel {
    rows: Vec<MappingRow>,
    next_id: u32,
    headers: Vec<String>,
}

impl MappingModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[MappingRow] {
        &self.rows
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn add(&mut self) -> u32 {
        self.next_id += 1;
        self.rows.push(MappingRow::empty(self.next_id));
        self.next_id
    }

    /// Other rows keep their assignments
    pub fn remove(&mut self, id: u32) {
        self.rows.retain(|r| r.id != id);
    }

    /// Replace the header list. Rows with selections survive and only their
    /// option sets change; otherwise the editor restarts with one empty row.
    ///
    /// Headers keep their raw text, the backend matches it against the sheet.
    pub fn set_headers(&mut self, headers: Vec<String>) {
        let mut unique: Vec<String> = Vec::with_capacity(headers.len());
        for h in headers {
            if !h.trim().is_empty() && !unique.contains(&h) {
                unique.push(h);
            }
        }
        self.headers = unique;

        if !self.rows.iter().any(MappingRow::has_selection) {
            self.rows.clear();
            self.add();
        }
    }

    /// Rebuild rows from a persisted mapping
    pub fn load_pairs(&mut self, pairs: &[MappingPair]) {
        self.rows.clear();
        for pair in pairs {
            let taken_source = self
                .rows
                .iter()
                .any(|r| r.source.as_deref() == Some(pair.source_column.as_str()));
            let taken_catalog = self.rows.iter().any(|r| r.catalog == Some(pair.catalog_column));
            if taken_source || taken_catalog {
                log::warn!(
                    "skipping duplicate mapping {} -> {}",
                    pair.source_column,
                    pair.catalog_column
                );
                continue;
            }
            self.next_id += 1;
            self.rows.push(MappingRow {
                id: self.next_id,
                source: Some(pair.source_column.clone()),
                catalog: Some(pair.catalog_column),
            });
        }
        if self.rows.is_empty() && !self.headers.is_empty() {
            self.add();
        }
    }

    /// Headers selectable in a row: untaken ones plus the row's own choice
    pub fn source_options(&self, id: u32) -> Vec<String> {
        let own = self.row(id).and_then(|r| r.source.clone());
        let mut options: Vec<String> = self
            .headers
            .iter()
            .filter(|h| {
                own.as_deref() == Some(h.as_str())
                    || !self
                        .rows
                        .iter()
                        .any(|r| r.id != id && r.source.as_deref() == Some(h.as_str()))
            })
            .cloned()
            .collect();
        // a persisted header that vanished from the sheet stays visible
        if let Some(own) = own {
            if !options.contains(&own) {
                options.insert(0, own);
            }
        }
        options
    }

    pub fn catalog_options(&self, id: u32) -> Vec<CatalogColumn> {
        CatalogColumn::all()
            .iter()
            .copied()
            .filter(|c| {
                !self
                    .rows
                    .iter()
                    .any(|r| r.id != id && r.catalog == Some(*c))
            })
            .collect()
    }

    /// Returns `false` when the value is not offered to this row
    pub fn set_source(&mut self, id: u32, source: Option<String>) -> bool {
        if let Some(ref s) = source {
            if !self.source_options(id).contains(s) {
                return false;
            }
        }
        match self.row_mut(id) {
            Some(row) => {
                row.source = source;
                true
            }
            None => false,
        }
    }

    pub fn set_catalog(&mut self, id: u32, catalog: Option<CatalogColumn>) -> bool {
        if let Some(c) = catalog {
            if !self.catalog_options(id).contains(&c) {
                return false;
            }
        }
        match self.row_mut(id) {
            Some(row) => {
                row.catalog = catalog;
                true
            }
            None => false,
        }
    }

    /// Fully paired rows in row order
    pub fn pairs(&self) -> Vec<MappingPair> {
        self.rows.iter().filter_map(MappingRow::pair).collect()
    }

    /// Pairs to persist, or a warning when nothing is paired
    pub fn pairs_for_save(&self) -> Result<Vec<MappingPair>, CatalogError> {
        let pairs = self.pairs();
        if pairs.is_empty() {
            return Err(CatalogError::validation(
                "Please map at least one column before saving.",
            ));
        }
        Ok(pairs)
    }

    pub fn catalog_chips(&self) -> Vec<(CatalogColumn, CatalogChip)> {
        CatalogColumn::all()
            .iter()
            .map(|c| {
                let chip = if self.rows.iter().any(|r| r.catalog == Some(*c)) {
                    CatalogChip::Mapped
                } else {
                    CatalogChip::Unmapped
                };
                (*c, chip)
            })
            .collect()
    }

    pub fn source_chips(&self) -> Vec<(String, SourceChip)> {
        self.headers
            .iter()
            .map(|h| {
                let chip = if self.rows.iter().any(|r| r.source.as_deref() == Some(h.as_str())) {
                    SourceChip::Mapped
                } else {
                    SourceChip::Available
                };
                (h.clone(), chip)
            })
            .collect()
    }

    /// "N of 19 catalog columns mapped"
    pub fn summary(&self) -> String {
        let mapped = self
            .catalog_chips()
            .iter()
            .filter(|(_, chip)| *chip == CatalogChip::Mapped)
            .count();
        format!(
            "{} of {} catalog columns mapped",
            mapped,
            CatalogColumn::all().len()
        )
    }

    pub fn row(&self, id: u32) -> Option<&MappingRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    fn row_mut(&mut self, id: u32) -> Option<&mut MappingRow> {
        self.rows.iter_mut().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn headers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn assert_exclusive(model: &MappingModel) {
        let mut sources = HashSet::new();
        let mut catalogs = HashSet::new();
        for row in model.rows() {
            if let Some(s) = &row.source {
                assert!(sources.insert(s.clone()), "source {s} used twice");
            }
            if let Some(c) = row.catalog {
                assert!(catalogs.insert(c), "catalog {c} used twice");
            }
        }
    }

    #[test]
    fn test_sku_name_scenario() {
        let mut model = MappingModel::new();
        model.set_headers(headers(&["SKU", "Name", "Price"]));
        assert_eq!(model.rows().len(), 1);

        let first = model.rows()[0].id;
        assert!(model.set_source(first, Some("SKU".into())));
        assert!(model.set_catalog(first, Some(CatalogColumn::ProductId)));
        let second = model.add();
        assert!(model.set_source(second, Some("Name".into())));
        assert!(model.set_catalog(second, Some(CatalogColumn::ProductName)));

        let pairs = model.pairs_for_save().unwrap();
        assert_eq!(
            pairs,
            vec![
                MappingPair::new("SKU", CatalogColumn::ProductId),
                MappingPair::new("Name", CatalogColumn::ProductName),
            ]
        );

        let chips = model.catalog_chips();
        let price = chips
            .iter()
            .find(|(c, _)| *c == CatalogColumn::ProductPrice)
            .map(|(_, chip)| *chip);
        assert_eq!(price, Some(CatalogChip::Unmapped));

        let sources = model.source_chips();
        assert_eq!(sources[2], ("Price".to_string(), SourceChip::Available));
        assert_eq!(sources[0].1, SourceChip::Mapped);
        assert_eq!(model.summary(), "2 of 19 catalog columns mapped");
    }

    #[test]
    fn test_taken_values_are_hidden_from_siblings_only() {
        let mut model = MappingModel::new();
        model.set_headers(headers(&["A", "B"]));
        let r1 = model.rows()[0].id;
        let r2 = model.add();
        model.set_source(r1, Some("A".into()));
        model.set_catalog(r1, Some(CatalogColumn::ProductPrice));

        assert_eq!(model.source_options(r1), headers(&["A", "B"]));
        assert_eq!(model.source_options(r2), headers(&["B"]));
        assert!(!model.catalog_options(r2).contains(&CatalogColumn::ProductPrice));
        assert!(model.catalog_options(r1).contains(&CatalogColumn::ProductPrice));

        assert!(!model.set_source(r2, Some("A".into())));
        assert!(!model.set_catalog(r2, Some(CatalogColumn::ProductPrice)));
        assert_eq!(model.rows()[1].source, None);
    }

    #[test]
    fn test_removing_a_row_frees_its_values() {
        let mut model = MappingModel::new();
        model.set_headers(headers(&["A", "B"]));
        let r1 = model.rows()[0].id;
        let r2 = model.add();
        model.set_source(r1, Some("A".into()));
        model.set_source(r2, Some("B".into()));
        model.remove(r1);
        assert_eq!(model.rows().len(), 1);
        assert_eq!(model.rows()[0].source.as_deref(), Some("B"));
        assert_eq!(model.source_options(r2), headers(&["A", "B"]));
    }

    #[test]
    fn test_header_refresh_keeps_existing_selections() {
        let mut model = MappingModel::new();
        model.set_headers(headers(&["SKU", "Name"]));
        let r1 = model.rows()[0].id;
        model.set_source(r1, Some("SKU".into()));
        model.add();

        model.set_headers(headers(&["SKU", "Name", "Stock"]));
        assert_eq!(model.rows().len(), 2);
        assert_eq!(model.rows()[0].source.as_deref(), Some("SKU"));
        assert_eq!(model.headers().len(), 3);
    }

    #[test]
    fn test_header_refresh_without_selections_seeds_one_row() {
        let mut model = MappingModel::new();
        model.add();
        model.add();
        model.set_headers(headers(&["X", "X", " ", "Y"]));
        assert_eq!(model.rows().len(), 1);
        assert_eq!(model.headers(), &headers(&["X", "Y"])[..]);
    }

    #[test]
    fn test_padded_header_keeps_its_raw_name() {
        let mut model = MappingModel::new();
        model.set_headers(headers(&[" SKU ", "Name", " SKU "]));
        let r1 = model.rows()[0].id;
        assert_eq!(model.source_options(r1), headers(&[" SKU ", "Name"]));

        assert!(model.set_source(r1, Some(" SKU ".into())));
        assert!(model.set_catalog(r1, Some(CatalogColumn::ProductId)));
        assert_eq!(
            model.pairs(),
            vec![MappingPair::new(" SKU ", CatalogColumn::ProductId)]
        );
    }

    #[test]
    fn test_partial_rows_are_not_saved() {
        let mut model = MappingModel::new();
        model.set_headers(headers(&["A"]));
        let r1 = model.rows()[0].id;
        model.set_source(r1, Some("A".into()));
        let r2 = model.add();
        model.set_catalog(r2, Some(CatalogColumn::ProductName));

        assert!(model.pairs().is_empty());
        let err = model.pairs_for_save().unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[test]
    fn test_load_pairs_skips_duplicates() {
        let mut model = MappingModel::new();
        model.load_pairs(&[
            MappingPair::new("SKU", CatalogColumn::ProductId),
            MappingPair::new("SKU", CatalogColumn::ProductName),
            MappingPair::new("Title", CatalogColumn::ProductId),
            MappingPair::new("Title", CatalogColumn::ProductName),
        ]);
        assert_eq!(model.pairs().len(), 2);
        assert_exclusive(&model);
        // the persisted header stays selectable even before headers are fetched
        let r1 = model.rows()[0].id;
        assert_eq!(model.source_options(r1), headers(&["SKU"]));
    }

    #[test]
    fn test_exclusivity_survives_arbitrary_edits() {
        let cols = CatalogColumn::all();
        let hdrs = headers(&["A", "B", "C", "D", "E"]);
        let mut model = MappingModel::new();
        model.set_headers(hdrs.clone());

        // small deterministic LCG drives a long mixed edit sequence
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        let mut next = move |n: usize| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((seed >> 33) as usize) % n
        };

        for _ in 0..2_000 {
            let ids: Vec<u32> = model.rows().iter().map(|r| r.id).collect();
            match next(5) {
                0 => {
                    model.add();
                }
                1 if !ids.is_empty() => model.remove(ids[next(ids.len())]),
                2 if !ids.is_empty() => {
                    let id = ids[next(ids.len())];
                    model.set_source(id, Some(hdrs[next(hdrs.len())].clone()));
                }
                3 if !ids.is_empty() => {
                    let id = ids[next(ids.len())];
                    model.set_catalog(id, Some(cols[next(cols.len())]));
                }
                4 if !ids.is_empty() => {
                    let id = ids[next(ids.len())];
                    model.set_source(id, None);
                }
                _ => {}
            }
            assert_exclusive(&model);
        }
    }
}
