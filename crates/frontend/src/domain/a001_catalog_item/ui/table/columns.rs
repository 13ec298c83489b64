use contracts::domain::a001_catalog_item::{CatalogColumn, ColumnGroup, ColumnType};

/// Column of the data grid besides the fixed `id` and `actions` columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableColumn {
    pub column: CatalogColumn,
    pub label: &'static str,
    pub group: ColumnGroup,
    pub kind: ColumnType,
    pub sortable: bool,
    /// Double-click editing; image cells use the upload dialog instead
    pub editable: bool,
}

impl TableColumn {
    pub fn of(column: CatalogColumn) -> Self {
        Self {
            column,
            label: column.label(),
            group: column.group(),
            kind: column.column_type(),
            sortable: true,
            editable: !column.is_image(),
        }
    }

    pub fn input_type(&self) -> &'static str {
        match self.kind {
            ColumnType::Number => "number",
            ColumnType::Text => "text",
        }
    }
}

/// Master list in schema order
pub fn master_columns() -> Vec<TableColumn> {
    CatalogColumn::all().iter().copied().map(TableColumn::of).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnPreset {
    Compact,
    Full,
    ProductOnly,
}

impl ColumnPreset {
    pub const ALL: [ColumnPreset; 3] = [
        ColumnPreset::Compact,
        ColumnPreset::Full,
        ColumnPreset::ProductOnly,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ColumnPreset::Compact => "Compact",
            ColumnPreset::Full => "All columns",
            ColumnPreset::ProductOnly => "Product only",
        }
    }

    /// Columns in the order the preset displays them
    pub fn columns(&self) -> Vec<CatalogColumn> {
        match self {
            ColumnPreset::Compact => vec![
                CatalogColumn::ProductImageUrl,
                CatalogColumn::ProductId,
                CatalogColumn::ProductName,
                CatalogColumn::ProductPrice,
                CatalogColumn::ProductQty,
                CatalogColumn::CategoryName1,
            ],
            ColumnPreset::Full => CatalogColumn::all().to_vec(),
            ColumnPreset::ProductOnly => CatalogColumn::all()
                .iter()
                .copied()
                .filter(|c| c.group() == ColumnGroup::Product)
                .collect(),
        }
    }
}

/// State of the column settings panel until it is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSettings {
    checked: Vec<CatalogColumn>,
    last_preset: Option<ColumnPreset>,
}

impl ColumnSettings {
    /// Open the panel on the currently visible columns
    pub fn from_visible(visible: &[CatalogColumn]) -> Self {
        Self {
            checked: visible.to_vec(),
            last_preset: None,
        }
    }

    pub fn is_checked(&self, column: CatalogColumn) -> bool {
        self.checked.contains(&column)
    }

    pub fn last_preset(&self) -> Option<ColumnPreset> {
        self.last_preset
    }

    pub fn apply_preset(&mut self, preset: ColumnPreset) {
        self.checked = preset.columns();
        self.last_preset = Some(preset);
    }

    /// A manual checkbox click makes master order authoritative again
    pub fn toggle(&mut self, column: CatalogColumn, on: bool) {
        self.checked.retain(|c| *c != column);
        if on {
            self.checked.push(column);
        }
        self.last_preset = None;
    }

    /// Visible columns to apply
    pub fn resolve(&self) -> Vec<CatalogColumn> {
        match self.last_preset {
            Some(preset) => {
                let mut out: Vec<CatalogColumn> = preset
                    .columns()
                    .into_iter()
                    .filter(|c| self.checked.contains(c))
                    .collect();
                for c in CatalogColumn::all() {
                    if self.checked.contains(c) && !out.contains(c) {
                        out.push(*c);
                    }
                }
                out
            }
            None => CatalogColumn::all()
                .iter()
                .copied()
                .filter(|c| self.checked.contains(c))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_order_is_kept_after_preset_click() {
        let mut settings = ColumnSettings::from_visible(&[CatalogColumn::ProductName]);
        settings.apply_preset(ColumnPreset::Compact);
        let resolved = settings.resolve();
        assert_eq!(resolved, ColumnPreset::Compact.columns());
        assert_eq!(resolved[0], CatalogColumn::ProductImageUrl);
    }

    #[test]
    fn test_manual_toggle_falls_back_to_master_order() {
        let mut settings = ColumnSettings::from_visible(&[]);
        settings.apply_preset(ColumnPreset::Compact);
        settings.toggle(CatalogColumn::CategoryName1, false);
        assert_eq!(settings.last_preset(), None);
        assert_eq!(
            settings.resolve(),
            vec![
                CatalogColumn::ProductId,
                CatalogColumn::ProductName,
                CatalogColumn::ProductPrice,
                CatalogColumn::ProductQty,
                CatalogColumn::ProductImageUrl,
            ]
        );
    }

    #[test]
    fn test_product_only_preset() {
        let cols = ColumnPreset::ProductOnly.columns();
        assert_eq!(cols.len(), 7);
        assert!(cols.iter().all(|c| c.group() == ColumnGroup::Product));
        assert_eq!(ColumnPreset::Full.columns().len(), 19);
    }

    #[test]
    fn test_image_columns_are_not_inline_editable() {
        assert!(!TableColumn::of(CatalogColumn::ProductImageUrl).editable);
        assert!(TableColumn::of(CatalogColumn::ProductName).editable);
        assert_eq!(TableColumn::of(CatalogColumn::ProductPrice).input_type(), "number");
        assert_eq!(TableColumn::of(CatalogColumn::CategoryName2).input_type(), "text");
        assert_eq!(master_columns().len(), 19);
    }
}
