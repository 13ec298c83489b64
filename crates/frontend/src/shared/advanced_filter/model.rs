//! In-memory model of the advanced filter builder.
//!
//! Rows are the single source of truth; the view only renders them and
//! forwards edits. Row 0 is always the implicit WHERE and never shows a
//! logic selector, whatever its id.

use contracts::domain::a001_catalog_item::CatalogColumn;
use contracts::shared::filter::{FilterCondition, FilterLogic, FilterOperator, ValueArity};

/// HTML input flavour for a value box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Number,
}

impl InputKind {
    pub fn html_type(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Number => "number",
        }
    }
}

/// Which value inputs a row shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueInput {
    Hidden,
    Single(InputKind),
    Range(InputKind),
}

/// One editable filter row. Column and operator may still be unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRow {
    pub id: u32,
    pub column: Option<CatalogColumn>,
    pub operator: Option<FilterOperator>,
    pub value: String,
    pub value2: String,
    pub logic: FilterLogic,
}

impl FilterRow {
    fn new(id: u32) -> Self {
        Self {
            id,
            column: None,
            operator: None,
            value: String::new(),
            value2: String::new(),
            logic: FilterLogic::And,
        }
    }

    pub fn input(&self) -> ValueInput {
        let kind = match self.column {
            Some(c) if c.is_numeric() => InputKind::Number,
            _ => InputKind::Text,
        };
        match self.operator.map(|op| op.arity()) {
            Some(ValueArity::None) => ValueInput::Hidden,
            Some(ValueArity::Double) => ValueInput::Range(kind),
            Some(ValueArity::Single) | None => ValueInput::Single(kind),
        }
    }

    /// Validated condition, `None` when the row is incomplete
    fn to_condition(&self) -> Option<FilterCondition> {
        let column = self.column?;
        let operator = self.operator?;
        let arity = operator.arity();
        let condition = FilterCondition {
            id: self.id,
            column,
            operator,
            value: if arity == ValueArity::None {
                String::new()
            } else {
                self.value.trim().to_string()
            },
            value2: (arity == ValueArity::Double).then(|| self.value2.trim().to_string()),
            logic: Some(self.logic),
        };
        condition.has_required_values().then_some(condition)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterModel {
    rows: Vec<FilterRow>,
    next_id: u32,
}

impl FilterModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[FilterRow] {
        &self.rows
    }

    pub fn row(&self, id: u32) -> Option<&FilterRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append an empty row; returns its id
    pub fn add(&mut self) -> u32 {
        self.next_id += 1;
        self.rows.push(FilterRow::new(self.next_id));
        self.next_id
    }

    pub fn remove(&mut self, id: u32) {
        self.rows.retain(|r| r.id != id);
    }

    /// Only rows after the first carry a logic selector
    pub fn shows_logic(&self, id: u32) -> bool {
        self.rows.iter().position(|r| r.id == id).is_some_and(|idx| idx > 0)
    }

    pub fn set_column(&mut self, id: u32, column: Option<CatalogColumn>) {
        if let Some(row) = self.row_mut(id) {
            row.column = column;
        }
    }

    pub fn set_operator(&mut self, id: u32, operator: Option<FilterOperator>) {
        if let Some(row) = self.row_mut(id) {
            row.operator = operator;
            if operator.map(|op| op.arity()) != Some(ValueArity::Double) {
                row.value2.clear();
            }
        }
    }

    pub fn set_value(&mut self, id: u32, value: String) {
        if let Some(row) = self.row_mut(id) {
            row.value = value;
        }
    }

    pub fn set_value2(&mut self, id: u32, value: String) {
        if let Some(row) = self.row_mut(id) {
            row.value2 = value;
        }
    }

    pub fn set_logic(&mut self, id: u32, logic: FilterLogic) {
        if let Some(row) = self.row_mut(id) {
            row.logic = logic;
        }
    }

    pub fn input_for(&self, id: u32) -> ValueInput {
        self.row(id)
            .map(FilterRow::input)
            .unwrap_or(ValueInput::Single(InputKind::Text))
    }

    /// Valid conditions in row order; incomplete rows are dropped silently.
    /// The first surviving condition is the implicit WHERE.
    pub fn collect(&self) -> Vec<FilterCondition> {
        let mut out: Vec<FilterCondition> =
            self.rows.iter().filter_map(FilterRow::to_condition).collect();
        if let Some(first) = out.first_mut() {
            first.logic = None;
        }
        out
    }

    /// Applied conditions minus one; builder rows that were never applied stay out
    pub fn without_applied(applied: &[FilterCondition], id: u32) -> Vec<FilterCondition> {
        let mut out: Vec<FilterCondition> =
            applied.iter().filter(|c| c.id != id).cloned().collect();
        if let Some(first) = out.first_mut() {
            first.logic = None;
        }
        out
    }

    /// Drop every row and restart ids from zero
    pub fn clear(&mut self) {
        self.rows.clear();
        self.next_id = 0;
    }

    fn row_mut(&mut self, id: u32) -> Option<&mut FilterRow> {
        self.rows.iter_mut().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(model: &mut FilterModel, column: CatalogColumn, op: FilterOperator, value: &str) -> u32 {
        let id = model.add();
        model.set_column(id, Some(column));
        model.set_operator(id, Some(op));
        model.set_value(id, value.to_string());
        id
    }

    #[test]
    fn test_removing_a_tag_ignores_unapplied_edits() {
        let mut model = FilterModel::new();
        let a = filled(&mut model, CatalogColumn::ProductName, FilterOperator::Contains, "lamp");
        let b = filled(&mut model, CatalogColumn::ProductQty, FilterOperator::Gt, "3");
        let applied = model.collect();

        // edited in the builder but not applied
        model.set_value(b, "99".to_string());
        filled(&mut model, CatalogColumn::ProductPrice, FilterOperator::Lt, "10");

        let remaining = FilterModel::without_applied(&applied, a);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, b);
        assert_eq!(remaining[0].value, "3");
        assert_eq!(remaining[0].logic, None);
    }

    #[test]
    fn test_new_rows_default_to_and() {
        let mut model = FilterModel::new();
        let a = model.add();
        let b = model.add();
        assert_eq!((a, b), (1, 2));
        assert!(!model.shows_logic(a));
        assert!(model.shows_logic(b));
        assert_eq!(model.rows()[1].logic, FilterLogic::And);
    }

    #[test]
    fn test_removing_first_row_promotes_next_to_where() {
        let mut model = FilterModel::new();
        let a = model.add();
        let b = model.add();
        let c = model.add();
        model.set_logic(b, FilterLogic::Or);
        model.remove(a);
        assert!(!model.shows_logic(b));
        assert!(model.shows_logic(c));
    }

    #[test]
    fn test_collect_drops_incomplete_rows() {
        let mut model = FilterModel::new();
        // no column
        let r1 = model.add();
        model.set_operator(r1, Some(FilterOperator::Eq));
        model.set_value(r1, "x".into());
        // no operator
        let r2 = model.add();
        model.set_column(r2, Some(CatalogColumn::ProductName));
        model.set_value(r2, "x".into());
        // between with one value
        let r3 = filled(&mut model, CatalogColumn::ProductPrice, FilterOperator::Between, "1");
        model.set_value2(r3, String::new());
        // value operator with blank value
        filled(&mut model, CatalogColumn::ProductName, FilterOperator::Contains, "  ");
        // null checks need nothing
        let keep1 = filled(&mut model, CatalogColumn::ProductImageUrl, FilterOperator::IsNull, "");
        let keep2 = filled(&mut model, CatalogColumn::ProductDescription, FilterOperator::IsNotNull, "");

        let collected = model.collect();
        let ids: Vec<u32> = collected.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![keep1, keep2]);
        assert_eq!(collected[0].logic, None);
        assert_eq!(collected[1].logic, Some(FilterLogic::And));
    }

    #[test]
    fn test_between_keeps_both_values() {
        let mut model = FilterModel::new();
        let id = filled(&mut model, CatalogColumn::ProductQty, FilterOperator::Between, "1");
        model.set_value2(id, "9".into());
        let collected = model.collect();
        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].value, "1");
        assert_eq!(collected[0].value2.as_deref(), Some("9"));
    }

    #[test]
    fn test_input_widget_follows_column_and_operator() {
        let mut model = FilterModel::new();
        let id = model.add();
        assert_eq!(model.input_for(id), ValueInput::Single(InputKind::Text));
        model.set_column(id, Some(CatalogColumn::ProductPrice));
        assert_eq!(model.input_for(id), ValueInput::Single(InputKind::Number));
        model.set_operator(id, Some(FilterOperator::Between));
        assert_eq!(model.input_for(id), ValueInput::Range(InputKind::Number));
        model.set_operator(id, Some(FilterOperator::IsNull));
        assert_eq!(model.input_for(id), ValueInput::Hidden);
        model.set_column(id, Some(CatalogColumn::ProductName));
        model.set_operator(id, Some(FilterOperator::Between));
        assert_eq!(model.input_for(id), ValueInput::Range(InputKind::Text));
    }

    #[test]
    fn test_clear_resets_id_counter() {
        let mut model = FilterModel::new();
        model.add();
        model.add();
        model.clear();
        assert!(model.is_empty());
        assert_eq!(model.add(), 1);
    }

    #[test]
    fn test_or_chain_is_collected_verbatim() {
        let mut model = FilterModel::new();
        filled(&mut model, CatalogColumn::ProductPrice, FilterOperator::Gt, "10");
        let second = filled(&mut model, CatalogColumn::ProductQty, FilterOperator::Lt, "5");
        model.set_logic(second, FilterLogic::Or);

        let collected = model.collect();
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].column, CatalogColumn::ProductPrice);
        assert_eq!(collected[0].operator, FilterOperator::Gt);
        assert_eq!(collected[0].value, "10");
        assert_eq!(collected[0].logic, None);
        assert_eq!(collected[1].column, CatalogColumn::ProductQty);
        assert_eq!(collected[1].logic, Some(FilterLogic::Or));
    }
}
