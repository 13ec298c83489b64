use contracts::domain::a001_catalog_item::CatalogColumn;
use contracts::projections::p900_catalog_table::{SortColumn, SortDirection, TablePageRequest};
use contracts::shared::filter::FilterCondition;

use super::columns::ColumnPreset;
use crate::shared::config::DEFAULT_PAGE_SIZE;

/// View state of the catalog data grid.
///
/// Every mutator returns whether the grid must reload; the component issues
/// exactly one load per `true`.
#[derive(Clone, Debug, PartialEq)]
pub struct TableViewState {
    // Pagination (1-based)
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,

    // Sorting
    pub sort_column: SortColumn,
    pub sort_direction: SortDirection,

    // Filtering
    pub search: String,
    pub filters: Vec<FilterCondition>,

    pub visible_columns: Vec<CatalogColumn>,

    pub is_loaded: bool,
}

impl Default for TableViewState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total_count: 0,
            total_pages: 0,
            sort_column: SortColumn::RowId,
            sort_direction: SortDirection::Asc,
            search: String::new(),
            filters: Vec::new(),
            visible_columns: ColumnPreset::Compact.columns(),
            is_loaded: false,
        }
    }
}

impl TableViewState {
    /// Highest page the user may navigate to
    fn last_page(&self) -> usize {
        self.total_pages.max(1)
    }

    pub fn can_go_prev(&self) -> bool {
        self.page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page == 0 || page > self.last_page() {
            log::debug!("page {} rejected (total pages {})", page, self.total_pages);
            return false;
        }
        if page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    /// Same column flips direction, another column starts ascending
    pub fn toggle_sort(&mut self, column: SortColumn) -> bool {
        if self.sort_column == column {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_column = column;
            self.sort_direction = SortDirection::Asc;
        }
        self.page = 1;
        true
    }

    pub fn set_page_size(&mut self, size: usize) -> bool {
        if size == 0 || size == self.page_size {
            return false;
        }
        self.page_size = size;
        self.page = 1;
        true
    }

    pub fn set_search(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query == self.search {
            return false;
        }
        self.search = query.to_string();
        self.page = 1;
        true
    }

    pub fn apply_filters(&mut self, filters: Vec<FilterCondition>) -> bool {
        self.filters = filters;
        self.page = 1;
        true
    }

    pub fn clear_filters(&mut self) -> bool {
        self.filters.clear();
        self.page = 1;
        true
    }

    pub fn apply_columns(&mut self, columns: Vec<CatalogColumn>) -> bool {
        self.visible_columns = columns;
        true
    }

    /// Record the server total. Returns `true` when the current page fell
    /// off the end (e.g. after deleting the last row) and was clamped.
    pub fn set_total(&mut self, total: usize) -> bool {
        self.total_count = total;
        self.total_pages = if self.page_size == 0 {
            0
        } else {
            total.div_ceil(self.page_size)
        };
        self.is_loaded = true;
        if self.page > self.last_page() {
            self.page = self.last_page();
            return true;
        }
        false
    }

    pub fn to_request(&self, catalog_id: u64) -> TablePageRequest {
        TablePageRequest {
            catalog_id,
            page: self.page,
            per_page: self.page_size,
            search: self.search.clone(),
            sort_column: self.sort_column,
            sort_direction: self.sort_direction,
            filters: self.filters.clone(),
        }
    }

    /// "Showing 26 to 50 of 120 entries"
    pub fn range_label(&self) -> String {
        if self.total_count == 0 {
            return "No entries found".to_string();
        }
        let from = (self.page - 1) * self.page_size + 1;
        let to = (self.page * self.page_size).min(self.total_count);
        format!("Showing {} to {} of {} entries", from, to, self.total_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::filter::{FilterLogic, FilterOperator};

    fn loaded(total: usize) -> TableViewState {
        let mut st = TableViewState::default();
        st.set_total(total);
        st
    }

    #[test]
    fn test_defaults() {
        let st = TableViewState::default();
        assert_eq!(st.page, 1);
        assert_eq!(st.page_size, 25);
        assert_eq!(st.sort_column, SortColumn::RowId);
        assert_eq!(st.sort_direction, SortDirection::Asc);
        assert_eq!(st.visible_columns, ColumnPreset::Compact.columns());
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(loaded(0).total_pages, 0);
        assert_eq!(loaded(25).total_pages, 1);
        assert_eq!(loaded(26).total_pages, 2);
        assert_eq!(loaded(120).total_pages, 5);
    }

    #[test]
    fn test_out_of_range_pages_are_rejected() {
        let mut st = loaded(120);
        assert!(!st.go_to_page(0));
        assert!(!st.go_to_page(6));
        assert_eq!(st.page, 1);
        assert!(st.go_to_page(5));
        assert_eq!(st.page, 5);
        assert!(!st.go_to_page(5));
    }

    #[test]
    fn test_empty_table_only_allows_first_page() {
        let mut st = loaded(0);
        assert!(!st.go_to_page(2));
        assert!(!st.can_go_next());
        assert!(!st.can_go_prev());
    }

    #[test]
    fn test_sort_toggle_cycle() {
        let mut st = TableViewState::default();
        let price = SortColumn::Field(CatalogColumn::ProductPrice);
        assert!(st.toggle_sort(price));
        assert_eq!(st.sort_direction, SortDirection::Asc);
        st.toggle_sort(price);
        assert_eq!(st.sort_direction, SortDirection::Desc);
        st.toggle_sort(price);
        assert_eq!(st.sort_direction, SortDirection::Asc);
        st.toggle_sort(price);
        st.toggle_sort(SortColumn::Field(CatalogColumn::ProductName));
        assert_eq!(st.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn test_search_and_page_size_reset_page() {
        let mut st = loaded(120);
        st.go_to_page(3);
        assert!(st.set_search("  lamp "));
        assert_eq!(st.search, "lamp");
        assert_eq!(st.page, 1);
        assert!(!st.set_search("lamp"));

        st.go_to_page(2);
        assert!(st.set_page_size(50));
        assert_eq!(st.page, 1);
        assert!(!st.set_page_size(50));
        assert!(!st.set_page_size(0));
    }

    #[test]
    fn test_applied_filter_chain_reaches_request_verbatim() {
        let chain = vec![
            FilterCondition {
                id: 1,
                column: CatalogColumn::ProductPrice,
                operator: FilterOperator::Gt,
                value: "10".into(),
                value2: None,
                logic: None,
            },
            FilterCondition {
                id: 2,
                column: CatalogColumn::ProductQty,
                operator: FilterOperator::Lt,
                value: "5".into(),
                value2: None,
                logic: Some(FilterLogic::Or),
            },
        ];

        let mut st = loaded(200);
        st.go_to_page(4);
        assert!(st.apply_filters(chain.clone()));
        assert_eq!(st.page, 1);

        let req = st.to_request(7);
        assert_eq!(req.catalog_id, 7);
        assert_eq!(req.page, 1);
        assert_eq!(req.per_page, 25);
        assert_eq!(req.filters, chain);
    }

    #[test]
    fn test_total_shrink_clamps_page() {
        let mut st = loaded(51);
        st.go_to_page(3);
        assert!(st.set_total(50));
        assert_eq!(st.page, 2);
        assert!(!st.set_total(50));
    }

    #[test]
    fn test_range_label() {
        let mut st = loaded(120);
        assert_eq!(st.range_label(), "Showing 1 to 25 of 120 entries");
        st.go_to_page(5);
        assert_eq!(st.range_label(), "Showing 101 to 120 of 120 entries");
        assert_eq!(loaded(0).range_label(), "No entries found");
    }
}
