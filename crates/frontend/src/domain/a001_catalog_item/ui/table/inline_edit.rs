use contracts::domain::a001_catalog_item::aggregate::{CatalogItem, CatalogItemId};
use contracts::domain::a001_catalog_item::CatalogColumn;
use contracts::projections::p900_catalog_table::UpdateItemRequest;

use super::columns::TableColumn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPhase {
    Editing,
    Saving,
}

/// What a commit asks the caller to do
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// Draft equals the stored value; close without a request
    Unchanged,
    Save(UpdateItemRequest),
    /// A save for this cell is already running
    Busy,
}

/// One cell being edited in place
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub item_id: CatalogItemId,
    pub column: CatalogColumn,
    pub original: String,
    pub draft: String,
    pub phase: EditPhase,
    /// Set after a failed save; the input stays open with the draft
    pub error: bool,
}

impl EditSession {
    /// `None` for cells that are not inline editable
    pub fn begin(item: &CatalogItem, column: CatalogColumn) -> Option<Self> {
        if !TableColumn::of(column).editable {
            return None;
        }
        let original = item.value(column).unwrap_or_default().to_string();
        Some(Self {
            item_id: item.id,
            column,
            draft: original.clone(),
            original,
            phase: EditPhase::Editing,
            error: false,
        })
    }

    pub fn is_for(&self, item_id: CatalogItemId, column: CatalogColumn) -> bool {
        self.item_id == item_id && self.column == column
    }

    pub fn is_saving(&self) -> bool {
        self.phase == EditPhase::Saving
    }

    pub fn set_draft(&mut self, value: String) {
        if self.phase == EditPhase::Editing {
            self.draft = value;
        }
    }

    pub fn commit(&mut self) -> CommitOutcome {
        if self.phase == EditPhase::Saving {
            return CommitOutcome::Busy;
        }
        if self.draft == self.original {
            log::debug!("inline edit of {} unchanged, no request", self.column);
            return CommitOutcome::Unchanged;
        }
        self.phase = EditPhase::Saving;
        self.error = false;
        CommitOutcome::Save(UpdateItemRequest::single(
            self.item_id,
            self.column,
            self.draft.clone(),
        ))
    }

    /// Back to an editable input carrying the rejected draft
    pub fn fail(&mut self) {
        self.phase = EditPhase::Editing;
        self.error = true;
    }

    /// The input takes focus back after a rejected save
    pub fn needs_refocus(&self) -> bool {
        self.error && self.phase == EditPhase::Editing
    }

    pub fn clear_error(&mut self) {
        self.error = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> CatalogItem {
        CatalogItem {
            id: CatalogItemId(9),
            product_name: Some("Lamp".to_string()),
            product_image_url: Some("https://x/lamp.png".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_unchanged_value_sends_nothing() {
        let mut session = EditSession::begin(&item(), CatalogColumn::ProductName).unwrap();
        assert_eq!(session.commit(), CommitOutcome::Unchanged);
        assert_eq!(session.phase, EditPhase::Editing);
    }

    #[test]
    fn test_changed_value_builds_update() {
        let mut session = EditSession::begin(&item(), CatalogColumn::ProductName).unwrap();
        session.set_draft("Desk lamp".to_string());
        let CommitOutcome::Save(req) = session.commit() else {
            panic!("expected a save");
        };
        assert_eq!(req.item_id, CatalogItemId(9));
        assert_eq!(req.data.len(), 1);
        assert_eq!(req.value_of(CatalogColumn::ProductName), Some("Desk lamp"));
        assert!(session.is_saving());
        assert_eq!(session.commit(), CommitOutcome::Busy);
    }

    #[test]
    fn test_failure_keeps_the_editor_open() {
        let mut session = EditSession::begin(&item(), CatalogColumn::ProductName).unwrap();
        session.set_draft("Desk lamp".to_string());
        session.commit();
        session.fail();

        assert_eq!(session.phase, EditPhase::Editing);
        assert!(session.error);
        assert_eq!(session.draft, "Desk lamp");
        assert_eq!(session.original, "Lamp");
        assert!(session.needs_refocus());
        // retry goes out again
        assert!(matches!(session.commit(), CommitOutcome::Save(_)));
        assert!(!session.error);
        assert!(!session.needs_refocus());
    }

    #[test]
    fn test_image_and_empty_cells() {
        assert!(EditSession::begin(&item(), CatalogColumn::ProductImageUrl).is_none());
        let session = EditSession::begin(&item(), CatalogColumn::ProductPrice).unwrap();
        assert_eq!(session.original, "");
    }
}
