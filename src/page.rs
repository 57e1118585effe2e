use ratatui::crossterm::event::KeyEvent;
use tracing::{debug, trace};

use crate::domain::{FILTER_BOX_ID, HEADER, StvError, TABLE_BODY_ID};
use crate::filter::RowFilter;
use crate::inputter::{InputResult, Inputter};
use crate::table::TableBody;

/// The text input driving the filter.
#[derive(Debug, Clone, Default)]
pub struct SearchBox {
    id: String,
    input: Inputter,
}

impl SearchBox {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            input: Inputter::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn set_value(&mut self, value: &str) {
        self.input.set(value);
    }

    pub fn state(&self) -> InputResult {
        self.input.get()
    }

    pub fn keystroke(&mut self, key: KeyEvent) -> InputResult {
        self.input.read(key)
    }
}

/// The elements the loader and the filter work on, addressed by id.
#[derive(Debug, Clone)]
pub struct Page {
    table: Option<TableBody>,
    search: Option<SearchBox>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new(
            Some(TableBody::new(TABLE_BODY_ID, &HEADER)),
            Some(SearchBox::new(FILTER_BOX_ID)),
        )
    }
}

impl Page {
    pub fn new(table: Option<TableBody>, search: Option<SearchBox>) -> Self {
        Self { table, search }
    }

    pub fn table_body(&self, id: &str) -> Result<&TableBody, StvError> {
        self.table
            .as_ref()
            .filter(|t| t.id() == id)
            .ok_or_else(|| StvError::TargetNotFound(id.to_string()))
    }

    pub fn table_body_mut(&mut self, id: &str) -> Result<&mut TableBody, StvError> {
        self.table
            .as_mut()
            .filter(|t| t.id() == id)
            .ok_or_else(|| StvError::TargetNotFound(id.to_string()))
    }

    pub fn search_box(&self, id: &str) -> Result<&SearchBox, StvError> {
        self.search
            .as_ref()
            .filter(|s| s.id() == id)
            .ok_or_else(|| StvError::TargetNotFound(id.to_string()))
    }

    pub fn search_box_mut(&mut self, id: &str) -> Result<&mut SearchBox, StvError> {
        self.search
            .as_mut()
            .filter(|s| s.id() == id)
            .ok_or_else(|| StvError::TargetNotFound(id.to_string()))
    }

    /// Bind a filter to the search box and the table body.
    pub fn attach_filter(&self) -> Result<RowFilter, StvError> {
        let input = self.search_box(FILTER_BOX_ID)?;
        let table = self.table_body(TABLE_BODY_ID)?;
        debug!("Attaching filter #{} -> #{}", input.id(), table.id());
        Ok(RowFilter::new(input.id(), table.id()))
    }

    /// Run an attached filter against the current search box value.
    pub fn keyup(&mut self, filter: &RowFilter) -> Result<usize, StvError> {
        let query = self.search_box(filter.input_id())?.value().to_string();
        let table = self.table_body_mut(filter.table_id())?;
        let visible = filter.on_keyup(&query, table);
        trace!("Keyup on #{} -> {} visible rows", filter.input_id(), visible);
        Ok(visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Row, RowContainer};

    #[test]
    fn default_page_has_both_targets() {
        let page = Page::default();
        assert_eq!(page.table_body(TABLE_BODY_ID).unwrap().len(), 1);
        assert_eq!(page.search_box(FILTER_BOX_ID).unwrap().value(), "");
        assert!(page.attach_filter().is_ok());
    }

    #[test]
    fn unknown_id_is_target_not_found() {
        let page = Page::default();
        assert!(matches!(
            page.table_body("other"),
            Err(StvError::TargetNotFound(id)) if id == "other"
        ));
    }

    #[test]
    fn attach_fails_without_search_box() {
        let page = Page::new(Some(TableBody::new(TABLE_BODY_ID, &HEADER)), None);
        assert!(matches!(
            page.attach_filter(),
            Err(StvError::TargetNotFound(id)) if id == FILTER_BOX_ID
        ));
    }

    #[test]
    fn keyup_reads_the_current_value() {
        let mut page = Page::default();
        {
            let table = page.table_body_mut(TABLE_BODY_ID).unwrap();
            table.append_row(Row::new(vec!["Alice".into()]));
            table.append_row(Row::new(vec!["Bob".into()]));
        }
        let filter = page.attach_filter().unwrap();
        page.search_box_mut(FILTER_BOX_ID).unwrap().set_value("Bob");
        assert_eq!(page.keyup(&filter).unwrap(), 1);
        page.search_box_mut(FILTER_BOX_ID).unwrap().set_value("");
        assert_eq!(page.keyup(&filter).unwrap(), 2);
    }
}
