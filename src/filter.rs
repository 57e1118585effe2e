use rayon::prelude::*;
use tracing::trace;

use crate::table::RowContainer;

/// Split a query on single spaces. Repeated spaces yield empty terms, and an
/// empty term matches every row.
pub fn split_terms(query: &str) -> Vec<&str> {
    query.split(' ').collect()
}

/// Keystroke handler binding a search box to a table body.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFilter {
    input_id: String,
    table_id: String,
}

impl RowFilter {
    pub(crate) fn new(input_id: &str, table_id: &str) -> Self {
        Self {
            input_id: input_id.to_string(),
            table_id: table_id.to_string(),
        }
    }

    pub fn input_id(&self) -> &str {
        &self.input_id
    }

    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    /// Re-evaluate row visibility for the current query.
    ///
    /// Every data row is hidden first, then each term shows the rows whose
    /// text contains it. A row shown by one term stays shown. Returns the
    /// number of visible data rows.
    pub fn on_keyup<C: RowContainer + ?Sized>(&self, query: &str, container: &mut C) -> usize {
        let terms = split_terms(query);
        let rows = container.data_rows_mut();

        rows.par_iter_mut().for_each(|row| {
            row.hide();
            if terms.iter().any(|term| row.text_content().contains(term)) {
                row.show();
            }
        });

        let visible = rows.iter().filter(|r| r.is_visible()).count();
        trace!(
            "Filter {:?} ({} terms) keeps {}/{} rows",
            query,
            terms.len(),
            visible,
            rows.len()
        );
        visible
    }
}
