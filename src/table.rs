/// A rendered table row. Cell content is fixed at construction, only the
/// visibility flag changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    cells: Vec<String>,
    text: String, // Concatenated cell text, what a substring match runs against
    visible: bool,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        let text = cells.concat();
        Self {
            cells,
            text,
            visible: true,
        }
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn text_content(&self) -> &str {
        &self.text
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// Anything rows can be appended to and filtered in.
///
/// The first row of a container is its header and is not part of
/// `data_rows_mut`.
pub trait RowContainer {
    fn append_row(&mut self, row: Row);
    fn data_rows_mut(&mut self) -> &mut [Row];
}

#[derive(Debug, Clone)]
pub struct TableBody {
    id: String,
    rows: Vec<Row>,
}

impl TableBody {
    pub fn new(id: &str, header: &[&str]) -> Self {
        let header = Row::new(header.iter().map(|h| h.to_string()).collect());
        Self {
            id: id.to_string(),
            rows: vec![header],
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn header(&self) -> &Row {
        &self.rows[0]
    }

    pub fn data_rows(&self) -> &[Row] {
        &self.rows[1..]
    }

    pub fn visible_data_rows(&self) -> impl Iterator<Item = &Row> {
        self.data_rows().iter().filter(|r| r.is_visible())
    }

    pub fn visible_count(&self) -> usize {
        self.visible_data_rows().count()
    }

    /// Total number of rows, header included.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

impl RowContainer for TableBody {
    fn append_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    fn data_rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows[1..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn new_table_holds_only_the_header() {
        let table = TableBody::new("t", &["A", "B"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.header().cells(), cells(&["A", "B"]).as_slice());
        assert!(table.data_rows().is_empty());
        assert_eq!(table.id(), "t");
    }

    #[test]
    fn text_content_joins_cells_without_separator() {
        let row = Row::new(cells(&["Alice", "3.9", "160"]));
        assert_eq!(row.text_content(), "Alice3.9160");
    }

    #[test]
    fn data_rows_skip_the_header() {
        let mut table = TableBody::new("t", &["A"]);
        table.append_row(Row::new(cells(&["x"])));
        table.append_row(Row::new(cells(&["y"])));
        assert_eq!(table.len(), 3);
        assert_eq!(table.data_rows_mut().len(), 2);
        table.data_rows_mut()[0].hide();
        assert!(table.header().is_visible());
        assert_eq!(table.visible_count(), 1);
    }
}
