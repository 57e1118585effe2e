use ratatui::crossterm::event::KeyEvent;
use tracing::{debug, info, trace, warn};

use crate::domain::{ErrorPolicy, FILTER_BOX_ID, Message, StvError, TABLE_BODY_ID, ViewerConfig};
use crate::filter::RowFilter;
use crate::inputter::InputResult;
use crate::loader::render_rows;
use crate::page::Page;
use crate::record::Record;
use crate::table::{Row, TableBody};
use crate::ui::{BORDER_HEIGHT, SEARCHBOX_HEIGHT, STATUSLINE_HEIGHT, TABLE_HEADER_HEIGHT};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Status {
    LOADING,
    READY,
    FAILED,
    QUITTING,
}

#[derive(Default, Clone, Debug, PartialEq)]
pub struct UILayout {
    pub width: usize,
    pub height: usize,
    pub table_height: usize, // Number of data rows that fit on screen
}

impl UILayout {
    pub fn from_values(ui_width: usize, ui_height: usize) -> Self {
        let chrome = BORDER_HEIGHT + TABLE_HEADER_HEIGHT + SEARCHBOX_HEIGHT + STATUSLINE_HEIGHT;
        let layout = UILayout {
            width: ui_width,
            height: ui_height,
            table_height: ui_height.saturating_sub(chrome).max(1),
        };
        trace!("Build UILayout: {:?}", layout);
        layout
    }
}

pub struct Model {
    config: ViewerConfig,
    pub status: Status,
    page: Page,
    filter: Option<RowFilter>,
    offset_row: usize, // First visible data row shown on screen
    uilayout: UILayout,
    show_help: bool,
    status_message: String,
}

impl Model {
    pub fn init(config: &ViewerConfig, ui_width: usize, ui_height: usize) -> Self {
        Self::with_page(config, Page::default(), ui_width, ui_height)
    }

    pub fn with_page(config: &ViewerConfig, page: Page, ui_width: usize, ui_height: usize) -> Self {
        Self {
            config: config.clone(),
            status: Status::LOADING,
            page,
            filter: None,
            offset_row: 0,
            uilayout: UILayout::from_values(ui_width, ui_height),
            show_help: false,
            status_message: "Loading ...".to_string(),
        }
    }

    pub fn update(&mut self, message: Option<Message>) -> Result<(), StvError> {
        let Some(msg) = message else {
            return Ok(());
        };

        if self.show_help {
            match msg {
                Message::Quit => self.quit(),
                Message::Resize(width, height) => self.ui_resize(width, height),
                Message::Loaded(result, elapsed) => self.loaded(result, elapsed),
                _ => self.show_help = false,
            }
            return Ok(());
        }

        match msg {
            Message::Quit => self.quit(),
            Message::Help => self.show_help = true,
            Message::ScrollUp(n) => self.scroll_up(n),
            Message::ScrollDown(n) => self.scroll_down(n),
            Message::PageUp => self.scroll_up(self.uilayout.table_height),
            Message::PageDown => self.scroll_down(self.uilayout.table_height),
            Message::Resize(width, height) => self.ui_resize(width, height),
            Message::Keystroke(key) => self.keystroke(key),
            Message::Loaded(result, elapsed) => self.loaded(result, elapsed),
        }
        Ok(())
    }

    /// Continuation of the fetch: render rows and attach the filter, or stay
    /// empty on failure.
    pub fn loaded(&mut self, result: Result<Vec<Record>, StvError>, elapsed_ms: u128) {
        match result {
            Ok(records) => {
                let table = match self.page.table_body_mut(TABLE_BODY_ID) {
                    Ok(table) => table,
                    Err(e) => {
                        warn!("Dropping {} records: {e}", records.len());
                        return;
                    }
                };
                let appended = render_rows(table, &records);
                info!("Rendered {appended} rows in {elapsed_ms}ms");

                self.filter = match self.page.attach_filter() {
                    Ok(filter) => Some(filter),
                    Err(e) => {
                        warn!("Filter not attached: {e}");
                        None
                    }
                };
                self.status = Status::READY;
                self.set_status_message(format!("Loaded {appended} records in {elapsed_ms}ms"));
            }
            Err(e) => {
                debug!("Loading failed after {elapsed_ms}ms: {e}");
                self.status = Status::FAILED;
                match self.config.error_policy {
                    ErrorPolicy::Silent => self.set_status_message(""),
                    ErrorPolicy::Report => self.set_status_message(format!("Loading failed: {e}")),
                }
            }
        }
    }

    fn keystroke(&mut self, key: KeyEvent) {
        match self.page.search_box_mut(FILTER_BOX_ID) {
            Ok(search) => {
                search.keystroke(key);
            }
            Err(e) => {
                warn!("Keystroke ignored: {e}");
                return;
            }
        }

        let Some(filter) = &self.filter else {
            return;
        };
        match self.page.keyup(filter) {
            Ok(visible) => {
                self.offset_row = 0;
                let total = self.table().map(|t| t.data_rows().len()).unwrap_or(0);
                self.set_status_message(format!("Showing {visible}/{total} rows"));
            }
            Err(e) => warn!("Filter skipped: {e}"),
        }
    }

    /// Replace the search text and run the filter once, as a single keystroke
    /// would.
    pub fn set_query(&mut self, query: &str) -> Result<usize, StvError> {
        self.page.search_box_mut(FILTER_BOX_ID)?.set_value(query);
        match &self.filter {
            Some(filter) => self.page.keyup(filter),
            None => Ok(self.visible_count()),
        }
    }

    fn visible_count(&self) -> usize {
        self.table().map(|t| t.visible_count()).unwrap_or(0)
    }

    fn scroll_up(&mut self, size: usize) {
        self.offset_row = self.offset_row.saturating_sub(size);
    }

    fn scroll_down(&mut self, size: usize) {
        let last = self.visible_count().saturating_sub(1);
        self.offset_row = std::cmp::min(self.offset_row + size, last);
    }

    fn ui_resize(&mut self, width: usize, height: usize) {
        trace!(
            "UI was resized! w:{}->{}, h:{}->{}",
            self.uilayout.width, width, self.uilayout.height, height
        );
        self.uilayout = UILayout::from_values(width, height);
    }

    fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    pub fn quit(&mut self) {
        self.status = Status::QUITTING;
    }

    // -------------------- Accessors for rendering ---------------------- //

    pub fn table(&self) -> Option<&TableBody> {
        self.page.table_body(TABLE_BODY_ID).ok()
    }

    /// Visible data rows that fit on screen, starting at the scroll offset.
    pub fn rows_on_screen(&self) -> Vec<&Row> {
        match self.table() {
            Some(table) => table
                .visible_data_rows()
                .skip(self.offset_row)
                .take(self.uilayout.table_height)
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn search_state(&self) -> InputResult {
        self.page
            .search_box(FILTER_BOX_ID)
            .map(|s| s.state())
            .unwrap_or_default()
    }

    pub fn is_filter_attached(&self) -> bool {
        self.filter.is_some()
    }

    pub fn offset_row(&self) -> usize {
        self.offset_row
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn max_column_width(&self) -> usize {
        self.config.max_column_width
    }
}
