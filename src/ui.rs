use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style, Stylize},
    symbols::border,
    text::{Line, Span, Text},
    widgets::{Block, Cell, Clear, Paragraph, Row as TableRow, Table, Wrap},
};

use crate::domain::{FILTER_BOX_ID, HELP_TEXT, TABLE_BODY_ID};
use crate::model::{Model, Status};
use crate::table::Row;

pub const BORDER_HEIGHT: usize = 2;
pub const TABLE_HEADER_HEIGHT: usize = 1;
pub const SEARCHBOX_HEIGHT: usize = 3;
pub const STATUSLINE_HEIGHT: usize = 1;
pub const COLUMN_WIDTH_MARGIN: usize = 2;

#[derive(Debug, Default)]
pub struct TableUI {}

impl TableUI {
    pub fn new() -> Self {
        Self {}
    }

    pub fn draw(&mut self, model: &Model, frame: &mut Frame) {
        let [table_area, search_area, status_area] = Layout::vertical([
            Constraint::Min(BORDER_HEIGHT as u16 + TABLE_HEADER_HEIGHT as u16),
            Constraint::Length(SEARCHBOX_HEIGHT as u16),
            Constraint::Length(STATUSLINE_HEIGHT as u16),
        ])
        .areas(frame.area());

        self.draw_table(model, frame, table_area);
        self.draw_searchbox(model, frame, search_area);
        self.draw_statusline(model, frame, status_area);

        if model.show_help() {
            self.draw_help(frame);
        }
    }

    fn draw_table(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let Some(table) = model.table() else {
            frame.render_widget(Block::bordered().title(" no table "), area);
            return;
        };

        let rows = model.rows_on_screen();
        let widths = column_widths(table.header(), &rows, model.max_column_width());

        let header = TableRow::new(table.header().cells().iter().map(|c| Cell::from(c.as_str())))
            .style(Style::new().add_modifier(Modifier::BOLD).underlined());
        let body = rows
            .iter()
            .map(|r| TableRow::new(r.cells().iter().map(|c| Cell::from(c.as_str()))));

        let title = Line::from(format!(" #{} ", TABLE_BODY_ID).bold());
        let counter = Line::from(format!(
            " {}/{} ",
            table.visible_count(),
            table.data_rows().len()
        ));
        let block = Block::bordered()
            .title(title.centered())
            .title_bottom(counter.right_aligned())
            .border_set(border::THICK);

        let widget = Table::new(body, widths.iter().map(|w| Constraint::Length(*w as u16)))
            .header(header)
            .column_spacing(1)
            .block(block);
        frame.render_widget(widget, area);
    }

    fn draw_searchbox(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let state = model.search_state();
        let block = Block::bordered().title(format!(" #{} ", FILTER_BOX_ID));
        let inner = block.inner(area);
        frame.render_widget(Paragraph::new(state.input.as_str()).block(block), area);

        if let Some(cursor_x) = cursor_column(inner, state.curser_pos) {
            frame.set_cursor_position(Position::new(cursor_x, inner.y));
        }
    }

    fn draw_statusline(&self, model: &Model, frame: &mut Frame, area: Rect) {
        let status = match model.status {
            Status::LOADING => "LOADING".yellow(),
            Status::READY => "READY".green(),
            Status::FAILED => "-".dark_gray(),
            Status::QUITTING => "QUIT".dark_gray(),
        };
        let line = Line::from(vec![
            " ".into(),
            status,
            " ".into(),
            Span::raw(model.status_message()),
            "  <F1> help".dark_gray(),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_help(&self, frame: &mut Frame) {
        let area = popup_area(frame.area(), 60, 60);
        let block = Block::bordered()
            .title(Line::from(" Help ".bold()).centered())
            .border_set(border::THICK);
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(Text::from(HELP_TEXT))
                .wrap(Wrap { trim: false })
                .block(block),
            area,
        );
    }
}

/// Width per column, from the widest cell currently on screen and the header.
pub fn column_widths(header: &Row, rows: &[&Row], max_column_width: usize) -> Vec<usize> {
    header
        .cells()
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let widest = rows
                .iter()
                .filter_map(|r| r.cells().get(idx))
                .map(|c| c.chars().count())
                .max()
                .unwrap_or(0);
            std::cmp::min(
                std::cmp::max(name.chars().count(), widest) + COLUMN_WIDTH_MARGIN,
                max_column_width,
            )
        })
        .collect()
}

/// Screen column of the search cursor, `None` once it runs past the box.
pub fn cursor_column(inner: Rect, curser_pos: usize) -> Option<u16> {
    let offset = u16::try_from(curser_pos).ok()?;
    let cursor_x = inner.x.saturating_add(offset);
    (offset < inner.width).then_some(cursor_x)
}

fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [area] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(ratatui::layout::Flex::Center)
        .areas(area);
    let [area] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(ratatui::layout::Flex::Center)
        .areas(area);
    area
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Message, ViewerConfig};
    use crate::record::Record;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn widths_fit_header_and_cells() {
        let header = Row::new(vec!["Name".into(), "GPA".into()]);
        let a = Row::new(vec!["Alexandra".into(), "4".into()]);
        let b = Row::new(vec!["Bo".into(), "3.95".into()]);
        assert_eq!(column_widths(&header, &[&a, &b], 40), vec![11, 6]);
        assert_eq!(column_widths(&header, &[&a, &b], 8), vec![8, 6]);
    }

    #[test]
    fn cursor_stays_inside_the_search_box() {
        let inner = Rect::new(1, 5, 10, 1);
        assert_eq!(cursor_column(inner, 0), Some(1));
        assert_eq!(cursor_column(inner, 9), Some(10));
        assert_eq!(cursor_column(inner, 10), None);
        assert_eq!(cursor_column(inner, 70_000), None);
        let edge = Rect { x: u16::MAX - 2, y: 0, width: 10, height: 1 };
        assert_eq!(cursor_column(edge, 5), Some(u16::MAX));
    }

    #[test]
    fn draws_visible_rows_only() {
        let cfg = ViewerConfig::default();
        let mut model = Model::init(&cfg, 60, 20);
        let records = Record::parse_list(r#"[{"Name":"Alice"},{"Name":"Bob"}]"#).unwrap();
        model.update(Some(Message::Loaded(Ok(records), 1))).unwrap();
        for c in "Bob".chars() {
            let key = ratatui::crossterm::event::KeyEvent::new(
                ratatui::crossterm::event::KeyCode::Char(c),
                ratatui::crossterm::event::KeyModifiers::NONE,
            );
            model.update(Some(Message::Keystroke(key))).unwrap();
        }

        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut ui = TableUI::new();
        terminal.draw(|f| ui.draw(&model, f)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(screen.contains("Name"));
        assert!(screen.contains("Bob"));
        assert!(!screen.contains("Alice"));
        assert!(screen.contains("#filterBox"));
    }
}
