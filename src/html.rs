//! HTML export of a table body.
//!
//! Cells are escaped, so record fields always come out as text.

use std::fmt::Write;

use crate::table::{Row, TableBody};

/// Escape HTML special characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

/// Render the whole table body. Hidden rows are kept with `display: none`,
/// the header row uses `<th>` cells.
pub fn render_table(table: &TableBody) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<table>");
    let _ = writeln!(out, "<tbody id=\"{}\">", escape_html(table.id()));
    render_row(&mut out, table.header(), "th");
    for row in table.data_rows() {
        render_row(&mut out, row, "td");
    }
    let _ = writeln!(out, "</tbody>");
    let _ = writeln!(out, "</table>");
    out
}

fn render_row(out: &mut String, row: &Row, cell_tag: &str) {
    if row.is_visible() {
        out.push_str("<tr>");
    } else {
        out.push_str("<tr style=\"display: none\">");
    }
    for cell in row.cells() {
        let _ = write!(out, "<{cell_tag}>{}</{cell_tag}>", escape_html(cell));
    }
    out.push_str("</tr>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::RowContainer;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("a & \"b\""), "a &amp; &quot;b&quot;");
    }

    #[test]
    fn renders_header_and_rows() {
        let mut table = TableBody::new("hw2table", &["Name", "GPA"]);
        table.append_row(Row::new(vec!["<i>Al</i>".into(), "3.9".into()]));
        table.append_row(Row::new(vec!["Bob".into(), "3.1".into()]));
        table.data_rows_mut()[1].hide();

        let html = render_table(&table);
        assert!(html.contains("<tbody id=\"hw2table\">"));
        assert!(html.contains("<tr><th>Name</th><th>GPA</th></tr>"));
        assert!(html.contains("<tr><td>&lt;i&gt;Al&lt;/i&gt;</td><td>3.9</td></tr>"));
        assert!(html.contains("<tr style=\"display: none\"><td>Bob</td><td>3.1</td></tr>"));
        assert_eq!(html.matches("<tr").count(), 3);
    }
}
