//! "More details" rows.
//!
//! A details row holds a single cell wrapping a nested sub-table. Two
//! shapes occur:
//!
//! - [`tabular`]: the sub-table's first row holds bold column headers and
//!   every following row is one lot (e.g. exercise lots at different
//!   prices).
//! - [`panel`]: every cell is a label followed by a bold value, all of which
//!   describe a single event (e.g. the breakdown of a lapse).

use std::collections::BTreeMap;

use super::cursor::Cursor;
use super::layout::Layout;
use crate::error::{Error, Result};

/// Key-value pairs read from a details sub-table.
pub type Details = BTreeMap<String, String>;

/// Move into the sub-table body of the details row under the cursor.
fn enter(cursor: &mut Cursor<'_>, layout: &Layout) -> Result<()> {
    cursor.follow(layout.details_path);
    cursor.check().map_err(|miss| Error::Structure {
        context: "details sub-table",
        miss,
    })
}

/// Read a headed sub-table, one mapping per complete row.
///
/// Trailing empty headers are dropped. Rows with fewer cells than headers
/// are skipped. The cursor is left where it was.
pub fn tabular(cursor: &mut Cursor<'_>, layout: &Layout) -> Result<Vec<Details>> {
    cursor.scoped(|c| {
        enter(c, layout)?;
        c.descend(layout.row_tag);
        c.check().map_err(|miss| Error::Structure {
            context: "details header row",
            miss,
        })?;

        let headers = read_headers(c, layout);

        let mut lots = Vec::new();
        c.advance_sibling(layout.row_tag);
        while c.ok() {
            if let Some(lot) = c.scoped(|c| read_lot(c, layout, &headers)) {
                lots.push(lot);
            }
            c.advance_sibling(layout.row_tag);
        }
        Ok(lots)
    })
}

fn read_headers(cursor: &mut Cursor<'_>, layout: &Layout) -> Vec<String> {
    let mut headers = cursor.scoped(|c| {
        let mut headers = Vec::new();
        c.descend(layout.cell_tag);
        while c.ok() {
            let header = c.scoped(|c| c.descend(layout.emphasis_tag).peek_text().trim().to_string());
            headers.push(header);
            c.advance_sibling(layout.cell_tag);
        }
        headers
    });

    while headers.last().is_some_and(|h| h.is_empty()) {
        headers.pop();
    }
    headers
}

fn read_lot(cursor: &mut Cursor<'_>, layout: &Layout, headers: &[String]) -> Option<Details> {
    let mut lot = Details::new();
    cursor.descend(layout.cell_tag);
    for header in headers {
        if !cursor.ok() {
            return None;
        }
        lot.insert(header.clone(), cursor.peek_text().trim().to_string());
        cursor.advance_sibling(layout.cell_tag);
    }
    Some(lot)
}

/// Read a label/value panel into a single mapping.
///
/// Each cell's leading text is the key. The value is the bold text in the
/// cell, or failing that the text following the bold element. Cells with an
/// empty key are ignored. The cursor is left where it was.
pub fn panel(cursor: &mut Cursor<'_>, layout: &Layout) -> Result<Details> {
    cursor.scoped(|c| {
        enter(c, layout)?;

        let mut details = Details::new();
        c.descend(layout.row_tag);
        while c.ok() {
            c.scoped(|c| {
                c.descend(layout.cell_tag);
                while c.ok() {
                    let key = c.peek_text().trim();
                    let value = c.scoped(|c| {
                        c.descend(layout.emphasis_tag);
                        match c.peek_text().trim() {
                            "" => c.sibling_text().trim(),
                            bold => bold,
                        }
                    });
                    if !key.is_empty() {
                        details.insert(key.to_string(), value.to_string());
                    }
                    c.advance_sibling(layout.cell_tag);
                }
            });
            c.advance_sibling(layout.row_tag);
        }
        Ok(details)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{ArenaDom, parse_html};
    use crate::history::{NotFound, Step};

    /// Wrap sub-table rows in the details row chain.
    fn details_row(rows: &str) -> String {
        format!(
            "<table><tr><td><div><div>\
             <table><tr><td>Details</td></tr></table>\
             <table><tbody>{rows}</tbody></table>\
             </div></div></td></tr></table>"
        )
    }

    fn row_cursor(dom: &ArenaDom) -> Cursor<'_> {
        let tr = dom.find(|dom, id| dom.is_tag(id, "tr")).expect("a row");
        Cursor::new(dom, tr)
    }

    #[test]
    fn test_tabular_reads_each_complete_row() {
        let dom = parse_html(&details_row(
            "<tr><td><b>Shares</b></td><td><b> Price </b></td><td><b></b></td><td></td></tr>\
             <tr><td>10</td><td>$1.00</td><td>x</td></tr>\
             <tr><td>5</td></tr>\
             <tr><td>20</td><td>$2.00</td></tr>",
        ));
        let mut cursor = row_cursor(&dom);

        let lots = tabular(&mut cursor, &Layout::SCHWAB_EAC).unwrap();
        assert_eq!(lots.len(), 2);
        assert_eq!(lots[0].get("Shares").map(String::as_str), Some("10"));
        assert_eq!(lots[0].get("Price").map(String::as_str), Some("$1.00"));
        assert_eq!(lots[1].get("Price").map(String::as_str), Some("$2.00"));
        for lot in &lots {
            assert_eq!(lot.keys().collect::<Vec<_>>(), vec!["Price", "Shares"]);
        }
        assert!(dom.is_tag(cursor.node(), "tr"));
        assert!(cursor.ok());
    }

    #[test]
    fn test_tabular_header_only() {
        let dom = parse_html(&details_row("<tr><td><b>Shares</b></td></tr>"));
        let mut cursor = row_cursor(&dom);

        assert!(tabular(&mut cursor, &Layout::SCHWAB_EAC).unwrap().is_empty());
    }

    #[test]
    fn test_missing_sub_table_is_structural() {
        let dom = parse_html(
            "<table><tr><td><div><div><table><tr><td>only one</td></tr></table>\
             </div></div></td></tr></table>",
        );
        let mut cursor = row_cursor(&dom);

        let err = tabular(&mut cursor, &Layout::SCHWAB_EAC).unwrap_err();
        assert!(matches!(
            err,
            Error::Structure {
                miss: NotFound(Step::Sibling("table")),
                ..
            }
        ));
        assert!(panel(&mut cursor, &Layout::SCHWAB_EAC).is_err());
        assert!(cursor.ok());
    }

    #[test]
    fn test_panel_merges_all_cells() {
        let dom = parse_html(&details_row(
            "<tr><td>Award Date<b>01/15/2020</b></td><td>Award ID<b>R123</b></td></tr>\
             <tr><td>Shares Released <b></b> 100 </td><td><b></b></td></tr>\
             <tr><td>Award ID<b>R456</b></td></tr>",
        ));
        let mut cursor = row_cursor(&dom);

        let details = panel(&mut cursor, &Layout::SCHWAB_EAC).unwrap();
        let pairs: Vec<_> = details.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(
            pairs,
            vec![
                ("Award Date", "01/15/2020"),
                ("Award ID", "R456"),
                ("Shares Released", "100"),
            ]
        );
    }
}
