//! Builder for synthetic history pages in the Employee Awards Center layout.

#![allow(dead_code)]

pub const HEADER: &[&str] = &["Date", "Action", "Symbol", "Quantity", "Description"];

/// A history page under construction.
#[derive(Default)]
pub struct Page {
    rows: Vec<String>,
}

impl Page {
    /// Start a page whose first row is the labeled header.
    pub fn new(header: &[&str]) -> Self {
        Self::default().row(header)
    }

    /// A primary row: every value wrapped in a `<label>`.
    pub fn row(mut self, values: &[&str]) -> Self {
        let cells: String = values
            .iter()
            .map(|v| format!("<td class=\"cell\"><label>{v}</label></td>"))
            .collect();
        self.rows.push(format!("<tr>{cells}</tr>"));
        self
    }

    /// A primary row with the default header's columns.
    pub fn action(self, date: &str, action: &str) -> Self {
        let description = format!("{action} of GOOG");
        self.row(&[date, action, "GOOG", "10", description.as_str()])
    }

    /// A "more details" row holding a headed lot table.
    pub fn lots(mut self, headers: &[&str], lots: &[&[&str]]) -> Self {
        let header: String = headers.iter().map(|h| format!("<td><b>{h}</b></td>")).collect();
        let mut body = format!("<tr>{header}</tr>");
        for lot in lots {
            let cells: String = lot.iter().map(|v| format!("<td>{v}</td>")).collect();
            body.push_str(&format!("<tr>{cells}</tr>"));
        }
        self.rows.push(details(&body));
        self
    }

    /// A "more details" row holding a label/value panel, two pairs per row.
    pub fn panel(mut self, pairs: &[(&str, &str)]) -> Self {
        let body: String = pairs
            .chunks(2)
            .map(|chunk| {
                let cells: String = chunk
                    .iter()
                    .map(|(k, v)| format!("<td>{k}<b>{v}</b></td>"))
                    .collect();
                format!("<tr>{cells}</tr>")
            })
            .collect();
        self.rows.push(details(&body));
        self
    }

    pub fn html(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html><head><title>History</title></head><body>\n\
             <div id=\"nav\"><a href=\"#History\">History</a></div>\n\
             <a name=\"History\"><table class=\"outer\"><tbody>\n\
             <tr><td>Transaction History</td></tr>\n\
             <tr><td><table class=\"history\"><tbody>\n{}\n</tbody></table></td></tr>\n\
             </tbody></table></a>\n</body></html>\n",
            self.rows.join("\n")
        )
    }
}

fn details(body: &str) -> String {
    format!(
        "<tr><td colspan=\"5\"><div class=\"more\"><div>\
         <table><tbody><tr><td>More details</td></tr></tbody></table>\
         <table class=\"details\"><tbody>{body}</tbody></table>\
         </div></div></td></tr>"
    )
}
