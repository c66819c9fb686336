//! Primary table rows.
//!
//! Every cell of a data row wraps its value in a `<label>`. The "more
//! details" rows that follow some data rows share the `<tr>` tag but not
//! that shape, which is how the two are told apart.

use std::collections::HashMap;

use super::cursor::Cursor;
use super::layout::Layout;
use crate::error::{Error, Result};

/// Read the labeled cell values of the row under the cursor.
///
/// Returns `None` if any cell lacks a label. The cursor is left where it was.
pub fn extract_row(cursor: &mut Cursor<'_>, layout: &Layout) -> Option<Vec<String>> {
    cursor.scoped(|c| {
        let mut values = Vec::new();
        c.descend(layout.cell_tag);
        while c.ok() {
            let value = c.scoped(|c| {
                c.descend(layout.label_tag);
                c.ok().then(|| c.peek_text().trim().to_string())
            })?;
            values.push(value);
            c.advance_sibling(layout.cell_tag);
        }
        Some(values)
    })
}

/// Column labels of the primary table, taken from its first row.
#[derive(Debug, Clone, Default)]
pub struct Header {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl Header {
    /// A label that appears twice maps to its last column.
    pub fn new(labels: Vec<String>) -> Self {
        let index = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();
        Self { labels, index }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Fail unless every label in `required` is a column.
    pub fn require(&self, required: &[&str]) -> Result<()> {
        match required.iter().find(|label| !self.index.contains_key(**label)) {
            Some(missing) => Err(Error::MissingColumn(missing.to_string())),
            None => Ok(()),
        }
    }
}

/// A data row keyed by the table header.
#[derive(Debug)]
pub struct Row<'h> {
    /// 1-based position among the data rows, for error messages.
    pub number: usize,
    header: &'h Header,
    values: Vec<String>,
}

impl<'h> Row<'h> {
    pub fn new(number: usize, header: &'h Header, values: Vec<String>) -> Self {
        Self {
            number,
            header,
            values,
        }
    }

    /// Value of the column labeled `label`.
    pub fn get(&self, label: &str) -> Result<&str> {
        let index = self
            .header
            .position(label)
            .ok_or_else(|| Error::MissingColumn(label.to_string()))?;
        self.values
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| self.short(label))
    }

    /// All `(label, value)` pairs in column order.
    pub fn fields(&self) -> Result<impl Iterator<Item = (&str, &str)>> {
        if let Some(label) = self.header.labels().get(self.values.len()) {
            return Err(self.short(label));
        }
        Ok(self
            .header
            .labels()
            .iter()
            .zip(&self.values)
            .map(|(label, value)| (label.as_str(), value.as_str())))
    }

    fn short(&self, label: &str) -> Error {
        Error::ShortRow {
            row: self.number,
            column: label.to_string(),
            width: self.values.len(),
        }
    }
}
