//! The page layout the extractor is written against.
//!
//! Every tag name and navigation chain the extractor relies on lives here,
//! so a change to the portal's markup touches this file only.

use std::fmt;

/// One cursor move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Move to the first child with this tag.
    Child(&'static str),
    /// Move to the next sibling with this tag.
    Sibling(&'static str),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Child(tag) => write!(f, "child <{tag}>"),
            Step::Sibling(tag) => write!(f, "sibling <{tag}>"),
        }
    }
}

/// Structural description of a transaction history page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Tag of the element marking the start of the history section.
    pub anchor_tag: &'static str,
    /// Attribute `(name, value)` identifying the anchor.
    pub anchor_attr: (&'static str, &'static str),
    /// From the anchor to the `<tbody>` holding the history rows.
    pub table_path: &'static [Step],
    /// Tag the table path must end on.
    pub table_tag: &'static str,
    /// From a "more details" row to the `<tbody>` of its sub-table.
    pub details_path: &'static [Step],
    pub row_tag: &'static str,
    pub cell_tag: &'static str,
    /// Element wrapping the value of a primary row cell.
    pub label_tag: &'static str,
    /// Bold element holding sub-table headers and panel values.
    pub emphasis_tag: &'static str,
}

impl Layout {
    /// Schwab Employee Awards Center, "History & Statements" page.
    ///
    /// ```text
    /// <a name="History">
    ///   <table><tbody>
    ///     <tr>..</tr>
    ///     <tr><td><table><tbody>      <- history rows
    ///       <tr><td><label>Date</label></td>..</tr>
    ///       <tr><td><div><div>
    ///         <table>..</table>
    ///         <table><tbody>..</tbody></table>   <- details sub-table
    /// ```
    pub const SCHWAB_EAC: Layout = Layout {
        anchor_tag: "a",
        anchor_attr: ("name", "History"),
        table_path: &[
            Step::Child("table"),
            Step::Child("tbody"),
            Step::Child("tr"),
            Step::Sibling("tr"),
            Step::Child("td"),
            Step::Child("table"),
            Step::Child("tbody"),
        ],
        table_tag: "tbody",
        details_path: &[
            Step::Child("td"),
            Step::Child("div"),
            Step::Child("div"),
            Step::Child("table"),
            Step::Sibling("table"),
            Step::Child("tbody"),
        ],
        row_tag: "tr",
        cell_tag: "td",
        label_tag: "label",
        emphasis_tag: "b",
    };
}
