//! # eac2json
//!
//! Converts the transaction history page of Schwab's Employee Awards Center
//! (saved from "My Equity Awards" → "History & Statements" with the date
//! range set to "All") into a list of flat key-value records, one per
//! economic event, for wash-sale analysis.
//!
//! Each "more details" row is merged into the primary row it belongs to.
//! Rows holding several lots (option exercises, sales) become one record per
//! lot. Records keep the order of the page.
//!
//! ## Quick Start
//!
//! ```no_run
//! use eac2json::{Options, convert_bytes};
//!
//! let page = std::fs::read("history.html").unwrap();
//! for entry in convert_bytes(&page, &Options::default()).unwrap() {
//!     println!("{:?} {:?}", entry.get("Date"), entry.get("Action"));
//! }
//! ```
//!
//! The extractor is written against one fixed page layout
//! ([`history::Layout::SCHWAB_EAC`]). Any deviation from it, and any
//! transaction type it does not know, is an error rather than silently
//! skipped data.

pub mod dom;
pub mod error;
pub mod history;
pub(crate) mod util;

pub use error::{Error, Result};
pub use history::{Action, CORE_FIELDS, Entry, Options, SaleHandling};
pub use util::decode_text;

/// Convert a history page to ledger entries.
pub fn convert(html: &str, options: &Options) -> Result<Vec<Entry>> {
    let dom = dom::parse_html(html);
    history::build_ledger(&dom, options)
}

/// Decode raw page bytes and convert them.
///
/// Pages that are not valid UTF-8 are decoded with their declared charset,
/// or Windows-1252 when they declare none.
pub fn convert_bytes(bytes: &[u8], options: &Options) -> Result<Vec<Entry>> {
    convert(&decode_text(bytes), options)
}
