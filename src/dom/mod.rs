//! HTML document tree.
//!
//! html5ever does the tokenizing and tree construction; the result lands in
//! an [`ArenaDom`] that the history extractor navigates by tag name.

mod arena;
mod tree_sink;

pub use arena::{ArenaDom, ArenaNode, ArenaNodeData, ArenaNodeId, Attribute, ChildrenIter};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use tree_sink::ArenaSink;

/// Parse a complete HTML document.
///
/// Parsing never fails; malformed markup is repaired the way a browser
/// would repair it.
pub fn parse_html(html: &str) -> ArenaDom {
    let sink = ArenaSink::new();
    parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}
