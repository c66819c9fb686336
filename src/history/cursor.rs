//! Tag-directed navigation over an [`ArenaDom`].
//!
//! A [`Cursor`] walks the tree one [`Step`] at a time. The first failed step
//! is recorded and every later step is a no-op, so a whole chain of moves can
//! be issued before checking the outcome once:
//!
//! ```
//! use eac2json::dom::parse_html;
//! use eac2json::history::Cursor;
//!
//! let dom = parse_html("<table><tr><td>a</td><td>b</td></tr></table>");
//! let table = dom.find(|dom, id| dom.is_tag(id, "table")).unwrap();
//!
//! let mut cursor = Cursor::new(&dom, table);
//! cursor.descend("tbody").descend("tr").descend("td").advance_sibling("td");
//! assert!(cursor.ok());
//! assert_eq!(cursor.peek_text(), "b");
//!
//! cursor.advance_sibling("td").descend("span");
//! assert_eq!(cursor.error().unwrap().to_string(), "no sibling <td>");
//! ```

use std::fmt;

use super::layout::Step;
use crate::dom::{ArenaDom, ArenaNodeId};

/// A navigation step that matched nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotFound(pub Step);

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no {}", self.0)
    }
}

impl std::error::Error for NotFound {}

/// Snapshot of a cursor, restored with [`Cursor::restore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    current: ArenaNodeId,
    next: ArenaNodeId,
    error: Option<NotFound>,
}

/// Mutable position in a parsed document with a sticky first error.
#[derive(Clone)]
pub struct Cursor<'a> {
    dom: &'a ArenaDom,
    current: ArenaNodeId,
    /// Where the next sibling search starts.
    next: ArenaNodeId,
    error: Option<NotFound>,
}

impl<'a> Cursor<'a> {
    pub fn new(dom: &'a ArenaDom, at: ArenaNodeId) -> Self {
        Self {
            dom,
            current: at,
            next: at,
            error: None,
        }
    }

    /// Node the cursor points at. Stays on the last good node after an error.
    pub fn node(&self) -> ArenaNodeId {
        self.current
    }

    /// Move to the first child of the current node with tag `tag`.
    pub fn descend(&mut self, tag: &'static str) -> &mut Self {
        if self.error.is_some() {
            return self;
        }

        self.next = self.dom.first_child(self.current);
        self.seek(tag, Step::Child(tag))
    }

    /// Move to the next sibling with tag `tag`, continuing from where the
    /// previous sibling search stopped.
    pub fn advance_sibling(&mut self, tag: &'static str) -> &mut Self {
        if self.error.is_some() {
            return self;
        }
        self.seek(tag, Step::Sibling(tag))
    }

    /// Apply a chain of steps.
    pub fn follow(&mut self, path: &[Step]) -> &mut Self {
        for step in path {
            match *step {
                Step::Child(tag) => self.descend(tag),
                Step::Sibling(tag) => self.advance_sibling(tag),
            };
        }
        self
    }

    fn seek(&mut self, tag: &'static str, step: Step) -> &mut Self {
        let mut candidate = self.next;
        while candidate.is_some() {
            if self.dom.is_tag(candidate, tag) {
                self.current = candidate;
                self.next = self.dom.next_sibling(candidate);
                return self;
            }
            candidate = self.dom.next_sibling(candidate);
        }
        self.fail(step)
    }

    fn fail(&mut self, step: Step) -> &mut Self {
        tracing::trace!(%step, at = %self.dom.describe(self.current), "cursor miss");
        self.error = Some(NotFound(step));
        self
    }

    /// First text found by following first children down from the current
    /// node. Does not move the cursor.
    pub fn peek_text(&self) -> &'a str {
        if self.error.is_some() {
            return "";
        }

        let mut node = self.current;
        while node.is_some() {
            if let Some(text) = self.dom.text_content(node) {
                return text;
            }
            node = self.dom.first_child(node);
        }
        ""
    }

    /// First text node among the current node and its following siblings.
    /// Does not move the cursor.
    pub fn sibling_text(&self) -> &'a str {
        if self.error.is_some() {
            return "";
        }

        let mut node = self.current;
        while node.is_some() {
            if let Some(text) = self.dom.text_content(node) {
                return text;
            }
            node = self.dom.next_sibling(node);
        }
        ""
    }

    pub fn save(&self) -> CursorState {
        CursorState {
            current: self.current,
            next: self.next,
            error: self.error,
        }
    }

    pub fn restore(&mut self, state: CursorState) {
        self.current = state.current;
        self.next = state.next;
        self.error = state.error;
    }

    /// Run `f` and put the cursor back where it was, whatever `f` did.
    pub fn scoped<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let state = self.save();
        let result = f(self);
        self.restore(state);
        result
    }

    pub fn ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn error(&self) -> Option<NotFound> {
        self.error
    }

    /// The sticky error as a `Result`.
    pub fn check(&self) -> Result<(), NotFound> {
        match self.error {
            Some(miss) => Err(miss),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("current", &self.dom.describe(self.current))
            .field("next", &self.dom.describe(self.next))
            .field("error", &self.error)
            .finish()
    }
}
