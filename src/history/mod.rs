//! Transaction history extraction.
//!
//! [`locate`] finds the history section, a [`Cursor`] walks its rows, and the
//! classifier merges each primary row with its "more details" row into
//! [`Entry`] records.

mod classify;
mod cursor;
mod details;
mod layout;
mod ledger;
mod locate;
mod row;

pub use classify::{
    ACTION_COLUMN, Action, CORE_FIELDS, Expected, Options, SaleHandling, build_ledger,
};
pub use cursor::{Cursor, CursorState, NotFound};
pub use details::{Details, panel, tabular};
pub use layout::{Layout, Step};
pub use ledger::{Entry, Ledger};
pub use locate::locate;
pub use row::{Header, Row, extract_row};
