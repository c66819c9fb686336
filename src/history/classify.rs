//! Row classification: turning history rows into ledger entries.
//!
//! The history table interleaves primary rows with "more details" rows. The
//! primary row's Action decides whether a details row follows, which shape it
//! has, and how its fields are merged:
//!
//! | Action                       | Details | Result                                   |
//! |------------------------------|---------|------------------------------------------|
//! | Deposit, Forced Quick Sell   | tabular | one entry, row + the single lot          |
//! | Lapse                        | panel   | one entry, row + panel                   |
//! | Exer and Hold, Sale          | tabular | one entry per lot, core fields + lot     |
//! | Journal                      | skipped | nothing                                  |
//! | Forced Disbursement          | none    | nothing                                  |
//!
//! Any other Action aborts the conversion.

use std::fmt;
use std::str::FromStr;

use super::cursor::Cursor;
use super::details;
use super::layout::Layout;
use super::ledger::{Entry, Ledger};
use super::locate::locate;
use super::row::{Header, Row, extract_row};
use crate::dom::ArenaDom;
use crate::error::{Error, Result};

/// Fields copied from the primary row into every entry of a fan-out.
pub const CORE_FIELDS: &[&str] = &["Date", "Description", "Action", "Symbol"];

/// Header label of the column that drives classification.
pub const ACTION_COLUMN: &str = "Action";

/// The transaction types that appear in the history table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Shares deposited into the awards account ahead of a forced sale.
    Deposit,
    /// Sale of vested shares to cover taxes.
    ForcedQuickSell,
    /// Vesting of restricted stock units.
    Lapse,
    /// Option exercise with the shares kept.
    ExerAndHold,
    /// Option or ESPP sale.
    Sale,
    Journal,
    ForcedDisbursement,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::Deposit,
        Action::ForcedQuickSell,
        Action::Lapse,
        Action::ExerAndHold,
        Action::Sale,
        Action::Journal,
        Action::ForcedDisbursement,
    ];

    /// The label used in the Action column.
    pub fn label(self) -> &'static str {
        match self {
            Action::Deposit => "Deposit",
            Action::ForcedQuickSell => "Forced Quick Sell",
            Action::Lapse => "Lapse",
            Action::ExerAndHold => "Exer and Hold",
            Action::Sale => "Sale",
            Action::Journal => "Journal",
            Action::ForcedDisbursement => "Forced Disbursement",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.label() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// How many detail lots an action requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    ExactlyOne,
    AtLeastOne,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::ExactlyOne => f.write_str("exactly one lot"),
            Expected::AtLeastOne => f.write_str("at least one lot"),
        }
    }
}

/// Treatment of `Sale` rows.
///
/// Option and ESPP sales are normally at a gain and so don't matter for
/// wash sales; `Skip` leaves them out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SaleHandling {
    /// One entry per sold lot, like `Exer and Hold`.
    #[default]
    FanOut,
    /// Drop the row and its details.
    Skip,
}

/// Conversion settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub sales: SaleHandling,
    /// Primary row fields written into each fan-out entry.
    pub core_fields: &'static [&'static str],
    pub layout: &'static Layout,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            sales: SaleHandling::default(),
            core_fields: CORE_FIELDS,
            layout: &Layout::SCHWAB_EAC,
        }
    }
}

impl Options {
    pub fn with_sales(mut self, sales: SaleHandling) -> Self {
        self.sales = sales;
        self
    }
}

/// Walk the history table of `dom` and build the ledger.
pub fn build_ledger(dom: &ArenaDom, options: &Options) -> Result<Vec<Entry>> {
    let layout = options.layout;
    let anchor = locate(dom, layout)?;

    let mut cursor = Cursor::new(dom, anchor);
    cursor.follow(layout.table_path);
    cursor.check().map_err(|miss| Error::Structure {
        context: "history table",
        miss,
    })?;
    if !dom.is_tag(cursor.node(), layout.table_tag) {
        return Err(Error::BadTable(dom.describe(cursor.node())));
    }

    cursor.descend(layout.row_tag);
    cursor.check().map_err(|miss| Error::Structure {
        context: "history header row",
        miss,
    })?;
    let header = extract_row(&mut cursor, layout)
        .map(Header::new)
        .ok_or(Error::MissingHeader)?;
    header.require(&[ACTION_COLUMN])?;
    tracing::debug!(columns = ?header.labels(), "history header");

    let mut classifier = Classifier {
        cursor,
        header: &header,
        options,
        ledger: Ledger::new(),
    };
    classifier.run()?;

    let entries = classifier.ledger.finish();
    tracing::info!(entries = entries.len(), "history converted");
    Ok(entries)
}

struct Classifier<'a, 'h> {
    /// Always on the primary row being classified.
    cursor: Cursor<'a>,
    header: &'h Header,
    options: &'a Options,
    ledger: Ledger,
}

impl Classifier<'_, '_> {
    fn run(&mut self) -> Result<()> {
        let layout = self.options.layout;
        let mut number = 0;

        self.cursor.advance_sibling(layout.row_tag);
        while self.cursor.ok() {
            number += 1;
            let values = extract_row(&mut self.cursor, layout)
                .ok_or(Error::UnrecognizedRow { row: number })?;
            let row = Row::new(number, self.header, values);
            self.classify(&row)?;
            self.cursor.advance_sibling(layout.row_tag);
        }
        Ok(())
    }

    fn classify(&mut self, row: &Row<'_>) -> Result<()> {
        let action = row
            .get(ACTION_COLUMN)?
            .parse::<Action>()
            .map_err(|action| Error::UnknownAction {
                row: row.number,
                action,
            })?;
        tracing::debug!(row = row.number, %action, "classify");

        match action {
            Action::Deposit | Action::ForcedQuickSell => {
                self.ledger.advance();
                self.ledger.write_all(row.fields()?);

                let lots = self.tabular(row, action)?;
                if lots.len() != 1 {
                    return Err(cardinality(row, action, Expected::ExactlyOne, lots.len()));
                }
                self.ledger.write_all(lots.into_iter().flatten());
            }
            Action::Lapse => {
                self.ledger.advance();
                self.ledger.write_all(row.fields()?);

                self.details_row()?;
                let panel = details::panel(&mut self.cursor, self.options.layout)?;
                self.ledger.write_all(panel);
            }
            Action::Sale if self.options.sales == SaleHandling::Skip => {
                self.next_row();
            }
            Action::ExerAndHold | Action::Sale => {
                let lots = self.tabular(row, action)?;
                if lots.is_empty() {
                    return Err(cardinality(row, action, Expected::AtLeastOne, 0));
                }

                let core = self
                    .options
                    .core_fields
                    .iter()
                    .map(|&label| row.get(label).map(|value| (label, value)))
                    .collect::<Result<Vec<_>>>()?;

                tracing::debug!(row = row.number, lots = lots.len(), "fan out");
                for lot in lots {
                    self.ledger.advance();
                    self.ledger.write_all(core.iter().copied());
                    self.ledger.write_all(lot);
                }
            }
            Action::Journal => {
                // Its details row carries nothing we use.
                self.next_row();
            }
            Action::ForcedDisbursement => {}
        }
        Ok(())
    }

    fn next_row(&mut self) {
        self.cursor.advance_sibling(self.options.layout.row_tag);
    }

    /// Step onto the details row that must follow the current primary row.
    fn details_row(&mut self) -> Result<()> {
        self.next_row();
        self.cursor.check().map_err(|miss| Error::Structure {
            context: "details row",
            miss,
        })
    }

    fn tabular(&mut self, row: &Row<'_>, action: Action) -> Result<Vec<details::Details>> {
        self.details_row()?;
        let lots = details::tabular(&mut self.cursor, self.options.layout)?;
        tracing::trace!(row = row.number, %action, lots = lots.len(), "details");
        Ok(lots)
    }
}

fn cardinality(row: &Row<'_>, action: Action, expected: Expected, found: usize) -> Error {
    Error::Cardinality {
        row: row.number,
        action,
        expected,
        found,
    }
}
