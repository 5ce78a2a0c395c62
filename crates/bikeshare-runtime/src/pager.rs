//! Page-by-page display of raw trip rows.

use bikeshare_core::error::Result;
use bikeshare_core::models::{TripRecord, TripTable};

use crate::console::Console;
use crate::prompts::Answer;
use crate::render::render_rows;

/// Rows shown per confirmation.
pub const PAGE_SIZE: usize = 5;

pub const FIRST_PAGE_PROMPT: &str = "Would you like to see the raw data? Yes/No";
pub const NEXT_PAGE_PROMPT: &str = "Would you like to see more? Yes/No";
pub const INVALID_ANSWER: &str = "Invalid answer.";

/// How the paging conversation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerExit {
    /// The user answered "no".
    Declined,
    /// Input ran out before a "no".
    InputClosed,
}

/// Cursor over a table that hands out consecutive pages of rows.
#[derive(Debug)]
pub struct RawRowPager<'a> {
    table: &'a TripTable,
    cursor: usize,
}

impl<'a> RawRowPager<'a> {
    pub fn new(table: &'a TripTable) -> Self {
        Self { table, cursor: 0 }
    }

    /// Index of the first row of the next page.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Rows `[cursor, cursor + PAGE_SIZE)` and advance. Past the end of the
    /// table the page is empty.
    pub fn next_page(&mut self) -> &'a [TripRecord] {
        let table: &'a TripTable = self.table;
        let page = table.page(self.cursor, PAGE_SIZE);
        self.cursor = self.cursor.saturating_add(PAGE_SIZE);
        page
    }

    /// Run the yes/no loop: every "yes" prints the next page, "no" stops,
    /// anything else is rejected without moving the cursor.
    pub fn run<C>(&mut self, console: &mut C) -> Result<PagerExit>
    where
        C: Console + ?Sized,
    {
        loop {
            let prompt = if self.cursor == 0 {
                FIRST_PAGE_PROMPT
            } else {
                NEXT_PAGE_PROMPT
            };
            let Some(reply) = console.read_line(prompt)? else {
                return Ok(PagerExit::InputClosed);
            };
            match Answer::parse(&reply) {
                Answer::No => return Ok(PagerExit::Declined),
                Answer::Invalid => console.write_line(INVALID_ANSWER)?,
                Answer::Yes => {
                    let start = self.cursor;
                    let page = self.next_page();
                    console.write_line("")?;
                    console.write_line(&format!("Printing {} rows of raw data...", PAGE_SIZE))?;
                    for line in render_rows(page, start, self.table.has_demographics) {
                        console.write_line(&line)?;
                    }
                }
            }
        }
    }
}
