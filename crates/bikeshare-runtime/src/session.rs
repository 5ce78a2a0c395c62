//! Interactive session controller.
//!
//! Drives one iteration after another: collect the city and filters, load
//! and filter the trips, print the four reports, offer the raw rows, then
//! ask whether to start over. Each iteration owns its own table and drops it
//! before the next begins.

use std::path::PathBuf;

use bikeshare_core::error::Result;
use bikeshare_core::models::CityTable;
use bikeshare_data::analysis::analyze;
use bikeshare_data::filter::apply_filters;
use bikeshare_data::reader::load_city;
use tracing::{error, info};

use crate::console::Console;
use crate::pager::{PagerExit, RawRowPager};
use crate::prompts::collect_filters;
use crate::render::render_analysis;

pub const RESTART_PROMPT: &str = "Would you like to restart? Enter yes or no.";

/// What the session does after an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Restart,
    Finish,
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Interactive bikeshare session over a [`Console`].
pub struct Session<C> {
    console: C,
    cities: CityTable,
    /// Directory the city table's file names are resolved against.
    data_dir: PathBuf,
}

impl<C: Console> Session<C> {
    pub fn new(console: C, cities: CityTable, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            console,
            cities,
            data_dir: data_dir.into(),
        }
    }

    /// Run iterations until the user declines to restart or input ends.
    pub fn run(&mut self) -> Result<()> {
        let mut iteration = 1usize;
        loop {
            info!("Starting session iteration {}", iteration);
            if self.run_iteration()? == Flow::Finish {
                info!("Session finished after {} iteration(s)", iteration);
                return Ok(());
            }
            iteration += 1;
        }
    }

    /// One pass through filters → load → reports → raw rows → restart.
    ///
    /// A city whose source cannot be loaded is reported to the user and the
    /// iteration goes straight to the restart question. Only an exact
    /// case-insensitive `yes` to that question restarts; the reply is not
    /// trimmed.
    pub fn run_iteration(&mut self) -> Result<Flow> {
        let Some(selection) = collect_filters(&mut self.console, &self.cities)? else {
            return Ok(Flow::Finish);
        };
        info!(
            "Selected city={} month={} day={}",
            selection.city.name, selection.filters.month, selection.filters.day
        );

        match load_city(&selection.city, &self.data_dir) {
            Ok(table) => {
                let table = apply_filters(table, &selection.filters);
                let result = analyze(&table);
                for line in render_analysis(&result) {
                    self.console.write_line(&line)?;
                }

                if RawRowPager::new(&table).run(&mut self.console)? == PagerExit::InputClosed {
                    return Ok(Flow::Finish);
                }
            }
            Err(err) if err.is_data_source() => {
                error!("Failed to load {}: {}", selection.city.name, err);
                self.console.write_line(&format!(
                    "Unable to load data for {}: {}",
                    selection.city.name, err
                ))?;
            }
            Err(err) => return Err(err),
        }

        self.console.write_line("")?;
        match self.console.read_line(RESTART_PROMPT)? {
            Some(reply) if reply.eq_ignore_ascii_case("yes") => Ok(Flow::Restart),
            _ => Ok(Flow::Finish),
        }
    }

    /// Give back the console, e.g. to inspect a scripted session's output.
    pub fn into_console(self) -> C {
        self.console
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
