//! Validated prompts for the filter selection and yes/no questions.
//!
//! Each question is re-asked until the answer falls inside its domain. An
//! invalid answer only repeats that one question; answers already accepted
//! stay as they are.

use bikeshare_core::error::Result;
use bikeshare_core::formatting::separator;
use bikeshare_core::models::{City, CityTable, DayFilter, Filters, MonthFilter};
use tracing::debug;

use crate::console::Console;

pub const GREETING: &str = "Hello! Let's explore some US bikeshare data!";
pub const MONTH_PROMPT: &str = "Which month? January, February, March, April, May, June, or all?";
pub const DAY_PROMPT: &str =
    "Which day? Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday, or all?";
pub const INVALID_CITY: &str = "Invalid input for city. Please enter one of the options.";
pub const INVALID_MONTH: &str = "Invalid input for month. Please enter one of the options.";
pub const INVALID_DAY: &str = "Invalid input for day of the week. Please enter one of the options.";

/// The city and filters chosen for one session iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub city: City,
    pub filters: Filters,
}

/// A reply to a yes/no question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Invalid,
}

impl Answer {
    /// Case-insensitive `"yes"` / `"no"`; anything else is invalid.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.eq_ignore_ascii_case("yes") {
            Self::Yes
        } else if input.eq_ignore_ascii_case("no") {
            Self::No
        } else {
            Self::Invalid
        }
    }
}

/// Ask `prompt` until `parse` accepts the answer, printing `invalid` after
/// each rejected one. `Ok(None)` means input ran out.
pub fn ask_until<C, T>(
    console: &mut C,
    prompt: &str,
    invalid: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>>
where
    C: Console + ?Sized,
{
    loop {
        let Some(answer) = console.read_line(prompt)? else {
            return Ok(None);
        };
        match parse(&answer) {
            Some(value) => return Ok(Some(value)),
            None => {
                debug!("Rejected answer {:?} to {:?}", answer, prompt);
                console.write_line(invalid)?;
            }
        }
    }
}

/// The city question, listing the table's cities in order, e.g.
/// `"Would you like to view the data for Chicago, New York City, or Washington?"`.
pub fn city_prompt(cities: &CityTable) -> String {
    let names: Vec<String> = cities.names().map(title_case).collect();
    let listed = match names.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} or {}", first, second),
        [rest @ .., last] => format!("{}, or {}", rest.join(", "), last),
    };
    format!("Would you like to view the data for {}?", listed)
}

/// Greet the user and collect city, month and day in that order.
pub fn collect_filters<C>(console: &mut C, cities: &CityTable) -> Result<Option<Selection>>
where
    C: Console + ?Sized,
{
    console.write_line(GREETING)?;

    let Some(city) = ask_until(console, &city_prompt(cities), INVALID_CITY, |s| {
        cities.get(s).cloned()
    })?
    else {
        return Ok(None);
    };
    let Some(month) = ask_until(console, MONTH_PROMPT, INVALID_MONTH, MonthFilter::parse)? else {
        return Ok(None);
    };
    let Some(day) = ask_until(console, DAY_PROMPT, INVALID_DAY, DayFilter::parse)? else {
        return Ok(None);
    };

    console.write_line(&separator())?;
    Ok(Some(Selection {
        city,
        filters: Filters { month, day },
    }))
}

fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
