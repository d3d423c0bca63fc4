use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::error::ScrapeError;
use crate::leagues::League;

pub fn menu() -> String {
    let mut text = String::from("\nWhich league(s) do you want to scrape standings/table data for?:\n");
    for league in League::ALL {
        text.push_str(&format!("{}) {}\n", league.choice(), league.description()));
    }
    text
}

pub fn parse_choice(input: &str) -> Result<League, ScrapeError> {
    let trimmed = input.trim();
    trimmed
        .parse::<u32>()
        .ok()
        .and_then(League::from_choice)
        .ok_or_else(|| ScrapeError::InvalidChoice(trimmed.to_string()))
}

/// Prints the league menu and reads one answer.
pub fn ask_league<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<League> {
    write!(output, "{}", menu())?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read league choice")?;
    Ok(parse_choice(&line)?)
}
