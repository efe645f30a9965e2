use crate::order;
use crate::schedule::entry::ScheduleEntry;
use crate::schedule::schedule::{Itinerary, Schedule};
use colored::Colorize;
use rustyline::error::ReadlineError;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tabled::settings::{Alignment, Style};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("terminal error: {0}")]
    Terminal(#[from] ReadlineError),
}

/// Line-based terminal the session talks to.
pub trait Console {
    /// Returns `None` once input is exhausted or interrupted.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError>;

    fn say(&mut self, text: &str);

    /// Long output such as tables. Terminals may page it.
    fn show(&mut self, text: &str) {
        self.say(text);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    LoadSchedule,
    OutputSchedule,
    GenerateItineraries,
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 4] = [
        MenuOption::LoadSchedule,
        MenuOption::OutputSchedule,
        MenuOption::GenerateItineraries,
        MenuOption::Exit,
    ];

    fn key(self) -> u8 {
        match self {
            MenuOption::LoadSchedule => 1,
            MenuOption::OutputSchedule => 2,
            MenuOption::GenerateItineraries => 3,
            MenuOption::Exit => 4,
        }
    }
}

impl fmt::Display for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuOption::LoadSchedule => "Load Flight Schedule",
            MenuOption::OutputSchedule => "Output Flight Schedule",
            MenuOption::GenerateItineraries => "Generate Flight Itineraries",
            MenuOption::Exit => "Exit",
        };
        write!(f, "{}. {}", self.key(), label)
    }
}

impl FromStr for MenuOption {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(MenuOption::LoadSchedule),
            "2" => Ok(MenuOption::OutputSchedule),
            "3" => Ok(MenuOption::GenerateItineraries),
            "4" => Ok(MenuOption::Exit),
            _ => Err(()),
        }
    }
}

pub struct Session {
    schedule: Schedule,
    capacity: u32,
}

impl Session {
    pub fn new(schedule: Schedule, capacity: u32) -> Session {
        Session { schedule, capacity }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn run<C: Console>(&mut self, console: &mut C) -> Result<(), ShellError> {
        loop {
            console.say("Please select an operation:");
            for option in MenuOption::ALL {
                console.say(&option.to_string());
            }

            let Some(line) = console.read_line(">> ")? else {
                break;
            };
            match line.parse::<MenuOption>() {
                Ok(MenuOption::LoadSchedule) => self.load_schedule(console)?,
                Ok(MenuOption::OutputSchedule) => self.output_schedule(console),
                Ok(MenuOption::GenerateItineraries) => self.generate_itineraries(console)?,
                Ok(MenuOption::Exit) => break,
                Err(()) => console.say(
                    &"Invalid input. Please select an operation by entering its number.".yellow().to_string(),
                ),
            }
        }
        Ok(())
    }

    pub fn load_schedule<C: Console>(&mut self, console: &mut C) -> Result<(), ShellError> {
        console.say("Enter flight schedule [departure,arrival,day] (press enter on an empty line to stop):");
        let mut entry = ScheduleEntry::new(self.capacity);
        loop {
            let prompt = format!("Flight {}: ", entry.next_number());
            let Some(line) = console.read_line(&prompt)? else {
                break;
            };
            if line.is_empty() {
                break;
            }
            if let Err(err) = entry.push_line(&line) {
                console.say(&err.to_string().yellow().to_string());
            }
        }
        self.schedule = entry.finish();
        log::info!("schedule replaced with {} flights", self.schedule.flights().len());
        Ok(())
    }

    pub fn output_schedule<C: Console>(&self, console: &mut C) {
        if self.schedule.is_empty() {
            console.say("No flights scheduled.");
            return;
        }
        let mut table = tabled::Table::new(self.schedule.rows());
        table.with(Style::rounded());
        table.with(Alignment::left());
        console.show(&table.to_string());
    }

    pub fn generate_itineraries<C: Console>(&mut self, console: &mut C) -> Result<(), ShellError> {
        console.say("Please enter the path of the orders file:");
        let Some(path) = console.read_line("path: ")? else {
            return Ok(());
        };

        let outcome = order::load_lenient(Path::new(path.trim()));
        if let Some(err) = &outcome.error {
            console.say(&format!("Error: {err}").red().to_string());
        }

        let total = outcome.orders.len();
        let itineraries = self.schedule.assign(outcome.orders);
        for itinerary in &itineraries {
            let line = itinerary.to_string();
            match itinerary {
                Itinerary::Scheduled { .. } => console.say(&line),
                Itinerary::Unscheduled { .. } => {
                    log::info!("order {} left unscheduled", itinerary.order_id());
                    console.say(&line.red().to_string())
                }
            }
        }
        let scheduled = itineraries.iter().filter(|it| it.is_scheduled()).count();
        console.say(&format!("Scheduled {scheduled} of {total} orders."));
        Ok(())
    }
}
