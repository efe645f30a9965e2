use crate::flight::{Flight, FlightNumber, Leg, ScheduleLineError};
use crate::schedule::schedule::Schedule;

/// Builds a schedule one line at a time, numbering flights from 1 in the
/// order they are accepted.
pub struct ScheduleEntry {
    capacity: u32,
    flights: Vec<Flight>,
}

impl ScheduleEntry {
    pub fn new(capacity: u32) -> ScheduleEntry {
        ScheduleEntry {
            capacity,
            flights: Vec::new(),
        }
    }

    pub fn next_number(&self) -> FlightNumber {
        self.flights.len() as FlightNumber + 1
    }

    pub fn push_line(&mut self, line: &str) -> Result<FlightNumber, ScheduleLineError> {
        let leg = Leg::parse(line)?;
        let number = self.next_number();
        self.flights.push(Flight::new(number, leg, self.capacity));
        Ok(number)
    }

    pub fn finish(self) -> Schedule {
        Schedule::new(self.flights)
    }
}
