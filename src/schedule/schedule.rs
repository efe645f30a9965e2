use crate::flight::{Flight, FlightNumber, FlightRow, LocationId};
use crate::order::{Order, OrderId};
use crate::schedule::entry::ScheduleEntry;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleFileError {
    #[error("could not read schedule {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Outcome of matching one order against the schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Itinerary {
    Scheduled {
        order_id: OrderId,
        flight_number: FlightNumber,
        departure: LocationId,
        arrival: LocationId,
        day: i32,
    },
    Unscheduled {
        order_id: OrderId,
    },
}

impl Itinerary {
    pub fn order_id(&self) -> &OrderId {
        match self {
            Itinerary::Scheduled { order_id, .. } | Itinerary::Unscheduled { order_id } => order_id,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self, Itinerary::Scheduled { .. })
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Itinerary::Scheduled {
                order_id,
                flight_number,
                departure,
                arrival,
                day,
            } => write!(
                f,
                "order: {order_id}, flightNumber: {flight_number}, departure: {departure}, arrival: {arrival}, day: {day}"
            ),
            Itinerary::Unscheduled { order_id } => {
                write!(f, "order: {order_id}, flightNumber: not scheduled")
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Schedule {
    pub(crate) flights: Vec<Flight>,
}

impl Schedule {
    pub fn new(flights: Vec<Flight>) -> Schedule {
        Schedule { flights }
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    pub fn rows(&self) -> Vec<FlightRow> {
        self.flights.iter().map(FlightRow::from).collect()
    }

    /// Reads one `departure,arrival,day` line per flight. Blank lines, including
    /// whitespace-only ones, are padding. Invalid lines are skipped and do not
    /// consume a flight number.
    pub fn load_from_file(path: &Path, capacity: u32) -> Result<Self, ScheduleFileError> {
        let data = std::fs::read_to_string(path).map_err(|source| ScheduleFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut entry = ScheduleEntry::new(capacity);
        for (idx, line) in data.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            if let Err(err) = entry.push_line(line) {
                log::warn!("{}:{}: skipping {:?}: {}", path.display(), idx + 1, line, err);
            }
        }
        let schedule = entry.finish();
        log::info!("loaded {} flights from {}", schedule.flights.len(), path.display());
        Ok(schedule)
    }

    /// Boards `order` on the earliest-entered flight arriving at its
    /// destination with room left. The order is handed back if there is none.
    fn board_first_fit(&mut self, order: Order) -> Result<&Flight, Order> {
        let Some(flight) = self
            .flights
            .iter_mut()
            .find(|f| f.arrival == order.destination && !f.is_full())
        else {
            return Err(order);
        };
        flight.board(order)?;
        Ok(&*flight)
    }

    /// First-fit assignment: each order, in the given order, boards the
    /// earliest-entered flight arriving at its destination that still has room.
    pub fn assign(&mut self, orders: Vec<Order>) -> Vec<Itinerary> {
        orders
            .into_iter()
            .map(|order| {
                let order_id = order.id.clone();
                let flight = match self.board_first_fit(order) {
                    Ok(flight) => flight,
                    Err(order) => {
                        log::debug!("order {} to {} not scheduled", order.id, order.destination);
                        return Itinerary::Unscheduled { order_id };
                    }
                };
                log::debug!(
                    "order {} boarded flight {} ({}/{})",
                    order_id,
                    flight.number,
                    flight.orders().len(),
                    flight.capacity()
                );
                Itinerary::Scheduled {
                    order_id,
                    flight_number: flight.number,
                    departure: flight.departure.clone(),
                    arrival: flight.arrival.clone(),
                    day: flight.day,
                }
            })
            .collect()
    }
}
