use crate::order::Order;
use std::sync::Arc;
use tabled::Tabled;
use thiserror::Error;

pub type FlightNumber = u32;
pub type LocationId = Arc<str>;

pub const DEFAULT_CAPACITY: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleLineError {
    #[error("Invalid input. Please enter in the format 'departure,arrival,day'.")]
    FieldCount(usize),
    #[error("Invalid day. Please enter a number.")]
    InvalidDay(String),
}

/// A single `departure,arrival,day` line, before it gets a flight number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    pub departure: LocationId,
    pub arrival: LocationId,
    pub day: i32,
}

impl Leg {
    pub fn parse(line: &str) -> Result<Leg, ScheduleLineError> {
        let parts: Vec<&str> = line.split(',').collect();
        let [departure, arrival, day] = parts.as_slice() else {
            return Err(ScheduleLineError::FieldCount(parts.len()));
        };
        let day = day
            .trim()
            .parse::<i32>()
            .map_err(|_| ScheduleLineError::InvalidDay(day.to_string()))?;
        Ok(Leg {
            departure: Arc::from(*departure),
            arrival: Arc::from(*arrival),
            day,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Flight {
    pub number: FlightNumber,
    pub departure: LocationId,
    pub arrival: LocationId,
    pub day: i32,
    capacity: u32,
    orders: Vec<Order>,
}

impl Flight {
    pub fn new(number: FlightNumber, leg: Leg, capacity: u32) -> Flight {
        Flight {
            number,
            departure: leg.departure,
            arrival: leg.arrival,
            day: leg.day,
            capacity,
            orders: Vec::new(),
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn is_full(&self) -> bool {
        self.orders.len() >= self.capacity as usize
    }

    /// Appends `order` unless the flight is full, in which case it is handed back.
    pub fn board(&mut self, order: Order) -> Result<(), Order> {
        if self.is_full() {
            return Err(order);
        }
        self.orders.push(order);
        Ok(())
    }
}

#[derive(Tabled)]
pub struct FlightRow {
    #[tabled(rename = "Flight")]
    pub number: FlightNumber,
    #[tabled(rename = "Departure")]
    pub departure: LocationId,
    #[tabled(rename = "Arrival")]
    pub arrival: LocationId,
    #[tabled(rename = "Day")]
    pub day: i32,
    #[tabled(rename = "Load")]
    pub load: String,
}

impl From<&Flight> for FlightRow {
    fn from(flight: &Flight) -> Self {
        FlightRow {
            number: flight.number,
            departure: flight.departure.clone(),
            arrival: flight.arrival.clone(),
            day: flight.day,
            load: format!("{}/{}", flight.orders.len(), flight.capacity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: &str, destination: &str) -> Order {
        Order {
            id: Arc::from(id),
            destination: Arc::from(destination),
        }
    }

    #[test]
    fn test_parse_leg() {
        let leg = Leg::parse("YUL,YYZ,1").unwrap();
        assert_eq!(&*leg.departure, "YUL");
        assert_eq!(&*leg.arrival, "YYZ");
        assert_eq!(leg.day, 1);
    }

    #[test]
    fn test_parse_leg_keeps_locations_verbatim() {
        let leg = Leg::parse(" YUL,YYZ , 2 ").unwrap();
        assert_eq!(&*leg.departure, " YUL");
        assert_eq!(&*leg.arrival, "YYZ ");
        assert_eq!(leg.day, 2);
    }

    #[test]
    fn test_parse_leg_field_count() {
        assert_eq!(Leg::parse("NYC,LAX"), Err(ScheduleLineError::FieldCount(2)));
        assert_eq!(Leg::parse("NYC,LAX,1,2"), Err(ScheduleLineError::FieldCount(4)));
        assert_eq!(Leg::parse("   "), Err(ScheduleLineError::FieldCount(1)));
    }

    #[test]
    fn test_parse_leg_invalid_day() {
        assert_eq!(
            Leg::parse("NYC,LAX,one"),
            Err(ScheduleLineError::InvalidDay("one".to_string()))
        );
        assert_eq!(
            Leg::parse("NYC,LAX,").unwrap_err().to_string(),
            "Invalid day. Please enter a number."
        );
    }

    #[test]
    fn test_board_respects_capacity() {
        let leg = Leg::parse("NYC,LAX,1").unwrap();
        let mut flight = Flight::new(1, leg, 2);

        assert!(flight.board(order("O1", "LAX")).is_ok());
        assert!(flight.board(order("O2", "LAX")).is_ok());
        assert!(flight.is_full());

        let rejected = flight.board(order("O3", "LAX")).unwrap_err();
        assert_eq!(&*rejected.id, "O3");
        assert_eq!(flight.orders().len(), 2);
    }

    #[test]
    fn test_row_shows_load() {
        let leg = Leg::parse("NYC,LAX,3").unwrap();
        let mut flight = Flight::new(7, leg, DEFAULT_CAPACITY);
        flight.board(order("O1", "LAX")).unwrap();

        let row = FlightRow::from(&flight);
        assert_eq!(row.number, 7);
        assert_eq!(row.load, "1/20");
    }
}
