use crate::flight::{DEFAULT_CAPACITY, Flight, Leg};
use crate::order::Order;
use crate::schedule::schedule::{Itinerary, Schedule};
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;
use std::sync::Arc;

pub fn id(s: &str) -> Arc<str> {
    Arc::from(s)
}

pub fn add_flight(flights: &mut Vec<Flight>, departure: &str, arrival: &str, day: i32) {
    add_flight_with_capacity(flights, departure, arrival, day, DEFAULT_CAPACITY);
}

pub fn add_flight_with_capacity(
    flights: &mut Vec<Flight>,
    departure: &str,
    arrival: &str,
    day: i32,
    capacity: u32,
) {
    let number = flights.len() as u32 + 1;
    flights.push(Flight::new(
        number,
        Leg {
            departure: id(departure),
            arrival: id(arrival),
            day,
        },
        capacity,
    ));
}

pub fn order(order_id: &str, destination: &str) -> Order {
    Order {
        id: id(order_id),
        destination: id(destination),
    }
}

pub fn orders_to(destination: &str, count: usize) -> Vec<Order> {
    (1..=count)
        .map(|n| order(&format!("order-{n:03}"), destination))
        .collect()
}

pub fn flight_numbers(itineraries: &[Itinerary]) -> Vec<Option<u32>> {
    itineraries
        .iter()
        .map(|it| match it {
            Itinerary::Scheduled { flight_number, .. } => Some(*flight_number),
            Itinerary::Unscheduled { .. } => None,
        })
        .collect()
}

pub fn loads(schedule: &Schedule) -> Vec<usize> {
    schedule.flights().iter().map(|f| f.orders().len()).collect()
}

pub fn arb_location() -> impl Strategy<Value = Arc<str>> {
    prop_oneof![Just(id("YUL")), Just(id("YYZ")), Just(id("YVR")), Just(id("YYC")),]
}

pub fn arb_flight_spec() -> impl Strategy<Value = (Arc<str>, Arc<str>, i32, u32)> {
    (arb_location(), arb_location(), 1..5i32, 1..6u32)
}
