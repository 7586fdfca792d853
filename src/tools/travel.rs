//! Travel-domain mock tools.
//!
//! Every tool here returns canned data; they exist to exercise agent
//! wiring, not to talk to real booking systems. Validation failures come
//! back as [`ToolReply::invalid`] so they stay distinguishable from
//! success text downstream.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use super::tool::{FnTool, ToolReply};
use super::types::ToolParameters;
use super::validation::{is_valid_airport, is_valid_date, is_valid_month};
use crate::error::ConciergeError;

/// Extract a required string argument.
fn required_str(args: &serde_json::Value, name: &str) -> Result<String, ConciergeError> {
    args.get(name)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| ConciergeError::InvalidArgument(format!("missing string argument '{name}'")))
}

/// Weather for a city. Always sunny.
pub fn get_weather() -> FnTool {
    FnTool::new(
        "get_weather",
        "Get weather for a given city.",
        ToolParameters::object()
            .string("city", "The city to get the weather for", true)
            .build(),
        |args, _ctx| async move {
            let city = required_str(&args, "city")?;
            Ok(ToolReply::success(format!("It's always sunny in {city}!")))
        },
    )
}

/// Weather forecast for a destination in a month, with progress updates.
pub fn weather_forecast() -> FnTool {
    FnTool::new(
        "weather_forecast",
        "Get weather forecast for a destination in a specific month",
        ToolParameters::object()
            .string(
                "destination",
                "Destination to get weather forecast for (e.g., London, UK)",
                true,
            )
            .string(
                "month",
                "Month to get weather forecast for (e.g., January, February, etc.)",
                true,
            )
            .build(),
        |args, ctx| async move {
            let destination = required_str(&args, "destination")?;
            let month = required_str(&args, "month")?;
            if destination.is_empty() {
                return Ok(ToolReply::invalid("Error: Destination is required"));
            }
            if !is_valid_month(&month) {
                return Ok(ToolReply::invalid(
                    "Error: Invalid month. Please use a valid month name (e.g., January, February, etc.)",
                ));
            }

            // Simulated API latency, as in the rest of the mock layer.
            ctx.report("Fetching weather data...");
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            ctx.report("Processing weather information...");

            Ok(ToolReply::success(format!(
                "Weather forecast for {destination} in {month}: Sunny and warm with temperatures \
                 around 72°F (22°C). Perfect for outdoor activities!"
            )))
        },
    )
}

/// Locate a flight between two airports on a date.
pub fn flight_locator() -> FnTool {
    FnTool::new(
        "flight_locator",
        "Find available flights between two airports on a specific date",
        ToolParameters::object()
            .string("origin", "Origin airport code (e.g., JFK, LHR)", true)
            .string(
                "destination",
                "Destination airport code (e.g., JFK, LHR)",
                true,
            )
            .string("date", "Travel date in YYYY-MM-DD format", true)
            .build(),
        |args, _ctx| async move {
            let origin = required_str(&args, "origin")?;
            let destination = required_str(&args, "destination")?;
            let date = required_str(&args, "date")?;
            if !is_valid_airport(&origin) {
                return Ok(ToolReply::invalid(
                    "Error: Invalid origin airport code. Please use a valid IATA code (e.g., JFK, LHR)",
                ));
            }
            if !is_valid_airport(&destination) {
                return Ok(ToolReply::invalid(
                    "Error: Invalid destination airport code. Please use a valid IATA code (e.g., JFK, LHR)",
                ));
            }
            if !is_valid_date(&date) {
                return Ok(ToolReply::invalid(
                    "Error: Invalid date format. Please use YYYY-MM-DD format",
                ));
            }
            Ok(ToolReply::success(format!(
                "Flight from {origin} to {destination} on {date}: EL657, departure at 10:00 AM, \
                 arrival at 11:00 AM"
            )))
        },
    )
}

/// Book an airport taxi ahead of a departure.
pub fn airport_taxi_booking() -> FnTool {
    FnTool::new(
        "airport_taxi_booking",
        "Book a taxi to the airport in time for a flight departure",
        ToolParameters::object()
            .string("origin", "City to book the taxi in (e.g., Tel-Aviv, Israel)", true)
            .string(
                "departure",
                "Flight departure time (e.g., 10:00 AM, 11:00 AM)",
                true,
            )
            .build(),
        |args, _ctx| async move {
            let origin = required_str(&args, "origin")?;
            let departure = required_str(&args, "departure")?;
            Ok(ToolReply::success(format!(
                "Taxi booked to {origin} airport for the {departure} departure"
            )))
        },
    )
}

/// Book a hotel for an arrival date.
pub fn hotel_booking() -> FnTool {
    FnTool::new(
        "hotel_booking",
        "Book a hotel for a given arrival date",
        ToolParameters::object()
            .string(
                "arrival_date",
                "Arrival date (e.g., January 12th, February 1st)",
                true,
            )
            .build(),
        |args, _ctx| async move {
            let arrival_date = required_str(&args, "arrival_date")?;
            Ok(ToolReply::success(format!(
                "Hotel booked for arrival on {arrival_date}"
            )))
        },
    )
}

/// Recommend attractions at a destination.
pub fn attraction_recommendation() -> FnTool {
    FnTool::new(
        "attraction_recommendation",
        "Recommend attractions at a destination",
        ToolParameters::object()
            .string("destination", "Destination to get attraction recommendations for", true)
            .build(),
        |args, _ctx| async move {
            let destination = required_str(&args, "destination")?;
            if destination.is_empty() {
                return Ok(ToolReply::invalid("Error: Destination is required"));
            }
            Ok(ToolReply::success(format!(
                "Top attractions in {destination}: old town walking tour, harbor boat ride, and \
                 the city museum"
            )))
        },
    )
}

/// Book a hotel by name (the sensitive tool used in approval flows).
pub fn book_hotel() -> FnTool {
    FnTool::new(
        "book_hotel",
        "Book a hotel",
        ToolParameters::object()
            .string("hotel_name", "The name of the hotel to book", true)
            .build(),
        |args, _ctx| async move {
            let hotel_name = required_str(&args, "hotel_name")?;
            Ok(ToolReply::success(format!(
                "Successfully booked a stay at {hotel_name}."
            )))
        },
    )
}

/// Book a flight between two airports.
pub fn book_flight() -> FnTool {
    FnTool::new(
        "book_flight",
        "Book a flight",
        ToolParameters::object()
            .string("from_airport", "The departure airport code", true)
            .string("to_airport", "The arrival airport code", true)
            .build(),
        |args, _ctx| async move {
            let from_airport = required_str(&args, "from_airport")?;
            let to_airport = required_str(&args, "to_airport")?;
            if !is_valid_airport(&from_airport) || !is_valid_airport(&to_airport) {
                return Ok(ToolReply::invalid(
                    "Error: Invalid airport code. Please use a valid IATA code (e.g., JFK, LHR)",
                ));
            }
            Ok(ToolReply::success(format!(
                "Successfully booked a flight from {from_airport} to {to_airport}."
            )))
        },
    )
}

/// A flight in the mock catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flight {
    pub id: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub date: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub price: f64,
    pub airline: String,
}

/// Flight details with availability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlightInformation {
    #[serde(flatten)]
    pub flight: Flight,
    pub available_seats: u32,
    pub booking_status: String,
}

/// A confirmed booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookedFlight {
    #[serde(flatten)]
    pub flight: Flight,
    pub booking_ref: String,
    pub passenger_name: String,
}

/// Request-scoped mock flight database.
///
/// Passed around as an explicit handle instead of a process-wide global;
/// each search replaces the stored result set, and lookups/bookings read
/// from it.
#[derive(Debug, Default)]
pub struct FlightStore {
    flights: Mutex<Vec<Flight>>,
}

impl FlightStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search flights; populates and returns the mock result set.
    pub fn search_flights(&self, origin: &str, destination: &str, date: &str) -> Vec<Flight> {
        let catalog = [
            ("1", "AA123", "08:00 AM", "10:30 AM", 299.99, "American Airlines"),
            ("2", "AA456", "11:00 AM", "13:30 PM", 349.99, "American Airlines"),
            ("3", "UA789", "14:00 PM", "16:30 PM", 279.99, "United Airlines"),
            ("4", "DL321", "17:00 PM", "19:30 PM", 399.99, "Delta Airlines"),
        ];
        let flights: Vec<Flight> = catalog
            .iter()
            .map(
                |(id, number, departure, arrival, price, airline)| Flight {
                    id: (*id).to_string(),
                    flight_number: (*number).to_string(),
                    origin: origin.to_string(),
                    destination: destination.to_string(),
                    date: date.to_string(),
                    departure_time: (*departure).to_string(),
                    arrival_time: (*arrival).to_string(),
                    price: *price,
                    airline: (*airline).to_string(),
                },
            )
            .collect();
        *self.flights.lock().expect("flight store lock") = flights.clone();
        flights
    }

    /// Look up details for a previously searched flight.
    pub fn lookup_flight(&self, flight_number: &str) -> Option<FlightInformation> {
        let flights = self.flights.lock().expect("flight store lock");
        flights
            .iter()
            .find(|flight| flight.flight_number == flight_number)
            .map(|flight| FlightInformation {
                flight: flight.clone(),
                available_seats: 12,
                booking_status: "Available".to_string(),
            })
    }

    /// Book a previously searched flight for a passenger.
    pub fn book_flight(&self, flight_number: &str, passenger_name: &str) -> Option<BookedFlight> {
        let flights = self.flights.lock().expect("flight store lock");
        flights
            .iter()
            .find(|flight| flight.flight_number == flight_number)
            .map(|flight| BookedFlight {
                flight: flight.clone(),
                booking_ref: "JH234X".to_string(),
                passenger_name: passenger_name.to_string(),
            })
    }

    /// Confirmation message for a completed booking.
    pub fn booking_confirmation(&self, destination: &str) -> String {
        format!("Your flight to {destination} has been booked. An email has been sent to you.")
    }
}

/// Flight-search tool backed by an injected store handle.
pub fn search_flights_tool(store: Arc<FlightStore>) -> FnTool {
    FnTool::new(
        "search_flights",
        "Search available flights between two cities on a date",
        ToolParameters::object()
            .string("origin", "Origin city", true)
            .string("destination", "Destination city", true)
            .string("date", "Travel date", true)
            .build(),
        move |args, _ctx| {
            let store = Arc::clone(&store);
            async move {
                let origin = required_str(&args, "origin")?;
                let destination = required_str(&args, "destination")?;
                let date = required_str(&args, "date")?;
                let flights = store.search_flights(&origin, &destination, &date);
                let listing = flights
                    .iter()
                    .map(|flight| {
                        format!(
                            "{} {} {} -> {} ({} - {}) ${:.2}",
                            flight.airline,
                            flight.flight_number,
                            flight.origin,
                            flight.destination,
                            flight.departure_time,
                            flight.arrival_time,
                            flight.price
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(ToolReply::success(listing))
            }
        },
    )
}
