pub mod booking;

pub use booking::{BookingClient, SeatQuery};
