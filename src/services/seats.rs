use crate::clients::{BookingClient, SeatQuery};
use tracing::warn;

/// Seat-availability lookup, delegated to the booking service.
///
/// The contract is fail-open: a failed lookup returns an empty seat list so
/// the catalog API never surfaces booking-service outages. Failures stay
/// observable through the `catalog_seat_lookup_failures_total` counter and a
/// warning log; callers cannot distinguish "no bookings" from "lookup failed"
/// on the wire.
pub struct SeatService {
    booking: BookingClient,
}

impl SeatService {
    #[must_use]
    pub const fn new(booking: BookingClient) -> Self {
        Self { booking }
    }

    pub async fn booked_seats(&self, query: &SeatQuery) -> Vec<String> {
        match self.booking.booked_seats(query).await {
            Ok(seats) => seats,
            Err(e) => {
                metrics::counter!("catalog_seat_lookup_failures_total").increment(1);
                warn!(
                    movie_id = query.movie_id,
                    cinema = %query.cinema,
                    "Seat lookup failed, returning empty list: {e}"
                );
                Vec::new()
            }
        }
    }
}
