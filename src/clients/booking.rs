use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct BookingResponse {
    #[serde(default, rename = "bookedSeats")]
    booked_seats: Vec<String>,
}

/// Parameters identifying one showing; all four are required by the booking
/// service.
#[derive(Debug, Clone)]
pub struct SeatQuery {
    pub movie_id: i32,
    pub cinema: String,
    pub date: String,
    pub time: String,
}

#[derive(Clone)]
pub struct BookingClient {
    client: Client,
    base_url: String,
}

impl BookingClient {
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent("Marquee/1.0")
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build booking HTTP client: {e}"))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub const fn with_shared_client(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Fetches the seats already booked for a showing. Errors here are the
    /// caller's to swallow; this client only reports them.
    pub async fn booked_seats(&self, query: &SeatQuery) -> Result<Vec<String>> {
        let url = format!(
            "{}/api/booking/seats/{}?cinema={}&date={}&time={}",
            self.base_url,
            query.movie_id,
            urlencoding::encode(&query.cinema),
            urlencoding::encode(&query.date),
            urlencoding::encode(&query.time),
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Booking service error: {} - {}",
                status,
                body
            ));
        }

        let response: BookingResponse = response.json().await?;

        Ok(response.booked_seats)
    }
}
