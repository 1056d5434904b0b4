use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cinema {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub status: String,
    pub screens: Vec<Screen>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Screen {
    pub name: String,
    pub capacity: i32,
    #[serde(default)]
    pub formats: Vec<String>,
    pub seat_map: SeatMap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatMap {
    pub rows: i32,
    pub columns: i32,
    #[serde(default)]
    pub vip_rows: Vec<String>,
    #[serde(default)]
    pub couple_rows: Vec<String>,
}
