//! Fixture theaters for a fresh deployment, inserted by `marquee seed`.

use crate::db::Store;
use crate::models::{Cinema, Screen, SeatMap};
use tracing::info;

fn fixture_cinemas() -> Vec<Cinema> {
    vec![
        Cinema {
            id: 0,
            name: "Grand Central Cinema".to_string(),
            address: Some("16 Station Road".to_string()),
            city: Some("Metropolis".to_string()),
            phone: Some("0283625858".to_string()),
            status: "active".to_string(),
            screens: vec![Screen {
                name: "Screen 1".to_string(),
                capacity: 150,
                formats: vec!["2D".to_string(), "3D".to_string()],
                seat_map: SeatMap {
                    rows: 10,
                    columns: 15,
                    vip_rows: vec!["H".to_string(), "I".to_string(), "J".to_string()],
                    couple_rows: vec!["K".to_string()],
                },
            }],
        },
        Cinema {
            id: 0,
            name: "Riverside Multiplex".to_string(),
            address: Some("26 Harbor Avenue".to_string()),
            city: Some("Metropolis".to_string()),
            phone: Some("0283625859".to_string()),
            status: "active".to_string(),
            screens: vec![Screen {
                name: "Screen 1".to_string(),
                capacity: 200,
                formats: vec!["2D".to_string(), "3D".to_string(), "IMAX".to_string()],
                seat_map: SeatMap {
                    rows: 12,
                    columns: 18,
                    vip_rows: vec!["J".to_string(), "K".to_string(), "L".to_string()],
                    couple_rows: vec!["M".to_string()],
                },
            }],
        },
        Cinema {
            id: 0,
            name: "Westgate Screens".to_string(),
            address: Some("116 Market Street".to_string()),
            city: Some("Metropolis".to_string()),
            phone: Some("0283625860".to_string()),
            status: "active".to_string(),
            screens: vec![Screen {
                name: "Screen 1".to_string(),
                capacity: 180,
                formats: vec!["2D".to_string(), "4DX".to_string()],
                seat_map: SeatMap {
                    rows: 11,
                    columns: 16,
                    vip_rows: vec!["I".to_string(), "J".to_string(), "K".to_string()],
                    couple_rows: vec!["L".to_string()],
                },
            }],
        },
    ]
}

/// Replaces any existing theaters with the fixture set.
pub async fn seed_cinemas(store: &Store) -> anyhow::Result<usize> {
    let cleared = store.clear_cinemas().await?;
    if cleared > 0 {
        info!("Cleared {} existing cinemas", cleared);
    }

    let cinemas = fixture_cinemas();
    for cinema in &cinemas {
        store.insert_cinema(cinema).await?;
    }

    info!("Seeded {} cinemas", cinemas.len());
    Ok(cinemas.len())
}
