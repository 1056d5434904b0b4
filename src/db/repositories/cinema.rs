use crate::entities::{cinemas, prelude::*};
use crate::models::{Cinema, Screen};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

pub struct CinemaRepository {
    conn: DatabaseConnection,
}

impl CinemaRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model_to_cinema(model: cinemas::Model) -> Cinema {
        Cinema {
            id: model.id,
            name: model.name,
            address: model.address,
            city: model.city,
            phone: model.phone,
            status: model.status,
            screens: model
                .screens
                .and_then(|s| serde_json::from_str::<Vec<Screen>>(&s).ok())
                .unwrap_or_default(),
        }
    }

    pub async fn list_active(&self) -> anyhow::Result<Vec<Cinema>> {
        let rows = Cinemas::find()
            .filter(cinemas::Column::Status.eq("active"))
            .order_by_asc(cinemas::Column::Name)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model_to_cinema).collect())
    }

    pub async fn count(&self) -> anyhow::Result<u64> {
        Ok(Cinemas::find().count(&self.conn).await?)
    }

    pub async fn insert(&self, cinema: &Cinema) -> anyhow::Result<i32> {
        let active = cinemas::ActiveModel {
            name: Set(cinema.name.clone()),
            address: Set(cinema.address.clone()),
            city: Set(cinema.city.clone()),
            phone: Set(cinema.phone.clone()),
            status: Set(cinema.status.clone()),
            screens: Set(serde_json::to_string(&cinema.screens).ok()),
            ..Default::default()
        };

        let result = Cinemas::insert(active).exec(&self.conn).await?;
        info!("Created cinema: {}", cinema.name);
        Ok(result.last_insert_id)
    }

    /// Used by the seed command before re-inserting fixtures.
    pub async fn clear(&self) -> anyhow::Result<u64> {
        let result = Cinemas::delete_many().exec(&self.conn).await?;
        Ok(result.rows_affected)
    }
}
