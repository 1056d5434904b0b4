use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub avatar: Option<String>,
    /// JSON array of upload paths, insertion order preserved.
    pub images: Option<String>,
    pub category_id: Option<i32>,
    pub release_date: Option<String>,
    pub duration: Option<i32>,
    pub rated: Option<String>,
    pub age_rating: Option<String>,
    pub language: Option<String>,
    pub director: Option<String>,
    pub price_standard: i64,
    pub price_vip: i64,
    pub price_couple: i64,
    /// JSON array of showtime objects (cinema_id, date, times, format).
    pub showtimes: Option<String>,
    pub position: i32,
    pub status: String,
    pub deleted: bool,
    pub deleted_at: Option<String>,
    pub deleted_by: Option<String>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Categories,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
