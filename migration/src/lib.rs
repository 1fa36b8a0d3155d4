pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_identity_schema;
mod m20260301_000002_create_directory_schema;
mod m20260301_000003_create_booking_schema;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_identity_schema::Migration),
            Box::new(m20260301_000002_create_directory_schema::Migration),
            Box::new(m20260301_000003_create_booking_schema::Migration),
        ]
    }
}
