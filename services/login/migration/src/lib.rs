pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_otc_codes;
mod m20250601_000002_create_telegram_users;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_otc_codes::Migration),
            Box::new(m20250601_000002_create_telegram_users::Migration),
        ]
    }
}
