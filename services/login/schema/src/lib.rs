//! SeaORM entities for the login service tables.

pub mod otc_codes;
pub mod telegram_users;
