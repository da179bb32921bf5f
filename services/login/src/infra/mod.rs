pub mod authenticator;
pub mod db;
pub mod reaper;
