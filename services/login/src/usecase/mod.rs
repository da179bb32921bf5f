pub mod login;
pub mod otc;
pub mod reap;
pub mod redeem;
pub mod signup;
