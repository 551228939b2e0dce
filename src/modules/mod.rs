pub mod account;
pub mod auth;

mod router;
pub use router::get_router;
