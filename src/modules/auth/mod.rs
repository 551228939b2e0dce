pub mod middleware;
pub mod repository;
pub mod routes;
pub mod service;
#[cfg(test)]
mod tests;

pub use routes::get_router;
