pub mod handlers;
pub mod responses;
pub mod routes;
