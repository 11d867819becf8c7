mod client;
mod service;

pub use service::Service;
