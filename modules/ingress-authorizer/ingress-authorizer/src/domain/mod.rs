pub mod acl;
pub mod error;
pub mod redirect;
pub mod service;
