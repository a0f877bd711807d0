// linkr/src/application/mod.rs
pub mod services;

pub use services::link_service::LinkService;
