pub mod link_repository;

pub use link_repository::LinkRepository;
