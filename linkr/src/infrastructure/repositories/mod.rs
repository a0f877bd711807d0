pub mod lis_file_repository;

pub use lis_file_repository::LisFileRepository;
