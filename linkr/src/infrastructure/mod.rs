pub mod opener;
pub mod repositories;
