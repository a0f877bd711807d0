pub mod error;
pub mod link;
pub mod link_list;
pub mod opener;
pub mod repositories;
pub mod search;
