pub mod observability;
pub mod repositories;
