pub mod swp;
pub mod wealth;
