pub mod cache;
pub mod lookup;
