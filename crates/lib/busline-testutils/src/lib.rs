pub mod context;
pub mod surface;
