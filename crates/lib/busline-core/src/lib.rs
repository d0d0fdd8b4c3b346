#![forbid(unsafe_code)]

pub use indexmap;

pub mod animator;
pub mod context;
pub mod controller;
pub mod error;
pub mod geo;
pub mod marker;
pub mod renderer;
pub mod route;
pub mod selection;
pub mod surface;
pub mod vehicle;
