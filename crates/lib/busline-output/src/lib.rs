#![forbid(unsafe_code)]

pub mod logger;
pub mod surface;
pub mod terminal;
pub mod ui;
