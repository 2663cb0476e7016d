pub mod compose;
pub mod config;
pub mod consts;
pub mod error;
pub mod geometry;
pub mod heat;
pub mod interaction;
pub mod io;
pub mod region;
pub mod values;
pub mod viewport;
