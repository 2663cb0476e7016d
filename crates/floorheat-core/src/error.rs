use thiserror::Error;

use crate::region::RegionId;

#[derive(Error, Debug)]
pub enum FloorheatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Invalid region name: {0:?}")]
    InvalidName(String),

    #[error("A region named {0:?} already exists")]
    DuplicateName(String),

    #[error("Region {name:?} needs at least 3 points to finish (has {points})")]
    DegenerateRegion { name: String, points: usize },

    #[error("No region with id {0}")]
    UnknownRegion(RegionId),

    #[error("No region is being drawn")]
    NotDrawing,

    #[error("Finish or cancel the current region first")]
    Busy,

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
}

pub type Result<T> = std::result::Result<T, FloorheatError>;
