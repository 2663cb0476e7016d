use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use floorheat_core::config::{load_config, save_config, FloorheatConfig};
use floorheat_core::io::{load_base_image, load_value_map, save_png};
use floorheat_core::values::ValueMap;
use image::RgbaImage;

/// Results sent from file-dialog threads back to the UI thread.
pub enum FileMessage {
    ImageOpened { path: PathBuf, image: RgbaImage },
    ValuesOpened { path: PathBuf, values: ValueMap },
    ConfigImported { path: PathBuf, config: FloorheatConfig },
    Saved { path: PathBuf },
    Error { message: String },
}

impl FileMessage {
    fn from_result(result: Result<Self>) -> Self {
        result.unwrap_or_else(|e| Self::Error {
            message: format!("{e:#}"),
        })
    }
}

pub fn open_image(path: PathBuf) -> FileMessage {
    FileMessage::from_result(
        load_base_image(&path)
            .with_context(|| format!("Failed to open {}", path.display()))
            .map(|image| FileMessage::ImageOpened { path, image }),
    )
}

pub fn open_values(path: PathBuf) -> FileMessage {
    FileMessage::from_result(
        load_value_map(&path)
            .with_context(|| format!("Failed to load values from {}", path.display()))
            .map(|values| FileMessage::ValuesOpened { path, values }),
    )
}

pub fn import_config(path: PathBuf) -> FileMessage {
    FileMessage::from_result(
        load_config(&path)
            .with_context(|| format!("Failed to import config from {}", path.display()))
            .map(|config| FileMessage::ConfigImported { path, config }),
    )
}

pub fn export_config(config: &FloorheatConfig, path: PathBuf) -> FileMessage {
    FileMessage::from_result(write_with(&path, |p| save_config(config, p)).map(|()| {
        FileMessage::Saved { path }
    }))
}

pub fn export_png(image: &RgbaImage, path: PathBuf) -> FileMessage {
    FileMessage::from_result(
        write_with(&path, |p| save_png(image, p)).map(|()| FileMessage::Saved { path }),
    )
}

fn write_with(
    path: &Path,
    write: impl FnOnce(&Path) -> floorheat_core::error::Result<()>,
) -> Result<()> {
    write(path).with_context(|| format!("Failed to write {}", path.display()))
}
