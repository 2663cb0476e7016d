pub mod config;
pub mod inspect;
pub mod render;

use std::path::Path;

use anyhow::{Context, Result};
use floorheat_core::config::CancelPolicy;
use floorheat_core::interaction::{AppState, InputEvent};
use floorheat_core::io::{load_layout, load_value_map};
use floorheat_core::values::ValueMap;
use tracing::warn;

/// Build the scene the same way the GUI does: image size, then values, then
/// each layout region replayed as drawing events.
pub(crate) fn build_state(
    image_size: Option<(u32, u32)>,
    layout: &Path,
    values: Option<&Path>,
    cancel_policy: CancelPolicy,
) -> Result<AppState> {
    let values = match values {
        Some(path) => load_value_map(path)
            .with_context(|| format!("Failed to load values from {}", path.display()))?,
        None => ValueMap::new(),
    };
    let layout = load_layout(layout)
        .with_context(|| format!("Failed to load layout from {}", layout.display()))?;

    let mut state = AppState::new().with_cancel_policy(cancel_policy);
    if let Some((width, height)) = image_size {
        state.apply(&InputEvent::ImageLoaded { width, height })?;
    }
    state.apply(&InputEvent::ValuesLoaded(values))?;
    layout.apply_to(&mut state)?;

    if !state.values().has_positive() {
        warn!("No positive values, the heat layer will be empty");
    }
    for region in state.regions().iter() {
        if !state.values().contains(region.name()) {
            warn!(region = region.name(), "No value for region, using 0");
        }
    }
    Ok(state)
}
