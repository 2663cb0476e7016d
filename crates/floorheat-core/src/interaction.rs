//! View/draw interaction state machine.
//!
//! Every input is an [`InputEvent`] applied to an [`AppState`]. A rejected
//! event returns an error and leaves the state exactly as it was.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::config::CancelPolicy;
use crate::error::{FloorheatError, Result};
use crate::geometry::Point;
use crate::region::{Region, RegionId, RegionSet, RegionSummary};
use crate::values::ValueMap;
use crate::viewport::Viewport;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Mode {
    #[default]
    View,
    Draw(RegionId),
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::View => write!(f, "View"),
            Self::Draw(id) => write!(f, "Draw {id}"),
        }
    }
}

/// Pointer positions are device (canvas-local) coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    ImageLoaded { width: u32, height: u32 },
    ValuesLoaded(ValueMap),
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    /// Positive direction zooms in, negative zooms out.
    Wheel { at: Point, direction: i32 },
    Click(Point),
    CreateRegion(String),
    SelectRegion(RegionId),
    FinishDrawing,
    CancelDrawing,
    ClearPoints(RegionId),
    DeleteRegion(RegionId),
}

/// What an accepted event changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Not meaningful in the current mode, or nothing visible changed.
    Ignored,
    /// Only the viewport moved; the heat layer is still valid.
    ViewChanged,
    /// Regions, values or the image changed; the heat layer must be rebuilt.
    SceneChanged,
}

impl Outcome {
    pub fn needs_redraw(self) -> bool {
        self != Self::Ignored
    }
}

/// Everything the compositor needs, mutated only through [`AppState::apply`].
#[derive(Clone, Debug, Default)]
pub struct AppState {
    regions: RegionSet,
    viewport: Viewport,
    mode: Mode,
    drag_anchor: Option<Point>,
    /// Region opened by `CreateRegion` in the current drawing session.
    fresh_region: Option<RegionId>,
    values: ValueMap,
    image_size: Option<(u32, u32)>,
    cancel_policy: CancelPolicy,
}

/// Observational snapshot for list/debug UIs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StateSnapshot {
    pub mode: Mode,
    pub zoom: f32,
    pub pan: Point,
    pub regions: Vec<RegionSummary>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel_policy(mut self, policy: CancelPolicy) -> Self {
        self.cancel_policy = policy;
        self
    }

    pub fn regions(&self) -> &RegionSet {
        &self.regions
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Direct viewport access for front-ends (e.g. fit-to-window).
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.image_size
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Normalization denominator for heat synthesis.
    pub fn max_value(&self) -> f64 {
        self.values.max_value()
    }

    pub fn active_region(&self) -> Option<&Region> {
        match self.mode {
            Mode::Draw(id) => self.regions.get(id),
            Mode::View => None,
        }
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            mode: self.mode,
            zoom: self.viewport.zoom,
            pan: self.viewport.pan,
            regions: self.regions.snapshot(),
        }
    }

    pub fn apply(&mut self, event: &InputEvent) -> Result<Outcome> {
        debug!(?event, mode = %self.mode, "Input event");
        match (event, self.mode) {
            (InputEvent::ImageLoaded { width, height }, _) => {
                self.image_size = Some((*width, *height));
                self.viewport.reset();
                self.drag_anchor = None;
                Ok(Outcome::SceneChanged)
            }
            (InputEvent::ValuesLoaded(values), _) => {
                self.values = values.clone();
                self.regions.sync_values(&self.values);
                Ok(Outcome::SceneChanged)
            }

            (InputEvent::PointerDown(p), Mode::View) => {
                self.drag_anchor = Some(*p);
                Ok(Outcome::Ignored)
            }
            (InputEvent::PointerMove(p), Mode::View) => match self.drag_anchor {
                Some(last) => {
                    self.viewport.pan_by(*p - last);
                    self.drag_anchor = Some(*p);
                    Ok(Outcome::ViewChanged)
                }
                None => Ok(Outcome::Ignored),
            },
            (InputEvent::PointerUp, _) => {
                self.drag_anchor = None;
                Ok(Outcome::Ignored)
            }
            (InputEvent::Wheel { at, direction }, Mode::View) => {
                if *direction == 0 {
                    return Ok(Outcome::Ignored);
                }
                self.viewport.zoom_at(*at, *direction);
                Ok(Outcome::ViewChanged)
            }
            (InputEvent::PointerDown(_) | InputEvent::PointerMove(_), Mode::Draw(_))
            | (InputEvent::Wheel { .. }, Mode::Draw(_))
            | (InputEvent::Click(_), Mode::View) => Ok(Outcome::Ignored),

            (InputEvent::Click(p), Mode::Draw(id)) => {
                let point = self.viewport.to_image_space(*p);
                let count = self.regions.append_point(id, point)?;
                debug!(region = %id, x = point.x, y = point.y, count, "Point appended");
                Ok(Outcome::SceneChanged)
            }

            (InputEvent::CreateRegion(name), Mode::View) => {
                let id = self.regions.create(name, &self.values)?;
                self.drag_anchor = None;
                self.fresh_region = Some(id);
                self.mode = Mode::Draw(id);
                Ok(Outcome::SceneChanged)
            }
            (InputEvent::SelectRegion(id), Mode::View) => {
                if !self.regions.contains(*id) {
                    return Err(FloorheatError::UnknownRegion(*id));
                }
                self.drag_anchor = None;
                self.fresh_region = None;
                self.mode = Mode::Draw(*id);
                Ok(Outcome::SceneChanged)
            }
            (InputEvent::SelectRegion(id), Mode::Draw(active)) if *id == active => {
                Ok(Outcome::Ignored)
            }
            (InputEvent::CreateRegion(_) | InputEvent::SelectRegion(_), Mode::Draw(_)) => {
                Err(FloorheatError::Busy)
            }

            (InputEvent::FinishDrawing, Mode::Draw(id)) => {
                let region = self
                    .regions
                    .get(id)
                    .ok_or(FloorheatError::UnknownRegion(id))?;
                if !region.is_complete() {
                    return Err(FloorheatError::DegenerateRegion {
                        name: region.name().to_string(),
                        points: region.points().len(),
                    });
                }
                self.fresh_region = None;
                self.mode = Mode::View;
                Ok(Outcome::SceneChanged)
            }
            (InputEvent::CancelDrawing, Mode::Draw(id)) => {
                let empty = self
                    .regions
                    .get(id)
                    .is_some_and(|r| r.points().is_empty());
                let fresh = self.fresh_region.take() == Some(id);
                if empty && fresh && self.cancel_policy == CancelPolicy::DiscardEmpty {
                    self.regions.delete(id)?;
                    debug!(region = %id, "Discarded empty region on cancel");
                }
                self.mode = Mode::View;
                Ok(Outcome::SceneChanged)
            }
            (InputEvent::FinishDrawing | InputEvent::CancelDrawing, Mode::View) => {
                Err(FloorheatError::NotDrawing)
            }

            (InputEvent::ClearPoints(id), _) => {
                self.regions.clear_points(*id)?;
                Ok(Outcome::SceneChanged)
            }
            (InputEvent::DeleteRegion(id), mode) => {
                self.regions.delete(*id)?;
                if self.fresh_region == Some(*id) {
                    self.fresh_region = None;
                }
                if mode == Mode::Draw(*id) {
                    self.mode = Mode::View;
                }
                Ok(Outcome::SceneChanged)
            }
        }
    }
}

/// Pure-function form of [`AppState::apply`].
pub fn reduce(mut state: AppState, event: &InputEvent) -> (AppState, Result<Outcome>) {
    let outcome = state.apply(event);
    (state, outcome)
}
