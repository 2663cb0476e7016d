/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Lower zoom bound of the viewport.
pub const MIN_ZOOM: f32 = 0.1;

/// Upper zoom bound of the viewport.
pub const MAX_ZOOM: f32 = 5.0;

/// Multiplicative zoom change for one wheel notch.
pub const ZOOM_STEP: f32 = 1.1;

/// Exponent of the compressive intensity curve `t^0.3`.
pub const INTENSITY_EXPONENT: f64 = 0.3;

/// Minimum intensity any contributing region glows with.
pub const INTENSITY_FLOOR: f64 = 0.3;

/// Normalized value substituted when `value / max` is not finite.
pub const FALLBACK_NORMALIZED: f64 = 0.5;

/// Outer gradient radius as a multiple of the region's bounding radius.
pub const GRADIENT_RADIUS_SCALE: f32 = 1.2;

/// Position of the intermediate gradient stop (fraction of outer radius).
pub const GRADIENT_MID_OFFSET: f32 = 0.7;

/// Intensity multiplier at the intermediate gradient stop.
pub const GRADIENT_MID_LEVEL: f32 = 0.8;

/// Intensity multiplier at the outer gradient radius.
pub const GRADIENT_EDGE_LEVEL: f32 = 0.3;

/// Alpha gain applied after blurring so a `t = 1` region is fully covered
/// and the overlay shows at the configured opacity.
pub const HEAT_AMPLIFICATION: f32 = 2.0;

/// Default Gaussian sigma (pixels) for the heat layer.
pub const DEFAULT_BLUR_RADIUS: f32 = 20.0;

/// Allowed blur radius range.
pub const BLUR_RADIUS_RANGE: (f32, f32) = (0.0, 60.0);

/// Default heat overlay opacity.
pub const DEFAULT_OPACITY: f32 = 0.6;

/// Allowed overlay opacity range.
pub const OPACITY_RANGE: (f32, f32) = (0.05, 1.0);

/// Regions need this many points to be considered complete.
pub const MIN_REGION_POINTS: usize = 3;

/// Small epsilon to avoid division by zero in floating-point comparisons.
pub const EPSILON: f32 = 1e-6;
