mod common;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use common::{department_scene, draw_region, rect, scene};
use floorheat_core::config::HeatSettings;
use floorheat_core::geometry::Point;
use floorheat_core::heat::blur::{gaussian_blur_array, make_gaussian_kernel};
use floorheat_core::heat::colormap::ColorScale;
use floorheat_core::heat::fill::fill_polygon;
use floorheat_core::heat::gradient::RadialGradient;
use floorheat_core::heat::intensity::{compress, normalized, region_intensity};
use floorheat_core::heat::{contributions, HeatSynthesizer};
use floorheat_core::interaction::AppState;
use ndarray::Array2;

fn synthesize(state: &AppState, settings: &HeatSettings) -> Option<floorheat_core::heat::HeatLayer> {
    let (w, h) = state.image_size().unwrap();
    HeatSynthesizer::new().synthesize(state.regions(), state.max_value(), w, h, settings)
}

// ---------------------------------------------------------------------------
// Intensity
// ---------------------------------------------------------------------------

#[test]
fn test_compress_curve() {
    assert_relative_eq!(compress(1.0), 1.0);
    assert_relative_eq!(compress(0.5), 0.5f64.powf(0.3), epsilon = 1e-12);
    // Floor of 0.3 below t = 0.3^(1/0.3)
    assert_relative_eq!(compress(0.0), 0.3);
    assert_relative_eq!(compress(0.01), 0.3);
}

#[test]
fn test_normalized_clamps_and_falls_back() {
    assert_relative_eq!(normalized(500.0, 1000.0), 0.5);
    assert_relative_eq!(normalized(2000.0, 1000.0), 1.0);
    assert_relative_eq!(normalized(5.0, 0.0), 0.5);
    assert_relative_eq!(normalized(0.0, 0.0), 0.5);
    assert_relative_eq!(normalized(1.0, f64::NAN), 0.5);
}

#[test]
fn test_zero_value_contributes_nothing() {
    assert!(region_intensity(0.0, 1000.0).is_none());
    assert_relative_eq!(region_intensity(1.0, 1000.0).unwrap(), 0.3);
}

#[test]
fn test_intensity_is_monotonic_in_value() {
    let levels: Vec<f64> = [10.0, 100.0, 250.0, 500.0, 750.0, 1000.0]
        .iter()
        .map(|&v| region_intensity(v, 1000.0).unwrap())
        .collect();
    for pair in levels.windows(2) {
        assert!(pair[0] <= pair[1], "{levels:?}");
    }
}

// ---------------------------------------------------------------------------
// Gradient and fill
// ---------------------------------------------------------------------------

#[test]
fn test_gradient_stops() {
    let g = RadialGradient::for_region(Point::ZERO, 10.0, 1.0);
    assert_relative_eq!(g.radius, 12.0);
    assert_relative_eq!(g.level_at(Point::ZERO), 1.0);
    assert_relative_eq!(g.level_at(Point::new(8.4, 0.0)), 0.8, epsilon = 1e-4);
    assert_relative_eq!(g.level_at(Point::new(0.0, 12.0)), 0.3, epsilon = 1e-4);
    assert_relative_eq!(g.level_at(Point::new(100.0, 0.0)), 0.3, epsilon = 1e-4);
    // Halfway between centre and the 0.7 stop
    assert_relative_eq!(g.level_at(Point::new(4.2, 0.0)), 0.9, epsilon = 1e-4);
}

#[test]
fn test_degenerate_gradient_is_flat() {
    let g = RadialGradient::for_region(Point::new(5.0, 5.0), 0.0, 0.7);
    assert_relative_eq!(g.level_at(Point::new(50.0, 50.0)), 0.7);
}

#[test]
fn test_fill_covers_pixel_centres() {
    let mut buf = Array2::<f32>::zeros((10, 10));
    fill_polygon(&mut buf, &rect(2.0, 2.0, 6.0, 6.0), |_| 1.0);
    assert_relative_eq!(buf.sum(), 16.0);
    assert_eq!(buf[[2, 2]], 1.0);
    assert_eq!(buf[[5, 5]], 1.0);
    assert_eq!(buf[[6, 6]], 0.0);
    assert_eq!(buf[[1, 3]], 0.0);
}

#[test]
fn test_fill_composites_source_over() {
    let mut buf = Array2::<f32>::zeros((4, 4));
    let square = rect(0.0, 0.0, 4.0, 4.0);
    fill_polygon(&mut buf, &square, |_| 0.5);
    fill_polygon(&mut buf, &square, |_| 0.5);
    for &v in buf.iter() {
        assert_relative_eq!(v, 0.75);
    }
}

#[test]
fn test_fill_clips_to_buffer() {
    let mut buf = Array2::<f32>::zeros((4, 4));
    fill_polygon(&mut buf, &rect(-10.0, -10.0, 20.0, 2.0), |_| 1.0);
    assert_relative_eq!(buf.sum(), 8.0);
}

// ---------------------------------------------------------------------------
// Blur
// ---------------------------------------------------------------------------

#[test]
fn test_kernel_is_normalised() {
    for sigma in [0.5f32, 1.0, 4.0, 20.0] {
        let k = make_gaussian_kernel(sigma);
        assert_eq!(k.len() % 2, 1);
        assert_relative_eq!(k.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
    }
}

#[test]
fn test_blur_preserves_constant_field() {
    let data = Array2::<f32>::from_elem((32, 48), 0.4);
    let out = gaussian_blur_array(&data, 3.0);
    for &v in out.iter() {
        assert_abs_diff_eq!(v, 0.4, epsilon = 1e-5);
    }
}

#[test]
fn test_blur_with_zero_sigma_is_identity() {
    let mut data = Array2::<f32>::zeros((8, 8));
    data[[3, 4]] = 1.0;
    assert_eq!(gaussian_blur_array(&data, 0.0), data);
    assert_eq!(gaussian_blur_array(&data, f32::NAN), data);
}

#[test]
fn test_blur_spreads_and_conserves_mass() {
    let mut data = Array2::<f32>::zeros((41, 41));
    data[[20, 20]] = 1.0;
    let out = gaussian_blur_array(&data, 2.0);
    assert!(out[[20, 20]] < 1.0);
    assert!(out[[20, 22]] > 0.0);
    assert_relative_eq!(out.sum(), 1.0, epsilon = 1e-4);
}

// ---------------------------------------------------------------------------
// Color scales
// ---------------------------------------------------------------------------

#[test]
fn test_color_scale_endpoints() {
    for scale in ColorScale::ALL {
        let stops = scale.stops();
        assert_eq!(scale.sample(0.0), stops[0].rgb);
        assert_eq!(scale.sample(1.0), stops[stops.len() - 1].rgb);
        assert_eq!(scale.sample(-3.0), stops[0].rgb);
        assert_eq!(scale.sample(7.0), stops[stops.len() - 1].rgb);
        assert_eq!(scale.sample(f32::NAN), stops[0].rgb);
    }
}

#[test]
fn test_color_scale_names() {
    for scale in ColorScale::ALL {
        let parsed: ColorScale = scale.to_string().parse().unwrap();
        assert_eq!(parsed, *scale);
    }
    assert!("plasma".parse::<ColorScale>().is_err());
}

// ---------------------------------------------------------------------------
// Synthesis
// ---------------------------------------------------------------------------

#[test]
fn test_higher_value_glows_hotter() {
    let state = department_scene();
    let parts = contributions(state.regions(), state.max_value());
    assert_eq!(parts.len(), 2);
    let cosmetics = &parts[0];
    let grocery = &parts[1];
    assert!(grocery.intensity > cosmetics.intensity);
    assert_relative_eq!(grocery.intensity, 1.0);
    assert_relative_eq!(cosmetics.intensity, 0.5f64.powf(0.3), epsilon = 1e-9);

    let mut synth = HeatSynthesizer::new();
    let layer = synth
        .synthesize(
            state.regions(),
            state.max_value(),
            800,
            600,
            &HeatSettings::default(),
        )
        .unwrap();
    assert_eq!((layer.width(), layer.height()), (800, 600));

    let field = synth.field();
    assert_eq!(field.dim(), (600, 800));
    // Centroids: Cosmetics (200, 200), Grocery (550, 250); index is [row, col].
    assert!(field[[250, 550]] > field[[200, 200]]);
    assert!(field[[200, 200]] > 0.5);
}

#[test]
fn test_far_from_regions_is_transparent() {
    let state = department_scene();
    let layer = synthesize(&state, &HeatSettings::default()).unwrap();
    assert_eq!(layer.image.get_pixel(10, 590).0[3], 0);
}

#[test]
fn test_full_intensity_centre_is_opaque() {
    let state = department_scene();
    let layer = synthesize(&state, &HeatSettings::default()).unwrap();
    assert!(layer.image.get_pixel(550, 250).0[3] >= 250);
}

#[test]
fn test_no_layer_without_contributions() {
    let settings = HeatSettings::default();

    let mut open = AppState::new();
    open.apply(&floorheat_core::interaction::InputEvent::ImageLoaded {
        width: 64,
        height: 64,
    })
    .unwrap();
    draw_region(&mut open, "Open", &[Point::new(1.0, 1.0), Point::new(9.0, 1.0)]);
    assert!(synthesize(&open, &settings).is_none());

    let zeros = scene(
        64,
        64,
        &[("A", rect(4.0, 4.0, 20.0, 20.0)), ("B", rect(30.0, 30.0, 60.0, 60.0))],
        &[("A", 0.0), ("B", 0.0)],
    );
    assert!(synthesize(&zeros, &settings).is_none());

    let empty = scene(64, 64, &[], &[("A", 10.0)]);
    assert!(synthesize(&empty, &settings).is_none());
}

#[test]
fn test_disabled_or_empty_image_yields_nothing() {
    let state = department_scene();
    let disabled = HeatSettings {
        enabled: false,
        ..HeatSettings::default()
    };
    assert!(synthesize(&state, &disabled).is_none());

    let mut synth = HeatSynthesizer::new();
    let settings = HeatSettings::default();
    assert!(synth
        .synthesize(state.regions(), state.max_value(), 0, 600, &settings)
        .is_none());
}

#[test]
fn test_zero_value_region_is_excluded() {
    let state = scene(
        200,
        100,
        &[("Hot", rect(10.0, 10.0, 60.0, 90.0)), ("Cold", rect(140.0, 10.0, 190.0, 90.0))],
        &[("Hot", 100.0), ("Cold", 0.0)],
    );
    let settings = HeatSettings {
        blur_radius: 2.0,
        ..HeatSettings::default()
    };
    let layer = synthesize(&state, &settings).unwrap();
    assert!(layer.image.get_pixel(35, 50).0[3] > 0);
    assert_eq!(layer.image.get_pixel(165, 50).0[3], 0);
}

#[test]
fn test_reused_buffers_are_deterministic() {
    let state = department_scene();
    let settings = HeatSettings::default();
    let mut synth = HeatSynthesizer::new();

    let first = synth
        .synthesize(state.regions(), state.max_value(), 800, 600, &settings)
        .unwrap();
    let small = scene(40, 30, &[("A", rect(5.0, 5.0, 30.0, 25.0))], &[("A", 1.0)]);
    synth
        .synthesize(small.regions(), small.max_value(), 40, 30, &settings)
        .unwrap();
    let again = synth
        .synthesize(state.regions(), state.max_value(), 800, 600, &settings)
        .unwrap();
    let third = synth
        .synthesize(state.regions(), state.max_value(), 800, 600, &settings)
        .unwrap();

    assert_eq!(first.image.as_raw(), again.image.as_raw());
    assert_eq!(again.image.as_raw(), third.image.as_raw());
}

#[test]
fn test_layer_alpha_is_independent_of_opacity() {
    let state = scene(
        100,
        100,
        &[("A", rect(20.0, 20.0, 80.0, 80.0))],
        &[("A", 1.0)],
    );
    let faint = HeatSettings {
        opacity: 0.1,
        blur_radius: 0.0,
        ..HeatSettings::default()
    };
    let strong = HeatSettings {
        opacity: 1.0,
        ..faint.clone()
    };
    let faint_layer = synthesize(&state, &faint).unwrap();
    let strong_layer = synthesize(&state, &strong).unwrap();

    assert_eq!(faint_layer.image.get_pixel(50, 50).0[3], 255);
    assert_eq!(faint_layer.image.as_raw(), strong_layer.image.as_raw());
}
