use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use floorheat_core::compose::compose;
use floorheat_core::compose::raster::RasterTarget;
use floorheat_core::config::{load_config, FloorheatConfig};
use floorheat_core::heat::colormap::ColorScale;
use floorheat_core::heat::HeatSynthesizer;
use floorheat_core::io::{load_base_image, save_png};

use crate::summary::{print_render_summary, RenderSummary};

#[derive(Args)]
pub struct RenderArgs {
    /// Floor-plan image (PNG, JPEG, BMP, ...)
    pub image: PathBuf,

    /// Region layout TOML ([[region]] tables with name and points)
    #[arg(long)]
    pub layout: PathBuf,

    /// Value map TOML (name = number)
    #[arg(long)]
    pub values: Option<PathBuf>,

    /// Config file (see `floorheat config`)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Gaussian blur sigma in image pixels (0-60)
    #[arg(long)]
    pub blur: Option<f32>,

    /// Heat layer opacity (0.05-1.0)
    #[arg(long)]
    pub opacity: Option<f32>,

    /// Draw filled region outlines without the heat layer
    #[arg(long)]
    pub no_heat: bool,

    /// Color scale (heat, viridis, spectral)
    #[arg(long)]
    pub scale: Option<ColorScale>,

    /// Output PNG path
    #[arg(short, long, default_value = "heatmap.png")]
    pub output: PathBuf,
}

pub fn run(args: &RenderArgs) -> Result<()> {
    let mut config = match args.config {
        Some(ref path) => load_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => FloorheatConfig::default(),
    };
    if let Some(blur) = args.blur {
        config.heat.blur_radius = blur;
    }
    if let Some(opacity) = args.opacity {
        config.heat.opacity = opacity;
    }
    if let Some(scale) = args.scale {
        config.heat.color_scale = scale;
    }
    if args.no_heat {
        config.heat.enabled = false;
    }
    let config = config.sanitized();

    let base = load_base_image(&args.image)
        .with_context(|| format!("Failed to load {}", args.image.display()))?;
    let state = super::build_state(
        Some((base.width(), base.height())),
        &args.layout,
        args.values.as_deref(),
        config.interaction.cancel_policy,
    )?;

    let mut synth = HeatSynthesizer::new();
    let heat = synth.synthesize(
        state.regions(),
        state.max_value(),
        base.width(),
        base.height(),
        &config.heat,
    );
    let commands = compose(&state, heat.is_some(), &config.heat, &config.render);
    let frame = RasterTarget::new(&base, heat.as_ref()).render(&commands);

    save_png(&frame, &args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;

    print_render_summary(&RenderSummary {
        input: &args.image,
        output: &args.output,
        size: (base.width(), base.height()),
        regions: state.regions().len(),
        complete: state.regions().complete().count(),
        max_value: state.max_value(),
        heat: &config.heat,
        heat_drawn: heat.is_some(),
    });

    Ok(())
}
