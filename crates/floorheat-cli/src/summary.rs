use std::path::Path;

use console::Style;
use floorheat_core::compose::format_value;
use floorheat_core::config::HeatSettings;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub struct RenderSummary<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub size: (u32, u32),
    pub regions: usize,
    pub complete: usize,
    pub max_value: f64,
    pub heat: &'a HeatSettings,
    pub heat_drawn: bool,
}

pub fn print_render_summary(summary: &RenderSummary<'_>) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Floorheat Render"));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}".repeat("Floorheat Render".len()))
    );
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(summary.input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(summary.output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Size"),
        s.value
            .apply_to(format!("{}x{}", summary.size.0, summary.size.1))
    );
    println!();

    println!("  {}", s.header.apply_to("Regions"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Total"),
        s.value.apply_to(summary.regions)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Complete"),
        s.value.apply_to(summary.complete)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Max value"),
        s.value.apply_to(format_value(summary.max_value))
    );
    println!();

    if !summary.heat.enabled {
        println!(
            "  {:<14}{}",
            s.header.apply_to("Heat"),
            s.disabled.apply_to("disabled")
        );
    } else if !summary.heat_drawn {
        println!(
            "  {:<14}{}",
            s.header.apply_to("Heat"),
            s.disabled.apply_to("no contributing regions")
        );
    } else {
        println!("  {}", s.header.apply_to("Heat"));
        println!(
            "    {:<12}{}",
            s.label.apply_to("Scale"),
            s.method.apply_to(summary.heat.color_scale)
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Blur"),
            s.value.apply_to(format!("{} px", summary.heat.blur_radius))
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Opacity"),
            s.value.apply_to(format!("{:.0}%", summary.heat.opacity * 100.0))
        );
    }
    println!();
}
