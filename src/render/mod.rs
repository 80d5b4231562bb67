mod banner;
mod radar;
mod showcase;
mod stats;

use std::fmt;
use std::path::Path;

use anyhow::Result;

use crate::config::Config;
#[cfg(feature = "png")]
use crate::config::RenderConfig;
use crate::text::escape_xml;

pub use banner::render_banner;
pub use radar::render_radar;
pub use showcase::render_showcase;
pub use stats::render_stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Template {
    Banner,
    Showcase,
    Stats,
    Radar,
}

impl Template {
    pub const ALL: [Template; 4] = [
        Template::Banner,
        Template::Showcase,
        Template::Stats,
        Template::Radar,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Template::Banner => "banner",
            Template::Showcase => "showcase",
            Template::Stats => "stats",
            Template::Radar => "radar",
        }
    }

    /// Output file stem used by the CLI.
    pub fn file_stem(self) -> &'static str {
        match self {
            Template::Banner => "galaxy-header",
            Template::Showcase => "projects-constellation",
            Template::Stats => "stats-card",
            Template::Radar => "tech-stack",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Renders one template from a loaded config.
pub fn render_template(template: Template, config: &Config) -> String {
    let layout = &config.layout;
    match template {
        Template::Banner => render_banner(
            &config.profile,
            &config.theme,
            &config.arms,
            &config.projects,
            &layout.banner,
        ),
        Template::Showcase => render_showcase(
            &config.projects,
            &config.arms,
            &config.theme,
            &layout.showcase,
        ),
        Template::Stats => {
            render_stats(&config.stats, &config.metrics, &config.theme, &layout.stats)
        }
        Template::Radar => render_radar(
            &config.languages,
            &config.arms,
            &config.theme,
            &config.language_exclude,
            config.max_languages,
            &layout.radar,
        ),
    }
}

pub(crate) fn svg_open(width: f32, height: f32) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    )
}

/// Colored halo filter: blur the source, tint it, and keep the source on top.
pub(crate) fn glow_filter(
    id: &str,
    color: &str,
    std_deviation: f32,
    opacity: f32,
    extent: u32,
) -> String {
    let offset = (extent - 100) / 2;
    format!(
        "<filter id=\"{id}\" x=\"-{offset}%\" y=\"-{offset}%\" width=\"{extent}%\" height=\"{extent}%\">\
<feGaussianBlur in=\"SourceGraphic\" stdDeviation=\"{std_deviation}\" result=\"blur\"/>\
<feFlood flood-color=\"{color}\" flood-opacity=\"{opacity}\" result=\"color\"/>\
<feComposite in=\"color\" in2=\"blur\" operator=\"in\" result=\"glow\"/>\
<feMerge><feMergeNode in=\"glow\"/><feMergeNode in=\"SourceGraphic\"/></feMerge>\
</filter>"
    )
}

/// Complete document shown when a template has nothing to draw.
pub(crate) fn placeholder_svg(
    width: f32,
    height: f32,
    fill: &str,
    text_color: &str,
    message: &str,
) -> String {
    let mut svg = svg_open(width, height);
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" rx=\"12\" fill=\"{fill}\"/>"
    ));
    svg.push_str(&format!(
        "<text x=\"50%\" y=\"50%\" fill=\"{text_color}\" text-anchor=\"middle\" font-family=\"monospace\">{}</text>",
        escape_xml(message)
    ));
    svg.push_str("</svg>");
    svg
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .or_else(|| usvg::Size::from_wh(850.0, 420.0))
        .ok_or_else(|| anyhow::anyhow!("Invalid raster size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;
    if let Some(color) = parse_hex_color(&render_cfg.background) {
        pixmap.fill(color);
    }

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(feature = "png")]
fn parse_hex_color(value: &str) -> Option<resvg::tiny_skia::Color> {
    let hex = value.strip_prefix('#').filter(|hex| hex.is_ascii())?;
    let channel = |idx: usize| match hex.len() {
        // #rgb doubles each digit
        3 => u8::from_str_radix(&hex[idx..idx + 1], 16).ok().map(|v| v * 17),
        6 => u8::from_str_radix(&hex[idx * 2..idx * 2 + 2], 16).ok(),
        _ => None,
    };
    Some(resvg::tiny_skia::Color::from_rgba8(channel(0)?, channel(1)?, channel(2)?, 255))
}
