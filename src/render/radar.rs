//! Language telemetry bars beside a focus-sector radar.
//!
//! The canvas grows vertically with the number of language rows; the radar
//! is centered in the space below the header.

use crate::config::RadarConfig;
use crate::geometry::{Point, arc_path, polar_point};
use crate::languages::{LanguageShare, calculate_language_percentages};
use crate::model::{Arm, LanguageBytes};
use crate::random::deterministic_random;
use crate::text::escape_xml;
use crate::theme::{Theme, resolve_arm_colors};

use super::svg_open;

/// Canvas height needed for `rows` language bars and the radar.
fn canvas_height(rows: usize, layout: &RadarConfig) -> f32 {
    let bars = layout.header_height + rows.max(1) as f32 * layout.bar_row_height + 40.0;
    let radar = layout.header_height + 2.0 * (layout.radius + layout.label_gap + 24.0);
    layout.min_height.max(bars).max(radar)
}

pub fn render_radar(
    languages: &LanguageBytes,
    arms: &[Arm],
    theme: &Theme,
    exclude: &[String],
    max_display: usize,
    layout: &RadarConfig,
) -> String {
    let shares = calculate_language_percentages(languages, exclude, max_display, theme);
    let width = layout.width;
    let height = canvas_height(shares.len(), layout);
    let center = (
        layout.radar_center_x,
        layout.header_height + (height - layout.header_height) / 2.0,
    );
    let colors = resolve_arm_colors(arms, theme);

    tracing::debug!(
        template = "radar",
        languages = shares.len(),
        sectors = arms.len(),
        height,
        "rendering radar"
    );

    let mut svg = svg_open(width, height);
    svg.push_str(&defs(theme));
    svg.push_str(&format!(
        "<rect x=\"0.5\" y=\"0.5\" width=\"{}\" height=\"{}\" rx=\"16\" ry=\"16\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.5\"/>",
        width - 1.0,
        height - 1.0,
        theme.nebula,
        theme.star_dust
    ));
    svg.push_str(&headers(layout, theme));

    let bars_top = layout.header_height + 20.0;
    if shares.is_empty() {
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{bars_top}\" fill=\"{}\" font-size=\"12\" font-family=\"monospace\" dominant-baseline=\"middle\">NO LANGUAGE DATA</text>",
            layout.bar_left, theme.text_faint
        ));
    } else {
        svg.push_str(&language_bars(&shares, theme, layout, bars_top));
    }

    svg.push_str(&grid(center, layout, theme));
    let sectors = sectors(arms, &colors);
    for sector in &sectors {
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"{color}\" fill-opacity=\"0.08\" stroke=\"{color}\" stroke-opacity=\"0.4\" stroke-width=\"1\"/>",
            arc_path(center, layout.radius, sector.start, sector.end),
            color = sector.color
        ));
    }
    svg.push_str(&item_dots(&sectors, center, layout.radius));
    svg.push_str(&needle(center, layout, theme));
    svg.push_str(&sector_labels(&sectors, center, layout, theme));
    svg.push_str("</svg>");
    svg
}

struct Sector<'a> {
    arm: &'a Arm,
    color: &'a str,
    start: f32,
    end: f32,
}

/// Equal wedges, one per arm, clockwise from 12 o'clock.
fn sectors<'a>(arms: &'a [Arm], colors: &'a [String]) -> Vec<Sector<'a>> {
    if arms.is_empty() {
        return Vec::new();
    }
    let span = 360.0 / arms.len() as f32;
    arms.iter()
        .zip(colors)
        .enumerate()
        .map(|(idx, (arm, color))| Sector {
            arm,
            color: color.as_str(),
            start: idx as f32 * span,
            end: (idx + 1) as f32 * span,
        })
        .collect()
}

fn defs(theme: &Theme) -> String {
    let cyan = &theme.synapse_cyan;
    format!(
        "<defs>\
<radialGradient id=\"radar-gradient\" cx=\"50%\" cy=\"50%\" r=\"50%\"><stop offset=\"0%\" stop-color=\"{cyan}\" stop-opacity=\"0\"/><stop offset=\"100%\" stop-color=\"{cyan}\" stop-opacity=\"0.6\"/></radialGradient>\
<filter id=\"needle-glow\" x=\"-100%\" y=\"-100%\" width=\"300%\" height=\"300%\"><feGaussianBlur stdDeviation=\"2\" result=\"blur\"/><feMerge><feMergeNode in=\"blur\"/><feMergeNode in=\"SourceGraphic\"/></feMerge></filter>\
<style>@keyframes dot-pulse {{ 0%, 100% {{ opacity: 0.5; }} 50% {{ opacity: 1; }} }} .sector-dot {{ animation: dot-pulse 3s ease-in-out infinite; }}</style>\
</defs>"
    )
}

fn headers(layout: &RadarConfig, theme: &Theme) -> String {
    let faint = &theme.text_faint;
    let y = layout.header_height - 25.0;
    format!(
        "<text x=\"{left}\" y=\"{y}\" fill=\"{faint}\" font-size=\"12\" font-family=\"monospace\" letter-spacing=\"4\" font-weight=\"bold\">LANGUAGE TELEMETRY</text>\
<text x=\"{right}\" y=\"{y}\" fill=\"{faint}\" font-size=\"12\" font-family=\"monospace\" letter-spacing=\"4\" font-weight=\"bold\" text-anchor=\"middle\">FOCUS SECTORS</text>\
<line x1=\"{left}\" y1=\"{rule}\" x2=\"{rule_end}\" y2=\"{rule}\" stroke=\"{dust}\" stroke-width=\"1\" opacity=\"0.5\"/>",
        left = layout.bar_left,
        right = layout.radar_center_x,
        rule = y + 12.0,
        rule_end = layout.width - layout.bar_left,
        dust = theme.star_dust,
    )
}

fn language_bars(
    shares: &[LanguageShare],
    theme: &Theme,
    layout: &RadarConfig,
    top: f32,
) -> String {
    let max_width = layout.bar_max_width;
    let mut out = String::new();
    for (idx, lang) in shares.iter().enumerate() {
        let y = top + idx as f32 * layout.bar_row_height;
        let bar_width = (lang.percentage / 100.0 * max_width).max(4.0);
        out.push_str(&format!(
            "<g transform=\"translate({}, {y})\">\
<text x=\"0\" y=\"0\" fill=\"{}\" font-size=\"12\" font-family=\"sans-serif\" font-weight=\"bold\" dominant-baseline=\"middle\">{}</text>\
<rect x=\"100\" y=\"-6\" width=\"{max_width}\" height=\"10\" rx=\"5\" fill=\"{}\" opacity=\"0.4\"/>\
<rect x=\"100\" y=\"-6\" width=\"{bar_width:.1}\" height=\"10\" rx=\"5\" fill=\"{}\" opacity=\"0.9\"><animate attributeName=\"width\" from=\"0\" to=\"{bar_width:.1}\" dur=\"1s\" begin=\"{:.2}s\" fill=\"freeze\" calcMode=\"spline\" keySplines=\"0.4 0 0.2 1\"/></rect>\
<text x=\"{}\" y=\"0\" fill=\"{}\" font-size=\"11\" font-family=\"monospace\" font-weight=\"bold\" dominant-baseline=\"middle\">{:.1}%</text>\
</g>",
            layout.bar_left,
            theme.text_dim,
            escape_xml(&lang.name),
            theme.star_dust,
            lang.color,
            idx as f32 * 0.15,
            100.0 + max_width + 15.0,
            theme.text_faint,
            lang.percentage,
        ));
    }
    out
}

fn grid(center: Point, layout: &RadarConfig, theme: &Theme) -> String {
    let (cx, cy) = center;
    let mut out = String::new();
    for (idx, ring) in layout.grid_rings.iter().enumerate() {
        out.push_str(&format!(
            "<circle cx=\"{cx}\" cy=\"{cy}\" r=\"{:.1}\" fill=\"none\" stroke=\"{}\" stroke-width=\"0.7\" stroke-dasharray=\"4,4\" opacity=\"{:.1}\"/>",
            ring * layout.radius,
            theme.text_faint,
            0.1 + idx as f32 * 0.1
        ));
    }
    out
}

fn needle(center: Point, layout: &RadarConfig, theme: &Theme) -> String {
    let (cx, cy) = center;
    let radius = layout.radius;
    let scan = &theme.synapse_cyan;
    let sweep = arc_path(center, radius, 360.0 - layout.sweep_degrees, 360.0);
    format!(
        "<g>\
<path d=\"{sweep}\" fill=\"url(#radar-gradient)\" fill-opacity=\"0.4\"/>\
<line x1=\"{cx}\" y1=\"{cy}\" x2=\"{cx}\" y2=\"{tip}\" stroke=\"{scan}\" stroke-width=\"2\" stroke-linecap=\"round\"/>\
<circle cx=\"{cx}\" cy=\"{tip}\" r=\"3\" fill=\"{scan}\" filter=\"url(#needle-glow)\"/>\
<animateTransform attributeName=\"transform\" type=\"rotate\" from=\"0 {cx} {cy}\" to=\"360 {cx} {cy}\" dur=\"6s\" repeatCount=\"indefinite\"/>\
</g>",
        tip = cy - radius,
    )
}

fn item_dots(sectors: &[Sector<'_>], center: Point, radius: f32) -> String {
    let mut out = String::new();
    for sector in sectors {
        let items = &sector.arm.items;
        if items.is_empty() {
            continue;
        }
        let radii = deterministic_random(
            &format!("{}-dots", sector.arm.name),
            items.len(),
            radius * 0.35,
            radius * 0.9,
        );
        let step = (sector.end - sector.start) / (items.len() + 1) as f32;
        for (idx, (item, r)) in items.iter().zip(radii).enumerate() {
            let (x, y) = polar_point(center, r, sector.start + step * (idx + 1) as f32);
            out.push_str(&format!(
                "<circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"2.5\" fill=\"{}\" class=\"sector-dot\" style=\"animation-delay: {:.1}s\"><title>{}</title></circle>",
                sector.color,
                idx as f32 * 0.4,
                escape_xml(item)
            ));
        }
    }
    out
}

fn sector_labels(
    sectors: &[Sector<'_>],
    center: Point,
    layout: &RadarConfig,
    theme: &Theme,
) -> String {
    let mut out = String::new();
    for sector in sectors {
        let mid = (sector.start + sector.end) / 2.0;
        let (lx, ly) = polar_point(center, layout.radius + layout.label_gap, mid);
        let anchor = if (lx - center.0).abs() < 5.0 {
            "middle"
        } else if lx > center.0 {
            "start"
        } else {
            "end"
        };
        let count = sector.arm.items.len();
        let noun = if count == 1 { "item" } else { "items" };
        out.push_str(&format!(
            "<text x=\"{lx:.1}\" y=\"{ly:.1}\" fill=\"{}\" font-size=\"10\" font-family=\"monospace\" text-anchor=\"{anchor}\" dominant-baseline=\"middle\">{}</text>",
            sector.color,
            escape_xml(&sector.arm.name)
        ));
        out.push_str(&format!(
            "<text x=\"{lx:.1}\" y=\"{:.1}\" fill=\"{}\" font-size=\"8\" font-family=\"monospace\" text-anchor=\"{anchor}\" dominant-baseline=\"middle\">({count} {noun})</text>",
            ly + 12.0,
            theme.text_faint
        ));
    }
    out
}
