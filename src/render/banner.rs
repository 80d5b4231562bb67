//! The signature spiral-galaxy banner.
//!
//! Arms are flattened spirals drawn in four fading segments; each arm's items
//! sit on the spiral with labels pushed outward from the core. Projects are
//! drawn as small beacons near the tip of the arm they belong to.

use crate::config::{BannerConfig, StarLayer};
use crate::geometry::{Point, outward_normal, quadratic_path, spiral_points};
use crate::model::{Arm, Profile, Project};
use crate::random::deterministic_random;
use crate::text::escape_xml;
use crate::theme::{Theme, resolve_arm_colors};

use super::{glow_filter, svg_open};

const SEGMENT_OPACITY: [f32; 4] = [0.50, 0.40, 0.30, 0.20];
const SEGMENT_WIDTH: [f32; 4] = [2.2, 1.9, 1.6, 1.3];
// (x, y, travel_x, travel_y, seconds)
const SHOOTING_STARS: [(f32, f32, f32, f32, f32); 3] = [
    (100.0, 80.0, 250.0, 100.0, 6.0),
    (700.0, 70.0, 200.0, 90.0, 8.0),
    (350.0, 350.0, 180.0, 70.0, 7.0),
];
const FIRST_ITEM_POINT: usize = 8;
const RESERVED_TAIL_POINTS: usize = 10;

pub fn render_banner(
    profile: &Profile,
    theme: &Theme,
    arms: &[Arm],
    projects: &[Project],
    layout: &BannerConfig,
) -> String {
    let center = (layout.center_x, layout.center_y);
    let colors = resolve_arm_colors(arms, theme);
    let arm_points: Vec<Vec<Point>> = (0..arms.len())
        .map(|idx| {
            let start = layout
                .start_angles
                .get(idx % layout.start_angles.len().max(1))
                .copied()
                .unwrap_or(0.0);
            spiral_points(
                center,
                start,
                layout.arm_points,
                layout.max_radius,
                layout.spiral_turns,
                layout.x_scale,
                layout.y_scale,
            )
        })
        .collect();

    tracing::debug!(
        template = "banner",
        username = %profile.username,
        arms = arms.len(),
        projects = projects.len(),
        "rendering banner"
    );

    let mut svg = svg_open(layout.width, layout.height);
    svg.push_str("<defs>");
    svg.push_str(&style_block(center));
    svg.push_str(&static_defs(theme));
    for (idx, color) in colors.iter().enumerate() {
        svg.push_str(&glow_filter(&format!("star-glow-{idx}"), color, 3.0, 0.5, 300));
    }
    svg.push_str("</defs>");

    svg.push_str(&format!(
        "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" rx=\"16\" ry=\"16\" fill=\"{}\"/>",
        layout.width, layout.height, theme.void
    ));
    svg.push_str(&outer_nebula(center, theme));
    svg.push_str(&starfield(&profile.username, layout, theme));
    svg.push_str(&inner_nebula(center, theme));
    svg.push_str(&shooting_stars());
    svg.push_str(&spiral_arms(&colors, &arm_points));
    svg.push_str(&item_labels(arms, &colors, &arm_points, center, layout.label_offset));
    svg.push_str(&project_beacons(projects, arms.len(), &colors, &arm_points, layout));
    svg.push_str(&galaxy_core(center, theme, &profile.initial()));

    svg.push_str(&format!(
        "<text x=\"{}\" y=\"55\" text-anchor=\"middle\" fill=\"{}\" font-size=\"32\" font-weight=\"900\" font-family=\"sans-serif\">{}</text>",
        layout.center_x,
        theme.text_bright,
        escape_xml(profile.display_name())
    ));
    svg.push_str(&format!(
        "<text x=\"{}\" y=\"85\" text-anchor=\"middle\" fill=\"{}\" font-size=\"16\" font-family=\"sans-serif\" font-weight=\"600\">{}</text>",
        layout.center_x,
        theme.text_dim,
        escape_xml(profile.tagline())
    ));
    svg.push_str(&format!(
        "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" fill=\"{}\" font-size=\"13\" font-family=\"monospace\" font-style=\"italic\">{}</text>",
        layout.center_x,
        layout.height - 30.0,
        theme.text_faint,
        escape_xml(profile.philosophy())
    ));
    svg.push_str("</svg>");
    svg
}

fn style_block(center: Point) -> String {
    let (cx, cy) = center;
    format!(
        "<style>\
.star-bg {{ animation: twinkle-slow 7s ease-in-out infinite; }}\
.star-mid {{ animation: twinkle-mid 5s ease-in-out infinite; }}\
.star-fg {{ animation: twinkle-fast 3s ease-in-out infinite; }}\
@keyframes twinkle-slow {{ 0%, 100% {{ opacity: 0.08; }} 50% {{ opacity: 0.3; }} }}\
@keyframes twinkle-mid {{ 0%, 100% {{ opacity: 0.15; }} 50% {{ opacity: 0.5; }} }}\
@keyframes twinkle-fast {{ 0%, 100% {{ opacity: 0.4; }} 50% {{ opacity: 0.8; }} }}\
.core-ring {{ animation: pulse-core 3s ease-in-out infinite; }}\
.core-ring-inner {{ animation: pulse-core 3s ease-in-out infinite 1.5s; }}\
@keyframes pulse-core {{ 0%, 100% {{ stroke-opacity: 0.3; transform: scale(1); transform-origin: {cx}px {cy}px; }} 50% {{ stroke-opacity: 0.8; transform: scale(1.08); transform-origin: {cx}px {cy}px; }} }}\
.shooting-star {{ opacity: 0; animation: shoot linear infinite; }}\
@keyframes shoot {{ 0% {{ opacity: 0; transform: translate(0, 0); }} 5% {{ opacity: 0.9; }} 15% {{ opacity: 0.6; transform: translate(var(--shoot-tx), var(--shoot-ty)); }} 100% {{ opacity: 0; }} }}\
</style>"
    )
}

fn static_defs(theme: &Theme) -> String {
    let cyan = &theme.synapse_cyan;
    format!(
        "<filter id=\"nebula-outer\"><feGaussianBlur stdDeviation=\"80\"/></filter>\
<filter id=\"nebula-inner\"><feGaussianBlur stdDeviation=\"40\"/></filter>\
<filter id=\"label-glow\" x=\"-20%\" y=\"-20%\" width=\"140%\" height=\"140%\"><feGaussianBlur stdDeviation=\"2.5\" result=\"blur\"/></filter>\
<filter id=\"core-bright-glow\" x=\"-100%\" y=\"-100%\" width=\"300%\" height=\"300%\"><feGaussianBlur stdDeviation=\"5\"/></filter>\
<radialGradient id=\"core-haze-gradient\" cx=\"50%\" cy=\"50%\" r=\"50%\"><stop offset=\"0%\" stop-color=\"{cyan}\" stop-opacity=\"0.5\"/><stop offset=\"100%\" stop-color=\"{cyan}\" stop-opacity=\"0\"/></radialGradient>\
<radialGradient id=\"core-inner-gradient\" cx=\"50%\" cy=\"50%\" r=\"50%\"><stop offset=\"0%\" stop-color=\"#ffffff\" stop-opacity=\"0.6\"/><stop offset=\"100%\" stop-color=\"{cyan}\" stop-opacity=\"0\"/></radialGradient>\
<linearGradient id=\"shoot-grad\" x1=\"0%\" y1=\"0%\" x2=\"100%\" y2=\"0%\"><stop offset=\"0%\" stop-color=\"#ffffff\" stop-opacity=\"0.8\"/><stop offset=\"100%\" stop-color=\"#ffffff\" stop-opacity=\"0\"/></linearGradient>"
    )
}

fn starfield(username: &str, layout: &BannerConfig, theme: &Theme) -> String {
    let mut out = String::new();
    for layer in &layout.star_layers {
        out.push_str(&star_layer(username, layer, layout, theme));
    }
    out
}

fn star_layer(username: &str, layer: &StarLayer, layout: &BannerConfig, theme: &Theme) -> String {
    let n = layer.count;
    let lbl = layer.label.as_str();
    let margin = layout.star_margin;
    let xs = deterministic_random(
        &format!("{username}_sx_{lbl}"),
        n,
        margin,
        layout.width - margin,
    );
    let ys = deterministic_random(
        &format!("{username}_sy_{lbl}"),
        n,
        margin,
        layout.height - margin,
    );
    let radii = deterministic_random(
        &format!("{username}_sr_{lbl}"),
        n,
        layer.radius.0,
        layer.radius.1,
    );
    let opacities = deterministic_random(
        &format!("{username}_so_{lbl}"),
        n,
        layer.opacity.0,
        layer.opacity.1,
    );
    let durations = deterministic_random(
        &format!("{username}_sd_{lbl}"),
        n,
        layer.duration.0,
        layer.duration.1,
    );

    let mut out = String::new();
    for idx in 0..n {
        // every twelfth star picks up one of the three accents
        let fill = match idx % 12 {
            0 => theme.synapse_cyan.as_str(),
            4 => theme.dendrite_violet.as_str(),
            8 => theme.axon_amber.as_str(),
            _ => "#ffffff",
        };
        out.push_str(&format!(
            "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"{:.2}\" fill=\"{fill}\" opacity=\"{:.2}\" class=\"star-{lbl}\" style=\"animation-delay: {:.1}s\"/>",
            xs[idx],
            ys[idx],
            radii[idx],
            opacities[idx],
            durations[idx] * 0.3
        ));
    }
    out
}

fn outer_nebula(center: Point, theme: &Theme) -> String {
    let (cx, cy) = center;
    format!(
        "<circle cx=\"{}\" cy=\"{}\" r=\"150\" fill=\"{}\" opacity=\"0.015\" filter=\"url(#nebula-outer)\"/>\
<circle cx=\"{}\" cy=\"{}\" r=\"130\" fill=\"{}\" opacity=\"0.012\" filter=\"url(#nebula-outer)\"/>\
<circle cx=\"{cx}\" cy=\"{}\" r=\"180\" fill=\"{}\" opacity=\"0.01\" filter=\"url(#nebula-outer)\"/>",
        cx - 200.0,
        cy - 50.0,
        theme.dendrite_violet,
        cx + 220.0,
        cy + 30.0,
        theme.axon_amber,
        cy + 60.0,
        theme.synapse_cyan,
    )
}

fn inner_nebula(center: Point, theme: &Theme) -> String {
    let (cx, cy) = center;
    format!(
        "<circle cx=\"{cx}\" cy=\"{cy}\" r=\"90\" fill=\"{}\" opacity=\"0.04\" filter=\"url(#nebula-inner)\"/>\
<circle cx=\"{}\" cy=\"{}\" r=\"70\" fill=\"{}\" opacity=\"0.035\" filter=\"url(#nebula-inner)\"/>\
<circle cx=\"{}\" cy=\"{}\" r=\"65\" fill=\"{}\" opacity=\"0.03\" filter=\"url(#nebula-inner)\"/>",
        theme.synapse_cyan,
        cx - 80.0,
        cy - 30.0,
        theme.dendrite_violet,
        cx + 90.0,
        cy + 25.0,
        theme.axon_amber,
    )
}

fn shooting_stars() -> String {
    let mut out = String::new();
    for (idx, (x, y, tx, ty, dur)) in SHOOTING_STARS.iter().enumerate() {
        out.push_str(&format!(
            "<line x1=\"{x}\" y1=\"{y}\" x2=\"{}\" y2=\"{}\" stroke=\"url(#shoot-grad)\" stroke-width=\"1.2\" stroke-linecap=\"round\" class=\"shooting-star\" style=\"animation-delay: {}s; --shoot-tx: {tx}px; --shoot-ty: {ty}px; animation-duration: {dur}s\"/>",
            x + 20.0,
            y + 5.0,
            idx as f32 * 2.5
        ));
    }
    out
}

fn spiral_arms(colors: &[String], arm_points: &[Vec<Point>]) -> String {
    let mut paths = String::new();
    let mut particles = String::new();
    for (arm_idx, (color, points)) in colors.iter().zip(arm_points).enumerate() {
        if points.len() < 2 {
            continue;
        }
        let full_path = quadratic_path(points);
        let per_segment = (points.len() / 4).max(1);
        for (seg, (opacity, width)) in SEGMENT_OPACITY.iter().zip(SEGMENT_WIDTH).enumerate() {
            let start = seg * per_segment;
            let end = (start + per_segment + 1).min(points.len());
            if start >= end || end - start < 2 {
                continue;
            }
            paths.push_str(&format!(
                "<path d=\"{}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"{width:.1}\" opacity=\"{opacity:.2}\" stroke-linecap=\"round\"><animate attributeName=\"opacity\" values=\"{:.2};{:.2};{:.2}\" dur=\"8s\" begin=\"{arm_idx}s\" repeatCount=\"indefinite\"/></path>",
                quadratic_path(&points[start..end]),
                opacity - 0.1,
                opacity + 0.1,
                opacity - 0.1,
            ));
        }
        for particle in 0..2 {
            let delay = arm_idx * 4 + particle * 6;
            particles.push_str(&format!(
                "<circle r=\"1.8\" fill=\"{color}\" opacity=\"0.6\"><animateMotion dur=\"12s\" begin=\"{delay}s\" repeatCount=\"indefinite\" path=\"{full_path}\"/><animate attributeName=\"opacity\" values=\"0;0.7;0.3;0\" dur=\"12s\" begin=\"{delay}s\" repeatCount=\"indefinite\"/></circle>"
            ));
        }
    }
    paths.push_str(&particles);
    paths
}

fn label_anchor(dx: f32) -> &'static str {
    if dx > 30.0 {
        "start"
    } else if dx < -30.0 {
        "end"
    } else {
        "middle"
    }
}

fn item_labels(
    arms: &[Arm],
    colors: &[String],
    arm_points: &[Vec<Point>],
    center: Point,
    label_offset: f32,
) -> String {
    let mut out = String::new();
    for (arm, (color, points)) in arms.iter().zip(colors.iter().zip(arm_points)) {
        if arm.items.is_empty() || points.is_empty() {
            continue;
        }
        let available = points.len().saturating_sub(RESERVED_TAIL_POINTS);
        let spacing = (available / arm.items.len()).max(1);
        for (idx, item) in arm.items.iter().enumerate() {
            let point_idx = (FIRST_ITEM_POINT + idx * spacing).min(points.len() - 1);
            let (px, py) = points[point_idx];
            let (nx, ny) = outward_normal(center, (px, py));
            let lx = px + nx * label_offset;
            let ly = py + ny * label_offset;
            let anchor = label_anchor(px - center.0);
            let label = escape_xml(item);
            out.push_str(&format!(
                "<circle cx=\"{px:.1}\" cy=\"{py:.1}\" r=\"3.5\" fill=\"{color}\" opacity=\"0.85\"><animate attributeName=\"opacity\" values=\"0.85;1;0.85\" dur=\"5s\" begin=\"{:.1}s\" repeatCount=\"indefinite\"/></circle>",
                idx as f32 * 0.7
            ));
            out.push_str(&format!(
                "<line x1=\"{px:.1}\" y1=\"{py:.1}\" x2=\"{lx:.1}\" y2=\"{ly:.1}\" stroke=\"{color}\" stroke-width=\"0.8\" opacity=\"0.3\" stroke-dasharray=\"2 2\"/>"
            ));
            out.push_str(&format!(
                "<text x=\"{lx:.1}\" y=\"{:.1}\" text-anchor=\"{anchor}\" fill=\"{color}\" font-size=\"12\" font-family=\"monospace\" font-weight=\"900\" opacity=\"0.2\" filter=\"url(#label-glow)\">{label}</text>",
                ly + 4.0
            ));
            out.push_str(&format!(
                "<text x=\"{lx:.1}\" y=\"{:.1}\" text-anchor=\"{anchor}\" fill=\"{color}\" font-size=\"12\" font-family=\"monospace\" font-weight=\"900\" opacity=\"1\">{label}</text>",
                ly + 4.0
            ));
        }
    }
    out
}

fn project_beacons(
    projects: &[Project],
    arm_count: usize,
    colors: &[String],
    arm_points: &[Vec<Point>],
    layout: &BannerConfig,
) -> String {
    let mut per_arm = vec![0usize; arm_count];
    let mut out = String::new();
    for project in projects {
        let Some(arm_idx) = project.arm_index(arm_count) else {
            break;
        };
        let slot = per_arm[arm_idx];
        if slot >= layout.max_beacons_per_arm {
            continue;
        }
        per_arm[arm_idx] += 1;
        let points = &arm_points[arm_idx];
        // beacons walk inward from the tip, three points apart
        let Some(point_idx) = points.len().checked_sub(1 + slot * 3) else {
            continue;
        };
        let (x, y) = points[point_idx];
        let color = &colors[arm_idx];
        out.push_str(&format!(
            "<g><title>{}</title><circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"6\" fill=\"none\" stroke=\"{color}\" stroke-width=\"1\" opacity=\"0.6\"><animate attributeName=\"r\" values=\"5;8;5\" dur=\"4s\" begin=\"{}s\" repeatCount=\"indefinite\"/></circle><circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"2.2\" fill=\"{color}\" filter=\"url(#star-glow-{arm_idx})\"/></g>",
            escape_xml(project.short_name()),
            slot
        ));
    }
    out
}

fn galaxy_core(center: Point, theme: &Theme, initial: &str) -> String {
    let (cx, cy) = center;
    format!(
        "<circle cx=\"{cx}\" cy=\"{cy}\" r=\"60\" fill=\"url(#core-haze-gradient)\" opacity=\"0.4\"/>\
<circle cx=\"{cx}\" cy=\"{cy}\" r=\"35\" fill=\"url(#core-inner-gradient)\" opacity=\"0.6\"/>\
<ellipse cx=\"{cx}\" cy=\"{cy}\" rx=\"30\" ry=\"26\" fill=\"none\" stroke=\"{cyan}\" stroke-width=\"1.8\" opacity=\"0.6\" stroke-dasharray=\"6 4\" class=\"core-ring\"/>\
<circle cx=\"{cx}\" cy=\"{cy}\" r=\"22\" fill=\"none\" stroke=\"{violet}\" stroke-width=\"1.2\" opacity=\"0.5\" class=\"core-ring-inner\"/>\
<circle cx=\"{cx}\" cy=\"{cy}\" r=\"16\" fill=\"{nebula}\" stroke=\"{dust}\" stroke-width=\"0.8\"/>\
<circle cx=\"{cx}\" cy=\"{cy}\" r=\"5\" fill=\"{cyan}\" filter=\"url(#core-bright-glow)\" opacity=\"1\"/>\
<text x=\"{cx}\" y=\"{text_y}\" text-anchor=\"middle\" fill=\"{cyan}\" font-size=\"18\" font-weight=\"bold\" font-family=\"monospace\">{initial}</text>",
        cyan = theme.synapse_cyan,
        violet = theme.dendrite_violet,
        nebula = theme.nebula,
        dust = theme.star_dust,
        text_y = cy + 7.0,
        initial = escape_xml(initial),
    )
}
