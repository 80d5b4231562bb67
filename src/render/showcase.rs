use crate::config::ShowcaseConfig;
use crate::model::{Arm, Project};
use crate::random::deterministic_random;
use crate::text::{escape_xml, wrap_text};
use crate::theme::{Theme, resolve_arm_colors};

use super::{glow_filter, placeholder_svg, svg_open};

/// Horizontal placement of `n` cards: width and left edge of each.
fn card_slots(n: usize, layout: &ShowcaseConfig) -> (f32, Vec<f32>) {
    let card_width = if n == 2 {
        layout.pair_card_width
    } else {
        layout.card_width
    };
    let gap = (layout.width - card_width * n as f32) / (n as f32 + 1.0);
    let xs = (0..n)
        .map(|idx| gap + idx as f32 * (card_width + gap))
        .collect();
    (card_width, xs)
}

pub fn render_showcase(
    projects: &[Project],
    arms: &[Arm],
    theme: &Theme,
    layout: &ShowcaseConfig,
) -> String {
    let n = projects.len().min(layout.max_cards);
    tracing::debug!(template = "showcase", cards = n, "rendering showcase");
    if n == 0 {
        return placeholder_svg(
            layout.width,
            layout.height,
            &theme.nebula,
            &theme.text_faint,
            "NO SYSTEMS DETECTED",
        );
    }

    let arm_colors = resolve_arm_colors(arms, theme);
    let shown = &projects[..n];
    let card_arms: Vec<Option<&Arm>> = shown
        .iter()
        .map(|project| project.arm_index(arms.len()).map(|idx| &arms[idx]))
        .collect();
    let card_colors: Vec<String> = shown
        .iter()
        .enumerate()
        .map(|(idx, project)| match project.arm_index(arms.len()) {
            Some(arm_idx) => arm_colors[arm_idx].clone(),
            None => theme.accent(idx).to_string(),
        })
        .collect();
    let (card_width, card_xs) = card_slots(n, layout);

    let mut svg = svg_open(layout.width, layout.height);
    svg.push_str("<defs>");
    svg.push_str(&defs(&card_colors, card_width, &card_xs, theme, layout));
    svg.push_str("</defs>");
    svg.push_str(&format!(
        "<rect x=\"0.5\" y=\"0.5\" width=\"{}\" height=\"{}\" rx=\"15\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.5\"/>",
        layout.width - 1.0,
        layout.height - 1.0,
        theme.nebula,
        theme.star_dust
    ));
    svg.push_str(&starfield(&card_colors, layout, theme));
    svg.push_str(&title_area(n, layout.width, theme));
    for (idx, project) in shown.iter().enumerate() {
        svg.push_str(&project_card(
            idx,
            project,
            card_arms[idx],
            &card_colors[idx],
            card_width,
            card_xs[idx],
            theme,
            layout,
        ));
    }
    svg.push_str("</svg>");
    svg
}

fn defs(
    colors: &[String],
    card_width: f32,
    card_xs: &[f32],
    theme: &Theme,
    layout: &ShowcaseConfig,
) -> String {
    let mut out = String::new();
    for (idx, color) in colors.iter().enumerate() {
        out.push_str(&glow_filter(&format!("proj-glow-{idx}"), color, 5.0, 0.4, 260));
    }
    for idx in 0..colors.len() {
        out.push_str(&format!(
            "<linearGradient id=\"card-bg-{idx}\" x1=\"0\" y1=\"0\" x2=\"1\" y2=\"1\"><stop offset=\"0%\" stop-color=\"{}\" stop-opacity=\"0.8\"/><stop offset=\"100%\" stop-color=\"{}\" stop-opacity=\"0.95\"/></linearGradient>",
            theme.star_dust, theme.nebula
        ));
    }
    for (idx, x) in card_xs.iter().enumerate() {
        out.push_str(&format!(
            "<clipPath id=\"card-clip-{idx}\"><rect x=\"{x}\" y=\"{}\" width=\"{card_width}\" height=\"{}\" rx=\"12\" ry=\"12\"/></clipPath>",
            layout.card_top - 5.0,
            layout.card_height + 5.0
        ));
    }
    out.push_str(
        "<style>\
@keyframes card-appear { from { opacity: 0; transform: translateY(15px); } to { opacity: 1; transform: translateY(0); } }\
@keyframes float { 0%, 100% { transform: translateY(0); } 50% { transform: translateY(-5px); } }\
</style>",
    );
    out
}

fn starfield(card_colors: &[String], layout: &ShowcaseConfig, theme: &Theme) -> String {
    let mut out = String::new();
    let margin = layout.star_margin;
    for layer in &layout.star_layers {
        let count = layer.count;
        let pfx = layer.label.as_str();
        let xs = deterministic_random(
            &format!("{pfx}-x"),
            count,
            margin,
            layout.width - margin,
        );
        let ys = deterministic_random(
            &format!("{pfx}-y"),
            count,
            margin,
            layout.height - margin,
        );
        let radii = deterministic_random(
            &format!("{pfx}-r"),
            count,
            layer.radius.0,
            layer.radius.1,
        );
        let opacities = deterministic_random(
            &format!("{pfx}-o"),
            count,
            layer.opacity.0,
            layer.opacity.1,
        );
        let durations = deterministic_random(
            &format!("{pfx}-d"),
            count,
            layer.duration.0,
            layer.duration.1,
        );
        for idx in 0..count {
            let fill = if idx % 5 == 0 {
                card_colors[idx % card_colors.len()].as_str()
            } else {
                theme.text_dim.as_str()
            };
            let opacity = opacities[idx];
            out.push_str(&format!(
                "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"{:.1}\" fill=\"{fill}\" opacity=\"{opacity:.2}\"><animate attributeName=\"opacity\" values=\"{opacity:.2};0.7;{opacity:.2}\" dur=\"{:.1}s\" repeatCount=\"indefinite\"/></circle>",
                xs[idx], ys[idx], radii[idx], durations[idx]
            ));
        }
    }
    out
}

fn title_area(n: usize, width: f32, theme: &Theme) -> String {
    let cyan = &theme.synapse_cyan;
    let faint = &theme.text_faint;
    format!(
        "<text x=\"35\" y=\"45\" fill=\"{faint}\" font-size=\"12\" font-family=\"monospace\" letter-spacing=\"4\" font-weight=\"bold\">FEATURED SYSTEMS</text>\
<circle cx=\"235\" cy=\"41\" r=\"3\" fill=\"{cyan}\"><animate attributeName=\"opacity\" values=\"1;0.3;1\" dur=\"2s\" repeatCount=\"indefinite\"/></circle>\
<text x=\"{right}\" y=\"45\" fill=\"{faint}\" font-size=\"10\" font-family=\"monospace\" text-anchor=\"end\" opacity=\"0.6\">SYS v2.0 // {n} NODES ACTIVE</text>\
<line x1=\"35\" y1=\"58\" x2=\"{right}\" y2=\"58\" stroke=\"{dust}\" stroke-width=\"1\" opacity=\"0.5\"/>",
        right = width - 35.0,
        dust = theme.star_dust,
    )
}

#[allow(clippy::too_many_arguments)]
fn project_card(
    idx: usize,
    project: &Project,
    arm: Option<&Arm>,
    color: &str,
    card_width: f32,
    card_x: f32,
    theme: &Theme,
    layout: &ShowcaseConfig,
) -> String {
    let cx = card_x + card_width / 2.0;
    let top = layout.card_top;
    let height = layout.card_height;
    let max_chars = (card_width / layout.char_width.max(1.0)) as usize;
    let lines = wrap_text(project.description(), max_chars);
    let badge = arm.map(|arm| arm.name.to_uppercase()).unwrap_or_default();
    let orbit_y = top + 30.0;

    let mut out = format!(
        "<g opacity=\"0\" style=\"animation: card-appear 0.8s ease {:.1}s forwards\">",
        idx as f32 * 0.2
    );
    out.push_str(&format!(
        "<rect x=\"{card_x}\" y=\"{top}\" width=\"{card_width}\" height=\"{height}\" rx=\"12\" ry=\"12\" fill=\"{color}\" opacity=\"0.05\" filter=\"url(#proj-glow-{idx})\"/>"
    ));
    out.push_str(&format!(
        "<rect x=\"{card_x}\" y=\"{top}\" width=\"{card_width}\" height=\"{height}\" rx=\"12\" ry=\"12\" fill=\"url(#card-bg-{idx})\" stroke=\"{}\" stroke-width=\"1.5\"/>",
        theme.star_dust
    ));
    out.push_str(&format!(
        "<g clip-path=\"url(#card-clip-{idx})\">\
<circle cx=\"{cx}\" cy=\"{orbit_y}\" r=\"16\" fill=\"none\" stroke=\"{color}\" stroke-width=\"1\" stroke-dasharray=\"4,4\" opacity=\"0.4\"><animateTransform attributeName=\"transform\" type=\"rotate\" from=\"0 {cx} {orbit_y}\" to=\"360 {cx} {orbit_y}\" dur=\"10s\" repeatCount=\"indefinite\"/></circle>\
<circle cx=\"{cx}\" cy=\"{orbit_y}\" r=\"6\" fill=\"{color}\" filter=\"url(#proj-glow-{idx})\"><animate attributeName=\"r\" values=\"5;7;5\" dur=\"3s\" repeatCount=\"indefinite\"/></circle>\
<circle cx=\"{cx}\" cy=\"{orbit_y}\" r=\"2\" fill=\"#fff\"/>\
</g>"
    ));
    out.push_str(&format!(
        "<text x=\"{cx}\" y=\"{}\" fill=\"{}\" font-size=\"15\" font-weight=\"bold\" font-family=\"sans-serif\" text-anchor=\"middle\">{}</text>",
        top + 70.0,
        theme.text_bright,
        escape_xml(project.short_name())
    ));
    for (line_idx, line) in lines.iter().enumerate() {
        out.push_str(&format!(
            "<text x=\"{cx}\" y=\"{}\" fill=\"{}\" font-size=\"11\" font-family=\"sans-serif\" text-anchor=\"middle\">{}</text>",
            top + 95.0 + line_idx as f32 * 15.0,
            theme.text_dim,
            escape_xml(line)
        ));
    }
    if !badge.is_empty() {
        out.push_str(&format!(
            "<rect x=\"{}\" y=\"{}\" width=\"80\" height=\"18\" rx=\"9\" fill=\"{color}\" opacity=\"0.1\"/>",
            cx - 40.0,
            top + 125.0
        ));
        out.push_str(&format!(
            "<text x=\"{cx}\" y=\"{}\" fill=\"{color}\" font-size=\"9\" font-family=\"monospace\" font-weight=\"bold\" text-anchor=\"middle\">{}</text>",
            top + 137.0,
            escape_xml(&badge)
        ));
    }
    out.push_str("</g>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arms() -> Vec<Arm> {
        vec![
            Arm {
                name: "Data".to_string(),
                items: Vec::new(),
                color: None,
            },
            Arm {
                name: "Infra".to_string(),
                items: Vec::new(),
                color: None,
            },
        ]
    }

    fn project(repo: &str, arm: usize) -> Project {
        Project {
            repo: repo.to_string(),
            description: Some(
                "A columnar store for time series with a very long description that keeps going"
                    .to_string(),
            ),
            arm,
        }
    }

    #[test]
    fn empty_projects_render_placeholder() {
        let svg = render_showcase(&[], &arms(), &Theme::galaxy(), &ShowcaseConfig::default());
        assert!(svg.contains("NO SYSTEMS DETECTED"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn cards_are_capped_and_labelled() {
        let projects: Vec<Project> = (0..5).map(|i| project(&format!("me/p{i}"), i)).collect();
        let svg = render_showcase(&projects, &arms(), &Theme::galaxy(), &ShowcaseConfig::default());
        assert!(svg.contains("3 NODES ACTIVE"));
        assert!(svg.contains(">p2</text>"));
        assert!(!svg.contains(">p3</text>"));
        assert!(svg.contains(">INFRA</text>"));
    }

    #[test]
    fn two_cards_use_the_wide_width() {
        let layout = ShowcaseConfig::default();
        let (width, xs) = card_slots(2, &layout);
        assert_eq!(width, 360.0);
        let gap = xs[0];
        assert!((xs[1] - (gap * 2.0 + width)).abs() < 1e-3);
        let (width, xs) = card_slots(3, &layout);
        assert_eq!(width, 240.0);
        assert_eq!(xs.len(), 3);
    }

    #[test]
    fn description_wraps_to_two_lines() {
        let svg = render_showcase(
            &[project("me/tsdb", 0)],
            &arms(),
            &Theme::galaxy(),
            &ShowcaseConfig::default(),
        );
        assert_eq!(svg.matches("font-size=\"11\"").count(), 2);
        assert!(svg.contains("..."));
    }

    #[test]
    fn projects_without_arms_still_render() {
        let svg = render_showcase(
            &[project("solo", 3)],
            &[],
            &Theme::galaxy(),
            &ShowcaseConfig::default(),
        );
        assert!(svg.contains(">solo</text>"));
    }

    #[test]
    fn star_layers_come_from_layout() {
        let projects = vec![project("a/b", 0)];
        let stars = |svg: &str| svg.matches(";0.7;").count();
        let default_svg =
            render_showcase(&projects, &arms(), &Theme::galaxy(), &ShowcaseConfig::default());
        assert_eq!(stars(&default_svg), 32);

        let bare = ShowcaseConfig {
            star_layers: Vec::new(),
            ..ShowcaseConfig::default()
        };
        let bare_svg = render_showcase(&projects, &arms(), &Theme::galaxy(), &bare);
        assert_eq!(stars(&bare_svg), 0);
    }

    #[test]
    fn showcase_is_deterministic() {
        let projects = vec![project("a/b", 0), project("c/d", 1)];
        let layout = ShowcaseConfig::default();
        assert_eq!(
            render_showcase(&projects, &arms(), &Theme::galaxy(), &layout),
            render_showcase(&projects, &arms(), &Theme::galaxy(), &layout)
        );
    }
}
