use crate::config::StatsConfig;
use crate::metrics::{metric_color, metric_icon, metric_label};
use crate::model::Stats;
use crate::text::{escape_xml, format_number};
use crate::theme::Theme;

use super::{placeholder_svg, svg_open};

const STYLE: &str = "<style>\
.metric-icon { animation: count-glow 4s ease-in-out infinite; }\
@keyframes count-glow { 0%, 100% { fill-opacity: 0.6; transform: scale(1); } 50% { fill-opacity: 1; transform: scale(1.1); } }\
.metric-cell { animation: fade-in 0.8s ease-out forwards; }\
@keyframes fade-in { from { opacity: 0; transform: translateY(10px); } to { opacity: 1; transform: translateY(0); } }\
</style>";

pub fn render_stats(
    stats: &Stats,
    metric_keys: &[String],
    theme: &Theme,
    layout: &StatsConfig,
) -> String {
    tracing::debug!(template = "stats", metrics = metric_keys.len(), "rendering stats card");
    if metric_keys.is_empty() {
        return placeholder_svg(
            layout.width,
            layout.height,
            &theme.nebula,
            &theme.text_faint,
            "NO TELEMETRY",
        );
    }

    let width = layout.width;
    let height = layout.height;
    let cell_width = width / metric_keys.len() as f32;

    let mut svg = svg_open(width, height);
    svg.push_str("<defs>");
    svg.push_str(STYLE);
    svg.push_str(
        "<filter id=\"num-glow\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\"><feGaussianBlur stdDeviation=\"4\"/></filter>",
    );
    svg.push_str("</defs>");
    svg.push_str(&format!(
        "<rect x=\"0.5\" y=\"0.5\" width=\"{}\" height=\"{}\" rx=\"16\" ry=\"16\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.5\"/>",
        width - 1.0,
        height - 1.0,
        theme.nebula,
        theme.star_dust
    ));
    svg.push_str(&format!(
        "<g transform=\"translate(35, 38)\"><circle cx=\"-10\" cy=\"-4\" r=\"3\" fill=\"{}\"/><text fill=\"{}\" font-size=\"12\" font-family=\"monospace\" letter-spacing=\"4\" font-weight=\"bold\">MISSION TELEMETRY</text></g>",
        theme.synapse_cyan, theme.text_faint
    ));

    for idx in 1..metric_keys.len() {
        let x = cell_width * idx as f32;
        svg.push_str(&format!(
            "<line x1=\"{x}\" y1=\"80\" x2=\"{x}\" y2=\"160\" stroke=\"{}\" stroke-width=\"1\" opacity=\"0.3\"/>",
            theme.star_dust
        ));
    }

    for (idx, key) in metric_keys.iter().enumerate() {
        let value = stats.get(key).copied().unwrap_or(0);
        svg.push_str(&metric_cell(idx, key, value, cell_width, theme));
    }
    svg.push_str("</svg>");
    svg
}

fn metric_cell(idx: usize, key: &str, value: u64, cell_width: f32, theme: &Theme) -> String {
    let cx = cell_width * idx as f32 + cell_width / 2.0;
    let color = metric_color(key, theme);
    let value = format_number(value);
    let label = escape_xml(&metric_label(key));
    let icon = metric_icon(key);
    let delay = idx as f32 * 0.2;

    let mut out = format!("<g class=\"metric-cell\" transform=\"translate({cx}, 0)\">");
    out.push_str(&format!(
        "<rect x=\"{:.1}\" y=\"55\" width=\"{:.1}\" height=\"130\" rx=\"15\" fill=\"{color}\" opacity=\"0.03\"/>",
        -cell_width / 2.5,
        cell_width / 1.25
    ));
    if !icon.is_empty() {
        out.push_str(&format!(
            "<g transform=\"translate(-10, 80)\"><svg viewBox=\"0 0 16 16\" width=\"20\" height=\"20\" fill=\"{color}\" class=\"metric-icon\" style=\"animation-delay: {delay:.1}s\">{icon}</svg></g>"
        ));
    }
    out.push_str(&format!(
        "<text x=\"0\" y=\"135\" text-anchor=\"middle\" fill=\"{color}\" font-size=\"32\" font-weight=\"800\" font-family=\"sans-serif\" opacity=\"0.3\" filter=\"url(#num-glow)\">{value}</text>"
    ));
    out.push_str(&format!(
        "<text x=\"0\" y=\"135\" text-anchor=\"middle\" fill=\"{}\" font-size=\"32\" font-weight=\"800\" font-family=\"sans-serif\">{value}</text>",
        theme.text_bright
    ));
    out.push_str(&format!(
        "<text x=\"0\" y=\"165\" text-anchor=\"middle\" fill=\"{}\" font-size=\"10\" font-family=\"monospace\" letter-spacing=\"2\" font-weight=\"bold\">{label}</text>",
        theme.text_faint
    ));
    out.push_str("</g>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &[&str]) -> Vec<String> {
        list.iter().map(|key| key.to_string()).collect()
    }

    #[test]
    fn renders_formatted_values_and_labels() {
        let stats = Stats::from([("commits".to_string(), 1500), ("stars".to_string(), 950)]);
        let svg = render_stats(
            &stats,
            &keys(&["commits", "stars", "prs"]),
            &Theme::galaxy(),
            &StatsConfig::default(),
        );
        assert!(svg.contains(">1.5k</text>"));
        assert!(svg.contains(">950</text>"));
        assert!(svg.contains(">PULL REQUESTS</text>"));
        // missing stats render as zero
        assert!(svg.contains(">0</text>"));
        assert_eq!(svg.matches("<line ").count(), 2);
    }

    #[test]
    fn empty_metric_list_renders_placeholder() {
        let svg = render_stats(&Stats::new(), &[], &Theme::galaxy(), &StatsConfig::default());
        assert!(svg.contains("NO TELEMETRY"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn unknown_metric_has_no_icon() {
        let svg = render_stats(
            &Stats::new(),
            &keys(&["code_reviews"]),
            &Theme::galaxy(),
            &StatsConfig::default(),
        );
        assert!(svg.contains("CODE REVIEWS"));
        assert!(!svg.contains("metric-icon\" style"));
    }

    #[test]
    fn stats_card_is_deterministic() {
        let stats = Stats::from([("repos".to_string(), 42)]);
        let metric_keys = keys(&["repos", "followers"]);
        let layout = StatsConfig::default();
        assert_eq!(
            render_stats(&stats, &metric_keys, &Theme::galaxy(), &layout),
            render_stats(&stats, &metric_keys, &Theme::galaxy(), &layout)
        );
    }
}
