use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::text::title_case;
use crate::theme::Theme;

/// Display metadata for a known stats key.
#[derive(Debug, Clone, Copy)]
pub struct MetricSpec {
    pub label: &'static str,
    pub color_role: &'static str,
    /// Path markup drawn inside a 16x16 viewBox.
    pub icon: &'static str,
}

static METRICS: Lazy<HashMap<&'static str, MetricSpec>> = Lazy::new(|| {
    HashMap::from([
        (
            "commits",
            MetricSpec {
                label: "Commits",
                color_role: "synapse_cyan",
                icon: r#"<path d="M8 5a3 3 0 1 0 0 6 3 3 0 0 0 0-6zM0 7.25h4.6v1.5H0zm11.4 0H16v1.5h-4.6z"/>"#,
            },
        ),
        (
            "stars",
            MetricSpec {
                label: "Stars",
                color_role: "axon_amber",
                icon: r#"<path d="M8 .5l2.3 4.7 5.2.8-3.8 3.6.9 5.2L8 12.4l-4.6 2.4.9-5.2L.5 6l5.2-.8z"/>"#,
            },
        ),
        (
            "prs",
            MetricSpec {
                label: "Pull Requests",
                color_role: "dendrite_violet",
                icon: r#"<path d="M4 1.5a2 2 0 1 0 0 4 2 2 0 0 0 0-4zM3.25 6h1.5v4h-1.5zM4 10.5a2 2 0 1 0 0 4 2 2 0 0 0 0-4zm8 0a2 2 0 1 0 0 4 2 2 0 0 0 0-4zM11.25 4h1.5v6.5h-1.5zM8 2.5h4v1.5H8z"/>"#,
            },
        ),
        (
            "issues",
            MetricSpec {
                label: "Issues",
                color_role: "axon_amber",
                icon: r#"<path d="M8 1a7 7 0 1 0 0 14A7 7 0 0 0 8 1zm0 1.5a5.5 5.5 0 1 1 0 11 5.5 5.5 0 0 1 0-11zM8 6.5a1.5 1.5 0 1 0 0 3 1.5 1.5 0 0 0 0-3z"/>"#,
            },
        ),
        (
            "repos",
            MetricSpec {
                label: "Repositories",
                color_role: "synapse_cyan",
                icon: r#"<path d="M2 2.5A2.5 2.5 0 0 1 4.5 0H14v13H4.5a1 1 0 0 0 0 2H14v1H4.5A2.5 2.5 0 0 1 2 13.5zM4 3v8h8.5V1.5H4.5A.5.5 0 0 0 4 2z"/>"#,
            },
        ),
        (
            "followers",
            MetricSpec {
                label: "Followers",
                color_role: "dendrite_violet",
                icon: r#"<path d="M8 1.5a3 3 0 1 0 0 6 3 3 0 0 0 0-6zM2 14.5a6 6 0 0 1 12 0v1H2z"/>"#,
            },
        ),
        (
            "contributed_to",
            MetricSpec {
                label: "Contributed To",
                color_role: "axon_amber",
                icon: r#"<path d="M3 1.5h10v9H3zm1.5 1.5v6h7V3zM5 12h6l-1 3.5H6z"/>"#,
            },
        ),
    ])
});

pub fn metric_spec(key: &str) -> Option<&'static MetricSpec> {
    METRICS.get(key)
}

/// Upper-cased label for `key`; unknown keys are title-cased.
pub fn metric_label(key: &str) -> String {
    match metric_spec(key) {
        Some(spec) => spec.label.to_uppercase(),
        None => title_case(key).to_uppercase(),
    }
}

pub fn metric_color<'a>(key: &str, theme: &'a Theme) -> &'a str {
    let role = metric_spec(key).map_or("synapse_cyan", |spec| spec.color_role);
    theme.role_or(role, theme.synapse_cyan.as_str())
}

pub fn metric_icon(key: &str) -> &'static str {
    metric_spec(key).map_or("", |spec| spec.icon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_metric_metadata() {
        let theme = Theme::galaxy();
        assert_eq!(metric_label("prs"), "PULL REQUESTS");
        assert_eq!(metric_color("stars", &theme), theme.axon_amber);
        assert!(metric_icon("commits").starts_with("<path"));
    }

    #[test]
    fn unknown_metric_falls_back() {
        let theme = Theme::galaxy();
        assert_eq!(metric_label("code_reviews"), "CODE REVIEWS");
        assert_eq!(metric_color("code_reviews", &theme), theme.synapse_cyan);
        assert_eq!(metric_icon("code_reviews"), "");
    }
}
