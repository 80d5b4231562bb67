use std::cmp::Ordering;
use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::model::LanguageBytes;
use crate::theme::Theme;

static LANGUAGE_COLORS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("rust", "#dea584"),
        ("python", "#3572a5"),
        ("typescript", "#3178c6"),
        ("javascript", "#f1e05a"),
        ("go", "#00add8"),
        ("c", "#555555"),
        ("c++", "#f34b7d"),
        ("c#", "#178600"),
        ("java", "#b07219"),
        ("kotlin", "#a97bff"),
        ("swift", "#f05138"),
        ("ruby", "#701516"),
        ("shell", "#89e051"),
        ("html", "#e34c26"),
        ("css", "#563d7c"),
        ("lua", "#000080"),
        ("zig", "#ec915c"),
        ("haskell", "#5e5086"),
        ("elixir", "#6e4a7e"),
        ("jupyter notebook", "#da5b0b"),
    ])
});

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageShare {
    pub name: String,
    pub bytes: u64,
    /// Share of the counted total, rounded to one decimal.
    pub percentage: f32,
    pub color: String,
}

/// Normalizes byte counts into display shares.
///
/// `exclude` matches names case-insensitively and excluded languages do not
/// count towards the total. Shares are ordered by size, largest first, and
/// capped at `max_display`.
pub fn calculate_language_percentages(
    bytes: &LanguageBytes,
    exclude: &[String],
    max_display: usize,
    theme: &Theme,
) -> Vec<LanguageShare> {
    let excluded: Vec<String> = exclude.iter().map(|name| name.to_lowercase()).collect();
    let mut counted: Vec<(&String, u64)> = bytes
        .iter()
        .filter(|(name, _)| !excluded.contains(&name.to_lowercase()))
        .map(|(name, count)| (name, *count))
        .collect();
    let total: u64 = counted.iter().map(|(_, count)| *count).sum();
    if total == 0 {
        return Vec::new();
    }

    counted.sort_by(|a, b| match b.1.cmp(&a.1) {
        Ordering::Equal => a.0.cmp(b.0),
        other => other,
    });

    counted
        .into_iter()
        .take(max_display)
        .enumerate()
        .map(|(idx, (name, count))| {
            let percentage = ((count as f64 / total as f64) * 1000.0).round() / 10.0;
            LanguageShare {
                name: name.clone(),
                bytes: count,
                percentage: percentage as f32,
                color: language_color(name, idx, theme),
            }
        })
        .collect()
}

fn language_color(name: &str, index: usize, theme: &Theme) -> String {
    LANGUAGE_COLORS
        .get(name.to_lowercase().as_str())
        .map(|color| color.to_string())
        .unwrap_or_else(|| theme.accent(index).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LanguageBytes {
        LanguageBytes::from([
            ("Rust".to_string(), 6_000),
            ("Python".to_string(), 3_000),
            ("HTML".to_string(), 1_000),
            ("Nix".to_string(), 0),
        ])
    }

    #[test]
    fn percentages_sorted_and_normalized() {
        let shares = calculate_language_percentages(&sample(), &[], 10, &Theme::galaxy());
        let names: Vec<&str> = shares.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Rust", "Python", "HTML", "Nix"]);
        assert_eq!(shares[0].percentage, 60.0);
        assert_eq!(shares[1].percentage, 30.0);
        assert_eq!(shares[0].color, "#dea584");
    }

    #[test]
    fn excluded_languages_do_not_count() {
        let exclude = vec!["html".to_string()];
        let shares = calculate_language_percentages(&sample(), &exclude, 10, &Theme::galaxy());
        assert!(shares.iter().all(|s| s.name != "HTML"));
        assert_eq!(shares[0].percentage, 66.7);
        assert_eq!(shares[1].percentage, 33.3);
    }

    #[test]
    fn max_display_caps_results() {
        let shares = calculate_language_percentages(&sample(), &[], 2, &Theme::galaxy());
        assert_eq!(shares.len(), 2);
    }

    #[test]
    fn empty_or_zero_total_yields_nothing() {
        let theme = Theme::galaxy();
        assert!(calculate_language_percentages(&LanguageBytes::new(), &[], 5, &theme).is_empty());
        let zero = LanguageBytes::from([("Rust".to_string(), 0)]);
        assert!(calculate_language_percentages(&zero, &[], 5, &theme).is_empty());
    }

    #[test]
    fn unknown_language_uses_accent_palette() {
        let theme = Theme::galaxy();
        let bytes = LanguageBytes::from([("Brainfuck".to_string(), 10)]);
        let shares = calculate_language_percentages(&bytes, &[], 5, &theme);
        assert_eq!(shares[0].color, theme.accent(0));
    }
}
