use serde::{Deserialize, Serialize};

use crate::model::Arm;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub void: String,
    pub nebula: String,
    pub star_dust: String,
    pub synapse_cyan: String,
    pub dendrite_violet: String,
    pub axon_amber: String,
    pub text_bright: String,
    pub text_dim: String,
    pub text_faint: String,
    pub accent_palette: Vec<String>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::galaxy()
    }
}

impl Theme {
    pub fn galaxy() -> Self {
        Self {
            void: "#05060f".to_string(),
            nebula: "#0d1024".to_string(),
            star_dust: "#2a2f4a".to_string(),
            synapse_cyan: "#00d4ff".to_string(),
            dendrite_violet: "#a78bfa".to_string(),
            axon_amber: "#ffb020".to_string(),
            text_bright: "#f1f5ff".to_string(),
            text_dim: "#a3acc8".to_string(),
            text_faint: "#5c6485".to_string(),
            accent_palette: vec![
                "#00d4ff".to_string(),
                "#a78bfa".to_string(),
                "#ffb020".to_string(),
                "#34d399".to_string(),
                "#f472b6".to_string(),
                "#60a5fa".to_string(),
            ],
        }
    }

    pub fn aurora() -> Self {
        Self {
            void: "#0b1a1f".to_string(),
            nebula: "#102a31".to_string(),
            star_dust: "#24454d".to_string(),
            synapse_cyan: "#5eead4".to_string(),
            dendrite_violet: "#c4b5fd".to_string(),
            axon_amber: "#fde68a".to_string(),
            text_bright: "#f0fdfa".to_string(),
            text_dim: "#99c5c2".to_string(),
            text_faint: "#4f7a7a".to_string(),
            accent_palette: vec![
                "#5eead4".to_string(),
                "#c4b5fd".to_string(),
                "#fde68a".to_string(),
                "#86efac".to_string(),
                "#f9a8d4".to_string(),
            ],
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "galaxy" | "default" => Some(Self::galaxy()),
            "aurora" => Some(Self::aurora()),
            _ => None,
        }
    }

    /// Looks up a color role by its semantic name.
    pub fn role(&self, name: &str) -> Option<&str> {
        let value = match name {
            "void" => &self.void,
            "nebula" => &self.nebula,
            "star_dust" => &self.star_dust,
            "synapse_cyan" => &self.synapse_cyan,
            "dendrite_violet" => &self.dendrite_violet,
            "axon_amber" => &self.axon_amber,
            "text_bright" => &self.text_bright,
            "text_dim" => &self.text_dim,
            "text_faint" => &self.text_faint,
            _ => return None,
        };
        Some(value.as_str())
    }

    pub fn role_or<'a>(&'a self, name: &str, fallback: &'a str) -> &'a str {
        self.role(name).unwrap_or(fallback)
    }

    /// First role (or `accent_palette[i]` slot) whose value is not a hex color.
    pub fn first_invalid_color(&self) -> Option<(String, &str)> {
        let roles = [
            "void",
            "nebula",
            "star_dust",
            "synapse_cyan",
            "dendrite_violet",
            "axon_amber",
            "text_bright",
            "text_dim",
            "text_faint",
        ];
        for name in roles {
            if let Some(value) = self.role(name) {
                if !is_hex_color(value) {
                    return Some((name.to_string(), value));
                }
            }
        }
        self.accent_palette
            .iter()
            .enumerate()
            .find(|(_, value)| !is_hex_color(value))
            .map(|(idx, value)| (format!("accent_palette[{idx}]"), value.as_str()))
    }

    /// Accent color for slot `index`, cycling through the palette.
    pub fn accent(&self, index: usize) -> &str {
        if self.accent_palette.is_empty() {
            return self.synapse_cyan.as_str();
        }
        self.accent_palette[index % self.accent_palette.len()].as_str()
    }
}

/// `#rgb` or `#rrggbb`.
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// One color per arm, in arm order.
///
/// An arm's explicit `color` may name a theme role or carry a literal
/// `#rgb`/`#rrggbb`; anything else falls back to the accent palette slot.
pub fn resolve_arm_colors(arms: &[Arm], theme: &Theme) -> Vec<String> {
    arms.iter()
        .enumerate()
        .map(|(idx, arm)| match arm.color.as_deref() {
            Some(color) => match theme.role(color) {
                Some(resolved) => resolved.to_string(),
                None if is_hex_color(color) => color.to_string(),
                None => {
                    tracing::warn!(
                        arm = %arm.name,
                        color,
                        "arm color is neither a theme role nor a hex color"
                    );
                    theme.accent(idx).to_string()
                }
            },
            None => theme.accent(idx).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arm(name: &str, color: Option<&str>) -> Arm {
        Arm {
            name: name.to_string(),
            items: Vec::new(),
            color: color.map(str::to_string),
        }
    }

    #[test]
    fn resolves_one_color_per_arm_cycling_palette() {
        let theme = Theme::galaxy();
        let arms: Vec<Arm> = (0..8).map(|i| arm(&format!("arm{i}"), None)).collect();
        let colors = resolve_arm_colors(&arms, &theme);
        assert_eq!(colors.len(), 8);
        assert_eq!(colors[0], theme.accent_palette[0]);
        assert_eq!(colors[6], theme.accent_palette[0]);
        assert_ne!(colors[0], colors[1]);
    }

    #[test]
    fn explicit_role_and_literal_colors_win() {
        let theme = Theme::galaxy();
        let arms = vec![
            arm("a", Some("axon_amber")),
            arm("b", Some("#123456")),
            arm("c", Some("not_a_role")),
        ];
        let colors = resolve_arm_colors(&arms, &theme);
        assert_eq!(colors[0], theme.axon_amber);
        assert_eq!(colors[1], "#123456");
        assert_eq!(colors[2], theme.accent(2));
    }

    #[test]
    fn malformed_literal_colors_fall_back_to_accent() {
        let theme = Theme::galaxy();
        let arms = vec![
            arm("a", Some("#fff\" bogus=\"1\" x=\"")),
            arm("b", Some("#12345")),
            arm("c", Some("#abc")),
        ];
        let colors = resolve_arm_colors(&arms, &theme);
        assert_eq!(colors[0], theme.accent(0));
        assert_eq!(colors[1], theme.accent(1));
        assert_eq!(colors[2], "#abc");
    }

    #[test]
    fn hex_color_shapes() {
        assert!(is_hex_color("#0aF"));
        assert!(is_hex_color("#00d4ff"));
        assert!(!is_hex_color("00d4ff"));
        assert!(!is_hex_color("#00d4f"));
        assert!(!is_hex_color("#00d4fg"));
        assert!(!is_hex_color("#000\"<"));
    }

    #[test]
    fn built_in_themes_only_hold_hex_colors() {
        assert_eq!(Theme::galaxy().first_invalid_color(), None);
        assert_eq!(Theme::aurora().first_invalid_color(), None);
        let mut theme = Theme::galaxy();
        theme.accent_palette.push("red".to_string());
        let (role, value) = theme.first_invalid_color().unwrap();
        assert_eq!(role, "accent_palette[6]");
        assert_eq!(value, "red");
    }

    #[test]
    fn empty_palette_falls_back_to_cyan() {
        let mut theme = Theme::galaxy();
        theme.accent_palette.clear();
        assert_eq!(theme.accent(3), theme.synapse_cyan);
    }

    #[test]
    fn role_lookup_covers_named_roles() {
        let theme = Theme::aurora();
        assert_eq!(theme.role("text_dim"), Some(theme.text_dim.as_str()));
        assert_eq!(theme.role("missing"), None);
        assert_eq!(theme.role_or("missing", "#fff"), "#fff");
    }
}
