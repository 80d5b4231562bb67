use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Arm, LanguageBytes, Profile, Project, Stats};
use crate::theme::Theme;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] json5::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// One depth layer of a starfield; `label` seeds its draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarLayer {
    pub label: String,
    pub count: usize,
    pub radius: (f32, f32),
    pub opacity: (f32, f32),
    pub duration: (f32, f32),
}

impl StarLayer {
    fn new(
        label: &str,
        count: usize,
        radius: (f32, f32),
        opacity: (f32, f32),
        duration: (f32, f32),
    ) -> Self {
        Self {
            label: label.to_string(),
            count,
            radius,
            opacity,
            duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    pub width: f32,
    pub height: f32,
    pub center_x: f32,
    pub center_y: f32,
    pub max_radius: f32,
    pub spiral_turns: f32,
    pub arm_points: usize,
    pub x_scale: f32,
    pub y_scale: f32,
    pub start_angles: Vec<f32>,
    pub label_offset: f32,
    pub star_margin: f32,
    pub star_layers: Vec<StarLayer>,
    pub max_beacons_per_arm: usize,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            width: 850.0,
            height: 420.0,
            center_x: 425.0,
            center_y: 215.0,
            max_radius: 180.0,
            spiral_turns: 0.85,
            arm_points: 30,
            x_scale: 1.65,
            y_scale: 0.52,
            start_angles: vec![25.0, 150.0, 265.0],
            label_offset: 28.0,
            star_margin: 20.0,
            star_layers: vec![
                StarLayer::new("bg", 50, (0.3, 0.8), (0.08, 0.3), (5.0, 9.0)),
                StarLayer::new("mid", 25, (0.6, 1.2), (0.15, 0.5), (3.5, 7.0)),
                StarLayer::new("fg", 15, (1.0, 1.8), (0.4, 0.7), (2.0, 4.5)),
            ],
            max_beacons_per_arm: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    pub width: f32,
    pub height: f32,
    pub max_cards: usize,
    pub card_width: f32,
    pub pair_card_width: f32,
    pub card_top: f32,
    pub card_height: f32,
    /// Approximate pixels per description character.
    pub char_width: f32,
    pub star_margin: f32,
    pub star_layers: Vec<StarLayer>,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            width: 850.0,
            height: 260.0,
            max_cards: 3,
            card_width: 240.0,
            pair_card_width: 360.0,
            card_top: 75.0,
            card_height: 155.0,
            char_width: 8.0,
            star_margin: 12.0,
            star_layers: vec![
                StarLayer::new("p-star", 20, (0.3, 0.8), (0.1, 0.3), (4.0, 7.0)),
                StarLayer::new("p-mstar", 12, (0.6, 1.3), (0.2, 0.5), (3.0, 5.0)),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            width: 850.0,
            height: 220.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    pub width: f32,
    pub min_height: f32,
    pub header_height: f32,
    pub bar_left: f32,
    pub bar_row_height: f32,
    pub bar_max_width: f32,
    pub radar_center_x: f32,
    pub radius: f32,
    pub label_gap: f32,
    pub grid_rings: Vec<f32>,
    pub sweep_degrees: f32,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            width: 850.0,
            min_height: 380.0,
            header_height: 70.0,
            bar_left: 40.0,
            bar_row_height: 32.0,
            bar_max_width: 180.0,
            radar_center_x: 620.0,
            radius: 105.0,
            label_gap: 22.0,
            grid_rings: vec![0.25, 0.5, 0.75, 1.0],
            sweep_degrees: 40.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub banner: BannerConfig,
    pub showcase: ShowcaseConfig,
    pub stats: StatsConfig,
    pub radar: RadarConfig,
}

/// Raster settings for PNG export.
#[derive(Debug, Clone, Serialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 850.0,
            height: 420.0,
            background: Theme::galaxy().void,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub profile: Profile,
    pub theme: Theme,
    #[serde(rename = "galaxy_arms")]
    pub arms: Vec<Arm>,
    pub projects: Vec<Project>,
    pub stats: Stats,
    pub metrics: Vec<String>,
    pub languages: LanguageBytes,
    pub language_exclude: Vec<String>,
    pub max_languages: usize,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

pub const DEFAULT_METRICS: [&str; 5] = ["commits", "stars", "prs", "issues", "repos"];

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::galaxy();
        let render = RenderConfig {
            background: theme.void.clone(),
            ..Default::default()
        };
        Self {
            profile: Profile::new("user"),
            theme,
            arms: Vec::new(),
            projects: Vec::new(),
            stats: Stats::new(),
            metrics: DEFAULT_METRICS.iter().map(|key| key.to_string()).collect(),
            languages: LanguageBytes::new(),
            language_exclude: Vec::new(),
            max_languages: 8,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ThemeVariables {
    void: Option<String>,
    nebula: Option<String>,
    star_dust: Option<String>,
    synapse_cyan: Option<String>,
    dendrite_violet: Option<String>,
    axon_amber: Option<String>,
    text_bright: Option<String>,
    text_dim: Option<String>,
    text_faint: Option<String>,
    accent_palette: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct ProfileFile {
    name: Option<String>,
    tagline: Option<String>,
    philosophy: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    username: Option<String>,
    profile: Option<ProfileFile>,
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    galaxy_arms: Option<Vec<Arm>>,
    projects: Option<Vec<Project>>,
    stats: Option<Stats>,
    metrics: Option<Vec<String>>,
    languages: Option<LanguageBytes>,
    language_exclude: Option<Vec<String>>,
    max_languages: Option<usize>,
    layout: Option<LayoutConfig>,
}

pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&contents)?;
    tracing::debug!(
        path = %path.display(),
        arms = config.arms.len(),
        projects = config.projects.len(),
        "loaded config"
    );
    Ok(config)
}

/// Parses a JSON5 (or plain JSON) profile document onto the defaults.
pub fn parse_config(contents: &str) -> Result<Config, ConfigError> {
    let parsed: ConfigFile = json5::from_str(contents)?;
    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        config.theme = Theme::by_name(theme_name)
            .ok_or_else(|| ConfigError::Invalid(format!("unknown theme '{theme_name}'")))?;
    }
    if let Some(vars) = parsed.theme_variables {
        apply_theme_variables(&mut config.theme, vars);
    }
    config.render.background = config.theme.void.clone();

    if let Some(username) = parsed.username {
        config.profile.username = username;
    }
    if let Some(profile) = parsed.profile {
        config.profile.name = profile.name;
        config.profile.tagline = profile.tagline;
        config.profile.philosophy = profile.philosophy;
    }

    if let Some(arms) = parsed.galaxy_arms {
        config.arms = arms;
    }
    if let Some(projects) = parsed.projects {
        config.projects = projects;
    }
    if let Some(stats) = parsed.stats {
        config.stats = stats;
    }
    if let Some(metrics) = parsed.metrics {
        config.metrics = metrics;
    }
    if let Some(languages) = parsed.languages {
        config.languages = languages;
    }
    if let Some(exclude) = parsed.language_exclude {
        config.language_exclude = exclude;
    }
    if let Some(max) = parsed.max_languages {
        config.max_languages = max;
    }
    if let Some(layout) = parsed.layout {
        config.layout = layout;
    }

    config.render.width = config.layout.banner.width;
    config.render.height = config.layout.banner.height;

    validate(&config)?;
    Ok(config)
}

fn apply_theme_variables(theme: &mut Theme, vars: ThemeVariables) {
    if let Some(v) = vars.void {
        theme.void = v;
    }
    if let Some(v) = vars.nebula {
        theme.nebula = v;
    }
    if let Some(v) = vars.star_dust {
        theme.star_dust = v;
    }
    if let Some(v) = vars.synapse_cyan {
        theme.synapse_cyan = v;
    }
    if let Some(v) = vars.dendrite_violet {
        theme.dendrite_violet = v;
    }
    if let Some(v) = vars.axon_amber {
        theme.axon_amber = v;
    }
    if let Some(v) = vars.text_bright {
        theme.text_bright = v;
    }
    if let Some(v) = vars.text_dim {
        theme.text_dim = v;
    }
    if let Some(v) = vars.text_faint {
        theme.text_faint = v;
    }
    if let Some(v) = vars.accent_palette {
        theme.accent_palette = v;
    }
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if let Some((role, value)) = config.theme.first_invalid_color() {
        return Err(ConfigError::Invalid(format!(
            "theme color {role} must be #rgb or #rrggbb, got '{value}'"
        )));
    }
    if config.max_languages == 0 {
        return Err(ConfigError::Invalid("max_languages must be at least 1".to_string()));
    }
    if config.layout.banner.start_angles.is_empty() {
        return Err(ConfigError::Invalid(
            "layout.banner.start_angles must not be empty".to_string(),
        ));
    }
    if config.layout.showcase.max_cards == 0 {
        return Err(ConfigError::Invalid(
            "layout.showcase.max_cards must be at least 1".to_string(),
        ));
    }
    for project in &config.projects {
        if !config.arms.is_empty() && project.arm >= config.arms.len() {
            tracing::warn!(
                repo = %project.repo,
                arm = project.arm,
                arms = config.arms.len(),
                "project arm index out of range, wrapping"
            );
        }
    }
    Ok(())
}
