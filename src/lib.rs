#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod geometry;
pub mod languages;
pub mod metrics;
pub mod model;
pub mod random;
pub mod render;
pub mod text;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, ConfigError, LayoutConfig, load_config, parse_config};
pub use geometry::{arc_path, spiral_points};
pub use languages::calculate_language_percentages;
pub use model::{Arm, Profile, Project};
pub use random::deterministic_random;
pub use render::{
    Template, render_banner, render_radar, render_showcase, render_stats, render_template,
};
pub use text::{escape_xml, format_number, wrap_text};
pub use theme::{Theme, resolve_arm_colors};
