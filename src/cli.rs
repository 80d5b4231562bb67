use crate::config::load_config;
use crate::render::{Template, render_template, write_output_svg};
#[cfg(feature = "png")]
use crate::render::write_output_png;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "galaxy-svg", version, about = "Galaxy-themed SVG profile graphics")]
pub struct Args {
    /// Profile config file (JSON or JSON5)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Output directory for the generated files
    #[arg(short = 'o', long = "output", default_value = ".")]
    pub output: PathBuf,

    /// Templates to render (repeatable). Defaults to all of them.
    #[arg(short = 't', long = "template", value_enum)]
    pub templates: Vec<Template>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Raster width used when the SVG has no intrinsic size
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Raster height used when the SVG has no intrinsic size
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Print a single SVG template to stdout instead of writing files
    #[arg(long = "stdout")]
    pub stdout: bool,

    /// Print the resolved config (theme, data and layout) as JSON and exit
    #[arg(long = "dump-config")]
    pub dump_config: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // a second init (e.g. from tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }

    if args.dump_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let templates = selected_templates(&args.templates);

    if args.stdout {
        let [template] = templates.as_slice() else {
            return Err(anyhow::anyhow!(
                "--stdout needs exactly one --template, got {}",
                templates.len()
            ));
        };
        if args.output_format != OutputFormat::Svg {
            return Err(anyhow::anyhow!("--stdout only supports svg output"));
        }
        let svg = render_template(*template, &config);
        return write_output_svg(&svg, None);
    }

    if !args.output.is_dir() {
        std::fs::create_dir_all(&args.output)?;
    }

    for template in templates {
        let svg = render_template(template, &config);
        let path = output_path(&args.output, template, args.output_format);
        match args.output_format {
            OutputFormat::Svg => write_output_svg(&svg, Some(&path))?,
            OutputFormat::Png => write_png(&svg, &path, &config)?,
        }
        tracing::info!(%template, path = %path.display(), "wrote output");
    }

    Ok(())
}

#[cfg(feature = "png")]
fn write_png(svg: &str, path: &Path, config: &crate::config::Config) -> Result<()> {
    write_output_png(svg, path, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _path: &Path, _config: &crate::config::Config) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the 'png' feature"))
}

fn selected_templates(requested: &[Template]) -> Vec<Template> {
    if requested.is_empty() {
        return Template::ALL.to_vec();
    }
    let mut out: Vec<Template> = Vec::new();
    for template in requested {
        if !out.contains(template) {
            out.push(*template);
        }
    }
    out
}

fn output_path(dir: &Path, template: Template, format: OutputFormat) -> PathBuf {
    dir.join(format!("{}.{}", template.file_stem(), format.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_all_templates() {
        assert_eq!(selected_templates(&[]), Template::ALL.to_vec());
    }

    #[test]
    fn deduplicates_requested_templates() {
        let picked = selected_templates(&[Template::Stats, Template::Banner, Template::Stats]);
        assert_eq!(picked, vec![Template::Stats, Template::Banner]);
    }

    #[test]
    fn output_paths_use_template_stems() {
        let path = output_path(Path::new("out"), Template::Radar, OutputFormat::Png);
        assert_eq!(path, Path::new("out").join("tech-stack.png"));
        let path = output_path(Path::new("out"), Template::Banner, OutputFormat::Svg);
        assert_eq!(path, Path::new("out").join("galaxy-header.svg"));
    }

    #[test]
    fn parses_repeated_template_flags() {
        let argv = ["galaxy-svg", "-t", "banner", "-t", "radar", "-e", "png"];
        let args = Args::try_parse_from(argv).unwrap();
        assert_eq!(args.templates, vec![Template::Banner, Template::Radar]);
        assert_eq!(args.output_format, OutputFormat::Png);
        assert_eq!(args.output, PathBuf::from("."));
    }
}
