use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use darkroom_renderer::{PostProcess, RenderConfig};
use darkroom_scene::RenderSettings;
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "darkroom")]
#[command(about = "A Whitted-style ray tracer with a thin-lens camera")]
pub struct Args {
    /// Scene description (JSON)
    pub scene: PathBuf,

    /// Output image (.png or .ppm)
    #[arg(short, long, default_value = "piece.png")]
    pub output: PathBuf,

    /// Write both a PNG and a PPM, named after the output file
    #[arg(long)]
    pub both_formats: bool,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Primary rays per pixel (only used with an aperture)
    #[arg(long, short = 's')]
    pub samples_per_pixel: Option<u32>,

    /// Maximum mirror recursion depth
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Lens radius, 0 for a pinhole camera
    #[arg(long)]
    pub aperture: Option<f64>,

    /// Distance to the plane of perfect focus
    #[arg(long)]
    pub focal_distance: Option<f64>,

    /// Seed of the lens sample streams
    #[arg(long)]
    pub seed: Option<u64>,

    /// Edge length of the parallel render tiles
    #[arg(long)]
    pub bucket_size: Option<u32>,

    /// Disable film grain
    #[arg(long)]
    pub no_grain: bool,

    /// Disable vignetting
    #[arg(long)]
    pub no_vignette: bool,

    /// Disable warm color grading
    #[arg(long)]
    pub no_grading: bool,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Render settings: defaults, then the scene file's block, then flags.
    pub fn render_config(&self, scene_settings: Option<&RenderSettings>) -> RenderConfig {
        let mut config = RenderConfig::default();
        if let Some(settings) = scene_settings {
            settings.apply_to(&mut config);
        }

        RenderSettings {
            width: self.width,
            height: self.height,
            samples_per_pixel: self.samples_per_pixel,
            max_depth: self.max_depth,
            seed: self.seed,
        }
        .apply_to(&mut config);

        if let Some(bucket_size) = self.bucket_size {
            config.bucket_size = bucket_size;
        }
        config
    }

    /// Every file to write: the output, plus its PNG/PPM twin when asked.
    pub fn output_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.output.clone()];
        if self.both_formats {
            let is_ppm = self
                .output
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("ppm"));
            let twin = self.output.with_extension(if is_ppm { "png" } else { "ppm" });
            paths.push(twin);
        }
        paths
    }

    pub fn post_process(&self) -> PostProcess {
        PostProcess {
            grading: !self.no_grading,
            vignette: !self.no_vignette,
            grain: !self.no_grain,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_scene_settings() {
        let args = Args::parse_from(["darkroom", "scene.json", "--width", "64", "-s", "4"]);
        let scene = RenderSettings {
            width: Some(320),
            height: Some(200),
            max_depth: Some(3),
            ..Default::default()
        };

        let config = args.render_config(Some(&scene));
        assert_eq!(config.width, 64);
        assert_eq!(config.height, 200);
        assert_eq!(config.samples_per_pixel, 4);
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.seed, RenderConfig::default().seed);
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["darkroom", "scene.json"]);
        assert_eq!(args.output, PathBuf::from("piece.png"));
        assert_eq!(args.render_config(None), RenderConfig::default());
        assert_eq!(args.post_process(), PostProcess::default());
        assert!(matches!(args.log_level, LogLevel::Info));
    }

    #[test]
    fn test_output_paths() {
        let args = Args::parse_from(["darkroom", "scene.json", "-o", "out/piece.png"]);
        assert_eq!(args.output_paths(), vec![PathBuf::from("out/piece.png")]);

        let args = Args::parse_from(["darkroom", "scene.json", "-o", "out/piece.png", "--both-formats"]);
        assert_eq!(
            args.output_paths(),
            vec![PathBuf::from("out/piece.png"), PathBuf::from("out/piece.ppm")]
        );

        let args = Args::parse_from(["darkroom", "scene.json", "-o", "shot.PPM", "--both-formats"]);
        assert_eq!(
            args.output_paths(),
            vec![PathBuf::from("shot.PPM"), PathBuf::from("shot.png")]
        );
    }

    #[test]
    fn test_post_process_toggles() {
        let args = Args::parse_from(["darkroom", "scene.json", "--no-grain", "--no-grading"]);
        let post = args.post_process();
        assert!(!post.grain && !post.grading);
        assert!(post.vignette);
    }

    #[test]
    fn test_log_level_conversion() {
        let args = Args::parse_from(["darkroom", "scene.json", "--log-level", "debug"]);
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }
}
