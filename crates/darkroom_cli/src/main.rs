use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use darkroom_renderer::render;
use darkroom_scene::{load_scene, write_image};

mod cli;
mod logger;

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_logger(args.log_level.into());

    let start = Instant::now();

    let loaded = load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;
    let mut scene = loaded.scene;

    if args.aperture.is_some() || args.focal_distance.is_some() {
        let aperture = args.aperture.unwrap_or(scene.camera.aperture);
        let focal_distance = args.focal_distance.unwrap_or(scene.camera.focal_distance);
        anyhow::ensure!(aperture >= 0.0, "aperture must not be negative");
        anyhow::ensure!(focal_distance > 0.0, "focal distance must be positive");
        scene.camera = scene.camera.clone().with_lens(aperture, focal_distance);
        log::info!("Lens: aperture {}, focal distance {}", aperture, focal_distance);
    }

    let config = args.render_config(loaded.render.as_ref());
    anyhow::ensure!(
        config.width > 0 && config.height > 0,
        "image size must be positive, got {}x{}",
        config.width,
        config.height
    );

    let mut image = render(&scene, &config);
    args.post_process().apply(&mut image);

    let rgb = image.to_rgb8();
    for path in args.output_paths() {
        write_image(&path, &rgb, image.width, image.height)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    log::info!("Done in {:.2?}", start.elapsed());
    Ok(())
}
