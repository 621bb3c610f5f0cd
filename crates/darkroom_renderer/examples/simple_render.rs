//! Simple ray tracer example.
//!
//! Renders a row of spheres in front of a mirror ball with a shallow depth
//! of field and saves to PPM format.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::Arc;

use darkroom_renderer::{
    render, Camera, Color, DVec3, DirectionalLight, ImageBuffer, Light, Material, Object, Plane,
    PointLight, PostProcess, RenderConfig, Scene, Sphere,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() -> std::io::Result<()> {
    println!("Darkroom - Simple Example");
    println!("=========================");

    let start = std::time::Instant::now();
    let scene = build_scene();
    println!("Scene built in {:?}", start.elapsed());

    let config = RenderConfig {
        width: 640,
        height: 360,
        samples_per_pixel: 24,
        ..Default::default()
    };

    println!(
        "Rendering {}x{} @ {} spp...",
        config.width, config.height, config.samples_per_pixel
    );

    let start = std::time::Instant::now();
    let mut image = render(&scene, &config);
    PostProcess::default().apply(&mut image);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    save_ppm(&image, filename)?;
    println!("Saved to {}", filename);
    Ok(())
}

fn build_scene() -> Scene {
    let camera = Camera::look_at(
        DVec3::new(0.0, 1.5, 8.0),
        DVec3::new(0.0, -0.15, -1.0),
        DVec3::Y,
        1.0,
        1.6,
        0.9,
    )
    .with_lens(0.12, 8.0);

    let mut objects = Vec::new();

    // Ground
    objects.push(Object::new(
        Plane::new(DVec3::new(0.0, -1.0, 0.0), DVec3::Y),
        Arc::new(Material::matte(Color::splat(0.45)).with_mirror(Color::splat(0.1))),
    ));

    // Mirror ball, in focus
    objects.push(Object::new(
        Sphere::new(DVec3::ZERO, 1.0),
        Arc::new(Material::mirror().with_mirror(Color::splat(0.85))),
    ));

    // Small colored spheres receding into the distance
    let mut rng = StdRng::seed_from_u64(7);
    for k in 0..8 {
        let z = 3.0 - 2.0 * k as f64;
        let x = if k % 2 == 0 { -2.2 } else { 2.2 };
        let color = Color::new(rng.gen(), rng.gen(), rng.gen()) * 0.8 + Color::splat(0.1);
        let material = Material::new(
            color * 0.3,
            color,
            Color::splat(0.4),
            Color::ZERO,
            rng.gen_range(10.0..100.0),
        );
        objects.push(Object::new(
            Sphere::new(DVec3::new(x, -0.5, z), 0.5),
            Arc::new(material),
        ));
    }

    let lights: Vec<Box<dyn Light>> = vec![
        Box::new(DirectionalLight::new(DVec3::new(-1.0, -2.0, -1.0), Color::splat(0.7))),
        Box::new(PointLight::new(DVec3::new(3.0, 4.0, 4.0), Color::splat(0.4))),
    ];

    println!("Created {} objects", objects.len());
    Scene::new(camera, objects, lights)
}

fn save_ppm(image: &ImageBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for rgb in image.to_rgb8().chunks_exact(3) {
        writeln!(writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
    }

    writer.flush()
}
