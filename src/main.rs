use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{error, info, warn};

use facet::{
    config::Config,
    loader::load_model,
    mesh::Mesh,
    output::save_frame,
    render::Renderer,
    scene::Scene,
    transform::transform_mesh,
};

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.debug_level.into());

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(model) = args.model {
        config.model = Some(model);
    }
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(width) = args.width {
        config.image.width = width;
    }
    if let Some(height) = args.height {
        config.image.height = height;
    }
    if let Some(format) = args.format {
        config.image.format = format.into();
    }

    let camera = config.camera().context("invalid camera")?;

    let template: Option<Mesh> = match &config.model {
        Some(path) => {
            let model =
                load_model(path).with_context(|| format!("loading {}", path.display()))?;
            Some(model.into_mesh()?)
        }
        None => {
            warn!("No model given, rendering the extra primitives only");
            None
        }
    };

    let renderer = Renderer::new().sky(config.sky());
    let extras = config.objects();
    let variants = config.variants();

    let mut failures = 0;
    for variant in variants.iter() {
        let mut scene = Scene::new(extras.clone());
        if let Some(mesh) = &template {
            scene.add(transform_mesh(mesh, &variant.matrix()));
        }

        info!("Rendering variant '{}'", variant.name);
        let frame = renderer.render(&scene, &camera);

        let path = config.output_path(variant);
        if let Err(e) = save_frame(&frame, &path) {
            error!("Variant '{}' failed: {}", variant.name, e);
            failures += 1;
        }
    }

    if failures == variants.len() {
        bail!("every variant failed to render");
    }
    if failures > 0 {
        warn!("{} of {} variants failed", failures, variants.len());
    }
    Ok(())
}
