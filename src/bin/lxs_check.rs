//! Validates scene documents from the command line.
//!
//! Exit status is non-zero when any document fails to load.

use anyhow::{bail, Context, Result};
use clap::Parser;
use lxs::gfx::scene::RecordingRenderer;
use lxs::{LoaderConfig, SceneApp, TextureProbe};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "lxs-check", about = "Validates lxs scene documents")]
struct Args {
    /// Scene documents to check
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Directory texture files are resolved against (default: each document's directory)
    #[arg(long, value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// Treat unreadable texture files as fatal
    #[arg(long, conflicts_with = "skip_textures")]
    strict_textures: bool,

    /// Do not look at texture files at all
    #[arg(long)]
    skip_textures: bool,

    /// Walk the scene graph once and report every draw call
    #[arg(long)]
    traverse: bool,

    /// Print declaration counts and mesh totals
    #[arg(long)]
    stats: bool,
}

impl Args {
    fn loader_config(&self) -> LoaderConfig {
        let probe = if self.strict_textures {
            TextureProbe::Require
        } else if self.skip_textures {
            TextureProbe::Skip
        } else {
            TextureProbe::Warn
        };

        let config = LoaderConfig::default().with_texture_probe(probe);
        match &self.base_dir {
            Some(dir) => config.with_asset_dir(dir),
            None => config,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let mut failures = 0;

    for file in &args.files {
        let mut app = SceneApp::new(args.loader_config());
        if !app.load_file(file) {
            failures += 1;
            eprintln!(
                "{}: {}",
                file.display(),
                app.last_error().unwrap_or("unknown error")
            );
            continue;
        }

        println!("{}: ok ({} warnings)", file.display(), app.warnings().len());
        for warning in app.warnings() {
            println!("  warning: {warning}");
        }

        let scene = app
            .scene()
            .with_context(|| format!("{} reported success without a scene", file.display()))?;
        if args.stats {
            println!("{}", scene.statistics());
        }

        if args.traverse {
            let mut renderer = RecordingRenderer::new();
            app.init_scene(&mut renderer);
            app.render_frame(&mut renderer);
            for draw in &renderer.draws {
                println!(
                    "  draw {} material={} texture={}",
                    draw.primitive,
                    draw.material,
                    draw.texture.as_deref().unwrap_or("-")
                );
            }
            println!("  {} draw calls", renderer.draws.len());
        }
    }

    if failures > 0 {
        bail!("{failures} of {} documents failed to load", args.files.len());
    }
    Ok(())
}
