//! Wireterm demo: spinning wireframe boxes in the terminal
//!
//! Loads a RON scene (or the built-in one), then per frame:
//! draw -> render dirty cells -> clear to the background.

use std::io;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use wireterm::rasterizer::AnsiTerminal;
use wireterm::world::{load_scene, save_scene, Scene};
use wireterm::VERSION;

#[derive(Parser, Debug)]
#[command(name = "wireterm", version, about = "Wireframe 3D in the terminal")]
struct Args {
    /// Scene file (RON); the built-in scene is used when omitted
    scene: Option<PathBuf>,

    /// Override the scene's frame count
    #[arg(long)]
    frames: Option<usize>,

    /// Save the last frame as a PNG
    #[arg(long)]
    png: Option<PathBuf>,

    /// Write the active scene as RON and exit
    #[arg(long)]
    dump_scene: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut scene = match &args.scene {
        Some(path) => load_scene(path)?,
        None => Scene::default(),
    };
    if let Some(frames) = args.frames {
        scene.frames = frames;
    }

    if let Some(path) = &args.dump_scene {
        save_scene(&scene, path)?;
        log::info!("wrote scene to {}", path.display());
        return Ok(());
    }

    log::info!(
        "wireterm v{}: {}x{} canvas, {} boxes, {} frames",
        VERSION,
        scene.width,
        scene.height,
        scene.cubes.len(),
        scene.frames
    );

    let mut canvas = scene.canvas();
    let stdout = io::stdout();
    let mut term = AnsiTerminal::new(stdout.lock());
    term.clear_screen()?;

    for frame in 0..scene.frames {
        scene.draw_frame(&mut canvas, frame)?;
        let stats = canvas.render(&mut term)?;
        log::debug!("frame {}: {} cells, {} border", frame, stats.cells, stats.border);

        if frame + 1 == scene.frames {
            if let Some(path) = &args.png {
                canvas.save_png(path)?;
                log::info!("saved last frame to {}", path.display());
            }
        }

        canvas.clear_background();
        thread::sleep(Duration::from_millis(scene.frame_ms));
    }

    Ok(())
}
