// What you SEE:
// • The Scream, hidden behind a black canvas, slowly revealed by thousands of
//   translucent dots drifting through the sky, water, foliage and boardwalk.
// • Each dot eases toward the colour of the painting underneath it, fades in,
//   fades out, and reappears elsewhere in its region.
// • The screamer figure is drawn on top, solid.
// • Resize the window to refit everything. ESC quits.

mod assets;
mod config;
mod draw;
mod error;
mod field;
mod locator;
mod particle;
mod region;
mod render;
mod scene;
mod silhouette;
mod types;

use std::time::{Duration, Instant};

use clap::Parser;
use log::{debug, info};

use assets::Assets;
use config::{Args, WINDOW_TITLE};
use draw::Drawer;
use error::Error;
use region::default_tuning;
use scene::Scene;
use types::FrameBuffer;

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    /* --- Assets + scene ---
       Visual: nothing yet; particles are spawned at their first positions. */
    let assets = Assets::load(&args.assets, args.locator)?;
    let mut scene = Scene::new(assets, args.height, args.seed, &default_tuning(args.density));
    let canvas = scene.canvas();
    for field in scene.fields() {
        info!("{:>9}: {} particles", field.region().name(), field.particles().len());
    }

    /* --- Window + reusable screen buffer --- */
    let mut drawer =
        Drawer::new(WINDOW_TITLE, canvas.width as usize, canvas.height as usize, args.fps)?;
    let mut screen = FrameBuffer::new(canvas.width as usize, canvas.height as usize);

    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Resizes are handled between ticks, never during one. */
        let (_, window_h) = drawer.size();
        if window_h > 0 && window_h as u32 != scene.canvas().height {
            let canvas = scene.resize(window_h as u32);
            screen = FrameBuffer::new(canvas.width as usize, canvas.height as usize);
            info!("window resized: canvas now {}x{}", canvas.width, canvas.height);
        }

        /* 2) One frame: clear, particles, screamer. */
        scene.tick(&mut screen);

        /* 3) Present (minifb also paces us to the target FPS here). */
        drawer.present(&screen)?;

        /* 4) FPS report once per second */
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            debug!(
                "FPS: {:.1} (frame {}, locator misses {})",
                frames_this_second as f32 / secs,
                scene.frame(),
                scene.locator_misses()
            );
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}
