use anyhow::Context;
use glam::Vec2;
use rand::prelude::*;
use sphere_core::{ImageSource, InputEvent, Release, RenderNode, Sphere, ViewportConfig};

// Headless driver: builds a sphere, replays a scripted gesture session at a
// fixed frame rate and logs what the presentation layer would receive.

const FRAME_MS: f64 = 1000.0 / 60.0;
const DEFAULT_IMAGE_COUNT: usize = 24;
const DEFAULT_SECONDS: f64 = 8.0;
const FLICK_EVERY_FRAMES: u64 = 90;
const FLICK_SAMPLES: u32 = 4;
const SESSION_SEED: u64 = 42;

fn parse_args() -> anyhow::Result<(usize, f64)> {
    let mut args = std::env::args().skip(1);
    let count = match args.next() {
        Some(a) => a
            .parse::<i64>()
            .with_context(|| format!("image count `{a}` is not an integer"))
            .map(sphere_core::count_from_signed)?,
        None => DEFAULT_IMAGE_COUNT,
    };
    let seconds = match args.next() {
        Some(a) => a
            .parse::<f64>()
            .with_context(|| format!("duration `{a}` is not a number"))?,
        None => DEFAULT_SECONDS,
    };
    Ok((count, seconds.max(0.0)))
}

fn demo_images(count: usize) -> Vec<ImageSource> {
    (0..count)
        .map(|i| ImageSource::new(format!("photo-{i:03}"), format!("gallery/{i:03}.jpg")))
        .collect()
}

/// Queue a short drag with a random direction, spread over a few samples.
fn queue_flick(sphere: &mut Sphere, rng: &mut StdRng, now_ms: f64) {
    let center = sphere.config().center();
    let dir = Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-0.4..0.4));
    let step = dir * rng.gen_range(8.0..30.0);

    sphere.push_event(InputEvent::DragStart {
        position: center,
        time_ms: now_ms,
    });
    for k in 1..=FLICK_SAMPLES {
        sphere.push_event(InputEvent::DragMove {
            position: center + step * k as f32,
            time_ms: now_ms + k as f64 * 8.0,
        });
    }
    sphere.push_event(InputEvent::DragEnd);
}

fn front(frame: &[RenderNode]) -> Option<&RenderNode> {
    frame.last()
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let (count, seconds) = parse_args()?;
    let config = ViewportConfig {
        auto_rotate: true,
        ..ViewportConfig::default()
    };
    let mut sphere = Sphere::new(demo_images(count), config).context("building sphere")?;
    let mut rng = StdRng::seed_from_u64(SESSION_SEED);

    let total_frames = (seconds * 1000.0 / FRAME_MS).round() as u64;
    log::info!("[session] {count} images, {total_frames} frames");

    for frame_no in 0..total_frames {
        let now_ms = frame_no as f64 * FRAME_MS;
        if frame_no > 0 && frame_no % FLICK_EVERY_FRAMES == 0 {
            queue_flick(&mut sphere, &mut rng, now_ms);
        }

        let frame = sphere.tick(FRAME_MS);
        let front_id = front(frame).map(|n| n.id.clone());

        if let Some(release) = sphere.take_release() {
            log::info!("[session] frame {frame_no}: {release:?}");
        }
        if frame_no % 60 == 0 {
            log::info!(
                "[session] t={:.1}s mode={:?} speed={:.3} rad/s front={}",
                now_ms / 1000.0,
                sphere.mode(),
                sphere.rotation().angular_velocity().length(),
                front_id.as_deref().unwrap_or("-")
            );
        }
    }

    // Tap the front-most image the way a host would before opening it.
    if let Some(target) = front(sphere.frame()).map(|n| n.screen_position) {
        let end_ms = total_frames as f64 * FRAME_MS;
        sphere.drag_start(target, end_ms);
        if let Release::Click { position } = sphere.drag_end() {
            let picked = sphere.node_at(position).map(|n| n.id.to_string());
            log::info!("[session] tap at {position:?} picks {picked:?}");
        }
    }

    sphere.destroy();
    Ok(())
}
