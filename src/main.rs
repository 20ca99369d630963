//! Reliability Cube CLI - Render the voxel diagram animation to a GIF.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use reliability_cube::{
    animation::{
        AnimationPlayer, AnimationRecorder, GIF_EXTENSION, detect_external_encoder,
        resolve_output_path,
    },
    compute::FrameRenderer,
    preview::{self, PreviewOutcome},
    schema::{AnimationConfig, SceneConfig},
};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    match detect_external_encoder() {
        Some(path) => log::info!("ffmpeg found at {}", path.display()),
        None => println!("ffmpeg not available; writing GIF with the built-in encoder."),
    }

    let path = prompt_output_path().unwrap_or_else(|e| {
        eprintln!("Error reading filename: {}", e);
        std::process::exit(1);
    });

    let scene = SceneConfig::default();
    let animation = AnimationConfig::default();
    if let Ok(json) = serde_json::to_string(&scene) {
        log::debug!("Scene config: {}", json);
    }

    let renderer = FrameRenderer::new(scene, animation.clone()).unwrap_or_else(|e| {
        eprintln!("Error creating renderer: {}", e);
        std::process::exit(1);
    });

    println!(
        "Rendering {} frames ({}x{}) to {}",
        renderer.frame_count(),
        animation.image_width,
        animation.image_height,
        path.display()
    );
    let start = Instant::now();

    // Render everything before touching the output file.
    let mut frames = Vec::with_capacity(renderer.frame_count());
    for frame in renderer.frames() {
        let frame = frame.unwrap_or_else(|e| {
            eprintln!("Error rendering frame: {}", e);
            std::process::exit(1);
        });
        println!("  Frame {}/{}: marker z={}", frame.index + 1, renderer.frame_count(), frame.z);
        frames.push(frame);
    }

    let mut recorder = AnimationRecorder::create(&path, &animation).unwrap_or_else(|e| {
        eprintln!("Error creating {}: {}", path.display(), e);
        std::process::exit(1);
    });
    for frame in &frames {
        if let Err(e) = recorder.record_frame(frame) {
            eprintln!("Error encoding frame {}: {}", frame.index, e);
            discard_output(&path);
        }
    }
    let stats = recorder.finalize().unwrap_or_else(|e| {
        eprintln!("Error finishing {}: {}", path.display(), e);
        discard_output(&path);
    });

    println!();
    println!("Saved {} ({})", path.display(), stats);
    println!("Time: {:.2}s", start.elapsed().as_secs_f32());

    match AnimationPlayer::open(&path) {
        Ok(player) => println!(
            "Verified: {} frames at {:.1} fps{}",
            player.frame_count(),
            player.frame_rate(),
            if player.loops_forever() { ", looping" } else { "" }
        ),
        Err(e) => {
            eprintln!("Error reading back {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }

    match preview::show(&path) {
        Ok(PreviewOutcome::Opened) => log::info!("Opened preview of {}", path.display()),
        Ok(PreviewOutcome::Skipped) => {}
        Err(e) => log::warn!("Preview unavailable: {}", e),
    }
}

fn prompt_output_path() -> io::Result<PathBuf> {
    print!("Enter the filename (with .{} extension): ", GIF_EXTENSION);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(resolve_output_path(&line))
}

/// Remove a partially written output file and exit with an error status.
fn discard_output(path: &Path) -> ! {
    if let Err(e) = fs::remove_file(path) {
        log::warn!("Could not remove {}: {}", path.display(), e);
    }
    std::process::exit(1);
}
