//! Minimal windowed viewer for the raycaster.
//!
//! ```bash
//! cargo run --release -- --width 320 --height 240 --scale 3
//! ```
//!
//! Arrows/WASD move, Alt strafes, Shift is the weapon-switch modifier,
//! Ctrl fires, Space uses, R resets the session.  This binary is the
//! "presenter" and "input collaborator" rolled into one: it maps keys to
//! input flags, pumps the session and blits the emitted points.

use std::time::{Duration, Instant};

use clap::Parser;
use minifb::{Key, Window, WindowOptions};

use tilecast::{InputFlags, Session};

#[derive(Parser, Debug)]
#[command(about = "Wolfenstein-style software raycaster viewer")]
struct Args {
    /// Internal render width in pixels.
    #[arg(long, default_value_t = 320)]
    width: usize,

    /// Internal render height in pixels.
    #[arg(long, default_value_t = 240)]
    height: usize,

    /// Nearest-neighbor upscale factor for the window.
    #[arg(long, default_value_t = 3)]
    scale: usize,
}

fn collect_input(win: &Window) -> InputFlags {
    let mut input = InputFlags::empty();
    if win.is_key_down(Key::Up) || win.is_key_down(Key::W) {
        input |= InputFlags::UP;
    }
    if win.is_key_down(Key::Down) || win.is_key_down(Key::S) {
        input |= InputFlags::DOWN;
    }
    if win.is_key_down(Key::Left) || win.is_key_down(Key::A) {
        input |= InputFlags::LEFT;
    }
    if win.is_key_down(Key::Right) || win.is_key_down(Key::D) {
        input |= InputFlags::RIGHT;
    }
    if win.is_key_down(Key::LeftAlt) || win.is_key_down(Key::RightAlt) {
        input |= InputFlags::STRAFE;
    }
    if win.is_key_down(Key::LeftShift) || win.is_key_down(Key::RightShift) {
        input |= InputFlags::SWITCH;
    }
    if win.is_key_down(Key::LeftCtrl) || win.is_key_down(Key::RightCtrl) {
        input |= InputFlags::FIRE;
    }
    if win.is_key_down(Key::Space) {
        input |= InputFlags::USE;
    }
    input
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut session = Session::demo(args.width, args.height, args.scale);
    let (out_w, out_h) = (args.width * args.scale, args.height * args.scale);

    let mut win = Window::new("tilecast", out_w, out_h, WindowOptions::default())?;
    win.set_target_fps(60);

    let mut buffer = vec![0u32; out_w * out_h];

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();

        if win.is_key_down(Key::R) {
            session.reset();
        }
        session.set_input(collect_input(&win));
        session.update();

        let frame = session.render();
        buffer.fill(0xFF_000000);
        for p in frame.points() {
            buffer[p.y as usize * out_w + p.x as usize] = p.color;
        }

        acc_time += t0.elapsed();
        acc_frames += 1;
        win.update_with_buffer(&buffer, out_w, out_h)?;

        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            println!("avg frame: {:.2} ms  ({:.1} FPS)", avg_ms, 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
