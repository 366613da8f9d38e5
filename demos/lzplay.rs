//! LZP player.

extern crate lzp;
extern crate sdl2;

use std::env;
use std::path::Path;
use std::thread;
use std::time::Duration;
use lzp::{DecodeOptions,FrameSizePolicy,LzpFile};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;

fn main() {
    let filename = match env::args().nth(1) {
        Some(f) => f,
        None => {
            usage();
            return;
        },
    };

    let mut lzp = match LzpFile::open(Path::new(&filename)) {
        Ok(f) => f,
        Err(e) => {
            println!("Error loading {} -- {}", filename, e);
            return;
        },
    };

    // The texture expects whole frames.
    lzp.set_options(DecodeOptions::default().with_frame_size(FrameSizePolicy::Fit));

    let lzp_w = lzp.width();
    let lzp_h = lzp.height();
    if lzp.frame_count() == 0 || lzp_w == 0 || lzp_h == 0 {
        println!("Nothing to play in {}", filename);
        return;
    }

    // Initialise SDL window.
    let sdl = sdl2::init().unwrap();
    let video = sdl.video().unwrap();

    let window
        = video.window("LZP Player", lzp_w, lzp_h)
        .resizable()
        .position_centered()
        .build().unwrap();

    let mut canvas = window.into_canvas().build().unwrap();
    let texture_creator = canvas.texture_creator();
    let mut texture = texture_creator.create_texture_streaming(
            PixelFormatEnum::RGB24, lzp_w, lzp_h).unwrap();
    let mut event_pump = sdl.event_pump().unwrap();

    let w = lzp_w as usize;
    let h = lzp_h as usize;
    let mut rgb = vec![0; 3 * w * h];
    let delay = Duration::from_millis(lzp.frame_duration_msec() as u64);

    'mainloop: loop {
        for n in 0..(lzp.frame_count() as usize) {
            for e in event_pump.poll_iter() {
                match e {
                    Event::Quit {..}
                    | Event::KeyDown { keycode: Some(Keycode::Escape), .. } => {
                        break 'mainloop;
                    },

                    _ => (),
                }
            }

            match lzp.decode_frame(n) {
                Ok(pixels) => {
                    lzp.palette().expand_rgb24(&pixels, &mut rgb);
                    render_to_texture(&mut texture, w, h, &rgb);

                    canvas.clear();
                    let _ = canvas.copy(&texture, None, None);
                    canvas.present();
                },
                Err(e) => {
                    println!("Error decoding frame {} -- {}", n, e);
                },
            }

            thread::sleep(delay);
        }
    }
}

fn usage() {
    println!("Usage: lzplay <LZP file>");
    println!("<ESC> to abort playback.");
}

fn render_to_texture(
        texture: &mut sdl2::render::Texture,
        w: usize, h: usize, rgb: &[u8]) {
    texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
        for y in 0..h {
            let src = &rgb[(3 * w * y)..(3 * w * (y + 1))];
            buffer[(pitch * y)..(pitch * y + 3 * w)].copy_from_slice(src);
        }
    }).unwrap();
}
