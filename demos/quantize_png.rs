//! Quantize an image to K colors by MST clustering and write it back out.
//!
//! Usage:
//!   cargo run --example quantize_png --release -- <input> <k> [output.png]
//!
//! Set `RUST_LOG=debug` to see per-stage statistics.

use std::time::Instant;

use mstquant::{MstStrategy, QuantizeConfig};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let usage = "usage: quantize_png <input> <k> [output.png] [--dense]";
    let input = args.get(1).expect(usage);
    let k: u32 = args.get(2).and_then(|s| s.parse().ok()).expect(usage);
    let output = args
        .get(3)
        .filter(|s| !s.starts_with("--"))
        .cloned()
        .unwrap_or_else(|| format!("{}_k{k}.png", input.trim_end_matches(".png").trim_end_matches(".jpg")));
    let strategy = if args.iter().any(|a| a == "--dense") {
        MstStrategy::Dense
    } else {
        MstStrategy::PriorityQueue
    };

    let img = image::open(input).unwrap().to_rgb8();
    let (w, h) = (img.width() as usize, img.height() as usize);
    let pixels: Vec<rgb::RGB8> = img
        .pixels()
        .map(|p| rgb::RGB8 { r: p.0[0], g: p.0[1], b: p.0[2] })
        .collect();

    let config = QuantizeConfig::new().clusters(k).mst_strategy(strategy);
    let start = Instant::now();
    let result = mstquant::quantize(&pixels, w, h, &config).unwrap();
    let elapsed = start.elapsed();

    let raw: Vec<u8> = result.pixels().iter().flat_map(|p| [p.r, p.g, p.b]).collect();
    image::RgbImage::from_raw(w as u32, h as u32, raw)
        .expect("buffer matches dimensions")
        .save(&output)
        .unwrap();

    eprintln!(
        "{input} ({w}x{h}) → {output}: {} distinct colors, {} clusters, MST weight {:.3}, {:.1} ms",
        result.distinct_colors(),
        result.cluster_count(),
        result.mst_weight(),
        elapsed.as_secs_f64() * 1000.0
    );
}
