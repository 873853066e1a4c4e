//! Encode and decode walkthrough.
//!
//! Run with: cargo run --example demo

use blurhash::{components, decode, encode};

fn main() {
    // A 4x4 gradient image: red increases with x, green with y,
    // blue is constant. Channels are sRGB values on the 0-255 scale.
    let width = 4usize;
    let height = 4usize;
    let mut pixels = Vec::with_capacity(width * height * 3);

    for y in 0..height {
        for x in 0..width {
            pixels.push((x as f64 / (width - 1) as f64) * 255.0);
            pixels.push((y as f64 / (height - 1) as f64) * 255.0);
            pixels.push(128.0);
        }
    }

    println!("source: {width}x{height} gradient");

    let hash = encode(&pixels, width as u32, height as u32, 4, 3, false)
        .expect("failed to encode");
    println!("hash:   {hash} ({} characters)", hash.len());

    let (cx, cy) = components(&hash).expect("failed to read components");
    println!("grid:   {cx}x{cy} components");

    // Decode at a larger size; the output is the blurred placeholder.
    let out_w = 8u32;
    let out_h = 8u32;
    let decoded = decode(&hash, out_w, out_h, 1.0, false).expect("failed to decode");

    println!("decoded {out_w}x{out_h} ({} samples)", decoded.len());
    let first: Vec<u8> = decoded[..3].iter().map(|&v| v as u8).collect();
    let last: Vec<u8> = decoded[decoded.len() - 3..].iter().map(|&v| v as u8).collect();
    println!("first pixel RGB: {first:?}");
    println!("last pixel RGB:  {last:?}");
}
