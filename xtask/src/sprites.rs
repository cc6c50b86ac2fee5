//! Player sprite preparation
//!
//! Takes a character sheet drawn on a white background with three poses side
//! by side (front, side, back), cuts out each pose and writes it as a PNG
//! with a transparent background.

use anyhow::{Context, Result};
use image::{GrayImage, Luma, RgbaImage};
use std::path::{Path, PathBuf};

/// Pixels with every channel at or above this count as paper
const WHITE_THRESHOLD: u8 = 240;
const EDGE_LOW: f32 = 40.0;
const EDGE_HIGH: f32 = 120.0;
/// Extra border kept around the detected subject
const CROP_MARGIN: u32 = 6;

const CROSS: [(i32, i32); 5] = [(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)];
const SQUARE: [(i32, i32); 9] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0), (0, 0), (1, 0),
    (-1, 1), (0, 1), (1, 1),
];

/// Relative inputs are looked up in `input_dir`
pub fn resolve_input(input: &Path, input_dir: &Path) -> PathBuf {
    if input.is_absolute() {
        input.to_path_buf()
    } else {
        input_dir.join(input)
    }
}

/// Cut the sheet into three equal columns; the last one takes any remainder
pub fn split_three_panels(sheet: &RgbaImage) -> [RgbaImage; 3] {
    let (w, h) = sheet.dimensions();
    let pw = w / 3;
    let cut = |x0: u32, x1: u32| image::imageops::crop_imm(sheet, x0, 0, x1 - x0, h).to_image();
    [cut(0, pw), cut(pw, 2 * pw), cut(2 * pw, w)]
}

fn is_on(mask: &GrayImage, x: i32, y: i32) -> Option<bool> {
    let (w, h) = mask.dimensions();
    if x < 0 || y < 0 || x >= w as i32 || y >= h as i32 {
        return None;
    }
    Some(mask.get_pixel(x as u32, y as u32)[0] > 0)
}

/// Binary dilation or erosion; pixels outside the image are ignored
fn morph(mask: &GrayImage, kernel: &[(i32, i32)], dilate: bool) -> GrayImage {
    GrayImage::from_fn(mask.width(), mask.height(), |x, y| {
        let mut hits = kernel
            .iter()
            .filter_map(|&(dx, dy)| is_on(mask, x as i32 + dx, y as i32 + dy));
        let on = if dilate { hits.any(|v| v) } else { hits.all(|v| v) };
        Luma([if on { 255 } else { 0 }])
    })
}

/// Everything that isn't near-white, with small holes closed
pub fn foreground_mask(panel: &RgbaImage) -> GrayImage {
    let mut mask = GrayImage::from_fn(panel.width(), panel.height(), |x, y| {
        let p = panel.get_pixel(x, y);
        let paper = p[0] >= WHITE_THRESHOLD && p[1] >= WHITE_THRESHOLD && p[2] >= WHITE_THRESHOLD;
        Luma([if paper { 0 } else { 255 }])
    });
    for _ in 0..2 {
        mask = morph(&mask, &CROSS, true);
    }
    for _ in 0..2 {
        mask = morph(&mask, &CROSS, false);
    }
    mask
}

/// Canny-style outline detection, thickened by one pixel
///
/// Catches light-colored parts of the subject that the white threshold
/// alone would treat as background.
pub fn edge_mask(panel: &RgbaImage) -> GrayImage {
    let (w, h) = panel.dimensions();
    let (wi, hi) = (w as i32, h as i32);
    let gray: Vec<f32> = panel
        .pixels()
        .map(|p| 0.299 * p[0] as f32 + 0.587 * p[1] as f32 + 0.114 * p[2] as f32)
        .collect();
    let lum = |x: i32, y: i32| {
        let x = x.clamp(0, wi - 1);
        let y = y.clamp(0, hi - 1);
        gray[(y * wi + x) as usize]
    };

    // Sobel gradients, L1 magnitude
    let mut mag = vec![0.0f32; gray.len()];
    let mut dir = vec![0u8; gray.len()];
    for y in 0..hi {
        for x in 0..wi {
            let gx = lum(x + 1, y - 1) + 2.0 * lum(x + 1, y) + lum(x + 1, y + 1)
                - lum(x - 1, y - 1) - 2.0 * lum(x - 1, y) - lum(x - 1, y + 1);
            let gy = lum(x - 1, y + 1) + 2.0 * lum(x, y + 1) + lum(x + 1, y + 1)
                - lum(x - 1, y - 1) - 2.0 * lum(x, y - 1) - lum(x + 1, y - 1);
            let i = (y * wi + x) as usize;
            mag[i] = gx.abs() + gy.abs();
            let angle = gy.atan2(gx).to_degrees().rem_euclid(180.0);
            dir[i] = match angle {
                a if !(22.5..157.5).contains(&a) => 0,
                a if a < 67.5 => 1,
                a if a < 112.5 => 2,
                _ => 3,
            };
        }
    }

    // Non-maximum suppression along the gradient direction
    let m = |x: i32, y: i32| {
        if x < 0 || y < 0 || x >= wi || y >= hi {
            0.0
        } else {
            mag[(y * wi + x) as usize]
        }
    };
    let mut thin = vec![0.0f32; gray.len()];
    for y in 0..hi {
        for x in 0..wi {
            let i = (y * wi + x) as usize;
            let (dx, dy) = match dir[i] {
                0 => (1, 0),
                1 => (1, 1),
                2 => (0, 1),
                _ => (-1, 1),
            };
            let v = mag[i];
            if v >= m(x + dx, y + dy) && v >= m(x - dx, y - dy) {
                thin[i] = v;
            }
        }
    }

    // Hysteresis: keep weak pixels only when connected to a strong one
    let mut edges = GrayImage::new(w, h);
    let mut stack: Vec<(i32, i32)> = Vec::new();
    for y in 0..hi {
        for x in 0..wi {
            if thin[(y * wi + x) as usize] > EDGE_HIGH {
                stack.push((x, y));
            }
        }
    }
    while let Some((x, y)) = stack.pop() {
        if edges.get_pixel(x as u32, y as u32)[0] > 0 {
            continue;
        }
        edges.put_pixel(x as u32, y as u32, Luma([255]));
        for &(dx, dy) in &SQUARE {
            let (nx, ny) = (x + dx, y + dy);
            if nx < 0 || ny < 0 || nx >= wi || ny >= hi {
                continue;
            }
            if thin[(ny * wi + nx) as usize] > EDGE_LOW && edges.get_pixel(nx as u32, ny as u32)[0] == 0 {
                stack.push((nx, ny));
            }
        }
    }

    morph(&edges, &SQUARE, true)
}

/// Pixel-wise OR of two masks of equal size
pub fn combine(a: &GrayImage, b: &GrayImage) -> GrayImage {
    GrayImage::from_fn(a.width(), a.height(), |x, y| {
        Luma([a.get_pixel(x, y)[0].max(b.get_pixel(x, y)[0])])
    })
}

/// Crop region as half-open pixel bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropBox {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

/// Bounds of the largest 8-connected region, grown by `margin` and clamped
pub fn crop_to_subject(mask: &GrayImage, margin: u32) -> Option<CropBox> {
    let (w, h) = mask.dimensions();
    let mut seen = vec![false; (w * h) as usize];
    let mut best: Option<(usize, CropBox)> = None;

    for sy in 0..h {
        for sx in 0..w {
            let start = (sy * w + sx) as usize;
            if seen[start] || mask.get_pixel(sx, sy)[0] == 0 {
                continue;
            }

            seen[start] = true;
            let mut stack = vec![(sx, sy)];
            let mut count = 0usize;
            let mut bb = CropBox { x0: sx, y0: sy, x1: sx + 1, y1: sy + 1 };
            while let Some((x, y)) = stack.pop() {
                count += 1;
                bb.x0 = bb.x0.min(x);
                bb.y0 = bb.y0.min(y);
                bb.x1 = bb.x1.max(x + 1);
                bb.y1 = bb.y1.max(y + 1);
                for &(dx, dy) in &SQUARE {
                    let (nx, ny) = (x as i32 + dx, y as i32 + dy);
                    if is_on(mask, nx, ny) != Some(true) {
                        continue;
                    }
                    let i = (ny as u32 * w + nx as u32) as usize;
                    if !seen[i] {
                        seen[i] = true;
                        stack.push((nx as u32, ny as u32));
                    }
                }
            }

            if best.map_or(true, |(n, _)| count > n) {
                best = Some((count, bb));
            }
        }
    }

    best.map(|(_, bb)| CropBox {
        x0: bb.x0.saturating_sub(margin),
        y0: bb.y0.saturating_sub(margin),
        x1: (bb.x1 + margin).min(w),
        y1: (bb.y1 + margin).min(h),
    })
}

/// Cut the subject out of one panel and write `<name>.png`
///
/// Returns false when the panel has no subject.
pub fn process_panel(panel: &RgbaImage, name: &str, outdir: &Path) -> Result<bool> {
    let mask = combine(&foreground_mask(panel), &edge_mask(panel));
    let Some(bb) = crop_to_subject(&mask, CROP_MARGIN) else {
        println!("Warning: no subject detected in {}", name);
        return Ok(false);
    };

    let (cw, ch) = (bb.x1 - bb.x0, bb.y1 - bb.y0);
    let mut crop = image::imageops::crop_imm(panel, bb.x0, bb.y0, cw, ch).to_image();
    for (x, y, p) in crop.enumerate_pixels_mut() {
        p[3] = mask.get_pixel(bb.x0 + x, bb.y0 + y)[0];
    }

    let out_path = outdir.join(format!("{}.png", name));
    crop.save(&out_path)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;
    println!("{}.png written ({}x{})", name, cw, ch);
    Ok(true)
}

/// Split a sheet into front/side/back sprites
pub fn prep_sprites(input: &Path, outdir: &Path) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input image not found: {}", input.display());
    }
    std::fs::create_dir_all(outdir)
        .with_context(|| format!("Failed to create {}", outdir.display()))?;

    let sheet = image::open(input)
        .with_context(|| format!("Failed to open {}", input.display()))?
        .to_rgba8();
    let [front, side, back] = split_three_panels(&sheet);

    let mut written = 0;
    for (panel, name) in [(&front, "front"), (&back, "back"), (&side, "side")] {
        if process_panel(panel, name, outdir)? {
            written += 1;
        }
    }

    println!("Sprites ready: {} of 3 in {}", written, outdir.display());
    Ok(())
}
