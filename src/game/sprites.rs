//! Player sprite loading
//!
//! Loads the front, back and side images, scales them to a common height
//! and uploads them as textures. A missing or broken image is replaced by a
//! placeholder silhouette so the game still starts.

use std::fmt;
use image::{imageops::FilterType, Rgba, RgbaImage};
use macroquad::logging::{info, warn};
use macroquad::prelude::*;
use crate::config::{SideFacing, SpriteSettings};
use super::player::Facing;

#[derive(Debug)]
pub enum SpriteError {
    /// The file could not be read
    Read { path: String, message: String },
    /// The bytes are not a decodable image
    Decode(image::ImageError),
}

impl fmt::Display for SpriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpriteError::Read { path, message } => write!(f, "failed to read {}: {}", path, message),
            SpriteError::Decode(e) => write!(f, "failed to decode sprite: {}", e),
        }
    }
}

impl std::error::Error for SpriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpriteError::Decode(e) => Some(e),
            SpriteError::Read { .. } => None,
        }
    }
}

impl From<image::ImageError> for SpriteError {
    fn from(e: image::ImageError) -> Self {
        SpriteError::Decode(e)
    }
}

/// Size after scaling to `target_h`, keeping aspect; each side at least 1
pub fn scaled_size(width: u32, height: u32, target_h: u32) -> (u32, u32) {
    let scale = target_h as f32 / height.max(1) as f32;
    let w = ((width as f32 * scale) as u32).max(1);
    let h = ((height as f32 * scale) as u32).max(1);
    (w, h)
}

/// Decode image bytes and scale them to `target_h`
pub fn decode_scaled(bytes: &[u8], target_h: u32) -> Result<RgbaImage, SpriteError> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    let (w, h) = scaled_size(img.width(), img.height(), target_h);
    Ok(image::imageops::resize(&img, w, h, FilterType::Triangle))
}

/// Stand-in figure: a round head over a rounded body
pub fn placeholder(target_h: u32) -> RgbaImage {
    let h = target_h.max(4);
    let w = (h / 2).max(2);
    let fill = Rgba([200, 200, 220, 255]);
    let clear = Rgba([0, 0, 0, 0]);

    let cx = w as f32 / 2.0;
    let head_r = w as f32 * 0.35;
    let head_cy = head_r + 1.0;
    let body_top = head_cy + head_r;

    RgbaImage::from_fn(w, h, |x, y| {
        let px = x as f32 + 0.5;
        let py = y as f32 + 0.5;
        let in_head = (px - cx).powi(2) + (py - head_cy).powi(2) <= head_r * head_r;
        let in_body = py >= body_top && (px - cx).abs() <= cx - 1.0;
        if in_head || in_body { fill } else { clear }
    })
}

/// Player hitbox (w, h) derived from the side sprite size
pub fn hitbox_for(side_w: u32, side_h: u32, settings: &SpriteSettings) -> (i32, i32) {
    let w = (side_w as f32 * settings.hitbox_w_ratio) as i32;
    let h = (side_h as f32 * settings.hitbox_h_ratio) as i32;
    (w.max(1), h.max(1))
}

/// Whether the side image must be mirrored to show `facing`
pub fn side_flip(facing: Facing, side_faces: SideFacing) -> bool {
    match (facing, side_faces) {
        (Facing::Left, SideFacing::Right) | (Facing::Right, SideFacing::Left) => true,
        _ => false,
    }
}

async fn load_scaled(path: &str, target_h: u32) -> Result<RgbaImage, SpriteError> {
    let bytes = load_file(path).await.map_err(|e| SpriteError::Read {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    decode_scaled(&bytes, target_h)
}

fn to_texture(img: &RgbaImage) -> Texture2D {
    let tex = Texture2D::from_rgba8(img.width() as u16, img.height() as u16, img.as_raw());
    tex.set_filter(FilterMode::Linear);
    tex
}

pub struct PlayerSprites {
    front: Texture2D,
    back: Texture2D,
    side: Texture2D,
    side_faces: SideFacing,
    /// Player hitbox (w, h)
    pub hitbox: (i32, i32),
}

impl PlayerSprites {
    pub async fn load(settings: &SpriteSettings) -> Self {
        let target_h = settings.target_height;
        let mut images = Vec::with_capacity(3);
        for name in ["front", "back", "side"] {
            let path = format!("{}/{}.png", settings.dir, name);
            let img = match load_scaled(&path, target_h).await {
                Ok(img) => {
                    info!("Loaded sprite {} ({}x{})", path, img.width(), img.height());
                    img
                }
                Err(e) => {
                    warn!("{}, using placeholder", e);
                    placeholder(target_h)
                }
            };
            images.push(img);
        }

        let side = &images[2];
        let hitbox = hitbox_for(side.width(), side.height(), settings);

        Self {
            front: to_texture(&images[0]),
            back: to_texture(&images[1]),
            side: to_texture(side),
            side_faces: settings.side_faces,
            hitbox,
        }
    }

    /// Texture to draw for a facing, and whether to mirror it
    pub fn for_facing(&self, facing: Facing) -> (&Texture2D, bool) {
        match facing {
            Facing::Front => (&self.front, false),
            Facing::Back => (&self.back, false),
            Facing::Left | Facing::Right => (&self.side, side_flip(facing, self.side_faces)),
        }
    }
}
