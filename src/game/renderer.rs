//! Frame rendering
//!
//! Draws one frame of the game with macroquad's immediate-mode shapes,
//! back to front: sky and parallax layers, platforms, enemies, the player
//! and the status line.

use macroquad::prelude::*;
use crate::world::Rect;
use super::camera::Camera;
use super::parallax;
use super::runtime::GameState;
use super::sprites::PlayerSprites;

const SKY: Color = rgb(18, 18, 26);
const SKY_UPPER: Color = rgb(20, 20, 30);
const STAR: Color = rgb(180, 180, 200);
const HILL: Color = rgb(12, 12, 18);
const SILHOUETTE: Color = rgb(14, 14, 22);
const MOON: Color = rgb(240, 240, 255);

const GROUND: Color = rgb(35, 45, 35);
const LEDGE: Color = rgb(55, 75, 55);
const PLATFORM_BORDER: Color = rgb(20, 25, 20);

const ENEMY: Color = rgb(110, 30, 30);
const ENEMY_BORDER: Color = rgb(20, 10, 10);
const ENEMY_EYE: Color = rgb(240, 240, 240);

const SHADOW: Color = Color::new(0.0, 0.0, 0.0, 90.0 / 255.0);
const HUD_TEXT: Color = rgb(230, 230, 230);

const HILL_RADIUS: f32 = 160.0;
const MOON_RADIUS: f32 = 26.0;
/// Player blink half-period while invulnerable (ms)
const BLINK_MS: f64 = 80.0;

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
}

pub fn draw_frame(game: &GameState, sprites: &PlayerSprites) {
    let cam = &game.camera;
    draw_parallax(cam.x, cam.view_w, cam.view_h);

    for platform in &game.level.platforms {
        if !cam.is_visible(platform) {
            continue;
        }
        let fill = if game.level.is_ground(platform) { GROUND } else { LEDGE };
        draw_box(cam, platform, fill, PLATFORM_BORDER);
    }

    for enemy in game.enemies.iter().filter(|e| e.alive) {
        let r = enemy.rect();
        if !cam.is_visible(&r) {
            continue;
        }
        draw_box(cam, &r, ENEMY, ENEMY_BORDER);
        let (sx, sy) = cam.to_screen(&r);
        let cx = sx + (r.center_x() - r.x) as f32;
        draw_circle(cx - 5.0, sy + 10.0, 2.0, ENEMY_EYE);
        draw_circle(cx + 5.0, sy + 10.0, 2.0, ENEMY_EYE);
    }

    draw_player(game, sprites);

    draw_text(&game.hud_line(), 10.0, 26.0, 22.0, HUD_TEXT);
}

fn draw_parallax(cam_x: f32, view_w: i32, view_h: i32) {
    let w = view_w as f32;
    let h = view_h as f32;
    let horizon = (view_h / 2) as f32;

    clear_background(SKY);
    draw_rectangle(0.0, 0.0, w, horizon, SKY_UPPER);

    for (x, y) in parallax::stars(cam_x, view_w, view_h) {
        draw_rectangle(x, y, 1.0, 1.0, STAR);
    }
    for x in parallax::hills(cam_x, view_w) {
        draw_circle(x as f32, horizon + 120.0, HILL_RADIUS, HILL);
    }
    for x in parallax::silhouettes(cam_x, view_w) {
        draw_rectangle(x as f32, horizon + 110.0, 40.0, 220.0_f32.min(h), SILHOUETTE);
    }
    draw_circle(parallax::moon_x(cam_x, view_w) as f32, parallax::MOON_Y, MOON_RADIUS, MOON);
}

/// Filled rect with a 2px border, in world coordinates
fn draw_box(cam: &Camera, r: &Rect, fill: Color, border: Color) {
    let (sx, sy) = cam.to_screen(r);
    let (w, h) = (r.w as f32, r.h as f32);
    draw_rectangle(sx, sy, w, h, fill);
    draw_rectangle_lines(sx, sy, w, h, 2.0, border);
}

fn draw_player(game: &GameState, sprites: &PlayerSprites) {
    let player = &game.player;
    if player.is_invulnerable() && ((get_time() * 1000.0 / BLINK_MS) as i64) % 2 == 0 {
        return;
    }

    let (tex, flip_x) = sprites.for_facing(player.facing);
    let (spr_w, spr_h) = (tex.width(), tex.height());
    let sx = player.body.x - game.camera.x;
    let sy = player.body.y - game.camera.y;

    let shadow_w = spr_w * 0.65;
    draw_ellipse(sx, sy, shadow_w / 2.0, 5.0, 0.0, SHADOW);

    draw_texture_ex(
        tex,
        sx - spr_w / 2.0,
        sy - spr_h,
        WHITE,
        DrawTextureParams {
            flip_x,
            ..Default::default()
        },
    );
}
