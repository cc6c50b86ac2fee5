//! Parallax background layout
//!
//! Each layer scrolls at a fraction of the camera speed and wraps around a
//! strip slightly wider than the view. Only positions are computed here;
//! the renderer owns colors and shapes.

/// Star layer scroll factor
const STAR_FACTOR: f32 = 0.08;
const STAR_COUNT: i32 = 40;

const HILL_FACTOR: f32 = 0.18;
const HILL_SPACING: usize = 120;
const HILL_OVERSCAN: i32 = 400;

const MID_FACTOR: f32 = 0.35;
const MID_SPACING: usize = 90;
const MID_OVERSCAN: i32 = 500;

const MOON_FACTOR: f32 = 0.15;
const MOON_START_X: f32 = 780.0;
const MOON_OVERSCAN: i32 = 200;
pub const MOON_Y: f32 = 90.0;

/// Star positions in screen space
pub fn stars(cam_x: f32, view_w: i32, view_h: i32) -> impl Iterator<Item = (f32, f32)> {
    let w = view_w as f32;
    let offset = (-(cam_x * STAR_FACTOR)).rem_euclid(w);
    let band = (view_h / 2).max(1);
    (0..STAR_COUNT).map(move |i| {
        let x = ((i as f32 * 97.0 + offset) % w).floor();
        let y = ((i * 53) % band) as f32;
        (x, y)
    })
}

/// Left-shifted wrapping offset shared by the hill and silhouette layers
fn wrapped_offset(cam_x: f32, factor: f32, view_w: i32, overscan: i32) -> i32 {
    let strip = (view_w + overscan) as f32;
    (-(cam_x * factor)).rem_euclid(strip) as i32 - overscan / 2
}

/// Hill center X positions in screen space
pub fn hills(cam_x: f32, view_w: i32) -> impl Iterator<Item = i32> {
    let offset = wrapped_offset(cam_x, HILL_FACTOR, view_w, HILL_OVERSCAN);
    (0..view_w + HILL_OVERSCAN).step_by(HILL_SPACING).map(move |k| offset + k)
}

/// Mid-layer silhouette left edges in screen space
pub fn silhouettes(cam_x: f32, view_w: i32) -> impl Iterator<Item = i32> {
    let offset = wrapped_offset(cam_x, MID_FACTOR, view_w, MID_OVERSCAN);
    (0..view_w + MID_OVERSCAN).step_by(MID_SPACING).map(move |k| offset + k)
}

/// Moon center X in screen space
pub fn moon_x(cam_x: f32, view_w: i32) -> i32 {
    let x = (MOON_START_X - cam_x * MOON_FACTOR) as i32;
    x.rem_euclid(view_w + MOON_OVERSCAN) - MOON_OVERSCAN / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars_stay_on_screen() {
        for cam_x in [0.0, 123.4, 5000.0, 1.0e6] {
            for (x, y) in stars(cam_x, 960, 540) {
                assert!((0.0..960.0).contains(&x), "x={} at cam {}", x, cam_x);
                assert!((0.0..270.0).contains(&y));
            }
        }
        assert_eq!(stars(0.0, 960, 540).count(), 40);
    }

    #[test]
    fn test_stars_scroll_slowly() {
        let (x0, _) = stars(0.0, 960, 540).nth(1).unwrap();
        let (x1, _) = stars(100.0, 960, 540).nth(1).unwrap();
        assert_eq!(x0, 97.0);
        assert_eq!(x1, 89.0);
    }

    #[test]
    fn test_hills_cover_view() {
        for cam_x in [0.0, 777.0, 12345.0] {
            let xs: Vec<i32> = hills(cam_x, 960).collect();
            assert_eq!(xs.len(), 12);
            assert!(xs[0] >= -200 && xs[0] < 960 + 200);
            for pair in xs.windows(2) {
                assert_eq!(pair[1] - pair[0], 120);
            }
        }
        assert_eq!(hills(0.0, 960).next(), Some(-200));
    }

    #[test]
    fn test_silhouettes_wrap() {
        assert_eq!(silhouettes(0.0, 960).next(), Some(-250));
        assert_eq!(silhouettes(100.0, 960).next(), Some(1460 - 35 - 250));
        for cam_x in [0.0, 999.0, 54321.0] {
            let first = silhouettes(cam_x, 960).next().unwrap();
            assert!((-250..1210).contains(&first));
            assert_eq!(silhouettes(cam_x, 960).count(), 17);
        }
    }

    #[test]
    fn test_moon() {
        assert_eq!(moon_x(0.0, 960), 680);
        assert_eq!(moon_x(1000.0, 960), 530);
        // Far travel wraps instead of going negative forever
        let x = moon_x(1.0e5, 960);
        assert!((-100..1060).contains(&x));
    }
}
