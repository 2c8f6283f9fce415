use glam::{IVec2, Vec2};
use std::f32::consts::PI;

/// rotate `v` counter-clockwise by `radians`
pub(crate) fn rotate(v: Vec2, radians: f32) -> Vec2 {
    Vec2::from_angle(radians).rotate(v)
}

/// snap a position onto the grid, truncating toward zero
pub(crate) fn to_grid(v: Vec2) -> IVec2 {
    IVec2::new(v.x as i32, v.y as i32)
}

/// angle of `v` in `[0, 2PI]`, measured from the negative x axis
pub(crate) fn heading(v: Vec2) -> f32 {
    PI + v.y.atan2(v.x)
}

/// fractional part relative to the floor (always in `[0, 1)`)
pub(crate) fn fract(x: f32) -> f32 {
    x - x.floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn rotate_quarter_turn() {
        let v = rotate(Vec2::new(1., 0.), FRAC_PI_2);
        assert!((v - Vec2::new(0., 1.)).length() < 1e-6);
    }

    #[test]
    fn rotate_keeps_length() {
        let v = Vec2::new(0.8, 0.);
        assert!((rotate(v, 1.234).length() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn to_grid_truncates() {
        assert_eq!(to_grid(Vec2::new(5.9, 0.2)), IVec2::new(5, 0));
        assert_eq!(to_grid(Vec2::new(-0.5, 3.0)), IVec2::new(0, 3));
    }

    #[test]
    fn heading_axes() {
        assert!((heading(Vec2::new(-1., 0.)) - 2. * PI).abs() < 1e-6);
        assert!((heading(Vec2::new(1., 0.)) - PI).abs() < 1e-6);
        assert!((heading(Vec2::new(0., 1.)) - 1.5 * PI).abs() < 1e-6);
        assert!((heading(Vec2::new(0., -1.)) - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn fract_of_negative() {
        assert!((fract(-0.25) - 0.75).abs() < 1e-6);
        assert_eq!(fract(3.0), 0.0);
    }
}
