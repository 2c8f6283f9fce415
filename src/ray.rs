use crate::map::GridMap;
use crate::math::fract;
use glam::{IVec2, Vec2};

/// Where a cast ray met the first wall.
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct WallHit {
    /// ray parameter at the hit, in grid units of the (non-normalized) direction
    pub distance: f32,
    /// fractional position along the struck face, in `[0, 1)`
    pub surface_offset: f32,
}

/// Progress along one axis: the grid index reached and the ray distance it took.
#[derive(Clone, Copy, PartialEq, Debug)]
struct DdaCoord {
    on_grid: i32,
    distance: f32,
}

impl DdaCoord {
    fn advance(&mut self, step: DdaCoord) {
        self.on_grid += step.on_grid;
        self.distance += step.distance;
    }
}

// start and per-cell step along one axis for the given position/direction component
fn init_axis(pos: f32, dir: f32) -> (DdaCoord, DdaCoord) {
    let grid_pos = pos as i32;
    let step = DdaCoord {
        on_grid: if dir < 0. { -1 } else { 1 },
        distance: (1. / dir).abs(),
    };

    // distance to the first cell edge ahead of us
    let edge_offset = if dir < 0. {
        pos - grid_pos as f32
    } else {
        grid_pos as f32 + 1. - pos
    };
    let start = DdaCoord {
        on_grid: grid_pos,
        distance: step.distance * edge_offset,
    };

    (start, step)
}

/// Walk the grid from `position` along `direction` until a wall cell is entered.
///
/// The map must be closed (or treat the outside as wall), otherwise this never
/// returns. A zero direction component is fine: its step distance is infinite
/// so that axis is never advanced.
pub(crate) fn cast(map: &impl GridMap, position: Vec2, direction: Vec2) -> WallHit {
    let (mut x, x_step) = init_axis(position.x, direction.x);
    let (mut y, y_step) = init_axis(position.y, direction.y);

    let mut is_x_step = false;
    while !map.is_wall_cell(IVec2::new(x.on_grid, y.on_grid)) {
        is_x_step = x.distance < y.distance;
        if is_x_step {
            x.advance(x_step);
        } else {
            y.advance(y_step);
        }
    }

    // a negative step enters the wall cell through its far edge
    let far_edge = |step: DdaCoord| if step.on_grid < 0 { 1. } else { 0. };
    let distance = if is_x_step {
        (x.on_grid as f32 - position.x + far_edge(x_step)) / direction.x
    } else {
        (y.on_grid as f32 - position.y + far_edge(y_step)) / direction.y
    };

    let across = if is_x_step {
        position.y + distance * direction.y
    } else {
        position.x + distance * direction.x
    };

    WallHit {
        distance,
        surface_offset: fract(across),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{bordered, GridMap, Map};
    use crate::math::rotate;
    use std::f32::consts::TAU;

    const EPS: f32 = 1e-4;

    #[test]
    fn straight_along_positive_y() {
        let map = bordered(11, 11);
        let hit = cast(&map, Vec2::new(5.5, 5.5), Vec2::new(0., 1.));
        // wall row 10 starts at y = 10
        assert!((hit.distance - 4.5).abs() < EPS);
        assert!((hit.surface_offset - 0.5).abs() < EPS);
    }

    #[test]
    fn straight_along_negative_x() {
        let map = bordered(11, 11);
        let hit = cast(&map, Vec2::new(5.5, 3.25), Vec2::new(-1., 0.));
        // wall column 0 ends at x = 1
        assert!((hit.distance - 4.5).abs() < EPS);
        assert!((hit.surface_offset - 0.25).abs() < EPS);
    }

    #[test]
    fn straight_along_negative_y_and_positive_x() {
        let map = bordered(11, 11);
        let hit = cast(&map, Vec2::new(2.75, 7.5), Vec2::new(0., -1.));
        assert!((hit.distance - 6.5).abs() < EPS);
        assert!((hit.surface_offset - 0.75).abs() < EPS);

        let hit = cast(&map, Vec2::new(2.5, 7.125), Vec2::new(1., 0.));
        assert!((hit.distance - 7.5).abs() < EPS);
        assert!((hit.surface_offset - 0.125).abs() < EPS);
    }

    #[test]
    fn distance_scales_with_direction_length() {
        let map = bordered(11, 11);
        let hit = cast(&map, Vec2::new(5.5, 5.5), Vec2::new(0., 2.));
        assert!((hit.distance - 2.25).abs() < EPS);
    }

    #[test]
    fn diagonal_hits_corner_region() {
        let map = bordered(11, 11);
        let hit = cast(&map, Vec2::new(5.5, 5.5), Vec2::new(1., 1.));
        let end = Vec2::new(5.5, 5.5) + Vec2::new(1., 1.) * hit.distance;
        assert!(end.x >= 10. - EPS || end.y >= 10. - EPS);
        assert!((hit.distance - 4.5).abs() < EPS);
    }

    #[test]
    fn every_direction_terminates_inside_builtin() {
        let map = Map::builtin();
        let starts = [
            Vec2::new(5., 5.),
            Vec2::new(1.5, 1.5),
            Vec2::new(19.9, 18.1),
            Vec2::new(10.3, 9.7),
        ];
        for start in starts {
            assert!(!map.is_wall(start));
            for i in 0..360 {
                let dir = rotate(Vec2::new(1., 0.), TAU * i as f32 / 360.);
                let hit = cast(&map, start, dir);
                assert!(hit.distance > 0., "{start} {dir} -> {hit:?}");
                assert!(
                    (0. ..1.).contains(&hit.surface_offset),
                    "{start} {dir} -> {hit:?}"
                );

                // the hit point lies on a cell edge
                let end = start + dir * hit.distance;
                let on_edge = |v: f32| (v - v.round()).abs() < 1e-3;
                assert!(on_edge(end.x) || on_edge(end.y), "{start} {dir} ends at {end}");
            }
        }
    }

    #[test]
    fn offset_distinguishes_faces() {
        let map = bordered(11, 11);
        let near_left = cast(&map, Vec2::new(5.02, 5.5), Vec2::new(0., 1.));
        let centre = cast(&map, Vec2::new(5.5, 5.5), Vec2::new(0., 1.));
        assert!(near_left.surface_offset < 0.1);
        assert!(centre.surface_offset > 0.1 && centre.surface_offset < 0.9);
    }
}
