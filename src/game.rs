use crate::frame::Surface;
use crate::input::Command;
use crate::map::GridMap;
use crate::math::{heading, rotate, to_grid};
use crate::ray;
use crate::render::draw_column;
use glam::Vec2;
use std::f32::consts::TAU;
use std::ops::ControlFlow;

const RUN_SPEED: f32 = 0.5;
const TURN_SPEED: f32 = 0.1;

// arrows for the map overlay, counter-clockwise starting at "facing -x"
const MARKERS: [&str; 8] = [
    "\u{25c0}", "\u{25e3}", "\u{25bc}", "\u{25e2}", "\u{25b6}", "\u{25e5}", "\u{25b2}", "\u{25e4}",
];

/// Position plus two view vectors. `right` is perpendicular to `forward` and
/// its length sets the width of the field of view.
#[derive(Clone, Copy, PartialEq, Debug)]
pub(crate) struct Viewer {
    pos: Vec2,
    forward: Vec2,
    right: Vec2,
}

impl Default for Viewer {
    fn default() -> Self {
        Self::at(Vec2::new(5., 5.))
    }
}

impl Viewer {
    /// viewer at `pos` looking along +y
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            forward: Vec2::new(0., 1.),
            right: Vec2::new(0.8, 0.),
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Ray direction through `screen_x` on an imaginary screen one unit ahead,
    /// 0 being its left edge and 1 its right edge. Only the centre is unit length.
    pub fn line_of_sight(&self, screen_x: f32) -> Vec2 {
        self.forward + self.right * (2. * screen_x - 1.)
    }

    /// positive turns left
    pub fn turn(&mut self, factor: f32) {
        self.forward = rotate(self.forward, factor * TURN_SPEED);
        self.right = rotate(self.right, factor * TURN_SPEED);
    }

    pub fn walk(&mut self, map: &impl GridMap, factor: f32) -> bool {
        self.step(map, self.forward * factor * RUN_SPEED)
    }

    /// positive strafes right
    pub fn strafe(&mut self, map: &impl GridMap, factor: f32) -> bool {
        self.step(map, self.right * factor * RUN_SPEED)
    }

    // no sliding: the whole step is taken or none of it
    fn step(&mut self, map: &impl GridMap, step: Vec2) -> bool {
        let candidate = self.pos + step;
        if map.is_wall(candidate) {
            log::trace!("blocked move from {} to {}", self.pos, candidate);
            return false;
        }

        self.pos = candidate;
        true
    }

    /// overlay arrow for the current facing, one per 45 degree sector
    pub fn marker(&self) -> &'static str {
        let turns = heading(self.forward) / TAU;
        let sector = (turns * MARKERS.len() as f32).round() as usize;
        MARKERS[sector % MARKERS.len()]
    }
}

pub(crate) struct Game<M> {
    map: M,
    viewer: Viewer,
    pub smoothing: bool,
    pub show_map: bool,
}

impl<M: GridMap> Game<M> {
    pub fn new(map: M, viewer: Viewer) -> Self {
        Self {
            map,
            viewer,
            smoothing: true,
            show_map: false,
        }
    }

    /// Carry out `command`. Breaks when the player asked to quit.
    pub fn apply(&mut self, command: Command) -> ControlFlow<()> {
        log::debug!("command {command:?}");

        match command {
            Command::TurnLeft => self.viewer.turn(1.),
            Command::TurnRight => self.viewer.turn(-1.),
            Command::WalkForward => {
                self.viewer.walk(&self.map, 1.);
            }
            Command::WalkBackward => {
                self.viewer.walk(&self.map, -1.);
            }
            Command::StrafeRight => {
                self.viewer.strafe(&self.map, 1.);
            }
            Command::StrafeLeft => {
                self.viewer.strafe(&self.map, -1.);
            }
            Command::ToggleSmoothing => self.smoothing = !self.smoothing,
            Command::ToggleMap => self.show_map = !self.show_map,
            Command::Quit => return ControlFlow::Break(()),
        }

        ControlFlow::Continue(())
    }

    /// Draw the scene and, if enabled, the map overlay.
    pub fn render(&self, surface: &mut impl Surface) {
        self.draw_scene(surface);
        if self.show_map {
            self.draw_map(surface);
        }
    }

    /// one ray and one column per screen column
    fn draw_scene(&self, surface: &mut impl Surface) {
        let (width, height) = surface.size();

        for column in 0..width {
            let screen_x = if width > 1 {
                column as f32 / (width - 1) as f32
            } else {
                0.5
            };
            let direction = self.viewer.line_of_sight(screen_x);
            let hit = ray::cast(&self.map, self.viewer.pos, direction);
            surface.apply(&draw_column(column, height, hit, self.smoothing));
        }
    }

    // north (+y) is drawn at the top
    fn draw_map(&self, surface: &mut impl Surface) {
        let rows = self.map.height();
        for y in 0..rows {
            let Ok(row) = u16::try_from(rows - y - 1) else {
                continue;
            };
            surface.draw_text(0, row, &self.map.row_text(y));
        }

        let cell = to_grid(self.viewer.pos);
        let (Ok(column), Ok(row)) = (
            u16::try_from(cell.x),
            u16::try_from(rows as i32 - cell.y - 1),
        ) else {
            return;
        };
        surface.draw_glyph(column, row, self.viewer.marker(), false);
    }
}
