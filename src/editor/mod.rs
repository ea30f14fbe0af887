//! The drawing editor - host side of the modal core
//!
//! Owns everything the user draws and everything normal-mode commands act
//! on: the cursor, the movement grid, marks, options and the scene. Normal
//! commands arrive through `Host::perform`, ex commands through the handlers
//! in `commands`.

pub mod commands;
pub mod grid;
pub mod messages;
pub mod scene;

use std::collections::BTreeMap;

use crate::config::Config;
use crate::coords::{CanvasSize, Point, Rgba};
use crate::ex::{CommandError, ExError};
use crate::input::controller::Host;
use crate::input::dispatcher::Action;
use crate::input::keymap::NormalCommand;

use grid::MovementGrid;
use messages::MessageLog;
use scene::Scene;

/// Where the cursor starts on a fresh canvas
pub const START_CURSOR: Point = Point::new(320, 200);

/// Named cursor positions
pub type Marks = BTreeMap<char, Point>;

/// Settable with `:set`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Color for new lines and paths
    pub color: Rgba,
    pub gridcolor: Rgba,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            color: Rgba::BLACK,
            gridcolor: Rgba([0, 0, 255, 50]),
        }
    }
}

#[derive(Debug)]
pub struct Editor {
    cursor: Point,
    grid: MovementGrid,
    marks: Marks,
    pub options: Options,
    scene: Scene,
    pub messages: MessageLog,
    should_quit: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Editor {
    pub fn new(config: &Config) -> Self {
        let grid = MovementGrid::new(config.canvas).with_scale_index(config.grid_scale);
        Self {
            cursor: START_CURSOR.clamp_to(config.canvas),
            grid,
            marks: Marks::new(),
            options: Options {
                color: config.color,
                gridcolor: config.gridcolor,
            },
            scene: Scene::default(),
            messages: MessageLog::new(),
            should_quit: false,
        }
    }

    // ========================================================================
    // Public getters
    // ========================================================================

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn canvas(&self) -> CanvasSize {
        self.grid.size()
    }

    pub fn grid(&self) -> &MovementGrid {
        &self.grid
    }

    pub fn marks(&self) -> &Marks {
        &self.marks
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    // ========================================================================
    // Editing
    // ========================================================================

    pub fn set_cursor(&mut self, p: Point) {
        self.cursor = p.clamp_to(self.canvas());
    }

    pub fn set_mark(&mut self, name: char) {
        self.marks.insert(name, self.cursor);
    }

    /// Look up a mark given as a command argument, which must be exactly
    /// one character
    pub fn mark(&self, name: &str) -> Result<Point, CommandError> {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self
                .marks
                .get(&c)
                .copied()
                .ok_or_else(|| CommandError::UndefinedMark(name.to_string())),
            _ => Err(CommandError::InvalidArgument {
                value: name.to_string(),
                reason: "mark names are a single character".to_string(),
            }),
        }
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }
}

impl Host for Editor {
    fn perform(&mut self, action: Action) {
        let Action {
            command,
            multiplier,
        } = action;

        match command {
            NormalCommand::MoveLeft => self.set_cursor(self.grid.left(self.cursor, multiplier)),
            NormalCommand::MoveRight => self.set_cursor(self.grid.right(self.cursor, multiplier)),
            NormalCommand::MoveUp => self.set_cursor(self.grid.up(self.cursor, multiplier)),
            NormalCommand::MoveDown => self.set_cursor(self.grid.down(self.cursor, multiplier)),
            NormalCommand::MoveOrigin => self.set_cursor(Point::ORIGIN),
            NormalCommand::SetMark(name) => self.set_mark(name),
            NormalCommand::GotoMark(name) => match self.marks.get(&name) {
                Some(p) => self.cursor = *p,
                None => self
                    .messages
                    .error(CommandError::UndefinedMark(name.to_string()).to_string()),
            },
            NormalCommand::StartPath => self.scene.start_path(self.cursor, self.options.color),
            NormalCommand::AppendPath => {
                if !self.scene.append_path(self.cursor) {
                    self.messages.error("no path started");
                }
            }
            NormalCommand::GridScaleUp => {
                for _ in 0..multiplier.min(grid::SCALES.len() as u32) {
                    self.grid.scale_up();
                }
            }
            NormalCommand::GridScaleDown => {
                for _ in 0..multiplier.min(grid::SCALES.len() as u32) {
                    self.grid.scale_down();
                }
            }
            NormalCommand::ToggleGrid => self.grid.toggle_visibility(),
            // Mode changes never reach the host
            NormalCommand::EnterEx => {
                tracing::trace!("ignoring EnterEx in host");
            }
        }
    }

    fn report_error(&mut self, error: &ExError) {
        self.messages.error(error.to_string());
    }
}
