use serde::{Deserialize, Serialize};

use crate::world::{Vec2, World};

/// Furthest the striker can be pulled back from where the drag started
pub const MAX_DRAG_DISTANCE: f64 = 150.0;

/// Launch force grows with the pull distance at this rate...
pub const FORCE_PER_UNIT: f64 = 0.1;

/// ...up to this cap
pub const MAX_FORCE: f64 = 15.0;

/// How close to the striker a press has to land to pick it up
pub const GRAB_RADIUS: f64 = 40.0;

/// How the player moves the striker
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InputMode {
    /// pull the striker back and release it like a slingshot
    #[default]
    Drag,
    /// the striker sticks to the mouse pointer
    Follow,
}

impl InputMode {
    pub fn toggled(self) -> Self {
        match self {
            InputMode::Drag => InputMode::Follow,
            InputMode::Follow => InputMode::Drag,
        }
    }
}

/// Pointer activity in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Drag(Vec2),
    Up(Vec2),
    Moved(Vec2),
}

/// Limit a drag point to a circle around `origin`. The striker can only be
/// pulled back, away from the bell, so the point never rises above `origin`.
pub fn constrain_drag(origin: Vec2, target: Vec2) -> Vec2 {
    let mut point = origin + (target - origin).clamp_length(MAX_DRAG_DISTANCE);

    if point.y < origin.y {
        point.y = origin.y;
    }

    point
}

/// Velocity given to the striker when a drag from `origin` is released at
/// `released_at`. It points back towards the origin and scales with the
/// square of the pull until the force cap kicks in.
pub fn launch_velocity(origin: Vec2, released_at: Vec2) -> Vec2 {
    let pull = origin - released_at;
    let force = (pull.length() * FORCE_PER_UNIT).min(MAX_FORCE);

    pull * force
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub origin: Vec2,
}

/// Turns pointer events into striker moves for the active input mode
#[derive(Debug, Clone, Default)]
pub struct InputController {
    mode: InputMode,
    drag: Option<DragState>,
}

impl InputController {
    pub fn new(mode: InputMode) -> Self {
        Self { mode, drag: None }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn drag(&self) -> Option<DragState> {
        self.drag
    }

    /// Switch strategy, letting go of the striker if it was held
    pub fn set_mode(&mut self, mode: InputMode, world: &mut World) {
        if self.mode == mode {
            return;
        }

        self.mode = mode;
        self.drag = None;
        world.launch_striker(Vec2::ZERO);
        tracing::info!(%mode, "input mode changed");
    }

    pub fn handle(&mut self, event: PointerEvent, world: &mut World) {
        match self.mode {
            InputMode::Drag => self.handle_drag(event, world),
            InputMode::Follow => Self::handle_follow(event, world),
        }
    }

    fn handle_drag(&mut self, event: PointerEvent, world: &mut World) {
        match event {
            PointerEvent::Down(at) => {
                if (at - world.striker.pos).length() <= GRAB_RADIUS {
                    self.drag = Some(DragState {
                        origin: world.striker.pos,
                    });
                    world.pin_striker();
                }
            }
            PointerEvent::Drag(at) => {
                if let Some(drag) = self.drag {
                    world.place_striker(constrain_drag(drag.origin, at));
                }
            }
            PointerEvent::Up(_) => {
                if let Some(drag) = self.drag.take() {
                    let velocity = launch_velocity(drag.origin, world.striker.pos);
                    tracing::debug!(vx = velocity.x, vy = velocity.y, "striker launched");
                    world.launch_striker(velocity);
                }
            }
            PointerEvent::Moved(_) => {}
        }
    }

    fn handle_follow(event: PointerEvent, world: &mut World) {
        match event {
            PointerEvent::Moved(at) | PointerEvent::Drag(at) | PointerEvent::Down(at) => {
                world.pin_striker();
                world.place_striker(at);
            }
            PointerEvent::Up(_) => {}
        }
    }
}
