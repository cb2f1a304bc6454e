use glam::Vec2;
use spacefight_common::EntityId;
use spacefight_engine::{Behavior, Engine, Widget};

use crate::Scoreboard;

const CURSOR_RADIUS: f32 = 15.0;

/// Crosshair ring, pointer cursor, FPS and score readouts.
#[derive(Debug, Clone)]
pub struct Hud {
    score: Scoreboard,
}

impl Hud {
    pub fn new(score: Scoreboard) -> Self {
        Self { score }
    }
}

fn fps_text(dt: f32) -> String {
    if dt > 0.0 {
        format!("FPS: {}", (1.0 / dt).round() as u32)
    } else {
        "FPS: --".to_string()
    }
}

impl Behavior for Hud {
    fn update(&mut self, _me: EntityId, engine: &mut Engine) {
        let viewport = engine.viewport();
        let pointer = engine.input().pointer();
        let dt = engine.dt();

        let overlay = engine.overlay_mut();
        // Ring diameter is a fifth of the viewport height.
        overlay.set(
            "crosshair",
            Widget::Ring {
                center: viewport.center(),
                radius: viewport.height as f32 * 0.1,
            },
        );
        if let Some(center) = pointer {
            overlay.set(
                "cursor",
                Widget::Ring {
                    center,
                    radius: CURSOR_RADIUS,
                },
            );
        }
        overlay.set(
            "fps",
            Widget::Label {
                position: Vec2::new(10.0, 0.0),
                text: fps_text(dt),
            },
        );
        overlay.set(
            "score",
            Widget::Label {
                position: Vec2::new(10.0, 30.0),
                text: format!("Score: {}", self.score.get()),
            },
        );
    }
}
