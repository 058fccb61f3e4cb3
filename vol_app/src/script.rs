//! Scripted tracker and wand input
//!
//! Stands in for the tracking hardware: the head orbits the volume while the
//! wand buttons and joystick follow a fixed pattern.

use std::f32::consts::TAU;

use nalgebra::{vector, Matrix4, Vector3};
use slicer_lib::session::{InputFrame, ADVANCE_BUTTON, GRAB_BUTTON, PROBE_BUTTON};

/// Frames per orbit of the head
const ORBIT_FRAMES: usize = 90;
const ORBIT_RADIUS: f32 = 5.0;
const EYE_HEIGHT: f32 = 0.5;

/// Navigation offset the session opens with, puts the volume in front of the viewer
pub const START_TRAVEL: Vector3<f32> = vector![0.0, -5.0, 5.0];

/// Repeating button pattern, (period, first frame, last frame exclusive)
const ADVANCE_PATTERN: (usize, usize, usize) = (30, 0, 3);
const PROBE_PATTERN: (usize, usize, usize) = (45, 10, 14);
const GRAB_PATTERN: (usize, usize, usize) = (60, 40, 50);
const JOYSTICK_PATTERN: (usize, usize, usize) = (50, 20, 25);

fn in_pattern(frame: usize, (period, from, to): (usize, usize, usize)) -> bool {
    (from..to).contains(&(frame % period))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedInput;

impl ScriptedInput {
    pub fn head_position(&self, frame: usize) -> Vector3<f32> {
        let angle = TAU * (frame % ORBIT_FRAMES) as f32 / ORBIT_FRAMES as f32;
        vector![
            ORBIT_RADIUS * angle.sin(),
            EYE_HEIGHT,
            ORBIT_RADIUS * angle.cos()
        ]
    }

    pub fn frame(&self, frame: usize) -> InputFrame {
        let head = Matrix4::new_translation(&self.head_position(frame));
        // wand sweeps slowly about the vertical
        let sweep = TAU * frame as f32 / (4 * ORBIT_FRAMES) as f32;
        let wand = Matrix4::from_axis_angle(&Vector3::y_axis(), sweep)
            * Matrix4::new_translation(&vector![0.2, -0.3, -0.5]);

        let mut buttons = [false; 3];
        buttons[ADVANCE_BUTTON] = in_pattern(frame, ADVANCE_PATTERN);
        buttons[PROBE_BUTTON] = in_pattern(frame, PROBE_PATTERN);
        buttons[GRAB_BUTTON] = in_pattern(frame, GRAB_PATTERN);

        let joystick_y = if in_pattern(frame, JOYSTICK_PATTERN) {
            0.8
        } else {
            0.0
        };

        InputFrame {
            head,
            wand,
            joystick_y,
            buttons,
        }
    }
}
