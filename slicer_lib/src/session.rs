//! State carried between frames of a viewing session.
//!
//! The master applies device input in [`Session::pre_exchange`]; the
//! resulting volume index and world transform are what a framework would
//! replicate to the slaves.

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use log::{debug, info};
use nalgebra::{vector, Matrix4, Point3, Vector3};

use crate::error::{Result, SlicerError};

/// Button advancing to the next volume
pub const ADVANCE_BUTTON: usize = 0;
/// Button held while probing
pub const PROBE_BUTTON: usize = 1;
/// Button held while the volume is grabbed
pub const GRAB_BUTTON: usize = 2;
/// Joystick deflection ignored around the center
pub const JOYSTICK_DEAD_ZONE: f32 = 0.4;
/// Travel per frame of a deflected joystick, in world units
pub const NAVIGATION_STEP: f32 = 0.09;
pub const INITIAL_FPS: f32 = 20.0;
/// Weight of the newest frame in the frame rate average
pub const FPS_SMOOTHING: f32 = 0.05;

/// Device state sampled once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputFrame {
    pub head: Matrix4<f32>,
    pub wand: Matrix4<f32>,
    /// Forward/back joystick axis, <-1;1>
    pub joystick_y: f32,
    pub buttons: [bool; 3],
}

impl Default for InputFrame {
    fn default() -> Self {
        InputFrame {
            head: Matrix4::identity(),
            wand: Matrix4::identity(),
            joystick_y: 0.0,
            buttons: [false; 3],
        }
    }
}

impl InputFrame {
    pub fn button(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }

    /// Head position, translation part of the head matrix
    pub fn head_position(&self) -> Point3<f32> {
        self.head.transform_point(&Point3::origin())
    }
}

/// Matrix with the translation stripped off
pub fn rotation_part(m: &Matrix4<f32>) -> Matrix4<f32> {
    let mut r = *m;
    for i in 0..3 {
        r[(i, 3)] = 0.0;
        r[(3, i)] = 0.0;
    }
    r[(3, 3)] = 1.0;
    r
}

/// Current volume, advanced once per button press.
///
/// Holding the button does not keep advancing: after a change the selector
/// waits for the button to be released (`ready_to_change`).
#[derive(Debug)]
pub struct VolumeSelector {
    current: Arc<AtomicUsize>,
    count: usize,
    ready_to_change: bool,
}

impl VolumeSelector {
    pub fn new(count: usize) -> Result<VolumeSelector> {
        if count == 0 {
            return Err(SlicerError::InvalidConfig(
                "cannot select from zero volumes".into(),
            ));
        }
        Ok(VolumeSelector {
            current: Arc::new(AtomicUsize::new(0)),
            count,
            ready_to_change: true,
        })
    }

    /// Feed the button state of one frame, returns true if the volume changed
    pub fn trigger(&mut self, pressed: bool) -> bool {
        if !pressed {
            self.ready_to_change = true;
            return false;
        }
        if !self.ready_to_change {
            return false;
        }
        self.ready_to_change = false;
        let next = (self.current() + 1) % self.count;
        self.current.store(next, Ordering::Release);
        true
    }

    pub fn current(&self) -> usize {
        self.current.load(Ordering::Acquire)
    }

    /// Store a replicated index, wrapped into range
    pub fn set_current(&self, index: usize) {
        self.current.store(index % self.count, Ordering::Release);
    }

    /// Handle readers on other threads can poll
    pub fn shared(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.current)
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

/// Probe button transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeEvent {
    Start,
    Probing,
    End,
}

/// Exponentially smoothed frame rate.
#[derive(Debug, Clone, Copy)]
pub struct FrameRate {
    fps: f32,
}

impl Default for FrameRate {
    fn default() -> Self {
        FrameRate { fps: INITIAL_FPS }
    }
}

impl FrameRate {
    /// Account one frame that took `elapsed`, returns the smoothed rate
    pub fn update(&mut self, elapsed: Duration) -> f32 {
        let seconds = elapsed.as_secs_f32();
        if seconds > 0.0 {
            let instant = 1.0 / seconds;
            self.fps = FPS_SMOOTHING * instant + (1.0 - FPS_SMOOTHING) * self.fps;
        }
        self.fps
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

/// Outcome of one master frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUpdate {
    pub volume: usize,
    pub volume_changed: bool,
    pub probe: Option<ProbeEvent>,
    /// Translation to apply to the navigation matrix
    pub navigation: Option<Vector3<f32>>,
    pub world: Matrix4<f32>,
}

/// Everything the frame callbacks keep between frames.
#[derive(Debug)]
pub struct Session {
    is_master: bool,
    selector: VolumeSelector,
    world: Matrix4<f32>,
    grab: Option<Matrix4<f32>>,
    probing: bool,
    frame_rate: FrameRate,
}

impl Session {
    /// Session of the master, the only one reacting to input
    pub fn master(volume_count: usize) -> Result<Session> {
        Session::new(volume_count, true)
    }

    /// Session of a slave, state arrives through [`Session::set_current_volume`]
    /// and [`Session::set_world`]
    pub fn slave(volume_count: usize) -> Result<Session> {
        Session::new(volume_count, false)
    }

    fn new(volume_count: usize, is_master: bool) -> Result<Session> {
        Ok(Session {
            is_master,
            selector: VolumeSelector::new(volume_count)?,
            world: Matrix4::identity(),
            grab: None,
            probing: false,
            frame_rate: FrameRate::default(),
        })
    }

    pub fn is_master(&self) -> bool {
        self.is_master
    }

    pub fn current_volume(&self) -> usize {
        self.selector.current()
    }

    pub fn set_current_volume(&self, index: usize) {
        self.selector.set_current(index);
    }

    /// Reader handle of the current volume index
    pub fn volume_index_handle(&self) -> Arc<AtomicUsize> {
        self.selector.shared()
    }

    /// Transform of the volume, changed by grabbing
    pub fn world(&self) -> &Matrix4<f32> {
        &self.world
    }

    pub fn set_world(&mut self, world: Matrix4<f32>) {
        self.world = world;
    }

    pub fn is_grabbing(&self) -> bool {
        self.grab.is_some()
    }

    /// Apply one frame of input. Slaves ignore input and return `None`.
    pub fn pre_exchange(&mut self, input: &InputFrame) -> Option<FrameUpdate> {
        if !self.is_master {
            return None;
        }

        let volume_changed = self.selector.trigger(input.button(ADVANCE_BUTTON));
        if volume_changed {
            debug!("Switched to volume {}", self.selector.current());
        }

        let wand_rotation = rotation_part(&input.wand);

        let navigation = if input.joystick_y.abs() > JOYSTICK_DEAD_ZONE {
            let step = -NAVIGATION_STEP * input.joystick_y.signum();
            Some(wand_rotation.transform_vector(&vector![0.0, 0.0, step]))
        } else {
            None
        };

        self.update_grab(input.button(GRAB_BUTTON), &wand_rotation);
        let probe = self.update_probe(input.button(PROBE_BUTTON));

        Some(FrameUpdate {
            volume: self.selector.current(),
            volume_changed,
            probe,
            navigation,
            world: self.world,
        })
    }

    fn update_grab(&mut self, pressed: bool, wand_rotation: &Matrix4<f32>) {
        match (pressed, self.grab) {
            (true, None) => {
                // world moves rigidly with the wand from now on
                self.grab = self.world.try_inverse().map(|inv| inv * wand_rotation);
                debug!("Grabbed");
            }
            (true, Some(grab)) => {
                if let Some(inv) = grab.try_inverse() {
                    self.world = wand_rotation * inv;
                }
            }
            (false, Some(_)) => {
                self.grab = None;
                debug!("Released");
            }
            (false, None) => (),
        }
    }

    fn update_probe(&mut self, pressed: bool) -> Option<ProbeEvent> {
        let event = match (pressed, self.probing) {
            (true, false) => ProbeEvent::Start,
            (true, true) => ProbeEvent::Probing,
            (false, true) => ProbeEvent::End,
            (false, false) => return None,
        };
        self.probing = pressed;

        match event {
            ProbeEvent::Start => info!("Probe start"),
            ProbeEvent::Probing => debug!("Probing"),
            ProbeEvent::End => info!("Probe end"),
        }
        Some(event)
    }

    /// Eye position in the volume's frame, input of the slice selection.
    /// `head` is the head position in navigation coordinates.
    pub fn eye_position(&self, head: &Point3<f32>) -> Vector3<f32> {
        let to_volume = self.world.try_inverse().unwrap_or_else(Matrix4::identity);
        to_volume.transform_point(head).coords
    }

    /// Account a finished frame, returns the smoothed frame rate
    pub fn frame_done(&mut self, elapsed: Duration) -> f32 {
        self.frame_rate.update(elapsed)
    }

    pub fn frame_rate(&self) -> f32 {
        self.frame_rate.fps()
    }
}

#[cfg(test)]
mod test {
    use std::f32::consts::FRAC_PI_2;

    use nalgebra::{point, Rotation3};

    use super::*;

    fn buttons(advance: bool, probe: bool, grab: bool) -> InputFrame {
        InputFrame {
            buttons: [advance, probe, grab],
            ..Default::default()
        }
    }

    fn approx(a: &Matrix4<f32>, b: &Matrix4<f32>) -> bool {
        (a - b).iter().all(|v| v.abs() < 1e-5)
    }

    #[test]
    fn held_trigger_advances_once_per_press() {
        let mut selector = VolumeSelector::new(10).unwrap();
        let states = [true, true, true, false, true];
        let changes = states.iter().filter(|&&s| selector.trigger(s)).count();
        assert_eq!(changes, 2);
        assert_eq!(selector.current(), 2);
    }

    #[test]
    fn index_wraps() {
        let mut selector = VolumeSelector::new(3).unwrap();
        for _ in 0..2 {
            selector.trigger(true);
            selector.trigger(false);
        }
        assert_eq!(selector.current(), 2);
        assert!(selector.trigger(true));
        assert_eq!(selector.current(), 0);
    }

    #[test]
    fn replicated_index_is_wrapped() {
        let selector = VolumeSelector::new(4).unwrap();
        selector.set_current(6);
        assert_eq!(selector.current(), 2);
        assert_eq!(selector.shared().load(Ordering::Acquire), 2);
    }

    #[test]
    fn zero_volumes_rejected() {
        assert!(VolumeSelector::new(0).is_err());
        assert!(Session::master(0).is_err());
    }

    #[test]
    fn session_debounce() {
        let mut session = Session::master(10).unwrap();
        assert!(session.is_master());
        let handle = session.volume_index_handle();
        let mut changes = 0;
        for pressed in [true, true, true, false, true] {
            let update = session.pre_exchange(&buttons(pressed, false, false)).unwrap();
            if update.volume_changed {
                changes += 1;
            }
        }
        assert_eq!(changes, 2);
        assert_eq!(handle.load(Ordering::Acquire), 2);
    }

    #[test]
    fn slave_ignores_input() {
        let mut session = Session::slave(10).unwrap();
        assert!(!session.is_master());
        assert!(session.pre_exchange(&buttons(true, true, true)).is_none());
        assert_eq!(session.current_volume(), 0);

        session.set_current_volume(7);
        assert_eq!(session.current_volume(), 7);
    }

    #[test]
    fn probe_transitions() {
        let mut session = Session::master(1).unwrap();
        let events: Vec<_> = [false, true, true, false, false]
            .into_iter()
            .map(|p| session.pre_exchange(&buttons(false, p, false)).unwrap().probe)
            .collect();
        assert_eq!(
            events,
            [
                None,
                Some(ProbeEvent::Start),
                Some(ProbeEvent::Probing),
                Some(ProbeEvent::End),
                None
            ]
        );
    }

    #[test]
    fn grab_follows_wand() {
        let mut session = Session::master(1).unwrap();
        let turn = Rotation3::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2).to_homogeneous();

        // grab with the wand in rest position, world unchanged
        session.pre_exchange(&buttons(false, false, true));
        assert!(session.is_grabbing());
        assert!(approx(session.world(), &Matrix4::identity()));

        // turn the wand while holding, translation of the wand is ignored
        let mut wand = turn;
        wand[(0, 3)] = 5.0;
        let input = InputFrame {
            wand,
            ..buttons(false, false, true)
        };
        let update = session.pre_exchange(&input).unwrap();
        assert!(approx(&update.world, &turn));

        // release keeps the world where it was left
        session.pre_exchange(&buttons(false, false, false));
        assert!(!session.is_grabbing());
        assert!(approx(session.world(), &turn));
    }

    #[test]
    fn joystick_moves_along_wand() {
        let mut session = Session::master(1).unwrap();

        let idle = InputFrame {
            joystick_y: 0.3,
            ..Default::default()
        };
        assert_eq!(session.pre_exchange(&idle).unwrap().navigation, None);

        let forward = InputFrame {
            joystick_y: 0.8,
            ..Default::default()
        };
        let step = session.pre_exchange(&forward).unwrap().navigation.unwrap();
        assert!((step - vector![0.0, 0.0, -NAVIGATION_STEP]).norm() < 1e-6);

        let back = InputFrame {
            joystick_y: -1.0,
            wand: Rotation3::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2).to_homogeneous(),
            ..Default::default()
        };
        let step = session.pre_exchange(&back).unwrap().navigation.unwrap();
        assert!((step - vector![NAVIGATION_STEP, 0.0, 0.0]).norm() < 1e-6);
    }

    #[test]
    fn eye_in_volume_frame() {
        let mut session = Session::master(1).unwrap();
        let head = point![0.0, 0.0, 5.0];
        assert!((session.eye_position(&head) - vector![0.0, 0.0, 5.0]).norm() < 1e-6);

        // volume turned by 90 degrees around y, the viewer now looks along x
        let turn = Rotation3::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2).to_homogeneous();
        session.set_world(turn);
        let eye = session.eye_position(&head);
        assert!((eye - vector![-5.0, 0.0, 0.0]).norm() < 1e-5);
    }

    #[test]
    fn head_position_from_matrix() {
        let input = InputFrame {
            head: Matrix4::new_translation(&vector![1.0, 2.0, 3.0]),
            ..Default::default()
        };
        assert_eq!(input.head_position(), point![1.0, 2.0, 3.0]);
    }

    #[test]
    fn frame_rate_smoothing() {
        let mut rate = FrameRate::default();
        assert_eq!(rate.fps(), INITIAL_FPS);

        // 100 fps frame moves the average by 5%
        let fps = rate.update(Duration::from_millis(10));
        assert!((fps - 24.0).abs() < 1e-3);

        // zero length frames are skipped
        assert_eq!(rate.update(Duration::ZERO), fps);
    }
}
