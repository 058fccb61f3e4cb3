use std::{sync::Arc, thread::JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use log::{debug, warn};
use nalgebra::Vector3;
use parking_lot::{Mutex, RwLock};
use slicer_lib::volumetric::VolumeStore;

use crate::compositor::Compositor;

/// Messages to renderer
///
/// Messages queue up and one is read after frame is done
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMessage {
    /// Composite one frame for the current view
    StartRendering,
    /// Shut down, thread will get ready to be joined
    ShutDown,
}

/// What the next frame shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    /// Eye position in volume space
    pub eye: Vector3<f32>,
    pub volume: usize,
}

impl Default for View {
    fn default() -> Self {
        View {
            eye: Vector3::z() * 5.0,
            volume: 0,
        }
    }
}

/// Summary of one composited frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub view: View,
    pub slices_drawn: usize,
}

/// Composites the planned slices of the shared view into the shared framebuffer
pub struct SliceRenderer {
    store: Arc<VolumeStore>,
    compositor: Compositor,
    shared_buffer: Arc<Mutex<Vec<u8>>>,
    view: Arc<RwLock<View>>,
}

impl SliceRenderer {
    pub fn new(store: Arc<VolumeStore>, view: Arc<RwLock<View>>) -> SliceRenderer {
        let compositor = Compositor::new(store.layout());
        let shared_buffer = Arc::new(Mutex::new(vec![0; compositor.buffer_len()]));
        SliceRenderer {
            store,
            compositor,
            shared_buffer,
            view,
        }
    }

    pub fn get_shared_buffer(&self) -> Arc<Mutex<Vec<u8>>> {
        self.shared_buffer.clone()
    }

    pub fn get_view(&self) -> Arc<RwLock<View>> {
        self.view.clone()
    }

    /// Draw the current view once
    pub fn render_frame(&self) -> FrameInfo {
        let view = *self.view.read();
        let mut buffer = self.shared_buffer.lock();
        self.compositor.clear(&mut buffer);

        let slices_drawn = match self.store.frame_plan(view.volume, &view.eye) {
            Some(plan) => {
                debug!("Volume {} along {} {:?}", plan.volume, plan.axis, plan.order);
                for placed in &plan.slices {
                    self.compositor.blend(&mut buffer, &placed.image);
                }
                plan.slice_count()
            }
            None => {
                warn!("No slices for volume {}", view.volume);
                0
            }
        };

        FrameInfo { view, slices_drawn }
    }

    /// Spawn renderer thread
    ///
    /// Renderer waits for messages, does _not_ start rendering.
    pub fn start(
        self,
        communication: (Sender<FrameInfo>, Receiver<RenderMessage>),
    ) -> JoinHandle<()> {
        let (frame_sender, messages) = communication;
        std::thread::spawn(move || {
            // Master loop
            while let Ok(msg) = messages.recv() {
                match msg {
                    RenderMessage::StartRendering => (),
                    RenderMessage::ShutDown => break,
                }

                let info = self.render_frame();

                // Send result
                if frame_sender.send(info).is_err() {
                    break;
                }
            }
            debug!("Renderer finished");
        })
    }
}

/// Communicating with renderer thread
pub struct RendererFront {
    handle: Option<JoinHandle<()>>,
    buffer: Arc<Mutex<Vec<u8>>>,
    view: Arc<RwLock<View>>,
    sender: Sender<RenderMessage>,
    receiver: Receiver<FrameInfo>,
}

impl RendererFront {
    /// Start `renderer` in its own thread
    pub fn start(renderer: SliceRenderer) -> RendererFront {
        let (sender, messages) = crossbeam_channel::bounded(100); // main -> renderer
        let (frame_sender, receiver) = crossbeam_channel::bounded(100); // renderer -> main

        let buffer = renderer.get_shared_buffer();
        let view = renderer.get_view();
        let handle = renderer.start((frame_sender, messages));

        RendererFront {
            handle: Some(handle),
            buffer,
            view,
            sender,
            receiver,
        }
    }

    pub fn get_buffer_handle(&self) -> &Arc<Mutex<Vec<u8>>> {
        &self.buffer
    }

    pub fn set_view(&self, view: View) {
        *self.view.write() = view;
    }

    /// Render one frame and wait for it
    pub fn render(&self) -> Option<FrameInfo> {
        self.sender.send(RenderMessage::StartRendering).ok()?;
        self.receiver.recv().ok()
    }

    /// Stop the thread and join it
    pub fn finish(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.sender.send(RenderMessage::ShutDown);
            if handle.join().is_err() {
                warn!("Renderer thread panicked");
            }
        }
    }
}

impl Drop for RendererFront {
    fn drop(&mut self) {
        self.finish();
    }
}
