//! Tumblebox - Physics Playground
//!
//! Run with: `cargo run --bin playground`
//!
//! Controls:
//! - WASD: Push the marble and the vehicle
//! - Space: Launch both upward
//! - 1: Spawn a random metal sphere
//! - 2: Spawn a random wooden box
//! - R: Reset spawned objects
//! - Mouse left-drag: Orbit the camera
//! - Scroll: Zoom
//! - ESC: Exit

use std::path::Path;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use tumblebox_engine::audio::SoundBank;
use tumblebox_engine::camera::{OrbitConfig, OrbitController, Projection};
use tumblebox_engine::input;
use tumblebox_engine::playground::{advance_frame, FrameClock, PlaygroundConfig, PlaygroundContext};
use tumblebox_engine::render::{GpuContextConfig, RenderState};

/// Translate a winit key into the engine's platform-agnostic key code.
fn translate_key(key: KeyCode) -> input::KeyCode {
    match key {
        KeyCode::KeyW => input::KeyCode::W,
        KeyCode::KeyA => input::KeyCode::A,
        KeyCode::KeyS => input::KeyCode::S,
        KeyCode::KeyD => input::KeyCode::D,
        KeyCode::Space => input::KeyCode::Space,
        KeyCode::Digit1 => input::KeyCode::Digit1,
        KeyCode::Digit2 => input::KeyCode::Digit2,
        KeyCode::KeyR => input::KeyCode::R,
        KeyCode::Escape => input::KeyCode::Escape,
        _ => input::KeyCode::Unknown,
    }
}

struct PlaygroundApp {
    window: Option<Arc<Window>>,
    render: Option<RenderState>,
    ctx: PlaygroundContext,
    sounds: SoundBank,
    orbit: OrbitController,
    projection: Projection,
    clock: FrameClock,
    time: f32,
    left_mouse_pressed: bool,
    cursor_pos: Option<(f64, f64)>,
}

impl PlaygroundApp {
    fn new(config: PlaygroundConfig, sounds: SoundBank) -> Self {
        let orbit = OrbitController::looking_from(
            config.camera.eye,
            config.camera.target,
            OrbitConfig::default(),
        );
        Self {
            window: None,
            render: None,
            ctx: PlaygroundContext::new(config),
            sounds,
            orbit,
            projection: Projection::default(),
            clock: FrameClock::new(),
            time: 0.0,
            left_mouse_pressed: false,
            cursor_pos: None,
        }
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.clock.delta();
        self.time += dt;

        advance_frame(&mut self.ctx, dt, &self.sounds);
        self.orbit.update(dt);

        let Some(render) = self.render.as_mut() else {
            return;
        };
        let view_proj = self.projection.matrix() * self.orbit.view_matrix();
        render.update_camera(view_proj, self.orbit.eye_position(), self.time);

        match render.render(&self.ctx.scene) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = render.gpu.dimensions();
                render.resize(width, height);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                eprintln!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => eprintln!("Surface error: {e:?}"),
        }
    }
}

impl ApplicationHandler for PlaygroundApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let attrs = WindowAttributes::default()
                .with_title("Tumblebox - Physics Playground")
                .with_inner_size(PhysicalSize::new(1280, 720));
            let window = Arc::new(event_loop.create_window(attrs).unwrap());
            let size = window.inner_size();
            self.projection.set_viewport(size.width, size.height);
            self.render = Some(RenderState::new(
                Arc::clone(&window),
                GpuContextConfig::default(),
            ));
            self.window = Some(window);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if key == KeyCode::Escape && event.state == ElementState::Pressed {
                        event_loop.exit();
                        return;
                    }
                    if event.state == ElementState::Pressed {
                        self.ctx.handle_key(translate_key(key));
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.left_mouse_pressed = state == ElementState::Pressed;
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let pos = (position.x, position.y);
                if self.left_mouse_pressed {
                    if let Some((last_x, last_y)) = self.cursor_pos {
                        self.orbit.handle_drag(
                            (pos.0 - last_x) as f32,
                            (pos.1 - last_y) as f32,
                        );
                    }
                }
                self.cursor_pos = Some(pos);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
                self.orbit.handle_scroll(lines);
            }
            WindowEvent::Resized(size) => {
                self.projection.set_viewport(size.width, size.height);
                if let Some(render) = self.render.as_mut() {
                    render.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    println!("===========================================");
    println!("   Tumblebox - Physics Playground");
    println!("===========================================");
    println!();
    println!("Controls: WASD Push, Space Launch, 1 Sphere, 2 Box, R Reset, ESC Exit");
    println!("Camera: Left-drag to orbit, scroll to zoom");
    println!();

    let config = PlaygroundConfig::load_or_default(Path::new("tumblebox.json"));
    let sounds = match SoundBank::load(Path::new("assets/sounds"), config.audio) {
        Ok(bank) => bank,
        Err(e) => {
            eprintln!("Sound disabled: {e}");
            SoundBank::disabled()
        }
    };

    println!(
        "Gravity {:?}, fixed step {:.4}s",
        config.physics.gravity, config.physics.fixed_timestep
    );

    let event_loop = EventLoop::new().unwrap();
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = PlaygroundApp::new(config, sounds);
    event_loop.run_app(&mut app).unwrap();
}
