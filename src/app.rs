use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::KeyCode,
    window::{Window, WindowAttributes},
};

use crate::gfx::{rendering::RenderEngine, scene::Scene};
use crate::ui::{control_panel, UiManager};

/// Held movement keys, polled once per frame
#[derive(Debug, Default, Clone, Copy)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    /// Records a key transition, returns false for unmapped keys
    pub fn set_key(&mut self, code: KeyCode, pressed: bool) -> bool {
        match code {
            KeyCode::KeyW => self.forward = pressed,
            KeyCode::KeyS => self.backward = pressed,
            KeyCode::KeyA => self.left = pressed,
            KeyCode::KeyD => self.right = pressed,
            _ => return false,
        }
        true
    }

    /// Routes a key transition around UI keyboard capture.
    ///
    /// Presses are dropped while the UI owns the keyboard, but releases
    /// always go through, otherwise a key released over the panel would
    /// stay held and the camera would keep flying.
    pub fn apply_key(&mut self, code: KeyCode, pressed: bool, ui_owns_keyboard: bool) -> bool {
        if pressed && ui_owns_keyboard {
            return false;
        }
        self.set_key(code, pressed)
    }
}

/// Interactive scene viewer application
pub struct ViewerApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: Scene,
    input: InputState,
    cursor_position: (f32, f32),
}

impl ViewerApp {
    pub fn new() -> Self {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                ui_manager: None,
                scene: Scene::new(1.0),
                input: InputState::default(),
                cursor_position: (0.0, 0.0),
            },
        }
    }

    /// Runs the event loop until the window closes
    pub fn run(mut self) {
        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .expect("Failed to run event loop");
    }
}

impl Default for ViewerApp {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Ok(window) = event_loop.create_window(
            WindowAttributes::default()
                .with_title("Scene Viewer")
                .with_inner_size(winit::dpi::LogicalSize::new(1280, 720)),
        ) {
            let window_handle = Arc::new(window);
            self.window = Some(window_handle.clone());

            let (width, height) = window_handle.inner_size().into();
            self.scene
                .camera_manager
                .camera
                .resize_projection(width, height);

            let window_clone = window_handle.clone();
            let renderer = pollster::block_on(async move {
                RenderEngine::new(window_clone, width, height).await
            });

            let mut ui_manager = UiManager::new(
                renderer.device(),
                renderer.queue(),
                renderer.surface_format(),
                &window_handle,
            );
            ui_manager.update_display_size(width, height);

            self.ui_manager = Some(ui_manager);
            self.render_engine = Some(renderer);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };
        let Some(window) = self.window.as_ref() else {
            return;
        };

        // UI gets first refusal on every input event.
        let mut ui_captured = false;
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                window_id,
                event: event.clone(),
            };
            ui_captured = ui_manager.handle_input(window, &ui_event);
        }

        // Keyboard input only cares about keyboard capture. The combined
        // capture flag below would swallow a key release while the cursor
        // hovers the panel and leave the movement key stuck.
        if let WindowEvent::KeyboardInput {
            event:
                winit::event::KeyEvent {
                    physical_key: winit::keyboard::PhysicalKey::Code(key_code),
                    state,
                    ..
                },
            ..
        } = &event
        {
            if matches!(key_code, &KeyCode::Escape) {
                event_loop.exit();
                return;
            }
            let ui_owns_keyboard = self
                .ui_manager
                .as_ref()
                .map(|ui| ui.context.io().want_capture_keyboard)
                .unwrap_or(false);
            if self
                .input
                .apply_key(*key_code, state.is_pressed(), ui_owns_keyboard)
            {
                window.request_redraw();
            }
            return;
        }

        if ui_captured {
            window.request_redraw();
            return;
        }

        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_position = (position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button: MouseButton::Left,
                ..
            } => {
                let (width, height) = render_engine.size();
                self.scene.handle_click(
                    self.cursor_position.0,
                    self.cursor_position.1,
                    width as f32,
                    height as f32,
                );
                window.request_redraw();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                render_engine.resize(width, height);
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.scene.tick(
                    self.input.forward,
                    self.input.backward,
                    self.input.left,
                    self.input.right,
                );

                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_logic(window, |ui| control_panel(ui, &mut self.scene));
                    render_engine.prepare(&mut self.scene);

                    let result =
                        render_engine.render(&self.scene, |device, queue, encoder, view| {
                            ui_manager.render_display_only(device, queue, encoder, view);
                        });

                    match result {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            let (width, height) = render_engine.size();
                            render_engine.resize(width, height);
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("out of GPU memory, exiting");
                            event_loop.exit();
                        }
                        Err(err) => log::warn!("dropped frame: {err}"),
                    }
                }
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        // Camera input stops while the pointer is over the panel, except
        // button releases: dropping one would leave a drag latched and the
        // camera orbiting with no button held.
        let is_button_release = matches!(
            event,
            winit::event::DeviceEvent::Button {
                state: ElementState::Released,
                ..
            }
        );
        if !is_button_release {
            if let Some(ui_manager) = self.ui_manager.as_ref() {
                let io = ui_manager.context.io();
                if io.want_capture_mouse || io.want_capture_keyboard {
                    return;
                }
            }
        }

        self.scene.camera_manager.process_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasd_keys_map_to_directions() {
        let mut input = InputState::default();
        assert!(input.set_key(KeyCode::KeyW, true));
        assert!(input.forward);

        assert!(input.set_key(KeyCode::KeyA, true));
        assert!(input.left);

        assert!(input.set_key(KeyCode::KeyW, false));
        assert!(!input.forward);
        assert!(input.left, "releasing one key leaves the others held");
    }

    #[test]
    fn test_release_goes_through_while_ui_owns_keyboard() {
        let mut input = InputState::default();
        assert!(input.apply_key(KeyCode::KeyW, true, false));
        assert!(input.forward);

        // Presses are dropped while the panel has keyboard focus.
        assert!(!input.apply_key(KeyCode::KeyS, true, true));
        assert!(!input.backward);

        // A release still lands, so the key does not stay held.
        assert!(input.apply_key(KeyCode::KeyW, false, true));
        assert!(!input.forward);
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        let mut input = InputState::default();
        assert!(!input.set_key(KeyCode::KeyQ, true));
        assert_eq!(
            format!("{input:?}"),
            format!("{:?}", InputState::default())
        );
    }
}
