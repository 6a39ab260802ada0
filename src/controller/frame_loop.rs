use std::cell::RefCell;
use std::rc::Rc;

use web_sys::Window;
use wgpu::Queue;

use crate::controller::{InputProcessor, InputState, PhysicsSystem, PlayerController};
use crate::model::{Camera, Level, Player};
use crate::ui;
use crate::view::render::{RenderState, TransformUniform};

/// Main game loop state and update logic (wasm)
pub struct FrameLoopContext {
    pub camera: Camera,
    pub level: Rc<Level>,
    pub player: Rc<RefCell<Player>>,
    pub input_state: Rc<RefCell<InputState>>,
    pub input_processor: InputProcessor,
    pub player_controller: PlayerController,
    pub physics_system: PhysicsSystem,
    pub player_buf: wgpu::Buffer,
    pub egui_ctx: egui::Context,
    pub egui_events: Rc<RefCell<Vec<egui::Event>>>,
    pub last_time: Rc<RefCell<f64>>,
}

impl FrameLoopContext {
    /// Run the controller, physics, and UI build for one frame.
    pub fn update(&mut self, queue: &Queue, window: &Window, render_state: &mut RenderState) {
        // Time step
        let now = window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now);
        let mut last = self.last_time.borrow_mut();
        let dt = ((now - *last) / 1000.0).clamp(0.0, 0.1) as f32;
        *last = now;
        drop(last);

        // Controller first, then the physics step, borrowing the player
        // for the span of the frame
        {
            let input = self.input_state.borrow();
            let mut player = self.player.borrow_mut();
            self.player_controller
                .update(&mut player, &input, &self.input_processor);
            self.physics_system.update(&mut player, &self.level, dt);
        }

        // Upload this frame's player transform
        let uniform = TransformUniform {
            transform: self.player.borrow().transform().to_cols_array_2d(),
        };
        queue.write_buffer(&self.player_buf, 0, bytemuck::bytes_of(&uniform));

        // Build the UI for draw_frame
        let events = std::mem::take(&mut *self.egui_events.borrow_mut());
        let mut full_output = ui::build_ui(
            &self.egui_ctx,
            &self.player.borrow(),
            &mut self.physics_system,
            &mut self.player_controller,
            self.camera.width as u32,
            self.camera.height as u32,
            dt,
            now,
            events,
        );
        let shapes = std::mem::take(&mut full_output.shapes);
        render_state.egui_primitives =
            Some(self.egui_ctx.tessellate(shapes, render_state.egui_dpr));
        render_state.egui_textures_delta = Some(full_output.textures_delta);

        // Edge-detection rollover, after all gameplay reads this frame
        self.input_state.borrow_mut().end_frame();
    }
}
