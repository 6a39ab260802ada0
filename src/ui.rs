use egui::Context;

use crate::controller::{PhysicsSystem, PlayerController};
use crate::model::Player;

/// Build the complete UI and return egui output (wasm path; the native
/// frontend calls the draw functions inside its own egui-winit frame).
pub fn build_ui(
    egui_ctx: &Context,
    player: &Player,
    physics: &mut PhysicsSystem,
    controller: &mut PlayerController,
    canvas_width: u32,
    canvas_height: u32,
    dt: f32,
    now: f64,
    events: Vec<egui::Event>,
) -> egui::FullOutput {
    let mut raw_input = egui::RawInput::default();
    raw_input.time = Some(now / 1000.0);
    raw_input.screen_rect = Some(egui::Rect::from_min_size(
        egui::Pos2::new(0.0, 0.0),
        egui::vec2(canvas_width as f32, canvas_height as f32),
    ));
    raw_input.events = events;

    egui_ctx.run(raw_input, |ctx| {
        draw_debug_window(ctx, player, dt);
        draw_settings_window(ctx, physics, controller, canvas_width);
    })
}

pub fn draw_debug_window(ctx: &Context, player: &Player, dt: f32) {
    egui::Window::new("Debug")
        .default_pos([8.0, 8.0])
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!("FPS: {:.0}", if dt > 0.0 { 1.0 / dt } else { 0.0 }))
                    .small(),
            );
            ui.label(
                egui::RichText::new(format!("Pos: x: {:.0} y: {:.0}", player.pos.x, player.pos.y))
                    .small(),
            );
            ui.label(
                egui::RichText::new(format!("Vel: x: {:.0} y: {:.0}", player.vel.x, player.vel.y))
                    .small(),
            );
            ui.label(
                egui::RichText::new(format!(
                    "Ground: {}",
                    if player.on_ground { "yes" } else { "no" }
                ))
                .small(),
            );
            ui.separator();
            ui.label(egui::RichText::new("Controls:").small());
            ui.label(egui::RichText::new("Left/Right or A/D - Run").small());
            ui.label(egui::RichText::new("Space - Jump").small());
        });
}

pub fn draw_settings_window(
    ctx: &Context,
    physics: &mut PhysicsSystem,
    controller: &mut PlayerController,
    canvas_width: u32,
) {
    egui::Window::new("Settings")
        .default_pos([canvas_width as f32 - 160.0, 8.0])
        .default_size([150.0, 110.0])
        .show(ctx, |ui| {
            ui.label(egui::RichText::new("Gravity").small());
            ui.add(egui::Slider::new(&mut physics.gravity, 200.0..=2000.0).step_by(50.0));

            ui.label(egui::RichText::new("Run speed").small());
            ui.add(egui::Slider::new(&mut controller.run_speed, 40.0..=400.0).step_by(10.0));

            // The slider shows the jump as a positive strength; the stored
            // velocity is negative because y grows downward
            let mut jump = -controller.jump_velocity;
            ui.label(egui::RichText::new("Jump strength").small());
            if ui
                .add(egui::Slider::new(&mut jump, 200.0..=900.0).step_by(25.0))
                .changed()
            {
                controller.jump_velocity = -jump;
            }
        });
}
