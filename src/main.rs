use std::sync::Arc;
use std::time::Instant;

use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

// Import from the library crate
use hopper::{logging, model, ui, utils, view};

use hopper::controller::{
    InputEvent, InputProcessor, InputState, PhysicsSystem, PlayerController,
};
use model::{player::PLAYER_COLOR, Camera, Level, Player};
use view::render::{self, RenderState, TransformUniform};
use view::GpuContext;

struct App {
    // Core GPU resources
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    window: Arc<Window>,

    // Rendering state
    render_state: RenderState,
    player_buf: wgpu::Buffer,

    // egui
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,

    // Game state
    level: Level,
    player: Player,
    input_state: InputState,
    input_processor: InputProcessor,
    player_controller: PlayerController,
    physics_system: PhysicsSystem,

    // Frame timing
    last_frame_time: Instant,
    last_dt: f32,
}

impl App {
    async fn new(window: Arc<Window>) -> Self {
        let size = window.inner_size();

        let gpu = GpuContext::new_native(window.clone(), size.width, size.height).await;
        let device = gpu.device.clone();
        let queue = gpu.queue.clone();
        let config = gpu.config.clone();

        // World and game state
        let level = Level::prototype();
        let player = Player::spawn(level.spawn);
        let camera = Camera::new(level.width, level.height);

        // Static camera: written once
        let camera_buf = render::create_camera_buffer(&device, &camera);
        let sprite_bgl = render::create_sprite_bind_group_layout(&device);

        let level_buf = render::create_transform_buffer(&device, glam::Mat4::IDENTITY);
        let player_buf = render::create_transform_buffer(&device, player.transform());

        let level_bind_group =
            render::create_sprite_bind_group(&device, &sprite_bgl, &camera_buf, &level_buf);
        let player_bind_group =
            render::create_sprite_bind_group(&device, &sprite_bgl, &camera_buf, &player_buf);

        let pipeline = render::create_sprite_pipeline(&device, config.format, &sprite_bgl);

        // Placeholder sprites until there are art assets
        let level_mesh = utils::create_level_mesh(&level).upload(&device);
        let player_mesh = utils::create_sprite_quad(player.size, PLAYER_COLOR).upload(&device);

        // Initialize egui
        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &device,
            config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let render_state = RenderState {
            format: gpu.format,
            alpha_mode: config.alpha_mode,
            width: config.width,
            height: config.height,
            pipeline,
            level_mesh,
            level_bind_group,
            player_mesh,
            player_bind_group,
            egui_renderer,
            egui_primitives: None,
            egui_textures_delta: None,
            egui_dpr: 1.0,
        };

        Self {
            surface: gpu.surface,
            device,
            queue,
            config,
            size,
            window,
            render_state,
            player_buf,
            egui_state,
            egui_ctx,
            level,
            player,
            input_state: InputState::new(),
            input_processor: InputProcessor::default(),
            player_controller: PlayerController::new(),
            physics_system: PhysicsSystem::new(),
            last_frame_time: Instant::now(),
            last_dt: 0.0,
        }
    }

    fn input(&mut self, event: &WindowEvent) -> bool {
        // First let egui process the event
        let egui_captured = self
            .egui_state
            .on_window_event(self.window.as_ref(), event)
            .consumed;
        if egui_captured {
            return true;
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state,
                        physical_key,
                        ..
                    },
                ..
            } => {
                if let PhysicalKey::Code(code) = physical_key {
                    if let Some(key) = key_name(*code) {
                        let event = match state {
                            ElementState::Pressed => InputEvent::KeyDown(key.to_string()),
                            ElementState::Released => InputEvent::KeyUp(key.to_string()),
                        };
                        self.input_state.process_event(&event);
                    }
                }
                true
            }
            WindowEvent::Focused(false) => {
                self.input_state.process_event(&InputEvent::FocusLost);
                true
            }
            _ => false,
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);

            self.render_state.width = new_size.width;
            self.render_state.height = new_size.height;
        }
    }

    fn update(&mut self, dt: f32) {
        self.last_dt = dt;

        // Controller first, then the physics step
        self.player_controller
            .update(&mut self.player, &self.input_state, &self.input_processor);
        self.physics_system.update(&mut self.player, &self.level, dt);

        // Upload this frame's player transform
        let uniform = TransformUniform {
            transform: self.player.transform().to_cols_array_2d(),
        };
        self.queue
            .write_buffer(&self.player_buf, 0, bytemuck::bytes_of(&uniform));

        // Edge-detection rollover, after all gameplay reads this frame
        self.input_state.end_frame();
    }

    fn render(&mut self) {
        let raw_input = self.egui_state.take_egui_input(&self.window);

        // Split the borrows so the UI closure can mutate the tunables
        let player = &self.player;
        let physics = &mut self.physics_system;
        let controller = &mut self.player_controller;
        let width = self.config.width;
        let dt = self.last_dt;

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            ui::draw_debug_window(ctx, player, dt);
            ui::draw_settings_window(ctx, physics, controller, width);
        });

        let egui::FullOutput {
            platform_output,
            textures_delta,
            shapes,
            ..
        } = full_output;

        self.egui_state
            .handle_platform_output(&self.window, platform_output);

        let dpr = self.window.scale_factor() as f32;
        self.render_state.egui_primitives = Some(self.egui_ctx.tessellate(shapes, dpr));
        self.render_state.egui_textures_delta = Some(textures_delta);
        self.render_state.egui_dpr = dpr;

        self.render_state
            .draw_frame(&self.device, &self.queue, &self.surface);
    }
}

/// Map winit key codes onto the browser's `KeyboardEvent.key` names so both
/// frontends run the identical controller path.
fn key_name(code: KeyCode) -> Option<&'static str> {
    match code {
        KeyCode::ArrowLeft => Some("ArrowLeft"),
        KeyCode::ArrowRight => Some("ArrowRight"),
        KeyCode::ArrowUp => Some("ArrowUp"),
        KeyCode::ArrowDown => Some("ArrowDown"),
        KeyCode::Space => Some(" "),
        KeyCode::KeyA => Some("a"),
        KeyCode::KeyD => Some("d"),
        _ => None,
    }
}

fn main() {
    logging::init();

    let event_loop = EventLoop::new().unwrap();
    let window_attributes = Window::default_attributes()
        .with_title("Hopper - Native")
        .with_inner_size(winit::dpi::LogicalSize::new(800, 600));
    let window = event_loop.create_window(window_attributes).unwrap();
    let window = Arc::new(window);

    let mut app = pollster::block_on(App::new(window.clone()));
    tracing::info!(
        "starting: {}x{} world, {} platform(s)",
        app.level.width,
        app.level.height,
        app.level.platforms.len()
    );

    event_loop
        .run(move |event, elwt| {
            match event {
                Event::WindowEvent {
                    ref event,
                    window_id,
                } if window_id == app.window.id() => {
                    if !app.input(event) {
                        match event {
                            WindowEvent::CloseRequested => elwt.exit(),
                            WindowEvent::Resized(physical_size) => {
                                app.resize(*physical_size);
                            }
                            WindowEvent::RedrawRequested => {
                                let now = Instant::now();
                                let dt = (now - app.last_frame_time).as_secs_f32();
                                app.last_frame_time = now;

                                app.update(dt);
                                app.render();
                            }
                            _ => {}
                        }
                    }
                }
                Event::AboutToWait => {
                    app.window.request_redraw();
                }
                _ => {}
            }
        })
        .unwrap();
}
