// Re-export all public modules so they can be used from main.rs
pub mod logging;
pub mod ui;
pub mod utils;

// MVC Architecture
pub mod controller;
pub mod model;
pub mod view;

// Common imports
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{prelude::wasm_bindgen, JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use web_sys::{Document, Event, HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

#[cfg(target_arch = "wasm32")]
use controller::{
    FrameLoopContext, InputEvent, InputProcessor, InputState, PhysicsSystem, PlayerController,
};
#[cfg(target_arch = "wasm32")]
use model::{player::PLAYER_COLOR, Camera, Level, Player};
#[cfg(target_arch = "wasm32")]
use view::render::{self, RenderState};
#[cfg(target_arch = "wasm32")]
use view::GpuContext;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    logging::init();
    let (window, document, canvas) = init_canvas(800, 600)?;
    setup_app(&window, &document, &canvas).await
}

/// Main application setup for WASM
#[cfg(target_arch = "wasm32")]
async fn setup_app(
    window: &Window,
    document: &Document,
    canvas: &HtmlCanvasElement,
) -> Result<(), JsValue> {
    // Initialize GPU
    let gpu = GpuContext::new(canvas, 800, 600)
        .await
        .map_err(|e| js_error(format!("GPU init failed: {e:?}")))?;

    // World and game state
    let level = Rc::new(Level::prototype());
    let player = Rc::new(RefCell::new(Player::spawn(level.spawn)));
    let camera = Camera::new(level.width, level.height);
    let input_state = Rc::new(RefCell::new(InputState::new()));
    let egui_events: Rc<RefCell<Vec<egui::Event>>> = Rc::new(RefCell::new(Vec::new()));

    tracing::info!(
        "starting: {}x{} world, {} platform(s)",
        level.width,
        level.height,
        level.platforms.len()
    );

    // The camera never moves; its buffer is written once here
    let camera_buf = render::create_camera_buffer(gpu.device.as_ref(), &camera);
    let sprite_bgl = render::create_sprite_bind_group_layout(gpu.device.as_ref());

    let level_buf = render::create_transform_buffer(gpu.device.as_ref(), glam::Mat4::IDENTITY);
    let player_buf =
        render::create_transform_buffer(gpu.device.as_ref(), player.borrow().transform());

    let level_bind_group =
        render::create_sprite_bind_group(gpu.device.as_ref(), &sprite_bgl, &camera_buf, &level_buf);
    let player_bind_group = render::create_sprite_bind_group(
        gpu.device.as_ref(),
        &sprite_bgl,
        &camera_buf,
        &player_buf,
    );

    let pipeline = render::create_sprite_pipeline(gpu.device.as_ref(), gpu.format, &sprite_bgl);

    // Placeholder sprites until there are art assets
    let level_mesh = utils::create_level_mesh(&level).upload(gpu.device.as_ref());
    let player_mesh =
        utils::create_sprite_quad(player.borrow().size, PLAYER_COLOR).upload(gpu.device.as_ref());

    // egui setup
    let egui_ctx = egui::Context::default();
    let egui_renderer = egui_wgpu::Renderer::new(
        gpu.device.as_ref(),
        gpu.format,
        egui_wgpu::RendererOptions::default(),
    );

    // Setup input listeners
    setup_input_listeners(document, window, input_state.clone(), egui_events.clone())?;

    let mut render_state = RenderState {
        format: gpu.format,
        alpha_mode: gpu.config.alpha_mode,
        width: gpu.config.width,
        height: gpu.config.height,
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

    let mut frame_ctx = FrameLoopContext {
        camera,
        level,
        player,
        input_state,
        input_processor: InputProcessor::default(),
        player_controller: PlayerController::new(),
        physics_system: PhysicsSystem::new(),
        player_buf,
        egui_ctx,
        egui_events,
        last_time: Rc::new(RefCell::new(
            window
                .performance()
                .map(|p| p.now())
                .unwrap_or_else(js_sys::Date::now),
        )),
    };

    // Continuous redraw using requestAnimationFrame
    let f = FrameCallback::new(window.clone(), {
        let window_for_loop = window.clone();

        move || {
            frame_ctx.update(gpu.queue.as_ref(), &window_for_loop, &mut render_state);
            render_state.draw_frame(gpu.device.as_ref(), gpu.queue.as_ref(), &gpu.surface);
        }
    });
    f.start();

    Ok(())
}

/// Setup all input event listeners with platform-agnostic abstractions
#[cfg(target_arch = "wasm32")]
fn setup_input_listeners(
    document: &web_sys::Document,
    window: &web_sys::Window,
    input_state: Rc<RefCell<InputState>>,
    egui_events: Rc<RefCell<Vec<egui::Event>>>,
) -> Result<(), JsValue> {
    // Keyboard down
    {
        let input_state = input_state.clone();
        let keydown = Closure::wrap(Box::new(move |e: KeyboardEvent| {
            let key = e.key();

            // Keep the page from scrolling on navigation keys
            if matches!(
                key.as_str(),
                "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight" | " " | "a" | "d" | "A" | "D"
            ) {
                e.prevent_default();
            }

            input_state
                .borrow_mut()
                .process_event(&InputEvent::KeyDown(key));
        }) as Box<dyn FnMut(KeyboardEvent)>);
        document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
        keydown.forget();
    }

    // Keyboard up
    {
        let input_state = input_state.clone();
        let keyup = Closure::wrap(Box::new(move |e: KeyboardEvent| {
            input_state
                .borrow_mut()
                .process_event(&InputEvent::KeyUp(e.key()));
        }) as Box<dyn FnMut(KeyboardEvent)>);
        document.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())?;
        keyup.forget();
    }

    // Focus loss - clear all keys so none get stuck down
    {
        let input_state = input_state.clone();
        let blur = Closure::wrap(Box::new(move |_e: Event| {
            input_state.borrow_mut().process_event(&InputEvent::FocusLost);
        }) as Box<dyn FnMut(Event)>);
        window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref())?;
        blur.forget();
    }

    // Visibility change - clear all keys
    {
        let input_state = input_state.clone();
        let document_vis = document.clone();
        let visibility = Closure::wrap(Box::new(move |_e: Event| {
            input_state
                .borrow_mut()
                .process_event(&InputEvent::VisibilityChanged {
                    visible: !document_vis.hidden(),
                });
        }) as Box<dyn FnMut(Event)>);
        document
            .add_event_listener_with_callback("visibilitychange", visibility.as_ref().unchecked_ref())?;
        visibility.forget();
    }

    // Mouse move - drives the egui overlay
    {
        let input_state = input_state.clone();
        let egui_events_q = egui_events.clone();
        let mm = Closure::wrap(Box::new(move |e: MouseEvent| {
            let px = e.client_x() as f32;
            let py = e.client_y() as f32;
            input_state.borrow_mut().mouse_pos = (px, py);
            egui_events_q
                .borrow_mut()
                .push(egui::Event::PointerMoved(egui::pos2(px, py)));
        }) as Box<dyn FnMut(MouseEvent)>);
        document.add_event_listener_with_callback("mousemove", mm.as_ref().unchecked_ref())?;
        mm.forget();
    }

    // Mouse buttons - forwarded to egui for the settings sliders
    {
        let input_state = input_state.clone();
        let egui_events_q = egui_events.clone();
        let mousedown = Closure::wrap(Box::new(move |_e: MouseEvent| {
            let (px, py) = input_state.borrow().mouse_pos;
            egui_events_q.borrow_mut().push(egui::Event::PointerButton {
                pos: egui::pos2(px, py),
                button: egui::PointerButton::Primary,
                pressed: true,
                modifiers: egui::Modifiers::default(),
            });
        }) as Box<dyn FnMut(MouseEvent)>);
        document.add_event_listener_with_callback("mousedown", mousedown.as_ref().unchecked_ref())?;
        mousedown.forget();
    }
    {
        let input_state = input_state.clone();
        let egui_events_q = egui_events.clone();
        let mouseup = Closure::wrap(Box::new(move |_e: MouseEvent| {
            let (px, py) = input_state.borrow().mouse_pos;
            egui_events_q.borrow_mut().push(egui::Event::PointerButton {
                pos: egui::pos2(px, py),
                button: egui::PointerButton::Primary,
                pressed: false,
                modifiers: egui::Modifiers::default(),
            });
        }) as Box<dyn FnMut(MouseEvent)>);
        document.add_event_listener_with_callback("mouseup", mouseup.as_ref().unchecked_ref())?;
        mouseup.forget();
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn init_canvas(width: u32, height: u32) -> Result<(Window, Document, HtmlCanvasElement), JsValue> {
    let window = web_sys::window().ok_or(js_error("no global `window`"))?;
    let document = window.document().ok_or(js_error("no document on window"))?;
    let body = document.body().ok_or(js_error("no body on document"))?;
    let canvas_el = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| js_error("failed to create canvas"))?;
    canvas_el.set_width(width);
    canvas_el.set_height(height);
    body.append_child(&canvas_el)?;
    Ok((window, document, canvas_el))
}

#[cfg(target_arch = "wasm32")]
fn js_error<E: Into<String>>(msg: E) -> JsValue {
    JsValue::from_str(&msg.into())
}

/// Drives a closure once per animation frame, keeping itself alive by
/// re-registering with the browser at the end of every tick.
#[cfg(target_arch = "wasm32")]
struct FrameCallback {
    inner: Rc<RefCell<Box<dyn FnMut()>>>,
    window: Window,
}

#[cfg(target_arch = "wasm32")]
impl FrameCallback {
    fn new(window: Window, f: impl FnMut() + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Box::new(f))),
            window,
        }
    }

    fn start(self) {
        let inner = self.inner.clone();
        let window = self.window.clone();

        let callback = Rc::new(RefCell::new(None::<Closure<dyn FnMut()>>));
        let callback_clone = callback.clone();

        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            inner.borrow_mut().as_mut()();

            // Recursively schedule next frame
            let cb_ref = callback_clone.borrow();
            window
                .request_animation_frame(cb_ref.as_ref().unwrap().as_ref().unchecked_ref())
                .expect("RAF failed");
        }) as Box<dyn FnMut()>));

        self.window
            .request_animation_frame(
                callback.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
            )
            .expect("RAF start failed");

        // Leak the closure to keep it alive
        std::mem::forget(callback);
    }
}
