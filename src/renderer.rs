//! Canvas binding and animation loop

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use js_sys::Math;
use wasm_bindgen::prelude::*;
use web_sys::{console, CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use crate::config::SnowConfig;
use crate::constants::STIPPLE_SIZE;
use crate::frame::{FrameStats, Simulation, Surface};
use crate::palette::{flake_fill, GROUND_GRADIENT_STOPS, STIPPLE_FILL};

#[wasm_bindgen]
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderResult {
    pub fps: u32,
    pub wind: f32,
    pub settled: u32,
    pub particle_count: u32,
}

struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
    width: f64,
}

impl Surface for CanvasSurface<'_> {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_ground(&mut self, skyline: &[(f32, f32)], bottom: f32, gradient_top: f32) {
        let ctx = self.ctx;
        ctx.begin_path();
        ctx.move_to(0.0, bottom as f64);
        for &(x, y) in skyline {
            ctx.line_to(x as f64, y as f64);
        }
        ctx.line_to(self.width, bottom as f64);
        ctx.close_path();

        let gradient = ctx.create_linear_gradient(0.0, gradient_top as f64, 0.0, bottom as f64);
        for (offset, color) in GROUND_GRADIENT_STOPS {
            if let Err(err) = gradient.add_color_stop(offset, color) {
                warn("Failed to add ground gradient stop", &err);
            }
        }
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill();
        ctx.set_fill_style_str(STIPPLE_FILL);
    }

    fn fill_stipple(&mut self, x: f32, y: f32) {
        self.ctx
            .fill_rect(x as f64, y as f64, STIPPLE_SIZE, STIPPLE_SIZE);
    }

    fn fill_flake(&mut self, x: f32, y: f32, radius: f32, opacity: f32) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(x as f64, y as f64, radius as f64, 0.0, TAU)
            .is_err()
        {
            return;
        }
        self.ctx.set_fill_style_str(&flake_fill(opacity));
        self.ctx.fill();
    }
}

/// Everything that exists only while the loop runs.
struct Host {
    window: Window,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    simulation: Simulation,
    frame_id: Option<i32>,

    last: FrameStats,
    frame_count: u32,
    fps_last_time: f64,
    current_fps: u32,
}

impl Host {
    fn render(&mut self, current_time: f64) {
        self.frame_count += 1;
        if current_time - self.fps_last_time >= 1000.0 {
            self.current_fps = self.frame_count;
            self.frame_count = 0;
            self.fps_last_time = current_time;
        }

        let mut surface = CanvasSurface {
            ctx: &self.ctx,
            width: self.canvas.width() as f64,
        };
        self.last = self.simulation.tick(current_time, &mut surface);
    }

    fn resize(&mut self) -> Result<(), JsValue> {
        let (width, height) = window_size(&self.window)?;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.simulation.resize(width as f32, height as f32);
        Ok(())
    }
}

struct Listeners {
    resize: Closure<dyn FnMut()>,
    pointer_move: Closure<dyn FnMut(MouseEvent)>,
    pointer_leave: Closure<dyn FnMut()>,
}

impl Listeners {
    fn attach(&self, window: &Window) -> Result<(), JsValue> {
        window.add_event_listener_with_callback("resize", self.resize.as_ref().unchecked_ref())?;
        window.add_event_listener_with_callback(
            "mousemove",
            self.pointer_move.as_ref().unchecked_ref(),
        )?;
        window.add_event_listener_with_callback(
            "mouseleave",
            self.pointer_leave.as_ref().unchecked_ref(),
        )?;
        Ok(())
    }

    fn detach(&self, window: &Window) {
        let results = [
            window.remove_event_listener_with_callback(
                "resize",
                self.resize.as_ref().unchecked_ref(),
            ),
            window.remove_event_listener_with_callback(
                "mousemove",
                self.pointer_move.as_ref().unchecked_ref(),
            ),
            window.remove_event_listener_with_callback(
                "mouseleave",
                self.pointer_leave.as_ref().unchecked_ref(),
            ),
        ];
        for err in results.into_iter().filter_map(Result::err) {
            warn("Failed to remove listener", &err);
        }
    }
}

type SharedHost = Rc<RefCell<Option<Host>>>;

#[wasm_bindgen]
pub struct SnowfallCanvas {
    window: Window,
    canvas: HtmlCanvasElement,
    config: SnowConfig,
    host: SharedHost,
    frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
    listeners: Option<Listeners>,
}

#[wasm_bindgen]
impl SnowfallCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, config_val: JsValue) -> Result<Self, JsValue> {
        let config = SnowConfig::from_js(config_val);

        let window = web_sys::window().ok_or("Failed to get window")?;
        let document = window.document().ok_or("Failed to get document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or("Canvas not found")?
            .dyn_into()?;

        Ok(Self {
            window,
            canvas,
            config,
            host: Rc::new(RefCell::new(None)),
            frame: Rc::new(RefCell::new(None)),
            listeners: None,
        })
    }

    /// Binds the 2D context, sizes the canvas to the window, seeds the
    /// snowflakes and starts the animation loop. Without a 2D context the
    /// failure is logged and nothing starts.
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.is_running() {
            return Ok(());
        }

        let ctx = match self.canvas.get_context("2d") {
            Ok(Some(ctx)) => ctx.dyn_into::<CanvasRenderingContext2d>()?,
            _ => {
                console::error_1(&"[Snowdrift] Failed to get 2d context for snowfall canvas".into());
                return Ok(());
            }
        };

        let (width, height) = window_size(&self.window)?;
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        let now = now(&self.window);
        let seed = (Math::random() * u64::MAX as f64) as u64;
        let simulation = Simulation::new(self.config, width as f32, height as f32, now, seed);

        *self.host.borrow_mut() = Some(Host {
            window: self.window.clone(),
            canvas: self.canvas.clone(),
            ctx,
            simulation,
            frame_id: None,
            last: FrameStats::default(),
            frame_count: 0,
            fps_last_time: now,
            current_fps: 0,
        });

        if let Err(err) = self.listen().and_then(|_| self.schedule()) {
            self.stop();
            return Err(err);
        }

        console::log_1(
            &format!(
                "[Snowdrift] Started with {} snowflakes on {width}x{height}",
                self.config.max_snowflakes
            )
            .into(),
        );
        Ok(())
    }

    /// Cancels the loop, removes the listeners, clears the canvas and drops
    /// the simulation. Safe to call at any point, repeatedly.
    pub fn stop(&mut self) {
        let host = self.host.borrow_mut().take();
        if let Some(host) = host {
            if let Some(id) = host.frame_id {
                if let Err(err) = self.window.cancel_animation_frame(id) {
                    warn("Failed to cancel animation frame", &err);
                }
            }
            host.ctx.clear_rect(
                0.0,
                0.0,
                host.canvas.width() as f64,
                host.canvas.height() as f64,
            );
            console::log_1(&"[Snowdrift] Stopped".into());
        }

        self.frame.borrow_mut().take();

        if let Some(listeners) = self.listeners.take() {
            listeners.detach(&self.window);
        }
    }

    /// Re-reads the window size. Accumulated snow is discarded.
    pub fn resize(&mut self) -> Result<(), JsValue> {
        match self.host.borrow_mut().as_mut() {
            Some(host) => host.resize(),
            None => Ok(()),
        }
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let now = now(&self.window);
        if let Some(host) = self.host.borrow_mut().as_mut() {
            host.simulation.pointer_move(x, y, now);
        }
    }

    pub fn pointer_leave(&mut self) {
        if let Some(host) = self.host.borrow_mut().as_mut() {
            host.simulation.pointer_leave();
        }
    }

    pub fn is_running(&self) -> bool {
        self.host.borrow().is_some()
    }

    pub fn get_stats(&self) -> RenderResult {
        self.host
            .borrow()
            .as_ref()
            .map(|host| RenderResult {
                fps: host.current_fps,
                wind: host.last.wind,
                settled: host.last.settled,
                particle_count: host.last.particle_count,
            })
            .unwrap_or_default()
    }

    pub fn get_fps(&self) -> u32 {
        self.get_stats().fps
    }
    pub fn get_wind(&self) -> f32 {
        self.host
            .borrow()
            .as_ref()
            .map_or(0.0, |host| host.simulation.wind().speed())
    }
    pub fn get_particle_count(&self) -> u32 {
        self.host
            .borrow()
            .as_ref()
            .map_or(0, |host| host.simulation.particles().len() as u32)
    }
    pub fn get_config(&self) -> SnowConfig {
        self.config
    }
}

impl SnowfallCanvas {
    fn listen(&mut self) -> Result<(), JsValue> {
        let resize = {
            let host = Rc::clone(&self.host);
            Closure::wrap(Box::new(move || {
                if let Some(host) = host.borrow_mut().as_mut() {
                    if let Err(err) = host.resize() {
                        warn("Resize failed", &err);
                    }
                }
            }) as Box<dyn FnMut()>)
        };

        let pointer_move = {
            let host = Rc::clone(&self.host);
            let window = self.window.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                let now = now(&window);
                if let Some(host) = host.borrow_mut().as_mut() {
                    host.simulation
                        .pointer_move(event.client_x() as f32, event.client_y() as f32, now);
                }
            }) as Box<dyn FnMut(MouseEvent)>)
        };

        let pointer_leave = {
            let host = Rc::clone(&self.host);
            Closure::wrap(Box::new(move || {
                if let Some(host) = host.borrow_mut().as_mut() {
                    host.simulation.pointer_leave();
                }
            }) as Box<dyn FnMut()>)
        };

        let listeners = Listeners {
            resize,
            pointer_move,
            pointer_leave,
        };
        let attached = listeners.attach(&self.window);
        self.listeners = Some(listeners);
        attached
    }

    fn schedule(&mut self) -> Result<(), JsValue> {
        let host = Rc::clone(&self.host);
        let frame = Rc::clone(&self.frame);
        let window = self.window.clone();

        let callback = Closure::wrap(Box::new(move |current_time: f64| {
            let mut guard = host.borrow_mut();
            let Some(host) = guard.as_mut() else {
                return;
            };
            host.render(current_time);
            host.frame_id = frame.borrow().as_ref().and_then(|next| {
                window
                    .request_animation_frame(next.as_ref().unchecked_ref())
                    .ok()
            });
        }) as Box<dyn FnMut(f64)>);

        let id = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())?;
        *self.frame.borrow_mut() = Some(callback);
        if let Some(host) = self.host.borrow_mut().as_mut() {
            host.frame_id = Some(id);
        }
        Ok(())
    }
}

impl Drop for SnowfallCanvas {
    fn drop(&mut self) {
        self.stop();
    }
}

fn window_size(window: &Window) -> Result<(u32, u32), JsValue> {
    let width = window
        .inner_width()?
        .as_f64()
        .ok_or("Window width is not a number")?;
    let height = window
        .inner_height()?
        .as_f64()
        .ok_or("Window height is not a number")?;
    Ok((width.max(0.0) as u32, height.max(0.0) as u32))
}

fn warn(context: &str, err: &JsValue) {
    console::warn_2(&format!("[Snowdrift] {context}:").into(), err);
}

fn now(window: &Window) -> f64 {
    window
        .performance()
        .map_or_else(js_sys::Date::now, |performance| performance.now())
}
