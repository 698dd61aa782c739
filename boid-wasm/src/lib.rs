use boid_core::{FlockParams, FlockSimulation, NeighborSearch, Vector2D};
use boid_shared::FlockSettings;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent};

mod shape;

pub use shape::{triangle, BOID_SIZE};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}

/// Browser host: owns the flock and the live parameters, draws onto a canvas
#[wasm_bindgen]
pub struct FlockApp {
    sim: FlockSimulation,
    params: FlockParams,
    lanes: bool,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

#[wasm_bindgen]
impl FlockApp {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, width: f64, height: f64) -> Result<FlockApp, JsValue> {
        let window = web_sys::window().ok_or("no global window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let params = FlockParams::new(width as f32, height as f32);
        let mut sim = FlockSimulation::new();
        sim.reset(params.agent_count, &params);

        console_log!(
            "Initialized flock of {} boids on {}x{}",
            sim.len(),
            width,
            height
        );

        Ok(FlockApp {
            sim,
            params,
            lanes: false,
            canvas,
            context,
        })
    }

    /// Throw the flock away and spawn `count` new boids
    pub fn reset(&mut self, count: i32) -> Result<(), JsValue> {
        let count = usize::try_from(count)
            .map_err(|_| js_error(&format!("boid count must not be negative, got {}", count)))?;

        self.params.agent_count = count;
        self.sim.reset(count, &self.params);
        if self.lanes {
            self.sim.assign_lanes();
        }
        console_log!("Reset flock to {} boids", count);
        Ok(())
    }

    /// Reset with the count last set through [`FlockApp::set_agent_count`]
    pub fn restart(&mut self) {
        self.sim.reset(self.params.agent_count, &self.params);
        if self.lanes {
            self.sim.assign_lanes();
        }
    }

    pub fn step(&mut self) {
        self.sim.step(&self.params);
    }

    pub fn render(&self) -> Result<(), JsValue> {
        let width = self.canvas.width() as f64;
        let height = self.canvas.height() as f64;

        self.context.clear_rect(0.0, 0.0, width, height);
        self.context.set_fill_style_str("white");

        for view in self.sim.snapshot() {
            let [nose, left, right] = triangle(&view, BOID_SIZE);
            self.context.begin_path();
            self.context.move_to(nose.0, nose.1);
            self.context.line_to(left.0, left.1);
            self.context.line_to(right.0, right.1);
            self.context.close_path();
            self.context.fill();
        }

        Ok(())
    }

    /// One animation frame: advance, then draw
    pub fn frame(&mut self) -> Result<(), JsValue> {
        self.step();
        self.render()
    }

    pub fn boid_count(&self) -> usize {
        self.sim.len()
    }

    /// Count used by the next [`FlockApp::restart`]
    pub fn set_agent_count(&mut self, count: i32) -> Result<(), JsValue> {
        self.params.agent_count = usize::try_from(count)
            .map_err(|_| js_error(&format!("boid count must not be negative, got {}", count)))?;
        Ok(())
    }

    pub fn set_visual_range(&mut self, value: f64) {
        self.params.visual_range = value as f32;
    }

    pub fn set_protected_range(&mut self, value: f64) {
        self.params.protected_range = value as f32;
    }

    pub fn set_centering_factor(&mut self, value: f64) {
        self.params.centering_factor = value as f32;
    }

    pub fn set_avoid_factor(&mut self, value: f64) {
        self.params.avoid_factor = value as f32;
    }

    pub fn set_matching_factor(&mut self, value: f64) {
        self.params.matching_factor = value as f32;
    }

    pub fn set_turn_factor(&mut self, value: f64) {
        self.params.turn_factor = value as f32;
    }

    pub fn set_min_speed(&mut self, value: f64) {
        self.params.min_speed = value as f32;
    }

    pub fn set_max_speed(&mut self, value: f64) {
        self.params.max_speed = value as f32;
    }

    pub fn set_cursor_bias(&mut self, value: f64) {
        self.params.cursor_bias = value as f32;
    }

    pub fn set_lane_max_bias(&mut self, value: f64) {
        self.params.lane_bias.max_bias = value as f32;
    }

    pub fn set_follow_cursor(&mut self, follow: bool) {
        self.params.follow_cursor = follow;
    }

    pub fn set_cursor(&mut self, x: f64, y: f64) {
        self.params.cursor = Vector2D::new(x as f32, y as f32);
    }

    /// Track the pointer in canvas coordinates
    pub fn handle_mouse_move(&mut self, event: MouseEvent) {
        let canvas_element: &Element = self.canvas.as_ref();
        let rect = canvas_element.get_bounding_client_rect();
        let x = event.client_x() as f64 - rect.left();
        let y = event.client_y() as f64 - rect.top();
        self.set_cursor(x, y);
    }

    /// Tag boids with opposing lanes now and after every reset
    pub fn set_lanes(&mut self, enabled: bool) {
        self.lanes = enabled;
        if enabled {
            self.sim.assign_lanes();
        } else {
            self.sim.clear_lanes();
        }
    }

    pub fn set_grid_search(&mut self, enabled: bool) {
        self.sim.set_neighbor_search(if enabled {
            NeighborSearch::Grid
        } else {
            NeighborSearch::Naive
        });
    }

    /// Replace every parameter from a settings JSON document; the flock is kept
    pub fn apply_settings_json(&mut self, json: &str) -> Result<(), JsValue> {
        let settings = FlockSettings::from_json(json).map_err(|e| js_error(&e.to_string()))?;
        let params = settings.to_params().map_err(|e| js_error(&e.to_string()))?;

        if params.width != self.params.width || params.height != self.params.height {
            self.canvas.set_width(params.width as u32);
            self.canvas.set_height(params.height as u32);
        }
        self.params = params;
        self.set_lanes(settings.lanes);
        console_log!("Applied settings for {} boids", self.params.agent_count);
        Ok(())
    }

    pub fn settings_json(&self) -> String {
        let mut settings = FlockSettings::from(&self.params);
        settings.lanes = self.lanes;
        settings.to_json_pretty()
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.params.resize(width as f32, height as f32);
        console_log!("Resized to {}x{}", width, height);
    }
}
