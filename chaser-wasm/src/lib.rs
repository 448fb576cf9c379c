use chaser_core::{ChaserColor, FleetStd, Settings, TraceLine, DEFAULT_CYCLES, TRACE_ALPHA};
use chaser_shared::{SettingsUpdate, StatusReport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

fn fill_style(color: ChaserColor) -> String {
    let (r, g, b) = color.rgb();
    format!("rgb({},{},{})", r, g, b)
}

fn trace_style(color: ChaserColor) -> String {
    let (r, g, b) = color.rgb();
    format!("rgba({},{},{},{})", r, g, b, TRACE_ALPHA)
}

#[wasm_bindgen]
pub struct ChaserSimulation {
    fleet: FleetStd,
    settings: Settings,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    frames: u64,
    captures: u64,
}

#[wasm_bindgen]
impl ChaserSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        width: f64,
        height: f64,
        cycles: usize,
    ) -> Result<ChaserSimulation, JsValue> {
        let cycles = if cycles == 0 { DEFAULT_CYCLES } else { cycles };
        console_log!(
            "Initializing chaser simulation with {} pursuit cycles",
            cycles
        );

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

        let fleet = FleetStd::new(width as f32, height as f32, cycles);

        Ok(ChaserSimulation {
            fleet,
            settings: Settings::default(),
            canvas,
            context,
            frames: 0,
            captures: 0,
        })
    }

    /// One animation frame, driven by the host's requestAnimationFrame
    /// loop. A zero velocity skips both the update and the draw; the
    /// scheduler keeps ticking regardless.
    pub fn tick(&mut self) -> Result<(), JsValue> {
        self.frames += 1;
        if self.settings.paused() {
            return Ok(());
        }

        if self.settings.erase {
            self.context.clear_rect(
                0.0,
                0.0,
                self.canvas.width() as f64,
                self.canvas.height() as f64,
            );
        }

        self.captures += self.fleet.update(self.settings.velocity) as u64;

        for idx in 0..self.fleet.chasers.len() {
            self.draw_chaser(idx)?;
        }

        Ok(())
    }

    fn draw_chaser(&self, idx: usize) -> Result<(), JsValue> {
        let body = self.fleet.chasers[idx].body_rect();

        self.context.save();
        self.context
            .translate(body.center.x as f64, body.center.y as f64)?;
        self.context.rotate(body.angle as f64)?;
        self.context.set_fill_style_str(&fill_style(body.color));
        self.context.fill_rect(
            -(body.width as f64) / 2.0,
            -(body.height as f64) / 2.0,
            body.width as f64,
            body.height as f64,
        );
        self.context.restore();

        if !self.settings.trace {
            return Ok(());
        }

        let TraceLine { from, to, color } = self.fleet.trace_line(idx);
        self.context.set_stroke_style_str(&trace_style(color));
        self.context.begin_path();
        self.context.move_to(from.x as f64, from.y as f64);
        self.context.line_to(to.x as f64, to.y as f64);
        self.context.close_path();
        self.context.stroke();

        Ok(())
    }

    pub fn set_velocity(&mut self, velocity: f64) {
        self.settings.set_velocity(velocity as f32);
    }

    pub fn set_erase(&mut self, erase: bool) {
        self.settings.erase = erase;
    }

    pub fn set_trace(&mut self, trace: bool) {
        self.settings.trace = trace;
    }

    /// Apply a whole settings record at once, as serialized by the host.
    pub fn apply_settings(&mut self, json: &str) -> Result<(), JsValue> {
        let update: SettingsUpdate = serde_json::from_str(json)
            .map_err(|e| JsValue::from_str(&format!("invalid settings: {}", e)))?;
        self.settings.set_velocity(update.velocity);
        self.settings.erase = update.erase;
        self.settings.trace = update.trace;
        Ok(())
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.fleet.resize(width as f32, height as f32);
        console_log!("Resized to {}x{}", width, height);
    }

    pub fn chaser_count(&self) -> usize {
        self.fleet.chasers.len()
    }

    pub fn captures(&self) -> f64 {
        self.captures as f64
    }

    /// Fleet statistics as JSON for the host page.
    pub fn status_json(&self) -> Result<String, JsValue> {
        let report = StatusReport {
            chaser_count: self.fleet.chasers.len(),
            frames: self.frames,
            captures: self.captures,
        };
        serde_json::to_string(&report).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles_cover_palette() {
        assert_eq!(fill_style(ChaserColor::Red), "rgb(255,0,0)");
        assert_eq!(trace_style(ChaserColor::Blue), "rgba(0,0,255,0.075)");
        assert_eq!(fill_style(ChaserColor::Green), "rgb(0,255,0)");
    }
}
