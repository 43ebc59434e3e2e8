//! HTML canvas 2D backend (wasm only)

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{DrawCmd, Frame, Renderer, ScoreDisplay, draw_list, palette};
use crate::sim::GamePhase;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    fn execute(&self, cmd: &DrawCmd) -> Result<(), JsValue> {
        match cmd {
            DrawCmd::Rect { pos, size, color } => {
                self.ctx.set_fill_style_str(&color.to_css());
                self.ctx
                    .fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            DrawCmd::Circle {
                center,
                radius,
                color,
            } => {
                self.ctx.set_fill_style_str(&color.to_css());
                self.ctx.begin_path();
                self.ctx.arc(
                    center.x as f64,
                    center.y as f64,
                    *radius as f64,
                    0.0,
                    std::f64::consts::TAU,
                )?;
                self.ctx.fill();
            }
            DrawCmd::Text { text, pos, color } => {
                self.ctx.set_fill_style_str(&color.to_css());
                self.ctx.set_font("20px Arial");
                self.ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
            }
        }
        Ok(())
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, frame: &Frame<'_>) {
        self.ctx.set_fill_style_str(&palette::BACKGROUND.to_css());
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);

        for cmd in draw_list(frame) {
            if let Err(e) = self.execute(&cmd) {
                log::warn!("Draw error: {:?}", e);
            }
        }
    }
}

impl ScoreDisplay for CanvasRenderer {
    fn show_score(&mut self, score: u64, high_score: u64, _phase: GamePhase) {
        self.ctx.set_fill_style_str(&palette::TEXT.to_css());
        self.ctx.set_font("20px Arial");
        let lines = [
            (format!("Score: {}", score), 10.0),
            (format!("High Score: {}", high_score), self.width - 170.0),
        ];
        for (text, x) in lines {
            if let Err(e) = self.ctx.fill_text(&text, x, 30.0) {
                log::warn!("Score draw error: {:?}", e);
            }
        }
    }
}
