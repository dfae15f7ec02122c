//! Canvas 2D surface (wasm32 only)
//!
//! Draws flat shapes straight from a [`Frame`]. World layers get the tilt and
//! shake transform; the HUD is drawn untransformed on top.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::frame::{Frame, Surface};

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn draw_world(&self, frame: &Frame) {
        let ctx = &self.ctx;
        let (w, h) = (frame.width as f64, frame.height as f64);

        ctx.save();
        let _ = ctx.translate(w / 2.0, h / 2.0);
        let _ = ctx.rotate(frame.rotation as f64);
        let _ = ctx.translate(-w / 2.0, -h / 2.0);
        let _ = ctx.translate(frame.shake_offset.x as f64, frame.shake_offset.y as f64);

        ctx.set_fill_style_str(&format!("hsl({}, 100%, 85%)", frame.background_hue));
        ctx.fill_rect(0.0, 0.0, w, h);

        for p in &frame.particles {
            ctx.set_fill_style_str(&format!("hsla({}, 100%, 50%, {})", p.hue, p.alpha));
            ctx.begin_path();
            let _ = ctx.arc(p.pos.x as f64, p.pos.y as f64, p.size as f64, 0.0, TAU);
            ctx.fill();
        }

        let bird = &frame.bird;
        ctx.set_fill_style_str(&format!("hsl({}, 100%, 50%)", bird.hue));
        ctx.fill_rect(
            bird.pos.x as f64,
            bird.pos.y as f64,
            bird.size as f64,
            bird.size as f64,
        );

        for pipe in &frame.pipes {
            ctx.set_fill_style_str(&format!("hsl({}, 70%, 50%)", pipe.hue));
            ctx.fill_rect(pipe.x as f64, 0.0, pipe.width as f64, pipe.top as f64);
            ctx.fill_rect(
                pipe.x as f64,
                pipe.bottom as f64,
                pipe.width as f64,
                h - pipe.bottom as f64,
            );
        }

        ctx.restore();
    }

    fn draw_hud(&self, frame: &Frame) {
        let ctx = &self.ctx;
        let (w, h) = (frame.width as f64, frame.height as f64);

        ctx.set_fill_style_str("black");
        ctx.set_font("20px sans-serif");
        ctx.set_text_align("start");
        let _ = ctx.fill_text(&format!("Score: {}", frame.score), 10.0, 25.0);
        ctx.set_text_align("right");
        let _ = ctx.fill_text(&format!("High: {}", frame.best_score), w - 15.0, 35.0);

        if frame.game_over {
            ctx.set_text_align("center");
            ctx.set_font("48px Impact, sans-serif");
            ctx.set_fill_style_str(&format!("hsla({}, 100%, 50%, 0.7)", frame.bird.hue));
            let _ = ctx.fill_text("GAME OVER!!!", w / 2.0, h / 2.0 - 30.0);

            ctx.set_font("20px sans-serif");
            ctx.set_fill_style_str("black");
            let _ = ctx.fill_text(&format!("Score: {}", frame.score), w / 2.0, h / 2.0 + 10.0);
            let _ = ctx.fill_text(
                &format!("High Score: {}", frame.best_score),
                w / 2.0,
                h / 2.0 + 40.0,
            );
            ctx.set_font("16px sans-serif");
            let _ = ctx.fill_text("(Enter / Click / Tap to Restart)", w / 2.0, h / 2.0 + 100.0);
        }
        ctx.set_text_align("start");
    }
}

impl Surface for CanvasSurface {
    fn draw(&mut self, frame: &Frame) {
        self.draw_world(frame);
        self.draw_hud(frame);
    }
}
