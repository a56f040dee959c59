use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::Style;
use crate::graph::Scene;

pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Clears the surface and draws `scene`: lines under circles under labels.
pub fn paint(scene: &Scene, style: &Style, width: f64, height: f64, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(style.background);
	ctx.fill_rect(0.0, 0.0, width, height);
	draw_lines(scene, style, ctx);
	draw_circles(scene, style, ctx);
	draw_labels(scene, style, ctx);
}

fn draw_lines(scene: &Scene, style: &Style, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(style.link_color);
	ctx.set_line_width(style.link_width);
	ctx.begin_path();
	for line in &scene.lines {
		ctx.move_to(line.x1, line.y1);
		ctx.line_to(line.x2, line.y2);
	}
	ctx.stroke();
}

fn draw_circles(scene: &Scene, style: &Style, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(style.node_fill);
	for circle in &scene.circles {
		ctx.begin_path();
		let _ = ctx.arc(circle.cx, circle.cy, circle.r, 0.0, 2.0 * PI);
		ctx.fill();
	}
}

fn draw_labels(scene: &Scene, style: &Style, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(style.label_color);
	ctx.set_font(style.label_font);
	for label in &scene.labels {
		let _ = ctx.fill_text(&label.text, label.x, label.y);
	}
}
