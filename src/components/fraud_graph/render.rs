//! Scene building and canvas rendering.
//!
//! Building the drawable scene is a pure function of the layout, the current
//! viewport transform, and the hover state, so it is testable without a DOM.
//! Drawing consumes a finished [`Scene`] in three passes: edges with
//! arrowheads, then nodes, then the hover tooltip on top.

use std::collections::HashMap;
use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::layout::{GraphLayout, inset_segment};
use super::style::{Color, RiskBand, ViewStyle};
use super::viewport::ViewportController;

/// A node resolved to screen coordinates with presentation state applied.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
	pub id: String,
	pub ring_id: Option<String>,
	pub x: f64,
	pub y: f64,
	/// Screen-space radius (already scaled by the viewport).
	pub radius: f64,
	pub fill: Color,
	pub border: Color,
	pub band: RiskBand,
	pub score: i32,
	pub hovered: bool,
	/// Critical-risk nodes (score ≥ 85) pulse.
	pub pulsing: bool,
}

/// An edge segment in screen coordinates, endpoints already inset so the
/// arrowhead meets the target node's boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneEdge {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
	/// True when either endpoint is the hovered node.
	pub highlighted: bool,
}

/// Tooltip for the hovered node.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
	pub x: f64,
	pub y: f64,
	pub id: String,
	pub score: i32,
	pub band: RiskBand,
	pub ring_id: Option<String>,
}

/// The complete drawable scene for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
	pub edges: Vec<SceneEdge>,
	pub nodes: Vec<SceneNode>,
	pub tooltip: Option<Tooltip>,
	/// The viewport scale the scene was built at; screen-space line widths
	/// and fonts scale with it.
	pub scale: f64,
}

/// Map a laid-out graph through the viewport into a drawable scene.
///
/// Edges whose endpoints are not among the current nodes (stale references)
/// are silently skipped.
pub fn build_scene(
	layout: &GraphLayout,
	viewport: &ViewportController,
	style: &ViewStyle,
	hover: Option<&str>,
) -> Scene {
	let scale = viewport.transform().scale;
	let positions: HashMap<&str, (f64, f64)> = layout
		.nodes
		.iter()
		.map(|n| (n.id.as_str(), (n.x, n.y)))
		.collect();

	let edges = layout
		.edges
		.iter()
		.filter_map(|e| {
			let &src = positions.get(e.source.as_str())?;
			let &tgt = positions.get(e.target.as_str())?;
			// Inset in world space so the gap scales with zoom.
			let (a, b) = inset_segment(src, tgt, style.edge_inset);
			let (x1, y1) = viewport.apply(a.0, a.1);
			let (x2, y2) = viewport.apply(b.0, b.1);
			let highlighted = hover
				.is_some_and(|h| e.source == h || e.target == h);
			Some(SceneEdge { x1, y1, x2, y2, highlighted })
		})
		.collect();

	let mut tooltip = None;
	let nodes = layout
		.nodes
		.iter()
		.map(|n| {
			let (x, y) = viewport.apply(n.x, n.y);
			let hovered = hover == Some(n.id.as_str());
			let band = RiskBand::for_score(n.score);
			let world_radius = if hovered {
				style.hover_radius
			} else {
				style.node_radius
			};
			if hovered {
				tooltip = Some(Tooltip {
					x,
					y,
					id: n.id.clone(),
					score: n.score,
					band,
					ring_id: n.ring_id.clone(),
				});
			}
			SceneNode {
				id: n.id.clone(),
				ring_id: n.ring_id.clone(),
				x,
				y,
				radius: world_radius * scale,
				fill: band.fill(),
				border: band.border(),
				band,
				score: n.score,
				hovered,
				pulsing: matches!(band, RiskBand::Critical),
			}
		})
		.collect();

	Scene { edges, nodes, tooltip, scale }
}

/// Find the topmost node whose circle contains the given screen point.
pub fn hit_test(
	layout: &GraphLayout,
	viewport: &ViewportController,
	style: &ViewStyle,
	sx: f64,
	sy: f64,
) -> Option<String> {
	let (wx, wy) = viewport.screen_to_world(sx, sy);
	layout
		.nodes
		.iter()
		.rev()
		.find(|n| {
			let (dx, dy) = (n.x - wx, n.y - wy);
			(dx * dx + dy * dy).sqrt() <= style.node_radius
		})
		.map(|n| n.id.clone())
}

const EDGE_COLOR: &str = "#333333";
const EDGE_HIGHLIGHT: &str = "#f97316";
const EDGE_SHADOW: &str = "rgba(0, 0, 0, 0.08)";
const BACKGROUND: &str = "#fafafa";

/// Pulse phase in [0, 1] for a given time in seconds. One full breathing
/// cycle every two seconds, independent of the display refresh rate.
fn pulse_phase(time: f64) -> f64 {
	(time * PI).sin() * 0.5 + 0.5
}

/// Draw one frame. `time` is seconds since the page's time origin and
/// drives the critical-risk pulse animation.
pub fn draw(
	ctx: &CanvasRenderingContext2d,
	scene: &Scene,
	style: &ViewStyle,
	width: f64,
	height: f64,
	time: f64,
) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, width, height);

	for edge in &scene.edges {
		draw_edge(ctx, edge, style, scene.scale);
	}
	for node in &scene.nodes {
		draw_node(ctx, node, style, scene.scale, time);
	}
	if let Some(tooltip) = &scene.tooltip {
		draw_tooltip(ctx, tooltip, scene.scale);
	}
}

fn draw_edge(ctx: &CanvasRenderingContext2d, edge: &SceneEdge, style: &ViewStyle, k: f64) {
	// Shadow pass gives the line a slight sense of depth.
	ctx.set_stroke_style_str(EDGE_SHADOW);
	ctx.set_line_width(if edge.highlighted { 5.0 } else { 4.0 } * k);
	ctx.begin_path();
	ctx.move_to(edge.x1, edge.y1);
	ctx.line_to(edge.x2, edge.y2);
	ctx.stroke();

	let color = if edge.highlighted { EDGE_HIGHLIGHT } else { EDGE_COLOR };
	ctx.set_stroke_style_str(color);
	ctx.set_line_width(if edge.highlighted { 2.5 } else { 1.8 } * k);
	ctx.begin_path();
	ctx.move_to(edge.x1, edge.y1);
	ctx.line_to(edge.x2, edge.y2);
	ctx.stroke();

	draw_arrowhead(ctx, edge, style.arrow_size * k, color);
}

fn draw_arrowhead(ctx: &CanvasRenderingContext2d, edge: &SceneEdge, size: f64, color: &str) {
	let (dx, dy) = (edge.x2 - edge.x1, edge.y2 - edge.y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);
	let (back_x, back_y) = (edge.x2 - ux * size, edge.y2 - uy * size);
	let (px, py) = (-uy * size * 0.5, ux * size * 0.5);

	ctx.set_fill_style_str(color);
	ctx.begin_path();
	ctx.move_to(edge.x2, edge.y2);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	node: &SceneNode,
	style: &ViewStyle,
	k: f64,
	time: f64,
) {
	if node.pulsing {
		// Halo breathes between its base radius and base + 4 world units.
		let phase = pulse_phase(time);
		let halo = (style.pulse_radius + 4.0 * phase) * k;
		let alpha = 0.18 - 0.13 * phase;
		ctx.set_fill_style_str(&node.fill.with_alpha(alpha).to_css());
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, halo, 0.0, 2.0 * PI);
		ctx.fill();
	}

	ctx.begin_path();
	let _ = ctx.arc(node.x, node.y, node.radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&node.fill.to_css());
	ctx.fill();
	ctx.set_stroke_style_str(&node.border.to_css());
	ctx.set_line_width(if node.hovered { 2.5 } else { 1.5 } * k);
	ctx.stroke();

	ctx.set_fill_style_str("#ffffff");
	ctx.set_font(&format!("600 {}px sans-serif", style.label_size * k));
	ctx.set_text_align("center");
	let _ = ctx.fill_text(short_id(&node.id), node.x, node.y + style.label_size * k * 0.4);
}

fn draw_tooltip(ctx: &CanvasRenderingContext2d, tooltip: &Tooltip, k: f64) {
	let (w, h) = (130.0 * k, 52.0 * k);
	let (x, y) = (tooltip.x + 20.0 * k, tooltip.y - 28.0 * k);

	ctx.set_fill_style_str("rgba(17, 17, 17, 0.95)");
	ctx.fill_rect(x, y, w, h);

	ctx.set_text_align("center");
	let cx = x + w / 2.0;

	ctx.set_fill_style_str("#ffffff");
	ctx.set_font(&format!("600 {}px sans-serif", 8.5 * k));
	let _ = ctx.fill_text(&tooltip.id, cx, y + 15.0 * k);

	ctx.set_fill_style_str("#aaaaaa");
	ctx.set_font(&format!("{}px sans-serif", 7.5 * k));
	let detail = match &tooltip.ring_id {
		Some(ring) => format!("Score: {} · {}", tooltip.score, ring),
		None => format!("Score: {}", tooltip.score),
	};
	let _ = ctx.fill_text(&detail, cx, y + 29.0 * k);

	ctx.set_fill_style_str(&tooltip.band.fill().to_css());
	ctx.set_font(&format!("{}px sans-serif", 7.0 * k));
	let _ = ctx.fill_text(tooltip.band.label(), cx, y + 42.0 * k);
}

/// Account ids render without their common prefix to keep labels short.
fn short_id(id: &str) -> &str {
	id.strip_prefix("ACC_").unwrap_or(id)
}
