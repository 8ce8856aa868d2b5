//! Pan/zoom viewport controller.
//!
//! Owns one affine transform (translate + uniform scale) per graph view and
//! turns pointer/wheel input into synchronous transform updates. Dragging is
//! an explicit two-state machine so the "pointer-down on a node never pans"
//! rule is testable without a DOM.

/// Scale bounds and starting scale for one view.
#[derive(Clone, Copy, Debug)]
pub struct ViewportConfig {
	pub min_scale: f64,
	pub max_scale: f64,
	pub initial_scale: f64,
}

impl Default for ViewportConfig {
	fn default() -> Self {
		Self {
			min_scale: 0.3,
			max_scale: 5.0,
			initial_scale: 1.0,
		}
	}
}

/// The affine view transform: screen = world * scale + translate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub translate_x: f64,
	pub translate_y: f64,
	pub scale: f64,
}

/// Drag phase. A drag only ever starts on empty canvas and only ever ends on
/// pointer-up or pointer-leave; there is no timeout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum DragPhase {
	#[default]
	Idle,
	Panning {
		last_x: f64,
		last_y: f64,
	},
}

/// Wheel delta to scale-factor sensitivity (original UI parity).
const WHEEL_SENSITIVITY: f64 = 0.001 * 1.5;
/// Discrete zoom button step.
const ZOOM_STEP: f64 = 1.3;

/// Synchronous zoom/pan state machine for one graph view.
#[derive(Clone, Copy, Debug)]
pub struct ViewportController {
	config: ViewportConfig,
	transform: Viewport,
	drag: DragPhase,
}

impl Default for ViewportController {
	fn default() -> Self {
		Self::new(ViewportConfig::default())
	}
}

impl ViewportController {
	pub fn new(config: ViewportConfig) -> Self {
		Self {
			config,
			transform: Viewport {
				translate_x: 0.0,
				translate_y: 0.0,
				scale: config.initial_scale,
			},
			drag: DragPhase::Idle,
		}
	}

	pub fn transform(&self) -> Viewport {
		self.transform
	}

	/// Zoom percentage for the overlay readout.
	pub fn zoom_percent(&self) -> i32 {
		(self.transform.scale * 100.0).round() as i32
	}

	/// World to screen coordinates.
	pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
		(
			x * self.transform.scale + self.transform.translate_x,
			y * self.transform.scale + self.transform.translate_y,
		)
	}

	/// Screen to world coordinates, the inverse of [`apply`](Self::apply).
	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.translate_x) / self.transform.scale,
			(sy - self.transform.translate_y) / self.transform.scale,
		)
	}

	/// Wheel zoom anchored at the cursor: the world point under the cursor
	/// stays under the cursor. `delta_y` is the raw wheel delta (positive =
	/// zoom out, matching browser convention).
	pub fn wheel_zoom(&mut self, cursor_x: f64, cursor_y: f64, delta_y: f64) {
		let delta = -delta_y * WHEEL_SENSITIVITY;
		self.rescale_at(cursor_x, cursor_y, self.transform.scale * (1.0 + delta));
	}

	/// Discrete zoom in, anchored at the view origin.
	pub fn zoom_in(&mut self) {
		self.set_scale(self.transform.scale * ZOOM_STEP);
	}

	/// Discrete zoom out.
	pub fn zoom_out(&mut self) {
		self.set_scale(self.transform.scale / ZOOM_STEP);
	}

	/// Restore the initial scale and zero translation.
	pub fn reset(&mut self) {
		self.transform = Viewport {
			translate_x: 0.0,
			translate_y: 0.0,
			scale: self.config.initial_scale,
		};
	}

	/// Pointer-down at screen coordinates. `on_node` must be true when the
	/// event originated inside a node's hit area: click-to-inspect takes
	/// precedence and the pan never starts.
	pub fn pointer_down(&mut self, x: f64, y: f64, on_node: bool) {
		if !on_node {
			self.drag = DragPhase::Panning { last_x: x, last_y: y };
		}
	}

	/// Pointer-move. While panning, the frame-to-frame delta is added to the
	/// translation. Returns true if the move panned the view.
	pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
		match self.drag {
			DragPhase::Panning { last_x, last_y } => {
				self.transform.translate_x += x - last_x;
				self.transform.translate_y += y - last_y;
				self.drag = DragPhase::Panning { last_x: x, last_y: y };
				true
			}
			DragPhase::Idle => false,
		}
	}

	/// Pointer-up: end any drag.
	pub fn pointer_up(&mut self) {
		self.drag = DragPhase::Idle;
	}

	/// Pointer left the drawing surface: same as pointer-up.
	pub fn pointer_leave(&mut self) {
		self.drag = DragPhase::Idle;
	}

	pub fn is_panning(&self) -> bool {
		matches!(self.drag, DragPhase::Panning { .. })
	}

	fn set_scale(&mut self, scale: f64) {
		self.transform.scale = scale.clamp(self.config.min_scale, self.config.max_scale);
	}

	fn rescale_at(&mut self, cx: f64, cy: f64, scale: f64) {
		let new_scale = scale.clamp(self.config.min_scale, self.config.max_scale);
		let ratio = new_scale / self.transform.scale;
		self.transform.translate_x = cx - ratio * (cx - self.transform.translate_x);
		self.transform.translate_y = cy - ratio * (cy - self.transform.translate_y);
		self.transform.scale = new_scale;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: f64, b: f64) {
		assert!((a - b).abs() < 1e-9, "{a} != {b}");
	}

	#[test]
	fn zoom_keeps_cursor_point_fixed() {
		let mut vp = ViewportController::default();
		vp.pointer_down(0.0, 0.0, false);
		vp.pointer_move(40.0, -25.0);
		vp.pointer_up();

		let (cx, cy) = (310.0, 120.0);
		let world_before = vp.screen_to_world(cx, cy);
		vp.wheel_zoom(cx, cy, -240.0);
		let world_after = vp.screen_to_world(cx, cy);

		close(world_before.0, world_after.0);
		close(world_before.1, world_after.1);
		assert!(vp.transform().scale > 1.0);
	}

	#[test]
	fn repeated_zoom_stays_clamped() {
		let mut vp = ViewportController::default();
		for _ in 0..200 {
			vp.wheel_zoom(100.0, 100.0, -500.0);
		}
		close(vp.transform().scale, 5.0);
		assert_eq!(vp.zoom_percent(), 500);
		for _ in 0..200 {
			vp.zoom_out();
		}
		close(vp.transform().scale, 0.3);
		for _ in 0..10 {
			vp.zoom_in();
		}
		assert!(vp.transform().scale <= 5.0);
	}

	#[test]
	fn zoom_buttons_drive_percent_readout() {
		let mut vp = ViewportController::default();
		assert_eq!(vp.zoom_percent(), 100);
		vp.zoom_in();
		assert_eq!(vp.zoom_percent(), 130);
		vp.zoom_in();
		assert_eq!(vp.zoom_percent(), 169);
		vp.zoom_out();
		vp.zoom_out();
		assert_eq!(vp.zoom_percent(), 100);
		vp.zoom_out();
		assert_eq!(vp.zoom_percent(), 77);
		vp.reset();
		assert_eq!(vp.zoom_percent(), 100);
	}

	#[test]
	fn pan_accumulates_frame_deltas() {
		let mut vp = ViewportController::default();
		vp.pointer_down(10.0, 10.0, false);
		assert!(vp.pointer_move(15.0, 12.0));
		assert!(vp.pointer_move(25.0, 2.0));
		vp.pointer_up();
		let t = vp.transform();
		close(t.translate_x, 15.0);
		close(t.translate_y, -8.0);

		// Moves after pointer-up are ignored.
		assert!(!vp.pointer_move(100.0, 100.0));
		close(vp.transform().translate_x, 15.0);
	}

	#[test]
	fn pointer_down_on_node_never_pans() {
		let mut vp = ViewportController::default();
		vp.pointer_down(10.0, 10.0, true);
		assert!(!vp.is_panning());
		assert!(!vp.pointer_move(50.0, 50.0));
		close(vp.transform().translate_x, 0.0);
		close(vp.transform().translate_y, 0.0);
	}

	#[test]
	fn pointer_leave_ends_drag() {
		let mut vp = ViewportController::default();
		vp.pointer_down(0.0, 0.0, false);
		vp.pointer_leave();
		assert!(!vp.pointer_move(10.0, 10.0));
	}

	#[test]
	fn reset_restores_initial_view() {
		let mut vp = ViewportController::new(ViewportConfig {
			min_scale: 0.3,
			max_scale: 5.0,
			initial_scale: 1.0,
		});
		vp.wheel_zoom(50.0, 50.0, -120.0);
		vp.pointer_down(0.0, 0.0, false);
		vp.pointer_move(30.0, 30.0);
		vp.pointer_up();
		vp.reset();
		assert_eq!(
			vp.transform(),
			Viewport { translate_x: 0.0, translate_y: 0.0, scale: 1.0 }
		);
	}

	#[test]
	fn apply_round_trips_through_screen_to_world() {
		let mut vp = ViewportController::default();
		vp.wheel_zoom(77.0, 31.0, -300.0);
		let (sx, sy) = vp.apply(155.0, 160.0);
		let (wx, wy) = vp.screen_to_world(sx, sy);
		close(wx, 155.0);
		close(wy, 160.0);
	}
}
