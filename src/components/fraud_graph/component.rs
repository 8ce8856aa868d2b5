//! Leptos component wrapping a fraud-graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel
//! handlers for panning, zooming, hovering, and click-to-inspect, plus
//! discrete zoom in/out/reset buttons with a zoom percent readout. An
//! animation loop runs via `requestAnimationFrame`, rebuilding the drawable
//! scene each frame so the critical-risk pulse stays animated.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::interact::{GraphAction, InteractionDispatcher};
use super::layout::GraphLayout;
use super::render::{build_scene, draw, hit_test};
use super::style::ViewStyle;
use super::types::Ring;
use super::viewport::ViewportController;

/// Per-canvas interaction state shared between event handlers and the
/// animation loop.
struct GraphContext {
	viewport: ViewportController,
	dispatcher: InteractionDispatcher,
	/// Node under the pointer at the last mousedown; a click only fires when
	/// the button releases over the same node.
	pressed_node: Option<String>,
	/// Seconds since the page's time origin, taken from the frame timestamp.
	time: f64,
	width: f64,
	height: f64,
}

fn event_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Renders an interactive fraud-ring graph on a canvas element.
///
/// `layout` carries the positioned nodes and finalized edges for either a
/// single ring or the global network; `rings` supplies membership for the
/// click actions. Emitted [`GraphAction`]s go to `on_action`.
#[component]
pub fn FraudGraphCanvas(
	#[prop(into)] layout: Signal<GraphLayout>,
	#[prop(into)] rings: Signal<Vec<Ring>>,
	#[prop(default = ViewStyle::global())] style: ViewStyle,
	#[prop(default = 880.0)] width: f64,
	#[prop(default = 600.0)] height: f64,
	#[prop(into, optional)] on_action: Option<Callback<GraphAction>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init) = (context.clone(), animate.clone());
	let (zoom_percent, set_zoom_percent) = signal(100);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		*context_init.borrow_mut() = Some(GraphContext {
			viewport: ViewportController::default(),
			dispatcher: InteractionDispatcher::new(&rings.get_untracked()),
			pressed_node: None,
			time: 0.0,
			width,
			height,
		});

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move |now: f64| {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				// `now` is the DOMHighResTimeStamp in milliseconds, so the
				// pulse speed does not depend on the display refresh rate.
				c.time = now / 1000.0;
				let scene = build_scene(
					&layout.get_untracked(),
					&c.viewport,
					&style,
					c.dispatcher.hovered(),
				);
				draw(&ctx, &scene, &style, c.width, c.height, c.time);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = web_sys::window()
				.unwrap()
				.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Rebuild the membership index when a new analysis result replaces the
	// ring set.
	let context_rings = context.clone();
	Effect::new(move |_| {
		let rings = rings.get();
		if let Some(ref mut c) = *context_rings.borrow_mut() {
			c.dispatcher = InteractionDispatcher::new(&rings);
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&canvas, &ev);
		if let Some(ref mut c) = *context_md.borrow_mut() {
			let hit = hit_test(&layout.get_untracked(), &c.viewport, &style, x, y);
			// A press on a node claims the gesture for click-to-inspect; the
			// pan only starts on empty canvas.
			c.viewport.pointer_down(x, y, hit.is_some());
			c.pressed_node = hit;
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&canvas, &ev);
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if !c.viewport.pointer_move(x, y) {
				let hit = hit_test(&layout.get_untracked(), &c.viewport, &style, x, y);
				c.dispatcher.set_hover(hit.as_deref());
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&canvas, &ev);
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.viewport.pointer_up();
			let released_on = hit_test(&layout.get_untracked(), &c.viewport, &style, x, y);
			if let (Some(pressed), Some(released)) = (c.pressed_node.take(), released_on) {
				if pressed == released {
					if let Some(cb) = on_action {
						for action in c.dispatcher.click(&released) {
							cb.run(action);
						}
					}
				}
			}
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.viewport.pointer_leave();
			c.pressed_node = None;
			c.dispatcher.set_hover(None);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&canvas, &ev);
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			c.viewport.wheel_zoom(x, y, ev.delta_y());
			set_zoom_percent.set(c.viewport.zoom_percent());
		}
	};

	let context_zi = context.clone();
	let on_zoom_in = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_zi.borrow_mut() {
			c.viewport.zoom_in();
			set_zoom_percent.set(c.viewport.zoom_percent());
		}
	};

	let context_zo = context.clone();
	let on_zoom_out = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_zo.borrow_mut() {
			c.viewport.zoom_out();
			set_zoom_percent.set(c.viewport.zoom_percent());
		}
	};

	let context_rst = context.clone();
	let on_reset = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_rst.borrow_mut() {
			c.viewport.reset();
			set_zoom_percent.set(c.viewport.zoom_percent());
		}
	};

	view! {
		<div class="fraud-graph" style="position: relative; display: inline-block;">
			<canvas
				node_ref=canvas_ref
				class="fraud-graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<div
				class="zoom-controls"
				style="position: absolute; top: 8px; right: 8px; display: flex; gap: 4px; align-items: center;"
			>
				<button on:click=on_zoom_in title="Zoom in">"+"</button>
				<button on:click=on_zoom_out title="Zoom out">"\u{2212}"</button>
				<button on:click=on_reset title="Reset view">"RST"</button>
				<span class="zoom-readout">{move || format!("{}%", zoom_percent.get())}</span>
			</div>
		</div>
	}
}
