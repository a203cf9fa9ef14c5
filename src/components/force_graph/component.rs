//! Leptos component wrapping the force-directed graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel event
//! handlers for hover, click-to-focus, node dragging, panning, and zooming.
//! An animation loop runs via `requestAnimationFrame`, stepping the physics
//! simulation and repainting each frame.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;
use log::info;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::scale::ScaleConfig;
use super::state::ForceGraphState;
use super::theme::Theme;
use crate::config::GraphConfig;
use crate::model::DatasetGraph;

/// Bundles graph simulation state with visual configuration.
struct GraphContext {
	state: ForceGraphState,
	scale: ScaleConfig,
	theme: Theme,
}

fn window_size(window: &Window) -> (f64, f64) {
	(
		window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0),
		window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0),
	)
}

/// Pointer position relative to the canvas.
fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((ev.client_x() as f64 - rect.left(), ev.client_y() as f64 - rect.top()))
}

/// Renders an interactive dataset graph on a canvas element.
///
/// The graph is rebuilt whenever the `data` signal changes, which also
/// discards any selection. The component sizes itself to its parent
/// container by default; set `fullscreen = true` to fill the viewport and
/// resize automatically with the window.
#[component]
pub fn ForceGraphCanvas(
	/// Graph to lay out.
	#[prop(into)]
	data: Signal<Arc<DatasetGraph>>,
	/// Curvature bound, theme and highlight palette.
	#[prop(optional)]
	config: GraphConfig,
	/// Fill the viewport and follow window resizes.
	#[prop(default = false)]
	fullscreen: bool,
	/// Fixed width in CSS pixels; the parent's width otherwise.
	#[prop(default = None)]
	width: Option<f64>,
	/// Fixed height in CSS pixels; the parent's height otherwise.
	#[prop(default = None)]
	height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) = (context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let dataset = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			return;
		};

		info!("record-graph: rendering {} entities", dataset.entities.len());
		*context_init.borrow_mut() = Some(GraphContext {
			state: ForceGraphState::new(dataset, &config, w, h),
			scale: ScaleConfig::default(),
			theme: Theme::by_name(&config.theme),
		});

		if fullscreen && resize_cb_init.borrow().is_none() {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = window_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		// the running loop picks up the replaced context
		if animate_init.borrow().is_some() {
			return;
		}
		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				if c.state.animation_running {
					c.state.tick(0.016);
				}
				render::render(&c.state, &ctx, &c.scale, &c.theme);
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// every handler forwards to the state, if the canvas is set up
	let with_context = {
		let context = context.clone();
		move |f: &mut dyn FnMut(&mut GraphContext)| {
			if let Some(ref mut c) = *context.borrow_mut() {
				f(c);
			}
		}
	};

	let on_mousedown = {
		let with_context = with_context.clone();
		move |ev: MouseEvent| {
			if let Some((x, y)) = canvas_point(canvas_ref, &ev) {
				with_context(&mut |c| c.state.press(x, y, &c.scale));
			}
		}
	};

	let on_mousemove = {
		let with_context = with_context.clone();
		move |ev: MouseEvent| {
			if let Some((x, y)) = canvas_point(canvas_ref, &ev) {
				with_context(&mut |c| c.state.move_to(x, y, &c.scale));
			}
		}
	};

	let on_mouseup = {
		let with_context = with_context.clone();
		move |ev: MouseEvent| {
			let point = canvas_point(canvas_ref, &ev);
			with_context(&mut |c| c.state.release_at(point, &c.scale));
		}
	};

	let on_mouseleave = {
		let with_context = with_context.clone();
		move |_: MouseEvent| with_context(&mut |c| c.state.leave())
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some((x, y)) = canvas_point(canvas_ref, &ev) {
			let zoom_in = ev.delta_y() < 0.0;
			with_context(&mut |c| c.state.zoom_at(x, y, zoom_in));
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
