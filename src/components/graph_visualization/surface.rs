//! The canvas-backed render surface: created once per mount, torn down once
//! on unmount, updated in place in between.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Element, HtmlAnchorElement, HtmlCanvasElement, Window};

use super::render;
use super::state::GraphState;
use super::types::{GraphData, GraphLink};

const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);
pub const EXPORT_FILE_NAME: &str = "graph.png";
/// Set on the canvas while a surface owns it; cleared by `destroy`.
pub const SURFACE_ATTR: &str = "data-surface";
/// Current view scale, mirrored onto the canvas.
pub const SCALE_ATTR: &str = "data-scale";

thread_local! {
	static NEXT_ID: Cell<u32> = const { Cell::new(1) };
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn window() -> Result<Window, JsValue> {
	web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

/// Size of the canvas' parent, or a fixed fallback when it has none.
fn measure(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|(w, h)| *w > 0.0 && *h > 0.0)
		.unwrap_or(FALLBACK_SIZE)
}

pub struct RenderSurface {
	state: Rc<RefCell<GraphState>>,
	canvas: HtmlCanvasElement,
	scale: Cell<f64>,
	alive: Rc<Cell<bool>>,
	frame: Rc<Cell<Option<i32>>>,
	animate: FrameCallback,
	resize_cb: Option<Closure<dyn FnMut()>>,
}

impl RenderSurface {
	/// Size the canvas, lay out `layout`, draw `drawn` and start the frame
	/// loop.
	pub fn mount(
		canvas: HtmlCanvasElement,
		layout: &GraphData,
		drawn: &[GraphLink],
	) -> Result<Self, JsValue> {
		let window = window()?;
		let (w, h) = measure(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")?
			.ok_or_else(|| JsValue::from_str("2d context unavailable"))?
			.dyn_into()
			.map_err(JsValue::from)?;
		let mut initial = GraphState::new(layout, w, h);
		initial.set_drawn_links(drawn);
		let state = Rc::new(RefCell::new(initial));

		let (state_resize, canvas_resize) = (state.clone(), canvas.clone());
		let resize_cb = Closure::<dyn FnMut()>::new(move || {
			let (nw, nh) = measure(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			state_resize.borrow_mut().resize(nw, nh);
		});
		window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())?;

		let alive = Rc::new(Cell::new(true));
		let frame = Rc::new(Cell::new(None));
		let animate: FrameCallback = Rc::new(RefCell::new(None));
		let (state_anim, alive_anim, frame_anim, animate_inner) =
			(state.clone(), alive.clone(), frame.clone(), animate.clone());
		*animate.borrow_mut() = Some(Closure::new(move || {
			if !alive_anim.get() {
				return;
			}
			{
				let mut s = state_anim.borrow_mut();
				if s.animation_running {
					s.tick(0.016);
				}
				render::render(&s, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let next = web_sys::window()
					.and_then(|w| w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
				frame_anim.set(next);
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			frame.set(Some(window.request_animation_frame(cb.as_ref().unchecked_ref())?));
		}

		let id = NEXT_ID.with(|n| n.replace(n.get() + 1));
		canvas.set_attribute(SURFACE_ATTR, &id.to_string())?;
		debug!(
			"graph surface #{} mounted at {}x{} with {} nodes",
			id,
			w,
			h,
			state.borrow().node_count()
		);
		let surface = Self {
			state,
			canvas,
			scale: Cell::new(f64::NAN),
			alive,
			frame,
			animate,
			resize_cb: Some(resize_cb),
		};
		surface.sync_scale();
		Ok(surface)
	}

	pub fn with_state<R>(&self, f: impl FnOnce(&mut GraphState) -> R) -> R {
		let out = f(&mut self.state.borrow_mut());
		self.sync_scale();
		out
	}

	fn sync_scale(&self) {
		let k = self.state.borrow().transform.k;
		if self.scale.replace(k) != k {
			let _ = self.canvas.set_attribute(SCALE_ATTR, &format!("{:.3}", k));
		}
	}

	/// Replace what is drawn without recreating the surface. The layout is
	/// only rebuilt when `layout`'s structure changed.
	pub fn set_data(&self, layout: &GraphData, drawn: &[GraphLink]) {
		let mut state = self.state.borrow_mut();
		if state.set_layout(layout) {
			debug!("graph layout rebuilt with {} nodes", state.node_count());
		}
		state.set_drawn_links(drawn);
	}

	/// Download the current frame as a PNG.
	pub fn export_png(&self) -> Result<(), JsValue> {
		let url = self.canvas.to_data_url_with_type("image/png")?;
		let document = window()?
			.document()
			.ok_or_else(|| JsValue::from_str("no document"))?;
		let link: HtmlAnchorElement = document.create_element("a")?.dyn_into().map_err(JsValue::from)?;
		link.set_href(&url);
		link.set_download(EXPORT_FILE_NAME);
		link.click();
		Ok(())
	}

	/// Stop the frame loop and drop listeners. Safe to call more than once.
	pub fn destroy(&mut self) {
		if !self.alive.replace(false) {
			return;
		}
		if let Ok(window) = window() {
			if let Some(id) = self.frame.take() {
				let _ = window.cancel_animation_frame(id);
			}
			if let Some(cb) = self.resize_cb.take() {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
		// breaks the closure's reference to itself
		self.animate.borrow_mut().take();
		let _ = self.canvas.remove_attribute(SURFACE_ATTR);
		debug!("graph surface destroyed");
	}
}

impl Drop for RenderSurface {
	fn drop(&mut self) {
		self.destroy();
	}
}

/// Enter fullscreen on `container`, or leave it if something is already
/// fullscreen. Returns whether we are fullscreen afterwards.
pub fn toggle_fullscreen(container: &Element) -> Result<bool, JsValue> {
	let document = window()?
		.document()
		.ok_or_else(|| JsValue::from_str("no document"))?;
	if document.fullscreen_element().is_some() {
		document.exit_fullscreen();
		Ok(false)
	} else {
		container.request_fullscreen()?;
		Ok(true)
	}
}
