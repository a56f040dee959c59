use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, Window};

use super::paint;
use super::state::GraphViewState;
use crate::config::ViewConfig;
use crate::graph::{Graph, fetch_graph};

/// Fetches the graph once on mount and shows it, or the reason it failed,
/// inside `<div id="graph">`.
#[component]
pub fn GraphView(#[prop(optional)] config: Option<ViewConfig>) -> impl IntoView {
	let config = config.unwrap_or_default();
	let endpoint = config.endpoint.clone();
	let graph = LocalResource::new(move || {
		let endpoint = endpoint.clone();
		async move { fetch_graph(&endpoint).await }
	});

	view! {
		<div id="graph">
			{move || match graph.get() {
				None => view! { <p class="graph-status">"Loading graph..."</p> }.into_any(),
				Some(Ok(data)) => view! { <GraphCanvas graph=data config=config.clone() /> }.into_any(),
				Some(Err(err)) => {
					view! { <p class="graph-status graph-error">{err.to_string()}</p> }.into_any()
				}
			}}
		</div>
	}
}

/// Fixed-size canvas running the simulation until it settles, redrawing once per tick.
#[component]
fn GraphCanvas(graph: Graph, config: ViewConfig) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let animate_init = animate.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("no window to animate in");
			return;
		};

		canvas.set_width(config.width as u32);
		canvas.set_height(config.height as u32);
		let Some(ctx) = paint::context_2d(&canvas) else {
			error!("canvas has no 2d context");
			return;
		};

		let state = GraphViewState::new(graph.clone(), &config);
		paint::paint(&state.scene(), &state.style, state.width, state.height, &ctx);
		let state = Rc::new(RefCell::new(state));

		let (state_anim, animate_inner) = (state.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let mut s = state_anim.borrow_mut();
			if !s.tick() {
				info!("layout settled after {} ticks", s.simulation.ticks());
				return;
			}
			paint::paint(&s.scene(), &s.style, s.width, s.height, &ctx);
			drop(s);

			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = request_frame(&win, cb);
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = request_frame(&window, cb);
		}
	});

	view! { <canvas node_ref=canvas_ref class="graph-view-canvas" style="display: block;" /> }
}

fn request_frame(window: &Window, cb: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
	window.request_animation_frame(cb.as_ref().unchecked_ref())
}
