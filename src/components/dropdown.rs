//! Select-style dropdown that closes on outside clicks.

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::JsCast;

/// Open/closed state of a dropdown menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
	open: bool,
}

impl MenuState {
	pub fn is_open(&self) -> bool {
		self.open
	}

	pub fn toggle(&mut self) {
		self.open = !self.open;
	}

	/// Picking an option always closes the menu.
	pub fn select(&mut self) {
		self.open = false;
	}

	/// Closes the menu; returns whether it was open.
	pub fn dismiss(&mut self) -> bool {
		std::mem::take(&mut self.open)
	}
}

/// Button showing `label` that opens a list of `options`; `on_select`
/// receives the index of the picked option.
#[component]
pub fn Dropdown(
	#[prop(into)] label: Signal<String>,
	options: Vec<String>,
	#[prop(into)] on_select: Callback<usize>,
) -> impl IntoView {
	let container = NodeRef::<leptos::html::Div>::new();
	let (menu, set_menu) = signal(MenuState::default());

	let outside = window_event_listener(leptos::ev::mousedown, move |ev| {
		if !menu.get_untracked().is_open() {
			return;
		}
		let Some(root) = container.get_untracked() else {
			return;
		};
		let inside = ev
			.target()
			.and_then(|t| t.dyn_into::<web_sys::Node>().ok())
			.is_some_and(|node| root.contains(Some(&node)));
		if !inside {
			set_menu.update(|m| {
				m.dismiss();
			});
		}
	});
	on_cleanup(move || outside.remove());

	let items = options
		.into_iter()
		.enumerate()
		.map(|(i, option)| {
			view! {
				<li>
					<button
						class="dropdown-option"
						on:click=move |_| {
							debug!("dropdown option {i} selected");
							set_menu.update(MenuState::select);
							on_select.run(i);
						}
					>
						{option}
					</button>
				</li>
			}
		})
		.collect_view();

	view! {
		<div node_ref=container class="dropdown" style="position: relative; display: inline-block;">
			<button class="dropdown-toggle" on:click=move |_| set_menu.update(MenuState::toggle)>
				{move || label.get()}
				" ▾"
			</button>
			<ul
				class="dropdown-menu"
				style:display=move || if menu.get().is_open() { "block" } else { "none" }
			>
				{items}
			</ul>
		</div>
	}
}
