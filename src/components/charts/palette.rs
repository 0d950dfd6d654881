use std::collections::HashMap;

/// Tableau 10.
pub const COLORS: &[&str] = &[
	"#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
	"#9c755f", "#bab0ab",
];

pub fn color_at(index: usize) -> &'static str {
	COLORS[index % COLORS.len()]
}

/// `#rrggbb` with an alpha channel, as a CSS `rgba()` string.
pub fn with_alpha(hex: &str, alpha: f64) -> String {
	let channel = |i: usize| {
		hex.get(i..i + 2)
			.and_then(|c| u8::from_str_radix(c, 16).ok())
			.unwrap_or(0)
	};
	format!(
		"rgba({}, {}, {}, {})",
		channel(1),
		channel(3),
		channel(5),
		alpha.clamp(0.0, 1.0)
	)
}

/// Category → palette slot, assigned in first-seen order.
///
/// Re-assigning an unchanged category set keeps the existing slots, whatever
/// order the categories arrive in.
#[derive(Clone, Debug, Default)]
pub struct CategoryPalette {
	order: Vec<String>,
	slots: HashMap<String, usize>,
}

impl CategoryPalette {
	pub fn new<'a>(categories: impl IntoIterator<Item = &'a str>) -> Self {
		let mut palette = Self::default();
		palette.assign(categories);
		palette
	}

	pub fn assign<'a>(&mut self, categories: impl IntoIterator<Item = &'a str>) {
		let mut order: Vec<String> = Vec::new();
		for category in categories {
			if !order.iter().any(|c| c == category) {
				order.push(category.to_owned());
			}
		}
		let unchanged = order.len() == self.order.len()
			&& order.iter().all(|c| self.slots.contains_key(c));
		if unchanged {
			return;
		}
		self.slots = order
			.iter()
			.enumerate()
			.map(|(i, c)| (c.clone(), i))
			.collect();
		self.order = order;
	}

	/// Categories in slot order.
	pub fn categories(&self) -> &[String] {
		&self.order
	}

	pub fn slot(&self, category: &str) -> Option<usize> {
		self.slots.get(category).copied()
	}

	pub fn color(&self, category: &str) -> &'static str {
		color_at(self.slot(category).unwrap_or(0))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn first_seen_gets_first_color() {
		let p = CategoryPalette::new(["Asia", "Europe", "Asia", "Africa"]);
		assert_eq!(p.categories(), &["Asia", "Europe", "Africa"]);
		assert_eq!(p.color("Asia"), COLORS[0]);
		assert_eq!(p.color("Africa"), COLORS[2]);
	}

	#[test]
	fn same_category_set_keeps_slots_across_reorders() {
		let mut p = CategoryPalette::new(["Asia", "Europe"]);
		p.assign(["Europe", "Asia", "Europe"]);
		assert_eq!(p.slot("Asia"), Some(0));
		assert_eq!(p.slot("Europe"), Some(1));
	}

	#[test]
	fn changed_category_set_reassigns() {
		let mut p = CategoryPalette::new(["Asia", "Europe"]);
		p.assign(["Oceania", "Asia"]);
		assert_eq!(p.slot("Oceania"), Some(0));
		assert_eq!(p.slot("Europe"), None);
	}

	#[test]
	fn alpha_string() {
		assert_eq!(with_alpha("#4e79a7", 0.5), "rgba(78, 121, 167, 0.5)");
	}
}
