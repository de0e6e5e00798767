//! Visual theming for the force graph.

use crate::config::ThemeName;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in [0, 1].
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with alpha replaced.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	/// CSS color string; hex when opaque, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Hex CSS color, ignoring alpha.
	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}

	/// Parses `#RRGGBB` (either case). Anything else is mid gray.
	pub fn parse(css: &str) -> Self {
		let channel = |range: std::ops::Range<usize>| {
			css.get(range)
				.and_then(|hex| u8::from_str_radix(hex, 16).ok())
				.unwrap_or(128)
		};
		if css.starts_with('#') && css.len() == 7 {
			Color::rgb(channel(1..3), channel(3..5), channel(5..7))
		} else {
			Color::rgb(128, 128, 128)
		}
	}
}

/// Fallback colors for nodes that carry none.
#[derive(Clone, Debug)]
pub struct NodePalette {
	/// Colors cycled by node index.
	pub colors: Vec<Color>,
}

impl NodePalette {
	/// Muted slate blues and teals.
	pub fn slate() -> Self {
		Self {
			colors: vec![
				Color::rgb(94, 129, 172),  // Steel blue
				Color::rgb(129, 161, 193), // Light steel
				Color::rgb(100, 148, 160), // Teal gray
				Color::rgb(136, 160, 175), // Cadet blue
			],
		}
	}

	/// Color for node `index`, wrapping around the palette.
	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Center color of the radial gradient
	pub color_secondary: Color,
	/// Whether to draw the radial gradient
	pub use_gradient: bool,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Line and arrowhead color
	pub color: Color,
	/// Relationship label text color
	pub label_color: Color,
	/// Plate drawn behind relationship labels
	pub label_background: Color,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Whether nodes have inner gradients
	pub use_gradient: bool,
	/// Border/stroke width (0 = no border)
	pub border_width: f64,
	/// Border/stroke color
	pub border_color: Color,
	/// Label text color
	pub label_color: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Name exposed as the page's `data-theme`.
	pub name: &'static str,
	/// Canvas background.
	pub background: BackgroundStyle,
	/// Edge lines and labels.
	pub edge: EdgeStyle,
	/// Node fill, border and labels.
	pub node: NodeStyle,
	/// Fallback node colors.
	pub palette: NodePalette,
}

impl Theme {
	/// Dark canvas with gradient nodes (default)
	pub fn dark() -> Self {
		Self {
			name: "dark",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				color_secondary: Color::rgb(30, 35, 42),
				use_gradient: true,
			},
			edge: EdgeStyle {
				color: Color::rgba(148, 163, 184, 0.6),
				label_color: Color::rgb(203, 213, 225),
				label_background: Color::rgba(22, 27, 34, 0.8),
			},
			node: NodeStyle {
				use_gradient: true,
				border_width: 0.0,
				border_color: Color::rgba(255, 255, 255, 0.0),
				label_color: Color::rgb(255, 255, 255),
			},
			palette: NodePalette::slate(),
		}
	}

	/// Flat white canvas with slate edges
	pub fn light() -> Self {
		Self {
			name: "light",
			background: BackgroundStyle {
				color: Color::rgb(255, 255, 255),
				color_secondary: Color::rgb(255, 255, 255),
				use_gradient: false,
			},
			edge: EdgeStyle {
				color: Color::rgb(148, 163, 184),
				label_color: Color::rgb(100, 116, 139),
				label_background: Color::rgba(255, 255, 255, 0.8),
			},
			node: NodeStyle {
				use_gradient: false,
				border_width: 1.0,
				border_color: Color::rgba(15, 23, 42, 0.25),
				label_color: Color::rgb(15, 23, 42),
			},
			palette: NodePalette::slate(),
		}
	}

	/// Theme for a configured name.
	pub fn named(name: ThemeName) -> Self {
		match name {
			ThemeName::Dark => Self::dark(),
			ThemeName::Light => Self::light(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::dark()
	}
}
