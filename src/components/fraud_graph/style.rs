//! Risk banding and per-view visual style.
//!
//! Node color encodes the suspicion score; the bands and their palette match
//! the investigation report legend (critical ≥85, high ≥70, medium ≥55).

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Score band a node falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskBand {
	Critical,
	High,
	Medium,
	Low,
}

impl RiskBand {
	pub fn for_score(score: i32) -> Self {
		match score {
			s if s >= 85 => Self::Critical,
			s if s >= 70 => Self::High,
			s if s >= 55 => Self::Medium,
			_ => Self::Low,
		}
	}

	/// Node fill color.
	pub fn fill(self) -> Color {
		match self {
			Self::Critical => Color::rgb(0xdc, 0x26, 0x26),
			Self::High => Color::rgb(0xf9, 0x73, 0x16),
			Self::Medium => Color::rgb(0x3b, 0x82, 0xf6),
			Self::Low => Color::rgb(0x22, 0xc5, 0x5e),
		}
	}

	/// Darker border matching the fill.
	pub fn border(self) -> Color {
		match self {
			Self::Critical => Color::rgb(0x99, 0x1b, 0x1b),
			Self::High => Color::rgb(0xc2, 0x41, 0x0c),
			Self::Medium => Color::rgb(0x1d, 0x4e, 0xd8),
			Self::Low => Color::rgb(0x15, 0x80, 0x3d),
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::Critical => "Critical",
			Self::High => "High Risk",
			Self::Medium => "Medium",
			Self::Low => "Low",
		}
	}
}

/// Fixed visual metrics for one graph view. The ring cards draw larger nodes
/// than the denser global view.
#[derive(Clone, Copy, Debug)]
pub struct ViewStyle {
	/// Node circle radius in world units.
	pub node_radius: f64,
	/// Radius while hovered.
	pub hover_radius: f64,
	/// How far edge endpoints are pulled back from node centers.
	pub edge_inset: f64,
	/// Arrowhead length in world units.
	pub arrow_size: f64,
	/// Pulse halo radius for critical-risk nodes.
	pub pulse_radius: f64,
	/// Node id label font size in world units.
	pub label_size: f64,
}

impl ViewStyle {
	/// Single-ring card view.
	pub fn ring() -> Self {
		Self {
			node_radius: 22.0,
			hover_radius: 25.0,
			edge_inset: 23.0,
			arrow_size: 8.0,
			pulse_radius: 28.0,
			label_size: 9.0,
		}
	}

	/// Global multi-ring view.
	pub fn global() -> Self {
		Self {
			node_radius: 14.0,
			hover_radius: 17.0,
			edge_inset: 15.0,
			arrow_size: 6.0,
			pulse_radius: 18.0,
			label_size: 6.5,
		}
	}
}
