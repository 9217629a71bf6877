use crate::{Color, Error};
use std::convert::TryFrom;

/// The keyword style of a line, using matplotlib's names. Every field is optional so a style can describe only the keys a caller cares about, and [`merge_styles`](fn.merge_styles.html) fills in the rest.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LineStyle {
	pub label: Option<String>,
	#[serde(alias = "c")]
	pub color: Option<Color>,
	#[serde(alias = "ls")]
	pub linestyle: Option<DashStyle>,
	#[serde(alias = "lw")]
	pub linewidth: Option<f32>,
	pub alpha: Option<f32>,
	pub marker: Option<Marker>,
}

impl LineStyle {
	pub fn new() -> LineStyle {
		LineStyle::default()
	}

	pub fn label(mut self, label: impl Into<String>) -> LineStyle {
		self.label = Some(label.into());
		self
	}

	pub fn color(mut self, color: Color) -> LineStyle {
		self.color = Some(color);
		self
	}

	pub fn linestyle(mut self, linestyle: DashStyle) -> LineStyle {
		self.linestyle = Some(linestyle);
		self
	}

	pub fn linewidth(mut self, linewidth: f32) -> LineStyle {
		self.linewidth = Some(linewidth);
		self
	}

	pub fn alpha(mut self, alpha: f32) -> LineStyle {
		self.alpha = Some(alpha);
		self
	}

	pub fn marker(mut self, marker: Marker) -> LineStyle {
		self.marker = Some(marker);
		self
	}
}

/**
Merge two styles. Every key set in `overrides` wins, and the keys it leaves unset are taken from `defaults`.
*/
pub fn merge_styles(defaults: &LineStyle, overrides: &LineStyle) -> LineStyle {
	LineStyle {
		label: overrides.label.clone().or_else(|| defaults.label.clone()),
		color: overrides.color.or(defaults.color),
		linestyle: overrides.linestyle.or(defaults.linestyle),
		linewidth: overrides.linewidth.or(defaults.linewidth),
		alpha: overrides.alpha.or(defaults.alpha),
		marker: overrides.marker.or(defaults.marker),
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "String")]
pub enum DashStyle {
	Solid,
	Dashed,
	DashDot,
	Dotted,
	/// The line is not drawn, which is useful to show only markers.
	Hidden,
}

impl DashStyle {
	/// The alternating on and off lengths of the pattern, as fractions of the plot diagonal.
	pub(crate) fn pattern(self) -> Option<&'static [f32]> {
		match self {
			DashStyle::Solid | DashStyle::Hidden => None,
			DashStyle::Dashed => Some(&[0.025, 0.012]),
			DashStyle::DashDot => Some(&[0.025, 0.01, 0.004, 0.01]),
			DashStyle::Dotted => Some(&[0.004, 0.008]),
		}
	}
}

impl std::str::FromStr for DashStyle {
	type Err = Error;
	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value {
			"-" | "solid" => Ok(DashStyle::Solid),
			"--" | "dashed" => Ok(DashStyle::Dashed),
			"-." | "dashdot" => Ok(DashStyle::DashDot),
			":" | "dotted" => Ok(DashStyle::Dotted),
			"None" | "none" | " " | "" => Ok(DashStyle::Hidden),
			_ => Err(Error::InvalidDashStyle(value.to_owned())),
		}
	}
}

impl TryFrom<String> for DashStyle {
	type Error = Error;
	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "String")]
pub enum Marker {
	Circle,
	Cross,
	Triangle,
	Hidden,
}

impl std::str::FromStr for Marker {
	type Err = Error;
	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value {
			"o" => Ok(Marker::Circle),
			"x" => Ok(Marker::Cross),
			"^" => Ok(Marker::Triangle),
			"None" | "none" | "" => Ok(Marker::Hidden),
			_ => Err(Error::InvalidMarker(value.to_owned())),
		}
	}
}

impl TryFrom<String> for Marker {
	type Error = Error;
	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

#[test]
fn test_merge_styles() {
	let defaults = LineStyle::new()
		.label("Chance level (AUC = 0.5)")
		.color(Color::BLACK)
		.linestyle(DashStyle::Dashed);
	let overrides = LineStyle::new().color(Color::TAB_BLUE).linewidth(3.0);
	let merged = merge_styles(&defaults, &overrides);
	assert_eq!(
		merged,
		LineStyle {
			label: Some("Chance level (AUC = 0.5)".to_owned()),
			color: Some(Color::TAB_BLUE),
			linestyle: Some(DashStyle::Dashed),
			linewidth: Some(3.0),
			alpha: None,
			marker: None,
		}
	);
	assert_eq!(merge_styles(&defaults, &LineStyle::new()), defaults);
}

#[test]
fn test_deserialize_line_style() {
	let style: LineStyle = serde_json::from_str(r#"{"color": "red", "lw": 3, "ls": "--"}"#).unwrap();
	assert_eq!(
		style,
		LineStyle::new()
			.color(Color::rgb(0xff, 0, 0))
			.linewidth(3.0)
			.linestyle(DashStyle::Dashed)
	);
	let error = serde_json::from_str::<LineStyle>(r#"{"lw": 3, "linewidth": 2}"#).unwrap_err();
	assert!(error.to_string().contains("duplicate field `linewidth`"));
	assert!(serde_json::from_str::<LineStyle>(r#"{"colour": "red"}"#).is_err());
	assert!(serde_json::from_str::<LineStyle>(r#"{"color": "not a color"}"#).is_err());
}
