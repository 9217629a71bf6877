/*!
This crate provides a small retained-mode plotting surface. A [`Figure`](struct.Figure.html) owns one [`Axes`](struct.Axes.html), and drawing a line on the axes returns a [`LineHandle`](struct.LineHandle.html) that can be used to look the line up again. Nothing is rasterized until the figure is rendered with [`Figure::to_svg_string`](struct.Figure.html#method.to_svg_string) or [`Figure::save`](struct.Figure.html#method.save), which draw the recorded state with [plotters](https://docs.rs/plotters).

Line styles use the same keys as matplotlib (`color`, `linestyle`, `linewidth`, `alpha`, `label`, `marker`, and the aliases `c`, `ls` and `lw`), so they can be loaded from configuration files.
*/

#![allow(clippy::tabs_in_doc_comments)]

use thiserror::Error;

mod color;
mod figure;
mod render;
mod style;

pub use self::color::Color;
pub use self::figure::{Aspect, Axes, Figure, LegendLocation, Line, LineHandle, Spines};
pub use self::style::{merge_styles, DashStyle, LineStyle, Marker};

#[derive(Debug, Error)]
pub enum Error {
	#[error("invalid color {0:?}")]
	InvalidColor(String),
	#[error("invalid linestyle {0:?}, expected one of \"-\", \"--\", \"-.\", \":\", \"None\"")]
	InvalidDashStyle(String),
	#[error("invalid marker {0:?}, expected one of \"o\", \"x\", \"^\", \"None\"")]
	InvalidMarker(String),
	#[error("x and y must have the same length, got {x} and {y}")]
	ShapeMismatch { x: usize, y: usize },
	#[error("unsupported output format {0:?}, expected \"svg\"")]
	UnsupportedFormat(String),
	#[error("failed to render the figure: {0}")]
	Backend(String),
}
