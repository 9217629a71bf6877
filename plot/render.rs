use crate::{Aspect, Axes, DashStyle, Error, Figure, LegendLocation, Line, Marker};
use plotters::{coord::Shift, prelude::*};
use std::path::Path;

const MARGIN: u32 = 10;
const X_LABEL_AREA_SIZE: u32 = 40;
const Y_LABEL_AREA_SIZE: u32 = 50;
const CAPTION_SIZE: u32 = 30;
const DASH_EPSILON: f32 = 1e-6;

impl Figure {
	/// Render the figure to an SVG document.
	pub fn to_svg_string(&self) -> Result<String, Error> {
		let mut buffer = String::new();
		{
			let root = SVGBackend::with_string(&mut buffer, (self.width, self.height))
				.into_drawing_area();
			draw_figure(self, &root)?;
			root.present().map_err(backend_error)?;
		}
		Ok(buffer)
	}

	/// Render the figure to `path`, which must have an `svg` extension.
	pub fn save(&self, path: &Path) -> Result<(), Error> {
		let extension = path
			.extension()
			.and_then(|extension| extension.to_str())
			.unwrap_or("")
			.to_lowercase();
		log::debug!("saving figure to {}", path.display());
		match extension.as_str() {
			"svg" => {
				let root = SVGBackend::new(path, (self.width, self.height)).into_drawing_area();
				draw_figure(self, &root)?;
				root.present().map_err(backend_error)
			}
			_ => Err(Error::UnsupportedFormat(extension)),
		}
	}
}

fn backend_error<E: std::fmt::Display>(error: E) -> Error {
	Error::Backend(error.to_string())
}

fn draw_figure<DB: DrawingBackend>(
	figure: &Figure,
	root: &DrawingArea<DB, Shift>,
) -> Result<(), Error> {
	root.fill(&WHITE).map_err(backend_error)?;
	let axes = &figure.axes;
	let (x_min, x_max) = axes.x_lim();
	let (y_min, y_max) = axes.y_lim();
	let area = match axes.aspect() {
		Aspect::Auto => root.clone(),
		Aspect::Equal => equal_aspect_area(root, axes, x_max - x_min, y_max - y_min),
	};
	let mut builder = ChartBuilder::on(&area);
	builder
		.margin(MARGIN)
		.x_label_area_size(X_LABEL_AREA_SIZE)
		.y_label_area_size(Y_LABEL_AREA_SIZE);
	if let Some(title) = axes.title() {
		builder.caption(title, ("sans-serif", 20));
	}
	let mut chart = builder
		.build_cartesian_2d(x_min..x_max, y_min..y_max)
		.map_err(backend_error)?;
	let spines = axes.spines();
	let mut mesh = chart.configure_mesh();
	mesh.disable_mesh();
	if !spines.left {
		mesh.disable_y_axis();
	}
	if !spines.bottom {
		mesh.disable_x_axis();
	}
	if let Some(x_label) = axes.x_label() {
		mesh.x_desc(x_label);
	}
	if let Some(y_label) = axes.y_label() {
		mesh.y_desc(y_label);
	}
	mesh.draw().map_err(backend_error)?;
	if spines.top {
		chart
			.draw_series(std::iter::once(PathElement::new(
				vec![(x_min, y_max), (x_max, y_max)],
				&BLACK,
			)))
			.map_err(backend_error)?;
	}
	if spines.right {
		chart
			.draw_series(std::iter::once(PathElement::new(
				vec![(x_max, y_min), (x_max, y_max)],
				&BLACK,
			)))
			.map_err(backend_error)?;
	}
	let spans = (x_max - x_min, y_max - y_min);
	for line in axes.lines() {
		let style = shape_style(line);
		let points: Vec<(f32, f32)> = line
			.x
			.iter()
			.zip(line.y.iter())
			.filter(|(x, y)| x.is_finite() && y.is_finite())
			.map(|(x, y)| (*x, *y))
			.collect();
		let annotation = match line.linestyle.pattern() {
			_ if line.linestyle == DashStyle::Hidden => None,
			None => Some(
				chart
					.draw_series(LineSeries::new(points.iter().copied(), style))
					.map_err(backend_error)?,
			),
			Some(pattern) => {
				let segments = dash_segments(&points, pattern, spans);
				Some(
					chart
						.draw_series(
							segments
								.into_iter()
								.map(|segment| PathElement::new(segment, style)),
						)
						.map_err(backend_error)?,
				)
			}
		};
		if let (Some(annotation), Some(label)) = (annotation, line.label.as_ref()) {
			annotation
				.label(label.as_str())
				.legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
		}
		let marker_size = (2.0 * line.linewidth).round() as i32;
		match line.marker {
			Marker::Hidden => {}
			Marker::Circle => {
				chart
					.draw_series(
						points
							.iter()
							.map(|point| Circle::new(*point, marker_size, style.filled())),
					)
					.map_err(backend_error)?;
			}
			Marker::Cross => {
				chart
					.draw_series(points.iter().map(|point| Cross::new(*point, marker_size, style)))
					.map_err(backend_error)?;
			}
			Marker::Triangle => {
				chart
					.draw_series(
						points
							.iter()
							.map(|point| TriangleMarker::new(*point, marker_size, style.filled())),
					)
					.map_err(backend_error)?;
			}
		}
	}
	if let Some(location) = axes.legend_location() {
		if axes.has_labeled_lines() {
			chart
				.configure_series_labels()
				.position(series_label_position(location))
				.background_style(&WHITE.mix(0.8))
				.border_style(&BLACK)
				.draw()
				.map_err(backend_error)?;
		}
	}
	Ok(())
}

fn shape_style(line: &Line) -> ShapeStyle {
	let color = RGBColor(line.color.r, line.color.g, line.color.b);
	ShapeStyle {
		color: color.mix(f64::from(line.alpha.max(0.0).min(1.0))),
		filled: false,
		stroke_width: line.linewidth.round().max(1.0) as u32,
	}
}

fn series_label_position(location: LegendLocation) -> SeriesLabelPosition {
	match location {
		LegendLocation::UpperLeft => SeriesLabelPosition::UpperLeft,
		LegendLocation::UpperRight => SeriesLabelPosition::UpperRight,
		LegendLocation::LowerLeft => SeriesLabelPosition::LowerLeft,
		LegendLocation::LowerRight => SeriesLabelPosition::LowerRight,
	}
}

/// Shrink `root` to the largest centered area whose plot region has the same pixels per unit on both axes.
fn equal_aspect_area<DB: DrawingBackend>(
	root: &DrawingArea<DB, Shift>,
	axes: &Axes,
	x_span: f32,
	y_span: f32,
) -> DrawingArea<DB, Shift> {
	let (width, height) = root.dim_in_pixel();
	let caption = if axes.title().is_some() { CAPTION_SIZE } else { 0 };
	let decoration_width = 2 * MARGIN + Y_LABEL_AREA_SIZE;
	let decoration_height = 2 * MARGIN + X_LABEL_AREA_SIZE + caption;
	if width <= decoration_width
		|| height <= decoration_height
		|| x_span <= 0.0
		|| y_span <= 0.0
	{
		return root.clone();
	}
	let plot_width = (width - decoration_width) as f32;
	let plot_height = (height - decoration_height) as f32;
	let scale = (plot_width / x_span).min(plot_height / y_span);
	let new_width = (scale * x_span).round() as u32 + decoration_width;
	let new_height = (scale * y_span).round() as u32 + decoration_height;
	let left = (width.saturating_sub(new_width) / 2) as i32;
	let top = (height.saturating_sub(new_height) / 2) as i32;
	root.clone()
		.shrink((left, top), (new_width.min(width), new_height.min(height)))
}

/**
Split a polyline into the dashes of `pattern`. Lengths are measured with both axes scaled to the unit interval, and the pattern is given as fractions of the unit square's diagonal.
*/
fn dash_segments(
	points: &[(f32, f32)],
	pattern: &[f32],
	spans: (f32, f32),
) -> Vec<Vec<(f32, f32)>> {
	let (x_span, y_span) = spans;
	if points.len() < 2 || x_span <= 0.0 || y_span <= 0.0 {
		return vec![points.to_vec()];
	}
	let unit_diagonal = std::f32::consts::SQRT_2;
	let mut segments = Vec::new();
	let mut current: Vec<(f32, f32)> = vec![points[0]];
	let mut pattern_index = 0;
	let mut remaining = pattern[0] * unit_diagonal;
	for window in points.windows(2) {
		let (start, end) = (window[0], window[1]);
		let dx = (end.0 - start.0) / x_span;
		let dy = (end.1 - start.1) / y_span;
		let length = (dx * dx + dy * dy).sqrt();
		let mut position = 0.0;
		while length - position > remaining + DASH_EPSILON {
			position += remaining;
			let t = position / length;
			let point = (
				start.0 + t * (end.0 - start.0),
				start.1 + t * (end.1 - start.1),
			);
			if pattern_index % 2 == 0 {
				current.push(point);
				segments.push(std::mem::take(&mut current));
			} else {
				current = vec![point];
			}
			pattern_index = (pattern_index + 1) % pattern.len();
			remaining = pattern[pattern_index] * unit_diagonal;
		}
		remaining -= length - position;
		if pattern_index % 2 == 0 {
			current.push(end);
		}
	}
	if current.len() > 1 {
		segments.push(current);
	}
	segments
}

#[test]
fn test_dash_segments() {
	let points = vec![(0.0, 0.0), (1.0, 1.0)];
	let segments = dash_segments(&points, &[0.25, 0.25], (1.0, 1.0));
	// The diagonal has length sqrt(2) in unit space, which is two dashes and two gaps.
	assert_eq!(segments.len(), 2);
	assert!(segments.iter().all(|segment| segment.len() == 2));
	let first = &segments[0];
	assert!((first[1].0 - 0.25).abs() < 1e-5);
	let second = &segments[1];
	assert!((second[0].0 - 0.5).abs() < 1e-5);
}

#[test]
fn test_to_svg_string() {
	use crate::{Color, LineStyle};
	let mut figure = Figure::default();
	let axes = figure.axes_mut();
	axes.plot(
		&[0.0, 0.0, 0.5, 1.0],
		&[0.0, 0.5, 1.0, 1.0],
		&LineStyle::new().label("AUC = 0.75"),
	)
	.unwrap();
	axes.plot(
		&[0.0, 1.0],
		&[0.0, 1.0],
		&LineStyle::new()
			.color(Color::BLACK)
			.linestyle(DashStyle::Dashed),
	)
	.unwrap();
	axes.set_xlabel("False Positive Rate");
	axes.set_xlim(-0.01, 1.01);
	axes.set_ylim(-0.01, 1.01);
	axes.set_aspect(Aspect::Equal);
	axes.despine();
	axes.legend(LegendLocation::LowerRight);
	let svg = figure.to_svg_string().unwrap();
	assert!(svg.contains("<svg"));
	assert!(svg.contains("False Positive Rate"));
	assert!(svg.contains("AUC = 0.75"));
}

#[test]
fn test_save_unsupported_format() {
	let figure = Figure::default();
	let error = figure.save(Path::new("figure.pdf")).unwrap_err();
	insta::assert_snapshot!(error.to_string(), @r###"unsupported output format "pdf", expected "svg""###);
}

#[test]
fn test_save() {
	use crate::LineStyle;
	let mut figure = Figure::default();
	let axes = figure.axes_mut();
	axes.plot(&[0.0, 1.0], &[0.0, 1.0], &LineStyle::new().label("model (AUC = 0.50)"))
		.unwrap();
	axes.set_xlabel("False Positive Rate");
	axes.legend(LegendLocation::LowerRight);
	let directory = std::env::temp_dir();
	let svg_path = directory.join(format!("sightline_plot_test_save_{}.svg", std::process::id()));
	figure.save(&svg_path).unwrap();
	let svg = std::fs::read_to_string(&svg_path).unwrap();
	std::fs::remove_file(&svg_path).unwrap();
	assert!(svg.contains("model (AUC = 0.50)"));
	// Bitmaps cannot draw text without a font, so png output is refused up front.
	let png_path = directory.join(format!("sightline_plot_test_save_{}.png", std::process::id()));
	let error = figure.save(&png_path).unwrap_err();
	insta::assert_snapshot!(error, @r###"unsupported output format "png", expected "svg""###);
	assert!(!png_path.exists());
}
