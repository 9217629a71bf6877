use crate::{Color, DashStyle, Error, LineStyle, Marker};

/// A figure is a canvas of a fixed pixel size that hosts one set of axes.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
	pub(crate) width: u32,
	pub(crate) height: u32,
	pub(crate) axes: Axes,
}

impl Default for Figure {
	fn default() -> Self {
		Figure::new(640, 480)
	}
}

impl Figure {
	pub fn new(width: u32, height: u32) -> Figure {
		Figure {
			width,
			height,
			axes: Axes::default(),
		}
	}

	pub fn size(&self) -> (u32, u32) {
		(self.width, self.height)
	}

	pub fn axes(&self) -> &Axes {
		&self.axes
	}

	pub fn axes_mut(&mut self) -> &mut Axes {
		&mut self.axes
	}
}

/// A handle to a line drawn on an [`Axes`](struct.Axes.html).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LineHandle(usize);

impl LineHandle {
	pub fn index(self) -> usize {
		self.0
	}
}

/// A line with its style fully resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
	pub x: Vec<f32>,
	pub y: Vec<f32>,
	pub label: Option<String>,
	pub color: Color,
	pub linestyle: DashStyle,
	pub linewidth: f32,
	pub alpha: f32,
	pub marker: Marker,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Aspect {
	/// Stretch the data to fill the plot area.
	Auto,
	/// One unit on the x axis has the same length on screen as one unit on the y axis.
	Equal,
}

/// Which sides of the plot area have a border drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spines {
	pub top: bool,
	pub right: bool,
	pub bottom: bool,
	pub left: bool,
}

impl Default for Spines {
	fn default() -> Self {
		Spines {
			top: true,
			right: true,
			bottom: true,
			left: true,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegendLocation {
	UpperLeft,
	UpperRight,
	LowerLeft,
	LowerRight,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axes {
	lines: Vec<Line>,
	title: Option<String>,
	x_label: Option<String>,
	y_label: Option<String>,
	x_lim: Option<(f32, f32)>,
	y_lim: Option<(f32, f32)>,
	aspect: Aspect,
	spines: Spines,
	legend: Option<LegendLocation>,
}

impl Default for Axes {
	fn default() -> Self {
		Axes {
			lines: Vec::new(),
			title: None,
			x_label: None,
			y_label: None,
			x_lim: None,
			y_lim: None,
			aspect: Aspect::Auto,
			spines: Spines::default(),
			legend: None,
		}
	}
}

impl Axes {
	/**
	Draw a line through the points `(x[i], y[i])`. Keys missing from `style` get matplotlib's defaults: the next color of the color cycle, a solid line of width 1.5, full opacity and no markers.
	*/
	pub fn plot(&mut self, x: &[f32], y: &[f32], style: &LineStyle) -> Result<LineHandle, Error> {
		if x.len() != y.len() {
			return Err(Error::ShapeMismatch {
				x: x.len(),
				y: y.len(),
			});
		}
		let color = style
			.color
			.unwrap_or_else(|| Color::CYCLE[self.lines.len() % Color::CYCLE.len()]);
		self.lines.push(Line {
			x: x.to_owned(),
			y: y.to_owned(),
			label: style.label.clone(),
			color,
			linestyle: style.linestyle.unwrap_or(DashStyle::Solid),
			linewidth: style.linewidth.unwrap_or(1.5),
			alpha: style.alpha.unwrap_or(1.0),
			marker: style.marker.unwrap_or(Marker::Hidden),
		});
		Ok(LineHandle(self.lines.len() - 1))
	}

	pub fn line(&self, handle: LineHandle) -> Option<&Line> {
		self.lines.get(handle.0)
	}

	pub fn lines(&self) -> &[Line] {
		&self.lines
	}

	/// Whether any line carries a label, which is what the legend would show.
	pub fn has_labeled_lines(&self) -> bool {
		self.lines.iter().any(|line| line.label.is_some())
	}

	pub fn set_title(&mut self, title: impl Into<String>) {
		self.title = Some(title.into());
	}

	pub fn set_xlabel(&mut self, label: impl Into<String>) {
		self.x_label = Some(label.into());
	}

	pub fn set_ylabel(&mut self, label: impl Into<String>) {
		self.y_label = Some(label.into());
	}

	pub fn set_xlim(&mut self, min: f32, max: f32) {
		self.x_lim = Some((min, max));
	}

	pub fn set_ylim(&mut self, min: f32, max: f32) {
		self.y_lim = Some((min, max));
	}

	pub fn set_aspect(&mut self, aspect: Aspect) {
		self.aspect = aspect;
	}

	/// Remove the top and right borders of the plot area.
	pub fn despine(&mut self) {
		self.spines.top = false;
		self.spines.right = false;
	}

	pub fn legend(&mut self, location: LegendLocation) {
		self.legend = Some(location);
	}

	pub fn title(&self) -> Option<&str> {
		self.title.as_deref()
	}

	pub fn x_label(&self) -> Option<&str> {
		self.x_label.as_deref()
	}

	pub fn y_label(&self) -> Option<&str> {
		self.y_label.as_deref()
	}

	/// The x limits, either set explicitly or computed from the data with a 5% margin.
	pub fn x_lim(&self) -> (f32, f32) {
		self.x_lim
			.unwrap_or_else(|| data_limits(self.lines.iter().flat_map(|line| line.x.iter())))
	}

	/// The y limits, either set explicitly or computed from the data with a 5% margin.
	pub fn y_lim(&self) -> (f32, f32) {
		self.y_lim
			.unwrap_or_else(|| data_limits(self.lines.iter().flat_map(|line| line.y.iter())))
	}

	pub fn aspect(&self) -> Aspect {
		self.aspect
	}

	pub fn spines(&self) -> Spines {
		self.spines
	}

	pub fn legend_location(&self) -> Option<LegendLocation> {
		self.legend
	}
}

fn data_limits<'a>(values: impl Iterator<Item = &'a f32>) -> (f32, f32) {
	let (min, max) = values
		.filter(|value| value.is_finite())
		.fold((std::f32::INFINITY, std::f32::NEG_INFINITY), |(min, max), value| {
			(min.min(*value), max.max(*value))
		});
	if min > max {
		return (0.0, 1.0);
	}
	let margin = if max > min { 0.05 * (max - min) } else { 0.5 };
	(min - margin, max + margin)
}

#[test]
fn test_plot_uses_color_cycle() {
	let mut figure = Figure::default();
	let axes = figure.axes_mut();
	let first = axes.plot(&[0.0, 1.0], &[0.0, 1.0], &LineStyle::new()).unwrap();
	let second = axes
		.plot(&[0.0, 1.0], &[1.0, 0.0], &LineStyle::new().label("second"))
		.unwrap();
	assert_eq!(axes.line(first).unwrap().color, Color::TAB_BLUE);
	assert_eq!(axes.line(second).unwrap().color, Color::CYCLE[1]);
	assert_eq!(axes.line(second).unwrap().linestyle, DashStyle::Solid);
	assert!(axes.has_labeled_lines());
	assert_eq!(axes.lines().len(), 2);
}

#[test]
fn test_plot_shape_mismatch() {
	let mut axes = Axes::default();
	let error = axes.plot(&[0.0, 1.0], &[0.0], &LineStyle::new()).unwrap_err();
	insta::assert_snapshot!(error.to_string(), @"x and y must have the same length, got 2 and 1");
	assert!(axes.lines().is_empty());
}

#[test]
fn test_data_limits() {
	let mut axes = Axes::default();
	assert_eq!(axes.x_lim(), (0.0, 1.0));
	axes.plot(&[0.0, 10.0], &[2.0, std::f32::NAN], &LineStyle::new())
		.unwrap();
	assert_eq!(axes.x_lim(), (-0.5, 10.5));
	assert_eq!(axes.y_lim(), (1.5, 2.5));
	axes.set_xlim(-0.01, 1.01);
	assert_eq!(axes.x_lim(), (-0.01, 1.01));
	axes.despine();
	assert!(!axes.spines().top && !axes.spines().right && axes.spines().left);
}
