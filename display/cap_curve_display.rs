use crate::{
	common::{finish_axes, with_pos_label},
	Error,
};
use ndarray::prelude::*;
use sightline_metrics::{
	check_consistent_length, check_pos_label_consistency, cumulative_gains,
	CumulativeGainsOptions, CumulativeGainsOutput, Label,
};
use sightline_model::{get_response_values_binary, Classifier, ResponseMethod};
use sightline_plot::{
	merge_styles, Aspect, Axes, Color, DashStyle, Figure, Line, LineHandle, LineStyle,
};

/**
A `CapCurveDisplay` draws a cumulative accuracy profile: samples are taken in order of decreasing score, and the curve shows how much of the positive class has been captured after each prefix of the ranking. A random ranking follows the chance level line from the origin to the final point.
*/
#[derive(Clone, Debug)]
pub struct CapCurveDisplay {
	/// The cumulative weight of all samples, with a leading 0.
	pub cumulative_total: Vec<f32>,
	/// The cumulative weight of the positive samples, with a leading 0.
	pub y_true_cumulative: Vec<f32>,
	pub name: Option<String>,
	pub pos_label: Option<Label>,
	/// Whether both cumulative sums were divided by their totals.
	pub normalize_scale: bool,
	line: Option<LineHandle>,
	chance_level: Option<LineHandle>,
	figure: Option<Figure>,
}

/// These are the options passed to [`CapCurveDisplay::plot`](struct.CapCurveDisplay.html#method.plot).
#[derive(Clone, Debug, Default)]
pub struct CapPlotOptions {
	/// Overrides the stored name.
	pub name: Option<String>,
	pub line_style: Option<LineStyle>,
	pub plot_chance_level: bool,
	pub chance_level_style: Option<LineStyle>,
	pub despine: bool,
}

#[derive(Clone, Debug, Default)]
pub struct CapFromPredictionsOptions<'a> {
	pub sample_weight: Option<&'a [f32]>,
	pub pos_label: Option<&'a Label>,
	pub normalize_scale: bool,
	/// Defaults to `"Classifier"`.
	pub name: Option<String>,
	pub figure: Option<Figure>,
	pub plot: CapPlotOptions,
}

#[derive(Clone, Debug, Default)]
pub struct CapFromEstimatorOptions<'a> {
	pub sample_weight: Option<&'a [f32]>,
	pub response_method: ResponseMethod,
	pub pos_label: Option<&'a Label>,
	pub normalize_scale: bool,
	/// Defaults to the name of the estimator.
	pub name: Option<String>,
	pub figure: Option<Figure>,
	pub plot: CapPlotOptions,
}

impl CapCurveDisplay {
	pub fn new(
		cumulative_total: Vec<f32>,
		y_true_cumulative: Vec<f32>,
		name: Option<String>,
		pos_label: Option<Label>,
		normalize_scale: bool,
	) -> Result<CapCurveDisplay, Error> {
		check_cumulative_lengths(&cumulative_total, &y_true_cumulative)?;
		Ok(CapCurveDisplay {
			cumulative_total,
			y_true_cumulative,
			name,
			pos_label,
			normalize_scale,
			line: None,
			chance_level: None,
			figure: None,
		})
	}

	pub fn line(&self) -> Option<&Line> {
		self.ax()?.line(self.line?)
	}

	pub fn line_handle(&self) -> Option<LineHandle> {
		self.line
	}

	pub fn chance_level(&self) -> Option<&Line> {
		self.ax()?.line(self.chance_level?)
	}

	pub fn ax(&self) -> Option<&Axes> {
		self.figure.as_ref().map(|figure| figure.axes())
	}

	pub fn figure(&self) -> Option<&Figure> {
		self.figure.as_ref()
	}

	pub fn into_figure(self) -> Option<Figure> {
		self.figure
	}

	/// Draw the profile on `figure`, or on a new figure if `figure` is `None`.
	pub fn plot(
		mut self,
		figure: Option<Figure>,
		options: CapPlotOptions,
	) -> Result<CapCurveDisplay, Error> {
		check_cumulative_lengths(&self.cumulative_total, &self.y_true_cumulative)?;
		let name = options.name.as_deref().or_else(|| self.name.as_deref());
		let default_line_style = match name {
			Some(name) => LineStyle::new().label(name),
			None => LineStyle::new(),
		};
		let line_style = merge_styles(
			&default_line_style,
			&options.line_style.clone().unwrap_or_default(),
		);
		let chance_level_style = merge_styles(
			&LineStyle::new()
				.label("Chance level")
				.color(Color::BLACK)
				.linestyle(DashStyle::Dashed),
			&options.chance_level_style.clone().unwrap_or_default(),
		);
		let x_max = self.cumulative_total.last().copied().unwrap_or(0.0);
		let y_max = self.y_true_cumulative.last().copied().unwrap_or(0.0);
		let mut figure = figure.unwrap_or_default();
		let axes = figure.axes_mut();
		let line = axes.plot(&self.cumulative_total, &self.y_true_cumulative, &line_style)?;
		let (x_label, y_label) = if self.normalize_scale {
			("Fraction of samples", "Fraction of positives")
		} else {
			("Number of samples", "Number of positives")
		};
		axes.set_xlabel(with_pos_label(x_label, self.pos_label.as_ref()));
		axes.set_ylabel(with_pos_label(y_label, self.pos_label.as_ref()));
		let (x_lim_min, x_lim_max) = padded_limits(&self.cumulative_total);
		let (y_lim_min, y_lim_max) = padded_limits(&self.y_true_cumulative);
		axes.set_xlim(x_lim_min, x_lim_max);
		axes.set_ylim(y_lim_min, y_lim_max);
		if self.normalize_scale {
			axes.set_aspect(Aspect::Equal);
		}
		let chance_level = if options.plot_chance_level {
			Some(axes.plot(&[0.0, x_max], &[0.0, y_max], &chance_level_style)?)
		} else {
			None
		};
		let drawn: Vec<LineHandle> = std::iter::once(line).chain(chance_level).collect();
		finish_axes(axes, options.despine, &drawn);
		self.line = Some(line);
		self.chance_level = chance_level;
		self.figure = Some(figure);
		Ok(self)
	}

	/**
	Compute the cumulative accuracy profile of `y_score` against `y_true` and plot it.
	*/
	pub fn from_predictions(
		y_true: &[Label],
		y_score: &[f32],
		options: CapFromPredictionsOptions,
	) -> Result<CapCurveDisplay, Error> {
		let mut lengths = vec![y_true.len(), y_score.len()];
		if let Some(sample_weight) = options.sample_weight {
			lengths.push(sample_weight.len());
		}
		check_consistent_length(&lengths)?;
		let pos_label = check_pos_label_consistency(options.pos_label, y_true)?;
		let CumulativeGainsOutput {
			cumulative_total,
			y_true_cumulative,
		} = cumulative_gains(
			y_true,
			y_score,
			CumulativeGainsOptions {
				pos_label: Some(&pos_label),
				sample_weight: options.sample_weight,
				normalize: options.normalize_scale,
			},
		)?;
		let name = options.name.unwrap_or_else(|| "Classifier".to_owned());
		let display = CapCurveDisplay::new(
			cumulative_total,
			y_true_cumulative,
			Some(name),
			Some(pos_label),
			options.normalize_scale,
		)?;
		display.plot(options.figure, options.plot)
	}

	/**
	Score `features` with a fitted binary classifier and plot the cumulative accuracy profile of the scores against `y`.
	*/
	pub fn from_estimator<E>(
		estimator: &E,
		features: ArrayView2<f32>,
		y: &[Label],
		options: CapFromEstimatorOptions,
	) -> Result<CapCurveDisplay, Error>
	where
		E: Classifier + ?Sized,
	{
		let (y_score, pos_label) = get_response_values_binary(
			estimator,
			features,
			options.response_method,
			options.pos_label,
		)?;
		let name = options.name.unwrap_or_else(|| estimator.name());
		CapCurveDisplay::from_predictions(
			y,
			&y_score,
			CapFromPredictionsOptions {
				sample_weight: options.sample_weight,
				pos_label: Some(&pos_label),
				normalize_scale: options.normalize_scale,
				name: Some(name),
				figure: options.figure,
				plot: options.plot,
			},
		)
	}
}

fn check_cumulative_lengths(cumulative_total: &[f32], y_true_cumulative: &[f32]) -> Result<(), Error> {
	if cumulative_total.len() != y_true_cumulative.len() {
		return Err(Error::CumulativeLengthMismatch {
			cumulative_total: cumulative_total.len(),
			y_true_cumulative: y_true_cumulative.len(),
		});
	}
	Ok(())
}

/// The range of `values` and the origin, padded by 1 % of its extent on each side.
fn padded_limits(values: &[f32]) -> (f32, f32) {
	let (min, max) = values
		.iter()
		.filter(|value| value.is_finite())
		.fold((0.0f32, 0.0f32), |(min, max), value| {
			(min.min(*value), max.max(*value))
		});
	let extent = if max > min { max - min } else { 1.0 };
	(min - 0.01 * extent, max + 0.01 * extent)
}

#[cfg(test)]
use crate::testing::{make_classification, random_scores, train_classifier};

#[test]
fn test_from_predictions() {
	let (_, y) = make_classification(20, 42);
	let y_score = random_scores(y.len(), 7);
	let red: Color = "red".parse().unwrap();
	for normalize_scale in &[true, false] {
		for plot_chance_level in &[true, false] {
			for name in &[Some("Logistic Regression"), None] {
				for chance_level_style in &[Some(LineStyle::new().color(red).linewidth(3.0)), None] {
					let display = CapCurveDisplay::from_predictions(
						&y,
						&y_score,
						CapFromPredictionsOptions {
							normalize_scale: *normalize_scale,
							name: name.map(|name| name.to_owned()),
							plot: CapPlotOptions {
								plot_chance_level: *plot_chance_level,
								chance_level_style: chance_level_style.clone(),
								..Default::default()
							},
							..Default::default()
						},
					)
					.unwrap();
					assert!(display.line().is_some());
					assert!(display.ax().is_some());
					assert!(display.figure().is_some());
					assert_eq!(display.y_true_cumulative.len(), y.len() + 1);
					assert_eq!(display.chance_level().is_some(), *plot_chance_level);
					assert_eq!(
						display.line().unwrap().label.as_deref(),
						Some(name.unwrap_or("Classifier"))
					);
				}
			}
		}
	}
}

#[test]
fn test_from_predictions_values() {
	let y_true: Vec<Label> = [0, 1, 1, 0].iter().map(|value| Label::from(*value)).collect();
	let y_score = [0.1, 0.9, 0.4, 0.6];
	let display = CapCurveDisplay::from_predictions(
		&y_true,
		&y_score,
		CapFromPredictionsOptions {
			plot: CapPlotOptions {
				plot_chance_level: true,
				despine: true,
				..Default::default()
			},
			..Default::default()
		},
	)
	.unwrap();
	assert_eq!(display.cumulative_total, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
	assert_eq!(display.y_true_cumulative, vec![0.0, 1.0, 1.0, 2.0, 2.0]);
	let chance_level = display.chance_level().unwrap();
	assert_eq!(chance_level.x, vec![0.0, 4.0]);
	assert_eq!(chance_level.y, vec![0.0, 2.0]);
	assert_eq!(chance_level.label.as_deref(), Some("Chance level"));
	assert_eq!(chance_level.color, Color::BLACK);
	assert_eq!(chance_level.linestyle, DashStyle::Dashed);
	let axes = display.ax().unwrap();
	assert_eq!(axes.x_label(), Some("Number of samples (Positive label: 1)"));
	assert_eq!(axes.y_label(), Some("Number of positives (Positive label: 1)"));
	assert_eq!(axes.aspect(), Aspect::Auto);
	assert!(!axes.spines().top);
	assert!(axes.legend_location().is_some());
	let display = CapCurveDisplay::from_predictions(
		&y_true,
		&y_score,
		CapFromPredictionsOptions {
			normalize_scale: true,
			..Default::default()
		},
	)
	.unwrap();
	assert_eq!(display.cumulative_total, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
	assert_eq!(display.y_true_cumulative, vec![0.0, 0.5, 0.5, 1.0, 1.0]);
	let axes = display.ax().unwrap();
	assert_eq!(axes.x_label(), Some("Fraction of samples (Positive label: 1)"));
	assert_eq!(axes.x_lim(), (-0.01, 1.01));
	assert_eq!(axes.aspect(), Aspect::Equal);
}

#[test]
fn test_from_estimator() {
	let (features, y) = make_classification(100, 42);
	let estimator = train_classifier(features.slice(s![..80, ..]), &y[..80]);
	let features_test = features.slice(s![80.., ..]);
	let y_test = &y[80..];
	for response_method in &[
		ResponseMethod::Auto,
		ResponseMethod::PredictProba,
		ResponseMethod::DecisionFunction,
	] {
		for normalize_scale in &[true, false] {
			for plot_chance_level in &[true, false] {
				for name in &[Some("Logistic Regression"), None] {
					let display = CapCurveDisplay::from_estimator(
						&estimator,
						features_test,
						y_test,
						CapFromEstimatorOptions {
							response_method: *response_method,
							normalize_scale: *normalize_scale,
							name: name.map(|name| name.to_owned()),
							plot: CapPlotOptions {
								plot_chance_level: *plot_chance_level,
								..Default::default()
							},
							..Default::default()
						},
					)
					.unwrap();
					assert!(display.line().is_some());
					assert!(display.ax().is_some());
					assert!(display.figure().is_some());
					assert_eq!(display.y_true_cumulative.len(), y_test.len() + 1);
					assert_eq!(display.chance_level().is_some(), *plot_chance_level);
					assert_eq!(
						display.line().unwrap().label.as_deref(),
						Some(name.unwrap_or("LogisticRegression"))
					);
				}
			}
		}
	}
}

#[test]
fn test_invalid_response_method() {
	let (features, y) = make_classification(50, 42);
	let estimator = train_classifier(features.view(), &y);
	let result = "invalid input"
		.parse::<ResponseMethod>()
		.map_err(Error::from)
		.and_then(|response_method| {
			CapCurveDisplay::from_estimator(
				&estimator,
				features.view(),
				&y,
				CapFromEstimatorOptions {
					response_method,
					..Default::default()
				},
			)
		});
	assert!(matches!(result, Err(Error::Model(_))));
}

#[test]
fn test_new_length_mismatch() {
	let error = CapCurveDisplay::new(vec![0.0, 1.0], vec![0.0], None, None, false).unwrap_err();
	insta::assert_snapshot!(error, @"cumulative_total and y_true_cumulative must have the same length, got 2 and 1");
}
