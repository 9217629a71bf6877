use crate::{
	common::{finish_axes, select_rows, with_pos_label},
	Error, FoldStyle, RocCurves,
};
use itertools::izip;
use ndarray::prelude::*;
use sightline_metrics::{
	auc, check_consistent_length, check_pos_label_consistency, roc_curve, Label, RocCurveOptions,
	RocCurveOutput,
};
use sightline_model::{get_response_values_binary, Classifier, CvResults, ResponseMethod};
use sightline_plot::{
	merge_styles, Aspect, Axes, Color, DashStyle, Figure, Line, LineHandle, LineStyle,
};

/**
A `RocCurveDisplay` draws one ROC curve, or one ROC curve per cross validation fold.

Build it from precomputed rates with [`new`](#method.new) and then call [`plot`](#method.plot), or use one of the constructors that compute the curves and plot them in one step: [`from_predictions`](#method.from_predictions), [`from_estimator`](#method.from_estimator) and [`from_cv_results`](#method.from_cv_results). After plotting, the drawn lines, the axes and the figure are available through the accessors.
*/
#[derive(Clone, Debug)]
pub struct RocCurveDisplay {
	curves: RocCurves,
	pos_label: Option<Label>,
	lines: Vec<LineHandle>,
	chance_level: Option<LineHandle>,
	figure: Option<Figure>,
}

/// These are the options passed to [`RocCurveDisplay::plot`](struct.RocCurveDisplay.html#method.plot).
#[derive(Clone, Debug, Default)]
pub struct RocPlotOptions {
	/// The name of a single curve. Overrides the stored name. Ignored when plotting multiple curves.
	pub name: Option<String>,
	/// The names of the fold curves. Overrides the stored names. Ignored when plotting a single curve.
	pub fold_names: Option<Vec<String>>,
	/// Style overrides for a single curve. Ignored when plotting multiple curves.
	pub line_style: Option<LineStyle>,
	/// Style overrides for the fold curves. If `None`, folds are drawn as translucent dashed blue lines. Ignored when plotting a single curve.
	pub fold_line_style: Option<FoldStyle>,
	pub plot_chance_level: bool,
	pub chance_level_style: Option<LineStyle>,
	/// Remove the top and right spines.
	pub despine: bool,
}

/// These are the options passed to [`RocCurveDisplay::from_predictions`](struct.RocCurveDisplay.html#method.from_predictions).
#[derive(Clone, Debug)]
pub struct RocFromPredictionsOptions<'a> {
	pub sample_weight: Option<&'a [f32]>,
	pub drop_intermediate: bool,
	/// The positive class. If `None`, the labels must be `{0, 1}` or `{-1, 1}`, and `1` is the positive class.
	pub pos_label: Option<&'a Label>,
	/// The name of the curve. Defaults to `"Classifier"`.
	pub name: Option<String>,
	/// The figure to draw on. If `None`, a new figure is created.
	pub figure: Option<Figure>,
	pub plot: RocPlotOptions,
}

impl<'a> Default for RocFromPredictionsOptions<'a> {
	fn default() -> Self {
		Self {
			sample_weight: None,
			drop_intermediate: true,
			pos_label: None,
			name: None,
			figure: None,
			plot: RocPlotOptions::default(),
		}
	}
}

/// These are the options passed to [`RocCurveDisplay::from_estimator`](struct.RocCurveDisplay.html#method.from_estimator).
#[derive(Clone, Debug)]
pub struct RocFromEstimatorOptions<'a> {
	pub sample_weight: Option<&'a [f32]>,
	pub drop_intermediate: bool,
	pub response_method: ResponseMethod,
	/// The positive class. If `None`, the second class of the estimator is the positive class.
	pub pos_label: Option<&'a Label>,
	/// The name of the curve. Defaults to the name of the estimator.
	pub name: Option<String>,
	pub figure: Option<Figure>,
	pub plot: RocPlotOptions,
}

impl<'a> Default for RocFromEstimatorOptions<'a> {
	fn default() -> Self {
		Self {
			sample_weight: None,
			drop_intermediate: true,
			response_method: ResponseMethod::Auto,
			pos_label: None,
			name: None,
			figure: None,
			plot: RocPlotOptions::default(),
		}
	}
}

/// These are the options passed to [`RocCurveDisplay::from_cv_results`](struct.RocCurveDisplay.html#method.from_cv_results).
#[derive(Clone, Debug)]
pub struct RocFromCvResultsOptions<'a> {
	/// Weights for every row of `X`. Each fold uses the weights of its test rows.
	pub sample_weight: Option<&'a [f32]>,
	pub drop_intermediate: bool,
	pub response_method: ResponseMethod,
	pub pos_label: Option<&'a Label>,
	pub figure: Option<Figure>,
	pub plot: RocPlotOptions,
}

impl<'a> Default for RocFromCvResultsOptions<'a> {
	fn default() -> Self {
		Self {
			sample_weight: None,
			drop_intermediate: true,
			response_method: ResponseMethod::Auto,
			pos_label: None,
			figure: None,
			plot: RocPlotOptions::default(),
		}
	}
}

impl RocCurveDisplay {
	pub fn new(curves: RocCurves, pos_label: Option<Label>) -> Result<RocCurveDisplay, Error> {
		curves.validate()?;
		Ok(RocCurveDisplay {
			curves,
			pos_label,
			lines: Vec::new(),
			chance_level: None,
			figure: None,
		})
	}

	pub fn curves(&self) -> &RocCurves {
		&self.curves
	}

	pub fn pos_label(&self) -> Option<&Label> {
		self.pos_label.as_ref()
	}

	/// The area under the curve, if this display holds a single curve with a known area.
	pub fn roc_auc(&self) -> Option<f32> {
		match &self.curves {
			RocCurves::Single { roc_auc, .. } => *roc_auc,
			RocCurves::Multi { .. } => None,
		}
	}

	/// The first drawn curve. `None` before `plot` is called.
	pub fn line(&self) -> Option<&Line> {
		let handle = self.lines.first()?;
		self.ax()?.line(*handle)
	}

	/// All drawn curves, one per fold when plotting multiple curves.
	pub fn lines(&self) -> Vec<&Line> {
		match self.ax() {
			Some(axes) => self
				.lines
				.iter()
				.filter_map(|handle| axes.line(*handle))
				.collect(),
			None => Vec::new(),
		}
	}

	pub fn line_handles(&self) -> &[LineHandle] {
		&self.lines
	}

	/// The chance level line, if it was requested.
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

	/**
	Draw the curves on `figure`, or on a new figure if `figure` is `None`.

	Each curve is labeled with its name and area under the curve when those are known. Caller supplied styles take precedence over the default styles key by key. All options are validated before anything is drawn.
	*/
	pub fn plot(
		mut self,
		figure: Option<Figure>,
		options: RocPlotOptions,
	) -> Result<RocCurveDisplay, Error> {
		self.curves.validate()?;
		let styles = self.line_styles(&options)?;
		let chance_level_style = merge_styles(
			&LineStyle::new()
				.label("Chance level (AUC = 0.5)")
				.color(Color::BLACK)
				.linestyle(DashStyle::Dashed),
			&options.chance_level_style.clone().unwrap_or_default(),
		);
		let mut figure = figure.unwrap_or_default();
		let axes = figure.axes_mut();
		let mut lines = Vec::with_capacity(styles.len());
		match &self.curves {
			RocCurves::Single { fpr, tpr, .. } => {
				lines.push(axes.plot(fpr, tpr, &styles[0])?);
			}
			RocCurves::Multi { fpr, tpr, .. } => {
				for (fpr, tpr, style) in izip!(fpr, tpr, &styles) {
					lines.push(axes.plot(fpr, tpr, style)?);
				}
			}
		}
		let pos_label = self.pos_label.as_ref();
		axes.set_xlabel(with_pos_label("False Positive Rate", pos_label));
		axes.set_ylabel(with_pos_label("True Positive Rate", pos_label));
		axes.set_xlim(-0.01, 1.01);
		axes.set_ylim(-0.01, 1.01);
		axes.set_aspect(Aspect::Equal);
		let chance_level = if options.plot_chance_level {
			Some(axes.plot(&[0.0, 1.0], &[0.0, 1.0], &chance_level_style)?)
		} else {
			None
		};
		let drawn: Vec<LineHandle> = lines.iter().copied().chain(chance_level).collect();
		finish_axes(axes, options.despine, &drawn);
		self.lines = lines;
		self.chance_level = chance_level;
		self.figure = Some(figure);
		Ok(self)
	}

	fn line_styles(&self, options: &RocPlotOptions) -> Result<Vec<LineStyle>, Error> {
		match &self.curves {
			RocCurves::Single { roc_auc, name, .. } => {
				if options.fold_line_style.is_some() || options.fold_names.is_some() {
					log::debug!("fold options are ignored when plotting a single ROC curve");
				}
				let name = options.name.as_deref().or_else(|| name.as_deref());
				let overrides = options.line_style.clone().unwrap_or_default();
				Ok(vec![merge_styles(
					&default_line_style(name, *roc_auc),
					&overrides,
				)])
			}
			RocCurves::Multi { fpr, roc_auc, name, .. } => {
				let n_curves = fpr.len();
				if options.name.is_some() || options.line_style.is_some() {
					log::debug!("name and line_style are ignored when plotting multiple ROC curves");
				}
				let names: Vec<String> = match (&options.fold_names, name) {
					(Some(fold_names), _) => {
						if fold_names.len() != n_curves {
							return Err(Error::FoldNameLength {
								expected: n_curves,
								actual: fold_names.len(),
							});
						}
						fold_names.clone()
					}
					(None, Some(name)) => name.clone(),
					(None, None) => (0..n_curves).map(|i| format!("ROC fold {}", i)).collect(),
				};
				if let Some(fold_line_style) = &options.fold_line_style {
					fold_line_style.validate(n_curves)?;
				}
				let default_fold_style = LineStyle::new()
					.alpha(0.5)
					.color(Color::TAB_BLUE)
					.linestyle(DashStyle::Dashed);
				let styles = names
					.iter()
					.enumerate()
					.map(|(fold, name)| {
						let roc_auc = roc_auc.as_ref().map(|roc_auc| roc_auc[fold]);
						let overrides = match &options.fold_line_style {
							Some(fold_line_style) => fold_line_style.get(fold),
							None => &default_fold_style,
						};
						merge_styles(&default_line_style(Some(name), roc_auc), overrides)
					})
					.collect();
				Ok(styles)
			}
		}
	}

	/**
	Compute the ROC curve of `y_score` against `y_true` and plot it.
	*/
	pub fn from_predictions(
		y_true: &[Label],
		y_score: &[f32],
		options: RocFromPredictionsOptions,
	) -> Result<RocCurveDisplay, Error> {
		let mut lengths = vec![y_true.len(), y_score.len()];
		if let Some(sample_weight) = options.sample_weight {
			lengths.push(sample_weight.len());
		}
		check_consistent_length(&lengths)?;
		let pos_label = check_pos_label_consistency(options.pos_label, y_true)?;
		let name = options.name.unwrap_or_else(|| "Classifier".to_owned());
		let RocCurveOutput {
			false_positive_rates,
			true_positive_rates,
			..
		} = roc_curve(
			y_true,
			y_score,
			RocCurveOptions {
				pos_label: Some(&pos_label),
				sample_weight: options.sample_weight,
				drop_intermediate: options.drop_intermediate,
			},
		)?;
		let roc_auc = auc(&false_positive_rates, &true_positive_rates)?;
		log::debug!("{}: roc auc {} with positive label {}", name, roc_auc, pos_label);
		let display = RocCurveDisplay::new(
			RocCurves::Single {
				fpr: false_positive_rates,
				tpr: true_positive_rates,
				roc_auc: Some(roc_auc),
				name: Some(name),
			},
			Some(pos_label),
		)?;
		display.plot(options.figure, options.plot)
	}

	/**
	Score `features` with a fitted binary classifier and plot the ROC curve of the scores against `y`.
	*/
	pub fn from_estimator<E>(
		estimator: &E,
		features: ArrayView2<f32>,
		y: &[Label],
		options: RocFromEstimatorOptions,
	) -> Result<RocCurveDisplay, Error>
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
		RocCurveDisplay::from_predictions(
			y,
			&y_score,
			RocFromPredictionsOptions {
				sample_weight: options.sample_weight,
				drop_intermediate: options.drop_intermediate,
				pos_label: Some(&pos_label),
				name: Some(name),
				figure: options.figure,
				plot: options.plot,
			},
		)
	}

	/**
	Plot one ROC curve per cross validation fold. Each fold's estimator scores the rows of `features` in that fold's test indices.

	`cv_results` must hold both the fitted estimators and the train and test indices of every fold, and `features` must have as many rows as the first fold's train and test indices together.
	*/
	pub fn from_cv_results<E>(
		cv_results: &CvResults<E>,
		features: ArrayView2<f32>,
		y: &[Label],
		options: RocFromCvResultsOptions,
	) -> Result<RocCurveDisplay, Error>
	where
		E: Classifier,
	{
		let (estimators, indices) = match (&cv_results.estimator, &cv_results.indices) {
			(Some(estimators), Some(indices)) => (estimators, indices),
			_ => {
				return Err(Error::MissingCvResultsKeys {
					keys: cv_results.missing_keys().join(", "),
				})
			}
		};
		let n_folds = estimators.len();
		if indices.train.len() != n_folds || indices.test.len() != n_folds {
			return Err(Error::FoldCountMismatch {
				estimators: n_folds,
				train: indices.train.len(),
				test: indices.test.len(),
			});
		}
		if n_folds == 0 {
			return Err(Error::NoFolds);
		}
		let expected = indices.train[0].len() + indices.test[0].len();
		if features.nrows() != expected {
			return Err(Error::SampleCountMismatch {
				expected,
				actual: features.nrows(),
			});
		}
		let mut lengths = vec![features.nrows(), y.len()];
		if let Some(sample_weight) = options.sample_weight {
			lengths.push(sample_weight.len());
		}
		check_consistent_length(&lengths)?;
		if let Some(fold_names) = &options.plot.fold_names {
			if fold_names.len() != n_folds {
				return Err(Error::FoldNameLength {
					expected: n_folds,
					actual: fold_names.len(),
				});
			}
		}
		if let Some(fold_line_style) = &options.plot.fold_line_style {
			fold_line_style.validate(n_folds)?;
		}
		let mut fpr = Vec::with_capacity(n_folds);
		let mut tpr = Vec::with_capacity(n_folds);
		let mut roc_auc = Vec::with_capacity(n_folds);
		let mut pos_label = None;
		for (fold, (estimator, test_indices)) in estimators.iter().zip(indices.test.iter()).enumerate() {
			let y_test = select_rows(y, test_indices, fold)?;
			let sample_weight_test = options
				.sample_weight
				.map(|sample_weight| select_rows(sample_weight, test_indices, fold))
				.transpose()?;
			let features_test = features.select(Axis(0), test_indices);
			let (y_score, fold_pos_label) = get_response_values_binary(
				estimator,
				features_test.view(),
				options.response_method,
				options.pos_label,
			)?;
			let curve = roc_curve(
				&y_test,
				&y_score,
				RocCurveOptions {
					pos_label: Some(&fold_pos_label),
					sample_weight: sample_weight_test.as_deref(),
					drop_intermediate: options.drop_intermediate,
				},
			)?;
			let fold_roc_auc = auc(&curve.false_positive_rates, &curve.true_positive_rates)?;
			log::debug!("fold {}: roc auc {}", fold, fold_roc_auc);
			fpr.push(curve.false_positive_rates);
			tpr.push(curve.true_positive_rates);
			roc_auc.push(fold_roc_auc);
			pos_label = Some(fold_pos_label);
		}
		let display = RocCurveDisplay::new(
			RocCurves::Multi {
				fpr,
				tpr,
				roc_auc: Some(roc_auc),
				name: None,
			},
			pos_label,
		)?;
		display.plot(options.figure, options.plot)
	}
}

fn default_line_style(name: Option<&str>, roc_auc: Option<f32>) -> LineStyle {
	match (name, roc_auc) {
		(Some(name), Some(roc_auc)) => {
			LineStyle::new().label(format!("{} (AUC = {:.2})", name, roc_auc))
		}
		(None, Some(roc_auc)) => LineStyle::new().label(format!("AUC = {:.2}", roc_auc)),
		(Some(name), None) => LineStyle::new().label(name),
		(None, None) => LineStyle::new(),
	}
}

#[cfg(test)]
use crate::testing::{make_classification, train_classifier};
#[cfg(test)]
use sightline_model::CvIndices;
#[cfg(test)]
use sightline_plot::LegendLocation;

#[cfg(test)]
fn labels(values: &[i64]) -> Vec<Label> {
	values.iter().map(|value| Label::from(*value)).collect()
}

#[cfg(test)]
fn three_fold_curves() -> RocCurves {
	RocCurves::Multi {
		fpr: vec![vec![0.0, 0.5, 1.0]; 3],
		tpr: vec![vec![0.0, 1.0, 1.0]; 3],
		roc_auc: Some(vec![0.75, 0.8, 0.9]),
		name: None,
	}
}

#[cfg(test)]
fn cv_results(n_rows: usize, n_folds: usize) -> (Array2<f32>, Vec<Label>, CvResults<sightline_linear::BinaryClassifier>) {
	let (features, y) = make_classification(n_rows, 0);
	let fold_size = n_rows / n_folds;
	let mut estimators = Vec::new();
	let mut indices = CvIndices::default();
	for fold in 0..n_folds {
		let test: Vec<usize> = (fold * fold_size..(fold + 1) * fold_size).collect();
		let train: Vec<usize> = (0..n_rows).filter(|row| !test.contains(row)).collect();
		let y_train = select_rows(&y, &train, fold).unwrap();
		let features_train = features.select(Axis(0), &train);
		estimators.push(train_classifier(features_train.view(), &y_train));
		indices.train.push(train);
		indices.test.push(test);
	}
	(features, y, CvResults::new(estimators, indices))
}

#[test]
fn test_from_predictions() {
	let y_true = labels(&[0, 0, 1, 1]);
	let y_score = [0.1, 0.4, 0.35, 0.8];
	let display =
		RocCurveDisplay::from_predictions(&y_true, &y_score, RocFromPredictionsOptions::default())
			.unwrap();
	let curve = roc_curve(&y_true, &y_score, RocCurveOptions::default()).unwrap();
	let expected_auc = auc(&curve.false_positive_rates, &curve.true_positive_rates).unwrap();
	assert!((expected_auc - 0.75).abs() < 1e-6);
	assert_eq!(display.roc_auc(), Some(expected_auc));
	assert_eq!(display.pos_label(), Some(&Label::from(1)));
	assert_eq!(display.lines().len(), 1);
	let line = display.line().unwrap();
	assert_eq!(line.x, curve.false_positive_rates);
	assert_eq!(line.y, curve.true_positive_rates);
	assert_eq!(line.label.as_deref(), Some("Classifier (AUC = 0.75)"));
	assert!(display.chance_level().is_none());
	let axes = display.ax().unwrap();
	assert_eq!(axes.x_label(), Some("False Positive Rate (Positive label: 1)"));
	assert_eq!(axes.y_label(), Some("True Positive Rate (Positive label: 1)"));
	assert_eq!(axes.x_lim(), (-0.01, 1.01));
	assert_eq!(axes.y_lim(), (-0.01, 1.01));
	assert_eq!(axes.aspect(), Aspect::Equal);
	assert_eq!(axes.legend_location(), Some(LegendLocation::LowerRight));
	assert_eq!(display.figure().unwrap().size(), (640, 480));
}

#[test]
fn test_from_predictions_with_string_labels() {
	let y_true = vec![
		Label::from("ham"),
		Label::from("spam"),
		Label::from("spam"),
		Label::from("ham"),
	];
	let y_score = [0.2, 0.9, 0.6, 0.7];
	let error =
		RocCurveDisplay::from_predictions(&y_true, &y_score, RocFromPredictionsOptions::default())
			.unwrap_err();
	insta::assert_snapshot!(error, @"y_true takes value in {ham, spam} and pos_label is not specified: either make y_true take value in {0, 1} or {-1, 1} or pass pos_label explicitly");
	let spam = Label::from("spam");
	let display = RocCurveDisplay::from_predictions(
		&y_true,
		&y_score,
		RocFromPredictionsOptions {
			pos_label: Some(&spam),
			name: Some("Filter".to_owned()),
			..Default::default()
		},
	)
	.unwrap();
	assert_eq!(
		display.line().unwrap().label.as_deref(),
		Some("Filter (AUC = 0.75)")
	);
	assert_eq!(
		display.ax().unwrap().x_label(),
		Some("False Positive Rate (Positive label: spam)")
	);
}

#[test]
fn test_from_predictions_inconsistent_lengths() {
	let y_true = labels(&[0, 1, 1]);
	let error = RocCurveDisplay::from_predictions(
		&y_true,
		&[0.1, 0.9, 0.8],
		RocFromPredictionsOptions {
			sample_weight: Some(&[1.0, 1.0]),
			..Default::default()
		},
	)
	.unwrap_err();
	insta::assert_snapshot!(error, @"found input variables with inconsistent numbers of samples: [3, 3, 2]");
}

#[test]
fn test_plot_chance_level() {
	let curves = RocCurves::Single {
		fpr: vec![0.0, 0.5, 1.0],
		tpr: vec![0.0, 1.0, 1.0],
		roc_auc: None,
		name: None,
	};
	let display = RocCurveDisplay::new(curves.clone(), None)
		.unwrap()
		.plot(
			None,
			RocPlotOptions {
				plot_chance_level: true,
				..Default::default()
			},
		)
		.unwrap();
	let chance_level = display.chance_level().unwrap();
	assert_eq!(chance_level.x, vec![0.0, 1.0]);
	assert_eq!(chance_level.y, vec![0.0, 1.0]);
	assert_eq!(chance_level.label.as_deref(), Some("Chance level (AUC = 0.5)"));
	assert_eq!(chance_level.color, Color::BLACK);
	assert_eq!(chance_level.linestyle, DashStyle::Dashed);
	assert_eq!(display.line().unwrap().label, None);
	assert_eq!(display.ax().unwrap().x_label(), Some("False Positive Rate"));
	assert_eq!(
		display.ax().unwrap().legend_location(),
		Some(LegendLocation::LowerRight)
	);
	let red: Color = "red".parse().unwrap();
	let display = RocCurveDisplay::new(curves, None)
		.unwrap()
		.plot(
			None,
			RocPlotOptions {
				plot_chance_level: true,
				chance_level_style: Some(LineStyle::new().color(red).linewidth(3.0)),
				..Default::default()
			},
		)
		.unwrap();
	let chance_level = display.chance_level().unwrap();
	assert_eq!(chance_level.color, red);
	assert_eq!(chance_level.linewidth, 3.0);
	assert_eq!(chance_level.linestyle, DashStyle::Dashed);
	assert_eq!(chance_level.label.as_deref(), Some("Chance level (AUC = 0.5)"));
}

#[test]
fn test_plot_without_labels_has_no_legend() {
	let display = RocCurveDisplay::new(
		RocCurves::Single {
			fpr: vec![0.0, 1.0],
			tpr: vec![0.0, 1.0],
			roc_auc: None,
			name: None,
		},
		None,
	)
	.unwrap()
	.plot(
		None,
		RocPlotOptions {
			despine: true,
			..Default::default()
		},
	)
	.unwrap();
	let axes = display.ax().unwrap();
	assert_eq!(axes.legend_location(), None);
	assert!(!axes.spines().top);
	assert!(!axes.spines().right);
	assert!(axes.spines().bottom);
}

#[test]
fn test_plot_on_figure_with_labeled_line() {
	let mut figure = Figure::default();
	figure
		.axes_mut()
		.plot(&[0.0, 1.0], &[1.0, 0.0], &LineStyle::new().label("reference"))
		.unwrap();
	let curves = RocCurves::Single {
		fpr: vec![0.0, 1.0],
		tpr: vec![0.0, 1.0],
		roc_auc: None,
		name: None,
	};
	let display = RocCurveDisplay::new(curves.clone(), None)
		.unwrap()
		.plot(Some(figure.clone()), RocPlotOptions::default())
		.unwrap();
	let axes = display.ax().unwrap();
	assert_eq!(axes.lines().len(), 2);
	assert_eq!(axes.legend_location(), None);
	let display = RocCurveDisplay::new(curves, None)
		.unwrap()
		.plot(
			Some(figure),
			RocPlotOptions {
				plot_chance_level: true,
				..Default::default()
			},
		)
		.unwrap();
	assert_eq!(
		display.ax().unwrap().legend_location(),
		Some(LegendLocation::LowerRight)
	);
}

#[test]
fn test_plot_name_overrides_stored_name() {
	let display = RocCurveDisplay::new(
		RocCurves::Single {
			fpr: vec![0.0, 1.0],
			tpr: vec![0.0, 1.0],
			roc_auc: Some(0.5),
			name: Some("stored".to_owned()),
		},
		None,
	)
	.unwrap()
	.plot(
		None,
		RocPlotOptions {
			name: Some("given".to_owned()),
			line_style: Some(LineStyle::new().alpha(0.3)),
			..Default::default()
		},
	)
	.unwrap();
	let line = display.line().unwrap();
	assert_eq!(line.label.as_deref(), Some("given (AUC = 0.50)"));
	assert_eq!(line.alpha, 0.3);
}

#[test]
fn test_plot_reuses_figure() {
	let y_true = labels(&[0, 0, 1, 1]);
	let display = RocCurveDisplay::from_predictions(
		&y_true,
		&[0.1, 0.4, 0.35, 0.8],
		RocFromPredictionsOptions {
			figure: Some(Figure::new(800, 800)),
			..Default::default()
		},
	)
	.unwrap();
	let figure = display.into_figure().unwrap();
	assert_eq!(figure.size(), (800, 800));
	assert_eq!(figure.axes().lines().len(), 1);
}

#[test]
fn test_plot_multiple_curves() {
	let display = RocCurveDisplay::new(three_fold_curves(), None)
		.unwrap()
		.plot(None, RocPlotOptions::default())
		.unwrap();
	let lines = display.lines();
	assert_eq!(lines.len(), 3);
	let labels: Vec<_> = lines.iter().map(|line| line.label.clone().unwrap()).collect();
	assert_eq!(
		labels,
		vec![
			"ROC fold 0 (AUC = 0.75)",
			"ROC fold 1 (AUC = 0.80)",
			"ROC fold 2 (AUC = 0.90)",
		]
	);
	for line in lines {
		assert_eq!(line.alpha, 0.5);
		assert_eq!(line.color, Color::TAB_BLUE);
		assert_eq!(line.linestyle, DashStyle::Dashed);
	}
	assert_eq!(display.roc_auc(), None);
}

#[test]
fn test_plot_multiple_curves_with_styles_and_names() {
	let red: Color = "red".parse().unwrap();
	let display = RocCurveDisplay::new(three_fold_curves(), None)
		.unwrap()
		.plot(
			None,
			RocPlotOptions {
				fold_names: Some(vec!["a".to_owned(), "b".to_owned(), "c".to_owned()]),
				fold_line_style: Some(FoldStyle::Shared(LineStyle::new().color(red))),
				..Default::default()
			},
		)
		.unwrap();
	for (line, name) in display.lines().iter().zip(&["a", "b", "c"]) {
		assert!(line.label.as_deref().unwrap().starts_with(name));
		assert_eq!(line.color, red);
		assert_eq!(line.linestyle, DashStyle::Solid);
	}
	let display = RocCurveDisplay::new(three_fold_curves(), None)
		.unwrap()
		.plot(
			None,
			RocPlotOptions {
				fold_line_style: Some(FoldStyle::PerFold(vec![
					LineStyle::new().linewidth(1.0),
					LineStyle::new().linewidth(2.0),
					LineStyle::new().linewidth(3.0).label("best"),
				])),
				..Default::default()
			},
		)
		.unwrap();
	let lines = display.lines();
	assert_eq!(lines[1].linewidth, 2.0);
	assert_eq!(lines[2].label.as_deref(), Some("best"));
}

#[test]
fn test_plot_multiple_curves_validation() {
	let error = RocCurveDisplay::new(three_fold_curves(), None)
		.unwrap()
		.plot(
			None,
			RocPlotOptions {
				fold_line_style: Some(FoldStyle::PerFold(vec![LineStyle::new(); 2])),
				..Default::default()
			},
		)
		.unwrap_err();
	insta::assert_snapshot!(error, @"when fold_line_style is a list, it must have the same length as the number of ROC curves to be plotted: expected 3, got 2");
	let error = RocCurveDisplay::new(three_fold_curves(), None)
		.unwrap()
		.plot(
			None,
			RocPlotOptions {
				fold_names: Some(vec!["a".to_owned()]),
				..Default::default()
			},
		)
		.unwrap_err();
	insta::assert_snapshot!(error, @"fold_names must have the same length as the number of ROC curves to be plotted: expected 3, got 1");
	let error = RocCurveDisplay::new(
		RocCurves::Multi {
			fpr: vec![vec![0.0, 1.0]; 2],
			tpr: vec![vec![0.0, 1.0]; 2],
			roc_auc: None,
			name: Some(vec!["a".to_owned(), "b".to_owned(), "c".to_owned()]),
		},
		None,
	)
	.unwrap_err();
	insta::assert_snapshot!(error, @"when plotting multiple ROC curves, fpr, tpr, and if provided, roc_auc and name should all have the same length: fpr has 2 entries but name has 3");
}

#[test]
fn test_from_estimator() {
	let (features, y) = make_classification(200, 1);
	let estimator = train_classifier(features.view(), &y);
	for response_method in &[
		ResponseMethod::Auto,
		ResponseMethod::PredictProba,
		ResponseMethod::DecisionFunction,
	] {
		let display = RocCurveDisplay::from_estimator(
			&estimator,
			features.view(),
			&y,
			RocFromEstimatorOptions {
				response_method: *response_method,
				plot: RocPlotOptions {
					plot_chance_level: true,
					..Default::default()
				},
				..Default::default()
			},
		)
		.unwrap();
		assert!(display.roc_auc().unwrap() > 0.8);
		assert!(display
			.line()
			.unwrap()
			.label
			.as_deref()
			.unwrap()
			.starts_with("LogisticRegression (AUC = "));
		assert!(display.chance_level().is_some());
	}
	let zero = Label::from(0);
	let display = RocCurveDisplay::from_estimator(
		&estimator,
		features.view(),
		&y,
		RocFromEstimatorOptions {
			pos_label: Some(&zero),
			name: Some("flipped".to_owned()),
			..Default::default()
		},
	)
	.unwrap();
	assert!(display.roc_auc().unwrap() > 0.8);
	assert_eq!(display.pos_label(), Some(&zero));
}

#[test]
fn test_from_estimator_response_method() {
	let (features, y) = make_classification(50, 42);
	let estimator = train_classifier(features.view(), &y);
	let from_estimator = |response_method: &str| {
		response_method
			.parse::<ResponseMethod>()
			.map_err(Error::from)
			.and_then(|response_method| {
				RocCurveDisplay::from_estimator(
					&estimator,
					features.view(),
					&y,
					RocFromEstimatorOptions {
						response_method,
						..Default::default()
					},
				)
			})
	};
	assert!(from_estimator("decision_function").unwrap().roc_auc().is_some());
	let error = from_estimator("invalid input").unwrap_err();
	insta::assert_snapshot!(error, @r###"response_method must be one of "auto", "predict_proba" or "decision_function", got "invalid input""###);
}

#[test]
fn test_from_cv_results() {
	let (features, y, cv_results) = cv_results(90, 3);
	let display = RocCurveDisplay::from_cv_results(
		&cv_results,
		features.view(),
		&y,
		RocFromCvResultsOptions {
			plot: RocPlotOptions {
				plot_chance_level: true,
				..Default::default()
			},
			..Default::default()
		},
	)
	.unwrap();
	let lines = display.lines();
	assert_eq!(lines.len(), 3);
	assert!(lines[0]
		.label
		.as_deref()
		.unwrap()
		.starts_with("ROC fold 0 (AUC = "));
	match display.curves() {
		RocCurves::Multi { roc_auc, .. } => {
			for roc_auc in roc_auc.as_ref().unwrap() {
				assert!(*roc_auc > 0.7);
			}
		}
		RocCurves::Single { .. } => panic!("expected one curve per fold"),
	}
	assert_eq!(display.pos_label(), Some(&Label::from(1)));
	assert!(display.chance_level().is_some());
	let sample_weight = vec![1.0; 90];
	let display = RocCurveDisplay::from_cv_results(
		&cv_results,
		features.view(),
		&y,
		RocFromCvResultsOptions {
			sample_weight: Some(&sample_weight),
			plot: RocPlotOptions {
				fold_names: Some(vec!["x".to_owned(), "y".to_owned(), "z".to_owned()]),
				..Default::default()
			},
			..Default::default()
		},
	)
	.unwrap();
	assert!(display.lines()[2]
		.label
		.as_deref()
		.unwrap()
		.starts_with("z (AUC = "));
}

#[test]
fn test_from_cv_results_errors() {
	let (features, y, cv_results) = cv_results(60, 3);
	let missing: CvResults<sightline_linear::BinaryClassifier> = CvResults {
		estimator: cv_results.estimator.clone(),
		indices: None,
	};
	let error = RocCurveDisplay::from_cv_results(
		&missing,
		features.view(),
		&y,
		RocFromCvResultsOptions::default(),
	)
	.unwrap_err();
	insta::assert_snapshot!(error, @"cv_results does not contain the required keys {indices}: keep the fitted estimator and the train and test indices of every fold");
	let missing: CvResults<sightline_linear::BinaryClassifier> = CvResults::default();
	let error = RocCurveDisplay::from_cv_results(
		&missing,
		features.view(),
		&y,
		RocFromCvResultsOptions::default(),
	)
	.unwrap_err();
	insta::assert_snapshot!(error, @"cv_results does not contain the required keys {estimator, indices}: keep the fitted estimator and the train and test indices of every fold");
	let error = RocCurveDisplay::from_cv_results(
		&cv_results,
		features.slice(s![..59, ..]),
		&y[..59],
		RocFromCvResultsOptions::default(),
	)
	.unwrap_err();
	insta::assert_snapshot!(error, @"X does not contain the correct number of samples. Expected 60, got 59.");
	let error = RocCurveDisplay::from_cv_results(
		&cv_results,
		features.view(),
		&y,
		RocFromCvResultsOptions {
			plot: RocPlotOptions {
				fold_line_style: Some(FoldStyle::PerFold(vec![LineStyle::new(); 4])),
				..Default::default()
			},
			..Default::default()
		},
	)
	.unwrap_err();
	insta::assert_snapshot!(error, @"when fold_line_style is a list, it must have the same length as the number of ROC curves to be plotted: expected 3, got 4");
}
