/*!
This crate draws the curves used to evaluate binary classifiers onto a [`sightline_plot::Figure`](../sightline_plot/struct.Figure.html).

[`RocCurveDisplay`](struct.RocCurveDisplay.html) draws one receiver operating characteristic curve, or one per cross validation fold. [`CapCurveDisplay`](struct.CapCurveDisplay.html) draws a cumulative accuracy profile. Both can be built from precomputed values, from true labels and scores, or from a fitted [`Classifier`](../sightline_model/trait.Classifier.html), and both return the lines they drew so callers can restyle or inspect them.

```
use sightline_display::{RocCurveDisplay, RocFromPredictionsOptions};
use sightline_metrics::Label;

let y_true: Vec<Label> = vec![0.into(), 0.into(), 1.into(), 1.into()];
let y_score = [0.1, 0.4, 0.35, 0.8];
let display =
	RocCurveDisplay::from_predictions(&y_true, &y_score, RocFromPredictionsOptions::default())
		.unwrap();
assert_eq!(display.roc_auc(), Some(0.75));
```
*/

#![allow(clippy::tabs_in_doc_comments)]

use thiserror::Error;

mod cap_curve_display;
mod common;
mod curves;
mod roc_curve_display;
#[cfg(test)]
mod testing;

pub use self::cap_curve_display::{
	CapCurveDisplay, CapFromEstimatorOptions, CapFromPredictionsOptions, CapPlotOptions,
};
pub use self::curves::{FoldStyle, Rates, RocCurves};
pub use self::roc_curve_display::{
	RocCurveDisplay, RocFromCvResultsOptions, RocFromEstimatorOptions, RocFromPredictionsOptions,
	RocPlotOptions,
};

#[derive(Debug, Error)]
pub enum Error {
	#[error("when plotting multiple ROC curves, fpr and tpr should both be lists")]
	MixedCurveShapes,
	#[error("when plotting multiple ROC curves, fpr, tpr, and if provided, roc_auc and name should all have the same length: fpr has {expected} entries but {attribute} has {actual}")]
	MultiCurveLengthMismatch {
		attribute: &'static str,
		expected: usize,
		actual: usize,
	},
	#[error("fpr and tpr of curve {index} have different lengths: {fpr} and {tpr}")]
	RateLengthMismatch { index: usize, fpr: usize, tpr: usize },
	#[error("when fold_line_style is a list, it must have the same length as the number of ROC curves to be plotted: expected {expected}, got {actual}")]
	FoldStyleLength { expected: usize, actual: usize },
	#[error("fold_names must have the same length as the number of ROC curves to be plotted: expected {expected}, got {actual}")]
	FoldNameLength { expected: usize, actual: usize },
	#[error("cv_results does not contain the required keys {{{keys}}}: keep the fitted estimator and the train and test indices of every fold")]
	MissingCvResultsKeys { keys: String },
	#[error("X does not contain the correct number of samples. Expected {expected}, got {actual}.")]
	SampleCountMismatch { expected: usize, actual: usize },
	#[error("cv_results has {estimators} estimators, {train} train index sets and {test} test index sets")]
	FoldCountMismatch {
		estimators: usize,
		train: usize,
		test: usize,
	},
	#[error("cv_results contains no folds")]
	NoFolds,
	#[error("index {index} of fold {fold} is out of bounds for {n_rows} rows")]
	IndexOutOfBounds {
		fold: usize,
		index: usize,
		n_rows: usize,
	},
	#[error("cumulative_total and y_true_cumulative must have the same length, got {cumulative_total} and {y_true_cumulative}")]
	CumulativeLengthMismatch {
		cumulative_total: usize,
		y_true_cumulative: usize,
	},
	#[error(transparent)]
	Metrics(#[from] sightline_metrics::Error),
	#[error(transparent)]
	Model(#[from] sightline_model::Error),
	#[error(transparent)]
	Plot(#[from] sightline_plot::Error),
}
