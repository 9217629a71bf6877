/*!
This crate defines the interface the displays use to get scores out of a fitted binary classifier.

A fitted model implements [`Classifier`](trait.Classifier.html), exposing the classes it was fit on and at least one of `predict_proba` or `decision_function`. [`get_response_values_binary`](fn.get_response_values_binary.html) turns either of those into one score per row for a chosen positive class. [`CvResults`](struct.CvResults.html) holds the per-fold estimators and indices produced by a cross validation run.
*/

#![allow(clippy::tabs_in_doc_comments)]

use sightline_metrics::Label;
use thiserror::Error;

mod classifier;
mod cv_results;
mod response;

pub use self::classifier::Classifier;
pub use self::cv_results::{CvIndices, CvResults};
pub use self::response::{get_response_values_binary, ResponseMethod};

#[derive(Debug, Error, PartialEq)]
pub enum Error {
	#[error("response_method must be one of \"auto\", \"predict_proba\" or \"decision_function\", got {0:?}")]
	InvalidResponseMethod(String),
	#[error("expected a binary classifier, but {name} was fit on {n_classes} classes")]
	NotBinaryClassifier { name: String, n_classes: usize },
	#[error("pos_label={pos_label} is not a valid label: it should be one of {{{classes}}}")]
	InvalidPosLabel { pos_label: Label, classes: String },
	#[error("{name} has none of the following methods: {methods}")]
	ResponseMethodUnavailable { name: String, methods: String },
	#[error("expected predicted probabilities of shape ({rows}, 2), got ({actual_rows}, {actual_columns})")]
	ProbabilityShape {
		rows: usize,
		actual_rows: usize,
		actual_columns: usize,
	},
	#[error("expected {expected} decision function values, got {actual}")]
	DecisionFunctionLength { expected: usize, actual: usize },
}
