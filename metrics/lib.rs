/*!
This crate computes the curves and summary metrics used to evaluate binary classifiers: the receiver operating characteristic curve ([`roc_curve`](fn.roc_curve.html)), the area under a curve ([`auc`](fn.auc.html)), and the cumulative gains behind the cumulative accuracy profile ([`cumulative_gains`](fn.cumulative_gains.html)).

Labels are represented by [`Label`](enum.Label.html), which can be an integer, a boolean, or a string. The positive class is either given explicitly or inferred when the labels are `{0, 1}` or `{-1, 1}`.
*/

#![allow(clippy::tabs_in_doc_comments)]

use thiserror::Error;

mod auc;
mod binary_cross_entropy;
mod cumulative_gains;
mod label;
mod mean;
mod roc_curve;
mod validation;

pub use self::auc::auc;
pub use self::binary_cross_entropy::{BinaryCrossEntropy, BinaryCrossEntropyInput};
pub use self::cumulative_gains::{cumulative_gains, CumulativeGainsOptions, CumulativeGainsOutput};
pub use self::label::{format_labels, unique_labels, Label};
pub use self::mean::Mean;
pub use self::roc_curve::{roc_curve, RocCurveOptions, RocCurveOutput};
pub use self::validation::{check_consistent_length, check_pos_label_consistency};

/**
The `StreamingMetric` trait defines a common interface to metrics that can be computed in a streaming manner, where the input is available in chunks.

After being initialized, a value of type `T` implementing the `StreamingMetric` trait can have `update()` called on it with values of the associated type `Input`. Multiple values of `T` can be merged together by calling `merge()`. When finished aggregating, call `finalize()` to produce the associated type `Output`.
*/
pub trait StreamingMetric<'a> {
	/// `Input` is the type to aggregate in calls to `update()`.
	type Input;
	/// `Output` is the return type of `finalize()`.
	type Output;
	/// Update this streaming metric with the `Input` `input`.
	fn update(&mut self, input: Self::Input);
	/// Merge multiple independently computed streaming metrics.
	fn merge(&mut self, other: Self);
	/// When you are done aggregating `Input`s, call `finalize()` to produce an `Output`.
	fn finalize(self) -> Self::Output;
}

/// The errors produced when the inputs to a metric are invalid.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
	#[error("found input variables with inconsistent numbers of samples: {lengths:?}")]
	InconsistentLength { lengths: Vec<usize> },
	#[error("y_true is empty")]
	Empty,
	#[error("y_true takes value in {{{classes}}} and pos_label is not specified: either make y_true take value in {{0, 1}} or {{-1, 1}} or pass pos_label explicitly")]
	AmbiguousPosLabel { classes: String },
	#[error("y_true takes {n_classes} distinct values, which is only supported when pos_label is given")]
	NotBinary { n_classes: usize },
	#[error("{name} contains a non-finite value at index {index}")]
	NotFinite { name: &'static str, index: usize },
	#[error("at least 2 points are needed to compute area under curve, but x has {0} points")]
	TooFewPoints(usize),
	#[error("x is neither increasing nor decreasing")]
	NotMonotonic,
}
