/*!
This crate implements a linear binary classifier, [`BinaryClassifier`](struct.BinaryClassifier.html), which applies the sigmoid function to a weighted sum of the features. It is trained with minibatch gradient descent on the binary cross entropy loss, and training stops early when the loss on a held out fraction of the data stops improving.

`BinaryClassifier` implements [`sightline_model::Classifier`](../sightline_model/trait.Classifier.html), so it can be passed to the displays' `from_estimator` and `from_cv_results` constructors.
*/

#![allow(clippy::tabs_in_doc_comments)]

use thiserror::Error;

mod binary_classifier;
mod early_stopping;

pub use self::binary_classifier::BinaryClassifier;

/// These are the options passed to `BinaryClassifier::train`.
#[derive(Clone, Debug)]
pub struct TrainOptions {
	/// Specify options for early stopping. If the value is `Some`, early stopping will be enabled. If it is `None`, early stopping will be disabled.
	pub early_stopping_options: Option<EarlyStoppingOptions>,
	/// This is the L2 regularization value to use when updating the model parameters.
	pub l2_regularization: f32,
	/// This is the learning rate to use when updating the model parameters.
	pub learning_rate: f32,
	/// This is the maximum number of epochs to train.
	pub max_epochs: usize,
	/// This is the number of examples to use for each batch of training.
	pub n_examples_per_batch: usize,
}

impl Default for TrainOptions {
	fn default() -> Self {
		Self {
			l2_regularization: 0.0,
			learning_rate: 0.1,
			max_epochs: 100,
			n_examples_per_batch: 32,
			early_stopping_options: Some(EarlyStoppingOptions {
				early_stopping_fraction: 0.1,
				n_epochs_without_improvement_to_stop: 3,
				min_decrease_in_loss_for_significant_change: 1e-3,
			}),
		}
	}
}

/// The parameters in this struct control how to determine whether training should stop early after each epoch.
#[derive(Clone, Debug)]
pub struct EarlyStoppingOptions {
	/// This is the fraction of the dataset that is set aside to compute the early stopping metric.
	pub early_stopping_fraction: f32,
	/// If this many epochs pass by without a significant improvement in the early stopping metric over the previous epoch, training will be stopped early.
	pub n_epochs_without_improvement_to_stop: usize,
	/// This is the minimum decrease in the early stopping metric for an epoch to be considered a significant improvement over the previous epoch.
	pub min_decrease_in_loss_for_significant_change: f32,
}

#[derive(Debug, Error, PartialEq)]
pub enum Error {
	#[error("features has {n_rows} rows but {n_labels} labels were given")]
	LabelCount { n_rows: usize, n_labels: usize },
	#[error("a binary classifier needs exactly 2 classes, got {n_classes}: {{{classes}}}")]
	NotBinary { n_classes: usize, classes: String },
	#[error("features contains a non-finite value at row {row}, column {column}")]
	NotFinite { row: usize, column: usize },
}
