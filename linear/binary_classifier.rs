use crate::{
	early_stopping::{train_early_stopping_split, EarlyStoppingMonitor},
	Error, TrainOptions,
};
use itertools::izip;
use ndarray::prelude::*;
use sightline_metrics::{
	format_labels, unique_labels, BinaryCrossEntropy, BinaryCrossEntropyInput, Label,
	StreamingMetric,
};
use sightline_model::Classifier;
use std::ops::Neg;

/// A logistic regression model over dense `f32` features.
#[derive(Clone, Debug, PartialEq)]
pub struct BinaryClassifier {
	pub name: String,
	pub weights: Array1<f32>,
	pub bias: f32,
	/// The loss on the early stopping set after each epoch. Empty if early stopping was disabled.
	pub losses: Vec<f32>,
	/// The two classes, sorted. The second one is the class whose probability the model predicts.
	pub classes: Vec<Label>,
}

impl BinaryClassifier {
	pub fn train(
		features: ArrayView2<f32>,
		labels: &[Label],
		options: &TrainOptions,
	) -> Result<BinaryClassifier, Error> {
		if features.nrows() != labels.len() {
			return Err(Error::LabelCount {
				n_rows: features.nrows(),
				n_labels: labels.len(),
			});
		}
		if let Some(((row, column), _)) = features
			.indexed_iter()
			.find(|(_, value)| !value.is_finite())
		{
			return Err(Error::NotFinite { row, column });
		}
		let classes = unique_labels(labels);
		if classes.len() != 2 {
			return Err(Error::NotBinary {
				n_classes: classes.len(),
				classes: format_labels(&classes),
			});
		}
		let is_positive: Vec<bool> = labels.iter().map(|label| *label == classes[1]).collect();
		let early_stopping_fraction = options
			.early_stopping_options
			.as_ref()
			.map(|options| options.early_stopping_fraction)
			.unwrap_or(0.0);
		let (features_train, labels_train, features_early_stopping, labels_early_stopping) =
			train_early_stopping_split(features, &is_positive, early_stopping_fraction);
		let mut model = BinaryClassifier {
			name: "BinaryClassifier".to_owned(),
			bias: 0.0,
			weights: Array1::<f32>::zeros(features.ncols()),
			losses: vec![],
			classes,
		};
		let mut early_stopping_monitor =
			options
				.early_stopping_options
				.as_ref()
				.and_then(|early_stopping_options| {
					if labels_early_stopping.is_empty() {
						None
					} else {
						Some(EarlyStoppingMonitor::new(
							early_stopping_options.min_decrease_in_loss_for_significant_change,
							early_stopping_options.n_epochs_without_improvement_to_stop,
						))
					}
				});
		let n_examples_per_batch = options.n_examples_per_batch.max(1);
		for epoch in 0..options.max_epochs {
			for (features, labels) in izip!(
				features_train.axis_chunks_iter(Axis(0), n_examples_per_batch),
				labels_train.chunks(n_examples_per_batch),
			) {
				model.train_batch(features, labels, options);
			}
			if let Some(early_stopping_monitor) = early_stopping_monitor.as_mut() {
				let loss = model.compute_loss(features_early_stopping, labels_early_stopping);
				model.losses.push(loss);
				if early_stopping_monitor.update(loss) {
					log::debug!("stopping early after {} epochs, loss {}", epoch + 1, loss);
					break;
				}
			}
		}
		Ok(model)
	}

	/// Rename the model. The name labels its curves in plots.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	fn train_batch(&mut self, features: ArrayView2<f32>, labels: &[bool], options: &TrainOptions) {
		let learning_rate = options.learning_rate;
		let mut predictions = self.logits(features).mapv_into(sigmoid);
		for (prediction, label) in izip!(predictions.iter_mut(), labels) {
			*prediction -= if *label { 1.0 } else { 0.0 };
		}
		let py = predictions.insert_axis(Axis(1));
		let weight_gradients = match (&features * &py).mean_axis(Axis(0)) {
			Some(weight_gradients) => weight_gradients,
			None => return,
		};
		let bias_gradient = py.mean().unwrap_or(0.0);
		for (weight, weight_gradient) in izip!(self.weights.iter_mut(), weight_gradients.iter()) {
			*weight += -learning_rate * (weight_gradient + options.l2_regularization * *weight);
		}
		self.bias += -learning_rate * bias_gradient;
	}

	fn compute_loss(&self, features: ArrayView2<f32>, labels: &[bool]) -> f32 {
		let probabilities = self.logits(features).mapv_into(sigmoid);
		let mut metric = BinaryCrossEntropy::default();
		for (probability, is_positive) in izip!(probabilities.iter(), labels) {
			metric.update(BinaryCrossEntropyInput {
				probability: *probability,
				is_positive: *is_positive,
			});
		}
		metric.finalize().unwrap_or(std::f32::NAN)
	}

	fn logits(&self, features: ArrayView2<f32>) -> Array1<f32> {
		features.dot(&self.weights) + self.bias
	}
}

fn sigmoid(logit: f32) -> f32 {
	1.0 / (logit.neg().exp() + 1.0)
}

impl Classifier for BinaryClassifier {
	fn name(&self) -> String {
		self.name.clone()
	}

	fn classes(&self) -> &[Label] {
		&self.classes
	}

	fn predict_proba(&self, features: ArrayView2<f32>) -> Option<Array2<f32>> {
		let mut probabilities = Array2::<f32>::zeros((features.nrows(), 2));
		let logits = self.logits(features);
		for (mut row, logit) in izip!(probabilities.axis_iter_mut(Axis(0)), logits.iter()) {
			let probability = sigmoid(*logit);
			row[0] = 1.0 - probability;
			row[1] = probability;
		}
		Some(probabilities)
	}

	fn decision_function(&self, features: ArrayView2<f32>) -> Option<Array1<f32>> {
		Some(self.logits(features))
	}
}

#[cfg(test)]
fn make_dataset(n_rows: usize) -> (Array2<f32>, Vec<Label>) {
	use rand::{Rng, SeedableRng};
	let mut rng = rand::rngs::StdRng::seed_from_u64(42);
	let mut features = Array2::<f32>::zeros((n_rows, 2));
	let mut labels = Vec::with_capacity(n_rows);
	for mut row in features.axis_iter_mut(Axis(0)) {
		let is_positive = rng.gen::<bool>();
		let center = if is_positive { 1.0 } else { -1.0 };
		row[0] = center + rng.gen_range(-1.0, 1.0);
		row[1] = rng.gen_range(-1.0, 1.0);
		labels.push(Label::from(if is_positive { "yes" } else { "no" }));
	}
	(features, labels)
}

#[test]
fn test_train_separates_classes() {
	let (features, labels) = make_dataset(400);
	let model = BinaryClassifier::train(features.view(), &labels, &TrainOptions::default()).unwrap();
	assert_eq!(model.classes, vec![Label::from("no"), Label::from("yes")]);
	assert!(model.weights[0] > 0.0);
	let probabilities = model.predict_proba(features.view()).unwrap();
	let n_correct = izip!(probabilities.axis_iter(Axis(0)), labels.iter())
		.filter(|(row, label)| (row[1] > 0.5) == (**label == Label::from("yes")))
		.count();
	assert!(n_correct > 300);
	for row in probabilities.axis_iter(Axis(0)) {
		assert!((row[0] + row[1] - 1.0).abs() < 1e-6);
	}
	let logits = model.decision_function(features.view()).unwrap();
	for (logit, row) in izip!(logits.iter(), probabilities.axis_iter(Axis(0))) {
		assert_eq!(*logit > 0.0, row[1] > 0.5);
	}
}

#[test]
fn test_train_errors() {
	let features = Array2::<f32>::zeros((3, 2));
	let labels = vec![Label::from(0), Label::from(1)];
	assert_eq!(
		BinaryClassifier::train(features.view(), &labels, &TrainOptions::default()),
		Err(Error::LabelCount {
			n_rows: 3,
			n_labels: 2
		})
	);
	let labels = vec![Label::from(0), Label::from(1), Label::from(2)];
	assert_eq!(
		BinaryClassifier::train(features.view(), &labels, &TrainOptions::default())
			.unwrap_err()
			.to_string(),
		"a binary classifier needs exactly 2 classes, got 3: {0, 1, 2}"
	);
}
