use ndarray::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use sightline_linear::{BinaryClassifier, TrainOptions};
use sightline_metrics::Label;

/// Two noisy gaussian-ish blobs in two dimensions, labeled 0 and 1 in random order.
pub fn make_classification(n_rows: usize, seed: u64) -> (Array2<f32>, Vec<Label>) {
	let mut rng = StdRng::seed_from_u64(seed);
	let mut features = Array2::<f32>::zeros((n_rows, 2));
	let mut labels = Vec::with_capacity(n_rows);
	for mut row in features.axis_iter_mut(Axis(0)) {
		let is_positive = rng.gen::<bool>();
		let center = if is_positive { 0.75 } else { -0.75 };
		row[0] = center + rng.gen_range(-1.0, 1.0);
		row[1] = center + rng.gen_range(-1.0, 1.0);
		labels.push(Label::from(if is_positive { 1 } else { 0 }));
	}
	(features, labels)
}

pub fn random_scores(n_rows: usize, seed: u64) -> Vec<f32> {
	let mut rng = StdRng::seed_from_u64(seed);
	(0..n_rows).map(|_| rng.gen::<f32>()).collect()
}

pub fn train_classifier(features: ArrayView2<f32>, labels: &[Label]) -> BinaryClassifier {
	BinaryClassifier::train(features, labels, &TrainOptions::default())
		.unwrap()
		.with_name("LogisticRegression")
}
