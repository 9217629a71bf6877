use ndarray::prelude::*;
use num_traits::ToPrimitive;

/// Split `features` and `labels` into training and early stopping sets. The early stopping set is the last `early_stopping_fraction` of the rows.
pub fn train_early_stopping_split<'features, 'labels, T>(
	features: ArrayView2<'features, f32>,
	labels: &'labels [T],
	early_stopping_fraction: f32,
) -> (
	ArrayView2<'features, f32>,
	&'labels [T],
	ArrayView2<'features, f32>,
	&'labels [T],
) {
	let n_rows = features.nrows();
	let split_index = ((1.0 - early_stopping_fraction) * n_rows.to_f32().unwrap_or(0.0))
		.to_usize()
		.unwrap_or(n_rows)
		.min(n_rows);
	let (features_train, features_early_stopping) = features.split_at(Axis(0), split_index);
	let (labels_train, labels_early_stopping) = labels.split_at(split_index);
	(
		features_train,
		labels_train,
		features_early_stopping,
		labels_early_stopping,
	)
}

/**
The `EarlyStoppingMonitor` keeps track of the values of an early stopping metric for each epoch, and if enough epochs have passed without a significant improvement in the metric, the `update()` function will return `true` to indicate that training should be stopped.
*/
pub struct EarlyStoppingMonitor {
	threshold: f32,
	epochs: usize,
	n_epochs_without_observed_improvement: usize,
	previous_epoch_metric_value: Option<f32>,
}

impl EarlyStoppingMonitor {
	pub fn new(threshold: f32, epochs: usize) -> Self {
		EarlyStoppingMonitor {
			threshold,
			epochs,
			previous_epoch_metric_value: None,
			n_epochs_without_observed_improvement: 0,
		}
	}

	/// Record the next epoch's early stopping metric. Returns true if training should stop.
	pub fn update(&mut self, early_stopping_metric_value: f32) -> bool {
		let should_stop = match self.previous_epoch_metric_value {
			Some(previous) => {
				if early_stopping_metric_value > previous
					|| (early_stopping_metric_value - previous).abs() < self.threshold
				{
					self.n_epochs_without_observed_improvement += 1;
					self.n_epochs_without_observed_improvement >= self.epochs
				} else {
					self.n_epochs_without_observed_improvement = 0;
					false
				}
			}
			None => false,
		};
		self.previous_epoch_metric_value = Some(early_stopping_metric_value);
		should_stop
	}
}

#[test]
fn test_early_stopping_split() {
	let features = Array2::<f32>::zeros((10, 2));
	let labels = (0..10).collect::<Vec<_>>();
	let (features_train, labels_train, features_early_stopping, labels_early_stopping) =
		train_early_stopping_split(features.view(), &labels, 0.5);
	assert_eq!(features_train.nrows(), 5);
	assert_eq!(labels_train, &[0, 1, 2, 3, 4]);
	assert_eq!(features_early_stopping.nrows(), 5);
	assert_eq!(labels_early_stopping, &[5, 6, 7, 8, 9]);
}

#[test]
fn test_early_stopping_monitor() {
	let mut monitor = EarlyStoppingMonitor::new(0.01, 2);
	assert!(!monitor.update(1.0));
	assert!(!monitor.update(0.5));
	assert!(!monitor.update(0.499));
	assert!(monitor.update(0.6));
}
