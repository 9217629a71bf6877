use crate::{roc_curve::binarize, Error, Label};
use itertools::izip;
use std::cmp::Ordering;

/// These are the options passed to [`cumulative_gains`](fn.cumulative_gains.html).
#[derive(Clone, Copy, Debug, Default)]
pub struct CumulativeGainsOptions<'a> {
	pub pos_label: Option<&'a Label>,
	pub sample_weight: Option<&'a [f32]>,
	/// Divide both cumulative sums by their totals so the curve ends at `(1, 1)`.
	pub normalize: bool,
}

/// The cumulative gains of a ranking, starting at `(0, 0)`.
#[derive(Clone, Debug, PartialEq)]
pub struct CumulativeGainsOutput {
	/// The cumulative weight of all samples, taken in order of decreasing score.
	pub cumulative_total: Vec<f32>,
	/// The cumulative weight of the positive samples, taken in order of decreasing score.
	pub y_true_cumulative: Vec<f32>,
}

/**
This function computes the cumulative gains used to draw a cumulative accuracy profile. Samples are sorted by decreasing score, and for each prefix of the ranking the total weight and the weight of the positive samples are accumulated. Unlike the ROC curve, tied scores are not merged.
*/
pub fn cumulative_gains(
	y_true: &[Label],
	y_score: &[f32],
	options: CumulativeGainsOptions,
) -> Result<CumulativeGainsOutput, Error> {
	let is_positive = binarize(y_true, y_score, options.pos_label, options.sample_weight)?;
	let mut samples: Vec<(f32, bool, f32)> = match options.sample_weight {
		Some(sample_weight) => izip!(y_score, is_positive, sample_weight)
			.map(|(score, is_positive, weight)| (*score, is_positive, *weight))
			.collect(),
		None => izip!(y_score, is_positive)
			.map(|(score, is_positive)| (*score, is_positive, 1.0))
			.collect(),
	};
	samples.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
	let mut cumulative_total = Vec::with_capacity(samples.len() + 1);
	let mut y_true_cumulative = Vec::with_capacity(samples.len() + 1);
	cumulative_total.push(0.0);
	y_true_cumulative.push(0.0);
	let mut total = 0.0;
	let mut positives = 0.0;
	for (_, is_positive, weight) in samples {
		total += weight;
		if is_positive {
			positives += weight;
		}
		cumulative_total.push(total);
		y_true_cumulative.push(positives);
	}
	if positives <= 0.0 {
		log::warn!("no positive samples in y_true, the cumulative accuracy profile is flat");
	}
	if options.normalize {
		normalize(&mut cumulative_total);
		normalize(&mut y_true_cumulative);
	}
	Ok(CumulativeGainsOutput {
		cumulative_total,
		y_true_cumulative,
	})
}

fn normalize(values: &mut [f32]) {
	let last = values.last().copied().unwrap_or(0.0);
	for value in values.iter_mut() {
		*value = if last > 0.0 { *value / last } else { std::f32::NAN };
	}
}

#[test]
fn test_cumulative_gains() {
	let y_true: Vec<Label> = vec![0.into(), 1.into(), 0.into(), 1.into()];
	let y_score = vec![0.2, 0.9, 0.6, 0.3];
	let output = cumulative_gains(&y_true, &y_score, CumulativeGainsOptions::default()).unwrap();
	assert_eq!(output.cumulative_total, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
	assert_eq!(output.y_true_cumulative, vec![0.0, 1.0, 1.0, 2.0, 2.0]);
}

#[test]
fn test_cumulative_gains_normalized_and_weighted() {
	let y_true: Vec<Label> = vec![0.into(), 1.into(), 0.into(), 1.into()];
	let y_score = vec![0.2, 0.9, 0.6, 0.3];
	let sample_weight = vec![1.0, 2.0, 1.0, 2.0];
	let output = cumulative_gains(
		&y_true,
		&y_score,
		CumulativeGainsOptions {
			sample_weight: Some(&sample_weight),
			normalize: true,
			..Default::default()
		},
	)
	.unwrap();
	assert_eq!(
		output.cumulative_total,
		vec![0.0, 2.0 / 6.0, 3.0 / 6.0, 5.0 / 6.0, 1.0]
	);
	assert_eq!(output.y_true_cumulative, vec![0.0, 0.5, 0.5, 1.0, 1.0]);
}
