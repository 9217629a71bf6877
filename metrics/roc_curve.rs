use crate::{
	check_consistent_length, check_pos_label_consistency, unique_labels, Error, Label,
};
use itertools::izip;
use std::cmp::Ordering;

/// These are the options passed to [`roc_curve`](fn.roc_curve.html).
#[derive(Clone, Copy, Debug)]
pub struct RocCurveOptions<'a> {
	/// The positive class. If `None`, `y_true` must be in `{0, 1}` or `{-1, 1}` and the positive class is `1`.
	pub pos_label: Option<&'a Label>,
	/// Per-sample weights. If `None`, every sample has weight 1.
	pub sample_weight: Option<&'a [f32]>,
	/// Drop thresholds that produce collinear points, which do not change the plotted curve.
	pub drop_intermediate: bool,
}

impl<'a> Default for RocCurveOptions<'a> {
	fn default() -> Self {
		Self {
			pos_label: None,
			sample_weight: None,
			drop_intermediate: true,
		}
	}
}

/// The receiver operating characteristic curve, ordered by decreasing threshold. The first point is always `(0, 0)` with an infinite threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct RocCurveOutput {
	pub false_positive_rates: Vec<f32>,
	pub true_positive_rates: Vec<f32>,
	pub thresholds: Vec<f32>,
}

/// The weighted counts of true positives and false positives for all predictions with score >= threshold.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TpsFpsPoint {
	pub threshold: f32,
	pub true_positives: f32,
	pub false_positives: f32,
}

/**
This function computes the ROC curve. The ROC curve plots the false positive rate on the x axis and the true positive rate on the y axis for each distinct score in `y_score`, used as a classification threshold.
*/
pub fn roc_curve(
	y_true: &[Label],
	y_score: &[f32],
	options: RocCurveOptions,
) -> Result<RocCurveOutput, Error> {
	let mut tps_fps = compute_tps_fps_by_threshold(y_true, y_score, options)?;
	if options.drop_intermediate && tps_fps.len() > 2 {
		tps_fps = drop_intermediate_points(tps_fps);
	}
	// Add a point at (0, 0) with an infinite threshold so the curve starts at the origin.
	let mut false_positives = vec![0.0];
	let mut true_positives = vec![0.0];
	let mut thresholds = vec![std::f32::INFINITY];
	for point in tps_fps.iter() {
		false_positives.push(point.false_positives);
		true_positives.push(point.true_positives);
		thresholds.push(point.threshold);
	}
	let total_negatives = false_positives.last().copied().unwrap_or(0.0);
	let total_positives = true_positives.last().copied().unwrap_or(0.0);
	if total_negatives <= 0.0 {
		log::warn!("no negative samples in y_true, the false positive rate is undefined");
	}
	if total_positives <= 0.0 {
		log::warn!("no positive samples in y_true, the true positive rate is undefined");
	}
	Ok(RocCurveOutput {
		false_positive_rates: to_rates(&false_positives, total_negatives),
		true_positive_rates: to_rates(&true_positives, total_positives),
		thresholds,
	})
}

fn to_rates(counts: &[f32], total: f32) -> Vec<f32> {
	if total <= 0.0 {
		vec![std::f32::NAN; counts.len()]
	} else {
		counts.iter().map(|count| count / total).collect()
	}
}

/**
This function computes the cumulative counts of true positives and false positives at each distinct score, sorted by decreasing score. Samples with zero weight are ignored.
*/
pub(crate) fn compute_tps_fps_by_threshold(
	y_true: &[Label],
	y_score: &[f32],
	options: RocCurveOptions,
) -> Result<Vec<TpsFpsPoint>, Error> {
	let is_positive = binarize(y_true, y_score, options.pos_label, options.sample_weight)?;
	let mut scores_labels_weights: Vec<(f32, bool, f32)> = match options.sample_weight {
		Some(sample_weight) => izip!(y_score, is_positive, sample_weight)
			.filter(|(_, _, weight)| **weight != 0.0)
			.map(|(score, is_positive, weight)| (*score, is_positive, *weight))
			.collect(),
		None => izip!(y_score, is_positive)
			.map(|(score, is_positive)| (*score, is_positive, 1.0))
			.collect(),
	};
	// Scores are checked to be finite, so the comparison is total.
	scores_labels_weights.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
	let mut tps_fps: Vec<TpsFpsPoint> = Vec::new();
	let mut true_positives = 0.0;
	let mut false_positives = 0.0;
	for (score, is_positive, weight) in scores_labels_weights {
		if is_positive {
			true_positives += weight;
		} else {
			false_positives += weight;
		}
		// If the score is the same as the last one, fold it into the previous threshold.
		match tps_fps.last_mut() {
			Some(last) if last.threshold == score => {
				last.true_positives = true_positives;
				last.false_positives = false_positives;
			}
			_ => tps_fps.push(TpsFpsPoint {
				threshold: score,
				true_positives,
				false_positives,
			}),
		}
	}
	Ok(tps_fps)
}

/// Validate the inputs and return whether each sample belongs to the positive class.
pub(crate) fn binarize(
	y_true: &[Label],
	y_score: &[f32],
	pos_label: Option<&Label>,
	sample_weight: Option<&[f32]>,
) -> Result<Vec<bool>, Error> {
	match sample_weight {
		Some(sample_weight) => {
			check_consistent_length(&[y_true.len(), y_score.len(), sample_weight.len()])?
		}
		None => check_consistent_length(&[y_true.len(), y_score.len()])?,
	}
	if y_true.is_empty() {
		return Err(Error::Empty);
	}
	if let Some(index) = y_score.iter().position(|score| !score.is_finite()) {
		return Err(Error::NotFinite {
			name: "y_score",
			index,
		});
	}
	if let Some(sample_weight) = sample_weight {
		if let Some(index) = sample_weight.iter().position(|weight| !weight.is_finite()) {
			return Err(Error::NotFinite {
				name: "sample_weight",
				index,
			});
		}
	}
	let n_classes = unique_labels(y_true).len();
	if n_classes > 2 && pos_label.is_none() {
		return Err(Error::NotBinary { n_classes });
	}
	let pos_label = check_pos_label_consistency(pos_label, y_true)?;
	log::debug!(
		"binarizing {} samples with positive label {}",
		y_true.len(),
		pos_label
	);
	Ok(y_true.iter().map(|label| *label == pos_label).collect())
}

/// Keep only the first point, the last point, and the points where the curve changes direction.
fn drop_intermediate_points(tps_fps: Vec<TpsFpsPoint>) -> Vec<TpsFpsPoint> {
	let n_points = tps_fps.len();
	let is_corner = |index: usize| {
		let (left, middle, right) = (&tps_fps[index - 1], &tps_fps[index], &tps_fps[index + 1]);
		let fps_second_difference =
			right.false_positives - 2.0 * middle.false_positives + left.false_positives;
		let tps_second_difference =
			right.true_positives - 2.0 * middle.true_positives + left.true_positives;
		fps_second_difference != 0.0 || tps_second_difference != 0.0
	};
	let keep: Vec<bool> = (0..n_points)
		.map(|index| index == 0 || index == n_points - 1 || is_corner(index))
		.collect();
	log::debug!(
		"dropped {} intermediate thresholds",
		keep.iter().filter(|keep| !**keep).count()
	);
	tps_fps
		.into_iter()
		.zip(keep)
		.filter_map(|(point, keep)| if keep { Some(point) } else { None })
		.collect()
}

#[cfg(test)]
fn labels(values: &[i64]) -> Vec<Label> {
	values.iter().map(|value| Label::Int(*value)).collect()
}

#[test]
fn test_roc_curve() {
	let y_true = labels(&[1, 1, 0, 0]);
	let y_score = vec![0.9, 0.4, 0.4, 0.2];
	let output = roc_curve(
		&y_true,
		&y_score,
		RocCurveOptions {
			drop_intermediate: false,
			..Default::default()
		},
	)
	.unwrap();
	assert_eq!(output.false_positive_rates, vec![0.0, 0.0, 0.5, 1.0]);
	assert_eq!(output.true_positive_rates, vec![0.0, 0.5, 1.0, 1.0]);
	assert_eq!(
		output.thresholds,
		vec![std::f32::INFINITY, 0.9, 0.4, 0.2]
	);
}

#[test]
fn test_roc_curve_unsorted_scores() {
	let y_true = labels(&[0, 0, 1, 1]);
	let y_score = vec![0.1, 0.4, 0.35, 0.8];
	let output = roc_curve(&y_true, &y_score, RocCurveOptions::default()).unwrap();
	assert_eq!(output.false_positive_rates, vec![0.0, 0.0, 0.5, 0.5, 1.0]);
	assert_eq!(output.true_positive_rates, vec![0.0, 0.5, 0.5, 1.0, 1.0]);
	assert_eq!(
		output.thresholds,
		vec![std::f32::INFINITY, 0.8, 0.4, 0.35, 0.1]
	);
}

#[test]
fn test_roc_curve_drop_intermediate() {
	let y_true = labels(&[0, 0, 0, 0, 1, 1]);
	let y_score = vec![0.0, 0.2, 0.5, 0.6, 0.7, 1.0];
	let output = roc_curve(&y_true, &y_score, RocCurveOptions::default()).unwrap();
	assert_eq!(output.thresholds, vec![std::f32::INFINITY, 1.0, 0.7, 0.0]);
	assert_eq!(output.false_positive_rates, vec![0.0, 0.0, 0.0, 1.0]);
	assert_eq!(output.true_positive_rates, vec![0.0, 0.5, 1.0, 1.0]);
}

#[test]
fn test_roc_curve_sample_weight() {
	let y_true = labels(&[0, 0, 1, 1]);
	let y_score = vec![0.1, 0.4, 0.35, 0.8];
	let sample_weight = vec![1.0, 0.0, 1.0, 1.0];
	let output = roc_curve(
		&y_true,
		&y_score,
		RocCurveOptions {
			sample_weight: Some(&sample_weight),
			..Default::default()
		},
	)
	.unwrap();
	// The zero weight negative at 0.4 is ignored.
	assert_eq!(output.thresholds, vec![std::f32::INFINITY, 0.8, 0.35, 0.1]);
	assert_eq!(output.false_positive_rates, vec![0.0, 0.0, 0.0, 1.0]);
	assert_eq!(output.true_positive_rates, vec![0.0, 0.5, 1.0, 1.0]);
}

#[test]
fn test_roc_curve_string_labels() {
	let y_true: Vec<Label> = vec!["ham".into(), "spam".into(), "spam".into()];
	let y_score = vec![0.2, 0.9, 0.1];
	let error = roc_curve(&y_true, &y_score, RocCurveOptions::default()).unwrap_err();
	assert!(matches!(error, Error::AmbiguousPosLabel { .. }));
	let pos_label = Label::from("spam");
	let output = roc_curve(
		&y_true,
		&y_score,
		RocCurveOptions {
			pos_label: Some(&pos_label),
			drop_intermediate: false,
			..Default::default()
		},
	)
	.unwrap();
	assert_eq!(output.true_positive_rates, vec![0.0, 0.5, 0.5, 1.0]);
	assert_eq!(output.false_positive_rates, vec![0.0, 0.0, 1.0, 1.0]);
}

#[test]
fn test_roc_curve_no_negatives() {
	let y_true = labels(&[1, 1]);
	let output = roc_curve(&y_true, &[0.3, 0.6], RocCurveOptions::default()).unwrap();
	assert!(output.false_positive_rates.iter().all(|rate| rate.is_nan()));
	assert_eq!(output.true_positive_rates, vec![0.0, 0.5, 1.0]);
}

#[test]
fn test_roc_curve_invalid_inputs() {
	let y_true = labels(&[0, 1, 1]);
	assert_eq!(
		roc_curve(&y_true, &[0.1, 0.2], RocCurveOptions::default()).unwrap_err(),
		Error::InconsistentLength {
			lengths: vec![3, 2]
		}
	);
	assert_eq!(
		roc_curve(&y_true, &[0.1, std::f32::NAN, 0.3], RocCurveOptions::default()).unwrap_err(),
		Error::NotFinite {
			name: "y_score",
			index: 1
		}
	);
	assert_eq!(
		roc_curve(&labels(&[0, 1, 2]), &[0.1, 0.2, 0.3], RocCurveOptions::default())
			.unwrap_err(),
		Error::NotBinary { n_classes: 3 }
	);
	assert_eq!(
		roc_curve(&[], &[], RocCurveOptions::default()).unwrap_err(),
		Error::Empty
	);
}
