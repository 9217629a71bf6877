use crate::{check_consistent_length, Error};

/**
This function computes the area under a curve using the trapezoidal rule. `x` must be monotonic. If it is decreasing, the area is computed from right to left so that it is still positive for a positive `y`.
*/
pub fn auc(x: &[f32], y: &[f32]) -> Result<f32, Error> {
	check_consistent_length(&[x.len(), y.len()])?;
	if x.len() < 2 {
		return Err(Error::TooFewPoints(x.len()));
	}
	let dx: Vec<f32> = x.windows(2).map(|pair| pair[1] - pair[0]).collect();
	let direction = if dx.iter().any(|dx| *dx < 0.0) {
		if dx.iter().all(|dx| *dx <= 0.0) {
			-1.0
		} else {
			return Err(Error::NotMonotonic);
		}
	} else {
		1.0
	};
	// Compute the riemann sum with the average height of each trapezoid.
	let area: f32 = dx
		.iter()
		.zip(y.windows(2))
		.map(|(dx, pair)| dx * (pair[0] + pair[1]) / 2.0)
		.sum();
	Ok(direction * area)
}

#[test]
fn test_auc() {
	let auc_value = auc(&[0.0, 0.0, 0.5, 0.5, 1.0], &[0.0, 0.5, 0.5, 1.0, 1.0]).unwrap();
	assert!((auc_value - 0.75).abs() < std::f32::EPSILON);
	let auc_value = auc(&[1.0, 0.5, 0.0], &[1.0, 1.0, 0.0]).unwrap();
	assert!((auc_value - 0.75).abs() < std::f32::EPSILON);
}

#[test]
fn test_auc_errors() {
	assert_eq!(auc(&[0.0], &[1.0]).unwrap_err(), Error::TooFewPoints(1));
	assert_eq!(
		auc(&[0.0, 1.0, 0.5], &[0.0, 1.0, 1.0]).unwrap_err(),
		Error::NotMonotonic
	);
	insta::assert_snapshot!(
		auc(&[0.0, 1.0], &[0.0]).unwrap_err().to_string(),
		@"found input variables with inconsistent numbers of samples: [2, 1]"
	);
}

#[test]
fn test_auc_of_roc_curve() {
	use crate::{roc_curve, Label, RocCurveOptions};
	let y_true: Vec<Label> = vec![2.into(), 2.into(), 1.into(), 1.into()];
	let pos_label = Label::Int(2);
	let output = roc_curve(
		&y_true,
		&[0.9, 0.4, 0.4, 0.2],
		RocCurveOptions {
			pos_label: Some(&pos_label),
			..Default::default()
		},
	)
	.unwrap();
	let auc_value = auc(&output.false_positive_rates, &output.true_positive_rates).unwrap();
	assert!((auc_value - 0.875).abs() < std::f32::EPSILON);
}
