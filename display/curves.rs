use crate::Error;
use sightline_plot::LineStyle;

/// The values of a ROC curve display, either one curve or one curve per cross validation fold.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RocCurves {
	Single {
		fpr: Vec<f32>,
		tpr: Vec<f32>,
		roc_auc: Option<f32>,
		name: Option<String>,
	},
	Multi {
		fpr: Vec<Vec<f32>>,
		tpr: Vec<Vec<f32>>,
		roc_auc: Option<Vec<f32>>,
		name: Option<Vec<String>>,
	},
}

/// False or true positive rates as given by a caller: one sequence, or one sequence per curve.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub enum Rates {
	One(Vec<f32>),
	Many(Vec<Vec<f32>>),
}

impl RocCurves {
	/// Pair up rates given separately. Both must be a single sequence or both must be lists of sequences.
	pub fn from_rates(fpr: Rates, tpr: Rates) -> Result<RocCurves, Error> {
		match (fpr, tpr) {
			(Rates::One(fpr), Rates::One(tpr)) => Ok(RocCurves::Single {
				fpr,
				tpr,
				roc_auc: None,
				name: None,
			}),
			(Rates::Many(fpr), Rates::Many(tpr)) => Ok(RocCurves::Multi {
				fpr,
				tpr,
				roc_auc: None,
				name: None,
			}),
			_ => Err(Error::MixedCurveShapes),
		}
	}

	pub fn n_curves(&self) -> usize {
		match self {
			RocCurves::Single { .. } => 1,
			RocCurves::Multi { fpr, .. } => fpr.len(),
		}
	}

	pub(crate) fn validate(&self) -> Result<(), Error> {
		match self {
			RocCurves::Single { fpr, tpr, .. } => check_rate_lengths(0, fpr, tpr),
			RocCurves::Multi {
				fpr,
				tpr,
				roc_auc,
				name,
			} => {
				let expected = fpr.len();
				let lengths = [
					("tpr", Some(tpr.len())),
					("roc_auc", roc_auc.as_ref().map(|roc_auc| roc_auc.len())),
					("name", name.as_ref().map(|name| name.len())),
				];
				for (attribute, actual) in lengths.iter() {
					if let Some(actual) = *actual {
						if actual != expected {
							return Err(Error::MultiCurveLengthMismatch {
								attribute: *attribute,
								expected,
								actual,
							});
						}
					}
				}
				for (index, (fpr, tpr)) in fpr.iter().zip(tpr.iter()).enumerate() {
					check_rate_lengths(index, fpr, tpr)?;
				}
				Ok(())
			}
		}
	}
}

fn check_rate_lengths(index: usize, fpr: &[f32], tpr: &[f32]) -> Result<(), Error> {
	if fpr.len() != tpr.len() {
		return Err(Error::RateLengthMismatch {
			index,
			fpr: fpr.len(),
			tpr: tpr.len(),
		});
	}
	Ok(())
}

/// The style of the fold curves: one style shared by every fold, or one style per fold.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub enum FoldStyle {
	Shared(LineStyle),
	PerFold(Vec<LineStyle>),
}

impl FoldStyle {
	pub(crate) fn validate(&self, n_folds: usize) -> Result<(), Error> {
		match self {
			FoldStyle::PerFold(styles) if styles.len() != n_folds => Err(Error::FoldStyleLength {
				expected: n_folds,
				actual: styles.len(),
			}),
			_ => Ok(()),
		}
	}

	pub(crate) fn get(&self, fold: usize) -> &LineStyle {
		match self {
			FoldStyle::Shared(style) => style,
			FoldStyle::PerFold(styles) => &styles[fold],
		}
	}
}

#[test]
fn test_from_rates() {
	let curves = RocCurves::from_rates(
		Rates::Many(vec![vec![0.0, 1.0], vec![0.0, 0.5, 1.0]]),
		Rates::Many(vec![vec![0.0, 1.0], vec![0.0, 1.0, 1.0]]),
	)
	.unwrap();
	assert_eq!(curves.n_curves(), 2);
	assert!(curves.validate().is_ok());
	let error = RocCurves::from_rates(
		Rates::One(vec![0.0, 1.0]),
		Rates::Many(vec![vec![0.0, 1.0]]),
	)
	.unwrap_err();
	insta::assert_snapshot!(error, @"when plotting multiple ROC curves, fpr and tpr should both be lists");
}

#[test]
fn test_rates_deserialize() {
	let fpr: Rates = serde_json::from_str("[0.0, 0.5, 1.0]").unwrap();
	assert_eq!(fpr, Rates::One(vec![0.0, 0.5, 1.0]));
	let fpr: Rates = serde_json::from_str("[[0.0, 1.0], [0.0, 1.0]]").unwrap();
	assert_eq!(fpr, Rates::Many(vec![vec![0.0, 1.0], vec![0.0, 1.0]]));
}

#[test]
fn test_validate_multi_lengths() {
	let curves = RocCurves::Multi {
		fpr: vec![vec![0.0, 1.0], vec![0.0, 1.0]],
		tpr: vec![vec![0.0, 1.0], vec![0.0, 1.0]],
		roc_auc: Some(vec![0.5]),
		name: None,
	};
	insta::assert_snapshot!(
		curves.validate().unwrap_err(),
		@"when plotting multiple ROC curves, fpr, tpr, and if provided, roc_auc and name should all have the same length: fpr has 2 entries but roc_auc has 1"
	);
	let curves = RocCurves::Multi {
		fpr: vec![vec![0.0, 1.0], vec![0.0, 0.5, 1.0]],
		tpr: vec![vec![0.0, 1.0], vec![0.0, 1.0]],
		roc_auc: None,
		name: None,
	};
	insta::assert_snapshot!(
		curves.validate().unwrap_err(),
		@"fpr and tpr of curve 1 have different lengths: 3 and 2"
	);
}

#[test]
fn test_fold_style_validate() {
	let style = FoldStyle::PerFold(vec![LineStyle::new(), LineStyle::new()]);
	assert!(style.validate(2).is_ok());
	insta::assert_snapshot!(
		style.validate(3).unwrap_err(),
		@"when fold_line_style is a list, it must have the same length as the number of ROC curves to be plotted: expected 3, got 2"
	);
	assert!(FoldStyle::Shared(LineStyle::new()).validate(5).is_ok());
}
