use crate::{Classifier, Error};
use ndarray::prelude::*;
use sightline_metrics::{format_labels, Label};
use std::{fmt, str::FromStr};

/// Which method of a [`Classifier`](trait.Classifier.html) produces the scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseMethod {
	/// Try `predict_proba`, then `decision_function`.
	Auto,
	PredictProba,
	DecisionFunction,
}

impl Default for ResponseMethod {
	fn default() -> Self {
		ResponseMethod::Auto
	}
}

impl fmt::Display for ResponseMethod {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			ResponseMethod::Auto => "auto",
			ResponseMethod::PredictProba => "predict_proba",
			ResponseMethod::DecisionFunction => "decision_function",
		};
		write!(f, "{}", s)
	}
}

impl FromStr for ResponseMethod {
	type Err = Error;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"auto" => Ok(ResponseMethod::Auto),
			"predict_proba" => Ok(ResponseMethod::PredictProba),
			"decision_function" => Ok(ResponseMethod::DecisionFunction),
			_ => Err(Error::InvalidResponseMethod(s.to_owned())),
		}
	}
}

impl ResponseMethod {
	fn candidates(self) -> &'static [ResponseMethod] {
		match self {
			ResponseMethod::Auto => &[
				ResponseMethod::PredictProba,
				ResponseMethod::DecisionFunction,
			],
			ResponseMethod::PredictProba => &[ResponseMethod::PredictProba],
			ResponseMethod::DecisionFunction => &[ResponseMethod::DecisionFunction],
		}
	}
}

/**
Compute one score per row of `features` from a fitted binary classifier, oriented so that larger scores favor `pos_label`.

If `pos_label` is `None`, the second class is the positive class. Probabilities are taken from the column of the positive class. Decision function values are negated when the positive class is the first class. The resolved positive label is returned along with the scores.
*/
pub fn get_response_values_binary<E>(
	estimator: &E,
	features: ArrayView2<f32>,
	response_method: ResponseMethod,
	pos_label: Option<&Label>,
) -> Result<(Vec<f32>, Label), Error>
where
	E: Classifier + ?Sized,
{
	let classes = estimator.classes();
	if classes.len() != 2 {
		return Err(Error::NotBinaryClassifier {
			name: estimator.name(),
			n_classes: classes.len(),
		});
	}
	let pos_label = match pos_label {
		Some(pos_label) => {
			if !classes.contains(pos_label) {
				return Err(Error::InvalidPosLabel {
					pos_label: pos_label.clone(),
					classes: format_labels(classes),
				});
			}
			pos_label.clone()
		}
		None => classes[1].clone(),
	};
	let pos_label_index = if pos_label == classes[0] { 0 } else { 1 };
	let n_rows = features.nrows();
	for method in response_method.candidates() {
		match method {
			ResponseMethod::PredictProba => {
				if let Some(probabilities) = estimator.predict_proba(features) {
					let (actual_rows, actual_columns) = probabilities.dim();
					if actual_rows != n_rows || actual_columns != 2 {
						return Err(Error::ProbabilityShape {
							rows: n_rows,
							actual_rows,
							actual_columns,
						});
					}
					log::debug!("using predict_proba of {}", estimator.name());
					let scores = probabilities.column(pos_label_index).to_vec();
					return Ok((scores, pos_label));
				}
			}
			ResponseMethod::DecisionFunction => {
				if let Some(decisions) = estimator.decision_function(features) {
					if decisions.len() != n_rows {
						return Err(Error::DecisionFunctionLength {
							expected: n_rows,
							actual: decisions.len(),
						});
					}
					log::debug!("using decision_function of {}", estimator.name());
					let scores = if pos_label_index == 0 {
						decisions.iter().map(|value| -value).collect()
					} else {
						decisions.to_vec()
					};
					return Ok((scores, pos_label));
				}
			}
			ResponseMethod::Auto => unreachable!(),
		}
	}
	let methods = response_method
		.candidates()
		.iter()
		.map(|method| method.to_string())
		.collect::<Vec<_>>()
		.join(", ");
	Err(Error::ResponseMethodUnavailable {
		name: estimator.name(),
		methods,
	})
}

#[cfg(test)]
struct Fixed {
	classes: Vec<Label>,
	probabilities: Option<Array2<f32>>,
	decisions: Option<Array1<f32>>,
}

#[cfg(test)]
impl Classifier for Fixed {
	fn name(&self) -> String {
		"Fixed".to_owned()
	}
	fn classes(&self) -> &[Label] {
		&self.classes
	}
	fn predict_proba(&self, _features: ArrayView2<f32>) -> Option<Array2<f32>> {
		self.probabilities.clone()
	}
	fn decision_function(&self, _features: ArrayView2<f32>) -> Option<Array1<f32>> {
		self.decisions.clone()
	}
}

#[test]
fn test_response_method_from_str() {
	assert_eq!(
		"predict_proba".parse::<ResponseMethod>(),
		Ok(ResponseMethod::PredictProba)
	);
	assert_eq!(ResponseMethod::DecisionFunction.to_string(), "decision_function");
	insta::assert_snapshot!(
		"invalid input".parse::<ResponseMethod>().unwrap_err(),
		@r###"response_method must be one of "auto", "predict_proba" or "decision_function", got "invalid input""###
	);
}

#[test]
fn test_predict_proba_selects_positive_column() {
	let estimator = Fixed {
		classes: vec![Label::from("cat"), Label::from("dog")],
		probabilities: Some(array![[0.9, 0.1], [0.3, 0.7]]),
		decisions: Some(array![-2.0, 1.0]),
	};
	let features = Array2::<f32>::zeros((2, 3));
	let (scores, pos_label) =
		get_response_values_binary(&estimator, features.view(), ResponseMethod::Auto, None).unwrap();
	assert_eq!(scores, vec![0.1, 0.7]);
	assert_eq!(pos_label, Label::from("dog"));
	let cat = Label::from("cat");
	let (scores, pos_label) = get_response_values_binary(
		&estimator,
		features.view(),
		ResponseMethod::PredictProba,
		Some(&cat),
	)
	.unwrap();
	assert_eq!(scores, vec![0.9, 0.3]);
	assert_eq!(pos_label, cat);
}

#[test]
fn test_decision_function_is_negated_for_first_class() {
	let estimator = Fixed {
		classes: vec![Label::from(0), Label::from(1)],
		probabilities: None,
		decisions: Some(array![-2.0, 1.0]),
	};
	let features = Array2::<f32>::zeros((2, 1));
	let (scores, _) =
		get_response_values_binary(&estimator, features.view(), ResponseMethod::Auto, None).unwrap();
	assert_eq!(scores, vec![-2.0, 1.0]);
	let (scores, pos_label) = get_response_values_binary(
		&estimator,
		features.view(),
		ResponseMethod::DecisionFunction,
		Some(&Label::from(0)),
	)
	.unwrap();
	assert_eq!(scores, vec![2.0, -1.0]);
	assert_eq!(pos_label, Label::from(0));
}

#[test]
fn test_response_errors() {
	let features = Array2::<f32>::zeros((2, 1));
	let estimator = Fixed {
		classes: vec![Label::from(0), Label::from(1)],
		probabilities: None,
		decisions: Some(array![-2.0, 1.0]),
	};
	insta::assert_snapshot!(
		get_response_values_binary(&estimator, features.view(), ResponseMethod::PredictProba, None).unwrap_err(),
		@"Fixed has none of the following methods: predict_proba"
	);
	insta::assert_snapshot!(
		get_response_values_binary(&estimator, features.view(), ResponseMethod::Auto, Some(&Label::from(2))).unwrap_err(),
		@"pos_label=2 is not a valid label: it should be one of {0, 1}"
	);
	let estimator = Fixed {
		classes: vec![Label::from(0), Label::from(1), Label::from(2)],
		probabilities: None,
		decisions: None,
	};
	insta::assert_snapshot!(
		get_response_values_binary(&estimator, features.view(), ResponseMethod::Auto, None).unwrap_err(),
		@"expected a binary classifier, but Fixed was fit on 3 classes"
	);
	let estimator = Fixed {
		classes: vec![Label::from(0), Label::from(1)],
		probabilities: Some(array![[0.2, 0.3, 0.5], [0.1, 0.1, 0.8]]),
		decisions: None,
	};
	insta::assert_snapshot!(
		get_response_values_binary(&estimator, features.view(), ResponseMethod::Auto, None).unwrap_err(),
		@"expected predicted probabilities of shape (2, 2), got (2, 3)"
	);
}
