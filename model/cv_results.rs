/// The train and test row indices of every fold.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CvIndices {
	pub train: Vec<Vec<usize>>,
	pub test: Vec<Vec<usize>>,
}

impl CvIndices {
	pub fn n_folds(&self) -> usize {
		self.test.len()
	}
}

/**
The output of a cross validation run. `estimator` is present when the run kept the fitted estimator of each fold, and `indices` is present when it kept the train and test indices of each fold. Displays built from cross validation results need both.
*/
#[derive(Clone, Debug)]
pub struct CvResults<E> {
	pub estimator: Option<Vec<E>>,
	pub indices: Option<CvIndices>,
}

impl<E> Default for CvResults<E> {
	fn default() -> Self {
		Self {
			estimator: None,
			indices: None,
		}
	}
}

impl<E> CvResults<E> {
	pub fn new(estimator: Vec<E>, indices: CvIndices) -> Self {
		Self {
			estimator: Some(estimator),
			indices: Some(indices),
		}
	}

	/// The names of the keys a display needs that these results lack.
	pub fn missing_keys(&self) -> Vec<&'static str> {
		let mut missing = Vec::new();
		if self.estimator.is_none() {
			missing.push("estimator");
		}
		if self.indices.is_none() {
			missing.push("indices");
		}
		missing
	}
}

#[test]
fn test_missing_keys() {
	let results: CvResults<()> = CvResults::default();
	assert_eq!(results.missing_keys(), vec!["estimator", "indices"]);
	let results = CvResults {
		estimator: Some(vec![(), ()]),
		indices: None,
	};
	assert_eq!(results.missing_keys(), vec!["indices"]);
	let results = CvResults::new(
		vec![(), ()],
		CvIndices {
			train: vec![vec![2, 3], vec![0, 1]],
			test: vec![vec![0, 1], vec![2, 3]],
		},
	);
	assert!(results.missing_keys().is_empty());
	assert_eq!(results.indices.unwrap().n_folds(), 2);
}
