use ndarray::prelude::*;
use sightline_metrics::Label;

/**
A fitted classifier. Implementors provide `predict_proba`, `decision_function`, or both. The default implementations return `None`, which means the method is not available on this estimator.
*/
pub trait Classifier {
	/// The name used to label the estimator's curve in a plot.
	fn name(&self) -> String;
	/// The classes the estimator was fit on, in the order of the columns of `predict_proba`.
	fn classes(&self) -> &[Label];
	/// Predicted probabilities with shape `(n_rows, n_classes)`.
	fn predict_proba(&self, _features: ArrayView2<f32>) -> Option<Array2<f32>> {
		None
	}
	/// Confidence scores with shape `(n_rows,)`. Larger values favor `classes()[1]`.
	fn decision_function(&self, _features: ArrayView2<f32>) -> Option<Array1<f32>> {
		None
	}
}

impl<'a, T> Classifier for &'a T
where
	T: Classifier + ?Sized,
{
	fn name(&self) -> String {
		(**self).name()
	}
	fn classes(&self) -> &[Label] {
		(**self).classes()
	}
	fn predict_proba(&self, features: ArrayView2<f32>) -> Option<Array2<f32>> {
		(**self).predict_proba(features)
	}
	fn decision_function(&self, features: ArrayView2<f32>) -> Option<Array1<f32>> {
		(**self).decision_function(features)
	}
}

impl<T> Classifier for Box<T>
where
	T: Classifier + ?Sized,
{
	fn name(&self) -> String {
		(**self).name()
	}
	fn classes(&self) -> &[Label] {
		(**self).classes()
	}
	fn predict_proba(&self, features: ArrayView2<f32>) -> Option<Array2<f32>> {
		(**self).predict_proba(features)
	}
	fn decision_function(&self, features: ArrayView2<f32>) -> Option<Array1<f32>> {
		(**self).decision_function(features)
	}
}
