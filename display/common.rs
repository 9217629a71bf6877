use crate::Error;
use sightline_metrics::Label;
use sightline_plot::{Axes, LegendLocation, LineHandle};

/// Append the positive label to an axis label when it is known.
pub(crate) fn with_pos_label(axis_label: &str, pos_label: Option<&Label>) -> String {
	match pos_label {
		Some(pos_label) => format!("{} (Positive label: {})", axis_label, pos_label),
		None => axis_label.to_owned(),
	}
}

/// Strip the top and right spines if requested, and show a legend in the lower right if any of the `drawn` lines has a label. Lines already on the axes do not count.
pub(crate) fn finish_axes(axes: &mut Axes, despine: bool, drawn: &[LineHandle]) {
	if despine {
		axes.despine();
	}
	let labeled = drawn
		.iter()
		.filter_map(|handle| axes.line(*handle))
		.any(|line| line.label.is_some());
	if labeled {
		axes.legend(LegendLocation::LowerRight);
	}
}

/// Gather the rows of `values` at `indices`, which belong to cross validation fold `fold`.
pub(crate) fn select_rows<T: Clone>(
	values: &[T],
	indices: &[usize],
	fold: usize,
) -> Result<Vec<T>, Error> {
	indices
		.iter()
		.map(|index| {
			values.get(*index).cloned().ok_or(Error::IndexOutOfBounds {
				fold,
				index: *index,
				n_rows: values.len(),
			})
		})
		.collect()
}

#[test]
fn test_with_pos_label() {
	assert_eq!(with_pos_label("True Positive Rate", None), "True Positive Rate");
	assert_eq!(
		with_pos_label("True Positive Rate", Some(&Label::from("spam"))),
		"True Positive Rate (Positive label: spam)"
	);
}

#[test]
fn test_select_rows() {
	assert_eq!(select_rows(&[10, 11, 12], &[2, 0], 0).unwrap(), vec![12, 10]);
	insta::assert_snapshot!(
		select_rows(&[10, 11, 12], &[3], 1).unwrap_err(),
		@"index 3 of fold 1 is out of bounds for 3 rows"
	);
}
