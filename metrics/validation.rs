use crate::{format_labels, unique_labels, Error, Label};

/// Check that all inputs have the same number of samples.
pub fn check_consistent_length(lengths: &[usize]) -> Result<(), Error> {
	match lengths.split_first() {
		Some((first, rest)) if rest.iter().any(|length| length != first) => {
			Err(Error::InconsistentLength {
				lengths: lengths.to_vec(),
			})
		}
		_ => Ok(()),
	}
}

/**
Resolve the positive label. If `pos_label` is given it is returned as is. Otherwise the labels in `y_true` must be one of `{0, 1}`, `{-1, 1}`, `{0}`, `{-1}`, `{1}` (or `{false, true}` and its subsets), in which case the positive label is `1` (or `true`).
*/
pub fn check_pos_label_consistency(
	pos_label: Option<&Label>,
	y_true: &[Label],
) -> Result<Label, Error> {
	if let Some(pos_label) = pos_label {
		return Ok(pos_label.clone());
	}
	let classes = unique_labels(y_true);
	let is_numeric_binary = classes.iter().all(|class| matches!(class, Label::Int(-1..=1)))
		&& !(classes.contains(&Label::Int(-1)) && classes.contains(&Label::Int(0)));
	let is_bool_binary = classes.iter().all(|class| matches!(class, Label::Bool(_)));
	if is_numeric_binary && !classes.is_empty() {
		Ok(Label::Int(1))
	} else if is_bool_binary && !classes.is_empty() {
		Ok(Label::Bool(true))
	} else {
		Err(Error::AmbiguousPosLabel {
			classes: format_labels(&classes),
		})
	}
}

#[test]
fn test_check_consistent_length() {
	assert!(check_consistent_length(&[4, 4, 4]).is_ok());
	assert!(check_consistent_length(&[]).is_ok());
	let error = check_consistent_length(&[4, 3]).unwrap_err();
	insta::assert_snapshot!(error.to_string(), @"found input variables with inconsistent numbers of samples: [4, 3]");
}

#[test]
fn test_check_pos_label_consistency() {
	let y: Vec<Label> = vec![0.into(), 1.into(), 1.into()];
	assert_eq!(check_pos_label_consistency(None, &y).unwrap(), Label::Int(1));
	let y: Vec<Label> = vec![(-1).into(), 1.into()];
	assert_eq!(check_pos_label_consistency(None, &y).unwrap(), Label::Int(1));
	let y: Vec<Label> = vec![true.into(), false.into()];
	assert_eq!(check_pos_label_consistency(None, &y).unwrap(), Label::Bool(true));
	let y: Vec<Label> = vec!["ham".into(), "spam".into()];
	let error = check_pos_label_consistency(None, &y).unwrap_err();
	insta::assert_snapshot!(error.to_string(), @"y_true takes value in {ham, spam} and pos_label is not specified: either make y_true take value in {0, 1} or {-1, 1} or pass pos_label explicitly");
	let pos_label = Label::from("spam");
	assert_eq!(
		check_pos_label_consistency(Some(&pos_label), &y).unwrap(),
		pos_label
	);
}
