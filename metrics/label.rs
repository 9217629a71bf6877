use std::{collections::BTreeSet, convert::Infallible, fmt, str::FromStr};

/// A class label. Labels of different kinds never compare equal, so `Label::Int(1)` is not `Label::Bool(true)`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Label {
	Bool(bool),
	Int(i64),
	Str(String),
}

impl fmt::Display for Label {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Label::Bool(value) => write!(f, "{}", value),
			Label::Int(value) => write!(f, "{}", value),
			Label::Str(value) => write!(f, "{}", value),
		}
	}
}

/// Parsing a label never fails. Integers are tried first, then booleans, and anything else is kept as a string.
impl FromStr for Label {
	type Err = Infallible;
	fn from_str(value: &str) -> Result<Self, Self::Err> {
		let value = value.trim();
		if let Ok(value) = value.parse::<i64>() {
			return Ok(Label::Int(value));
		}
		match value {
			"true" | "True" => Ok(Label::Bool(true)),
			"false" | "False" => Ok(Label::Bool(false)),
			_ => Ok(Label::Str(value.to_owned())),
		}
	}
}

impl From<i64> for Label {
	fn from(value: i64) -> Self {
		Label::Int(value)
	}
}

impl From<i32> for Label {
	fn from(value: i32) -> Self {
		Label::Int(value.into())
	}
}

impl From<usize> for Label {
	fn from(value: usize) -> Self {
		Label::Int(value as i64)
	}
}

impl From<bool> for Label {
	fn from(value: bool) -> Self {
		Label::Bool(value)
	}
}

impl From<&str> for Label {
	fn from(value: &str) -> Self {
		Label::Str(value.to_owned())
	}
}

impl From<String> for Label {
	fn from(value: String) -> Self {
		Label::Str(value)
	}
}

/// Return the distinct labels in `labels` in sorted order.
pub fn unique_labels(labels: &[Label]) -> Vec<Label> {
	labels
		.iter()
		.cloned()
		.collect::<BTreeSet<_>>()
		.into_iter()
		.collect()
}

/// Format labels as a comma separated list, as used in error messages.
pub fn format_labels(labels: &[Label]) -> String {
	itertools::join(labels.iter(), ", ")
}

#[test]
fn test_parse_label() {
	assert_eq!("1".parse::<Label>().unwrap(), Label::Int(1));
	assert_eq!(" -1 ".parse::<Label>().unwrap(), Label::Int(-1));
	assert_eq!("True".parse::<Label>().unwrap(), Label::Bool(true));
	assert_eq!("spam".parse::<Label>().unwrap(), Label::Str("spam".to_owned()));
}

#[test]
fn test_unique_labels() {
	let labels: Vec<Label> = vec![1.into(), 0.into(), 1.into(), 0.into()];
	assert_eq!(unique_labels(&labels), vec![Label::Int(0), Label::Int(1)]);
	assert_eq!(format_labels(&unique_labels(&labels)), "0, 1");
}
