use anyhow::{format_err, Context, Result};
use sightline_display::FoldStyle;
use sightline_metrics::Label;
use sightline_plot::LineStyle;
use std::path::Path;

/// The column names to read from the input csv.
#[derive(Debug)]
pub struct Columns<'a> {
	pub label: &'a str,
	pub score: &'a str,
	pub weight: Option<&'a str>,
	pub fold: Option<&'a str>,
}

/// The rows of the input csv, one entry per row in each vector.
#[derive(Debug, PartialEq)]
pub struct Predictions {
	pub labels: Vec<Label>,
	pub scores: Vec<f32>,
	pub weights: Option<Vec<f32>>,
	pub folds: Option<Vec<String>>,
}

impl Predictions {
	pub fn from_path(path: &Path, columns: &Columns) -> Result<Predictions> {
		let mut reader = csv::Reader::from_path(path)
			.with_context(|| format!("failed to open {}", path.display()))?;
		Predictions::from_csv(&mut reader, columns)
	}

	pub fn from_csv<R>(reader: &mut csv::Reader<R>, columns: &Columns) -> Result<Predictions>
	where
		R: std::io::Read,
	{
		let column_names: Vec<String> = reader
			.headers()?
			.into_iter()
			.map(|column_name| column_name.to_owned())
			.collect();
		let find_column = |name: &str| {
			column_names
				.iter()
				.position(|column_name| column_name == name)
				.ok_or_else(|| {
					format_err!(
						"column {:?} not found, the columns are {:?}",
						name,
						column_names
					)
				})
		};
		let label_index = find_column(columns.label)?;
		let score_index = find_column(columns.score)?;
		let weight_index = columns.weight.map(find_column).transpose()?;
		let fold_index = columns.fold.map(find_column).transpose()?;
		let mut predictions = Predictions {
			labels: Vec::new(),
			scores: Vec::new(),
			weights: weight_index.map(|_| Vec::new()),
			folds: fold_index.map(|_| Vec::new()),
		};
		let mut record = csv::StringRecord::new();
		let mut row = 0;
		while reader.read_record(&mut record)? {
			row += 1;
			let field = |index: usize| record.get(index).unwrap_or("");
			// The from_str implementation for Label never fails.
			let label: Label = field(label_index).parse().unwrap_or_else(|never| match never {});
			predictions.labels.push(label);
			predictions
				.scores
				.push(parse_number(field(score_index), columns.score, row)?);
			if let (Some(weights), Some(weight_index)) =
				(predictions.weights.as_mut(), weight_index)
			{
				let weight_column = columns.weight.unwrap_or_default();
				weights.push(parse_number(field(weight_index), weight_column, row)?);
			}
			if let (Some(folds), Some(fold_index)) = (predictions.folds.as_mut(), fold_index) {
				folds.push(field(fold_index).to_owned());
			}
		}
		log::info!("read {} rows", row);
		Ok(predictions)
	}

	/// Split the rows by the value of the fold column, in order of first appearance.
	pub fn split_folds(&self) -> Vec<(String, Vec<usize>)> {
		let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
		if let Some(folds) = &self.folds {
			for (row, fold) in folds.iter().enumerate() {
				match groups.iter_mut().find(|(name, _)| name == fold) {
					Some((_, rows)) => rows.push(row),
					None => groups.push((fold.clone(), vec![row])),
				}
			}
		}
		groups
	}
}

fn parse_number(value: &str, column: &str, row: usize) -> Result<f32> {
	value.trim().parse().map_err(|_| {
		format_err!(
			"invalid value {:?} in column {:?} at row {}",
			value,
			column,
			row
		)
	})
}

/// The line styles read from a json style file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
	pub line: Option<LineStyle>,
	pub chance_level: Option<LineStyle>,
	pub fold_line: Option<FoldStyle>,
}

impl StyleConfig {
	pub fn from_path(path: &Path) -> Result<StyleConfig> {
		let config = std::fs::read_to_string(path)
			.with_context(|| format!("failed to read {}", path.display()))?;
		let config = serde_json::from_str(&config)
			.with_context(|| format!("failed to parse {}", path.display()))?;
		Ok(config)
	}
}

#[cfg(test)]
fn read(csv: &str, columns: &Columns) -> Result<Predictions> {
	Predictions::from_csv(&mut csv::Reader::from_reader(csv.as_bytes()), columns)
}

#[cfg(test)]
const COLUMNS: Columns = Columns {
	label: "label",
	score: "score",
	weight: None,
	fold: None,
};

#[test]
fn test_read_predictions() {
	let csv = "score,label,weight,fold\n0.1,spam,1,a\n0.8,ham,2,b\n0.4,spam,0.5,a\n";
	let predictions = read(
		csv,
		&Columns {
			weight: Some("weight"),
			fold: Some("fold"),
			..COLUMNS
		},
	)
	.unwrap();
	assert_eq!(
		predictions.labels,
		vec![Label::from("spam"), Label::from("ham"), Label::from("spam")]
	);
	assert_eq!(predictions.scores, vec![0.1, 0.8, 0.4]);
	assert_eq!(predictions.weights, Some(vec![1.0, 2.0, 0.5]));
	assert_eq!(
		predictions.split_folds(),
		vec![("a".to_owned(), vec![0, 2]), ("b".to_owned(), vec![1])]
	);
	let predictions = read(csv, &COLUMNS).unwrap();
	assert_eq!(predictions.weights, None);
	assert!(predictions.split_folds().is_empty());
}

#[test]
fn test_read_predictions_errors() {
	insta::assert_snapshot!(
		read("label,value\n1,0.5\n", &COLUMNS).unwrap_err(),
		@r###"column "score" not found, the columns are ["label", "value"]"###
	);
	insta::assert_snapshot!(
		read("label,score\n1,0.5\n0,high\n", &COLUMNS).unwrap_err(),
		@r###"invalid value "high" in column "score" at row 2"###
	);
}

#[test]
fn test_style_config() {
	let config: StyleConfig = serde_json::from_str(
		r#"{ "line": { "c": "tab:orange", "lw": 2 }, "fold_line": [{ "alpha": 0.3 }, { "ls": ":" }] }"#,
	)
	.unwrap();
	assert_eq!(config.line.unwrap().linewidth, Some(2.0));
	assert!(config.chance_level.is_none());
	match config.fold_line {
		Some(FoldStyle::PerFold(styles)) => assert_eq!(styles.len(), 2),
		_ => panic!("expected one style per fold"),
	}
}
