//! This module contains the main entrypoint to the sightline cli.

use self::input::{Columns, Predictions, StyleConfig};
use anyhow::{bail, Result};
use clap::{Args, Parser};
use colored::Colorize;
use sightline_display::{
	CapCurveDisplay, CapFromPredictionsOptions, CapPlotOptions, RocCurveDisplay, RocCurves,
	RocFromPredictionsOptions, RocPlotOptions,
};
use sightline_metrics::{auc, check_pos_label_consistency, roc_curve, Label, RocCurveOptions};
use sightline_plot::Figure;
use std::path::{Path, PathBuf};

mod input;

#[derive(Parser)]
#[clap(
	name = "sightline",
	about = "Plot ROC curves and cumulative accuracy profiles of binary classifiers.",
	disable_help_subcommand = true
)]
enum Options {
	#[clap(
		name = "roc",
		about = "plot a ROC curve",
		long_about = "plot the receiver operating characteristic curve of the scores in a csv file"
	)]
	Roc(RocOptions),
	#[clap(
		name = "cap",
		about = "plot a cumulative accuracy profile",
		long_about = "plot the cumulative accuracy profile of the scores in a csv file"
	)]
	Cap(CapOptions),
}

#[derive(Args, Debug)]
struct RocOptions {
	#[clap(flatten)]
	common: CommonOptions,
	#[clap(long, help = "the column with the cross validation fold of each row, to plot one curve per fold")]
	fold_column: Option<String>,
	#[clap(long, help = "keep thresholds that do not change the shape of the curve")]
	keep_intermediate: bool,
}

#[derive(Args, Debug)]
struct CapOptions {
	#[clap(flatten)]
	common: CommonOptions,
	#[clap(long, help = "scale both axes to fractions of the totals")]
	normalize: bool,
}

#[derive(Args, Debug)]
struct CommonOptions {
	#[clap(help = "the path to your .csv file")]
	file: PathBuf,
	#[clap(long, default_value = "label", help = "the column with the true labels")]
	label_column: String,
	#[clap(long, default_value = "score", help = "the column with the predicted scores")]
	score_column: String,
	#[clap(long, help = "the column with the sample weights")]
	weight_column: Option<String>,
	#[clap(long, help = "the name of the classifier, shown in the legend")]
	name: Option<String>,
	#[clap(long, help = "the positive class, required unless the labels are {0, 1} or {-1, 1}")]
	pos_label: Option<String>,
	#[clap(long, help = "draw the chance level line")]
	chance_level: bool,
	#[clap(long, help = "remove the top and right spines")]
	despine: bool,
	#[clap(short, long, help = "the path to a .json file with line styles")]
	style: Option<PathBuf>,
	#[clap(long, default_value = "640")]
	width: u32,
	#[clap(long, default_value = "480")]
	height: u32,
	#[clap(short, long, help = "the path to write the .svg file to")]
	output: Option<PathBuf>,
}

impl CommonOptions {
	fn pos_label(&self) -> Option<Label> {
		self.pos_label
			.as_deref()
			.map(|pos_label| pos_label.parse().unwrap_or_else(|never| match never {}))
	}

	fn style(&self) -> Result<StyleConfig> {
		match &self.style {
			Some(path) => StyleConfig::from_path(path),
			None => Ok(StyleConfig::default()),
		}
	}

	fn output_path(&self, suffix: &str) -> Result<PathBuf> {
		match &self.output {
			Some(output) => Ok(output.clone()),
			None => {
				let file_stem = match self.file.file_stem().and_then(|stem| stem.to_str()) {
					Some(file_stem) => file_stem,
					None => bail!("could not determine an output path, pass one with --output"),
				};
				Ok(std::env::current_dir()?.join(format!("{}_{}.svg", file_stem, suffix)))
			}
		}
	}
}

fn main() {
	let env = env_logger::Env::default().default_filter_or("sightline=info");
	env_logger::Builder::from_env(env)
		.format_level(false)
		.format_module_path(false)
		.format_timestamp(None)
		.init();
	let options = Options::parse();
	let result = match options {
		Options::Roc(options) => cli_roc(options),
		Options::Cap(options) => cli_cap(options),
	};
	if let Err(error) = result {
		eprintln!("{}: {}", "error".red().bold(), error);
		std::process::exit(1);
	}
}

fn cli_roc(options: RocOptions) -> Result<()> {
	let common = &options.common;
	let predictions = Predictions::from_path(
		&common.file,
		&Columns {
			label: &common.label_column,
			score: &common.score_column,
			weight: common.weight_column.as_deref(),
			fold: options.fold_column.as_deref(),
		},
	)?;
	let style = common.style()?;
	let pos_label = common.pos_label();
	let figure = Figure::new(common.width, common.height);
	let plot_options = RocPlotOptions {
		name: None,
		fold_names: None,
		line_style: style.line,
		fold_line_style: style.fold_line,
		plot_chance_level: common.chance_level,
		chance_level_style: style.chance_level,
		despine: common.despine,
	};
	let display = if predictions.folds.is_some() {
		fold_roc_display(
			&predictions,
			pos_label.as_ref(),
			common.name.as_deref(),
			!options.keep_intermediate,
		)?
		.plot(Some(figure), plot_options)?
	} else {
		RocCurveDisplay::from_predictions(
			&predictions.labels,
			&predictions.scores,
			RocFromPredictionsOptions {
				sample_weight: predictions.weights.as_deref(),
				drop_intermediate: !options.keep_intermediate,
				pos_label: pos_label.as_ref(),
				name: common.name.clone(),
				figure: Some(figure),
				plot: plot_options,
			},
		)?
	};
	match display.roc_auc() {
		Some(roc_auc) => log::info!("roc auc: {:.4}", roc_auc),
		None => {
			if let RocCurves::Multi {
				roc_auc: Some(roc_auc),
				..
			} = display.curves()
			{
				for (fold, roc_auc) in roc_auc.iter().enumerate() {
					log::info!("fold {} roc auc: {:.4}", fold, roc_auc);
				}
			}
		}
	}
	write_figure(display.figure(), &common.output_path("roc")?)
}

/// Compute one ROC curve per fold of `predictions`, named `"{name} fold {fold}"`. All folds share one positive label.
fn fold_roc_display(
	predictions: &Predictions,
	pos_label: Option<&Label>,
	name: Option<&str>,
	drop_intermediate: bool,
) -> Result<RocCurveDisplay> {
	let folds = predictions.split_folds();
	let pos_label = check_pos_label_consistency(pos_label, &predictions.labels)?;
	let mut fpr = Vec::with_capacity(folds.len());
	let mut tpr = Vec::with_capacity(folds.len());
	let mut roc_auc = Vec::with_capacity(folds.len());
	let mut names = Vec::with_capacity(folds.len());
	for (fold, rows) in folds {
		let labels: Vec<Label> = rows.iter().map(|row| predictions.labels[*row].clone()).collect();
		let scores: Vec<f32> = rows.iter().map(|row| predictions.scores[*row]).collect();
		let weights: Option<Vec<f32>> = predictions
			.weights
			.as_ref()
			.map(|weights| rows.iter().map(|row| weights[*row]).collect());
		let curve = roc_curve(
			&labels,
			&scores,
			RocCurveOptions {
				pos_label: Some(&pos_label),
				sample_weight: weights.as_deref(),
				drop_intermediate,
			},
		)?;
		roc_auc.push(auc(&curve.false_positive_rates, &curve.true_positive_rates)?);
		fpr.push(curve.false_positive_rates);
		tpr.push(curve.true_positive_rates);
		names.push(format!("{} fold {}", name.unwrap_or("ROC"), fold));
	}
	let display = RocCurveDisplay::new(
		RocCurves::Multi {
			fpr,
			tpr,
			roc_auc: Some(roc_auc),
			name: Some(names),
		},
		Some(pos_label),
	)?;
	Ok(display)
}

fn cli_cap(options: CapOptions) -> Result<()> {
	let common = &options.common;
	let predictions = Predictions::from_path(
		&common.file,
		&Columns {
			label: &common.label_column,
			score: &common.score_column,
			weight: common.weight_column.as_deref(),
			fold: None,
		},
	)?;
	let style = common.style()?;
	if style.fold_line.is_some() {
		log::warn!("fold_line styles are ignored by the cap command");
	}
	let pos_label = common.pos_label();
	let display = CapCurveDisplay::from_predictions(
		&predictions.labels,
		&predictions.scores,
		CapFromPredictionsOptions {
			sample_weight: predictions.weights.as_deref(),
			pos_label: pos_label.as_ref(),
			normalize_scale: options.normalize,
			name: common.name.clone(),
			figure: Some(Figure::new(common.width, common.height)),
			plot: CapPlotOptions {
				name: None,
				line_style: style.line,
				plot_chance_level: common.chance_level,
				chance_level_style: style.chance_level,
				despine: common.despine,
			},
		},
	)?;
	write_figure(display.figure(), &common.output_path("cap")?)
}

fn write_figure(figure: Option<&Figure>, path: &Path) -> Result<()> {
	let figure = match figure {
		Some(figure) => figure,
		None => bail!("nothing was plotted"),
	};
	figure.save(path)?;
	eprintln!("Your plot was written to {}.", path.display());
	Ok(())
}

#[cfg(test)]
const FOLDS_CSV: &str = "label,score,fold\n1,0.9,a\n0,0.2,a\n1,0.7,b\n0,0.8,b\n1,0.6,a\n0,0.1,b\n";

#[cfg(test)]
fn common_options(file: PathBuf, output: PathBuf) -> CommonOptions {
	CommonOptions {
		file,
		label_column: "label".to_owned(),
		score_column: "score".to_owned(),
		weight_column: None,
		name: Some("model".to_owned()),
		pos_label: None,
		chance_level: true,
		despine: false,
		style: None,
		width: 640,
		height: 480,
		output: Some(output),
	}
}

#[cfg(test)]
fn temp_path(test: &str, extension: &str) -> PathBuf {
	std::env::temp_dir().join(format!(
		"sightline_cli_{}_{}.{}",
		test,
		std::process::id(),
		extension
	))
}

#[test]
fn test_fold_roc_display() {
	let predictions = Predictions::from_csv(
		&mut csv::Reader::from_reader(FOLDS_CSV.as_bytes()),
		&Columns {
			label: "label",
			score: "score",
			weight: None,
			fold: Some("fold"),
		},
	)
	.unwrap();
	let style: StyleConfig =
		serde_json::from_str(r#"{ "fold_line": [{ "c": "tab:orange" }, { "ls": ":" }] }"#).unwrap();
	let display = fold_roc_display(&predictions, None, Some("model"), true)
		.unwrap()
		.plot(
			None,
			RocPlotOptions {
				fold_line_style: style.fold_line,
				..Default::default()
			},
		)
		.unwrap();
	assert_eq!(display.pos_label(), Some(&Label::from(1)));
	assert_eq!(display.roc_auc(), None);
	let lines = display.lines();
	assert_eq!(lines.len(), 2);
	assert_eq!(lines[0].label.as_deref(), Some("model fold a (AUC = 1.00)"));
	assert_eq!(lines[0].color, sightline_plot::Color::CYCLE[1]);
	assert_eq!(lines[1].label.as_deref(), Some("model fold b (AUC = 0.50)"));
	assert_eq!(lines[1].linestyle, sightline_plot::DashStyle::Dotted);
	let display = fold_roc_display(&predictions, None, None, true).unwrap();
	match display.curves() {
		RocCurves::Multi { name, .. } => assert_eq!(
			name.as_deref(),
			Some(&["ROC fold a".to_owned(), "ROC fold b".to_owned()][..])
		),
		_ => panic!("expected one curve per fold"),
	}
}

#[test]
fn test_cli_roc_with_folds() {
	let input = temp_path("roc_with_folds", "csv");
	let output = temp_path("roc_with_folds", "svg");
	std::fs::write(&input, FOLDS_CSV).unwrap();
	cli_roc(RocOptions {
		common: common_options(input.clone(), output.clone()),
		fold_column: Some("fold".to_owned()),
		keep_intermediate: false,
	})
	.unwrap();
	let svg = std::fs::read_to_string(&output).unwrap();
	std::fs::remove_file(&input).unwrap();
	std::fs::remove_file(&output).unwrap();
	assert!(svg.contains("model fold a (AUC = 1.00)"));
	assert!(svg.contains("Chance level (AUC = 0.5)"));
}

#[test]
fn test_cli_cap() {
	let input = temp_path("cap", "csv");
	let output = temp_path("cap", "svg");
	std::fs::write(&input, FOLDS_CSV).unwrap();
	cli_cap(CapOptions {
		common: common_options(input.clone(), output.clone()),
		normalize: true,
	})
	.unwrap();
	let svg = std::fs::read_to_string(&output).unwrap();
	std::fs::remove_file(&output).unwrap();
	assert!(svg.contains("Fraction of samples (Positive label: 1)"));
	let png = temp_path("cap", "png");
	let error = cli_cap(CapOptions {
		common: common_options(input.clone(), png.clone()),
		normalize: false,
	})
	.unwrap_err();
	std::fs::remove_file(&input).unwrap();
	insta::assert_snapshot!(error, @r###"unsupported output format "png", expected "svg""###);
	assert!(!png.exists());
}

#[test]
fn test_write_figure_without_plot() {
	let error = write_figure(None, &temp_path("nothing", "svg")).unwrap_err();
	insta::assert_snapshot!(error, @"nothing was plotted");
}
