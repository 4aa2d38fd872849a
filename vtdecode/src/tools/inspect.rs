use anyhow::{Result, anyhow};
use clap::Args;
use log::info;
use std::{fmt::Write, path::PathBuf};
use vtdecode::{
	geometry::{
		GeoProperties,
		vector_tile::{VectorTile, VectorTileLayer},
	},
	load_tile,
};

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// vector tile file (*.pbf, *.mvt), optionally gzip-compressed
	#[arg(required = true, verbatim_doc_comment)]
	filename: PathBuf,

	/// only show the layer with this name
	#[arg(long, short)]
	layer: Option<String>,

	/// decode and list every feature
	#[arg(long, short)]
	features: bool,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	print!("{}", report(arguments)?);
	Ok(())
}

/// Builds the text printed by `inspect`.
pub fn report(arguments: &Subcommand) -> Result<String> {
	info!("inspect {:?}", arguments.filename);

	let blob = load_tile(&arguments.filename)?;
	let tile = VectorTile::from_blob(&blob)?;

	let layers: Vec<&VectorTileLayer> = match &arguments.layer {
		Some(name) => vec![
			tile
				.get_layer(name)
				.ok_or_else(|| anyhow!("layer '{name}' not found in {:?}", arguments.filename))?,
		],
		None => tile.layers().collect(),
	};

	let mut text = String::new();
	writeln!(text, "tile: {} bytes, {} layers", blob.len(), tile.len())?;
	for layer in layers {
		write_layer(&mut text, layer, arguments.features)?;
	}
	Ok(text)
}

fn write_layer(text: &mut String, layer: &VectorTileLayer, features: bool) -> Result<()> {
	let summary = layer.geometry_summary();
	writeln!(
		text,
		"layer '{}': extent {}, version {}, {} features",
		layer.name(),
		layer.extent(),
		layer.version(),
		layer.feature_count()
	)?;
	writeln!(
		text,
		"  points: {}, lines: {}, polygons: {}, unknown: {}",
		summary.points, summary.lines, summary.polygons, summary.unknown
	)?;
	writeln!(
		text,
		"  keys: {}, values: {}",
		layer.property_manager().keys().len(),
		layer.property_manager().values().len()
	)?;

	if features {
		for feature in layer.to_features()? {
			writeln!(
				text,
				"  {:?} {}",
				feature.geometry,
				format_properties(&feature.properties)
			)?;
		}
	}
	Ok(())
}

fn format_properties(properties: &GeoProperties) -> String {
	let entries: Vec<String> = properties.iter().map(|(key, value)| format!("{key}={value}")).collect();
	format!("{{{}}}", entries.join(", "))
}
