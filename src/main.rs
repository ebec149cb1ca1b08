// Chaosicon - Deterministic identicons and names from arbitrary strings
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::task::JoinSet;

use chaosicon::{FeatureCatalog, IdenticonFormat, Identicons, Settings, WordCatalog, WordWidths};

// Longest slice of the input kept in an output file name
const FILE_STEM_CHARS: usize = 40;

/// Generate identicons and names for strings.
#[derive(Parser)]
#[command(name = "chaosicon", about = "Deterministic identicons and three-word names")]
struct Args {
    /// Strings to render, e.g. addresses or user ids.
    #[arg(required_unless_present = "save_settings")]
    inputs: Vec<String>,

    /// Output format: `svg` or `image/svg+xml` (base64 data URI).
    #[arg(long)]
    format: Option<String>,

    /// Also print the three-word name of each input.
    #[arg(long)]
    name: bool,

    /// Write one file per input into this directory instead of printing.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory with `<section>/<section>_NN.svg` feature fragments.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Word catalog JSON.
    #[arg(long)]
    words: Option<PathBuf>,

    /// Word width table JSON.
    #[arg(long)]
    widths: Option<PathBuf>,

    /// Settings file (defaults to ./chaosicon_settings.json).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Store the effective settings back into the settings file.
    #[arg(long)]
    save_settings: bool,
}

impl Args {
    fn apply_to(&self, settings: &mut Settings) {
        if let Some(format) = &self.format {
            settings.format = IdenticonFormat::parse_lenient(format);
        }
        if self.name {
            settings.with_names = true;
        }
        if let Some(out) = &self.out {
            settings.output_dir = Some(out.clone());
        }
        if let Some(assets) = &self.assets {
            settings.assets_dir = Some(assets.clone());
        }
        if let Some(words) = &self.words {
            settings.words_path = Some(words.clone());
        }
        if let Some(widths) = &self.widths {
            settings.widths_path = Some(widths.clone());
        }
    }
}

struct Rendered {
    identicon: String,
    name: Option<String>,
}

async fn build_generator(settings: &Settings) -> Result<Identicons> {
    let mut generator = Identicons::embedded().context("Built-in word tables are invalid")?;

    if let Some(dir) = &settings.assets_dir {
        let features = FeatureCatalog::load_dir(dir)
            .await
            .with_context(|| format!("Failed to load feature assets from {}", dir.display()))?;
        generator = generator.with_features(features);
    }

    if settings.words_path.is_none() && settings.widths_path.is_none() {
        return Ok(generator);
    }

    let (builtin_words, builtin_widths) = chaosicon::words::embedded()?;
    let words = match &settings.words_path {
        Some(path) => WordCatalog::load(path)
            .with_context(|| format!("Failed to load word catalog {}", path.display()))?,
        None => builtin_words.clone(),
    };
    let widths = match &settings.widths_path {
        Some(path) => WordWidths::load(path)
            .with_context(|| format!("Failed to load word widths {}", path.display()))?,
        None => builtin_widths.clone(),
    };
    generator
        .with_words(words, widths)
        .context("Word widths do not cover the word catalog")
}

/// Renders every input on the blocking pool; results come back in input order.
async fn render_all(
    generator: Arc<Identicons>,
    inputs: &[String],
    format: IdenticonFormat,
    with_names: bool,
) -> Result<Vec<Rendered>> {
    let mut tasks = JoinSet::new();
    for (index, input) in inputs.iter().cloned().enumerate() {
        let generator = Arc::clone(&generator);
        tasks.spawn_blocking(move || {
            let rendered = generator.create(&input, format).map(|identicon| Rendered {
                identicon,
                name: with_names.then(|| generator.name(&input)),
            });
            (index, input, rendered)
        });
    }

    let mut slots: Vec<Option<Rendered>> = inputs.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (index, input, rendered) = joined.context("Render task failed")?;
        let rendered = rendered.with_context(|| format!("Failed to render {input:?}"))?;
        slots[index] = Some(rendered);
    }

    Ok(slots.into_iter().flatten().collect())
}

fn file_stem(index: usize, input: &str) -> String {
    let slug: String = input
        .chars()
        .take(FILE_STEM_CHARS)
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!("{index:03}_{slug}")
}

fn write_outputs(dir: &Path, inputs: &[String], rendered: &[Rendered], format: IdenticonFormat) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let extension = match format {
        IdenticonFormat::Svg => "svg",
        IdenticonFormat::DataUri => "txt",
    };
    for (index, (input, output)) in inputs.iter().zip(rendered).enumerate() {
        let path = dir.join(format!("{}.{extension}", file_stem(index, input)));
        fs::write(&path, &output.identicon)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        match &output.name {
            Some(name) => println!("{}\t{}", path.display(), name),
            None => println!("{}", path.display()),
        }
    }
    log::info!("Wrote {} identicon(s) to {}", rendered.len(), dir.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    use env_logger::Env;
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .init();

    let args = Args::parse();
    let settings_path = args.settings.clone().unwrap_or_else(Settings::default_path);
    let mut settings = Settings::load_or_default(&settings_path)
        .with_context(|| format!("Failed to load settings {}", settings_path.display()))?;
    args.apply_to(&mut settings);

    if args.save_settings {
        settings
            .save_to_disk(&settings_path)
            .with_context(|| format!("Failed to save settings {}", settings_path.display()))?;
        log::info!("Saved settings to {}", settings_path.display());
    }

    if args.inputs.is_empty() {
        return Ok(());
    }

    let generator = Arc::new(build_generator(&settings).await?);
    let rendered = render_all(generator, &args.inputs, settings.format, settings.with_names).await?;

    match &settings.output_dir {
        Some(dir) => write_outputs(dir, &args.inputs, &rendered, settings.format)?,
        None => {
            for output in &rendered {
                if let Some(name) = &output.name {
                    println!("{name}");
                }
                println!("{}", output.identicon);
            }
        }
    }

    Ok(())
}
