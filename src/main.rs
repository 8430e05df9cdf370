//! Word cloud - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use wordcloud::config::{CliOverrides, LabelClass};
use wordcloud::model::{Canvas, HighlightEffect};

/// Word cloud - lays words out on a spiral without overlaps
#[derive(Parser, Debug)]
#[command(name = "wordcloud")]
#[command(version)]
#[command(about = "Lay out words as a collision-free spiral word cloud")]
pub struct Args {
    /// Words to lay out, in placement order
    pub words: Vec<String>,

    /// Read additional whitespace-separated words from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Highlight effect
    #[arg(short, long, value_parser = HighlightEffect::NAMES)]
    pub effect: Option<String>,

    /// Seed for reproducible highlights
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the layout as JSON instead of starting the TUI
    #[arg(long)]
    pub headless: bool,

    /// Canvas width in cells (headless only)
    #[arg(long, default_value = "80", value_parser = clap::value_parser!(u16).range(1..))]
    pub width: u16,

    /// Canvas height in cells (headless only)
    #[arg(long, default_value = "24", value_parser = clap::value_parser!(u16).range(1..))]
    pub height: u16,

    /// Plain labels: no entrance animation, no highlights
    #[arg(long)]
    pub plain: bool,
}

impl Args {
    /// Words from the command line followed by words from `--file`.
    /// `None` when neither was given, so the config file's words apply.
    fn collect_words(&self) -> Result<Option<Vec<String>>, std::io::Error> {
        let mut words = self.words.clone();
        if let Some(path) = &self.file {
            let contents = std::fs::read_to_string(path)?;
            words.extend(contents.split_whitespace().map(str::to_string));
        }
        Ok((!words.is_empty()).then_some(words))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = wordcloud::config::load_config_with_precedence(args.config.clone())?;
        let merged = wordcloud::config::merge_config(config_file);
        let with_env = wordcloud::config::apply_env_overrides(merged);
        let overrides = CliOverrides {
            words: args.collect_words()?,
            effect: args.effect.clone(),
            seed: args.seed,
            label_class: args.plain.then_some(LabelClass::Plain),
        };
        wordcloud::config::apply_cli_overrides(with_env, overrides)
    };

    wordcloud::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let layout = config.to_layout_config()?;
    let words = config.word_entries()?;

    if args.headless {
        let canvas = Canvas::new(f64::from(args.width), f64::from(args.height));
        let dump = wordcloud::view::lay_out(layout, canvas, words, config.seed)?;
        println!("{}", serde_json::to_string_pretty(&dump)?);
        return Ok(());
    }

    wordcloud::view::run(layout, config.seed, words)?;

    Ok(())
}
