mod error;
mod model;
mod paragraphs;
mod pipeline;
mod settings;
mod tags;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use crate::model::InferenceClient;
use crate::pipeline::RunStats;
use crate::settings::{Overrides, Settings};

const INPUT_NOT_FOUND: &str = "Input file not found.";

#[derive(Parser)]
#[command(
    name = "para_summarizer",
    about = "Summarize a text file paragraph by paragraph with a seq2seq model"
)]
struct Cli {
    /// Input text file (prompted for when omitted)
    input: Option<PathBuf>,
    /// Output text file, overwritten (prompted for when omitted)
    output: Option<PathBuf>,
    /// Model id, e.g. facebook/bart-large-xsum
    #[arg(short, long)]
    model: Option<String>,
    /// Inference endpoint base URL
    #[arg(long)]
    endpoint: Option<String>,
    /// Beam width
    #[arg(long)]
    num_beams: Option<u32>,
    /// Max summary length in tokens
    #[arg(long)]
    max_length: Option<u32>,
    /// Keep generating until max length even when all beams finished
    #[arg(long)]
    no_early_stopping: bool,
    /// Settings file (default: ./para_summarizer.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            model: self.model.clone(),
            endpoint: self.endpoint.clone(),
            num_beams: self.num_beams,
            max_length: self.max_length,
            early_stopping: self.no_early_stopping.then_some(false),
        }
    }
}

fn prompt_path(prompt: &str) -> anyhow::Result<PathBuf> {
    let answer = dialoguer::Input::<String>::new()
        .with_prompt(prompt)
        .interact_text()
        .context("Failed to read path from terminal")?;
    Ok(PathBuf::from(answer.trim()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let input = match &cli.input {
        Some(p) => p.clone(),
        None => prompt_path("Enter the path to the input text file")?,
    };
    let output = match &cli.output {
        Some(p) => p.clone(),
        None => prompt_path("Enter the path to the output text file")?,
    };

    let Some(stats) = summarize_file(&cli, &input, &output).await? else {
        return Ok(());
    };

    info!(
        "{} paragraphs, {} sent to the model, {} tags restored",
        stats.paragraphs, stats.summarized, stats.tagged
    );
    println!(
        "Wrote {} summarized paragraphs to {}",
        stats.paragraphs,
        output.display()
    );
    if stats.elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(stats.elapsed));
    }

    Ok(())
}

/// `Ok(None)` when the input is missing; settings and the client are never built then.
async fn summarize_file(
    cli: &Cli,
    input: &Path,
    output: &Path,
) -> anyhow::Result<Option<RunStats>> {
    if !input.exists() {
        println!("{}", INPUT_NOT_FOUND);
        return Ok(None);
    }

    let settings =
        Settings::load(cli.config.as_deref(), &cli.overrides()).context("Failed to load settings")?;
    let client = InferenceClient::new(&settings).context("Failed to create inference client")?;

    let stats = pipeline::run(&client, input, output)
        .await
        .with_context(|| format!("Failed to summarize {}", input.display()))?;
    Ok(Some(stats))
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.5s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(Duration::from_secs(3725)), "1h 2m 5s");
    }

    #[test]
    fn cli_flags_become_overrides() {
        let cli = Cli::parse_from([
            "para_summarizer",
            "in.txt",
            "out.txt",
            "--num-beams",
            "2",
            "--no-early-stopping",
        ]);
        assert_eq!(cli.input, Some(PathBuf::from("in.txt")));
        let o = cli.overrides();
        assert_eq!(o.num_beams, Some(2));
        assert_eq!(o.early_stopping, Some(false));
        assert!(o.model.is_none());
    }

    fn cli_with_config(config: &Path) -> Cli {
        Cli::parse_from([
            "para_summarizer".to_string(),
            "--config".to_string(),
            config.display().to_string(),
        ])
    }

    #[tokio::test]
    async fn missing_input_returns_before_settings() {
        let dir = tempfile::tempdir().unwrap();
        // This config file does not exist, so loading settings would fail.
        let cli = cli_with_config(&dir.path().join("absent.toml"));
        let output = dir.path().join("out.txt");

        let stats = summarize_file(&cli, &dir.path().join("missing.txt"), &output)
            .await
            .unwrap();
        assert!(stats.is_none());
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn existing_input_loads_settings() {
        let dir = tempfile::tempdir().unwrap();
        let cli = cli_with_config(&dir.path().join("absent.toml"));
        let input = dir.path().join("in.txt");
        std::fs::write(&input, "Some text.").unwrap();

        let err = summarize_file(&cli, &input, &dir.path().join("out.txt"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to load settings"));
    }

    #[test]
    fn early_stopping_left_to_settings_by_default() {
        let cli = Cli::parse_from(["para_summarizer"]);
        assert!(cli.input.is_none());
        assert_eq!(cli.overrides().early_stopping, None);
    }
}
