use std::path::Path;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::error::Result;
use crate::model::{collapse_paragraph_breaks, Summarizer};
use crate::paragraphs;
use crate::tags;

#[derive(Debug)]
pub struct RunStats {
    pub paragraphs: usize,
    pub summarized: usize,
    pub tagged: usize,
    pub elapsed: Duration,
}

pub fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} paragraphs (eta {eta})")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}

/// Summarize paragraphs one at a time, in order. The first failure aborts.
pub async fn summarize_paragraphs(
    summarizer: &dyn Summarizer,
    paragraphs: &[String],
    pb: &ProgressBar,
) -> Result<(Vec<String>, usize, usize)> {
    let total = paragraphs.len();
    let mut summaries = Vec::with_capacity(total);
    let mut summarized = 0usize;
    let mut tagged = 0usize;

    for (i, paragraph) in paragraphs.iter().enumerate() {
        // An empty paragraph has no input to send; keep the slot so counts line up.
        let raw = if paragraph.is_empty() {
            String::new()
        } else {
            summarized += 1;
            collapse_paragraph_breaks(&summarizer.summarize(paragraph).await?)
        };

        let (summary, restored) = tags::preserve_tag(paragraph, raw);
        if restored {
            tagged += 1;
        }
        debug!(
            paragraph = i + 1,
            total,
            in_chars = paragraph.chars().count(),
            out_chars = summary.chars().count(),
            "paragraph processed"
        );

        summaries.push(summary);
        pb.inc(1);
    }

    Ok((summaries, summarized, tagged))
}

/// Load `input`, summarize every paragraph, write the result to `output`.
pub async fn run(summarizer: &dyn Summarizer, input: &Path, output: &Path) -> Result<RunStats> {
    let t0 = Instant::now();
    let paragraphs = paragraphs::load_paragraphs(input)?;
    info!(
        "Summarizing {} paragraphs with {}",
        paragraphs.len(),
        summarizer.name()
    );

    let pb = progress_bar(paragraphs.len());
    let result = summarize_paragraphs(summarizer, &paragraphs, &pb).await;
    pb.finish_and_clear();
    let (summaries, summarized, tagged) = result?;

    paragraphs::write_summaries(output, &summaries)?;

    Ok(RunStats {
        paragraphs: paragraphs.len(),
        summarized,
        tagged,
        elapsed: t0.elapsed(),
    })
}
