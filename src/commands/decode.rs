use crate::output::UserOutput;
use anyhow::Context;
use compose_control::progress::LineDecoder;
use compose_control::{ComposeOutput, DecodePolicy, DecodedEvent, Error as ComposeError, Project};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    pub strict: bool,
    pub json: bool,
    pub latest: bool,
}

pub async fn run_decode(
    project: &Project,
    input: Option<PathBuf>,
    options: DecodeOptions,
    out: &dyn UserOutput,
) -> anyhow::Result<()> {
    let reader: Box<dyn AsyncBufRead + Unpin + Send> = match input {
        Some(path) => {
            let file = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };
    decode_stream(project, reader, options, out).await
}

/// Decode `reader` line by line as it arrives.
pub async fn decode_stream<R>(
    project: &Project,
    reader: R,
    options: DecodeOptions,
    out: &dyn UserOutput,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let policy = if options.strict {
        DecodePolicy::Strict
    } else {
        DecodePolicy::Lenient
    };
    let mut decoder = LineDecoder::new(project.name(), policy);
    let mut latest = ComposeOutput::default();

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let decoded = project
            .with_manifest(|manifest| decoder.feed(&line, manifest))
            .map_err(ComposeError::from)?;
        let Some(event) = decoded else {
            continue;
        };
        if options.latest {
            latest.record(event);
        } else {
            print_event(&event, options.json, out)?;
        }
    }

    if options.latest {
        for event in latest.events() {
            print_event(event, options.json, out)?;
        }
    }

    if decoder.skipped() > 0 {
        out.warning(&format!(
            "Skipped {} line(s) that are not progress events",
            decoder.skipped()
        ));
    }
    Ok(())
}

fn print_event(event: &DecodedEvent, json: bool, out: &dyn UserOutput) -> anyhow::Result<()> {
    if json {
        out.status(&serde_json::to_string(event)?);
        return Ok(());
    }

    let marker = if event.dry_run { "(dry run) " } else { "" };
    let line = format!(
        "{}{:<10} {:<30} {:<12} {}",
        marker,
        event.resource_type.keyword(),
        event.name,
        event.state.label(),
        event.description
    );
    out.status(line.trim_end());
    Ok(())
}
