//! `tally count` – pass stdin through to stdout and report progress on stderr.

use anyhow::{Context, Result};
use std::io::{self, BufRead, ErrorKind, Write};
use std::sync::{Arc, Mutex};
use tally_core::config::TallyConfig;
use tally_core::{NotifyOptions, Progress, ProgressEvent, ProgressOptions, ProgressUnit};

/// Effective settings for one `count` run: CLI flags layered over config.
#[derive(Debug, Clone, PartialEq)]
pub struct CountSettings {
    pub total: Option<u64>,
    pub unit: ProgressUnit,
    pub locale: Option<String>,
    pub min_interval_ms: u64,
    pub template: Option<String>,
}

impl CountSettings {
    pub fn resolve(
        cfg: &TallyConfig,
        total: Option<u64>,
        bytes: bool,
        locale: Option<String>,
        interval_ms: Option<u64>,
        format: Option<String>,
    ) -> Self {
        Self {
            total,
            unit: if bytes {
                ProgressUnit::Byte
            } else {
                cfg.unit.unwrap_or_default()
            },
            locale: locale.or_else(|| cfg.locale.clone()),
            min_interval_ms: interval_ms.unwrap_or(cfg.min_interval_ms),
            template: format.or_else(|| cfg.template.clone()),
        }
    }

    pub fn progress_options(&self) -> ProgressOptions {
        let mut options = ProgressOptions::default().unit(self.unit);
        if let Some(total) = self.total {
            options = options.total(total);
        }
        if let Some(locale) = &self.locale {
            options = options.locale(locale.clone());
        }
        options
    }

    fn notify_options(&self) -> NotifyOptions {
        match self.min_interval_ms {
            0 => NotifyOptions::default(),
            ms => NotifyOptions::throttled(ms),
        }
    }
}

pub fn run_count(settings: &CountSettings) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let status: Arc<Mutex<dyn Write + Send>> = Arc::new(Mutex::new(io::stderr()));
    let progress = count_stream(
        stdin.lock(),
        stdout.lock(),
        status,
        settings,
        settings.progress_options(),
    )?;
    tracing::info!(counter = progress.counter(), "count finished");
    Ok(())
}

/// Copy `input` to `output`, counting lines (or bytes for the byte unit).
/// Status lines go to `status` on every delivered change and once at the end.
pub fn count_stream<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    status: Arc<Mutex<dyn Write + Send>>,
    settings: &CountSettings,
    options: ProgressOptions,
) -> Result<Progress> {
    let mut progress = Progress::new(options);
    let template = settings.template.clone();
    let sink = Arc::clone(&status);
    progress.on(
        ProgressEvent::Change,
        move |state| {
            let line = state.to_formatted_string(template.as_deref());
            let mut out = sink.lock().unwrap_or_else(|e| e.into_inner());
            writeln!(out, "{line}")?;
            Ok(())
        },
        settings.notify_options(),
    );
    tracing::debug!(?settings, "counting input");

    match settings.unit {
        ProgressUnit::Byte => {
            loop {
                let chunk = match input.fill_buf() {
                    Ok(chunk) => chunk,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e).context("read input"),
                };
                if chunk.is_empty() {
                    break;
                }
                let n = chunk.len();
                output.write_all(chunk).context("write output")?;
                input.consume(n);
                progress.advance(n as u64)?;
            }
        }
        ProgressUnit::None => {
            let mut line = Vec::new();
            loop {
                line.clear();
                if input.read_until(b'\n', &mut line).context("read input")? == 0 {
                    break;
                }
                output.write_all(&line).context("write output")?;
                progress.increment_counter()?;
            }
        }
    }
    output.flush().context("flush output")?;

    let last = progress.to_formatted_string(settings.template.as_deref());
    let mut out = status.lock().unwrap_or_else(|e| e.into_inner());
    writeln!(out, "{last}").context("write status")?;
    Ok(progress)
}
