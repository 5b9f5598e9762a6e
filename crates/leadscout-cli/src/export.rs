use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::ValueEnum;

use leadscout_core::Lead;
use leadscout_pipeline::{export_file_name, leads_to_csv, leads_to_json, ExportFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportChoice {
    Json,
    Csv,
    Both,
}

impl ExportChoice {
    fn formats(self) -> &'static [ExportFormat] {
        match self {
            Self::Json => &[ExportFormat::Json],
            Self::Csv => &[ExportFormat::Csv],
            Self::Both => &[ExportFormat::Json, ExportFormat::Csv],
        }
    }
}

/// Write the leads to `dir` in each chosen format, creating the directory if
/// needed. Returns the written paths.
///
/// # Errors
///
/// Returns an error if the directory or a file cannot be written.
pub(crate) fn write_exports(
    leads: &[Lead],
    dir: &Path,
    choice: ExportChoice,
    at: DateTime<Utc>,
) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating export directory {}", dir.display()))?;

    let mut written = Vec::new();
    for &format in choice.formats() {
        let contents = match format {
            ExportFormat::Json => leads_to_json(leads)?,
            ExportFormat::Csv => leads_to_csv(leads),
        };
        let path = dir.join(export_file_name(at, format));
        std::fs::write(&path, contents)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), leads = leads.len(), "wrote export");
        written.push(path);
    }
    Ok(written)
}
