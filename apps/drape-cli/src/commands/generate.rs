//! `generate`: prices a request and writes the PDF quotation.

use std::path::{Path, PathBuf};

use drape_core::TaxRate;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult, ErrorCode};

use super::load_quote;

/// Writes the quotation and returns the path it was written to.
///
/// Without `output`, the file goes to `<output.directory>/<quote number>.pdf`
/// and the directory is created if needed.
pub fn run(
    request: &Path,
    output: Option<&Path>,
    tax_rate: Option<TaxRate>,
    config: &AppConfig,
) -> AppResult<PathBuf> {
    let quote = load_quote(request, config, tax_rate)?;

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let dir = &config.output.directory;
            if !dir.exists() {
                debug!(dir = %dir.display(), "Creating output directory");
                std::fs::create_dir_all(dir).map_err(|e| {
                    AppError::new(
                        ErrorCode::Render,
                        format!("Failed to create {}: {}", dir.display(), e),
                    )
                })?;
            }
            dir.join(format!("{}.pdf", quote.number()))
        }
    };

    drape_render::write_quote(&quote, &config.company, &path)?;
    info!(
        path = %path.display(),
        total = %quote.grand_total(),
        "Quotation generated"
    );
    Ok(path)
}
