//! External pandoc invocation
//!
//! Markdown is piped over stdin; pandoc writes the PDF to a temporary file
//! which is read back and removed. Any failure here is recoverable: the
//! caller decides whether to fall back or surface it.

use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

pub async fn render_pdf(pandoc: &Path, markdown: &str) -> Result<Vec<u8>> {
    let out_path =
        std::env::temp_dir().join(format!("notesmith_{}.pdf", uuid::Uuid::new_v4()));

    let mut child = Command::new(pandoc)
        .arg("--from=markdown")
        .arg("--output")
        .arg(&out_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .context("Failed to spawn pandoc")?;

    {
        let mut stdin = child
            .stdin
            .take()
            .context("Failed to open pandoc stdin")?;
        stdin
            .write_all(markdown.as_bytes())
            .await
            .context("Failed to write markdown to pandoc")?;
    }

    let output = child
        .wait_with_output()
        .await
        .context("Failed to wait for pandoc")?;

    let result = if output.status.success() {
        tokio::fs::read(&out_path)
            .await
            .context("Failed to read pandoc output file")
    } else {
        Err(anyhow::anyhow!(
            "pandoc exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        ))
    };

    let _ = tokio::fs::remove_file(&out_path).await;

    result
}
