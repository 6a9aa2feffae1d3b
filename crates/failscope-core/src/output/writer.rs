//! File output writer for the pipeline graph artifact

use crate::coordination::PIPELINE;
use crate::error::Result;
use std::path::Path;

/// Output file writer
pub struct OutputWriter;

impl OutputWriter {
    /// Write the pipeline graph to `path`.
    ///
    /// A `.mmd` or `.mermaid` extension writes Mermaid source; anything else
    /// writes SVG.
    pub fn write_graph(path: &Path) -> Result<()> {
        let content = match path.extension().and_then(|e| e.to_str()) {
            Some("mmd") | Some("mermaid") => super::graph::render_mermaid(&PIPELINE),
            _ => super::graph::render_svg(),
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_svg() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pipeline_graph.svg");
        OutputWriter::write_graph(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<svg"));
    }

    #[test]
    fn test_write_mermaid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pipeline.mmd");
        OutputWriter::write_graph(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("flowchart TD;"));
    }

    #[test]
    fn test_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out/graphs/chain.svg");
        OutputWriter::write_graph(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_path_is_io_error() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be overwritten with a file
        let err = OutputWriter::write_graph(dir.path()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Io);
    }
}
