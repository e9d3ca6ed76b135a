//! Render options from a KDL file.
//!
//! ```kdl
//! prefer-explicit-url true
//! ```

use entity_renderer::{EntityRenderError, RenderOptions};
use kdl::{KdlDocument, KdlNode};
use std::path::Path;

pub fn load_options(path: &Path) -> Result<RenderOptions, EntityRenderError> {
    let content = std::fs::read_to_string(path)?;
    let options = parse_options(&content)?;
    tracing::debug!(path = %path.display(), ?options, "loaded render options");
    Ok(options)
}

pub fn parse_options(content: &str) -> Result<RenderOptions, EntityRenderError> {
    let doc: KdlDocument = content
        .parse()
        .map_err(|e: kdl::KdlError| EntityRenderError::Options(e.to_string()))?;

    let mut options = RenderOptions::default();
    for node in doc.nodes() {
        match node.name().value() {
            "prefer-explicit-url" => options.prefer_explicit_url = bool_arg(node)?,
            other => tracing::warn!(node = other, "ignoring unknown config node"),
        }
    }
    Ok(options)
}

fn bool_arg(node: &KdlNode) -> Result<bool, EntityRenderError> {
    node.entries()
        .first()
        .and_then(|entry| entry.value().as_bool())
        .ok_or_else(|| {
            EntityRenderError::Options(format!("`{}` expects a boolean", node.name().value()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_options("").unwrap(), RenderOptions::default());
    }

    #[test]
    fn test_prefer_explicit_url() {
        let options = parse_options("prefer-explicit-url true\n").unwrap();
        assert!(options.prefer_explicit_url);
    }

    #[test]
    fn test_unknown_nodes_are_ignored() {
        let options = parse_options("theme \"dark\"\nprefer-explicit-url false\n").unwrap();
        assert!(!options.prefer_explicit_url);
    }

    #[test]
    fn test_non_boolean_is_rejected() {
        let err = parse_options("prefer-explicit-url \"yes\"\n").unwrap_err();
        assert!(matches!(err, EntityRenderError::Options(_)));
        assert!(err.to_string().contains("expects a boolean"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "prefer-explicit-url true").unwrap();
        let options = load_options(file.path()).unwrap();
        assert!(options.prefer_explicit_url);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_options(Path::new("/nonexistent/entity-render.kdl")).unwrap_err();
        assert!(matches!(err, EntityRenderError::Io(_)));
    }
}
