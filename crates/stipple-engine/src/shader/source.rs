use std::path::{Path, PathBuf};

use crate::error::{ShaderError, Stage};

/// Locations of the two WGSL sources that make up a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderPaths {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

impl ShaderPaths {
    pub fn new(vertex: impl Into<PathBuf>, fragment: impl Into<PathBuf>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// `vertex.wgsl` and `fragment.wgsl` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join("vertex.wgsl"), dir.join("fragment.wgsl"))
    }

    pub fn path(&self, stage: Stage) -> &Path {
        match stage {
            Stage::Vertex => &self.vertex,
            Stage::Fragment => &self.fragment,
        }
    }
}

impl Default for ShaderPaths {
    fn default() -> Self {
        Self::in_dir("shaders")
    }
}

/// Reads the full source text for `stage` from `path`.
pub fn load_source(stage: Stage, path: &Path) -> Result<String, ShaderError> {
    log::debug!("loading {stage} shader from {}", path.display());
    std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
        stage,
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_dir_names_both_stages() {
        let paths = ShaderPaths::in_dir("assets/gl");
        assert_eq!(paths.path(Stage::Vertex), Path::new("assets/gl/vertex.wgsl"));
        assert_eq!(paths.path(Stage::Fragment), Path::new("assets/gl/fragment.wgsl"));
    }

    #[test]
    fn missing_file_reports_stage_and_path() {
        let path = Path::new("definitely/not/here/vertex.wgsl");
        let err = load_source(Stage::Vertex, path).unwrap_err();
        match err {
            ShaderError::Io { stage, path: p, .. } => {
                assert_eq!(stage, Stage::Vertex);
                assert_eq!(p, path);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reads_whole_file() {
        let path = std::env::temp_dir().join(format!("stipple-source-{}.wgsl", std::process::id()));
        std::fs::write(&path, "// line one\n// line two\n").unwrap();

        let src = load_source(Stage::Fragment, &path).unwrap();
        assert_eq!(src, "// line one\n// line two\n");

        std::fs::remove_file(&path).ok();
    }
}
