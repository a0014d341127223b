//! Output path naming and persistence

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::core::errors::{CodeswapError, Result};
use crate::core::models::{ConversionResult, FileTask, OutputLayout};

/// Writes converted files under the output directory
#[derive(Debug, Default)]
pub struct OutputWriter {
    layout: OutputLayout,
    created_dirs: Mutex<HashSet<PathBuf>>,
}

impl OutputWriter {
    /// Create a writer for the given layout
    pub fn new(layout: OutputLayout) -> Self {
        Self {
            layout,
            created_dirs: Mutex::new(HashSet::new()),
        }
    }

    /// Absolute directory the converted file for `task` goes into
    pub fn target_dir(&self, task: &FileTask) -> Result<PathBuf> {
        let output_dir = std::path::absolute(&task.output_dir)
            .map_err(|e| CodeswapError::file(&task.output_dir, e))?;

        Ok(match self.layout {
            OutputLayout::Flat => output_dir,
            OutputLayout::Mirror => output_dir.join(&task.relative_dir),
        })
    }

    /// Path the converted file for `task` is written to
    pub fn output_path(&self, task: &FileTask) -> Result<PathBuf> {
        let stem = task
            .input_path
            .file_stem()
            .ok_or_else(|| CodeswapError::file(&task.input_path, "no file name"))?;

        let mut file_name = stem.to_os_string();
        file_name.push(&task.output_extension);

        Ok(self.target_dir(task)?.join(file_name))
    }

    /// Persist `result` for `task`, replacing any earlier file.
    ///
    /// A dry run only logs the target path.
    pub async fn write(
        &self,
        task: &FileTask,
        result: &ConversionResult,
        dry_run: bool,
    ) -> Result<PathBuf> {
        let output = self.output_path(task)?;
        info!("Writing the output to {}", output.display());

        if dry_run {
            return Ok(output);
        }

        if let Some(dir) = output.parent() {
            self.ensure_dir(dir).await?;
        }

        tokio::fs::write(&output, &result.text)
            .await
            .map_err(|e| CodeswapError::file(&output, e))?;

        Ok(output)
    }

    /// Create `dir` unless this writer already did
    async fn ensure_dir(&self, dir: &Path) -> Result<()> {
        let mut created = self.created_dirs.lock().await;
        if created.contains(dir) {
            return Ok(());
        }

        let exists = tokio::fs::try_exists(dir)
            .await
            .map_err(|e| CodeswapError::file(dir, e))?;
        if !exists {
            debug!("Creating output directory {}", dir.display());
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| CodeswapError::file(dir, e))?;
        }

        created.insert(dir.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn task(input: &Path, output_dir: &Path, relative_dir: &str) -> FileTask {
        FileTask {
            input_path: input.to_path_buf(),
            input_extension: ".py".to_string(),
            output_dir: output_dir.to_path_buf(),
            output_extension: ".rs".to_string(),
            relative_dir: PathBuf::from(relative_dir),
        }
    }

    #[test]
    fn test_flat_output_path_ignores_nesting() {
        let writer = OutputWriter::new(OutputLayout::Flat);
        let task = task(Path::new("/a/b/foo.py"), Path::new("/out"), "b");
        assert_eq!(writer.output_path(&task).unwrap(), PathBuf::from("/out/foo.rs"));
    }

    #[test]
    fn test_mirror_output_path_keeps_nesting() {
        let writer = OutputWriter::new(OutputLayout::Mirror);
        let task = task(Path::new("/a/b/foo.py"), Path::new("/out"), "b");
        assert_eq!(writer.output_path(&task).unwrap(), PathBuf::from("/out/b/foo.rs"));
    }

    #[test]
    fn test_output_path_strips_only_last_extension() {
        let writer = OutputWriter::new(OutputLayout::Flat);
        let task = task(Path::new("/src/archive.test.py"), Path::new("/out"), "");
        assert_eq!(
            writer.output_path(&task).unwrap(),
            PathBuf::from("/out/archive.test.rs")
        );
    }

    #[test]
    fn test_relative_output_dir_is_made_absolute() {
        let writer = OutputWriter::new(OutputLayout::Flat);
        let task = task(Path::new("foo.py"), Path::new("converted"), "");
        let output = writer.output_path(&task).unwrap();
        assert!(output.is_absolute());
        assert!(output.ends_with("converted/foo.rs"));
    }

    #[tokio::test]
    async fn test_dry_run_touches_nothing() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");
        let writer = OutputWriter::new(OutputLayout::Flat);

        let path = writer
            .write(&task(Path::new("/a/foo.py"), &out, ""), &ConversionResult::new("x"), true)
            .await
            .unwrap();

        assert_eq!(path, out.join("foo.rs"));
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn test_write_creates_dir_and_overwrites() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("nested").join("out");
        let writer = OutputWriter::new(OutputLayout::Flat);
        let task = task(Path::new("/a/foo.py"), &out, "");

        writer
            .write(&task, &ConversionResult::new("first version"), false)
            .await
            .unwrap();
        let path = writer
            .write(&task, &ConversionResult::new("second"), false)
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "second");
    }

    #[tokio::test]
    async fn test_output_dir_is_created_once_per_run() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");
        let writer = OutputWriter::new(OutputLayout::Flat);

        for input in ["/a/foo.py", "/b/bar.py", "/c/baz.py"] {
            writer
                .write(&task(Path::new(input), &out, ""), &ConversionResult::new("x"), false)
                .await
                .unwrap();
        }

        let created = writer.created_dirs.lock().await;
        assert_eq!(created.len(), 1);
        assert!(created.contains(&out));
        assert!(out.join("baz.rs").is_file());
    }

    #[tokio::test]
    async fn test_output_dir_that_is_a_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("out");
        std::fs::write(&blocker, "not a directory").unwrap();
        let writer = OutputWriter::new(OutputLayout::Mirror);

        let err = writer
            .write(
                &task(Path::new("/a/pkg/foo.py"), &blocker, "pkg"),
                &ConversionResult::new("x"),
                false,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, CodeswapError::FileError { .. }));
        assert!(writer.created_dirs.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_existing_output_dir_is_fine() {
        let tmp = TempDir::new().unwrap();
        let writer = OutputWriter::new(OutputLayout::Flat);
        let task = task(Path::new("/a/foo.py"), tmp.path(), "");

        let path = writer
            .write(&task, &ConversionResult::new("ok"), false)
            .await
            .unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_mirror_write_creates_subdirectories() {
        let tmp = TempDir::new().unwrap();
        let writer = OutputWriter::new(OutputLayout::Mirror);
        let task = task(Path::new("/a/pkg/util/foo.py"), tmp.path(), "pkg/util");

        writer
            .write(&task, &ConversionResult::new("mirrored"), false)
            .await
            .unwrap();

        let expected = tmp.path().join("pkg").join("util").join("foo.rs");
        assert_eq!(std::fs::read_to_string(expected).unwrap(), "mirrored");
    }
}
