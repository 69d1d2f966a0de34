//! Selection Store — the persisted record of the last captured selection.
//!
//! Two files, always in the same order and of the same length:
//!
//! - `last_selected.jsonl`: one [`SelectedObject`] JSON record per line
//! - `last_selected.txt`: one `path|sourcePath` line per object
//!
//! Both files are rendered in memory first, then written through `.tmp`
//! siblings. The machine form is renamed into place before the human form,
//! so a failure can leave an older human mirror but never a human mirror
//! describing objects the machine form does not know about.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{io_err, CoreError};
use crate::paths::BridgePaths;
use crate::types::SelectedObject;

#[derive(Debug, Clone)]
pub struct SelectionStore {
    jsonl_path: PathBuf,
    txt_path: PathBuf,
}

impl SelectionStore {
    pub fn new(paths: &BridgePaths) -> Self {
        Self::at(paths.manifest_jsonl(), paths.manifest_txt())
    }

    pub fn at(jsonl_path: impl Into<PathBuf>, txt_path: impl Into<PathBuf>) -> Self {
        Self {
            jsonl_path: jsonl_path.into(),
            txt_path: txt_path.into(),
        }
    }

    pub fn jsonl_path(&self) -> &Path {
        &self.jsonl_path
    }

    pub fn txt_path(&self) -> &Path {
        &self.txt_path
    }

    /// Whether a machine manifest has ever been written.
    pub fn exists(&self) -> bool {
        self.jsonl_path.is_file()
    }

    /// Replace both manifest files with `objects`, in order. No filtering.
    pub fn write(&self, objects: &[SelectedObject]) -> Result<(), CoreError> {
        let mut jsonl = String::new();
        let mut txt = String::new();
        for obj in objects {
            jsonl.push_str(&serde_json::to_string(obj)?);
            jsonl.push('\n');
            txt.push_str(&obj.manifest_line());
            txt.push('\n');
        }

        write_atomic(&self.jsonl_path, &jsonl)?;
        write_atomic(&self.txt_path, &txt)?;
        tracing::debug!(
            "manifest written: {} object(s) to {}",
            objects.len(),
            self.jsonl_path.display()
        );
        Ok(())
    }

    /// Read the machine manifest.
    ///
    /// A missing file is an empty manifest. Blank lines are ignored and
    /// malformed records are dropped one by one, so a single corrupt line
    /// never loses the rest of the history.
    pub fn read(&self) -> Result<Vec<SelectedObject>, CoreError> {
        let contents = match std::fs::read_to_string(&self.jsonl_path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(io_err(&self.jsonl_path, e)),
        };

        let mut out = Vec::new();
        for (idx, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<SelectedObject>(line) {
                Ok(obj) => out.push(obj),
                Err(err) => tracing::warn!(
                    "skipping malformed manifest record at {}:{}: {err}",
                    self.jsonl_path.display(),
                    idx + 1
                ),
            }
        }
        Ok(out)
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<(), CoreError> {
    if let Some(dir) = path.parent() {
        crate::paths::create_dir(dir)?;
    }
    let tmp = PathBuf::from(format!("{}.tmp", path.display()));
    std::fs::write(&tmp, content).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ObjectId, ObjectPath};
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> SelectionStore {
        SelectionStore::new(&BridgePaths::at(dir.path()))
    }

    fn obj(name: &str, source: Option<&str>) -> SelectedObject {
        SelectedObject {
            id: ObjectId::from(format!("{{{name}}}")),
            name: name.to_string(),
            path: ObjectPath::from(format!(r"\Sounds\{name}")),
            object_type: "Sound".to_string(),
            source_path: source.map(str::to_string),
        }
    }

    #[test]
    fn missing_manifest_reads_empty() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        assert!(!store.exists());
        assert!(store.read().unwrap().is_empty());
    }

    #[test]
    fn human_mirror_matches_machine_form() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        let objects = vec![obj("A", Some("C:/a.wav")), obj("B", None)];
        store.write(&objects).unwrap();

        let txt = std::fs::read_to_string(store.txt_path()).unwrap();
        let lines: Vec<_> = txt.lines().collect();
        assert_eq!(lines, vec![r"\Sounds\A|C:/a.wav", r"\Sounds\B|"]);
        assert_eq!(store.read().unwrap().len(), lines.len());
    }

    #[test]
    fn write_replaces_previous_manifest() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store.write(&[obj("A", None), obj("B", None)]).unwrap();
        store.write(&[obj("C", None)]).unwrap();
        let read = store.read().unwrap();
        assert_eq!(read, vec![obj("C", None)]);
        assert!(!PathBuf::from(format!("{}.tmp", store.jsonl_path().display())).exists());
    }

    #[test]
    fn blank_lines_are_ignored() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        let line = serde_json::to_string(&obj("A", None)).unwrap();
        std::fs::write(store.jsonl_path(), format!("\n{line}\n\n")).unwrap();
        assert_eq!(store.read().unwrap(), vec![obj("A", None)]);
    }
}
