//! Roundtrip tests for the machine-readable selection manifest.
//!
//! Each `#[case]` is isolated — its own temp directory.

use rstest::rstest;
use tempfile::TempDir;
use wrb_core::{BridgePaths, ObjectId, ObjectPath, SelectedObject, SelectionStore};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sound(id: &str, name: &str, path: &str, source: Option<&str>) -> SelectedObject {
    SelectedObject {
        id: ObjectId::from(id),
        name: name.to_string(),
        path: ObjectPath::from(path),
        object_type: "Sound".to_string(),
        source_path: source.map(str::to_string),
    }
}

fn single() -> Vec<SelectedObject> {
    vec![sound("1", "Hit", r"\Sounds\Hit", None)]
}

fn mixed_sources() -> Vec<SelectedObject> {
    vec![
        sound("{A}", "Footstep_01", r"\Actor-Mixer Hierarchy\Steps\Footstep_01", Some(r"C:\src\fs01.wav")),
        sound("{B}", "Footstep_02", r"\Actor-Mixer Hierarchy\Steps\Footstep_02", None),
        sound("{C}", "Footstep_03", r"\Actor-Mixer Hierarchy\Steps\Footstep_03", Some(r"C:\src\fs03.wav")),
    ]
}

fn unicode_names() -> Vec<SelectedObject> {
    vec![
        sound("{D}", "爆発_大", r"\Sounds\爆発_大", Some("/proj/Originals/爆発.wav")),
        sound("{E}", "Взрыв \"big\" | loud", r"\Sounds\Взрыв", None),
    ]
}

fn reversed_order() -> Vec<SelectedObject> {
    let mut objs = mixed_sources();
    objs.reverse();
    objs
}

// ---------------------------------------------------------------------------
// Parameterised roundtrip
// ---------------------------------------------------------------------------

#[rstest]
#[case("single", single())]
#[case("mixed_sources", mixed_sources())]
#[case("unicode_names", unicode_names())]
#[case("reversed_order", reversed_order())]
fn manifest_roundtrip_preserves_order(#[case] label: &str, #[case] objects: Vec<SelectedObject>) {
    let dir = TempDir::new().expect("tempdir");
    let store = SelectionStore::new(&BridgePaths::at(dir.path()));

    store
        .write(&objects)
        .unwrap_or_else(|e| panic!("[{label}] write failed: {e}"));
    let back = store
        .read()
        .unwrap_or_else(|e| panic!("[{label}] read failed: {e}"));

    assert_eq!(back, objects, "[{label}] roundtrip");

    let txt = std::fs::read_to_string(store.txt_path()).expect("read txt");
    let paths: Vec<&str> = txt.lines().map(|l| l.split('|').next().unwrap_or("")).collect();
    let expected: Vec<&str> = objects.iter().map(|o| o.path.as_str()).collect();
    assert_eq!(paths, expected, "[{label}] human mirror order");
}
