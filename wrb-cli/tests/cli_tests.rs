use std::fs;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

use wrb_core::{BridgePaths, ObjectId, ObjectPath, SelectedObject, SelectionStore};

const SCRIPTS: [&str; 3] = [
    "wrb_open_wwiseobj_in_reaper.lua",
    "wrb_export_tracks.lua",
    "wrb_show_render_format.lua",
];

struct Env {
    root: TempDir,
}

impl Env {
    fn new() -> Self {
        let root = TempDir::new().expect("tempdir");
        let assets = root.path().join("assets");
        fs::create_dir_all(&assets).expect("assets");
        for script in SCRIPTS {
            fs::write(assets.join(script), "-- lua").expect("script");
        }
        Self { root }
    }

    fn data(&self) -> PathBuf {
        self.root.path().join("data")
    }

    fn paths(&self) -> BridgePaths {
        BridgePaths::at(self.data())
    }

    fn wrb(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("wrb"));
        cmd.env("WRB_DATA_DIR", self.data())
            .env("WRB_SCRIPTS_DIR", self.root.path().join("assets"))
            .env("WRB_WAAPI_URL", closed_waapi_url())
            .env_remove("RUST_LOG");
        cmd
    }

    /// A file standing in for the REAPER binary; never actually running.
    fn fake_reaper(&self) -> PathBuf {
        let exe = self.root.path().join("wrbfakereaper");
        fs::write(&exe, b"").expect("fake exe");
        exe
    }

    fn configure_exe(&self, exe: &Path) {
        self.wrb()
            .args(["config", "set-exe"])
            .arg(exe)
            .assert()
            .success();
    }
}

/// URL of a local port nothing listens on.
fn closed_waapi_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}/waapi")
}

fn sound(name: &str) -> SelectedObject {
    SelectedObject {
        id: ObjectId::from(format!("{{{name}}}")),
        name: name.to_string(),
        path: ObjectPath::from(format!(r"\Actor-Mixer Hierarchy\Default Work Unit\{name}")),
        object_type: "Sound".to_string(),
        source_path: None,
    }
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn config_show_prints_defaults() {
    let env = Env::new();
    env.wrb()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(contains("ZXZhdxgAAQ=="))
        .stdout(contains("config.json"));
}

#[test]
fn config_path_points_into_data_dir() {
    let env = Env::new();
    env.wrb()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(contains(env.paths().config_path().display().to_string()));
}

#[test]
fn set_exe_persists_with_current_key_names() {
    let env = Env::new();
    let exe = env.fake_reaper();
    env.configure_exe(&exe);

    let saved = fs::read_to_string(env.paths().config_path()).expect("config saved");
    let doc: serde_json::Value = serde_json::from_str(&saved).expect("json");
    assert_eq!(doc["executablePath"], exe.display().to_string());
    assert_eq!(doc["renderFormatToken"], "ZXZhdxgAAQ==");
}

#[test]
fn set_format_then_reset_restores_default() {
    let env = Env::new();
    env.wrb()
        .args(["config", "set-format", "Y3VzdG9t"])
        .assert()
        .success();
    let saved = fs::read_to_string(env.paths().config_path()).expect("config");
    assert!(saved.contains("Y3VzdG9t"));

    env.wrb()
        .args(["config", "reset-format"])
        .assert()
        .success()
        .stdout(contains("ZXZhdxgAAQ=="));
    let saved = fs::read_to_string(env.paths().config_path()).expect("config");
    assert!(!saved.contains("Y3VzdG9t"));
}

#[test]
fn legacy_config_keys_are_accepted() {
    let env = Env::new();
    fs::create_dir_all(env.data()).expect("data");
    fs::write(
        env.paths().config_path(),
        r#"{"reaper_path": "/opt/legacy/reaper", "reaper_render_format": "bGVnYWN5"}"#,
    )
    .expect("legacy config");

    env.wrb()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(contains("/opt/legacy/reaper"))
        .stdout(contains("bGVnYWN5"));
}

#[test]
fn corrupt_config_fails_naming_the_file() {
    let env = Env::new();
    fs::create_dir_all(env.data()).expect("data");
    fs::write(env.paths().config_path(), "{ not json").expect("corrupt");

    env.wrb()
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(contains("config.json"));
}

// ---------------------------------------------------------------------------
// manifest
// ---------------------------------------------------------------------------

#[test]
fn manifest_show_without_history() {
    let env = Env::new();
    env.wrb()
        .args(["manifest", "show"])
        .assert()
        .success()
        .stdout(contains("No selection history"));
}

#[test]
fn manifest_show_lists_objects_as_table_and_json() {
    let env = Env::new();
    SelectionStore::new(&env.paths())
        .write(&[sound("Footstep_01"), sound("Door_Close")])
        .expect("write manifest");

    env.wrb()
        .args(["manifest", "show"])
        .assert()
        .success()
        .stdout(contains("Footstep_01").and(contains("Door_Close")))
        .stdout(contains("2 object(s)"));

    let output = env
        .wrb()
        .args(["manifest", "show", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let objects: Vec<SelectedObject> =
        serde_json::from_slice(&output.stdout).expect("json manifest");
    assert_eq!(objects, vec![sound("Footstep_01"), sound("Door_Close")]);
}

#[test]
fn manifest_edit_without_history_fails() {
    let env = Env::new();
    env.wrb()
        .args(["manifest", "edit"])
        .assert()
        .failure()
        .stderr(contains("no selection history"));
}

// ---------------------------------------------------------------------------
// bridge operations
// ---------------------------------------------------------------------------

#[test]
fn open_with_missing_executable_is_an_error() {
    let env = Env::new();
    env.configure_exe(&env.root.path().join("no-such-reaper"));
    env.wrb()
        .args(["open", "--no"])
        .assert()
        .failure()
        .stdout(contains("REAPER executable not found"));
}

#[test]
fn open_without_wwise_reports_connection_failure() {
    let env = Env::new();
    env.configure_exe(&env.fake_reaper());
    SelectionStore::new(&env.paths())
        .write(&[sound("Kept")])
        .expect("history");

    env.wrb()
        .args(["open", "--no"])
        .assert()
        .failure()
        .stdout(contains("Could not connect to Wwise"))
        .stdout(contains("refused").not());

    // History is untouched by a failed capture.
    let history = SelectionStore::new(&env.paths()).read().expect("read");
    assert_eq!(history, vec![sound("Kept")]);
    assert!(!env.paths().lock_path().exists(), "lock released");
}

#[test]
fn sync_requires_running_reaper() {
    let env = Env::new();
    env.configure_exe(&env.fake_reaper());
    SelectionStore::new(&env.paths())
        .write(&[sound("Hit")])
        .expect("history");
    let stale = env.paths().render_dir().join("stale.wav");
    fs::create_dir_all(env.paths().render_dir()).expect("renders");
    fs::write(&stale, b"old").expect("stale");

    env.wrb()
        .arg("sync")
        .assert()
        .failure()
        .stdout(contains("REAPER is not running"));
    assert!(stale.exists(), "scratch directory untouched");
}

#[test]
fn check_format_requires_running_reaper() {
    let env = Env::new();
    env.configure_exe(&env.fake_reaper());
    env.wrb()
        .arg("check-format")
        .assert()
        .failure()
        .stdout(contains("REAPER is not running"));
}

#[test]
fn held_lock_refuses_second_operation_without_failing() {
    let env = Env::new();
    env.configure_exe(&env.fake_reaper());
    fs::create_dir_all(env.data()).expect("data");
    // The test process stands in for a live holder.
    fs::write(
        env.paths().lock_path(),
        format!("pid {} since now\n", std::process::id()),
    )
    .expect("lock");

    env.wrb()
        .arg("sync")
        .assert()
        .success()
        .stdout(contains("Another wrb operation"));
    assert!(env.paths().lock_path().exists(), "foreign lock left alone");
}

#[test]
fn runs_append_to_log_file() {
    let env = Env::new();
    env.configure_exe(&env.fake_reaper());
    env.wrb().arg("sync").assert().failure();

    let log = fs::read_to_string(env.paths().log_path()).expect("log written");
    assert!(log.contains("settings saved"));
}
