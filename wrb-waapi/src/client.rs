//! Remote Query Adapter.
//!
//! Three WAAPI procedures are consumed:
//!
//! | capability                      | procedure                          |
//! |---------------------------------|------------------------------------|
//! | selection capture               | `ak.wwise.ui.getSelectedObjects`   |
//! | original source lookup          | `ak.wwise.core.object.get`         |
//! | import of rendered audio        | `ak.wwise.core.audio.import`       |
//!
//! plus `ak.wwise.core.getInfo` to pick the version-dependent property name.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{json, Value};

use wrb_core::{ImportTask, ObjectId, ObjectPath, SelectedObject};

use crate::error::WaapiError;
use crate::transport::RpcTransport;

pub const GET_SELECTED_OBJECTS: &str = "ak.wwise.ui.getSelectedObjects";
pub const GET_INFO: &str = "ak.wwise.core.getInfo";
pub const OBJECT_GET: &str = "ak.wwise.core.object.get";
pub const AUDIO_IMPORT: &str = "ak.wwise.core.audio.import";

/// Only objects of this type take part in a bridge cycle.
pub const SOUND_TYPE: &str = "Sound";
const IMPORT_LANGUAGE: &str = "SFX";
const IMPORT_OPERATION: &str = "useExisting";

/// Which object property the lookup keys refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyField {
    Id,
    Path,
}

impl KeyField {
    pub fn as_str(self) -> &'static str {
        match self {
            KeyField::Id => "id",
            KeyField::Path => "path",
        }
    }
}

/// Property holding a sound's original source file. Renamed in Wwise 2022.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceField {
    /// `sound:originalWavFilePath` (2021 and earlier).
    Legacy,
    /// `originalFilePath` (2022 and later).
    Current,
}

impl SourceField {
    pub fn for_year(year: u64) -> Self {
        if year > 2021 {
            SourceField::Current
        } else {
            SourceField::Legacy
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceField::Legacy => "sound:originalWavFilePath",
            SourceField::Current => "originalFilePath",
        }
    }
}

/// Capability surface of the authoring tool as seen by the bridge.
pub trait AuthoringTool {
    /// Current selection, restricted to sounds, with source files filled in.
    ///
    /// `Ok(vec![])` means "nothing selected"; [`WaapiError::Connection`]
    /// means the tool could not be reached at all.
    fn capture_selection(&self) -> Result<Vec<SelectedObject>, WaapiError>;

    /// Map each key to its original source file. Keys without a source are
    /// absent from the map.
    fn resolve_original_source_paths(
        &self,
        keys: &[String],
        key_field: KeyField,
    ) -> Result<BTreeMap<String, String>, WaapiError>;

    /// Import rendered files onto existing objects. Best effort: any fault
    /// counts as zero imported.
    fn import_results(&self, tasks: &[ImportTask]) -> usize;
}

impl<A: AuthoringTool + ?Sized> AuthoringTool for &A {
    fn capture_selection(&self) -> Result<Vec<SelectedObject>, WaapiError> {
        (**self).capture_selection()
    }

    fn resolve_original_source_paths(
        &self,
        keys: &[String],
        key_field: KeyField,
    ) -> Result<BTreeMap<String, String>, WaapiError> {
        (**self).resolve_original_source_paths(keys, key_field)
    }

    fn import_results(&self, tasks: &[ImportTask]) -> usize {
        (**self).import_results(tasks)
    }
}

#[derive(Debug, Deserialize)]
struct RawObject {
    id: String,
    name: String,
    path: String,
    #[serde(rename = "type")]
    object_type: String,
}

/// [`AuthoringTool`] over a WAAPI transport.
pub struct WaapiClient<T> {
    transport: T,
}

impl<T: RpcTransport> WaapiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Release year of the connected Wwise, `0` if it does not say.
    pub fn version_year(&self) -> Result<u64, WaapiError> {
        let info = self.transport.call(GET_INFO, json!({}), json!({}))?;
        Ok(info
            .pointer("/version/year")
            .and_then(Value::as_u64)
            .unwrap_or(0))
    }
}

impl<T: RpcTransport> AuthoringTool for WaapiClient<T> {
    fn capture_selection(&self) -> Result<Vec<SelectedObject>, WaapiError> {
        let selected = self.transport.call(
            GET_SELECTED_OBJECTS,
            json!({}),
            json!({ "return": ["id", "name", "path", "type"] }),
        )?;

        let sounds: Vec<RawObject> = selected
            .get("objects")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .filter_map(|v| match serde_json::from_value::<RawObject>(v.clone()) {
                Ok(raw) => Some(raw),
                Err(err) => {
                    tracing::warn!("ignoring selected object without id/name/path/type: {err}");
                    None
                }
            })
            .filter(|raw| raw.object_type == SOUND_TYPE)
            .collect();

        if sounds.is_empty() {
            return Ok(vec![]);
        }

        let ids: Vec<String> = sounds.iter().map(|s| s.id.clone()).collect();
        // Source paths are optional metadata; only a lost connection fails the capture.
        let mut sources = match self.resolve_original_source_paths(&ids, KeyField::Id) {
            Ok(sources) => sources,
            Err(err) if err.is_connection() => return Err(err),
            Err(err) => {
                tracing::warn!("capturing selection without source paths: {err}");
                BTreeMap::new()
            }
        };

        Ok(sounds
            .into_iter()
            .map(|raw| SelectedObject {
                source_path: sources.remove(&raw.id),
                id: ObjectId::from(raw.id),
                name: raw.name,
                path: ObjectPath::from(raw.path),
                object_type: raw.object_type,
            })
            .collect())
    }

    fn resolve_original_source_paths(
        &self,
        keys: &[String],
        key_field: KeyField,
    ) -> Result<BTreeMap<String, String>, WaapiError> {
        if keys.is_empty() {
            return Ok(BTreeMap::new());
        }

        let field = SourceField::for_year(self.version_year()?);
        let key = key_field.as_str();
        let mut from = serde_json::Map::new();
        from.insert(key.to_string(), json!(keys));
        let result = self.transport.call(
            OBJECT_GET,
            json!({ "from": from }),
            json!({ "return": [key, field.as_str()] }),
        )?;

        let items = result
            .get("return")
            .and_then(Value::as_array)
            .ok_or_else(|| WaapiError::UnexpectedResponse {
                uri: OBJECT_GET.to_string(),
                detail: "missing `return` array".to_string(),
            })?;

        let mut out = BTreeMap::new();
        for item in items {
            let Some(k) = item.get(key).and_then(Value::as_str) else {
                continue;
            };
            let source = [SourceField::Legacy, SourceField::Current]
                .iter()
                .filter_map(|f| item.get(f.as_str()).and_then(Value::as_str))
                .find(|s| !s.is_empty());
            if let Some(source) = source {
                out.insert(k.to_string(), source.to_string());
            }
        }
        Ok(out)
    }

    fn import_results(&self, tasks: &[ImportTask]) -> usize {
        if tasks.is_empty() {
            return 0;
        }
        let imports: Vec<Value> = tasks
            .iter()
            .map(|task| {
                json!({
                    "objectPath": task.target_path.as_str(),
                    "audioFile": task.audio_file.display().to_string(),
                    "objectType": SOUND_TYPE,
                    "importLanguage": IMPORT_LANGUAGE,
                })
            })
            .collect();
        let args = json!({ "importOperation": IMPORT_OPERATION, "imports": imports });

        match self.transport.call(AUDIO_IMPORT, args, json!({})) {
            Ok(result) => result
                .get("objects")
                .and_then(Value::as_array)
                .map_or(0, Vec::len),
            Err(err) => {
                tracing::warn!("audio import failed, counting as 0 imported: {err}");
                0
            }
        }
    }
}
