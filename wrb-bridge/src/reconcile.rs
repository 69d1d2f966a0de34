//! Match rendered files back to the persisted selection.
//!
//! REAPER names each output after the object's display name. An object
//! without a matching `<name>.wav` is skipped, not reported: the track may
//! have been muted, renamed, or intentionally left out of the render.

use wrb_core::{ImportTask, SelectedObject};
use wrb_reaper::CompletionChannel;

/// One import task per manifest object with a rendered file, in manifest order.
pub fn reconcile<C: CompletionChannel + ?Sized>(
    manifest: &[SelectedObject],
    channel: &C,
) -> Vec<ImportTask> {
    manifest
        .iter()
        .filter_map(|obj| {
            if obj.path.is_empty() {
                tracing::warn!("object '{}' has no Wwise path, cannot import", obj.name);
                return None;
            }
            let file_name = obj.render_file_name();
            match channel.rendered_file(&file_name) {
                Some(audio_file) => Some(ImportTask {
                    target_path: obj.path.clone(),
                    audio_file,
                }),
                None => {
                    tracing::debug!("no render named {file_name} for {}", obj.path);
                    None
                }
            }
        })
        .collect()
}
