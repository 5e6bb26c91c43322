//! INI serialization logic for converting `ConfigFile` → INI string.

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let dataset = config
        .engine
        .dataset
        .as_ref()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();

    format!(
        r#"[engine]
; Dataset base path (e.g. /data/berlin.osrm). Leave empty to use the
; dataset already loaded into shared memory.
dataset = {}
; Force the shared-memory dataset even when a path is set.
shared_memory = {}

[dispatcher]
; Maximum number of engine queries running at once.
worker_threads = {}

[logging]
directory = {}
file = {}
"#,
        dataset,
        config.engine.shared_memory,
        config.dispatcher.worker_threads,
        config.logging.directory.to_string_lossy(),
        config.logging.file,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_string_has_all_sections() {
        let content = to_config_string(&ConfigFile::default());
        assert!(content.contains("[engine]"));
        assert!(content.contains("dataset = \n"));
        assert!(content.contains("worker_threads = 4"));
        assert!(content.contains("file = routelayer.log"));
    }
}
