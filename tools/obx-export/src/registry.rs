//! Exporter registration table
//!
//! Host applications list their export targets here instead of wiring menu
//! entries to exporter internals. Each row names the format, the label shown
//! to users, the file extension, and the function that performs the export.
//! The export core never looks at this table.

use anyhow::Result;
use obx_common::{ExportedFile, MeshSource, OBX_EXTENSION, ObxError, export_selected_mesh};
use std::path::Path;

/// Export function signature shared by all registered formats
pub type ExportFn = fn(&dyn MeshSource, &Path) -> Result<ExportedFile, ObxError>;

/// One registered export format
#[derive(Debug, Clone, Copy)]
pub struct ExporterEntry {
    /// Stable identifier (e.g., "obx")
    pub id: &'static str,
    /// Human-readable label for menus and `formats` output
    pub label: &'static str,
    /// File extension without dot
    pub extension: &'static str,
    pub export: ExportFn,
}

/// The `.obx` exporter
pub const OBX_EXPORTER: ExporterEntry = ExporterEntry {
    id: "obx",
    label: "Extended OBJ (.obx)",
    extension: OBX_EXTENSION,
    export: export_selected_mesh,
};

/// Table of available exporters, in registration order
#[derive(Debug, Clone)]
pub struct ExporterRegistry {
    entries: Vec<ExporterEntry>,
}

impl ExporterRegistry {
    /// Registry with the built-in exporters
    pub fn new() -> Self {
        Self {
            entries: vec![OBX_EXPORTER],
        }
    }

    /// Registry with no exporters
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add an exporter. Identifiers must be unique.
    pub fn register(&mut self, entry: ExporterEntry) -> Result<()> {
        if self.get(entry.id).is_some() {
            anyhow::bail!("Exporter '{}' is already registered", entry.id);
        }
        tracing::debug!("Registered exporter '{}' ({})", entry.id, entry.label);
        self.entries.push(entry);
        Ok(())
    }

    /// Remove an exporter by identifier, returning it if present
    pub fn unregister(&mut self, id: &str) -> Option<ExporterEntry> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos))
    }

    /// Look up an exporter by identifier
    pub fn get(&self, id: &str) -> Option<&ExporterEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Look up an exporter by file extension (case-insensitive, dot optional)
    pub fn find_by_extension(&self, ext: &str) -> Option<&ExporterEntry> {
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        self.entries
            .iter()
            .find(|e| e.extension.eq_ignore_ascii_case(ext))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExporterEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ExporterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_export(_: &dyn MeshSource, path: &Path) -> Result<ExportedFile, ObxError> {
        Ok(ExportedFile {
            path: path.to_path_buf(),
            stats: Default::default(),
        })
    }

    #[test]
    fn test_default_registry_has_obx() {
        let registry = ExporterRegistry::new();
        let entry = registry.get("obx").expect("obx exporter registered");
        assert_eq!(entry.extension, "obx");
        assert_eq!(entry.label, "Extended OBJ (.obx)");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_extension_lookup_ignores_case_and_dot() {
        let registry = ExporterRegistry::new();
        for ext in ["obx", "OBX", ".Obx"] {
            assert_eq!(registry.find_by_extension(ext).map(|e| e.id), Some("obx"));
        }
        assert!(registry.find_by_extension("obj").is_none());
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = ExporterRegistry::new();
        assert!(registry.register(OBX_EXPORTER).is_err());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_and_unregister() {
        let mut registry = ExporterRegistry::empty();
        assert!(registry.is_empty());

        registry
            .register(ExporterEntry {
                id: "noop",
                label: "No-op",
                extension: "nop",
                export: noop_export,
            })
            .unwrap();
        registry.register(OBX_EXPORTER).unwrap();

        let ids: Vec<&str> = registry.iter().map(|e| e.id).collect();
        assert_eq!(ids, ["noop", "obx"]);

        assert_eq!(registry.unregister("noop").map(|e| e.id), Some("noop"));
        assert!(registry.unregister("noop").is_none());
        assert_eq!(registry.len(), 1);
    }
}
