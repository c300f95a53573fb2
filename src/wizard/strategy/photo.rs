//! Photo input collector.
//!
//! Whether the single or the batch conversion runs depends only on the
//! selected import type's `supports_multiple` flag.

use std::path::PathBuf;

use crate::wizard::{error::ValidationError, method::ImportType};

/// Validated photo conversion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoRequest {
    Single {
        file: PathBuf,
        import_type: String,
    },
    Multiple {
        files: Vec<PathBuf>,
        import_type: String,
    },
}

/// Selected image files and import type.
#[derive(Debug, Clone)]
pub struct PhotoEntry {
    import_types: Vec<ImportType>,
    import_type: Option<String>,
    files: Vec<PathBuf>,
}

impl PhotoEntry {
    /// Creates an entry with the first declared import type preselected.
    pub fn new(import_types: Vec<ImportType>) -> Self {
        let import_type = import_types.first().map(|t| t.key.clone());
        Self {
            import_types,
            import_type,
            files: Vec::new(),
        }
    }

    pub fn import_types(&self) -> &[ImportType] {
        &self.import_types
    }

    pub fn import_type(&self) -> Option<&ImportType> {
        let key = self.import_type.as_deref()?;
        self.import_types.iter().find(|t| t.key == key)
    }

    /// Selects an import type. Switching to a single-file type keeps only the first file.
    pub fn set_import_type(&mut self, key: &str) -> Result<(), ValidationError> {
        let Some(found) = self.import_types.iter().find(|t| t.key == key) else {
            return Err(ValidationError::UnknownImportType(key.to_string()));
        };
        if !found.supports_multiple {
            self.files.truncate(1);
        }
        self.import_type = Some(found.key.clone());
        Ok(())
    }

    pub fn supports_multiple(&self) -> bool {
        self.import_type().is_some_and(|t| t.supports_multiple)
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Adds a file; for single-file types the file replaces the current one.
    pub fn add_file(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.supports_multiple() {
            self.files = vec![path];
        } else if !self.files.contains(&path) {
            self.files.push(path);
        }
    }

    pub fn remove_file(&mut self, index: usize) -> Option<PathBuf> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    pub fn clear_files(&mut self) {
        self.files.clear();
    }

    pub fn validate(&self) -> Result<PhotoRequest, ValidationError> {
        let import_type = self.import_type().ok_or(ValidationError::NoImportType)?;
        if self.files.is_empty() {
            return Err(ValidationError::NoFileSelected);
        }
        if let Some(missing) = self.files.iter().find(|p| !p.is_file()) {
            return Err(ValidationError::FileNotFound(missing.clone()));
        }

        let key = import_type.key.clone();
        if import_type.supports_multiple {
            Ok(PhotoRequest::Multiple {
                files: self.files.clone(),
                import_type: key,
            })
        } else {
            Ok(PhotoRequest::Single {
                file: self.files[0].clone(),
                import_type: key,
            })
        }
    }
}
