//! # Test Harness
//!
//! Provides utilities for integration testing homestock without affecting user configuration.
//! Uses thread-local storage instead of environment variables to avoid any interference
//! with the user's shell environment.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

#![allow(dead_code)]

use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use tempfile::TempDir;

use homestock::set_home_override;

/// Global lock to ensure tests run sequentially.
/// This prevents races when tests change the current directory.
static TEST_LOCK: Mutex<()> = Mutex::new(());

/// Test environment with a temporary home (global config) and household.
pub struct TestEnv {
    pub home_dir: TempDir,
    pub project_dir: TempDir,
    original_cwd: PathBuf,
    test_guard: std::sync::MutexGuard<'static, ()>,
}

impl TestEnv {
    /// Redirects the global config and changes into the household directory
    /// for the duration of the test.
    pub fn new() -> Self {
        // Recover from poisoned mutex (if a previous test panicked while holding the lock)
        let test_guard = TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        let home_dir = TempDir::new().expect("Failed to create temp home dir");
        let project_dir = TempDir::new().expect("Failed to create temp project dir");
        let original_cwd = env::current_dir().expect("Failed to get current dir");

        set_home_override(Some(home_dir.path().to_path_buf()));
        env::set_current_dir(project_dir.path()).expect("Failed to change to project dir");

        Self {
            home_dir,
            project_dir,
            original_cwd,
            test_guard,
        }
    }

    pub fn project_path(&self) -> &Path {
        self.project_dir.path()
    }

    pub fn global_config_path(&self) -> PathBuf {
        self.home_dir
            .path()
            .join(".config")
            .join("homestock")
            .join("config")
    }

    pub fn project_config_path(&self) -> PathBuf {
        self.project_dir.path().join(".homestock")
    }

    pub fn pantry_path(&self) -> PathBuf {
        self.project_dir.path().join("pantry")
    }

    pub fn write_global_config(&self, content: &str) {
        let path = self.global_config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create global config directory");
        }
        fs::write(path, content).expect("Failed to write global config");
    }

    pub fn write_project_config(&self, content: &str) {
        fs::write(self.project_config_path(), content).expect("Failed to write project config");
    }

    pub fn read_global_config(&self) -> String {
        fs::read_to_string(self.global_config_path()).unwrap_or_default()
    }

    /// All item files in the pantry, including category directories.
    pub fn list_items(&self) -> Vec<PathBuf> {
        let dir = self.pantry_path();
        if !dir.exists() {
            return Vec::new();
        }
        let mut items: Vec<PathBuf> = walkdir::WalkDir::new(dir)
            .min_depth(1)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
            .map(|e| e.into_path())
            .collect();
        items.sort();
        items
    }

    /// Item names read from the pantry, sorted.
    pub fn item_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .list_items()
            .iter()
            .map(|path| {
                homestock::PantryItem::load(path)
                    .expect("item should parse")
                    .meta
                    .name
            })
            .collect();
        names.sort();
        names
    }

    /// Writes an executable converter script into the household directory.
    #[cfg(unix)]
    pub fn write_script(&self, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.project_dir.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to make script executable");
        path
    }

    pub fn create_test_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.project_dir.path().join(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }
}

impl Drop for TestEnv {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.original_cwd);
        set_home_override(None);
    }
}

// =============================================================================
// Test Setup Helpers
// =============================================================================

/// Initialized household with a non-interactive global config.
pub fn setup_test_env() -> TestEnv {
    setup_with(&GlobalConfigBuilder::new())
}

/// Initialized household with the given global config.
pub fn setup_with(builder: &GlobalConfigBuilder) -> TestEnv {
    let env = TestEnv::new();
    env.write_global_config(&builder.build());
    homestock::commands::init().expect("init should succeed");
    env
}

// =============================================================================
// Config Builder Helpers
// =============================================================================

/// Builder for global configurations used in tests.
pub struct GlobalConfigBuilder {
    interactive: bool,
    id_pattern: String,
    converters: Vec<(String, String)>,
}

impl Default for GlobalConfigBuilder {
    fn default() -> Self {
        Self {
            interactive: false,
            id_pattern: "%y%m%d-%T%RRR".to_string(),
            converters: Vec::new(),
        }
    }
}

impl GlobalConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn id_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.id_pattern = pattern.into();
        self
    }

    /// Sets `converters.<key>` to a command line.
    pub fn converter(mut self, key: &str, command: impl AsRef<Path>) -> Self {
        self.converters
            .push((key.to_string(), command.as_ref().display().to_string()));
        self
    }

    pub fn build(&self) -> String {
        let mut lines = vec![
            format!("interactive = {}", self.interactive),
            format!("id_pattern = \"{}\"", self.id_pattern),
        ];
        if !self.converters.is_empty() {
            lines.push("[converters]".to_string());
            for (key, command) in &self.converters {
                lines.push(format!("{key} = '{command}'"));
            }
        }
        lines.join("\n")
    }
}
