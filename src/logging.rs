//! # Logging
//!
//! Installs the global `tracing` subscriber. Events go to daily rolling files
//! under `~/.config/homestock/logs` so the terminal UI is never written over.
//! The filter comes from `HOMESTOCK_LOG` (default `info`).
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{fs, sync::Once};

use tracing_appender::rolling;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::{
    config::GlobalConfig,
    constants::{DEFAULT_LOG_FILTER, LOG_FILE_PREFIX, LOG_FILTER_ENV},
};

static TRACING_INIT: Once = Once::new();

/// Initializes file logging once per process. Failures leave logging disabled.
pub fn init() {
    TRACING_INIT.call_once(|| {
        let Some(log_dir) = GlobalConfig::log_dir() else {
            return;
        };
        if fs::create_dir_all(&log_dir).is_err() {
            return;
        }

        let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
            .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        let file_layer = fmt::layer()
            .with_writer(rolling::daily(&log_dir, LOG_FILE_PREFIX))
            .with_ansi(false)
            .with_target(true);

        // Another subscriber may already be installed (e.g. by a test harness).
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .try_init();
    });
}
