use std::sync::Arc;

pub mod config;
pub mod error;
pub mod ffmpeg;
pub mod generator;
pub mod init;
pub mod panel;
pub mod platform;
pub mod scroll;
pub mod strip;

pub use config::ScrollConfig;
pub use error::{ScrollError, ScrollResult};
pub use generator::{Generator, ScrollReport};
pub use panel::{Panel, load_panels};
pub use scroll::ScrollPlan;
pub use strip::{Strip, StripLayout};

pub type LogHook = Arc<dyn Fn(&str) + Send + Sync + 'static>;

/// Progress sink handed to the generator.
///
/// Every line goes to `tracing`; a hook, when present, also receives the
/// formatted `[TAG] message` line so a front end can mirror progress.
#[derive(Clone, Default)]
pub struct Reporter {
    hook: Option<LogHook>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hook(hook: LogHook) -> Self {
        Self { hook: Some(hook) }
    }

    fn logv(&self, tag: &str, message: &str) {
        match tag {
            "WARN" => tracing::warn!("{}", message),
            _ => tracing::info!("{}", message),
        }

        if let Some(hook) = self.hook.as_ref() {
            hook(&format!("[{}] {}", tag, message));
        }
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.logv("INFO", message.as_ref());
    }

    pub fn ok(&self, message: impl AsRef<str>) {
        self.logv("OK", message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.logv("WARN", message.as_ref());
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("hook", &self.hook.is_some())
            .finish()
    }
}
