use std::path::PathBuf;

pub type ScrollResult<T> = Result<T, ScrollError>;

#[derive(thiserror::Error, Debug)]
pub enum ScrollError {
    #[error("config error: {0}")]
    Config(String),

    #[error("no panels matching frame_*_panel_*.png found in {}", dir.display())]
    NoPanels { dir: PathBuf },

    #[error("malformed panel file name '{name}': {reason}")]
    MalformedPanelName { name: String, reason: String },

    #[error("duplicate panel frame {frame} panel {panel}: '{}' and '{}'", first.display(), second.display())]
    DuplicatePanel {
        frame: u32,
        panel: u32,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("cannot build a strip from zero panels")]
    EmptyStrip,

    #[error("layout error: {0}")]
    Layout(String),

    #[error(
        "too few panels to scroll: strip is {strip_width}px wide, viewport is {viewport_width}px"
    )]
    InsufficientScroll {
        strip_width: u32,
        viewport_width: u32,
    },

    #[error("strip is {strip_height}px tall, viewport needs {viewport_height}px")]
    StripTooShort {
        strip_height: u32,
        viewport_height: u32,
    },

    #[error("failed to spawn '{program}' (is it installed and on PATH?): {source}")]
    EncoderSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("ffmpeg exited with {}: {stderr}", exit_label(*code))]
    EncoderFailed { code: Option<i32>, stderr: String },

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedPanelName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// The message followed by every distinct cause, `: `-separated.
    pub fn chain(&self) -> String {
        let mut out = self.to_string();
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            let text = err.to_string();
            if !out.contains(&text) {
                out.push_str(": ");
                out.push_str(&text);
            }
            cause = err.source();
        }
        out
    }
}

fn exit_label(code: Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "no status (killed by signal)".to_string(),
    }
}
