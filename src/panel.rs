use crate::error::{ScrollError, ScrollResult};
use anyhow::Context;
use once_cell::sync::OnceCell;
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const NAME_PREFIX: &str = "frame_";
const NAME_INFIX: &str = "_panel_";
const NAME_SUFFIX: &str = ".png";

/// One source image, ordered by the indices encoded in its file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub path: PathBuf,
    pub frame: u32,
    pub panel: u32,
}

impl Panel {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Whether `name` falls under the `frame_*_panel_*.png` glob.
pub fn is_panel_candidate(name: &str) -> bool {
    let Some(rest) = name.strip_prefix(NAME_PREFIX) else {
        return false;
    };
    let Some(middle) = rest.strip_suffix(NAME_SUFFIX) else {
        return false;
    };
    // `_panel_` may not overlap the prefix or the suffix
    middle.contains(NAME_INFIX)
}

/// Parses `frame_<digits>_panel_<digits>.png`.
///
/// Returns `Ok(None)` for names outside the naming convention and an error for
/// names that look like panels but do not carry two valid indices.
pub fn parse_panel_name(name: &str) -> ScrollResult<Option<(u32, u32)>> {
    if !is_panel_candidate(name) {
        return Ok(None);
    }

    let re = panel_name_regex()?;
    let Some(caps) = re.captures(name) else {
        return Err(ScrollError::malformed(
            name,
            "expected frame_<digits>_panel_<digits>.png",
        ));
    };

    let frame = parse_index(name, &caps[1], "frame")?;
    let panel = parse_index(name, &caps[2], "panel")?;
    Ok(Some((frame, panel)))
}

fn parse_index(name: &str, digits: &str, what: &str) -> ScrollResult<u32> {
    digits
        .parse::<u32>()
        .map_err(|e| ScrollError::malformed(name, format!("{what} index '{digits}': {e}")))
}

fn panel_name_regex() -> anyhow::Result<&'static Regex> {
    static PANEL_RE: OnceCell<Regex> = OnceCell::new();
    PANEL_RE.get_or_try_init(|| {
        Regex::new(r"^frame_([0-9]+)_panel_([0-9]+)\.png$")
            .context("failed to compile panel name regex")
    })
}

/// Lists the panels directly inside `dir`, ordered by `(frame, panel)`.
///
/// A missing directory or one without candidates yields an empty list; the
/// caller decides whether that is fatal.
pub fn load_panels(dir: &Path) -> ScrollResult<Vec<Panel>> {
    let mut panels = Vec::new();
    if !dir.is_dir() {
        return Ok(panels);
    }

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if let Some((frame, panel)) = parse_panel_name(&name)? {
            panels.push(Panel {
                path: entry.path().to_path_buf(),
                frame,
                panel,
            });
        }
    }

    panels.sort_by(|a, b| {
        (a.frame, a.panel)
            .cmp(&(b.frame, b.panel))
            .then_with(|| a.path.cmp(&b.path))
    });

    for pair in panels.windows(2) {
        if (pair[0].frame, pair[0].panel) == (pair[1].frame, pair[1].panel) {
            return Err(ScrollError::DuplicatePanel {
                frame: pair[0].frame,
                panel: pair[0].panel,
                first: pair[0].path.clone(),
                second: pair[1].path.clone(),
            });
        }
    }

    Ok(panels)
}
