use std::ffi::OsString;
use std::path::Path;

/// File-manager command that shows `file`, selected where the platform supports it.
pub fn reveal_command(file: &Path) -> (&'static str, Vec<OsString>) {
    #[cfg(target_os = "macos")]
    {
        ("open", vec![OsString::from("-R"), file.as_os_str().to_owned()])
    }

    #[cfg(target_os = "windows")]
    {
        let mut select = OsString::from("/select,");
        select.push(file.as_os_str());
        ("explorer", vec![select])
    }

    // xdg-open cannot select a file, so open its folder instead
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let folder = match file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        ("xdg-open", vec![folder.as_os_str().to_owned()])
    }
}

/// Shows the finished video in the platform file manager. Failures only warn.
pub fn reveal_in_folder(file: &Path) {
    if file.as_os_str().is_empty() {
        return;
    }
    let (program, args) = reveal_command(file);
    if let Err(err) = std::process::Command::new(program).args(&args).spawn() {
        tracing::warn!("Could not run {} to reveal {}: {}", program, file.display(), err);
    }
}
