// LeadDesk - platform/fs.rs
//
// OS integration: hands contact links to the system's default handler.

/// Only these schemes are handed to the OS opener.
const ALLOWED_SCHEMES: [&str; 4] = ["tel:", "mailto:", "https://", "http://"];

pub fn is_openable(url: &str) -> bool {
    ALLOWED_SCHEMES.iter().any(|s| url.starts_with(s))
}

/// Hand a `tel:`, `mailto:`, or web URL to the system's default handler.
///
/// Platform behaviour:
/// - **Windows**: `cmd /C start "" "<url>"`
/// - **macOS**: `open "<url>"`
/// - **Linux**: `xdg-open "<url>"`
///
/// The subprocess is spawned detached; any launch failure is logged at WARN
/// level but never propagated so the UI never blocks. The URL itself is not
/// logged because it carries a phone number or email address.
pub fn open_external(url: &str) {
    let scheme = url.split(':').next().unwrap_or("");
    if !is_openable(url) {
        tracing::warn!(scheme, "Refusing to open unsupported link scheme");
        return;
    }

    #[cfg(target_os = "windows")]
    let result = std::process::Command::new("cmd")
        .args(["/C", "start", ""])
        .arg(url)
        .spawn();

    #[cfg(target_os = "macos")]
    let result = std::process::Command::new("open").arg(url).spawn();

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let result = std::process::Command::new("xdg-open").arg(url).spawn();

    match result {
        Ok(_) => tracing::debug!(scheme, "External handler launched"),
        Err(e) => tracing::warn!(scheme, error = %e, "Failed to launch external handler"),
    }
}
