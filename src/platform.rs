//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for copy shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const COPY_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const COPY_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Submit shortcut display for form help text
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Upload shortcut display for the photo panel
pub const UPLOAD_SHORTCUT: &str = "Ctrl+U";

/// Shortcut switching between the form and the photo panel
pub const PANEL_SHORTCUT: &str = "Ctrl+P";

/// Copy contact email shortcut display
/// - macOS: "Cmd+C"
/// - Linux/Windows: "Ctrl+Y" (Ctrl+C quits)
#[cfg(target_os = "macos")]
pub const COPY_SHORTCUT: &str = "Cmd+C";

#[cfg(not(target_os = "macos"))]
pub const COPY_SHORTCUT: &str = "Ctrl+Y";

/// Key paired with `COPY_MODIFIER` for copying
#[cfg(target_os = "macos")]
pub const COPY_KEY: char = 'c';

#[cfg(not(target_os = "macos"))]
pub const COPY_KEY: char = 'y';
