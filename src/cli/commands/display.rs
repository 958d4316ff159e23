//! Shared display helpers for dependency status.
//!
//! Used by `check`, `status`, `install` and `configure` so every command
//! renders a [`DependencySet`] the same way.

use crate::deps::{DependencyKind, DependencySet, DependencyStatus};
use crate::ui::UserInterface;

/// Header shown above the status rows.
pub const STATUS_HEADER: &str = "SASM Launcher Dependencies";

/// Print one row per dependency.
pub fn show_dependencies(ui: &mut dyn UserInterface, deps: &DependencySet) {
    for status in deps.iter() {
        ui.show_dependency(status);
    }
}

/// The command that would fix a dependency that is not ready.
pub fn fix_command(status: &DependencyStatus) -> String {
    if status.needs_configuration() {
        "sasm-deps configure".to_string()
    } else {
        format!("sasm-deps install {}", install_name(status.kind()))
    }
}

/// Short name accepted by `sasm-deps install`.
pub fn install_name(kind: DependencyKind) -> &'static str {
    match kind {
        DependencyKind::PackageManager => "homebrew",
        DependencyKind::ContainerRuntime => "docker",
        DependencyKind::DisplayServer => "xquartz",
    }
}

/// Print a hint per dependency that is not ready.
pub fn show_next_steps(ui: &mut dyn UserInterface, deps: &DependencySet) {
    for status in deps.missing() {
        ui.show_hint(&format!("{}: run `{}`", status.message(), fix_command(status)));
    }
}
