//! Two-player chess rules engine: a mailbox board, pseudo-legal move
//! generation, check detection, legal move filtering and a turn state machine
//! that can be driven by any frontend.
//!
//! The rules live in [`chess`]. [`Engine`] is a line-based text frontend on top
//! of [`chess::game::Game`] used by the binary.

pub mod chess;

mod engine;
pub use engine::Engine;
use shadow_rs::shadow;

shadow!(build);

/// Returns the full version that can be used to identify how the binary was
/// built in the first place.
#[must_use]
pub fn engine_version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints the name and version on start-up.
pub fn print_engine_info() {
    println!("{} {}", build::PROJECT_NAME, engine_version());
}

/// Logs the build type and whether the build is clean.
pub fn log_binary_info() {
    log::debug!("release build: {}", !shadow_rs::is_debug());
    if !shadow_rs::git_clean() {
        log::warn!("built with uncommitted changes");
    }
}
