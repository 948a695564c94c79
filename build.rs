//! Retrieves information about the version of the engine from Git and the build
//! environment. It is printed by the binary on start-up so that a session can
//! be traced back to the exact build.

fn main() -> shadow_rs::SdResult<()> {
    shadow_rs::new()
}
