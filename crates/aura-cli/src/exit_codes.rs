//! Process exit codes. Part of the public contract of the `aura` binary.

use aura_core::errors::RunError;

pub const SUCCESS: i32 = 0;
pub const INTERNAL_ERROR: i32 = 1;
pub const CONFIG_ERROR: i32 = 2; // Bad flags, bad or missing config file
pub const PROVIDER_ERROR: i32 = 3; // Judge or embedder failed (auth, quota, network)

pub fn for_error(err: &RunError) -> i32 {
    use aura_core::errors::RunErrorKind::*;
    match err.kind {
        MissingConfig | ConfigParse | InvalidArgs => CONFIG_ERROR,
        kind if kind.is_provider_failure() => PROVIDER_ERROR,
        _ => INTERNAL_ERROR,
    }
}
