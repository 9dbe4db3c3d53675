//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of
//! the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain    | Description                               |
//! |---------|-----------|-------------------------------------------|
//! | 0       | Universal | Success                                   |
//! | 1       | Universal | General error (unspecified)               |
//! | 2       | Universal | CLI usage error (bad args, missing flags) |
//! | 10-19   | input     | Profile / policy file problems            |
//! | 20-29   | model     | Model artifact problems                   |
//! | 30-39   | predict   | Runtime failures (IO, inference)          |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Profile file cannot be parsed (bad TOML, unknown categorical level).
pub const EXIT_PROFILE_INVALID: u8 = 10;

/// Policy file fails parsing or validation.
pub const EXIT_POLICY_INVALID: u8 = 11;

/// Model artifact fails parsing or validation.
pub const EXIT_MODEL_INVALID: u8 = 20;

/// Runtime failure: file IO, batch input, or the inference call itself.
pub const EXIT_RUNTIME: u8 = 30;
