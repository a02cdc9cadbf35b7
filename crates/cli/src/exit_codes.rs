//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args)               |
//! | 10-19   | view             | Table source and view-state codes        |
//! | 50-59   | fetch            | Results host HTTP codes                  |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use railmatch_client::FetchError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// View (10-19): table sources and view state
// =============================================================================

/// No data source: the table has no conventional data path and neither
/// --url nor --file was given, or no base URL is configured.
pub const EXIT_VIEW_SOURCE: u8 = 10;

/// Cannot read the --file payload.
pub const EXIT_VIEW_FILE: u8 = 11;

/// The payload is not a JSON array of rows for this table.
pub const EXIT_VIEW_DECODE: u8 = 12;

/// --filter/--kind/--suspicious names a column that does not exist or
/// does not carry a header filter.
pub const EXIT_VIEW_FILTER: u8 = 13;

/// --sort names a column that does not exist.
pub const EXIT_VIEW_SORT: u8 = 14;

// =============================================================================
// Fetch (50-59): results host HTTP
// =============================================================================

/// The data URL does not parse.
pub const EXIT_FETCH_URL: u8 = 50;

/// Connection failed, timed out, or was interrupted mid-body.
pub const EXIT_FETCH_NETWORK: u8 = 51;

/// The host answered with a non-success HTTP status.
pub const EXIT_FETCH_STATUS: u8 = 52;

/// The response body is not the expected JSON array.
pub const EXIT_FETCH_DECODE: u8 = 53;

// =============================================================================
// Fetch Error Mapping
// =============================================================================

/// Map a FetchError to its exit code.
pub fn fetch_exit_code(err: &FetchError) -> u8 {
    match err {
        FetchError::Url(_) => EXIT_FETCH_URL,
        FetchError::Network(_) => EXIT_FETCH_NETWORK,
        FetchError::Status(_, _) => EXIT_FETCH_STATUS,
        FetchError::Decode(_) => EXIT_FETCH_DECODE,
    }
}
