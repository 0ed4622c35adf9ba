//! CLI Exit Code Registry
//!
//! Single source of truth for exit codes. Exit codes are part of the shell
//! contract; scripts rely on them.
//!
//! | Code | Meaning                                          |
//! |------|--------------------------------------------------|
//! | 0    | Success                                          |
//! | 2    | Usage error (bad args, identical input names)    |
//! | 3    | Config parse/validation failure                  |
//! | 4    | Structural failure (missing sheet, bad column)   |
//! | 5    | Runtime failure (file IO, xlsx encode/decode)    |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments, including identical input file names.
pub const EXIT_USAGE: u8 = 2;

/// Config parse or validation failure.
pub const EXIT_MERGE_INVALID_CONFIG: u8 = 3;

/// Expected sheet missing or target column unresolvable.
pub const EXIT_MERGE_STRUCTURE: u8 = 4;

/// Runtime failure reading or writing workbook files.
pub const EXIT_MERGE_RUNTIME: u8 = 5;
