// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

use std::time::Duration;

// ---------------------------------------------------------------------------
// wolai API boundaries
// ---------------------------------------------------------------------------

/// Root of the wolai open API.
pub const WOLAI_API_BASE_URL: &str = "https://openapi.wolai.com/v1";

/// How many blocks to request per page of children.
pub const WOLAI_API_PAGE_SIZE: usize = 200;

/// wolai error code: the access token is invalid or expired.
pub const WOLAI_CODE_TOKEN_INVALID: u32 = 17003;

/// wolai error code: the API rate limit was exceeded.
pub const WOLAI_CODE_RATE_LIMITED: u32 = 17007;

/// wolai error code: the token has no access to the requested block.
pub const WOLAI_CODE_PERMISSION_DENIED: u32 = 17011;

/// How long to wait after a rate-limit response before retrying the same fetch.
pub const RATE_LIMIT_BACKOFF: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Output layout
// ---------------------------------------------------------------------------

/// File name every converted page is written to, inside its own directory.
pub const PAGE_FILE_NAME: &str = "index.md";

/// Per-page directory that downloaded images land in.
pub const ASSETS_DIR_NAME: &str = "assets";

/// Prefix for pages whose title renders to nothing.
pub const UNTITLED_PAGE_PREFIX: &str = "untitled-page-";

/// Longest directory name derived from a page title, in bytes.
pub const MAX_DIR_NAME_LEN: usize = 100;

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Indentation added per level of nested list content.
pub const NESTED_INDENT: &str = "\t";

/// Language written on fenced code blocks that declare none.
pub const DEFAULT_CODE_LANGUAGE: &str = "plaintext";

/// Estimated characters per output node, used to pre-allocate output strings.
pub const CHARS_PER_NODE_ESTIMATE: usize = 128;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
