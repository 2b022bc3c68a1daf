// src/constants.rs
//! Domain constants that define the operational boundaries of the client.
//!
//! Each constant is named for the concept it constrains. Reading them should
//! tell you where the client talks to, how much it asks for per request, and
//! how far it is willing to descend into a block tree.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// Root of every resource path.
pub const API_BASE_URL: &str = "https://api.notion.com/v1";

/// Value of the `Notion-Version` header sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Largest `page_size` the Notion API accepts.
pub const NOTION_MAX_PAGE_SIZE: u32 = 100;

/// Page size for block children listings.
pub const BLOCKS_PAGE_SIZE: u32 = 100;

/// Page size for workspace search.
pub const SEARCH_PAGE_SIZE: u32 = 20;

/// Page size for database queries.
pub const DATABASE_QUERY_PAGE_SIZE: u32 = 50;

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Environment variable holding the integration token.
pub const TOKEN_ENV_VAR: &str = "NOTION_TOKEN";

/// File name of project-level MCP server configuration.
pub const MCP_CONFIG_FILE: &str = ".mcp.json";

/// Plugin cache location, relative to the home directory.
pub const PLUGIN_CACHE_PATTERN: &str =
    ".claude/plugins/cache/claude-plugins-official/Notion/*/.mcp.json";

// ---------------------------------------------------------------------------
// Formatting boundaries
// ---------------------------------------------------------------------------

/// Maximum nesting depth accepted when parsing or rendering a block tree.
///
/// Real documents rarely nest past a dozen levels. Anything deeper than this
/// is treated as malformed input.
pub const BLOCK_MAX_RENDER_DEPTH: usize = 64;

/// Number of spaces per indentation level in rendered outlines.
pub const INDENT_SPACES: usize = 2;

/// Width of the banner rule printed above and below a page title.
pub const BANNER_WIDTH: usize = 60;

/// Characters of a user id shown when a comment author has no name.
pub const SHORT_USER_ID_LENGTH: usize = 8;

/// Estimated characters per block, used to pre-allocate output strings.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 64;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters kept when previewing an error response body.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;
