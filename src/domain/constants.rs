pub const DEFAULT_ENDPOINT: &str = "https://gitlab.com/api/graphql";
pub const DEFAULT_SETTINGS_FILE: &str = "settings_to_check.yaml";
pub const TOKEN_ENV: &str = "GITLAB_ACCESS_TOKEN";
pub const ENDPOINT_ENV: &str = "GITLAB_API_URL";
pub const LOG_ENV: &str = "PROJAUDIT_LOG";

/// GitLab caps connection pages at 100 nodes.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Fields every project node carries regardless of the configured rules.
pub const IDENTITY_FIELDS: [&str; 3] = ["id", "name", "fullPath"];
