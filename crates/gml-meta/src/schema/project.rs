//! Project layout and integrity switches - loaded from tools/yy_rules.yaml

use serde::{Deserialize, Serialize};

/// Where the project documents live and how strictly they are audited.
///
/// Paths are relative to the working root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project manifest
    pub yyp_path: String,
    /// Optional user-visible resource ordering
    pub resource_order_file: String,
    /// Content files audited by the integrity check
    pub script_globs: Vec<String>,
    pub content_extension: String,
    pub metadata_extension: String,
    pub require_script_yy: bool,
    pub enforce_filename_matches_name: bool,
    pub enforce_path_sync: bool,
    /// When false, manifest entries pointing at missing files are warnings
    pub fail_on_missing_resource: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            yyp_path: "GOAP/GOAP.yyp".to_string(),
            resource_order_file: "GOAP/GOAP.resource_order".to_string(),
            script_globs: vec!["GOAP/scripts/**/*.gml".to_string()],
            content_extension: "gml".to_string(),
            metadata_extension: "yy".to_string(),
            require_script_yy: true,
            enforce_filename_matches_name: true,
            enforce_path_sync: true,
            fail_on_missing_resource: true,
        }
    }
}
