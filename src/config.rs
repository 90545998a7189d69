use serde::Deserialize;

/// Default TTL for cached release collections, in seconds (30 minutes)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 30 * 60;

/// Service configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceConfig {
    pub github: GitHubConfig,
    pub cache: CacheConfig,
    pub module: ModuleConfig,
}

/// Repository the release notes are read from
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GitHubConfig {
    pub owner: String,
    pub repo: String,
}

impl GitHubConfig {
    /// Link to the tag's page for a release.
    pub fn tag_url(&self, tag_name: &str) -> String {
        format!(
            "https://github.com/{}/{}/releases/tag/{}",
            self.owner, self.repo, tag_name
        )
    }
}

/// Cache-related configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CacheConfig {
    /// Release cache TTL in seconds; `0` disables expiry
    pub ttl_secs: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Option<std::time::Duration> {
        (self.ttl_secs > 0).then(|| std::time::Duration::from_secs(self.ttl_secs))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

/// Fields of the configured core module advertised by the catalog
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ModuleConfig {
    pub name: String,
    pub base_min_version_supported: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub info: String,
    pub assets: Vec<String>,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            name: "cicd".to_string(),
            base_min_version_supported: "v0.6.0".to_string(),
            title: "Build and Deploy (CI/CD)".to_string(),
            description: "Software delivery workflows for Kubernetes, from source to running \
                          deployment."
                .to_string(),
            icon: String::new(),
            info: "Continuous integration and deployment pipelines".to_string(),
            assets: Vec::new(),
        }
    }
}
