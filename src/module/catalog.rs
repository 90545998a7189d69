//! Static catalog of installable module descriptions

use serde::Serialize;

use crate::config::ModuleConfig;

/// One installable module the platform advertises. Fixed metadata only.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: u32,
    pub name: String,
    pub base_min_version_supported: String,
    pub is_included_in_legacy_full_package: bool,
    pub description: String,
    pub title: String,
    pub icon: String,
    pub info: String,
    pub assets: Vec<String>,
    pub dependent_modules: Vec<u32>,
}

pub struct ModuleCatalog {
    config: ModuleConfig,
}

impl ModuleCatalog {
    pub fn new(config: ModuleConfig) -> Self {
        Self { config }
    }

    /// Legacy listing: the configured core module only.
    pub fn modules(&self) -> Vec<Module> {
        vec![self.core_module()]
    }

    /// Extended listing: the core module plus the built-in integrations.
    pub fn modules_v2(&self) -> Vec<Module> {
        vec![
            self.core_module(),
            Self::gitops_module(),
            Self::security_module(),
        ]
    }

    pub fn module_by_name(&self, name: &str) -> Option<Module> {
        self.modules_v2().into_iter().find(|m| m.name == name)
    }

    fn core_module(&self) -> Module {
        Module {
            id: 1,
            name: self.config.name.clone(),
            base_min_version_supported: self.config.base_min_version_supported.clone(),
            is_included_in_legacy_full_package: true,
            description: self.config.description.clone(),
            title: self.config.title.clone(),
            icon: self.config.icon.clone(),
            info: self.config.info.clone(),
            assets: self.config.assets.clone(),
            dependent_modules: Vec::new(),
        }
    }

    fn gitops_module() -> Module {
        Module {
            id: 2,
            name: "argo-cd".to_string(),
            base_min_version_supported: "v0.5.3".to_string(),
            is_included_in_legacy_full_package: true,
            description: "Manages the state of Kubernetes applications declaratively: \
                          configuration lives in source control and the cluster converges on it. \
                          No prior Argo CD knowledge is required."
                .to_string(),
            title: "GitOps (by Argo CD)".to_string(),
            icon: "https://cdn.release-hub.dev/images/ic-integration-gitops-argocd.png"
                .to_string(),
            info: "Declarative GitOps CD for Kubernetes powered by Argo CD".to_string(),
            assets: vec![
                "https://cdn.release-hub.dev/images/img-gitops-1.png".to_string(),
            ],
            dependent_modules: vec![1],
        }
    }

    fn security_module() -> Module {
        Module {
            id: 3,
            name: "security-clair".to_string(),
            base_min_version_supported: "v0.5.4".to_string(),
            is_included_in_legacy_full_package: true,
            description: "Scans container images against a Clair server as part of the delivery \
                          pipeline, compares findings with the configured allow list, and blocks \
                          deployments carrying blocked vulnerabilities."
                .to_string(),
            title: "Vulnerability scanning (Clair)".to_string(),
            icon: "https://cdn.release-hub.dev/images/ic-integration-security-clair.png"
                .to_string(),
            info: "Image vulnerability scanning with Clair".to_string(),
            assets: vec![
                "https://cdn.release-hub.dev/images/img-security-clair-1.png".to_string(),
                "https://cdn.release-hub.dev/images/img-security-clair-2.png".to_string(),
            ],
            dependent_modules: vec![1],
        }
    }
}
