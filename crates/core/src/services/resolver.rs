use tracing::debug;

use crate::model::PlatformDescriptor;
use crate::workspace::{ArtifactConfig, ResolutionPolicy};

/// Maps a platform to the artifact download URL.
pub trait ArtifactResolver {
    fn resolve(&self, platform: &PlatformDescriptor) -> String;
    fn name(&self) -> &'static str;
}

/// Always returns one known-good URL, whatever the platform.
pub struct PinnedResolver {
    url: String,
}

impl PinnedResolver {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl ArtifactResolver for PinnedResolver {
    fn resolve(&self, platform: &PlatformDescriptor) -> String {
        debug!(
            version = %platform.version_tag(),
            url = %self.url,
            "platform ignored by pinned resolver"
        );
        self.url.clone()
    }

    fn name(&self) -> &'static str {
        "pinned"
    }
}

/// Substitutes the platform version tag into a URL template at `{version}`.
pub struct PlatformResolver {
    template: String,
}

impl PlatformResolver {
    pub fn new(template: impl Into<String>) -> Self {
        Self { template: template.into() }
    }
}

impl ArtifactResolver for PlatformResolver {
    fn resolve(&self, platform: &PlatformDescriptor) -> String {
        self.template.replace("{version}", &platform.version_tag())
    }

    fn name(&self) -> &'static str {
        "platform"
    }
}

/// Resolver selected by the plan's resolution policy.
pub fn resolver_for(config: &ArtifactConfig) -> Box<dyn ArtifactResolver> {
    match config.resolution {
        ResolutionPolicy::Pinned => Box::new(PinnedResolver::new(&config.url)),
        ResolutionPolicy::Platform => Box::new(PlatformResolver::new(&config.url_template)),
    }
}
