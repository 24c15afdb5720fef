use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::backends::{BuildSandbox, Extractor, Fetcher, SourceCloner};
use crate::error::ProvisionResult;
use crate::model::{PayloadRoot, PlatformDescriptor};
use crate::services::bootstrap::DependencyBootstrapper;
use crate::services::provisioner::ArtifactProvisioner;
use crate::services::resolver::resolver_for;
use crate::services::staging::{build_topology, StagedPeer};
use crate::workspace::WorkspaceContext;

/// Record of one pipeline run, suitable for `--json` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub platform: PlatformDescriptor,
    pub version_tag: String,
    pub resolver: String,
    pub artifact_url: String,
    pub payload_root: PathBuf,
    pub peers: Vec<StagedPeer>,
    /// Directory names of registered dependencies; empty when bootstrap was skipped.
    pub dependencies: Vec<String>,
    pub bootstrapped: bool,
    pub started_at: String,
    pub finished_at: String,
}

/// Capability set used by a pipeline run.
pub struct Capabilities<'a> {
    pub fetcher: &'a dyn Fetcher,
    pub extractor: &'a dyn Extractor,
    pub cloner: &'a dyn SourceCloner,
    pub sandbox: &'a dyn BuildSandbox,
}

/// Coordinator that runs every phase in order against one workspace.
pub struct Pipeline<'a> {
    pub ctx: &'a WorkspaceContext,
    pub caps: Capabilities<'a>,
}

/// Output of the artifact + topology phases.
#[derive(Debug, Clone)]
pub struct StagedArtifact {
    pub resolver: String,
    pub url: String,
    pub payload: PayloadRoot,
    pub peers: Vec<StagedPeer>,
}

impl<'a> Pipeline<'a> {
    pub fn new(ctx: &'a WorkspaceContext, caps: Capabilities<'a>) -> Self {
        Self { ctx, caps }
    }

    /// Resolve, download, unpack, and stage the artifact into both peers.
    pub fn provision_and_stage(
        &self,
        platform: &PlatformDescriptor,
    ) -> ProvisionResult<StagedArtifact> {
        let plan = &self.ctx.plan;
        let layout = &self.ctx.layout;

        let resolver = resolver_for(&plan.artifact);
        let url = resolver.resolve(platform);
        info!(resolver = resolver.name(), %url, "resolved artifact");

        let provisioner = ArtifactProvisioner::new(self.caps.fetcher, self.caps.extractor);
        let payload =
            provisioner.provision(&url, &layout.staging_dir, &plan.artifact.archive_name)?;

        let peers = build_topology(&layout.topology_root, &plan.tool, &payload)?;
        Ok(StagedArtifact { resolver: resolver.name().to_string(), url, payload, peers })
    }

    /// Clone and register every dependency in the plan.
    pub fn bootstrap_dependencies(&self) -> ProvisionResult<Vec<String>> {
        let sources = self.ctx.plan.dependency_sources()?;
        let layout = &self.ctx.layout;
        DependencyBootstrapper::new(self.caps.cloner, self.caps.sandbox).bootstrap(
            &layout.dependencies_dir,
            &layout.project_dir,
            &sources,
        )?;
        Ok(sources.into_iter().map(|s| s.local_dir_name).collect())
    }

    /// Run the whole pipeline. With `skip_deps` the bootstrap phase is left out.
    pub fn run(
        &self,
        platform: PlatformDescriptor,
        skip_deps: bool,
    ) -> ProvisionResult<RunSummary> {
        let started_at = Utc::now().to_rfc3339();
        let version_tag = platform.version_tag();
        info!(%version_tag, "starting provisioning run");

        let staged = self.provision_and_stage(&platform)?;
        let dependencies = if skip_deps {
            info!("skipping dependency bootstrap");
            Vec::new()
        } else {
            self.bootstrap_dependencies()?
        };

        Ok(RunSummary {
            platform,
            version_tag,
            resolver: staged.resolver,
            artifact_url: staged.url,
            payload_root: staged.payload.path().to_path_buf(),
            peers: staged.peers,
            dependencies,
            bootstrapped: !skip_deps,
            started_at,
            finished_at: Utc::now().to_rfc3339(),
        })
    }
}
