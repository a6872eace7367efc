use super::{ContainerScope, EngineError};
use std::fmt::Debug;

/// Trait for the container engine operations the remover depends on.
///
/// Listing operations return the engine's raw line-oriented output; parsing it
/// is the inventory's job.
pub trait ContainerEngine: Send + Sync + Debug {
    /// List images, one `ID:REPO:TAG` record per line
    fn list_images(&self) -> Result<String, EngineError>;

    /// List containers, one `ID|IMAGE` (or `ID IMAGE`) record per line
    fn list_containers(&self, scope: ContainerScope) -> Result<String, EngineError>;

    /// Stop a container
    fn stop_container(&self, id: &str) -> Result<(), EngineError>;

    /// Remove a (stopped) container
    fn remove_container(&self, id: &str) -> Result<(), EngineError>;

    /// Remove an image by ID or `repo:tag`
    fn remove_image(&self, reference: &str) -> Result<(), EngineError>;
}
