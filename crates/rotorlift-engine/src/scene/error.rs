use thiserror::Error;

use super::EntityId;

/// Errors from scene graph edits.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum SceneError {
    /// The id does not belong to this scene.
    #[error("unknown entity {0:?}")]
    UnknownEntity(EntityId),

    /// Attaching `child` under `parent` would make `child` its own ancestor.
    #[error("parenting {child:?} under {parent:?} would create a cycle")]
    Cycle { child: EntityId, parent: EntityId },
}
