//! Errors raised while assembling a scene.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("cannot build a BVH over an empty object list")]
    EmptyBvh,
}

pub type SceneResult<T> = Result<T, SceneError>;
