//! Ray picking against registered drawables.

mod ray;
mod ray_cast;

pub use ray::{Ray, RayHit, FaceHit};
pub use ray_cast::{RayCast, PickableKey};
