pub mod mesh;
pub mod plane_frame;
pub mod raycast;

pub use mesh::EdgeMesh;
pub use plane_frame::{PlaneFrame, StandardView, ViewParams};
pub use raycast::{MeshRayCaster, ProbeRay, RayCaster, RayHit};
