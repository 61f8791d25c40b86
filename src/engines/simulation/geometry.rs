use crate::types::{Pose, Vector2D};

/// Ship outline in local units, nose up, centred on the hull.
/// The two landing feet are the lowest points when upright.
pub const SHIP_VERTICES: [Vector2D; 10] = [
    Vector2D { x: -1.0, y: -0.4 },
    Vector2D { x: 1.0, y: -0.4 },
    Vector2D { x: 1.0, y: 0.6 },
    Vector2D { x: 0.5, y: 1.2 },
    Vector2D { x: -0.5, y: 1.2 },
    Vector2D { x: -1.0, y: 0.6 },
    // legs
    Vector2D { x: -0.8, y: -0.4 },
    Vector2D { x: -1.4, y: -1.0 },
    Vector2D { x: 0.8, y: -0.4 },
    Vector2D { x: 1.4, y: -1.0 },
];

/// Maps a local point to world space: rotate clockwise by `pose.rotation`,
/// scale, then translate. The local up axis `(0, 1)` lands on `(sin r, cos r)`.
pub fn to_world(local: Vector2D, pose: &Pose, scale: f64) -> Vector2D {
    let (sin, cos) = pose.rotation.sin_cos();
    let rotated = Vector2D::new(
        local.x * cos + local.y * sin,
        -local.x * sin + local.y * cos,
    );
    pose.position + rotated * scale
}

/// Transforms a whole vertex buffer. Renderers draw the result, the impact test scans it.
pub fn world_transform(vertices: &[Vector2D], pose: &Pose, scale: f64) -> Vec<Vector2D> {
    vertices.iter().map(|v| to_world(*v, pose, scale)).collect()
}

/// True when any transformed vertex reaches or passes the pad level
pub fn touches_ground(world_vertices: &[Vector2D], ground_y: f64) -> bool {
    world_vertices.iter().any(|v| v.y <= ground_y)
}
