//! Collision detection module
//!
//! Ray queries against the two collider shapes the scene supports:
//! axis-aligned boxes (slab method) and spheres.
//!
//! # Example
//!
//! ```ignore
//! use object_pickup_engine::physics::collision::ray_aabb_intersect;
//! use glam::Vec3;
//!
//! let origin = Vec3::new(0.0, 0.0, -5.0);
//! let direction = Vec3::new(0.0, 0.0, 1.0);
//!
//! if let Some(t) = ray_aabb_intersect(origin, direction, Vec3::splat(-1.0), Vec3::splat(1.0)) {
//!     let hit_point = origin + direction * t;
//! }
//! ```

use glam::Vec3;

/// Collision shape attached to an entity, in the entity's local space.
///
/// Shapes are centered on the entity's world position and scaled by its world
/// scale. Boxes stay axis-aligned regardless of rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collider {
    Box { half_extents: Vec3 },
    Sphere { radius: f32 },
}

impl Collider {
    /// Unit cube (1m on each side).
    pub fn unit_box() -> Self {
        Collider::Box {
            half_extents: Vec3::splat(0.5),
        }
    }

    /// Cast a ray against this collider placed at `center` with `scale`.
    ///
    /// Returns distance and surface normal of the entry point. A ray that
    /// starts inside the shape reports nothing.
    pub fn ray_cast(
        &self,
        center: Vec3,
        scale: Vec3,
        ray_origin: Vec3,
        ray_dir: Vec3,
    ) -> Option<(f32, Vec3)> {
        match *self {
            Collider::Box { half_extents } => {
                let half = half_extents * scale.abs();
                let min = center - half;
                let max = center + half;
                if point_in_aabb(ray_origin, min, max) {
                    return None;
                }
                let t = ray_aabb_intersect(ray_origin, ray_dir, min, max)?;
                let normal = aabb_surface_normal(ray_origin + ray_dir * t, min, max);
                Some((t, normal))
            }
            Collider::Sphere { radius } => {
                let r = radius * scale.abs().max_element();
                if (ray_origin - center).length_squared() < r * r {
                    return None;
                }
                let t = ray_sphere_intersect(ray_origin, ray_dir, center, r)?;
                let normal = (ray_origin + ray_dir * t - center).normalize_or_zero();
                Some((t, normal))
            }
        }
    }
}

/// Performs ray-AABB intersection using the slab method.
///
/// # Arguments
///
/// * `ray_origin` - Starting point of the ray
/// * `ray_dir` - Direction of the ray (must be normalized)
/// * `aabb_min` - Minimum corner of the AABB
/// * `aabb_max` - Maximum corner of the AABB
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the nearest intersection (t >= 0)
/// * `None` - No intersection or intersection is behind the ray origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    // Near-zero components get a huge inverse so that axis never limits t
    let inv = |d: f32| if d.abs() > 1e-10 { 1.0 / d } else { f32::MAX * d.signum() };
    let inv_dir = Vec3::new(inv(ray_dir.x), inv(ray_dir.y), inv(ray_dir.z));

    let t1 = (aabb_min - ray_origin) * inv_dir;
    let t2 = (aabb_max - ray_origin) * inv_dir;

    let t_min = t1.min(t2).max_element();
    let t_max = t1.max(t2).min_element();

    if t_max >= t_min && t_max >= 0.0 {
        if t_min >= 0.0 {
            Some(t_min)
        } else {
            // Ray starts inside the AABB
            Some(t_max)
        }
    } else {
        None
    }
}

/// Outward normal of the AABB face closest to `point`.
pub fn aabb_surface_normal(point: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Vec3 {
    let center = (aabb_min + aabb_max) * 0.5;
    let half_extents = ((aabb_max - aabb_min) * 0.5).max(Vec3::splat(1e-6));
    let normalized = (point - center) / half_extents;
    let abs = normalized.abs();

    if abs.x >= abs.y && abs.x >= abs.z {
        Vec3::new(normalized.x.signum(), 0.0, 0.0)
    } else if abs.y >= abs.z {
        Vec3::new(0.0, normalized.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, normalized.z.signum())
    }
}

/// Ray-sphere intersection.
///
/// Solves `|o + t*d - c|² = r²` with `d` normalized, so `a = 1` and the
/// discriminant reduces to `b² - c`.
///
/// Returns the closest positive `t`.
pub fn ray_sphere_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    center: Vec3,
    radius: f32,
) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_disc = discriminant.sqrt();
    let t1 = -b - sqrt_disc;
    let t2 = -b + sqrt_disc;

    if t1 > 0.001 {
        Some(t1)
    } else if t2 > 0.001 {
        Some(t2)
    } else {
        None
    }
}

fn point_in_aabb(point: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> bool {
    point.cmpgt(aabb_min).all() && point.cmplt(aabb_max).all()
}
