use bevy::ecs::system::SystemParam;
use bevy::math::{Affine3A, Ray3d};
use bevy::prelude::*;

use super::components::Hidden;

const PARALLEL_EPSILON: f32 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColliderShape {
    Cuboid { half_extents: Vec3 },
    Sphere { radius: f32 },
}

/// Ray-hittable volume in the entity's local frame. Rotation and scale come from the
/// entity's [`Transform`].
#[derive(Component, Clone, Copy, Debug, PartialEq)]
#[require(Transform, CollisionLayers)]
pub struct Collider {
    pub shape: ColliderShape,
    pub offset: Vec3,
}

impl Collider {
    pub fn cuboid(half_extents: Vec3) -> Self {
        Self {
            shape: ColliderShape::Cuboid { half_extents },
            offset: Vec3::ZERO,
        }
    }

    pub fn sphere(radius: f32) -> Self {
        Self {
            shape: ColliderShape::Sphere { radius },
            offset: Vec3::ZERO,
        }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// Center and full width along local X, for cuboids only.
    pub fn extent_x(&self) -> Option<(f32, f32)> {
        match self.shape {
            ColliderShape::Cuboid { half_extents } => {
                Some((self.offset.x, half_extents.x * 2.0))
            }
            ColliderShape::Sphere { .. } => None,
        }
    }

    /// Distance along `ray` to this collider, or `None` if missed or farther than
    /// `max_distance`. A ray starting inside the collider reports `0.0`.
    pub fn cast_ray(&self, transform: &Transform, ray: Ray3d, max_distance: f32) -> Option<f32> {
        let affine = transform.compute_affine();
        if !affine.matrix3.determinant().is_normal() {
            return None;
        }
        let inverse: Affine3A = affine.inverse();

        // `local_dir` is left unnormalized so `t` stays a world-space distance.
        let local_origin = inverse.transform_point3(ray.origin) - self.offset;
        let local_dir = inverse.transform_vector3(*ray.direction);

        let t = match self.shape {
            ColliderShape::Cuboid { half_extents } => {
                ray_aabb(local_origin, local_dir, half_extents)
            }
            ColliderShape::Sphere { radius } => ray_sphere(local_origin, local_dir, radius),
        }?;

        (t <= max_distance).then_some(t)
    }
}

fn ray_aabb(origin: Vec3, dir: Vec3, half_extents: Vec3) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        let h = half_extents[axis];

        if d.abs() < PARALLEL_EPSILON {
            if o < -h || o > h {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t1 = (-h - o) * inv;
        let mut t2 = (h - o) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }
        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_min > t_max {
            return None;
        }
    }

    if t_max < 0.0 {
        return None;
    }
    Some(t_min.max(0.0))
}

fn ray_sphere(origin: Vec3, dir: Vec3, radius: f32) -> Option<f32> {
    let c = origin.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }

    let a = dir.length_squared();
    let b = 2.0 * origin.dot(dir);
    let discriminant = b * b - 4.0 * a * c;
    if a < PARALLEL_EPSILON || discriminant < 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    (t >= 0.0).then_some(t)
}

/// Bitmask of the layers an entity belongs to.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionLayers(pub u32);

impl CollisionLayers {
    pub const DEFAULT: CollisionLayers = CollisionLayers(1);
    pub const UI: CollisionLayers = CollisionLayers(1 << 1);
}

impl Default for CollisionLayers {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub point: Vec3,
    pub distance: f32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RayFilter<'a> {
    pub exclude_layers: u32,
    pub exclude_entities: &'a [Entity],
}

impl RayFilter<'_> {
    fn accepts(&self, entity: Entity, layers: CollisionLayers) -> bool {
        layers.0 & self.exclude_layers == 0 && !self.exclude_entities.contains(&entity)
    }
}

/// The nearest hit at a positive distance. Zero-distance hits come from rays that start
/// inside a collider and never count.
pub fn select_primary_hit(hits: &[RayHit]) -> Option<RayHit> {
    hits.iter()
        .filter(|hit| hit.distance > 0.0)
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
        .copied()
}

/// Read-only scene query over every visible collider.
#[derive(SystemParam)]
pub struct SceneRaycast<'w, 's> {
    colliders: Query<
        'w,
        's,
        (Entity, &'static Transform, &'static Collider, &'static CollisionLayers),
        Without<Hidden>,
    >,
}

impl SceneRaycast<'_, '_> {
    /// Every hit along the ray within `max_distance`, nearest first, including
    /// zero-distance hits.
    pub fn raycast_all(&self, ray: Ray3d, max_distance: f32, filter: RayFilter) -> Vec<RayHit> {
        let mut hits: Vec<RayHit> = self
            .colliders
            .iter()
            .filter(|(entity, _, _, layers)| filter.accepts(*entity, **layers))
            .filter_map(|(entity, transform, collider, _)| {
                collider
                    .cast_ray(transform, ray, max_distance)
                    .map(|distance| RayHit {
                        entity,
                        point: ray.get_point(distance),
                        distance,
                    })
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    pub fn raycast(&self, ray: Ray3d, max_distance: f32, filter: RayFilter) -> Option<RayHit> {
        select_primary_hit(&self.raycast_all(ray, max_distance, filter))
    }
}
