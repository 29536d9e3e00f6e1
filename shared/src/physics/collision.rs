use bevy::math::{bounding::Aabb3d, Affine3A, Dir3, Vec3};
use bevy_log::debug;
use parry3d::math::{Isometry, Point, Real, Vector};
use parry3d::na::{Quaternion, UnitQuaternion};
use parry3d::query::{PointQuery, Ray, RayCast};
use parry3d::shape::{Cuboid, TriMesh};

/// Nearest intersection of a ray with a collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin in world units.
    pub distance: f32,
    pub point: Vec3,
    pub normal: Vec3,
}

/// Anything a ray can be cast against.
pub trait Collider {
    /// Casts a ray from `origin` along `direction`, which does not need to be
    /// normalized. A zero-length direction never hits.
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;
}

fn point(v: Vec3) -> Point<Real> {
    Point::new(v.x, v.y, v.z)
}

fn vector(v: Vec3) -> Vector<Real> {
    Vector::new(v.x, v.y, v.z)
}

/// Casts against any parry shape placed at `iso`.
fn cast_shape(
    shape: &impl RayCast,
    iso: &Isometry<Real>,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
) -> Option<RayHit> {
    let dir = Dir3::new(direction).ok()?;
    let ray = Ray::new(point(origin), vector(*dir));
    let hit = shape.cast_ray_and_get_normal(iso, &ray, max_distance, true)?;
    let distance = hit.time_of_impact;
    Some(RayHit {
        distance,
        point: origin + *dir * distance,
        normal: Vec3::new(hit.normal.x, hit.normal.y, hit.normal.z).normalize_or_zero(),
    })
}

/// World-space triangle soup, queried through a parry [`TriMesh`] that is
/// rebuilt whenever triangles are added.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    triangles: Vec<[Vec3; 3]>,
    shape: Option<TriMesh>,
}

impl TriangleMesh {
    pub fn from_triangles(triangles: Vec<[Vec3; 3]>) -> Self {
        let mut mesh = Self::default();
        mesh.extend(triangles);
        mesh
    }

    /// Builds triangles from an indexed vertex buffer, moving every vertex
    /// into world space with `transform`.
    pub fn from_indexed(
        positions: &[[f32; 3]],
        indices: impl IntoIterator<Item = usize>,
        transform: &Affine3A,
    ) -> Self {
        let world: Vec<Vec3> = positions
            .iter()
            .map(|p| transform.transform_point3(Vec3::from(*p)))
            .collect();
        let mut triangles = Vec::new();
        let mut corners = indices.into_iter();
        while let (Some(a), Some(b), Some(c)) = (corners.next(), corners.next(), corners.next()) {
            if let (Some(a), Some(b), Some(c)) = (world.get(a), world.get(b), world.get(c)) {
                triangles.push([*a, *b, *c]);
            }
        }
        Self::from_triangles(triangles)
    }

    pub fn extend(&mut self, triangles: impl IntoIterator<Item = [Vec3; 3]>) {
        let before = self.triangles.len();
        self.triangles.extend(triangles);
        if self.triangles.len() != before {
            self.rebuild();
        }
    }

    pub fn append(&mut self, other: TriangleMesh) {
        self.extend(other.triangles);
    }

    fn rebuild(&mut self) {
        let vertices: Vec<Point<Real>> = self.triangles.iter().flatten().map(|v| point(*v)).collect();
        let indices: Vec<[u32; 3]> = (0..self.triangles.len() as u32)
            .map(|i| [3 * i, 3 * i + 1, 3 * i + 2])
            .collect();
        self.shape = match TriMesh::new(vertices, indices) {
            Ok(shape) => Some(shape),
            Err(e) => {
                debug!("Triangle mesh has no usable shape: {:?}", e);
                None
            }
        };
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn bounds(&self) -> Option<Aabb3d> {
        let aabb = self.shape.as_ref()?.local_aabb();
        Some(Aabb3d {
            min: Vec3::new(aabb.mins.x, aabb.mins.y, aabb.mins.z).into(),
            max: Vec3::new(aabb.maxs.x, aabb.maxs.y, aabb.maxs.z).into(),
        })
    }
}

impl Collider for TriangleMesh {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let shape = self.shape.as_ref()?;
        cast_shape(shape, &Isometry::identity(), origin, direction, max_distance)
    }
}

/// Axis-aligned box in its own local space, placed in the world by an affine
/// transform that may rotate and scale it.
///
/// Queries run on a parry [`Cuboid`] with the scale baked into its half
/// extents, so the transform must not shear.
#[derive(Debug, Clone, Copy)]
pub struct OrientedBox {
    local: Aabb3d,
    to_world: Affine3A,
    to_local: Affine3A,
    cuboid: Cuboid,
    iso: Isometry<Real>,
}

impl OrientedBox {
    pub fn new(local_min: Vec3, local_max: Vec3, to_world: Affine3A) -> Self {
        let min = local_min.min(local_max);
        let max = local_min.max(local_max);
        let (scale, rotation, _) = to_world.to_scale_rotation_translation();
        let center = to_world.transform_point3((min + max) / 2.0);
        let half = (max - min) / 2.0 * scale.abs();
        let rotation = UnitQuaternion::from_quaternion(Quaternion::new(
            rotation.w, rotation.x, rotation.y, rotation.z,
        ));

        Self {
            local: Aabb3d {
                min: min.into(),
                max: max.into(),
            },
            to_world,
            to_local: to_world.inverse(),
            cuboid: Cuboid::new(vector(half)),
            iso: Isometry::from_parts(vector(center).into(), rotation),
        }
    }

    /// Tightest box around `points`, which are given in local space.
    pub fn from_local_points(
        points: impl IntoIterator<Item = Vec3>,
        to_world: Affine3A,
    ) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self::new(min, max, to_world))
    }

    pub fn local_min(&self) -> Vec3 {
        self.local.min.into()
    }

    pub fn local_max(&self) -> Vec3 {
        self.local.max.into()
    }

    pub fn to_world(&self) -> &Affine3A {
        &self.to_world
    }

    pub fn local_point(&self, world: Vec3) -> Vec3 {
        self.to_local.transform_point3(world)
    }

    pub fn world_point(&self, local: Vec3) -> Vec3 {
        self.to_world.transform_point3(local)
    }

    /// True if the sphere at `center` with world-space `radius` touches the box.
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.cuboid.distance_to_point(&self.iso, &point(center), true) <= radius
    }

    /// The box surface as twelve world-space triangles, so props can join a
    /// [`TriangleMesh`].
    pub fn triangles(&self) -> Vec<[Vec3; 3]> {
        let (min, max) = (self.local_min(), self.local_max());
        let corner = |i: usize| {
            self.world_point(Vec3::new(
                if i & 1 == 0 { min.x } else { max.x },
                if i & 2 == 0 { min.y } else { max.y },
                if i & 4 == 0 { min.z } else { max.z },
            ))
        };
        const FACES: [[usize; 4]; 6] = [
            [0, 2, 4, 6],
            [1, 3, 5, 7],
            [0, 1, 4, 5],
            [2, 3, 6, 7],
            [0, 1, 2, 3],
            [4, 5, 6, 7],
        ];
        FACES
            .iter()
            .flat_map(|[a, b, c, d]| {
                [
                    [corner(*a), corner(*b), corner(*c)],
                    [corner(*c), corner(*b), corner(*d)],
                ]
            })
            .collect()
    }
}

impl Collider for OrientedBox {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        cast_shape(&self.cuboid, &self.iso, origin, direction, max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Quat;
    use std::f32::consts::FRAC_PI_2;

    /// Two triangles forming a 10x10 floor at y = 0.
    fn floor() -> TriangleMesh {
        let a = Vec3::new(-5.0, 0.0, -5.0);
        let b = Vec3::new(5.0, 0.0, -5.0);
        let c = Vec3::new(-5.0, 0.0, 5.0);
        let d = Vec3::new(5.0, 0.0, 5.0);
        TriangleMesh::from_triangles(vec![[a, c, b], [b, c, d]])
    }

    #[test]
    fn test_ray_hits_floor_from_above() {
        let hit = floor()
            .cast_ray(Vec3::new(1.0, 3.0, 1.0), Vec3::NEG_Y, 10.0)
            .expect("should hit floor");
        assert!((hit.distance - 3.0).abs() < 1e-5);
        assert!((hit.point.y).abs() < 1e-5);
        assert!((hit.normal.y.abs() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_direction_need_not_be_normalized() {
        let hit = floor()
            .cast_ray(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, -0.1, 0.0), 10.0)
            .expect("should hit floor");
        assert!((hit.distance - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_misses_outside_and_beyond_range() {
        let mesh = floor();
        assert!(mesh.cast_ray(Vec3::new(20.0, 3.0, 0.0), Vec3::NEG_Y, 10.0).is_none());
        assert!(mesh.cast_ray(Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Y, 2.0).is_none());
        assert!(mesh.cast_ray(Vec3::new(0.0, 3.0, 0.0), Vec3::Y, 10.0).is_none());
        assert!(mesh.cast_ray(Vec3::new(0.0, 3.0, 0.0), Vec3::ZERO, 10.0).is_none());
    }

    #[test]
    fn test_nearest_triangle_wins() {
        let mut mesh = floor();
        let y = 1.0;
        mesh.extend([[
            Vec3::new(-5.0, y, -5.0),
            Vec3::new(-5.0, y, 5.0),
            Vec3::new(5.0, y, -5.0),
        ]]);
        let hit = mesh.cast_ray(Vec3::new(-1.0, 3.0, -1.0), Vec3::NEG_Y, 10.0).unwrap();
        assert!((hit.point.y - y).abs() < 1e-5);
    }

    #[test]
    fn test_from_indexed_applies_transform() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        let transform = Affine3A::from_scale_rotation_translation(
            Vec3::splat(10.0),
            Quat::IDENTITY,
            Vec3::new(0.0, -4.0, 0.0),
        );
        let mesh = TriangleMesh::from_indexed(&positions, [0, 2, 1, 7, 8], &transform);
        assert_eq!(mesh.len(), 1);
        let hit = mesh.cast_ray(Vec3::new(2.0, 0.0, 2.0), Vec3::NEG_Y, 10.0).unwrap();
        assert!((hit.point.y + 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_box_ray_distance_is_in_world_units() {
        // unit box scaled up 4x and moved 10 units along x
        let to_world = Affine3A::from_scale_rotation_translation(
            Vec3::splat(4.0),
            Quat::IDENTITY,
            Vec3::new(10.0, 0.0, 0.0),
        );
        let b = OrientedBox::new(Vec3::splat(-0.5), Vec3::splat(0.5), to_world);
        let hit = b.cast_ray(Vec3::ZERO, Vec3::X, 100.0).unwrap();
        assert!((hit.distance - 8.0).abs() < 1e-4);
        assert!((hit.normal - Vec3::NEG_X).length() < 1e-4);
        assert!(b.cast_ray(Vec3::ZERO, Vec3::X, 7.0).is_none());
    }

    #[test]
    fn test_rotated_box() {
        let to_world = Affine3A::from_rotation_translation(
            Quat::from_rotation_y(FRAC_PI_2),
            Vec3::new(0.0, 0.0, -5.0),
        );
        // 2 wide along local x, so 2 deep along world z after the rotation
        let b = OrientedBox::new(Vec3::new(-1.0, -1.0, -0.1), Vec3::new(1.0, 1.0, 0.1), to_world);
        let hit = b.cast_ray(Vec3::ZERO, Vec3::NEG_Z, 100.0).unwrap();
        assert!((hit.distance - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_box_sphere() {
        let b = OrientedBox::new(Vec3::splat(-1.0), Vec3::splat(1.0), Affine3A::IDENTITY);
        assert!(b.intersects_sphere(Vec3::ZERO, 0.1));
        assert!(b.intersects_sphere(Vec3::new(2.5, 0.0, 0.0), 1.5));
        assert!(!b.intersects_sphere(Vec3::new(2.5, 0.0, 0.0), 1.0));
    }

    #[test]
    fn test_box_triangles_block_like_the_box() {
        let volume = OrientedBox::new(
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
            Affine3A::from_translation(Vec3::new(0.0, 0.0, 5.0)),
        );
        let mesh = TriangleMesh::from_triangles(volume.triangles());
        assert_eq!(mesh.len(), 12);
        let hit = mesh.cast_ray(Vec3::new(0.3, 0.2, 0.0), Vec3::Z, 10.0).unwrap();
        assert!((hit.distance - 4.0).abs() < 1e-5);
        let hit = mesh.cast_ray(Vec3::new(0.5, 10.0, 5.5), Vec3::NEG_Y, 20.0).unwrap();
        assert!((hit.distance - 9.0).abs() < 1e-5);
    }

    #[test]
    fn test_box_from_points() {
        let b = OrientedBox::from_local_points(
            [Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, 5.0, 0.0)],
            Affine3A::IDENTITY,
        )
        .unwrap();
        assert_eq!(b.local_min(), Vec3::new(-1.0, 2.0, 0.0));
        assert_eq!(b.local_max(), Vec3::new(1.0, 5.0, 3.0));
        assert!(OrientedBox::from_local_points([], Affine3A::IDENTITY).is_none());
    }

    #[test]
    fn test_mesh_grows_after_extend() {
        let mut mesh = TriangleMesh::default();
        assert!(mesh.bounds().is_none());
        assert!(mesh.cast_ray(Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Y, 10.0).is_none());

        mesh.append(floor());
        let bounds = mesh.bounds().unwrap();
        assert_eq!(Vec3::from(bounds.min), Vec3::new(-5.0, 0.0, -5.0));
        assert!(mesh.cast_ray(Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Y, 10.0).is_some());
    }

    #[test]
    fn test_stretched_box_sphere_uses_world_extents() {
        // 1 unit cube stretched to 6 units along x
        let to_world = Affine3A::from_scale(Vec3::new(6.0, 1.0, 1.0));
        let b = OrientedBox::new(Vec3::splat(-0.5), Vec3::splat(0.5), to_world);
        assert!(b.intersects_sphere(Vec3::new(3.2, 0.0, 0.0), 0.3));
        assert!(!b.intersects_sphere(Vec3::new(0.0, 0.0, 0.9), 0.3));
        let hit = b.cast_ray(Vec3::new(-10.0, 0.0, 0.0), Vec3::X, 20.0).unwrap();
        assert!((hit.distance - 7.0).abs() < 1e-4);
    }
}
