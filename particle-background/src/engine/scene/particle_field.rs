use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;
use constants::particles::{TRIANGLES_PER_POINT, VERTICES_PER_POINT};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::accent::{AccentColor, particle_material};
use crate::config::BackgroundConfig;

/// Marker for the entity carrying the point cloud mesh.
#[derive(Component)]
pub struct ParticleCloud;

/// Point positions, fixed for the lifetime of the background.
#[derive(Resource, Debug, Clone)]
pub struct ParticleField {
    positions: Box<[Vec3]>,
}

impl ParticleField {
    /// Scatter `count` points uniformly in a cube of side `spread` centred at the origin.
    pub fn generate(count: usize, spread: f32, rng: &mut impl Rng) -> Self {
        let mut sample = || (rng.gen_range(0.0f32..1.0) - 0.5) * spread;
        let positions = (0..count)
            .map(|_| Vec3::new(sample(), sample(), sample()))
            .collect();
        Self { positions }
    }

    pub fn from_config(config: &BackgroundConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::generate(config.particle_count, config.spread, &mut rng)
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Build the cloud geometry: one small octahedron per point, so points keep
    /// a world-space size from every viewing angle.
    pub fn build_mesh(&self, point_size: f32) -> Mesh {
        let radius = point_size * 0.5;
        let tips = [
            Vec3::X,
            Vec3::NEG_X,
            Vec3::Y,
            Vec3::NEG_Y,
            Vec3::Z,
            Vec3::NEG_Z,
        ];
        // Indexes into `tips`, counter-clockwise seen from outside.
        const FACES: [[u32; 3]; TRIANGLES_PER_POINT] = [
            [0, 2, 4],
            [2, 1, 4],
            [1, 3, 4],
            [3, 0, 4],
            [2, 0, 5],
            [1, 2, 5],
            [3, 1, 5],
            [0, 3, 5],
        ];

        let vertex_count = self.len() * VERTICES_PER_POINT;
        let mut positions = Vec::with_capacity(vertex_count);
        let mut normals = Vec::with_capacity(vertex_count);
        let mut indices = Vec::with_capacity(self.len() * TRIANGLES_PER_POINT * 3);

        for (point_index, center) in self.positions.iter().enumerate() {
            let base = (point_index * VERTICES_PER_POINT) as u32;
            for tip in tips {
                positions.push((*center + tip * radius).to_array());
                normals.push(tip.to_array());
            }
            for face in FACES {
                indices.extend(face.iter().map(|corner| base + corner));
            }
        }

        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::RENDER_WORLD,
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_indices(Indices::U32(indices))
    }
}

/// Startup system adding the cloud mesh to the scene.
pub fn spawn_particle_cloud(
    mut commands: Commands,
    field: Res<ParticleField>,
    accent: Res<AccentColor>,
    config: Res<BackgroundConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(field.build_mesh(config.point_size));
    let material = materials.add(particle_material(accent.color, config.opacity));

    commands.spawn((
        Name::new("ParticleCloud"),
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::IDENTITY,
        ParticleCloud,
    ));

    info!(
        "Spawned particle cloud: {} points tinted {}",
        field.len(),
        accent.hex
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_field(count: usize) -> ParticleField {
        let mut rng = StdRng::seed_from_u64(7);
        ParticleField::generate(count, 15.0, &mut rng)
    }

    #[test]
    fn coordinates_stay_inside_half_open_cube() {
        let field = seeded_field(700);
        for position in field.positions() {
            for coordinate in position.to_array() {
                assert!(
                    (-7.5..7.5).contains(&coordinate),
                    "{coordinate} escaped the cube"
                );
            }
        }
    }

    #[test]
    fn default_config_generates_seven_hundred_points() {
        let field = ParticleField::from_config(&BackgroundConfig::default());
        assert_eq!(field.len(), 700);
    }

    #[test]
    fn seed_makes_cloud_reproducible() {
        let config = BackgroundConfig {
            seed: Some(42),
            ..default()
        };
        let first = ParticleField::from_config(&config);
        let second = ParticleField::from_config(&config);
        assert_eq!(first.positions(), second.positions());
    }

    #[test]
    fn mesh_has_an_octahedron_per_point() {
        let field = seeded_field(3);
        let mesh = field.build_mesh(0.02);

        assert_eq!(mesh.count_vertices(), 3 * VERTICES_PER_POINT);
        let Some(Indices::U32(indices)) = mesh.indices() else {
            panic!("expected u32 indices");
        };
        assert_eq!(indices.len(), 3 * TRIANGLES_PER_POINT * 3);
        let vertex_count = 3 * VERTICES_PER_POINT;
        assert!(indices.iter().all(|&i| (i as usize) < vertex_count));
    }

    #[test]
    fn octahedron_tips_surround_their_point() {
        let field = seeded_field(1);
        let center = field.positions()[0];
        let mesh = field.build_mesh(0.02);

        let positions = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|attribute| attribute.as_float3())
            .unwrap();
        for tip in positions {
            let distance = Vec3::from_array(*tip).distance(center);
            assert!((distance - 0.01).abs() < 1e-5);
        }
    }
}
