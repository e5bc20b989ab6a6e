use bevy::asset::RenderAssetUsages;
use bevy::color::Mix;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use constants::recording::MIN_PATH_POINTS;
use constants::render_settings::{TRAIL_LIFT, TRAIL_LIGHTNESS, TRAIL_SATURATION};
use rand::Rng;

use super::path_store::RecordedPaths;
use super::recorder::PathSavedEvent;

/// Start and end colour of a trail gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPalette {
    pub start: Color,
    pub end: Color,
}

impl TrailPalette {
    /// Two independent random hues at the fixed trail saturation and lightness.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            start: trail_colour(rng.gen_range(0.0..360.0)),
            end: trail_colour(rng.gen_range(0.0..360.0)),
        }
    }
}

fn trail_colour(hue: f32) -> Color {
    Color::hsl(hue, TRAIL_SATURATION, TRAIL_LIGHTNESS)
}

/// Per-index linear interpolation from `start` to `end`.
/// Index 0 is exactly `start`, index `count - 1` exactly `end`.
pub fn gradient_colors(count: usize, start: Color, end: Color) -> Vec<LinearRgba> {
    let start = start.to_linear();
    let end = end.to_linear();
    let divisor = count.saturating_sub(1).max(1) as f32;

    (0..count)
        .map(|i| start.mix(&end, i as f32 / divisor))
        .collect()
}

/// Line strip through `points`, lifted just above the ground, with gradient vertex colours.
pub fn build_trail_mesh(points: &[Vec3], palette: &TrailPalette) -> Option<Mesh> {
    if points.len() < MIN_PATH_POINTS {
        return None;
    }

    let positions: Vec<[f32; 3]> = points
        .iter()
        .map(|p| [p.x, TRAIL_LIFT, p.z])
        .collect();
    let colours: Vec<[f32; 4]> = gradient_colors(points.len(), palette.start, palette.end)
        .into_iter()
        .map(|c| c.to_f32_array())
        .collect();

    let mut mesh = Mesh::new(PrimitiveTopology::LineStrip, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colours);

    Some(mesh)
}

/// Rendered trail of a recorded path.
#[derive(Component, Debug)]
pub struct PathTrail {
    pub id: u32,
}

pub fn spawn_path_trails(
    mut commands: Commands,
    mut saved: EventReader<PathSavedEvent>,
    paths: Res<RecordedPaths>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for event in saved.read() {
        let Some(path) = paths.get(event.id) else {
            warn!("Saved path {} missing from the path store", event.id);
            continue;
        };
        let Some(mesh) = build_trail_mesh(&path.points, &path.palette) else {
            warn!("Not enough points to draw path {}", path.id);
            continue;
        };

        // Vertex colours carry the gradient; white keeps them unmodified.
        commands.spawn((
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::WHITE,
                unlit: true,
                ..default()
            })),
            Transform::IDENTITY,
            PathTrail { id: path.id },
        ));

        info!("Trail spawned for path {} ({} points)", path.id, path.points.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::VertexAttributeValues;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn palette() -> TrailPalette {
        TrailPalette {
            start: Color::srgb(1.0, 0.0, 0.0),
            end: Color::srgb(0.0, 0.0, 1.0),
        }
    }

    #[test]
    fn gradient_endpoints_match_palette() {
        let p = palette();
        let colours = gradient_colors(5, p.start, p.end);

        assert_eq!(colours.len(), 5);
        assert_eq!(colours[0], p.start.to_linear());
        assert_eq!(colours[4], p.end.to_linear());
    }

    #[test]
    fn gradient_midpoint_is_halfway() {
        let colours = gradient_colors(3, Color::BLACK, Color::WHITE);
        let mid = colours[1];

        assert!((mid.red - 0.5).abs() < 1e-6);
        assert!((mid.green - 0.5).abs() < 1e-6);
        assert!((mid.blue - 0.5).abs() < 1e-6);
    }

    #[test]
    fn single_colour_gradient_uses_start() {
        let p = palette();
        let colours = gradient_colors(1, p.start, p.end);
        assert_eq!(colours, vec![p.start.to_linear()]);
        assert!(gradient_colors(0, p.start, p.end).is_empty());
    }

    #[test]
    fn random_palette_has_fixed_saturation_and_lightness() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..16 {
            let palette = TrailPalette::random(&mut rng);
            for colour in [palette.start, palette.end] {
                let hsl = Hsla::from(colour);
                assert!((hsl.saturation - TRAIL_SATURATION).abs() < 1e-3);
                assert!((hsl.lightness - TRAIL_LIGHTNESS).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn trail_mesh_needs_two_points() {
        assert!(build_trail_mesh(&[], &palette()).is_none());
        assert!(build_trail_mesh(&[Vec3::ZERO], &palette()).is_none());
    }

    #[test]
    fn trail_mesh_lifts_points_and_colours_every_vertex() {
        let points = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(2.0, 0.0, -3.0),
        ];
        let mesh = build_trail_mesh(&points, &palette()).unwrap();

        assert_eq!(mesh.primitive_topology(), PrimitiveTopology::LineStrip);

        let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("positions missing");
        };
        assert_eq!(positions.len(), 3);
        assert!(positions.iter().all(|p| p[1] == TRAIL_LIFT));
        assert_eq!(positions[2], [2.0, TRAIL_LIFT, -3.0]);

        let Some(VertexAttributeValues::Float32x4(colours)) = mesh.attribute(Mesh::ATTRIBUTE_COLOR)
        else {
            panic!("colours missing");
        };
        assert_eq!(colours.len(), 3);
        assert_eq!(colours[0], palette().start.to_linear().to_f32_array());
        assert_eq!(colours[2], palette().end.to_linear().to_f32_array());
    }

    #[test]
    fn saved_path_spawns_one_trail() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<RecordedPaths>()
            .add_event::<PathSavedEvent>()
            .add_systems(Update, spawn_path_trails);

        let id = app.world_mut().resource_mut::<RecordedPaths>().push(
            vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 0.0, -1.0)],
            crate::recording::sample_rate::SampleRate::default(),
            palette(),
        );
        app.world_mut().send_event(PathSavedEvent { id });
        app.update();
        app.update();

        let mut trails = app.world_mut().query::<&PathTrail>();
        let ids: Vec<u32> = trails.iter(app.world()).map(|trail| trail.id).collect();
        assert_eq!(ids, vec![id]);
        assert_eq!(app.world().resource::<Assets<Mesh>>().len(), 1);
    }
}

