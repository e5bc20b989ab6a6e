use bevy::pbr::light_consts;
use bevy::prelude::*;
use constants::render_settings::BACKGROUND_COLOUR;
use constants::scene::{
    CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_START, CUBE_COLOUR, CUBE_POSITION,
    CUBE_SIZE, FILL_LIGHT_COLOUR, GROUND_COLOUR, GROUND_LIGHT_COLOUR, GROUND_ROUGHNESS,
    GROUND_SIZE, SKY_LIGHT_COLOUR,
};

/// The camera the player walks with and the recorder samples.
#[derive(Component)]
pub struct PlayerCamera;

#[derive(Component)]
pub struct Ground;

#[derive(Component)]
pub struct MarkerCube;

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    println!("=== TRAIL VIEWER ===");

    commands.insert_resource(ClearColor(BACKGROUND_COLOUR));
    spawn_lighting(&mut commands);
    spawn_ground(&mut commands, &mut meshes, &mut materials);
    spawn_marker_cube(&mut commands, &mut meshes, &mut materials);
    spawn_player_camera(&mut commands);
}

/// Sky/ground hemisphere approximated by a blended ambient term and an overhead key light.
fn spawn_lighting(commands: &mut Commands) {
    let sky = SKY_LIGHT_COLOUR.to_linear();
    let ground = GROUND_LIGHT_COLOUR.to_linear();
    let fill = FILL_LIGHT_COLOUR.to_linear();
    let ambient = (sky + ground) * 0.5 + fill * 0.5;

    commands.insert_resource(AmbientLight {
        color: Color::LinearRgba(ambient),
        brightness: 400.0,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            color: SKY_LIGHT_COLOUR,
            illuminance: light_consts::lux::OVERCAST_DAY,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_3,
        )),
    ));
}

fn spawn_ground(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: GROUND_COLOUR,
            perceptual_roughness: GROUND_ROUGHNESS,
            ..default()
        })),
        Transform::IDENTITY,
        Ground,
    ));
}

fn spawn_marker_cube(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::from_length(CUBE_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: CUBE_COLOUR,
            ..default()
        })),
        Transform::from_translation(CUBE_POSITION),
        MarkerCube,
    ));
}

fn spawn_player_camera(commands: &mut Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Transform::from_translation(CAMERA_START),
        PlayerCamera,
    ));
}
