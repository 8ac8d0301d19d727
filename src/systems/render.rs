//! Raylib renderer for the viewer scene.
//!
//! Draws particle spheres and region cubes through the shared
//! [`Camera3DRes`], then the status text and, with [`DebugMode`], the HUD.

use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::particlemarker::ParticleMarker;
use crate::components::regionmarker::RegionMarker;
use crate::components::scale::Scale;
use crate::components::tint::Tint;
use crate::components::worldposition::WorldPosition;
use crate::resources::camera3d::Camera3DRes;
use crate::resources::debugmode::DebugMode;
use crate::resources::densityplayback::DensityPlayback;
use crate::resources::particleplayback::ParticlePlayback;
use crate::resources::regiongrid::RegionGrid;
use crate::resources::statustext::StatusText;
use crate::resources::worldtime::WorldTime;

/// Draw one frame: orbit the camera, draw markers, then text overlays.
///
/// Everything that needs the ECS world is collected before raylib's drawing
/// scope opens, so the world is never borrowed while drawing.
pub fn render_frame(world: &mut World, rl: &mut RaylibHandle, thread: &RaylibThread) {
    let mut camera = world.resource::<Camera3DRes>().0;
    rl.update_camera(&mut camera, CameraMode::CAMERA_ORBITAL);
    world.resource_mut::<Camera3DRes>().0 = camera;

    let spheres: Vec<(Vector3, f32, Color)> = {
        let mut q = world.query_filtered::<(&WorldPosition, &Scale, &Tint), With<ParticleMarker>>();
        q.iter(world)
            .map(|(p, s, t)| (p.pos, s.size, t.color))
            .collect()
    };

    // Translucent cubes are drawn back to front so alpha blending looks right.
    let mut cubes: Vec<(Vector3, f32, Color)> = {
        let mut q = world.query_filtered::<(&WorldPosition, &Scale, &Tint), With<RegionMarker>>();
        q.iter(world)
            .filter(|(_, _, t)| t.is_visible())
            .map(|(p, s, t)| (p.pos, s.size, t.color))
            .collect()
    };
    let eye = camera.position;
    cubes.sort_by(|a, b| {
        let da = distance_sq(a.0, eye);
        let db = distance_sq(b.0, eye);
        db.total_cmp(&da)
    });

    let debug = world.contains_resource::<DebugMode>();
    let grid = world.get_resource::<RegionGrid>().copied();
    let status = world
        .get_resource::<StatusText>()
        .and_then(|s| s.get().map(str::to_string));
    let hud = if debug { hud_lines(world) } else { Vec::new() };

    let mut d = rl.begin_drawing(thread);
    d.clear_background(Color::RAYWHITE);
    {
        let mut d3 = d.begin_mode3D(camera);
        for (pos, radius, color) in &spheres {
            d3.draw_sphere(*pos, *radius, *color);
        }
        for (pos, size, color) in &cubes {
            d3.draw_cube(*pos, *size, *size, *size, *color);
        }
        if debug {
            if let Some(grid) = grid {
                let w = grid.box_width;
                let h = w * 0.5;
                d3.draw_cube_wires(Vector3::new(h, h, h), w, w, w, Color::DARKGRAY);
            }
        }
    }

    if let Some(text) = status {
        d.draw_text(&text, 10, 10, 20, Color::MAROON);
    }

    if debug {
        let fps = d.get_fps();
        let screen_h = d.get_screen_height();
        d.draw_text(&format!("FPS: {}", fps), 10, screen_h - 20, 10, Color::BLACK);
        for (i, line) in hud.iter().enumerate() {
            d.draw_text(line, 10, 40 + i as i32 * 14, 10, Color::BLACK);
        }
    }
}

fn distance_sq(a: Vector3, b: Vector3) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    dx * dx + dy * dy + dz * dz
}

/// Debug HUD text describing the playback state.
pub fn hud_lines(world: &mut World) -> Vec<String> {
    let entities = world.query::<Entity>().iter(world).count();
    let mut lines = vec![format!("Entities: {}", entities)];
    if let Some(time) = world.get_resource::<WorldTime>() {
        lines.push(format!(
            "Frame {}, world time {:.1}s (x{})",
            time.frame_count, time.elapsed, time.time_scale
        ));
    }
    if let Some(p) = world.get_resource::<ParticlePlayback>() {
        lines.push(format!(
            "Particles [{}] {:?}: frame {}, skipped {}, next in {:.2}s",
            p.file,
            p.phase,
            p.frames_shown,
            p.lines_skipped,
            p.ticker.remaining()
        ));
    }
    if let Some(p) = world.get_resource::<DensityPlayback>() {
        let total = p.frames().map(|f| f.len()).unwrap_or(0);
        let max = p.frames().map(|f| f.max_density()).unwrap_or(0);
        lines.push(format!(
            "Densities [{}] {:?}: frame {}/{}, max {}, next in {:.2}s",
            p.file,
            p.phase,
            p.cursor,
            total,
            max,
            p.ticker.remaining()
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::time::update_world_time;

    #[test]
    fn hud_reports_frame_count_and_speed() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(2.0));
        update_world_time(&mut world, 0.25);
        update_world_time(&mut world, 0.25);

        let lines = hud_lines(&mut world);
        assert!(lines.iter().any(|l| l == "Frame 2, world time 1.0s (x2)"), "{:?}", lines);
    }
}
