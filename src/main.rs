// main.rs
#![allow(unused_imports)]
#![allow(dead_code)]

mod audio_manager;
mod camera;
mod controls;
mod framebuffer;
mod grid;
mod player;
mod raycast;
mod textures;

use std::thread;
use std::time::Duration;

use raylib::prelude::*;

use audio_manager::AudioManager;
use camera::Camera;
use controls::Controls;
use framebuffer::Framebuffer;
use grid::Grid;
use player::Player;
use raycast::cast;
use textures::TextureManager;

const WINDOW_WIDTH: i32 = 960;
const WINDOW_HEIGHT: i32 = 540;
const RESOLUTION: u32 = 320;
const FOCAL_LENGTH: f32 = 0.8;
const GRID_SIZE: usize = 32;
const WALL_PROBABILITY: f32 = 0.3;
// Un cuadro con un salto de tiempo así de grande (ventana en segundo plano)
// se descarta completo: ni estado ni render.
const MAX_FRAME_SECONDS: f32 = 0.2;

fn draw_cell(framebuffer: &mut Framebuffer, xo: usize, yo: usize, block_size: usize) {
    framebuffer.set_current_color(Color::RED);
    for x in xo..xo + block_size {
        for y in yo..yo + block_size {
            framebuffer.set_pixel(x as u32, y as u32);
        }
    }
}

/// Vista cenital de depuración: celdas ocupadas, jugador y abanico de rayos.
fn render_map(framebuffer: &mut Framebuffer, grid: &Grid, player: &Player, camera: &Camera) {
    let cell_px = (framebuffer.height as usize / grid.size).max(1);

    for y in 0..grid.size {
        for x in 0..grid.size {
            if grid.get(x as f32, y as f32).is_wall() {
                draw_cell(framebuffer, x * cell_px, y * cell_px, cell_px);
            }
        }
    }

    // abanico de rayos: un punto por cruce hasta la primera pared
    framebuffer.set_current_color(Color::WHITE);
    let num_rays = 25;
    for i in 0..num_rays {
        let t = i as f32 / (num_rays - 1) as f32;
        let angle = (t - 0.5).atan2(FOCAL_LENGTH);
        let ray = cast(grid, player.pos, player.direction + angle, camera.range);
        for step in ray.iter().skip(1) {
            framebuffer.set_pixel(
                (step.x * cell_px as f32) as u32,
                (step.y * cell_px as f32) as u32,
            );
            if step.height != 0.0 {
                break; // pared o borde del mapa
            }
        }
    }

    let px = (player.pos.x * cell_px as f32) as i32;
    let py = (player.pos.y * cell_px as f32) as i32;
    framebuffer.fill_rect(px - 1, py - 1, 3, 3, Color::YELLOW, 1.0);
}

fn main() {
    let (mut window, raylib_thread) = raylib::init()
        .size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .title("Maze Raycaster")
        .build();

    let texman = TextureManager::new();
    let mut audio = AudioManager::new();
    let mut framebuffer = Framebuffer::new(WINDOW_WIDTH as u32, WINDOW_HEIGHT as u32);
    framebuffer.set_background_color(Color::new(18, 18, 24, 255));

    let mut grid = Grid::new(GRID_SIZE);
    grid.randomize(&mut rand::thread_rng(), WALL_PROBABILITY);
    // bolsillo inicial libre: el jugador no puede nacer dentro de una pared
    // ni encerrado entre sus dos vecinas
    grid.set(1, 1, 0);
    grid.set(2, 1, 0);
    grid.set(1, 2, 0);
    let mut player = Player::new(1.5, 1.5, std::f32::consts::PI * 0.3);

    let camera = Camera::new(
        WINDOW_WIDTH as u32,
        WINDOW_HEIGHT as u32,
        RESOLUTION,
        FOCAL_LENGTH,
    );

    // Vista: 3D (raycaster) o mapa cenital con M
    let mut map_view = false;

    while !window.window_should_close() {
        if window.is_key_pressed(KeyboardKey::KEY_M) {
            map_view = !map_view;
        }

        let seconds = window.get_frame_time();
        let controls = Controls::poll(&window);

        if seconds < MAX_FRAME_SECONDS {
            grid.update(seconds);
            player.update(&controls, &grid, seconds);

            framebuffer.clear();
            if map_view {
                render_map(&mut framebuffer, &grid, &player, &camera);
            } else {
                camera.render(&player, &grid, &texman, &mut framebuffer);
            }
        }

        if let Some(a) = audio.as_mut() {
            a.update(player.paces);
        }

        let fps_now = window.get_fps();

        {
            let mut d = window.begin_drawing(&raylib_thread);
            d.clear_background(Color::BLACK);

            for y in 0..framebuffer.height {
                for x in 0..framebuffer.width {
                    let color = framebuffer.color_buffer[(y * framebuffer.width + x) as usize];
                    if color != framebuffer.background_color {
                        d.draw_pixel(x as i32, y as i32, color);
                    }
                }
            }

            d.draw_text(&format!("FPS: {}", fps_now), 10, 10, 20, Color::WHITE);
            if map_view {
                d.draw_text("MAPA", 10, 40, 20, Color::YELLOW);
            }
        }

        // ~60 FPS (16 ms)
        thread::sleep(Duration::from_millis(16));
    }
}
