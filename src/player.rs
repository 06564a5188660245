use raylib::prelude::*;

use crate::controls::Controls;
use crate::grid::{Cell, Grid};

const CIRCLE: f32 = std::f32::consts::TAU;
const TURN_SPEED: f32 = std::f32::consts::PI; // rad/s
const WALK_SPEED: f32 = 3.0; // celdas/s

pub struct Player {
    pub pos: Vector2,
    pub direction: f32, // radianes, siempre en [0, 2π)
    pub paces: f32,     // distancia acumulada, para animación/pasos
}

impl Player {
    pub fn new(x: f32, y: f32, direction: f32) -> Self {
        Self {
            pos: Vector2::new(x, y),
            direction: direction.rem_euclid(CIRCLE),
            paces: 0.0,
        }
    }

    pub fn rotate(&mut self, angle: f32) {
        self.direction = (self.direction + angle).rem_euclid(CIRCLE);
    }

    /// Avanza `distance` sobre la dirección actual. Cada eje se aplica por
    /// separado y solo si la celda destino sobre ese eje está libre: así el
    /// jugador se desliza pegado a la pared en vez de frenarse en seco.
    pub fn walk(&mut self, distance: f32, grid: &Grid) {
        let dx = self.direction.cos() * distance;
        let dy = self.direction.sin() * distance;
        if grid.get(self.pos.x + dx, self.pos.y) == Cell::Empty {
            self.pos.x += dx;
        }
        if grid.get(self.pos.x, self.pos.y + dy) == Cell::Empty {
            self.pos.y += dy;
        }
        self.paces += distance;
    }

    pub fn update(&mut self, controls: &Controls, grid: &Grid, seconds: f32) {
        if controls.left {
            self.rotate(-TURN_SPEED * seconds);
        }
        if controls.right {
            self.rotate(TURN_SPEED * seconds);
        }
        if controls.forward {
            self.walk(WALK_SPEED * seconds, grid);
        }
        if controls.backward {
            self.walk(-WALK_SPEED * seconds, grid);
        }
    }
}
