use raylib::prelude::*;

use crate::framebuffer::Framebuffer;
use crate::grid::Grid;
use crate::player::Player;
use crate::raycast::{Step, cast};
use crate::textures::TextureManager;

const CIRCLE: f32 = std::f32::consts::TAU;

// Oscurecido fijo extra según la orientación del borde golpeado,
// para que las dos familias de paredes se distingan.
const SHADE_ALPHA: [f32; 3] = [0.12, 0.0, 0.2];

/// Franja vertical de pantalla que ocupa una columna de pared proyectada.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSpan {
    pub top: f32,
    pub height: f32,
}

pub struct Camera {
    pub width: u32,
    pub height: u32,
    pub resolution: u32,
    spacing: f32,
    focal_length: f32,
    pub range: f32,
    light_range: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32, resolution: u32, focal_length: f32) -> Self {
        assert!(width > 0 && height > 0, "viewport sin área");
        assert!(resolution > 0, "se necesita al menos una columna");
        assert!(focal_length > 0.0, "distancia focal no positiva");
        Self {
            width,
            height,
            resolution,
            spacing: width as f32 / resolution as f32,
            focal_length,
            range: 14.0,
            light_range: 5.0,
        }
    }

    pub fn render(
        &self,
        player: &Player,
        grid: &Grid,
        texman: &TextureManager,
        fb: &mut Framebuffer,
    ) {
        self.draw_sky(player.direction, grid.light, texman, fb);
        self.draw_columns(player, grid, texman, fb);
    }

    /// Panorama desplazado con la dirección y repetido para que una vuelta
    /// completa cierre sin costura; encima, el baño de luz ambiente sobre la
    /// mitad inferior.
    fn draw_sky(&self, direction: f32, ambient: f32, texman: &TextureManager, fb: &mut Framebuffer) {
        let sky = texman.sky();
        let width = (sky.width() as f32 * (self.height as f32 / sky.height() as f32) * 2.0)
            .ceil() as u32;
        let left = ((direction / CIRCLE) * -(width as f32)).floor() as i32;

        fb.draw_image_slice(sky, 0, 0, sky.width(), sky.height(), left, 0, width, self.height);
        if left + width as i32 < self.width as i32 {
            fb.draw_image_slice(
                sky,
                0,
                0,
                sky.width(),
                sky.height(),
                left + width as i32,
                0,
                width,
                self.height,
            );
        }

        if ambient > 0.0 {
            fb.fill_rect(
                0,
                (self.height / 2) as i32,
                self.width,
                self.height - self.height / 2,
                Color::WHITE,
                ambient * 0.1,
            );
        }
    }

    fn draw_columns(
        &self,
        player: &Player,
        grid: &Grid,
        texman: &TextureManager,
        fb: &mut Framebuffer,
    ) {
        for column in 0..self.resolution {
            let x = column as f32 / self.resolution as f32 - 0.5;
            let angle = x.atan2(self.focal_length);
            let ray = cast(grid, player.pos, player.direction + angle, self.range);
            self.draw_column(column, &ray, angle, texman, fb);
        }
    }

    /// Dibuja el primer impacto del rayo: franja de textura de 1 texel de
    /// ancho estirada a la columna, más niebla negra por distancia.
    fn draw_column(
        &self,
        column: u32,
        ray: &[Step],
        angle: f32,
        texman: &TextureManager,
        fb: &mut Framebuffer,
    ) {
        let Some(hit) = ray.iter().find(|s| s.height > 0.0) else {
            return; // columna sin pared: queda el fondo
        };

        let left = (column as f32 * self.spacing).floor() as i32;
        let width = self.spacing.ceil() as u32;

        let texture = texman.wall(hit.height as u8);
        let texture_x =
            ((texture.width() as f32 * hit.offset) as u32).min(texture.width() - 1);

        let span = self.project(hit.height, angle, hit.distance);
        if !span.height.is_finite() || span.height <= 0.0 {
            return; // z degenerado: mejor saltar la columna que mandar NaN al buffer
        }
        let top = span.top.floor() as i32;
        let height = span.height.ceil() as u32;

        fb.draw_image_slice(texture, texture_x, 0, 1, texture.height(), left, top, width, height);

        let fog = hit.distance / self.light_range;
        fb.fill_rect(left, top, width, height, Color::BLACK, fog.max(0.0));

        let shade = SHADE_ALPHA[hit.shading.min(2) as usize];
        if shade > 0.0 {
            fb.fill_rect(left, top, width, height, Color::BLACK, shade);
        }
    }

    /// Proyección con corrección de ojo de pez: se usa la distancia
    /// perpendicular `z = d·cos(ángulo)`, no la radial.
    pub fn project(&self, height: f32, angle: f32, distance: f32) -> WallSpan {
        let z = distance * angle.cos();
        let wall_height = self.height as f32 * height / z;
        let bottom = self.height as f32 / 2.0 * (1.0 + 1.0 / z);
        WallSpan {
            top: bottom - wall_height,
            height: wall_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(320, 240, 160, 0.8)
    }

    #[test]
    fn project_follows_inverse_distance_law() {
        let cam = camera();
        // ángulo 0: z == distancia, la altura escala como 1/d
        let near = cam.project(1.0, 0.0, 2.0);
        let far = cam.project(1.0, 0.0, 4.0);
        assert!(near.height > far.height);
        assert!((near.height - 240.0 / 2.0).abs() < 1e-3);
        assert!((far.height - 240.0 / 4.0).abs() < 1e-3);
    }

    #[test]
    fn project_corrects_fisheye_with_perpendicular_distance() {
        let cam = camera();
        let angle = 0.5_f32;
        let direct = cam.project(1.0, 0.0, 3.0 * angle.cos());
        let oblique = cam.project(1.0, angle, 3.0);
        assert!((direct.height - oblique.height).abs() < 1e-3);
        assert!((direct.top - oblique.top).abs() < 1e-3);
    }

    #[test]
    fn project_centers_span_around_horizon_at_distance() {
        let cam = camera();
        let span = cam.project(1.0, 0.0, 2.0);
        // top = h/2·(1 + 1/z) - h·1/z  ⇒  para z=2: 240/2·1.5 - 120 = 60
        assert!((span.top - 60.0).abs() < 1e-3);
        assert!((span.height - 120.0).abs() < 1e-3);
    }

    #[test]
    fn project_at_zero_distance_degenerates_without_panicking() {
        let cam = camera();
        let span = cam.project(1.0, 0.0, 0.0);
        // diverge: el llamador lo descarta, pero nunca entra en pánico
        assert!(!span.height.is_finite() || span.height > 0.0);
    }

    #[test]
    fn taller_walls_project_taller_spans() {
        let cam = camera();
        let low = cam.project(1.0, 0.0, 3.0);
        let high = cam.project(2.0, 0.0, 3.0);
        assert!(high.height > low.height);
        assert!(high.top < low.top);
    }

    #[test]
    #[should_panic]
    fn zero_resolution_is_a_construction_error() {
        let _ = Camera::new(320, 240, 0, 0.8);
    }
}
