use raylib::prelude::*;

use crate::textures::Pixmap;

pub struct Framebuffer {
    pub color_buffer: Vec<Color>,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    pub current_color: Color,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "framebuffer sin área");
        let size = (width * height) as usize;
        let bg = Color::BLACK;
        Self {
            color_buffer: vec![bg; size],
            width,
            height,
            background_color: bg,
            current_color: Color::WHITE,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.color_buffer.fill(self.background_color);
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32) {
        if x < self.width && y < self.height {
            self.color_buffer[(y * self.width + x) as usize] = self.current_color;
        }
    }

    #[inline]
    pub fn set_pixel_color(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            self.color_buffer[(y * self.width + x) as usize] = color;
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        if x < self.width && y < self.height {
            return self.color_buffer[(y * self.width + x) as usize];
        }
        self.background_color
    }

    #[inline] pub fn set_current_color(&mut self, c: Color) { self.current_color = c; }
    #[inline] pub fn set_background_color(&mut self, c: Color) { self.background_color = c; }

    /// Copia un sub-rectángulo del pixmap estirado al rectángulo destino
    /// (vecino más cercano), recortando contra los bordes de la pantalla.
    /// El destino puede quedar parcial o totalmente fuera.
    pub fn draw_image_slice(
        &mut self,
        src: &Pixmap,
        src_x: u32,
        src_y: u32,
        src_w: u32,
        src_h: u32,
        dst_x: i32,
        dst_y: i32,
        dst_w: u32,
        dst_h: u32,
    ) {
        if src_w == 0 || src_h == 0 || dst_w == 0 || dst_h == 0 {
            return;
        }
        let y0 = if dst_y < 0 { (-(dst_y as i64)) as u32 } else { 0 };
        let y1 = dst_h.min((self.height as i64 - dst_y as i64).clamp(0, u32::MAX as i64) as u32);
        let x0 = if dst_x < 0 { (-(dst_x as i64)) as u32 } else { 0 };
        let x1 = dst_w.min((self.width as i64 - dst_x as i64).clamp(0, u32::MAX as i64) as u32);

        for dy in y0..y1 {
            let py = (dst_y as i64 + dy as i64) as u32;
            let ty = src_y + ((dy as u64 * src_h as u64) / dst_h as u64) as u32;
            for dx in x0..x1 {
                let px = (dst_x as i64 + dx as i64) as u32;
                let tx = src_x + ((dx as u64 * src_w as u64) / dst_w as u64) as u32;
                self.color_buffer[(py * self.width + px) as usize] = src.sample(tx, ty);
            }
        }
    }

    /// Rellena un rectángulo mezclando `color` sobre lo ya dibujado.
    /// `alpha` se satura a [0,1]; 0 no hace nada, 1 pinta sólido.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color, alpha: f32) {
        let a = alpha.clamp(0.0, 1.0);
        if a <= 0.0 || w == 0 || h == 0 {
            return;
        }
        let t = (a * 255.0) as u8;
        let y0 = if y < 0 { (-(y as i64)) as u32 } else { 0 };
        let y1 = h.min((self.height as i64 - y as i64).clamp(0, u32::MAX as i64) as u32);
        let x0 = if x < 0 { (-(x as i64)) as u32 } else { 0 };
        let x1 = w.min((self.width as i64 - x as i64).clamp(0, u32::MAX as i64) as u32);

        for dy in y0..y1 {
            let py = (y as i64 + dy as i64) as u32;
            for dx in x0..x1 {
                let px = (x as i64 + dx as i64) as u32;
                let i = (py * self.width + px) as usize;
                self.color_buffer[i] = mix(self.color_buffer[i], color, t);
            }
        }
    }
}

#[inline]
fn mix(a: Color, b: Color, t: u8) -> Color {
    let ta = t as u16;
    let na = 255u16 - ta;
    let mixc = |x: u8, y: u8| -> u8 { (((x as u16) * na + (y as u16) * ta) / 255) as u8 };
    Color::new(mixc(a.r, b.r), mixc(a.g, b.g), mixc(a.b, b.b), 255)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rect_full_alpha_paints_solid() {
        let mut fb = Framebuffer::new(8, 8);
        fb.fill_rect(2, 2, 3, 3, Color::RED, 1.0);
        assert_eq!(fb.get_pixel(2, 2), Color::new(255, 0, 0, 255));
        assert_eq!(fb.get_pixel(4, 4), Color::new(255, 0, 0, 255));
        assert_eq!(fb.get_pixel(5, 5), Color::BLACK);
    }

    #[test]
    fn fill_rect_zero_alpha_is_noop() {
        let mut fb = Framebuffer::new(4, 4);
        fb.set_pixel_color(1, 1, Color::GREEN);
        fb.fill_rect(0, 0, 4, 4, Color::RED, 0.0);
        assert_eq!(fb.get_pixel(1, 1), Color::GREEN);
    }

    #[test]
    fn fill_rect_clips_outside_screen() {
        let mut fb = Framebuffer::new(4, 4);
        // no debe entrar en pánico ni escribir fuera del buffer
        fb.fill_rect(-10, -10, 100, 100, Color::WHITE, 1.0);
        assert_eq!(fb.get_pixel(0, 0), Color::WHITE);
        assert_eq!(fb.get_pixel(3, 3), Color::WHITE);
    }

    #[test]
    fn draw_image_slice_stretches_one_column() {
        let px = vec![Color::RED, Color::BLUE, Color::RED, Color::BLUE];
        let src = Pixmap::new(2, 2, px); // columnas: [RED,RED] y [BLUE,BLUE]
        let mut fb = Framebuffer::new(4, 4);
        fb.draw_image_slice(&src, 1, 0, 1, 2, 2, 0, 1, 4);
        for y in 0..4 {
            assert_eq!(fb.get_pixel(2, y), Color::BLUE);
            assert_eq!(fb.get_pixel(1, y), Color::BLACK);
        }
    }

    #[test]
    fn draw_image_slice_clips_negative_destination() {
        let src = Pixmap::new(1, 1, vec![Color::WHITE]);
        let mut fb = Framebuffer::new(4, 4);
        fb.draw_image_slice(&src, 0, 0, 1, 1, -2, -2, 4, 4);
        assert_eq!(fb.get_pixel(0, 0), Color::WHITE);
        assert_eq!(fb.get_pixel(1, 1), Color::WHITE);
        assert_eq!(fb.get_pixel(3, 3), Color::BLACK);
    }
}
