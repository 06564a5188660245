use raylib::prelude::*;
use std::collections::HashMap;

/// Un pixmap inmutable (CPU) para samplear por pixel sin &mut Image.
#[derive(Clone)]
pub struct Pixmap {
    w: u32,
    h: u32,
    px: Vec<Color>,
}

impl Pixmap {
    pub fn new(w: u32, h: u32, px: Vec<Color>) -> Self {
        Self { w, h, px }
    }

    #[inline]
    pub fn width(&self) -> u32 { self.w }
    #[inline]
    pub fn height(&self) -> u32 { self.h }

    #[inline]
    pub fn sample(&self, x: u32, y: u32) -> Color {
        let xi = (x % self.w) as usize;
        let yi = (y % self.h) as usize;
        self.px[(yi * self.w as usize) + xi]
    }
}

/// Texturas de pared por id (1..=4) y panorama de cielo.
/// Si existen archivos en assets/ se usan; si no, fallback procedural.
pub struct TextureManager {
    walls: HashMap<u8, Pixmap>,
    sky: Pixmap,
    fallback: Pixmap,
}

impl TextureManager {
    pub fn new() -> Self {
        let mut walls = HashMap::new();

        let candidates: &[(&str, u8)] = &[
            ("assets/wall1.png", 1), ("assets/walls/wall1.png", 1),
            ("assets/wall2.png", 2), ("assets/walls/wall2.png", 2),
            ("assets/wall3.png", 3), ("assets/walls/wall3.png", 3),
            ("assets/wall4.png", 4), ("assets/walls/wall4.png", 4),
        ];
        for (path, key) in candidates {
            if walls.contains_key(key) {
                continue;
            }
            if let Some(pm) = load_pixmap(path) {
                walls.insert(*key, pm);
            }
        }
        for id in 1..=4u8 {
            walls.entry(id).or_insert_with(|| make_brick_pixmap(64, 64, color_from_id(id)));
        }

        let sky = load_pixmap("assets/sky.png")
            .or_else(|| load_pixmap("assets/skybox.png"))
            .or_else(|| load_pixmap("assets/ceiling.png"))
            .unwrap_or_else(|| make_sky_pixmap(512, 256));

        let fallback = make_brick_pixmap(64, 64, Color::new(120, 120, 120, 255));

        Self { walls, sky, fallback }
    }

    /// Textura para un id de pared; ids desconocidos caen al gris neutro.
    pub fn wall(&self, id: u8) -> &Pixmap {
        self.walls.get(&id).unwrap_or(&self.fallback)
    }

    pub fn sky(&self) -> &Pixmap {
        &self.sky
    }
}

fn load_pixmap(path: &str) -> Option<Pixmap> {
    let img = Image::load_image(path).ok()?;
    let w = img.width().max(1) as u32;
    let h = img.height().max(1) as u32;
    let data = img.get_image_data().to_vec();
    Some(Pixmap::new(w, h, data))
}

fn color_from_id(id: u8) -> Color {
    let k = id as u32;
    let r = ((k * 97) % 160 + 60) as u8;
    let g = ((k * 57) % 160 + 60) as u8;
    let b = ((k * 31) % 160 + 60) as u8;
    Color::new(r, g, b, 255)
}

/// Pared de ladrillos procedural: hiladas alternadas con junta oscura.
fn make_brick_pixmap(w: u32, h: u32, base: Color) -> Pixmap {
    let mortar = Color::new(40, 38, 36, 255);
    let mut px = vec![base; (w * h) as usize];
    let row_h = 16u32;
    let brick_w = 32u32;
    for y in 0..h {
        let row = y / row_h;
        let stagger = if row % 2 == 0 { 0 } else { brick_w / 2 };
        for x in 0..w {
            let i = (y * w + x) as usize;
            let in_mortar = y % row_h < 2 || (x + stagger) % brick_w < 2;
            if in_mortar {
                px[i] = mortar;
            } else if (x ^ y) % 7 == 0 {
                // grano leve para romper lo plano
                px[i] = mix(base, Color::BLACK, 24);
            }
        }
    }
    Pixmap::new(w, h, px)
}

/// Cielo de respaldo: degradado vertical nocturno.
fn make_sky_pixmap(w: u32, h: u32) -> Pixmap {
    let top = Color::new(8, 10, 22, 255);
    let horizon = Color::new(46, 38, 72, 255);
    let mut px = vec![top; (w * h) as usize];
    for y in 0..h {
        let t = ((y as f32 / (h - 1) as f32) * 255.0) as u8;
        let col = mix(top, horizon, t);
        for x in 0..w {
            px[(y * w + x) as usize] = col;
        }
    }
    Pixmap::new(w, h, px)
}

#[inline]
fn mix(a: Color, b: Color, t: u8) -> Color {
    let ta = t as u16;
    let na = 255u16 - ta;
    let mixc = |x: u8, y: u8| -> u8 { (((x as u16) * na + (y as u16) * ta) / 255) as u8 };
    Color::new(mixc(a.r, b.r), mixc(a.g, b.g), mixc(a.b, b.b), mixc(a.a, b.a))
}
