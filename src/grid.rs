use rand::Rng;

// La luz ambiente decae linealmente hasta apagarse (unidades por segundo)
const LIGHT_DECAY: f32 = 10.0;
const LIGHT_START: f32 = 5.0;

/// Resultado de consultar una celda del mapa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    OutOfBounds,
    Empty,
    Wall(u8),
}

impl Cell {
    #[inline]
    pub fn is_wall(&self) -> bool {
        matches!(self, Cell::Wall(_))
    }

    /// Valor numérico que consume el raycaster: -1 fuera del mapa, 0 libre, id de pared.
    #[inline]
    pub fn height(&self) -> f32 {
        match self {
            Cell::OutOfBounds => -1.0,
            Cell::Empty => 0.0,
            Cell::Wall(id) => *id as f32,
        }
    }
}

/// Mapa cuadrado de ocupación, indexado `y * size + x`.
pub struct Grid {
    pub size: usize,
    cells: Vec<u8>,
    pub light: f32,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "el mapa necesita al menos una celda");
        Self {
            size,
            cells: vec![0; size * size],
            light: LIGHT_START,
        }
    }

    /// Consulta con coordenadas continuas; se truncan hacia abajo a la celda.
    pub fn get(&self, x: f32, y: f32) -> Cell {
        let xi = x.floor();
        let yi = y.floor();
        if xi < 0.0 || yi < 0.0 || xi >= self.size as f32 || yi >= self.size as f32 {
            return Cell::OutOfBounds;
        }
        match self.cells[yi as usize * self.size + xi as usize] {
            0 => Cell::Empty,
            id => Cell::Wall(id),
        }
    }

    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        assert!(x < self.size && y < self.size, "celda fuera del mapa");
        self.cells[y * self.size + x] = value;
    }

    /// Cada celda se vuelve pared (id 1..=4) con la probabilidad dada.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R, probability: f32) {
        assert!(
            (0.0..=1.0).contains(&probability),
            "probabilidad fuera de [0,1]"
        );
        for cell in &mut self.cells {
            *cell = if rng.gen_bool(probability as f64) {
                rng.gen_range(1..=4)
            } else {
                0
            };
        }
    }

    pub fn update(&mut self, seconds: f32) {
        if self.light > 0.0 {
            self.light = (self.light - LIGHT_DECAY * seconds).max(0.0);
        }
    }
}
