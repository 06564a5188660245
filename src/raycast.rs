use raylib::prelude::Vector2;

use crate::grid::Grid;

/// Un cruce de línea de la cuadrícula a lo largo del rayo.
///
/// `height` es la ocupación muestreada al entrar a la celda (≤ 0: todavía no
/// hay pared), `offset` la fracción [0,1) sobre la cara golpeada y `shading`
/// la orientación del borde: 0/2 para líneas verticales según el signo de
/// `cos`, 1/2 para horizontales según el signo de `sin`.
#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub x: f32,
    pub y: f32,
    pub distance: f32,
    pub height: f32,
    pub offset: f32,
    pub shading: u8,
}

// Candidato al siguiente cruce sobre un eje; `None` cuando el rayo no avanza
// sobre ese eje (componente exactamente 0) y el otro eje siempre gana.
#[derive(Clone, Copy)]
struct Crossing {
    x: f32,
    y: f32,
    length2: f32,
}

fn next_crossing(rise: f32, run: f32, x: f32, y: f32, inverted: bool) -> Option<Crossing> {
    if run == 0.0 {
        return None;
    }
    let dx = if run > 0.0 {
        (x + 1.0).floor() - x
    } else {
        (x - 1.0).ceil() - x
    };
    let dy = dx * (rise / run);
    Some(Crossing {
        x: if inverted { y + dy } else { x + dx },
        y: if inverted { x + dx } else { y + dy },
        length2: dx * dx + dy * dy,
    })
}

/// Camina el rayo de cruce en cruce hasta rebasar `range`.
///
/// La secuencia arranca con un paso semilla a distancia 0 en el origen y
/// termina con el primer cruce cuya distancia supera `range` (que puede no
/// ser pared); las distancias son estrictamente crecientes.
pub fn cast(grid: &Grid, origin: Vector2, angle: f32, range: f32) -> Vec<Step> {
    let sin = angle.sin();
    let cos = angle.cos();

    let mut steps = vec![Step {
        x: origin.x,
        y: origin.y,
        distance: 0.0,
        height: 0.0,
        offset: 0.0,
        shading: 0,
    }];

    let mut x = origin.x;
    let mut y = origin.y;
    let mut distance = 0.0_f32;

    loop {
        let step_x = next_crossing(sin, cos, x, y, false);
        let step_y = next_crossing(cos, sin, y, x, true);

        // Gana el cruce más cercano; en empate exacto, el eje x.
        let take_x = match (&step_x, &step_y) {
            (Some(sx), Some(sy)) => sx.length2 <= sy.length2,
            (Some(_), None) => true,
            _ => false,
        };
        let Some(crossing) = (if take_x { step_x } else { step_y }) else {
            break;
        };

        // La celda muestreada queda una unidad atrás sobre el eje cruzado
        // cuando el rayo viene en sentido negativo.
        let (height, offset, shading) = if take_x {
            let shift = if cos < 0.0 { 1.0 } else { 0.0 };
            (
                grid.get(crossing.x - shift, crossing.y).height(),
                crossing.y.rem_euclid(1.0),
                if cos < 0.0 { 2 } else { 0 },
            )
        } else {
            let shift = if sin < 0.0 { 1.0 } else { 0.0 };
            (
                grid.get(crossing.x, crossing.y - shift).height(),
                crossing.x.rem_euclid(1.0),
                if sin < 0.0 { 2 } else { 1 },
            )
        };

        // Nunca avanzar 0: un golpe exacto de esquina no debe congelar el lazo.
        distance += crossing.length2.sqrt().max(f32::EPSILON);
        x = crossing.x;
        y = crossing.y;

        steps.push(Step {
            x,
            y,
            distance,
            height,
            offset,
            shading,
        });
        if distance > range {
            break;
        }
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn empty_grid() -> Grid {
        Grid::new(10)
    }

    #[test]
    fn starts_with_zero_distance_seed() {
        let grid = empty_grid();
        let ray = cast(&grid, Vector2::new(4.5, 4.5), 0.7, 6.0);
        assert_eq!(ray[0].distance, 0.0);
        assert_eq!(ray[0].height, 0.0);
        assert_eq!(ray[0].x, 4.5);
        assert_eq!(ray[0].y, 4.5);
    }

    #[test]
    fn distances_strictly_increase_and_terminator_exceeds_range() {
        let grid = empty_grid();
        let range = 7.0;
        let ray = cast(&grid, Vector2::new(2.3, 5.7), 0.9, range);
        for pair in ray.windows(2) {
            assert!(pair[1].distance > pair[0].distance);
        }
        let last = ray.last().unwrap();
        assert!(last.distance > range);
        for step in &ray[..ray.len() - 1] {
            assert!(step.distance <= range);
        }
    }

    #[test]
    fn axis_aligned_cast_never_divides_by_zero() {
        let grid = empty_grid();
        // sin == 0: solo cruces de líneas verticales, distancias enteras + 0.5
        let ray = cast(&grid, Vector2::new(2.5, 2.5), 0.0, 4.0);
        for (i, step) in ray.iter().enumerate().skip(1) {
            assert!(step.distance.is_finite());
            assert_eq!(step.shading, 0);
            assert!((step.x - (2.0 + i as f32)).abs() < 1e-4);
            assert!((step.y - 2.5).abs() < 1e-4);
        }
        // cos == 0: solo cruces horizontales
        let ray = cast(&grid, Vector2::new(2.5, 2.5), FRAC_PI_2, 4.0);
        for step in ray.iter().skip(1) {
            assert!(step.distance.is_finite());
            assert_eq!(step.shading, 1);
            assert!((step.x - 2.5).abs() < 1e-4);
        }
    }

    #[test]
    fn negative_axis_direction_flips_shading_class() {
        let grid = empty_grid();
        let ray = cast(&grid, Vector2::new(5.5, 5.5), PI, 3.0);
        for step in ray.iter().skip(1) {
            assert_eq!(step.shading, 2);
        }
    }

    #[test]
    fn reports_wall_hit_with_distance_and_shading() {
        // Pared en (5,5); mirando recto hacia abajo desde (5.5, 3.5) el rayo
        // cruza y=4 (libre) y pega contra el borde y=5 a distancia 1.5.
        let mut grid = Grid::new(10);
        grid.set(5, 5, 1);
        let ray = cast(&grid, Vector2::new(5.5, 3.5), FRAC_PI_2, 14.0);

        let hit = ray.iter().find(|s| s.height > 0.0).expect("sin impacto");
        assert_eq!(hit.height, 1.0);
        assert_eq!(hit.shading, 1);
        assert!((hit.distance - 1.5).abs() < 1e-4);
        assert!((hit.offset - 0.5).abs() < 1e-4);

        let first = ray.iter().position(|s| s.height > 0.0).unwrap();
        assert!(ray[..first].iter().all(|s| s.height <= 0.0));
        assert!((ray[1].distance - 0.5).abs() < 1e-4);
    }

    #[test]
    fn samples_cell_behind_boundary_when_heading_negative() {
        // Pared en (2,5): viniendo desde la derecha se golpea su borde x=3.
        let mut grid = Grid::new(10);
        grid.set(2, 5, 3);
        let ray = cast(&grid, Vector2::new(5.5, 5.5), PI, 14.0);
        let hit = ray.iter().find(|s| s.height > 0.0).expect("sin impacto");
        assert_eq!(hit.height, 3.0);
        assert!((hit.x - 3.0).abs() < 1e-4);
        assert!((hit.distance - 2.5).abs() < 1e-4);
    }

    #[test]
    fn diagonal_cast_terminates_through_open_space() {
        let grid = empty_grid();
        let ray = cast(&grid, Vector2::new(0.5, 0.5), PI / 4.0, 50.0);
        assert!(ray.last().unwrap().distance > 50.0);
        // cota amplia: un cruce por línea de cuadrícula como máximo
        assert!(ray.len() < 160);
    }

    #[test]
    fn offsets_stay_in_unit_interval() {
        let grid = empty_grid();
        for angle in [0.3, 1.1, 2.8, 4.0, 5.9] {
            for step in cast(&grid, Vector2::new(3.3, 6.8), angle, 10.0) {
                assert!((0.0..1.0).contains(&step.offset));
            }
        }
    }
}
