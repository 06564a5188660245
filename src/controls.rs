use raylib::prelude::*;

/// Estado lógico de entrada (adelante/atrás/girar), muestreado una vez por
/// cuadro. El resto del juego nunca toca el teclado directamente.
#[derive(Debug, Default, Clone, Copy)]
pub struct Controls {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl Controls {
    /// WASD + flechas
    pub fn poll(rl: &RaylibHandle) -> Self {
        Self {
            forward: rl.is_key_down(KeyboardKey::KEY_W) || rl.is_key_down(KeyboardKey::KEY_UP),
            backward: rl.is_key_down(KeyboardKey::KEY_S) || rl.is_key_down(KeyboardKey::KEY_DOWN),
            left: rl.is_key_down(KeyboardKey::KEY_A) || rl.is_key_down(KeyboardKey::KEY_LEFT),
            right: rl.is_key_down(KeyboardKey::KEY_D) || rl.is_key_down(KeyboardKey::KEY_RIGHT),
        }
    }
}
