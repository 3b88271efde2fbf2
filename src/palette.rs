use crate::config::PaletteConfig;
use std::collections::HashMap;

/// Deterministic category -> color mapping. Known labels get their dedicated
/// color; anything else indexes the ordered palette through a rolling hash
/// of the label, so the same label always lands on the same color no matter
/// how often or in what order it is asked for.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<String>,
    known: HashMap<String, String>,
}

impl Palette {
    pub fn from_config(config: &PaletteConfig) -> Self {
        let colors = if config.colors.is_empty() {
            // An empty palette would leave the fallback with nothing to
            // index; restore the built-in one.
            PaletteConfig::default().colors
        } else {
            config.colors.clone()
        };
        Self {
            colors,
            known: config.products.clone(),
        }
    }

    pub fn color_for(&self, category: &str) -> &str {
        if let Some(color) = self.known.get(category) {
            return color;
        }

        // hash = code + ((hash << 5) - hash), 32-bit wrapping over UTF-16
        // code units.
        let mut hash: i32 = 0;
        for code in category.encode_utf16() {
            hash = (code as i32).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash));
        }
        &self.colors[hash.unsigned_abs() as usize % self.colors.len()]
    }
}
