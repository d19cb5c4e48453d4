use std::collections::HashMap;

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Weight};

#[derive(Hash, PartialEq, Eq, Clone)]
struct MeasureKey {
    text: String,
    font_size_bits: u32,
    weight: u16,
}

/// Text measurement used to size node labels. Hosts embedded in a real
/// canvas can substitute their own painter's metrics.
pub trait TextMeasure {
    /// Returns (width, height) of the shaped text.
    fn measure_text(&mut self, text: &str, font_size: f32, weight: u16) -> (f32, f32);
}

/// Shapes label text with cosmic-text against the system font set.
pub struct CosmicTextMeasure {
    font_system: FontSystem,
    cache: HashMap<MeasureKey, (f32, f32)>,
}

impl CosmicTextMeasure {
    pub fn new() -> Result<Self, String> {
        Ok(Self {
            font_system: FontSystem::new(),
            cache: HashMap::new(),
        })
    }
}

impl TextMeasure for CosmicTextMeasure {
    fn measure_text(&mut self, text: &str, font_size: f32, weight: u16) -> (f32, f32) {
        let key = MeasureKey {
            text: text.to_string(),
            font_size_bits: font_size.to_bits(),
            weight,
        };

        if let Some(cached) = self.cache.get(&key) {
            return *cached;
        }

        let line_height = font_size * 1.2;
        let mut buffer = Buffer::new(
            &mut self.font_system,
            Metrics {
                font_size,
                line_height,
            },
        );

        buffer.set_size(&mut self.font_system, None, None);

        let attrs = Attrs::new()
            .family(Family::SansSerif)
            .weight(Weight(weight));

        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);

        let mut total_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;

        for run in buffer.layout_runs() {
            total_width = total_width.max(run.line_w);
            total_height += run.line_height;
        }

        let measured = (total_width, total_height);
        self.cache.insert(key, measured);
        measured
    }
}

#[cfg(test)]
pub(crate) struct FixedAdvanceMeasure {
    pub advance: f32,
}

#[cfg(test)]
impl TextMeasure for FixedAdvanceMeasure {
    fn measure_text(&mut self, text: &str, font_size: f32, _weight: u16) -> (f32, f32) {
        (text.chars().count() as f32 * self.advance, font_size * 1.2)
    }
}
