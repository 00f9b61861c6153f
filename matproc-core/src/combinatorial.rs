//! Figures derived for combinatorial libraries from the samples that reference them.

use crate::{
    archive::entry_page_link,
    diagnostics::NormalizeWarning,
    host::SampleHit,
    normalize::{section_label, Normalize, NormalizeContext},
};
use matproc_schemas::combinatorial::{CombinatorialLibrary, ScatterFigure, ScatterPoint};

pub const SAMPLE_MAP_LABEL: &str = "Power, pressure, and temperature";
pub const SAMPLE_MAP_TITLE: &str = "Scatter Plot of x and y Coordinates";

/// Scatter figure of sample positions, one point per hit.
pub fn sample_map(hits: &[SampleHit]) -> ScatterFigure {
    let points = hits
        .iter()
        .map(|hit| {
            let position = hit.position.unwrap_or_default();
            ScatterPoint {
                x: position.x,
                y: position.y,
                z: position.z,
                link: entry_page_link(&hit.upload_id, &hit.entry_id),
            }
        })
        .collect();
    ScatterFigure {
        label: SAMPLE_MAP_LABEL.to_string(),
        title: SAMPLE_MAP_TITLE.to_string(),
        x_label: "x / m".to_string(),
        y_label: "y / m".to_string(),
        points,
    }
}

impl Normalize for CombinatorialLibrary {
    fn normalize(&mut self, ctx: &mut NormalizeContext<'_>) {
        self.figures.clear();
        let section = section_label("CombinatorialLibrary", self.system.info.name.as_deref());
        match ctx.search_samples() {
            None => {}
            Some(Ok(hits)) => self.figures.push(sample_map(&hits)),
            Some(Err(err)) => ctx.warn(&section, NormalizeWarning::SearchFailed(err.to_string())),
        }
    }
}
