use crate::normalize::{Normalize, NormalizeContext};
use matproc_schemas::{
    sample::ThinFilmStack,
    system::{Component, SystemComponent},
};

fn system_component(reference: &str) -> Component {
    Component::System(SystemComponent {
        system: Some(reference.to_string()),
        ..Default::default()
    })
}

/// Components of a stack: every referenced layer, bottom up, then the substrate.
impl Normalize for ThinFilmStack {
    fn normalize(&mut self, _ctx: &mut NormalizeContext<'_>) {
        let layers = self.layers.iter().filter_map(|layer| layer.reference.as_deref());
        let substrate = self.substrate.as_ref().and_then(|s| s.reference.as_deref());
        self.system.components = layers.chain(substrate).map(system_component).collect();
    }
}
