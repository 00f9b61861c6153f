//! Workflow derivation for vapor deposition processes.
//!
//! When the steps of a deposition run one after another, every step becomes a task
//! whose inputs are its source materials and the previous step, and whose outputs are
//! the layers it grows and the step itself.

use crate::{
    normalize::{Normalize, NormalizeContext},
    units,
};
use matproc_schemas::{
    cvd::{CvdSource, MovpeSampleParameters},
    pvd::{PvdSampleParameters, PvdSource},
    sample::ThinFilmReference,
    substance::PureSubstance,
    system::{Component, StepInfo},
    vapor_deposition::{SampleParameters, VaporDeposition, VaporDepositionSource, VaporDepositionStep},
    workflow::{Link, LinkTarget, Task},
};
use uom::si::time::second;

/// A deposition source that lists the materials it evaporates.
pub trait SourceMaterials {
    fn materials(&self) -> &[Component];
}

impl<V> SourceMaterials for VaporDepositionSource<V> {
    fn materials(&self) -> &[Component] {
        &self.material
    }
}

impl SourceMaterials for CvdSource {
    fn materials(&self) -> &[Component] {
        &self.source.material
    }
}

impl<V> SourceMaterials for PvdSource<V> {
    fn materials(&self) -> &[Component] {
        &self.source.material
    }
}

/// Sample parameters that may name the layer grown on the sample.
pub trait LayerParameters {
    fn layer(&self) -> Option<&ThinFilmReference>;
}

impl LayerParameters for SampleParameters {
    fn layer(&self) -> Option<&ThinFilmReference> {
        self.layer.as_ref()
    }
}

impl LayerParameters for MovpeSampleParameters {
    fn layer(&self) -> Option<&ThinFilmReference> {
        self.parameters.layer.as_ref()
    }
}

impl LayerParameters for PvdSampleParameters {
    fn layer(&self) -> Option<&ThinFilmReference> {
        self.parameters.layer.as_ref()
    }
}

pub trait DepositionStep {
    fn info(&self) -> &StepInfo;

    /// The step as a workflow task, without links to other steps.
    fn to_task(&self) -> Task;
}

fn substance_target(substance: &PureSubstance) -> Option<LinkTarget> {
    substance
        .name
        .clone()
        .or_else(|| substance.pub_chem_cid.map(|cid| format!("CID {cid}")))
        .map(LinkTarget::Substance)
}

fn material_link(material: &Component) -> Option<Link> {
    match material {
        Component::System(component) => component.system.as_ref().map(|system| Link {
            name: component.name.clone(),
            target: LinkTarget::Entry(system.clone()),
        }),
        Component::PureSubstance(component) => {
            let target = substance_target(component.pure_substance.as_ref()?)?;
            Some(Link {
                name: component.substance_name.clone(),
                target,
            })
        }
        Component::Concentration(concentration) => {
            let component = &concentration.component;
            let target = substance_target(component.pure_substance.as_ref()?)?;
            Some(Link {
                name: component.substance_name.clone(),
                target,
            })
        }
    }
}

impl<S, P, E> DepositionStep for VaporDepositionStep<S, P, E>
where
    S: SourceMaterials,
    P: LayerParameters,
{
    fn info(&self) -> &StepInfo {
        &self.step
    }

    fn to_task(&self) -> Task {
        let inputs = self
            .sources
            .iter()
            .flat_map(|source| source.materials())
            .filter_map(material_link)
            .collect();
        let outputs = self
            .sample_parameters
            .iter()
            .filter_map(|parameters| parameters.layer())
            .filter_map(|layer| {
                layer.reference.as_ref().map(|reference| Link {
                    name: layer.name.clone(),
                    target: LinkTarget::Entry(reference.clone()),
                })
            })
            .collect();
        Task {
            name: self.step.name.clone(),
            inputs,
            outputs,
        }
    }
}

/// Whether every step has a start time and a duration and no step starts before the
/// previous one has ended.
pub fn is_serial<T: DepositionStep>(steps: &[T]) -> bool {
    let mut windows = Vec::with_capacity(steps.len());
    for step in steps {
        let info = step.info();
        let (Some(start), Some(duration)) = (info.start_time, info.duration.as_ref()) else {
            return false;
        };
        let Ok(duration) = units::time(duration) else {
            return false;
        };
        windows.push((start, duration.get::<second>()));
    }
    windows.windows(2).all(|pair| {
        let ((previous_start, previous_duration), (start, _)) = (pair[0], pair[1]);
        let gap = (start - previous_start).num_milliseconds() as f64 / 1000.0;
        gap >= previous_duration
    })
}

/// One task per step, chained through the steps.
pub fn workflow_tasks<T: DepositionStep>(steps: &[T]) -> Vec<Task> {
    let step_link = |index: usize, step: &T| Link {
        name: step.info().name.clone(),
        target: LinkTarget::Step(index),
    };
    steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let mut task = step.to_task();
            task.outputs.push(step_link(index, step));
            if index > 0 {
                task.inputs.push(step_link(index - 1, &steps[index - 1]));
            }
            task
        })
        .collect()
}

impl<T: DepositionStep> Normalize for VaporDeposition<T> {
    fn normalize(&mut self, _ctx: &mut NormalizeContext<'_>) {
        self.workflow = if is_serial(&self.steps) {
            workflow_tasks(&self.steps)
        } else {
            Vec::new()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::NormalizeConfig;
    use chrono::{DateTime, TimeZone, Utc};
    use matproc_schemas::{
        cvd::ChemicalVaporDeposition,
        measurement::Measurement,
        pvd::PvdStep,
        system::{CompositeSystemReference, PureSubstanceComponent, SystemComponent},
    };

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, minute, 0).unwrap()
    }

    fn step(name: &str, start: Option<u32>, minutes: Option<f64>) -> PvdStep {
        let mut step = PvdStep::default();
        step.step = StepInfo {
            name: Some(name.into()),
            start_time: start.map(at),
            duration: minutes.map(|m| Measurement::new(m, "min")),
            comment: None,
        };
        step
    }

    fn with_io(mut step: PvdStep, target: &str, layer: &str) -> PvdStep {
        let mut source = PvdSource::default();
        source.source.material = vec![
            Component::System(SystemComponent {
                name: Some("target".into()),
                system: Some(target.into()),
                ..Default::default()
            }),
            Component::PureSubstance(PureSubstanceComponent {
                substance_name: Some("oxygen".into()),
                pure_substance: Some(PureSubstance::named("Oxygen")),
                ..Default::default()
            }),
        ];
        step.sources.push(source);
        let mut parameters = PvdSampleParameters::default();
        parameters.parameters.layer = Some(CompositeSystemReference {
            name: Some("film".into()),
            reference: Some(layer.into()),
            ..Default::default()
        });
        step.sample_parameters.push(parameters);
        step
    }

    #[test]
    fn serial_steps() {
        let steps = vec![step("a", Some(0), Some(10.0)), step("b", Some(10), Some(5.0))];
        assert!(is_serial(&steps));
        assert!(is_serial::<PvdStep>(&[]));
    }

    #[test]
    fn overlapping_or_untimed_steps_are_not_serial() {
        let overlapping = vec![step("a", Some(0), Some(10.0)), step("b", Some(9), Some(5.0))];
        assert!(!is_serial(&overlapping));
        let untimed = vec![step("a", Some(0), Some(10.0)), step("b", None, Some(5.0))];
        assert!(!is_serial(&untimed));
        let odd_unit = vec![{
            let mut s = step("a", Some(0), None);
            s.step.duration = Some(Measurement::new(1.0, "fortnight"));
            s
        }];
        assert!(!is_serial(&odd_unit));
    }

    #[test]
    fn tasks_chain_steps() {
        let steps = vec![
            with_io(step("buffer", Some(0), Some(10.0)), "al2o3-target", "buffer.archive.json"),
            with_io(step("film", Some(15), Some(30.0)), "ga2o3-target", "film.archive.json"),
        ];
        let mut deposition = VaporDeposition {
            steps,
            ..Default::default()
        };
        deposition.normalize(&mut NormalizeContext::new(NormalizeConfig::default()));

        let tasks = &deposition.workflow;
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].name.as_deref(), Some("buffer"));
        assert_eq!(tasks[0].inputs.len(), 2);
        assert_eq!(tasks[0].inputs[0].target, LinkTarget::Entry("al2o3-target".into()));
        assert_eq!(tasks[0].inputs[1].target, LinkTarget::Substance("Oxygen".into()));
        assert_eq!(tasks[0].outputs[0].target, LinkTarget::Entry("buffer.archive.json".into()));
        assert_eq!(tasks[0].outputs[1].target, LinkTarget::Step(0));
        assert_eq!(tasks[1].inputs.last().map(|l| &l.target), Some(&LinkTarget::Step(0)));
        assert_eq!(tasks[1].outputs.last().map(|l| &l.target), Some(&LinkTarget::Step(1)));
    }

    #[test]
    fn non_serial_deposition_has_no_workflow() {
        let mut deposition = ChemicalVaporDeposition::default();
        deposition.steps.push(Default::default());
        deposition.workflow.push(Task::default());
        deposition.normalize(&mut NormalizeContext::new(NormalizeConfig::default()));
        assert!(deposition.workflow.is_empty());
    }
}
