//! Normalización por step como pipeline ordenado de etapas puras.
//!
//! Cada etapa recibe el ordinal (base 0) y el step; ninguna mira otros
//! steps. El comportamiento dependiente de la variante (RF/DC, fase) se
//! resuelve con `match` sobre `StepKind`, no con herencia. Aplicar el
//! pipeline dos veces deja el step igual que aplicarlo una.

use star_domain::{ChamberEnvironment, PowerMode, Pressure, Step, StepPhase};

/// Etapa del pipeline: `(ordinal, step)`.
pub type NormalizeStage = fn(usize, &mut Step);

/// Pipeline de etapas con nombre, aplicado en orden.
pub struct StepNormalizer {
    stages: Vec<(&'static str, NormalizeStage)>,
}

impl Default for StepNormalizer {
    fn default() -> Self {
        Self { stages: vec![("name", assign_name),
                            ("duration", default_duration),
                            ("film_flag", film_flag),
                            ("environment", environment),
                            ("dc_power", dc_power)] }
    }
}

impl StepNormalizer {
    /// Agrega una etapa al final del pipeline.
    pub fn with_stage(mut self, name: &'static str, stage: NormalizeStage) -> Self {
        self.stages.push((name, stage));
        self
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|(name, _)| *name).collect()
    }

    pub fn normalize(&self, index: usize, step: &mut Step) {
        for (_, stage) in &self.stages {
            stage(index, step);
        }
    }
}

/// Atajo con el pipeline por defecto.
pub fn normalize_step(index: usize, step: &mut Step) {
    StepNormalizer::default().normalize(index, step);
}

/// `"<ordinal>_<fase>"`, ordinal base 1.
fn assign_name(index: usize, step: &mut Step) {
    step.name = Some(format!("{}_{}", index + 1, step.kind.phase.label()));
}

fn default_duration(_: usize, step: &mut Step) {
    if step.duration.is_none() {
        step.duration = step.kind.phase.default_duration();
    }
}

// Un step de Sputtering que declara la bandera (aunque sea `false`) crea película.
fn film_flag(_: usize, step: &mut Step) {
    if step.kind.phase == StepPhase::Sputtering && step.creates_new_thin_film.is_some() {
        step.creates_new_thin_film = Some(true);
    }
}

fn environment(_: usize, step: &mut Step) {
    let step_name = step.name.clone();
    let pressure = step.chamber_pressure;
    let env = step.environment.get_or_insert_with(ChamberEnvironment::default);
    env.step_name = step_name;
    if let Some(p) = pressure {
        env.pressure = Some(Pressure { value: vec![p] });
    }
    env.normalize();
}

fn dc_power(_: usize, step: &mut Step) {
    if step.kind.mode != PowerMode::Dc {
        return;
    }
    if let (Some(v), Some(i)) = (step.voltage, step.current) {
        step.power = Some(v * i);
    }
    if let (Some(v), Some(i)) = (step.set_voltage, step.set_current) {
        step.set_power = Some(v * i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dc_power_from_voltage_and_current() {
        let mut step = Step::new(StepPhase::Sputtering, PowerMode::Dc);
        step.voltage = Some(10.0);
        step.current = Some(2.0);
        normalize_step(1, &mut step);
        assert_eq!(step.power, Some(20.0));
        assert_eq!(step.set_power, None);
        assert_eq!(step.name.as_deref(), Some("2_Sputtering"));
    }

    #[test]
    fn rf_steps_keep_declared_power() {
        let mut step = Step::new(StepPhase::Presputtering, PowerMode::Rf);
        step.voltage = Some(10.0);
        step.current = Some(2.0);
        step.power = Some(55.0);
        normalize_step(0, &mut step);
        assert_eq!(step.power, Some(55.0));
        assert_eq!(step.duration, Some(180.0));
    }

    #[test]
    fn environment_mirrors_pressure_and_name() {
        let mut step = Step::new(StepPhase::Stabilization, PowerMode::Dc);
        step.chamber_pressure = Some(0.5);
        normalize_step(2, &mut step);
        let env = step.environment.as_ref().unwrap();
        assert_eq!(env.step_name.as_deref(), Some("3_Stabilization"));
        assert_eq!(env.pressure.as_ref().map(|p| p.value.clone()), Some(vec![0.5]));
        assert_eq!(env.chamber_pressure, Some(0.5));
    }

    #[test]
    fn sputtering_flag_forced_only_when_declared() {
        let mut declared = Step::new(StepPhase::Sputtering, PowerMode::Rf);
        declared.creates_new_thin_film = Some(false);
        normalize_step(0, &mut declared);
        assert!(declared.creates_film());

        let mut silent = Step::new(StepPhase::Sputtering, PowerMode::Rf);
        normalize_step(0, &mut silent);
        assert_eq!(silent.creates_new_thin_film, None);

        let mut post = Step::new(StepPhase::PostSputtering, PowerMode::Rf);
        post.creates_new_thin_film = Some(false);
        normalize_step(3, &mut post);
        assert!(!post.creates_film());
        assert_eq!(post.name.as_deref(), Some("4_Postsputtering"));
    }

    #[test]
    fn pipeline_is_idempotent() {
        let mut step = Step::new(StepPhase::Sputtering, PowerMode::Dc);
        step.set_voltage = Some(400.0);
        step.set_current = Some(0.5);
        step.chamber_pressure = Some(0.3);
        let normalizer = StepNormalizer::default();
        normalizer.normalize(4, &mut step);
        let once = step.clone();
        normalizer.normalize(4, &mut step);
        assert_eq!(step, once);
        assert_eq!(step.set_power, Some(200.0));
    }

    #[test]
    fn extra_stage_runs_last() {
        fn tag(_: usize, step: &mut Step) {
            step.comment = step.name.clone();
        }
        let normalizer = StepNormalizer::default().with_stage("tag", tag);
        assert_eq!(normalizer.stage_names().last(), Some(&"tag"));
        let mut step = Step::new(StepPhase::Presputtering, PowerMode::Rf);
        normalizer.normalize(0, &mut step);
        assert_eq!(step.comment.as_deref(), Some("1_Presputtering"));
    }
}
