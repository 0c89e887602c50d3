//! Resolución de calibraciones.
//!
//! - `resolve_calibration`: fecha y tasa de deposición desde la corrida de
//!   calibración referenciada.
//! - `install_calibration`: instala una calibración vigente en un target y
//!   mueve la anterior a la historia, sin duplicados.

use log::debug;
use star_adapters::DomainArtifactEncoder;
use star_core::model::archive_name;
use star_core::{ArtifactKind, ArtifactRef, ArtifactStore};
use star_domain::{CalibrationData, SputteringRun, SputteringTarget};

use crate::errors::LineageError;

/// Copia la fecha de inicio de `run` y la tasa del primer step que crea
/// película con una tasa registrada; `calibration_experiment` apunta a la
/// muestra de la que sale esa tasa. Devuelve la tasa encontrada.
pub fn resolve_calibration(calibration: &mut CalibrationData, run: &SputteringRun) -> Option<f64> {
    if run.start_time.is_some() {
        calibration.calibration_date = run.start_time;
    }
    let found = run.steps
                   .iter()
                   .filter(|step| step.creates_film())
                   .find_map(|step| {
                       step.sample_parameters
                           .iter()
                           .find_map(|sp| sp.deposition_rate.map(|rate| (rate, sp.substrate.clone())))
                   });
    let Some((rate, sample)) = found else {
        debug!("run '{}' carries no deposition rate", run.name);
        return None;
    };
    calibration.deposition_rate = Some(rate);
    if sample.is_some() {
        calibration.calibration_experiment = sample;
    }
    Some(rate)
}

/// Instala `calibration` como vigente en `target`.
///
/// La calibración vigente anterior pasa a `old_calibration_data` si aún no
/// está ahí. Reinstalar la vigente sólo refresca la fecha.
pub fn install_calibration(target: &mut SputteringTarget, reference: ArtifactRef, calibration: &CalibrationData) {
    match target.calibration_data.take() {
        Some(previous) if previous == reference => {}
        Some(previous) => {
            if target.old_calibration_data.contains(&previous) {
                debug!("calibration {} already in history", previous.name);
            } else {
                target.old_calibration_data.push(previous);
            }
        }
        None => {}
    }
    target.calibration_data = Some(reference);
    if calibration.calibration_date.is_some() {
        target.last_calibration_date = calibration.calibration_date;
    }
}

/// Persiste `calibration` bajo `<stem>.calibration.archive.json`, o
/// reutiliza la existente.
pub fn record_calibration<S, D>(store: &mut S,
                                encoder: &D,
                                stem: &str,
                                calibration: &CalibrationData)
                                -> Result<ArtifactRef, LineageError>
    where S: ArtifactStore,
          D: DomainArtifactEncoder
{
    let name = archive_name(stem, ArtifactKind::CalibrationData);
    if store.exists(&name) {
        debug!("reusing {name}");
        return Ok(store.reference_for(&name));
    }
    Ok(store.create(&name, encoder.encode_calibration(calibration)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(name: &str) -> ArtifactRef {
        ArtifactRef::for_entry(Default::default(), name)
    }

    #[test]
    fn rate_and_experiment_come_from_first_film_step() {
        use star_domain::{PowerMode, SampleParameters, Step, StepPhase};

        let mut first = Step::new(StepPhase::Sputtering, PowerMode::Rf);
        first.creates_new_thin_film = Some(true);
        let mut record = SampleParameters::calibration(r("cal_sample"), r("cal_Mo1"), Some(6e-8));
        record.deposition_rate = Some(1e-10);
        first.sample_parameters = vec![record];
        let mut second = first.clone();
        second.sample_parameters[0].deposition_rate = Some(5e-10);

        let mut run = SputteringRun::new("cal");
        run.steps = vec![Step::new(StepPhase::Presputtering, PowerMode::Rf), first, second];
        let mut cal = CalibrationData::default();
        assert_eq!(resolve_calibration(&mut cal, &run), Some(1e-10));
        assert_eq!(cal.deposition_rate, Some(1e-10));
        assert_eq!(cal.calibration_experiment, Some(r("cal_sample")));

        let mut untouched = CalibrationData::default();
        assert_eq!(resolve_calibration(&mut untouched, &SputteringRun::new("raw")), None);
        assert!(untouched.calibration_experiment.is_none());
    }

    #[test]
    fn previous_calibration_moves_to_history_once() {
        let mut target = SputteringTarget::default();
        let cal = CalibrationData::default();
        for name in ["a", "b", "a", "b", "c"] {
            install_calibration(&mut target, r(name), &cal);
        }
        assert_eq!(target.calibration_data, Some(r("c")));
        assert_eq!(target.old_calibration_data, vec![r("a"), r("b")]);
    }

    #[test]
    fn reinstalling_current_keeps_history_empty() {
        let mut target = SputteringTarget::default();
        let cal = CalibrationData::default();
        install_calibration(&mut target, r("a"), &cal);
        install_calibration(&mut target, r("a"), &cal);
        assert!(target.old_calibration_data.is_empty());
        assert_eq!(target.calibration_data, Some(r("a")));
    }
}
