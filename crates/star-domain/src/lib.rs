// star-domain library entry point
pub mod calibration;
pub mod environment;
pub mod error;
pub mod film;
pub mod geometry;
pub mod run;
pub mod sample;
pub mod source;
pub mod stack;
pub mod step;

pub use calibration::{CalibrationData, SputteringTarget, TargetIdentifiers, TargetIdentity};
pub use environment::{ChamberEnvironment, FlowMeasurement, GasFlow, Pressure, VolumetricFlowRate};
pub use error::DomainError;
pub use film::{Substrate, ThinFilm};
pub use geometry::RectangleCuboid;
pub use run::SputteringRun;
pub use sample::{GrowthMeasurement, GrowthRate, SampleParameters, SampleRecordKind};
pub use source::{Magnetron, PureSubstance, SourceComponent, SourcePower, SputteringSource};
pub use stack::Stack;
pub use step::{PowerMode, Step, StepKind, StepPhase};
