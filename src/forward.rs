use std::path::PathBuf;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{ProcessingError, Result};
use crate::utils::filename::dataset_filename;
use crate::writers::ArtifactWriter;

/// Output contract of the radiative-transfer forward model. The
/// simulation itself runs in an external engine; this crate only
/// carries the artifact it may leave behind: a brightness-temperature
/// spectrum on a frequency grid, split into its four Stokes components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSpectrum {
    pub frequency: Array1<f64>,
    pub i: Array1<f64>,
    pub q: Array1<f64>,
    pub u: Array1<f64>,
    pub v: Array1<f64>,
}

impl SimulationSpectrum {
    /// De-interleave a 4-stride Stokes sensor vector (I, Q, U, V per
    /// frequency) as the engine emits it
    pub fn from_interleaved(frequency: Array1<f64>, y: &Array1<f64>) -> Result<Self> {
        if y.len() != 4 * frequency.len() {
            return Err(ProcessingError::InvalidFormat(format!(
                "Sensor vector length {} does not match 4 Stokes components over {} frequencies",
                y.len(),
                frequency.len()
            )));
        }

        let component =
            |offset: usize| y.iter().skip(offset).step_by(4).copied().collect::<Array1<f64>>();

        Ok(Self {
            i: component(0),
            q: component(1),
            u: component(2),
            v: component(3),
            frequency,
        })
    }

    pub fn save(&self, writer: &ArtifactWriter, name: &str) -> Result<PathBuf> {
        writer.write_artifact(&dataset_filename(name), self)
    }
}
