use serde::{Deserialize, Serialize};
use std::io::Read;

/// Solver settings consumed by the wake emission operations of a lifting surface. The value is
/// passed explicitly to every call that depends on it, so two surfaces may be driven with
/// different settings within the same process.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// When set, newly shed wake nodes are emitted within the plane spanned by the local span
    /// direction and the trailing edge bisector. Otherwise they simply trail the apparent flow.
    pub wake_emission_follow_bisector: bool,

    /// Scales the displacement of a freshly emitted wake node relative to `dt * velocity`.
    pub wake_emission_distance_factor: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters::new(true, 1.0)
    }
}

impl Parameters {
    pub fn new(wake_emission_follow_bisector: bool, wake_emission_distance_factor: f64) -> Self {
        Parameters {
            wake_emission_follow_bisector,
            wake_emission_distance_factor,
        }
    }

    /// Settings which emit the wake straight along the reversed apparent velocity
    pub fn direct_emission() -> Self {
        Parameters {
            wake_emission_follow_bisector: false,
            ..Default::default()
        }
    }

    /// Parse parameters from a JSON document. Keys which are absent keep their default values.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let params: Parameters = serde_json::from_str(text)?;
        log::info!("Loaded parameters {:?}", params);
        Ok(params)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        let params: Parameters = serde_json::from_reader(reader)?;
        log::info!("Loaded parameters {:?}", params);
        Ok(params)
    }
}
