//! Raw flight record structures

use serde::{Deserialize, Serialize};

/// A raw flight record as supplied by callers or the historical dataset.
///
/// Field names follow the upstream column naming (`OPERA`, `TIPOVUELO`,
/// `MES`, `Fecha-I`, `Fecha-O`). The two timestamps exist only on training
/// rows; inference requests carry the three categorical fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightRecord {
    /// Airline operating the flight
    #[serde(alias = "OPERA", rename(serialize = "OPERA"))]
    pub opera: String,

    /// Flight type code: national ("N") or international ("I")
    #[serde(alias = "TIPOVUELO", rename(serialize = "TIPOVUELO"))]
    pub tipovuelo: String,

    /// Month number (1-12) of scheduled departure
    #[serde(alias = "MES", rename(serialize = "MES"))]
    pub mes: i32,

    /// Scheduled departure timestamp, `YYYY-MM-DD HH:MM:SS`
    #[serde(
        alias = "Fecha-I",
        rename(serialize = "Fecha-I"),
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub fecha_i: Option<String>,

    /// Actual departure timestamp, `YYYY-MM-DD HH:MM:SS`
    #[serde(
        alias = "Fecha-O",
        rename(serialize = "Fecha-O"),
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub fecha_o: Option<String>,
}

impl FlightRecord {
    /// Create an inference-shaped record (no timestamps)
    pub fn new(opera: &str, tipovuelo: &str, mes: i32) -> Self {
        Self {
            opera: opera.to_string(),
            tipovuelo: tipovuelo.to_string(),
            mes,
            fecha_i: None,
            fecha_o: None,
        }
    }

    /// Create a training-shaped record with both departure timestamps
    pub fn with_times(opera: &str, tipovuelo: &str, mes: i32, fecha_i: &str, fecha_o: &str) -> Self {
        Self {
            opera: opera.to_string(),
            tipovuelo: tipovuelo.to_string(),
            mes,
            fecha_i: Some(fecha_i.to_string()),
            fecha_o: Some(fecha_o.to_string()),
        }
    }
}
