/// Domain models for the application
use serde::{Deserialize, Deserializer, Serialize};

/// Vessel as listed by `GET /v3/ships`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VesselSummary {
    #[serde(rename = "ship_id", deserialize_with = "nullable")]
    pub id: String,
    #[serde(rename = "ship_name", deserialize_with = "nullable")]
    pub name: String,
    #[serde(rename = "ship_type", deserialize_with = "nullable")]
    pub vessel_type: String,
    #[serde(deserialize_with = "nullable")]
    pub roles: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub home_port: String,
    pub year_built: Option<u32>,
    #[serde(deserialize_with = "nullable")]
    pub active: bool,
    pub image: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub missions: Vec<Mission>,
}

impl VesselSummary {
    pub fn mission_count(&self) -> usize {
        self.missions.len()
    }
}

/// Mission a vessel supported
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mission {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    pub flight: Option<u32>,
}

/// Last reported position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Vessel as returned by `GET /v3/ships/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VesselDetail {
    #[serde(flatten)]
    pub summary: VesselSummary,
    #[serde(rename = "ship_model")]
    pub model: Option<String>,
    pub weight_kg: Option<u64>,
    pub weight_lbs: Option<u64>,
    pub imo: Option<u64>,
    pub mmsi: Option<u64>,
    pub abs: Option<u64>,
    pub class: Option<u64>,
    pub status: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub position: Position,
    pub speed_kn: Option<f64>,
    pub course_deg: Option<f64>,
    pub successful_landings: Option<u32>,
    pub attempted_landings: Option<u32>,
    #[serde(rename = "url")]
    pub tracking_url: Option<String>,
}

/// Treat an explicit JSON `null` like a missing field
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
