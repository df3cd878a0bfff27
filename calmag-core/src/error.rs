use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalmagError {
    #[error("Water composition is missing required element '{0}'")]
    WaterElementMissing(String),

    #[error("Initial water composition is missing")]
    WaterNotDefined,

    #[error("Fertilizer '{0}' not found in catalog")]
    FertilizerNotFound(String),

    #[error("Additive '{0}' not found in the {1} slot of the catalog")]
    AdditiveNotFound(String, String),
}
