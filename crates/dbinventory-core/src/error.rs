use thiserror::Error;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("Unknown selection type: {0} (expected checkbox, select or multiselect)")]
    UnknownSelectionType(String),
}

pub type Result<T> = std::result::Result<T, InventoryError>;
