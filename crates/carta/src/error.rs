pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Malformed path data: {message}")]
    MalformedPath { message: String },

    #[error("Invalid dimension attribute `{name}`: {value:?}")]
    InvalidDimension { name: String, value: String },

    #[error("No drawable path elements found")]
    EmptyDocument,

    #[error("Geometry has zero extent")]
    DegenerateGeometry,
}
