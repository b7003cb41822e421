pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] carta::Error),

    /// No drawable path elements: reported to the user, no render attempted.
    #[error("Nothing to draw: the document has no path elements")]
    EmptyInput,

    /// The rendering window was terminated externally.
    #[error("Drawing surface was closed externally")]
    SurfaceClosed,

    /// Surface restarts used up; terminal.
    #[error("Drawing surface restarted {attempts} times without recovering; giving up")]
    SurfaceExhausted { attempts: u32 },

    #[error("Window system error: {0}")]
    Window(String),
}
