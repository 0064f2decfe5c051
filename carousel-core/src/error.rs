use thiserror::Error;

/// Configuration problems detected while initializing a carousel.
///
/// These never escape [`Carousel::init`](crate::Carousel::init): the engine
/// logs them and stays inert so the embedding page keeps working.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarouselError {
    #[error("carousel container is missing")]
    MissingContainer,

    #[error("carousel container holds no slides")]
    NoSlides,

    #[error("invalid option `{field}`: {reason}")]
    InvalidOption { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, CarouselError>;
