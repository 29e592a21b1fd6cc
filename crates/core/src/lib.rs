pub mod annotation;
pub mod blurring;
pub mod classification;
pub mod detection;
pub mod display;
pub mod pipeline;
pub mod shared;
pub mod video;
