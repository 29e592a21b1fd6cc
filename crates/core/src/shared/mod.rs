pub mod bounding_box;
pub mod constants;
pub mod frame;
pub mod mat_bridge;
pub mod startup_error;
pub mod video_metadata;
