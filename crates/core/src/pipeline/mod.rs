pub mod blur_faces_use_case;
pub mod classify_faces_use_case;
pub mod frame_loop;
pub mod pipeline_logger;
pub mod play_video_use_case;

#[cfg(test)]
pub(crate) mod test_support;
