pub mod frame_blurrer;
