pub mod gaussian_roi_blurrer;
