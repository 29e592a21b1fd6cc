pub mod classification;
pub mod face_classifier;
pub mod label_catalog;
pub mod status;
