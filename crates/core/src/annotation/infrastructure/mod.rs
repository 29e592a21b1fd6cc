pub mod hershey_annotator;
