use std::path::Path;

use ort::execution_providers::ExecutionProviderDispatch;
use ort::session::Session;

use crate::classification::domain::classification::Classification;
use crate::classification::domain::face_classifier::FaceClassifier;
use crate::shared::constants::DEFAULT_CLASSIFIER_INPUT_SIZE;
use crate::shared::frame::Frame;
use crate::shared::startup_error::StartupError;

/// Image classifier backed by an ONNX Runtime session.
///
/// Faces are resized to the model's square input and fed as raw `0..255`
/// RGB floats in NCHW layout; no mean subtraction or scaling. The first
/// output tensor is flattened and reduced by arg-max.
pub struct OnnxClassifier {
    session: Session,
    input_size: u32,
}

impl OnnxClassifier {
    /// Load a classification model.
    ///
    /// The input resolution comes from the model's NCHW input shape, falling
    /// back to 224 when the shape is dynamic.
    pub fn load(
        model_path: &Path,
        providers: Vec<ExecutionProviderDispatch>,
    ) -> Result<Self, StartupError> {
        let invalid = |reason: String| StartupError::InvalidModel {
            path: model_path.to_path_buf(),
            reason,
        };
        if !model_path.is_file() {
            return Err(invalid("file not found".to_string()));
        }

        let session = build_session(model_path, providers).map_err(|e| invalid(e.to_string()))?;

        let input_size = session
            .inputs()
            .first()
            .and_then(|input| {
                if let ort::value::ValueType::Tensor { ref shape, .. } = input.dtype() {
                    // [N, C, H, W]; dynamic dims are reported as -1
                    (shape.len() >= 4 && shape[2] > 0).then(|| shape[2] as u32)
                } else {
                    None
                }
            })
            .unwrap_or(DEFAULT_CLASSIFIER_INPUT_SIZE);

        log::info!(
            "Loaded classifier {} (input {input_size}x{input_size})",
            model_path.display()
        );
        Ok(Self {
            session,
            input_size,
        })
    }
}

fn build_session(
    model_path: &Path,
    providers: Vec<ExecutionProviderDispatch>,
) -> Result<Session, Box<dyn std::error::Error>> {
    let session = Session::builder()?
        .with_execution_providers(providers)?
        .commit_from_file(model_path)?;
    Ok(session)
}

impl FaceClassifier for OnnxClassifier {
    fn classify(&mut self, face: &Frame) -> Result<Classification, Box<dyn std::error::Error>> {
        let tensor = to_input_tensor(face, self.input_size)?;
        let input_value = ort::value::Tensor::from_array(tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("classifier produced no outputs".into());
        }

        let scores = outputs[0].try_extract_array::<f32>()?;
        let scores: Vec<f32> = scores.iter().copied().collect();
        Classification::from_scores(&scores)
            .ok_or_else(|| "classifier output has no comparable scores".into())
    }
}

/// Nearest-neighbour resize of an RGB frame to a `[1, 3, size, size]` tensor
/// of raw pixel values.
fn to_input_tensor(
    face: &Frame,
    size: u32,
) -> Result<ndarray::Array4<f32>, Box<dyn std::error::Error>> {
    if face.is_empty() {
        return Err("cannot classify an empty face crop".into());
    }
    if face.channels() != 3 {
        return Err(format!("expected a 3-channel face crop, got {}", face.channels()).into());
    }
    let size = size as usize;
    let src = face.as_ndarray();
    let src_h = face.height() as usize;
    let src_w = face.width() as usize;
    let sx = src_w as f64 / size as f64;
    let sy = src_h as f64 / size as f64;

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, size, size));
    for y in 0..size {
        let src_y = ((y as f64 * sy) as usize).min(src_h - 1);
        for x in 0..size {
            let src_x = ((x as f64 * sx) as usize).min(src_w - 1);
            for c in 0..3 {
                tensor[[0, c, y, x]] = src[[src_y, src_x, c]] as f32;
            }
        }
    }
    Ok(tensor)
}
