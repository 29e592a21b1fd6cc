use ort::execution_providers::ExecutionProviderDispatch;

/// ONNX execution providers to request for the current platform.
///
/// ONNX Runtime falls back to CPU when a requested provider is unavailable,
/// and `cpu_only` skips the request entirely.
pub fn execution_providers(cpu_only: bool) -> Vec<ExecutionProviderDispatch> {
    if cpu_only {
        return Vec::new();
    }
    #[cfg(target_os = "macos")]
    {
        vec![ort::execution_providers::CoreMLExecutionProvider::default().build()]
    }
    #[cfg(target_os = "windows")]
    {
        vec![ort::execution_providers::DirectMLExecutionProvider::default().build()]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        Vec::new()
    }
}
