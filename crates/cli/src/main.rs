use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use facewatch_core::annotation::infrastructure::hershey_annotator::HersheyAnnotator;
use facewatch_core::blurring::infrastructure::gaussian_roi_blurrer::GaussianRoiBlurrer;
use facewatch_core::classification::domain::label_catalog::LabelCatalog;
use facewatch_core::classification::infrastructure::execution_provider::execution_providers;
use facewatch_core::classification::infrastructure::onnx_classifier::OnnxClassifier;
use facewatch_core::detection::infrastructure::haar_cascade_detector::HaarCascadeDetector;
use facewatch_core::display::infrastructure::highgui_window::HighguiWindow;
use facewatch_core::pipeline::blur_faces_use_case::{BlurFacesUseCase, FaceBlurStep};
use facewatch_core::pipeline::classify_faces_use_case::{ClassifyFacesUseCase, FaceClassifyStep};
use facewatch_core::pipeline::frame_loop::Termination;
use facewatch_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use facewatch_core::pipeline::play_video_use_case::PlayVideoUseCase;
use facewatch_core::shared::constants::{
    BLUR_KEY_WAIT_MS, BLUR_LABEL_DIVISOR, BLUR_WINDOW_TITLE, CLASSIFY_KEY_WAIT_MS,
    CLASSIFY_LABEL_DIVISOR, CLASSIFY_WINDOW_TITLE, FACE_BLUR_KERNEL_SIZE, PLAY_KEY_WAIT_MS,
    PLAY_WINDOW_TITLE, PROGRESS_THROTTLE_FRAMES,
};
use facewatch_core::video::infrastructure::ffmpeg_reader::FfmpegReader;

/// Play videos in a window, blurring or classifying the faces in them.
#[derive(Parser)]
#[command(name = "facewatch")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a video until it ends or a key is pressed.
    Play {
        /// Input video file.
        video: PathBuf,

        /// Milliseconds to wait for a key press after each frame.
        #[arg(long, default_value_t = PLAY_KEY_WAIT_MS)]
        delay_ms: i32,
    },

    /// Detect faces, label them "Human" and blur them.
    Blur {
        /// Input video file.
        video: PathBuf,

        /// Haar cascade XML file for face detection.
        cascade: PathBuf,

        /// Milliseconds to wait for a key press after each frame.
        #[arg(long, default_value_t = BLUR_KEY_WAIT_MS)]
        delay_ms: i32,

        /// Gaussian blur kernel size (must be odd).
        #[arg(long, default_value_t = FACE_BLUR_KERNEL_SIZE)]
        blur_strength: usize,
    },

    /// Detect faces and label them with the classifier's latest verdict.
    Classify {
        /// Input video file.
        video: PathBuf,

        /// Haar cascade XML file for face detection.
        cascade: PathBuf,

        /// ONNX classification model.
        model: PathBuf,

        /// Text file with one class label per line.
        labels: PathBuf,

        /// Milliseconds to wait for a key press after each frame.
        #[arg(long, default_value_t = CLASSIFY_KEY_WAIT_MS)]
        delay_ms: i32,

        /// Run the classifier on the CPU only.
        #[arg(long)]
        cpu_only: bool,
    },
}

/// Startup and runtime failures are printed and the process still exits
/// with status 0. Only clap's own usage errors exit non-zero.
fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e}");
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    validate(&cli)?;

    let outcome = match cli.command {
        Command::Play { video, delay_ms } => run_play(&video, delay_ms)?,
        Command::Blur {
            video,
            cascade,
            delay_ms,
            blur_strength,
        } => run_blur(&video, &cascade, delay_ms, blur_strength)?,
        Command::Classify {
            video,
            cascade,
            model,
            labels,
            delay_ms,
            cpu_only,
        } => run_classify(&video, &cascade, &model, &labels, delay_ms, cpu_only)?,
    };

    match outcome {
        Termination::StreamEnded => log::info!("End of video"),
        Termination::UserQuit => log::info!("Stopped by user"),
    }
    Ok(())
}

fn run_play(video: &Path, delay_ms: i32) -> Result<Termination, Box<dyn std::error::Error>> {
    let mut use_case = PlayVideoUseCase::new(
        Box::new(FfmpegReader::new()),
        Box::new(HighguiWindow::new(PLAY_WINDOW_TITLE)),
        Box::new(StdoutPipelineLogger::new(PROGRESS_THROTTLE_FRAMES)),
        delay_ms,
    );
    use_case.execute(video)
}

fn run_blur(
    video: &Path,
    cascade: &Path,
    delay_ms: i32,
    blur_strength: usize,
) -> Result<Termination, Box<dyn std::error::Error>> {
    let detector = HaarCascadeDetector::load(cascade)?;

    let step = FaceBlurStep::new(
        Box::new(detector),
        Box::new(HersheyAnnotator::new(BLUR_LABEL_DIVISOR)),
        Box::new(GaussianRoiBlurrer::new(blur_strength)),
    );
    let mut use_case = BlurFacesUseCase::new(
        Box::new(FfmpegReader::new()),
        Box::new(HighguiWindow::new(BLUR_WINDOW_TITLE)),
        Box::new(StdoutPipelineLogger::new(PROGRESS_THROTTLE_FRAMES)),
        step,
        delay_ms,
    );
    use_case.execute(video)
}

fn run_classify(
    video: &Path,
    cascade: &Path,
    model: &Path,
    labels: &Path,
    delay_ms: i32,
    cpu_only: bool,
) -> Result<Termination, Box<dyn std::error::Error>> {
    let detector = HaarCascadeDetector::load(cascade)?;
    let classifier = OnnxClassifier::load(model, execution_providers(cpu_only))?;
    let catalog = LabelCatalog::load(labels)?;

    let step = FaceClassifyStep::new(
        Box::new(detector),
        Box::new(HersheyAnnotator::new(CLASSIFY_LABEL_DIVISOR)),
        Box::new(classifier),
        catalog,
    );
    let mut use_case = ClassifyFacesUseCase::new(
        Box::new(FfmpegReader::new()),
        Box::new(HighguiWindow::new(CLASSIFY_WINDOW_TITLE)),
        Box::new(StdoutPipelineLogger::new(PROGRESS_THROTTLE_FRAMES)),
        step,
        delay_ms,
    );
    use_case.execute(video)
}

/// Checks argument values. Input files are checked by their loaders, in
/// acquisition order, so the first missing one is the one reported.
fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let delay_ms = match &cli.command {
        Command::Play { delay_ms, .. }
        | Command::Blur { delay_ms, .. }
        | Command::Classify { delay_ms, .. } => *delay_ms,
    };
    // wait_key(0) blocks until a key arrives, which the frame loop reads as quit.
    if delay_ms < 1 {
        return Err(format!("Delay must be at least 1 millisecond, got {delay_ms}").into());
    }
    if let Command::Blur { blur_strength, .. } = &cli.command {
        if *blur_strength == 0 || blur_strength % 2 == 0 {
            return Err(format!(
                "Blur strength must be a positive odd integer, got {blur_strength}"
            )
            .into());
        }
    }
    Ok(())
}
