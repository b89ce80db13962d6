use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::JoinHandle;

use image::RgbaImage;

use crate::error::{Result, ViewerError};
use crate::fit::{fit_image, ScaleResult, SourceImage, TargetRect};
use crate::texture::MipChain;

/// Where the picture bytes come from
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes { name: String, bytes: Vec<u8> },
}

impl ImageSource {
    /// Path typed or picked by the user; blank means nothing was selected
    pub fn from_selection(selection: &str) -> Result<Self> {
        let trimmed = selection.trim().trim_matches('"');
        if trimmed.is_empty() {
            Err(ViewerError::NoFileSelected)
        } else {
            Ok(ImageSource::Path(PathBuf::from(trimmed)))
        }
    }

    pub fn name(&self) -> String {
        match self {
            ImageSource::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            ImageSource::Bytes { name, .. } => name.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DecodedPicture {
    pub name: String,
    /// Ready for upload, already clamped to the device texture limit
    pub mips: MipChain,
    /// Dimensions before clamping; the fit uses these
    pub source: SourceImage,
    pub scale: ScaleResult,
}

#[derive(Debug)]
pub struct UploadRequest {
    pub generation: u64,
    pub source: ImageSource,
}

#[derive(Debug)]
pub struct UploadOutcome {
    pub generation: u64,
    pub name: String,
    pub result: Result<DecodedPicture>,
}

fn read_source(source: &ImageSource) -> Result<std::borrow::Cow<'_, [u8]>> {
    match source {
        ImageSource::Path(path) => std::fs::read(path)
            .map(std::borrow::Cow::Owned)
            .map_err(|source| ViewerError::Io {
                path: path.clone(),
                source,
            }),
        ImageSource::Bytes { bytes, .. } => Ok(std::borrow::Cow::Borrowed(bytes)),
    }
}

pub fn decode_rgba(name: &str, bytes: &[u8]) -> Result<RgbaImage> {
    image::load_from_memory(bytes)
        .map(|img| img.to_rgba8())
        .map_err(|source| ViewerError::DecodeFailure {
            name: name.to_string(),
            source,
        })
}

/// Decode an image file without fitting it (used for the wall texture)
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let source = ImageSource::Path(path.to_path_buf());
    let bytes = read_source(&source)?;
    decode_rgba(&source.name(), &bytes)
}

/// Runs every stage for one request on the calling thread
pub fn load_picture(
    source: &ImageSource,
    target: TargetRect,
    max_texture_dimension: u32,
) -> Result<DecodedPicture> {
    let name = source.name();
    let bytes = read_source(source)?;
    let pixels = decode_rgba(&name, &bytes)?;
    let dims = SourceImage::from_pixels(pixels.width(), pixels.height());
    let scale = fit_image(dims, target)?;

    Ok(DecodedPicture {
        name,
        mips: MipChain::new(pixels, max_texture_dimension),
        source: dims,
        scale,
    })
}

/// Background loader with latest-request-wins semantics.
///
/// Requests carry a generation number. The worker skips anything superseded
/// before it starts, and the display state drops outcomes older than what it
/// already shows.
pub struct UploadPipeline {
    requests: Option<Sender<UploadRequest>>,
    outcomes: Receiver<UploadOutcome>,
    latest: Arc<AtomicU64>,
    worker: Option<JoinHandle<()>>,
}

impl UploadPipeline {
    pub fn new(target: TargetRect, max_texture_dimension: u32) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<UploadRequest>();
        let (outcome_tx, outcome_rx) = mpsc::channel();
        let latest = Arc::new(AtomicU64::new(0));

        let worker_latest = latest.clone();
        let worker = std::thread::Builder::new()
            .name("picture-upload".to_string())
            .spawn(move || {
                run_worker(
                    request_rx,
                    outcome_tx,
                    worker_latest,
                    target,
                    max_texture_dimension,
                )
            })
            .map_err(|e| log::error!("Failed to start upload worker: {}", e))
            .ok();

        Self {
            requests: Some(request_tx),
            outcomes: outcome_rx,
            latest,
            worker,
        }
    }

    /// Queue a new upload, superseding any in flight. Returns its generation.
    pub fn submit(&self, source: ImageSource) -> Result<u64> {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        log::info!("Upload #{} requested: {}", generation, source.name());

        let tx = self.requests.as_ref().ok_or(ViewerError::WorkerUnavailable)?;
        tx.send(UploadRequest { generation, source })
            .map_err(|_| ViewerError::WorkerUnavailable)?;
        Ok(generation)
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Non-blocking; called once per frame. Errors once the worker is gone.
    pub fn poll(&self) -> Result<Option<UploadOutcome>> {
        match self.outcomes.try_recv() {
            Ok(outcome) => Ok(Some(outcome)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(ViewerError::WorkerUnavailable),
        }
    }

    /// Blocks until the next outcome arrives or the worker exits
    pub fn wait(&self) -> Option<UploadOutcome> {
        self.outcomes.recv().ok()
    }
}

impl Drop for UploadPipeline {
    fn drop(&mut self) {
        self.requests.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("Upload worker panicked");
            }
        }
    }
}

pub(crate) fn run_worker(
    requests: Receiver<UploadRequest>,
    outcomes: Sender<UploadOutcome>,
    latest: Arc<AtomicU64>,
    target: TargetRect,
    max_texture_dimension: u32,
) {
    while let Ok(mut request) = requests.recv() {
        // Coalesce anything queued behind this request
        while let Ok(newer) = requests.try_recv() {
            log::debug!("Upload #{} superseded by #{}", request.generation, newer.generation);
            request = newer;
        }

        if request.generation < latest.load(Ordering::SeqCst) {
            log::debug!("Upload #{} cancelled before decode", request.generation);
            continue;
        }

        let name = request.source.name();
        let result = load_picture(&request.source, target, max_texture_dimension);
        let outcome = UploadOutcome {
            generation: request.generation,
            name,
            result,
        };
        if outcomes.send(outcome).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_request(generation: u64, width: u32, height: u32) -> UploadRequest {
        let mut bytes = Vec::new();
        RgbaImage::new(width, height)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        UploadRequest {
            generation,
            source: ImageSource::Bytes {
                name: format!("{}.png", generation),
                bytes,
            },
        }
    }

    /// Feeds `queued` to a worker run on this thread and collects what it sends
    fn run_queued(queued: Vec<UploadRequest>, latest: u64) -> Vec<UploadOutcome> {
        let (request_tx, request_rx) = mpsc::channel();
        let (outcome_tx, outcome_rx) = mpsc::channel();
        for request in queued {
            request_tx.send(request).unwrap();
        }
        drop(request_tx);

        run_worker(
            request_rx,
            outcome_tx,
            Arc::new(AtomicU64::new(latest)),
            TargetRect::PAINTING,
            8192,
        );
        outcome_rx.try_iter().collect()
    }

    /// Pipeline whose worker has already gone away
    fn dead_pipeline() -> UploadPipeline {
        let (request_tx, _) = mpsc::channel();
        let (_, outcome_rx) = mpsc::channel();
        UploadPipeline {
            requests: Some(request_tx),
            outcomes: outcome_rx,
            latest: Arc::new(AtomicU64::new(0)),
            worker: None,
        }
    }

    #[test]
    fn blank_selection_is_no_file() {
        assert!(matches!(
            ImageSource::from_selection(""),
            Err(ViewerError::NoFileSelected)
        ));
        assert!(matches!(
            ImageSource::from_selection("   "),
            Err(ViewerError::NoFileSelected)
        ));
        assert_eq!(
            ImageSource::from_selection(" \"/tmp/a b.png\" ").unwrap(),
            ImageSource::Path(PathBuf::from("/tmp/a b.png"))
        );
    }

    #[test]
    fn source_name_is_file_name() {
        let source = ImageSource::Path(PathBuf::from("/photos/holiday/beach.jpg"));
        assert_eq!(source.name(), "beach.jpg");
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let source = ImageSource::Bytes {
            name: "junk.png".to_string(),
            bytes: vec![0, 1, 2, 3],
        };
        let err = load_picture(&source, TargetRect::PAINTING, 8192).unwrap_err();
        assert!(matches!(err, ViewerError::DecodeFailure { .. }));
    }

    #[test]
    fn queued_requests_coalesce_to_newest() {
        let outcomes = run_queued(vec![png_request(1, 30, 10), png_request(2, 10, 30)], 2);

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].generation, 2);
        assert_eq!(outcomes[0].name, "2.png");
        assert!(outcomes[0].result.is_ok());
    }

    #[test]
    fn superseded_request_is_skipped_before_decode() {
        // Generation 3 was submitted but has not reached the queue yet
        let outcomes = run_queued(vec![png_request(1, 30, 10)], 3);
        assert!(outcomes.is_empty());
    }

    #[test]
    fn current_request_is_decoded() {
        let outcomes = run_queued(vec![png_request(1, 30, 10)], 1);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].generation, 1);
    }

    #[test]
    fn submit_fails_without_worker() {
        let pipeline = dead_pipeline();
        assert!(matches!(
            pipeline.submit(ImageSource::Path(PathBuf::from("a.png"))),
            Err(ViewerError::WorkerUnavailable)
        ));
    }

    #[test]
    fn poll_reports_dead_worker() {
        let pipeline = dead_pipeline();
        assert!(matches!(pipeline.poll(), Err(ViewerError::WorkerUnavailable)));
    }
}
