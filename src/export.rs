use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::drawable::DrawableRef;
use crate::error::{SketchError, SketchResult};
use crate::renderer::Renderer;
use crate::target::{RasterTarget, Scaled};

/// Renders the committed log offscreen at a fixed upscale and encodes it as PNG
#[derive(Debug, Clone, PartialEq)]
pub struct Exporter {
    scale: f32,
    size: u32,
    file_name: String,
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(4.0, 1024, "sketchpad.png")
    }
}

impl Exporter {
    pub fn new(scale: f32, size: u32, file_name: &str) -> Self {
        Self {
            scale,
            size,
            file_name: file_name.to_owned(),
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Replay `committed` (and nothing else) onto a fresh `size × size` image.
    ///
    /// Fails with [`SketchError::InvalidScale`] for a scale that is not a
    /// positive finite number, and with [`SketchError::Resource`] if the image
    /// or any glyph bitmap cannot be allocated.
    pub fn export(&self, committed: &[DrawableRef], renderer: &Renderer) -> SketchResult<ExportArtifact> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(SketchError::InvalidScale(self.scale));
        }

        let mut raster = RasterTarget::try_new(self.size, self.size)?;
        {
            let mut scaled = Scaled::new(&mut raster, self.scale);
            renderer.render(&mut scaled, committed, None, None);
        }

        let image = raster.into_image()?;
        let (width, height) = image.dimensions();
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;

        log::info!(
            "Exported {} drawables to {}x{} PNG ({} bytes)",
            committed.len(),
            width,
            height,
            bytes.len()
        );

        Ok(ExportArtifact {
            file_name: self.file_name.clone(),
            width,
            height,
            bytes,
        })
    }
}

/// An encoded still image ready to be saved
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    /// PNG bytes
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Write the image into `dir` under its file name.
    ///
    /// The bytes go to a temporary sibling first and are renamed into place,
    /// so a failed write never leaves a truncated image behind.
    pub fn save_to(&self, dir: &Path) -> SketchResult<PathBuf> {
        let path = dir.join(&self.file_name);
        let partial = dir.join(format!("{}.part", self.file_name));

        if let Err(err) = std::fs::write(&partial, &self.bytes) {
            let _ = std::fs::remove_file(&partial);
            return Err(err.into());
        }
        if let Err(err) = std::fs::rename(&partial, &path) {
            let _ = std::fs::remove_file(&partial);
            return Err(err.into());
        }

        log::info!("Saved export to {}", path.display());
        Ok(path)
    }
}

#[cfg(target_arch = "wasm32")]
impl ExportArtifact {
    /// Offer the image to the user as a browser download
    pub fn download(&self) -> SketchResult<()> {
        use eframe::wasm_bindgen::JsCast as _;

        let browser = |err: eframe::wasm_bindgen::JsValue| SketchError::Download(format!("{err:?}"));
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| SketchError::Download("no document".to_owned()))?;

        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(self.bytes.as_slice()));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type("image/png");
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(browser)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(browser)?;

        let anchor = document
            .create_element("a")
            .map_err(browser)?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| SketchError::Download("not an anchor element".to_owned()))?;
        anchor.set_href(&url);
        anchor.set_download(&self.file_name);
        anchor.click();

        web_sys::Url::revoke_object_url(&url).ok();
        log::info!("Offered {} as a download", self.file_name);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use job::ExportJob;

#[cfg(not(target_arch = "wasm32"))]
mod job {
    use std::sync::Arc;
    use std::thread::JoinHandle;

    use parking_lot::Mutex;

    use super::{ExportArtifact, Exporter};
    use crate::drawable::DrawableRef;
    use crate::error::{SketchError, SketchResult};
    use crate::renderer::Renderer;
    use crate::util::time::Stopwatch;

    type Slot = Arc<Mutex<Option<SketchResult<ExportArtifact>>>>;

    /// An export running on a worker thread.
    ///
    /// The worker owns its own copy of the log, so the sketchpad can keep
    /// changing while the export is in flight.
    pub struct ExportJob {
        slot: Slot,
        handle: Option<JoinHandle<()>>,
    }

    impl ExportJob {
        pub fn spawn(snapshot: Vec<DrawableRef>, exporter: Exporter, renderer: Renderer) -> Self {
            let slot: Slot = Arc::new(Mutex::new(None));
            let worker_slot = Arc::clone(&slot);

            let spawned = std::thread::Builder::new()
                .name("sketchpad-export".to_owned())
                .spawn(move || {
                    let watch = Stopwatch::start();
                    let result = exporter.export(&snapshot, &renderer);
                    log::debug!("Export finished in {:.3}s", watch.elapsed_secs());
                    *worker_slot.lock() = Some(result);
                });

            let handle = match spawned {
                Ok(handle) => Some(handle),
                Err(err) => {
                    log::error!("Failed to start export worker: {err}");
                    *slot.lock() = Some(Err(SketchError::Io(err)));
                    None
                }
            };

            Self { slot, handle }
        }

        /// Take the result if the worker is done
        pub fn poll(&mut self) -> Option<SketchResult<ExportArtifact>> {
            let finished = self.handle.as_ref().is_none_or(JoinHandle::is_finished);
            let taken = self.slot.lock().take();
            if let Some(result) = taken {
                self.join();
                return Some(result);
            }
            if finished {
                self.join();
                return Some(Err(SketchError::WorkerLost));
            }
            None
        }

        /// Block until the worker reports
        pub fn wait(mut self) -> SketchResult<ExportArtifact> {
            self.join();
            self.slot.lock().take().unwrap_or(Err(SketchError::WorkerLost))
        }

        fn join(&mut self) {
            if let Some(handle) = self.handle.take() {
                if handle.join().is_err() {
                    log::error!("Export worker panicked");
                }
            }
        }
    }
}
