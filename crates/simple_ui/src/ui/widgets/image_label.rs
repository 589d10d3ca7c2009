//! Image label widget
//!
//! Images are decoded on the CPU with the `image` crate and uploaded to
//! the rendering backend lazily, the first time the label is drawn.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::RgbaImage;

use crate::foundation::math::{Color, Rect, Vec2};
use crate::ui::backend::{RenderBackend, RenderError, TextureId};

/// How an image is mapped onto its box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageOverlay {
    /// Stretch over the whole box
    Stretch,
    /// Letterbox inside the box, preserving aspect ratio
    #[default]
    Fit,
    /// Crop the centre of the image to the box's aspect ratio
    Crop,
}

/// Pixels shown by an image label
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Decoded from a file and owned by this label
    Owned {
        /// File the pixels came from
        path: PathBuf,
        /// Decoded pixels
        image: RgbaImage,
    },
    /// Borrowed from elsewhere; never released by the label
    Shared(Rc<RgbaImage>),
}

impl ImageSource {
    fn pixels(&self) -> &RgbaImage {
        match self {
            Self::Owned { image, .. } => image,
            Self::Shared(image) => image,
        }
    }
}

/// Image loading errors
#[derive(thiserror::Error, Debug)]
pub enum ResourceError {
    /// The file could not be read or decoded
    #[error("Failed to load image {path}: {source}")]
    Image {
        /// Requested file
        path: String,
        /// Decoder error
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct UploadedTexture {
    id: TextureId,
    image_size: (u32, u32),
    real_size: Vec2,
}

/// Image label widget payload
#[derive(Debug)]
pub struct ImageLabel {
    source: Option<ImageSource>,
    /// Mapping of the image onto the box
    pub overlay: ImageOverlay,
    /// Multiplied with every pixel
    pub tint: Color,
    /// Image transparency in `[0, 1]`
    pub transparency: f32,
    texture: Option<UploadedTexture>,
    retired: Vec<TextureId>,
}

impl Default for ImageLabel {
    fn default() -> Self {
        Self {
            source: None,
            overlay: ImageOverlay::Fit,
            tint: Color::WHITE,
            transparency: 0.0,
            texture: None,
            retired: Vec::new(),
        }
    }
}

impl ImageLabel {
    /// Create an empty label
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a label showing the image at `path`
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ResourceError> {
        let mut label = Self::new();
        label.load_image(path)?;
        Ok(label)
    }

    /// Create a label showing a shared image
    pub fn from_shared(image: Rc<RgbaImage>) -> Self {
        let mut label = Self::new();
        label.set_shared(image);
        label
    }

    /// Set the overlay mode
    pub fn with_overlay(mut self, overlay: ImageOverlay) -> Self {
        self.overlay = overlay;
        self
    }

    /// Decode and show the image at `path`
    ///
    /// An empty path clears the label instead. On failure the previous
    /// image stays in place.
    pub fn load_image(&mut self, path: impl AsRef<Path>) -> Result<(), ResourceError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            self.clear();
            return Ok(());
        }

        let image = image::open(path)
            .map_err(|source| ResourceError::Image {
                path: path.display().to_string(),
                source,
            })?
            .to_rgba8();
        log::debug!("Loaded image {} ({}x{})", path.display(), image.width(), image.height());

        self.retire_texture();
        self.source = Some(ImageSource::Owned {
            path: path.to_path_buf(),
            image,
        });
        Ok(())
    }

    /// Show a shared image
    pub fn set_shared(&mut self, image: Rc<RgbaImage>) {
        self.retire_texture();
        self.source = Some(ImageSource::Shared(image));
    }

    /// Drop the image and its texture
    pub fn clear(&mut self) {
        self.retire_texture();
        self.source = None;
    }

    /// Current pixels
    pub fn image(&self) -> Option<&RgbaImage> {
        self.source.as_ref().map(ImageSource::pixels)
    }

    /// Current source
    pub fn source(&self) -> Option<&ImageSource> {
        self.source.as_ref()
    }

    /// Whether the label owns its pixels
    pub fn is_owned(&self) -> bool {
        matches!(self.source, Some(ImageSource::Owned { .. }))
    }

    /// Source and destination rectangles for drawing into `dest`
    ///
    /// Returns `None` when there is nothing to draw.
    pub fn placement(&self, dest: Rect) -> Option<(Rect, Rect)> {
        let image = self.image()?;
        let (width, height) = (image.width() as f32, image.height() as f32);
        if width <= 0.0 || height <= 0.0 || dest.width <= 0.0 || dest.height <= 0.0 {
            return None;
        }

        let mut source = Rect::new(0.0, 0.0, width, height);
        let mut target = dest;
        let image_aspect = width / height;
        let rect_aspect = dest.width / dest.height;

        match self.overlay {
            ImageOverlay::Stretch => {}
            ImageOverlay::Fit => {
                if image_aspect > rect_aspect {
                    let scaled_height = dest.width / image_aspect;
                    target.y += (dest.height - scaled_height) / 2.0;
                    target.height = scaled_height;
                } else {
                    let scaled_width = dest.height * image_aspect;
                    target.x += (dest.width - scaled_width) / 2.0;
                    target.width = scaled_width;
                }
            }
            ImageOverlay::Crop => {
                if image_aspect > rect_aspect {
                    let crop_width = height * rect_aspect;
                    source.x = (width - crop_width) / 2.0;
                    source.width = crop_width;
                } else {
                    let crop_height = width / rect_aspect;
                    source.y = (height - crop_height) / 2.0;
                    source.height = crop_height;
                }
            }
        }

        Some((source, target))
    }

    /// Image colour with transparency applied
    pub fn draw_tint(&self) -> Color {
        self.tint.with_transparency(self.transparency)
    }

    /// Upload the image if it is new, resized or drawn at a new size
    pub(crate) fn prepare_texture(
        &mut self,
        backend: &mut dyn RenderBackend,
        real_size: Vec2,
    ) -> Result<Option<TextureId>, RenderError> {
        for id in self.retired.drain(..) {
            backend.unload_texture(id);
        }

        let image = match &self.source {
            Some(source) => source.pixels(),
            None => return Ok(None),
        };
        let image_size = image.dimensions();
        let stale = self
            .texture
            .map_or(true, |texture| texture.image_size != image_size || texture.real_size != real_size);

        if stale {
            if let Some(old) = self.texture.take() {
                backend.unload_texture(old.id);
            }
            let id = backend.upload_texture(image)?;
            self.texture = Some(UploadedTexture {
                id,
                image_size,
                real_size,
            });
        }

        Ok(self.texture.map(|texture| texture.id))
    }

    /// Hand every backend texture this label holds to the caller
    pub(crate) fn release_textures(&mut self) -> Vec<TextureId> {
        self.retire_texture();
        std::mem::take(&mut self.retired)
    }

    /// Copy with owned pixels deep-copied and no uploaded texture
    pub fn duplicate(&self) -> Self {
        Self {
            source: self.source.clone(),
            overlay: self.overlay,
            tint: self.tint,
            transparency: self.transparency,
            texture: None,
            retired: Vec::new(),
        }
    }

    fn retire_texture(&mut self) {
        if let Some(texture) = self.texture.take() {
            self.retired.push(texture.id);
        }
    }
}
