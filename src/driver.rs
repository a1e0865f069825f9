//! Batch driver: one browser session, one image at a time

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::catalog::ImageSpec;
use crate::template;
use crate::{Error, RenderConfig, Renderer, Result};

/// Owns the browser session for a batch and writes each card to disk.
///
/// The session is acquired in [`RenderDriver::start`] and released by
/// [`RenderDriver::stop`]. If the driver is dropped early (for example when a
/// render fails and the error is propagated) the renderer is dropped with it,
/// which tears the browser down as well.
pub struct RenderDriver<R: Renderer> {
    renderer: R,
    output_root: PathBuf,
    expected_size: (u32, u32),
}

#[cfg(feature = "cdp")]
/// Driver backed by headless Chrome
pub type ChromeDriver = RenderDriver<crate::cdp::CdpRenderer>;

impl<R: Renderer> RenderDriver<R> {
    /// Launch a session. Any failure here aborts the run before an image is
    /// produced.
    pub fn start(config: RenderConfig, output_root: impl Into<PathBuf>) -> Result<Self> {
        config.validate()?;
        let expected_size = config.physical_size();
        let output_root = output_root.into();
        info!(
            "starting render session {}x{} @{}x into {}",
            config.viewport.width,
            config.viewport.height,
            config.device_scale_factor,
            output_root.display()
        );
        let renderer = R::new(config)?;
        Ok(Self {
            renderer,
            output_root,
            expected_size,
        })
    }

    /// Wrap an already running renderer.
    pub fn with_renderer(renderer: R, config: &RenderConfig, output_root: impl Into<PathBuf>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            renderer,
            output_root: output_root.into(),
            expected_size: config.physical_size(),
        })
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Where `spec` will be written
    pub fn destination(&self, spec: &ImageSpec<'_>) -> PathBuf {
        self.output_root.join(spec.output_path)
    }

    /// Render one card and write it to its destination.
    pub fn render_one(&mut self, spec: &ImageSpec<'_>) -> Result<PathBuf> {
        if !spec.is_safe_relative() {
            warn!("{} escapes the output root", spec.output_path);
        }
        let markup = template::render(spec);
        debug!(
            "loading {} (markup sha256 {})",
            spec.output_path,
            template::fingerprint(&markup)
        );
        self.renderer.load_markup(&markup)?;

        let dest = self.destination(spec);
        if let Some(dir) = dest.parent() {
            fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        }

        let png = self.renderer.render_png()?;
        let size = png_dimensions(&png)?;
        if size != self.expected_size {
            return Err(Error::RenderError(format!(
                "{}: captured {}x{}, expected {}x{}",
                spec.output_path, size.0, size.1, self.expected_size.0, self.expected_size.1
            )));
        }

        fs::write(&dest, &png).map_err(|e| Error::io(&dest, e))?;
        info!("wrote {} ({} bytes)", dest.display(), png.len());
        Ok(dest)
    }

    /// Render every entry in order. The first failure stops the batch; images
    /// written before it stay on disk.
    pub fn run<F>(&mut self, catalog: &[ImageSpec<'_>], mut on_image: F) -> Result<Vec<PathBuf>>
    where
        F: FnMut(&Path),
    {
        let mut written = Vec::with_capacity(catalog.len());
        for spec in catalog {
            let path = self.render_one(spec)?;
            on_image(&path);
            written.push(path);
        }
        Ok(written)
    }

    /// Close the browser session.
    pub fn stop(self) -> Result<()> {
        debug!("closing render session");
        self.renderer.close()
    }
}

/// Width and height from a PNG header
pub fn png_dimensions(data: &[u8]) -> Result<(u32, u32)> {
    let reader = png::Decoder::new(data)
        .read_info()
        .map_err(|e| Error::RenderError(format!("screenshot is not a valid PNG: {}", e)))?;
    let info = reader.info();
    Ok((info.width, info.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_not_a_png() {
        let err = png_dimensions(b"not a png at all").unwrap_err();
        assert!(matches!(err, Error::RenderError(_)));
    }

    #[test]
    fn reads_header_dimensions() {
        let mut data = Vec::new();
        {
            let mut enc = png::Encoder::new(&mut data, 6, 4);
            enc.set_color(png::ColorType::Rgb);
            enc.set_depth(png::BitDepth::Eight);
            let mut writer = enc.write_header().unwrap();
            writer.write_image_data(&[10u8; 6 * 4 * 3]).unwrap();
        }
        assert_eq!(png_dimensions(&data).unwrap(), (6, 4));
    }
}
