use crate::error::AssetError;
use crate::refs::{ObjectReferences, RefType};
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::path::Path;

#[derive(Clone)]
enum RasterData {
    /// Baseline RGB JPEG data, embedded as-is
    Jpeg(Vec<u8>),
    Decoded(DynamicImage),
}

/// A raster image, such as a report logo. Sizes are in pixels.
#[derive(Clone)]
pub struct Image {
    data: RasterData,
    pub width: u32,
    pub height: u32,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Image {
    pub fn new_from_disk<P: AsRef<Path>>(path: P) -> Result<Image, AssetError> {
        Image::from_bytes(std::fs::read(path)?)
    }

    /// Decode an encoded image (PNG, JPEG, ...). RGB JPEGs are kept in their
    /// original encoding.
    pub fn from_bytes(data: Vec<u8>) -> Result<Image, AssetError> {
        let format = image::guess_format(&data)?;
        let decoded = image::load_from_memory_with_format(&data, format)?;
        let (width, height) = decoded.dimensions();

        let data = match (format, decoded.color()) {
            (ImageFormat::Jpeg, ColorType::Rgb8) => RasterData::Jpeg(data),
            _ => RasterData::Decoded(decoded),
        };

        Ok(Image {
            data,
            width,
            height,
        })
    }

    pub fn new_raster(image: DynamicImage) -> Image {
        let (width, height) = image.dimensions();
        Image {
            data: RasterData::Decoded(image),
            width,
            height,
        }
    }

    /// Width over height
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    fn encode(&self) -> EncodeOutput {
        match &self.data {
            RasterData::Jpeg(bytes) => EncodeOutput {
                filter: Filter::DctDecode,
                bytes: bytes.clone(),
                mask: None,
            },
            RasterData::Decoded(image) => {
                let level = CompressionLevel::DefaultLevel as u8;

                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<_> = image.pixels().map(|p| (p.2).0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });

                EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes: compress_to_vec_zlib(image.to_rgb8().as_raw(), level),
                    mask,
                }
            }
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, image_index: usize, writer: &mut Pdf) {
        let id = refs.gen(RefType::Image(image_index));
        let encoded = self.encode();
        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));

        let mut image = writer.image_xobject(id, &encoded.bytes);
        image.filter(encoded.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        if let (Some(mask_id), Some(mask)) = (mask_id, &encoded.mask) {
            let mut s_mask = writer.image_xobject(mask_id, mask);
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }
    }
}
