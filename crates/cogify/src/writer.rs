//! GeoTIFF encoding with georeferencing tags.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use cdr_common::BoundingBox;
use tiff::encoder::colortype::Gray32Float;
use tiff::encoder::{DeflateLevel, TiffEncoder};
use tiff::tags::Tag;
use tracing::debug;

use crate::error::{CogError, CogResult};

// GeoTIFF tag IDs (not in the standard tiff crate)
const GEOTIFF_MODELPIXELSCALE: u16 = 33550;
const GEOTIFF_MODELTIEPOINT: u16 = 33922;
const GEOTIFF_GEOKEYDIRECTORY: u16 = 34735;
const GEOTIFF_GEOASCIIPARAMS: u16 = 34737;
const GDAL_NODATA: u16 = 42113;

// GeoKey IDs
const GT_MODEL_TYPE_GEO_KEY: u16 = 1024;
const GT_RASTER_TYPE_GEO_KEY: u16 = 1025;
const GEOGRAPHIC_TYPE_GEO_KEY: u16 = 2048;
const PROJECTED_CS_TYPE_GEO_KEY: u16 = 3072;

// GeoKey values
const MODEL_TYPE_PROJECTED: u16 = 1;
const MODEL_TYPE_GEOGRAPHIC: u16 = 2;
const RASTER_PIXEL_IS_AREA: u16 = 1;

fn is_geographic_crs(epsg: u16) -> bool {
    matches!(epsg, 4326 | 4269 | 4267)
}

fn crs_name(epsg: u16) -> Option<&'static str> {
    match epsg {
        4326 => Some("WGS 84"),
        3411 => Some("NSIDC Sea Ice Polar Stereographic North"),
        3412 => Some("NSIDC Sea Ice Polar Stereographic South"),
        _ => None,
    }
}

/// Compression method for the output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// Deflate compression, the usual choice for float climate grids.
    #[default]
    Deflate,
    Lzw,
    None,
}

/// Writer for a single-band float grid.
///
/// Rows run north to south; `bounds` are the outer cell edges.
pub struct CogWriter<'a> {
    data: &'a [f32],
    width: u32,
    height: u32,
    bounds: BoundingBox,
    epsg: u16,
    compression: Compression,
    nodata_is_nan: bool,
}

impl<'a> CogWriter<'a> {
    pub fn new(data: &'a [f32], width: u32, height: u32, bounds: BoundingBox, epsg: u16) -> Self {
        Self {
            data,
            width,
            height,
            bounds,
            epsg,
            compression: Compression::default(),
            nodata_is_nan: true,
        }
    }

    pub fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Skip the GDAL nodata tag for grids without a fill value.
    pub fn without_nodata(mut self) -> Self {
        self.nodata_is_nan = false;
        self
    }

    /// Write to a file path.
    pub fn write<P: AsRef<Path>>(self, path: P) -> CogResult<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))?;
        debug!(path = %path.display(), "Wrote COG");
        Ok(())
    }

    /// Write to any writer that implements Write + Seek.
    pub fn write_to<W: Write + Seek>(self, writer: W) -> CogResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CogError::InvalidData("Grid has zero dimensions".to_string()));
        }
        if self.data.len() != (self.width * self.height) as usize {
            return Err(CogError::InvalidData(format!(
                "Grid data length {} does not match {}x{}",
                self.data.len(),
                self.width,
                self.height
            )));
        }

        let compression = match self.compression {
            Compression::None => tiff::encoder::Compression::Uncompressed,
            Compression::Lzw => tiff::encoder::Compression::Lzw,
            Compression::Deflate => {
                tiff::encoder::Compression::Deflate(DeflateLevel::Balanced)
            }
        };

        let mut encoder = TiffEncoder::new(writer)?.with_compression(compression);
        let mut image = encoder.new_image::<Gray32Float>(self.width, self.height)?;
        self.write_geotiff_tags(image.encoder())?;
        image.write_data(self.data)?;
        Ok(())
    }

    fn write_geotiff_tags<W: Write + Seek, K: tiff::encoder::TiffKind>(
        &self,
        dir: &mut tiff::encoder::DirectoryEncoder<W, K>,
    ) -> CogResult<()> {
        // ModelPixelScale: [ScaleX, ScaleY, ScaleZ]
        let pixel_scale = [
            self.bounds.width() / self.width as f64,
            self.bounds.height() / self.height as f64,
            0.0,
        ];
        dir.write_tag(Tag::Unknown(GEOTIFF_MODELPIXELSCALE), pixel_scale.as_slice())?;

        // ModelTiepoint: ties pixel (0, 0) to the north-west corner
        let tiepoint = [0.0, 0.0, 0.0, self.bounds.min_x, self.bounds.max_y, 0.0];
        dir.write_tag(Tag::Unknown(GEOTIFF_MODELTIEPOINT), tiepoint.as_slice())?;

        let geokeys = self.build_geokey_directory();
        dir.write_tag(Tag::Unknown(GEOTIFF_GEOKEYDIRECTORY), geokeys.as_slice())?;

        // GeoAsciiParams is pipe-delimited
        if let Some(name) = crs_name(self.epsg) {
            let ascii_params = format!("{name}|");
            dir.write_tag(Tag::Unknown(GEOTIFF_GEOASCIIPARAMS), ascii_params.as_bytes())?;
        }

        if self.nodata_is_nan {
            dir.write_tag(Tag::Unknown(GDAL_NODATA), "nan".as_bytes())?;
        }

        Ok(())
    }

    fn build_geokey_directory(&self) -> Vec<u16> {
        // [KeyDirectoryVersion, KeyRevision, MinorRevision, NumberOfKeys,
        //  KeyID, TIFFTagLocation, Count, ValueOffset, ...]
        let is_geographic = is_geographic_crs(self.epsg);

        let mut keys = vec![1, 1, 0, 3];
        keys.extend_from_slice(&[
            GT_MODEL_TYPE_GEO_KEY,
            0,
            1,
            if is_geographic {
                MODEL_TYPE_GEOGRAPHIC
            } else {
                MODEL_TYPE_PROJECTED
            },
        ]);
        keys.extend_from_slice(&[GT_RASTER_TYPE_GEO_KEY, 0, 1, RASTER_PIXEL_IS_AREA]);
        if is_geographic {
            keys.extend_from_slice(&[GEOGRAPHIC_TYPE_GEO_KEY, 0, 1, self.epsg]);
        } else {
            keys.extend_from_slice(&[PROJECTED_CS_TYPE_GEO_KEY, 0, 1, self.epsg]);
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_writer(data: &[f32]) -> CogWriter<'_> {
        CogWriter::new(
            data,
            8,
            4,
            BoundingBox::new(-180.0, -90.0, 180.0, 90.0),
            4326,
        )
    }

    fn write_to_bytes(writer: CogWriter<'_>) -> Vec<u8> {
        let mut buffer = std::io::Cursor::new(Vec::new());
        writer.write_to(&mut buffer).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_write_has_tiff_magic() {
        let data: Vec<f32> = (0..32).map(|i| i as f32).collect();
        let bytes = write_to_bytes(test_writer(&data));
        assert!(bytes.len() > 8);
        assert!(bytes[0] == b'I' && bytes[1] == b'I' || bytes[0] == b'M' && bytes[1] == b'M');
    }

    #[test]
    fn test_roundtrip_dimensions() {
        let data: Vec<f32> = (0..32).map(|i| i as f32).collect();
        let bytes = write_to_bytes(test_writer(&data));

        let cursor = std::io::Cursor::new(bytes);
        let mut decoder = tiff::decoder::Decoder::new(cursor).unwrap();
        let (width, height) = decoder.dimensions().unwrap();
        assert_eq!((width, height), (8, 4));
    }

    #[test]
    fn test_uncompressed_and_lzw() {
        let data: Vec<f32> = vec![1.5; 32];
        for compression in [Compression::None, Compression::Lzw] {
            let bytes = write_to_bytes(test_writer(&data).compression(compression));
            assert!(bytes.len() > 8);
        }
    }

    #[test]
    fn test_geokey_directory_geographic() {
        let data: Vec<f32> = vec![0.0; 32];
        let writer = test_writer(&data);
        let geokeys = writer.build_geokey_directory();
        assert_eq!(geokeys[3], 3);
        assert_eq!(geokeys[7], MODEL_TYPE_GEOGRAPHIC);
        assert_eq!(geokeys[12], GEOGRAPHIC_TYPE_GEO_KEY);
        assert_eq!(geokeys[15], 4326);
    }

    #[test]
    fn test_geokey_directory_polar_stereographic() {
        let data: Vec<f32> = vec![0.0; 32];
        let mut writer = test_writer(&data);
        writer.epsg = 3411;
        let geokeys = writer.build_geokey_directory();
        assert_eq!(geokeys[7], MODEL_TYPE_PROJECTED);
        assert_eq!(geokeys[12], PROJECTED_CS_TYPE_GEO_KEY);
        assert_eq!(geokeys[15], 3411);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let data: Vec<f32> = vec![0.0; 31];
        let mut buffer = std::io::Cursor::new(Vec::new());
        assert!(test_writer(&data).write_to(&mut buffer).is_err());
    }
}
