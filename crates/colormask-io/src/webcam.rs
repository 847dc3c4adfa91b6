use colormask_image::{Image, ImageSize};
use v4l::buffer::Type;
use v4l::io::mmap::Stream;
use v4l::io::traits::CaptureStream;
use v4l::video::capture::Parameters;
use v4l::video::Capture;
use v4l::{Device, FourCC};

use crate::error::IoError;

/// A configuration object for a V4L2 webcam snapshot.
pub struct WebcamConfig {
    /// The camera device path
    pub device_path: String,
    /// The desired image size
    pub size: ImageSize,
    /// The desired frames per second
    pub fps: u32,
}

impl Default for WebcamConfig {
    fn default() -> Self {
        Self {
            device_path: "/dev/video0".to_string(),
            size: ImageSize {
                width: 640,
                height: 480,
            },
            fps: 30,
        }
    }
}

/// A V4L2 camera handle used to grab single frames.
pub struct Webcam<'a> {
    stream: Stream<'a>,
    size: ImageSize,
}

impl Webcam<'_> {
    /// Open the capture device and negotiate an uncompressed YUYV format.
    ///
    /// # Arguments
    ///
    /// * `config` - The device path, frame size and rate to request.
    ///
    /// # Errors
    ///
    /// [`IoError::CameraError`] if the device cannot be opened, does not
    /// offer YUYV capture, or negotiates an odd frame width.
    pub fn new(config: WebcamConfig) -> Result<Self, IoError> {
        let device = Device::with_path(&config.device_path)
            .map_err(|e| IoError::CameraError(format!("{}: {e}", config.device_path)))?;

        let mut format = device
            .format()
            .map_err(|e| IoError::CameraError(e.to_string()))?;
        format.width = config.size.width as u32;
        format.height = config.size.height as u32;
        format.fourcc = FourCC::new(b"YUYV");

        device
            .set_format(&format)
            .map_err(|e| IoError::CameraError(e.to_string()))?;

        // the device may not honor the request; verify what it settled on
        let actual = device
            .format()
            .map_err(|e| IoError::CameraError(e.to_string()))?;
        if actual.fourcc != FourCC::new(b"YUYV") {
            return Err(IoError::CameraError(format!(
                "device does not support YUYV capture, offers {}",
                String::from_utf8_lossy(&actual.fourcc.repr)
            )));
        }
        if actual.width % 2 != 0 {
            return Err(IoError::CameraError(format!(
                "YUYV requires an even frame width, got {}",
                actual.width
            )));
        }

        let params = Parameters::with_fps(config.fps);
        device
            .set_params(&params)
            .map_err(|e| IoError::CameraError(e.to_string()))?;

        let stream = Stream::with_buffers(&device, Type::VideoCapture, 4)
            .map_err(|e| IoError::CameraError(e.to_string()))?;

        Ok(Self {
            stream,
            size: ImageSize {
                width: actual.width as usize,
                height: actual.height as usize,
            },
        })
    }

    /// The frame size the device settled on.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Grab one frame from the camera and convert it to RGB8.
    pub fn grab_rgb8(&mut self) -> Result<Image<u8, 3>, IoError> {
        let (buffer, _metadata) = self
            .stream
            .next()
            .map_err(|e| IoError::CameraError(e.to_string()))?;

        rgb8_from_yuyv(buffer, self.size)
    }
}

/// Expand a packed YUYV 4:2:2 buffer into an RGB8 image.
fn rgb8_from_yuyv(buf: &[u8], size: ImageSize) -> Result<Image<u8, 3>, IoError> {
    let expected = size.width * size.height * 2;
    if buf.len() < expected {
        return Err(IoError::CameraError(format!(
            "short YUYV frame: got {} bytes, expected {}",
            buf.len(),
            expected
        )));
    }

    let mut data = Vec::with_capacity(size.width * size.height * 3);
    for chunk in buf[..expected].chunks_exact(4) {
        let (y0, u, y1, v) = (chunk[0], chunk[1], chunk[2], chunk[3]);
        data.extend_from_slice(&rgb_from_yuv(y0, u, v));
        data.extend_from_slice(&rgb_from_yuv(y1, u, v));
    }

    Ok(Image::new(size, data)?)
}

/// BT.601 studio-swing expansion of one YUV sample.
fn rgb_from_yuv(y: u8, u: u8, v: u8) -> [u8; 3] {
    let c = y as f32 - 16.0;
    let d = u as f32 - 128.0;
    let e = v as f32 - 128.0;

    let r = 1.164 * c + 1.596 * e;
    let g = 1.164 * c - 0.392 * d - 0.813 * e;
    let b = 1.164 * c + 2.017 * d;

    [clamp_u8(r), clamp_u8(g), clamp_u8(b)]
}

fn clamp_u8(val: f32) -> u8 {
    val.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use colormask_image::ImageSize;

    use crate::error::IoError;

    #[test]
    fn yuv_sample_expansion() {
        // studio-swing black and white
        assert_eq!(super::rgb_from_yuv(16, 128, 128), [0, 0, 0]);
        assert_eq!(super::rgb_from_yuv(235, 128, 128), [255, 255, 255]);
        // saturated red
        assert_eq!(super::rgb_from_yuv(81, 90, 240), [254, 0, 0]);
    }

    #[test]
    fn yuyv_frame_expansion() -> Result<(), IoError> {
        let size = ImageSize {
            width: 2,
            height: 1,
        };
        let buf = [235u8, 128, 16, 128];

        let image = super::rgb8_from_yuyv(&buf, size)?;

        assert_eq!(image.as_slice(), &[255, 255, 255, 0, 0, 0]);

        Ok(())
    }

    #[test]
    fn yuyv_short_frame() {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let buf = [0u8; 4];

        let res = super::rgb8_from_yuyv(&buf, size);
        assert!(matches!(res, Err(IoError::CameraError(_))));
    }
}
