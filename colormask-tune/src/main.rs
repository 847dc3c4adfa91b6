mod range;

use std::path::PathBuf;

use argh::FromArgs;

use colormask::image::Image;
use colormask::imgproc::{color, core, filter};
use colormask::io::functional as F;
use colormask::io::{dir, png};

use crate::range::HsvRange;

#[derive(FromArgs)]
/// Tune an HSV color range against an image and write the masked result
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image: Option<PathBuf>,

    /// directory to scan for images
    #[argh(option, short = 'd')]
    images_dir: Option<PathBuf>,

    /// index of the image to pick from the directory scan
    #[argh(option, default = "0")]
    index: usize,

    /// camera device to snapshot from (requires the v4l feature)
    #[argh(option, short = 'c')]
    camera: Option<String>,

    /// minimum hue, 0-179
    #[argh(option, default = "0")]
    h_min: u8,

    /// maximum hue, 0-179
    #[argh(option, default = "179")]
    h_max: u8,

    /// minimum saturation, 0-255
    #[argh(option, default = "0")]
    s_min: u8,

    /// maximum saturation, 0-255
    #[argh(option, default = "255")]
    s_max: u8,

    /// minimum value, 0-255
    #[argh(option, default = "0")]
    v_min: u8,

    /// maximum value, 0-255
    #[argh(option, default = "255")]
    v_max: u8,

    /// directory to write the outputs into
    #[argh(option, short = 'o', default = "PathBuf::from(\"out\")")]
    output_dir: PathBuf,

    /// also write the six bound values to hsv_values.json
    #[argh(switch)]
    export_json: bool,
}

/// Resolve the input source to a decoded RGB8 image.
fn acquire(args: &Args) -> Result<Image<u8, 3>, Box<dyn std::error::Error>> {
    match (&args.image, &args.images_dir, &args.camera) {
        (Some(path), None, None) => Ok(F::read_image_any_rgb8(path)?),
        (None, Some(images_dir), None) => {
            let paths = dir::list_images(images_dir)?;
            let path = paths.get(args.index).ok_or_else(|| {
                format!(
                    "index {} out of range, the scan found {} images",
                    args.index,
                    paths.len()
                )
            })?;
            log::info!(
                "picked {} ({} of {})",
                path.display(),
                args.index + 1,
                paths.len()
            );
            Ok(F::read_image_any_rgb8(path)?)
        }
        (None, None, Some(device)) => snapshot(device),
        _ => Err("pass exactly one of --image, --images-dir or --camera".into()),
    }
}

#[cfg(feature = "v4l")]
fn snapshot(device: &str) -> Result<Image<u8, 3>, Box<dyn std::error::Error>> {
    use colormask::io::webcam::{Webcam, WebcamConfig};

    let mut webcam = Webcam::new(WebcamConfig {
        device_path: device.to_string(),
        ..Default::default()
    })?;

    Ok(webcam.grab_rgb8()?)
}

#[cfg(not(feature = "v4l"))]
fn snapshot(_device: &str) -> Result<Image<u8, 3>, Box<dyn std::error::Error>> {
    Err("camera capture requires building with `--features v4l`".into())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let range = HsvRange {
        h_min: args.h_min,
        h_max: args.h_max,
        s_min: args.s_min,
        s_max: args.s_max,
        v_min: args.v_min,
        v_max: args.v_max,
    };

    let rgb = acquire(&args)?;
    log::info!("🖼️ loaded a {}x{} image", rgb.width(), rgb.height());

    // the filter math runs on BGR rasters
    let mut bgr = Image::from_size_val(rgb.size(), 0u8)?;
    color::bgr_from_rgb(&rgb, &mut bgr)?;

    let mask = filter::hsv_range_mask(&bgr, &range.lower(), &range.upper())?;

    let mut masked_bgr = Image::from_size_val(bgr.size(), 0u8)?;
    core::bitwise_and(&bgr, &bgr, &mut masked_bgr, &mask)?;

    let mut masked_rgb = Image::from_size_val(rgb.size(), 0u8)?;
    color::rgb_from_bgr(&masked_bgr, &mut masked_rgb)?;

    let selected = mask.as_slice().iter().filter(|&&v| v != 0).count();
    log::info!(
        "🎯 {} of {} pixels selected",
        selected,
        mask.as_slice().len()
    );

    std::fs::create_dir_all(&args.output_dir)?;
    png::write_image_png_rgb8(args.output_dir.join("original.png"), &rgb)?;
    png::write_image_png_gray8(args.output_dir.join("mask.png"), &mask)?;
    png::write_image_png_rgb8(args.output_dir.join("filtered.png"), &masked_rgb)?;

    if args.export_json {
        let json_path = args.output_dir.join("hsv_values.json");
        std::fs::write(&json_path, range.to_json()?)?;
        log::info!("📝 wrote {}", json_path.display());
    }

    log::info!("✅ outputs written to {}", args.output_dir.display());

    Ok(())
}
