use argh::FromArgs;
use rgbd::{
    geometry::{Geometry, Geometry2D, RgbdImage},
    image::{Image, ImageSize},
    tensor::CpuAllocator,
};

#[derive(FromArgs)]
/// Build a synthetic RGB-D pair and print what it looks like.
struct Args {
    /// color image width
    #[argh(option, default = "640")]
    color_width: usize,

    /// color image height
    #[argh(option, default = "480")]
    color_height: usize,

    /// depth image width
    #[argh(option, default = "640")]
    depth_width: usize,

    /// depth image height
    #[argh(option, default = "480")]
    depth_height: usize,

    /// depth value written to every pixel, in millimeters
    #[argh(option, default = "1000")]
    depth_value: u16,

    /// clear the pair before printing
    #[argh(switch)]
    clear: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let color = Image::<u8, 3>::from_size_val(
        ImageSize {
            width: args.color_width,
            height: args.color_height,
        },
        127,
        CpuAllocator,
    )?;

    let depth = Image::<u16, 1>::from_size_val(
        ImageSize {
            width: args.depth_width,
            height: args.depth_height,
        },
        args.depth_value,
        CpuAllocator,
    )?;

    let mut rgbd = RgbdImage::new(color, depth);
    if args.clear {
        rgbd.clear();
    }

    log::info!("empty: {}", rgbd.is_empty());

    println!("{rgbd}");
    println!("min bound: {:?}", rgbd.min_bound().as_slice());
    println!("max bound: {:?}", rgbd.max_bound().as_slice());

    let legacy = rgbd.to_legacy_rgbd_image()?;
    println!("{legacy}");
    println!(
        "legacy bytes: color={} depth={}",
        legacy.color.data.len(),
        legacy.depth.data.len()
    );

    Ok(())
}
