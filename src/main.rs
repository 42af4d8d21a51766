use std::path::PathBuf;

use clap::Parser;
use nifti_mpr::{
    config::ViewerConfig,
    enums::{CodeTable, Direction, Orientation},
    session::VolumeSession,
    volume_loader::VolumeLoader,
    window::WindowLevel,
};

/// Decode a NIfTI volume or DICOM slice and export one plane per orientation.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// `.nii`, `.nii.gz` or `.dcm` file
    input: PathBuf,

    /// Directory the PNG planes are written to
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    #[arg(long, default_value_t = 384)]
    display_width: usize,

    #[arg(long, default_value_t = 256)]
    display_height: usize,

    /// Read the datatype field with standard NIfTI-1 codes
    #[arg(long)]
    nifti1_codes: bool,

    /// Slices to move away from the center, per orientation
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    offset: i32,

    #[arg(long, default_value_t = 128.0)]
    window_center: f32,

    #[arg(long, default_value_t = 256.0)]
    window_width: f32,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init(); // RUST_LOG=debug for pipeline details
    let args = Args::parse();

    let code_table = if args.nifti1_codes {
        CodeTable::Nifti1
    } else {
        CodeTable::Compact
    };
    let config = ViewerConfig::default()
        .with_display(args.display_width, args.display_height)
        .with_code_table(code_table)
        .with_window(WindowLevel::new(args.window_center, args.window_width));

    let image = VolumeLoader::load_file_async(&args.input, config).await?;
    let mut session = VolumeSession::new(config);
    session.load(image);

    if let (Some(dims), Some(extents)) = (session.dims(), session.extents()) {
        println!("dimensions: {} x {} x {}", dims.0, dims.1, dims.2);
        println!(
            "slices: axial {}, sagittal {}, coronal {}",
            extents.axial, extents.sagittal, extents.coronal
        );
    }

    let direction = if args.offset < 0 {
        Direction::Previous
    } else {
        Direction::Next
    };
    for orientation in Orientation::ALL {
        for _ in 0..args.offset.unsigned_abs() {
            if !session
                .navigate(orientation, direction)
                .is_some_and(|n| n.changed)
            {
                break;
            }
        }

        let Some(image) = session.render(orientation) else {
            continue;
        };
        let path = args.output.join(format!("{orientation}.png"));
        image.save(&path)?;
        if let Some(label) = session.slice_label(orientation) {
            println!("{orientation}: {label} -> {}", path.display());
        }
    }

    Ok(())
}
