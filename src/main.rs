use std::{path::Path, process::ExitCode};

use icon_deriver::{DeriveError, ICON_SIZES, IconStatus, derive_icons_with};

const ICONS_DIR: &str = "icons";
const SOURCE_ICON: &str = "icon-512.png";

fn print_status(status: &IconStatus) {
    match status {
        IconStatus::Loaded { width, height } => {
            println!("✅ Loaded source icon: {width}x{height}")
        }
        IconStatus::Source { size, .. } => println!("✓ icon-{size}.png (source)"),
        IconStatus::Created { size, .. } => println!("✓ Created icon-{size}.png"),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let icons_dir = Path::new(ICONS_DIR);
    let source_icon = icons_dir.join(SOURCE_ICON);

    match derive_icons_with(&source_icon, &ICON_SIZES, icons_dir, print_status) {
        Ok(written) => {
            log::debug!("wrote {} icons", written.len());
            println!(
                "\n✅ All icons created successfully in {}",
                icons_dir.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("❌ Error: {err}");
            if let DeriveError::SourceNotFound { .. } = err {
                eprintln!("Please make sure {SOURCE_ICON} exists in the {ICONS_DIR}/ directory");
            }
            ExitCode::FAILURE
        }
    }
}
