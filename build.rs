//! Build script for detecting system dependencies and providing installation guidance.
//!
//! Checks for the required system libraries (OpenCV, X11 with the XTEST
//! extension, pkg-config) and prints helpful hints if they are missing.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    check_pkg_config();
    check_opencv();
    check_x11();
}

fn check_opencv() {
    println!("cargo:rerun-if-env-changed=PKG_CONFIG_PATH");
    println!("cargo:rerun-if-env-changed=OPENCV_LINK_PATHS");
    println!("cargo:rerun-if-env-changed=OPENCV_INCLUDE_PATHS");

    for name in ["opencv4", "opencv"] {
        let output = Command::new("pkg-config").args(["--modversion", name]).output();
        if let Ok(output) = output {
            if output.status.success() {
                let version = String::from_utf8_lossy(&output.stdout);
                println!("cargo:warning=Found OpenCV version: {}", version.trim());
                return;
            }
        }
    }
    println!("cargo:warning=OpenCV not found via pkg-config. Make sure OpenCV is installed.");
    println!("cargo:warning=On Ubuntu: sudo apt-get install libopencv-dev");
    println!("cargo:warning=On macOS: brew install opencv");
}

fn check_x11() {
    // Only relevant on Linux
    if !env::var("TARGET").unwrap_or_default().contains("linux") {
        return;
    }

    let output = Command::new("pkg-config").args(["--exists", "x11"]).output();
    match output {
        Ok(output) if output.status.success() => {
            println!("cargo:warning=Found X11 libraries");
        }
        _ => {
            println!("cargo:warning=X11 libraries not found. Cursor control will not work.");
            println!("cargo:warning=On Ubuntu: sudo apt-get install libx11-dev libxtst-dev");
        }
    }

    // XTEST is needed to synthesize click and scroll events
    let output = Command::new("pkg-config").args(["--exists", "xtst"]).output();
    if !matches!(output, Ok(output) if output.status.success()) {
        println!("cargo:warning=XTEST extension not found; click/scroll injection will not work.");
        println!("cargo:warning=On Ubuntu: sudo apt-get install libxtst-dev");
    }
}

fn check_pkg_config() {
    let output = Command::new("pkg-config").arg("--version").output();
    match output {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            println!("cargo:warning=Found pkg-config version: {}", version.trim());
        }
        _ => {
            println!("cargo:warning=pkg-config not found. This is required to find system libraries.");
            println!("cargo:warning=On Ubuntu: sudo apt-get install pkg-config");
        }
    }
}
