//! Command: print version information.

/// Print the installer version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("benchtool-installer {}", super::version());
}
