#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the `uninstall` command.
//!
//! Each test installs into a temporary home first, then uninstalls with the
//! benchtool environment marker pointing at that install.

mod common;

use benchtool_installer::cli::GlobalOpts;
use benchtool_installer::commands::{install, uninstall};
use benchtool_installer::error::InstallError;
use common::{InstallFixture, logger};

fn assume_yes() -> GlobalOpts {
    GlobalOpts {
        yes: true,
        ..GlobalOpts::default()
    }
}

/// Install, then return an environment with `BT_PROJECT` set.
fn installed(fx: &InstallFixture) -> impl Fn(&str) -> Option<String> + use<> {
    install::execute(&fx.plan(None), &logger(), fx.env()).unwrap();
    let home = fx.home().display().to_string();
    let project = fx.install_dir().display().to_string();
    move |name| match name {
        "HOME" => Some(home.clone()),
        uninstall::ACTIVE_ENV => Some(project.clone()),
        _ => None,
    }
}

#[test]
fn uninstall_removes_every_managed_directory() {
    let fx = InstallFixture::new();
    let env = installed(&fx);
    std::fs::create_dir_all(fx.bench_dir().join("hpl")).unwrap();

    uninstall::execute(&assume_yes(), &logger(), env).unwrap();

    assert!(!fx.install_dir().exists());
    assert!(!fx.build_dir().exists());
    assert!(!fx.bench_dir().exists());
    // The shell profile is never edited on uninstall.
    assert!(
        std::fs::read_to_string(fx.bashrc())
            .unwrap()
            .contains("ml benchtool")
    );
}

#[test]
fn uninstall_without_active_environment_is_refused() {
    let fx = InstallFixture::new();
    let _ = installed(&fx);

    let err = uninstall::execute(&assume_yes(), &logger(), fx.env()).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<InstallError>(),
        Some(InstallError::EnvironmentNotActive(_))
    ));
    assert!(fx.install_dir().join(".installed").is_file());
}

#[test]
fn uninstall_dry_run_keeps_installation() {
    let fx = InstallFixture::new();
    let env = installed(&fx);
    let global = GlobalOpts {
        dry_run: true,
        ..GlobalOpts::default()
    };

    uninstall::execute(&global, &logger(), env).unwrap();

    assert!(fx.install_dir().join(".installed").is_file());
    assert!(fx.build_dir().is_dir());
}

#[test]
fn reinstall_after_uninstall_succeeds() {
    let fx = InstallFixture::new();
    let env = installed(&fx);
    uninstall::execute(&assume_yes(), &logger(), env).unwrap();

    install::execute(&fx.plan(None), &logger(), fx.env()).unwrap();
    assert!(fx.install_dir().join(".installed").is_file());
}
