mod app;
mod cli;
mod error;
mod logging;
mod runner;
mod surface;
mod sweep;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use crossbeam_channel::{select, tick, unbounded, Receiver};

use x52_hotas::{
    virtual_device::{VirtualBackend, VirtualDeviceSpec, VirtualFeed},
    Backend, Calibration, DeviceIndex, DeviceRegistry, Error, Sdl2Backend,
};
use x52_profile::{Profile, Workspace};

use crate::{
    app::X52App,
    cli::{Cli, Command},
    error::DaemonError,
    runner::ActionRunner,
    surface::LogSurface,
    sweep::VirtualSweep,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    if logging::setup(cli.verbose, cli.no_color).is_err() {
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Command::List { virtual_device } => list(virtual_device),
        Command::Run {
            profile,
            device,
            virtual_device,
        } => run(profile.as_deref(), device, virtual_device),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn list(virtual_device: bool) -> Result<(), DaemonError> {
    if virtual_device {
        let (registry, _feed) = virtual_registry();
        list_devices(registry)
    } else {
        list_devices(DeviceRegistry::new(Sdl2Backend::new()?))
    }
}

fn list_devices<B: Backend>(mut registry: DeviceRegistry<B>) -> Result<(), DaemonError> {
    let devices = registry.available()?;
    if devices.is_empty() {
        print_warning!("no controllers found");
        return Ok(());
    }
    for (index, name) in devices {
        match registry.open(index, Calibration::default()) {
            Ok(sampler) => {
                let capabilities = sampler.capabilities()?;
                print_info!("{index}: {name} ({capabilities})");
            }
            Err(e) => {
                print_warning!("{index}: {name} ({e})");
                continue;
            }
        }
        registry.close(index)?;
    }
    Ok(())
}

fn run(profile: Option<&str>, device: Option<u32>, virtual_device: bool) -> Result<(), DaemonError> {
    let workspace = Workspace::new(profile.map(Path::new))?;
    let profile = workspace.load()?;
    print_debug!("profile: {}", workspace.profile_path().display());
    let device = device.unwrap_or(profile.device);

    // Handle Ctrl+C to exit cleanly
    let (stop_tx, stop_rx) = unbounded::<()>();
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    })?;

    if virtual_device {
        let (registry, feed) = virtual_registry();
        let sweep = VirtualSweep::new(feed, profile.calibration.clone());
        poll_loop(registry, device, profile, &stop_rx, Some(sweep))
    } else {
        let registry = DeviceRegistry::new(Sdl2Backend::new()?);
        poll_loop(registry, device, profile, &stop_rx, None)
    }
}

fn virtual_registry() -> (DeviceRegistry<VirtualBackend>, VirtualFeed) {
    let mut backend = VirtualBackend::new();
    let feed = backend.plug(VirtualDeviceSpec::x52_pro());
    (DeviceRegistry::new(backend), feed)
}

fn poll_loop<B: Backend>(
    mut registry: DeviceRegistry<B>,
    device: DeviceIndex,
    profile: Profile,
    stop_rx: &Receiver<()>,
    mut sweep: Option<VirtualSweep>,
) -> Result<(), DaemonError> {
    let poll_interval = profile.poll_interval;
    let calibration = profile.calibration.clone();
    let mut runner = ActionRunner::new(LogSurface::new(), profile.labels.clone());
    let mut app = X52App::new(profile);

    {
        let sampler = registry.open(device, calibration)?;
        let name = sampler.name().to_string();
        print_info!(
            "opened {name} - index={device} {} preset={}",
            sampler.capabilities()?,
            app.profile().preset.name()
        );
        if !name.to_lowercase().contains("x52") {
            print_warning!("{name} does not look like an X52, readings may be mislabeled");
        }
    }
    runner.run_all(app.start());

    let ticker = tick(poll_interval);
    let result = loop {
        select! {
            recv(stop_rx) -> _ => {
                break Ok(());
            }
            recv(ticker) -> _ => {
                if let Some(sweep) = sweep.as_mut() {
                    sweep.advance();
                }
                let Some(sampler) = registry.get_mut(device) else {
                    break Err(DaemonError::from(Error::Closed));
                };
                if let Err(e) = sampler.poll() {
                    break Err(DaemonError::from(e));
                }
                let actions = app.update(&sampler.reading());
                runner.run_all(actions);
            }
        }
    };

    runner.run_all(app.stop());
    match registry.close(device) {
        Ok(()) => {
            print_info!("device {device} closed");
        }
        Err(e) => {
            print_warning!("device {device}: {e}");
        }
    }
    result
}
