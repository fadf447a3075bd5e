//! swictl
//!
//! Command-line host for the sway input configurator library: lists the
//! input devices sway reports and renders declarative config blocks for
//! them.

use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use swictl::{Config, DeviceManager, Swaymsg};

/// swictl - sway input device configuration via swaymsg
#[derive(Parser, Debug)]
#[command(name = "swictl")]
#[command(version, about, long_about = None)]
struct Args {
    /// swaymsg executable (overrides the configured path)
    #[arg(long)]
    swaymsg: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// List all input devices and exit (the default action)
    #[arg(long)]
    list_devices: bool,

    /// Print a sway config block for the device at this index
    #[arg(long, value_name = "INDEX")]
    show_config: Option<usize>,

    /// Print config blocks for every device
    #[arg(long)]
    all: bool,

    /// Address devices by type instead of identifier in generated config
    #[arg(long)]
    match_type: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match Config::load_default() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    };

    let swaymsg_path = args
        .swaymsg
        .unwrap_or_else(|| config.app.swaymsg_path.clone());
    info!(swaymsg = %swaymsg_path, "querying sway");

    let mut manager = DeviceManager::new(Box::new(Swaymsg::new(swaymsg_path)));
    manager.discover()?;

    if manager.is_empty() {
        return Err("No devices found.".into());
    }

    if args.list_devices {
        list_devices(&manager);
        return Ok(());
    }

    if let Some(index) = args.show_config {
        println!("{}", manager.generate_config(index, args.match_type)?);
        return Ok(());
    }

    if args.all {
        for index in 0..manager.len() {
            if index > 0 {
                println!();
            }
            println!("{}", manager.generate_config(index, args.match_type)?);
        }
        return Ok(());
    }

    list_devices(&manager);
    Ok(())
}

/// Print the discovered devices, one numbered entry each.
fn list_devices(manager: &DeviceManager) {
    println!("Found {} input device(s):\n", manager.len());

    for (index, device) in manager.devices().iter().enumerate() {
        println!("{}. {} [{}]", index, device.name, device.kind);
        println!("   Identifier: {}", device.id);
        println!(
            "   Send events: {}",
            swictl::bool_word(device.libinput.send_events)
        );
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["swictl"]);
        assert!(args.swaymsg.is_none());
        assert!(!args.verbose);
        assert!(!args.list_devices);
        assert!(args.show_config.is_none());
        assert!(!args.all);
        assert!(!args.match_type);
    }

    #[test]
    fn test_args_show_config() {
        let args = Args::parse_from(["swictl", "--show-config", "2", "--match-type"]);
        assert_eq!(args.show_config, Some(2));
        assert!(args.match_type);
    }

    #[test]
    fn test_args_swaymsg_override() {
        let args = Args::parse_from(["swictl", "--swaymsg", "/usr/local/bin/swaymsg"]);
        assert_eq!(args.swaymsg.as_deref(), Some("/usr/local/bin/swaymsg"));
    }

    #[test]
    fn test_args_all() {
        let args = Args::parse_from(["swictl", "--all", "--verbose"]);
        assert!(args.all);
        assert!(args.verbose);
    }
}
