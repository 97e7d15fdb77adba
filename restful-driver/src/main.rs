//! Command-line front end for the RESTful point driver.
//!
//! Loads a device configuration, configures the driver and runs a single
//! point operation against the device.

use anyhow::{Context, Result};
use driver_framework::{
    BaseInterface, DeviceConfig, DriverArgs, DriverCommand, DriverConfig, PointRegister,
};
use restful_driver::{DRIVER_TYPE, Interface};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = DriverArgs::parse_with_default("restful.json5");

    // Load configuration
    let config = DeviceConfig::load(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;
    config.expect_driver(DRIVER_TYPE)?;

    // Initialize logging
    let log_config = config
        .logging()
        .with_level_override(args.log_level.as_deref());
    driver_common::init_tracing(&log_config)
        .map_err(|e| anyhow::anyhow!("Failed to init tracing: {}", e))?;

    info!("Starting restful-driver");
    info!("Loaded configuration from {:?}", args.config);

    let rows = config
        .load_registry(&args.config_dir())
        .context("Failed to load registry configuration")?;

    let mut interface = Interface::new();
    interface
        .configure(&config.driver_config, rows.as_deref())
        .await
        .context("Failed to configure device")?;

    run(&mut interface, &args.command).await
}

async fn run(interface: &mut Interface, command: &DriverCommand) -> Result<()> {
    match command {
        DriverCommand::Get { point } => {
            let value = interface.get_point(point).await?;
            println!("{}", value);
        }
        DriverCommand::Set { point, value } => {
            let response = interface.set_point(point, value).await?;
            println!("{}", response);
        }
        DriverCommand::Scrape => {
            let values = interface.scrape_all().await?;
            println!("{}", serde_json::to_string_pretty(&values)?);
        }
        DriverCommand::Points => {
            let registers: Vec<_> = interface
                .registry()
                .point_map()
                .map(|(_, register)| register)
                .collect();
            println!("{}", serde_json::to_string_pretty(&registers)?);
            info!(
                "{} point(s), {} writable",
                registers.len(),
                registers.iter().filter(|r| !r.read_only()).count()
            );
        }
    }

    Ok(())
}
