//! Console demo for a two-controller 8742 chain
//!
//! Connects over a serial port, verifies the firmware link, scans the
//! RS-485 bus with full address reassignment, reports the occupancy map
//! and the motor attached to every axis, and (only when asked) exercises
//! a short move on the master's first axis.
//!
//! Usage: picokit <serial-port> [baud] [--exercise]

use anyhow::{bail, Context};
use picokit::{ConflictResolution, Controller, SerialChannel, AXIS_COUNT, MASTER_ADDRESS};
use std::time::Duration;

const DEFAULT_BAUD: u32 = 19200;
const READ_TIMEOUT: Duration = Duration::from_millis(500);

fn main() -> anyhow::Result<()> {
    picokit::init_logging()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut port = None;
    let mut baud = DEFAULT_BAUD;
    let mut exercise = false;

    for arg in &args {
        if arg == "--exercise" {
            exercise = true;
        } else if port.is_none() {
            port = Some(arg.clone());
        } else {
            baud = arg
                .parse()
                .with_context(|| format!("invalid baud rate {arg:?}"))?;
        }
    }
    let port = match port {
        Some(port) => port,
        None => bail!(
            "usage: picokit <serial-port> [baud] [--exercise]  (picokit {} built {})",
            picokit::VERSION,
            picokit::BUILD_DATE
        ),
    };

    let channel = SerialChannel::open(&port, baud, READ_TIMEOUT)?;
    let mut controller = Controller::new(channel);

    // Liveness check before touching the bus.
    let firmware = controller.firmware_version()?;
    println!("Connected to motor controller, firmware {firmware}");

    println!("Scanning RS-485 bus...");
    controller.scan(ConflictResolution::ReassignAll)?;

    let map = controller.controller_address_map()?;
    println!("Occupied addresses: {:?}", map.occupied_addresses());
    if map.has_conflict() {
        bail!("address conflict remains after scan");
    }

    let slave = map
        .occupied_addresses()
        .into_iter()
        .find(|&addr| addr >= 2);

    for address in std::iter::once(MASTER_ADDRESS).chain(slave) {
        let role = if address == MASTER_ADDRESS { "master" } else { "slave" };
        println!("\n{role} (address {address}): {}", controller.identification(address)?);

        controller.detect_motors(address)?;
        for axis in 1..=AXIS_COUNT {
            let motor = controller.motor_type(address, axis)?;
            println!("  axis {axis}: {motor}");
        }
    }

    if exercise {
        println!("\nMoving master axis 1 to +500 steps...");
        controller.move_to_target(MASTER_ADDRESS, 1, 500)?;
        println!("Position: {}", controller.position(MASTER_ADDRESS, 1)?);

        println!("Returning home...");
        controller.move_to_target(MASTER_ADDRESS, 1, 0)?;
        println!("Position: {}", controller.position(MASTER_ADDRESS, 1)?);
    }

    Ok(())
}
