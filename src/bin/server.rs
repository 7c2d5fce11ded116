//! Check-in server binary.
//! Run with: cargo run --bin checkin-server

use std::process::ExitCode;

use checkin_agent::start_checkin_agent;

fn main() -> ExitCode {
    start_checkin_agent::run()
}
