use std::process;

use log::error;

use syslog3164::collector::{self, Config};

fn main() {
    env_logger::init();

    if let Err(err) = collector::run(Config::from_env()) {
        error!("collector failed: {err}");
        process::exit(1);
    }
}
