//! UDP ingestion: receive datagrams, normalize them, fan out to the sinks.
//!
//! All of the format logic lives in [`validate`](crate::validate) and
//! [`parse`](crate::parse); this module is thin I/O glue around them.

use std::env;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::net::{IpAddr, UdpSocket};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;

use log::{debug, info, warn};

use crate::store::Store;
use crate::{parse, validate, MAX_MESSAGE_LEN};

/// Runtime settings, one per process.
pub struct Config {
    pub listen_address: String,
    pub listen_port: u16,
    pub log_directory: PathBuf,
    pub log_file: String,
    /// Path of the structured store; `None` leaves flat-file logging only.
    pub store_path: Option<PathBuf>,
}

impl Config {
    /// Read the configuration from the environment:
    /// `SYSLOG_LISTEN_ADDRESS` (default `127.0.0.1`), `SYSLOG_LISTEN_PORT` (`514`),
    /// `SYSLOG_DIRECTORY` (`./syslog`), `SYSLOG_FILE` (`syslog.log`) and `SYSLOG_STORE`
    /// (unset, which disables the structured store).
    pub fn from_env() -> Self {
        Config {
            listen_address: env::var("SYSLOG_LISTEN_ADDRESS")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            listen_port: env::var("SYSLOG_LISTEN_PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(514),
            log_directory: env::var("SYSLOG_DIRECTORY")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./syslog")),
            log_file: env::var("SYSLOG_FILE").unwrap_or_else(|_| "syslog.log".to_string()),
            store_path: env::var("SYSLOG_STORE").ok().map(PathBuf::from),
        }
    }
}

/// Bind the socket and serve datagrams until an unrecoverable I/O error.
///
/// Each datagram is handled on its own thread. The validator and parser are stateless, so
/// the workers share nothing but the sinks; a failure in one worker is logged and never
/// takes the listener down.
pub fn run(config: Config) -> io::Result<()> {
    fs::create_dir_all(&config.log_directory)?;

    let store = match &config.store_path {
        Some(path) => Some(Arc::new(Mutex::new(Store::open(path)?))),
        None => None,
    };

    let socket = UdpSocket::bind((config.listen_address.as_str(), config.listen_port))?;
    info!(
        "listening on {} udp/{}",
        config.listen_address, config.listen_port
    );

    let config = Arc::new(config);
    let mut buf = [0u8; MAX_MESSAGE_LEN];
    loop {
        let (count, peer) = socket.recv_from(&mut buf)?;
        let datagram = buf[..count].to_vec();
        let config = Arc::clone(&config);
        let store = store.clone();

        thread::spawn(move || {
            if let Err(err) = handle_datagram(&datagram, peer.ip(), &config, store.as_deref()) {
                warn!("dropping datagram from {peer}: {err}");
            }
        });
    }
}

fn handle_datagram(
    datagram: &[u8],
    source: IpAddr,
    config: &Config,
    store: Option<&Mutex<Store>>,
) -> io::Result<()> {
    let raw = match std::str::from_utf8(datagram) {
        Ok(text) if text.is_ascii() => text.trim(),
        _ => {
            warn!("dropping non-ascii datagram from {source}");
            return Ok(());
        }
    };

    let message = validate(raw, &source.to_string());
    if message == raw {
        info!("received from {source}: {message}");
    } else {
        info!("corrected message from {source}");
        debug!("before: {raw}");
        debug!("after: {message}");
    }

    let mut path = config.log_directory.clone();
    path.push(&config.log_file);
    let mut file = OpenOptions::new().append(true).create(true).open(&path)?;
    writeln!(file, "{message}")?;

    if let Some(store) = store {
        match parse(&message) {
            Ok(parsed) => store.lock().unwrap().append(&parsed)?,
            // A repaired message can still be missing its hostname or tag. The flat file
            // already has it; the structured store just skips it.
            Err(err) => warn!("not parseable after correction ({err}): {message}"),
        }
    }

    Ok(())
}
