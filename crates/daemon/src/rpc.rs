use std::fs;
use std::io::{self, Read, Write};
use std::os::unix::net::UnixListener;
use std::path::Path;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use filemgr_agent::Agent;
use filemgr_fs::FileSystem;
use filemgr_protocol::codec::{encode_frame, read_message, write_frame};
use filemgr_protocol::{AgentRequest, Reply};
use filemgr_runtime::ConfigSource;
use log::{debug, error, info};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::flag;

/// How long an idle accept loop sleeps before rechecking the shutdown flag.
/// signal-hook installs its handlers with SA_RESTART, so a blocking
/// `accept` would never see EINTR.
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// RAII guard that ensures the Unix socket file is removed on shutdown,
/// even if we return early or panic.
struct SocketGuard<'a> {
    path: &'a Path,
}

impl<'a> Drop for SocketGuard<'a> {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(self.path)
            && err.kind() != io::ErrorKind::NotFound
        {
            error!(
                "Failed to remove Unix socket at {} on shutdown: {err}",
                self.path.display()
            );
        }
    }
}

pub fn run_rpc_server<F, C>(socket_path: &Path, agent: Arc<Agent<F, C>>) -> anyhow::Result<()>
where
    F: FileSystem + Send + Sync + 'static,
    C: ConfigSource + 'static,
{
    let shutdown = Arc::new(AtomicBool::new(false));

    // Register signal handlers. They only set the atomic flag
    for sig in [SIGINT, SIGTERM] {
        flag::register(sig, Arc::clone(&shutdown))
            .with_context(|| format!("Failed to register signal handler for {sig}"))?;
    }

    if let Some(parent) = socket_path.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create socket directory {}", parent.display())
        })?;
    }

    // Clean up stale socket if it exists.
    if socket_path.exists() {
        fs::remove_file(socket_path).with_context(|| {
            format!(
                "Failed to remove existing socket at {}",
                socket_path.display()
            )
        })?;
    }

    let listener = UnixListener::bind(socket_path)
        .with_context(|| format!("Failed to bind Unix socket at {}", socket_path.display()))?;
    listener
        .set_nonblocking(true)
        .context("Failed to make the listener non-blocking")?;

    // Ensure socket is cleaned up on any exit path.
    let _socket_guard = SocketGuard { path: socket_path };

    info!("filemgr daemon listening on {}", socket_path.display());

    loop {
        if shutdown.load(Ordering::Relaxed) {
            info!("Shutdown signal observed; stopping RPC server.");
            break;
        }

        match listener.accept() {
            Ok((mut stream, _addr)) => {
                if let Err(err) = stream.set_nonblocking(false) {
                    error!("Failed to make client stream blocking: {err}");
                    continue;
                }
                let agent = Arc::clone(&agent);
                thread::spawn(move || {
                    if let Err(err) = handle_client(&mut stream, agent.as_ref()) {
                        error!("Error while handling client: {err:#}");
                    }
                });
            }
            Err(ref err) if err.kind() == io::ErrorKind::WouldBlock => {
                thread::sleep(ACCEPT_POLL_INTERVAL);
            }
            Err(ref err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                error!("Accept error: {err}");
                thread::sleep(ACCEPT_POLL_INTERVAL);
            }
        }
    }

    info!("RPC server shutdown complete.");
    Ok(())
}

/// Serve exactly one request/reply exchange on `stream`.
pub fn handle_client<S, F, C>(stream: &mut S, agent: &Agent<F, C>) -> anyhow::Result<()>
where
    S: Read + Write,
    F: FileSystem,
    C: ConfigSource,
{
    let request: AgentRequest = read_message(stream).context("Failed to read AgentRequest")?;

    debug!("Received request: {:?}", request);

    let reply = agent.handle(&request);

    let frame = match encode_frame(&reply) {
        Ok(frame) => frame,
        Err(err) => {
            error!("Failed to encode {} reply: {err:#}", request.action());
            encode_frame(&Reply::fail(format!("Could not encode reply: {err}")))
                .context("Failed to encode fallback Reply")?
        }
    };

    write_frame(stream, &frame).context("Failed to write Reply")
}

#[cfg(test)]
#[path = "rpc_tests.rs"]
mod tests;
