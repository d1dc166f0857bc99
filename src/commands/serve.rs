//! Serve command - run the JSON HTTP API

use super::{GlobalArgs, Workspace};

/// Serve the API until the process is stopped
#[cfg(feature = "server")]
pub fn serve(global: &GlobalArgs, port: Option<u16>) -> anyhow::Result<()> {
    use authgate::server::ApiServer;

    let workspace = Workspace::open(global)?;
    let verifier = workspace.verifier()?;
    let port = port.unwrap_or(workspace.config.server.port);

    println!("Starting authgate API...");
    println!("Listening on http://localhost:{port}/api/v1");
    println!();
    println!("Press Ctrl+C to stop");

    ApiServer::new(verifier, workspace.store).serve(port)
}

/// Serve the API until the process is stopped
#[cfg(not(feature = "server"))]
pub fn serve(_global: &GlobalArgs, _port: Option<u16>) -> anyhow::Result<()> {
    anyhow::bail!("authgate was built without the `server` feature; rebuild with --features server")
}
