//! The `timequiz serve` command.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;

use timequiz_redirect::PathMap;

pub async fn execute(paths: Option<PathBuf>, addr: SocketAddr) -> Result<()> {
    let mut map = PathMap::defaults();
    if let Some(path) = &paths {
        map = map.overlay(PathMap::from_file(path)?);
    }

    eprintln!("Starting the server on {addr}");
    timequiz_redirect::serve(map, addr).await
}
