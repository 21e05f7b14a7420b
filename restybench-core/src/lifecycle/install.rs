//! Builds the server distribution from its source archive.
//!
//! Layout under the install root:
//!
//! ```text
//! <root>/src/<archive>.tar.gz    downloaded archive (kept for reuse)
//! <root>/src/<archive>/          unpacked sources
//! <root>/nginx/sbin/nginx        installed binary (configure --prefix=<root>)
//! ```

use super::run_step;
use restybench_common::{BenchError, Result, ServerConfig};
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, info};

const ARCHIVE_SUFFIXES: [&str; 2] = [".tar.gz", ".tgz"];

/// File name of the archive at `url`, e.g. `ngx_openresty-1.4.2.8.tar.gz`.
pub(crate) fn archive_file_name(url: &str) -> Result<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let name = path.rsplit('/').next().unwrap_or(path);
    if name.is_empty() || !ARCHIVE_SUFFIXES.iter().any(|s| name.ends_with(s)) {
        return Err(BenchError::Config(format!(
            "source must point at a .tar.gz archive: {url}"
        )));
    }
    Ok(name)
}

/// Directory the archive unpacks into (the archive name without its suffix).
pub(crate) fn unpacked_dir_name(archive: &str) -> &str {
    ARCHIVE_SUFFIXES
        .iter()
        .find_map(|s| archive.strip_suffix(s))
        .unwrap_or(archive)
}

/// Download, unpack, configure, build and install the distribution into
/// `config.root`.
pub async fn install(config: &ServerConfig) -> Result<()> {
    let archive_name = archive_file_name(&config.source)?;
    let src_dir = config.root.join("src");
    tokio::fs::create_dir_all(&src_dir).await?;

    let archive = src_dir.join(archive_name);
    if archive.exists() {
        debug!("Reusing downloaded archive {}", archive.display());
    } else {
        download(&config.source, &archive).await?;
    }

    info!("Unpacking {}", archive_name);
    run_step(
        Command::new("tar")
            .arg("-xzf")
            .arg(&archive)
            .arg("-C")
            .arg(&src_dir),
        "tar",
    )
    .await
    .map_err(BenchError::Install)?;

    let build_dir = src_dir.join(unpacked_dir_name(archive_name));
    if !build_dir.is_dir() {
        return Err(BenchError::Install(format!(
            "archive did not unpack into {}",
            build_dir.display()
        )));
    }

    let prefix = format!("--prefix={}", config.root.display());
    build_step(&build_dir, "./configure", &[prefix.as_str()]).await?;
    build_step(&build_dir, "make", &[]).await?;
    build_step(&build_dir, "make", &["install"]).await?;

    if !config.nginx_bin().exists() {
        return Err(BenchError::Install(format!(
            "build finished but {} is missing",
            config.nginx_bin().display()
        )));
    }

    info!("Installed OpenResty into {}", config.root.display());
    Ok(())
}

async fn build_step(dir: &Path, program: &str, args: &[&str]) -> Result<()> {
    let step = std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");
    info!("Running `{}` in {}", step, dir.display());
    run_step(Command::new(program).args(args).current_dir(dir), &step)
        .await
        .map_err(BenchError::Install)?;
    Ok(())
}

/// Fetch `url` into `dest`, writing to a `.part` file first so an
/// interrupted download is never mistaken for a complete archive.
pub(crate) async fn download(url: &str, dest: &Path) -> Result<()> {
    info!("Downloading {}", url);

    let response = reqwest::get(url)
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| BenchError::Download(format!("{url}: {e}")))?;
    let body = response
        .bytes()
        .await
        .map_err(|e| BenchError::Download(format!("{url}: {e}")))?;

    let partial = dest.with_extension("part");
    tokio::fs::write(&partial, &body).await?;
    tokio::fs::rename(&partial, dest).await?;

    debug!("Downloaded {} bytes to {}", body.len(), dest.display());
    Ok(())
}
