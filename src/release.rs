//! ktlint release discovery and download
//!
//! Resolves a tagged (or latest) GitHub release of ktlint, picks the tool
//! asset, and streams it into the launcher-side cache directory. Every
//! attempt writes a diagnostic transcript that is deleted on success and
//! kept (with its path reported) on failure.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use url::Url;

use crate::error::{LaunchError, Result};
use crate::progress::DownloadProgress;

/// GitHub repository the ktlint binaries are published under
pub const KTLINT_REPO: &str = "pinterest/ktlint";
/// Default GitHub API endpoint; fetch functions take it as a parameter so
/// tests can point them at a local server
pub const GITHUB_API: &str = "https://api.github.com";
/// Bearer credential consumed for both metadata and asset requests
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// File name the downloaded tool is cached under
pub const TOOL_FILE: &str = "ktlint.jar";
/// Per-attempt diagnostic transcript, next to the tool itself
const TRANSCRIPT_FILE: &str = "download.log";

/// Request timeout for metadata and asset downloads
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("ktlaunch/", env!("CARGO_PKG_VERSION"));

/// Detached signatures and checksums are never the tool binary
const SKIPPED_ASSET_SUFFIXES: &[&str] = &[".asc", ".sig", ".md5", ".sha1", ".sha256", ".sha512"];

/// GitHub release metadata from the API
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Release tag name (e.g., "1.3.1")
    pub tag_name: String,
    /// List of downloadable assets
    pub assets: Vec<Asset>,
}

/// GitHub release asset (downloadable file)
#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    /// Asset filename (e.g., "ktlint")
    pub name: String,
    /// Direct download URL
    pub browser_download_url: String,
}

/// Caller-controlled fetch behavior
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Exact release tag; `None` or `"latest"` means the newest release
    pub tag: Option<String>,
    /// Bearer credential attached to both requests when present
    pub token: Option<String>,
    /// Progress bar toggle; cosmetic only
    pub show_progress: bool,
}

/// Return the cached tool, downloading it first if absent.
///
/// The cache policy is plain existence: present means reuse with no network
/// traffic at all, absent means fetch once. Concurrent launchers racing to
/// populate the directory are not guarded against.
pub fn ensure_tool(install_dir: &Path, api_base: &str, options: &FetchOptions) -> Result<PathBuf> {
    let tool = install_dir.join(TOOL_FILE);
    if tool.is_file() {
        return Ok(tool);
    }

    fs::create_dir_all(install_dir)?;
    let mut transcript = Transcript::create(install_dir.join(TRANSCRIPT_FILE))?;
    fetch_tool(&tool, api_base, options, &mut transcript)?;
    transcript.discard();
    Ok(tool)
}

fn fetch_tool(
    dest: &Path,
    api_base: &str,
    options: &FetchOptions,
    transcript: &mut Transcript,
) -> Result<()> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| LaunchError::ReleaseLookupFailed {
            reason: format!("failed to construct HTTP client: {e}"),
            transcript: transcript.display(),
        })?;

    let release = fetch_release_metadata(&client, api_base, options, transcript)?;
    let asset = select_asset(&release).ok_or_else(|| LaunchError::NoReleaseAsset {
        tag: release.tag_name.clone(),
        transcript: transcript.display(),
    })?;
    transcript.log(&format!(
        "selected asset {} from release {}",
        asset.name, release.tag_name
    ));
    download_asset(&client, asset, dest, options, transcript)
}

/// Metadata endpoint for a repository release; an absent tag and the literal
/// `latest` sentinel both mean the most recent published release
fn release_url(api_base: &str, repo: &str, tag: Option<&str>) -> String {
    match tag {
        Some(tag) if tag != "latest" => format!("{api_base}/repos/{repo}/releases/tags/{tag}"),
        _ => format!("{api_base}/repos/{repo}/releases/latest"),
    }
}

fn fetch_release_metadata(
    client: &Client,
    api_base: &str,
    options: &FetchOptions,
    transcript: &mut Transcript,
) -> Result<Release> {
    let url = release_url(api_base, KTLINT_REPO, options.tag.as_deref());
    transcript.log(&format!("GET {url}"));

    let lookup_failed = |reason: String, transcript: &Transcript| LaunchError::ReleaseLookupFailed {
        reason,
        transcript: transcript.display(),
    };

    let response = authorized(client.get(&url), options.token.as_deref())
        .send()
        .map_err(|e| {
            transcript.log(&format!("request failed: {e}"));
            lookup_failed(e.to_string(), transcript)
        })?;
    let status = response.status();
    transcript.log(&format!("HTTP {status}"));
    if !status.is_success() {
        return Err(lookup_failed(format!("{url} returned HTTP {status}"), transcript));
    }

    response.json().map_err(|e| {
        transcript.log(&format!("metadata parse failed: {e}"));
        lookup_failed(format!("unparseable release metadata: {e}"), transcript)
    })
}

/// First asset in metadata order that is not a detached signature or
/// checksum. The API does not guarantee a stable ordering across releases
/// carrying several artifacts; callers get whatever comes first.
pub fn select_asset(release: &Release) -> Option<&Asset> {
    release.assets.iter().find(|asset| {
        let name = asset.name.to_ascii_lowercase();
        !SKIPPED_ASSET_SUFFIXES
            .iter()
            .any(|suffix| name.ends_with(suffix))
    })
}

fn download_asset(
    client: &Client,
    asset: &Asset,
    dest: &Path,
    options: &FetchOptions,
    transcript: &mut Transcript,
) -> Result<()> {
    let download_failed = |reason: String, transcript: &Transcript| LaunchError::DownloadFailed {
        reason,
        transcript: transcript.display(),
    };

    let url = Url::parse(&asset.browser_download_url).map_err(|e| {
        transcript.log(&format!("bad asset URL {}: {e}", asset.browser_download_url));
        download_failed(format!("invalid asset URL: {e}"), transcript)
    })?;
    transcript.log(&format!("GET {url}"));

    let mut response = authorized(client.get(url.as_str()), options.token.as_deref())
        .send()
        .map_err(|e| {
            transcript.log(&format!("request failed: {e}"));
            download_failed(e.to_string(), transcript)
        })?;
    let status = response.status();
    transcript.log(&format!("HTTP {status}"));
    if !status.is_success() {
        return Err(download_failed(
            format!("{url} returned HTTP {status}"),
            transcript,
        ));
    }

    let total = response.content_length().unwrap_or(0);
    let progress = DownloadProgress::new(&asset.name, total, options.show_progress);

    match stream_to_file(&mut response, dest, &progress) {
        Ok(bytes) => {
            progress.finish();
            transcript.log(&format!("download complete ({bytes} bytes)"));
            Ok(())
        }
        Err(e) => {
            progress.abandon();
            transcript.log(&format!("download aborted: {e}"));
            // A partial file would satisfy the cache check on the next run
            let _ = fs::remove_file(dest);
            Err(download_failed(e.to_string(), transcript))
        }
    }
}

fn stream_to_file(
    response: &mut reqwest::blocking::Response,
    dest: &Path,
    progress: &DownloadProgress,
) -> std::io::Result<u64> {
    let mut file = fs::File::create(dest)?;
    let mut chunk = [0u8; 8192];
    let mut downloaded: u64 = 0;
    loop {
        let bytes_read = response.read(&mut chunk)?;
        if bytes_read == 0 {
            break;
        }
        file.write_all(&chunk[..bytes_read])?;
        downloaded += bytes_read as u64;
        progress.advance(bytes_read as u64);
    }
    Ok(downloaded)
}

fn authorized(
    request: reqwest::blocking::RequestBuilder,
    token: Option<&str>,
) -> reqwest::blocking::RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Diagnostic transcript for one fetch attempt.
///
/// Log-write failures are swallowed; the transcript must never turn a
/// working download into an error.
struct Transcript {
    path: PathBuf,
    file: fs::File,
}

impl Transcript {
    fn create(path: PathBuf) -> Result<Self> {
        let file = fs::File::create(&path)?;
        Ok(Self { path, file })
    }

    fn log(&mut self, line: &str) {
        let _ = writeln!(self.file, "{line}");
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }

    fn discard(self) {
        let _ = fs::remove_file(&self.path);
    }
}
