//! Reads a submission out of an input directory.
//!
//! Files are matched by name anywhere within a few levels of the directory,
//! and inside any `.zip` bundle found there. Archives are read in memory and
//! never extracted to disk.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use walkdir::WalkDir;

use crate::error::ProofError;
use crate::types::{Account, Metadata, Post, ReferenceCorpus, Submission};

pub const ACCOUNT_FILE: &str = "account.json";
pub const POSTS_FILE: &str = "posts.json";
pub const METADATA_FILE: &str = "metadata.json";
pub const REFERENCE_FILE: &str = "reference.json";

const MAX_DEPTH: usize = 3;

#[derive(Debug, Default)]
struct InputFiles {
    account: Option<Vec<u8>>,
    posts: Option<Vec<u8>>,
    metadata: Option<Vec<u8>>,
    reference: Option<Vec<u8>>,
}

impl InputFiles {
    fn slot(&mut self, name: &str) -> Option<&mut Option<Vec<u8>>> {
        match name.to_lowercase().as_str() {
            ACCOUNT_FILE => Some(&mut self.account),
            POSTS_FILE => Some(&mut self.posts),
            METADATA_FILE => Some(&mut self.metadata),
            REFERENCE_FILE => Some(&mut self.reference),
            _ => None,
        }
    }

    /// First file found for a name wins.
    fn offer(
        &mut self,
        name: &str,
        contents: impl FnOnce() -> Result<Vec<u8>, ProofError>,
    ) -> Result<(), ProofError> {
        if let Some(slot) = self.slot(name) {
            if slot.is_none() {
                *slot = Some(contents()?);
            }
        }
        Ok(())
    }
}

/// Loads and validates the submission stored under `dir`.
///
/// `account.json` and `posts.json` are required. A missing `metadata.json`
/// falls back to `fallback_dlp_id`; a missing `reference.json` disables
/// uniqueness scoring.
pub fn load_submission(dir: &Path, fallback_dlp_id: u64) -> Result<Submission, ProofError> {
    if !dir.is_dir() {
        return Err(ProofError::input(format!(
            "input directory {} does not exist",
            dir.display()
        )));
    }

    let mut files = InputFiles::default();
    let mut archives = Vec::new();
    for entry in WalkDir::new(dir)
        .max_depth(MAX_DEPTH)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = entry.map_err(|err| ProofError::Io(format!("walk {}: {err}", dir.display())))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();
        if name.to_lowercase().ends_with(".zip") {
            archives.push(path.to_path_buf());
            continue;
        }
        files.offer(&name, || {
            fs::read(path).map_err(|err| ProofError::Io(format!("read {}: {err}", path.display())))
        })?;
    }

    for archive in &archives {
        read_archive(archive, &mut files)?;
    }

    let account: Account = parse_required(ACCOUNT_FILE, files.account.as_deref())?;
    let posts: Vec<Post> = parse_required(POSTS_FILE, files.posts.as_deref())?;
    let metadata = match files.metadata.as_deref() {
        Some(bytes) => parse(METADATA_FILE, bytes)?,
        None => Metadata::new(fallback_dlp_id),
    };
    let reference = match files.reference.as_deref() {
        Some(bytes) => Some(parse::<ReferenceCorpus>(REFERENCE_FILE, bytes)?),
        None => None,
    };

    Submission::new(account, posts, metadata, reference)
}

fn read_archive(path: &Path, files: &mut InputFiles) -> Result<(), ProofError> {
    let file = File::open(path).map_err(|err| ProofError::Io(format!("open {}: {err}", path.display())))?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|err| ProofError::input(format!("read archive {}: {err}", path.display())))?;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|err| ProofError::input(format!("read archive {}: {err}", path.display())))?;
        if !entry.is_file() {
            continue;
        }
        let name = entry
            .name()
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        files.offer(&name, || {
            let mut contents = Vec::new();
            entry
                .read_to_end(&mut contents)
                .map_err(|err| ProofError::Io(format!("read {name} from {}: {err}", path.display())))?;
            Ok(contents)
        })?;
    }
    Ok(())
}

fn parse_required<T: DeserializeOwned>(name: &str, bytes: Option<&[u8]>) -> Result<T, ProofError> {
    let bytes = bytes.ok_or_else(|| ProofError::input(format!("{name} not found")))?;
    parse(name, bytes)
}

fn parse<T: DeserializeOwned>(name: &str, bytes: &[u8]) -> Result<T, ProofError> {
    serde_json::from_slice(bytes).map_err(|err| ProofError::input(format!("parse {name}: {err}")))
}
