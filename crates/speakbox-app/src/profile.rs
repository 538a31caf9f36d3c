use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use speakbox_config::Config;

/// Default config shipped in the repo
const REPO_DEFAULT: &str = "config.json";

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Profiles live as `<name>.json` under one directory
pub struct ProfileStore {
    root: PathBuf,
    repo_default: PathBuf,
}

impl ProfileStore {
    /// `profiles/` in the per-user config directory
    pub fn user() -> anyhow::Result<Self> {
        let dirs = ProjectDirs::from("", "", "Speakbox").context("Could not find home directory")?;
        Ok(Self::at(dirs.config_dir().join("profiles"), REPO_DEFAULT))
    }

    pub fn at(root: impl Into<PathBuf>, repo_default: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            repo_default: repo_default.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn profile_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }

    /// Create the profile folder and seed `main.json` if missing
    pub fn init(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create {}", self.root.display()))?;

        let main_profile = self.profile_path("main");
        if !main_profile.exists() {
            let profile = Profile {
                name: "main".into(),
                value: self.repo_default()?,
            };
            fs::write(&main_profile, serde_json::to_string_pretty(&profile)?)?;
            tracing::info!("Created main profile in {}", self.root.display());
        }

        Ok(())
    }

    /// Load a profile by name, falling back to main, then to the repo default
    pub fn load(&self, name: &str) -> anyhow::Result<Config> {
        let profile_file = self.profile_path(name);
        if profile_file.exists() {
            return read_profile(&profile_file);
        }

        tracing::warn!("Profile {name} not found, falling back to main profile or repo default");
        let main_file = self.profile_path("main");
        if main_file.exists() {
            read_profile(&main_file)
        } else {
            self.repo_default()
        }
    }

    fn repo_default(&self) -> anyhow::Result<Config> {
        if !self.repo_default.exists() {
            tracing::warn!("{} not found, using built-in defaults", self.repo_default.display());
            return Ok(Config::new());
        }

        tracing::info!("Loading repo default config...");
        let file = File::open(&self.repo_default)?;
        let config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Invalid {}", self.repo_default.display()))?;
        Ok(config)
    }
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)?;
    let profile: Profile =
        serde_json::from_str(&data).with_context(|| format!("Invalid profile {}", path.display()))?;
    Ok(profile.value)
}
