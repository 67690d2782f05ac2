use anyhow::{bail, Context, Result};
use std::path::Path;
use std::sync::Arc;

use scavenger_hunt_core::authoring;
use scavenger_hunt_core::location::{FixedPositionSource, UnsupportedPositionSource};
use scavenger_hunt_core::prelude::*;

use crate::output;

/// Everything a command needs once the catalog and the database are open.
pub struct App {
    catalog: Catalog,
    progress: ProgressStore,
    settings: UserSettings,
    config: EngineConfig,
}

impl App {
    pub fn open(hunts: &Path, db: &Path, config: Option<&Path>) -> Result<Self> {
        let config = match config {
            Some(path) => EngineConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => EngineConfig::default(),
        };

        let backend: Arc<dyn KeyValueStore> = Arc::new(
            SqliteStore::open(db)
                .with_context(|| format!("Failed to open progress database {}", db.display()))?,
        );

        Ok(Self {
            catalog: Catalog::load_dir(hunts),
            progress: ProgressStore::new(backend.clone()),
            settings: UserSettings::new(backend),
            config,
        })
    }

    pub async fn list(&self, json: bool) -> Result<()> {
        let listings = self.catalog.listings(&self.progress).await?;
        let selected = self.settings.selected_hunt().await?;

        if json {
            let rows: Vec<_> = listings
                .iter()
                .map(|listing| {
                    serde_json::json!({
                        "id": listing.id.as_str(),
                        "title": listing.title,
                        "description": listing.description,
                        "image": listing.image,
                        "completed": listing.progress.completed,
                        "total": listing.progress.total,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            output::print_listings(&listings, selected.as_ref());
        }
        Ok(())
    }

    pub async fn show(&self, hunt: Option<String>) -> Result<()> {
        let session = self.session(hunt, Arc::new(UnsupportedPositionSource)).await?;
        self.settings.select_hunt(&session.hunt().id).await?;

        output::print_hunt(&session.view());
        Ok(())
    }

    pub async fn check(
        &self,
        hunt: Option<String>,
        clue: usize,
        lat: f64,
        lon: f64,
        accuracy: f64,
    ) -> Result<()> {
        let index = clue.checked_sub(1).context("Clue numbers start at 1")?;
        let source = Arc::new(FixedPositionSource::at(ReportedPosition::new(lat, lon, accuracy)));
        let mut session = self.session(hunt, source).await?;
        tracing::debug!(hunt = %session.hunt().id, clue = index, lat, lon, accuracy, "checking in");

        if session.open_clue(index)?.is_solved() {
            println!("Already solved.");
            output::print_clue(session.clue_view().as_ref());
            return Ok(());
        }

        session.reveal_description()?;
        let outcome = session.check_location().await?;

        output::print_clue(session.clue_view().as_ref());
        println!();
        println!("{}", session.view().progress_text());
        if outcome.hunt_completed() {
            println!("All clues found. Hunt complete!");
        }
        Ok(())
    }

    pub async fn reset(&self, hunt: Option<String>, all: bool) -> Result<()> {
        if all {
            let removed = self.progress.clear_all().await?;
            println!("Cleared progress for {} hunt(s).", removed);
            return Ok(());
        }

        let hunt = self.resolve(hunt).await?;
        self.progress.clear(&hunt.id).await?;
        println!("Cleared progress for {}.", hunt.title);
        Ok(())
    }

    pub async fn settings(&self, map_reveal: Option<bool>) -> Result<()> {
        if let Some(enabled) = map_reveal {
            self.settings.set_map_reveal_enabled(enabled).await?;
        }

        let enabled = self.settings.map_reveal_enabled().await?;
        println!("map reveal: {}", if enabled { "on" } else { "off" });
        match self.settings.selected_hunt().await? {
            Some(hunt) => println!("selected hunt: {}", hunt),
            None => println!("selected hunt: none"),
        }
        Ok(())
    }

    async fn session(&self, hunt: Option<String>, source: Arc<dyn PositionSource>) -> Result<HuntSession> {
        let hunt = self.resolve(hunt).await?;
        let mut session = HuntSession::open(hunt, self.progress.clone(), source, &self.config).await?;
        session.set_map_reveal_enabled(self.settings.map_reveal_enabled().await?);
        Ok(session)
    }

    /// The named hunt, or the selected one when no name is given.
    async fn resolve(&self, hunt: Option<String>) -> Result<Arc<Hunt>> {
        let id = match hunt {
            Some(id) => HuntIdentifier::new(id),
            None => match self.settings.selected_hunt().await? {
                Some(id) => id,
                None => bail!("No hunt selected. Pass a hunt id or run `hunt show <id>` first."),
            },
        };

        Ok(self.catalog.get(&id)?)
    }
}

pub fn validate(file: &Path, print: bool) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let payload = HuntPayload::from_json(&json)?;

    let issues = authoring::validate(&payload);
    if !issues.is_empty() {
        for issue in &issues {
            eprintln!("  {}", issue);
        }
        bail!("{} has {} problem(s)", file.display(), issues.len());
    }

    let expected = authoring::file_name(&payload.title);
    println!("{} is valid.", file.display());
    if file.file_name().is_some_and(|name| name != expected.as_str()) {
        println!("Suggested file name: {}", expected);
    }

    if print {
        println!("{}", authoring::to_pretty_json(&payload)?);
    }
    Ok(())
}

pub fn distance(from_lat: f64, from_lon: f64, to_lat: f64, to_lon: f64) -> Result<()> {
    let from = Coordinate::new(from_lat, from_lon);
    let to = Coordinate::new(to_lat, to_lon);
    if !from.is_valid() || !to.is_valid() {
        bail!("Coordinates must be finite, with latitude in [-90, 90] and longitude in [-180, 180]");
    }

    let meters = haversine_distance(from, to);
    println!("{:.2} m ({})", meters, format_distance(meters));
    Ok(())
}
