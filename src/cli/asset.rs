//! Asset command implementations
//!
//! `validate` and `create` are local-only; `import` and `update` package
//! first, then upload, then record the assigned id (and the zip digest) in
//! the directory's `asset_data.yml` sidecar. An unchanged digest skips the
//! upload entirely unless `--force` is given.

use std::path::{Path, PathBuf};

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use crate::asset::{self, PackagedAsset, SidecarData};
use crate::cli::args::{AssetCategoryArg, GlobalOptions, VisibilityArg};
use crate::cli::cloudspace::finish_batch;
use crate::cli::context::CommandContext;
use crate::client::Cons3rtApi;
use crate::client::models::BatchOutcome;
use crate::error::{Error, Result};

/// Run the asset validate command
pub fn validate(asset_dir: &Path) -> Result<()> {
    let asset = asset::validate(asset_dir)?;
    println!("Validated asset: {}", asset.name());
    Ok(())
}

/// Run the asset create command
pub fn create(asset_dir: &Path, dest_dir: Option<&Path>) -> Result<()> {
    let asset = asset::validate(asset_dir)?;
    let dest = match dest_dir {
        Some(dir) => dir.to_path_buf(),
        None => default_dest_dir()?,
    };
    let packaged = asset::package(&asset, &dest)?;

    println!("Created asset zip: {}", packaged.zip_path.display());
    println!("SHA-256: {}", packaged.sha256);
    Ok(())
}

/// Run the asset import command
pub async fn import(opts: &GlobalOptions, asset_dir: &Path, force: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let packaged = package_to_temp(asset_dir)?;

    let mut sidecar = SidecarData::load(asset_dir);
    let site = ctx.site_url().to_string();
    let project = ctx.project().map(str::to_string);

    if !force {
        if let (Some(existing_id), Some(hash)) = (
            sidecar.asset_id_for(&site, project.as_deref()),
            sidecar.zip_hash_for(&site, project.as_deref()),
        ) {
            if hash == packaged.sha256 {
                println!(
                    "Asset content is unchanged (already imported as id {}). Use --force to re-import.",
                    existing_id
                );
                return Ok(());
            }
        }
    }

    let bar = upload_bar(std::fs::metadata(&packaged.zip_path)?.len());
    let progress = |sent: u64, _total: u64| bar.set_position(sent);
    let asset_id = ctx
        .client
        .import_asset(&packaged.zip_path, Some(&progress))
        .await?;
    bar.finish_and_clear();

    sidecar.record(&site, project.as_deref(), asset_id, Some(&packaged.sha256));
    sidecar.save(asset_dir)?;

    println!(
        "{} Imported asset {} as id {}",
        "✓".green(),
        packaged.name,
        asset_id
    );
    Ok(())
}

/// Run the asset update command
pub async fn update(
    opts: &GlobalOptions,
    asset_dir: &Path,
    id_override: Option<u64>,
    force: bool,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let packaged = package_to_temp(asset_dir)?;

    let mut sidecar = SidecarData::load(asset_dir);
    let site = ctx.site_url().to_string();
    let project = ctx.project().map(str::to_string);

    let asset_id = id_override
        .or_else(|| sidecar.asset_id_for(&site, project.as_deref()))
        .ok_or_else(|| {
            Error::InvalidArgument(format!(
                "No asset id recorded for {} in {}; pass --id",
                site,
                asset::SIDECAR_FILE
            ))
        })?;

    if !force
        && sidecar.zip_hash_for(&site, project.as_deref()) == Some(packaged.sha256.as_str())
    {
        println!(
            "Asset content is unchanged (asset id {}). Use --force to re-upload.",
            asset_id
        );
        return Ok(());
    }

    let bar = upload_bar(std::fs::metadata(&packaged.zip_path)?.len());
    let progress = |sent: u64, _total: u64| bar.set_position(sent);
    ctx.client
        .update_asset_content(asset_id, &packaged.zip_path, Some(&progress))
        .await?;
    bar.finish_and_clear();

    sidecar.record(&site, project.as_deref(), asset_id, Some(&packaged.sha256));
    sidecar.save(asset_dir)?;

    println!(
        "{} Updated asset {} (id {})",
        "✓".green(),
        packaged.name,
        asset_id
    );
    Ok(())
}

/// Run the asset state command
pub async fn state(
    opts: &GlobalOptions,
    category: AssetCategoryArg,
    id: u64,
    state: &str,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.client
        .update_asset_state(category.into(), id, state)
        .await?;
    println!("Set asset {} state to {}", id, state);
    Ok(())
}

/// Run the asset visibility command
pub async fn visibility(opts: &GlobalOptions, id: u64, visibility: VisibilityArg) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let visibility = visibility.into();
    ctx.client.update_asset_visibility(id, visibility).await?;
    println!("Set asset {} visibility to {}", id, visibility);
    Ok(())
}

/// Run the asset delete command across one or more ids
pub async fn delete(opts: &GlobalOptions, ids: &[u64]) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut outcomes = Vec::new();
    for &asset_id in ids {
        match ctx.client.delete_asset(asset_id).await {
            Ok(()) => outcomes.push(BatchOutcome::ok(asset_id)),
            Err(err) => outcomes.push(BatchOutcome::fail(asset_id, err.to_string())),
        }
    }
    finish_batch("assets", outcomes, ctx.format)
}

/// Validate and package into the system temp directory for upload.
fn package_to_temp(asset_dir: &Path) -> Result<PackagedAsset> {
    let asset = asset::validate(asset_dir)?;
    let packaged = asset::package(&asset, &std::env::temp_dir())?;
    info!("Packaged {} for upload", packaged.zip_path.display());
    Ok(packaged)
}

fn default_dest_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| Error::Other("Could not determine home directory".to_string()))?;
    Ok(home.join("Downloads"))
}

fn upload_bar(total_bytes: u64) -> ProgressBar {
    let bar = ProgressBar::new(total_bytes);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {bytes}/{total_bytes}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}
