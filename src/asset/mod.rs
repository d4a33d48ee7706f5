//! Asset packaging, validation, and sidecar state
//!
//! The flow is a one-way state machine: an asset directory is Unvalidated
//! until [`structure::validate`] produces a [`ValidatedAsset`], which is the
//! only input [`packager::package`] accepts. Packaging yields a
//! [`PackagedAsset`] whose digest feeds the import-skip decision.

pub mod manifest;
pub mod packager;
pub mod sidecar;
pub mod structure;

pub use manifest::{AssetManifest, MANIFEST_FILE};
pub use packager::{PackagedAsset, file_sha256, package};
pub use sidecar::{SIDECAR_FILE, SidecarData, SiteAssetEntry};
pub use structure::{ValidatedAsset, validate};
