//! CONS3RT API data models
//!
//! Domain types returned by (or sent to) the site ReST API, organized by
//! resource type. Fields the API may omit are `Option`; fields a record is
//! meaningless without (ids, names) are required, so a structural mismatch
//! surfaces as a parse error instead of partial data.

mod asset;
mod batch;
mod cloud;
mod cloudspace;
mod deployment;
mod project;
mod team;
mod user;

pub use asset::{AssetCategory, AssetVisibility};
pub use batch::BatchOutcome;
pub use cloud::Cloud;
pub use cloudspace::{Cloudspace, RunSearchType};
pub use deployment::{Deployment, DeploymentRun, RunOptions, RunProperty};
pub use project::Project;
pub use team::Team;
pub use user::User;
