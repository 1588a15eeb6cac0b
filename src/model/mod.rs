// mob-rs: `ModOrganizer` Build Tool - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The project/group/plan data model (§3).
//!
//! ```text
//! rcfile::RcFile  +  db::ProjectDatabase
//!          \                /
//!           v              v
//!         resolver::resolve()
//!                  |
//!                  v
//!          model::plan::BuildPlan
//!          Vec<model::project::Project>
//! ```

pub mod group;
pub mod plan;
pub mod project;

pub use group::Group;
pub use plan::{BuildPlan, IgnoreMask};
pub use project::{Phase, Project, SourceSpec};
