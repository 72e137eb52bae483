//! Blue-green lifecycle of logical indices
//!
//! A logical indice `N` is served by two physical indices, `N_1` and `N_2`,
//! and an alias `N` pointing at exactly one of them:
//!
//! ```text
//!            alias N
//!               │
//!        ┌──────┴──────┐
//!        ▼             ┆
//!   ┌─────────┐   ┌─────────┐
//!   │   N_1   │   │   N_2   │
//!   │  (used) │   │ (unused)│
//!   └─────────┘   └─────────┘
//!        │  reindex    ▲
//!        └─────────────┘
//! ```
//!
//! - **create**: both indices are created if absent, the alias is pinned to `N_1` once
//! - **reindex**: documents are copied from the used index into the unused one
//! - **swap**: the alias moves to the unused index in one atomic update
//! - **clear**: the unused index is dropped and recreated empty
//!
//! Only swap touches the alias, and nothing ever clears the index it targets.

mod admin;
mod alias;
mod controller;
mod locks;
mod naming;
mod options;

pub use admin::{IndexAdmin, IndexCreation};
pub use alias::AliasResolver;
pub use controller::{BlueGreenController, IndiceCreation};
pub use locks::{IndiceGuard, IndiceLocks};
pub use naming::{AliasState, IndicePair};
pub use options::{ManagerOptions, TransitionLog};

pub(crate) use options::TransitionLogger;
