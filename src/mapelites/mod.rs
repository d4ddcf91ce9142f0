//! MAP-Elites quality-diversity search.
//!
//! The feature space is cut into a grid by one [`Descriptor`] per dimension;
//! the [`Archive`] keeps at most one elite per cell and only lets a strictly
//! better candidate take a cell over.
//!
//! # Key Types
//!
//! - [`MapElites`]: single archive
//! - [`MultiArchiveMapElites`]: several archives with independent descriptor
//!   sets over one genotype/solution space
//! - [`CoMapElites`]: two archives of partial genotypes merged into one
//!   solution before evaluation
//!
//! # References
//!
//! - Mouret & Clune (2015), *Illuminating search spaces by mapping elites*

mod archive;
mod coevolution;
mod config;
mod descriptor;
mod multi;
mod runner;

pub use archive::{Archive, Placement};
pub use coevolution::{CoMapElites, CoMapElitesState, Side};
pub use config::MapElitesConfig;
pub use descriptor::{Descriptor, Extractor};
pub use multi::{MultiArchiveMapElites, MultiArchiveState};
pub use runner::{MapElites, MapElitesState};
