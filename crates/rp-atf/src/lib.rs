//! `rp-atf`: arrival time functions for the `repeat` workspace.
//!
//! An arrival time function (ATF) maps a departure time to the earliest
//! arrival time achievable along some path.  Every ATF handled here has the
//! same four-parameter shape:
//!
//! ```text
//!   arrival(t) = alpha + delta   for zeta  <= t < alpha   (wait, then travel)
//!   arrival(t) = t + delta       for alpha <= t < beta    (leave immediately)
//!   arrival(t) = +inf            otherwise
//! ```
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`neighbour`]   | `NeighbouringAgent` (buffer capacity of an adjacent agent) |
//! | [`gamma`]       | `Gamma`, `GammaItem` (per-agent consumed buffer)           |
//! | [`edge`]        | `EdgeAtf` (immutable ATF + composition)                    |
//! | [`segment`]     | `Segment`, `lower_envelope`                                |
//! | [`compound`]    | `CompoundAtf<T>` (gapless merged profile)                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on all public types.     |

pub mod compound;
pub mod edge;
pub mod gamma;
pub mod neighbour;
pub mod segment;

#[cfg(test)]
mod tests;

pub use compound::CompoundAtf;
pub use edge::EdgeAtf;
pub use gamma::{Gamma, GammaItem};
pub use neighbour::NeighbouringAgent;
pub use segment::{Segment, lower_envelope};
