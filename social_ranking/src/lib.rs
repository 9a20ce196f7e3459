//! Order lifting and social ranking.
//!
//! Lifting rules extend a strict order over individuals to a preorder over
//! all the coalitions of a population. Social ranking rules go back from a
//! (possibly partial) preorder over coalitions to a ranking of the individuals.
//! Distances measure how far a ranking is from the order it should recover.
//!
//! ```
//! use social_ranking::*;
//!
//! let pop = population(&[1, 2, 3]);
//! let order = StrictOrder::from_ids(&[2, 3, 1])?;
//! let coalitions = lift_order(LiftingRule::Leximin, &order, &pop)?;
//! let ranked = social_rank(RankingRule::Lexcel, &coalitions, &pop)?.into_preorder(&pop);
//! assert_eq!(kendall_tau(&ranked, &order.to_preorder(), &pop), 0);
//!
//! # Ok::<(), RankingError>(())
//! ```
//!
//! See the [manual] for the rules and the command line.

mod assembly;
pub mod builder;
mod coalition;
mod config;
mod distance;
mod lifting;
pub mod manual;
mod preorder;
mod primitives;
mod ranking;

pub use crate::assembly::*;
pub use crate::coalition::*;
pub use crate::config::*;
pub use crate::distance::*;
pub use crate::lifting::*;
pub use crate::preorder::*;
pub use crate::primitives::*;
pub use crate::ranking::*;
