//! Parser and in-memory model for Generalized Vehicle Routing Problem (GVRP) instances.
//!
//! An instance file is read token by token ([`parsers::TokenReader`]) and turned into an
//! [`Instance`] owning the depot, the customers and the customer sets.  A [`Route`] borrows
//! customers from an instance to describe the visiting order of one vehicle.
pub use anyhow::Result;

use fnv::FnvHashMap;

pub type Map<K, V> = FnvHashMap<K, V>;

mod error;
pub use error::{Error, ErrorKind, Position};

pub mod dataset;
pub mod metrics;
pub mod model;
pub mod parsers;
pub mod route;
pub mod logging_setup;

pub use model::{Customer, CustomerId, CustomerSet, Instance, Point, SetId};
pub use parsers::{parse_gvrp, GvrpFmt, ParseInstance};
pub use route::Route;
