use std::fmt;
use itertools::Itertools;
use tracing::trace;

use crate::{Error, ErrorKind};
use crate::model::{Customer, CustomerId, Instance};

/// The visiting order of one vehicle.  The depot at either end is implicit.
///
/// A route borrows its customers from an [`Instance`], so it cannot outlive it.  Customers are
/// compared by identity (the same element of [`Instance::customers`]), and nothing stops the
/// same customer from being visited twice.
#[derive(Debug, Clone)]
pub struct Route<'a> {
  instance: &'a Instance,
  visits: Vec<&'a Customer>,
}

impl<'a> Route<'a> {
  pub fn new(instance: &'a Instance) -> Self {
    Route { instance, visits: Vec::new() }
  }

  pub fn instance(&self) -> &'a Instance { self.instance }

  /// Adds `customer` at the end of the route.  Fails with `InvalidParameter` if `customer` is
  /// not owned by the route's instance.
  pub fn append(&mut self, customer: &'a Customer) -> Result<(), Error> {
    if !self.instance.owns(customer) {
      return Err(Error::new(ErrorKind::InvalidParameter,
                            format!("customer {} is not part of instance {}", customer.id(), self.instance.name())));
    }
    self.visits.try_reserve(1)?;
    self.visits.push(customer);
    trace!(customer = customer.id().get(), len = self.visits.len(), "append");
    Ok(())
  }

  pub fn append_id(&mut self, id: CustomerId) -> Result<(), Error> {
    let instance = self.instance;
    let customer = instance.customer(id).ok_or_else(|| Error::new(
      ErrorKind::InvalidParameter,
      format!("instance {} has no customer {}", instance.name(), id),
    ))?;
    self.append(customer)
  }

  /// Removes the first visit of `customer`.  The route is left untouched if it is not visited.
  pub fn remove(&mut self, customer: &Customer) -> Result<(), Error> {
    let pos = self.position(customer).ok_or_else(|| Error::new(
      ErrorKind::CustomerNotFound,
      format!("customer {} is not in the route", customer.id()),
    ))?;
    self.visits.remove(pos);
    trace!(customer = customer.id().get(), pos, len = self.visits.len(), "remove");
    Ok(())
  }

  pub fn position(&self, customer: &Customer) -> Option<usize> {
    self.visits.iter().position(|&c| std::ptr::eq(c, customer))
  }

  pub fn contains(&self, customer: &Customer) -> bool {
    self.position(customer).is_some()
  }

  pub fn len(&self) -> usize { self.visits.len() }

  pub fn is_empty(&self) -> bool { self.visits.is_empty() }

  pub fn clear(&mut self) { self.visits.clear() }

  pub fn customers(&self) -> &[&'a Customer] { &self.visits }

  pub fn iter(&self) -> impl Iterator<Item=&'a Customer> + '_ {
    self.visits.iter().copied()
  }

  pub fn customer_ids(&self) -> Vec<CustomerId> {
    self.iter().map(Customer::id).collect()
  }

  /// Length of the closed tour depot -> customers -> depot, in rounded EUC_2D units.
  pub fn cost(&self) -> u64 {
    if self.visits.is_empty() {
      return 0;
    }
    let depot = self.instance.depot();
    std::iter::once(depot)
      .chain(self.iter().map(Customer::location))
      .chain(std::iter::once(depot))
      .tuple_windows()
      .map(|(a, b)| a.distance_to(&b) as u64)
      .sum()
  }

  /// Sum of the demands of the sets of the visited customers.
  pub fn demand(&self) -> u64 {
    self.iter()
      .filter_map(|c| self.instance.set_of(c))
      .map(|s| s.demand() as u64)
      .sum()
  }
}

impl<'a, 'r> IntoIterator for &'r Route<'a> {
  type Item = &'a Customer;
  type IntoIter = std::iter::Copied<std::slice::Iter<'r, &'a Customer>>;

  fn into_iter(self) -> Self::IntoIter {
    self.visits.iter().copied()
  }
}

impl fmt::Display for Route<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[{}]", self.iter().format_with(", ", |c, g| g(&format_args!("C{}(S{})", c.id(), c.set()))))
  }
}
