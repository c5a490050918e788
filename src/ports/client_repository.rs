//! Client repository port.

use crate::domain::client::Client;
use crate::domain::foundation::{ClientId, Repository};

/// Repository port for registered clients.
///
/// `update` replaces the whole client, loyalty ledger included. Only the
/// registration fields reach the backing file; the ledger is rebuilt from
/// tickets on load.
pub trait ClientRepository: Repository<Client, ClientId> {}

impl<T> ClientRepository for T where T: Repository<Client, ClientId> {}
