//! Room repository port.

use crate::domain::foundation::{Repository, RoomId};
use crate::domain::room::Room;

/// Repository port for screening rooms. Rooms need no queries beyond the
/// base contract.
pub trait RoomRepository: Repository<Room, RoomId> {}

impl<T> RoomRepository for T where T: Repository<Room, RoomId> {}
