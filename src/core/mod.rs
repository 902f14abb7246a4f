pub mod constants;
pub mod error;
pub mod game_manager;
pub mod grid;
pub mod live;
pub mod meta;
pub mod player;
pub mod session;

pub use constants::*;
pub use error::{GameError, InvalidMove};
pub use game_manager::GameManager;
pub use grid::{GridBoard, GridGame, GridMove, GridSnapshot, Mode};
pub use live::{LiveState, LiveUpdates, Snapshot};
pub use meta::{ActiveBoard, MetaBoard, MetaGame, MetaMove, MetaSnapshot};
pub use player::{glyph, PlayerId, Seats, Symbol};
pub use session::{Session, SessionId, Status, Variant};
