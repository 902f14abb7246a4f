pub mod requests;
pub mod responses;

pub use requests::{decode_move, parse_variant, GamePath};
pub use responses::{GamePlayerInfo, LobbyResponse};
