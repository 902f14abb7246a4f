pub mod sessions;
pub mod win_conditions;

pub use sessions::{
    create_session, current_state, join_session, open_live_updates, submit_move,
};
pub use win_conditions::{line_owner, lines_through, WINNING_LINES};
