pub mod actions;
pub mod commands;
pub mod dispatch;

pub use actions::Action;

/// Parse the process arguments into an action.
pub fn start() -> Result<Action, clap::Error> {
    let matches = commands::new().get_matches();
    dispatch::handler(&matches)
}
